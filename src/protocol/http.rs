// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP client for the Intellinet IPU 163682.

use std::time::Duration;

use reqwest::{Client, Response};

use crate::config::PduConfig;
use crate::error::ProtocolError;
use crate::protocol::{DeviceClient, PduStatus};
use crate::telemetry::parse_status_xml;
use crate::types::Channel;

const STATUS_PATH: &str = "status.xml";
const CONTROL_PATH: &str = "control_outlet.htm";

/// Operation codes accepted by `control_outlet.htm`.
#[derive(Debug, Clone, Copy)]
enum OutletOp {
    On,
    Off,
}

impl OutletOp {
    const fn code(self) -> &'static str {
        match self {
            Self::On => "0",
            Self::Off => "1",
        }
    }
}

/// HTTP client for an IPU 163682 PDU.
///
/// Status is read from `/status.xml`; outlets are switched through
/// `/control_outlet.htm`. Requests use HTTP basic authentication.
///
/// # Examples
///
/// ```no_run
/// use ipu_gpio::protocol::{DeviceClient, IpuClient};
/// use ipu_gpio::types::Channel;
/// use ipu_gpio::PduConfig;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = PduConfig::new("192.168.1.50").with_credentials("admin", "admin");
/// let client = IpuClient::from_config(&config)?;
///
/// let status = client.status().await?;
/// println!("{:.1} °C", status.telemetry.temperature_celsius);
///
/// client.enable_outlets(Channel::new(4)?).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct IpuClient {
    base_url: String,
    client: Client,
    credentials: (String, String),
}

impl IpuClient {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a client from plugin options.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidAddress` if no host is configured, or
    /// `ProtocolError::Http` if the HTTP client cannot be created.
    pub fn from_config(config: &PduConfig) -> Result<Self, ProtocolError> {
        let (username, password) = config.credentials();
        IpuClientBuilder::new()
            .host(config.host())
            .credentials(username, password)
            .build()
    }

    /// Returns the base URL of the device.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn get(&self, path: &str, query: &[(String, &str)]) -> Result<Response, ProtocolError> {
        let url = self.url(path);

        tracing::debug!(url = %url, ?query, "Sending PDU request");

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.credentials.0, Some(&self.credentials.1))
            .query(query)
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ProtocolError::AuthenticationFailed);
        }

        if !response.status().is_success() {
            return Err(ProtocolError::ConnectionFailed(format!(
                "HTTP {} - {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        Ok(response)
    }

    async fn set_outlet(&self, channel: Channel, op: OutletOp) -> Result<(), ProtocolError> {
        let query = [
            (format!("outlet{}", channel.outlet_index()), "1"),
            ("op".to_string(), op.code()),
            ("submit".to_string(), "Apply"),
        ];
        self.get(CONTROL_PATH, &query).await?;
        Ok(())
    }
}

impl DeviceClient for IpuClient {
    async fn status(&self) -> Result<PduStatus, ProtocolError> {
        let body = self
            .get(STATUS_PATH, &[])
            .await?
            .text()
            .await
            .map_err(ProtocolError::Http)?;

        tracing::trace!(body = %body, "Received PDU status");

        Ok(parse_status_xml(&body)?)
    }

    async fn enable_outlets(&self, channel: Channel) -> Result<(), ProtocolError> {
        self.set_outlet(channel, OutletOp::On).await
    }

    async fn disable_outlets(&self, channel: Channel) -> Result<(), ProtocolError> {
        self.set_outlet(channel, OutletOp::Off).await
    }
}

/// Builder for creating an [`IpuClient`] with custom settings.
#[derive(Debug, Default)]
pub struct IpuClientBuilder {
    host: Option<String>,
    username: Option<String>,
    password: Option<String>,
    timeout: Option<Duration>,
}

impl IpuClientBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the host address.
    ///
    /// An explicit `http://` or `https://` prefix is kept as given.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets authentication credentials.
    #[must_use]
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// Credentials default to the PDU's factory login.
    ///
    /// # Errors
    ///
    /// Returns error if host is not set or client creation fails.
    pub fn build(self) -> Result<IpuClient, ProtocolError> {
        let host = self
            .host
            .map(|h| h.trim().trim_end_matches('/').to_string())
            .filter(|h| !h.is_empty())
            .ok_or_else(|| ProtocolError::InvalidAddress("host is required".to_string()))?;

        let base_url = if host.starts_with("http://") || host.starts_with("https://") {
            host
        } else {
            format!("http://{host}")
        };

        let client = Client::builder()
            .timeout(self.timeout.unwrap_or(IpuClient::DEFAULT_TIMEOUT))
            .build()
            .map_err(ProtocolError::Http)?;

        let credentials = (
            self.username
                .unwrap_or_else(|| PduConfig::DEFAULT_USERNAME.to_string()),
            self.password
                .unwrap_or_else(|| PduConfig::DEFAULT_PASSWORD.to_string()),
        );

        Ok(IpuClient {
            base_url,
            client,
            credentials,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_missing_host() {
        assert!(matches!(
            IpuClientBuilder::new().build(),
            Err(ProtocolError::InvalidAddress(_))
        ));
    }

    #[test]
    fn builder_empty_host() {
        assert!(matches!(
            IpuClientBuilder::new().host("  ").build(),
            Err(ProtocolError::InvalidAddress(_))
        ));
    }

    #[test]
    fn base_url_adds_scheme() {
        let client = IpuClientBuilder::new().host("192.168.1.50").build().unwrap();
        assert_eq!(client.base_url(), "http://192.168.1.50");
        assert_eq!(client.url(STATUS_PATH), "http://192.168.1.50/status.xml");
    }

    #[test]
    fn base_url_keeps_explicit_scheme() {
        let client = IpuClientBuilder::new()
            .host("https://pdu.lan/")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "https://pdu.lan");
    }

    #[test]
    fn default_credentials() {
        let client = IpuClientBuilder::new().host("pdu").build().unwrap();
        assert_eq!(client.credentials, ("admin".to_string(), "admin".to_string()));
    }

    #[test]
    fn from_config_uses_credentials() {
        let config = PduConfig::new("pdu").with_credentials("ops", "pw");
        let client = IpuClient::from_config(&config).unwrap();
        assert_eq!(client.credentials, ("ops".to_string(), "pw".to_string()));
    }

    #[test]
    fn from_config_without_host_fails() {
        let config = PduConfig::default();
        assert!(matches!(
            IpuClient::from_config(&config),
            Err(ProtocolError::InvalidAddress(_))
        ));
    }

    #[test]
    fn op_codes() {
        assert_eq!(OutletOp::On.code(), "0");
        assert_eq!(OutletOp::Off.code(), "1");
    }
}
