// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plugin options for the IPU driver.
//!
//! Hosts hand the driver a loosely typed option map. [`PduConfig::from_options`]
//! applies defaults, rejects unknown keys and validates every value before the
//! driver is prepared.

use std::net::IpAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Kind of value a plugin option accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// IP address or RFC 1123 hostname; empty means unset.
    IpOrHost,
    /// Arbitrary string, surrounding whitespace stripped.
    StrippedString,
    /// Float number of seconds, at least [`PduConfig::MIN_STATE_POLL`].
    PollInterval,
}

/// Description of one recognized plugin option.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginOption {
    /// Option key in the host's configuration.
    pub name: &'static str,
    /// Value used when the host does not set the option.
    pub default: serde_json::Value,
    /// Accepted value kind.
    pub kind: OptionKind,
}

/// Configuration for an IPU 163682 PDU.
///
/// # Examples
///
/// ```
/// use ipu_gpio::PduConfig;
/// use std::time::Duration;
///
/// let config = PduConfig::from_options(serde_json::json!({
///     "host": "pdu.lan",
///     "state_poll": 2.5,
/// }))
/// .unwrap();
///
/// assert_eq!(config.host(), "pdu.lan");
/// assert_eq!(config.credentials(), ("admin", "admin"));
/// assert_eq!(config.state_poll_interval(), Duration::from_millis(2500));
///
/// // Builder style
/// let config = PduConfig::new("192.168.1.50")
///     .with_credentials("ops", "secret")
///     .with_state_poll(1.0);
/// assert_eq!(config.state_poll(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PduConfig {
    host: String,
    username: String,
    password: String,
    state_poll: f64,
}

impl PduConfig {
    /// Default login for the PDU web interface.
    pub const DEFAULT_USERNAME: &'static str = "admin";
    /// Default password for the PDU web interface.
    pub const DEFAULT_PASSWORD: &'static str = "admin";
    /// Default poll interval in seconds.
    pub const DEFAULT_STATE_POLL: f64 = 10.0;
    /// Minimum poll interval in seconds.
    pub const MIN_STATE_POLL: f64 = 0.1;

    /// Creates a configuration for the given host with default options.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    /// Loads and validates options from a host option map.
    ///
    /// Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for unknown keys, wrongly typed values, an
    /// invalid host or a poll interval below the minimum.
    pub fn from_options(options: serde_json::Value) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_value(options)?;
        config.validate()
    }

    /// Normalizes and validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the host or poll interval is invalid.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        self.host = self.host.trim().to_string();
        self.username = self.username.trim().to_string();
        self.password = self.password.trim().to_string();

        if !self.host.is_empty() && !is_ip_or_host(&self.host) {
            return Err(ConfigError::InvalidHost(self.host));
        }

        if !self.state_poll.is_finite() || self.state_poll < Self::MIN_STATE_POLL {
            return Err(ConfigError::InvalidStatePoll {
                min: Self::MIN_STATE_POLL,
                actual: self.state_poll,
            });
        }

        Ok(self)
    }

    /// Returns the recognized options with their defaults.
    #[must_use]
    pub fn plugin_options() -> Vec<PluginOption> {
        vec![
            PluginOption {
                name: "host",
                default: serde_json::Value::from(""),
                kind: OptionKind::IpOrHost,
            },
            PluginOption {
                name: "username",
                default: serde_json::Value::from(Self::DEFAULT_USERNAME),
                kind: OptionKind::StrippedString,
            },
            PluginOption {
                name: "password",
                default: serde_json::Value::from(Self::DEFAULT_PASSWORD),
                kind: OptionKind::StrippedString,
            },
            PluginOption {
                name: "state_poll",
                default: serde_json::Value::from(Self::DEFAULT_STATE_POLL),
                kind: OptionKind::PollInterval,
            },
        ]
    }

    /// Sets the login credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Sets the poll interval in seconds.
    #[must_use]
    pub fn with_state_poll(mut self, seconds: f64) -> Self {
        self.state_poll = seconds;
        self
    }

    /// Returns the host; empty when unset.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the `(username, password)` pair.
    #[must_use]
    pub fn credentials(&self) -> (&str, &str) {
        (&self.username, &self.password)
    }

    /// Returns the poll interval in seconds.
    #[must_use]
    pub fn state_poll(&self) -> f64 {
        self.state_poll
    }

    /// Returns the poll interval as a `Duration`.
    ///
    /// Values below the minimum are raised to it; values that do not fit a
    /// `Duration` fall back to the default.
    #[must_use]
    pub fn state_poll_interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.state_poll.max(Self::MIN_STATE_POLL))
            .unwrap_or_else(|_| Duration::from_secs_f64(Self::DEFAULT_STATE_POLL))
    }
}

impl Default for PduConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            username: Self::DEFAULT_USERNAME.to_string(),
            password: Self::DEFAULT_PASSWORD.to_string(),
            state_poll: Self::DEFAULT_STATE_POLL,
        }
    }
}

fn is_ip_or_host(value: &str) -> bool {
    value.parse::<IpAddr>().is_ok() || is_rfc_hostname(value)
}

fn is_rfc_hostname(value: &str) -> bool {
    if value.len() > 253 {
        return false;
    }
    value.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_from_empty_map() {
        let config = PduConfig::from_options(serde_json::json!({})).unwrap();
        assert_eq!(config.host(), "");
        assert_eq!(config.credentials(), ("admin", "admin"));
        assert!((config.state_poll() - 10.0).abs() < f64::EPSILON);
        assert_eq!(config.state_poll_interval(), Duration::from_secs(10));
    }

    #[test]
    fn strings_are_stripped() {
        let config = PduConfig::from_options(serde_json::json!({
            "host": "  10.0.0.5 ",
            "username": " ops ",
            "password": "\tpw\n",
        }))
        .unwrap();
        assert_eq!(config.host(), "10.0.0.5");
        assert_eq!(config.credentials(), ("ops", "pw"));
    }

    #[test]
    fn accepts_ips_and_hostnames() {
        for host in ["192.168.1.1", "::1", "pdu", "pdu-01.rack.example.com"] {
            assert!(
                PduConfig::new(host).validate().is_ok(),
                "{host} should be accepted"
            );
        }
    }

    #[test]
    fn rejects_invalid_hosts() {
        for host in ["-pdu", "pdu-", "pdu..lan", "p_du", "pdu lan", "http://pdu"] {
            assert!(
                matches!(
                    PduConfig::new(host).validate(),
                    Err(ConfigError::InvalidHost(_))
                ),
                "{host} should be rejected"
            );
        }
    }

    #[test]
    fn state_poll_minimum() {
        assert!(PduConfig::new("").with_state_poll(0.1).validate().is_ok());
        assert!(matches!(
            PduConfig::new("").with_state_poll(0.05).validate(),
            Err(ConfigError::InvalidStatePoll { .. })
        ));
        assert!(matches!(
            PduConfig::new("").with_state_poll(f64::NAN).validate(),
            Err(ConfigError::InvalidStatePoll { .. })
        ));
    }

    #[test]
    fn unknown_keys_rejected() {
        let result = PduConfig::from_options(serde_json::json!({ "port": 80 }));
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn wrong_types_rejected() {
        let result = PduConfig::from_options(serde_json::json!({ "state_poll": "fast" }));
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn state_poll_interval_never_panics() {
        let config = PduConfig::new("").with_state_poll(f64::INFINITY);
        assert_eq!(config.state_poll_interval(), Duration::from_secs(10));

        let config = PduConfig::new("").with_state_poll(-3.0);
        assert_eq!(config.state_poll_interval(), Duration::from_millis(100));
    }

    #[test]
    fn plugin_options_list_defaults() {
        let options = PduConfig::plugin_options();
        let names: Vec<_> = options.iter().map(|o| o.name).collect();
        assert_eq!(names, ["host", "username", "password", "state_poll"]);
        assert_eq!(options[3].default, serde_json::json!(10.0));
        assert_eq!(options[0].kind, OptionKind::IpOrHost);
    }
}
