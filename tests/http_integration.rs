// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the IPU HTTP client using wiremock.

#![cfg(feature = "http")]

use ipu_gpio::types::{Channel, OutletState, Pin};
use ipu_gpio::{
    DeviceClient, Error, GpioDriver, IpuClient, IpuClientBuilder, IpuDriver, Notifier, PduConfig,
    ProtocolError,
};
use wiremock::matchers::{basic_auth, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn status_body(labels: [&str; 8]) -> String {
    let mut body = String::from(
        "<?xml version=\"1.0\" encoding=\"GB2312\"?>\n<response>\n\
         <cur0>1.3</cur0>\n<stat0>normal</stat0>\n<curBan>1.3</curBan>\n\
         <tempBan>26</tempBan>\n<humBan>44</humBan>\n<statBan>normal</statBan>\n",
    );
    for (i, label) in labels.iter().enumerate() {
        body.push_str(&format!("<outletStat{i}>{label}</outletStat{i}>\n"));
    }
    body.push_str("<userVerifyRes>0</userVerifyRes>\n</response>\n");
    body
}

fn client_for(server: &MockServer) -> IpuClient {
    IpuClientBuilder::new()
        .host(server.uri())
        .credentials("admin", "secret")
        .build()
        .unwrap()
}

// ============================================================================
// IpuClient Tests
// ============================================================================

mod ipu_client {
    use super::*;

    #[tokio::test]
    async fn status_parses_telemetry_and_outlets() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/status.xml"))
            .and(basic_auth("admin", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_string(status_body([
                "on", "off", "off", "on", "off", "off", "off", "on",
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let status = client_for(&server).status().await.unwrap();

        assert!((status.telemetry.temperature_celsius - 26.0).abs() < f64::EPSILON);
        assert!((status.telemetry.humidity_percent - 44.0).abs() < f64::EPSILON);
        assert!((status.telemetry.current_amperes - 1.3).abs() < f64::EPSILON);
        assert_eq!(status.outlets[0], OutletState::On);
        assert_eq!(status.outlets[1], OutletState::Off);
        assert_eq!(status.outlets[3], OutletState::On);
        assert_eq!(status.outlets[7], OutletState::On);
    }

    #[tokio::test]
    async fn enable_sends_zero_based_outlet_field() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/control_outlet.htm"))
            .and(query_param("outlet3", "1"))
            .and(query_param("op", "0"))
            .and(query_param("submit", "Apply"))
            .and(basic_auth("admin", "secret"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .enable_outlets(Channel::new(4).unwrap())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn disable_sends_off_op() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/control_outlet.htm"))
            .and(query_param("outlet7", "1"))
            .and(query_param("op", "1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .disable_outlets(Channel::new(8).unwrap())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unauthorized_is_reported() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let result = client_for(&server).status().await;
        assert!(matches!(result, Err(ProtocolError::AuthenticationFailed)));
    }

    #[tokio::test]
    async fn server_error_is_connection_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .enable_outlets(Channel::new(1).unwrap())
            .await;
        assert!(matches!(result, Err(ProtocolError::ConnectionFailed(msg)) if msg.contains("500")));
    }

    #[tokio::test]
    async fn truncated_status_is_invalid_response() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/status.xml"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("<response><curBan>0</curBan>"),
            )
            .mount(&server)
            .await;

        let result = client_for(&server).status().await;
        assert!(matches!(result, Err(ProtocolError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn unreachable_host_is_http_error() {
        let client = IpuClientBuilder::new()
            .host("127.0.0.1:1")
            .build()
            .unwrap();
        assert!(matches!(client.status().await, Err(ProtocolError::Http(_))));
    }
}

// ============================================================================
// Driver over HTTP
// ============================================================================

mod driver {
    use super::*;

    fn driver_for(server: &MockServer) -> IpuDriver<IpuClient> {
        let uri = server.uri();
        let config = PduConfig::new("pdu.lan").with_credentials("admin", "secret");
        IpuDriver::new("rack", config, Notifier::new(), move |config| {
            let (username, password) = config.credentials();
            IpuClientBuilder::new()
                .host(uri.clone())
                .credentials(username, password)
                .build()
        })
    }

    #[tokio::test]
    async fn prepare_applies_initial_state_then_polls() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/control_outlet.htm"))
            .and(query_param("outlet3", "1"))
            .and(query_param("op", "0"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/status.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(status_body([
                "off", "off", "off", "on", "off", "off", "off", "off",
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let driver = driver_for(&server);
        driver.register_output(Pin::new(3).unwrap(), Some(true)).unwrap();
        driver.prepare().await.unwrap();

        assert!(driver.read(Pin::new(3).unwrap()));
        assert!(!driver.read(Pin::new(0).unwrap()));
        assert!(driver.telemetry().is_some());

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].url.path(), "/control_outlet.htm");
        assert_eq!(requests[1].url.path(), "/status.xml");
    }

    #[tokio::test]
    async fn unknown_label_over_the_wire_keeps_cached_state() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/status.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(status_body(["on"; 8])))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/status.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(status_body([
                "off", "off", "cycling", "off", "off", "off", "off", "off",
            ])))
            .mount(&server)
            .await;

        let driver = driver_for(&server);
        driver.prepare().await.unwrap();
        assert!(driver.read(Pin::new(2).unwrap()));

        driver.run().await.unwrap();
        assert!(driver.read(Pin::new(2).unwrap()));
        assert!(!driver.read(Pin::new(1).unwrap()));
    }

    #[tokio::test]
    async fn http_driver_without_host_fails_prepare() {
        let driver = IpuDriver::http("rack", PduConfig::default(), Notifier::new());

        assert!(matches!(
            driver.prepare().await,
            Err(Error::Protocol(ProtocolError::InvalidAddress(_)))
        ));
        assert!(!driver.is_connected().await);
    }
}
