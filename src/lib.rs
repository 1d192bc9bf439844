// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IPU GPIO - A Rust driver exposing a networked PDU as GPIO pins.
//!
//! This library adapts the eight switchable outlets of an Intellinet
//! IPU 163682 power-distribution-unit to the pin-oriented contract of a host
//! automation framework.
//!
//! # Features
//!
//! - **Pin mapping**: host pins 0-7 map to device outlets 1-8
//! - **State cache**: reads never touch the device; a periodic poll keeps
//!   outlet states and telemetry (temperature, humidity, current) fresh
//! - **Notifications**: a payload-less [`Notifier`] fires after every poll
//!   and every successful write
//! - **Offline handling**: operations without a device connection fail with
//!   [`Error::Offline`]
//!
//! # Consistency
//!
//! By default a write does not update the cache. The new outlet state
//! becomes visible once the next poll reports it. Use
//! [`WritePolicy::Optimistic`] to cache written states immediately.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use ipu_gpio::{GpioDriver, IpuDriver, Notifier, PduConfig};
//! use ipu_gpio::types::Pin;
//!
//! #[tokio::main]
//! async fn main() -> ipu_gpio::Result<()> {
//!     let config = PduConfig::from_options(serde_json::json!({
//!         "host": "192.168.1.50",
//!         "username": "admin",
//!         "password": "admin",
//!         "state_poll": 5.0,
//!     }))?;
//!
//!     let notifier = Notifier::new();
//!     let mut changes = notifier.subscribe();
//!
//!     let driver = Arc::new(IpuDriver::http("pdu", config, notifier));
//!     driver.register_output(Pin::new(0)?, Some(true))?;
//!     driver.register_output(Pin::new(1)?, None)?;
//!     driver.prepare().await?;
//!
//!     let _poller = driver.spawn_poller();
//!
//!     while changes.wait().await.is_some() {
//!         println!("outlet 1 on: {}", driver.read(Pin::new(1)?));
//!     }
//!
//!     driver.cleanup().await;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod event;
pub mod protocol;
pub mod state;
pub mod telemetry;
pub mod types;

pub use config::{OptionKind, PduConfig, PluginOption};
pub use driver::{GpioDriver, IpuDriver, Poller, WritePolicy};
pub use error::{ConfigError, Error, ParseError, ProtocolError, Result, ValueError};
pub use event::{Notifier, NotifierListener};
#[cfg(feature = "http")]
pub use protocol::{IpuClient, IpuClientBuilder};
pub use protocol::{DeviceClient, PduStatus};
pub use state::{OutletChange, StateCache};
pub use telemetry::Telemetry;
pub use types::{Channel, OutletState, Pin};
