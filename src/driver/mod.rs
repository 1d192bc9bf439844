// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host-facing GPIO driver contract and its IPU implementation.
//!
//! A host automation framework drives a [`GpioDriver`] through a fixed
//! lifecycle:
//!
//! 1. Load options ([`GpioDriver::plugin_options`]) and validate pins
//!    ([`GpioDriver::pin_validator`]).
//! 2. Register outputs with optional initial states.
//! 3. [`prepare`](GpioDriver::prepare) once.
//! 4. Call [`run`](GpioDriver::run) on a schedule (see [`Poller`]) while
//!    serving [`read`](GpioDriver::read) and [`write`](GpioDriver::write).
//! 5. [`cleanup`](GpioDriver::cleanup) on shutdown.

mod ipu;
mod poller;

pub use ipu::{IpuDriver, WritePolicy};
pub use poller::Poller;

use std::future::Future;

use crate::config::PluginOption;
use crate::error::Result;
use crate::types::{Pin, PinValidator};

/// Multi-pin GPIO driver consumed by a host automation framework.
///
/// Futures returned by the async methods are `Send`, so a driver shared
/// through `Arc` can be driven from spawned tasks.
pub trait GpioDriver: Send + Sync {
    /// Returns the options this driver recognizes, with defaults.
    fn plugin_options() -> Vec<PluginOption>;

    /// Returns the validator the host applies to raw pin identifiers.
    fn pin_validator() -> PinValidator;

    /// Returns the host-assigned instance name.
    fn instance_name(&self) -> &str;

    /// Registers a pin as an output before the driver is prepared.
    ///
    /// `initial` is applied once during [`prepare`](Self::prepare).
    ///
    /// # Errors
    ///
    /// Returns `Error::AlreadyPrepared` once the driver has been prepared.
    fn register_output(&self, pin: Pin, initial: Option<bool>) -> Result<()>;

    /// Connects to the device, applies initial states and seeds the cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the device handle cannot be created or the
    /// initial commands or first poll fail.
    fn prepare(&self) -> impl Future<Output = Result<()>> + Send;

    /// Runs one poll cycle.
    ///
    /// # Errors
    ///
    /// Returns `Error::Offline` when disconnected and propagates device
    /// failures. No retry is attempted.
    fn run(&self) -> impl Future<Output = Result<()>> + Send;

    /// Releases the device. Safe to call any number of times.
    fn cleanup(&self) -> impl Future<Output = ()> + Send;

    /// Returns the cached state of a pin without device I/O.
    fn read(&self, pin: Pin) -> bool;

    /// Switches a pin.
    ///
    /// # Errors
    ///
    /// Returns `Error::Offline` when disconnected and propagates device
    /// failures.
    fn write(&self, pin: Pin, state: bool) -> impl Future<Output = Result<()>> + Send;
}
