// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Communication with the PDU.
//!
//! The driver talks to the device exclusively through the [`DeviceClient`]
//! trait. [`IpuClient`] implements it over the PDU's HTTP interface.

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{IpuClient, IpuClientBuilder};

use std::future::Future;

use crate::error::ProtocolError;
use crate::telemetry::Telemetry;
use crate::types::{Channel, OUTLET_COUNT, OutletState};

/// Snapshot returned by a status query.
///
/// Outlet labels are already decoded; `outlets[i]` belongs to pin `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct PduStatus {
    /// Sensor readings.
    pub telemetry: Telemetry,
    /// State of every outlet, in outlet order.
    pub outlets: [OutletState; OUTLET_COUNT],
}

/// Client that can query and switch PDU outlets.
///
/// Implementations perform no retries; every failure is returned to the
/// caller.
pub trait DeviceClient: Send + Sync {
    /// Queries telemetry and all outlet states.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the device cannot be reached or the reply
    /// is rejected.
    fn status(&self) -> impl Future<Output = Result<PduStatus, ProtocolError>> + Send;

    /// Switches an outlet on.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the command cannot be delivered.
    fn enable_outlets(
        &self,
        channel: Channel,
    ) -> impl Future<Output = Result<(), ProtocolError>> + Send;

    /// Switches an outlet off.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the command cannot be delivered.
    fn disable_outlets(
        &self,
        channel: Channel,
    ) -> impl Future<Output = Result<(), ProtocolError>> + Send;
}
