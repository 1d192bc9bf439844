// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! PDU telemetry and status document parsing.
//!
//! The IPU 163682 reports sensor readings and outlet states in a single
//! `status.xml` document. [`parse_status_xml`] decodes it into a
//! [`PduStatus`](crate::protocol::PduStatus).

mod status_parser;

pub use status_parser::parse_status_xml;

/// Sensor readings from the last completed poll.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Telemetry {
    /// Temperature in degrees Celsius.
    pub temperature_celsius: f64,
    /// Relative humidity in percent.
    pub humidity_percent: f64,
    /// Total current draw in amperes.
    pub current_amperes: f64,
}
