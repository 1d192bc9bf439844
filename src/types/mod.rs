// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for outlet addressing and state.
//!
//! # Types
//!
//! - [`Pin`] - Host-facing outlet index (0-7)
//! - [`Channel`] - Device outlet number (1-8)
//! - [`OutletState`] - On/Off/Unknown outlet state

mod outlet;
mod pin;

pub use outlet::OutletState;
pub use pin::{Channel, OUTLET_COUNT, Pin, PinValidator, validate_pin};
