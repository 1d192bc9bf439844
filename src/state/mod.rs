// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Locally cached view of the PDU.
//!
//! [`StateCache`] holds the last known state of every outlet together with
//! the latest telemetry. Host reads are answered from it without device I/O.

mod state_cache;

pub use state_cache::{OutletChange, StateCache};
