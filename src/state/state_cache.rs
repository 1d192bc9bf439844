// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cached outlet state and telemetry.

use crate::protocol::PduStatus;
use crate::telemetry::Telemetry;
use crate::types::{OUTLET_COUNT, OutletState, Pin};

/// A single outlet whose cached state changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutletChange {
    /// The affected pin.
    pub pin: Pin,
    /// State before the change.
    pub from: OutletState,
    /// State after the change.
    pub to: OutletState,
}

/// Last known state of every outlet plus the latest telemetry.
///
/// Every pin has an entry from construction on; pins start out as
/// [`OutletState::Unknown`].
///
/// # Examples
///
/// ```
/// use ipu_gpio::protocol::PduStatus;
/// use ipu_gpio::state::StateCache;
/// use ipu_gpio::telemetry::Telemetry;
/// use ipu_gpio::types::{OutletState, Pin};
///
/// let mut cache = StateCache::new();
/// let pin = Pin::new(2).unwrap();
/// assert_eq!(cache.outlet(pin), OutletState::Unknown);
///
/// let mut outlets = [OutletState::Off; 8];
/// outlets[2] = OutletState::On;
/// cache.apply_status(&PduStatus { telemetry: Telemetry::default(), outlets });
///
/// assert_eq!(cache.outlet(pin), OutletState::On);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateCache {
    outlets: [OutletState; OUTLET_COUNT],
    telemetry: Option<Telemetry>,
}

impl StateCache {
    /// Creates a cache with every outlet unknown and no telemetry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached state of an outlet.
    #[must_use]
    pub fn outlet(&self, pin: Pin) -> OutletState {
        self.outlets[pin.slot()]
    }

    /// Returns all cached outlet states in pin order.
    #[must_use]
    pub fn outlets(&self) -> &[OutletState; OUTLET_COUNT] {
        &self.outlets
    }

    /// Returns the telemetry from the last applied status, if any.
    #[must_use]
    pub fn telemetry(&self) -> Option<Telemetry> {
        self.telemetry
    }

    /// Resets an outlet to the `Unknown` placeholder.
    pub fn seed(&mut self, pin: Pin) {
        self.outlets[pin.slot()] = OutletState::Unknown;
    }

    /// Records a known state for one outlet.
    ///
    /// Returns the change, or `None` if the outlet already had that state.
    pub fn set(&mut self, pin: Pin, state: OutletState) -> Option<OutletChange> {
        let slot = &mut self.outlets[pin.slot()];
        if *slot == state {
            return None;
        }
        let change = OutletChange {
            pin,
            from: *slot,
            to: state,
        };
        *slot = state;
        Some(change)
    }

    /// Applies a complete status snapshot.
    ///
    /// Telemetry is replaced. Outlets reported as `Unknown` keep their
    /// previous value; all others take the reported state. Returns the
    /// outlets that changed.
    pub fn apply_status(&mut self, status: &PduStatus) -> Vec<OutletChange> {
        self.telemetry = Some(status.telemetry);

        Pin::all()
            .zip(status.outlets)
            .filter(|(_, reported)| reported.is_known())
            .filter_map(|(pin, reported)| self.set(pin, reported))
            .collect()
    }
}
