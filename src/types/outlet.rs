// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outlet state as reported by the PDU.

use std::fmt;

/// Last known state of a single outlet.
///
/// `Unknown` is the placeholder used until a poll reports a recognizable
/// label for the outlet.
///
/// # Examples
///
/// ```
/// use ipu_gpio::types::OutletState;
///
/// assert_eq!(OutletState::from_label("On"), OutletState::On);
/// assert_eq!(OutletState::from_label("off"), OutletState::Off);
/// assert_eq!(OutletState::from_label("blink"), OutletState::Unknown);
///
/// assert_eq!(OutletState::On.as_bool(), Some(true));
/// assert!(!OutletState::Unknown.is_on());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutletState {
    /// Outlet is switched off.
    Off,
    /// Outlet is switched on.
    On,
    /// No recognizable state has been reported yet.
    #[default]
    Unknown,
}

impl OutletState {
    /// Decodes an outlet label from the device.
    ///
    /// `"on"` and `"off"` are matched case-insensitively, surrounding
    /// whitespace ignored. Every other label decodes to `Unknown`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("on") {
            Self::On
        } else if label.eq_ignore_ascii_case("off") {
            Self::Off
        } else {
            Self::Unknown
        }
    }

    /// Returns the boolean value, or `None` when the state is unknown.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::On => Some(true),
            Self::Off => Some(false),
            Self::Unknown => None,
        }
    }

    /// Returns `true` only for `On`.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        matches!(self, Self::On)
    }

    /// Returns `true` if the state has been reported by the device.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Returns the display label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::On => "On",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for OutletState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<bool> for OutletState {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_label_recognizes_on_off() {
        assert_eq!(OutletState::from_label("On"), OutletState::On);
        assert_eq!(OutletState::from_label("Off"), OutletState::Off);
        assert_eq!(OutletState::from_label("ON"), OutletState::On);
        assert_eq!(OutletState::from_label(" off\n"), OutletState::Off);
    }

    #[test]
    fn from_label_other_values_are_unknown() {
        assert_eq!(OutletState::from_label(""), OutletState::Unknown);
        assert_eq!(OutletState::from_label("1"), OutletState::Unknown);
        assert_eq!(OutletState::from_label("Onn"), OutletState::Unknown);
        assert_eq!(OutletState::from_label("reboot"), OutletState::Unknown);
    }

    #[test]
    fn default_is_unknown() {
        assert_eq!(OutletState::default(), OutletState::Unknown);
        assert!(!OutletState::default().is_known());
    }

    #[test]
    fn bool_conversions() {
        assert_eq!(OutletState::from(true), OutletState::On);
        assert_eq!(OutletState::from(false), OutletState::Off);
        assert_eq!(OutletState::Off.as_bool(), Some(false));
        assert_eq!(OutletState::Unknown.as_bool(), None);
    }

    #[test]
    fn display() {
        assert_eq!(OutletState::On.to_string(), "On");
        assert_eq!(OutletState::Unknown.to_string(), "Unknown");
    }
}
