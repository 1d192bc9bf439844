// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host pin and device channel addressing.
//!
//! The host addresses outlets by 0-based pin, the PDU by 1-based channel.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Number of switchable outlets on the PDU.
pub const OUTLET_COUNT: usize = 8;

/// Host-facing outlet pin, 0 through 7.
///
/// # Examples
///
/// ```
/// use ipu_gpio::types::Pin;
///
/// let pin: Pin = "7".parse().unwrap();
/// assert_eq!(pin.index(), 7);
///
/// assert!(Pin::new(8).is_err());
/// assert!("abc".parse::<Pin>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pin(u8);

impl Pin {
    /// Highest valid pin.
    pub const MAX: u8 = 7;

    /// Creates a new pin.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `index` is greater than 7.
    pub fn new(index: u8) -> Result<Self, ValueError> {
        if index > Self::MAX {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: u16::from(Self::MAX),
                actual: u16::from(index),
            });
        }
        Ok(Self(index))
    }

    /// Returns every pin in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..=Self::MAX).map(Self)
    }

    /// Returns the 0-based index.
    #[must_use]
    pub const fn index(&self) -> u8 {
        self.0
    }

    pub(crate) fn slot(self) -> usize {
        usize::from(self.0)
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Pin {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: i64 = trimmed
            .parse()
            .map_err(|_| ValueError::InvalidPin(s.to_string()))?;
        match u8::try_from(value) {
            Ok(index) => Self::new(index),
            Err(_) => Err(ValueError::OutOfRange {
                min: 0,
                max: u16::from(Self::MAX),
                actual: u16::try_from(value).unwrap_or(u16::MAX),
            }),
        }
    }
}

impl TryFrom<u8> for Pin {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validates a raw host pin identifier.
pub type PinValidator = fn(&str) -> Result<Pin, ValueError>;

/// Pin validator handed to the host: accepts integers 0 through 7.
///
/// # Errors
///
/// Returns `ValueError` for non-integers and out-of-range values.
pub fn validate_pin(raw: &str) -> Result<Pin, ValueError> {
    raw.parse()
}

/// 1-based outlet number used by the PDU protocol.
///
/// # Examples
///
/// ```
/// use ipu_gpio::types::{Channel, Pin};
///
/// let channel = Channel::from_pin(Pin::new(7).unwrap()).unwrap();
/// assert_eq!(channel.number(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Channel(u8);

impl Channel {
    /// Lowest valid channel.
    pub const MIN: u8 = 1;
    /// Highest valid channel.
    pub const MAX: u8 = 8;

    /// Creates a channel from its 1-based number.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` unless `1 <= number <= 8`.
    pub fn new(number: u8) -> Result<Self, ValueError> {
        if !(Self::MIN..=Self::MAX).contains(&number) {
            return Err(ValueError::OutOfRange {
                min: u16::from(Self::MIN),
                max: u16::from(Self::MAX),
                actual: u16::from(number),
            });
        }
        Ok(Self(number))
    }

    /// Maps a host pin to its device channel (`pin + 1`).
    ///
    /// The bound is checked again here, independent of pin validation.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if the resulting channel is not 1..=8.
    pub fn from_pin(pin: Pin) -> Result<Self, ValueError> {
        Self::new(pin.index().saturating_add(1))
    }

    /// Returns the 1-based channel number.
    #[must_use]
    pub const fn number(&self) -> u8 {
        self.0
    }

    /// Returns the 0-based outlet index used in device form fields.
    #[must_use]
    pub const fn outlet_index(&self) -> u8 {
        self.0 - 1
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
