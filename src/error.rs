// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the IPU GPIO driver.
//!
//! This module provides the error hierarchy used across the crate: value
//! validation (pins and channels), device communication, status document
//! parsing, configuration loading, and driver lifecycle failures.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while talking to the PDU.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Plugin options were rejected at load time.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No device connection exists for the requested operation.
    #[error("PDU is offline")]
    Offline,

    /// The driver has already been prepared.
    #[error("driver is already prepared")]
    AlreadyPrepared,
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },

    /// A pin identifier was not an integer.
    #[error("invalid IPU outlet: {0:?}")]
    InvalidPin(String),
}

/// Errors related to communication with the PDU.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The device answered with an unexpected status.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The device replied with a document that could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(#[from] ParseError),
}

/// Errors related to parsing the PDU status document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Expected element is missing from the document.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// Failed to parse a specific value.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// Errors raised while loading plugin options.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The option map could not be deserialized.
    #[error("invalid options: {0}")]
    Json(#[from] serde_json::Error),

    /// `host` is neither an IP address nor a valid hostname.
    #[error("invalid host: {0:?}")]
    InvalidHost(String),

    /// `state_poll` is below the minimum interval.
    #[error("state_poll must be a number >= {min}, got {actual}")]
    InvalidStatePoll {
        /// Minimum allowed interval in seconds.
        min: f64,
        /// The value that was provided.
        actual: f64,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
