// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parser for the IPU `status.xml` document.
//!
//! The document is a flat list of elements:
//!
//! ```text
//! <response>
//!   <curBan>1.2</curBan>
//!   <tempBan>24</tempBan>
//!   <humBan>38</humBan>
//!   <outletStat0>on</outletStat0>
//!   ...
//!   <outletStat7>off</outletStat7>
//! </response>
//! ```

use crate::error::ParseError;
use crate::protocol::PduStatus;
use crate::types::{OUTLET_COUNT, OutletState};

use super::Telemetry;

const TEMPERATURE_TAG: &str = "tempBan";
const HUMIDITY_TAG: &str = "humBan";
const CURRENT_TAG: &str = "curBan";

/// Parses a `status.xml` body into a status snapshot.
///
/// Outlet labels other than `on`/`off` decode to [`OutletState::Unknown`].
///
/// # Errors
///
/// Returns `ParseError::MissingField` if a sensor or outlet element is
/// absent, and `ParseError::InvalidValue` if a sensor reading is not a number.
///
/// # Examples
///
/// ```
/// use ipu_gpio::telemetry::parse_status_xml;
/// use ipu_gpio::types::OutletState;
///
/// let xml = "<response><curBan>0.4</curBan><tempBan>21</tempBan><humBan>40</humBan>\
///     <outletStat0>on</outletStat0><outletStat1>off</outletStat1>\
///     <outletStat2>off</outletStat2><outletStat3>off</outletStat3>\
///     <outletStat4>off</outletStat4><outletStat5>off</outletStat5>\
///     <outletStat6>off</outletStat6><outletStat7>on</outletStat7></response>";
///
/// let status = parse_status_xml(xml).unwrap();
/// assert_eq!(status.outlets[0], OutletState::On);
/// assert_eq!(status.outlets[7], OutletState::On);
/// assert!((status.telemetry.current_amperes - 0.4).abs() < f64::EPSILON);
/// ```
pub fn parse_status_xml(body: &str) -> Result<PduStatus, ParseError> {
    let telemetry = Telemetry {
        temperature_celsius: parse_number(body, TEMPERATURE_TAG)?,
        humidity_percent: parse_number(body, HUMIDITY_TAG)?,
        current_amperes: parse_number(body, CURRENT_TAG)?,
    };

    let mut outlets = [OutletState::Unknown; OUTLET_COUNT];
    for (index, slot) in outlets.iter_mut().enumerate() {
        let tag = format!("outletStat{index}");
        let label = element_text(body, &tag).ok_or_else(|| ParseError::MissingField(tag.clone()))?;
        *slot = OutletState::from_label(label);
        if !slot.is_known() {
            tracing::warn!(outlet = index, label = %label, "Unrecognized outlet state label");
        }
    }

    Ok(PduStatus { telemetry, outlets })
}

fn parse_number(body: &str, tag: &str) -> Result<f64, ParseError> {
    let text = element_text(body, tag).ok_or_else(|| ParseError::MissingField(tag.to_string()))?;
    text.trim().parse().map_err(|e: std::num::ParseFloatError| ParseError::InvalidValue {
        field: tag.to_string(),
        message: format!("{text:?}: {e}"),
    })
}

/// Returns the text between `<tag>` and `</tag>`.
fn element_text<'a>(body: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let start = body.find(&open)? + open.len();
    let len = body[start..].find(&close)?;
    Some(&body[start..start + len])
}
