// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Change notification for cached PDU state.
//!
//! The driver signals a [`Notifier`] after every completed poll and every
//! successful outlet command. Notifications carry no payload; listeners
//! re-read the driver's cache.
//!
//! # Examples
//!
//! ```
//! use ipu_gpio::event::Notifier;
//!
//! let notifier = Notifier::new();
//! let _listener = notifier.subscribe();
//!
//! notifier.notify();
//! assert_eq!(notifier.version(), 1);
//! ```

mod notifier;

pub use notifier::{Notifier, NotifierListener};
