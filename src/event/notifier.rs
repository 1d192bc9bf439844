// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Payload-less change notification.

use std::sync::Arc;

use tokio::sync::watch;

/// Broadcast wake signal carrying no payload.
///
/// Each call to [`notify`](Self::notify) bumps a version counter and wakes
/// every listener currently waiting. Listeners re-read the cached state
/// themselves. There is no queued history: a listener created after a
/// notification does not observe it, and several notifications that happen
/// before a listener wakes are seen as one.
///
/// Clones share the same counter.
///
/// # Examples
///
/// ```
/// use ipu_gpio::event::Notifier;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let notifier = Notifier::new();
/// let mut listener = notifier.subscribe();
///
/// notifier.notify();
///
/// assert_eq!(listener.wait().await, Some(1));
/// assert_eq!(notifier.version(), 1);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: Arc<watch::Sender<u64>>,
}

impl Notifier {
    /// Creates a notifier at version 0.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(0);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Wakes all current listeners.
    pub fn notify(&self) {
        self.sender.send_modify(|version| *version = version.wrapping_add(1));
    }

    /// Returns the number of notifications sent so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        *self.sender.borrow()
    }

    /// Creates a listener that wakes on the next notification.
    #[must_use]
    pub fn subscribe(&self) -> NotifierListener {
        NotifierListener {
            receiver: self.sender.subscribe(),
        }
    }

    /// Returns the number of live listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving side of a [`Notifier`].
#[derive(Debug)]
pub struct NotifierListener {
    receiver: watch::Receiver<u64>,
}

impl NotifierListener {
    /// Waits for the next notification and returns the new version.
    ///
    /// Returns `None` once every [`Notifier`] handle has been dropped.
    pub async fn wait(&mut self) -> Option<u64> {
        self.receiver.changed().await.ok()?;
        Some(*self.receiver.borrow_and_update())
    }

    /// Returns `true` if a notification arrived since the last `wait`.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }
}
