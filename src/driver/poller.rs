// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Periodic poll scheduling.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::config::PduConfig;

use super::GpioDriver;

/// Background task calling [`GpioDriver::run`] at a fixed interval.
///
/// The first poll happens one interval after spawning, since
/// [`prepare`](GpioDriver::prepare) already polls once. A failed poll is
/// logged and the schedule continues; retrying is left to the next tick.
///
/// Stopping (or dropping) the poller aborts the task. Abortion only happens
/// at an await point, so a cache update in progress is never torn.
#[derive(Debug)]
pub struct Poller {
    task: JoinHandle<()>,
}

impl Poller {
    /// Spawns the poll task on the current tokio runtime.
    ///
    /// Intervals shorter than [`PduConfig::MIN_STATE_POLL`] are raised to it.
    #[must_use]
    pub fn spawn<D: GpioDriver + 'static>(driver: Arc<D>, interval: Duration) -> Self {
        let interval = interval.max(Duration::from_secs_f64(PduConfig::MIN_STATE_POLL));

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            tracing::debug!(driver = driver.instance_name(), ?interval, "Starting state poller");

            loop {
                ticker.tick().await;
                if let Err(e) = driver.run().await {
                    tracing::warn!(driver = driver.instance_name(), error = %e, "State poll failed");
                }
            }
        });

        Self { task }
    }

    /// Stops polling.
    pub fn stop(&self) {
        self.task.abort();
    }

    /// Returns `true` until the task has been stopped.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.task.abort();
    }
}
