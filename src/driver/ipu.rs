// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! GPIO driver for the Intellinet IPU 163682.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{Mutex, RwLock};

use crate::config::{PduConfig, PluginOption};
use crate::error::{Error, ProtocolError, Result};
use crate::event::Notifier;
use crate::protocol::DeviceClient;
use crate::state::StateCache;
use crate::telemetry::Telemetry;
use crate::types::{Channel, OutletState, Pin, PinValidator, validate_pin};

use super::{GpioDriver, Poller};

type Connector<C> = Box<dyn Fn(&PduConfig) -> std::result::Result<C, ProtocolError> + Send + Sync>;

/// How a successful write affects the cached outlet state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    /// The cache changes only when a poll reports the new state.
    ///
    /// Between a write and the next completed poll, reads return the
    /// pre-write value.
    #[default]
    ConfirmOnPoll,
    /// The written state is cached as soon as the device accepts the command.
    Optimistic,
}

/// Connection to the device, owned by the driver.
enum DeviceHandle<C> {
    Disconnected,
    Connected(C),
}

impl<C> DeviceHandle<C> {
    fn client(&self) -> Result<&C> {
        match self {
            Self::Connected(client) => Ok(client),
            Self::Disconnected => Err(Error::Offline),
        }
    }

    fn is_connected(&self) -> bool {
        matches!(self, Self::Connected(_))
    }
}

/// GPIO driver exposing the eight PDU outlets as pins 0-7.
///
/// Outlet state is served from a local cache refreshed by [`run`](GpioDriver::run).
/// Writes are sent straight to the device; under the default
/// [`WritePolicy::ConfirmOnPoll`] the cache picks them up on the next poll.
///
/// All device calls are serialized: the handle stays locked for the duration
/// of each call, so the client is never used re-entrantly and
/// [`cleanup`](GpioDriver::cleanup) waits for an in-flight call to finish.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use ipu_gpio::{GpioDriver, IpuDriver, Notifier, PduConfig};
/// use ipu_gpio::types::Pin;
///
/// # async fn example() -> ipu_gpio::Result<()> {
/// let config = PduConfig::from_options(serde_json::json!({ "host": "192.168.1.50" }))?;
/// let driver = Arc::new(IpuDriver::http("pdu", config, Notifier::new()));
///
/// driver.register_output(Pin::new(3)?, Some(true))?;
/// driver.prepare().await?;
///
/// let poller = driver.spawn_poller();
/// driver.write(Pin::new(0)?, false).await?;
/// println!("outlet 3 on: {}", driver.read(Pin::new(3)?));
///
/// poller.stop();
/// driver.cleanup().await;
/// # Ok(())
/// # }
/// ```
pub struct IpuDriver<C> {
    instance_name: String,
    config: PduConfig,
    connector: Connector<C>,
    notifier: Notifier,
    write_policy: WritePolicy,
    device: tokio::sync::Mutex<DeviceHandle<C>>,
    initials: Mutex<BTreeMap<Pin, Option<bool>>>,
    prepared: AtomicBool,
    cache: RwLock<StateCache>,
}

impl<C: DeviceClient + 'static> IpuDriver<C> {
    /// Creates a driver that builds its device client with `connector`.
    ///
    /// `connector` is called once, from [`prepare`](GpioDriver::prepare).
    #[must_use]
    pub fn new<F>(
        instance_name: impl Into<String>,
        config: PduConfig,
        notifier: Notifier,
        connector: F,
    ) -> Self
    where
        F: Fn(&PduConfig) -> std::result::Result<C, ProtocolError> + Send + Sync + 'static,
    {
        Self {
            instance_name: instance_name.into(),
            config,
            connector: Box::new(connector),
            notifier,
            write_policy: WritePolicy::default(),
            device: tokio::sync::Mutex::new(DeviceHandle::Disconnected),
            initials: Mutex::new(BTreeMap::new()),
            prepared: AtomicBool::new(false),
            cache: RwLock::new(StateCache::new()),
        }
    }

    /// Sets how writes affect the cache.
    #[must_use]
    pub fn with_write_policy(mut self, policy: WritePolicy) -> Self {
        self.write_policy = policy;
        self
    }

    /// Returns the plugin options in use.
    #[must_use]
    pub fn config(&self) -> &PduConfig {
        &self.config
    }

    /// Returns the notifier signalled on every poll and write.
    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Returns the write policy.
    #[must_use]
    pub fn write_policy(&self) -> WritePolicy {
        self.write_policy
    }

    /// Returns the tri-state cached value of a pin.
    #[must_use]
    pub fn outlet_state(&self, pin: Pin) -> OutletState {
        self.cache.read().outlet(pin)
    }

    /// Returns telemetry from the last completed poll.
    #[must_use]
    pub fn telemetry(&self) -> Option<Telemetry> {
        self.cache.read().telemetry()
    }

    /// Returns a consistent copy of the whole cache.
    #[must_use]
    pub fn snapshot(&self) -> StateCache {
        self.cache.read().clone()
    }

    /// Returns `true` while a device handle exists.
    pub async fn is_connected(&self) -> bool {
        self.device.lock().await.is_connected()
    }

    /// Starts polling this driver every `state_poll` seconds.
    #[must_use]
    pub fn spawn_poller(self: &Arc<Self>) -> Poller {
        Poller::spawn(Arc::clone(self), self.config.state_poll_interval())
    }

    fn initial_writes(&self) -> Vec<(Pin, bool)> {
        self.initials
            .lock()
            .iter()
            .filter_map(|(pin, initial)| initial.map(|state| (*pin, state)))
            .collect()
    }
}

#[cfg(feature = "http")]
impl IpuDriver<crate::protocol::IpuClient> {
    /// Creates a driver that talks to the PDU over HTTP.
    #[must_use]
    pub fn http(instance_name: impl Into<String>, config: PduConfig, notifier: Notifier) -> Self {
        Self::new(
            instance_name,
            config,
            notifier,
            crate::protocol::IpuClient::from_config,
        )
    }
}

impl<C: DeviceClient + 'static> GpioDriver for IpuDriver<C> {
    fn plugin_options() -> Vec<PluginOption> {
        PduConfig::plugin_options()
    }

    fn pin_validator() -> PinValidator {
        validate_pin
    }

    fn instance_name(&self) -> &str {
        &self.instance_name
    }

    fn register_output(&self, pin: Pin, initial: Option<bool>) -> Result<()> {
        if self.prepared.load(Ordering::Acquire) {
            return Err(Error::AlreadyPrepared);
        }

        self.initials.lock().insert(pin, initial);
        self.cache.write().seed(pin);

        tracing::debug!(driver = %self, %pin, ?initial, "Registered output");
        Ok(())
    }

    async fn prepare(&self) -> Result<()> {
        if self.prepared.swap(true, Ordering::AcqRel) {
            return Err(Error::AlreadyPrepared);
        }

        let client = match (self.connector)(&self.config) {
            Ok(client) => client,
            Err(e) => {
                self.prepared.store(false, Ordering::Release);
                tracing::error!(driver = %self, error = %e, "Unable to create PDU client");
                return Err(e.into());
            }
        };
        *self.device.lock().await = DeviceHandle::Connected(client);

        tracing::info!(driver = %self, host = %self.config.host(), "Connected to PDU");

        for (pin, state) in self.initial_writes() {
            self.write(pin, state).await?;
        }

        self.run().await
    }

    async fn run(&self) -> Result<()> {
        {
            let device = self.device.lock().await;
            let status = device.client()?.status().await?;

            let changes = self.cache.write().apply_status(&status);
            for change in &changes {
                tracing::debug!(
                    driver = %self,
                    pin = %change.pin,
                    from = %change.from,
                    to = %change.to,
                    "Outlet state changed"
                );
            }
        }

        self.notifier.notify();
        Ok(())
    }

    async fn cleanup(&self) {
        let mut device = self.device.lock().await;
        if device.is_connected() {
            tracing::info!(driver = %self, "Disconnected from PDU");
        }
        *device = DeviceHandle::Disconnected;
    }

    fn read(&self, pin: Pin) -> bool {
        self.cache.read().outlet(pin).is_on()
    }

    async fn write(&self, pin: Pin, state: bool) -> Result<()> {
        {
            let device = self.device.lock().await;
            let client = device.client()?;
            let channel = Channel::from_pin(pin)?;

            tracing::debug!(driver = %self, %pin, %channel, state, "Switching outlet");

            if state {
                client.enable_outlets(channel).await?;
            } else {
                client.disable_outlets(channel).await?;
            }

            if self.write_policy == WritePolicy::Optimistic {
                self.cache.write().set(pin, OutletState::from(state));
            }
        }

        self.notifier.notify();
        Ok(())
    }
}

impl<C> fmt::Display for IpuDriver<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IPU_163682({})", self.instance_name)
    }
}

impl<C> fmt::Debug for IpuDriver<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IpuDriver")
            .field("instance_name", &self.instance_name)
            .field("config", &self.config)
            .field("write_policy", &self.write_policy)
            .field("prepared", &self.prepared.load(Ordering::Relaxed))
            .field("cache", &*self.cache.read())
            .finish_non_exhaustive()
    }
}
