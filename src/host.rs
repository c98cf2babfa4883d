//! Host tick loop and shutdown signalling.

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use keystone_config::HostConfig;
use keystone_core::{ManagerRegistry, RegistryError};

/// Shutdown signal for graceful shutdown.
#[derive(Clone)]
pub struct ShutdownSignal {
    sender: broadcast::Sender<()>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(1);
        Self { sender }
    }

    /// Trigger shutdown.
    pub fn trigger(&self) {
        let _ = self.sender.send(());
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.sender.subscribe()
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Tick loop settings, resolved from the profile and CLI overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostSettings {
    pub interval: Duration,
    pub max_ticks: Option<u64>,
}

impl HostSettings {
    pub fn from_config(config: &HostConfig) -> Self {
        Self {
            interval: Duration::from_millis(config.tick_interval_ms.max(1)),
            max_ticks: config.max_ticks,
        }
    }

    pub fn with_overrides(mut self, ticks: Option<u64>, interval_ms: Option<u64>) -> Self {
        if let Some(ticks) = ticks {
            self.max_ticks = Some(ticks);
        }
        if let Some(ms) = interval_ms {
            self.interval = Duration::from_millis(ms.max(1));
        }
        self
    }
}

/// Drive `registry.tick()` until `max_ticks` is reached or `shutdown` fires.
///
/// Returns the number of completed ticks. A failing update stops the loop
/// and is returned; teardown is left to the caller either way.
pub async fn run_loop(
    registry: &ManagerRegistry,
    settings: HostSettings,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<u64, RegistryError> {
    let mut interval = time::interval(settings.interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut ticks = 0u64;

    info!(
        "Host loop started (interval {:?}, max ticks {:?})",
        settings.interval, settings.max_ticks
    );

    loop {
        if settings.max_ticks.is_some_and(|max| ticks >= max) {
            info!("Reached {} ticks, stopping", ticks);
            break;
        }

        tokio::select! {
            biased;
            _ = shutdown.recv() => {
                info!("Shutdown requested after {} ticks", ticks);
                break;
            }
            _ = interval.tick() => {
                registry.tick()?;
                ticks += 1;
                debug!("Tick {} complete", ticks);
            }
        }
    }

    Ok(ticks)
}
