//! Built-in managers registered by `keystone run`.

use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info};

use keystone_core::{
    Capability, Manager, ManagerError, ManagerLookup, ManagerLookupExt, ManagerRegistry,
    RegistryError, capability,
};

/// Frame counter advanced once per host tick.
pub trait FrameClock: Manager {
    fn frame(&self) -> u64;
    fn elapsed(&self) -> Duration;
}

capability!(dyn FrameClock, "frame-clock");

/// Periodic runtime report.
pub trait Diagnostics: Manager {
    fn report(&self) -> String;
}

capability!(dyn Diagnostics, "diagnostics");

#[derive(Default)]
pub struct SystemClock {
    frame: AtomicU64,
    started: Mutex<Option<Instant>>,
}

impl Manager for SystemClock {
    fn initialize(&self, _registry: &dyn ManagerLookup) -> Result<(), ManagerError> {
        *self.started.lock() = Some(Instant::now());
        Ok(())
    }

    fn update(&self, _registry: &dyn ManagerLookup) -> Result<(), ManagerError> {
        self.frame.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn reset(&self, _registry: &dyn ManagerLookup) -> Result<(), ManagerError> {
        self.frame.store(0, Ordering::Relaxed);
        *self.started.lock() = Some(Instant::now());
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl FrameClock for SystemClock {
    fn frame(&self) -> u64 {
        self.frame.load(Ordering::Relaxed)
    }

    fn elapsed(&self) -> Duration {
        self.started.lock().map(|t| t.elapsed()).unwrap_or_default()
    }
}

/// Logs the frame rate every `every` frames.
pub struct FrameDiagnostics {
    every: u64,
    clock: RwLock<Option<Arc<dyn FrameClock>>>,
}

impl FrameDiagnostics {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            clock: RwLock::new(None),
        }
    }

    fn clock(&self) -> Result<Arc<dyn FrameClock>, ManagerError> {
        self.clock.read().clone().ok_or_else(|| ManagerError::MissingDependency {
            manager: self.name().to_string(),
            capability: <dyn FrameClock as Capability>::ID,
        })
    }
}

impl Manager for FrameDiagnostics {
    fn initialize(&self, registry: &dyn ManagerLookup) -> Result<(), ManagerError> {
        *self.clock.write() = registry.get_manager::<dyn FrameClock>();
        self.clock().map(|_| ())
    }

    fn update(&self, _registry: &dyn ManagerLookup) -> Result<(), ManagerError> {
        let clock = self.clock()?;
        if clock.frame() % self.every == 0 {
            debug!("{}", self.report());
        }
        Ok(())
    }

    fn destroy(&self, _registry: &dyn ManagerLookup) -> Result<(), ManagerError> {
        info!("Final {}", self.report());
        *self.clock.write() = None;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Diagnostics for FrameDiagnostics {
    fn report(&self) -> String {
        match self.clock.read().as_ref() {
            Some(clock) => {
                let secs = clock.elapsed().as_secs_f64();
                let fps = if secs > 0.0 { clock.frame() as f64 / secs } else { 0.0 };
                format!("frames: {}, elapsed: {:.2}s, rate: {:.1}/s", clock.frame(), secs, fps)
            }
            None => "frames: n/a".to_string(),
        }
    }
}

/// Register the built-in managers, clock first so diagnostics can resolve it.
pub fn register_builtin(registry: &ManagerRegistry) -> Result<(), RegistryError> {
    registry.add_manager::<dyn FrameClock>(Arc::new(SystemClock::default()))?;
    registry.add_manager::<dyn Diagnostics>(Arc::new(FrameDiagnostics::new(60)))?;
    Ok(())
}
