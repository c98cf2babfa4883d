//! Manager trait definition.

use std::any::Any;
use std::fmt;

use crate::error::ManagerError;
use crate::lookup::ManagerLookup;

/// Core trait for all managers.
///
/// Every hook has a no-op default, so a manager only overrides the phases it
/// cares about. Hooks receive read-only registry access; a manager fetches
/// the managers it depends on during [`initialize`](Manager::initialize),
/// which means registration order matters to callers.
///
/// Failures returned from a hook are propagated to whoever drove the phase
/// (`add_manager`, `tick`, `reset_managers`, teardown).
pub trait Manager: Send + Sync + 'static {
    /// Display name used for lookup disambiguation.
    ///
    /// Defaults to the concrete type name without its module path. Names are
    /// not required to be unique.
    fn name(&self) -> &str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Called once, synchronously, right after registration.
    fn initialize(&self, _registry: &dyn ManagerLookup) -> Result<(), ManagerError> {
        Ok(())
    }

    /// Called once per host tick while the manager is active.
    fn update(&self, _registry: &dyn ManagerLookup) -> Result<(), ManagerError> {
        Ok(())
    }

    /// Called when the owning configuration asks managers to reconfigure.
    fn reset(&self, _registry: &dyn ManagerLookup) -> Result<(), ManagerError> {
        Ok(())
    }

    /// Called once when the manager is removed or the registry is torn down.
    fn destroy(&self, _registry: &dyn ManagerLookup) -> Result<(), ManagerError> {
        Ok(())
    }

    /// Returns a reference to the manager as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;
}

/// Strip the module path from a type name, keeping generic arguments intact.
fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    match base.rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}

/// Lifecycle state of a registered manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ManagerState {
    /// Registered, `initialize` not yet completed.
    Uninitialized = 0,
    /// Initialized and receiving updates.
    Active = 1,
    /// Destroyed; receives no further callbacks.
    Destroyed = 2,
}

impl From<u8> for ManagerState {
    fn from(v: u8) -> Self {
        match v {
            1 => ManagerState::Active,
            2 => ManagerState::Destroyed,
            _ => ManagerState::Uninitialized,
        }
    }
}

/// Lifecycle phase, used when reporting hook failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    Initialize,
    Update,
    Reset,
    Destroy,
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self {
            LifecyclePhase::Initialize => "initialize",
            LifecyclePhase::Update => "update",
            LifecyclePhase::Reset => "reset",
            LifecyclePhase::Destroy => "destroy",
        };
        f.write_str(phase)
    }
}
