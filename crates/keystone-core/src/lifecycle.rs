//! Lifecycle dispatch.
//!
//! Drives the per-manager state machine:
//!
//! ```text
//! Uninitialized --initialize--> Active --destroy--> Destroyed
//! ```
//!
//! `update` and `reset` only reach `Active` managers. The state check happens
//! at dispatch time, so a manager destroyed earlier in the same sweep is
//! skipped. Callers must not hold the registry lock while dispatching; hooks
//! call back into the registry.

use tracing::{debug, warn};

use keystone_protocols::{LifecyclePhase, ManagerHandle, ManagerLookup, ManagerState, RegistryError};

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;

/// Stateless dispatcher for lifecycle hooks.
pub struct LifecycleDispatcher;

impl LifecycleDispatcher {
    /// Run `initialize` and mark the manager active.
    ///
    /// The manager stays `Uninitialized` if the hook fails.
    pub fn initialize(handle: &ManagerHandle, registry: &dyn ManagerLookup) -> Result<(), RegistryError> {
        debug!("Initializing manager: {} ({})", handle.name(), handle.capability());
        handle
            .manager()
            .initialize(registry)
            .map_err(|e| RegistryError::lifecycle(handle.name(), LifecyclePhase::Initialize, e))?;

        // A teardown that ran inside the hook has already retired the handle.
        if !handle.transition(ManagerState::Uninitialized, ManagerState::Active) {
            debug!("Manager {} retired during initialize", handle.name());
        }
        Ok(())
    }

    /// Run `update` on every active manager, stopping at the first failure.
    pub fn update_all(handles: &[ManagerHandle], registry: &dyn ManagerLookup) -> Result<(), RegistryError> {
        for handle in handles {
            if handle.state() != ManagerState::Active {
                continue;
            }
            handle
                .manager()
                .update(registry)
                .map_err(|e| RegistryError::lifecycle(handle.name(), LifecyclePhase::Update, e))?;
        }
        Ok(())
    }

    /// Run `reset` on every active manager, stopping at the first failure.
    pub fn reset_all(handles: &[ManagerHandle], registry: &dyn ManagerLookup) -> Result<(), RegistryError> {
        for handle in handles {
            if handle.state() != ManagerState::Active {
                continue;
            }
            debug!("Resetting manager: {}", handle.name());
            handle
                .manager()
                .reset(registry)
                .map_err(|e| RegistryError::lifecycle(handle.name(), LifecyclePhase::Reset, e))?;
        }
        Ok(())
    }

    /// Retire a manager, running `destroy` if it was active.
    ///
    /// `destroy` runs at most once per manager no matter how often this is
    /// called. A manager retired before its `initialize` completed gets no
    /// `destroy`.
    pub fn destroy(handle: &ManagerHandle, registry: &dyn ManagerLookup) -> Result<(), RegistryError> {
        if handle.transition(ManagerState::Active, ManagerState::Destroyed) {
            debug!("Destroying manager: {}", handle.name());
            return handle
                .manager()
                .destroy(registry)
                .map_err(|e| RegistryError::lifecycle(handle.name(), LifecyclePhase::Destroy, e));
        }

        handle.transition(ManagerState::Uninitialized, ManagerState::Destroyed);
        Ok(())
    }

    /// Retire every manager in order.
    ///
    /// A failing `destroy` does not stop the sweep; every manager is retired
    /// and the first failure is returned afterwards.
    pub fn destroy_all(handles: Vec<ManagerHandle>, registry: &dyn ManagerLookup) -> Result<(), RegistryError> {
        let mut first_error = None;

        for handle in handles {
            if let Err(e) = Self::destroy(&handle, registry) {
                warn!("Manager destroy error: {}", e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            None => Ok(()),
            Some(e) => Err(e),
        }
    }
}
