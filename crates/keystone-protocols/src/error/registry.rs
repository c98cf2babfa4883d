//! Registry-level errors.

use thiserror::Error;

use super::ManagerError;
use crate::capability::CapabilityId;
use crate::manager::LifecyclePhase;

#[derive(Debug, Error)]
pub enum RegistryError {
    /// No configuration is bound, so registrations cannot be routed.
    #[error("No active configuration found, cannot initialize the manager registry")]
    NoActiveConfiguration,

    /// The core slot for this capability is already occupied.
    #[error("Core manager already registered for {capability}: {existing}")]
    DuplicateCoreManager {
        capability: CapabilityId,
        existing: String,
    },

    /// A manager's own hook failed.
    #[error("Manager {manager} failed during {phase}: {source}")]
    Lifecycle {
        manager: String,
        phase: LifecyclePhase,
        #[source]
        source: ManagerError,
    },
}

impl RegistryError {
    pub fn lifecycle(manager: impl Into<String>, phase: LifecyclePhase, source: ManagerError) -> Self {
        RegistryError::Lifecycle {
            manager: manager.into(),
            phase,
            source,
        }
    }
}
