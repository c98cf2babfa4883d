//! Errors raised by managers from their own lifecycle hooks.

use thiserror::Error;

use crate::capability::CapabilityId;

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Manager initialization failed: {0}")]
    InitializationFailed(String),

    #[error("Manager dependency not satisfied: {manager} requires {capability}")]
    MissingDependency {
        manager: String,
        capability: CapabilityId,
    },

    #[error("Manager update failed: {0}")]
    UpdateFailed(String),

    #[error("Manager reset failed: {0}")]
    ResetFailed(String),

    #[error("Manager destroy failed: {0}")]
    DestroyFailed(String),

    #[error("{0}")]
    Custom(String),
}
