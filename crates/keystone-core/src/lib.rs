//! # Keystone Core
//!
//! Manager registry for the Keystone toolkit.
//!
//! ## Components
//!
//! - [`ManagerRegistry`] - Registration, lookup and lifecycle orchestration
//! - [`RegistryStore`] - Core-manager table plus auxiliary component list
//! - [`ActiveConfiguration`] - Declares which capabilities are core
//! - [`LifecycleDispatcher`] - Drives initialize/update/reset/destroy
//! - [`ensure_initialized`] - Process-wide registry for the composition root
//!
//! Typed lookups (`get_manager::<dyn InputSystem>()`) come from
//! [`ManagerLookupExt`], re-exported here.

pub mod configuration;
pub mod global;
pub mod lifecycle;
pub mod registry;

pub use configuration::ActiveConfiguration;
pub use global::ensure_initialized;
pub use lifecycle::LifecycleDispatcher;
pub use registry::{ManagerRegistry, Placement, RegistryStore};

pub use keystone_protocols::{
    Capability, CapabilityId, LifecyclePhase, Manager, ManagerError, ManagerHandle, ManagerLookup,
    ManagerLookupExt, ManagerState, RegistryError, capability,
};
