//! # Keystone Protocols
//!
//! Core protocol definitions (traits) for the Keystone manager registry.
//! Contains only interface definitions - no registry implementation.
//!
//! ## Core Traits
//!
//! - [`Manager`] - Lifecycle contract every registered manager implements
//! - [`Capability`] - Binds a capability trait object type to a [`CapabilityId`]
//! - [`ManagerLookup`] - Read-only registry access handed to lifecycle callbacks
//! - [`ManagerLookupExt`] - Typed accessors layered over [`ManagerLookup`]

pub mod capability;
pub mod error;
pub mod lookup;
pub mod manager;

pub use capability::{Capability, CapabilityId};
pub use error::{ManagerError, RegistryError};
pub use lookup::{ManagerHandle, ManagerLookup, ManagerLookupExt};
pub use manager::{LifecyclePhase, Manager, ManagerState};
