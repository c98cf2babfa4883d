//! Capability identifiers.
//!
//! A capability is a role a manager can fulfil, expressed as a trait
//! (`trait InputSystem: Manager`). The registry keys entries by the
//! capability's stable [`CapabilityId`] rather than by runtime type
//! inspection; the typed handle stored next to each entry lets callers get
//! `Arc<dyn InputSystem>` back out.

use std::fmt;
use std::sync::Arc;

use crate::manager::Manager;

/// Stable identifier of a capability.
///
/// The same string names the capability in profile files
/// (`active_managers = ["input-system"]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CapabilityId(&'static str);

impl CapabilityId {
    /// Create an identifier from a static string.
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    /// The identifier as a string slice.
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl AsRef<str> for CapabilityId {
    fn as_ref(&self) -> &str {
        self.0
    }
}

/// A type managers can be registered and looked up under.
///
/// Usually implemented for a trait object type with the [`capability!`]
/// macro, but a concrete manager type may also act as its own capability.
///
/// [`capability!`]: crate::capability!
pub trait Capability: Manager {
    /// Registry key for this capability. Must be unique per capability type.
    const ID: CapabilityId;

    /// Erase the capability view down to the lifecycle contract.
    fn into_manager(self: Arc<Self>) -> Arc<dyn Manager>;
}

/// Declare a capability type and its identifier.
///
/// ```
/// use keystone_protocols::{capability, Manager};
///
/// pub trait InputSystem: Manager {
///     fn pointer_count(&self) -> usize;
/// }
///
/// capability!(dyn InputSystem, "input-system");
/// ```
#[macro_export]
macro_rules! capability {
    ($ty:ty, $id:literal) => {
        impl $crate::Capability for $ty {
            const ID: $crate::CapabilityId = $crate::CapabilityId::new($id);

            fn into_manager(
                self: ::std::sync::Arc<Self>,
            ) -> ::std::sync::Arc<dyn $crate::Manager> {
                self
            }
        }
    };
}
