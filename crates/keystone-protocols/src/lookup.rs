//! Registry lookup protocol.
//!
//! [`ManagerLookup`] is the object-safe, identifier-keyed read surface of the
//! registry. It is what lifecycle hooks receive, so a manager can resolve its
//! dependencies without holding the registry itself. [`ManagerLookupExt`]
//! layers the typed `get_manager::<C>()` accessors on top of it.

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::capability::{Capability, CapabilityId};
use crate::manager::{Manager, ManagerState};

/// A registered manager together with its capability view and lifecycle state.
///
/// Cloning a handle shares the same state cell, so every clone observes the
/// transitions the registry makes.
#[derive(Clone)]
pub struct ManagerHandle {
    capability: CapabilityId,
    manager: Arc<dyn Manager>,
    /// Holds an `Arc<C>` for the capability the manager was registered under.
    typed: Arc<dyn Any + Send + Sync>,
    state: Arc<AtomicU8>,
}

impl ManagerHandle {
    /// Wrap an instance registered under capability `C`.
    pub fn new<C: Capability + ?Sized>(instance: Arc<C>) -> Self {
        Self {
            capability: C::ID,
            typed: Arc::new(instance.clone()),
            manager: instance.into_manager(),
            state: Arc::new(AtomicU8::new(ManagerState::Uninitialized as u8)),
        }
    }

    /// Capability the manager was registered under.
    pub fn capability(&self) -> CapabilityId {
        self.capability
    }

    /// Display name of the manager.
    pub fn name(&self) -> &str {
        self.manager.name()
    }

    /// The manager's lifecycle contract.
    pub fn manager(&self) -> &Arc<dyn Manager> {
        &self.manager
    }

    /// Recover the capability view the manager was registered with.
    ///
    /// Returns `None` if `C` is not the registration capability.
    pub fn downcast<C: Capability + ?Sized>(&self) -> Option<Arc<C>> {
        self.typed.downcast_ref::<Arc<C>>().cloned()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ManagerState {
        ManagerState::from(self.state.load(Ordering::SeqCst))
    }

    /// Move from `from` to `to`. Returns `false` if the handle was not in `from`.
    pub fn transition(&self, from: ManagerState, to: ManagerState) -> bool {
        self.state
            .compare_exchange(from as u8, to as u8, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Registration identity: both handles come from the same registration.
    ///
    /// One manager instance registered under two capabilities yields two
    /// distinct registrations; [`is_manager`](Self::is_manager) matches both.
    pub fn is_same(&self, other: &ManagerHandle) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    /// Whether this handle wraps `manager`.
    pub fn is_manager(&self, manager: &Arc<dyn Manager>) -> bool {
        Arc::ptr_eq(&self.manager, manager)
    }
}

impl fmt::Debug for ManagerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagerHandle")
            .field("capability", &self.capability)
            .field("name", &self.name())
            .field("state", &self.state())
            .finish()
    }
}

/// Read-only registry access.
///
/// Search order is always the core table first, then the auxiliary list in
/// insertion order. The first match wins.
pub trait ManagerLookup: Send + Sync {
    /// First manager registered under `capability`, optionally with an exact
    /// `name` match.
    fn find(&self, capability: CapabilityId, name: Option<&str>) -> Option<ManagerHandle>;

    /// Every manager registered under `capability`, core entry first.
    fn find_all(&self, capability: CapabilityId) -> Vec<ManagerHandle>;
}

/// Typed accessors over [`ManagerLookup`].
///
/// Absence is never an error: lookups return `None` or an empty `Vec`.
pub trait ManagerLookupExt: ManagerLookup {
    /// First manager registered under `C`.
    fn get_manager<C: Capability + ?Sized>(&self) -> Option<Arc<C>> {
        self.find(C::ID, None)?.downcast::<C>()
    }

    /// First manager registered under `C` whose name is exactly `name`.
    fn get_manager_named<C: Capability + ?Sized>(&self, name: &str) -> Option<Arc<C>> {
        self.find(C::ID, Some(name))?.downcast::<C>()
    }

    /// Every manager registered under `C`, core entry first.
    fn get_managers<C: Capability + ?Sized>(&self) -> Vec<Arc<C>> {
        self.find_all(C::ID)
            .iter()
            .filter_map(ManagerHandle::downcast::<C>)
            .collect()
    }

    /// True iff [`get_manager`](ManagerLookupExt::get_manager) would return a manager.
    fn manager_exists<C: Capability + ?Sized>(&self) -> bool {
        self.get_manager::<C>().is_some()
    }
}

impl<T: ManagerLookup + ?Sized> ManagerLookupExt for T {}
