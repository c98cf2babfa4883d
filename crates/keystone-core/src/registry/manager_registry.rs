//! Manager registry facade.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{error, info, warn};

use keystone_protocols::{
    Capability, CapabilityId, Manager, ManagerHandle, ManagerLookup, ManagerState, RegistryError,
};

use super::store::{Placement, RegistryStore};
use crate::configuration::ActiveConfiguration;
use crate::lifecycle::LifecycleDispatcher;

struct Inner {
    configuration: Option<ActiveConfiguration>,
    store: RegistryStore,
}

/// Registration, lookup and lifecycle orchestration for managers.
///
/// One lock covers the configuration and both collections. It is never held
/// while a manager hook runs, so hooks may call back into the registry.
/// Typed lookups come from [`ManagerLookupExt`](keystone_protocols::ManagerLookupExt):
///
/// ```
/// use std::any::Any;
/// use std::sync::Arc;
/// use keystone_core::{ActiveConfiguration, Manager, ManagerLookupExt, ManagerRegistry, capability};
///
/// pub trait InputSystem: Manager {}
/// capability!(dyn InputSystem, "input-system");
///
/// struct InputManager;
/// impl Manager for InputManager {
///     fn as_any(&self) -> &dyn Any { self }
/// }
/// impl InputSystem for InputManager {}
///
/// let registry = ManagerRegistry::with_configuration(
///     ActiveConfiguration::default().with_core::<dyn InputSystem>(),
/// );
/// let input: Arc<dyn InputSystem> = Arc::new(InputManager);
/// registry.add_manager(input).unwrap();
///
/// assert!(registry.manager_exists::<dyn InputSystem>());
/// assert_eq!(registry.core_count(), 1);
/// assert!(registry.all_components().is_empty());
/// ```
pub struct ManagerRegistry {
    inner: RwLock<Inner>,
}

impl ManagerRegistry {
    /// Create a registry with no configuration bound.
    ///
    /// Registrations fail with [`RegistryError::NoActiveConfiguration`] until
    /// [`set_active_configuration`](Self::set_active_configuration) is called.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                configuration: None,
                store: RegistryStore::new(),
            }),
        }
    }

    /// Create a registry with `configuration` already bound.
    pub fn with_configuration(configuration: ActiveConfiguration) -> Self {
        let registry = Self::new();
        registry.inner.write().configuration = Some(configuration);
        registry
    }

    /// Register `instance` under capability `C` and initialize it.
    ///
    /// Core capabilities take the single core slot; a second core
    /// registration is rejected with [`RegistryError::DuplicateCoreManager`]
    /// and the rejected instance sees no lifecycle call. Other capabilities
    /// are appended to the component list.
    ///
    /// `initialize` runs before this returns. If it fails the registration is
    /// rolled back and the failure is returned.
    pub fn add_manager<C: Capability + ?Sized>(&self, instance: Arc<C>) -> Result<(), RegistryError> {
        let handle = ManagerHandle::new(instance);

        let placement = {
            let mut inner = self.inner.write();
            let core = match inner.configuration.as_ref() {
                Some(configuration) => configuration.is_core(C::ID),
                None => {
                    error!("{}", RegistryError::NoActiveConfiguration);
                    return Err(RegistryError::NoActiveConfiguration);
                }
            };
            inner.store.insert(handle.clone(), core).inspect_err(|e| warn!("{}", e))?
        };

        info!(
            "Registered manager {} under {} ({})",
            handle.name(),
            C::ID,
            match placement {
                Placement::Core => "core",
                Placement::Component => "component",
            }
        );

        if let Err(e) = LifecycleDispatcher::initialize(&handle, self) {
            self.inner.write().store.remove(&handle);
            warn!("Rolled back registration of {}: {}", handle.name(), e);
            return Err(e);
        }
        Ok(())
    }

    /// Remove the manager `get_manager` (or `get_manager_named` when `name`
    /// is given) would return, and destroy it.
    ///
    /// Returns `Ok(false)` when nothing matched.
    pub fn remove_manager<C: Capability + ?Sized>(&self, name: Option<&str>) -> Result<bool, RegistryError> {
        let removed = self.inner.write().store.remove_first(C::ID, name);
        match removed {
            Some(handle) => {
                info!("Removing manager {} from {}", handle.name(), C::ID);
                LifecycleDispatcher::destroy(&handle, self)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Auxiliary components in insertion order. Core managers are not listed.
    pub fn all_components(&self) -> Vec<Arc<dyn Manager>> {
        self.inner
            .read()
            .store
            .components()
            .into_iter()
            .map(|handle| handle.manager().clone())
            .collect()
    }

    /// Core managers in registration order.
    pub fn core_managers(&self) -> Vec<Arc<dyn Manager>> {
        self.inner
            .read()
            .store
            .core()
            .into_iter()
            .map(|handle| handle.manager().clone())
            .collect()
    }

    /// Number of occupied core slots.
    pub fn core_count(&self) -> usize {
        self.inner.read().store.core_len()
    }

    /// Number of auxiliary components.
    pub fn component_count(&self) -> usize {
        self.inner.read().store.component_len()
    }

    /// Lifecycle state of `manager`'s registration under `C`, `None` if it is
    /// not registered there.
    pub fn manager_state<C: Capability + ?Sized>(&self, manager: &Arc<dyn Manager>) -> Option<ManagerState> {
        self.inner
            .read()
            .store
            .iter()
            .find(|handle| handle.capability() == C::ID && handle.is_manager(manager))
            .map(ManagerHandle::state)
    }

    /// The bound configuration, if any.
    pub fn active_configuration(&self) -> Option<ActiveConfiguration> {
        self.inner.read().configuration.clone()
    }

    pub fn is_configured(&self) -> bool {
        self.inner.read().configuration.is_some()
    }

    /// Replace the active configuration.
    ///
    /// Every registered manager is destroyed (core table first, then
    /// components) and both collections are cleared; nothing is registered
    /// automatically afterwards. Binding `None` leaves the registry rejecting
    /// registrations until a configuration is set again.
    ///
    /// The new configuration is bound before the destroy sweep runs, so a
    /// registration made from a `destroy` hook lands in the new state.
    pub fn set_active_configuration(
        &self,
        configuration: Option<ActiveConfiguration>,
    ) -> Result<(), RegistryError> {
        let retired = {
            let mut inner = self.inner.write();
            match &configuration {
                Some(configuration) => info!("Binding configuration: {}", configuration.name()),
                None => error!("{}", RegistryError::NoActiveConfiguration),
            }
            inner.configuration = configuration;
            inner.store.drain()
        };

        if !retired.is_empty() {
            info!("Configuration replaced, destroying {} managers", retired.len());
        }
        LifecycleDispatcher::destroy_all(retired, self)
    }

    /// Destroy every manager and clear both collections, keeping the
    /// configuration bound.
    pub fn teardown(&self) -> Result<(), RegistryError> {
        let retired = self.inner.write().store.drain();
        info!("Tearing down {} managers", retired.len());
        LifecycleDispatcher::destroy_all(retired, self)
    }

    /// One host tick: `update` on every active manager, core table first.
    pub fn tick(&self) -> Result<(), RegistryError> {
        let snapshot = self.inner.read().store.snapshot();
        LifecycleDispatcher::update_all(&snapshot, self)
    }

    /// Ask every active manager to reconfigure.
    ///
    /// Never called by the registry itself; the owner of the configuration
    /// decides when its content changed enough to warrant it.
    pub fn reset_managers(&self) -> Result<(), RegistryError> {
        let snapshot = self.inner.read().store.snapshot();
        info!("Resetting {} managers", snapshot.len());
        LifecycleDispatcher::reset_all(&snapshot, self)
    }
}

impl ManagerLookup for ManagerRegistry {
    fn find(&self, capability: CapabilityId, name: Option<&str>) -> Option<ManagerHandle> {
        self.inner.read().store.find(capability, name).cloned()
    }

    fn find_all(&self, capability: CapabilityId) -> Vec<ManagerHandle> {
        self.inner.read().store.find_all(capability)
    }
}

impl Default for ManagerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "manager_registry_tests.rs"]
mod tests;
