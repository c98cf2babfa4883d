//! End-to-end registry scenarios: a core input system plus auxiliary
//! components that resolve it while initializing.

use std::any::Any;
use std::sync::Arc;

use parking_lot::RwLock;

use keystone_core::{
    ActiveConfiguration, Manager, ManagerError, ManagerLookup, ManagerLookupExt, ManagerRegistry,
    RegistryError, capability,
};

pub trait InputSystem: Manager {
    fn pointer_count(&self) -> usize;
}

pub trait TestComponent1: Manager {}
pub trait TestComponent2: Manager {}

capability!(dyn InputSystem, "input-system");
capability!(dyn TestComponent1, "test-component-1");
capability!(dyn TestComponent2, "test-component-2");

struct InputManager;

impl Manager for InputManager {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl InputSystem for InputManager {
    fn pointer_count(&self) -> usize {
        2
    }
}

/// Component that looks the input system up during `initialize`.
#[derive(Default)]
struct ComponentManager {
    name: Option<String>,
    input_system: RwLock<Option<Arc<dyn InputSystem>>>,
}

impl ComponentManager {
    fn named(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: Some(name.to_string()),
            ..Default::default()
        })
    }

    fn unnamed() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn input_system(&self) -> Option<Arc<dyn InputSystem>> {
        self.input_system.read().clone()
    }
}

impl Manager for ComponentManager {
    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("ComponentManager")
    }

    fn initialize(&self, registry: &dyn ManagerLookup) -> Result<(), ManagerError> {
        *self.input_system.write() = registry.get_manager::<dyn InputSystem>();
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl TestComponent1 for ComponentManager {}
impl TestComponent2 for ComponentManager {}

fn initialize_registry() -> ManagerRegistry {
    let registry = ManagerRegistry::new();
    registry
        .set_active_configuration(Some(
            ActiveConfiguration::new("scenario").with_core::<dyn InputSystem>(),
        ))
        .unwrap();
    assert!(registry.is_configured());
    registry
}

#[test]
fn test_no_configuration_found() {
    let registry = ManagerRegistry::new();
    registry.set_active_configuration(None).unwrap();

    assert!(registry.active_configuration().is_none());
    assert!(matches!(
        registry.add_manager::<dyn InputSystem>(Arc::new(InputManager)),
        Err(RegistryError::NoActiveConfiguration)
    ));
}

#[test]
fn test_fresh_registry_is_empty() {
    let registry = initialize_registry();
    assert!(registry.core_managers().is_empty());
    assert!(registry.all_components().is_empty());
}

#[test]
fn test_create_input_manager() {
    let registry = initialize_registry();

    registry.add_manager::<dyn InputSystem>(Arc::new(InputManager)).unwrap();

    assert_eq!(registry.core_count(), 1);
    assert!(registry.all_components().is_empty());
    assert_eq!(registry.get_manager::<dyn InputSystem>().unwrap().pointer_count(), 2);
}

#[test]
fn test_input_manager_does_not_exist() {
    let registry = initialize_registry();
    assert!(!registry.manager_exists::<dyn InputSystem>());
    assert!(registry.get_manager::<dyn InputSystem>().is_none());
}

#[test]
fn test_create_component() {
    let registry = initialize_registry();

    registry.add_manager::<dyn TestComponent1>(ComponentManager::unnamed()).unwrap();

    assert_eq!(registry.core_count(), 0);
    assert_eq!(registry.all_components().len(), 1);
    assert!(registry.get_manager::<dyn TestComponent1>().is_some());
}

#[test]
fn test_component_of_other_capability_not_returned() {
    let registry = initialize_registry();
    registry.add_manager::<dyn TestComponent1>(ComponentManager::unnamed()).unwrap();

    assert!(registry.get_manager_named::<dyn TestComponent2>("Test2").is_none());
    assert!(!registry.manager_exists::<dyn TestComponent2>());
}

#[test]
fn test_components_with_input() {
    let registry = initialize_registry();

    registry.add_manager::<dyn InputSystem>(Arc::new(InputManager)).unwrap();
    registry.add_manager::<dyn TestComponent1>(ComponentManager::unnamed()).unwrap();
    registry.add_manager::<dyn TestComponent2>(ComponentManager::named("Test2-1")).unwrap();

    assert_eq!(registry.core_count(), 1);
    assert_eq!(registry.all_components().len(), 2);
}

#[test]
fn test_named_components_resolve_input() {
    let registry = initialize_registry();
    let component1 = ComponentManager::named("Test14-1");
    let component2 = ComponentManager::named("Test14-2");

    registry.add_manager::<dyn InputSystem>(Arc::new(InputManager)).unwrap();
    registry.add_manager::<dyn TestComponent1>(component1.clone()).unwrap();
    registry.add_manager::<dyn TestComponent2>(component2.clone()).unwrap();

    let found2 = registry.get_manager_named::<dyn TestComponent2>("Test14-2").unwrap();
    let found2 = found2.as_any().downcast_ref::<ComponentManager>().unwrap();
    assert_eq!(found2.name(), "Test14-2");
    assert!(found2.input_system().is_some());

    let found1 = registry.get_manager_named::<dyn TestComponent1>("Test14-1").unwrap();
    let found1 = found1.as_any().downcast_ref::<ComponentManager>().unwrap();
    assert_eq!(found1.name(), "Test14-1");
    assert!(std::ptr::eq(found1, component1.as_ref()));
    assert!(found1.input_system().is_some());
}

#[test]
fn test_collections_accumulate_across_registrations() {
    let registry = initialize_registry();

    registry.add_manager::<dyn InputSystem>(Arc::new(InputManager)).unwrap();
    for _ in 0..3 {
        registry.add_manager::<dyn TestComponent1>(ComponentManager::unnamed()).unwrap();
    }
    registry.add_manager::<dyn TestComponent2>(ComponentManager::named("Test2-1")).unwrap();
    registry.add_manager::<dyn TestComponent2>(ComponentManager::named("Test2-2")).unwrap();

    assert_eq!(registry.get_managers::<dyn TestComponent1>().len(), 3);
    assert_eq!(registry.get_managers::<dyn TestComponent2>().len(), 2);
    assert_eq!(registry.all_components().len(), 5);

    let names: Vec<_> = registry
        .get_managers::<dyn TestComponent2>()
        .iter()
        .map(|m| m.name().to_string())
        .collect();
    assert_eq!(names, vec!["Test2-1", "Test2-2"]);
}

#[test]
fn test_second_input_system_rejected() {
    let registry = initialize_registry();
    registry.add_manager::<dyn InputSystem>(Arc::new(InputManager)).unwrap();

    let result = registry.add_manager::<dyn InputSystem>(Arc::new(InputManager));

    assert!(matches!(result, Err(RegistryError::DuplicateCoreManager { .. })));
    assert_eq!(registry.core_count(), 1);
    assert!(registry.all_components().is_empty());
}

#[test]
fn test_cleanup_clears_registry() {
    let registry = initialize_registry();
    registry.add_manager::<dyn InputSystem>(Arc::new(InputManager)).unwrap();
    registry.add_manager::<dyn TestComponent1>(ComponentManager::unnamed()).unwrap();

    registry
        .set_active_configuration(Some(ActiveConfiguration::new("fresh")))
        .unwrap();

    assert_eq!(registry.core_count(), 0);
    assert!(registry.all_components().is_empty());
    assert!(!registry.manager_exists::<dyn InputSystem>());
}
