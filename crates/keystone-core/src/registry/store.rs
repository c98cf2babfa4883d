//! Registry store.
//!
//! Two parallel collections with different uniqueness rules:
//!
//! - the core-manager table, at most one manager per capability, and
//! - the auxiliary component list, any number of managers per capability.
//!
//! Lookups search the core table first, then the component list in insertion
//! order, and the first match wins. Callers rely on that order to pick
//! between same-capability components, so it is part of the contract.

use indexmap::IndexMap;

use keystone_protocols::{CapabilityId, ManagerHandle, RegistryError};

/// Where a registration landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The core-manager table.
    Core,
    /// The auxiliary component list.
    Component,
}

/// Storage for registered managers.
///
/// The store holds no lock and runs no lifecycle hooks; the facade does both.
#[derive(Debug, Default)]
pub struct RegistryStore {
    core: IndexMap<CapabilityId, ManagerHandle>,
    components: Vec<ManagerHandle>,
}

impl RegistryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a handle.
    ///
    /// With `core` set the handle takes the capability's core slot, or the
    /// insert is rejected with [`RegistryError::DuplicateCoreManager`] and the
    /// store is left unchanged. Otherwise it is appended to the component list.
    pub fn insert(&mut self, handle: ManagerHandle, core: bool) -> Result<Placement, RegistryError> {
        if !core {
            self.components.push(handle);
            return Ok(Placement::Component);
        }

        let capability = handle.capability();
        if let Some(existing) = self.core.get(&capability) {
            return Err(RegistryError::DuplicateCoreManager {
                capability,
                existing: existing.name().to_string(),
            });
        }

        self.core.insert(capability, handle);
        Ok(Placement::Core)
    }

    /// First handle for `capability`, optionally requiring an exact name.
    pub fn find(&self, capability: CapabilityId, name: Option<&str>) -> Option<&ManagerHandle> {
        let matches = |handle: &&ManagerHandle| name.is_none_or(|n| handle.name() == n);

        self.core
            .get(&capability)
            .filter(matches)
            .or_else(|| {
                self.components
                    .iter()
                    .filter(|handle| handle.capability() == capability)
                    .find(matches)
            })
    }

    /// Every handle for `capability`, core entry first.
    pub fn find_all(&self, capability: CapabilityId) -> Vec<ManagerHandle> {
        self.core
            .get(&capability)
            .into_iter()
            .chain(
                self.components
                    .iter()
                    .filter(|handle| handle.capability() == capability),
            )
            .cloned()
            .collect()
    }

    /// Look a handle up by registration identity.
    pub fn find_same(&self, handle: &ManagerHandle) -> Option<&ManagerHandle> {
        self.iter().find(|entry| entry.is_same(handle))
    }

    /// Remove the handle [`find`](Self::find) would return.
    pub fn remove_first(&mut self, capability: CapabilityId, name: Option<&str>) -> Option<ManagerHandle> {
        let target = self.find(capability, name)?.clone();
        self.remove(&target).then_some(target)
    }

    /// Remove a handle by registration identity. Returns `false` if it was not stored.
    pub fn remove(&mut self, handle: &ManagerHandle) -> bool {
        let capability = handle.capability();
        if self.core.get(&capability).is_some_and(|entry| entry.is_same(handle)) {
            self.core.shift_remove(&capability);
            return true;
        }

        match self.components.iter().position(|entry| entry.is_same(handle)) {
            Some(index) => {
                self.components.remove(index);
                true
            }
            None => false,
        }
    }

    /// Core entries in registration order.
    pub fn core(&self) -> Vec<ManagerHandle> {
        self.core.values().cloned().collect()
    }

    /// Auxiliary components in insertion order.
    pub fn components(&self) -> Vec<ManagerHandle> {
        self.components.clone()
    }

    /// Every handle in dispatch order: core table, then components.
    pub fn iter(&self) -> impl Iterator<Item = &ManagerHandle> {
        self.core.values().chain(self.components.iter())
    }

    /// Owned copy of [`iter`](Self::iter), for dispatching without a lock held.
    pub fn snapshot(&self) -> Vec<ManagerHandle> {
        self.iter().cloned().collect()
    }

    /// Empty both collections, returning what they held in dispatch order.
    pub fn drain(&mut self) -> Vec<ManagerHandle> {
        let mut drained: Vec<ManagerHandle> = self.core.drain(..).map(|(_, handle)| handle).collect();
        drained.append(&mut self.components);
        drained
    }

    pub fn core_len(&self) -> usize {
        self.core.len()
    }

    pub fn component_len(&self) -> usize {
        self.components.len()
    }

    pub fn len(&self) -> usize {
        self.core_len() + self.component_len()
    }

    pub fn is_empty(&self) -> bool {
        self.core.is_empty() && self.components.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keystone_protocols::Manager;
    use std::any::Any;
    use std::sync::Arc;

    trait Input: Manager {}
    trait Widget: Manager {}

    keystone_protocols::capability!(dyn Input, "input-system");
    keystone_protocols::capability!(dyn Widget, "widget");

    struct Item(&'static str);

    impl Manager for Item {
        fn name(&self) -> &str {
            self.0
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    impl Input for Item {}
    impl Widget for Item {}

    fn input(name: &'static str) -> ManagerHandle {
        let item: Arc<dyn Input> = Arc::new(Item(name));
        ManagerHandle::new(item)
    }

    fn widget(name: &'static str) -> ManagerHandle {
        let item: Arc<dyn Widget> = Arc::new(Item(name));
        ManagerHandle::new(item)
    }

    const INPUT: CapabilityId = CapabilityId::new("input-system");
    const WIDGET: CapabilityId = CapabilityId::new("widget");

    #[test]
    fn test_store_new() {
        let store = RegistryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_insert_core_and_component() {
        let mut store = RegistryStore::new();
        assert_eq!(store.insert(input("input"), true).unwrap(), Placement::Core);
        assert_eq!(store.insert(widget("w"), false).unwrap(), Placement::Component);
        assert_eq!(store.core_len(), 1);
        assert_eq!(store.component_len(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_insert_duplicate_core_rejected() {
        let mut store = RegistryStore::new();
        let first = input("first");
        store.insert(first.clone(), true).unwrap();

        let result = store.insert(input("second"), true);
        assert!(matches!(
            result,
            Err(RegistryError::DuplicateCoreManager { ref existing, .. }) if existing == "first"
        ));
        assert_eq!(store.core_len(), 1);
        assert!(store.find(INPUT, None).unwrap().is_same(&first));
    }

    #[test]
    fn test_components_accept_duplicates() {
        let mut store = RegistryStore::new();
        store.insert(widget("same"), false).unwrap();
        store.insert(widget("same"), false).unwrap();
        store.insert(widget("other"), false).unwrap();
        assert_eq!(store.find_all(WIDGET).len(), 3);
    }

    #[test]
    fn test_find_first_match_wins() {
        let mut store = RegistryStore::new();
        let first = widget("dup");
        store.insert(first.clone(), false).unwrap();
        store.insert(widget("dup"), false).unwrap();

        assert!(store.find(WIDGET, Some("dup")).unwrap().is_same(&first));
        assert!(store.find(WIDGET, None).unwrap().is_same(&first));
    }

    #[test]
    fn test_find_core_before_components() {
        let mut store = RegistryStore::new();
        let component = input("component");
        let core = input("core");
        store.insert(component.clone(), false).unwrap();
        store.insert(core.clone(), true).unwrap();

        assert!(store.find(INPUT, None).unwrap().is_same(&core));
        let all = store.find_all(INPUT);
        assert!(all[0].is_same(&core));
        assert!(all[1].is_same(&component));
    }

    #[test]
    fn test_find_by_name_falls_through_core() {
        let mut store = RegistryStore::new();
        store.insert(input("core"), true).unwrap();
        let named = input("named");
        store.insert(named.clone(), false).unwrap();

        assert!(store.find(INPUT, Some("named")).unwrap().is_same(&named));
        assert!(store.find(INPUT, Some("missing")).is_none());
    }

    #[test]
    fn test_find_other_capability_ignored() {
        let mut store = RegistryStore::new();
        store.insert(widget("shared-name"), false).unwrap();
        assert!(store.find(INPUT, Some("shared-name")).is_none());
        assert!(store.find_all(INPUT).is_empty());
    }

    #[test]
    fn test_remove_by_identity() {
        let mut store = RegistryStore::new();
        let a = widget("a");
        let b = widget("a");
        store.insert(a.clone(), false).unwrap();
        store.insert(b.clone(), false).unwrap();

        assert!(store.remove(&b));
        assert!(!store.remove(&b));
        assert!(store.find(WIDGET, None).unwrap().is_same(&a));
        assert_eq!(store.component_len(), 1);
    }

    #[test]
    fn test_remove_core_frees_slot() {
        let mut store = RegistryStore::new();
        let core = input("core");
        store.insert(core.clone(), true).unwrap();
        assert!(store.remove(&core));
        assert!(store.insert(input("replacement"), true).is_ok());
    }

    #[test]
    fn test_remove_first() {
        let mut store = RegistryStore::new();
        store.insert(widget("a"), false).unwrap();
        store.insert(widget("b"), false).unwrap();

        let removed = store.remove_first(WIDGET, Some("b")).unwrap();
        assert_eq!(removed.name(), "b");
        assert!(store.remove_first(WIDGET, Some("b")).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_snapshot_and_drain_order() {
        let mut store = RegistryStore::new();
        store.insert(widget("w1"), false).unwrap();
        store.insert(input("core"), true).unwrap();
        store.insert(widget("w2"), false).unwrap();

        let names: Vec<_> = store.snapshot().iter().map(|h| h.name().to_string()).collect();
        assert_eq!(names, vec!["core", "w1", "w2"]);

        let drained: Vec<_> = store.drain().iter().map(|h| h.name().to_string()).collect();
        assert_eq!(drained, names);
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_shared_instance_by_registration() {
        let mut store = RegistryStore::new();
        let item = Arc::new(Item("shared"));
        let as_input: Arc<dyn Input> = item.clone();
        let as_widget: Arc<dyn Widget> = item;
        let input = ManagerHandle::new(as_input);
        let widget = ManagerHandle::new(as_widget);
        store.insert(input.clone(), false).unwrap();
        store.insert(widget.clone(), false).unwrap();

        assert!(store.remove(&widget));
        assert!(store.find(WIDGET, None).is_none());
        assert!(store.find(INPUT, None).unwrap().is_same(&input));
        assert!(store.find_same(&widget).is_none());
    }

    #[test]
    fn test_find_same() {
        let mut store = RegistryStore::new();
        let handle = widget("w");
        store.insert(handle.clone(), false).unwrap();
        assert!(store.find_same(&handle).is_some());
        assert!(store.find_same(&widget("w")).is_none());
    }
}
