//! Active configuration binding.

use indexmap::IndexSet;

use keystone_config::RegistryProfile;
use keystone_protocols::{Capability, CapabilityId};

/// Declares which capabilities are core for the current session.
///
/// Only routing is affected: a core capability gets a single slot in the
/// core-manager table, everything else goes to the auxiliary list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveConfiguration {
    name: String,
    core: IndexSet<String>,
}

impl ActiveConfiguration {
    /// Create a configuration with no core capabilities.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            core: IndexSet::new(),
        }
    }

    /// Build from a loaded profile.
    pub fn from_profile(profile: &RegistryProfile) -> Self {
        Self {
            name: profile.name.clone(),
            core: profile.active_managers.iter().cloned().collect(),
        }
    }

    /// Declare `C` as a core capability.
    pub fn with_core<C: Capability + ?Sized>(self) -> Self {
        self.with_core_id(C::ID.as_str())
    }

    /// Declare a core capability by id.
    pub fn with_core_id(mut self, id: impl Into<String>) -> Self {
        self.core.insert(id.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether managers registered under `capability` belong in the core table.
    pub fn is_core(&self, capability: CapabilityId) -> bool {
        self.core.contains(capability.as_str())
    }

    /// Core capability ids in declaration order.
    pub fn core_capabilities(&self) -> impl Iterator<Item = &str> {
        self.core.iter().map(String::as_str)
    }
}

impl Default for ActiveConfiguration {
    fn default() -> Self {
        Self::new("default")
    }
}
