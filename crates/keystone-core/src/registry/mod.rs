//! Manager registry: storage and the public facade.

mod manager_registry;
mod store;

pub use manager_registry::ManagerRegistry;
pub use store::{Placement, RegistryStore};
