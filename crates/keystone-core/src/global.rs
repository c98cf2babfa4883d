//! Process-wide registry for the composition root.
//!
//! Library code should take a `&ManagerRegistry` (or `&dyn ManagerLookup`)
//! explicitly. This accessor exists for the outermost layer, the host binary,
//! which owns the session and hands the registry down.

use once_cell::sync::Lazy;
use tracing::debug;

use crate::registry::ManagerRegistry;

static REGISTRY: Lazy<ManagerRegistry> = Lazy::new(|| {
    debug!("Creating process-wide manager registry");
    ManagerRegistry::new()
});

/// The process-wide registry, created on first call.
///
/// It starts with no configuration bound.
pub fn ensure_initialized() -> &'static ManagerRegistry {
    &REGISTRY
}
