//! Error types for the Keystone protocol layer.

mod manager;
mod registry;

pub use manager::*;
pub use registry::*;
