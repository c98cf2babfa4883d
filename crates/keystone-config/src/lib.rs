//! # Keystone Config
//!
//! Registry profiles: which capabilities are core for a session, plus the
//! host loop and logging settings that go with them.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ProfileLoader;
pub use schema::*;
pub use validator::{ProfileValidator, ValidationError, ValidationResult, ValidationWarning};
