//! Profile validation.

use std::collections::HashSet;

use crate::error::ConfigError;
use crate::schema::RegistryProfile;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Fold errors into [`ConfigError::Invalid`], handing back warnings on success.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        if self.is_valid() {
            return Ok(self.warnings);
        }
        let summary = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.path, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        Err(ConfigError::Invalid(summary))
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Profile validator.
pub struct ProfileValidator;

impl ProfileValidator {
    /// Validate the profile.
    pub fn validate(profile: &RegistryProfile) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_name(profile, &mut result);
        Self::validate_active_managers(profile, &mut result);
        Self::validate_host(profile, &mut result);

        result
    }

    fn validate_name(profile: &RegistryProfile, result: &mut ValidationResult) {
        if profile.name.trim().is_empty() {
            result.add_warning(ValidationWarning::new(
                "name",
                "Profile name is empty, log lines will not identify the profile",
            ));
        }
    }

    fn validate_active_managers(profile: &RegistryProfile, result: &mut ValidationResult) {
        if profile.active_managers.is_empty() {
            result.add_warning(ValidationWarning::new(
                "active_managers",
                "No core capabilities declared, every manager will be an auxiliary component",
            ));
        }

        let mut seen = HashSet::new();
        for (i, id) in profile.active_managers.iter().enumerate() {
            let path = format!("active_managers[{}]", i);
            if id.trim().is_empty() {
                result.add_error(ValidationError::new(path, "Capability id cannot be empty"));
            } else if !seen.insert(id.as_str()) {
                result.add_error(ValidationError::new(
                    path,
                    format!("Capability '{}' is declared more than once", id),
                ));
            }
        }
    }

    fn validate_host(profile: &RegistryProfile, result: &mut ValidationResult) {
        if profile.host.tick_interval_ms == 0 {
            result.add_error(ValidationError::new(
                "host.tick_interval_ms",
                "tick_interval_ms must be greater than 0",
            ));
        } else if profile.host.tick_interval_ms < 4 {
            result.add_warning(ValidationWarning::new(
                "host.tick_interval_ms",
                "tick_interval_ms is below 4ms, managers will be updated faster than most hosts render",
            ));
        }

        if profile.host.max_ticks == Some(0) {
            result.add_warning(ValidationWarning::new(
                "host.max_ticks",
                "max_ticks is 0, the host will tear down without ticking",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
