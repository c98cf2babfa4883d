//! Profile loader.

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ConfigError;
use crate::schema::RegistryProfile;

static ENV_VAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

/// Profile loader with environment variable substitution.
pub struct ProfileLoader;

impl ProfileLoader {
    /// Load a profile from a TOML file.
    pub fn load(path: &Path) -> Result<RegistryProfile, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load a profile from a string.
    pub fn load_str(content: &str) -> Result<RegistryProfile, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let profile: RegistryProfile = toml::from_str(&expanded)?;
        Ok(profile)
    }

    /// Load `path` if it exists, otherwise fall back to the default profile.
    pub fn load_or_default(path: &Path) -> Result<RegistryProfile, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::NotFound(_)) => Ok(RegistryProfile::default()),
            other => other,
        }
    }

    /// `<config dir>/keystone/profile.toml`, when a config dir is known.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("keystone").join("profile.toml"))
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();

        for cap in ENV_VAR.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.config`).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).as_ref())
    }
}
