//! Profile schema definitions.

use serde::{Deserialize, Serialize};

/// A registry profile.
///
/// `active_managers` lists the capability ids that are core for the
/// session. Managers registered under any other capability are routed to the
/// auxiliary component list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryProfile {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default)]
    pub active_managers: Vec<String>,

    #[serde(default)]
    pub host: HostConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for RegistryProfile {
    fn default() -> Self {
        Self {
            name: default_name(),
            active_managers: Vec::new(),
            host: HostConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

fn default_name() -> String {
    "default".to_string()
}

/// Host tick loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,

    /// Stop after this many ticks. Runs until interrupted when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_ticks: Option<u64>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval(),
            max_ticks: None,
        }
    }
}

fn default_tick_interval() -> u64 {
    16
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}
