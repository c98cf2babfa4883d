//! Keystone - manager registry host
//!
//! Main entry point for the Keystone CLI.

mod cli;
mod host;
mod managers;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use keystone_config::{ProfileLoader, ProfileValidator, RegistryProfile};
use keystone_core::{ActiveConfiguration, ensure_initialized};

use cli::{Cli, Commands};
use host::{HostSettings, ShutdownSignal};

fn init_tracing(level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();
}

/// An explicit `--config` must exist; the default location may be absent.
fn load_profile(cli: &Cli) -> anyhow::Result<RegistryProfile> {
    match &cli.config {
        Some(path) => {
            let path = ProfileLoader::expand_path(&path.to_string_lossy());
            ProfileLoader::load(&path)
                .with_context(|| format!("Failed to load profile {}", path.display()))
        }
        None => match ProfileLoader::default_path() {
            Some(path) => Ok(ProfileLoader::load_or_default(&path)?),
            None => Ok(RegistryProfile::default()),
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let profile = load_profile(&cli)?;

    init_tracing(&profile.logging.level);

    match cli.command {
        Some(Commands::Validate) => validate(&profile),
        Some(Commands::Run { ticks, interval_ms }) => run(profile, ticks, interval_ms).await,
        None => run(profile, None, None).await,
    }
}

fn validate(profile: &RegistryProfile) -> anyhow::Result<()> {
    let result = ProfileValidator::validate(profile);

    for warning in &result.warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }
    for err in &result.errors {
        println!("error: {}: {}", err.path, err.message);
    }

    result.into_result()?;
    println!("Profile '{}' is valid", profile.name);
    Ok(())
}

async fn run(profile: RegistryProfile, ticks: Option<u64>, interval_ms: Option<u64>) -> anyhow::Result<()> {
    for warning in ProfileValidator::validate(&profile).into_result()? {
        warn!("Profile {}: {}", warning.path, warning.message);
    }

    let registry = ensure_initialized();
    registry.set_active_configuration(Some(ActiveConfiguration::from_profile(&profile)))?;
    managers::register_builtin(registry)?;

    info!(
        "Keystone started: profile '{}', {} core, {} components",
        profile.name,
        registry.core_count(),
        registry.component_count()
    );

    let shutdown = ShutdownSignal::new();
    let receiver = shutdown.subscribe();
    let ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.trigger();
        }
    });

    let settings = HostSettings::from_config(&profile.host).with_overrides(ticks, interval_ms);
    let outcome = host::run_loop(registry, settings, receiver).await;

    if let Err(e) = registry.teardown() {
        error!("Teardown failed: {}", e);
    }

    let ticks = outcome?;
    info!("Keystone stopped after {} ticks", ticks);
    Ok(())
}
