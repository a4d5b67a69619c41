//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.spelunk/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::fetch::FixtureOptions;
use crate::fetch::fixtures::{DEFAULT_PARTITION_COUNT, DEFAULT_TOPIC_COUNT};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SpelunkConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub fixtures: FixtureConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_file: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FixtureConfig {
    pub topic_count: Option<usize>,
    pub partition_count: Option<usize>,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub topic_count: Option<usize>,
    pub partition_count: Option<usize>,
    pub sync_fetch: bool,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_FILE: &str = "spelunk.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    pub fixtures: FixtureOptions,
    /// Run drill-down fetches on the event loop instead of a worker.
    pub sync_fetch: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.spelunk/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".spelunk").join("config.toml"))
}

/// Load config from `~/.spelunk/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `SpelunkConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<SpelunkConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return Ok(SpelunkConfig::default());
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(SpelunkConfig::default());
    }

    load_config_from(&path)
}

/// Load config from an explicit path.
pub fn load_config_from(path: &Path) -> Result<SpelunkConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: SpelunkConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Spelunk Configuration
# All settings are optional, defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# log_file = "spelunk.log"            # Relative to the working directory
# log_level = "debug"                 # "off", "error", "warn", "info", "debug", "trace"

# [fixtures]
# topic_count = 100                   # Or set SPELUNK_TOPIC_COUNT env var
# partition_count = 3                 # Or set SPELUNK_PARTITION_COUNT env var
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &SpelunkConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Log level: CLI → env → config → default
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| std::env::var("SPELUNK_LOG_LEVEL").ok())
        .or_else(|| config.general.log_level.clone())
        .and_then(|level| parse_level(&level))
        .unwrap_or(DEFAULT_LOG_LEVEL);

    let log_file = config
        .general
        .log_file
        .clone()
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    // Fixture sizes: CLI → env → config → default
    let topic_count = cli
        .topic_count
        .or_else(|| env_usize("SPELUNK_TOPIC_COUNT"))
        .or(config.fixtures.topic_count)
        .unwrap_or(DEFAULT_TOPIC_COUNT);
    let partition_count = cli
        .partition_count
        .or_else(|| env_usize("SPELUNK_PARTITION_COUNT"))
        .or(config.fixtures.partition_count)
        .unwrap_or(DEFAULT_PARTITION_COUNT);

    ResolvedConfig {
        log_file: PathBuf::from(log_file),
        log_level,
        fixtures: FixtureOptions {
            topic_count,
            partition_count,
        },
        sync_fetch: cli.sync_fetch,
    }
}

fn parse_level(level: &str) -> Option<LevelFilter> {
    match level.parse() {
        Ok(filter) => Some(filter),
        Err(_) => {
            warn!("Unknown log level '{}', using default", level);
            None
        }
    }
}

fn env_usize(name: &str) -> Option<usize> {
    let value = std::env::var(name).ok()?;
    match value.trim().parse() {
        Ok(n) => Some(n),
        Err(e) => {
            warn!("Ignoring {}={:?}: {}", name, value, e);
            None
        }
    }
}
