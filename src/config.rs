//! Configuration for minutecheck.
//!
//! Configuration sources (highest priority first):
//! 1. Command-line flags (applied by the CLI on top of this)
//! 2. Environment variables (MINUTECHECK_POLICY, MINUTECHECK_MODE, MINUTECHECK_RADIUS)
//! 3. Config file (.minutecheck/config.yaml)
//! 4. Defaults
//!
//! Config file discovery:
//! - Searches current directory and parents for .minutecheck/config.yaml
//! - Falls back to <config dir>/minutecheck/config.yaml

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::check::{default_null_markers, CheckOptions, MarkerStyle};
use crate::document::IndexPolicy;
use crate::location::{ResolveMode, DEFAULT_RADIUS};
use crate::report::ReportFormat;
use crate::sheet::ColumnLayout;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

pub const ENV_POLICY: &str = "MINUTECHECK_POLICY";
pub const ENV_MODE: &str = "MINUTECHECK_MODE";
pub const ENV_RADIUS: &str = "MINUTECHECK_RADIUS";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub indexing: IndexingConfig,
    #[serde(default)]
    pub resolution: ResolutionConfig,
    #[serde(default)]
    pub columns: Option<ColumnLayout>,
    #[serde(default)]
    pub null_markers: Option<Vec<String>>,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndexingConfig {
    pub policy: Option<IndexPolicy>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResolutionConfig {
    pub mode: Option<ResolveMode>,
    /// Half-width of the neighborhood window in lines
    pub radius: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    pub marker: Option<MarkerStyle>,
    pub format: Option<ReportFormat>,
}

/// Configuration after all sources are applied
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub policy: IndexPolicy,
    pub mode: ResolveMode,
    pub radius: u32,
    pub columns: ColumnLayout,
    pub null_markers: Vec<String>,
    pub marker: MarkerStyle,
    pub format: ReportFormat,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            policy: IndexPolicy::default(),
            mode: ResolveMode::default(),
            radius: DEFAULT_RADIUS,
            columns: ColumnLayout::default(),
            null_markers: default_null_markers(),
            marker: MarkerStyle::default(),
            format: ReportFormat::default(),
            config_file: None,
        }
    }
}

impl ResolvedConfig {
    /// Options for a row checker built from this configuration
    pub fn check_options(&self) -> CheckOptions {
        CheckOptions {
            mode: self.mode,
            radius: self.radius,
            marker: self.marker,
            null_markers: self.null_markers.clone(),
        }
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".minutecheck").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    let global = dirs::config_dir()?.join("minutecheck").join("config.yaml");
    global.exists().then_some(global)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Merge a config file and environment lookups over the defaults
fn resolve_config(
    file: Option<ConfigFile>,
    config_file: Option<PathBuf>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig> {
    let file = file.unwrap_or_default();
    let defaults = ResolvedConfig::default();

    let policy = match env(ENV_POLICY) {
        Some(value) => value
            .parse::<IndexPolicy>()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Invalid {}", ENV_POLICY))?,
        None => file.indexing.policy.unwrap_or(defaults.policy),
    };

    let mode = match env(ENV_MODE) {
        Some(value) => value
            .parse::<ResolveMode>()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Invalid {}", ENV_MODE))?,
        None => file.resolution.mode.unwrap_or(defaults.mode),
    };

    let radius = match env(ENV_RADIUS) {
        Some(value) => value
            .trim()
            .parse::<u32>()
            .with_context(|| format!("Invalid {}: {}", ENV_RADIUS, value))?,
        None => file.resolution.radius.unwrap_or(defaults.radius),
    };

    Ok(ResolvedConfig {
        policy,
        mode,
        radius,
        columns: file.columns.unwrap_or(defaults.columns),
        null_markers: file.null_markers.unwrap_or(defaults.null_markers),
        marker: file.output.marker.unwrap_or(defaults.marker),
        format: file.output.format.unwrap_or(defaults.format),
        config_file,
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let config_file = find_config_file();
    let file = match config_file {
        Some(ref path) => Some(load_config_file(path)?),
        None => None,
    };

    resolve_config(file, config_file, |key| std::env::var(key).ok())
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}
