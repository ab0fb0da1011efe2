use anyhow::Context;
use log::{debug, info};
use serde::Deserialize;
use std::{fs, path::PathBuf, time::Duration};

use envdetect::{
    scrollbar::SCROLL_TOLERANCE,
    services::platform::Platform,
    stabilize::{DEFAULT_DELAY, DEFAULT_MAX_RETRIES},
};

pub const DEFAULT_CONFIG_FILE_PATH: &str = "~/.config/envdetect/config.toml";

fn default_log_level() -> String {
    "warn".to_owned()
}

fn default_platform_timeout_ms() -> u64 {
    1000
}

fn default_scroll_tolerance() -> i32 {
    SCROLL_TOLERANCE
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn default_delay_ms() -> u64 {
    DEFAULT_DELAY.as_millis() as u64
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StabilizationConfig {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl Default for StabilizationConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            delay_ms: default_delay_ms(),
        }
    }
}

impl StabilizationConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Skips asking the host when set.
    #[serde(default)]
    pub platform: Option<Platform>,
    #[serde(default = "default_platform_timeout_ms")]
    pub platform_timeout_ms: u64,
    #[serde(default = "default_scroll_tolerance")]
    pub scroll_tolerance: i32,
    #[serde(default)]
    pub stabilization: StabilizationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            platform: None,
            platform_timeout_ms: default_platform_timeout_ms(),
            scroll_tolerance: default_scroll_tolerance(),
            stabilization: StabilizationConfig::default(),
        }
    }
}

impl Config {
    pub fn platform_timeout(&self) -> Duration {
        Duration::from_millis(self.platform_timeout_ms)
    }

    /// Platform to classify with: command line, then the recording, then this config.
    ///
    /// `None` means nobody knows it and the host has to be asked.
    pub fn platform_override(
        &self,
        cli: Option<Platform>,
        recorded: Option<&Platform>,
    ) -> Option<Platform> {
        cli.or_else(|| recorded.cloned())
            .or_else(|| self.platform.clone())
    }
}

fn expand_path(path: PathBuf) -> anyhow::Result<PathBuf> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw)
        .with_context(|| format!("failed to expand config path {raw}"))?;

    Ok(PathBuf::from(expanded.into_owned()))
}

/// Read the config file, falling back to defaults when it does not exist.
pub fn get_config(path: Option<PathBuf>) -> anyhow::Result<(Config, PathBuf)> {
    let config_path = expand_path(path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE_PATH)))?;

    if !config_path.exists() {
        info!(
            "No config file at {}, using defaults",
            config_path.display()
        );
        return Ok((Config::default(), config_path));
    }

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read {}", config_path.display()))?;
    let config = parse_config(&content)
        .with_context(|| format!("failed to parse {}", config_path.display()))?;
    debug!("Config: {config:?}");

    Ok((config, config_path))
}

fn parse_config(content: &str) -> anyhow::Result<Config> {
    Ok(toml::from_str(content)?)
}
