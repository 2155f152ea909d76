//! This crate contains the [`Config`] struct used to configure a compile/
//! run/decide invocation: a builder-constructed, otherwise-immutable struct
//! backed by a lazily-read `config.toml` side-channel for the handful of
//! knobs worth tuning without a recompile.

use std::sync::LazyLock;

use crate::toml::ConfigToml;

/// Read config.toml only once.
pub static CONFIG_TOML: LazyLock<ConfigToml> = LazyLock::new(ConfigToml::read_toml);

/// Sets the configuration for a compile/run/decide invocation. Use
/// [`Config::new_default`] or [`Config::builder`] to create one.
///
/// # Example
/// ```
/// use nesa_challenge::config::Config;
///
/// let config = Config::new_default();
/// assert!(config.log_decider_estimate());
///
/// let config = Config::builder().log_decider_estimate(false).build();
/// assert!(!config.log_decider_estimate());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether `decide()` logs its worst-case transition-table-count
    /// estimate before running: can grow exponentially in variable count.
    log_decider_estimate: bool,
    /// Initial capacity hint for the decider's transition-table history.
    /// Purely an allocation hint, never affects the decided outcome.
    decider_history_initial_capacity: usize,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn builder_from_config(config: &Config) -> ConfigBuilder {
        ConfigBuilder {
            config: config.clone(),
        }
    }

    /// Default values, taken from `config.toml` (created with defaults if
    /// absent). Better use [`Config::builder`] for anything non-default.
    pub fn new_default() -> Config {
        Self {
            log_decider_estimate: CONFIG_TOML.log_decider_estimate(),
            decider_history_initial_capacity: CONFIG_TOML.history_initial_capacity(),
        }
    }

    pub fn log_decider_estimate(&self) -> bool {
        self.log_decider_estimate
    }

    pub fn decider_history_initial_capacity(&self) -> usize {
        self.decider_history_initial_capacity
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new_default()
    }
}

pub struct ConfigBuilder {
    config: Config,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            config: Config::new_default(),
        }
    }
}

impl ConfigBuilder {
    pub fn log_decider_estimate(mut self, value: bool) -> Self {
        self.config.log_decider_estimate = value;
        self
    }

    pub fn decider_history_initial_capacity(mut self, value: usize) -> Self {
        self.config.decider_history_initial_capacity = value;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
