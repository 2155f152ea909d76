//! Very basic functionality to read and write some configuration into a toml
//! configuration file: read-or-create-default, never fail the whole run over
//! a bad config file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILE: &str = "nesa_challenge.toml";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ConfigToml {
    /// Whether `decide()` logs its worst-case table-count estimate before
    /// running (see config.rs' `decider_timer_info` feature for the
    /// compile-time counterpart).
    #[serde(default = "default_log_decider_estimate")]
    log_decider_estimate: bool,

    /// Initial capacity hint for the decider's transition-table history, in
    /// number of distinct tables. Only affects allocation, never semantics.
    #[serde(default = "default_history_initial_capacity")]
    history_initial_capacity: usize,
}

impl ConfigToml {
    pub fn read_toml() -> ConfigToml {
        if Path::new(CONFIG_FILE).exists() {
            let config_content = fs::read_to_string(CONFIG_FILE)
                .expect("Config file {CONFIG_FILE} could not be read.");
            let config: ConfigToml = toml::from_str(&config_content)
                .expect("Config file {CONFIG_FILE} could not be parsed.");
            config
        } else {
            let default_config = ConfigToml::default();
            let toml_string = toml::to_string_pretty(&default_config)
                .expect("Failed to serialize default config");
            let write_result = fs::write(CONFIG_FILE, toml_string);
            if write_result.is_err() {
                println!(
                    "NOTE: Config file {CONFIG_FILE} was not found and could not be written. Using default values."
                );
            }
            default_config
        }
    }

    pub fn log_decider_estimate(&self) -> bool {
        self.log_decider_estimate
    }

    pub fn history_initial_capacity(&self) -> usize {
        self.history_initial_capacity
    }
}

impl Default for ConfigToml {
    fn default() -> Self {
        ConfigToml {
            log_decider_estimate: default_log_decider_estimate(),
            history_initial_capacity: default_history_initial_capacity(),
        }
    }
}

fn default_log_decider_estimate() -> bool {
    true
}

fn default_history_initial_capacity() -> usize {
    16
}
