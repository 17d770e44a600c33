// SPDX-License-Identifier: MIT

//! Configuration loading
//!
//! M0 carries a single flag, `debug`, read from the `DEBUG` environment
//! variable. A `.env` file in the working directory is honored when present.

use serde::Serialize;
use serde_json::{Map, Value};
use std::env;
use std::io;
use std::path::{Path, PathBuf};

/// Runtime configuration for the NL2SQL system
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Config {
    /// Verbose logging; true only when `DEBUG` is "true" in any casing
    pub debug: bool,
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let debug = parse_flag(lookup("DEBUG").as_deref());
        Self { debug }
    }

    /// Look up a configuration value by name
    pub fn get(&self, key: &str) -> Option<Value> {
        self.to_dict().remove(key)
    }

    /// Look up a configuration value, falling back to `default` for unknown keys
    pub fn get_or(&self, key: &str, default: Value) -> Value {
        self.get(key).unwrap_or(default)
    }

    /// All configuration values as a JSON object
    pub fn to_dict(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

/// Load configuration, reading `.env` first if one exists
pub fn load_config() -> Config {
    apply_env_file(dotenv::dotenv());
    Config::from_env()
}

/// Load configuration, reading variables from `env_file` if it exists
pub fn load_config_from<P: AsRef<Path>>(env_file: P) -> Config {
    let path = env_file.as_ref();
    apply_env_file(dotenv::from_path(path).map(|_| path.to_path_buf()));
    Config::from_env()
}

/// Report the outcome of reading an env file; true when it was loaded
///
/// A missing file is silent, anything else unreadable is logged and skipped.
fn apply_env_file(result: dotenv::Result<PathBuf>) -> bool {
    match result {
        Ok(path) => {
            log::debug!("Loaded environment from {}", path.display());
            true
        }
        Err(dotenv::Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => {
            log::warn!("Ignoring unreadable .env file: {}", e);
            false
        }
    }
}

fn parse_flag(value: Option<&str>) -> bool {
    value.unwrap_or("false").eq_ignore_ascii_case("true")
}
