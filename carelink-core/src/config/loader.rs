//! Configuration loading and management

use super::schema::Config;
use super::validate::validate_config;
use crate::utils::ensure_dir;
use crate::Error;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.json";
const ENV_PREFIX: &str = "CARELINK__";

/// Short environment names mapped onto config paths
const ALIASES: &[(&str, &str)] = &[("CARELINK_API_URL", "api.base_url")];

/// Configuration loader
pub struct ConfigLoader {
    config_dir: PathBuf,
}

impl ConfigLoader {
    /// Create a new config loader with the default config directory
    pub fn new() -> Self {
        let config_dir = dirs::home_dir()
            .map(|h| h.join(".carelink"))
            .unwrap_or_else(|| PathBuf::from(".carelink"));

        Self { config_dir }
    }

    /// Create a new config loader with a custom config directory
    pub fn with_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            config_dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Load configuration from file and environment
    ///
    /// Precedence, lowest first: built-in defaults, `config.json`,
    /// `CARELINK_API_URL`, then `CARELINK__SECTION__FIELD` path overrides.
    pub fn load(&self) -> crate::Result<Config> {
        self.load_with_env(std::env::vars())
    }

    /// Load configuration with an explicit set of environment variables
    pub fn load_with_env<I>(&self, vars: I) -> crate::Result<Config>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut tree = serde_json::to_value(Config::default())?;

        let config_path = self.config_path();
        if config_path.is_file() {
            let content = std::fs::read_to_string(&config_path)?;
            let from_file: Value = serde_json::from_str(&content).map_err(|e| {
                Error::Config(format!("{}: {}", config_path.display(), e))
            })?;
            overlay(&mut tree, from_file);
        }

        for (path, value) in env_overrides(vars) {
            assign(&mut tree, &path, value);
        }

        let config: Config = serde_json::from_value(tree)?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, config: &Config) -> crate::Result<()> {
        ensure_dir(&self.config_dir)?;
        let content = serde_json::to_string_pretty(config)?;
        std::fs::write(self.config_path(), content)?;
        Ok(())
    }

    /// Get the config directory path
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Path of `config.json` inside the config directory
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Recursively lay `top` over `base`; objects merge, anything else replaces
fn overlay(base: &mut Value, top: Value) {
    match (base, top) {
        (Value::Object(base_map), Value::Object(top_map)) => {
            for (key, value) in top_map {
                overlay(base_map.entry(key).or_insert(Value::Null), value);
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Collect overrides from environment variables, aliases first
fn env_overrides<I>(vars: I) -> Vec<(Vec<String>, Value)>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut aliases = Vec::new();
    let mut paths = Vec::new();

    for (key, raw) in vars {
        if let Some(&(_, target)) = ALIASES.iter().find(|(alias, _)| *alias == key) {
            let path = target.split('.').map(str::to_string).collect();
            aliases.push((path, Value::String(raw)));
        } else if let Some(suffix) = key.strip_prefix(ENV_PREFIX) {
            let path: Vec<String> = suffix
                .split("__")
                .filter(|s| !s.is_empty())
                .map(str::to_ascii_lowercase)
                .collect();
            if !path.is_empty() {
                paths.push((path, env_value(&raw)));
            }
        }
    }

    // Deterministic order when two path variables overlap
    paths.sort_by(|a, b| a.0.cmp(&b.0));
    aliases.extend(paths);
    aliases
}

/// Interpret an environment value as JSON when it parses, else as a string
fn env_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Set `path` inside `root`, replacing non-objects on the way
fn assign(root: &mut Value, path: &[String], value: Value) {
    let mut node = root;
    for segment in path {
        if !node.is_object() {
            *node = Value::Object(Map::new());
        }
        let Value::Object(map) = node else {
            return;
        };
        node = map.entry(segment.clone()).or_insert(Value::Null);
    }
    *node = value;
}
