//! Configuration loading
//!
//! Settings live in `wraplint.toml` with one table per rule. Configuration
//! is resolved once at startup and treated as immutable for the rest of
//! the run. A malformed wildcard in `allow_exceptions` is not an error
//! here; the matcher compiles it to a pattern that matches nothing.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "wraplint.toml";

/// Settings shared by both rule families. `allow_test_files` only has an
/// effect on the exceptions family.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct RuleSettings {
    pub enabled: bool,
    pub allow_exceptions: Vec<String>,
    pub auto_fix: bool,
    pub allow_test_files: bool,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            allow_exceptions: Vec::new(),
            auto_fix: true,
            allow_test_files: true,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RulesConfig {
    #[serde(rename = "no-nullable-return")]
    pub no_nullable_return: RuleSettings,
    #[serde(rename = "no-exceptions")]
    pub no_exceptions: RuleSettings,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct WraplintConfig {
    pub rules: RulesConfig,
}

impl WraplintConfig {
    /// Load from an explicit path (must exist), or from `wraplint.toml` in
    /// the working directory when present, falling back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Force fixes off, e.g. when the CLI runs without `--fix`.
    pub fn without_fixes(mut self) -> Self {
        self.rules.no_nullable_return.auto_fix = false;
        self.rules.no_exceptions.auto_fix = false;
        self
    }
}
