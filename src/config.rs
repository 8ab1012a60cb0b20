use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::dictionary::builtin::builtin;
use crate::dictionary::{Dictionary, DictionaryEntry};
use crate::models::RiskLevel;
use crate::tagger::MatchPolicy;

/// Root configuration structure, deserialized from `.ingredient-checkr/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Classification and alerting policy.
    #[serde(default)]
    pub policy: PolicyConfig,
    /// Risk terms. When absent the built-in dictionary is used.
    #[serde(default)]
    pub dictionary: Option<DictionaryConfig>,
}

#[derive(Debug, Deserialize)]
pub struct PolicyConfig {
    /// Products whose overall level reaches this make the CLI exit with code 1.
    /// Defaults to `high`.
    #[serde(default = "default_fail_on")]
    pub fail_on: RiskLevel,
    /// Emit an `unknown` finding for every unmatched ingredient.
    #[serde(default)]
    pub include_unmatched: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig {
            fail_on: default_fail_on(),
            include_unmatched: false,
        }
    }
}

fn default_fail_on() -> RiskLevel {
    RiskLevel::High
}

impl PolicyConfig {
    pub fn match_policy(&self) -> MatchPolicy {
        if self.include_unmatched {
            MatchPolicy::EveryItem
        } else {
            MatchPolicy::MatchedOnly
        }
    }

    /// Whether a product with `level` should fail the run. `unknown` never does.
    pub fn fails(&self, level: RiskLevel) -> bool {
        level != RiskLevel::Unknown && level >= self.fail_on
    }
}

#[derive(Debug, Deserialize)]
pub struct DictionaryConfig {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub terms: Vec<DictionaryEntry>,
}

impl Config {
    /// Build the validated dictionary snapshot described by this config.
    pub fn dictionary(&self) -> crate::error::Result<Dictionary> {
        match &self.dictionary {
            Some(dc) => Dictionary::from_entries(dc.version.clone(), dc.terms.iter().cloned()),
            None => Ok(builtin()),
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override`: path passed via `--config`
/// 2. `<project_path>/.ingredient-checkr/config.toml`
/// 3. `~/.config/ingredient-checkr/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(".ingredient-checkr").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("ingredient-checkr")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))
}
