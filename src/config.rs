use crate::error::{Result, TraceModelError};
use crate::evolution::{EnumEvolution, EnumRegistry, Slot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "tracemodel.toml";

/// File name looked up in the user configuration directory
pub const USER_CONFIG_FILE: &str = ".tracemodel.toml";

/// Represents the complete configuration for trace-model.
///
/// Declares the version-evolving enumerations used to decode trace-log values.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub enums: BTreeMap<String, EnumConfig>,
}

/// Slot lists of one enumeration, per version range.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct EnumConfig {
    /// Slot list used when no range matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Vec<SlotConfig>>,

    /// Ranges in priority order; the first matching range wins
    #[serde(default)]
    pub evolution: Vec<RangeConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RangeConfig {
    pub range: String,
    pub slots: Vec<SlotConfig>,
}

/// A slot is either a bare stable value or a table with display name and aliases.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum SlotConfig {
    Bare(i64),
    Named {
        value: i64,
        name: String,
        #[serde(default)]
        aliases: Vec<String>,
    },
}

impl SlotConfig {
    fn named(value: i64, name: &str, aliases: &[&str]) -> Self {
        SlotConfig::Named {
            value,
            name: name.to_string(),
            aliases: aliases.iter().map(|alias| alias.to_string()).collect(),
        }
    }

    fn to_slot(&self) -> Slot<i64> {
        match self {
            SlotConfig::Bare(value) => Slot::Bare(*value),
            SlotConfig::Named {
                value,
                name,
                aliases,
            } => Slot::named(*value, name.clone(), aliases.iter().cloned()),
        }
    }
}

impl EnumConfig {
    /// Build the enumeration described by this entry
    ///
    /// # Errors
    /// `Config` if the entry declares no slot lists at all, `InvalidArgument`
    /// if a range cannot be parsed
    pub fn build(&self, name: &str) -> Result<EnumEvolution<i64>> {
        if self.evolution.is_empty() && self.default.is_none() {
            return Err(TraceModelError::config(format!(
                "Enumeration '{}' declares no slot lists",
                name
            )));
        }

        let entries = self.evolution.iter().map(|range| {
            (
                range.range.as_str(),
                range.slots.iter().map(SlotConfig::to_slot).collect::<Vec<_>>(),
            )
        });

        let evolution = EnumEvolution::new(name, entries)?;
        Ok(match &self.default {
            Some(slots) => evolution.with_default(slots.iter().map(SlotConfig::to_slot).collect()),
            None => evolution,
        })
    }
}

/// Returns the built-in deoptimization kind evolution.
fn default_deoptimize_kind() -> EnumConfig {
    let eager = SlotConfig::named(0, "Eager", &["eager"]);
    let soft = SlotConfig::named(1, "Soft", &["soft"]);
    let lazy = SlotConfig::named(2, "Lazy", &["lazy"]);

    EnumConfig {
        default: None,
        evolution: vec![
            RangeConfig {
                range: "<10.0.0".to_string(),
                slots: vec![eager.clone(), soft, lazy.clone()],
            },
            RangeConfig {
                range: ">=10.0.0".to_string(),
                slots: vec![eager, lazy],
            },
        ],
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut enums = BTreeMap::new();
        enums.insert("DeoptimizeKind".to_string(), default_deoptimize_kind());

        Config { enums }
    }
}

impl Config {
    /// Parse a configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Build every declared enumeration
    pub fn build_registry(&self) -> Result<EnumRegistry> {
        let mut registry = EnumRegistry::new();
        for (name, entry) in &self.enums {
            registry.insert(entry.build(name)?);
        }
        tracing::debug!(enums = registry.len(), "built enumeration registry");
        Ok(registry)
    }
}

/// Finds the configuration file to load, if any.
///
/// Lookup order: explicit path, `tracemodel.toml` in the current directory,
/// then `.tracemodel.toml` in the user configuration directory.
pub fn locate_config(config_path: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = config_path {
        return Some(PathBuf::from(path));
    }

    let local = Path::new(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local.to_path_buf());
    }

    dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_FILE))
        .filter(|path| path.exists())
}

/// Loads configuration from file or returns defaults.
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    match locate_config(config_path) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading configuration");
            let text = fs::read_to_string(&path)?;
            Config::from_toml(&text)
        }
        None => {
            tracing::debug!("no configuration file found, using defaults");
            Ok(Config::default())
        }
    }
}
