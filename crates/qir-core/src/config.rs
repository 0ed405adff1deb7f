//! Configuration types and parsing for qir.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest indent accepted for tree dumps
const MAX_DUMP_INDENT: usize = 16;

/// Top-level configuration from qir.yml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Options for textual tree dumps
    #[serde(default)]
    pub dump: DumpConfig,
}

/// Controls how node trees are rendered for diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DumpConfig {
    /// Spaces per nesting level
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Append attached result types to each line
    #[serde(default = "default_show_types")]
    pub show_types: bool,

    /// Stop descending below this depth (root is depth 0)
    #[serde(default)]
    pub max_depth: Option<usize>,
}

fn default_indent() -> usize {
    2
}

fn default_show_types() -> bool {
    true
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            show_types: default_show_types(),
            max_depth: None,
        }
    }
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config = Self::from_yaml_str(&content)?;
        log::debug!("Loaded qir config from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a directory, looking for qir.yml or qir.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("qir.yml");
        let yaml_path = dir.join("qir.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Err(CoreError::ConfigNotFound {
                path: yml_path.display().to_string(),
            })
        }
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml_str(content: &str) -> CoreResult<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.dump.indent > MAX_DUMP_INDENT {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "dump.indent must be at most {MAX_DUMP_INDENT}, got {}",
                    self.dump.indent
                ),
            });
        }
        if self.dump.indent == 0 {
            log::warn!("dump.indent is 0; nested nodes will not be visually indented");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
