//! Configuration handling for the ringspan CLI
//!
//! Supports loading configuration from ringspan.toml files with CLI argument overrides.

use anyhow::{Context, Result};
use ringspan_core::{SeqPos, SequenceSpace, Topology};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CliError, CliResult};

/// Name of the configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "ringspan.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub sequence: SequenceConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default number of threads to use
    #[serde(default = "default_threads")]
    pub threads: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SequenceConfig {
    /// Sequence length used when --length is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<SeqPos>,

    #[serde(default)]
    pub topology: Topology,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON output
    #[serde(default = "default_true")]
    pub pretty: bool,
}

fn default_threads() -> usize { num_cpus::get() }
fn default_true() -> bool { true }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            threads: default_threads(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_true(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    log::info!("Loading configuration from: {}", DEFAULT_CONFIG_FILE);
                    Self::load_from_file(&default_path)?
                } else {
                    log::info!("Using default configuration");
                    Self::default()
                }
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::file_not_found(path.to_path_buf()).into());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content).map_err(CliError::from)?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    /// Generate example configuration file content
    pub fn example_toml() -> CliResult<String> {
        let mut config = Self::default();
        config.sequence.length = Some(5000);
        Ok(toml::to_string_pretty(&config)?)
    }

    /// Resolve the sequence space from command-line overrides and the config.
    pub fn sequence_space(&self, length: Option<SeqPos>, linear: bool) -> CliResult<SequenceSpace> {
        let length = length.or(self.sequence.length).ok_or_else(|| {
            CliError::config("no sequence length given; pass --length or set [sequence] length")
        })?;
        let topology = if linear { Topology::Linear } else { self.sequence.topology };
        log::debug!("Sequence space: length {} ({:?})", length, topology);
        Ok(SequenceSpace::new(length, topology)?)
    }
}
