//! Generator configuration.
//!
//! Handles parsing and management of karel.toml configuration files and the
//! up-front validation of dataset parameters. Validation failures abort
//! before any generation work begins.

use crate::dataset::GenParams;
use crate::dsl::GrammarVariant;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("split `{split}` size {data_num} is not divisible by num_examples {num_examples}")]
    IndivisibleSplit {
        split: &'static str,
        data_num: usize,
        num_examples: usize,
    },

    #[error("num_examples must be positive")]
    ZeroGroupSize,

    #[error("no_change_fraction {0} is outside [0, 1]")]
    FractionOutOfRange(f64),

    #[error("world shape {0}x{1} is degenerate")]
    DegenerateWorld(usize, usize),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Root configuration structure matching karel.toml.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KarelConfig {
    /// Split sizes and sampling knobs
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// World shape and execution budget
    #[serde(default)]
    pub world: WorldConfig,

    /// Surface grammar and program shape
    #[serde(default)]
    pub grammar: GrammarConfig,
}

impl KarelConfig {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: KarelConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Find and load configuration by searching up from the given directory.
    pub fn find_and_load(start_dir: &Path) -> ConfigResult<Self> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let config_path = dir.join("karel.toml");
            if config_path.exists() {
                return Self::load(&config_path);
            }
            if !dir.pop() {
                // Reached root without finding config
                return Ok(Self::default());
            }
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// The three dataset splits with their configured sizes.
    pub fn splits(&self) -> [(&'static str, usize); 3] {
        [
            ("train", self.dataset.num_train),
            ("test", self.dataset.num_test),
            ("val", self.dataset.num_val),
        ]
    }

    /// Reject invalid parameter combinations before any generation.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.dataset.num_examples == 0 {
            return Err(ConfigError::ZeroGroupSize);
        }
        if !(0.0..=1.0).contains(&self.dataset.no_change_fraction) {
            return Err(ConfigError::FractionOutOfRange(
                self.dataset.no_change_fraction,
            ));
        }
        if self.world.width == 0 || self.world.height == 0 {
            return Err(ConfigError::DegenerateWorld(
                self.world.width,
                self.world.height,
            ));
        }
        for (split, data_num) in self.splits() {
            if data_num % self.dataset.num_examples != 0 {
                return Err(ConfigError::IndivisibleSplit {
                    split,
                    data_num,
                    num_examples: self.dataset.num_examples,
                });
            }
        }
        Ok(())
    }

    /// Bridge to the sampling engine's parameter block.
    pub fn params(&self) -> GenParams {
        GenParams {
            num_examples: self.dataset.num_examples,
            no_change_fraction: self.dataset.no_change_fraction,
            cutoff: self.dataset.cutoff,
            max_batch_attempts: self.dataset.max_batch_attempts,
            max_depth: self.grammar.max_depth,
            width: self.world.width,
            height: self.world.height,
        }
    }
}

/// Split sizes and sampling knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub num_train: usize,
    pub num_test: usize,
    pub num_val: usize,
    /// Pairs per generated program.
    pub num_examples: usize,
    /// Target fraction of pairs per batch with `input == output`.
    pub no_change_fraction: f64,
    /// World-initialization attempts per pair.
    pub cutoff: usize,
    /// Candidate programs per batch before a fatal error.
    pub max_batch_attempts: usize,
    pub data_dir: String,
    pub seed: u64,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            num_train: 1_000_000,
            num_test: 5_000,
            num_val: 5_000,
            num_examples: 10,
            no_change_fraction: 0.2,
            cutoff: 10_000,
            max_batch_attempts: 1_000,
            data_dir: "data".to_string(),
            seed: 42,
        }
    }
}

/// World shape and execution budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: usize,
    pub height: usize,
    /// Interpreter statement budget per execution.
    pub max_steps: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
            max_steps: 10_000,
        }
    }
}

/// Surface grammar and program shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarConfig {
    pub variant: GrammarVariant,
    /// Statement nesting bound for random programs.
    pub max_depth: usize,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            variant: GrammarVariant::Curly,
            max_depth: 5,
        }
    }
}
