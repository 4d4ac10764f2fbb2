//! Configuration system for the MIPS pipeline simulator.
//!
//! This module defines the configuration structures used to parameterize the
//! simulator. It provides:
//! 1. **Defaults:** Baseline machine constants (memory geometry, start PC, history depth).
//! 2. **Structures:** Hierarchical config for general, memory, and pipeline settings.
//! 3. **Loading:** JSON parsing from strings or files with validation.
//!
//! Every field is optional in JSON; omitted fields take their default, so
//! `{}` is a valid configuration equivalent to `Config::default()`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::constants::{
    DEFAULT_DATA_WORDS, DEFAULT_HISTORY_LIMIT, DEFAULT_INSTRUCTION_WORDS, DEFAULT_MAX_STEP_CYCLES,
    WORD_BYTES,
};
use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    use super::{
        DEFAULT_DATA_WORDS, DEFAULT_HISTORY_LIMIT, DEFAULT_INSTRUCTION_WORDS,
        DEFAULT_MAX_STEP_CYCLES,
    };

    /// Initial program counter.
    pub const START_PC: u32 = 0;

    /// Instruction memory size in words (4 KiB).
    pub const INSTRUCTION_WORDS: usize = DEFAULT_INSTRUCTION_WORDS;

    /// Data memory size in words (4 KiB).
    pub const DATA_WORDS: usize = DEFAULT_DATA_WORDS;

    /// Number of cycle snapshots kept in the pipeline history.
    pub const HISTORY_LIMIT: usize = DEFAULT_HISTORY_LIMIT;

    /// Most cycles one API step request may run.
    pub const MAX_STEP_CYCLES: u64 = DEFAULT_MAX_STEP_CYCLES;
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use mipsim_core::config::Config;
///
/// let config = Config::from_json(r#"{ "memory": { "data_words": 256 } }"#).unwrap();
/// assert_eq!(config.memory.data_words, 256);
/// assert_eq!(config.memory.instruction_words, 1024);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// General simulation settings.
    pub general: GeneralConfig,
    /// Instruction and data memory geometry.
    pub memory: MemoryConfig,
    /// Pipeline bookkeeping.
    pub pipeline: PipelineConfig,
}

/// General simulation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Program counter after construction, and the address the server and CLI
    /// load programs and reset to when no address is given.
    #[serde(default = "GeneralConfig::default_start_pc")]
    pub start_pc: u32,

    /// Emit a `debug` event for every stage of every cycle.
    #[serde(default)]
    pub trace_stages: bool,
}

impl GeneralConfig {
    const fn default_start_pc() -> u32 {
        defaults::START_PC
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            start_pc: defaults::START_PC,
            trace_stages: false,
        }
    }
}

/// Memory geometry. Both memories are word addressed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MemoryConfig {
    /// Instruction memory size in 32-bit words.
    #[serde(default = "MemoryConfig::default_instruction_words")]
    pub instruction_words: usize,

    /// Data memory size in 32-bit words.
    #[serde(default = "MemoryConfig::default_data_words")]
    pub data_words: usize,
}

impl MemoryConfig {
    const fn default_instruction_words() -> usize {
        defaults::INSTRUCTION_WORDS
    }

    const fn default_data_words() -> usize {
        defaults::DATA_WORDS
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            instruction_words: defaults::INSTRUCTION_WORDS,
            data_words: defaults::DATA_WORDS,
        }
    }
}

/// Pipeline bookkeeping configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Maximum number of cycle snapshots retained; the oldest are dropped first.
    #[serde(default = "PipelineConfig::default_history_limit")]
    pub history_limit: usize,

    /// Largest cycle count a single step request may ask for.
    #[serde(default = "PipelineConfig::default_max_step_cycles")]
    pub max_step_cycles: u64,
}

impl PipelineConfig {
    const fn default_history_limit() -> usize {
        defaults::HISTORY_LIMIT
    }

    const fn default_max_step_cycles() -> u64 {
        defaults::MAX_STEP_CYCLES
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            history_limit: defaults::HISTORY_LIMIT,
            max_step_cycles: defaults::MAX_STEP_CYCLES,
        }
    }
}

impl Config {
    /// Parses and validates a JSON configuration.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Checks cross-field constraints that serde cannot express.
    ///
    /// Both memories must be non-empty and addressable by a 32-bit byte
    /// address, the start PC must be a word-aligned address inside
    /// instruction memory, and the step cap must be non-zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let max_words = (u32::MAX / WORD_BYTES) as usize;
        for (name, words) in [
            ("memory.instruction_words", self.memory.instruction_words),
            ("memory.data_words", self.memory.data_words),
        ] {
            if words == 0 || words > max_words {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be between 1 and {max_words}, got {words}"
                )));
            }
        }
        let pc = self.general.start_pc;
        if pc % WORD_BYTES != 0 || (pc / WORD_BYTES) as usize >= self.memory.instruction_words {
            return Err(ConfigError::Invalid(format!(
                "general.start_pc {pc:#x} must be word-aligned and inside instruction memory"
            )));
        }
        if self.pipeline.max_step_cycles == 0 {
            return Err(ConfigError::Invalid(
                "pipeline.max_step_cycles must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}
