//! Simulator configuration.
//!
//! This module defines the configuration structures that parameterize a run.
//! It provides:
//! 1. **Defaults:** Baseline constants (cache shape, trace length, workload
//!    address ranges).
//! 2. **Structures:** Cache parameters consumed by geometry derivation, and
//!    trace-generation parameters consumed by the workload generator.
//! 3. **Loading:** JSON via serde, or the plain-text `KEY: value` format
//!    (`CACHE_SIZE_KB`, `BLOCK_SIZE_BYTES`, `ASSOCIATIVITY`, ...).

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Default configuration constants for the simulator.
///
/// These values define the baseline run when a field is not explicitly
/// overridden in a configuration file.
mod defaults {
    /// Total cache size in kibibytes (32 KiB).
    pub const CACHE_SIZE_KB: usize = 32;

    /// Cache block (line) size in bytes.
    ///
    /// Matches typical modern processor cache line sizes.
    pub const BLOCK_SIZE_BYTES: usize = 64;

    /// Cache associativity (4 ways per set).
    pub const ASSOCIATIVITY: usize = 4;

    /// Number of accesses in a generated trace.
    pub const TRACE_LENGTH: usize = 5000;

    /// Base address of the sequential (spatial-locality) stream.
    pub const SPATIAL_BASE: u64 = 0x10000;

    /// Base of the small region the per-trace hot address is drawn from.
    pub const HOT_REGION_BASE: u64 = 0x1A000;

    /// Number of word-aligned slots in the hot region.
    pub const HOT_REGION_SLOTS: u64 = 20;

    /// Random accesses fall below this word count (address < limit * 4).
    pub const RANDOM_ADDRESS_LIMIT: u64 = 0xFFFF;
}

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    /// A `.json` config failed to deserialize.
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// A recognized `KEY: value` entry had a non-numeric value.
    #[error("invalid value for {key}: {value:?}")]
    BadValue {
        /// The offending key.
        key: String,
        /// The unparseable value text.
        value: String,
    },
}

/// Root configuration structure for one simulation run.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use cachesim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.cache.cache_size_kb, 32);
/// assert_eq!(config.cache.block_size_bytes, 64);
/// assert_eq!(config.trace.length, 5000);
/// ```
///
/// Deserializing from JSON (omitted fields take defaults):
///
/// ```
/// use cachesim_core::config::Config;
///
/// let json = r#"{
///     "cache": { "cache_size_kb": 1, "block_size_bytes": 64, "associativity": 2 },
///     "trace": { "length": 100, "seed": 7 }
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.cache.cache_size_kb, 1);
/// assert_eq!(config.trace.seed, Some(7));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Config {
    /// Cache shape parameters.
    #[serde(default)]
    pub cache: CacheParams,
    /// Synthetic trace generation parameters.
    #[serde(default)]
    pub trace: TraceConfig,
}

impl Config {
    /// Loads a configuration file.
    ///
    /// Files with a `.json` extension are deserialized with serde; anything
    /// else is parsed as `KEY: value` lines.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, the JSON is
    /// malformed, or a recognized key carries a non-numeric value.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        if path.extension().is_some_and(|ext| ext == "json") {
            Ok(serde_json::from_str(&text)?)
        } else {
            Self::from_key_values(&text)
        }
    }

    /// Parses the `KEY: value` config format.
    ///
    /// Recognized keys: `CACHE_SIZE_KB`, `BLOCK_SIZE_BYTES`, `ASSOCIATIVITY`,
    /// `TRACE_LENGTH`, `TRACE_SEED`. Blank lines, `#` comments, and lines
    /// without a `:` separator are skipped; unknown keys are ignored with a
    /// warning. Unspecified fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BadValue`] when a recognized key's value is not
    /// a non-negative integer.
    pub fn from_key_values(text: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let (key, value) = (key.trim(), value.trim());
            let numeric = |value: &str| {
                value.parse::<u64>().map_err(|_| ConfigError::BadValue {
                    key: key.to_string(),
                    value: value.to_string(),
                })
            };
            match key {
                "CACHE_SIZE_KB" => config.cache.cache_size_kb = numeric(value)? as usize,
                "BLOCK_SIZE_BYTES" => config.cache.block_size_bytes = numeric(value)? as usize,
                "ASSOCIATIVITY" => config.cache.associativity = numeric(value)? as usize,
                "TRACE_LENGTH" => config.trace.length = numeric(value)? as usize,
                "TRACE_SEED" => config.trace.seed = Some(numeric(value)?),
                _ => tracing::warn!(key, "ignoring unknown config key"),
            }
        }
        Ok(config)
    }
}

/// Cache shape parameters consumed by geometry derivation.
///
/// Cache size is expressed in kibibytes in configuration files; use
/// [`CacheParams::cache_size_bytes`] when deriving geometry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheParams {
    /// Total cache size in kibibytes.
    #[serde(default = "CacheParams::default_cache_size_kb")]
    pub cache_size_kb: usize,

    /// Block (line) size in bytes; must be a power of two.
    #[serde(default = "CacheParams::default_block_size_bytes")]
    pub block_size_bytes: usize,

    /// Ways per set.
    #[serde(default = "CacheParams::default_associativity")]
    pub associativity: usize,
}

impl CacheParams {
    /// Returns the default cache size in kibibytes.
    fn default_cache_size_kb() -> usize {
        defaults::CACHE_SIZE_KB
    }

    /// Returns the default block size in bytes.
    fn default_block_size_bytes() -> usize {
        defaults::BLOCK_SIZE_BYTES
    }

    /// Returns the default associativity.
    fn default_associativity() -> usize {
        defaults::ASSOCIATIVITY
    }

    /// Total cache size in bytes.
    pub fn cache_size_bytes(&self) -> usize {
        self.cache_size_kb * 1024
    }
}

impl Default for CacheParams {
    fn default() -> Self {
        Self {
            cache_size_kb: defaults::CACHE_SIZE_KB,
            block_size_bytes: defaults::BLOCK_SIZE_BYTES,
            associativity: defaults::ASSOCIATIVITY,
        }
    }
}

/// Parameters for the synthetic trace generator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TraceConfig {
    /// Number of accesses to generate.
    #[serde(default = "TraceConfig::default_length")]
    pub length: usize,

    /// RNG seed; when unset, each run seeds from wall-clock time.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Base address of the sequential read stream.
    #[serde(default = "TraceConfig::default_base_address")]
    pub base_address: u64,

    /// Base of the region the per-trace hot address is drawn from.
    #[serde(default = "TraceConfig::default_hot_region_base")]
    pub hot_region_base: u64,

    /// Word-aligned slots in the hot region.
    #[serde(default = "TraceConfig::default_hot_region_slots")]
    pub hot_region_slots: u64,

    /// Word count bounding random accesses (address < limit * 4).
    #[serde(default = "TraceConfig::default_random_address_limit")]
    pub random_address_limit: u64,
}

impl TraceConfig {
    /// Returns the default trace length.
    fn default_length() -> usize {
        defaults::TRACE_LENGTH
    }

    /// Returns the default sequential stream base address.
    fn default_base_address() -> u64 {
        defaults::SPATIAL_BASE
    }

    /// Returns the default hot region base address.
    fn default_hot_region_base() -> u64 {
        defaults::HOT_REGION_BASE
    }

    /// Returns the default hot region slot count.
    fn default_hot_region_slots() -> u64 {
        defaults::HOT_REGION_SLOTS
    }

    /// Returns the default random address limit in words.
    fn default_random_address_limit() -> u64 {
        defaults::RANDOM_ADDRESS_LIMIT
    }
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            length: defaults::TRACE_LENGTH,
            seed: None,
            base_address: defaults::SPATIAL_BASE,
            hot_region_base: defaults::HOT_REGION_BASE,
            hot_region_slots: defaults::HOT_REGION_SLOTS,
            random_address_limit: defaults::RANDOM_ADDRESS_LIMIT,
        }
    }
}
