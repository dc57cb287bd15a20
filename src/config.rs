//! Demo harness configuration.
//!
//! File-backed settings for the demonstration binary. The library surface
//! itself takes plain configuration structs; the TOML layer exists so the
//! harness can be tuned without recompiling.

use crate::accumulator::{AccumulatorConfig, DEFAULT_MIN_ITERATIONS};
use crate::conditioning::HashAlgorithm;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Entropy accumulation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntropyConfig {
    /// Accumulation steps required before a digest may be extracted.
    pub min_iterations: u32,
    /// Conditioning hash algorithm.
    pub algorithm: HashAlgorithm,
}

impl Default for EntropyConfig {
    fn default() -> Self {
        Self {
            min_iterations: DEFAULT_MIN_ITERATIONS,
            algorithm: HashAlgorithm::default(),
        }
    }
}

impl EntropyConfig {
    /// Converts the section into the accumulator's configuration struct.
    pub fn accumulator_config(&self) -> AccumulatorConfig {
        AccumulatorConfig {
            min_iterations: self.min_iterations,
            algorithm: self.algorithm,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Bytes to generate per batch.
    pub bytes: usize,
    /// Run continuously (true) or emit a single batch (false).
    pub continuous: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            bytes: 32,
            continuous: false,
        }
    }
}

impl OutputConfig {
    /// Validates the output parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bytes == 0 {
            return Err(ConfigError::InvalidOutputLength);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("output byte count must be non-zero")]
    InvalidOutputLength,
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub entropy: EntropyConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        let config: FileConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.output.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = FileConfig::default();
        assert!(config.output.validate().is_ok());
        assert_eq!(config.entropy.min_iterations, DEFAULT_MIN_ITERATIONS);
    }

    #[test]
    fn test_zero_output_bytes_invalid() {
        let mut config = OutputConfig::default();
        config.bytes = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidOutputLength)
        ));
    }

    #[test]
    fn test_parse_full_file() {
        let config: FileConfig = toml::from_str(
            r#"
            [entropy]
            min_iterations = 64
            algorithm = "blake3"

            [output]
            bytes = 100
            continuous = true
            "#,
        )
        .unwrap();

        assert_eq!(config.entropy.min_iterations, 64);
        assert_eq!(config.entropy.algorithm, HashAlgorithm::Blake3);
        assert_eq!(config.output.bytes, 100);
        assert!(config.output.continuous);
    }

    #[test]
    fn test_config_survives_toml_round_trip() {
        let config = FileConfig {
            entropy: EntropyConfig {
                min_iterations: 96,
                algorithm: HashAlgorithm::Blake3,
            },
            output: OutputConfig {
                bytes: 48,
                continuous: true,
            },
        };

        let text = toml::to_string(&config).unwrap();
        let parsed: FileConfig = toml::from_str(&text).unwrap();

        assert_eq!(parsed.entropy.min_iterations, 96);
        assert_eq!(parsed.entropy.algorithm, HashAlgorithm::Blake3);
        assert_eq!(parsed.output.bytes, 48);
        assert!(parsed.output.continuous);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.entropy.min_iterations, DEFAULT_MIN_ITERATIONS);
        assert_eq!(config.output.bytes, 32);
    }
}
