//! Pipeline configuration.
//!
//! The contract surface of the normalization pipeline — dimension clamps,
//! byte budget, and the search ladders — expressed as a flat, validated
//! config. All fields have defaults matching the upload contract; a TOML
//! file need only override the values it cares about.
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! min_dimension = 1200        # Floor for upscaling (longest edge)
//! max_dimension = 2400        # Ceiling for downscaling (longest edge)
//! byte_budget = 4718592       # Max transport-encoded payload (4.5 MiB)
//!
//! scale_ladder = [1.0, 0.95, 0.90, 0.85, 0.75]
//! quality_ladder = [95, 90, 85, 80, 70, 60]
//!
//! fallback_scale = 0.6        # Forced-fit encode, applied to planned dims
//! fallback_quality = 50
//!
//! auto_portrait = true        # Stand landscape frames upright
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Normalization pipeline settings.
///
/// Defaults encode the upload contract: 4.5 MiB of transport-encoded payload
/// under a hard 5 MiB upstream limit, and a 1200–2400 logical-pixel band for
/// the longest edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Floor for upscaling: the longest edge is brought up to at least this.
    pub min_dimension: u32,
    /// Ceiling for downscaling: the longest edge is brought down to at most this.
    pub max_dimension: u32,
    /// Maximum transport-encoded (base64) payload size in bytes.
    pub byte_budget: usize,
    /// Descending resize factors probed by the encode search (outer loop).
    pub scale_ladder: Vec<f64>,
    /// Descending JPEG qualities probed by the encode search (inner loop).
    pub quality_ladder: Vec<u8>,
    /// Scale of the forced-fit fallback encode, relative to planned dims.
    pub fallback_scale: f64,
    /// Quality of the forced-fit fallback encode.
    pub fallback_quality: u8,
    /// Rotate landscape frames upright when no manual rotation is given.
    /// Domain heuristic: collectibles are taller than wide.
    pub auto_portrait: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_dimension: 1200,
            max_dimension: 2400,
            byte_budget: 4_718_592, // 4.5 MiB
            scale_ladder: vec![1.0, 0.95, 0.90, 0.85, 0.75],
            quality_ladder: vec![95, 90, 85, 80, 70, 60],
            fallback_scale: 0.6,
            fallback_quality: 50,
            auto_portrait: true,
        }
    }
}

impl PipelineConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_dimension == 0 || self.min_dimension >= self.max_dimension {
            return Err(ConfigError::Validation(
                "min_dimension must be non-zero and below max_dimension".into(),
            ));
        }
        if self.byte_budget == 0 {
            return Err(ConfigError::Validation("byte_budget must be non-zero".into()));
        }
        if self.scale_ladder.is_empty() || self.quality_ladder.is_empty() {
            return Err(ConfigError::Validation(
                "scale_ladder and quality_ladder must not be empty".into(),
            ));
        }
        if !self
            .scale_ladder
            .iter()
            .chain(std::iter::once(&self.fallback_scale))
            .all(|&s| s > 0.0 && s <= 1.0)
        {
            return Err(ConfigError::Validation(
                "scale factors must be in (0, 1.0]".into(),
            ));
        }
        if !descending(&self.scale_ladder) {
            return Err(ConfigError::Validation(
                "scale_ladder must be in descending order".into(),
            ));
        }
        if !self
            .quality_ladder
            .iter()
            .chain(std::iter::once(&self.fallback_quality))
            .all(|&q| (1..=100).contains(&q))
        {
            return Err(ConfigError::Validation("qualities must be 1-100".into()));
        }
        if !descending(&self.quality_ladder) {
            return Err(ConfigError::Validation(
                "quality_ladder must be in descending order".into(),
            ));
        }
        Ok(())
    }
}

fn descending<T: PartialOrd>(values: &[T]) -> bool {
    values.windows(2).all(|w| w[0] > w[1])
}

/// Print a stock config.toml with all options documented.
pub fn stock_config_toml() -> String {
    concat!(
        "# gradeshot pipeline configuration\n",
        "# All options are optional - defaults shown below\n",
        "\n",
        "# Longest-edge clamps (logical pixels). Upscaling to the floor is\n",
        "# unconditional: downstream analysis needs legible fine detail.\n",
        "min_dimension = 1200\n",
        "max_dimension = 2400\n",
        "\n",
        "# Maximum transport-encoded payload size in bytes.\n",
        "# 4.5 MiB, a safety margin under the hard 5 MiB upstream limit.\n",
        "byte_budget = 4718592\n",
        "\n",
        "# Search ladders, probed in order: largest scale first, and within\n",
        "# each scale the highest quality first. First fit wins.\n",
        "scale_ladder = [1.0, 0.95, 0.90, 0.85, 0.75]\n",
        "quality_ladder = [95, 90, 85, 80, 70, 60]\n",
        "\n",
        "# Forced-fit encode used when the whole grid misses the budget.\n",
        "# Returned regardless of its size.\n",
        "fallback_scale = 0.6\n",
        "fallback_quality = 50\n",
        "\n",
        "# Rotate landscape frames upright when no manual rotation is given.\n",
        "auto_portrait = true\n",
    )
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_upload_contract() {
        let config = PipelineConfig::default();
        assert_eq!(config.min_dimension, 1200);
        assert_eq!(config.max_dimension, 2400);
        assert_eq!(config.byte_budget, 4_718_592);
        assert_eq!(config.scale_ladder, vec![1.0, 0.95, 0.90, 0.85, 0.75]);
        assert_eq!(config.quality_ladder, vec![95, 90, 85, 80, 70, 60]);
        assert!(config.auto_portrait);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let config: PipelineConfig = toml::from_str("byte_budget = 1048576").unwrap();
        assert_eq!(config.byte_budget, 1_048_576);
        assert_eq!(config.min_dimension, 1200);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<PipelineConfig, _> = toml::from_str("bite_budget = 1");
        assert!(result.is_err());
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: PipelineConfig = toml::from_str(&stock_config_toml()).unwrap();
        assert_eq!(config.byte_budget, PipelineConfig::default().byte_budget);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_inverted_dimension_band() {
        let config = PipelineConfig {
            min_dimension: 2400,
            max_dimension: 1200,
            ..PipelineConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn rejects_empty_ladders() {
        let config = PipelineConfig {
            quality_ladder: vec![],
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_unordered_ladder() {
        let config = PipelineConfig {
            scale_ladder: vec![0.9, 1.0],
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_scale() {
        let config = PipelineConfig {
            scale_ladder: vec![1.5, 1.0],
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_quality() {
        let config = PipelineConfig {
            fallback_quality: 0,
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_reads_and_validates_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "min_dimension = 800\nmax_dimension = 1600\n").unwrap();
        let config = PipelineConfig::load(&path).unwrap();
        assert_eq!(config.min_dimension, 800);
        assert_eq!(config.max_dimension, 1600);

        std::fs::write(&path, "min_dimension = 0\n").unwrap();
        assert!(PipelineConfig::load(&path).is_err());
    }
}
