//! Configuration Management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default resampling count shared by every family.
pub const DEFAULT_RESAMPLE_COUNT: usize = 64;

/// Shared recognizer configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RecognizerConfig {
    /// Resampling settings
    #[serde(default)]
    pub resample: ResampleConfig,
    /// Geometric template matcher settings
    #[serde(default)]
    pub template: TemplateConfig,
    /// Shape-distance matcher settings
    #[serde(default)]
    pub shape: ShapeConfig,
}

/// Resampling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResampleConfig {
    /// Points (or tangent vectors + 1) every gesture is resampled to
    pub count: usize,
}

/// Geometric template matcher configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Restore each gesture's drawn orientation after scaling, keeping the
    /// multistroke matcher sensitive to gross rotation
    pub bounded_rotation_invariance: bool,
}

/// Shape-distance matcher configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeConfig {
    /// Distances above this bound never match; also seeds the early-exit
    /// pruning
    pub acceptance_threshold: f64,
    /// Skip the reverse traversal of references, making matching sensitive
    /// to drawing direction
    pub orientation_sensitive: bool,
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_RESAMPLE_COUNT,
        }
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            bounded_rotation_invariance: false,
        }
    }
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            acceptance_threshold: f64::INFINITY,
            orientation_sensitive: false,
        }
    }
}

impl RecognizerConfig {
    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if !(8..=1024).contains(&self.resample.count) {
            return Err(crate::Error::Config(format!(
                "resample count must be in [8, 1024], got {}",
                self.resample.count
            )));
        }
        if !(self.shape.acceptance_threshold > 0.0) {
            return Err(crate::Error::Config(format!(
                "shape acceptance_threshold must be positive, got {}",
                self.shape.acceptance_threshold
            )));
        }
        Ok(())
    }

    /// Load config from file
    pub fn load(path: &PathBuf) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from default location
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &PathBuf) -> Result<(), crate::Error> {
        let content = toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;

        // Create parent directories
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".strokekit").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = RecognizerConfig::default();
        assert_eq!(config.resample.count, DEFAULT_RESAMPLE_COUNT);
        assert!(!config.template.bounded_rotation_invariance);
        assert!(config.shape.acceptance_threshold.is_infinite());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = RecognizerConfig::default();
        let toml_str = config.to_toml().unwrap();
        assert!(toml_str.contains("[resample]"));
        assert!(toml_str.contains("[template]"));
        assert!(toml_str.contains("[shape]"));
    }

    #[test]
    fn test_config_roundtrip_serialization() {
        let mut original = RecognizerConfig::default();
        original.resample.count = 96;
        original.shape.acceptance_threshold = 12.5;
        let toml_str = original.to_toml().unwrap();
        let deserialized: RecognizerConfig = toml::from_str(&toml_str).expect("Failed to deserialize");
        assert_eq!(deserialized.resample.count, 96);
        assert_eq!(deserialized.shape.acceptance_threshold, 12.5);
    }

    #[test]
    fn test_infinite_threshold_roundtrips() {
        let config = RecognizerConfig::default();
        let toml_str = config.to_toml().unwrap();
        let deserialized: RecognizerConfig = toml::from_str(&toml_str).expect("Failed to deserialize");
        assert!(deserialized.shape.acceptance_threshold.is_infinite());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("test_config.toml");

        let mut original = RecognizerConfig::default();
        original.resample.count = 32;
        original.template.bounded_rotation_invariance = true;

        original.save(&config_path).expect("Failed to save config");
        assert!(config_path.exists());

        let loaded = RecognizerConfig::load(&config_path).expect("Failed to load config");
        assert_eq!(loaded.resample.count, 32);
        assert!(loaded.template.bounded_rotation_invariance);
    }

    #[test]
    fn test_config_save_creates_parent_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let nested_path = temp_dir.path().join("nested").join("path").join("config.toml");

        let config = RecognizerConfig::default();
        config.save(&nested_path).expect("Failed to save config");
        assert!(nested_path.exists());
    }

    #[test]
    fn test_load_nonexistent_file() {
        let nonexistent_path = PathBuf::from("/tmp/nonexistent_strokekit_config_12345.toml");
        let result = RecognizerConfig::load(&nonexistent_path);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_count_out_of_range() {
        let mut config = RecognizerConfig::default();
        config.resample.count = 4;
        assert!(config.validate().is_err());
        config.resample.count = 2048;
        assert!(config.validate().is_err());
        config.resample.count = 8;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_threshold() {
        let mut config = RecognizerConfig::default();
        config.shape.acceptance_threshold = 0.0;
        assert!(config.validate().is_err());
        config.shape.acceptance_threshold = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        // a config file naming only one section fills the rest in
        let partial = "[resample]\ncount = 16\n";
        let config: RecognizerConfig = toml::from_str(partial).expect("partial config");
        assert_eq!(config.resample.count, 16);
        assert!(config.shape.acceptance_threshold.is_infinite());
    }

    #[test]
    fn test_load_invalid_values() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("bad_config.toml");
        std::fs::write(&config_path, "[resample]\ncount = 2\n").expect("Failed to write config");
        let result = RecognizerConfig::load(&config_path);
        assert!(result.is_err());
    }
}
