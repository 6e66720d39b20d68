//! Writer configuration.
//!
//! Constants the slide writer would otherwise hard-code. Every field has a
//! default, so a YAML document only needs the keys it overrides:
//!
//! ```rust
//! use litchi_slides::ooxml::pptx::WriterConfig;
//!
//! let config = WriterConfig::from_yaml_str("media_volume: 50000\n").unwrap();
//! assert_eq!(config.media_volume, 50000);
//! assert_eq!(config.media_duration_ms, 25032);
//! ```

use serde::{Deserialize, Serialize};

use crate::common::unit::DEFAULT_DPI;
use crate::ooxml::error::{OoxmlError, Result};

/// Full media volume is 100000.
const MAX_MEDIA_VOLUME: u32 = 100_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Volume of `p:cMediaNode` in thousandths of a percent
    pub media_volume: u32,
    /// Duration of the `playFrom(0.0)` command node in milliseconds
    pub media_duration_ms: u32,
    /// Resolution used to convert pixel geometry to EMU
    pub dpi: u32,
    /// Layout number for slides that do not name one
    pub default_layout: u32,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            media_volume: 80_000,
            media_duration_ms: 25_032,
            dpi: DEFAULT_DPI,
            default_layout: 1,
        }
    }
}

impl WriterConfig {
    /// Parse and validate a YAML configuration.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: WriterConfig = serde_saphyr::from_str(yaml)
            .map_err(|e| OoxmlError::Config(format!("Failed to parse writer config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        serde_saphyr::to_string(self)
            .map_err(|e| OoxmlError::Config(format!("Failed to serialize writer config: {}", e)))
    }

    pub fn validate(&self) -> Result<()> {
        if self.dpi == 0 {
            return Err(OoxmlError::Config("dpi must be positive".to_string()));
        }
        if self.default_layout == 0 {
            return Err(OoxmlError::Config(
                "default_layout is 1-based and must be at least 1".to_string(),
            ));
        }
        if self.media_volume > MAX_MEDIA_VOLUME {
            return Err(OoxmlError::Config(format!(
                "media_volume {} exceeds {}",
                self.media_volume, MAX_MEDIA_VOLUME
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WriterConfig::default();
        assert_eq!(config.media_volume, 80_000);
        assert_eq!(config.media_duration_ms, 25_032);
        assert_eq!(config.dpi, 96);
        assert_eq!(config.default_layout, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml() {
        let config = WriterConfig::from_yaml_str("dpi: 72\ndefault_layout: 3\n").unwrap();
        assert_eq!(config.dpi, 72);
        assert_eq!(config.default_layout, 3);
        assert_eq!(config.media_volume, 80_000);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            WriterConfig::from_yaml_str("dpi: 0\n"),
            Err(OoxmlError::Config(_))
        ));
        assert!(matches!(
            WriterConfig::from_yaml_str("default_layout: 0\n"),
            Err(OoxmlError::Config(_))
        ));
        assert!(matches!(
            WriterConfig::from_yaml_str("media_volume: 100001\n"),
            Err(OoxmlError::Config(_))
        ));
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(matches!(
            WriterConfig::from_yaml_str("dpi: [not, a, number]\n"),
            Err(OoxmlError::Config(_))
        ));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = WriterConfig {
            media_volume: 40_000,
            ..Default::default()
        };
        let yaml = config.to_yaml_string().unwrap();
        assert_eq!(WriterConfig::from_yaml_str(&yaml).unwrap(), config);
    }
}
