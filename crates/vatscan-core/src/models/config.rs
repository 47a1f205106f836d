//! Configuration structures for the interpretation pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for vatscan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VatscanConfig {
    /// Extraction configuration.
    pub extraction: ExtractionConfig,

    /// Multi-page capture configuration.
    pub capture: CaptureConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Records with overall confidence below this need human review.
    pub review_threshold: f32,

    /// Include the recognized text in CLI output.
    pub keep_raw_text: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            review_threshold: 0.7,
            keep_raw_text: false,
        }
    }
}

/// Multi-page capture configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Separator inserted between page texts.
    pub page_separator: String,

    /// Maximum pages recognized concurrently (0 = unlimited).
    pub max_concurrent_pages: usize,

    /// Drop pages whose recognized text is blank.
    pub skip_blank_pages: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            page_separator: "\n\n".to_string(),
            max_concurrent_pages: 4,
            skip_blank_pages: true,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl VatscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: VatscanConfig =
            serde_json::from_str(r#"{ "capture": { "max_concurrent_pages": 1 } }"#).unwrap();
        assert_eq!(config.capture.max_concurrent_pages, 1);
        assert_eq!(config.capture.page_separator, "\n\n");
        assert!(config.capture.skip_blank_pages);
        assert_eq!(config.extraction.review_threshold, 0.7);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = VatscanConfig::default();
        config.output.pretty = true;
        config.save(&path).unwrap();

        let loaded = VatscanConfig::from_file(&path).unwrap();
        assert!(loaded.output.pretty);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = VatscanConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, crate::VatscanError::Config(_)));
    }
}
