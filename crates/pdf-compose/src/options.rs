use crate::constants::DEFAULT_JPEG_QUALITY;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Conversion settings, read once before composing
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ComposeOptions {
    // Layout
    pub page_size_mode: PageSizeMode,

    // Page numbering
    pub page_numbers: PageNumberSettings,

    // Output
    pub jpeg_quality: u8,
    pub title: Option<String>,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            page_size_mode: PageSizeMode::FitToA4,
            page_numbers: PageNumberSettings::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            title: None,
        }
    }
}

impl ComposeOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| ComposeError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ComposeError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        self.page_numbers.validate()?;

        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ComposeError::Config(format!(
                "JPEG quality must be between 1 and 100, got {}",
                self.jpeg_quality
            )));
        }

        Ok(())
    }
}
