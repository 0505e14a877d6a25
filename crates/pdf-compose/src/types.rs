use thiserror::Error;

use crate::constants::{MAX_PREFIX_CHARS, MAX_START_NUMBER};
use crate::layout::ImageRef;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("No images to compose")]
    EmptyInput,
    #[error("Failed to decode {image}: {message}")]
    Decode { image: String, message: String },
    #[error("Output unavailable: {0}")]
    SinkUnavailable(String),
    #[error("Failed to write PDF: {0}")]
    Serialization(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ComposeError>;

/// How pages are sized and how images are scaled onto them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageSizeMode {
    /// A4 page, image scaled to fit (may upscale)
    #[default]
    FitToA4,
    /// A4 page, image only scaled down when it does not fit
    FitToA4ScaleDown,
    /// A4 page, image drawn at 1 px = 1 pt
    NoScaling,
    /// Page is exactly the image's pixel size
    ImageNativeSize,
    /// A4 pages, two images per row, rows wrap onto new pages
    GridPacked,
}

impl PageSizeMode {
    pub const ALL: [PageSizeMode; 5] = [
        PageSizeMode::FitToA4,
        PageSizeMode::FitToA4ScaleDown,
        PageSizeMode::NoScaling,
        PageSizeMode::ImageNativeSize,
        PageSizeMode::GridPacked,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PageSizeMode::FitToA4 => "Fit to A4",
            PageSizeMode::FitToA4ScaleDown => "Fit to A4 (scale down only)",
            PageSizeMode::NoScaling => "A4, no scaling",
            PageSizeMode::ImageNativeSize => "Image size",
            PageSizeMode::GridPacked => "A4 grid",
        }
    }

    /// Whether every image gets a page of its own
    pub fn is_single_image(self) -> bool {
        !matches!(self, PageSizeMode::GridPacked)
    }

    /// Whether the image is scaled into the available box (and so can
    /// make room for the page-number band)
    pub fn scales_to_page(self) -> bool {
        matches!(
            self,
            PageSizeMode::FitToA4 | PageSizeMode::FitToA4ScaleDown
        )
    }
}

/// Horizontal position of the page-number footer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HorizontalAlign {
    Start,
    Center,
    #[default]
    End,
}

/// Vertical position of the page-number footer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VerticalAlign {
    Top,
    #[default]
    Bottom,
}

/// Page-number footer settings, read once per conversion
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PageNumberSettings {
    pub show: bool,
    /// Number printed on the first page (1..=999)
    pub start_number: u32,
    pub horizontal_align: HorizontalAlign,
    pub vertical_align: VerticalAlign,
    /// Text printed before the number, at most 10 characters
    pub prefix_text: String,
}

impl Default for PageNumberSettings {
    fn default() -> Self {
        Self {
            show: true,
            start_number: 1,
            horizontal_align: HorizontalAlign::End,
            vertical_align: VerticalAlign::Bottom,
            prefix_text: String::new(),
        }
    }
}

impl PageNumberSettings {
    /// Footer settings with the footer turned off
    pub fn hidden() -> Self {
        Self {
            show: false,
            ..Default::default()
        }
    }

    /// Footer text for the page at 1-based position `page_number`
    pub fn label(&self, page_number: u32) -> String {
        let shown = page_number.saturating_add(self.start_number).saturating_sub(1);
        format!("{} {}", self.prefix_text, shown).trim().to_string()
    }

    /// Check the start number and prefix length
    pub fn validate(&self) -> Result<()> {
        if self.start_number < 1 || self.start_number > MAX_START_NUMBER {
            return Err(ComposeError::Config(format!(
                "Start page number must be between 1 and {}, got {}",
                MAX_START_NUMBER, self.start_number
            )));
        }

        let prefix_chars = self.prefix_text.chars().count();
        if prefix_chars > MAX_PREFIX_CHARS {
            return Err(ComposeError::Config(format!(
                "Page number prefix must be at most {} characters, got {}",
                MAX_PREFIX_CHARS, prefix_chars
            )));
        }

        Ok(())
    }
}

/// An image that could not be used, with the reason
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedImage {
    pub image: ImageRef,
    pub description: String,
    pub reason: String,
}

/// Dry-run numbers for a conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ComposeStatistics {
    pub mode: PageSizeMode,
    /// Images that made it into the layout
    pub source_images: usize,
    pub output_pages: usize,
    pub images_per_page: Vec<usize>,
}
