//! Image sources
//!
//! The composer never holds pixel data. Providers answer two questions for an
//! [`ImageRef`]: how big is it (header-only probe) and what are its pixels
//! (full decode, done one image at a time by the sink).

use crate::layout::{ImageRef, ImageSpec};
use crate::types::*;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Resolves image handles to dimensions and decoded pixels
pub trait ImageProvider {
    /// Number of images, handles are `ImageRef(0..len)`
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pixel dimensions, reading as little of the image as possible
    fn probe(&self, image: ImageRef) -> Result<(u32, u32)>;

    /// Fully decoded pixels
    fn load(&self, image: ImageRef) -> Result<DynamicImage>;

    /// Human-readable name for logs and reports
    fn describe(&self, image: ImageRef) -> String {
        image.to_string()
    }
}

// =============================================================================
// Files
// =============================================================================

/// Images read from disk, in the given order
#[derive(Debug, Clone)]
pub struct FileImageProvider {
    paths: Vec<PathBuf>,
}

impl FileImageProvider {
    pub fn new(paths: &[impl AsRef<Path>]) -> Self {
        Self {
            paths: paths.iter().map(|p| p.as_ref().to_owned()).collect(),
        }
    }

    fn path(&self, image: ImageRef) -> Result<&Path> {
        self.paths
            .get(image.0)
            .map(PathBuf::as_path)
            .ok_or_else(|| ComposeError::Config(format!("No image {}", image)))
    }
}

impl ImageProvider for FileImageProvider {
    fn len(&self) -> usize {
        self.paths.len()
    }

    fn probe(&self, image: ImageRef) -> Result<(u32, u32)> {
        let path = self.path(image)?;
        let dims = ImageReader::open(path)?
            .with_guessed_format()?
            .into_dimensions()?;
        Ok(dims)
    }

    fn load(&self, image: ImageRef) -> Result<DynamicImage> {
        let path = self.path(image)?;
        Ok(ImageReader::open(path)?.with_guessed_format()?.decode()?)
    }

    fn describe(&self, image: ImageRef) -> String {
        match self.paths.get(image.0) {
            Some(path) => path.display().to_string(),
            None => image.to_string(),
        }
    }
}

// =============================================================================
// Memory
// =============================================================================

/// Encoded images held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryImageProvider {
    images: Vec<(String, Vec<u8>)>,
}

impl MemoryImageProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an encoded image (PNG, JPEG, ...) under a display name
    pub fn push(&mut self, name: impl Into<String>, bytes: Vec<u8>) -> ImageRef {
        self.images.push((name.into(), bytes));
        ImageRef(self.images.len() - 1)
    }

    fn reader(&self, image: ImageRef) -> Result<ImageReader<Cursor<&[u8]>>> {
        let (_, bytes) = self
            .images
            .get(image.0)
            .ok_or_else(|| ComposeError::Config(format!("No image {}", image)))?;
        Ok(ImageReader::new(Cursor::new(bytes.as_slice())).with_guessed_format()?)
    }
}

impl ImageProvider for MemoryImageProvider {
    fn len(&self) -> usize {
        self.images.len()
    }

    fn probe(&self, image: ImageRef) -> Result<(u32, u32)> {
        Ok(self.reader(image)?.into_dimensions()?)
    }

    fn load(&self, image: ImageRef) -> Result<DynamicImage> {
        Ok(self.reader(image)?.decode()?)
    }

    fn describe(&self, image: ImageRef) -> String {
        match self.images.get(image.0) {
            Some((name, _)) => name.clone(),
            None => image.to_string(),
        }
    }
}

// =============================================================================
// Probing
// =============================================================================

/// Probe every image of a provider, in order.
///
/// Images that cannot be read, or that report a zero dimension, are skipped
/// and returned alongside the usable specs.
pub fn probe_images<P: ImageProvider + ?Sized>(provider: &P) -> (Vec<ImageSpec>, Vec<SkippedImage>) {
    let mut specs = Vec::with_capacity(provider.len());
    let mut skipped = Vec::new();

    for index in 0..provider.len() {
        let image = ImageRef(index);
        let outcome = provider.probe(image).and_then(|(width, height)| {
            if width == 0 || height == 0 {
                Err(ComposeError::Decode {
                    image: provider.describe(image),
                    message: format!("image has zero size ({}x{})", width, height),
                })
            } else {
                Ok(ImageSpec::new(width, height, image))
            }
        });

        match outcome {
            Ok(spec) => specs.push(spec),
            Err(e) => {
                let description = provider.describe(image);
                log::warn!("Skipping {}: {}", description, e);
                skipped.push(SkippedImage {
                    image,
                    description,
                    reason: e.to_string(),
                });
            }
        }
    }

    (specs, skipped)
}

// =============================================================================
// File Details
// =============================================================================

/// What the image info view shows about a file
#[derive(Debug, Clone, PartialEq)]
pub struct ImageDetails {
    pub file_name: String,
    pub size_bytes: u64,
    pub width: u32,
    pub height: u32,
    pub format: Option<ImageFormat>,
}

/// Read name, byte size, pixel size and format of an image file
pub fn image_details(path: impl AsRef<Path>) -> Result<ImageDetails> {
    let path = path.as_ref();
    let metadata = std::fs::metadata(path)?;
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    let format = reader.format();
    let (width, height) = reader.into_dimensions()?;

    Ok(ImageDetails {
        file_name: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()),
        size_bytes: metadata.len(),
        width,
        height,
        format,
    })
}

// =============================================================================
// Tests
// =============================================================================
