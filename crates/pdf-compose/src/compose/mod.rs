//! Image-to-PDF composition
//!
//! This module orchestrates a conversion:
//! 1. Probe image dimensions (skipping unreadable images)
//! 2. Compose pages according to the page-size mode
//! 3. Render pages and embed images one at a time
//! 4. Save the PDF atomically

mod io;

pub use io::{
    PdfFileEntry, list_pdfs, resolve_output_path, save_pdf, save_pdf_blocking,
};

use crate::layout::{ImageSpec, Page, layout_grid, layout_single};
use crate::options::ComposeOptions;
use crate::render::render_document;
use crate::source::{FileImageProvider, ImageProvider, probe_images};
use crate::types::*;
use std::path::{Path, PathBuf};

/// Outcome of a successful conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionReport {
    pub output: PathBuf,
    pub pages: usize,
    pub images_placed: usize,
    /// Images dropped at probe time or left empty at render time
    pub skipped: Vec<SkippedImage>,
}

/// Compose pages for an ordered list of images.
///
/// Every image lands on exactly one page and reading the pages in order
/// yields the images in input order.
pub fn compose(
    images: &[ImageSpec],
    mode: PageSizeMode,
    page_numbers: &PageNumberSettings,
) -> Result<Vec<Page>> {
    if images.is_empty() {
        return Err(ComposeError::EmptyInput);
    }
    page_numbers.validate()?;

    if let Some(bad) = images.iter().find(|i| i.width == 0 || i.height == 0) {
        return Err(ComposeError::Config(format!(
            "image {} has zero size ({}x{})",
            bad.source, bad.width, bad.height
        )));
    }

    let pages: Vec<Page> = if mode.is_single_image() {
        images
            .iter()
            .enumerate()
            .map(|(idx, image)| layout_single(image, idx as u32 + 1, mode, page_numbers))
            .collect()
    } else {
        layout_grid(images, page_numbers)
    };

    log::debug!(
        "Composed {} images onto {} pages ({})",
        images.len(),
        pages.len(),
        mode.name()
    );

    Ok(pages)
}

/// Run a whole conversion on the calling thread.
///
/// Intended to run off any interactive thread. `progress` receives
/// (pages rendered, total pages).
pub fn convert_blocking<P: ImageProvider + ?Sized>(
    provider: &P,
    options: &ComposeOptions,
    output: &Path,
    progress: &mut dyn FnMut(usize, usize),
) -> Result<ConversionReport> {
    options.validate()?;

    let (specs, mut skipped) = probe_images(provider);
    let pages = compose(&specs, options.page_size_mode, &options.page_numbers)?;

    let rendered = render_document(&pages, provider, options, progress)?;
    skipped.extend(rendered.skipped);

    let output = resolve_output_path(output);
    save_pdf_blocking(rendered.document, &output)?;

    log::info!(
        "Wrote {} pages with {} images to {}",
        pages.len(),
        rendered.images_embedded,
        output.display()
    );

    Ok(ConversionReport {
        output,
        pages: pages.len(),
        images_placed: rendered.images_embedded,
        skipped,
    })
}

/// Convert image files into one PDF
pub async fn convert_images(
    paths: &[impl AsRef<Path>],
    options: &ComposeOptions,
    output: impl AsRef<Path>,
) -> Result<ConversionReport> {
    convert_images_with_progress(paths, options, output, |_, _| {}).await
}

/// Convert image files into one PDF, reporting per-page progress
pub async fn convert_images_with_progress<F>(
    paths: &[impl AsRef<Path>],
    options: &ComposeOptions,
    output: impl AsRef<Path>,
    mut progress: F,
) -> Result<ConversionReport>
where
    F: FnMut(usize, usize) + Send + 'static,
{
    options.validate()?;
    if paths.is_empty() {
        return Err(ComposeError::EmptyInput);
    }

    let provider = FileImageProvider::new(paths);
    let options = options.clone();
    let output = output.as_ref().to_owned();

    // Decoding and encoding are CPU-bound, spawn blocking
    tokio::task::spawn_blocking(move || {
        convert_blocking(&provider, &options, &output, &mut progress)
    })
    .await?
}

/// Probe image files without decoding their pixels
pub async fn probe_files(
    paths: &[impl AsRef<Path>],
) -> Result<(Vec<ImageSpec>, Vec<SkippedImage>)> {
    let provider = FileImageProvider::new(paths);
    let result = tokio::task::spawn_blocking(move || probe_images(&provider)).await?;
    Ok(result)
}
