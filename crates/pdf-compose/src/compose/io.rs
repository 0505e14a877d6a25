//! Document I/O for composition

use crate::constants::DEFAULT_OUTPUT_NAME;
use crate::types::*;
use chrono::{DateTime, Local};
use lopdf::Document;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Save a document, blocking the calling thread.
///
/// The PDF is written to a temporary file next to `path` and renamed over
/// it once complete, so a failed save never leaves a partial file behind.
pub fn save_pdf_blocking(mut doc: Document, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut temp = tempfile::Builder::new()
        .prefix(".pdf-compose-")
        .suffix(".partial")
        .tempfile_in(dir)
        .map_err(|e| {
            ComposeError::SinkUnavailable(format!("cannot write to {}: {}", dir.display(), e))
        })?;

    doc.save_to(temp.as_file_mut())
        .map_err(|e| ComposeError::Serialization(e.to_string()))?;
    temp.as_file_mut()
        .flush()
        .map_err(|e| ComposeError::Serialization(e.to_string()))?;

    temp.persist(path).map_err(|e| {
        ComposeError::SinkUnavailable(format!("cannot create {}: {}", path.display(), e.error))
    })?;

    Ok(())
}

/// Save the composed document
pub async fn save_pdf(doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    tokio::task::spawn_blocking(move || save_pdf_blocking(doc, &path)).await?
}

/// Resolve where the PDF goes: a directory gets the default file name
pub fn resolve_output_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_dir() {
        path.join(DEFAULT_OUTPUT_NAME)
    } else {
        path.to_owned()
    }
}

// =============================================================================
// Output Listing
// =============================================================================

/// A previously generated PDF
#[derive(Debug, Clone, PartialEq)]
pub struct PdfFileEntry {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub modified: DateTime<Local>,
}

/// List PDF files in a directory, newest first
pub async fn list_pdfs(dir: impl AsRef<Path>) -> Result<Vec<PdfFileEntry>> {
    let mut entries = Vec::new();
    let mut read_dir = tokio::fs::read_dir(dir.as_ref()).await?;

    while let Some(entry) = read_dir.next_entry().await? {
        let path = entry.path();
        let is_pdf = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if !is_pdf {
            continue;
        }

        let metadata = entry.metadata().await?;
        if !metadata.is_file() {
            continue;
        }

        entries.push(PdfFileEntry {
            path,
            size_bytes: metadata.len(),
            modified: DateTime::<Local>::from(metadata.modified()?),
        });
    }

    entries.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| a.path.cmp(&b.path)));
    Ok(entries)
}
