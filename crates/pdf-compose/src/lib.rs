pub mod compose;
pub mod constants;
pub mod layout;
mod options;
pub mod render;
pub mod source;
mod stats;
mod types;

pub use compose::{
    ConversionReport, PdfFileEntry, compose, convert_blocking, convert_images,
    convert_images_with_progress, list_pdfs, probe_files, resolve_output_path, save_pdf,
};
pub use layout::{FooterText, ImageRef, ImageSpec, Page, Placement, Rect};
pub use options::*;
pub use render::{RenderedDocument, render_document};
pub use source::{
    FileImageProvider, ImageDetails, ImageProvider, MemoryImageProvider, image_details,
    probe_images,
};
pub use stats::calculate_statistics;
pub use types::*;
