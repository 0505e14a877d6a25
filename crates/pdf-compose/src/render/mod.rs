//! PDF rendering for composed pages
//!
//! This is the document sink: the only code that knows about the PDF
//! library. It handles:
//! - Creating image XObjects from decoded pixels
//! - Building output pages and the page tree
//! - Document metadata

mod page;
mod xobject;

pub use page::*;
pub use xobject::ImageXObject;

use crate::layout::Page;
use crate::options::ComposeOptions;
use crate::source::ImageProvider;
use crate::types::*;
use lopdf::{Dictionary, Document, Object};

/// Output of the sink, before serialization
#[derive(Debug)]
pub struct RenderedDocument {
    pub document: Document,
    /// Images laid out but left empty because they failed to decode
    pub skipped: Vec<SkippedImage>,
    pub images_embedded: usize,
}

/// Render composed pages into a PDF document.
///
/// `progress` is called after every page with (pages done, total pages).
pub fn render_document<P: ImageProvider + ?Sized>(
    pages: &[Page],
    provider: &P,
    options: &ComposeOptions,
    progress: &mut dyn FnMut(usize, usize),
) -> Result<RenderedDocument> {
    if pages.is_empty() {
        return Err(ComposeError::EmptyInput);
    }

    let mut output = Document::with_version("1.7");
    let pages_id = output.new_object_id();

    let font_id = if pages.iter().any(|p| p.footer.is_some()) {
        Some(add_footer_font(&mut output))
    } else {
        None
    };

    let mut skipped = Vec::new();
    let mut page_refs = Vec::with_capacity(pages.len());
    let mut placed = 0;

    for (idx, page) in pages.iter().enumerate() {
        let page_id = render_page(
            &mut output,
            page,
            provider,
            options.jpeg_quality,
            pages_id,
            font_id,
            &mut skipped,
        );
        page_refs.push(Object::Reference(page_id));
        placed += page.placements.len();

        log::debug!(
            "Rendered page {} ({} images)",
            page.number,
            page.placements.len()
        );
        progress(idx + 1, pages.len());
    }

    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    output.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    output.trailer.set("Root", catalog_id);

    let info_id = output.add_object(document_info(options));
    output.trailer.set("Info", info_id);

    output.compress();

    Ok(RenderedDocument {
        document: output,
        images_embedded: placed - skipped.len(),
        skipped,
    })
}

fn document_info(options: &ComposeOptions) -> Dictionary {
    let mut info = Dictionary::new();
    info.set(
        "Producer",
        Object::string_literal(concat!("pdf-compose ", env!("CARGO_PKG_VERSION"))),
    );
    info.set(
        "CreationDate",
        Object::string_literal(chrono::Local::now().format("D:%Y%m%d%H%M%S").to_string()),
    );
    if let Some(title) = &options.title {
        info.set("Title", Object::string_literal(title.as_str()));
    }
    info
}
