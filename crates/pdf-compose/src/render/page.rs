//! Output page rendering
//!
//! Turns one composed [`Page`] into a PDF page object: image XObjects for
//! its placements and a Helvetica text run for the footer.

use crate::layout::{FooterText, Page, Placement};
use crate::source::ImageProvider;
use crate::types::{ComposeError, SkippedImage};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use super::xobject::ImageXObject;

/// Resource name of the footer font
const FOOTER_FONT: &str = "F1";

/// Add the base-14 Helvetica font used for footers
pub fn add_footer_font(output: &mut Document) -> ObjectId {
    let mut font_dict = Dictionary::new();
    font_dict.set("Type", Object::Name(b"Font".to_vec()));
    font_dict.set("Subtype", Object::Name(b"Type1".to_vec()));
    font_dict.set("BaseFont", Object::Name(b"Helvetica".to_vec()));
    font_dict.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
    output.add_object(font_dict)
}

/// Render a composed page.
///
/// Images are decoded one at a time and dropped once embedded. An image that
/// fails to decode is recorded in `skipped` and its slot stays empty.
///
/// # Arguments
/// * `output` - The output document
/// * `page` - The composed page
/// * `provider` - Source of decoded pixels
/// * `jpeg_quality` - Quality for embedded images
/// * `parent_pages_id` - The parent Pages object ID
/// * `font_id` - Footer font, required when the page has a footer
/// * `skipped` - Collects images that could not be embedded
pub fn render_page<P: ImageProvider + ?Sized>(
    output: &mut Document,
    page: &Page,
    provider: &P,
    jpeg_quality: u8,
    parent_pages_id: ObjectId,
    font_id: Option<ObjectId>,
    skipped: &mut Vec<SkippedImage>,
) -> ObjectId {
    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(page.width),
            Object::Real(page.height),
        ]),
    );

    let mut content_ops = Vec::new();
    let mut xobjects = Dictionary::new();

    for (idx, placement) in page.placements.iter().enumerate() {
        match embed_image(output, placement, provider, jpeg_quality) {
            Ok(xobject_id) => {
                let name = format!("Im{}", idx);
                xobjects.set(name.as_bytes(), Object::Reference(xobject_id));
                content_ops.push(placement_command(&name, placement, page.height));
            }
            Err(e) => {
                let description = provider.describe(placement.image);
                log::warn!(
                    "Leaving {} empty on page {}: {}",
                    description,
                    page.number,
                    e
                );
                skipped.push(SkippedImage {
                    image: placement.image,
                    description,
                    reason: e.to_string(),
                });
            }
        }
    }

    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    if let (Some(footer), Some(font_id)) = (&page.footer, font_id) {
        content_ops.push(footer_command(footer, page.height));
        let mut fonts = Dictionary::new();
        fonts.set(FOOTER_FONT, Object::Reference(font_id));
        resources.set("Font", Object::Dictionary(fonts));
    }

    let content = content_ops.join("");
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    output.add_object(page_dict)
}

fn embed_image<P: ImageProvider + ?Sized>(
    output: &mut Document,
    placement: &Placement,
    provider: &P,
    jpeg_quality: u8,
) -> Result<ObjectId, ComposeError> {
    let decoded = provider.load(placement.image)?;
    let xobject = ImageXObject::from_image(&decoded, jpeg_quality)?;
    drop(decoded);
    Ok(output.add_object(xobject.to_pdf_stream()))
}

// =============================================================================
// Content Stream Commands
// =============================================================================

/// Generate the PDF content stream command to draw a placement.
///
/// An image XObject occupies the unit square, so the matrix scales it to the
/// destination size and moves it to the flipped (bottom-left) position.
pub fn placement_command(xobject_name: &str, placement: &Placement, page_height: f32) -> String {
    let rect = placement.rect.to_pdf_origin(page_height);
    format!(
        "q {:.3} 0 0 {:.3} {:.3} {:.3} cm /{} Do Q\n",
        rect.width, rect.height, rect.x, rect.y, xobject_name
    )
}

/// Generate the PDF content stream command to draw the footer text.
pub fn footer_command(footer: &FooterText, page_height: f32) -> String {
    format!(
        "BT /{} {} Tf {:.3} {:.3} Td ({}) Tj ET\n",
        FOOTER_FONT,
        footer.font_size,
        footer.x,
        page_height - footer.baseline_y,
        escape_pdf_text(&footer.text)
    )
}

/// Escape text for a PDF literal string in WinAnsi encoding.
///
/// Latin-1 characters are written as octal escapes; anything outside
/// Latin-1 has no glyph in the base font and becomes '?'.
pub fn escape_pdf_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' | '(' | ')' => {
                out.push('\\');
                out.push(ch);
            }
            ' '..='~' => out.push(ch),
            '\u{A0}'..='\u{FF}' => out.push_str(&format!("\\{:03o}", ch as u32)),
            _ => out.push('?'),
        }
    }
    out
}

// =============================================================================
// Tests
// =============================================================================
