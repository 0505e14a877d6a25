//! Page-number footer placement
//!
//! This module handles:
//! - Reserving a page-number band so images never overlap the footer
//! - Measuring footer text with Helvetica advance widths
//! - Positioning the text according to the alignment settings

use crate::constants::{
    HEADER_BAND_PT, PAGE_NUMBER_FONT_SIZE, PAGE_NUMBER_OFFSET, PAGE_NUMBER_SIDE_MARGIN,
};
use crate::types::{HorizontalAlign, PageNumberSettings, VerticalAlign};

use super::{FooterText, Rect};

// =============================================================================
// Available Area
// =============================================================================

/// Calculate the area images may occupy on a page.
///
/// # Arguments
/// * `page_width` / `page_height` - Page size in points
/// * `inset` - Plain margin applied on every side
/// * `settings` - Footer settings; a hidden footer reserves nothing
/// * `number_band` - Height kept free on the side the number is drawn on
///
/// The side opposite the number keeps a [`HEADER_BAND_PT`] band.
pub fn available_area(
    page_width: f32,
    page_height: f32,
    inset: f32,
    settings: &PageNumberSettings,
    number_band: f32,
) -> Rect {
    let (top_band, bottom_band) = if settings.show {
        match settings.vertical_align {
            VerticalAlign::Bottom => (HEADER_BAND_PT, number_band),
            VerticalAlign::Top => (number_band, HEADER_BAND_PT),
        }
    } else {
        (0.0, 0.0)
    };

    let width = (page_width - 2.0 * inset).max(0.0);
    let height = (page_height - 2.0 * inset - top_band - bottom_band).max(0.0);

    Rect::new(inset, inset + top_band, width, height)
}

// =============================================================================
// Footer Text
// =============================================================================

/// Build the footer for a page, or `None` when page numbers are hidden.
pub fn footer_for_page(
    page_number: u32,
    page_width: f32,
    page_height: f32,
    settings: &PageNumberSettings,
) -> Option<FooterText> {
    if !settings.show {
        return None;
    }

    let text = settings.label(page_number);
    let font_size = PAGE_NUMBER_FONT_SIZE;
    let width = text_width(&text, font_size);

    let x = match settings.horizontal_align {
        HorizontalAlign::Start => PAGE_NUMBER_SIDE_MARGIN,
        HorizontalAlign::Center => (page_width - width) / 2.0,
        HorizontalAlign::End => page_width - PAGE_NUMBER_SIDE_MARGIN - width,
    };

    let baseline_y = match settings.vertical_align {
        VerticalAlign::Bottom => page_height - PAGE_NUMBER_OFFSET,
        VerticalAlign::Top => PAGE_NUMBER_OFFSET + font_size,
    };

    // Pages smaller than the offsets (native-size thumbnails) keep the text visible
    let x = x.clamp(0.0, (page_width - width).max(0.0));
    let baseline_y = baseline_y.clamp(font_size.min(page_height), page_height);

    Some(FooterText {
        text,
        x,
        baseline_y,
        font_size,
    })
}

// =============================================================================
// Text Measurement
// =============================================================================

/// Helvetica advance widths for 'A'..='Z' (1/1000 em)
const HELVETICA_UPPER: [u16; 26] = [
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, 778, 722, 667,
    611, 722, 667, 944, 667, 667, 611,
];

/// Helvetica advance widths for 'a'..='z' (1/1000 em)
const HELVETICA_LOWER: [u16; 26] = [
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, 556, 333, 500,
    278, 556, 500, 722, 500, 500, 500,
];

fn helvetica_advance(ch: char) -> u16 {
    match ch {
        'A'..='Z' => HELVETICA_UPPER[(ch as u8 - b'A') as usize],
        'a'..='z' => HELVETICA_LOWER[(ch as u8 - b'a') as usize],
        '0'..='9' => 556,
        ' ' | '.' | ',' | ':' | ';' | '/' | '!' => 278,
        '-' | '(' | ')' => 333,
        _ => 556,
    }
}

/// Width of `text` set in Helvetica at `font_size` points
pub fn text_width(text: &str, font_size: f32) -> f32 {
    let units: u32 = text.chars().map(|ch| helvetica_advance(ch) as u32).sum();
    units as f32 / 1000.0 * font_size
}

// =============================================================================
// Tests
// =============================================================================
