//! One image per page
//!
//! Handles the page canvas and scale factor for every mode except the grid.

use crate::constants::{A4_DIMENSIONS, FOOTER_BAND_SINGLE_PT};
use crate::types::{PageNumberSettings, PageSizeMode};

use super::{ImageSpec, Page, Placement, Rect, available_area, footer_for_page};

/// Page canvas (width, height) for an image in a single-image mode.
pub fn page_dimensions(image: &ImageSpec, mode: PageSizeMode) -> (f32, f32) {
    match mode {
        PageSizeMode::ImageNativeSize => (image.width_f(), image.height_f()),
        _ => A4_DIMENSIONS,
    }
}

/// Scale factor for placing `image` into `area` on a page of `page` size.
///
/// `FitToA4ScaleDown` only shrinks images that exceed the page itself. An
/// image that fits the page but not the area left by the footer bands keeps
/// scale 1.0.
pub fn calculate_scale(
    image: &ImageSpec,
    area: &Rect,
    page: (f32, f32),
    mode: PageSizeMode,
) -> f32 {
    let fit = (area.width / image.width_f()).min(area.height / image.height_f());

    match mode {
        PageSizeMode::FitToA4 => fit,
        PageSizeMode::FitToA4ScaleDown => {
            let (page_width, page_height) = page;
            if image.width_f() > page_width || image.height_f() > page_height {
                fit.min(1.0)
            } else {
                1.0
            }
        }
        PageSizeMode::NoScaling | PageSizeMode::ImageNativeSize | PageSizeMode::GridPacked => 1.0,
    }
}

/// Lay out one image on its own page.
///
/// The image is centered horizontally on the page and vertically inside the
/// available area. Modes that never scale cannot make room for the footer,
/// so they use the whole page and the footer is drawn over the image.
pub fn layout_single(
    image: &ImageSpec,
    page_number: u32,
    mode: PageSizeMode,
    settings: &PageNumberSettings,
) -> Page {
    let (page_width, page_height) = page_dimensions(image, mode);

    let area = if mode.scales_to_page() {
        available_area(page_width, page_height, 0.0, settings, FOOTER_BAND_SINGLE_PT)
    } else {
        Rect::new(0.0, 0.0, page_width, page_height)
    };

    let scale = calculate_scale(image, &area, (page_width, page_height), mode);
    let scaled_width = image.width_f() * scale;
    let scaled_height = image.height_f() * scale;

    let left = (page_width - scaled_width) / 2.0;
    let mut top = area.y + (area.height - scaled_height) / 2.0;
    if scaled_height <= page_height {
        // Taller than the area but not the page: stay on the page
        top = top.clamp(0.0, page_height - scaled_height);
    }

    let mut page = Page::new(page_number, page_width, page_height);
    page.placements.push(Placement {
        image: image.source,
        rect: Rect::new(left, top, scaled_width, scaled_height),
        scale,
    });
    page.footer = footer_for_page(page_number, page_width, page_height, settings);
    page
}

// =============================================================================
// Tests
// =============================================================================
