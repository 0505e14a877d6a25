//! Grid packing
//!
//! Greedy two-column packer: images are fitted to the column width, grouped
//! into rows of two in input order, and rows are stacked top to bottom until
//! the page is full.

use crate::constants::{
    A4_DIMENSIONS, FOOTER_BAND_GRID_PT, GRID_COLUMNS, GRID_MARGIN_PT, GRID_ROW_CAP_DIVISOR,
    GRID_SPACING_PT,
};
use crate::types::PageNumberSettings;

use super::{ImageSpec, Page, Placement, Rect, available_area, footer_for_page};

// =============================================================================
// Grid Geometry
// =============================================================================

/// Geometry shared by every page of a grid layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub page_width: f32,
    pub page_height: f32,
    /// Area rows are packed into
    pub area: Rect,
    pub column_width: f32,
    /// Tallest an image may be
    pub row_cap: f32,
    pub spacing: f32,
}

impl GridGeometry {
    pub fn new(settings: &PageNumberSettings) -> Self {
        let (page_width, page_height) = A4_DIMENSIONS;
        let area = available_area(
            page_width,
            page_height,
            GRID_MARGIN_PT,
            settings,
            FOOTER_BAND_GRID_PT,
        );
        let spacing = GRID_SPACING_PT;
        let column_width =
            (area.width - spacing * (GRID_COLUMNS - 1) as f32) / GRID_COLUMNS as f32;

        Self {
            page_width,
            page_height,
            area,
            column_width,
            row_cap: area.height / GRID_ROW_CAP_DIVISOR,
            spacing,
        }
    }

    /// Left edge of a column
    pub fn column_x(&self, col: usize) -> f32 {
        self.area.x + col as f32 * (self.column_width + self.spacing)
    }
}

/// Fit an image into a grid cell, preserving aspect ratio.
///
/// The width-constrained size is tried first; if it is taller than the row
/// cap, the height is clamped and the width re-derived from it.
pub fn fit_to_cell(image: &ImageSpec, geometry: &GridGeometry) -> (f32, f32) {
    let aspect = image.height_f() / image.width_f();

    let width = geometry.column_width;
    let height = width * aspect;
    if height <= geometry.row_cap {
        (width, height)
    } else {
        (geometry.row_cap / aspect, geometry.row_cap)
    }
}

// =============================================================================
// Rows
// =============================================================================

/// A row of up to [`GRID_COLUMNS`] fitted images
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    /// (image, fitted width, fitted height) in column order
    pub cells: Vec<(ImageSpec, f32, f32)>,
    /// Tallest image in the row
    pub height: f32,
}

/// Group images into rows in input order; the last row may be short.
pub fn build_rows(images: &[ImageSpec], geometry: &GridGeometry) -> Vec<GridRow> {
    images
        .chunks(GRID_COLUMNS)
        .map(|chunk| {
            let cells: Vec<_> = chunk
                .iter()
                .map(|image| {
                    let (w, h) = fit_to_cell(image, geometry);
                    (*image, w, h)
                })
                .collect();
            let height = cells.iter().map(|(_, _, h)| *h).fold(0.0, f32::max);
            GridRow { cells, height }
        })
        .collect()
}

// =============================================================================
// Packing
// =============================================================================

/// Pack images onto grid pages.
///
/// A row joins the current page when it is the page's first row or when it
/// still fits below the rows already there. An oversized row therefore
/// always gets a page of its own instead of stalling the packer.
pub fn layout_grid(images: &[ImageSpec], settings: &PageNumberSettings) -> Vec<Page> {
    let geometry = GridGeometry::new(settings);
    let rows = build_rows(images, &geometry);

    let mut pages: Vec<Page> = Vec::new();
    let mut current: Option<Page> = None;
    let mut used_height = 0.0;

    for row in rows {
        let fits = match &current {
            Some(page) if !page.placements.is_empty() => {
                used_height + geometry.spacing + row.height <= geometry.area.height
            }
            _ => true,
        };

        if !fits {
            if let Some(page) = current.take() {
                pages.push(page);
            }
        }

        let page = current.get_or_insert_with(|| {
            used_height = 0.0;
            Page::new(
                pages.len() as u32 + 1,
                geometry.page_width,
                geometry.page_height,
            )
        });

        let row_top = if page.placements.is_empty() {
            geometry.area.y
        } else {
            geometry.area.y + used_height + geometry.spacing
        };

        for (col, (image, width, height)) in row.cells.iter().enumerate() {
            let x = geometry.column_x(col) + (geometry.column_width - width) / 2.0;
            let y = row_top + (row.height - height) / 2.0;
            page.placements.push(Placement {
                image: image.source,
                rect: Rect::new(x, y, *width, *height),
                scale: width / image.width_f(),
            });
        }

        used_height = row_top + row.height - geometry.area.y;
    }

    if let Some(page) = current {
        pages.push(page);
    }

    for page in &mut pages {
        page.footer = footer_for_page(page.number, page.width, page.height, settings);
    }

    pages
}

// =============================================================================
// Tests
// =============================================================================
