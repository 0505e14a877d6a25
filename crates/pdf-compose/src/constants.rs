//! Shared constants for page composition
//!
//! All lengths are in PDF points (1/72 inch).

// =============================================================================
// Page Dimensions
// =============================================================================

/// A4 portrait width in points
pub const A4_WIDTH_PT: f32 = 595.0;

/// A4 portrait height in points
pub const A4_HEIGHT_PT: f32 = 842.0;

/// A4 dimensions as tuple (width, height)
pub const A4_DIMENSIONS: (f32, f32) = (A4_WIDTH_PT, A4_HEIGHT_PT);

// =============================================================================
// Page-Number Bands
// =============================================================================

/// Band kept free on the side opposite the page number
pub const HEADER_BAND_PT: f32 = 10.0;

/// Band kept free for the page number in single-image modes
pub const FOOTER_BAND_SINGLE_PT: f32 = 30.0;

/// Band kept free for the page number in grid mode
pub const FOOTER_BAND_GRID_PT: f32 = 40.0;

// =============================================================================
// Grid
// =============================================================================

/// Images per grid row
pub const GRID_COLUMNS: usize = 2;

/// Outer margin of a grid page
pub const GRID_MARGIN_PT: f32 = 10.0;

/// Gap between columns and between rows
pub const GRID_SPACING_PT: f32 = 10.0;

/// Rows are capped at this fraction of the available height
pub const GRID_ROW_CAP_DIVISOR: f32 = 3.0;

// =============================================================================
// Page Numbers
// =============================================================================

/// Font size for page numbers
pub const PAGE_NUMBER_FONT_SIZE: f32 = 10.0;

/// Distance of the number from the left/right page edge
pub const PAGE_NUMBER_SIDE_MARGIN: f32 = 20.0;

/// Distance of the baseline from the bottom edge
pub const PAGE_NUMBER_OFFSET: f32 = 15.0;

/// Maximum characters in the page-number prefix
pub const MAX_PREFIX_CHARS: usize = 10;

/// Highest allowed start page number
pub const MAX_START_NUMBER: u32 = 999;

// =============================================================================
// Output
// =============================================================================

/// JPEG quality used when none is configured
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// File name used when the caller gives a directory
pub const DEFAULT_OUTPUT_NAME: &str = "images.pdf";
