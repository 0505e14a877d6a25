//! Layout data types for page composition
//!
//! These types are the contract between the composer and the document sink.
//!
//! Coordinates use a TOP-LEFT origin with y growing downward, in points.
//! PDF uses a bottom-left origin; the sink converts with
//! [`Rect::to_pdf_origin`] and nothing else flips coordinates.

/// Opaque handle to an input image (its index in the caller's list)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageRef(pub usize);

impl std::fmt::Display for ImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Pixel dimensions of an input image plus its handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSpec {
    pub width: u32,
    pub height: u32,
    pub source: ImageRef,
}

impl ImageSpec {
    pub fn new(width: u32, height: u32, source: ImageRef) -> Self {
        Self {
            width,
            height,
            source,
        }
    }

    pub fn width_f(&self) -> f32 {
        self.width as f32
    }

    pub fn height_f(&self) -> f32 {
        self.height as f32
    }
}

/// A rectangular area in points, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (top edge, measured down from the page top)
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge y coordinate
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Same rectangle with a bottom-left origin on a page of `page_height`
    pub fn to_pdf_origin(&self, page_height: f32) -> Rect {
        Rect::new(
            self.x,
            page_height - self.y - self.height,
            self.width,
            self.height,
        )
    }
}

/// One image drawn on a page
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub image: ImageRef,
    /// Destination of the scaled image
    pub rect: Rect,
    /// Uniform scale from image pixels to points
    pub scale: f32,
}

/// Page-number text positioned on a page
#[derive(Debug, Clone, PartialEq)]
pub struct FooterText {
    pub text: String,
    /// Left edge of the text
    pub x: f32,
    /// Baseline, measured down from the page top
    pub baseline_y: f32,
    pub font_size: f32,
}

/// A composed output page
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based position in the output
    pub number: u32,
    pub width: f32,
    pub height: f32,
    pub placements: Vec<Placement>,
    pub footer: Option<FooterText>,
}

impl Page {
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            placements: Vec::new(),
            footer: None,
        }
    }
}
