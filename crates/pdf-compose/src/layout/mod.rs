//! Layout calculation modules for page composition
//!
//! This module handles all the geometric calculations:
//! - One image per page (canvas size, scale, centering)
//! - Grid packing (two columns, greedy row wrapping)
//! - Page-number footer (band reservation, text position)

mod footer;
mod grid;
mod single;
mod types;

pub use footer::*;
pub use grid::*;
pub use single::*;
pub use types::*;
