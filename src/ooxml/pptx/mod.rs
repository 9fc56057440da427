//! PowerPoint (.pptx) presentation generation.
//!
//! The module follows the same pattern as the `docx` module:
//!
//! - `Pptx`: the presentation being authored and its package
//! - `SlideMut`: handle for placing text boxes, pictures, charts and tables
//! - `Slide`: the shapes and background of one slide
//!
//! Positions and sizes are in EMU (914400 per inch).

pub mod presentation;
pub mod slide;
pub mod writer;

pub use presentation::{DEFAULT_SLIDE_SIZE, Pptx, PptxModel};
pub use slide::{DEFAULT_TABLE_WIDTH, Frame, ShapeOptions, Slide, SlideItem, SlideMut};
