//! Building blocks shared by the DOCX, PPTX and XLSX writers.

pub mod address;
pub mod image;
pub mod properties;
pub mod table;
pub mod theme;

pub use address::column_letter;
pub use image::{ImageFormat, ImageMetrics, ImageOptions, PixelSize};
pub use properties::DocumentProperties;
pub use table::{Align, CellOptions, CellText, StyleValue, TableCell, TableOptions, VAlign};
pub use theme::Theme;
