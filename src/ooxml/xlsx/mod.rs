//! Excel (.xlsx) workbook generation.
//!
//! - [`Xlsx`]: the workbook being authored and its package registry
//! - [`Sheet`]: cells and column widths of one worksheet
//! - [`writer`]: element trees for the workbook, worksheet, styles and
//!   shared-string parts
//!
//! Charts in DOCX and PPTX documents embed a workbook generated here.

pub mod cell;
pub mod workbook;
pub mod worksheet;
pub mod writer;

pub use cell::CellValue;
pub use workbook::{Xlsx, XlsxModel};
pub use worksheet::Sheet;
