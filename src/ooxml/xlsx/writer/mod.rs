//! Part writers for XLSX workbooks.
//!
//! Each function turns the workbook model into the element tree of one part;
//! serialization and packaging happen in the OPC layer.

pub mod sheet;
pub mod strings;
pub mod styles;
pub mod workbook;

pub use sheet::worksheet_element;
pub use strings::shared_strings_element;
pub use styles::styles_element;
pub use workbook::{app_extra, workbook_element};
