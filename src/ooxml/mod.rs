//! Office Open XML (OOXML) document generation.
//!
//! The module is organized into several layers:
//!
//! 1. **OPC Layer** (`opc`): part registry, relationships, content types and
//!    the ZIP archive
//! 2. **Shared building blocks** (`common`, `charts`, `error`): addressing,
//!    themes, properties, images, tables and the chart assembler
//! 3. **Format-Specific Modules**:
//!    - `docx`: Word documents
//!    - `pptx`: PowerPoint presentations
//!    - `xlsx`: Excel spreadsheets
//!
//! # Example: Writing a Workbook
//!
//! ```rust
//! use ooxmlgen::ooxml::xlsx::Xlsx;
//!
//! let mut xlsx = Xlsx::new()?;
//! xlsx.make_new_sheet("Data")?.set_row(0, ["a", "b"]);
//! let mut out = std::io::Cursor::new(Vec::new());
//! let summary = xlsx.generate(&mut out)?;
//! assert!(summary.parts.iter().any(|p| p == "/xl/worksheets/sheet1.xml"));
//! # Ok::<(), ooxmlgen::OoxmlError>(())
//! ```
pub mod charts;
pub mod common;
pub mod docx;
pub mod error;
pub mod opc;
pub mod pptx;
pub mod xlsx;

// Re-export commonly used types from OPC layer
pub use opc::{GenerateListener, GenerateSummary, OfficePackage, PackURI};

// Re-export common utilities
pub use common::DocumentProperties;

// Re-export error types
pub use error::{OoxmlError, Result};
