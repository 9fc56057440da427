//! ooxmlgen - A Rust library for generating Microsoft Office files
//!
//! This library writes Office Open XML documents (.docx, .pptx, .xlsx)
//! from an in-memory model, with native charts and tables in all three
//! formats.
//!
//! # Features
//!
//! - **XML tree builder**: Ordered element trees with escaping and merge
//! - **Charts**: Bar, column, stacked, pie, doughnut, line and area charts
//!   with an embedded data workbook
//! - **Tables**: One table description rendered for Word and PowerPoint
//! - **Packaging**: Content types, relationships and document properties
//!   written in a single streaming pass
//!
//! # Example - Writing a DOCX file
//!
//! ```
//! use ooxmlgen::Docx;
//! use ooxmlgen::ooxml::docx::{ParagraphOptions, TextOptions};
//!
//! # fn main() -> Result<(), ooxmlgen::OoxmlError> {
//! let mut docx = Docx::new()?;
//! docx.create_p(ParagraphOptions::default())
//!     .add_text("Hello, world", TextOptions::bold())?;
//! let bytes = docx.to_bytes()?;
//! assert_eq!(&bytes[..2], b"PK");
//! # Ok(())
//! # }
//! ```
//!
//! # Example - A chart on a slide
//!
//! ```
//! use ooxmlgen::{ChartDescriptor, Pptx, Series};
//! use ooxmlgen::ooxml::pptx::ShapeOptions;
//!
//! # fn main() -> Result<(), ooxmlgen::OoxmlError> {
//! let mut pptx = Pptx::new()?;
//! let chart = ChartDescriptor::new("column")
//!     .title("Revenue")
//!     .series(Series::new("2024", ["Q1", "Q2"], vec![4.0, 6.5]));
//! pptx.make_new_slide()?
//!     .add_text("Quarterly revenue", ShapeOptions::default())
//!     .add_chart(chart, &ShapeOptions::default())?;
//! let summary = pptx.generate(std::io::Cursor::new(Vec::new()))?;
//! assert!(summary.parts.iter().any(|p| p == "/ppt/charts/chart1.xml"));
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Low-level XML
//!
//! ```
//! use ooxmlgen::common::xml::{Element, SerializeOptions, to_xml_string};
//!
//! let el = Element::new("w:t").attr("xml:space", "preserve").text(" a < b ");
//! assert_eq!(
//!     to_xml_string(&el, &SerializeOptions::fragment()),
//!     r#"<w:t xml:space="preserve"> a &lt; b </w:t>"#
//! );
//! ```

/// Common utilities shared by the format writers
pub mod common;

/// Office Open XML (OOXML) document generation
pub mod ooxml;

pub use ooxml::charts::{ChartDescriptor, Series};
pub use ooxml::docx::Docx;
pub use ooxml::opc::{GenerateListener, GenerateSummary};
pub use ooxml::pptx::Pptx;
pub use ooxml::xlsx::Xlsx;
pub use ooxml::{OoxmlError, Result};
