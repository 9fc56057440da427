//! Markup builders for the DOCX parts.
//!
//! Every function here turns part of the [`DocxModel`](super::DocxModel) into
//! an [`Element`] tree; the [`Docx`](super::Docx) producers serialize them.

pub mod body;
pub mod drawing;
pub mod paragraph;
pub mod table;
pub mod templates;

use crate::common::xml::{Element, XmlValue};

pub use body::document_element;
pub use paragraph::{page_break_element, paragraph_element};
pub use table::{DEFAULT_TABLE_WIDTH, table_element};
pub use templates::{font_table_element, settings_element, styles_element, web_settings_element};

/// WordprocessingML flavour of [`Element::val`]: `<name w:val="..."/>`.
pub(crate) fn w_val(name: &str, value: impl Into<XmlValue>) -> Element {
    Element::new(name).attr("w:val", value)
}
