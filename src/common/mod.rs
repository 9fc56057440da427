//! Format-independent building blocks.

pub mod unit;
pub mod xml;

pub use xml::{Element, SerializeOptions, XmlValue, escape_xml};
