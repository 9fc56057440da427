//! XML tree builder and serializer.
//!
//! Producers describe a part as an [`Element`] tree and serialize it with
//! [`to_xml_string`]. Escaping lives here too, so nothing else in the crate
//! concatenates unescaped user text into markup.

pub mod escape;
pub mod tree;
pub mod writer;

pub use escape::escape_xml;
pub use tree::{ATTRIBUTE_PREFIX, ChildOrder, Element, TEXT_KEY, XmlValue, format_number, unordered};
pub use writer::{SerializeOptions, XML_DECLARATION, to_xml_bytes, to_xml_string};
