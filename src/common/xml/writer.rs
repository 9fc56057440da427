use super::escape::escape_xml;
use super::tree::Element;
use std::fmt::Write as _;

/// Declaration emitted at the top of every part.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Formatting controls for [`to_xml_string`].
///
/// The default produces compact output with a declaration, which is what
/// Office applications write themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Break lines and indent nested elements.
    pub pretty: bool,
    /// Indentation unit used when `pretty` is set.
    pub indent: String,
    /// Line separator used when `pretty` is set.
    pub newline: String,
    /// Emit the `<?xml ...?>` declaration.
    pub xml_declaration: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: "  ".to_string(),
            newline: "\n".to_string(),
            xml_declaration: true,
        }
    }
}

impl SerializeOptions {
    /// Indented output, handy when inspecting generated parts.
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            ..Self::default()
        }
    }

    /// Compact output without a declaration, for fragments.
    pub fn fragment() -> Self {
        Self {
            xml_declaration: false,
            ..Self::default()
        }
    }
}

/// Serialize a tree to a string.
///
/// Attribute values and text are escaped, deferred values are resolved, and
/// elements with neither children nor text are self-closed.
pub fn to_xml_string(root: &Element, options: &SerializeOptions) -> String {
    let mut out = String::with_capacity(1024);
    if options.xml_declaration {
        out.push_str(XML_DECLARATION);
        if options.pretty {
            out.push_str(&options.newline);
        } else {
            // Office writes a CRLF after the declaration even in compact parts
            out.push_str("\r\n");
        }
    }
    write_element(&mut out, root, options, 0);
    out
}

/// Serialize a tree straight to bytes for a package part.
pub fn to_xml_bytes(root: &Element, options: &SerializeOptions) -> Vec<u8> {
    to_xml_string(root, options).into_bytes()
}

fn write_indent(out: &mut String, options: &SerializeOptions, depth: usize) {
    if options.pretty {
        for _ in 0..depth {
            out.push_str(&options.indent);
        }
    }
}

fn write_element(out: &mut String, el: &Element, options: &SerializeOptions, depth: usize) {
    write_indent(out, options, depth);
    out.push('<');
    out.push_str(el.name());
    for (key, value) in el.attributes() {
        let _ = write!(out, r#" {}="{}""#, key, escape_xml(&value.resolve()));
    }

    let text = el.text_value().map(|t| t.resolve());
    if el.children().is_empty() && text.is_none() {
        out.push_str("/>");
        if options.pretty {
            out.push_str(&options.newline);
        }
        return;
    }

    out.push('>');
    if let Some(text) = &text {
        out.push_str(&escape_xml(text));
    }

    if !el.children().is_empty() {
        if options.pretty {
            out.push_str(&options.newline);
        }
        for child in el.children() {
            write_element(out, child, options, depth + 1);
        }
        write_indent(out, options, depth);
    }

    out.push_str("</");
    out.push_str(el.name());
    out.push('>');
    if options.pretty {
        out.push_str(&options.newline);
    }
}
