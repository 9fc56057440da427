//! Shared strings table for XLSX workbooks.
use crate::common::xml::Element;
use crate::ooxml::opc::constants::namespace as ns;
use crate::ooxml::opc::context::SharedStringTable;

/// Build `xl/sharedStrings.xml`.
///
/// Excel stores repeated text once and references it by index from cells;
/// `count` is the number of references, `uniqueCount` the number of entries.
pub fn shared_strings_element(strings: &SharedStringTable) -> Element {
    Element::new("sst")
        .attr("xmlns", ns::SML_MAIN)
        .attr("count", strings.count())
        .attr("uniqueCount", strings.unique_count())
        .children_from(strings.iter().map(|s| {
            let mut t = Element::new("t").text(s);
            if s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace) {
                t.set_attr("xml:space", "preserve");
            }
            Element::new("si").child(t)
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::xml::{SerializeOptions, to_xml_string};

    #[test]
    fn test_shared_strings() {
        let mut sst = SharedStringTable::new();
        sst.add("Hello");
        sst.add(" World");
        sst.add("Hello");

        let xml = to_xml_string(&shared_strings_element(&sst), &SerializeOptions::fragment());
        assert!(xml.contains(r#"count="3" uniqueCount="2""#));
        assert!(xml.contains(r#"<si><t>Hello</t></si><si><t xml:space="preserve"> World</t></si>"#));
    }
}
