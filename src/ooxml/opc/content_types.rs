//! The `[Content_Types].xml` manifest.

use crate::common::xml::Element;
use crate::ooxml::opc::constants::{content_type as ct, namespace};
use crate::ooxml::opc::packuri::PackURI;

/// Builder for `[Content_Types].xml`.
///
/// XML parts get an `Override` each, in the order they are added; binary
/// parts (media, embedded workbooks) are covered by a `Default` for their
/// extension unless another content type already claimed it.
#[derive(Debug, Clone)]
pub struct ContentTypesItem {
    defaults: Vec<(String, String)>,
    overrides: Vec<(String, String)>,
}

impl Default for ContentTypesItem {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentTypesItem {
    pub fn new() -> Self {
        Self {
            defaults: vec![
                ("rels".to_string(), ct::OPC_RELATIONSHIPS.to_string()),
                ("xml".to_string(), ct::XML.to_string()),
            ],
            overrides: Vec::new(),
        }
    }

    /// Declare the content type of one part.
    pub fn add_content_type(&mut self, partname: &PackURI, content_type: &str) {
        let ext = partname.ext().to_ascii_lowercase();
        match self.defaults.iter().find(|(e, _)| *e == ext) {
            Some((_, existing)) if existing == content_type => {},
            None if !ext.is_empty() && !ct::is_xml(content_type) => {
                self.defaults.push((ext, content_type.to_string()));
            },
            _ => self
                .overrides
                .push((partname.to_string(), content_type.to_string())),
        }
    }

    pub fn defaults(&self) -> &[(String, String)] {
        &self.defaults
    }

    pub fn overrides(&self) -> &[(String, String)] {
        &self.overrides
    }

    /// Build the `<Types>` tree.
    pub fn to_element(&self) -> Element {
        Element::new("Types")
            .attr("xmlns", namespace::OPC_CONTENT_TYPES)
            .children_from(self.defaults.iter().map(|(ext, ct)| {
                Element::new("Default")
                    .attr("Extension", ext.as_str())
                    .attr("ContentType", ct.as_str())
            }))
            .children_from(self.overrides.iter().map(|(partname, ct)| {
                Element::new("Override")
                    .attr("PartName", partname.as_str())
                    .attr("ContentType", ct.as_str())
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::xml::{SerializeOptions, to_xml_string};

    fn uri(s: &str) -> PackURI {
        PackURI::new(s).unwrap()
    }

    #[test]
    fn test_xml_parts_get_overrides() {
        let mut cti = ContentTypesItem::new();
        cti.add_content_type(&uri("/word/document.xml"), ct::WML_DOCUMENT_MAIN);
        cti.add_content_type(&uri("/word/charts/chart1.xml"), ct::DML_CHART);
        assert_eq!(cti.overrides().len(), 2);
        assert_eq!(cti.overrides()[1].0, "/word/charts/chart1.xml");
    }

    #[test]
    fn test_binary_parts_share_a_default() {
        let mut cti = ContentTypesItem::new();
        cti.add_content_type(&uri("/ppt/media/image1.png"), ct::PNG);
        cti.add_content_type(&uri("/ppt/media/image2.png"), ct::PNG);
        cti.add_content_type(&uri("/ppt/embeddings/Microsoft_Excel_Sheet1.xlsx"), ct::SML_SHEET);
        assert!(cti.overrides().is_empty());
        assert_eq!(cti.defaults().len(), 4);
    }

    #[test]
    fn test_to_element() {
        let mut cti = ContentTypesItem::new();
        cti.add_content_type(&uri("/xl/workbook.xml"), ct::SML_SHEET_MAIN);
        let xml = to_xml_string(&cti.to_element(), &SerializeOptions::fragment());
        assert!(xml.starts_with(r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#));
        assert!(xml.contains(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#));
        assert!(xml.contains(r#"<Override PartName="/xl/workbook.xml""#));
    }
}
