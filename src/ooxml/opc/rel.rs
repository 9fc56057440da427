//! Relationships from one source (a part or the package) to its targets.

use crate::common::xml::Element;
use crate::ooxml::opc::constants::{namespace, target_mode};

/// A single relationship from a source part to a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    r_id: String,
    reltype: String,
    target_ref: String,
    is_external: bool,
}

impl Relationship {
    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    /// Relative part reference, or an absolute URL for external targets.
    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    #[inline]
    pub fn is_external(&self) -> bool {
        self.is_external
    }
}

/// Ordered relationship collection of one source.
///
/// IDs are `rId1`, `rId2`, ... in the order relationships are added and
/// are never reused, so an ID handed out while authoring stays valid for
/// every later `generate` call.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    rels: Vec<Relationship>,
    next_id: u32,
}

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, reltype: &str, target_ref: &str, is_external: bool) -> &Relationship {
        self.next_id += 1;
        self.rels.push(Relationship {
            r_id: format!("rId{}", self.next_id),
            reltype: reltype.to_string(),
            target_ref: target_ref.to_string(),
            is_external,
        });
        &self.rels[self.rels.len() - 1]
    }

    /// Add a relationship unconditionally and return its ID.
    pub fn add(&mut self, reltype: &str, target_ref: &str) -> String {
        self.push(reltype, target_ref, false).r_id.clone()
    }

    /// Return the ID of an existing internal relationship with the same type
    /// and target, adding one when there is none.
    pub fn get_or_add(&mut self, reltype: &str, target_ref: &str) -> String {
        if let Some(rel) = self
            .rels
            .iter()
            .find(|r| !r.is_external && r.reltype == reltype && r.target_ref == target_ref)
        {
            return rel.r_id.clone();
        }
        self.add(reltype, target_ref)
    }

    /// Same as [`get_or_add`](Self::get_or_add) for external targets.
    pub fn get_or_add_ext_rel(&mut self, reltype: &str, target_ref: &str) -> String {
        if let Some(rel) = self
            .rels
            .iter()
            .find(|r| r.is_external && r.reltype == reltype && r.target_ref == target_ref)
        {
            return rel.r_id.clone();
        }
        self.push(reltype, target_ref, true).r_id.clone()
    }

    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.iter().find(|r| r.r_id == r_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }

    pub fn len(&self) -> usize {
        self.rels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    /// Build the `<Relationships>` tree for the `.rels` part.
    pub fn to_element(&self) -> Element {
        Element::new("Relationships")
            .attr("xmlns", namespace::OPC_RELATIONSHIPS)
            .children_from(self.rels.iter().map(|rel| {
                let el = Element::new("Relationship")
                    .attr("Id", rel.r_id.as_str())
                    .attr("Type", rel.reltype.as_str())
                    .attr("Target", rel.target_ref.as_str());
                if rel.is_external {
                    el.attr("TargetMode", target_mode::EXTERNAL)
                } else {
                    el
                }
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::xml::{SerializeOptions, to_xml_string};
    use crate::ooxml::opc::constants::relationship_type as rt;

    #[test]
    fn test_ids_are_monotonic() {
        let mut rels = Relationships::new();
        assert_eq!(rels.add(rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml"), "rId1");
        assert_eq!(rels.add(rt::CHART, "../charts/chart1.xml"), "rId2");
        assert_eq!(rels.add(rt::CHART, "../charts/chart2.xml"), "rId3");
    }

    #[test]
    fn test_get_or_add_reuses_matching_target() {
        let mut rels = Relationships::new();
        let first = rels.get_or_add(rt::IMAGE, "media/image1.png");
        let again = rels.get_or_add(rt::IMAGE, "media/image1.png");
        let link = rels.get_or_add_ext_rel(rt::HYPERLINK, "https://example.com");
        assert_eq!(first, again);
        assert_eq!(link, "rId2");
        assert_eq!(rels.len(), 2);
        assert!(rels.get("rId2").is_some_and(|r| r.is_external()));
    }

    #[test]
    fn test_to_element() {
        let mut rels = Relationships::new();
        rels.add(rt::PACKAGE, "../embeddings/Microsoft_Excel_Sheet1.xlsx");
        rels.get_or_add_ext_rel(rt::HYPERLINK, "https://example.com/?a=1&b=2");
        let xml = to_xml_string(&rels.to_element(), &SerializeOptions::fragment());
        assert!(xml.contains(r#"Id="rId1""#));
        assert!(xml.contains(r#"Target="../embeddings/Microsoft_Excel_Sheet1.xlsx""#));
        assert!(xml.contains(r#"Target="https://example.com/?a=1&amp;b=2" TargetMode="External""#));
    }
}
