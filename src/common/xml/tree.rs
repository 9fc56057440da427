//! XML-shaped object tree.
//!
//! [`Element`] is the intermediate representation every part producer builds
//! before serialization. Attributes and children are kept in insertion order,
//! because element order is significant in the OOXML schemas.
//!
//! Trees can also be decoded from a nested mapping (for example JSON), where
//! keys starting with [`ATTRIBUTE_PREFIX`] are attributes, [`TEXT_KEY`] holds
//! text content, a nested mapping is a single child and a sequence of
//! mappings is a repeated child:
//!
//! ```
//! use ooxmlgen::common::xml::Element;
//!
//! let tree: Element = serde_json::from_str(
//!     r#"{"c:legend": {"c:legendPos": {"@val": "b"}, "c:overlay": {"@val": 0}}}"#,
//! ).unwrap();
//! assert_eq!(tree.name(), "c:legend");
//! assert_eq!(tree.find("c:legendPos").and_then(|e| e.attr_text("val")).as_deref(), Some("b"));
//! ```

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Key prefix marking an attribute in the mapping form of a tree.
pub const ATTRIBUTE_PREFIX: char = '@';

/// Key holding text content in the mapping form of a tree.
pub const TEXT_KEY: &str = "#text";

/// Lookup of the schema child order for an element name.
///
/// Returns the permitted child element names of `parent` in sequence order,
/// or `None` when the parent's children may be appended freely.
pub type ChildOrder = fn(parent: &str) -> Option<&'static [&'static str]>;

/// Child order table that never constrains insertion.
pub fn unordered(_parent: &str) -> Option<&'static [&'static str]> {
    None
}

/// An attribute value or text content.
///
/// `Deferred` values are computed when the tree is serialized, so a producer
/// can place a node whose content depends on data gathered later.
#[derive(Clone)]
pub enum XmlValue {
    Text(String),
    Deferred(Arc<dyn Fn() -> String + Send + Sync>),
}

impl XmlValue {
    /// Create a value computed at serialization time.
    pub fn deferred<F>(f: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        XmlValue::Deferred(Arc::new(f))
    }

    /// Resolve the value, invoking a deferred closure if necessary.
    pub fn resolve(&self) -> Cow<'_, str> {
        match self {
            XmlValue::Text(s) => Cow::Borrowed(s),
            XmlValue::Deferred(f) => Cow::Owned(f()),
        }
    }
}

impl fmt::Debug for XmlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XmlValue::Text(s) => write!(f, "{:?}", s),
            XmlValue::Deferred(_) => f.write_str("<deferred>"),
        }
    }
}

impl PartialEq for XmlValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (XmlValue::Text(a), XmlValue::Text(b)) => a == b,
            (XmlValue::Deferred(a), XmlValue::Deferred(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for XmlValue {
    fn from(s: &str) -> Self {
        XmlValue::Text(s.to_string())
    }
}

impl From<String> for XmlValue {
    fn from(s: String) -> Self {
        XmlValue::Text(s)
    }
}

impl From<&String> for XmlValue {
    fn from(s: &String) -> Self {
        XmlValue::Text(s.clone())
    }
}

impl From<bool> for XmlValue {
    fn from(b: bool) -> Self {
        XmlValue::Text(if b { "1" } else { "0" }.to_string())
    }
}

impl From<f64> for XmlValue {
    fn from(v: f64) -> Self {
        XmlValue::Text(format_number(v))
    }
}

macro_rules! xml_value_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for XmlValue {
            fn from(v: $t) -> Self {
                XmlValue::Text(itoa::Buffer::new().format(v).to_string())
            }
        })*
    };
}

xml_value_from_int!(i32, i64, u8, u16, u32, u64, usize);

/// Format a float the way spreadsheet caches expect: integral values
/// without a fractional part, everything else in shortest round-trip form.
///
/// Non-finite input has no `xsd:double` form; chart and worksheet
/// validation reject it before anything reaches this function.
pub fn format_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        itoa::Buffer::new().format(v as i64).to_string()
    } else {
        ryu::Buffer::new().format(v).to_string()
    }
}

/// An XML element with ordered attributes, ordered children and optional text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, XmlValue)>,
    children: Vec<Element>,
    text: Option<XmlValue>,
}

impl Element {
    /// Create an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Shorthand for the ubiquitous `<x val="..."/>` element.
    pub fn val(name: impl Into<String>, value: impl Into<XmlValue>) -> Self {
        Self::new(name).attr("val", value)
    }

    /// Set an attribute, replacing any previous value with the same key.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<XmlValue>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Append a child element.
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Append a sequence of repeated children, preserving their order.
    pub fn children_from<I: IntoIterator<Item = Element>>(mut self, children: I) -> Self {
        self.children.extend(children);
        self
    }

    /// Append a child when one is given.
    pub fn child_opt(mut self, child: Option<Element>) -> Self {
        if let Some(child) = child {
            self.children.push(child);
        }
        self
    }

    /// Set the text content.
    pub fn text(mut self, text: impl Into<XmlValue>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &[(String, XmlValue)] {
        &self.attributes
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn text_value(&self) -> Option<&XmlValue> {
        self.text.as_ref()
    }

    /// Set an attribute in place.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<XmlValue>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    pub fn set_text(&mut self, text: impl Into<XmlValue>) {
        self.text = Some(text.into());
    }

    /// Get an attribute value.
    pub fn attribute(&self, key: &str) -> Option<&XmlValue> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Get an attribute value resolved to text.
    pub fn attr_text(&self, key: &str) -> Option<String> {
        self.attribute(key).map(|v| v.resolve().into_owned())
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Insert a child at the position the schema order table dictates.
    ///
    /// The child goes before the first existing sibling that the table ranks
    /// after it; siblings of equal rank keep their order, so repeated
    /// elements accumulate in insertion order. Without a table entry for
    /// this element, or for the child's name, the child is appended.
    pub fn insert_ordered(&mut self, child: Element, order: ChildOrder) {
        let Some(sequence) = order(&self.name) else {
            self.children.push(child);
            return;
        };
        let Some(rank) = sequence.iter().position(|n| *n == child.name) else {
            self.children.push(child);
            return;
        };
        let index = self
            .children
            .iter()
            .position(|c| {
                sequence
                    .iter()
                    .position(|n| *n == c.name)
                    .is_some_and(|r| r > rank)
            })
            .unwrap_or(self.children.len());
        self.children.insert(index, child);
    }

    /// First child with the given name.
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.children.iter_mut().find(|c| c.name == name)
    }

    /// First child whose name satisfies `pred`.
    pub fn find_where_mut(&mut self, pred: impl Fn(&str) -> bool) -> Option<&mut Element> {
        self.children.iter_mut().find(|c| pred(&c.name))
    }

    /// Walk a path of child names from this element.
    pub fn find_path(&self, path: &[&str]) -> Option<&Element> {
        path.iter().try_fold(self, |node, name| node.find(name))
    }

    pub fn find_path_mut(&mut self, path: &[&str]) -> Option<&mut Element> {
        let mut node = self;
        for name in path {
            node = node.find_mut(name)?;
        }
        Some(node)
    }

    /// All children with the given name, in document order.
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Remove all children with the given name; returns how many were removed.
    pub fn remove_children(&mut self, name: &str) -> usize {
        let before = self.children.len();
        self.children.retain(|c| c.name != name);
        before - self.children.len()
    }

    /// Merge `overlay` into this element, last applied wins.
    ///
    /// * overlay attributes overwrite attributes with the same key;
    /// * overlay text replaces the text;
    /// * the n-th overlay child named `x` merges into the n-th child named
    ///   `x`; a child with no counterpart is inserted per `order`.
    ///
    /// The overlay's own name is ignored, so callers decide which node it
    /// applies to.
    pub fn merge(&mut self, overlay: &Element, order: ChildOrder) {
        for (key, value) in &overlay.attributes {
            self.set_attr(key.clone(), value.clone());
        }
        if let Some(text) = &overlay.text {
            self.text = Some(text.clone());
        }

        for (i, child) in overlay.children.iter().enumerate() {
            let occurrence = overlay.children[..i]
                .iter()
                .filter(|c| c.name == child.name)
                .count();
            let target = self
                .children
                .iter_mut()
                .filter(|c| c.name == child.name)
                .nth(occurrence);
            match target {
                Some(existing) => existing.merge(child, order),
                None => self.insert_ordered(child.clone(), order),
            }
        }
    }

    /// Return a copy of this element with `overlay` merged in.
    pub fn merged(&self, overlay: &Element, order: ChildOrder) -> Element {
        let mut out = self.clone();
        out.merge(overlay, order);
        out
    }
}

/// Scalar leaf in the mapping form of a tree.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Scalar {
    fn into_value(self) -> XmlValue {
        match self {
            Scalar::Bool(b) => XmlValue::from(b),
            Scalar::Int(i) => XmlValue::from(i),
            Scalar::Float(f) => XmlValue::from(f),
            Scalar::Str(s) => XmlValue::Text(s),
        }
    }
}

/// Body of one element in the mapping form.
#[derive(Deserialize)]
#[serde(untagged)]
enum Body {
    Scalar(Scalar),
    Many(Vec<Body>),
    Map(OrderedMap),
}

/// Mapping that keeps its keys in document order.
struct OrderedMap(Vec<(String, Body)>);

impl<'de> Deserialize<'de> for OrderedMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MapVisitor;

        impl<'de> Visitor<'de> for MapVisitor {
            type Value = OrderedMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an XML-shaped mapping")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<OrderedMap, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, Body>()? {
                    entries.push((key, value));
                }
                Ok(OrderedMap(entries))
            }
        }

        deserializer.deserialize_map(MapVisitor)
    }
}

fn build_element<E: de::Error>(name: String, body: Body) -> Result<Vec<Element>, E> {
    match body {
        Body::Scalar(s) => Ok(vec![Element::new(name).text(s.into_value())]),
        Body::Many(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                if let Body::Many(_) = item {
                    return Err(E::custom(format!("nested sequence under '{}'", name)));
                }
                out.extend(build_element::<E>(name.clone(), item)?);
            }
            Ok(out)
        },
        Body::Map(OrderedMap(entries)) => {
            let mut element = Element::new(name);
            for (key, value) in entries {
                if let Some(attr) = key.strip_prefix(ATTRIBUTE_PREFIX) {
                    match value {
                        Body::Scalar(s) => element.set_attr(attr, s.into_value()),
                        _ => return Err(E::custom(format!("attribute '{}' must be a scalar", key))),
                    }
                } else if key == TEXT_KEY {
                    match value {
                        Body::Scalar(s) => element.set_text(s.into_value()),
                        _ => return Err(E::custom("text content must be a scalar")),
                    }
                } else {
                    for child in build_element::<E>(key, value)? {
                        element.push(child);
                    }
                }
            }
            Ok(vec![element])
        },
    }
}

impl<'de> Deserialize<'de> for Element {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let OrderedMap(mut entries) = OrderedMap::deserialize(deserializer)?;
        if entries.len() != 1 {
            return Err(de::Error::custom(format!(
                "expected a single root element, found {} keys",
                entries.len()
            )));
        }
        let (name, body) = entries.remove(0);
        let mut built = build_element::<D::Error>(name, body)?;
        if built.len() != 1 {
            return Err(de::Error::custom("root element cannot be a sequence"));
        }
        Ok(built.remove(0))
    }
}
