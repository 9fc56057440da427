//! Helpers shared by the integration tests: unpacking generated packages
//! and checking their XML with quick-xml.
#![allow(dead_code)]

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;
use std::collections::BTreeMap;
use std::io::{Cursor, Read};

/// All entries of a ZIP archive, keyed by entry name.
pub fn unzip(bytes: &[u8]) -> BTreeMap<String, Vec<u8>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("valid zip archive");
    let mut entries = BTreeMap::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).expect("readable entry");
        let mut data = Vec::new();
        file.read_to_end(&mut data).expect("entry data");
        entries.insert(file.name().to_string(), data);
    }
    entries
}

/// Text of one entry.
pub fn entry(entries: &BTreeMap<String, Vec<u8>>, name: &str) -> String {
    let data = entries
        .get(name)
        .unwrap_or_else(|| panic!("missing entry {}", name));
    String::from_utf8(data.clone()).expect("utf-8 entry")
}

/// Parse `xml` to the end, panicking on malformed markup or an element
/// whose prefix is not bound to a namespace.
pub fn assert_well_formed(name: &str, xml: &str) {
    let mut reader = NsReader::from_str(xml);
    loop {
        match reader.read_resolved_event() {
            Ok((ResolveResult::Unknown(prefix), Event::Start(e) | Event::Empty(e))) => panic!(
                "{}: element {} uses unbound prefix {}",
                name,
                String::from_utf8_lossy(e.name().as_ref()),
                String::from_utf8_lossy(&prefix)
            ),
            Ok((_, Event::Eof)) => break,
            Ok(_) => {},
            Err(err) => panic!("{}: malformed XML at {}: {}", name, reader.buffer_position(), err),
        }
    }
}

/// Check every XML entry (`.xml` and `.rels`) of a package.
pub fn assert_package_well_formed(entries: &BTreeMap<String, Vec<u8>>) {
    for name in entries.keys() {
        if name.ends_with(".xml") || name.ends_with(".rels") {
            assert_well_formed(name, &entry(entries, name));
        }
    }
}

fn attributes(e: &BytesStart<'_>) -> BTreeMap<String, String> {
    e.attributes()
        .map(|a| {
            let a = a.expect("attribute");
            (
                String::from_utf8_lossy(a.key.as_ref()).into_owned(),
                String::from_utf8_lossy(&a.value).into_owned(),
            )
        })
        .collect()
}

/// Attributes of every element named `element`, in document order.
pub fn elements(xml: &str, element: &str) -> Vec<BTreeMap<String, String>> {
    let mut reader = quick_xml::Reader::from_str(xml);
    let mut found = Vec::new();
    loop {
        match reader.read_event().expect("well-formed XML") {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == element.as_bytes() => {
                found.push(attributes(&e));
            },
            Event::Eof => break,
            _ => {},
        }
    }
    found
}

/// `attr` of the first element named `element`.
pub fn first_attr(xml: &str, element: &str, attr: &str) -> Option<String> {
    elements(xml, element)
        .into_iter()
        .next()
        .and_then(|mut attrs| attrs.remove(attr))
}

/// Check that `[Content_Types].xml` declares exactly the entries present.
///
/// Every entry must be covered by an `Override` or a `Default` extension,
/// and every `Override` must name an entry.
pub fn assert_manifest_matches(entries: &BTreeMap<String, Vec<u8>>) {
    let manifest = entry(entries, "[Content_Types].xml");
    let defaults: Vec<String> = elements(&manifest, "Default")
        .into_iter()
        .filter_map(|mut a| a.remove("Extension"))
        .collect();
    let overrides: Vec<String> = elements(&manifest, "Override")
        .into_iter()
        .filter_map(|mut a| a.remove("PartName"))
        .collect();

    for part in &overrides {
        assert!(
            entries.contains_key(part.trim_start_matches('/')),
            "override for missing part {}",
            part
        );
    }
    for name in entries.keys().filter(|n| *n != "[Content_Types].xml") {
        let overridden = overrides.iter().any(|p| p.trim_start_matches('/') == name);
        let ext = name.rsplit('.').next().unwrap_or_default();
        assert!(
            overridden || defaults.iter().any(|d| d.eq_ignore_ascii_case(ext)),
            "entry {} has no content type",
            name
        );
    }
}

/// Targets of the relationships in a `.rels` entry, keyed by id.
pub fn rel_targets(entries: &BTreeMap<String, Vec<u8>>, rels: &str) -> BTreeMap<String, String> {
    elements(&entry(entries, rels), "Relationship")
        .into_iter()
        .map(|mut a| {
            (
                a.remove("Id").expect("Id"),
                a.remove("Target").expect("Target"),
            )
        })
        .collect()
}
