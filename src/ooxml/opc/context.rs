//! Per-call generation state.
//!
//! A fresh [`GenerationContext`] is created for every `generate` call and
//! threaded through extension hooks, document preparation and every part
//! producer. Nothing derived during generation is stored on the document.

use crate::common::xml::{Element, SerializeOptions, to_xml_bytes};
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use std::collections::HashMap;

/// Deduplicated string pool referenced by index from spreadsheet cells.
///
/// Indices follow first-seen order. Every call to [`add`](Self::add) counts
/// as one reference, which is what `sst/@count` reports.
#[derive(Debug, Clone, Default)]
pub struct SharedStringTable {
    strings: Vec<String>,
    index: HashMap<String, usize>,
    cells: HashMap<(usize, u32, u32), usize>,
    count: usize,
}

impl SharedStringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one reference to `text` and return its index.
    pub fn add(&mut self, text: &str) -> usize {
        self.count += 1;
        if let Some(&idx) = self.index.get(text) {
            return idx;
        }
        let idx = self.strings.len();
        self.strings.push(text.to_string());
        self.index.insert(text.to_string(), idx);
        idx
    }

    /// Add a reference from the cell at (`sheet`, `row`, `col`).
    pub fn add_cell(&mut self, sheet: usize, row: u32, col: u32, text: &str) -> usize {
        let idx = self.add(text);
        self.cells.insert((sheet, row, col), idx);
        idx
    }

    /// Index recorded for a cell by [`add_cell`](Self::add_cell).
    pub fn cell(&self, sheet: usize, row: u32, col: u32) -> Option<usize> {
        self.cells.get(&(sheet, row, col)).copied()
    }

    pub fn get(&self, text: &str) -> Option<usize> {
        self.index.get(text).copied()
    }

    /// Total number of references.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Number of distinct strings.
    pub fn unique_count(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.strings.iter().map(String::as_str)
    }
}

/// A part added by an extension for one `generate` call.
#[derive(Debug, Clone)]
pub struct ContributedPart {
    pub partname: PackURI,
    pub content_type: String,
    pub blob: Vec<u8>,
}

/// State for one `generate` call.
#[derive(Debug)]
pub struct GenerationContext {
    options: SerializeOptions,
    shared_strings: SharedStringTable,
    contributed: Vec<ContributedPart>,
    package_rels: Vec<(String, PackURI)>,
}

impl GenerationContext {
    pub fn new(options: SerializeOptions) -> Self {
        Self {
            options,
            shared_strings: SharedStringTable::new(),
            contributed: Vec::new(),
            package_rels: Vec::new(),
        }
    }

    pub fn options(&self) -> &SerializeOptions {
        &self.options
    }

    /// Serialize a tree with this call's options.
    pub fn serialize(&self, root: &Element) -> Vec<u8> {
        to_xml_bytes(root, &self.options)
    }

    pub fn shared_strings(&self) -> &SharedStringTable {
        &self.shared_strings
    }

    pub fn shared_strings_mut(&mut self) -> &mut SharedStringTable {
        &mut self.shared_strings
    }

    /// Add a part for this call only.
    pub fn add_part(&mut self, partname: &str, content_type: &str, blob: Vec<u8>) -> Result<()> {
        let partname = PackURI::new(partname)?;
        if self.contributed.iter().any(|p| p.partname == partname) {
            return Err(OpcError::DuplicatePart(partname.to_string()));
        }
        self.contributed.push(ContributedPart {
            partname,
            content_type: content_type.to_string(),
            blob,
        });
        Ok(())
    }

    /// Relate the package to a part for this call only.
    pub fn relate_package(&mut self, reltype: &str, partname: &str) -> Result<()> {
        self.package_rels
            .push((reltype.to_string(), PackURI::new(partname)?));
        Ok(())
    }

    pub fn contributed_parts(&self) -> &[ContributedPart] {
        &self.contributed
    }

    pub fn package_rels(&self) -> &[(String, PackURI)] {
        &self.package_rels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_strings_first_seen_order() {
        let mut sst = SharedStringTable::new();
        assert_eq!(sst.add("Income"), 0);
        assert_eq!(sst.add("Expense"), 1);
        assert_eq!(sst.add("Income"), 0);
        assert_eq!(sst.unique_count(), 2);
        assert_eq!(sst.count(), 3);
        assert_eq!(sst.iter().collect::<Vec<_>>(), ["Income", "Expense"]);
    }

    #[test]
    fn test_cell_lookup() {
        let mut sst = SharedStringTable::new();
        sst.add_cell(0, 0, 1, "Q1");
        sst.add_cell(1, 4, 0, "Q1");
        assert_eq!(sst.cell(0, 0, 1), Some(0));
        assert_eq!(sst.cell(1, 4, 0), Some(0));
        assert_eq!(sst.cell(1, 0, 0), None);
    }

    #[test]
    fn test_contributed_part_names_unique() {
        let mut ctx = GenerationContext::new(SerializeOptions::default());
        ctx.add_part("/customXml/item1.xml", "application/xml", b"<a/>".to_vec())
            .unwrap();
        assert!(matches!(
            ctx.add_part("/customXml/item1.xml", "application/xml", Vec::new()),
            Err(OpcError::DuplicatePart(_))
        ));
        assert!(ctx.add_part("customXml/item2.xml", "application/xml", Vec::new()).is_err());
    }
}
