//! Package writer: streams produced parts into an archive in package order.
//!
//! Order is `[Content_Types].xml`, `_rels/.rels`, then every part followed
//! by its own `.rels` part when it has relationships.

use crate::common::xml::{SerializeOptions, to_xml_bytes};
use crate::ooxml::opc::content_types::ContentTypesItem;
use crate::ooxml::opc::error::Result;
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PACKAGE_URI, PackURI};
use crate::ooxml::opc::phys_pkg::ArchiveWriter;
use crate::ooxml::opc::rel::Relationships;

/// A part whose bytes are already produced.
#[derive(Debug, Clone)]
pub struct ProducedPart {
    pub partname: PackURI,
    pub blob: Vec<u8>,
    pub rels: Option<Relationships>,
}

/// Writes a fully produced package.
pub struct PackageWriter;

impl PackageWriter {
    /// Write everything and close the archive; returns total bytes written.
    pub fn write<A: ArchiveWriter>(
        mut archive: A,
        content_types: &ContentTypesItem,
        pkg_rels: &Relationships,
        parts: &[ProducedPart],
        options: &SerializeOptions,
    ) -> Result<u64> {
        Self::write_content_types(&mut archive, content_types, options)?;
        Self::write_pkg_rels(&mut archive, pkg_rels, options)?;
        Self::write_parts(&mut archive, parts, options)?;
        archive.finish()
    }

    fn write_content_types<A: ArchiveWriter>(
        archive: &mut A,
        content_types: &ContentTypesItem,
        options: &SerializeOptions,
    ) -> Result<()> {
        let uri = PackURI::new(CONTENT_TYPES_URI)?;
        archive.add_entry(&uri, &to_xml_bytes(&content_types.to_element(), options))
    }

    fn write_pkg_rels<A: ArchiveWriter>(
        archive: &mut A,
        pkg_rels: &Relationships,
        options: &SerializeOptions,
    ) -> Result<()> {
        let rels_uri = PackURI::new(PACKAGE_URI)?.rels_uri()?;
        archive.add_entry(&rels_uri, &to_xml_bytes(&pkg_rels.to_element(), options))
    }

    fn write_parts<A: ArchiveWriter>(
        archive: &mut A,
        parts: &[ProducedPart],
        options: &SerializeOptions,
    ) -> Result<()> {
        for part in parts {
            archive.add_entry(&part.partname, &part.blob)?;

            if let Some(rels) = part.rels.as_ref().filter(|r| !r.is_empty()) {
                let rels_uri = part.partname.rels_uri()?;
                archive.add_entry(&rels_uri, &to_xml_bytes(&rels.to_element(), options))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::relationship_type as rt;

    #[derive(Default)]
    struct Recorder {
        names: Vec<String>,
    }

    impl ArchiveWriter for &mut Recorder {
        fn add_entry(&mut self, pack_uri: &PackURI, _blob: &[u8]) -> Result<()> {
            self.names.push(pack_uri.membername().to_string());
            Ok(())
        }

        fn finish(self) -> Result<u64> {
            Ok(self.names.len() as u64)
        }
    }

    #[test]
    fn test_entry_order() {
        let mut rels = Relationships::new();
        rels.add(rt::CHART, "charts/chart1.xml");
        let parts = vec![
            ProducedPart {
                partname: PackURI::new("/word/document.xml").unwrap(),
                blob: Vec::new(),
                rels: Some(rels),
            },
            ProducedPart {
                partname: PackURI::new("/word/styles.xml").unwrap(),
                blob: Vec::new(),
                rels: Some(Relationships::new()),
            },
        ];

        let mut recorder = Recorder::default();
        let count = PackageWriter::write(
            &mut recorder,
            &ContentTypesItem::new(),
            &Relationships::new(),
            &parts,
            &SerializeOptions::default(),
        )
        .unwrap();

        assert_eq!(count, 5);
        assert_eq!(
            recorder.names,
            [
                "[Content_Types].xml",
                "_rels/.rels",
                "word/document.xml",
                "word/_rels/document.xml.rels",
                "word/styles.xml",
            ]
        );
    }
}
