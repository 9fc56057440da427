//! The format-independent package assembler.
//!
//! [`OfficePackage`] owns the part registry and the relationship graph of one
//! document. Per-format adapters register parts with producer callbacks
//! while the caller authors content; [`OfficePackage::generate`] then runs
//! the single generation pass:
//!
//! 1. every extension's `before_gen` hook, then every `before_gen_final`;
//! 2. [`DocumentModel::prepare`] rebuilds derived tables in a fresh
//!    [`GenerationContext`];
//! 3. every part producer runs, in registration order;
//! 4. the manifest and relationship parts are built and everything is
//!    streamed to the archive.
//!
//! All part bytes exist before the first byte reaches the sink, so a failing
//! producer leaves the sink untouched.

use crate::common::xml::SerializeOptions;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::content_types::ContentTypesItem;
use crate::ooxml::opc::context::GenerationContext;
use crate::ooxml::opc::error::OpcError;
use crate::ooxml::opc::packuri::{PACKAGE_URI, PackURI};
use crate::ooxml::opc::part::{Lifecycle, Part};
use crate::ooxml::opc::phys_pkg::{ArchiveWriter, PhysPkgWriter};
use crate::ooxml::opc::pkgwriter::{PackageWriter, ProducedPart};
use crate::ooxml::opc::rel::Relationships;
use log::debug;
use std::io::{Seek, Write};

/// The document model behind a package.
pub trait DocumentModel {
    /// Rebuild derived, document-wide tables for one generation pass.
    fn prepare(&self, _ctx: &mut GenerationContext) -> Result<()> {
        Ok(())
    }
}

/// Hook into generation, e.g. to contribute parts of a custom vocabulary.
pub trait Extension<D> {
    /// Name used in error reports.
    fn name(&self) -> &str;

    fn before_gen(&mut self, _doc: &D, _ctx: &mut GenerationContext) -> Result<()> {
        Ok(())
    }

    /// Runs after every extension's `before_gen`.
    fn before_gen_final(&mut self, _doc: &D, _ctx: &mut GenerationContext) -> Result<()> {
        Ok(())
    }
}

/// Observer of a generation pass.
///
/// Exactly one of the two methods is called per `generate_with` call.
pub trait GenerateListener {
    fn finalize(&mut self, bytes_written: u64);

    fn error(&mut self, error: &OoxmlError);
}

/// Outcome of a successful generation pass.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSummary {
    /// Bytes written to the sink.
    pub bytes_written: u64,
    /// Part names in the order they were written, manifest and `.rels` parts excluded.
    pub parts: Vec<String>,
}

/// Part registry and relationship graph of one document.
pub struct OfficePackage<D> {
    parts: Vec<Part<D>>,
    rels: Relationships,
    extensions: Vec<Box<dyn Extension<D>>>,
    options: SerializeOptions,
}

impl<D: DocumentModel> Default for OfficePackage<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: DocumentModel> OfficePackage<D> {
    pub fn new() -> Self {
        Self {
            parts: Vec::new(),
            rels: Relationships::new(),
            extensions: Vec::new(),
            options: SerializeOptions::default(),
        }
    }

    /// Register a part with the callback that produces its bytes.
    pub fn register_part<F>(
        &mut self,
        partname: &str,
        content_type: &str,
        lifecycle: Lifecycle,
        producer: F,
    ) -> Result<PackURI>
    where
        F: Fn(&D, &mut GenerationContext) -> Result<Vec<u8>> + 'static,
    {
        let partname = PackURI::new(partname)?;
        if self.parts.iter().any(|p| *p.partname() == partname) {
            return Err(OpcError::DuplicatePart(partname.to_string()).into());
        }
        debug!("registering part {} ({:?})", partname, lifecycle);
        self.parts.push(Part::new(
            partname.clone(),
            content_type.to_string(),
            lifecycle,
            Box::new(producer),
        ));
        Ok(partname)
    }

    /// Register a part whose bytes are fixed at registration time.
    pub fn register_blob(
        &mut self,
        partname: &str,
        content_type: &str,
        lifecycle: Lifecycle,
        blob: Vec<u8>,
    ) -> Result<PackURI> {
        self.register_part(partname, content_type, lifecycle, move |_, _| Ok(blob.clone()))
    }

    fn part_mut(&mut self, partname: &str) -> Result<&mut Part<D>> {
        self.parts
            .iter_mut()
            .find(|p| p.partname().as_str() == partname)
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()).into())
    }

    /// Relate `source` to the part `target`, reusing an identical relationship.
    ///
    /// Both are absolute part names; the stored target is relative to the
    /// source's directory.
    pub fn relate(&mut self, source: &str, reltype: &str, target: &str) -> Result<String> {
        let target = PackURI::new(target)?;
        let part = self.part_mut(source)?;
        let target_ref = target.relative_ref(part.partname().base_uri());
        Ok(part.rels_mut().get_or_add(reltype, &target_ref))
    }

    /// Relate `source` to an external URL.
    pub fn relate_external(&mut self, source: &str, reltype: &str, url: &str) -> Result<String> {
        Ok(self.part_mut(source)?.rels_mut().get_or_add_ext_rel(reltype, url))
    }

    /// Relate the package itself to a part.
    pub fn relate_package(&mut self, reltype: &str, target: &str) -> Result<String> {
        let target = PackURI::new(target)?;
        Ok(self.rels.get_or_add(reltype, &target.relative_ref(PACKAGE_URI)))
    }

    pub fn add_extension(&mut self, extension: Box<dyn Extension<D>>) {
        self.extensions.push(extension);
    }

    pub fn set_serialize_options(&mut self, options: SerializeOptions) {
        self.options = options;
    }

    pub fn serialize_options(&self) -> &SerializeOptions {
        &self.options
    }

    pub fn part(&self, partname: &str) -> Option<&Part<D>> {
        self.parts.iter().find(|p| p.partname().as_str() == partname)
    }

    pub fn parts(&self) -> impl Iterator<Item = &Part<D>> {
        self.parts.iter()
    }

    /// Package-level relationships.
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    /// Generate the package as a ZIP archive into `sink`.
    pub fn generate<W: Write + Seek>(&mut self, doc: &D, sink: W) -> Result<GenerateSummary> {
        let produced = self.produce(doc)?;
        let archive = PhysPkgWriter::new(sink)?;
        Self::emit(archive, produced, &self.options)
    }

    /// Like [`generate`](Self::generate), reporting the outcome to `listener`.
    pub fn generate_with<W: Write + Seek>(
        &mut self,
        doc: &D,
        sink: W,
        listener: &mut dyn GenerateListener,
    ) -> Result<GenerateSummary> {
        let result = self.generate(doc, sink);
        notify(listener, &result);
        result
    }

    /// Generate into a sink that cannot seek, e.g. stdout or a response body.
    pub fn generate_stream<W: Write>(&mut self, doc: &D, sink: W) -> Result<GenerateSummary> {
        let produced = self.produce(doc)?;
        Self::emit(PhysPkgWriter::streaming(sink), produced, &self.options)
    }

    /// Like [`generate_stream`](Self::generate_stream), reporting the outcome to `listener`.
    pub fn generate_stream_with<W: Write>(
        &mut self,
        doc: &D,
        sink: W,
        listener: &mut dyn GenerateListener,
    ) -> Result<GenerateSummary> {
        let result = self.generate_stream(doc, sink);
        notify(listener, &result);
        result
    }

    /// Generate into an arbitrary archive writer.
    pub fn generate_into<A: ArchiveWriter>(&mut self, doc: &D, archive: A) -> Result<GenerateSummary> {
        let produced = self.produce(doc)?;
        Self::emit(archive, produced, &self.options)
    }

    fn emit<A: ArchiveWriter>(
        archive: A,
        produced: ProducedPackage,
        options: &SerializeOptions,
    ) -> Result<GenerateSummary> {
        let parts = produced
            .parts
            .iter()
            .map(|p| p.partname.to_string())
            .collect();
        let bytes_written = PackageWriter::write(
            archive,
            &produced.content_types,
            &produced.pkg_rels,
            &produced.parts,
            options,
        )?;
        debug!("package written: {} bytes", bytes_written);
        Ok(GenerateSummary {
            bytes_written,
            parts,
        })
    }

    fn produce(&mut self, doc: &D) -> Result<ProducedPackage> {
        let mut ctx = GenerationContext::new(self.options.clone());

        for extension in self.extensions.iter_mut() {
            extension
                .before_gen(doc, &mut ctx)
                .map_err(|e| extension_error(extension.name(), e))?;
        }
        for extension in self.extensions.iter_mut() {
            extension
                .before_gen_final(doc, &mut ctx)
                .map_err(|e| extension_error(extension.name(), e))?;
        }

        doc.prepare(&mut ctx)?;

        let mut content_types = ContentTypesItem::new();
        let mut produced = Vec::with_capacity(self.parts.len() + ctx.contributed_parts().len());
        for part in &self.parts {
            debug!("producing {}", part.partname());
            let blob = part
                .produce(doc, &mut ctx)
                .map_err(|e| OoxmlError::Producer {
                    part: part.partname().to_string(),
                    source: Box::new(e),
                })?;
            content_types.add_content_type(part.partname(), part.content_type());
            produced.push(ProducedPart {
                partname: part.partname().clone(),
                blob,
                rels: Some(part.rels().clone()),
            });
        }

        let mut pkg_rels = self.rels.clone();
        for (reltype, target) in ctx.package_rels() {
            pkg_rels.get_or_add(reltype, &target.relative_ref(PACKAGE_URI));
        }
        for contributed in ctx.contributed_parts() {
            if produced.iter().any(|p| p.partname == contributed.partname) {
                return Err(OpcError::DuplicatePart(contributed.partname.to_string()).into());
            }
            debug!("adding contributed part {} ({:?})", contributed.partname, Lifecycle::Generate);
            content_types.add_content_type(&contributed.partname, &contributed.content_type);
            produced.push(ProducedPart {
                partname: contributed.partname.clone(),
                blob: contributed.blob.clone(),
                rels: None,
            });
        }

        Ok(ProducedPackage {
            content_types,
            pkg_rels,
            parts: produced,
        })
    }
}

struct ProducedPackage {
    content_types: ContentTypesItem,
    pkg_rels: Relationships,
    parts: Vec<ProducedPart>,
}

fn notify(listener: &mut dyn GenerateListener, result: &Result<GenerateSummary>) {
    match result {
        Ok(summary) => listener.finalize(summary.bytes_written),
        Err(err) => listener.error(err),
    }
}

fn extension_error(name: &str, source: OoxmlError) -> OoxmlError {
    OoxmlError::Extension {
        name: name.to_string(),
        source: Box::new(source),
    }
}
