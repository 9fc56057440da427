/// Open Packaging Conventions (OPC) assembly.
///
/// This module builds the container every OOXML file shares: the part
/// registry, relationship files, the `[Content_Types].xml` manifest and the
/// ZIP archive. It knows nothing about any particular document vocabulary;
/// the per-format adapters register parts with producer callbacks and the
/// [`OfficePackage`] runs them on `generate`.
pub mod constants;
pub mod content_types;
pub mod context;
pub mod error;
pub mod package;
pub mod packuri;
pub mod part;
pub mod phys_pkg;
pub mod pkgwriter;
pub mod rel;

pub use context::{GenerationContext, SharedStringTable};
pub use error::{OpcError, Result};
pub use package::{DocumentModel, Extension, GenerateListener, GenerateSummary, OfficePackage};
pub use packuri::PackURI;
pub use part::{Lifecycle, Part};
pub use phys_pkg::{ArchiveWriter, PhysPkgWriter};
pub use rel::{Relationship, Relationships};
