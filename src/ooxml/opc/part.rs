//! Registered package parts.

use crate::ooxml::error::Result;
use crate::ooxml::opc::context::GenerationContext;
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::opc::rel::Relationships;

/// When a part enters the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// Registered when the document type is set up (styles, theme, ...).
    Type,
    /// Registered per page, chart or media item as the caller adds content.
    Data,
    /// Contributed during a single `generate` call and dropped afterwards.
    Generate,
}

/// Callback producing the bytes of one part from the document model.
pub type Producer<D> = Box<dyn Fn(&D, &mut GenerationContext) -> Result<Vec<u8>>>;

/// One entry of the package part registry.
pub struct Part<D> {
    partname: PackURI,
    content_type: String,
    lifecycle: Lifecycle,
    producer: Producer<D>,
    rels: Relationships,
}

impl<D> Part<D> {
    pub(crate) fn new(
        partname: PackURI,
        content_type: String,
        lifecycle: Lifecycle,
        producer: Producer<D>,
    ) -> Self {
        Self {
            partname,
            content_type,
            lifecycle,
            producer,
            rels: Relationships::new(),
        }
    }

    #[inline]
    pub fn partname(&self) -> &PackURI {
        &self.partname
    }

    #[inline]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    #[inline]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Relationships whose source is this part.
    #[inline]
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    #[inline]
    pub(crate) fn rels_mut(&mut self) -> &mut Relationships {
        &mut self.rels
    }

    /// Run the producer.
    pub(crate) fn produce(&self, doc: &D, ctx: &mut GenerationContext) -> Result<Vec<u8>> {
        (self.producer)(doc, ctx)
    }
}

impl<D> std::fmt::Debug for Part<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Part")
            .field("partname", &self.partname)
            .field("content_type", &self.content_type)
            .field("lifecycle", &self.lifecycle)
            .field("rels", &self.rels.len())
            .finish()
    }
}
