//! Physical package writer: the ZIP container.

use crate::ooxml::opc::error::Result;
use crate::ooxml::opc::packuri::PackURI;
use std::io::{Seek, SeekFrom, Write};
use zip::write::{SimpleFileOptions, StreamWriter};
use zip::{CompressionMethod, ZipWriter};

/// Sink for named package entries.
///
/// Entries arrive in the final package order; `finish` closes the container
/// and reports how many bytes reached the underlying output.
pub trait ArchiveWriter {
    fn add_entry(&mut self, pack_uri: &PackURI, blob: &[u8]) -> Result<()>;

    fn finish(self) -> Result<u64>
    where
        Self: Sized;
}

/// [`ArchiveWriter`] backed by the `zip` crate.
pub struct PhysPkgWriter<W: Write + Seek> {
    archive: ZipWriter<W>,
    start: u64,
}

impl<W: Write + Seek> PhysPkgWriter<W> {
    /// Start a ZIP container at the sink's current position.
    pub fn new(mut sink: W) -> Result<Self> {
        let start = sink.stream_position()?;
        Ok(Self {
            archive: ZipWriter::new(sink),
            start,
        })
    }

    fn options() -> SimpleFileOptions {
        SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
    }
}

impl<W: Write> PhysPkgWriter<StreamWriter<W>> {
    /// Start a ZIP container on a sink that cannot seek, such as a pipe.
    ///
    /// Entries carry data descriptors instead of patched local headers; the
    /// byte count comes from the wrapper.
    pub fn streaming(sink: W) -> Self {
        Self {
            archive: ZipWriter::new_stream(sink),
            start: 0,
        }
    }
}

impl<W: Write + Seek> ArchiveWriter for PhysPkgWriter<W> {
    fn add_entry(&mut self, pack_uri: &PackURI, blob: &[u8]) -> Result<()> {
        self.archive.start_file(pack_uri.membername(), Self::options())?;
        self.archive.write_all(blob)?;
        Ok(())
    }

    fn finish(self) -> Result<u64> {
        let mut sink = self.archive.finish()?;
        let end = sink.seek(SeekFrom::End(0))?;
        sink.flush()?;
        Ok(end.saturating_sub(self.start))
    }
}
