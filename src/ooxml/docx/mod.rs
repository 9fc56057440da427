/// Word (.docx) document generation.
///
/// The module is organized around these key types:
/// - `Docx`: the document being authored and its package
/// - `ParagraphMut`: handle for adding runs, links, pictures and bookmarks
/// - `Block`: a top-level body item (paragraph, page break, table, chart)
///
/// # Example
///
/// ```rust
/// use ooxmlgen::ooxml::common::table::{TableCell, TableOptions};
/// use ooxmlgen::ooxml::docx::{Docx, ParagraphOptions, TextOptions};
///
/// let mut docx = Docx::new()?;
/// docx.create_p(ParagraphOptions::default())
///     .add_text("See ", TextOptions::default())?
///     .add_text("the site", TextOptions::link("https://example.com"))?;
/// docx.put_page_break();
/// docx.create_table(
///     vec![vec![TableCell::from("Name"), TableCell::from("Score")], vec!["Ann".into(), 9.5.into()]],
///     TableOptions::default(),
/// );
/// let bytes = docx.to_bytes()?;
/// assert!(!bytes.is_empty());
/// # Ok::<(), ooxmlgen::OoxmlError>(())
/// ```
pub mod document;
pub mod paragraph;
pub mod writer;

pub use document::{Block, DEFAULT_CHART_SIZE, DOCUMENT_PART, Docx, DocxModel, PageSetup};
pub use paragraph::{Inline, Paragraph, ParagraphMut, ParagraphOptions, TextOptions};
