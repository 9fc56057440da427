//! Paragraph content of DOCX documents.
//!
//! A [`Paragraph`] is a sequence of [`Inline`] items. Callers add content
//! through a [`ParagraphMut`] handle, which also registers the package
//! parts and relationships that hyperlinks and pictures need.

use crate::ooxml::common::image::{ImageMetrics, ImageOptions, register_media, resolve_image};
use crate::ooxml::common::table::Align;
use crate::ooxml::docx::document::{DOCUMENT_PART, DocxModel};
use crate::ooxml::error::Result;
use crate::ooxml::opc::OfficePackage;
use crate::ooxml::opc::constants::relationship_type as rt;
use log::{debug, warn};
use serde::Deserialize;

/// Paragraph-level formatting. Lengths are in twentieths of a point.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParagraphOptions {
    pub align: Option<Align>,
    /// Style id, e.g. `Heading1`
    pub style: Option<String>,
    pub indent_left: Option<i64>,
    pub indent_right: Option<i64>,
    /// First-line indent; negative values hang
    pub indent_first_line: Option<i64>,
    pub spacing_before: Option<u32>,
    pub spacing_after: Option<u32>,
    /// Line spacing in 240ths of a line
    pub line_spacing: Option<u32>,
}

impl ParagraphOptions {
    pub fn aligned(align: Align) -> Self {
        Self {
            align: Some(align),
            ..Default::default()
        }
    }

    pub fn styled(style: &str) -> Self {
        Self {
            style: Some(style.to_string()),
            ..Default::default()
        }
    }
}

/// Character formatting of a text run.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextOptions {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// Text color, hex RGB
    pub color: Option<String>,
    pub font_face: Option<String>,
    /// Font size in points
    pub font_size: Option<f64>,
    /// Highlight color name, e.g. `yellow`
    pub highlight: Option<String>,
    /// External link target
    pub hyperlink: Option<String>,
}

impl TextOptions {
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Default::default()
        }
    }

    pub fn link(url: &str) -> Self {
        Self {
            hyperlink: Some(url.to_string()),
            ..Default::default()
        }
    }
}

/// One item of paragraph content.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text {
        text: String,
        options: TextOptions,
        /// Relationship id of the hyperlink target
        link_rid: Option<String>,
    },
    LineBreak,
    Image {
        r_id: String,
        /// Drawing object id, unique within the document
        drawing_id: u32,
        cx: i64,
        cy: i64,
        description: String,
    },
    BookmarkStart {
        id: u32,
        name: String,
    },
    BookmarkEnd {
        id: u32,
    },
}

/// A paragraph of the document body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    options: ParagraphOptions,
    content: Vec<Inline>,
    /// Bottom border drawn as a horizontal rule
    rule: bool,
}

impl Paragraph {
    pub(crate) fn new(options: ParagraphOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub(crate) fn push(&mut self, item: Inline) {
        self.content.push(item);
    }

    #[inline]
    pub fn options(&self) -> &ParagraphOptions {
        &self.options
    }

    #[inline]
    pub fn content(&self) -> &[Inline] {
        &self.content
    }

    #[inline]
    pub fn has_rule(&self) -> bool {
        self.rule
    }

    /// Font faces named by the paragraph's runs, in first-use order.
    pub fn font_faces(&self) -> impl Iterator<Item = &str> {
        self.content.iter().filter_map(|item| match item {
            Inline::Text { options, .. } => options.font_face.as_deref(),
            _ => None,
        })
    }

    /// Concatenated text of the paragraph.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|item| match item {
                Inline::Text { text, .. } => Some(text.as_str()),
                Inline::LineBreak => Some("\n"),
                _ => None,
            })
            .collect()
    }
}

/// Authoring-time counters shared by all paragraphs of a document.
#[derive(Debug, Default)]
pub(crate) struct Counters {
    pub media: usize,
    pub drawing_id: u32,
    pub next_bookmark: u32,
    pub open_bookmarks: Vec<u32>,
}

impl Counters {
    pub fn next_drawing_id(&mut self) -> u32 {
        self.drawing_id += 1;
        self.drawing_id
    }
}

/// Mutable handle to a paragraph being authored.
pub struct ParagraphMut<'a> {
    pub(crate) paragraph: &'a mut Paragraph,
    pub(crate) package: &'a mut OfficePackage<DocxModel>,
    pub(crate) counters: &'a mut Counters,
    pub(crate) metrics: &'a dyn ImageMetrics,
}

impl ParagraphMut<'_> {
    /// Append a run of text.
    ///
    /// A `hyperlink` in the options turns the run into an external link.
    pub fn add_text(&mut self, text: &str, options: TextOptions) -> Result<&mut Self> {
        let link_rid = match &options.hyperlink {
            Some(url) => Some(self.package.relate_external(DOCUMENT_PART, rt::HYPERLINK, url)?),
            None => None,
        };
        self.paragraph.content.push(Inline::Text {
            text: text.to_string(),
            options,
            link_rid,
        });
        Ok(self)
    }

    pub fn add_line_break(&mut self) -> &mut Self {
        self.paragraph.content.push(Inline::LineBreak);
        self
    }

    /// Append an inline picture.
    ///
    /// Without an explicit size the picture is placed at its natural size
    /// at 96 DPI.
    pub fn add_image(&mut self, bytes: Vec<u8>, options: &ImageOptions) -> Result<&mut Self> {
        let resolved = resolve_image(&bytes, options, self.metrics)?;
        self.counters.media += 1;
        let partname = register_media(self.package, "/word", self.counters.media, resolved.format, bytes)?;
        let r_id = self.package.relate(DOCUMENT_PART, rt::IMAGE, &partname)?;
        debug!("inline image {} ({}x{} EMU) as {}", partname, resolved.cx, resolved.cy, r_id);

        let drawing_id = self.counters.next_drawing_id();
        self.paragraph.content.push(Inline::Image {
            r_id,
            drawing_id,
            cx: resolved.cx,
            cy: resolved.cy,
            description: options.description.clone().unwrap_or_default(),
        });
        Ok(self)
    }

    /// Open a bookmark. Ids are numbered document-wide.
    pub fn start_bookmark(&mut self, name: &str) -> &mut Self {
        let id = self.counters.next_bookmark;
        self.counters.next_bookmark += 1;
        self.counters.open_bookmarks.push(id);
        self.paragraph.content.push(Inline::BookmarkStart {
            id,
            name: name.to_string(),
        });
        self
    }

    /// Close the most recently opened bookmark, which may have been opened
    /// in an earlier paragraph.
    pub fn end_bookmark(&mut self) -> &mut Self {
        match self.counters.open_bookmarks.pop() {
            Some(id) => self.paragraph.content.push(Inline::BookmarkEnd { id }),
            None => warn!("end_bookmark without an open bookmark ignored"),
        }
        self
    }

    /// Draw a horizontal rule under the paragraph.
    pub fn add_horizontal_line(&mut self) -> &mut Self {
        self.paragraph.rule = true;
        self
    }

    pub fn paragraph(&self) -> &Paragraph {
        self.paragraph
    }
}
