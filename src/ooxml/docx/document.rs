//! Word document authoring.
//!
//! [`Docx`] pairs the document model with its package registry. The body is
//! an ordered list of [`Block`]s: paragraphs, page breaks, tables and charts.
//! Pictures and hyperlinks live inside paragraphs and are added through
//! [`ParagraphMut`].

use crate::common::xml::{Element, SerializeOptions};
use crate::ooxml::charts::{ChartDescriptor, register_chart_parts};
use crate::ooxml::common::image::{ImageMetrics, default_metrics};
use crate::ooxml::common::properties::{DocumentProperties, register_doc_props};
use crate::ooxml::common::table::{TableCell, TableOptions};
use crate::ooxml::common::theme::Theme;
use crate::ooxml::docx::paragraph::{Counters, Paragraph, ParagraphMut, ParagraphOptions};
use crate::ooxml::docx::writer::{
    document_element, font_table_element, settings_element, styles_element, web_settings_element,
};
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::opc::{
    DocumentModel, Extension, GenerateListener, GenerateSummary, GenerationContext, Lifecycle,
    OfficePackage,
};
use log::debug;
use std::io::{Cursor, Seek, Write};

/// Part name of the main document.
pub const DOCUMENT_PART: &str = "/word/document.xml";
const STYLES_PART: &str = "/word/styles.xml";
const SETTINGS_PART: &str = "/word/settings.xml";
const WEB_SETTINGS_PART: &str = "/word/webSettings.xml";
const FONT_TABLE_PART: &str = "/word/fontTable.xml";
const THEME_PART: &str = "/word/theme/theme1.xml";

/// Default chart extent: 6 by 3.5 inches.
pub const DEFAULT_CHART_SIZE: (i64, i64) = (5_486_400, 3_200_400);

/// Default body font size in points.
pub const DEFAULT_FONT_SIZE: f64 = 11.0;

/// Page geometry in twentieths of a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSetup {
    pub width: u32,
    pub height: u32,
    pub margin_top: u32,
    pub margin_right: u32,
    pub margin_bottom: u32,
    pub margin_left: u32,
}

impl Default for PageSetup {
    /// US Letter with one-inch top and bottom and 1.25-inch side margins.
    fn default() -> Self {
        Self {
            width: 12240,
            height: 15840,
            margin_top: 1440,
            margin_right: 1800,
            margin_bottom: 1440,
            margin_left: 1800,
        }
    }
}

impl PageSetup {
    pub fn landscape(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
            ..self
        }
    }

    /// Width available to body content.
    pub fn text_width(&self) -> u32 {
        self.width
            .saturating_sub(self.margin_left)
            .saturating_sub(self.margin_right)
    }
}

/// A top-level item of the document body.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Index into the model's paragraphs
    Paragraph(usize),
    PageBreak,
    Table {
        rows: Vec<Vec<TableCell>>,
        options: TableOptions,
    },
    Chart {
        r_id: String,
        drawing_id: u32,
        cx: i64,
        cy: i64,
    },
}

/// Document content read by the part producers.
#[derive(Debug)]
pub struct DocxModel {
    body: Vec<Block>,
    paragraphs: Vec<Paragraph>,
    charts: Vec<ChartDescriptor>,
    page: PageSetup,
    properties: DocumentProperties,
    theme: Theme,
    font_size: f64,
}

impl Default for DocxModel {
    fn default() -> Self {
        Self {
            body: Vec::new(),
            paragraphs: Vec::new(),
            charts: Vec::new(),
            page: PageSetup::default(),
            properties: DocumentProperties::default(),
            theme: Theme::default(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl DocxModel {
    pub fn body(&self) -> &[Block] {
        &self.body
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn charts(&self) -> &[ChartDescriptor] {
        &self.charts
    }

    pub fn page(&self) -> &PageSetup {
        &self.page
    }

    pub fn properties(&self) -> &DocumentProperties {
        &self.properties
    }

    fn chart(&self, index: usize) -> Option<&ChartDescriptor> {
        self.charts.get(index)
    }

    /// Word and character counts for `docProps/app.xml`.
    fn statistics(&self) -> Vec<Element> {
        let (words, characters) = self
            .paragraphs
            .iter()
            .map(|p| p.text())
            .fold((0, 0), |(w, c), text| {
                (w + text.split_whitespace().count(), c + text.chars().filter(|ch| !ch.is_whitespace()).count())
            });
        vec![
            Element::new("Pages").text(1),
            Element::new("Words").text(words),
            Element::new("Characters").text(characters),
            Element::new("Paragraphs").text(self.paragraphs.len()),
        ]
    }
}

impl DocumentModel for DocxModel {}

/// A Word document being authored.
///
/// # Examples
///
/// ```
/// use ooxmlgen::ooxml::docx::{Docx, ParagraphOptions, TextOptions};
///
/// let mut docx = Docx::new()?;
/// docx.create_p(ParagraphOptions::styled("Heading1"))
///     .add_text("Quarterly report", TextOptions::default())?;
/// docx.create_p(ParagraphOptions::default())
///     .add_text("Revenue grew by ", TextOptions::default())?
///     .add_text("12%", TextOptions::bold())?;
///
/// let bytes = docx.to_bytes()?;
/// assert_eq!(&bytes[..2], b"PK");
/// # Ok::<(), ooxmlgen::OoxmlError>(())
/// ```
pub struct Docx {
    model: DocxModel,
    package: OfficePackage<DocxModel>,
    counters: Counters,
    metrics: Box<dyn ImageMetrics>,
}

impl Docx {
    /// Create an empty document.
    pub fn new() -> Result<Self> {
        let mut package = OfficePackage::new();

        package.register_part(
            DOCUMENT_PART,
            ct::WML_DOCUMENT_MAIN,
            Lifecycle::Data,
            |doc: &DocxModel, ctx: &mut GenerationContext| Ok(ctx.serialize(&document_element(doc))),
        )?;
        package.relate_package(rt::OFFICE_DOCUMENT, DOCUMENT_PART)?;

        package.register_part(
            STYLES_PART,
            ct::WML_STYLES,
            Lifecycle::Type,
            |doc: &DocxModel, ctx: &mut GenerationContext| {
                Ok(ctx.serialize(&styles_element(doc.theme.minor_font(), doc.font_size)))
            },
        )?;
        package.relate(DOCUMENT_PART, rt::STYLES, STYLES_PART)?;

        package.register_part(
            SETTINGS_PART,
            ct::WML_SETTINGS,
            Lifecycle::Type,
            |_: &DocxModel, ctx: &mut GenerationContext| Ok(ctx.serialize(&settings_element())),
        )?;
        package.relate(DOCUMENT_PART, rt::SETTINGS, SETTINGS_PART)?;

        package.register_part(
            WEB_SETTINGS_PART,
            ct::WML_WEB_SETTINGS,
            Lifecycle::Type,
            |_: &DocxModel, ctx: &mut GenerationContext| Ok(ctx.serialize(&web_settings_element())),
        )?;
        package.relate(DOCUMENT_PART, rt::WEB_SETTINGS, WEB_SETTINGS_PART)?;

        package.register_part(
            FONT_TABLE_PART,
            ct::WML_FONT_TABLE,
            Lifecycle::Type,
            |doc: &DocxModel, ctx: &mut GenerationContext| {
                let mut faces = vec![doc.theme.minor_font()];
                for paragraph in &doc.paragraphs {
                    for face in paragraph.font_faces() {
                        if !faces.contains(&face) {
                            faces.push(face);
                        }
                    }
                }
                Ok(ctx.serialize(&font_table_element(faces)))
            },
        )?;
        package.relate(DOCUMENT_PART, rt::FONT_TABLE, FONT_TABLE_PART)?;

        package.register_part(
            THEME_PART,
            ct::OFC_THEME,
            Lifecycle::Type,
            |doc: &DocxModel, _: &mut GenerationContext| Ok(doc.theme.to_xml()?.into_bytes()),
        )?;
        package.relate(DOCUMENT_PART, rt::THEME, THEME_PART)?;

        register_doc_props(
            &mut package,
            "Microsoft Office Word",
            DocxModel::properties,
            DocxModel::statistics,
        )?;

        Ok(Self {
            model: DocxModel::default(),
            package,
            counters: Counters::default(),
            metrics: default_metrics(),
        })
    }

    /// Append a paragraph and return a handle for adding its content.
    pub fn create_p(&mut self, options: ParagraphOptions) -> ParagraphMut<'_> {
        let index = self.model.paragraphs.len();
        self.model.paragraphs.push(Paragraph::new(options));
        self.model.body.push(Block::Paragraph(index));
        ParagraphMut {
            paragraph: &mut self.model.paragraphs[index],
            package: &mut self.package,
            counters: &mut self.counters,
            metrics: self.metrics.as_ref(),
        }
    }

    /// Start a new page.
    pub fn put_page_break(&mut self) {
        self.model.body.push(Block::PageBreak);
    }

    /// Append a table.
    ///
    /// Without explicit widths the columns share the text width of the page
    /// evenly.
    pub fn create_table(&mut self, rows: Vec<Vec<TableCell>>, mut options: TableOptions) {
        if options.width.is_none() {
            options.width = Some(self.model.page.text_width() as i64);
        }
        debug!("table of {} rows at body position {}", rows.len(), self.model.body.len());
        self.model.body.push(Block::Table { rows, options });
    }

    /// Append a chart at the default size.
    pub fn create_chart(&mut self, chart: ChartDescriptor) -> Result<()> {
        self.create_chart_sized(chart, DEFAULT_CHART_SIZE)
    }

    /// Append a chart of the given extent in EMUs.
    ///
    /// The chart is validated when the document is generated.
    pub fn create_chart_sized(&mut self, chart: ChartDescriptor, (cx, cy): (i64, i64)) -> Result<()> {
        let number = self.model.charts.len() + 1;
        let r_id = register_chart_parts(&mut self.package, "/word", number, DOCUMENT_PART, DocxModel::chart)?;
        self.model.charts.push(chart);
        let drawing_id = self.counters.next_drawing_id();
        self.model.body.push(Block::Chart {
            r_id,
            drawing_id,
            cx,
            cy,
        });
        Ok(())
    }

    pub fn model(&self) -> &DocxModel {
        &self.model
    }

    pub fn page_mut(&mut self) -> &mut PageSetup {
        &mut self.model.page
    }

    pub fn properties_mut(&mut self) -> &mut DocumentProperties {
        &mut self.model.properties
    }

    pub fn set_properties(&mut self, properties: DocumentProperties) {
        self.model.properties = properties;
    }

    pub fn theme_mut(&mut self) -> &mut Theme {
        &mut self.model.theme
    }

    /// Body font size in points.
    pub fn set_font_size(&mut self, size: f64) {
        self.model.font_size = size;
    }

    /// Replace the backend used to measure pictures added without a size.
    pub fn set_image_metrics(&mut self, metrics: Box<dyn ImageMetrics>) {
        self.metrics = metrics;
    }

    pub fn set_serialize_options(&mut self, options: SerializeOptions) {
        self.package.set_serialize_options(options);
    }

    pub fn add_extension(&mut self, extension: Box<dyn Extension<DocxModel>>) {
        self.package.add_extension(extension);
    }

    /// The underlying package registry.
    pub fn package(&self) -> &OfficePackage<DocxModel> {
        &self.package
    }

    /// Write the document as a `.docx` archive.
    pub fn generate<W: Write + Seek>(&mut self, sink: W) -> Result<GenerateSummary> {
        self.package.generate(&self.model, sink)
    }

    /// Like [`generate`](Self::generate), reporting the outcome to `listener`.
    pub fn generate_with<W: Write + Seek>(
        &mut self,
        sink: W,
        listener: &mut dyn GenerateListener,
    ) -> Result<GenerateSummary> {
        self.package.generate_with(&self.model, sink, listener)
    }

    /// Write the archive to a sink that cannot seek, such as stdout.
    pub fn generate_stream<W: Write>(&mut self, sink: W) -> Result<GenerateSummary> {
        self.package.generate_stream(&self.model, sink)
    }

    /// Like [`generate_stream`](Self::generate_stream), reporting the outcome to `listener`.
    pub fn generate_stream_with<W: Write>(
        &mut self,
        sink: W,
        listener: &mut dyn GenerateListener,
    ) -> Result<GenerateSummary> {
        self.package.generate_stream_with(&self.model, sink, listener)
    }

    /// Generate into memory.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        let summary = self.generate(&mut cursor)?;
        debug!("document generated in memory: {} bytes", summary.bytes_written);
        Ok(cursor.into_inner())
    }
}
