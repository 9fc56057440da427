//! Slides and the shapes placed on them.

use crate::ooxml::charts::{ChartDescriptor, register_chart_parts};
use crate::ooxml::common::image::{ImageMetrics, ImageOptions, register_media, resolve_image};
use crate::ooxml::common::table::{Align, TableCell, TableOptions, VAlign};
use crate::ooxml::error::Result;
use crate::ooxml::opc::OfficePackage;
use crate::ooxml::opc::constants::relationship_type as rt;
use crate::ooxml::pptx::presentation::PptxModel;
use log::debug;
use serde::Deserialize;

/// Default text box: full width below a title area, 1 inch high.
const DEFAULT_TEXT_BOX: (i64, i64, i64, i64) = (457_200, 1_600_200, 8_229_600, 914_400);

/// Default chart frame.
const DEFAULT_CHART_FRAME: (i64, i64, i64, i64) = (457_200, 1_600_200, 8_229_600, 4_525_963);

/// Default table origin.
const DEFAULT_TABLE_ORIGIN: (i64, i64) = (457_200, 1_600_200);

/// Width of a table without explicit widths, in EMU.
pub const DEFAULT_TABLE_WIDTH: i64 = 8_229_600;

/// Placement and formatting of a text box. Positions and sizes are in EMU.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShapeOptions {
    pub x: Option<i64>,
    pub y: Option<i64>,
    pub cx: Option<i64>,
    pub cy: Option<i64>,
    pub font_face: Option<String>,
    /// Font size in points
    pub font_size: Option<f64>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// Text color, hex RGB
    pub color: Option<String>,
    /// Background fill, hex RGB
    pub fill: Option<String>,
    /// Outline color, hex RGB
    pub line: Option<String>,
    /// Outline width in points
    pub line_width: Option<f64>,
    pub align: Option<Align>,
    pub valign: Option<VAlign>,
}

impl ShapeOptions {
    pub fn at(x: i64, y: i64, cx: i64, cy: i64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            cx: Some(cx),
            cy: Some(cy),
            ..Default::default()
        }
    }

    /// Frame of the shape, falling back to `default` per coordinate.
    pub fn frame(&self, default: (i64, i64, i64, i64)) -> (i64, i64, i64, i64) {
        (
            self.x.unwrap_or(default.0),
            self.y.unwrap_or(default.1),
            self.cx.unwrap_or(default.2),
            self.cy.unwrap_or(default.3),
        )
    }
}

/// Position and size in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

impl From<(i64, i64, i64, i64)> for Frame {
    fn from((x, y, cx, cy): (i64, i64, i64, i64)) -> Self {
        Self { x, y, cx, cy }
    }
}

/// A shape on a slide. `id` is unique within the slide.
#[derive(Debug, Clone, PartialEq)]
pub enum SlideItem {
    Text {
        id: u32,
        text: String,
        options: ShapeOptions,
    },
    Picture {
        id: u32,
        r_id: String,
        frame: Frame,
        description: String,
    },
    Chart {
        id: u32,
        r_id: String,
        frame: Frame,
    },
    Table {
        id: u32,
        rows: Vec<Vec<TableCell>>,
        options: TableOptions,
    },
}

/// One slide of a presentation.
#[derive(Debug, Clone)]
pub struct Slide {
    partname: String,
    slide_id: u32,
    r_id: String,
    items: Vec<SlideItem>,
    background: Option<String>,
    next_shape_id: u32,
}

impl Slide {
    pub(crate) fn new(partname: String, slide_id: u32, r_id: String) -> Self {
        Self {
            partname,
            slide_id,
            r_id,
            items: Vec::new(),
            background: None,
            // 1 is the shape tree itself
            next_shape_id: 2,
        }
    }

    pub fn partname(&self) -> &str {
        &self.partname
    }

    /// Id in the presentation's slide list.
    pub fn slide_id(&self) -> u32 {
        self.slide_id
    }

    /// Relationship id of the slide in `presentation.xml.rels`.
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    pub fn items(&self) -> &[SlideItem] {
        &self.items
    }

    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    pub(crate) fn set_background(&mut self, color: &str) {
        self.background = Some(color.trim_start_matches('#').to_string());
    }

    pub(crate) fn push(&mut self, item: SlideItem) {
        self.items.push(item);
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_shape_id;
        self.next_shape_id += 1;
        id
    }
}

/// Counters shared by all slides of a presentation.
#[derive(Debug, Default)]
pub(crate) struct MediaCounter {
    pub media: usize,
}

/// Mutable handle to a slide being authored.
pub struct SlideMut<'a> {
    pub(crate) slide: &'a mut Slide,
    pub(crate) charts: &'a mut Vec<ChartDescriptor>,
    pub(crate) package: &'a mut OfficePackage<PptxModel>,
    pub(crate) counter: &'a mut MediaCounter,
    pub(crate) metrics: &'a dyn ImageMetrics,
}

impl SlideMut<'_> {
    /// Add a text box. Line breaks in `text` start new paragraphs.
    pub fn add_text(&mut self, text: &str, options: ShapeOptions) -> &mut Self {
        let id = self.slide.next_id();
        self.slide.push(SlideItem::Text {
            id,
            text: text.to_string(),
            options,
        });
        self
    }

    /// Add a picture at `options.x`, `options.y`.
    ///
    /// Without an explicit size the picture is placed at its natural size
    /// at 96 DPI.
    pub fn add_image(&mut self, bytes: Vec<u8>, options: &ImageOptions) -> Result<&mut Self> {
        let resolved = resolve_image(&bytes, options, self.metrics)?;
        self.counter.media += 1;
        let partname = register_media(self.package, "/ppt", self.counter.media, resolved.format, bytes)?;
        let r_id = self.package.relate(&self.slide.partname, rt::IMAGE, &partname)?;

        let id = self.slide.next_id();
        self.slide.push(SlideItem::Picture {
            id,
            r_id,
            frame: Frame {
                x: options.x,
                y: options.y,
                cx: resolved.cx,
                cy: resolved.cy,
            },
            description: options.description.clone().unwrap_or_default(),
        });
        Ok(self)
    }

    /// Add a chart in the frame given by `options`; other shape options
    /// are ignored.
    ///
    /// The chart is validated when the presentation is generated.
    pub fn add_chart(&mut self, chart: ChartDescriptor, options: &ShapeOptions) -> Result<&mut Self> {
        let number = self.charts.len() + 1;
        let r_id = register_chart_parts(self.package, "/ppt", number, &self.slide.partname, PptxModel::chart)?;
        self.charts.push(chart);

        let id = self.slide.next_id();
        self.slide.push(SlideItem::Chart {
            id,
            r_id,
            frame: options.frame(DEFAULT_CHART_FRAME).into(),
        });
        Ok(self)
    }

    /// Add a table.
    pub fn add_table(&mut self, rows: Vec<Vec<TableCell>>, options: TableOptions) -> &mut Self {
        let id = self.slide.next_id();
        debug!("table shape {} on {} with {} rows", id, self.slide.partname, rows.len());
        self.slide.push(SlideItem::Table { id, rows, options });
        self
    }

    /// Solid background color, hex RGB.
    pub fn set_background(&mut self, color: &str) -> &mut Self {
        self.slide.set_background(color);
        self
    }

    pub fn slide(&self) -> &Slide {
        self.slide
    }
}

/// Frame of a text box without explicit placement.
pub(crate) fn text_frame(options: &ShapeOptions) -> Frame {
    options.frame(DEFAULT_TEXT_BOX).into()
}

/// Origin of a table without explicit placement.
pub(crate) fn table_origin(options: &TableOptions) -> (i64, i64) {
    (
        options.x.unwrap_or(DEFAULT_TABLE_ORIGIN.0),
        options.y.unwrap_or(DEFAULT_TABLE_ORIGIN.1),
    )
}
