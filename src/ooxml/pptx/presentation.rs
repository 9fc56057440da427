//! PowerPoint presentation authoring.
//!
//! [`Pptx`] pairs the presentation model with its package registry. The
//! master, its single layout, the theme and the property parts are
//! registered on creation; each [`Pptx::make_new_slide`] call registers one
//! slide part whose first relationship is the layout.

use crate::common::xml::{Element, SerializeOptions};
use crate::ooxml::charts::ChartDescriptor;
use crate::ooxml::common::image::{ImageMetrics, default_metrics};
use crate::ooxml::common::properties::{DocumentProperties, register_doc_props};
use crate::ooxml::common::theme::Theme;
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::opc::{
    DocumentModel, Extension, GenerateListener, GenerateSummary, GenerationContext, Lifecycle,
    OfficePackage, OpcError,
};
use crate::ooxml::pptx::slide::{MediaCounter, Slide, SlideMut};
use crate::ooxml::pptx::writer::{
    pres_props_element, presentation_element, slide_element, slide_layout_element,
    slide_master_element, table_styles_element, view_props_element,
};
use log::debug;
use std::io::{Cursor, Seek, Write};

const PRESENTATION_PART: &str = "/ppt/presentation.xml";
const MASTER_PART: &str = "/ppt/slideMasters/slideMaster1.xml";
const LAYOUT_PART: &str = "/ppt/slideLayouts/slideLayout1.xml";
const THEME_PART: &str = "/ppt/theme/theme1.xml";
const PRES_PROPS_PART: &str = "/ppt/presProps.xml";
const VIEW_PROPS_PART: &str = "/ppt/viewProps.xml";
const TABLE_STYLES_PART: &str = "/ppt/tableStyles.xml";

/// Relationship id of the master in the presentation's relationships.
const MASTER_RID: &str = "rId1";

/// First id of `p:sldId`; lower values are reserved.
const FIRST_SLIDE_ID: u32 = 256;

/// 10 by 7.5 inches, 4:3.
pub const DEFAULT_SLIDE_SIZE: (i64, i64) = (9_144_000, 6_858_000);

/// Presentation content read by the part producers.
#[derive(Debug)]
pub struct PptxModel {
    slides: Vec<Slide>,
    charts: Vec<ChartDescriptor>,
    slide_size: (i64, i64),
    properties: DocumentProperties,
    theme: Theme,
}

impl Default for PptxModel {
    fn default() -> Self {
        Self {
            slides: Vec::new(),
            charts: Vec::new(),
            slide_size: DEFAULT_SLIDE_SIZE,
            properties: DocumentProperties::default(),
            theme: Theme::default(),
        }
    }
}

impl PptxModel {
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn charts(&self) -> &[ChartDescriptor] {
        &self.charts
    }

    pub fn slide_size(&self) -> (i64, i64) {
        self.slide_size
    }

    pub fn properties(&self) -> &DocumentProperties {
        &self.properties
    }

    pub(crate) fn chart(&self, index: usize) -> Option<&ChartDescriptor> {
        self.charts.get(index)
    }

    fn statistics(&self) -> Vec<Element> {
        let format = match self.slide_size {
            (9_144_000, 6_858_000) => "On-screen Show (4:3)",
            (12_192_000, 6_858_000) => "Widescreen",
            _ => "Custom",
        };
        vec![
            Element::new("PresentationFormat").text(format),
            Element::new("Slides").text(self.slides.len()),
        ]
    }
}

impl DocumentModel for PptxModel {}

/// A PowerPoint presentation being authored.
///
/// # Examples
///
/// ```
/// use ooxmlgen::ooxml::pptx::{Pptx, ShapeOptions};
/// use ooxmlgen::{ChartDescriptor, Series};
///
/// let mut pptx = Pptx::new()?;
/// let mut slide = pptx.make_new_slide()?;
/// slide.set_background("FFFFFF");
/// slide.add_text("Sales", ShapeOptions { font_size: Some(32.0), bold: true, ..Default::default() });
/// slide.add_chart(
///     ChartDescriptor::new("column").series(Series::new("2024", ["Q1", "Q2"], vec![10.0, 12.0])),
///     &ShapeOptions::default(),
/// )?;
///
/// let bytes = pptx.to_bytes()?;
/// assert_eq!(&bytes[..2], b"PK");
/// # Ok::<(), ooxmlgen::OoxmlError>(())
/// ```
pub struct Pptx {
    model: PptxModel,
    package: OfficePackage<PptxModel>,
    counter: MediaCounter,
    metrics: Box<dyn ImageMetrics>,
}

impl Pptx {
    /// Create a presentation without slides.
    pub fn new() -> Result<Self> {
        let mut package = OfficePackage::new();

        package.register_part(
            PRESENTATION_PART,
            ct::PML_PRESENTATION_MAIN,
            Lifecycle::Type,
            |doc: &PptxModel, ctx: &mut GenerationContext| {
                Ok(ctx.serialize(&presentation_element(&doc.slides, MASTER_RID, doc.slide_size)))
            },
        )?;
        package.relate_package(rt::OFFICE_DOCUMENT, PRESENTATION_PART)?;

        package.register_part(
            MASTER_PART,
            ct::PML_SLIDE_MASTER,
            Lifecycle::Type,
            |_: &PptxModel, ctx: &mut GenerationContext| Ok(ctx.serialize(&slide_master_element("rId1"))),
        )?;
        let master_rid = package.relate(PRESENTATION_PART, rt::SLIDE_MASTER, MASTER_PART)?;
        debug_assert_eq!(master_rid, MASTER_RID);

        package.register_part(
            LAYOUT_PART,
            ct::PML_SLIDE_LAYOUT,
            Lifecycle::Type,
            |_: &PptxModel, ctx: &mut GenerationContext| Ok(ctx.serialize(&slide_layout_element())),
        )?;
        package.register_part(
            THEME_PART,
            ct::OFC_THEME,
            Lifecycle::Type,
            |doc: &PptxModel, _: &mut GenerationContext| Ok(doc.theme.to_xml()?.into_bytes()),
        )?;
        package.relate(MASTER_PART, rt::SLIDE_LAYOUT, LAYOUT_PART)?;
        package.relate(MASTER_PART, rt::THEME, THEME_PART)?;
        package.relate(LAYOUT_PART, rt::SLIDE_MASTER, MASTER_PART)?;

        package.register_part(
            PRES_PROPS_PART,
            ct::PML_PRES_PROPS,
            Lifecycle::Type,
            |_: &PptxModel, ctx: &mut GenerationContext| Ok(ctx.serialize(&pres_props_element())),
        )?;
        package.register_part(
            VIEW_PROPS_PART,
            ct::PML_VIEW_PROPS,
            Lifecycle::Type,
            |_: &PptxModel, ctx: &mut GenerationContext| Ok(ctx.serialize(&view_props_element())),
        )?;
        package.register_part(
            TABLE_STYLES_PART,
            ct::PML_TABLE_STYLES,
            Lifecycle::Type,
            |_: &PptxModel, ctx: &mut GenerationContext| Ok(ctx.serialize(&table_styles_element())),
        )?;
        package.relate(PRESENTATION_PART, rt::PRES_PROPS, PRES_PROPS_PART)?;
        package.relate(PRESENTATION_PART, rt::VIEW_PROPS, VIEW_PROPS_PART)?;
        package.relate(PRESENTATION_PART, rt::THEME, THEME_PART)?;
        package.relate(PRESENTATION_PART, rt::TABLE_STYLES, TABLE_STYLES_PART)?;

        register_doc_props(
            &mut package,
            "Microsoft Office PowerPoint",
            PptxModel::properties,
            PptxModel::statistics,
        )?;

        Ok(Self {
            model: PptxModel::default(),
            package,
            counter: MediaCounter::default(),
            metrics: default_metrics(),
        })
    }

    /// Append a slide and return a handle for adding its shapes.
    pub fn make_new_slide(&mut self) -> Result<SlideMut<'_>> {
        let index = self.model.slides.len();
        let partname = format!("/ppt/slides/slide{}.xml", index + 1);
        self.package.register_part(
            &partname,
            ct::PML_SLIDE,
            Lifecycle::Data,
            move |doc: &PptxModel, ctx: &mut GenerationContext| {
                let slide = doc
                    .slides
                    .get(index)
                    .ok_or_else(|| OpcError::PartNotFound(format!("slide {}", index + 1)))?;
                Ok(ctx.serialize(&slide_element(slide)))
            },
        )?;
        let layout_rid = self.package.relate(&partname, rt::SLIDE_LAYOUT, LAYOUT_PART)?;
        debug_assert_eq!(layout_rid, "rId1");
        let r_id = self.package.relate(PRESENTATION_PART, rt::SLIDE, &partname)?;
        debug!("slide {} → {} ({})", index + 1, partname, r_id);

        let slide_id = FIRST_SLIDE_ID + index as u32;
        self.model.slides.push(Slide::new(partname, slide_id, r_id));
        Ok(SlideMut {
            slide: &mut self.model.slides[index],
            charts: &mut self.model.charts,
            package: &mut self.package,
            counter: &mut self.counter,
            metrics: self.metrics.as_ref(),
        })
    }

    /// Handle to an existing slide, zero-based.
    pub fn slide_mut(&mut self, index: usize) -> Option<SlideMut<'_>> {
        let slide = self.model.slides.get_mut(index)?;
        Some(SlideMut {
            slide,
            charts: &mut self.model.charts,
            package: &mut self.package,
            counter: &mut self.counter,
            metrics: self.metrics.as_ref(),
        })
    }

    pub fn model(&self) -> &PptxModel {
        &self.model
    }

    /// Slide size in EMU.
    pub fn set_slide_size(&mut self, cx: i64, cy: i64) {
        self.model.slide_size = (cx, cy);
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

    /// Replace the backend used to measure pictures added without a size.
    pub fn set_image_metrics(&mut self, metrics: Box<dyn ImageMetrics>) {
        self.metrics = metrics;
    }

    pub fn set_serialize_options(&mut self, options: SerializeOptions) {
        self.package.set_serialize_options(options);
    }

    pub fn add_extension(&mut self, extension: Box<dyn Extension<PptxModel>>) {
        self.package.add_extension(extension);
    }

    /// The underlying package registry.
    pub fn package(&self) -> &OfficePackage<PptxModel> {
        &self.package
    }

    /// Write the presentation as a `.pptx` archive.
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
        debug!("presentation generated in memory: {} bytes", summary.bytes_written);
        Ok(cursor.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::charts::Series;
    use crate::ooxml::common::table::TableCell;
    use crate::ooxml::common::table::TableOptions;
    use crate::ooxml::pptx::slide::{ShapeOptions, SlideItem};

    fn targets(pptx: &Pptx, part: &str) -> Vec<(String, String)> {
        pptx.package()
            .part(part)
            .unwrap()
            .rels()
            .iter()
            .map(|r| (r.r_id().to_string(), r.target_ref().to_string()))
            .collect()
    }

    #[test]
    fn test_fixed_relationships() {
        let pptx = Pptx::new().unwrap();
        let pres = targets(&pptx, PRESENTATION_PART);
        assert_eq!(pres[0], ("rId1".to_string(), "slideMasters/slideMaster1.xml".to_string()));
        assert_eq!(
            targets(&pptx, MASTER_PART),
            [
                ("rId1".to_string(), "../slideLayouts/slideLayout1.xml".to_string()),
                ("rId2".to_string(), "../theme/theme1.xml".to_string()),
            ]
        );
    }

    #[test]
    fn test_slides_reference_layout_first() {
        let mut pptx = Pptx::new().unwrap();
        let first_rid = pptx.make_new_slide().unwrap().slide().r_id().to_string();
        {
            let mut slide = pptx.make_new_slide().unwrap();
            slide
                .add_text("a", ShapeOptions::default())
                .add_table(vec![vec![TableCell::from("x")]], TableOptions::default());
            slide
                .add_chart(
                    ChartDescriptor::new("line").series(Series::new("s", ["a"], vec![1.0])),
                    &ShapeOptions::default(),
                )
                .unwrap();
        }
        assert_eq!(first_rid, "rId6");

        let second = &pptx.model().slides()[1];
        assert_eq!(second.slide_id(), 257);
        assert_eq!(second.r_id(), "rId7");
        let ids: Vec<u32> = second
            .items()
            .iter()
            .map(|item| match item {
                SlideItem::Text { id, .. }
                | SlideItem::Picture { id, .. }
                | SlideItem::Chart { id, .. }
                | SlideItem::Table { id, .. } => *id,
            })
            .collect();
        assert_eq!(ids, [2, 3, 4]);

        let slide_rels = targets(&pptx, "/ppt/slides/slide2.xml");
        assert_eq!(slide_rels[0], ("rId1".to_string(), "../slideLayouts/slideLayout1.xml".to_string()));
        assert_eq!(slide_rels[1], ("rId2".to_string(), "../charts/chart1.xml".to_string()));
        assert_eq!(
            targets(&pptx, "/ppt/charts/chart1.xml"),
            [("rId1".to_string(), "../embeddings/Microsoft_Excel_Sheet1.xlsx".to_string())]
        );
    }

    #[test]
    fn test_generate_without_slides() {
        let mut pptx = Pptx::new().unwrap();
        let bytes = pptx.to_bytes().unwrap();
        assert!(!bytes.is_empty());
    }
}
