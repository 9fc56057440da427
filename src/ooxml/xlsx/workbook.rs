//! Excel workbook authoring.
//!
//! [`Xlsx`] pairs the workbook model with its package registry. Fixed parts
//! (workbook, styles, shared strings, theme, document properties) are
//! registered on creation; each [`Xlsx::make_new_sheet`] call registers one
//! worksheet part.

use crate::common::xml::SerializeOptions;
use crate::ooxml::common::properties::{DocumentProperties, register_doc_props};
use crate::ooxml::common::theme::Theme;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::opc::{
    DocumentModel, Extension, GenerateListener, GenerateSummary, GenerationContext, Lifecycle,
    OfficePackage, OpcError,
};
use crate::ooxml::xlsx::cell::CellValue;
use crate::ooxml::xlsx::worksheet::{Sheet, validate_sheet_name};
use crate::ooxml::xlsx::writer::{
    app_extra, shared_strings_element, styles_element, workbook_element, worksheet_element,
};
use log::debug;
use std::io::{Cursor, Seek, Write};

const WORKBOOK_PART: &str = "/xl/workbook.xml";
const STYLES_PART: &str = "/xl/styles.xml";
const SHARED_STRINGS_PART: &str = "/xl/sharedStrings.xml";
const THEME_PART: &str = "/xl/theme/theme1.xml";

/// Workbook content read by the part producers.
#[derive(Debug, Default)]
pub struct XlsxModel {
    sheets: Vec<Sheet>,
    properties: DocumentProperties,
    theme: Theme,
}

impl XlsxModel {
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn properties(&self) -> &DocumentProperties {
        &self.properties
    }
}

impl DocumentModel for XlsxModel {
    /// Rebuild the shared string table: first-seen order over sheets in
    /// creation order, rows then columns ascending.
    fn prepare(&self, ctx: &mut GenerationContext) -> Result<()> {
        if self.sheets.is_empty() {
            return Err(OoxmlError::InvalidArgument("workbook has no sheets".to_string()));
        }
        for sheet in &self.sheets {
            sheet.validate()?;
        }
        let strings = ctx.shared_strings_mut();
        for (index, sheet) in self.sheets.iter().enumerate() {
            for (row, col, value) in sheet.cells() {
                if let CellValue::Text(text) = value {
                    strings.add_cell(index, row, col, text);
                }
            }
        }
        debug!(
            "shared strings: {} references, {} unique",
            strings.count(),
            strings.unique_count()
        );
        Ok(())
    }
}

/// An Excel workbook being authored.
///
/// # Examples
///
/// ```
/// use ooxmlgen::ooxml::xlsx::Xlsx;
///
/// let mut xlsx = Xlsx::new()?;
/// let sheet = xlsx.make_new_sheet("Budget")?;
/// sheet.set_row(0, ["Month", "Income"]);
/// sheet.set_cell(1, 0, "Jan").set_cell(1, 1, 1200.0);
///
/// let bytes = xlsx.to_bytes()?;
/// assert_eq!(&bytes[..2], b"PK");
/// # Ok::<(), ooxmlgen::OoxmlError>(())
/// ```
pub struct Xlsx {
    model: XlsxModel,
    package: OfficePackage<XlsxModel>,
}

impl Xlsx {
    /// Create an empty workbook. Add at least one sheet before generating.
    pub fn new() -> Result<Self> {
        let mut package = OfficePackage::new();

        package.register_part(
            WORKBOOK_PART,
            ct::SML_SHEET_MAIN,
            Lifecycle::Type,
            |doc: &XlsxModel, ctx: &mut GenerationContext| Ok(ctx.serialize(&workbook_element(&doc.sheets))),
        )?;
        package.relate_package(rt::OFFICE_DOCUMENT, WORKBOOK_PART)?;

        package.register_part(
            STYLES_PART,
            ct::SML_STYLES,
            Lifecycle::Type,
            |doc: &XlsxModel, ctx: &mut GenerationContext| {
                Ok(ctx.serialize(&styles_element(doc.theme.minor_font())))
            },
        )?;
        package.relate(WORKBOOK_PART, rt::STYLES, STYLES_PART)?;

        package.register_part(
            THEME_PART,
            ct::OFC_THEME,
            Lifecycle::Type,
            |doc: &XlsxModel, _: &mut GenerationContext| Ok(doc.theme.to_xml()?.into_bytes()),
        )?;
        package.relate(WORKBOOK_PART, rt::THEME, THEME_PART)?;

        package.register_part(
            SHARED_STRINGS_PART,
            ct::SML_SHARED_STRINGS,
            Lifecycle::Type,
            |_: &XlsxModel, ctx: &mut GenerationContext| {
                let sst = shared_strings_element(ctx.shared_strings());
                Ok(ctx.serialize(&sst))
            },
        )?;
        package.relate(WORKBOOK_PART, rt::SHARED_STRINGS, SHARED_STRINGS_PART)?;

        register_doc_props(
            &mut package,
            "Microsoft Excel",
            XlsxModel::properties,
            |doc: &XlsxModel| app_extra(&doc.sheets),
        )?;

        Ok(Self {
            model: XlsxModel::default(),
            package,
        })
    }

    /// Append a worksheet.
    ///
    /// Names must be unique (ignoring ASCII case), at most 31 characters
    /// and free of `[ ] : * ? / \`.
    pub fn make_new_sheet(&mut self, name: &str) -> Result<&mut Sheet> {
        validate_sheet_name(name, self.model.sheets.iter().map(Sheet::name))?;

        let index = self.model.sheets.len();
        let partname = format!("/xl/worksheets/sheet{}.xml", index + 1);
        self.package.register_part(
            &partname,
            ct::SML_WORKSHEET,
            Lifecycle::Data,
            move |doc: &XlsxModel, ctx: &mut GenerationContext| {
                let sheet = doc
                    .sheets
                    .get(index)
                    .ok_or_else(|| OpcError::PartNotFound(format!("worksheet {}", index + 1)))?;
                let tree = worksheet_element(sheet, index, ctx.shared_strings())?;
                Ok(ctx.serialize(&tree))
            },
        )?;
        let r_id = self.package.relate(WORKBOOK_PART, rt::WORKSHEET, &partname)?;
        debug!("sheet '{}' → {} ({})", name, partname, r_id);

        self.model
            .sheets
            .push(Sheet::new(name.to_string(), index as u32 + 1, r_id));
        Ok(&mut self.model.sheets[index])
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.model.sheets
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.model.sheets.iter_mut().find(|s| s.name() == name)
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

    pub fn set_serialize_options(&mut self, options: SerializeOptions) {
        self.package.set_serialize_options(options);
    }

    pub fn add_extension(&mut self, extension: Box<dyn Extension<XlsxModel>>) {
        self.package.add_extension(extension);
    }

    /// The underlying package registry.
    pub fn package(&self) -> &OfficePackage<XlsxModel> {
        &self.package
    }

    /// Write the workbook as an `.xlsx` archive.
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
        debug!("workbook generated in memory: {} bytes", summary.bytes_written);
        Ok(cursor.into_inner())
    }
}
