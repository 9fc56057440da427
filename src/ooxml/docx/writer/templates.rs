//! Fixed document-level parts of a DOCX package.
//!
//! Styles, settings, web settings and the font table carry no user content
//! beyond the default font, so they are built from small fixed trees.

use crate::common::unit::pt_to_half_points;
use crate::common::xml::Element;
use crate::ooxml::docx::writer::w_val;
use crate::ooxml::opc::constants::namespace as ns;

fn fonts(face: &str) -> Element {
    Element::new("w:rFonts")
        .attr("w:ascii", face)
        .attr("w:eastAsia", face)
        .attr("w:hAnsi", face)
        .attr("w:cs", face)
}

fn paragraph_style(id: &str, name: &str) -> Element {
    Element::new("w:style")
        .attr("w:type", "paragraph")
        .attr("w:styleId", id)
        .child(w_val("w:name", name))
}

fn heading(level: u32, size_pt: f64, color: &str) -> Element {
    paragraph_style(&format!("Heading{}", level), &format!("heading {}", level))
        .child(w_val("w:basedOn", "Normal"))
        .child(w_val("w:next", "Normal"))
        .child(w_val("w:uiPriority", 9))
        .child(Element::new("w:qFormat"))
        .child(
            Element::new("w:pPr")
                .child(Element::new("w:keepNext"))
                .child(Element::new("w:spacing").attr("w:before", 240).attr("w:after", 60))
                .child(w_val("w:outlineLvl", level - 1)),
        )
        .child(
            Element::new("w:rPr")
                .child(Element::new("w:b"))
                .child(w_val("w:color", color))
                .child(w_val("w:sz", pt_to_half_points(size_pt)))
                .child(w_val("w:szCs", pt_to_half_points(size_pt))),
        )
}

/// Build `word/styles.xml` with `font_face` at `font_size` points as the
/// document default.
pub fn styles_element(font_face: &str, font_size: f64) -> Element {
    let size = pt_to_half_points(font_size);
    let doc_defaults = Element::new("w:docDefaults")
        .child(
            Element::new("w:rPrDefault").child(
                Element::new("w:rPr")
                    .child(fonts(font_face))
                    .child(w_val("w:sz", size))
                    .child(w_val("w:szCs", size))
                    .child(
                        Element::new("w:lang")
                            .attr("w:val", "en-US")
                            .attr("w:eastAsia", "en-US")
                            .attr("w:bidi", "ar-SA"),
                    ),
            ),
        )
        .child(
            Element::new("w:pPrDefault").child(
                Element::new("w:pPr").child(
                    Element::new("w:spacing")
                        .attr("w:after", 200)
                        .attr("w:line", 276)
                        .attr("w:lineRule", "auto"),
                ),
            ),
        );

    let normal = paragraph_style("Normal", "Normal")
        .attr("w:default", true)
        .child(Element::new("w:qFormat"));

    let hyperlink = Element::new("w:style")
        .attr("w:type", "character")
        .attr("w:styleId", "Hyperlink")
        .child(w_val("w:name", "Hyperlink"))
        .child(w_val("w:uiPriority", 99))
        .child(Element::new("w:unhideWhenUsed"))
        .child(
            Element::new("w:rPr")
                .child(w_val("w:color", "0563C1"))
                .child(w_val("w:u", "single")),
        );

    let table_grid = Element::new("w:style")
        .attr("w:type", "table")
        .attr("w:styleId", "TableGrid")
        .child(w_val("w:name", "Table Grid"))
        .child(w_val("w:uiPriority", 59))
        .child(
            Element::new("w:pPr").child(
                Element::new("w:spacing")
                    .attr("w:after", 0)
                    .attr("w:line", 240)
                    .attr("w:lineRule", "auto"),
            ),
        )
        .child(
            Element::new("w:tblPr").child(
                Element::new("w:tblBorders").children_from(
                    ["w:top", "w:left", "w:bottom", "w:right", "w:insideH", "w:insideV"]
                        .into_iter()
                        .map(|edge| {
                            Element::new(edge)
                                .attr("w:val", "single")
                                .attr("w:sz", 4)
                                .attr("w:space", 0)
                                .attr("w:color", "auto")
                        }),
                ),
            ),
        );

    Element::new("w:styles")
        .attr("xmlns:w", ns::WML_MAIN)
        .attr("xmlns:r", ns::OFC_RELATIONSHIPS)
        .child(doc_defaults)
        .child(normal)
        .child(heading(1, 16.0, "2F5496"))
        .child(heading(2, 13.0, "2F5496"))
        .child(heading(3, 12.0, "1F3763"))
        .child(hyperlink)
        .child(table_grid)
}

/// Build `word/settings.xml`.
pub fn settings_element() -> Element {
    Element::new("w:settings")
        .attr("xmlns:w", ns::WML_MAIN)
        .child(Element::new("w:zoom").attr("w:percent", 100))
        .child(w_val("w:defaultTabStop", 720))
        .child(w_val("w:characterSpacingControl", "doNotCompress"))
        .child(
            Element::new("w:compat").child(
                Element::new("w:compatSetting")
                    .attr("w:name", "compatibilityMode")
                    .attr("w:uri", "http://schemas.microsoft.com/office/word")
                    .attr("w:val", 15),
            ),
        )
        .child(w_val("w:themeFontLang", "en-US"))
        .child(w_val("w:decimalSymbol", "."))
        .child(w_val("w:listSeparator", ","))
}

/// Build `word/webSettings.xml`.
pub fn web_settings_element() -> Element {
    Element::new("w:webSettings")
        .attr("xmlns:w", ns::WML_MAIN)
        .child(Element::new("w:optimizeForBrowser"))
        .child(Element::new("w:allowPNG"))
}

/// Build `word/fontTable.xml` declaring `font_faces`.
pub fn font_table_element<'a>(font_faces: impl IntoIterator<Item = &'a str>) -> Element {
    Element::new("w:fonts")
        .attr("xmlns:w", ns::WML_MAIN)
        .attr("xmlns:r", ns::OFC_RELATIONSHIPS)
        .children_from(font_faces.into_iter().map(|face| {
            Element::new("w:font")
                .attr("w:name", face)
                .child(w_val("w:charset", "00"))
                .child(w_val("w:family", "swiss"))
                .child(w_val("w:pitch", "variable"))
        }))
}
