use crate::common::xml::Element;
use crate::ooxml::opc::constants::namespace as ns;
use crate::ooxml::xlsx::worksheet::Sheet;

/// Build `xl/workbook.xml` listing `sheets` in creation order.
pub fn workbook_element(sheets: &[Sheet]) -> Element {
    Element::new("workbook")
        .attr("xmlns", ns::SML_MAIN)
        .attr("xmlns:r", ns::OFC_RELATIONSHIPS)
        .child(
            Element::new("fileVersion")
                .attr("appName", "xl")
                .attr("lastEdited", 5)
                .attr("lowestEdited", 5)
                .attr("rupBuild", 9303),
        )
        .child(Element::new("workbookPr").attr("defaultThemeVersion", 124226))
        .child(
            Element::new("bookViews").child(
                Element::new("workbookView")
                    .attr("xWindow", 120)
                    .attr("yWindow", 75)
                    .attr("windowWidth", 28755)
                    .attr("windowHeight", 12585),
            ),
        )
        .child(Element::new("sheets").children_from(sheets.iter().map(|sheet| {
            Element::new("sheet")
                .attr("name", sheet.name())
                .attr("sheetId", sheet.sheet_id())
                .attr("r:id", sheet.r_id())
        })))
        .child(Element::new("calcPr").attr("calcId", 145621))
}

/// Application statistics for `docProps/app.xml`: the sheet titles.
pub fn app_extra(sheets: &[Sheet]) -> Vec<Element> {
    let count = sheets.len();
    vec![
        Element::new("HeadingPairs").child(
            Element::new("vt:vector")
                .attr("size", 2)
                .attr("baseType", "variant")
                .child(Element::new("vt:variant").child(Element::new("vt:lpstr").text("Worksheets")))
                .child(Element::new("vt:variant").child(Element::new("vt:i4").text(count))),
        ),
        Element::new("TitlesOfParts").child(
            Element::new("vt:vector")
                .attr("size", count)
                .attr("baseType", "lpstr")
                .children_from(sheets.iter().map(|s| Element::new("vt:lpstr").text(s.name()))),
        ),
    ]
}
