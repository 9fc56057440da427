use crate::common::xml::{Element, format_number};
use crate::ooxml::common::address::cell_ref;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::namespace as ns;
use crate::ooxml::opc::context::SharedStringTable;
use crate::ooxml::xlsx::cell::CellValue;
use crate::ooxml::xlsx::worksheet::Sheet;
use log::warn;
use std::collections::BTreeMap;

/// One-based index of a zero-based row or column.
fn one_based(n: u32) -> Result<u32> {
    n.checked_add(1)
        .ok_or_else(|| OoxmlError::InvalidArgument(format!("row or column {} is out of range", n)))
}

/// `A1` reference of a zero-based cell.
fn a1(row: u32, col: u32) -> Result<String> {
    Ok(cell_ref(one_based(row)?, one_based(col)?))
}

/// Build `xl/worksheets/sheet{n}.xml`.
///
/// `index` is the zero-based position of the sheet in the workbook; text
/// cells are written as references into `strings`.
pub fn worksheet_element(sheet: &Sheet, index: usize, strings: &SharedStringTable) -> Result<Element> {
    let dimension = match sheet.used_range() {
        Some(((r1, c1), (r2, c2))) if (r1, c1) != (r2, c2) => format!("{}:{}", a1(r1, c1)?, a1(r2, c2)?),
        Some(((r, c), _)) => a1(r, c)?,
        None => "A1".to_string(),
    };

    let mut view = Element::new("sheetView").attr("workbookViewId", 0);
    if index == 0 {
        view.set_attr("tabSelected", true);
    }

    let cols = sheet
        .column_widths()
        .map(|(col, width)| {
            let n = one_based(col)?;
            Ok(Element::new("col")
                .attr("min", n)
                .attr("max", n)
                .attr("width", format_number(width))
                .attr("customWidth", true))
        })
        .collect::<Result<Vec<Element>>>()?;
    let cols = (!cols.is_empty()).then(|| Element::new("cols").children_from(cols));

    Ok(Element::new("worksheet")
        .attr("xmlns", ns::SML_MAIN)
        .attr("xmlns:r", ns::OFC_RELATIONSHIPS)
        .child(Element::new("dimension").attr("ref", dimension))
        .child(Element::new("sheetViews").child(view))
        .child(Element::new("sheetFormatPr").attr("defaultRowHeight", 15))
        .child_opt(cols)
        .child(sheet_data(sheet, index, strings)?)
        .child(
            Element::new("pageMargins")
                .attr("left", 0.7)
                .attr("right", 0.7)
                .attr("top", 0.75)
                .attr("bottom", 0.75)
                .attr("header", 0.3)
                .attr("footer", 0.3),
        ))
}

fn sheet_data(sheet: &Sheet, index: usize, strings: &SharedStringTable) -> Result<Element> {
    let mut rows: BTreeMap<u32, Element> = BTreeMap::new();
    for (row, col, value) in sheet.cells() {
        let cell = cell_element(index, row, col, value, strings)?;
        let r = one_based(row)?;
        rows.entry(row)
            .or_insert_with(|| Element::new("row").attr("r", r))
            .push(cell);
    }
    Ok(Element::new("sheetData").children_from(rows.into_values()))
}

fn cell_element(
    index: usize,
    row: u32,
    col: u32,
    value: &CellValue,
    strings: &SharedStringTable,
) -> Result<Element> {
    let reference = a1(row, col)?;
    let c = Element::new("c").attr("r", reference.as_str());
    Ok(match value {
        CellValue::Number(n) => c.child(Element::new("v").text(format_number(*n))),
        CellValue::Bool(b) => c.attr("t", "b").child(Element::new("v").text(*b)),
        CellValue::Text(s) => match strings.cell(index, row, col) {
            Some(idx) => c.attr("t", "s").child(Element::new("v").text(idx)),
            None => {
                warn!("cell {} of sheet {} missing from shared strings; writing inline", reference, index);
                c.attr("t", "inlineStr")
                    .child(Element::new("is").child(Element::new("t").text(s.as_str())))
            },
        },
        CellValue::Empty => c,
    })
}
