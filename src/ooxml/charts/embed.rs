//! Chart parts and their embedded data workbooks.
//!
//! Every chart carries a workbook holding its data so the consuming
//! application can edit it. The layout matches the ranges the assembler
//! writes into the chart: row 1 holds series names, column A the category
//! labels, series `i` sits in column `C + i`, and column B stays empty.

use crate::ooxml::charts::assembler::{DATA_SHEET, build_chart, series_column};
use crate::ooxml::charts::descriptor::ChartDescriptor;
use crate::ooxml::charts::skeleton::EXTERNAL_DATA_RID;
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::opc::{DocumentModel, GenerationContext, Lifecycle, OfficePackage, OpcError};
use crate::ooxml::xlsx::Xlsx;
use log::debug;

/// Build the `.xlsx` bytes embedded next to a chart.
pub fn chart_workbook(desc: &ChartDescriptor) -> Result<Vec<u8>> {
    let mut xlsx = Xlsx::new()?;
    let sheet = xlsx.make_new_sheet(DATA_SHEET)?;
    sheet.set_column_width(0, 20.0);

    let labels = desc
        .data
        .iter()
        .map(|s| &s.labels)
        .max_by_key(|labels| labels.len());
    if let Some(labels) = labels {
        for (row, label) in labels.iter().enumerate() {
            sheet.set_cell(row as u32 + 1, 0, label.as_str());
        }
    }

    for (i, series) in desc.data.iter().enumerate() {
        let col = series_column(i);
        sheet.set_cell(0, col, series.name.as_str());
        for (row, value) in series.values.iter().enumerate() {
            sheet.set_cell(row as u32 + 1, col, *value);
        }
    }

    xlsx.to_bytes()
}

/// Accessor for the `index`-th chart of a document model.
pub type ChartLookup<D> = fn(&D, usize) -> Option<&ChartDescriptor>;

/// Register chart `number` (one-based) under `prefix` (`/word`, `/ppt`)
/// together with its embedded workbook, and relate it from `host_part`.
///
/// Returns the relationship id of the chart in the host part. The chart's
/// own first relationship is the workbook, which is what the chart's
/// `c:externalData` refers to.
pub fn register_chart_parts<D: DocumentModel + 'static>(
    package: &mut OfficePackage<D>,
    prefix: &str,
    number: usize,
    host_part: &str,
    lookup: ChartLookup<D>,
) -> Result<String> {
    let index = number - 1;
    let chart_part = format!("{}/charts/chart{}.xml", prefix, number);
    let workbook_part = format!("{}/embeddings/Microsoft_Excel_Sheet{}.xlsx", prefix, number);

    package.register_part(
        &chart_part,
        ct::DML_CHART,
        Lifecycle::Data,
        move |doc: &D, ctx: &mut GenerationContext| {
            let desc = lookup(doc, index)
                .ok_or_else(|| OpcError::PartNotFound(format!("chart {}", number)))?;
            let tree = build_chart(desc)?;
            Ok(ctx.serialize(&tree))
        },
    )?;
    package.register_part(
        &workbook_part,
        ct::SML_SHEET,
        Lifecycle::Data,
        move |doc: &D, _: &mut GenerationContext| {
            let desc = lookup(doc, index)
                .ok_or_else(|| OpcError::PartNotFound(format!("chart {}", number)))?;
            chart_workbook(desc)
        },
    )?;

    let data_rid = package.relate(&chart_part, rt::PACKAGE, &workbook_part)?;
    debug_assert_eq!(data_rid, EXTERNAL_DATA_RID);

    let r_id = package.relate(host_part, rt::CHART, &chart_part)?;
    debug!("chart {} registered as {} from {}", number, r_id, host_part);
    Ok(r_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::charts::descriptor::Series;
    use std::io::{Cursor, Read};

    fn read_entry(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut out = String::new();
        archive.by_name(name).unwrap().read_to_string(&mut out).unwrap();
        out
    }

    #[test]
    fn test_workbook_layout() {
        let desc = ChartDescriptor::new("column")
            .series(Series::new("Income", ["Jan", "Feb"], vec![1.0, 2.5]))
            .series(Series::new("Expense", ["Jan", "Feb"], vec![3.0, 4.0]));
        let bytes = chart_workbook(&desc).unwrap();

        let sheet = read_entry(&bytes, "xl/worksheets/sheet1.xml");
        assert!(sheet.contains(r#"<row r="1"><c r="C1" t="s"><v>0</v></c><c r="D1" t="s"><v>1</v></c></row>"#));
        assert!(sheet.contains(r#"<c r="A2" t="s"><v>2</v></c><c r="C2"><v>1</v></c><c r="D2"><v>3</v></c>"#));
        assert!(sheet.contains(r#"<c r="C3"><v>2.5</v></c>"#));
        assert!(!sheet.contains(r#"r="B"#));

        let strings = read_entry(&bytes, "xl/sharedStrings.xml");
        assert!(strings.contains("<si><t>Income</t></si><si><t>Expense</t></si><si><t>Jan</t></si>"));
    }
}
