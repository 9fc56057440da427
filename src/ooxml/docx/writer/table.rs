/// Table markup for DOCX documents.
use crate::common::unit::pt_to_half_points;
use crate::common::xml::Element;
use crate::ooxml::common::table::{
    TableCell, TableOptions, VAlign, column_widths, grid_columns, resolve_cell_style,
};
use crate::ooxml::docx::writer::paragraph::{jc_value, text_element};
use crate::ooxml::docx::writer::w_val;
use log::debug;

/// Width of a table without explicit widths: the text width of a letter page
/// with the default margins, in twentieths of a point.
pub const DEFAULT_TABLE_WIDTH: i64 = 8640;

fn borders(color: &str) -> Element {
    let edge = |name: &str| {
        Element::new(name)
            .attr("w:val", "single")
            .attr("w:sz", 4)
            .attr("w:space", 0)
            .attr("w:color", color)
    };
    Element::new("w:tblBorders").children_from(
        ["w:top", "w:left", "w:bottom", "w:right", "w:insideH", "w:insideV"]
            .into_iter()
            .map(edge),
    )
}

fn cell_element(cell: &TableCell, options: &TableOptions, row: usize, col: usize, width: i64) -> Element {
    let style = resolve_cell_style(cell, options, row, col);

    let tc_pr = Element::new("w:tcPr")
        .child(Element::new("w:tcW").attr("w:w", width).attr("w:type", "dxa"))
        .child_opt(style.fill.as_deref().map(|fill| {
            Element::new("w:shd")
                .attr("w:val", "clear")
                .attr("w:color", "auto")
                .attr("w:fill", fill.trim_start_matches('#'))
        }))
        .child_opt(style.valign.map(|v| {
            w_val(
                "w:vAlign",
                match v {
                    VAlign::Top => "top",
                    VAlign::Center => "center",
                    VAlign::Bottom => "bottom",
                },
            )
        }));

    let mut rpr = Element::new("w:rPr").child_opt(style.font_face.as_deref().map(|face| {
        Element::new("w:rFonts").attr("w:ascii", face).attr("w:hAnsi", face)
    }));
    if style.bold {
        rpr.push(Element::new("w:b"));
    }
    if style.italic {
        rpr.push(Element::new("w:i"));
    }
    let rpr = rpr
        .child_opt(style.color.as_deref().map(|c| w_val("w:color", c.trim_start_matches('#'))))
        .child_opt(style.font_size.map(|pt| w_val("w:sz", pt_to_half_points(pt))));

    let ppr = style
        .align
        .map(|a| Element::new("w:pPr").child(w_val("w:jc", jc_value(a))));
    let run = Element::new("w:r")
        .child_opt((!rpr.children().is_empty()).then_some(rpr))
        .child(text_element(&cell.value.to_string()));

    Element::new("w:tc")
        .child(tc_pr)
        .child(Element::new("w:p").child_opt(ppr).child(run))
}

/// Build `w:tbl` from a grid of cells.
///
/// Rows narrower than the grid end early; the missing trailing cells are
/// declared with `w:gridAfter`.
pub fn table_element(rows: &[Vec<TableCell>], options: &TableOptions) -> Element {
    let columns = grid_columns(rows);
    let total = options.width.unwrap_or(DEFAULT_TABLE_WIDTH);
    let widths = column_widths(total, options.column_widths.as_deref(), columns);
    debug!("docx table: {} rows x {} columns, widths {:?}", rows.len(), columns, widths);

    let mut tbl_pr = Element::new("w:tblPr")
        .child(w_val("w:tblStyle", "TableGrid"))
        .child(
            Element::new("w:tblW")
                .attr("w:w", widths.iter().sum::<i64>())
                .attr("w:type", "dxa"),
        );
    if let Some(color) = &options.border_color {
        tbl_pr.push(borders(color.trim_start_matches('#')));
    }
    tbl_pr.push(
        Element::new("w:tblLook")
            .attr("w:val", "04A0")
            .attr("w:firstRow", 1)
            .attr("w:lastRow", 0)
            .attr("w:firstColumn", 1)
            .attr("w:lastColumn", 0)
            .attr("w:noHBand", 0)
            .attr("w:noVBand", 1),
    );

    let grid = Element::new("w:tblGrid")
        .children_from(widths.iter().map(|w| Element::new("w:gridCol").attr("w:w", *w)));

    let trs = rows.iter().enumerate().map(|(r, row)| {
        let missing = columns - row.len();
        let height = options
            .row_height
            .map(|h| Element::new("w:trHeight").attr("w:val", h));
        let tr_pr = (height.is_some() || missing > 0).then(|| {
            Element::new("w:trPr")
                .child_opt((missing > 0).then(|| w_val("w:gridAfter", missing)))
                .child_opt(height)
        });
        Element::new("w:tr").child_opt(tr_pr).children_from(
            row.iter()
                .enumerate()
                .map(|(c, cell)| cell_element(cell, options, r, c, widths[c])),
        )
    });

    Element::new("w:tbl").child(tbl_pr).child(grid).children_from(trs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::xml::{SerializeOptions, to_xml_string};
    use crate::ooxml::common::table::{Align, CellOptions, StyleValue};

    fn xml(el: &Element) -> String {
        to_xml_string(el, &SerializeOptions::fragment())
    }

    #[test]
    fn test_even_widths_and_ragged_rows() {
        let rows = vec![
            vec![TableCell::from("a"), TableCell::from("b"), TableCell::from("c")],
            vec![TableCell::from(1.0)],
        ];
        let out = xml(&table_element(&rows, &TableOptions::default()));
        assert_eq!(out.matches(r#"<w:gridCol w:w="2880"/>"#).count(), 3);
        assert!(out.contains(r#"<w:tblW w:w="8640" w:type="dxa"/>"#));
        assert!(out.contains(r#"<w:tr><w:trPr><w:gridAfter w:val="2"/></w:trPr><w:tc>"#));
        assert_eq!(out.matches("<w:tc>").count(), 4);
    }

    #[test]
    fn test_cell_options_replace_table_options() {
        let options = TableOptions {
            cell: CellOptions {
                fill: Some(StyleValue::PerRow(vec!["DDDDDD".to_string()])),
                bold: Some(true.into()),
                align: Some(Align::Center),
                ..Default::default()
            },
            border_color: Some("#000000".to_string()),
            ..Default::default()
        };
        let rows = vec![vec![
            TableCell::from("head"),
            TableCell::styled("own", CellOptions {
                italic: Some(true.into()),
                ..Default::default()
            }),
        ]];
        let tbl = table_element(&rows, &options);
        let out = xml(&tbl);
        assert!(out.contains(r#"<w:insideV w:val="single" w:sz="4" w:space="0" w:color="000000"/>"#));

        let cells: Vec<String> = tbl.find_all("w:tr").flat_map(|tr| tr.find_all("w:tc")).map(xml).collect();
        assert!(cells[0].contains(r#"<w:shd w:val="clear" w:color="auto" w:fill="DDDDDD"/>"#));
        assert!(cells[0].contains(r#"<w:jc w:val="center"/>"#));
        assert!(cells[0].contains("<w:b/>"));
        assert!(!cells[1].contains("w:shd"));
        assert!(!cells[1].contains("<w:b/>"));
        assert!(cells[1].contains("<w:i/>"));
    }
}
