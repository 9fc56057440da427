/// Table markup for PPTX slides.
use crate::common::xml::Element;
use crate::ooxml::common::table::{
    TableCell, TableOptions, column_widths, grid_columns, resolve_cell_style,
};
use crate::ooxml::opc::constants::namespace as ns;
use crate::ooxml::pptx::slide::{DEFAULT_TABLE_WIDTH, Frame, table_origin};
use crate::ooxml::pptx::writer::shape::{algn, anchor, graphic_frame, run_properties, solid_fill};
use log::warn;

/// Row height without an explicit one: 0.4 inch.
pub const DEFAULT_ROW_HEIGHT: i64 = 370_840;

fn border(name: &str, color: &str) -> Element {
    Element::new(name)
        .attr("w", 12700)
        .attr("cap", "flat")
        .attr("cmpd", "sng")
        .attr("algn", "ctr")
        .child(solid_fill(color))
        .child(Element::val("a:prstDash", "solid"))
}

fn cell_element(cell: Option<&TableCell>, options: &TableOptions, row: usize, col: usize) -> Element {
    let (text, style) = match cell {
        Some(cell) => (cell.value.to_string(), resolve_cell_style(cell, options, row, col)),
        None => (String::new(), Default::default()),
    };

    let ppr = style.align.map(|a| Element::new("a:pPr").attr("algn", algn(a)));
    let paragraph = if text.is_empty() {
        Element::new("a:p")
            .child_opt(ppr)
            .child(Element::new("a:endParaRPr").attr("lang", "en-US").attr("dirty", 0))
    } else {
        Element::new("a:p").child_opt(ppr).child(
            Element::new("a:r")
                .child(run_properties(
                    style.font_face.as_deref(),
                    style.font_size,
                    style.bold,
                    style.italic,
                    false,
                    style.color.as_deref(),
                ))
                .child(Element::new("a:t").text(text)),
        )
    };

    let mut tc_pr = Element::new("a:tcPr");
    if let Some(v) = style.valign {
        tc_pr.set_attr("anchor", anchor(v));
    }
    if let Some(color) = options.border_color.as_deref() {
        for edge in ["a:lnL", "a:lnR", "a:lnT", "a:lnB"] {
            tc_pr.push(border(edge, color));
        }
    }
    let tc_pr = tc_pr.child_opt(style.fill.as_deref().map(solid_fill));

    Element::new("a:tc")
        .child(
            Element::new("a:txBody")
                .child(Element::new("a:bodyPr"))
                .child(Element::new("a:lstStyle"))
                .child(paragraph),
        )
        .child(tc_pr)
}

/// Build the `p:graphicFrame` of a table.
///
/// PowerPoint needs one cell per grid column in every row, so rows
/// narrower than the grid are padded with empty cells.
pub fn table_frame_element(id: u32, rows: &[Vec<TableCell>], options: &TableOptions) -> Element {
    let columns = grid_columns(rows);
    let widths = column_widths(
        options.width.unwrap_or(DEFAULT_TABLE_WIDTH),
        options.column_widths.as_deref(),
        columns,
    );
    let row_height = options.row_height.unwrap_or(DEFAULT_ROW_HEIGHT);
    let (x, y) = table_origin(options);
    let frame = Frame {
        x,
        y,
        cx: widths.iter().sum(),
        cy: row_height * rows.len() as i64,
    };

    if rows.iter().any(|row| row.len() < columns) {
        warn!("table {} has rows narrower than its {} columns; padding with empty cells", id, columns);
    }

    let trs = rows.iter().enumerate().map(|(r, row)| {
        Element::new("a:tr")
            .attr("h", row_height)
            .children_from((0..columns).map(|c| cell_element(row.get(c), options, r, c)))
    });

    let tbl = Element::new("a:tbl")
        .child(
            Element::new("a:tblPr")
                .attr("firstRow", true)
                .attr("bandRow", true),
        )
        .child(
            Element::new("a:tblGrid")
                .children_from(widths.iter().map(|w| Element::new("a:gridCol").attr("w", *w))),
        )
        .children_from(trs);

    graphic_frame(
        id,
        format!("Table {}", id - 1),
        frame,
        Some(Element::new("a:graphicFrameLocks").attr("noGrp", true)),
        Element::new("a:graphicData").attr("uri", ns::DML_TABLE).child(tbl),
    )
}
