/// The main document part, `word/document.xml`.
use crate::common::xml::Element;
use crate::ooxml::docx::document::{Block, DocxModel, PageSetup};
use crate::ooxml::docx::writer::drawing::{chart_graphic, inline_drawing};
use crate::ooxml::docx::writer::paragraph::{page_break_element, paragraph_element};
use crate::ooxml::docx::writer::table::table_element;
use crate::ooxml::opc::constants::namespace as ns;
use log::warn;

fn section_properties(page: &PageSetup) -> Element {
    let mut size = Element::new("w:pgSz")
        .attr("w:w", page.width)
        .attr("w:h", page.height);
    if page.width > page.height {
        size.set_attr("w:orient", "landscape");
    }
    Element::new("w:sectPr")
        .child(size)
        .child(
            Element::new("w:pgMar")
                .attr("w:top", page.margin_top)
                .attr("w:right", page.margin_right)
                .attr("w:bottom", page.margin_bottom)
                .attr("w:left", page.margin_left)
                .attr("w:header", 720)
                .attr("w:footer", 720)
                .attr("w:gutter", 0),
        )
        .child(Element::new("w:cols").attr("w:space", 720))
        .child(Element::new("w:docGrid").attr("w:linePitch", 360))
}

fn block_element(model: &DocxModel, block: &Block) -> Option<Element> {
    match block {
        Block::Paragraph(index) => match model.paragraphs().get(*index) {
            Some(paragraph) => Some(paragraph_element(paragraph)),
            None => {
                warn!("paragraph {} missing from the model; skipped", index);
                None
            },
        },
        Block::PageBreak => Some(page_break_element()),
        Block::Table { rows, options } => Some(table_element(rows, options)),
        Block::Chart {
            r_id,
            drawing_id,
            cx,
            cy,
        } => {
            let name = format!("Chart {}", drawing_id);
            let drawing = inline_drawing(*drawing_id, (*cx, *cy), &name, "", chart_graphic(r_id));
            Some(Element::new("w:p").child(Element::new("w:r").child(drawing)))
        },
    }
}

/// Build `word/document.xml`.
///
/// Word requires a paragraph after a trailing table, so one is appended
/// when the body ends with a table.
pub fn document_element(model: &DocxModel) -> Element {
    let mut body = Element::new("w:body")
        .children_from(model.body().iter().filter_map(|block| block_element(model, block)));
    if matches!(model.body().last(), Some(Block::Table { .. })) {
        body.push(Element::new("w:p"));
    }
    body.push(section_properties(model.page()));

    Element::new("w:document")
        .attr("xmlns:r", ns::OFC_RELATIONSHIPS)
        .attr("xmlns:wp", ns::DML_WORDPROCESSING_DRAWING)
        .attr("xmlns:w", ns::WML_MAIN)
        .attr("xmlns:a", ns::DML_MAIN)
        .attr("xmlns:pic", ns::DML_PICTURE)
        .attr("xmlns:c", ns::DML_CHART)
        .child(body)
}
