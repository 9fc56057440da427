/// Paragraph and run markup for DOCX documents.
use crate::common::unit::pt_to_half_points;
use crate::common::xml::Element;
use crate::ooxml::common::table::Align;
use crate::ooxml::docx::paragraph::{Inline, Paragraph, ParagraphOptions, TextOptions};
use crate::ooxml::docx::writer::drawing::{inline_drawing, picture_graphic};
use crate::ooxml::docx::writer::w_val;

/// `w:jc` value of an alignment.
pub(crate) fn jc_value(align: Align) -> &'static str {
    match align {
        Align::Left => "left",
        Align::Center => "center",
        Align::Right => "right",
        Align::Justify => "both",
    }
}

/// Build `w:t`, preserving leading and trailing blanks.
pub(crate) fn text_element(text: &str) -> Element {
    let t = Element::new("w:t").text(text);
    if text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace) {
        t.attr("xml:space", "preserve")
    } else {
        t
    }
}

/// Build `w:rPr`, or `None` when the run has no formatting.
pub(crate) fn run_properties(options: &TextOptions, char_style: Option<&str>) -> Option<Element> {
    let mut rpr = Element::new("w:rPr")
        .child_opt(char_style.map(|s| w_val("w:rStyle", s)))
        .child_opt(options.font_face.as_deref().map(|face| {
            Element::new("w:rFonts")
                .attr("w:ascii", face)
                .attr("w:hAnsi", face)
                .attr("w:cs", face)
        }));
    if options.bold {
        rpr.push(Element::new("w:b"));
        rpr.push(Element::new("w:bCs"));
    }
    if options.italic {
        rpr.push(Element::new("w:i"));
        rpr.push(Element::new("w:iCs"));
    }
    let rpr = rpr
        .child_opt(
            options
                .color
                .as_deref()
                .map(|c| w_val("w:color", c.trim_start_matches('#'))),
        )
        .children_from(options.font_size.into_iter().flat_map(|pt| {
            let half_points = pt_to_half_points(pt);
            [w_val("w:sz", half_points), w_val("w:szCs", half_points)]
        }))
        .child_opt(options.highlight.as_deref().map(|h| w_val("w:highlight", h)))
        .child_opt(options.underline.then(|| w_val("w:u", "single")));

    (!rpr.children().is_empty()).then_some(rpr)
}

fn paragraph_properties(options: &ParagraphOptions, rule: bool) -> Option<Element> {
    let spacing = (options.spacing_before.is_some()
        || options.spacing_after.is_some()
        || options.line_spacing.is_some())
    .then(|| {
        let mut s = Element::new("w:spacing");
        if let Some(before) = options.spacing_before {
            s.set_attr("w:before", before);
        }
        if let Some(after) = options.spacing_after {
            s.set_attr("w:after", after);
        }
        if let Some(line) = options.line_spacing {
            s.set_attr("w:line", line);
            s.set_attr("w:lineRule", "auto");
        }
        s
    });

    let indent = (options.indent_left.is_some()
        || options.indent_right.is_some()
        || options.indent_first_line.is_some())
    .then(|| {
        let mut ind = Element::new("w:ind");
        if let Some(left) = options.indent_left {
            ind.set_attr("w:left", left);
        }
        if let Some(right) = options.indent_right {
            ind.set_attr("w:right", right);
        }
        match options.indent_first_line {
            Some(first) if first < 0 => ind.set_attr("w:hanging", -first),
            Some(first) => ind.set_attr("w:firstLine", first),
            None => {},
        }
        ind
    });

    let border = rule.then(|| {
        Element::new("w:pBdr").child(
            Element::new("w:bottom")
                .attr("w:val", "single")
                .attr("w:sz", 6)
                .attr("w:space", 1)
                .attr("w:color", "auto"),
        )
    });

    let ppr = Element::new("w:pPr")
        .child_opt(options.style.as_deref().map(|s| w_val("w:pStyle", s)))
        .child_opt(border)
        .child_opt(spacing)
        .child_opt(indent)
        .child_opt(options.align.map(|a| w_val("w:jc", jc_value(a))));

    (!ppr.children().is_empty()).then_some(ppr)
}

fn inline_element(item: &Inline) -> Element {
    match item {
        Inline::Text {
            text,
            options,
            link_rid,
        } => {
            let style = link_rid.as_ref().map(|_| "Hyperlink");
            let run = Element::new("w:r")
                .child_opt(run_properties(options, style))
                .child(text_element(text));
            match link_rid {
                Some(r_id) => Element::new("w:hyperlink")
                    .attr("r:id", r_id.as_str())
                    .attr("w:history", true)
                    .child(run),
                None => run,
            }
        },
        Inline::LineBreak => Element::new("w:r").child(Element::new("w:br")),
        Inline::Image {
            r_id,
            drawing_id,
            cx,
            cy,
            description,
        } => {
            let name = format!("Picture {}", drawing_id);
            Element::new("w:r").child(inline_drawing(
                *drawing_id,
                (*cx, *cy),
                &name,
                description,
                picture_graphic(r_id, *drawing_id, (*cx, *cy), &name),
            ))
        },
        Inline::BookmarkStart { id, name } => Element::new("w:bookmarkStart")
            .attr("w:id", *id)
            .attr("w:name", name.as_str()),
        Inline::BookmarkEnd { id } => Element::new("w:bookmarkEnd").attr("w:id", *id),
    }
}

/// Build `w:p` for a body paragraph.
pub fn paragraph_element(paragraph: &Paragraph) -> Element {
    Element::new("w:p")
        .child_opt(paragraph_properties(paragraph.options(), paragraph.has_rule()))
        .children_from(paragraph.content().iter().map(inline_element))
}

/// A paragraph holding only a page break.
pub fn page_break_element() -> Element {
    Element::new("w:p").child(Element::new("w:r").child(Element::new("w:br").attr("w:type", "page")))
}
