/// Shape markup for PPTX slides.
use crate::common::unit::{pt_to_centipoints, pt_to_emu};
use crate::common::xml::Element;
use crate::ooxml::common::table::{Align, VAlign};
use crate::ooxml::opc::constants::namespace as ns;
use crate::ooxml::pptx::slide::{Frame, ShapeOptions, text_frame};

/// `a:algn` value of an alignment.
pub(crate) fn algn(align: Align) -> &'static str {
    match align {
        Align::Left => "l",
        Align::Center => "ctr",
        Align::Right => "r",
        Align::Justify => "just",
    }
}

/// `anchor` value of a vertical alignment.
pub(crate) fn anchor(valign: VAlign) -> &'static str {
    match valign {
        VAlign::Top => "t",
        VAlign::Center => "ctr",
        VAlign::Bottom => "b",
    }
}

pub(crate) fn solid_fill(color: &str) -> Element {
    Element::new("a:solidFill").child(Element::val("a:srgbClr", color.trim_start_matches('#')))
}

fn xfrm(name: &str, frame: Frame) -> Element {
    Element::new(name)
        .child(Element::new("a:off").attr("x", frame.x).attr("y", frame.y))
        .child(Element::new("a:ext").attr("cx", frame.cx).attr("cy", frame.cy))
}

fn rect_geometry() -> Element {
    Element::new("a:prstGeom").attr("prst", "rect").child(Element::new("a:avLst"))
}

/// Run properties of DrawingML text.
pub(crate) fn run_properties(
    font_face: Option<&str>,
    font_size: Option<f64>,
    bold: bool,
    italic: bool,
    underline: bool,
    color: Option<&str>,
) -> Element {
    let mut rpr = Element::new("a:rPr").attr("lang", "en-US").attr("dirty", 0);
    if let Some(size) = font_size {
        rpr.set_attr("sz", pt_to_centipoints(size));
    }
    if bold {
        rpr.set_attr("b", true);
    }
    if italic {
        rpr.set_attr("i", true);
    }
    if underline {
        rpr.set_attr("u", "sng");
    }
    rpr.child_opt(color.map(solid_fill))
        .child_opt(font_face.map(|face| Element::new("a:latin").attr("typeface", face)))
}

/// Build `p:sp` for a text box.
pub fn text_shape_element(id: u32, text: &str, options: &ShapeOptions) -> Element {
    let fill = match &options.fill {
        Some(color) => solid_fill(color),
        None => Element::new("a:noFill"),
    };
    let line = options.line.as_deref().map(|color| {
        let mut ln = Element::new("a:ln").child(solid_fill(color));
        if let Some(width) = options.line_width {
            ln.set_attr("w", pt_to_emu(width));
        }
        ln
    });

    let mut body_pr = Element::new("a:bodyPr").attr("wrap", "square").attr("rtlCol", 0);
    if let Some(v) = options.valign {
        body_pr.set_attr("anchor", anchor(v));
    }
    let body_pr = body_pr.child(Element::new("a:spAutoFit"));

    let paragraphs = text.split('\n').map(|line| {
        let ppr = options
            .align
            .map(|a| Element::new("a:pPr").attr("algn", algn(a)));
        let rpr = run_properties(
            options.font_face.as_deref(),
            options.font_size,
            options.bold,
            options.italic,
            options.underline,
            options.color.as_deref(),
        );
        let end = Element::new("a:endParaRPr").attr("lang", "en-US").attr("dirty", 0);
        let p = Element::new("a:p").child_opt(ppr);
        if line.is_empty() {
            p.child(end)
        } else {
            p.child(
                Element::new("a:r")
                    .child(rpr)
                    .child(Element::new("a:t").text(line)),
            )
        }
    });

    Element::new("p:sp")
        .child(
            Element::new("p:nvSpPr")
                .child(
                    Element::new("p:cNvPr")
                        .attr("id", id)
                        .attr("name", format!("TextBox {}", id - 1)),
                )
                .child(Element::new("p:cNvSpPr").attr("txBox", true))
                .child(Element::new("p:nvPr")),
        )
        .child(
            Element::new("p:spPr")
                .child(xfrm("a:xfrm", text_frame(options)))
                .child(rect_geometry())
                .child(fill)
                .child_opt(line),
        )
        .child(
            Element::new("p:txBody")
                .child(body_pr)
                .child(Element::new("a:lstStyle"))
                .children_from(paragraphs),
        )
}

/// Build `p:pic` for a picture under relationship `r_id`.
pub fn picture_element(id: u32, r_id: &str, frame: Frame, description: &str) -> Element {
    let mut c_nv_pr = Element::new("p:cNvPr")
        .attr("id", id)
        .attr("name", format!("Picture {}", id - 1));
    if !description.is_empty() {
        c_nv_pr.set_attr("descr", description);
    }
    Element::new("p:pic")
        .child(
            Element::new("p:nvPicPr")
                .child(c_nv_pr)
                .child(
                    Element::new("p:cNvPicPr")
                        .child(Element::new("a:picLocks").attr("noChangeAspect", true)),
                )
                .child(Element::new("p:nvPr")),
        )
        .child(
            Element::new("p:blipFill")
                .child(Element::new("a:blip").attr("r:embed", r_id))
                .child(Element::new("a:stretch").child(Element::new("a:fillRect"))),
        )
        .child(
            Element::new("p:spPr")
                .child(xfrm("a:xfrm", frame))
                .child(rect_geometry()),
        )
}

/// Build a `p:graphicFrame` holding `graphic_data`.
pub(crate) fn graphic_frame(id: u32, name: String, frame: Frame, locks: Option<Element>, graphic_data: Element) -> Element {
    Element::new("p:graphicFrame")
        .child(
            Element::new("p:nvGraphicFramePr")
                .child(Element::new("p:cNvPr").attr("id", id).attr("name", name))
                .child(Element::new("p:cNvGraphicFramePr").child_opt(locks))
                .child(Element::new("p:nvPr")),
        )
        .child(xfrm("p:xfrm", frame))
        .child(Element::new("a:graphic").child(graphic_data))
}

/// Build the frame of a chart under relationship `r_id`.
pub fn chart_frame_element(id: u32, r_id: &str, frame: Frame) -> Element {
    graphic_frame(
        id,
        format!("Chart {}", id - 1),
        frame,
        None,
        Element::new("a:graphicData").attr("uri", ns::DML_CHART).child(
            Element::new("c:chart")
                .attr("xmlns:c", ns::DML_CHART)
                .attr("xmlns:r", ns::OFC_RELATIONSHIPS)
                .attr("r:id", r_id),
        ),
    )
}
