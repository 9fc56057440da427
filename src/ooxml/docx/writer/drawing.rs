/// Inline DrawingML objects (pictures and charts) inside runs.
use crate::common::xml::Element;
use crate::ooxml::opc::constants::namespace as ns;

/// Wrap a graphic in `w:drawing/wp:inline` of the given extent in EMUs.
pub fn inline_drawing(drawing_id: u32, (cx, cy): (i64, i64), name: &str, description: &str, graphic: Element) -> Element {
    let mut doc_pr = Element::new("wp:docPr").attr("id", drawing_id).attr("name", name);
    if !description.is_empty() {
        doc_pr.set_attr("descr", description);
    }

    let locks = match graphic.find_path(&["a:graphicData"]).and_then(|d| d.attr_text("uri")) {
        Some(uri) if uri == ns::DML_PICTURE => Element::new("a:graphicFrameLocks")
            .attr("xmlns:a", ns::DML_MAIN)
            .attr("noChangeAspect", true),
        _ => Element::new("a:graphicFrameLocks").attr("xmlns:a", ns::DML_MAIN),
    };

    Element::new("w:drawing").child(
        Element::new("wp:inline")
            .attr("distT", 0)
            .attr("distB", 0)
            .attr("distL", 0)
            .attr("distR", 0)
            .child(Element::new("wp:extent").attr("cx", cx).attr("cy", cy))
            .child(
                Element::new("wp:effectExtent")
                    .attr("l", 0)
                    .attr("t", 0)
                    .attr("r", 0)
                    .attr("b", 0),
            )
            .child(doc_pr)
            .child(Element::new("wp:cNvGraphicFramePr").child(locks))
            .child(graphic),
    )
}

/// `a:graphic` for a picture stored under relationship `r_id`.
pub fn picture_graphic(r_id: &str, drawing_id: u32, (cx, cy): (i64, i64), name: &str) -> Element {
    let pic = Element::new("pic:pic")
        .attr("xmlns:pic", ns::DML_PICTURE)
        .child(
            Element::new("pic:nvPicPr")
                .child(Element::new("pic:cNvPr").attr("id", drawing_id).attr("name", name))
                .child(Element::new("pic:cNvPicPr")),
        )
        .child(
            Element::new("pic:blipFill")
                .child(Element::new("a:blip").attr("r:embed", r_id))
                .child(Element::new("a:stretch").child(Element::new("a:fillRect"))),
        )
        .child(
            Element::new("pic:spPr")
                .child(
                    Element::new("a:xfrm")
                        .child(Element::new("a:off").attr("x", 0).attr("y", 0))
                        .child(Element::new("a:ext").attr("cx", cx).attr("cy", cy)),
                )
                .child(Element::new("a:prstGeom").attr("prst", "rect").child(Element::new("a:avLst"))),
        );

    Element::new("a:graphic")
        .attr("xmlns:a", ns::DML_MAIN)
        .child(Element::new("a:graphicData").attr("uri", ns::DML_PICTURE).child(pic))
}

/// `a:graphic` referencing a chart part under relationship `r_id`.
pub fn chart_graphic(r_id: &str) -> Element {
    Element::new("a:graphic").attr("xmlns:a", ns::DML_MAIN).child(
        Element::new("a:graphicData").attr("uri", ns::DML_CHART).child(
            Element::new("c:chart")
                .attr("xmlns:c", ns::DML_CHART)
                .attr("xmlns:r", ns::OFC_RELATIONSHIPS)
                .attr("r:id", r_id),
        ),
    )
}
