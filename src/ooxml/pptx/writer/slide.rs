/// The slide part, `ppt/slides/slide{n}.xml`.
use crate::common::xml::Element;
use crate::ooxml::opc::constants::namespace as ns;
use crate::ooxml::pptx::slide::{Slide, SlideItem};
use crate::ooxml::pptx::writer::shape::{
    chart_frame_element, picture_element, solid_fill, text_shape_element,
};
use crate::ooxml::pptx::writer::table::table_frame_element;

/// The group properties every shape tree starts with.
pub(crate) fn shape_tree() -> Element {
    let zero = |name: &str, a: &str, b: &str| Element::new(name).attr(a, 0).attr(b, 0);
    Element::new("p:spTree")
        .child(
            Element::new("p:nvGrpSpPr")
                .child(Element::new("p:cNvPr").attr("id", 1).attr("name", ""))
                .child(Element::new("p:cNvGrpSpPr"))
                .child(Element::new("p:nvPr")),
        )
        .child(
            Element::new("p:grpSpPr").child(
                Element::new("a:xfrm")
                    .child(zero("a:off", "x", "y"))
                    .child(zero("a:ext", "cx", "cy"))
                    .child(zero("a:chOff", "x", "y"))
                    .child(zero("a:chExt", "cx", "cy")),
            ),
        )
}

fn item_element(item: &SlideItem) -> Element {
    match item {
        SlideItem::Text { id, text, options } => text_shape_element(*id, text, options),
        SlideItem::Picture {
            id,
            r_id,
            frame,
            description,
        } => picture_element(*id, r_id, *frame, description),
        SlideItem::Chart { id, r_id, frame } => chart_frame_element(*id, r_id, *frame),
        SlideItem::Table { id, rows, options } => table_frame_element(*id, rows, options),
    }
}

/// Build `p:sld`.
pub fn slide_element(slide: &Slide) -> Element {
    let background = slide.background().map(|color| {
        Element::new("p:bg").child(
            Element::new("p:bgPr")
                .child(solid_fill(color))
                .child(Element::new("a:effectLst")),
        )
    });

    Element::new("p:sld")
        .attr("xmlns:a", ns::DML_MAIN)
        .attr("xmlns:r", ns::OFC_RELATIONSHIPS)
        .attr("xmlns:p", ns::PML_MAIN)
        .child(
            Element::new("p:cSld")
                .child_opt(background)
                .child(shape_tree().children_from(slide.items().iter().map(item_element))),
        )
        .child(Element::new("p:clrMapOvr").child(Element::new("a:masterClrMapping")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::xml::{SerializeOptions, to_xml_string};
    use crate::ooxml::pptx::slide::ShapeOptions;

    #[test]
    fn test_empty_slide() {
        let slide = Slide::new("/ppt/slides/slide1.xml".to_string(), 256, "rId6".to_string());
        let out = to_xml_string(&slide_element(&slide), &SerializeOptions::fragment());
        assert!(out.contains(r#"<p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/>"#));
        assert!(out.ends_with(r#"</p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#));
        assert!(!out.contains("p:bg"));
    }

    #[test]
    fn test_background_precedes_tree() {
        let mut slide = Slide::new("/ppt/slides/slide1.xml".to_string(), 256, "rId6".to_string());
        slide.set_background("003366");
        slide.push(SlideItem::Text {
            id: 2,
            text: "Title".to_string(),
            options: ShapeOptions::default(),
        });
        let out = to_xml_string(&slide_element(&slide), &SerializeOptions::fragment());
        assert!(out.contains(
            r#"<p:cSld><p:bg><p:bgPr><a:solidFill><a:srgbClr val="003366"/></a:solidFill><a:effectLst/></p:bgPr></p:bg><p:spTree>"#
        ));
        assert!(out.contains(r#"<a:t>Title</a:t>"#));
    }
}
