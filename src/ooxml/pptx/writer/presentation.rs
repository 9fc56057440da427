/// Presentation-level parts: `presentation.xml` and its property parts.
use crate::common::xml::Element;
use crate::ooxml::opc::constants::namespace as ns;
use crate::ooxml::pptx::slide::Slide;

/// Id of the only slide master in `p:sldMasterIdLst`.
pub const SLIDE_MASTER_ID: u32 = 2_147_483_648;

/// Build `ppt/presentation.xml`.
///
/// `master_rid` is the master's relationship id in the presentation's
/// relationships; slides carry their own.
pub fn presentation_element(slides: &[Slide], master_rid: &str, (cx, cy): (i64, i64)) -> Element {
    let slide_list = (!slides.is_empty()).then(|| {
        Element::new("p:sldIdLst").children_from(slides.iter().map(|slide| {
            Element::new("p:sldId")
                .attr("id", slide.slide_id())
                .attr("r:id", slide.r_id())
        }))
    });

    let level = |n: u32| {
        Element::new(format!("a:lvl{}pPr", n))
            .attr("marL", (n as i64 - 1) * 457_200)
            .attr("algn", "l")
            .attr("defTabSz", 914_400)
            .attr("rtl", 0)
            .attr("eaLnBrk", 1)
            .attr("latinLnBrk", 0)
            .attr("hangingPunct", 1)
            .child(
                Element::new("a:defRPr")
                    .attr("sz", 1800)
                    .attr("kern", 1200)
                    .child(Element::new("a:solidFill").child(Element::val("a:schemeClr", "tx1")))
                    .child(Element::new("a:latin").attr("typeface", "+mn-lt"))
                    .child(Element::new("a:ea").attr("typeface", "+mn-ea"))
                    .child(Element::new("a:cs").attr("typeface", "+mn-cs")),
            )
    };

    Element::new("p:presentation")
        .attr("xmlns:a", ns::DML_MAIN)
        .attr("xmlns:r", ns::OFC_RELATIONSHIPS)
        .attr("xmlns:p", ns::PML_MAIN)
        .attr("saveSubsetFonts", true)
        .child(
            Element::new("p:sldMasterIdLst").child(
                Element::new("p:sldMasterId")
                    .attr("id", SLIDE_MASTER_ID)
                    .attr("r:id", master_rid),
            ),
        )
        .child_opt(slide_list)
        .child(Element::new("p:sldSz").attr("cx", cx).attr("cy", cy))
        .child(Element::new("p:notesSz").attr("cx", cy).attr("cy", cx))
        .child(
            Element::new("p:defaultTextStyle")
                .child(Element::new("a:defPPr").child(Element::new("a:defRPr").attr("lang", "en-US")))
                .children_from((1..=9).map(level)),
        )
}

/// Build `ppt/presProps.xml`.
pub fn pres_props_element() -> Element {
    Element::new("p:presentationPr")
        .attr("xmlns:a", ns::DML_MAIN)
        .attr("xmlns:r", ns::OFC_RELATIONSHIPS)
        .attr("xmlns:p", ns::PML_MAIN)
}

/// Build `ppt/viewProps.xml`.
pub fn view_props_element() -> Element {
    let scale = || {
        Element::new("p:scale")
            .child(Element::new("a:sx").attr("n", 100).attr("d", 100))
            .child(Element::new("a:sy").attr("n", 100).attr("d", 100))
    };
    Element::new("p:viewPr")
        .attr("xmlns:a", ns::DML_MAIN)
        .attr("xmlns:r", ns::OFC_RELATIONSHIPS)
        .attr("xmlns:p", ns::PML_MAIN)
        .child(
            Element::new("p:normalViewPr").child(
                Element::new("p:restoredLeft")
                    .attr("sz", 15620)
                    .attr("autoAdjust", 0),
            ),
        )
        .child(
            Element::new("p:slideViewPr").child(
                Element::new("p:cSldViewPr").child(
                    Element::new("p:cViewPr")
                        .attr("varScale", 1)
                        .child(scale())
                        .child(Element::new("p:origin").attr("x", 0).attr("y", 0)),
                ),
            ),
        )
        .child(
            Element::new("p:notesTextViewPr").child(
                Element::new("p:cViewPr")
                    .child(scale())
                    .child(Element::new("p:origin").attr("x", 0).attr("y", 0)),
            ),
        )
        .child(Element::new("p:gridSpacing").attr("cx", 76200).attr("cy", 76200))
}

/// Build `ppt/tableStyles.xml`, defaulting to Medium Style 2 - Accent 1.
pub fn table_styles_element() -> Element {
    Element::new("a:tblStyleLst")
        .attr("xmlns:a", ns::DML_MAIN)
        .attr("def", "{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::xml::{SerializeOptions, to_xml_string};

    #[test]
    fn test_slide_list() {
        let slides = vec![
            Slide::new("/ppt/slides/slide1.xml".to_string(), 256, "rId6".to_string()),
            Slide::new("/ppt/slides/slide2.xml".to_string(), 257, "rId7".to_string()),
        ];
        let out = to_xml_string(
            &presentation_element(&slides, "rId1", (9_144_000, 6_858_000)),
            &SerializeOptions::fragment(),
        );
        assert!(out.contains(r#"<p:sldMasterId id="2147483648" r:id="rId1"/>"#));
        assert!(out.contains(
            r#"<p:sldIdLst><p:sldId id="256" r:id="rId6"/><p:sldId id="257" r:id="rId7"/></p:sldIdLst>"#
        ));
        assert!(out.contains(r#"<p:sldSz cx="9144000" cy="6858000"/><p:notesSz cx="6858000" cy="9144000"/>"#));
        assert!(out.contains(r#"<a:lvl9pPr marL="3657600""#));
    }

    #[test]
    fn test_no_slides() {
        let out = to_xml_string(&presentation_element(&[], "rId1", (1, 1)), &SerializeOptions::fragment());
        assert!(!out.contains("sldIdLst"));
    }
}
