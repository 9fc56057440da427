//! Slide master and slide layout.
//!
//! Every presentation carries one master with one blank layout; slides
//! take their formatting from the theme through them.

use crate::common::xml::Element;
use crate::ooxml::opc::constants::namespace as ns;
use crate::ooxml::pptx::writer::slide::shape_tree;

/// Id of the layout in the master's `p:sldLayoutIdLst`.
pub const SLIDE_LAYOUT_ID: u32 = 2_147_483_649;

fn color_map() -> Element {
    [
        ("bg1", "lt1"),
        ("tx1", "dk1"),
        ("bg2", "lt2"),
        ("tx2", "dk2"),
        ("accent1", "accent1"),
        ("accent2", "accent2"),
        ("accent3", "accent3"),
        ("accent4", "accent4"),
        ("accent5", "accent5"),
        ("accent6", "accent6"),
        ("hlink", "hlink"),
        ("folHlink", "folHlink"),
    ]
    .into_iter()
    .fold(Element::new("p:clrMap"), |map, (k, v)| map.attr(k, v))
}

fn text_style(name: &str, size: u32, font: &str, color: &str) -> Element {
    Element::new(name).child(
        Element::new("a:lvl1pPr")
            .attr("algn", "l")
            .attr("defTabSz", 914_400)
            .attr("rtl", 0)
            .child(
                Element::new("a:defRPr")
                    .attr("sz", size)
                    .attr("kern", 1200)
                    .child(Element::new("a:solidFill").child(Element::val("a:schemeClr", color)))
                    .child(Element::new("a:latin").attr("typeface", font)),
            ),
    )
}

/// Build `ppt/slideMasters/slideMaster1.xml`.
///
/// `layout_rid` is the layout's relationship id in the master's
/// relationships.
pub fn slide_master_element(layout_rid: &str) -> Element {
    Element::new("p:sldMaster")
        .attr("xmlns:a", ns::DML_MAIN)
        .attr("xmlns:r", ns::OFC_RELATIONSHIPS)
        .attr("xmlns:p", ns::PML_MAIN)
        .child(
            Element::new("p:cSld")
                .child(
                    Element::new("p:bg").child(
                        Element::new("p:bgRef")
                            .attr("idx", 1001)
                            .child(Element::val("a:schemeClr", "bg1")),
                    ),
                )
                .child(shape_tree()),
        )
        .child(color_map())
        .child(
            Element::new("p:sldLayoutIdLst").child(
                Element::new("p:sldLayoutId")
                    .attr("id", SLIDE_LAYOUT_ID)
                    .attr("r:id", layout_rid),
            ),
        )
        .child(
            Element::new("p:txStyles")
                .child(text_style("p:titleStyle", 4400, "+mj-lt", "tx1"))
                .child(text_style("p:bodyStyle", 2800, "+mn-lt", "tx1"))
                .child(text_style("p:otherStyle", 1800, "+mn-lt", "tx1")),
        )
}

/// Build `ppt/slideLayouts/slideLayout1.xml`, a blank layout.
pub fn slide_layout_element() -> Element {
    Element::new("p:sldLayout")
        .attr("xmlns:a", ns::DML_MAIN)
        .attr("xmlns:r", ns::OFC_RELATIONSHIPS)
        .attr("xmlns:p", ns::PML_MAIN)
        .attr("type", "blank")
        .attr("preserve", true)
        .child(Element::new("p:cSld").attr("name", "Blank").child(shape_tree()))
        .child(Element::new("p:clrMapOvr").child(Element::new("a:masterClrMapping")))
}
