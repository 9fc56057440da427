//! `xl/styles.xml` for generated workbooks.
//!
//! Generated workbooks carry a single cell format; Excel still requires
//! the two reserved fills (`none` and `gray125`) and one font, border and
//! cell style record.

use crate::common::xml::Element;
use crate::ooxml::opc::constants::namespace as ns;

/// Default font size in points.
pub const DEFAULT_FONT_SIZE: u32 = 11;

/// Build the stylesheet, using `font_face` for the default font.
pub fn styles_element(font_face: &str) -> Element {
    let font = Element::new("font")
        .child(Element::val("sz", DEFAULT_FONT_SIZE))
        .child(Element::new("color").attr("theme", 1))
        .child(Element::val("name", font_face))
        .child(Element::val("family", 2))
        .child(Element::val("scheme", "minor"));

    let fill = |pattern: &str| {
        Element::new("fill").child(Element::new("patternFill").attr("patternType", pattern))
    };

    let border = Element::new("border")
        .child(Element::new("left"))
        .child(Element::new("right"))
        .child(Element::new("top"))
        .child(Element::new("bottom"))
        .child(Element::new("diagonal"));

    let xf = || {
        Element::new("xf")
            .attr("numFmtId", 0)
            .attr("fontId", 0)
            .attr("fillId", 0)
            .attr("borderId", 0)
    };

    Element::new("styleSheet")
        .attr("xmlns", ns::SML_MAIN)
        .child(Element::new("fonts").attr("count", 1).child(font))
        .child(
            Element::new("fills")
                .attr("count", 2)
                .child(fill("none"))
                .child(fill("gray125")),
        )
        .child(Element::new("borders").attr("count", 1).child(border))
        .child(Element::new("cellStyleXfs").attr("count", 1).child(xf()))
        .child(Element::new("cellXfs").attr("count", 1).child(xf().attr("xfId", 0)))
        .child(
            Element::new("cellStyles").attr("count", 1).child(
                Element::new("cellStyle")
                    .attr("name", "Normal")
                    .attr("xfId", 0)
                    .attr("builtinId", 0),
            ),
        )
        .child(Element::new("dxfs").attr("count", 0))
        .child(
            Element::new("tableStyles")
                .attr("count", 0)
                .attr("defaultTableStyle", "TableStyleMedium2")
                .attr("defaultPivotStyle", "PivotStyleLight16"),
        )
}
