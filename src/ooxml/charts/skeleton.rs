//! Chart skeletons: the unpopulated `c:chartSpace` tree of each chart kind.
//!
//! Every call builds a new tree, so charts built from the same kind never
//! share nodes. The child-order table for the chart vocabulary lives here
//! too; it decides where merged and inserted nodes land.

use crate::common::xml::Element;
use crate::ooxml::charts::kind::{AxisOptions, ChartKind, PieOptions};
use crate::ooxml::charts::types::{AxisOrientation, LegendPosition};
use crate::ooxml::opc::constants::namespace as ns;

/// Axis id of the category axis. Ids only need to be unique within one chart.
pub const CAT_AXIS_ID: u32 = 64451712;
/// Axis id of the value axis.
pub const VAL_AXIS_ID: u32 = 64453248;

/// Relationship id of the embedded workbook in every chart's own `.rels`.
pub const EXTERNAL_DATA_RID: &str = "rId1";

/// Schema sequence of children for elements of the chart vocabulary.
pub fn chart_child_order(parent: &str) -> Option<&'static [&'static str]> {
    let order: &'static [&'static str] = match parent {
        "c:chartSpace" => &[
            "c:date1904",
            "c:lang",
            "c:roundedCorners",
            "c:style",
            "c:clrMapOvr",
            "c:pivotSource",
            "c:protection",
            "c:chart",
            "c:spPr",
            "c:txPr",
            "c:externalData",
            "c:printSettings",
            "c:userShapes",
            "c:extLst",
        ],
        "c:chart" => &[
            "c:title",
            "c:autoTitleDeleted",
            "c:pivotFmts",
            "c:view3D",
            "c:floor",
            "c:sideWall",
            "c:backWall",
            "c:plotArea",
            "c:legend",
            "c:plotVisOnly",
            "c:dispBlanksAs",
            "c:showDLblsOverMax",
            "c:extLst",
        ],
        "c:plotArea" => &[
            "c:layout",
            "c:barChart",
            "c:lineChart",
            "c:areaChart",
            "c:pieChart",
            "c:doughnutChart",
            "c:catAx",
            "c:valAx",
            "c:dTable",
            "c:spPr",
            "c:extLst",
        ],
        "c:barChart" => &[
            "c:barDir",
            "c:grouping",
            "c:varyColors",
            "c:ser",
            "c:dLbls",
            "c:gapWidth",
            "c:overlap",
            "c:serLines",
            "c:axId",
            "c:extLst",
        ],
        "c:lineChart" => &[
            "c:grouping",
            "c:varyColors",
            "c:ser",
            "c:dLbls",
            "c:dropLines",
            "c:hiLowLines",
            "c:upDownBars",
            "c:marker",
            "c:smooth",
            "c:axId",
            "c:extLst",
        ],
        "c:areaChart" => &[
            "c:grouping",
            "c:varyColors",
            "c:ser",
            "c:dLbls",
            "c:dropLines",
            "c:axId",
            "c:extLst",
        ],
        "c:pieChart" => &["c:varyColors", "c:ser", "c:dLbls", "c:firstSliceAng", "c:extLst"],
        "c:doughnutChart" => &[
            "c:varyColors",
            "c:ser",
            "c:dLbls",
            "c:firstSliceAng",
            "c:holeSize",
            "c:extLst",
        ],
        "c:catAx" => &[
            "c:axId",
            "c:scaling",
            "c:delete",
            "c:axPos",
            "c:majorGridlines",
            "c:minorGridlines",
            "c:title",
            "c:numFmt",
            "c:majorTickMark",
            "c:minorTickMark",
            "c:tickLblPos",
            "c:spPr",
            "c:txPr",
            "c:crossAx",
            "c:crosses",
            "c:crossesAt",
            "c:auto",
            "c:lblAlgn",
            "c:lblOffset",
            "c:tickLblSkip",
            "c:tickMarkSkip",
            "c:noMultiLvlLbl",
            "c:extLst",
        ],
        "c:valAx" => &[
            "c:axId",
            "c:scaling",
            "c:delete",
            "c:axPos",
            "c:majorGridlines",
            "c:minorGridlines",
            "c:title",
            "c:numFmt",
            "c:majorTickMark",
            "c:minorTickMark",
            "c:tickLblPos",
            "c:spPr",
            "c:txPr",
            "c:crossAx",
            "c:crosses",
            "c:crossesAt",
            "c:crossBetween",
            "c:majorUnit",
            "c:minorUnit",
            "c:dispUnits",
            "c:extLst",
        ],
        "c:scaling" => &["c:logBase", "c:orientation", "c:max", "c:min", "c:extLst"],
        "c:ser" => &[
            "c:idx",
            "c:order",
            "c:tx",
            "c:spPr",
            "c:invertIfNegative",
            "c:pictureOptions",
            "c:marker",
            "c:explosion",
            "c:dPt",
            "c:dLbls",
            "c:trendline",
            "c:errBars",
            "c:cat",
            "c:val",
            "c:smooth",
            "c:shape",
            "c:extLst",
        ],
        "c:dPt" => &[
            "c:idx",
            "c:invertIfNegative",
            "c:marker",
            "c:bubble3D",
            "c:explosion",
            "c:spPr",
            "c:extLst",
        ],
        "c:legend" => &[
            "c:legendPos",
            "c:legendEntry",
            "c:layout",
            "c:overlay",
            "c:spPr",
            "c:txPr",
            "c:extLst",
        ],
        "c:title" => &["c:tx", "c:layout", "c:overlay", "c:spPr", "c:txPr", "c:extLst"],
        "c:dLbls" => &[
            "c:dLbl",
            "c:delete",
            "c:numFmt",
            "c:spPr",
            "c:txPr",
            "c:dLblPos",
            "c:showLegendKey",
            "c:showVal",
            "c:showCatName",
            "c:showSerName",
            "c:showPercent",
            "c:showBubbleSize",
            "c:separator",
            "c:showLeaderLines",
            "c:extLst",
        ],
        _ => return None,
    };
    Some(order)
}

/// Build the skeleton for `kind`.
pub fn skeleton(kind: &ChartKind, legend: Option<LegendPosition>) -> Element {
    let mut plot_area = Element::new("c:plotArea")
        .child(Element::new("c:layout"))
        .child(type_node(kind));

    if let Some(axis) = kind.axis_options() {
        // Bars grow from the left axis; everything else from the bottom one.
        let horizontal = matches!(kind, ChartKind::Bar(_) | ChartKind::GroupBar(_));
        let (cat_pos, val_pos) = if horizontal { ("l", "b") } else { ("b", "l") };
        plot_area.push(category_axis(axis, cat_pos));
        plot_area.push(value_axis(axis, val_pos));
    }

    let chart = Element::new("c:chart")
        .child(Element::val("c:autoTitleDeleted", true))
        .child(plot_area)
        .child_opt(legend.map(legend_node))
        .child(Element::val("c:plotVisOnly", true))
        .child(Element::val("c:dispBlanksAs", "gap"));

    Element::new("c:chartSpace")
        .attr("xmlns:c", ns::DML_CHART)
        .attr("xmlns:a", ns::DML_MAIN)
        .attr("xmlns:r", ns::OFC_RELATIONSHIPS)
        .child(Element::val("c:date1904", false))
        .child(Element::val("c:lang", "en-US"))
        .child(Element::val("c:roundedCorners", false))
        .child(chart)
        .child(
            Element::new("c:externalData")
                .attr("r:id", EXTERNAL_DATA_RID)
                .child(Element::val("c:autoUpdate", false)),
        )
}

fn axis_ids() -> [Element; 2] {
    [
        Element::val("c:axId", CAT_AXIS_ID),
        Element::val("c:axId", VAL_AXIS_ID),
    ]
}

fn type_node(kind: &ChartKind) -> Element {
    let node = Element::new(kind.type_node());
    match kind {
        ChartKind::Bar(_)
        | ChartKind::Column(_)
        | ChartKind::StackedColumn(_)
        | ChartKind::GroupBar(_) => {
            let Some((dir, grouping, opts)) = kind.bar_layout() else {
                return node;
            };
            node.child(Element::val("c:barDir", dir.xml_value()))
                .child(Element::val("c:grouping", grouping.xml_value()))
                .child(Element::val("c:varyColors", false))
                .child(Element::val("c:gapWidth", opts.gap_width))
                .child(Element::val("c:overlap", opts.overlap))
                .children_from(axis_ids())
        },
        ChartKind::Line(_) => node
            .child(Element::val("c:grouping", "standard"))
            .child(Element::val("c:varyColors", false))
            .child(Element::val("c:marker", true))
            .children_from(axis_ids()),
        ChartKind::Area(_) => node
            .child(Element::val("c:grouping", "standard"))
            .child(Element::val("c:varyColors", false))
            .children_from(axis_ids()),
        ChartKind::Pie(opts) => node
            .child(Element::val("c:varyColors", true))
            .child(pie_labels(opts))
            .child(Element::val("c:firstSliceAng", 0)),
        ChartKind::Doughnut(opts) => node
            .child(Element::val("c:varyColors", true))
            .child(pie_labels(opts))
            .child(Element::val("c:firstSliceAng", 0))
            .child(Element::val("c:holeSize", opts.hole_size)),
    }
}

fn pie_labels(opts: &PieOptions) -> Element {
    Element::new("c:dLbls")
        .child(Element::val("c:showLegendKey", false))
        .child(Element::val("c:showVal", opts.show_value))
        .child(Element::val("c:showCatName", false))
        .child(Element::val("c:showSerName", false))
        .child(Element::val("c:showPercent", opts.show_percent))
        .child(Element::val("c:showBubbleSize", false))
        .child(Element::val("c:showLeaderLines", true))
}

fn scaling(orientation: AxisOrientation) -> Element {
    Element::new("c:scaling").child(Element::val("c:orientation", orientation.xml_value()))
}

fn category_axis(axis: &AxisOptions, pos: &str) -> Element {
    Element::new("c:catAx")
        .child(Element::val("c:axId", CAT_AXIS_ID))
        .child(scaling(axis.cat_orientation()))
        .child(Element::val("c:delete", false))
        .child(Element::val("c:axPos", pos))
        .child(
            Element::new("c:numFmt")
                .attr("formatCode", "General")
                .attr("sourceLinked", false),
        )
        .child(Element::val("c:majorTickMark", "out"))
        .child(Element::val("c:minorTickMark", "none"))
        .child(Element::val("c:tickLblPos", "nextTo"))
        .child(Element::val("c:crossAx", VAL_AXIS_ID))
        .child(Element::val("c:crosses", "autoZero"))
        .child(Element::val("c:auto", true))
        .child(Element::val("c:lblAlgn", "ctr"))
        .child(Element::val("c:lblOffset", 100))
        .child(Element::val("c:noMultiLvlLbl", false))
}

fn value_axis(axis: &AxisOptions, pos: &str) -> Element {
    Element::new("c:valAx")
        .child(Element::val("c:axId", VAL_AXIS_ID))
        .child(scaling(AxisOrientation::MinMax))
        .child(Element::val("c:delete", false))
        .child(Element::val("c:axPos", pos))
        .child(Element::new("c:majorGridlines"))
        .child(
            Element::new("c:numFmt")
                .attr("formatCode", "General")
                .attr("sourceLinked", true),
        )
        .child(Element::val("c:majorTickMark", "out"))
        .child(Element::val("c:minorTickMark", "none"))
        .child(Element::val("c:tickLblPos", "nextTo"))
        .child(Element::val("c:crossAx", CAT_AXIS_ID))
        .child(Element::val("c:crosses", axis.val_crosses()))
        .child(Element::val("c:crossBetween", "between"))
}

fn legend_node(pos: LegendPosition) -> Element {
    Element::new("c:legend")
        .child(Element::val("c:legendPos", pos.xml_value()))
        .child(Element::val("c:overlay", false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::charts::descriptor::ChartDescriptor;

    fn kind(name: &str, desc: &ChartDescriptor) -> ChartKind {
        ChartKind::parse(name, desc).unwrap()
    }

    fn val_of(tree: &Element, path: &[&str]) -> Option<String> {
        tree.find_path(path).and_then(|e| e.attr_text("val"))
    }

    #[test]
    fn test_column_skeleton() {
        let tree = skeleton(&kind("column", &ChartDescriptor::default()), Some(LegendPosition::Right));
        let bar = tree.find_path(&["c:chart", "c:plotArea", "c:barChart"]).unwrap();
        assert_eq!(val_of(bar, &["c:barDir"]).as_deref(), Some("col"));
        assert_eq!(val_of(bar, &["c:overlap"]).as_deref(), Some("0"));
        assert_eq!(val_of(bar, &["c:gapWidth"]).as_deref(), Some("150"));
        assert_eq!(val_of(&tree, &["c:chart", "c:legend", "c:legendPos"]).as_deref(), Some("r"));
        assert_eq!(
            tree.find("c:externalData").and_then(|e| e.attr_text("r:id")).as_deref(),
            Some(EXTERNAL_DATA_RID)
        );
    }

    #[test]
    fn test_axis_options() {
        let desc = ChartDescriptor {
            cat_axis_reverse_order: Some(true),
            val_axis_cross_at_max_category: Some(true),
            ..Default::default()
        };
        let tree = skeleton(&kind("bar", &desc), None);
        assert_eq!(
            val_of(&tree, &["c:chart", "c:plotArea", "c:catAx", "c:scaling", "c:orientation"]).as_deref(),
            Some("maxMin")
        );
        assert_eq!(val_of(&tree, &["c:chart", "c:plotArea", "c:valAx", "c:crosses"]).as_deref(), Some("max"));
        assert_eq!(val_of(&tree, &["c:chart", "c:plotArea", "c:catAx", "c:axPos"]).as_deref(), Some("l"));
        assert!(tree.find_path(&["c:chart", "c:legend"]).is_none());
    }

    #[test]
    fn test_pie_has_no_axes() {
        let tree = skeleton(&kind("doughnut", &ChartDescriptor::default()), Some(LegendPosition::Bottom));
        let plot = tree.find_path(&["c:chart", "c:plotArea"]).unwrap();
        assert!(plot.find("c:catAx").is_none());
        assert!(plot.find("c:valAx").is_none());
        assert_eq!(
            plot.find_path(&["c:doughnutChart", "c:holeSize"]).and_then(|e| e.attr_text("val")).as_deref(),
            Some("50")
        );
    }

    #[test]
    fn test_skeletons_are_independent() {
        let k = kind("line", &ChartDescriptor::default());
        let mut first = skeleton(&k, None);
        first
            .find_path_mut(&["c:chart", "c:plotArea", "c:lineChart"])
            .unwrap()
            .push(Element::new("c:ser"));
        let second = skeleton(&k, None);
        assert!(second
            .find_path(&["c:chart", "c:plotArea", "c:lineChart", "c:ser"])
            .is_none());
    }

    #[test]
    fn test_order_tables_cover_skeleton_children() {
        for name in ["bar", "column", "stacked-column", "group-bar", "line", "area", "pie", "doughnut"] {
            let tree = skeleton(&kind(name, &ChartDescriptor::default()), Some(LegendPosition::Top));
            check_order(&tree);
        }
    }

    fn check_order(el: &Element) {
        if let Some(order) = chart_child_order(el.name()) {
            let ranks: Vec<usize> = el
                .children()
                .iter()
                .map(|c| {
                    order
                        .iter()
                        .position(|n| *n == c.name())
                        .unwrap_or_else(|| panic!("{} not allowed in {}", c.name(), el.name()))
                })
                .collect();
            assert!(ranks.windows(2).all(|w| w[0] <= w[1]), "children of {} out of order", el.name());
        }
        el.children().iter().for_each(check_order);
    }
}
