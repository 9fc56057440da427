//! Chart assembly: skeleton + series + decorations → `c:chartSpace` tree.
//!
//! Decorations are merged in the fixed order of [`DECORATION_ORDER`]; each
//! one is an overlay tree merged last-applied-wins, so the raw `xml`
//! override can replace anything an earlier step produced, and only the
//! gridline toggles run after it.

use crate::common::unit::pt_to_centipoints;
use crate::common::xml::{Element, format_number};
use crate::ooxml::charts::descriptor::{ChartDescriptor, Series};
use crate::ooxml::charts::kind::ChartKind;
use crate::ooxml::charts::skeleton::{chart_child_order, skeleton};
use crate::ooxml::charts::types::LegendPosition;
use crate::ooxml::common::address::{column_letter, sheet_range_ref};
use crate::ooxml::error::{OoxmlError, Result};
use log::{debug, warn};

/// Sheet holding chart data in the embedded workbook.
pub const DATA_SHEET: &str = "Sheet1";

/// Number of accent slots cycled through for per-category colors.
const ACCENT_SLOTS: usize = 5;

/// One step of chart decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoration {
    Title,
    ValAxisTitle,
    CatAxisTitle,
    ValAxisNumFmt,
    ValAxisScaling,
    TextSize,
    RawXml,
    Gridlines,
}

/// The order decorations are applied in.
pub const DECORATION_ORDER: [Decoration; 8] = [
    Decoration::Title,
    Decoration::ValAxisTitle,
    Decoration::CatAxisTitle,
    Decoration::ValAxisNumFmt,
    Decoration::ValAxisScaling,
    Decoration::TextSize,
    Decoration::RawXml,
    Decoration::Gridlines,
];

/// Zero-based worksheet column of series `index` in the chart workbook.
///
/// Column A holds the category labels and column B stays empty.
#[inline]
pub const fn series_column(index: usize) -> u32 {
    2 + index as u32
}

/// Build the complete chart tree for a descriptor.
pub fn build_chart(desc: &ChartDescriptor) -> Result<Element> {
    let kind = desc
        .render_type
        .as_deref()
        .and_then(|t| ChartKind::parse(t, desc));

    let (mut tree, raw_base) = match (&kind, &desc.xml) {
        (Some(kind), _) => {
            let legend = match desc.show_legend {
                Some(false) => None,
                _ => Some(desc.legend_position.unwrap_or(LegendPosition::Right)),
            };
            (skeleton(kind, legend), false)
        },
        (None, Some(xml)) => {
            debug!("using caller-supplied chart tree as base");
            (xml.clone(), true)
        },
        (None, None) => {
            return Err(OoxmlError::UnsupportedChartType(
                desc.render_type.clone().unwrap_or_else(|| "<none>".to_string()),
            ));
        },
    };

    match &kind {
        Some(kind) => {
            validate(kind.name(), kind.is_categorical(), desc)?;
            debug!("building {} chart with {} series", kind.name(), desc.data.len());
        },
        None if !desc.data.is_empty() => validate("custom", is_categorical_tree(&tree), desc)?,
        None => {},
    }

    insert_series(&mut tree, kind.as_ref(), &desc.data);

    for step in DECORATION_ORDER {
        if step == Decoration::RawXml && raw_base {
            continue;
        }
        decorate(&mut tree, step, desc, kind.as_ref());
    }

    Ok(tree)
}

fn validate(kind: &str, categorical: bool, desc: &ChartDescriptor) -> Result<()> {
    let data = &desc.data;
    if data.is_empty() {
        return Err(OoxmlError::InvalidChartData(format!("{} chart has no series", kind)));
    }
    for series in data {
        if series.labels.len() != series.values.len() {
            return Err(OoxmlError::InvalidChartData(format!(
                "series '{}' has {} labels but {} values",
                series.name,
                series.labels.len(),
                series.values.len()
            )));
        }
        if series.values.is_empty() {
            return Err(OoxmlError::InvalidChartData(format!(
                "series '{}' has no data points",
                series.name
            )));
        }
        if let Some(v) = series.values.iter().find(|v| !v.is_finite()) {
            return Err(OoxmlError::InvalidChartData(format!(
                "series '{}' holds {}",
                series.name, v
            )));
        }
    }
    for (option, value) in [
        ("valAxisMinValue", desc.val_axis_min_value),
        ("valAxisMaxValue", desc.val_axis_max_value),
    ] {
        if let Some(v) = value.filter(|v| !v.is_finite()) {
            return Err(OoxmlError::InvalidChartData(format!("{} is {}", option, v)));
        }
    }
    if categorical && data.len() > 1 && data.iter().any(|s| s.colors.is_some()) {
        return Err(OoxmlError::InvalidChartData(format!(
            "per-category colors need a single-series {} chart",
            kind
        )));
    }
    if data.windows(2).any(|w| w[0].labels.len() != w[1].labels.len()) {
        warn!("chart series have different category counts; all share column A of the data sheet");
    }
    Ok(())
}

fn is_categorical_tree(tree: &Element) -> bool {
    tree.find_path(&["c:chart", "c:plotArea"])
        .is_some_and(|plot| plot.find("c:pieChart").is_some() || plot.find("c:doughnutChart").is_some())
}

/// Locate the plot-area type node, e.g. `c:barChart`.
fn type_node_mut(tree: &mut Element) -> Option<&mut Element> {
    tree.find_path_mut(&["c:chart", "c:plotArea"])?
        .find_where_mut(|name| name.starts_with("c:") && name.ends_with("Chart"))
}

fn insert_series(tree: &mut Element, kind: Option<&ChartKind>, data: &[Series]) {
    let Some(node) = type_node_mut(tree) else {
        if !data.is_empty() {
            warn!("chart tree has no plot-area type node; {} series dropped", data.len());
        }
        return;
    };
    let node_name = node.name().to_string();
    let categorical = kind.map_or(
        matches!(node_name.as_str(), "c:pieChart" | "c:doughnutChart"),
        ChartKind::is_categorical,
    );

    for (i, series) in data.iter().enumerate() {
        if series.colors.is_some() && !categorical {
            warn!("series '{}': per-category colors only apply to pie and doughnut charts", series.name);
        }
        let ser = series_node(&node_name, categorical, i, series);
        node.insert_ordered(ser, chart_child_order);
    }
}

fn clean_hex(color: &str) -> String {
    color.trim_start_matches('#').to_ascii_uppercase()
}

fn solid_fill(series: &Series) -> Option<Element> {
    let color = if let Some(rgb) = &series.color {
        Element::val("a:srgbClr", clean_hex(rgb))
    } else {
        Element::val("a:schemeClr", series.scheme_color.as_deref()?)
    };
    Some(Element::new("a:solidFill").child(color))
}

fn series_node(type_node: &str, categorical: bool, index: usize, series: &Series) -> Element {
    let col = series_column(index) + 1;
    let rows = series.labels.len().max(series.values.len()) as u32;
    let is_line = type_node == "c:lineChart";

    let sp_pr = solid_fill(series).map(|fill| {
        if is_line {
            Element::new("c:spPr").child(Element::new("a:ln").attr("w", 28575).child(fill))
        } else {
            Element::new("c:spPr").child(fill)
        }
    });

    let data_points = match (&series.colors, categorical) {
        (Some(colors), true) => (0..series.labels.len())
            .map(|i| {
                let color = match colors.get(i) {
                    Some(rgb) => Element::val("a:srgbClr", clean_hex(rgb)),
                    None => Element::val("a:schemeClr", format!("accent{}", (i % ACCENT_SLOTS) + 1)),
                };
                Element::new("c:dPt")
                    .child(Element::val("c:idx", i))
                    .child(Element::val("c:bubble3D", false))
                    .child(Element::new("c:spPr").child(Element::new("a:solidFill").child(color)))
            })
            .collect(),
        _ => Vec::new(),
    };

    let name_ref = sheet_range_ref(DATA_SHEET, (1, col), (1, col));
    let cat_ref = sheet_range_ref(DATA_SHEET, (2, 1), (rows + 1, 1));
    let val_ref = sheet_range_ref(DATA_SHEET, (2, col), (rows + 1, col));

    let mut ser = Element::new("c:ser")
        .child(Element::val("c:idx", index))
        .child(Element::val("c:order", index))
        .child(
            Element::new("c:tx").child(
                Element::new("c:strRef")
                    .child(Element::new("c:f").text(name_ref))
                    .child(str_cache(std::iter::once(series.name.as_str()))),
            ),
        )
        .child_opt(sp_pr);

    if type_node == "c:barChart" {
        ser.push(Element::val("c:invertIfNegative", false));
    }
    if is_line {
        ser.push(Element::new("c:marker").child(Element::val("c:symbol", "none")));
    }
    let mut ser = ser
        .children_from(data_points)
        .child(
            Element::new("c:cat").child(
                Element::new("c:strRef")
                    .child(Element::new("c:f").text(cat_ref))
                    .child(str_cache(series.labels.iter().map(String::as_str))),
            ),
        )
        .child(
            Element::new("c:val").child(
                Element::new("c:numRef")
                    .child(Element::new("c:f").text(val_ref))
                    .child(num_cache(&series.values)),
            ),
        );
    if is_line {
        ser.push(Element::val("c:smooth", false));
    }

    if let Some(xml) = &series.xml {
        ser.merge(xml, chart_child_order);
    }
    debug!(
        "series {} '{}' → {}",
        index,
        series.name,
        column_letter(col)
    );
    ser
}

fn str_cache<'a>(values: impl ExactSizeIterator<Item = &'a str>) -> Element {
    Element::new("c:strCache")
        .child(Element::val("c:ptCount", values.len()))
        .children_from(values.enumerate().map(|(i, v)| {
            Element::new("c:pt")
                .attr("idx", i)
                .child(Element::new("c:v").text(v))
        }))
}

fn num_cache(values: &[f64]) -> Element {
    Element::new("c:numCache")
        .child(Element::new("c:formatCode").text("General"))
        .child(Element::val("c:ptCount", values.len()))
        .children_from(values.iter().enumerate().map(|(i, v)| {
            Element::new("c:pt")
                .attr("idx", i)
                .child(Element::new("c:v").text(format_number(*v)))
        }))
}

/// `c:title` with rich text.
fn rich_title(text: &str) -> Element {
    Element::new("c:title")
        .child(
            Element::new("c:tx").child(
                Element::new("c:rich")
                    .child(Element::new("a:bodyPr"))
                    .child(Element::new("a:lstStyle"))
                    .child(
                        Element::new("a:p")
                            .child(Element::new("a:pPr").child(Element::new("a:defRPr")))
                            .child(
                                Element::new("a:r")
                                    .child(Element::new("a:rPr").attr("lang", "en-US"))
                                    .child(Element::new("a:t").text(text)),
                            ),
                    ),
            ),
        )
        .child(Element::val("c:overlay", false))
}

/// Overlay rooted at `c:chartSpace` reaching down `path`, ending in `leaf`.
fn overlay_at(path: &[&str], leaf: Element) -> Element {
    let inner = path
        .iter()
        .rev()
        .fold(leaf, |child, name| Element::new(*name).child(child));
    Element::new("c:chartSpace").child(inner)
}

fn has_axis(tree: &Element, axis: &str) -> bool {
    tree.find_path(&["c:chart", "c:plotArea", axis]).is_some()
}

fn decorate(tree: &mut Element, step: Decoration, desc: &ChartDescriptor, kind: Option<&ChartKind>) {
    let axis_overlay = |tree: &Element, axis: &str, leaf: Element, what: &str| {
        if has_axis(tree, axis) {
            Some(overlay_at(&["c:chart", "c:plotArea", axis], leaf))
        } else {
            warn!(
                "{} ignored: {} chart has no {}",
                what,
                kind.map_or("custom", ChartKind::name),
                axis
            );
            None
        }
    };

    let overlay = match step {
        Decoration::Title => desc.title.as_deref().map(|title| {
            Element::new("c:chartSpace").child(
                Element::new("c:chart")
                    .child(rich_title(title))
                    .child(Element::val("c:autoTitleDeleted", false)),
            )
        }),
        Decoration::ValAxisTitle => desc
            .val_axis_title
            .as_deref()
            .and_then(|t| axis_overlay(tree, "c:valAx", rich_title(t), "valAxisTitle")),
        Decoration::CatAxisTitle => desc
            .cat_axis_title
            .as_deref()
            .and_then(|t| axis_overlay(tree, "c:catAx", rich_title(t), "catAxisTitle")),
        Decoration::ValAxisNumFmt => desc.val_axis_num_fmt.as_deref().and_then(|fmt| {
            let num_fmt = Element::new("c:numFmt")
                .attr("formatCode", fmt)
                .attr("sourceLinked", false);
            axis_overlay(tree, "c:valAx", num_fmt, "valAxisNumFmt")
        }),
        Decoration::ValAxisScaling => {
            if desc.val_axis_min_value.is_none() && desc.val_axis_max_value.is_none() {
                None
            } else {
                let scaling = Element::new("c:scaling")
                    .child_opt(desc.val_axis_max_value.map(|v| Element::val("c:max", format_number(v))))
                    .child_opt(desc.val_axis_min_value.map(|v| Element::val("c:min", format_number(v))));
                axis_overlay(tree, "c:valAx", scaling, "valAxisMinValue/valAxisMaxValue")
            }
        },
        Decoration::TextSize => desc.font_size.map(|pt| {
            Element::new("c:chartSpace").child(
                Element::new("c:txPr")
                    .child(Element::new("a:bodyPr"))
                    .child(Element::new("a:lstStyle"))
                    .child(
                        Element::new("a:p")
                            .child(
                                Element::new("a:pPr")
                                    .child(Element::new("a:defRPr").attr("sz", pt_to_centipoints(pt))),
                            )
                            .child(Element::new("a:endParaRPr").attr("lang", "en-US")),
                    ),
            )
        }),
        Decoration::RawXml => desc.xml.clone(),
        Decoration::Gridlines => {
            toggle_gridlines(tree, "c:majorGridlines", desc.val_axis_major_gridlines);
            toggle_gridlines(tree, "c:minorGridlines", desc.val_axis_minor_gridlines);
            None
        },
    };

    if let Some(overlay) = overlay {
        tree.merge(&overlay, chart_child_order);
    }
}

fn toggle_gridlines(tree: &mut Element, name: &str, toggle: Option<bool>) {
    let Some(on) = toggle else {
        return;
    };
    let Some(val_ax) = tree.find_path_mut(&["c:chart", "c:plotArea", "c:valAx"]) else {
        warn!("gridline option ignored: chart has no value axis");
        return;
    };
    match (on, val_ax.find(name).is_some()) {
        (false, true) => {
            val_ax.remove_children(name);
        },
        (true, false) => val_ax.insert_ordered(Element::new(name), chart_child_order),
        _ => {},
    }
}
