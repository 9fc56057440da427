//! The closed set of chart kinds and their options.

use crate::ooxml::charts::descriptor::ChartDescriptor;
use crate::ooxml::charts::types::{AxisOrientation, BarDirection, BarGrouping};

/// Options shared by charts with a category and a value axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisOptions {
    /// Category axis runs max to min
    pub cat_axis_reverse_order: bool,
    /// Value axis crosses the category axis at its maximum
    pub val_axis_cross_at_max_category: bool,
}

impl AxisOptions {
    pub fn from_descriptor(desc: &ChartDescriptor) -> Self {
        Self {
            cat_axis_reverse_order: desc.cat_axis_reverse_order.unwrap_or(false),
            val_axis_cross_at_max_category: desc.val_axis_cross_at_max_category.unwrap_or(false),
        }
    }

    pub fn cat_orientation(&self) -> AxisOrientation {
        if self.cat_axis_reverse_order {
            AxisOrientation::MaxMin
        } else {
            AxisOrientation::MinMax
        }
    }

    pub fn val_crosses(&self) -> &'static str {
        if self.val_axis_cross_at_max_category {
            "max"
        } else {
            "autoZero"
        }
    }
}

/// Options of the bar/column family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarOptions {
    pub overlap: i32,
    pub gap_width: u32,
    pub axis: AxisOptions,
}

/// Options of pie and doughnut charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieOptions {
    pub show_value: bool,
    pub show_percent: bool,
    /// Only used by doughnut charts
    pub hole_size: u32,
}

/// A supported chart kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Horizontal clustered bars
    Bar(BarOptions),
    /// Vertical clustered columns
    Column(BarOptions),
    StackedColumn(BarOptions),
    /// Horizontal stacked bars
    GroupBar(BarOptions),
    Line(AxisOptions),
    Area(AxisOptions),
    Pie(PieOptions),
    Doughnut(PieOptions),
}

const DEFAULT_HOLE_SIZE: u32 = 50;

impl ChartKind {
    /// Resolve a render type name, applying per-kind defaults for options
    /// the descriptor leaves unset. Unknown names yield `None`.
    pub fn parse(render_type: &str, desc: &ChartDescriptor) -> Option<Self> {
        let axis = AxisOptions::from_descriptor(desc);
        let bar = |overlap: i32, gap_width: u32| BarOptions {
            overlap: desc.overlap.unwrap_or(overlap),
            gap_width: desc.gap_width.unwrap_or(gap_width),
            axis,
        };
        let pie = PieOptions {
            show_value: desc.show_value.unwrap_or(false),
            show_percent: desc.show_percent.unwrap_or(false),
            hole_size: desc.hole_size.unwrap_or(DEFAULT_HOLE_SIZE).clamp(10, 90),
        };

        let kind = match render_type {
            "bar" => ChartKind::Bar(bar(0, 150)),
            "column" => ChartKind::Column(bar(0, 150)),
            "stacked-column" => ChartKind::StackedColumn(bar(100, 25)),
            "group-bar" => ChartKind::GroupBar(bar(100, 150)),
            "line" => ChartKind::Line(axis),
            "area" => ChartKind::Area(axis),
            "pie" => ChartKind::Pie(pie),
            "doughnut" => ChartKind::Doughnut(pie),
            _ => return None,
        };
        Some(kind)
    }

    /// Render type name.
    pub const fn name(&self) -> &'static str {
        match self {
            ChartKind::Bar(_) => "bar",
            ChartKind::Column(_) => "column",
            ChartKind::StackedColumn(_) => "stacked-column",
            ChartKind::GroupBar(_) => "group-bar",
            ChartKind::Line(_) => "line",
            ChartKind::Area(_) => "area",
            ChartKind::Pie(_) => "pie",
            ChartKind::Doughnut(_) => "doughnut",
        }
    }

    /// Element name of the plot-area type node.
    pub const fn type_node(&self) -> &'static str {
        match self {
            ChartKind::Bar(_)
            | ChartKind::Column(_)
            | ChartKind::StackedColumn(_)
            | ChartKind::GroupBar(_) => "c:barChart",
            ChartKind::Line(_) => "c:lineChart",
            ChartKind::Area(_) => "c:areaChart",
            ChartKind::Pie(_) => "c:pieChart",
            ChartKind::Doughnut(_) => "c:doughnutChart",
        }
    }

    /// Bar direction and grouping for the bar family.
    pub const fn bar_layout(&self) -> Option<(BarDirection, BarGrouping, &BarOptions)> {
        match self {
            ChartKind::Bar(o) => Some((BarDirection::Bar, BarGrouping::Clustered, o)),
            ChartKind::Column(o) => Some((BarDirection::Column, BarGrouping::Clustered, o)),
            ChartKind::StackedColumn(o) => Some((BarDirection::Column, BarGrouping::Stacked, o)),
            ChartKind::GroupBar(o) => Some((BarDirection::Bar, BarGrouping::Stacked, o)),
            _ => None,
        }
    }

    /// Axis options, or `None` for charts without axes.
    pub const fn axis_options(&self) -> Option<&AxisOptions> {
        match self {
            ChartKind::Bar(o)
            | ChartKind::Column(o)
            | ChartKind::StackedColumn(o)
            | ChartKind::GroupBar(o) => Some(&o.axis),
            ChartKind::Line(a) | ChartKind::Area(a) => Some(a),
            ChartKind::Pie(_) | ChartKind::Doughnut(_) => None,
        }
    }

    /// Pie and doughnut charts plot categories of a single series.
    pub const fn is_categorical(&self) -> bool {
        matches!(self, ChartKind::Pie(_) | ChartKind::Doughnut(_))
    }
}
