//! Caller-facing chart description.
//!
//! Field names follow the camelCase JSON shape, so descriptors can be
//! loaded straight from configuration:
//!
//! ```
//! use ooxmlgen::ooxml::charts::ChartDescriptor;
//!
//! let chart: ChartDescriptor = serde_json::from_str(r#"{
//!     "title": "Budget",
//!     "renderType": "column",
//!     "valAxisNumFmt": "$0",
//!     "data": [
//!         {"name": "Income", "labels": ["Q1", "Q2"], "values": [10, 12], "color": "4F81BD"}
//!     ]
//! }"#).unwrap();
//! assert_eq!(chart.render_type.as_deref(), Some("column"));
//! assert_eq!(chart.data[0].values, [10.0, 12.0]);
//! ```

use crate::common::xml::Element;
use crate::ooxml::charts::types::LegendPosition;
use serde::Deserialize;

/// One plotted series.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Series {
    pub name: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    /// Explicit fill, hex RGB
    pub color: Option<String>,
    /// Theme color token such as `accent2`, used when `color` is absent
    pub scheme_color: Option<String>,
    /// Per-category fills for pie and doughnut charts
    pub colors: Option<Vec<String>>,
    /// Raw tree merged into the series node
    pub xml: Option<Element>,
}

impl Series {
    pub fn new<L, S>(name: &str, labels: L, values: Vec<f64>) -> Self
    where
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            labels: labels.into_iter().map(Into::into).collect(),
            values,
            ..Default::default()
        }
    }

    pub fn color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    pub fn scheme_color(mut self, token: &str) -> Self {
        self.scheme_color = Some(token.to_string());
        self
    }
}

/// Everything needed to build one chart.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartDescriptor {
    pub title: Option<String>,
    /// One of `bar`, `column`, `stacked-column`, `group-bar`, `pie`, `line`,
    /// `area`, `doughnut`
    pub render_type: Option<String>,
    pub data: Vec<Series>,
    pub overlap: Option<i32>,
    pub gap_width: Option<u32>,
    pub val_axis_num_fmt: Option<String>,
    pub val_axis_min_value: Option<f64>,
    pub val_axis_max_value: Option<f64>,
    pub val_axis_title: Option<String>,
    pub cat_axis_title: Option<String>,
    pub cat_axis_reverse_order: Option<bool>,
    pub val_axis_cross_at_max_category: Option<bool>,
    pub val_axis_major_gridlines: Option<bool>,
    pub val_axis_minor_gridlines: Option<bool>,
    /// Base text size in points
    pub font_size: Option<f64>,
    pub legend_position: Option<LegendPosition>,
    pub show_legend: Option<bool>,
    /// Show values as data labels (pie and doughnut)
    pub show_value: Option<bool>,
    /// Show percentages as data labels (pie and doughnut)
    pub show_percent: Option<bool>,
    /// Doughnut hole size in percent
    pub hole_size: Option<u32>,
    /// Raw tree merged into `c:chartSpace` after every other decoration,
    /// or used as the whole chart when no render type is given.
    pub xml: Option<Element>,
}

impl ChartDescriptor {
    pub fn new(render_type: &str) -> Self {
        Self {
            render_type: Some(render_type.to_string()),
            ..Default::default()
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn series(mut self, series: Series) -> Self {
        self.data.push(series);
        self
    }
}
