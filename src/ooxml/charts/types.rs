//! Enumerations used by chart markup.

use serde::Deserialize;

/// Bar/column direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarDirection {
    /// Horizontal bars
    Bar,
    /// Vertical bars (columns)
    Column,
}

impl BarDirection {
    #[inline]
    pub const fn xml_value(&self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Column => "col",
        }
    }
}

/// Bar grouping type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarGrouping {
    Clustered,
    Stacked,
    PercentStacked,
}

impl BarGrouping {
    #[inline]
    pub const fn xml_value(&self) -> &'static str {
        match self {
            Self::Clustered => "clustered",
            Self::Stacked => "stacked",
            Self::PercentStacked => "percentStacked",
        }
    }
}

/// Legend position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    #[serde(alias = "b")]
    Bottom,
    #[serde(alias = "l")]
    Left,
    #[default]
    #[serde(alias = "r")]
    Right,
    #[serde(alias = "t")]
    Top,
    #[serde(alias = "tr", rename = "topRight")]
    TopRight,
}

impl LegendPosition {
    #[inline]
    pub const fn xml_value(&self) -> &'static str {
        match self {
            Self::Bottom => "b",
            Self::Left => "l",
            Self::Right => "r",
            Self::Top => "t",
            Self::TopRight => "tr",
        }
    }
}

/// Axis orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrientation {
    MinMax,
    MaxMin,
}

impl AxisOrientation {
    #[inline]
    pub const fn xml_value(&self) -> &'static str {
        match self {
            Self::MinMax => "minMax",
            Self::MaxMin => "maxMin",
        }
    }
}
