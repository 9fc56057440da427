//! Charts for DOCX and PPTX documents.
//!
//! A chart starts life as a [`ChartDescriptor`]. At generation time the
//! assembler resolves its [`ChartKind`], takes a fresh skeleton for that
//! kind, adds one `c:ser` node per series and applies decorations in a
//! fixed order. The chart's data travels alongside in an embedded workbook.
//!
//! ```
//! use ooxmlgen::ooxml::charts::{ChartDescriptor, Series, build_chart};
//!
//! let desc = ChartDescriptor::new("column")
//!     .title("Budget")
//!     .series(Series::new("Income", ["Q1", "Q2"], vec![10.0, 12.0]));
//! let tree = build_chart(&desc)?;
//! assert!(tree.find_path(&["c:chart", "c:plotArea", "c:barChart", "c:ser"]).is_some());
//! # Ok::<(), ooxmlgen::OoxmlError>(())
//! ```

pub mod assembler;
pub mod descriptor;
pub mod embed;
pub mod kind;
pub mod skeleton;
pub mod types;

pub use assembler::{DECORATION_ORDER, Decoration, build_chart};
pub use descriptor::{ChartDescriptor, Series};
pub use embed::{chart_workbook, register_chart_parts};
pub use kind::{AxisOptions, BarOptions, ChartKind, PieOptions};
pub use skeleton::{CAT_AXIS_ID, EXTERNAL_DATA_RID, VAL_AXIS_ID, chart_child_order, skeleton};
pub use types::{AxisOrientation, BarDirection, BarGrouping, LegendPosition};
