//! Host-independent table model.
//!
//! Tables are a grid of [`TableCell`]s. Styling comes from the table's
//! [`TableOptions`] unless a cell carries its own [`CellOptions`], in which
//! case the cell options replace the table options entirely (they are not
//! merged). Style values may be uniform, per row, or per row and column.
//!
//! The DOCX and PPTX writers turn the resolved grid into their own markup.

use crate::common::xml::format_number;
use serde::Deserialize;
use std::fmt;

/// A style value that may vary per row or per cell.
///
/// ```
/// use ooxmlgen::ooxml::common::table::StyleValue;
///
/// let shading: StyleValue<String> =
///     serde_json::from_str(r#"[["FF0000", "00FF00"], ["0000FF"]]"#).unwrap();
/// assert_eq!(shading.resolve(0, 1).map(String::as_str), Some("00FF00"));
/// assert_eq!(shading.resolve(1, 1), None);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StyleValue<T> {
    Uniform(T),
    PerRow(Vec<T>),
    PerCell(Vec<Vec<T>>),
}

impl<T> StyleValue<T> {
    /// Value for the cell at zero-based `row`, `col`.
    pub fn resolve(&self, row: usize, col: usize) -> Option<&T> {
        match self {
            StyleValue::Uniform(v) => Some(v),
            StyleValue::PerRow(rows) => rows.get(row),
            StyleValue::PerCell(grid) => grid.get(row).and_then(|r| r.get(col)),
        }
    }
}

impl<T> From<T> for StyleValue<T> {
    fn from(value: T) -> Self {
        StyleValue::Uniform(value)
    }
}

/// Horizontal alignment inside a cell or text box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
    Justify,
}

/// Vertical alignment inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

/// Formatting of table cells.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CellOptions {
    /// Background shading, hex RGB
    pub fill: Option<StyleValue<String>>,
    /// Text color, hex RGB
    pub color: Option<StyleValue<String>>,
    pub bold: Option<StyleValue<bool>>,
    pub italic: Option<StyleValue<bool>>,
    pub font_face: Option<String>,
    /// Font size in points
    pub font_size: Option<f64>,
    pub align: Option<Align>,
    pub valign: Option<VAlign>,
}

/// Table-wide options.
///
/// Lengths are in the host's native unit: twentieths of a point for DOCX,
/// EMU for PPTX.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableOptions {
    /// Default cell formatting
    #[serde(flatten)]
    pub cell: CellOptions,
    /// Explicit column widths; missing entries fall back to an even split
    pub column_widths: Option<Vec<i64>>,
    /// Total table width used for the even split
    pub width: Option<i64>,
    pub x: Option<i64>,
    pub y: Option<i64>,
    pub row_height: Option<i64>,
    /// Border color, hex RGB
    pub border_color: Option<String>,
}

/// Plain value of a cell.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CellText {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl fmt::Display for CellText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellText::Bool(b) => write!(f, "{}", b),
            CellText::Number(n) => f.write_str(&format_number(*n)),
            CellText::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCell {
    Styled {
        val: CellText,
        #[serde(default)]
        opts: Option<CellOptions>,
    },
    Plain(CellText),
}

/// One table cell: a value plus optional cell-level formatting.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawCell")]
pub struct TableCell {
    pub value: CellText,
    pub opts: Option<CellOptions>,
}

impl From<RawCell> for TableCell {
    fn from(raw: RawCell) -> Self {
        match raw {
            RawCell::Styled { val, opts } => TableCell { value: val, opts },
            RawCell::Plain(value) => TableCell { value, opts: None },
        }
    }
}

impl TableCell {
    pub fn styled(value: impl Into<TableCell>, opts: CellOptions) -> Self {
        TableCell {
            opts: Some(opts),
            ..value.into()
        }
    }
}

impl From<&str> for TableCell {
    fn from(s: &str) -> Self {
        TableCell {
            value: CellText::Text(s.to_string()),
            opts: None,
        }
    }
}

impl From<String> for TableCell {
    fn from(s: String) -> Self {
        TableCell {
            value: CellText::Text(s),
            opts: None,
        }
    }
}

impl From<f64> for TableCell {
    fn from(n: f64) -> Self {
        TableCell {
            value: CellText::Number(n),
            opts: None,
        }
    }
}

impl From<bool> for TableCell {
    fn from(b: bool) -> Self {
        TableCell {
            value: CellText::Bool(b),
            opts: None,
        }
    }
}

/// Formatting of one cell after option resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedCellStyle {
    pub fill: Option<String>,
    pub color: Option<String>,
    pub bold: bool,
    pub italic: bool,
    pub font_face: Option<String>,
    pub font_size: Option<f64>,
    pub align: Option<Align>,
    pub valign: Option<VAlign>,
}

/// Resolve the formatting of the cell at `row`, `col`.
///
/// Cell-level options, when present, are used instead of the table's.
pub fn resolve_cell_style(
    cell: &TableCell,
    table: &TableOptions,
    row: usize,
    col: usize,
) -> ResolvedCellStyle {
    let opts = cell.opts.as_ref().unwrap_or(&table.cell);
    ResolvedCellStyle {
        fill: opts.fill.as_ref().and_then(|v| v.resolve(row, col)).cloned(),
        color: opts.color.as_ref().and_then(|v| v.resolve(row, col)).cloned(),
        bold: opts.bold.as_ref().and_then(|v| v.resolve(row, col)).copied().unwrap_or(false),
        italic: opts.italic.as_ref().and_then(|v| v.resolve(row, col)).copied().unwrap_or(false),
        font_face: opts.font_face.clone(),
        font_size: opts.font_size,
        align: opts.align,
        valign: opts.valign,
    }
}

/// Number of grid columns: the widest row.
pub fn grid_columns(rows: &[Vec<TableCell>]) -> usize {
    rows.iter().map(Vec::len).max().unwrap_or(0)
}

/// Column widths for a grid of `columns` columns.
///
/// Explicit widths win; every other column gets an even share of `total`.
pub fn column_widths(total: i64, explicit: Option<&[i64]>, columns: usize) -> Vec<i64> {
    if columns == 0 {
        return Vec::new();
    }
    let even = total / columns as i64;
    (0..columns)
        .map(|i| explicit.and_then(|w| w.get(i)).copied().unwrap_or(even))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_options_replace_table_options() {
        let table = TableOptions {
            cell: CellOptions {
                bold: Some(true.into()),
                fill: Some("DDDDDD".to_string().into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let plain = TableCell::from("a");
        let styled = TableCell::styled(
            "b",
            CellOptions {
                italic: Some(true.into()),
                ..Default::default()
            },
        );

        let s = resolve_cell_style(&plain, &table, 0, 0);
        assert!(s.bold);
        assert_eq!(s.fill.as_deref(), Some("DDDDDD"));

        let s = resolve_cell_style(&styled, &table, 0, 1);
        assert!(s.italic);
        assert!(!s.bold);
        assert_eq!(s.fill, None);
    }

    #[test]
    fn test_per_row_style() {
        let table = TableOptions {
            cell: CellOptions {
                bold: Some(StyleValue::PerRow(vec![true, false])),
                ..Default::default()
            },
            ..Default::default()
        };
        let cell = TableCell::from(1.0);
        assert!(resolve_cell_style(&cell, &table, 0, 3).bold);
        assert!(!resolve_cell_style(&cell, &table, 1, 0).bold);
        assert!(!resolve_cell_style(&cell, &table, 5, 0).bold);
    }

    #[test]
    fn test_column_widths() {
        assert_eq!(column_widths(8640, None, 3), [2880, 2880, 2880]);
        assert_eq!(column_widths(8640, Some(&[1000]), 3), [1000, 2880, 2880]);
        assert!(column_widths(8640, None, 0).is_empty());
    }

    #[test]
    fn test_deserialize_rows() {
        let rows: Vec<Vec<TableCell>> = serde_json::from_str(
            r#"[["Name", 12.5, true], [{"val": "Total", "opts": {"bold": true, "fill": "FFFF00"}}]]"#,
        )
        .unwrap();
        assert_eq!(grid_columns(&rows), 3);
        assert_eq!(rows[0][1].value.to_string(), "12.5");
        assert_eq!(rows[0][2].value, CellText::Bool(true));
        let opts = rows[1][0].opts.as_ref().unwrap();
        assert_eq!(opts.bold, Some(StyleValue::Uniform(true)));
    }
}
