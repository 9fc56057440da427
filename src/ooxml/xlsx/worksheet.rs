//! Worksheet content model.
//!
//! Rows and columns are zero-based in this API; the writer converts them to
//! the one-based `A1` references SpreadsheetML uses.

use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::xlsx::cell::CellValue;
use std::collections::BTreeMap;

/// Longest sheet name Excel accepts.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Rows in an Excel worksheet.
pub const MAX_ROWS: u32 = 1_048_576;

/// Columns in an Excel worksheet (`A` to `XFD`).
pub const MAX_COLS: u32 = 16_384;

const FORBIDDEN_NAME_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// One worksheet.
#[derive(Debug, Clone)]
pub struct Sheet {
    name: String,
    sheet_id: u32,
    r_id: String,
    /// Cells keyed by (row, column), iterated rows first
    cells: BTreeMap<(u32, u32), CellValue>,
    /// Column widths in character units
    column_widths: BTreeMap<u32, f64>,
}

impl Sheet {
    pub(crate) fn new(name: String, sheet_id: u32, r_id: String) -> Self {
        Self {
            name,
            sheet_id,
            r_id,
            cells: BTreeMap::new(),
            column_widths: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One-based id used in `workbook.xml`.
    #[inline]
    pub fn sheet_id(&self) -> u32 {
        self.sheet_id
    }

    /// Relationship id from the workbook part.
    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    /// Set one cell. `CellValue::Empty` clears it.
    ///
    /// Coordinates beyond [`MAX_ROWS`] and [`MAX_COLS`] are accepted here and
    /// rejected when the workbook is generated.
    pub fn set_cell(&mut self, row: u32, col: u32, value: impl Into<CellValue>) -> &mut Self {
        let value = value.into();
        if value.is_empty() {
            self.cells.remove(&(row, col));
        } else {
            self.cells.insert((row, col), value);
        }
        self
    }

    /// Set a row of cells starting at column A.
    pub fn set_row<I, V>(&mut self, row: u32, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        for (col, value) in values.into_iter().enumerate() {
            self.set_cell(row, u32::try_from(col).unwrap_or(u32::MAX), value);
        }
        self
    }

    pub fn cell(&self, row: u32, col: u32) -> Option<&CellValue> {
        self.cells.get(&(row, col))
    }

    /// Set the width of a column, in characters of the default font.
    pub fn set_column_width(&mut self, col: u32, width: f64) -> &mut Self {
        self.column_widths.insert(col, width);
        self
    }

    /// Non-empty cells, rows first then columns ascending.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, &CellValue)> {
        self.cells.iter().map(|(&(row, col), value)| (row, col, value))
    }

    pub fn column_widths(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.column_widths.iter().map(|(&col, &width)| (col, width))
    }

    /// Bounding box of the used range as ((first row, first col), (last row, last col)).
    pub fn used_range(&self) -> Option<((u32, u32), (u32, u32))> {
        let (&(first_row, _), _) = self.cells.first_key_value()?;
        let (&(last_row, _), _) = self.cells.last_key_value()?;
        let first_col = self.cells.keys().map(|&(_, c)| c).min()?;
        let last_col = self.cells.keys().map(|&(_, c)| c).max()?;
        Some(((first_row, first_col), (last_row, last_col)))
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Check that every cell and column fits an Excel worksheet and every
    /// number can be written as `xsd:double`.
    pub fn validate(&self) -> Result<()> {
        for (&(row, col), value) in &self.cells {
            check_coordinates(&self.name, row, col)?;
            match value {
                CellValue::Number(n) if !n.is_finite() => {
                    return Err(OoxmlError::InvalidArgument(format!(
                        "sheet '{}': cell at row {}, column {} holds {}",
                        self.name, row, col, n
                    )));
                },
                _ => {},
            }
        }
        for (&col, &width) in &self.column_widths {
            check_coordinates(&self.name, 0, col)?;
            if !width.is_finite() || width < 0.0 {
                return Err(OoxmlError::InvalidArgument(format!(
                    "sheet '{}': column {} has width {}",
                    self.name, col, width
                )));
            }
        }
        Ok(())
    }
}

fn check_coordinates(sheet: &str, row: u32, col: u32) -> Result<()> {
    if row >= MAX_ROWS || col >= MAX_COLS {
        return Err(OoxmlError::InvalidArgument(format!(
            "sheet '{}': row {}, column {} is outside the {}x{} grid",
            sheet, row, col, MAX_ROWS, MAX_COLS
        )));
    }
    Ok(())
}

/// Check a sheet name against Excel's rules.
pub(crate) fn validate_sheet_name<'a>(
    name: &str,
    existing: impl IntoIterator<Item = &'a str>,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(OoxmlError::InvalidArgument("sheet name is empty".to_string()));
    }
    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return Err(OoxmlError::InvalidArgument(format!(
            "sheet name '{}' is longer than {} characters",
            name, MAX_SHEET_NAME_LEN
        )));
    }
    if let Some(c) = name.chars().find(|c| FORBIDDEN_NAME_CHARS.contains(c)) {
        return Err(OoxmlError::InvalidArgument(format!(
            "sheet name '{}' contains '{}'",
            name, c
        )));
    }
    if existing.into_iter().any(|n| n.eq_ignore_ascii_case(name)) {
        return Err(OoxmlError::InvalidArgument(format!(
            "duplicate sheet name '{}'",
            name
        )));
    }
    Ok(())
}
