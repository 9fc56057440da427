//! Spreadsheet cell addressing.

/// Spreadsheet column name for a 1-based column number.
///
/// Bijective base 26: `1 → A`, `26 → Z`, `27 → AA`, `52 → AZ`, `53 → BA`.
/// Column 0 has no name and yields an empty string.
pub fn column_letter(mut col: u32) -> String {
    let mut letters = Vec::with_capacity(3);
    while col > 0 {
        let rem = (col - 1) % 26;
        letters.push(b'A' + rem as u8);
        col = (col - 1) / 26;
    }
    letters.reverse();
    // Only ASCII capitals were pushed.
    letters.into_iter().map(char::from).collect()
}

/// A1-style reference for 1-based `row` and `col`, e.g. `C2`.
pub fn cell_ref(row: u32, col: u32) -> String {
    let mut out = column_letter(col);
    out.push_str(itoa::Buffer::new().format(row));
    out
}

/// Absolute A1 reference, e.g. `$C$2`.
pub fn abs_cell_ref(row: u32, col: u32) -> String {
    format!("${}${}", column_letter(col), row)
}

/// Absolute reference to a range within a sheet, e.g. `Sheet1!$C$2:$C$6`.
///
/// Sheet names that are not plain identifiers are quoted.
pub fn sheet_range_ref(sheet: &str, first: (u32, u32), last: (u32, u32)) -> String {
    let sheet = if sheet.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        sheet.to_string()
    } else {
        format!("'{}'", sheet.replace('\'', "''"))
    };
    if first == last {
        format!("{}!{}", sheet, abs_cell_ref(first.0, first.1))
    } else {
        format!(
            "{}!{}:{}",
            sheet,
            abs_cell_ref(first.0, first.1),
            abs_cell_ref(last.0, last.1)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letter_boundaries() {
        assert_eq!(column_letter(1), "A");
        assert_eq!(column_letter(26), "Z");
        assert_eq!(column_letter(27), "AA");
        assert_eq!(column_letter(52), "AZ");
        assert_eq!(column_letter(53), "BA");
        assert_eq!(column_letter(702), "ZZ");
        assert_eq!(column_letter(703), "AAA");
        assert_eq!(column_letter(16384), "XFD");
        assert_eq!(column_letter(0), "");
    }

    #[test]
    fn test_refs() {
        assert_eq!(cell_ref(2, 3), "C2");
        assert_eq!(sheet_range_ref("Sheet1", (2, 3), (6, 3)), "Sheet1!$C$2:$C$6");
        assert_eq!(sheet_range_ref("Sheet1", (1, 3), (1, 3)), "Sheet1!$C$1");
        assert_eq!(sheet_range_ref("Q1 data", (1, 1), (1, 1)), "'Q1 data'!$A$1");
    }
}
