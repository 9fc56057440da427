mod common;

use common::{assert_manifest_matches, assert_package_well_formed, elements, entry, first_attr, rel_targets, unzip};
use ooxmlgen::ooxml::common::address::column_letter;
use ooxmlgen::{OoxmlError, Xlsx};
use proptest::prelude::*;

#[test]
fn test_workbook_package_is_consistent() {
    let mut xlsx = Xlsx::new().unwrap();
    xlsx.make_new_sheet("Sales")
        .unwrap()
        .set_row(0, ["Region", "Amount"])
        .set_row(1, ["North", "12"])
        .set_cell(2, 0, "South")
        .set_cell(2, 1, 9.5)
        .set_cell(3, 1, true)
        .set_column_width(0, 18.0);
    xlsx.make_new_sheet("Notes & more").unwrap().set_cell(0, 0, "North");

    let entries = unzip(&xlsx.to_bytes().unwrap());
    assert_package_well_formed(&entries);
    assert_manifest_matches(&entries);

    let workbook = entry(&entries, "xl/workbook.xml");
    let sheets = elements(&workbook, "sheet");
    assert_eq!(sheets.len(), 2);
    assert_eq!(sheets[1]["name"], "Notes &amp; more");
    let rels = rel_targets(&entries, "xl/_rels/workbook.xml.rels");
    assert_eq!(rels[&sheets[0]["r:id"]], "worksheets/sheet1.xml");
    assert_eq!(rels[&sheets[1]["r:id"]], "worksheets/sheet2.xml");

    let sheet1 = entry(&entries, "xl/worksheets/sheet1.xml");
    assert_eq!(first_attr(&sheet1, "dimension", "ref").as_deref(), Some("A1:B4"));
    assert!(sheet1.contains(r#"<c r="B3"><v>9.5</v></c>"#));
    assert!(sheet1.contains(r#"<c r="B4" t="b"><v>1</v></c>"#));
    assert_eq!(first_attr(&sheet1, "col", "width").as_deref(), Some("18"));

    // "North" is shared by both sheets.
    let sst = entry(&entries, "xl/sharedStrings.xml");
    assert_eq!(first_attr(&sst, "sst", "uniqueCount").as_deref(), Some("5"));
    assert_eq!(first_attr(&sst, "sst", "count").as_deref(), Some("6"));
    let sheet2 = entry(&entries, "xl/worksheets/sheet2.xml");
    assert!(sheet2.contains(r#"<c r="A1" t="s"><v>2</v></c>"#));
}

#[test]
fn test_workbook_without_sheets_fails() {
    let mut xlsx = Xlsx::new().unwrap();
    let err = xlsx.to_bytes().unwrap_err();
    assert!(matches!(err.root_cause(), OoxmlError::InvalidArgument(_)));
}

#[test]
fn test_sheet_names_are_validated() {
    let mut xlsx = Xlsx::new().unwrap();
    xlsx.make_new_sheet("Data").unwrap();
    assert!(xlsx.make_new_sheet("data").is_err());
    assert!(xlsx.make_new_sheet("a/b").is_err());
    assert!(xlsx.make_new_sheet(&"x".repeat(32)).is_err());
    assert!(xlsx.make_new_sheet("").is_err());
    assert_eq!(xlsx.sheets().len(), 1);
}

#[test]
fn test_grid_edges() {
    let mut xlsx = Xlsx::new().unwrap();
    xlsx.make_new_sheet("Edge").unwrap().set_cell(1_048_575, 16_383, "last");
    let entries = unzip(&xlsx.to_bytes().unwrap());
    let sheet = entry(&entries, "xl/worksheets/sheet1.xml");
    assert_eq!(first_attr(&sheet, "c", "r").as_deref(), Some("XFD1048576"));

    for (row, col) in [(1_048_576, 0), (0, 16_384), (u32::MAX, u32::MAX)] {
        let mut xlsx = Xlsx::new().unwrap();
        xlsx.make_new_sheet("Edge").unwrap().set_cell(row, col, 1.0);
        let err = xlsx.to_bytes().unwrap_err();
        assert!(matches!(err.root_cause(), OoxmlError::InvalidArgument(_)), "{:?}", (row, col));
    }
}

#[test]
fn test_non_finite_numbers_fail() {
    let mut xlsx = Xlsx::new().unwrap();
    xlsx.make_new_sheet("S").unwrap().set_cell(0, 0, f64::NAN);
    assert!(matches!(xlsx.to_bytes().unwrap_err().root_cause(), OoxmlError::InvalidArgument(_)));
}

#[test]
fn test_column_letter_boundaries() {
    assert_eq!(column_letter(1), "A");
    assert_eq!(column_letter(26), "Z");
    assert_eq!(column_letter(27), "AA");
    assert_eq!(column_letter(52), "AZ");
    assert_eq!(column_letter(53), "BA");
    assert_eq!(column_letter(702), "ZZ");
    assert_eq!(column_letter(703), "AAA");
    assert_eq!(column_letter(16_384), "XFD");
}

fn column_number(letters: &str) -> u32 {
    letters.bytes().fold(0, |n, b| n * 26 + u32::from(b - b'A' + 1))
}

proptest! {
    #[test]
    fn prop_column_letter_is_bijective(col in 1u32..=100_000) {
        let letters = column_letter(col);
        prop_assert!(letters.bytes().all(|b| b.is_ascii_uppercase()));
        prop_assert_eq!(column_number(&letters), col);
    }

    #[test]
    fn prop_column_letters_sort_by_length_then_text(a in 1u32..20_000, b in 1u32..20_000) {
        let (la, lb) = (column_letter(a), column_letter(b));
        prop_assert_eq!(a.cmp(&b), (la.len(), &la).cmp(&(lb.len(), &lb)));
    }

    #[test]
    fn prop_repeated_text_is_stored_once(text in "[a-zA-Z ]{1,12}", copies in 1u32..20) {
        let mut xlsx = Xlsx::new().unwrap();
        let sheet = xlsx.make_new_sheet("Sheet1").unwrap();
        for row in 0..copies {
            sheet.set_cell(row, 0, text.as_str());
        }
        let entries = unzip(&xlsx.to_bytes().unwrap());

        let sst = entry(&entries, "xl/sharedStrings.xml");
        prop_assert_eq!(elements(&sst, "si").len(), 1);
        prop_assert_eq!(first_attr(&sst, "sst", "count"), Some(copies.to_string()));

        let sheet = entry(&entries, "xl/worksheets/sheet1.xml");
        prop_assert_eq!(sheet.matches(r#" t="s"><v>0</v></c>"#).count(), copies as usize);
    }

    #[test]
    fn prop_shared_strings_follow_first_seen_order(words in proptest::collection::vec("[a-z]{1,4}", 1..30)) {
        let mut xlsx = Xlsx::new().unwrap();
        let sheet = xlsx.make_new_sheet("Sheet1").unwrap();
        for (row, word) in words.iter().enumerate() {
            sheet.set_cell(row as u32, 0, word.as_str());
        }
        let entries = unzip(&xlsx.to_bytes().unwrap());

        let mut expected: Vec<&str> = Vec::new();
        for word in &words {
            if !expected.contains(&word.as_str()) {
                expected.push(word);
            }
        }
        let sst = entry(&entries, "xl/sharedStrings.xml");
        let stored: Vec<String> = sst
            .split("<t>")
            .skip(1)
            .filter_map(|s| s.split("</t>").next().map(str::to_string))
            .collect();
        prop_assert_eq!(stored, expected);
    }
}
