mod common;

use common::{assert_manifest_matches, assert_package_well_formed, assert_well_formed, elements, entry, first_attr, unzip};
use ooxmlgen::common::xml::{Element, SerializeOptions, to_xml_string};
use ooxmlgen::ooxml::charts::{build_chart, chart_child_order};
use ooxmlgen::ooxml::pptx::ShapeOptions;
use ooxmlgen::{ChartDescriptor, Docx, GenerateListener, OoxmlError, Pptx, Series};
use proptest::prelude::*;
use std::io::Cursor;

const LABELS: [&str; 5] = ["Jan", "Feb", "Mar", "Apr", "May"];

const RENDER_TYPES: [&str; 8] = [
    "bar",
    "column",
    "stacked-column",
    "group-bar",
    "pie",
    "line",
    "area",
    "doughnut",
];

fn income_expense() -> ChartDescriptor {
    ChartDescriptor::new("column")
        .title("Cash flow")
        .series(Series::new("Income", LABELS, vec![10.0, 12.0, 9.0, 14.0, 11.0]))
        .series(Series::new("Expense", LABELS, vec![8.0, 9.5, 7.0, 10.0, 12.5]))
}

#[derive(Default)]
struct Recorder {
    events: Vec<String>,
}

impl GenerateListener for Recorder {
    fn finalize(&mut self, bytes_written: u64) {
        self.events.push(format!("finalize {}", bytes_written));
    }

    fn error(&mut self, error: &OoxmlError) {
        self.events.push(format!("error {}", error));
    }
}

#[test]
fn test_column_chart_end_to_end() {
    let mut pptx = Pptx::new().unwrap();
    pptx.make_new_slide()
        .unwrap()
        .add_chart(income_expense(), &ShapeOptions::default())
        .unwrap();

    let mut recorder = Recorder::default();
    let mut out = Cursor::new(Vec::new());
    let summary = pptx.generate_with(&mut out, &mut recorder).unwrap();
    let bytes = out.into_inner();
    assert_eq!(recorder.events, [format!("finalize {}", bytes.len())]);

    let entries = unzip(&bytes);
    assert_package_well_formed(&entries);
    assert_manifest_matches(&entries);

    let manifest = entry(&entries, "[Content_Types].xml");
    let overrides: Vec<String> = elements(&manifest, "Override")
        .into_iter()
        .map(|mut a| a.remove("PartName").unwrap())
        .collect();
    // XML parts are declared one by one; the embedded workbook by extension.
    let xml_parts: Vec<&String> = summary.parts.iter().filter(|p| p.ends_with(".xml")).collect();
    for part in &xml_parts {
        assert!(overrides.contains(part), "{} not declared", part);
    }
    assert_eq!(overrides.len(), xml_parts.len());
    assert_eq!(first_attr(&manifest, "Default", "Extension").as_deref(), Some("rels"));
    assert!(elements(&manifest, "Default").iter().any(|d| d["Extension"] == "xlsx"));

    let chart = entry(&entries, "ppt/charts/chart1.xml");
    assert_eq!(first_attr(&chart, "c:overlap", "val").as_deref(), Some("0"));
    assert_eq!(first_attr(&chart, "c:gapWidth", "val").as_deref(), Some("150"));
    assert_eq!(first_attr(&chart, "c:barDir", "val").as_deref(), Some("col"));
    assert_eq!(first_attr(&chart, "c:externalData", "r:id").as_deref(), Some("rId1"));
    assert!(chart.contains("<c:f>Sheet1!$C$2:$C$6</c:f>"));
    assert!(chart.contains("<c:f>Sheet1!$D$2:$D$6</c:f>"));
    assert!(chart.contains("<c:f>Sheet1!$A$2:$A$6</c:f>"));
    assert_eq!(elements(&chart, "c:ser").len(), 2);
}

#[test]
fn test_embedded_workbook_matches_ranges() {
    let mut pptx = Pptx::new().unwrap();
    pptx.make_new_slide()
        .unwrap()
        .add_chart(income_expense(), &ShapeOptions::default())
        .unwrap();
    let entries = unzip(&pptx.to_bytes().unwrap());

    let workbook = unzip(&entries["ppt/embeddings/Microsoft_Excel_Sheet1.xlsx"]);
    assert_package_well_formed(&workbook);
    let sheet = entry(&workbook, "xl/worksheets/sheet1.xml");
    assert_eq!(first_attr(&sheet, "dimension", "ref").as_deref(), Some("A1:D6"));
    assert!(sheet.contains(r#"<c r="C6"><v>11</v></c><c r="D6"><v>12.5</v></c>"#));
    assert!(elements(&sheet, "c").iter().all(|c| !c["r"].starts_with('B')));
}

#[test]
fn test_unsupported_chart_type_reports_error() {
    let mut docx = Docx::new().unwrap();
    docx.create_chart(ChartDescriptor::new("not-a-real-type").series(Series::new("s", ["a"], vec![1.0])))
        .unwrap();

    let mut recorder = Recorder::default();
    let mut out = Cursor::new(Vec::new());
    let err = docx.generate_with(&mut out, &mut recorder).unwrap_err();

    assert!(matches!(err.root_cause(), OoxmlError::UnsupportedChartType(t) if t == "not-a-real-type"));
    assert!(err.to_string().contains("/word/charts/chart1.xml"));
    assert_eq!(recorder.events.len(), 1);
    assert!(recorder.events[0].starts_with("error "));
    assert!(out.into_inner().is_empty());
}

#[test]
fn test_mismatched_series_is_invalid() {
    let desc = ChartDescriptor::new("line").series(Series::new("s", ["a", "b"], vec![1.0]));
    assert!(matches!(build_chart(&desc), Err(OoxmlError::InvalidChartData(_))));
}

#[test]
fn test_empty_series_fails_generation() {
    let mut docx = Docx::new().unwrap();
    docx.create_chart(ChartDescriptor::new("column").series(Series::new("s", Vec::<String>::new(), vec![])))
        .unwrap();
    let mut out = Cursor::new(Vec::new());
    let err = docx.generate(&mut out).unwrap_err();
    assert!(matches!(err.root_cause(), OoxmlError::InvalidChartData(_)));
    assert!(out.into_inner().is_empty());
}

#[test]
fn test_raw_tree_without_render_type() {
    let raw = Element::new("c:chartSpace")
        .attr("xmlns:c", "http://schemas.openxmlformats.org/drawingml/2006/chart")
        .child(Element::new("c:chart"));
    let desc = ChartDescriptor {
        xml: Some(raw.clone()),
        ..Default::default()
    };
    assert_eq!(build_chart(&desc).unwrap(), raw);
}

#[test]
fn test_charts_of_same_type_are_independent() {
    let desc = income_expense().title("Budget");
    let reference = build_chart(&desc).unwrap();

    let mut first = build_chart(&desc).unwrap();
    assert_eq!(first, reference);
    let bar = first
        .find_path_mut(&["c:chart", "c:plotArea", "c:barChart"])
        .unwrap();
    assert_eq!(bar.remove_children("c:ser"), 2);
    assert_eq!(bar.remove_children("c:overlap"), 1);
    bar.insert_ordered(Element::val("c:overlap", 100), chart_child_order);
    first.remove_children("c:chart");
    first.insert_ordered(Element::val("c:roundedCorners", true), chart_child_order);
    assert_ne!(first, reference);

    let second = build_chart(&desc).unwrap();
    assert_eq!(second, reference);
    let xml = to_xml_string(&second, &SerializeOptions::fragment());
    assert_eq!(elements(&xml, "c:ser").len(), 2);
    assert_eq!(first_attr(&xml, "c:overlap", "val").as_deref(), Some("0"));
    assert_eq!(elements(&xml, "c:roundedCorners").len(), 1);
    assert_eq!(first_attr(&xml, "c:roundedCorners", "val").as_deref(), Some("0"));
}

#[test]
fn test_every_render_type_in_one_document() {
    let mut docx = Docx::new().unwrap();
    for render_type in RENDER_TYPES {
        docx.create_chart(
            ChartDescriptor::new(render_type)
                .title(render_type)
                .series(Series::new("A", ["x", "y", "z"], vec![1.0, 2.0, 3.0]).color("4F81BD")),
        )
        .unwrap();
    }
    let entries = unzip(&docx.to_bytes().unwrap());
    assert_package_well_formed(&entries);
    assert_manifest_matches(&entries);
    for n in 1..=RENDER_TYPES.len() {
        assert!(entries.contains_key(&format!("word/charts/chart{}.xml", n)));
        assert!(entries.contains_key(&format!("word/embeddings/Microsoft_Excel_Sheet{}.xlsx", n)));
    }
}

fn series_strategy() -> impl Strategy<Value = Vec<Series>> {
    (1usize..6, 1usize..4).prop_flat_map(|(labels, count)| {
        proptest::collection::vec(
            (
                "[A-Za-z&<>\" ]{0,10}",
                proptest::collection::vec(-1.0e6f64..1.0e6, labels),
            ),
            count,
        )
        .prop_map(move |series| {
            series
                .into_iter()
                .map(|(name, values)| {
                    let labels: Vec<String> = (0..values.len()).map(|i| format!("L{} <{}>", i, i)).collect();
                    Series::new(&name, labels, values)
                })
                .collect()
        })
    })
}

proptest! {
    #[test]
    fn prop_accepted_charts_are_well_formed(
        kind in proptest::sample::select(RENDER_TYPES.to_vec()),
        series in series_strategy(),
        title in proptest::option::of("[A-Za-z&<> ]{0,20}"),
        val_axis_title in proptest::option::of("[A-Za-z ]{1,10}"),
        gridlines in any::<bool>(),
    ) {
        let desc = ChartDescriptor {
            render_type: Some(kind.to_string()),
            data: series,
            title,
            val_axis_title,
            val_axis_major_gridlines: Some(gridlines),
            ..Default::default()
        };
        let tree = build_chart(&desc).unwrap();
        let xml = to_xml_string(&tree, &SerializeOptions::default());
        assert_well_formed(kind, &xml);
    }
}
