mod common;

use common::{assert_manifest_matches, assert_package_well_formed, elements, entry, first_attr, rel_targets, unzip};
use ooxmlgen::ooxml::common::image::ImageOptions;
use ooxmlgen::ooxml::common::table::{CellOptions, StyleValue, TableCell, TableOptions};
use ooxmlgen::ooxml::common::DocumentProperties;
use ooxmlgen::ooxml::docx::{ParagraphOptions, TextOptions};
use ooxmlgen::{ChartDescriptor, Docx, Series};
use std::io::Cursor;

const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

fn report() -> Docx {
    let mut docx = Docx::new().unwrap();
    docx.set_properties(DocumentProperties::new().title("Quarterly report").creator("Finance"));

    docx.create_p(ParagraphOptions::styled("Heading1"))
        .add_text("Quarterly report", TextOptions::default())
        .unwrap();
    docx.create_p(ParagraphOptions::default())
        .add_text("See ", TextOptions::default())
        .unwrap()
        .add_text("the dashboard", TextOptions::link("https://example.com/q3"))
        .unwrap()
        .start_bookmark("summary")
        .add_text(" for details.", TextOptions::default())
        .unwrap()
        .end_bookmark();
    docx.create_p(ParagraphOptions::default())
        .add_image(PNG.to_vec(), &ImageOptions::sized(914_400, 457_200))
        .unwrap();
    docx.put_page_break();
    docx.create_table(
        vec![
            vec![
                TableCell::styled(
                    "Region",
                    CellOptions {
                        bold: Some(StyleValue::Uniform(true)),
                        ..Default::default()
                    },
                ),
                "Sales".into(),
            ],
            vec!["North".into(), 12.5.into()],
        ],
        TableOptions::default(),
    );
    docx.create_chart(
        ChartDescriptor::new("column")
            .title("Sales")
            .series(Series::new("2024", ["North", "South"], vec![12.5, 9.0])),
    )
    .unwrap();
    docx
}

#[test]
fn test_report_package_is_consistent() {
    let mut docx = report();
    let mut out = Cursor::new(Vec::new());
    let summary = docx.generate(&mut out).unwrap();
    let bytes = out.into_inner();
    assert_eq!(summary.bytes_written, bytes.len() as u64);

    let entries = unzip(&bytes);
    assert_package_well_formed(&entries);
    assert_manifest_matches(&entries);

    for part in &summary.parts {
        assert!(entries.contains_key(part.trim_start_matches('/')), "{} not written", part);
    }
    for name in [
        "word/document.xml",
        "word/styles.xml",
        "word/settings.xml",
        "word/webSettings.xml",
        "word/fontTable.xml",
        "word/theme/theme1.xml",
        "word/media/image1.png",
        "word/charts/chart1.xml",
        "word/embeddings/Microsoft_Excel_Sheet1.xlsx",
        "docProps/core.xml",
        "docProps/app.xml",
    ] {
        assert!(entries.contains_key(name), "missing {}", name);
    }
}

#[test]
fn test_document_relationships() {
    let entries = unzip(&report().to_bytes().unwrap());

    let package = rel_targets(&entries, "_rels/.rels");
    assert!(package.values().any(|t| t == "word/document.xml"));
    assert!(package.values().any(|t| t == "docProps/core.xml"));

    let rels = elements(&entry(&entries, "word/_rels/document.xml.rels"), "Relationship");
    let link = rels
        .iter()
        .find(|r| r["Target"] == "https://example.com/q3")
        .expect("hyperlink relationship");
    assert_eq!(link["TargetMode"], "External");

    let targets = rel_targets(&entries, "word/_rels/document.xml.rels");
    assert!(targets.values().any(|t| t == "media/image1.png"));
    assert!(targets.values().any(|t| t == "charts/chart1.xml"));

    let chart_rels = rel_targets(&entries, "word/charts/_rels/chart1.xml.rels");
    assert_eq!(chart_rels["rId1"], "../embeddings/Microsoft_Excel_Sheet1.xlsx");
}

#[test]
fn test_document_body() {
    let entries = unzip(&report().to_bytes().unwrap());
    let body = entry(&entries, "word/document.xml");

    assert!(body.contains("<w:t>Quarterly report</w:t>"));
    assert!(body.contains(r#"<w:t xml:space="preserve">See </w:t>"#));
    assert_eq!(first_attr(&body, "w:pStyle", "w:val").as_deref(), Some("Heading1"));
    assert_eq!(first_attr(&body, "w:bookmarkStart", "w:name").as_deref(), Some("summary"));
    assert_eq!(first_attr(&body, "w:br", "w:type").as_deref(), Some("page"));
    assert_eq!(first_attr(&body, "wp:extent", "cx").as_deref(), Some("914400"));
    assert_eq!(elements(&body, "w:tr").len(), 2);
    assert_eq!(elements(&body, "w:gridCol").len(), 2);
    assert_eq!(first_attr(&body, "w:gridCol", "w:w").as_deref(), Some("4320"));
    assert_eq!(elements(&body, "c:chart").len(), 1);

    let drawing_ids: Vec<_> = elements(&body, "wp:docPr").into_iter().map(|a| a["id"].clone()).collect();
    assert_eq!(drawing_ids, ["1", "2"]);
}

#[test]
fn test_core_properties() {
    let entries = unzip(&report().to_bytes().unwrap());
    let core = entry(&entries, "docProps/core.xml");
    assert!(core.contains("<dc:title>Quarterly report</dc:title>"));
    assert!(core.contains("<dc:creator>Finance</dc:creator>"));

    let app = entry(&entries, "docProps/app.xml");
    assert!(app.contains("<Application>Microsoft Office Word</Application>"));
}

#[test]
fn test_generate_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.docx");
    let file = std::fs::File::create(&path).unwrap();
    let summary = report().generate(file).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len() as u64, summary.bytes_written);
    assert_package_well_formed(&unzip(&bytes));
}

/// A sink with `Write` only, like stdout or a response body.
struct Pipe(Vec<u8>);

impl std::io::Write for Pipe {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_generate_to_unseekable_sink() {
    let mut pipe = Pipe(Vec::new());
    let summary = report().generate_stream(&mut pipe).unwrap();
    assert_eq!(summary.bytes_written, pipe.0.len() as u64);

    let streamed = unzip(&pipe.0);
    assert_package_well_formed(&streamed);
    assert_manifest_matches(&streamed);

    let seekable = unzip(&report().to_bytes().unwrap());
    assert_eq!(streamed.keys().collect::<Vec<_>>(), seekable.keys().collect::<Vec<_>>());
    assert_eq!(entry(&streamed, "word/document.xml"), entry(&seekable, "word/document.xml"));
}

#[test]
fn test_empty_document() {
    let entries = unzip(&Docx::new().unwrap().to_bytes().unwrap());
    assert_package_well_formed(&entries);
    assert_manifest_matches(&entries);
    assert!(entry(&entries, "word/document.xml").contains("<w:sectPr>"));
}

#[test]
fn test_layout_options() {
    let mut docx = Docx::new().unwrap();
    let page = docx.page_mut();
    *page = page.landscape();
    docx.set_font_size(12.0);
    docx.create_p(ParagraphOptions::aligned(ooxmlgen::ooxml::common::Align::Center))
        .add_text("first", TextOptions::default())
        .unwrap()
        .add_line_break()
        .add_text("second", TextOptions::default())
        .unwrap();
    docx.create_p(ParagraphOptions::default()).add_horizontal_line();

    let entries = unzip(&docx.to_bytes().unwrap());
    let body = entry(&entries, "word/document.xml");
    assert_eq!(first_attr(&body, "w:pgSz", "w:orient").as_deref(), Some("landscape"));
    assert_eq!(first_attr(&body, "w:pgSz", "w:w").as_deref(), Some("15840"));
    assert_eq!(first_attr(&body, "w:jc", "w:val").as_deref(), Some("center"));
    assert_eq!(elements(&body, "w:br").len(), 1);
    assert_eq!(first_attr(&body, "w:bottom", "w:val").as_deref(), Some("single"));

    let styles = entry(&entries, "word/styles.xml");
    assert_eq!(first_attr(&styles, "w:sz", "w:val").as_deref(), Some("24"));
}
