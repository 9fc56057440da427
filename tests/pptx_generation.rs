mod common;

use common::{assert_manifest_matches, assert_package_well_formed, elements, entry, first_attr, rel_targets, unzip};
use ooxmlgen::ooxml::common::image::ImageOptions;
use ooxmlgen::ooxml::common::table::{TableCell, TableOptions};
use ooxmlgen::ooxml::pptx::ShapeOptions;
use ooxmlgen::{ChartDescriptor, Pptx, Series};

const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

fn deck() -> Pptx {
    let mut pptx = Pptx::new().unwrap();
    pptx.make_new_slide()
        .unwrap()
        .set_background("#003366")
        .add_text(
            "Results\nFiscal year",
            ShapeOptions {
                font_size: Some(32.0),
                bold: true,
                color: Some("FFFFFF".to_string()),
                ..ShapeOptions::at(457_200, 457_200, 8_229_600, 1_143_000)
            },
        );

    let mut slide = pptx.make_new_slide().unwrap();
    slide
        .add_chart(
            ChartDescriptor::new("pie")
                .title("Share")
                .series(Series::new("Share", ["A", "B", "C"], vec![50.0, 30.0, 20.0])),
            &ShapeOptions::default(),
        )
        .unwrap()
        .add_image(PNG.to_vec(), &ImageOptions::sized(952_500, 952_500).at(100, 200))
        .unwrap();

    pptx.make_new_slide().unwrap().add_table(
        vec![
            vec!["Region".into(), "Q1".into(), "Q2".into()],
            vec!["North".into(), 4.0.into()],
        ],
        TableOptions {
            border_color: Some("808080".to_string()),
            ..Default::default()
        },
    );
    pptx
}

#[test]
fn test_deck_package_is_consistent() {
    let mut pptx = deck();
    let bytes = pptx.to_bytes().unwrap();
    let entries = unzip(&bytes);
    assert_package_well_formed(&entries);
    assert_manifest_matches(&entries);

    for name in [
        "ppt/presentation.xml",
        "ppt/presProps.xml",
        "ppt/viewProps.xml",
        "ppt/tableStyles.xml",
        "ppt/slideMasters/slideMaster1.xml",
        "ppt/slideLayouts/slideLayout1.xml",
        "ppt/theme/theme1.xml",
        "ppt/slides/slide1.xml",
        "ppt/slides/slide2.xml",
        "ppt/slides/slide3.xml",
        "ppt/charts/chart1.xml",
        "ppt/embeddings/Microsoft_Excel_Sheet1.xlsx",
        "ppt/media/image1.png",
        "docProps/core.xml",
        "docProps/app.xml",
    ] {
        assert!(entries.contains_key(name), "missing {}", name);
    }
}

#[test]
fn test_slide_list_and_relationships() {
    let entries = unzip(&deck().to_bytes().unwrap());

    let presentation = entry(&entries, "ppt/presentation.xml");
    let slide_ids: Vec<_> = elements(&presentation, "p:sldId")
        .into_iter()
        .map(|a| (a["id"].clone(), a["r:id"].clone()))
        .collect();
    let pres_rels = rel_targets(&entries, "ppt/_rels/presentation.xml.rels");
    assert_eq!(slide_ids.len(), 3);
    for (n, (id, r_id)) in slide_ids.iter().enumerate() {
        assert_eq!(id, &(256 + n).to_string());
        assert_eq!(pres_rels[r_id], format!("slides/slide{}.xml", n + 1));
    }
    assert_eq!(pres_rels["rId1"], "slideMasters/slideMaster1.xml");

    for n in 1..=3 {
        let rels = rel_targets(&entries, &format!("ppt/slides/_rels/slide{}.xml.rels", n));
        assert_eq!(rels["rId1"], "../slideLayouts/slideLayout1.xml");
    }

    let slide2 = rel_targets(&entries, "ppt/slides/_rels/slide2.xml.rels");
    assert_eq!(slide2["rId2"], "../charts/chart1.xml");
    assert_eq!(slide2["rId3"], "../media/image1.png");
}

#[test]
fn test_slide_content() {
    let entries = unzip(&deck().to_bytes().unwrap());

    let title = entry(&entries, "ppt/slides/slide1.xml");
    assert_eq!(first_attr(&title, "a:srgbClr", "val").as_deref(), Some("003366"));
    assert_eq!(elements(&title, "a:p").len(), 2);
    assert_eq!(first_attr(&title, "a:rPr", "sz").as_deref(), Some("3200"));
    assert_eq!(first_attr(&title, "a:rPr", "b").as_deref(), Some("1"));

    let chart = entry(&entries, "ppt/slides/slide2.xml");
    assert_eq!(first_attr(&chart, "c:chart", "r:id").as_deref(), Some("rId2"));
    assert_eq!(first_attr(&chart, "a:blip", "r:embed").as_deref(), Some("rId3"));
    let ids: Vec<_> = elements(&chart, "p:cNvPr").into_iter().map(|a| a["id"].clone()).collect();
    assert_eq!(ids, ["1", "2", "3"]);

    let table = entry(&entries, "ppt/slides/slide3.xml");
    assert_eq!(elements(&table, "a:gridCol").len(), 3);
    // The short second row is padded to the grid.
    assert_eq!(elements(&table, "a:tc").len(), 6);
    assert!(!elements(&table, "a:lnL").is_empty());
}

#[test]
fn test_slide_mut_reopens_slide() {
    let mut pptx = Pptx::new().unwrap();
    pptx.make_new_slide().unwrap();
    pptx.slide_mut(0)
        .unwrap()
        .add_text("Later", ShapeOptions::default());
    assert!(pptx.slide_mut(1).is_none());

    let entries = unzip(&pptx.to_bytes().unwrap());
    assert!(entry(&entries, "ppt/slides/slide1.xml").contains("<a:t>Later</a:t>"));
}

#[test]
fn test_custom_slide_size() {
    let mut pptx = Pptx::new().unwrap();
    pptx.set_slide_size(12_192_000, 6_858_000);
    let entries = unzip(&pptx.to_bytes().unwrap());
    let presentation = entry(&entries, "ppt/presentation.xml");
    assert_eq!(first_attr(&presentation, "p:sldSz", "cx").as_deref(), Some("12192000"));
    assert!(elements(&presentation, "p:sldIdLst").is_empty());
}
