//! Integration tests for pdf-core
//!
//! These tests build documents, serialise them and read them back with lopdf.

use lopdf::Document;
use pdf_core::{Border, CellAlign, Color, FontStyle, PdfDocument, RectStyle, Unit};
use pretty_assertions::assert_eq;

/// Decompressed content stream of the first page
fn first_page_content(doc: &Document) -> String {
    let pages = doc.get_pages();
    let page_id = *pages.get(&1).unwrap();
    let content = doc.get_page_content(page_id).unwrap();
    String::from_utf8_lossy(&content).into_owned()
}

fn base_fonts(doc: &Document) -> Vec<String> {
    let pages = doc.get_pages();
    let page_id = *pages.get(&1).unwrap();
    let mut names: Vec<String> = doc
        .get_page_fonts(page_id)
        .values()
        .map(|font| {
            String::from_utf8_lossy(font.get(b"BaseFont").unwrap().as_name().unwrap())
                .into_owned()
        })
        .collect();
    names.sort();
    names
}

#[test]
fn test_round_trip_single_page() {
    let mut doc = PdfDocument::new(Unit::Pt, 595.28, 841.89);
    doc.set_font("Helvetica", FontStyle::Regular, 9.0).unwrap();
    doc.set_xy(28.3, 42.5);
    doc.multi_cell(
        200.0,
        12.0,
        "Hello",
        &Border::all(),
        CellAlign::parse("CM").unwrap(),
        false,
    )
    .unwrap();

    let bytes = doc.to_bytes().unwrap();
    let loaded = Document::load_mem(&bytes).unwrap();

    assert_eq!(loaded.get_pages().len(), 1);
    let content = first_page_content(&loaded);
    assert!(content.contains("(Hello) Tj"));
    assert!(content.contains("/F1 9 Tf"));
}

#[test]
fn test_media_box_uses_unit_scale() {
    let doc = PdfDocument::new(Unit::Mm, 210.0, 297.0);
    let bytes = doc.to_bytes().unwrap();
    let loaded = Document::load_mem(&bytes).unwrap();

    let page_id = *loaded.get_pages().get(&1).unwrap();
    let page = loaded.get_dictionary(page_id).unwrap();
    let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
    let width = media_box[2].as_float().unwrap();
    let height = media_box[3].as_float().unwrap();

    assert!((width - 595.28).abs() < 0.01);
    assert!((height - 841.89).abs() < 0.01);
}

#[test]
fn test_only_used_fonts_are_registered() {
    let mut doc = PdfDocument::new(Unit::Pt, 300.0, 300.0);
    doc.set_font("Helvetica", FontStyle::Regular, 9.0).unwrap();
    doc.set_font("Arial", FontStyle::Bold, 10.0).unwrap();
    doc.set_font("Helvetica", FontStyle::Regular, 11.0).unwrap();

    let bytes = doc.to_bytes().unwrap();
    let loaded = Document::load_mem(&bytes).unwrap();

    assert_eq!(
        base_fonts(&loaded),
        vec!["Helvetica".to_string(), "Helvetica-Bold".to_string()]
    );
}

#[test]
fn test_colours_and_shapes_are_written() {
    let mut doc = PdfDocument::new(Unit::Pt, 100.0, 100.0);
    doc.set_fill_color(Color::from_rgb(255, 0, 0));
    doc.set_draw_color(Color::from_rgb(0, 0, 255));
    doc.set_line_width(2.0);
    doc.rect(0.0, 0.0, 100.0, 100.0, RectStyle::FillDraw);
    doc.line(0.0, 50.0, 100.0, 50.0);

    let bytes = doc.to_bytes().unwrap();
    let loaded = Document::load_mem(&bytes).unwrap();
    let content = first_page_content(&loaded);

    assert!(content.contains("1 0 0 rg"));
    assert!(content.contains("0 0 1 RG"));
    assert!(content.contains("2 w"));
    assert!(content.contains("0 100 100 -100 re B"));
    assert!(content.contains("0 50 m 100 50 l S"));
}

#[test]
fn test_page_break_creates_second_page() {
    let mut doc = PdfDocument::new(Unit::Pt, 200.0, 100.0);
    doc.set_margins(10.0, 10.0, 10.0);
    doc.set_auto_page_break(true, 2.0);
    doc.set_font("Times", FontStyle::Italic, 10.0).unwrap();
    doc.set_xy(10.0, 10.0);

    let long_text = "word ".repeat(200);
    doc.multi_cell(
        180.0,
        12.0,
        &long_text,
        &Border::none(),
        CellAlign::default(),
        false,
    )
    .unwrap();

    assert!(doc.page_count() > 1);

    let bytes = doc.to_bytes().unwrap();
    let loaded = Document::load_mem(&bytes).unwrap();
    assert_eq!(loaded.get_pages().len(), doc.page_count());
}

#[test]
fn test_save_to_file() {
    let path = std::env::temp_dir().join("pdf_core_save_test.pdf");
    let mut doc = PdfDocument::new(Unit::Pt, 100.0, 100.0);
    doc.set_font("Courier", FontStyle::Regular, 8.0).unwrap();
    doc.set_xy(5.0, 5.0);
    doc.cell(50.0, 10.0, "saved", &Border::none(), CellAlign::default(), false)
        .unwrap();
    doc.save(&path).unwrap();

    let loaded = Document::load(&path).unwrap();
    assert_eq!(loaded.get_pages().len(), 1);
    std::fs::remove_file(&path).ok();
}
