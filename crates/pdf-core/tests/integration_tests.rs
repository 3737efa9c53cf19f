//! Integration tests for pdf-core
//!
//! These tests verify end-to-end document construction with real PDF
//! operations, using builtin fonts so no font files are required.

use pdf_core::{Align, Color, FontFamily, FontWeight, ImageScaleMode, PdfDocument, PdfError};

/// Create a minimal grayscale PNG for image tests
fn create_test_png() -> Vec<u8> {
    use image::{ImageBuffer, Luma};

    let img: ImageBuffer<Luma<u8>, Vec<u8>> = ImageBuffer::from_pixel(16, 16, Luma([128u8]));
    let mut buffer = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut buffer),
        image::ImageFormat::Png,
    )
    .expect("Failed to create PNG");
    buffer
}

fn helvetica_doc() -> PdfDocument {
    let mut doc = PdfDocument::new(595.28, 841.89);
    doc.add_builtin_family("helv", FontFamily::helvetica())
        .expect("register helvetica");
    doc
}

#[test]
fn test_blank_document_saves() {
    let mut doc = PdfDocument::new(595.28, 841.89);
    let bytes = doc.to_bytes().expect("Failed to save");

    assert!(bytes.starts_with(b"%PDF"));

    let reloaded = lopdf::Document::load_mem(&bytes).expect("Failed to reload");
    assert_eq!(reloaded.get_pages().len(), 1);
}

#[test]
fn test_multi_page_document() {
    let mut doc = helvetica_doc();
    doc.add_page();
    doc.add_page();

    doc.set_font("helv", 12.0).unwrap();
    doc.insert_text("page one", 1, 50.0, 50.0, Align::Left).unwrap();
    doc.insert_text("page three", 3, 50.0, 50.0, Align::Left).unwrap();

    let bytes = doc.to_bytes().unwrap();
    let reloaded = lopdf::Document::load_mem(&bytes).unwrap();
    assert_eq!(reloaded.get_pages().len(), 3);
}

#[test]
fn test_builtin_text_is_literal() {
    let mut doc = helvetica_doc();
    doc.set_font("helv", 14.0).unwrap();
    doc.insert_text("Download Here", 1, 297.64, 200.0, Align::Center)
        .unwrap();

    // Builtin fonts write WinAnsi literal strings, so the visible text
    // appears verbatim in the uncompressed content stream
    let bytes = doc.to_bytes().unwrap();
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("(Download Here) Tj"));
    assert!(text.contains("/Helvetica"));
}

#[test]
fn test_bold_variant_resource() {
    let mut doc = helvetica_doc();
    doc.set_font("helv", 14.0).unwrap();
    doc.set_font_weight(FontWeight::Bold).unwrap();
    doc.insert_text("Strong", 1, 100.0, 100.0, Align::Left).unwrap();

    let bytes = doc.to_bytes().unwrap();
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("/Helvetica-Bold"));
}

#[test]
fn test_ebook_page_geometry() {
    let mut doc = PdfDocument::new(432.0, 648.0);
    let bytes = doc.to_bytes().unwrap();
    let reloaded = lopdf::Document::load_mem(&bytes).unwrap();

    let pages = reloaded.get_pages();
    let page_id = pages[&1];
    let page_dict = reloaded.get_object(page_id).unwrap().as_dict().unwrap();
    let media_box = page_dict.get(b"MediaBox").unwrap().as_array().unwrap();

    let width = media_box[2].as_f32().unwrap();
    let height = media_box[3].as_f32().unwrap();
    assert_eq!(width as u32, 432);
    assert_eq!(height as u32, 648);
}

#[test]
fn test_insert_png_image() {
    let mut doc = helvetica_doc();
    let png = create_test_png();

    doc.insert_image(&png, 1, 100.0, 100.0, 170.0, 170.0, ImageScaleMode::Stretch)
        .unwrap();

    let bytes = doc.to_bytes().unwrap();
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("/Im1 Do"));
    assert!(text.contains("/XObject"));
}

#[test]
fn test_image_deduplicated_by_content() {
    let mut doc = helvetica_doc();
    let png = create_test_png();

    doc.insert_image(&png, 1, 50.0, 50.0, 80.0, 80.0, ImageScaleMode::Stretch)
        .unwrap();
    doc.insert_image(&png, 1, 50.0, 200.0, 80.0, 80.0, ImageScaleMode::Stretch)
        .unwrap();

    let bytes = doc.to_bytes().unwrap();
    let text = String::from_utf8_lossy(&bytes);
    // Same data drawn twice reuses one resource
    assert_eq!(text.matches("/Im1 Do").count(), 2);
    assert!(!text.contains("/Im2"));
}

#[test]
fn test_image_invalid_page() {
    let mut doc = helvetica_doc();
    let png = create_test_png();

    let result = doc.insert_image(&png, 9, 0.0, 0.0, 10.0, 10.0, ImageScaleMode::Stretch);
    assert!(matches!(result, Err(PdfError::InvalidPage(9, 1))));
}

#[test]
fn test_garbage_image_rejected() {
    let mut doc = helvetica_doc();
    let result = doc.insert_image(
        &[0u8; 32],
        1,
        0.0,
        0.0,
        10.0,
        10.0,
        ImageScaleMode::Stretch,
    );
    assert!(matches!(result, Err(PdfError::ImageError(_))));
}

#[test]
fn test_rule_and_link_coexist() {
    let mut doc = helvetica_doc();
    doc.draw_rule(1, 56.7, 150.0, 481.88, 1.0, Color::from_rgb(226, 232, 240))
        .unwrap();
    doc.add_link(1, 200.0, 300.0, 120.0, 18.0, "https://example.com/dl")
        .unwrap();

    let bytes = doc.to_bytes().unwrap();
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("/Annots"));
    assert!(text.contains("/URI"));
    assert!(text.contains("https://example.com/dl"));
}

#[test]
fn test_centered_text_offsets_left() {
    let mut doc = helvetica_doc();
    doc.set_font("helv", 12.0).unwrap();
    doc.insert_text("Centered", 1, 297.64, 400.0, Align::Center)
        .unwrap();

    let bytes = doc.to_bytes().unwrap();
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("(Centered) Tj"));

    // The Td X operand is shifted left of the anchor by half the width
    let td_line = text
        .lines()
        .find(|l| l.ends_with(" Td"))
        .expect("no Td operator");
    let x: f64 = td_line.split_whitespace().next().unwrap().parse().unwrap();
    assert!(x < 297.64);
    assert!(x > 200.0);
}

#[test]
fn test_save_to_disk() {
    let dir = std::env::temp_dir().join("pdf-core-test-save");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("out.pdf");

    let mut doc = helvetica_doc();
    doc.set_font("helv", 12.0).unwrap();
    doc.insert_text("on disk", 1, 50.0, 50.0, Align::Left).unwrap();
    doc.save(&path).unwrap();

    let data = std::fs::read(&path).unwrap();
    assert!(data.starts_with(b"%PDF"));

    std::fs::remove_file(&path).ok();
}
