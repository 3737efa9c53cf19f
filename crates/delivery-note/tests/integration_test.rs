//! End-to-end tests for delivery note generation
//!
//! These run without any font files on disk, exercising the builtin
//! Helvetica fallback. In that mode text is written as WinAnsi literal
//! strings, so visible English content can be asserted directly against
//! the artifact bytes.

use delivery_note::{generate, DeliveryRequest, NoteError, PageFormat};
use std::path::PathBuf;

fn english_request(dir: &std::path::Path) -> DeliveryRequest {
    let mut request = DeliveryRequest::sample();
    request.product_title = "Pro Pack".to_string();
    request.product_subtitle = None;
    request.download_link = "https://example.com/file".to_string();
    request.logo_path = None;
    request.buyer_name = None;
    request.expiry_days = 0;
    request.locale = "en".to_string();
    request.output_path = dir.join("note.pdf");
    request
}

#[test]
fn test_scenario_english_no_expiry() {
    let dir = tempfile::tempdir().unwrap();
    let request = english_request(dir.path());

    let path = generate(&request).unwrap();
    let data = std::fs::read(&path).unwrap();
    let text = String::from_utf8_lossy(&data);

    assert!(data.starts_with(b"%PDF"));
    assert!(text.contains("(Download Here) Tj"));
    assert!(text.contains("(Pro Pack) Tj"));
    // No expiry line when expiry_days is 0
    assert!(!text.contains("Valid for:"));
    // The link annotation targets the resolved URL
    assert!(text.contains("https://example.com/file"));
}

#[test]
fn test_scenario_arabic_buyer_and_expiry() {
    let dir = tempfile::tempdir().unwrap();
    let mut request = english_request(dir.path());
    request.product_title = "حزمة".to_string();
    request.download_link = "https://example.com/x".to_string();
    request.locale = "ar".to_string();
    request.buyer_name = Some("أحمد".to_string());
    request.expiry_days = 7;

    let path = generate(&request).unwrap();
    let data = std::fs::read(&path).unwrap();

    assert!(data.starts_with(b"%PDF"));
    // Artifact reloads as a well-formed document
    let reloaded = lopdf::Document::load_mem(&data).unwrap();
    assert!(!reloaded.get_pages().is_empty());
    // The expiry count appears in the footer even in fallback mode
    let text = String::from_utf8_lossy(&data);
    assert!(text.contains('7'));
}

#[test]
fn test_scenario_invalid_url_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut request = english_request(dir.path());
    request.product_title = "X".to_string();
    request.download_link = "not-a-url".to_string();

    let result = generate(&request);
    assert!(matches!(result, Err(NoteError::InvalidUrl(_))));
    assert!(!request.output_path.exists());
    // No stray temp file either
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_demonstration_sample_renders() {
    let dir = tempfile::tempdir().unwrap();
    let mut request = DeliveryRequest::sample();
    request.output_path = dir.path().join("demo.pdf");

    let path = generate(&request).unwrap();
    let data = std::fs::read(&path).unwrap();
    assert!(data.starts_with(b"%PDF"));
}

#[test]
fn test_missing_logo_still_renders() {
    let dir = tempfile::tempdir().unwrap();
    let mut request = english_request(dir.path());
    request.logo_path = Some(PathBuf::from("/no/such/logo.png"));

    let path = generate(&request).unwrap();
    assert!(path.exists());
}

#[test]
fn test_logo_included_when_present() {
    let dir = tempfile::tempdir().unwrap();

    // 16x16 gray PNG as the logo
    let logo_path = dir.path().join("logo.png");
    let img: image::ImageBuffer<image::Luma<u8>, Vec<u8>> =
        image::ImageBuffer::from_pixel(16, 16, image::Luma([90u8]));
    img.save(&logo_path).unwrap();

    let mut request = english_request(dir.path());
    request.logo_path = Some(logo_path);

    let path = generate(&request).unwrap();
    let text = String::from_utf8_lossy(&std::fs::read(&path).unwrap()).into_owned();

    // Two images: logo and QR code
    assert!(text.contains("/Im1"));
    assert!(text.contains("/Im2"));
}

#[test]
fn test_ebook_format_page_size() {
    let dir = tempfile::tempdir().unwrap();
    let mut request = english_request(dir.path());
    request.format = PageFormat::Ebook;

    let path = generate(&request).unwrap();
    let data = std::fs::read(&path).unwrap();
    let reloaded = lopdf::Document::load_mem(&data).unwrap();

    let pages = reloaded.get_pages();
    let page_dict = reloaded.get_object(pages[&1]).unwrap().as_dict().unwrap();
    let media_box = page_dict.get(b"MediaBox").unwrap().as_array().unwrap();
    assert_eq!(media_box[2].as_f32().unwrap() as u32, 432);
    assert_eq!(media_box[3].as_f32().unwrap() as u32, 648);
}

#[test]
fn test_buyer_line_rendered_when_present() {
    let dir = tempfile::tempdir().unwrap();
    let mut request = english_request(dir.path());
    request.buyer_name = Some("Jane Doe".to_string());

    let path = generate(&request).unwrap();
    let text = String::from_utf8_lossy(&std::fs::read(&path).unwrap()).into_owned();
    assert!(text.contains("Buyer: Jane Doe"));
}

#[test]
fn test_expiry_line_rendered_when_positive() {
    let dir = tempfile::tempdir().unwrap();
    let mut request = english_request(dir.path());
    request.expiry_days = 30;

    let path = generate(&request).unwrap();
    let text = String::from_utf8_lossy(&std::fs::read(&path).unwrap()).into_owned();
    assert!(text.contains("Valid for: 30 days"));
}

#[test]
fn test_output_overwritten_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let request = english_request(dir.path());

    std::fs::write(&request.output_path, b"stale").unwrap();
    let path = generate(&request).unwrap();

    let data = std::fs::read(&path).unwrap();
    assert!(data.starts_with(b"%PDF"));
}
