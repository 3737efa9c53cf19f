//! Bidi reordering for mixed-direction lines
//!
//! The glyph-placement engine lays characters out left to right, so
//! lines containing right-to-left runs must be reordered from logical
//! order into visual order before rendering.

use unicode_bidi::BidiInfo;

/// Reorder a logical-order line into visual order
///
/// Lines without RTL content pass through unchanged. Embedded newlines
/// start new bidi paragraphs and are preserved.
pub fn visual_line(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let bidi = BidiInfo::new(text, None);
    if !bidi.has_rtl() {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len());
    for (i, paragraph) in bidi.paragraphs.iter().enumerate() {
        if i > 0 {
            result.push('\n');
        }
        let line = paragraph.range.clone();
        result.push_str(&bidi.reorder_line(paragraph, line));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ltr_passthrough() {
        assert_eq!(visual_line("Download Here"), "Download Here");
        assert_eq!(visual_line("Support: x@y.com"), "Support: x@y.com");
    }

    #[test]
    fn test_empty() {
        assert_eq!(visual_line(""), "");
    }

    #[test]
    fn test_pure_rtl_reversed() {
        // Two Arabic words swap order visually; characters within each
        // word reverse as well since placement is left to right
        let logical = "مرحبا بكم";
        let visual = visual_line(logical);
        assert_ne!(visual, logical);
        // Same characters, same count
        let mut a: Vec<char> = logical.chars().collect();
        let mut b: Vec<char> = visual.chars().collect();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b);
    }

    #[test]
    fn test_mixed_line_keeps_latin_run_intact() {
        // "QR" inside an Arabic sentence must stay "QR", not "RQ"
        let visual = visual_line("امسح رمز QR للتحميل المباشر");
        assert!(visual.contains("QR"));
        assert!(!visual.contains("RQ"));
    }

    #[test]
    fn test_reorder_is_idempotent_for_ltr() {
        let once = visual_line("plain text 123");
        assert_eq!(visual_line(&once), once);
    }
}
