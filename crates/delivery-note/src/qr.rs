//! QR code generation

use crate::{NoteError, Result};
use image::Luma;
use qrcode::{EcLevel, QrCode};

/// Encode a payload as a QR code PNG
///
/// Error-correction level L is enough for a short URL and keeps the
/// module grid small for print. The render includes the standard
/// quiet-zone border and is black-on-white at 200x200 px minimum.
/// Encoding is deterministic: the same payload always yields the same
/// bytes.
pub fn encode_qr(payload: &str) -> Result<Vec<u8>> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::L)
        .map_err(|_| NoteError::PayloadTooLarge(payload.len()))?;

    let image = code
        .render::<Luma<u8>>()
        .quiet_zone(true)
        .min_dimensions(200, 200)
        .build();

    let mut bytes: Vec<u8> = Vec::new();
    image::DynamicImage::ImageLuma8(image)
        .write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .map_err(|e| NoteError::Image(e.to_string()))?;

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_encode_produces_png() {
        let bytes = encode_qr("https://example.com/file").unwrap();
        assert_eq!(&bytes[..8], &PNG_MAGIC);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let a = encode_qr("https://example.com/x").unwrap();
        let b = encode_qr("https://example.com/x").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_payloads_differ() {
        let a = encode_qr("https://example.com/a").unwrap();
        let b = encode_qr("https://example.com/b").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_oversized_payload_rejected() {
        // QR capacity tops out below 3 KB even at EC level L
        let payload = "x".repeat(8000);
        let result = encode_qr(&payload);
        assert!(matches!(result, Err(NoteError::PayloadTooLarge(8000))));
    }
}
