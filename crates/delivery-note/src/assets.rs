//! Asset preparation
//!
//! Everything the composer needs besides the request itself: the
//! validated (and possibly shortened) link, the QR image and the logo
//! reference. Input-level problems abort here, before any rendering;
//! a missing logo only logs a warning.

use crate::shorten::LinkShortener;
use crate::{qr, DeliveryRequest, NoteError, Result};
use log::warn;
use std::path::PathBuf;
use url::Url;

/// Immutable asset bundle for one note
pub struct Assets {
    /// The link placed in the note and encoded in the QR
    pub resolved_link: String,
    /// QR code PNG bytes
    pub qr_png: Vec<u8>,
    /// Logo file, present only when the path exists
    pub logo: Option<PathBuf>,
}

/// Validate that a link is an absolute URL with scheme and host
pub fn validate_url(link: &str) -> Result<Url> {
    let parsed = Url::parse(link).map_err(|_| NoteError::InvalidUrl(link.to_string()))?;
    if !parsed.has_host() {
        return Err(NoteError::InvalidUrl(link.to_string()));
    }
    Ok(parsed)
}

/// Prepare all assets for a request
pub fn prepare(request: &DeliveryRequest, shortener: &dyn LinkShortener) -> Result<Assets> {
    let url = validate_url(&request.download_link)?;

    let resolved_link = if request.use_shortener {
        shortener.shorten(url.as_str())
    } else {
        url.as_str().to_string()
    };

    let qr_png = qr::encode_qr(&resolved_link)?;

    let logo = match &request.logo_path {
        Some(path) if path.exists() => Some(path.clone()),
        Some(path) => {
            warn!("Logo file not found: {}", path.display());
            None
        }
        None => None,
    };

    Ok(Assets {
        resolved_link,
        qr_png,
        logo,
    })
}
