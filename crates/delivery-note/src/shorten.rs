//! Link shortening seam
//!
//! Shortening is a deliberate extension point: the composer only sees a
//! resolved URL string, so a network-backed implementation (Bitly,
//! Rebrandly, ...) can be substituted without touching the rest of the
//! pipeline. The implementation shipped here is a pure passthrough.

/// Strategy for shortening a download link
pub trait LinkShortener {
    /// Map a validated absolute URL to the URL placed in the note
    fn shorten(&self, url: &str) -> String;
}

/// Stub shortener returning the original URL unchanged
pub struct NoopShortener;

impl LinkShortener for NoopShortener {
    fn shorten(&self, url: &str) -> String {
        log::info!("Link shortening requested (stub - returns original URL)");
        url.to_string()
    }
}
