//! Delivery Note - PDF delivery note generation for digital products
//!
//! This crate turns a [`DeliveryRequest`] (product title, download link,
//! buyer, expiry window, locale) into a paginated PDF with a scannable QR
//! code and a clickable download link, localized for Arabic or English.
//!
//! The pipeline has three stages:
//! - asset preparation: URL validation, optional link-shortener seam, QR
//!   generation, logo probing ([`assets::prepare`])
//! - block assembly: a pure, ordered sequence of content blocks
//!   ([`blocks::build_note`])
//! - composition: flowing layout into pdf-core with an atomic write
//!   ([`composer::compose`])
//!
//! # Example
//!
//! ```ignore
//! use delivery_note::DeliveryRequest;
//!
//! let request = DeliveryRequest::sample();
//! let path = delivery_note::generate(&request)?;
//! println!("wrote {}", path.display());
//! ```

pub mod assets;
pub mod blocks;
pub mod composer;
pub mod fonts;
pub mod qr;
pub mod request;
pub mod shorten;
pub mod style;

pub use assets::Assets;
pub use blocks::{build_note, NoteBlock, StyleKind};
pub use request::{DeliveryRequest, PageFormat};
pub use shorten::{LinkShortener, NoopShortener};
pub use style::{StyleSheet, TextStyle};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during delivery note generation
#[derive(Debug, Error)]
pub enum NoteError {
    #[error("Invalid download URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration file not found: {0}")]
    ConfigNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(String),

    #[error("QR payload too large ({0} bytes)")]
    PayloadTooLarge(usize),

    #[error("Image encoding error: {0}")]
    Image(String),

    #[error("Failed to compose document: {0}")]
    Composition(#[from] pdf_core::PdfError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for delivery note operations
pub type Result<T> = std::result::Result<T, NoteError>;

/// Generate a delivery note PDF for a request
///
/// Convenience wrapper running asset preparation and composition with the
/// stub link shortener. Returns the path of the written artifact.
pub fn generate(request: &DeliveryRequest) -> Result<PathBuf> {
    let assets = assets::prepare(request, &NoopShortener)?;
    composer::compose(request, &assets)
}
