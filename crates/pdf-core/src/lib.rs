//! PDF Core - Low-level PDF construction
//!
//! This crate provides functionality for:
//! - Creating blank PDF documents with a chosen page geometry
//! - Embedding TrueType fonts (Type0/Identity-H with ToUnicode)
//! - Base-14 builtin fonts (Helvetica) for metric-accurate fallback text
//! - Inserting text at specific coordinates with alignment
//! - Inserting images (JPEG, PNG), horizontal rules and URI link annotations
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{Align, FontFamily, PdfDocument};
//!
//! let mut doc = PdfDocument::new(595.28, 841.89);
//! doc.add_builtin_family("helvetica", FontFamily::helvetica())?;
//! doc.set_font("helvetica", 12.0)?;
//! doc.insert_text("Hello, World!", 1, 100.0, 100.0, Align::Left)?;
//! doc.save("output.pdf")?;
//! ```

mod document;
mod font;
mod image;
mod text;

pub use document::{Color, PdfDocument};
pub use font::{BuiltinFont, FontData, FontFamily, FontFamilyBuilder, FontWeight};
pub use image::ImageScaleMode;
pub use text::{generate_rule_operators, generate_text_operators, wrap_to_width, TextRenderContext};

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("Font already exists: {0}")]
    FontAlreadyExists(String),

    #[error("Failed to parse font: {0}")]
    FontParseError(String),

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("PDF parsing error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Text alignment options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}
