//! Note content assembly
//!
//! `build_note` produces the ordered, immutable block sequence for a
//! request. Assembly is pure apart from reading the clock for the
//! generation timestamp, so the conditional content rules (expiry line,
//! buyer line, logo) are testable without rendering anything.

use crate::{Assets, DeliveryRequest};
use locale_text::{lookup, Lang};
use pdf_core::Align;

/// Which named style a text block renders with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleKind {
    Title,
    Subtitle,
    Body,
    Link,
}

/// One content block of the note, in reading order
#[derive(Debug, Clone, PartialEq)]
pub enum NoteBlock {
    /// Header logo (present only when the logo asset resolved)
    Logo,
    /// The QR code image
    Qr,
    /// A styled text line or paragraph
    Text {
        text: String,
        style: StyleKind,
        /// Per-block alignment override (e.g. a centered body caption)
        align: Option<Align>,
        /// Render bold regardless of the style's weight
        bold: bool,
    },
    /// The clickable download line
    LinkText { text: String, url: String },
    /// Full-width horizontal rule
    Rule,
    /// Vertical gap in points
    Spacer { points: f64 },
}

impl NoteBlock {
    fn text(text: impl Into<String>, style: StyleKind) -> Self {
        NoteBlock::Text {
            text: text.into(),
            style,
            align: None,
            bold: false,
        }
    }

    fn body(text: impl Into<String>) -> Self {
        Self::text(text, StyleKind::Body)
    }
}

/// Millimeters to points
pub fn mm(value: f64) -> f64 {
    value * 72.0 / 25.4
}

/// Assemble the fixed block sequence for a request
///
/// Order is not configurable: header, title, download section,
/// instructions, footer.
pub fn build_note(request: &DeliveryRequest, assets: &Assets, lang: Lang) -> Vec<NoteBlock> {
    let mut blocks = Vec::new();

    // Header: logo (if any), store name, rule
    if assets.logo.is_some() {
        blocks.push(NoteBlock::Logo);
        blocks.push(NoteBlock::Spacer { points: mm(10.0) });
    }
    blocks.push(NoteBlock::text(lookup(lang, "store_name"), StyleKind::Title));
    blocks.push(NoteBlock::Rule);
    blocks.push(NoteBlock::Spacer { points: mm(15.0) });

    // Title section
    blocks.push(NoteBlock::text(&request.product_title, StyleKind::Title));
    if let Some(subtitle) = &request.product_subtitle {
        if !subtitle.is_empty() {
            blocks.push(NoteBlock::text(subtitle, StyleKind::Subtitle));
        }
    }
    blocks.push(NoteBlock::Spacer { points: mm(10.0) });

    // Download section: QR, scan hint, link
    blocks.push(NoteBlock::Qr);
    blocks.push(NoteBlock::Spacer { points: mm(5.0) });
    blocks.push(NoteBlock::Text {
        text: lookup(lang, "scan_qr").to_string(),
        style: StyleKind::Body,
        align: Some(Align::Center),
        bold: false,
    });
    blocks.push(NoteBlock::Spacer { points: mm(8.0) });
    blocks.push(NoteBlock::LinkText {
        text: lookup(lang, "download_here").to_string(),
        url: assets.resolved_link.clone(),
    });
    blocks.push(NoteBlock::Spacer { points: mm(15.0) });

    // Instructions: heading plus the four fixed lines
    blocks.push(NoteBlock::Text {
        text: lookup(lang, "instructions_title").to_string(),
        style: StyleKind::Body,
        align: None,
        bold: true,
    });
    blocks.push(NoteBlock::Spacer { points: mm(5.0) });
    for key in ["instruction_1", "instruction_2", "instruction_3", "instruction_4"] {
        blocks.push(NoteBlock::body(lookup(lang, key)));
    }
    blocks.push(NoteBlock::Spacer { points: mm(15.0) });

    // Footer: rule, support, buyer, generated, expiry
    blocks.push(NoteBlock::Rule);
    blocks.push(NoteBlock::Spacer { points: mm(8.0) });
    blocks.push(NoteBlock::body(format!(
        "{} {}",
        lookup(lang, "support"),
        request.vendor_email
    )));

    if let Some(buyer) = &request.buyer_name {
        if !buyer.is_empty() {
            blocks.push(NoteBlock::body(format!(
                "{} {buyer}",
                lookup(lang, "buyer")
            )));
        }
    }

    let generated = chrono::Local::now().format("%Y-%m-%d");
    blocks.push(NoteBlock::body(format!(
        "{} {generated}",
        lookup(lang, "generated")
    )));

    if request.expiry_days > 0 {
        blocks.push(NoteBlock::body(format!(
            "{} {} {}",
            lookup(lang, "valid_for"),
            request.expiry_days,
            lookup(lang, "days")
        )));
    }

    blocks
}
