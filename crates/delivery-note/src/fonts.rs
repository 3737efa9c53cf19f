//! Note font resolution and installation
//!
//! The note prefers a dedicated Arabic-capable font loaded from a
//! well-known local path. When no font file is found (or it fails to
//! parse), rendering degrades to the builtin Helvetica family with a
//! warning; generation never aborts over missing font assets.

use crate::Result;
use log::{info, warn};
use pdf_core::{FontFamily, FontFamilyBuilder, PdfDocument};
use std::path::PathBuf;

/// Family name all note styles render with
pub const NOTE_FAMILY: &str = "note";

/// Outcome of font resolution
pub enum FontSource {
    /// Arabic-capable TTF data found on disk
    Embedded {
        regular: Vec<u8>,
        bold: Option<Vec<u8>>,
    },
    /// No usable font file; builtin Helvetica
    Builtin,
}

impl FontSource {
    /// True when an embedded font was located
    pub fn is_embedded(&self) -> bool {
        matches!(self, FontSource::Embedded { .. })
    }
}

/// Well-known locations for the Arabic note font
pub fn default_candidates() -> Vec<PathBuf> {
    vec![
        PathBuf::from("NotoNaskhArabic-Regular.ttf"),
        PathBuf::from("fonts/NotoNaskhArabic-Regular.ttf"),
    ]
}

/// Bold companion for a regular font path, if present
fn bold_companion(regular: &std::path::Path) -> Option<Vec<u8>> {
    let name = regular.file_name()?.to_str()?;
    let bold_name = name.replace("Regular", "Bold");
    if bold_name == name {
        return None;
    }
    std::fs::read(regular.with_file_name(bold_name)).ok()
}

/// Locate a note font among the candidate paths
///
/// Returns a tagged result rather than failing: the first readable
/// candidate wins, and no candidate at all means the builtin fallback.
pub fn locate(candidates: &[PathBuf]) -> FontSource {
    for path in candidates {
        match std::fs::read(path) {
            Ok(regular) => {
                info!("Arabic font loaded: {}", path.display());
                let bold = bold_companion(path);
                return FontSource::Embedded { regular, bold };
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => {
                warn!("Could not read font {}: {e}", path.display());
            }
        }
    }

    warn!(
        "Arabic font not found; falling back to builtin Helvetica. \
         Download 'Noto Naskh Arabic' for proper Arabic output."
    );
    FontSource::Builtin
}

/// Install the resolved font under [`NOTE_FAMILY`]
///
/// A corrupt embedded font degrades to the builtin family here, so the
/// returned registration is always usable.
pub fn install(source: FontSource, doc: &mut PdfDocument) -> Result<()> {
    if let FontSource::Embedded { regular, bold } = source {
        let mut builder = FontFamilyBuilder::new().regular(regular);
        if let Some(bold) = bold {
            builder = builder.bold(bold);
        }
        match doc.register_font_family(NOTE_FAMILY, builder) {
            Ok(()) => return Ok(()),
            Err(e) => {
                warn!("Font loading error: {e}; falling back to builtin Helvetica");
            }
        }
    }

    doc.add_builtin_family(NOTE_FAMILY, FontFamily::helvetica())?;
    Ok(())
}
