//! Font handling for PDF documents
//!
//! Two kinds of fonts are supported: embedded TrueType fonts (Type0 with
//! Identity-H encoding, full Unicode coverage) and the base-14 builtin
//! fonts (Type1, WinAnsi encoding, no font file needed). Builtin fonts
//! carry their AFM metric tables so text alignment stays exact even when
//! no font file is available on disk.

use crate::{PdfError, Result};
use lopdf::{Dictionary, Object, Stream};
use std::collections::HashSet;

/// Font weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// Font data structure for embedded TrueType fonts
#[derive(Debug, Clone)]
pub struct FontData {
    /// Font name/identifier
    pub name: String,
    /// Raw TTF data
    pub ttf_data: Vec<u8>,
    /// Characters rendered with this font (for ToUnicode and /W)
    pub used_chars: HashSet<char>,
    /// Parsed font face
    face: Option<ttf_parser::Face<'static>>,
}

/// PDF objects generated for embedding a TrueType font
pub struct FontObjects {
    /// Type0 font dictionary
    pub type0_font: Dictionary,
    /// CIDFont Type2 dictionary
    pub cid_font: Dictionary,
    /// Font descriptor dictionary
    pub font_descriptor: Dictionary,
    /// Font file stream (TTF data)
    pub font_file_stream: Stream,
    /// ToUnicode CMap stream
    pub tounicode_stream: Stream,
}

/// A base-14 builtin font with its standard AFM widths
///
/// Builtin fonts are not embedded; every conforming PDF viewer supplies
/// them. Text is written as WinAnsi literal strings, and characters
/// outside the table encode as '?'.
#[derive(Debug, Clone)]
pub struct BuiltinFont {
    /// PDF BaseFont name (e.g. "Helvetica")
    pub base_font: &'static str,
    /// Glyph widths for chars 0x20..=0x7E, in 1/1000 em
    widths: &'static [u16; 95],
}

// Adobe core-14 AFM widths, chars 0x20..=0x7E.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, 556, 556, 556,
    556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, 1015, 667, 667, 722, 722,
    667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944,
    667, 667, 611, 278, 278, 278, 469, 556, 333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222,
    500, 222, 833, 556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334,
    584,
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, 556, 556, 556,
    556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, 975, 722, 722, 722, 722, 667,
    611, 778, 722, 278, 556, 722, 611, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667,
    667, 611, 333, 278, 333, 584, 556, 333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556,
    278, 889, 611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

impl BuiltinFont {
    /// Standard Helvetica
    pub fn helvetica() -> Self {
        Self {
            base_font: "Helvetica",
            widths: &HELVETICA_WIDTHS,
        }
    }

    /// Standard Helvetica-Bold
    pub fn helvetica_bold() -> Self {
        Self {
            base_font: "Helvetica-Bold",
            widths: &HELVETICA_BOLD_WIDTHS,
        }
    }

    /// Check if the font can represent the given character
    pub fn has_glyph(&self, c: char) -> bool {
        (' '..='~').contains(&c)
    }

    /// Calculate text width in points for a given font size
    ///
    /// Characters outside the table measure as '?', matching how they
    /// are encoded.
    pub fn text_width_points(&self, text: &str, font_size: f32) -> f32 {
        let units: u32 = text
            .chars()
            .map(|c| {
                let c = if self.has_glyph(c) { c } else { '?' };
                self.widths[c as usize - 0x20] as u32
            })
            .sum();
        (units as f32 / 1000.0) * font_size
    }

    /// Encode text as an escaped PDF literal string for the Tj operator
    pub fn encode_literal(&self, text: &str) -> String {
        let mut result = String::with_capacity(text.len() + 2);
        result.push('(');
        for c in text.chars() {
            let c = if self.has_glyph(c) { c } else { '?' };
            match c {
                '(' | ')' | '\\' => {
                    result.push('\\');
                    result.push(c);
                }
                _ => result.push(c),
            }
        }
        result.push(')');
        result
    }

    /// Generate the Type1 font dictionary for this builtin font
    pub fn to_pdf_object(&self) -> Dictionary {
        Dictionary::from_iter(vec![
            ("Type", "Font".into()),
            ("Subtype", "Type1".into()),
            ("BaseFont", Object::Name(self.base_font.as_bytes().to_vec())),
            ("Encoding", "WinAnsiEncoding".into()),
        ])
    }
}

/// A font family resolvable by weight
///
/// Bold falls back to regular when no bold variant is registered, so a
/// single-file font still renders headings.
#[derive(Debug, Clone)]
pub enum FontFamily {
    /// Embedded TrueType variants
    Embedded {
        regular: FontData,
        bold: Option<FontData>,
    },
    /// Builtin base-14 variants
    Builtin {
        regular: BuiltinFont,
        bold: Option<BuiltinFont>,
    },
}

impl FontFamily {
    /// Builtin Helvetica family with a bold variant
    pub fn helvetica() -> Self {
        FontFamily::Builtin {
            regular: BuiltinFont::helvetica(),
            bold: Some(BuiltinFont::helvetica_bold()),
        }
    }

    /// Internal font name for the variant (for PDF resource bookkeeping)
    pub fn variant_name(&self, family_name: &str, weight: FontWeight) -> String {
        let has_bold = match self {
            FontFamily::Embedded { bold, .. } => bold.is_some(),
            FontFamily::Builtin { bold, .. } => bold.is_some(),
        };
        match weight {
            FontWeight::Bold if has_bold => format!("{family_name}-bold"),
            _ => family_name.to_string(),
        }
    }
}

/// Builder for registering embedded font families
pub struct FontFamilyBuilder {
    regular: Option<Vec<u8>>,
    bold: Option<Vec<u8>>,
}

impl FontFamilyBuilder {
    pub fn new() -> Self {
        Self {
            regular: None,
            bold: None,
        }
    }

    pub fn regular(mut self, ttf_data: Vec<u8>) -> Self {
        self.regular = Some(ttf_data);
        self
    }

    pub fn bold(mut self, ttf_data: Vec<u8>) -> Self {
        self.bold = Some(ttf_data);
        self
    }

    /// Build the FontFamily from the provided TTF data
    pub fn build(self, family_name: &str) -> Result<FontFamily> {
        let regular = match self.regular {
            Some(ttf_data) => FontData::from_ttf(family_name, &ttf_data)?,
            None => {
                return Err(PdfError::FontParseError(
                    "FontFamily must have at least a regular variant".to_string(),
                ))
            }
        };

        let bold = self
            .bold
            .map(|data| FontData::from_ttf(&format!("{family_name}-bold"), &data))
            .transpose()?;

        Ok(FontFamily::Embedded { regular, bold })
    }
}

impl Default for FontFamilyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FontData {
    /// Create font data from TTF bytes
    ///
    /// # Arguments
    /// * `name` - Font identifier
    /// * `ttf_data` - TrueType font file bytes
    pub fn from_ttf(name: &str, ttf_data: &[u8]) -> Result<Self> {
        let data = ttf_data.to_vec();

        // The face borrows the data for the document lifetime, so the
        // buffer is leaked once per loaded font.
        let static_data: &'static [u8] = Box::leak(data.clone().into_boxed_slice());

        let face = ttf_parser::Face::parse(static_data, 0)
            .map_err(|e| PdfError::FontParseError(format!("{e:?}")))?;

        Ok(Self {
            name: name.to_string(),
            ttf_data: data,
            used_chars: HashSet::new(),
            face: Some(face),
        })
    }

    /// Add characters to the used set (for ToUnicode and /W generation)
    pub fn add_chars(&mut self, text: &str) {
        for c in text.chars() {
            self.used_chars.insert(c);
        }
    }

    /// Get glyph ID for a character
    pub fn glyph_id(&self, c: char) -> Option<u16> {
        self.face
            .as_ref()
            .and_then(|face| face.glyph_index(c).map(|id| id.0))
    }

    /// Check if font has a glyph for the given character
    pub fn has_glyph(&self, c: char) -> bool {
        self.glyph_id(c).map(|id| id != 0).unwrap_or(false)
    }

    /// Get glyph advance width in font units
    pub fn glyph_advance(&self, c: char) -> Option<u16> {
        self.face.as_ref().and_then(|face| {
            let glyph_id = face.glyph_index(c)?;
            face.glyph_hor_advance(glyph_id)
        })
    }

    /// Get font units per em
    pub fn units_per_em(&self) -> u16 {
        self.face
            .as_ref()
            .map(|face| face.units_per_em())
            .unwrap_or(1000)
    }

    /// Get font ascender
    pub fn ascender(&self) -> i16 {
        self.face
            .as_ref()
            .map(|face| face.ascender())
            .unwrap_or(800)
    }

    /// Get font descender
    pub fn descender(&self) -> i16 {
        self.face
            .as_ref()
            .map(|face| face.descender())
            .unwrap_or(-200)
    }

    /// Calculate text width in font units
    pub fn text_width(&self, text: &str) -> u32 {
        text.chars()
            .filter_map(|c| self.glyph_advance(c))
            .map(|w| w as u32)
            .sum()
    }

    /// Calculate text width in points for a given font size
    pub fn text_width_points(&self, text: &str, font_size: f32) -> f32 {
        let width = self.text_width(text);
        let units_per_em = self.units_per_em() as f32;
        (width as f32 / units_per_em) * font_size
    }

    /// Encode text as hex string for the PDF Tj operator (Identity-H GIDs)
    pub fn encode_text_hex(&self, text: &str) -> String {
        let mut result = String::new();
        for c in text.chars() {
            let gid = self.glyph_id(c).unwrap_or(0);
            result.push_str(&format!("{gid:04X}"));
        }
        format!("<{result}>")
    }

    /// Generate all PDF objects needed to embed this font
    pub fn to_pdf_objects(&self) -> Result<FontObjects> {
        let font_name = Object::Name(self.name.clone().into());

        // Generate ToUnicode CMap
        let tounicode_content = self.generate_tounicode_cmap();
        let tounicode_stream = Stream::new(
            Dictionary::from_iter(vec![
                ("Type", "CMap".into()),
                ("Length", (tounicode_content.len() as i32).into()),
            ]),
            tounicode_content.as_bytes().to_vec(),
        );

        // Generate font file stream
        let font_file_stream = Stream::new(
            Dictionary::from_iter(vec![(
                "Length1",
                (self.ttf_data.len() as i32).into(),
            )]),
            self.ttf_data.clone(),
        );

        // Generate font descriptor
        let units_per_em = self.units_per_em() as i32;
        let ascender = self.ascender();
        let descender = self.descender();

        let font_bbox = vec![
            0.into(),
            descender.into(),
            units_per_em.into(),
            ascender.into(),
        ];

        let font_descriptor = Dictionary::from_iter(vec![
            ("Type", "FontDescriptor".into()),
            ("FontName", font_name.clone()),
            ("Flags", 4.into()), // Symbolic font
            ("FontBBox", font_bbox.into()),
            ("ItalicAngle", 0.into()),
            ("Ascent", ascender.into()),
            ("Descent", descender.into()),
            ("CapHeight", ascender.into()),
            ("StemV", 80.into()),
            ("FontFile2", Object::Reference((0, 0))), // Set when embedding
        ]);

        // Generate widths array
        let widths_array = self.generate_widths_array();

        let cid_system_info = Dictionary::from_iter(vec![
            ("Registry", "Adobe".into()),
            ("Ordering", "Identity".into()),
            ("Supplement", 0.into()),
        ]);

        let cid_font = Dictionary::from_iter(vec![
            ("Type", "Font".into()),
            ("Subtype", "CIDFontType2".into()),
            ("BaseFont", font_name.clone()),
            ("CIDSystemInfo", cid_system_info.into()),
            ("FontDescriptor", Object::Reference((0, 0))), // Set when embedding
            ("W", widths_array.into()),
            ("DW", 1000.into()),
        ]);

        let type0_font = Dictionary::from_iter(vec![
            ("Type", "Font".into()),
            ("Subtype", "Type0".into()),
            ("BaseFont", font_name),
            ("Encoding", "Identity-H".into()),
            ("DescendantFonts", vec![Object::Reference((0, 0))].into()), // Set when embedding
            ("ToUnicode", Object::Reference((0, 0))),                    // Set when embedding
        ]);

        Ok(FontObjects {
            type0_font,
            cid_font,
            font_descriptor,
            font_file_stream,
            tounicode_stream,
        })
    }

    /// Generate /W array for glyph widths
    fn generate_widths_array(&self) -> Vec<Object> {
        let mut widths = Vec::new();
        let face = match &self.face {
            Some(f) => f,
            None => return widths,
        };

        // Collect unique GIDs used in the document
        let mut gids: Vec<u16> = self
            .used_chars
            .iter()
            .filter_map(|&c| self.glyph_id(c))
            .collect();
        gids.sort();
        gids.dedup();

        // Individual mapping format: [gid1 [width1] gid2 [width2] ...]
        for gid in gids {
            let glyph_id = ttf_parser::GlyphId(gid);
            let advance = face.glyph_hor_advance(glyph_id).unwrap_or(1000);
            // Normalize to 1000 units/em as the /W array expects
            let scaled = (advance as f64 * 1000.0 / self.units_per_em() as f64).round() as i64;
            widths.push(gid.into());
            widths.push(vec![scaled.into()].into());
        }

        widths
    }

    /// Generate ToUnicode CMap stream content
    fn generate_tounicode_cmap(&self) -> String {
        let mut cmap = String::new();

        cmap.push_str("/CIDInit /ProcSet findresource begin\n");
        cmap.push_str("12 dict begin\n");
        cmap.push_str("begincmap\n");
        cmap.push_str("/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n");
        cmap.push_str("/CMapName /Adobe-Identity-UCS def\n");
        cmap.push_str("/CMapType 2 def\n");

        cmap.push_str("1 begincodespacerange\n");
        cmap.push_str("<0000> <FFFF>\n");
        cmap.push_str("endcodespacerange\n");

        // Map GID (CID) to Unicode codepoint
        let mut char_list: Vec<char> = self.used_chars.iter().copied().collect();
        char_list.sort_by_key(|c| *c as u32);

        if !char_list.is_empty() {
            // PDF spec recommends limiting bfchar sections to 100 entries
            for chunk in char_list.chunks(100) {
                cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
                for c in chunk {
                    let gid = self.glyph_id(*c).unwrap_or(0);
                    let unicode = *c as u32;
                    cmap.push_str(&format!("<{gid:04X}> <{unicode:04X}>\n"));
                }
                cmap.push_str("endbfchar\n");
            }
        }

        cmap.push_str("endcmap\n");
        cmap.push_str("CMapName currentdict /CMap defineresource pop\n");
        cmap.push_str("end\n");
        cmap.push_str("end\n");

        cmap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_font_data() -> FontData {
        // Direct construction without a parsed face, for API tests that
        // don't need real font files
        FontData {
            name: "test".to_string(),
            ttf_data: vec![0u8; 100],
            used_chars: HashSet::new(),
            face: None,
        }
    }

    #[test]
    fn test_add_chars() {
        let mut font = bare_font_data();

        font.add_chars("Hello");
        assert_eq!(font.used_chars.len(), 4); // H, e, l, o (l appears twice)
        assert!(font.used_chars.contains(&'H'));
        assert!(font.used_chars.contains(&'l'));
    }

    #[test]
    fn test_add_chars_arabic() {
        let mut font = bare_font_data();

        font.add_chars("تحميل");
        assert_eq!(font.used_chars.len(), 5);
        assert!(font.used_chars.contains(&'ت'));
        assert!(font.used_chars.contains(&'ح'));
        assert!(font.used_chars.contains(&'م'));
        assert!(font.used_chars.contains(&'ي'));
        assert!(font.used_chars.contains(&'ل'));
    }

    #[test]
    fn test_defaults_without_face() {
        let font = bare_font_data();
        assert_eq!(font.units_per_em(), 1000);
        assert_eq!(font.ascender(), 800);
        assert_eq!(font.descender(), -200);
        assert_eq!(font.text_width("Hello"), 0);
        assert!(!font.has_glyph('A'));
    }

    #[test]
    fn test_encode_text_hex_no_face() {
        let font = bare_font_data();

        // Without a face, all characters map to GID 0
        assert_eq!(font.encode_text_hex(""), "<>");
        assert_eq!(font.encode_text_hex("A"), "<0000>");
        assert_eq!(font.encode_text_hex("AB"), "<00000000>");
    }

    #[test]
    fn test_to_pdf_objects() {
        let mut font = bare_font_data();
        font.add_chars("Hello");

        let objects = font
            .to_pdf_objects()
            .expect("Failed to generate PDF objects");

        assert!(!objects.type0_font.is_empty());
        assert!(!objects.cid_font.is_empty());
        assert!(!objects.font_descriptor.is_empty());
        assert!(!objects.font_file_stream.content.is_empty());
        assert!(!objects.tounicode_stream.content.is_empty());
    }

    #[test]
    fn test_generate_tounicode_cmap() {
        let mut font = bare_font_data();
        font.add_chars("AB");

        let cmap = font.generate_tounicode_cmap();

        assert!(cmap.contains("/CIDInit"));
        assert!(cmap.contains("begincmap"));
        assert!(cmap.contains("endcmap"));
        // Without a face, all characters map to GID 0
        assert!(cmap.contains("<0000> <0041>")); // A
        assert!(cmap.contains("<0000> <0042>")); // B
    }

    #[test]
    fn test_generate_tounicode_cmap_arabic() {
        let mut font = bare_font_data();
        font.add_chars("أح");

        let cmap = font.generate_tounicode_cmap();

        assert!(cmap.contains("<0000> <0623>")); // أ
        assert!(cmap.contains("<0000> <062D>")); // ح
    }

    #[test]
    fn test_builtin_helvetica_widths() {
        let font = BuiltinFont::helvetica();

        // space = 278/1000 em
        assert_eq!(font.text_width_points(" ", 1000.0), 278.0);
        // 'i' is narrow, 'W' is wide
        assert!(font.text_width_points("i", 12.0) < font.text_width_points("W", 12.0));
    }

    #[test]
    fn test_builtin_bold_wider() {
        let regular = BuiltinFont::helvetica();
        let bold = BuiltinFont::helvetica_bold();

        assert!(
            bold.text_width_points("download", 12.0) > regular.text_width_points("download", 12.0)
        );
    }

    #[test]
    fn test_builtin_encode_literal() {
        let font = BuiltinFont::helvetica();

        assert_eq!(font.encode_literal("Hello"), "(Hello)");
        assert_eq!(font.encode_literal("a(b)c"), "(a\\(b\\)c)");
        assert_eq!(font.encode_literal("a\\b"), "(a\\\\b)");
        // Non-WinAnsi characters degrade to '?'
        assert_eq!(font.encode_literal("حزمة"), "(????)");
    }

    #[test]
    fn test_builtin_has_glyph() {
        let font = BuiltinFont::helvetica();
        assert!(font.has_glyph('A'));
        assert!(font.has_glyph('~'));
        assert!(!font.has_glyph('ح'));
        assert!(!font.has_glyph('\n'));
    }

    #[test]
    fn test_builtin_to_pdf_object() {
        let dict = BuiltinFont::helvetica_bold().to_pdf_object();
        assert_eq!(dict.get(b"Subtype").unwrap().as_name().unwrap(), b"Type1");
        assert_eq!(
            dict.get(b"BaseFont").unwrap().as_name().unwrap(),
            b"Helvetica-Bold"
        );
    }

    #[test]
    fn test_family_variant_name() {
        let family = FontFamily::helvetica();
        assert_eq!(family.variant_name("body", FontWeight::Regular), "body");
        assert_eq!(family.variant_name("body", FontWeight::Bold), "body-bold");

        let single = FontFamily::Builtin {
            regular: BuiltinFont::helvetica(),
            bold: None,
        };
        // Bold falls back to regular when no bold variant exists
        assert_eq!(single.variant_name("body", FontWeight::Bold), "body");
    }

    #[test]
    fn test_family_builder_requires_regular() {
        let result = FontFamilyBuilder::new().build("empty");
        assert!(matches!(result, Err(PdfError::FontParseError(_))));
    }
}
