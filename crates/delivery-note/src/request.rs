//! Delivery request model and configuration loading

use crate::{NoteError, Result};
use locale_text::Lang;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

/// Page format for the generated note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PageFormat {
    #[default]
    A4,
    Ebook,
}

impl PageFormat {
    /// Parse a format string, defaulting unknown values to A4
    ///
    /// Unknown values are cosmetic config mistakes, so they degrade with
    /// a warning instead of rejecting the whole request.
    pub fn parse_lossy(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "A4" => PageFormat::A4,
            "EBOOK" => PageFormat::Ebook,
            other => {
                log::warn!("Unknown page format '{other}', defaulting to A4");
                PageFormat::A4
            }
        }
    }

    /// Page size in points (width, height)
    pub fn page_size(&self) -> (f64, f64) {
        match self {
            // 595.28 x 841.89 pt
            PageFormat::A4 => (595.28, 841.89),
            // 6 x 9 inch, common for ebooks
            PageFormat::Ebook => (432.0, 648.0),
        }
    }
}

impl<'de> Deserialize<'de> for PageFormat {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(PageFormat::parse_lossy(&s))
    }
}

/// A single delivery note request
///
/// Constructed once from CLI flags, a JSON config file or the sample
/// data, and immutable for the remainder of the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryRequest {
    /// Product title (Arabic or English)
    pub product_title: String,

    /// Optional product subtitle
    #[serde(default)]
    pub product_subtitle: Option<String>,

    /// Download link; must be an absolute URL with scheme and host
    pub download_link: String,

    /// Optional logo file path (PNG/JPEG)
    #[serde(default)]
    pub logo_path: Option<PathBuf>,

    /// Output artifact path
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Vendor support email shown in the footer
    #[serde(default = "default_vendor_email")]
    pub vendor_email: String,

    /// Optional buyer name
    #[serde(default)]
    pub buyer_name: Option<String>,

    /// Link expiry in days; 0 means unlimited
    #[serde(default)]
    pub expiry_days: u32,

    /// Route the link through the shortener seam
    #[serde(default)]
    pub use_shortener: bool,

    /// Locale string; Arabic iff it starts with "ar"
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Page format
    #[serde(default)]
    pub format: PageFormat,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("delivery_note.pdf")
}

fn default_vendor_email() -> String {
    "leve1up999q@gmail.com".to_string()
}

fn default_locale() -> String {
    "ar".to_string()
}

impl DeliveryRequest {
    /// Load a request from a JSON configuration file
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                NoteError::ConfigNotFound(path.display().to_string())
            } else {
                NoteError::IoError(e)
            }
        })?;

        serde_json::from_str(&data).map_err(|e| NoteError::ConfigParse(e.to_string()))
    }

    /// Fixed sample request used by the demonstration mode
    pub fn sample() -> Self {
        Self {
            product_title: "باقة المونتاج الاحترافية".to_string(),
            product_subtitle: Some("مجموعة شاملة من القوالب والمؤثرات الاحترافية".to_string()),
            download_link: "https://drive.google.com/file/d/1234567890abcdef/view".to_string(),
            logo_path: None,
            output_path: PathBuf::from("professional_editing_package_delivery.pdf"),
            vendor_email: default_vendor_email(),
            buyer_name: Some("أحمد محمد".to_string()),
            expiry_days: 7,
            use_shortener: false,
            locale: "ar".to_string(),
            format: PageFormat::A4,
        }
    }

    /// Resolved display language
    pub fn lang(&self) -> Lang {
        Lang::from_locale(&self.locale)
    }
}
