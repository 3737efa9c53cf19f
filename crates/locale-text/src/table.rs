//! Static display-string table
//!
//! Strings are pre-formatted for direct placement in a text block; there
//! is no interpolation. An unknown key echoes back unchanged so rendering
//! never fails on a missing entry.

use crate::Lang;

/// Look up a display string for a language
///
/// # Arguments
/// * `lang` - Resolved language
/// * `key` - Table key (e.g. "store_name", "instruction_1")
pub fn lookup<'a>(lang: Lang, key: &'a str) -> &'a str {
    let entry = match lang {
        Lang::Arabic => arabic(key),
        Lang::English => english(key),
    };
    entry.unwrap_or(key)
}

fn arabic(key: &str) -> Option<&'static str> {
    Some(match key {
        "store_name" => "متجر لفل اب",
        "download_here" => "اضغط هنا للتحميل",
        "instructions_title" => "تعليمات التحميل:",
        "instruction_1" => "1. اضغط على الرابط أعلاه أو امسح رمز QR",
        "instruction_2" => "2. قم بتحميل الملف على جهازك",
        "instruction_3" => "3. فك الضغط إذا كان الملف مضغوطاً",
        "instruction_4" => "4. للدعم التقني تواصل معنا عبر الإيميل",
        "support" => "للدعم:",
        "buyer" => "المشتري:",
        "generated" => "تاريخ الإنشاء:",
        "valid_for" => "صالح لمدة:",
        "days" => "أيام",
        "unlimited" => "غير محدود",
        "scan_qr" => "امسح رمز QR للتحميل المباشر",
        _ => return None,
    })
}

fn english(key: &str) -> Option<&'static str> {
    Some(match key {
        "store_name" => "Level Up Store",
        "download_here" => "Download Here",
        "instructions_title" => "Download Instructions:",
        "instruction_1" => "1. Click the link above or scan the QR code",
        "instruction_2" => "2. Download the file to your device",
        "instruction_3" => "3. Extract if the file is compressed",
        "instruction_4" => "4. Contact support via email for technical help",
        "support" => "Support:",
        "buyer" => "Buyer:",
        "generated" => "Generated:",
        "valid_for" => "Valid for:",
        "days" => "days",
        "unlimited" => "unlimited",
        "scan_qr" => "Scan QR code for direct download",
        _ => return None,
    })
}
