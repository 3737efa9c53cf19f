//! Paragraph styles for the note
//!
//! Body text follows the reading direction of the resolved language;
//! title, subtitle and link stay centered regardless.

use locale_text::{Direction, Lang};
use pdf_core::{Align, Color, FontWeight};

/// A single paragraph style descriptor
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    /// Font size in points
    pub size: f32,
    /// Font weight
    pub weight: FontWeight,
    /// Text alignment
    pub align: Align,
    /// Text color
    pub color: Color,
    /// Line spacing in points
    pub leading: f64,
}

/// The note's named styles
#[derive(Debug, Clone, Copy)]
pub struct StyleSheet {
    pub title: TextStyle,
    pub subtitle: TextStyle,
    pub body: TextStyle,
    pub link: TextStyle,
}

impl StyleSheet {
    /// Resolve the style set for a language
    pub fn resolve(lang: Lang) -> Self {
        let body_align = match lang.direction() {
            Direction::Rtl => Align::Right,
            Direction::Ltr => Align::Left,
        };

        Self {
            title: TextStyle {
                size: 24.0,
                weight: FontWeight::Bold,
                align: Align::Center,
                color: Color::from_rgb(0x1a, 0x36, 0x5d),
                leading: 30.0,
            },
            subtitle: TextStyle {
                size: 16.0,
                weight: FontWeight::Regular,
                align: Align::Center,
                color: Color::from_rgb(0x4a, 0x55, 0x68),
                leading: 20.0,
            },
            body: TextStyle {
                size: 12.0,
                weight: FontWeight::Regular,
                align: body_align,
                color: Color::black(),
                leading: 16.0,
            },
            link: TextStyle {
                size: 14.0,
                weight: FontWeight::Bold,
                align: Align::Center,
                color: Color::from_rgb(0x31, 0x82, 0xce),
                leading: 18.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_alignment_follows_direction() {
        let arabic = StyleSheet::resolve(Lang::Arabic);
        assert_eq!(arabic.body.align, Align::Right);

        let english = StyleSheet::resolve(Lang::English);
        assert_eq!(english.body.align, Align::Left);
    }

    #[test]
    fn test_centered_styles_ignore_direction() {
        for lang in [Lang::Arabic, Lang::English] {
            let styles = StyleSheet::resolve(lang);
            assert_eq!(styles.title.align, Align::Center);
            assert_eq!(styles.subtitle.align, Align::Center);
            assert_eq!(styles.link.align, Align::Center);
        }
    }

    #[test]
    fn test_title_is_bold_and_largest() {
        let styles = StyleSheet::resolve(Lang::English);
        assert_eq!(styles.title.weight, FontWeight::Bold);
        assert!(styles.title.size > styles.subtitle.size);
        assert!(styles.subtitle.size > styles.body.size);
    }
}
