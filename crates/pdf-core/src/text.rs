//! Text and drawing operator generation

use crate::document::Color;
use crate::Align;

/// Context for rendering text
pub struct TextRenderContext {
    /// PDF font resource name (e.g., "F1")
    pub font_name: String,
    /// Font size in points
    pub font_size: f32,
    /// Text width in points (for alignment)
    pub text_width: f64,
    /// Text color (RGB)
    pub color: Color,
}

/// Generate PDF operators for text insertion
///
/// Creates the proper PDF text operators (BT, Tf, Td, Tj, ET) to render
/// text at a specific position with alignment support.
///
/// # Arguments
/// * `encoded` - Encoded text operand: a hex string (`<0041...>`) for
///   embedded fonts or an escaped literal (`(Hello)`) for builtin fonts
/// * `x` - X coordinate in points (PDF coordinates, from left)
/// * `y` - Y coordinate in points (PDF coordinates, from bottom)
/// * `align` - Text alignment
/// * `ctx` - Text rendering context
pub fn generate_text_operators(
    encoded: &str,
    x: f64,
    y: f64,
    align: Align,
    ctx: &TextRenderContext,
) -> Vec<u8> {
    let x_offset = match align {
        Align::Left => 0.0,
        Align::Center => -ctx.text_width / 2.0,
        Align::Right => -ctx.text_width,
    };

    let final_x = x + x_offset;

    let mut ops = String::new();
    ops.push_str("BT\n");
    ops.push_str(&format!(
        "{} {} {} rg\n",
        ctx.color.r, ctx.color.g, ctx.color.b
    ));
    ops.push_str(&format!("/{} {} Tf\n", ctx.font_name, ctx.font_size));
    ops.push_str(&format!("{final_x} {y} Td\n"));
    ops.push_str(&format!("{encoded} Tj\n"));
    ops.push_str("ET\n");

    ops.into_bytes()
}

/// Generate PDF operators for a horizontal rule
///
/// # Arguments
/// * `x` - Start X coordinate in points
/// * `y` - Y coordinate in points (PDF coordinates, from bottom)
/// * `width` - Rule length in points
/// * `thickness` - Stroke width in points
/// * `color` - Stroke color
pub fn generate_rule_operators(
    x: f64,
    y: f64,
    width: f64,
    thickness: f64,
    color: Color,
) -> Vec<u8> {
    let x2 = x + width;
    format!(
        "q\n{} {} {} RG\n{thickness} w\n{x} {y} m\n{x2} {y} l\nS\nQ\n",
        color.r, color.g, color.b
    )
    .into_bytes()
}

/// Split text into lines that fit a maximum width in points
///
/// Splits on spaces only; a single word wider than the limit gets its own
/// line rather than being broken mid-word. The measure function maps a
/// candidate line to its width in points for the active font and size.
///
/// # Arguments
/// * `text` - Text to split
/// * `max_width` - Maximum line width in points (0 disables wrapping)
/// * `measure` - Width of a string in points
pub fn wrap_to_width<F>(text: &str, max_width: f64, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f64,
{
    if max_width <= 0.0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if current_line.is_empty() {
            current_line = word.to_string();
            continue;
        }

        let candidate = format!("{current_line} {word}");
        if measure(&candidate) <= max_width {
            current_line = candidate;
        } else {
            lines.push(current_line);
            current_line = word.to_string();
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}
