//! Flowing-layout composition
//!
//! Walks the block sequence down the page with a cursor, starting a new
//! page whenever a block would cross the bottom margin, and writes the
//! finished artifact atomically so a failed run never leaves a truncated
//! file at the output path.

use crate::blocks::{build_note, mm, NoteBlock, StyleKind};
use crate::fonts::{self, NOTE_FAMILY};
use crate::style::{StyleSheet, TextStyle};
use crate::{Assets, DeliveryRequest, Result};
use locale_text::visual_line;
use log::{info, warn};
use pdf_core::{Align, Color, FontWeight, ImageScaleMode, PdfDocument};
use std::path::{Path, PathBuf};

const MARGIN_MM: f64 = 20.0;
const LOGO_BOX_MM: f64 = 40.0;
const QR_BOX_MM: f64 = 60.0;

fn rule_color() -> Color {
    Color::from_rgb(0xe2, 0xe8, 0xf0)
}

/// Compose a note into the request's output path
///
/// Resolves language and styles, assembles the block sequence and
/// renders it. Returns the path of the written artifact.
pub fn compose(request: &DeliveryRequest, assets: &Assets) -> Result<PathBuf> {
    let lang = request.lang();
    let styles = StyleSheet::resolve(lang);
    let blocks = build_note(request, assets, lang);
    render(request, assets, &styles, &blocks)
}

/// Layout cursor: current page and distance from the page top
struct Cursor {
    page: usize,
    y: f64,
}

/// Render blocks into a new document and write it out
fn render(
    request: &DeliveryRequest,
    assets: &Assets,
    styles: &StyleSheet,
    blocks: &[NoteBlock],
) -> Result<PathBuf> {
    let (page_width, page_height) = request.format.page_size();
    let mut doc = PdfDocument::new(page_width, page_height);

    fonts::install(fonts::locate(&fonts::default_candidates()), &mut doc)?;

    let margin = mm(MARGIN_MM);
    let content_width = page_width - 2.0 * margin;
    let bottom = page_height - margin;
    let mut cursor = Cursor {
        page: 1,
        y: margin,
    };

    for block in blocks {
        match block {
            NoteBlock::Logo => {
                let Some(path) = &assets.logo else { continue };
                match std::fs::read(path) {
                    Ok(data) => {
                        let box_size = mm(LOGO_BOX_MM);
                        ensure_room(&mut doc, &mut cursor, box_size, bottom, margin);
                        doc.insert_image(
                            &data,
                            cursor.page,
                            margin,
                            cursor.y,
                            box_size,
                            box_size,
                            ImageScaleMode::FitBox,
                        )?;
                        cursor.y += box_size;
                    }
                    Err(e) => {
                        warn!("Could not load logo {}: {e}", path.display());
                    }
                }
            }

            NoteBlock::Qr => {
                let box_size = mm(QR_BOX_MM);
                ensure_room(&mut doc, &mut cursor, box_size, bottom, margin);
                doc.insert_image(
                    &assets.qr_png,
                    cursor.page,
                    (page_width - box_size) / 2.0,
                    cursor.y,
                    box_size,
                    box_size,
                    ImageScaleMode::Stretch,
                )?;
                cursor.y += box_size;
            }

            NoteBlock::Text {
                text,
                style,
                align,
                bold,
            } => {
                let mut style = pick_style(styles, *style);
                if let Some(align) = align {
                    style.align = *align;
                }
                if *bold {
                    style.weight = FontWeight::Bold;
                }
                draw_text(
                    &mut doc,
                    &mut cursor,
                    text,
                    &style,
                    page_width,
                    content_width,
                    bottom,
                    margin,
                )?;
            }

            NoteBlock::LinkText { text, url } => {
                let style = styles.link;
                apply_style(&mut doc, &style)?;

                let visible = visual_line(text);
                ensure_room(&mut doc, &mut cursor, style.leading, bottom, margin);

                let width = doc.get_text_width(&visible)?;
                let baseline = cursor.y + style.size as f64;
                let center = page_width / 2.0;
                doc.insert_text(&visible, cursor.page, center, baseline, Align::Center)?;
                doc.add_link(
                    cursor.page,
                    center - width / 2.0,
                    cursor.y,
                    width,
                    style.leading,
                    url,
                )?;
                cursor.y += style.leading;
            }

            NoteBlock::Rule => {
                ensure_room(&mut doc, &mut cursor, 8.0, bottom, margin);
                doc.draw_rule(
                    cursor.page,
                    margin,
                    cursor.y,
                    content_width,
                    1.0,
                    rule_color(),
                )?;
                cursor.y += 4.0;
            }

            NoteBlock::Spacer { points } => {
                cursor.y += points;
            }
        }
    }

    let bytes = doc.to_bytes()?;
    write_atomic(&request.output_path, &bytes)?;
    info!("PDF generated: {}", request.output_path.display());

    Ok(request.output_path.clone())
}

fn pick_style(styles: &StyleSheet, kind: StyleKind) -> TextStyle {
    match kind {
        StyleKind::Title => styles.title,
        StyleKind::Subtitle => styles.subtitle,
        StyleKind::Body => styles.body,
        StyleKind::Link => styles.link,
    }
}

fn apply_style(doc: &mut PdfDocument, style: &TextStyle) -> Result<()> {
    doc.set_font(NOTE_FAMILY, style.size)?;
    doc.set_font_weight(style.weight)?;
    doc.set_text_color(style.color);
    Ok(())
}

/// Start a new page when the next block would cross the bottom margin
fn ensure_room(doc: &mut PdfDocument, cursor: &mut Cursor, needed: f64, bottom: f64, top: f64) {
    if cursor.y + needed > bottom {
        cursor.page = doc.add_page();
        cursor.y = top;
    }
}

/// Draw a possibly-wrapped text block and advance the cursor
#[allow(clippy::too_many_arguments)]
fn draw_text(
    doc: &mut PdfDocument,
    cursor: &mut Cursor,
    text: &str,
    style: &TextStyle,
    page_width: f64,
    content_width: f64,
    bottom: f64,
    margin: f64,
) -> Result<()> {
    apply_style(doc, style)?;

    let lines = pdf_core::wrap_to_width(text, content_width, |s| {
        doc.get_text_width(s).unwrap_or(0.0)
    });

    let anchor_x = match style.align {
        Align::Left => margin,
        Align::Center => page_width / 2.0,
        Align::Right => page_width - margin,
    };

    for line in &lines {
        ensure_room(doc, cursor, style.leading, bottom, margin);
        let baseline = cursor.y + style.size as f64;
        doc.insert_text(&visual_line(line), cursor.page, anchor_x, baseline, style.align)?;
        cursor.y += style.leading;
    }

    Ok(())
}

/// Write bytes to the destination without exposing a partial artifact
///
/// The temp file lives in the destination directory so the final rename
/// stays on one filesystem.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "delivery_note.pdf".to_string());
    let tmp = path.with_file_name(format!(".{file_name}.tmp-{}", std::process::id()));

    std::fs::write(&tmp, bytes)?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        std::fs::remove_file(&tmp).ok();
        return Err(e.into());
    }

    Ok(())
}
