//! Text metrics and drawing.
//!
//! [`Typography`] owns the font handle and the fixed set of logical sizes a
//! render uses. Everything that positions text measures it through here
//! first, then draws it onto a [`Canvas`].

use std::path::Path;

use ab_glyph::{point, Font, FontArc, PxScale, ScaleFont};
use image::Rgba;

use crate::canvas::Canvas;
use crate::error::{RenderError, Result};

/// Bundled Cyrillic-capable face used when no font path is configured.
static EMBEDDED_FONT: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

/// Extra pixels between lines of a multi-line block.
pub const LINE_SPACING: f32 = 4.0;

/// Pixel-per-em sizes of the logical text styles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSizes {
    /// Titles and slot numbers.
    pub xl: f32,
    /// Body text and day titles.
    pub lg: f32,
    /// Captions.
    pub sm: f32,
    /// Demotivator headline.
    pub xxxl: f32,
    /// Demotivator subtitle.
    pub xxl: f32,
}

impl Default for FontSizes {
    fn default() -> Self {
        FontSizes {
            xl: 32.0,
            lg: 22.0,
            sm: 16.0,
            xxxl: 64.0,
            xxl: 42.0,
        }
    }
}

/// Logical text style; each maps to one entry of [`FontSizes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Title,
    /// Three quarters of the title size, used for times and lesson titles.
    Mini,
    Body,
    Small,
    DmTitle,
    Dm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Width and height of a measured text block, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextSize {
    pub width: f32,
    pub height: f32,
}

/// Immutable renderer configuration: one font face plus its sizes.
#[derive(Clone)]
pub struct Typography {
    font: FontArc,
    sizes: FontSizes,
}

impl Typography {
    pub fn new(font: FontArc, sizes: FontSizes) -> Self {
        Typography { font, sizes }
    }

    /// Bundled DejaVu Sans at the default sizes.
    pub fn embedded() -> Result<Self> {
        let font = FontArc::try_from_slice(EMBEDDED_FONT)
            .map_err(|e| RenderError::FontError(format!("embedded font: {}", e)))?;
        Ok(Typography::new(font, FontSizes::default()))
    }

    pub fn from_file(path: &Path, sizes: FontSizes) -> Result<Self> {
        let data = std::fs::read(path)
            .map_err(|e| RenderError::FontError(format!("{}: {}", path.display(), e)))?;
        let font = FontArc::try_from_vec(data)
            .map_err(|e| RenderError::FontError(format!("{}: {}", path.display(), e)))?;
        Ok(Typography::new(font, sizes))
    }

    /// Pixels per em for a style.
    pub fn px(&self, style: TextStyle) -> f32 {
        match style {
            TextStyle::Title => self.sizes.xl,
            TextStyle::Mini => (self.sizes.xl * 0.75).floor(),
            TextStyle::Body => self.sizes.lg,
            TextStyle::Small => self.sizes.sm,
            TextStyle::DmTitle => self.sizes.xxxl,
            TextStyle::Dm => self.sizes.xxl,
        }
    }

    // ab_glyph scales relative to ascent - descent, sizes here are per em.
    fn scale(&self, style: TextStyle) -> PxScale {
        let px = self.px(style);
        match self.font.units_per_em() {
            Some(units) if units > 0.0 => PxScale::from(px * self.font.height_unscaled() / units),
            _ => PxScale::from(px),
        }
    }

    /// Height of one line box.
    pub fn line_height(&self, style: TextStyle) -> f32 {
        self.font.as_scaled(self.scale(style)).height()
    }

    /// Vertical step between consecutive lines of a block.
    pub fn line_advance(&self, style: TextStyle) -> f32 {
        self.line_height(style) + LINE_SPACING
    }

    /// Advance width of a single line.
    pub fn text_length(&self, text: &str, style: TextStyle) -> f32 {
        let font = self.font.as_scaled(self.scale(style));
        let mut width = 0.0;
        let mut previous = None;
        for c in text.chars() {
            let id = font.glyph_id(c);
            if let Some(prev) = previous {
                width += font.kern(prev, id);
            }
            width += font.h_advance(id);
            previous = Some(id);
        }
        width
    }

    /// Bounding box of a `\n`-separated block. Empty text measures 0x0.
    pub fn multiline_size(&self, text: &str, style: TextStyle) -> TextSize {
        if text.is_empty() {
            return TextSize::default();
        }
        let lines: Vec<&str> = text.split('\n').collect();
        let width = lines
            .iter()
            .map(|line| self.text_length(line, style))
            .fold(0.0, f32::max);
        let height = (lines.len() - 1) as f32 * self.line_advance(style) + self.line_height(style);
        TextSize { width, height }
    }

    /// Draws one line with its top-left corner at `(x, y)`.
    pub fn draw_text(
        &self,
        canvas: &mut Canvas,
        x: f32,
        y: f32,
        text: &str,
        style: TextStyle,
        color: Rgba<u8>,
    ) {
        let font = self.font.as_scaled(self.scale(style));
        let baseline = y + font.ascent();
        let mut caret = x;
        let mut previous = None;

        for c in text.chars() {
            let mut glyph = font.scaled_glyph(c);
            if let Some(prev) = previous {
                caret += font.kern(prev, glyph.id);
            }
            glyph.position = point(caret, baseline);
            caret += font.h_advance(glyph.id);
            previous = Some(glyph.id);

            if let Some(outlined) = font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                let (left, top) = (bounds.min.x as i32, bounds.min.y as i32);
                outlined.draw(|gx, gy, coverage| {
                    canvas.blend_pixel(left + gx as i32, top + gy as i32, color, coverage);
                });
            }
        }
    }

    /// Draws a `\n`-separated block; lines are aligned within the block's
    /// own width.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_multiline(
        &self,
        canvas: &mut Canvas,
        x: f32,
        y: f32,
        text: &str,
        style: TextStyle,
        color: Rgba<u8>,
        align: Align,
    ) {
        let block = self.multiline_size(text, style);
        let advance = self.line_advance(style);

        for (i, line) in text.split('\n').enumerate() {
            let line_x = match align {
                Align::Left => x,
                Align::Center => x + (block.width - self.text_length(line, style)) / 2.0,
                Align::Right => x + block.width - self.text_length(line, style),
            };
            self.draw_text(canvas, line_x, y + i as f32 * advance, line, style, color);
        }
    }
}

// ============================================================================
// Word wrap
// ============================================================================

/// Greedy whitespace wrap to at most `width` characters per line.
///
/// Words are never split: a word longer than `width` sits alone on its own
/// line. Runs of whitespace collapse to a single space.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len == 0 {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }
    if current_len > 0 {
        lines.push(current);
    }
    lines
}

/// [`wrap`] joined with line breaks, ready for multi-line measuring.
pub fn wrap_block(text: &str, width: usize) -> String {
    wrap(text, width).join("\n")
}
