//! Layout of a single lesson block.
//!
//! A block is a horizontal rule, the slot number, a two-line time range,
//! the wrapped lesson title and a "teacher, classroom" caption. Everything
//! is measured up front by [`LessonMetrics::measure`]; [`draw_lesson`] only
//! places what was measured.

use crate::canvas::Canvas;
use crate::layout::Column;
use crate::schedule::Lesson;
use crate::text::{wrap_block, Align, TextSize, TextStyle, Typography};
use crate::theme::Theme;

/// Rule inset from both column edges.
pub const RULE_INSET: f32 = 8.0;
/// Gap between the rule and the block content.
pub const RULE_GAP: f32 = 4.0;
/// Slot number offset from the column's left edge and from the block top.
pub const SLOT_INSET: f32 = 4.0;
pub const SLOT_DROP: f32 = 8.0;
/// Gap between the slot number and the time range.
pub const TIME_GAP: f32 = 16.0;
/// Caption inset from the column's right edge when right-aligned.
pub const CAPTION_INSET: f32 = 8.0;
/// Height used for a title that measures zero, so the caption never lands
/// on the next block's rule.
pub const EMPTY_TITLE_HEIGHT: f32 = 32.0;

/// Where the "teacher, classroom" caption sits under the title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionAlign {
    Right,
    Center,
}

/// Per-mode knobs of a lesson block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockStyle {
    /// Maximum characters per title line.
    pub wrap_width: usize,
    /// Space below the taller of the time and title blocks.
    pub row_padding: f32,
    pub caption_align: CaptionAlign,
}

/// Everything about a lesson block that depends on text measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonMetrics {
    pub slot_width: f32,
    pub time_range: String,
    pub time_block: TextSize,
    /// Title wrapped to the block's character budget.
    pub title: String,
    /// Title block size; height already carries the empty-title fallback.
    pub title_block: TextSize,
    pub caption: String,
    pub caption_width: f32,
}

impl LessonMetrics {
    pub fn measure(typography: &Typography, style: &BlockStyle, lesson: &Lesson) -> Self {
        let slot_width = typography.text_length(&lesson.time.slot, TextStyle::Title);
        let time_range = lesson.time.range();
        let time_block = typography.multiline_size(&time_range, TextStyle::Mini);

        let title = wrap_block(&lesson.title, style.wrap_width);
        let mut title_block = typography.multiline_size(&title, TextStyle::Mini);
        if title_block.height == 0.0 {
            title_block.height = EMPTY_TITLE_HEIGHT;
        }

        let caption = caption(lesson);
        let caption_width = typography.text_length(&caption, TextStyle::Small);

        LessonMetrics {
            slot_width,
            time_range,
            time_block,
            title,
            title_block,
            caption,
            caption_width,
        }
    }

    /// Vertical space the block consumes, rule included.
    pub fn height(&self, style: &BlockStyle) -> f32 {
        RULE_GAP + self.time_block.height.max(self.title_block.height) + style.row_padding
    }
}

/// Joins the non-empty parts of teacher and classroom.
pub fn caption(lesson: &Lesson) -> String {
    [lesson.teacher.trim(), lesson.classroom.trim()]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
}

/// Where a drawn block ended up.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonExtent {
    /// y of the rule.
    pub top: f32,
    /// First y below the block; the column cursor now sits here.
    pub bottom: f32,
    pub metrics: LessonMetrics,
}

/// Draws `lesson` at the column cursor and advances the cursor past it.
pub fn draw_lesson(
    canvas: &mut Canvas,
    typography: &Typography,
    theme: &Theme,
    style: &BlockStyle,
    column: &mut Column,
    lesson: &Lesson,
) -> LessonExtent {
    let metrics = LessonMetrics::measure(typography, style, lesson);
    let offset = column.x;
    let width = column.width;
    let top = column.y;

    canvas.hline(offset + RULE_INSET, offset + width - RULE_INSET, top, theme.foreground);
    let y = top + RULE_GAP;

    typography.draw_text(
        canvas,
        offset + SLOT_INSET,
        y + SLOT_DROP,
        &lesson.time.slot,
        TextStyle::Title,
        theme.time_color,
    );

    let mut x = offset + metrics.slot_width + TIME_GAP;
    typography.draw_multiline(
        canvas,
        x,
        y,
        &metrics.time_range,
        TextStyle::Mini,
        theme.time_color,
        Align::Left,
    );
    x += metrics.time_block.width;

    // Title is centered in what is left of the column right of the times.
    let title_x = x + (width - (x - offset)) / 2.0 - metrics.title_block.width / 2.0;
    typography.draw_multiline(
        canvas,
        title_x,
        y,
        &metrics.title,
        TextStyle::Mini,
        theme.foreground,
        Align::Center,
    );

    let caption_x = match style.caption_align {
        CaptionAlign::Right => column.right() - metrics.caption_width - CAPTION_INSET,
        CaptionAlign::Center => column.center() - metrics.caption_width / 2.0,
    };
    typography.draw_text(
        canvas,
        caption_x,
        y + metrics.title_block.height,
        &metrics.caption,
        TextStyle::Small,
        theme.teacher_color,
    );

    column.advance_by(metrics.height(style));
    LessonExtent {
        top,
        bottom: column.y,
        metrics,
    }
}
