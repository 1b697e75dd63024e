//! Page composition: single days and full weeks.

use log::{debug, warn};

use crate::canvas::Canvas;
use crate::layout::{Band, Column};
use crate::lesson::{draw_lesson, BlockStyle, CaptionAlign};
use crate::schedule::{Day, Timetable};
use crate::text::{TextStyle, Typography};
use crate::theme::Theme;

// ============================================================================
// Constants
// ============================================================================

/// Top of the title in single-day pages.
const DAY_TITLE_Y: f32 = 16.0;
/// Gap between the single-day title and its first lesson.
const DAY_TITLE_GAP: f32 = 32.0;
/// Top of the "N неделя" banner.
const WEEK_BANNER_Y: f32 = 32.0;
/// Distance from the banner top to the first band.
const WEEK_BANNER_HEIGHT: f32 = 96.0;
/// Space reserved for a day title inside a week column.
const COLUMN_TITLE_HEIGHT: f32 = 32.0;

// ============================================================================
// Layout modes
// ============================================================================

/// Named layout parameters of a render mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
    pub block: BlockStyle,
    /// Column-width divisor of every band.
    pub columns: usize,
    /// Days per band, top to bottom.
    pub bands: Vec<usize>,
    /// Space between the bottom of one band and the next.
    pub band_gap: f32,
}

impl Geometry {
    /// Single-day page. Only `width`, `height` and `block` apply: a day is
    /// one column with no bands.
    pub fn day() -> Self {
        Geometry {
            width: 512,
            height: 600,
            block: BlockStyle {
                wrap_width: 22,
                row_padding: 36.0,
                caption_align: CaptionAlign::Right,
            },
            columns: 1,
            bands: vec![1],
            band_gap: 32.0,
        }
    }

    /// Earlier week layout: smaller canvas, centered captions.
    pub fn week_compact() -> Self {
        Geometry {
            width: 1024,
            height: 900,
            block: BlockStyle {
                wrap_width: 22,
                row_padding: 32.0,
                caption_align: CaptionAlign::Center,
            },
            columns: 3,
            bands: vec![3, 4],
            band_gap: 32.0,
        }
    }

    /// Current week layout: wider canvas, right-aligned captions.
    pub fn week_wide() -> Self {
        Geometry {
            width: 1388,
            height: 1024,
            block: BlockStyle {
                wrap_width: 30,
                row_padding: 36.0,
                caption_align: CaptionAlign::Right,
            },
            columns: 3,
            bands: vec![3, 4],
            band_gap: 32.0,
        }
    }

    pub fn column_width(&self) -> f32 {
        self.width as f32 / self.columns.max(1) as f32
    }
}

// ============================================================================
// Composer
// ============================================================================

/// Renders pages from schedule data. Holds only immutable configuration, so
/// one composer can serve any number of concurrent renders.
#[derive(Clone)]
pub struct Composer {
    typography: Typography,
}

impl Composer {
    pub fn new(typography: Typography) -> Self {
        Composer { typography }
    }

    pub fn typography(&self) -> &Typography {
        &self.typography
    }

    /// One day as a single full-width column under a title.
    pub fn day(&self, day: &Day, theme: &Theme, geometry: &Geometry) -> Canvas {
        let mut canvas = Canvas::new(geometry.width, geometry.height, theme.background);
        self.draw_day(&mut canvas, day, theme, geometry);
        canvas
    }

    /// Draws the single-day layout and returns how far down its lessons
    /// reached. With no lessons that is where the first lesson would start.
    pub fn draw_day(
        &self,
        canvas: &mut Canvas,
        day: &Day,
        theme: &Theme,
        geometry: &Geometry,
    ) -> f32 {
        let title = self.typography.multiline_size(&day.title, TextStyle::Title);
        self.typography.draw_text(
            canvas,
            geometry.width as f32 / 2.0 - title.width / 2.0,
            DAY_TITLE_Y,
            &day.title,
            TextStyle::Title,
            theme.foreground,
        );

        let mut band = Band::new(DAY_TITLE_Y + title.height + DAY_TITLE_GAP);
        let mut column = band.column(0.0, geometry.width as f32);
        for lesson in &day.lessons {
            draw_lesson(canvas, &self.typography, theme, &geometry.block, &mut column, lesson);
            band.extend(&column);
        }
        band.max_y()
    }

    /// Full week: banner, then the days split across the geometry's bands.
    pub fn week(&self, timetable: &Timetable, theme: &Theme, geometry: &Geometry) -> Canvas {
        timetable.check_week();
        let mut canvas = Canvas::new(geometry.width, geometry.height, theme.background);

        let banner = format!("{} неделя", timetable.week_number);
        let length = self.typography.text_length(&banner, TextStyle::Title);
        self.typography.draw_text(
            &mut canvas,
            geometry.width as f32 / 2.0 - length / 2.0,
            WEEK_BANNER_Y,
            &banner,
            TextStyle::Title,
            theme.foreground,
        );

        let mut y = WEEK_BANNER_Y + WEEK_BANNER_HEIGHT;
        let mut remaining = timetable.days.as_slice();
        for (i, &size) in geometry.bands.iter().enumerate() {
            if remaining.is_empty() {
                break;
            }
            let (days, rest) = remaining.split_at(size.min(remaining.len()));
            remaining = rest;

            let max_y = self.draw_band(&mut canvas, days, theme, geometry, y);
            debug!("band {} of {} days ends at y={:.1}", i, days.len(), max_y);
            y = max_y + geometry.band_gap;
        }
        if !remaining.is_empty() {
            warn!("{} days left over after the last band are not drawn", remaining.len());
        }
        canvas
    }

    /// Draws `days` side by side starting at `origin_y` and returns the
    /// deepest y any lesson reached. A band of lesson-free days returns
    /// `origin_y`.
    pub fn draw_band(
        &self,
        canvas: &mut Canvas,
        days: &[Day],
        theme: &Theme,
        geometry: &Geometry,
        origin_y: f32,
    ) -> f32 {
        if days.len() > geometry.columns {
            // Kept as configured: extra days continue to the right of the
            // last column and may fall off the canvas.
            warn!(
                "band holds {} days but columns are sized for {}",
                days.len(),
                geometry.columns
            );
        }

        let mut band = Band::new(origin_y);
        for (index, day) in days.iter().enumerate() {
            let mut column = band.equal_column(geometry.width as f32, geometry.columns, index);
            self.draw_column_title(canvas, &column, &day.title, theme);
            column.advance_by(COLUMN_TITLE_HEIGHT);

            for lesson in &day.lessons {
                draw_lesson(canvas, &self.typography, theme, &geometry.block, &mut column, lesson);
                band.extend(&column);
            }
        }
        band.max_y()
    }

    fn draw_column_title(&self, canvas: &mut Canvas, column: &Column, title: &str, theme: &Theme) {
        let length = self.typography.text_length(title, TextStyle::Body);
        self.typography.draw_text(
            canvas,
            column.center() - length / 2.0,
            column.y,
            title,
            TextStyle::Body,
            theme.foreground,
        );
    }
}
