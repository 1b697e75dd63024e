//! Grade sheet: one row per subject, fixed-width columns for the subject,
//! its grades, the final grade and the absence count.

use log::debug;
use serde::Deserialize;

use crate::canvas::Canvas;
use crate::layout::{Band, Column};
use crate::page::Composer;
use crate::text::{wrap_block, Align, TextStyle, Typography};
use crate::theme::Theme;

pub const GRADES_WIDTH: u32 = 1400;
const MARGIN: f32 = 32.0;
const BANNER_GAP: f32 = 24.0;
const CELL_PADDING: f32 = 8.0;
const SUBJECT_WIDTH: f32 = 440.0;
const FINAL_WIDTH: f32 = 120.0;
const ABSENCES_WIDTH: f32 = 140.0;
const GRADE_CELL: f32 = 44.0;
const SUBJECT_WRAP: usize = 30;
const HEADERS: [&str; 4] = ["Предмет", "Оценки", "Итог", "Пропуски"];

/// One subject's record from the grades portal.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SubjectGrades {
    pub title: String,
    #[serde(default)]
    pub grades: Vec<u8>,
    #[serde(default)]
    pub final_grade: Option<u8>,
    #[serde(default)]
    pub absences: u32,
}

fn column_widths() -> [f32; 4] {
    let grades = GRADES_WIDTH as f32 - 2.0 * MARGIN - SUBJECT_WIDTH - FINAL_WIDTH - ABSENCES_WIDTH;
    [SUBJECT_WIDTH, grades, FINAL_WIDTH, ABSENCES_WIDTH]
}

fn cells_per_line() -> usize {
    ((column_widths()[1] / GRADE_CELL) as usize).max(1)
}

/// Measured content of one subject row.
#[derive(Debug, Clone, PartialEq)]
struct RowMetrics {
    subject: String,
    grade_lines: Vec<Vec<u8>>,
    height: f32,
}

fn measure_row(typography: &Typography, subject: &SubjectGrades) -> RowMetrics {
    let line_height = typography.line_height(TextStyle::Body);
    let title = wrap_block(&subject.title, SUBJECT_WRAP);
    let title_height = typography.multiline_size(&title, TextStyle::Body).height;

    let grade_lines: Vec<Vec<u8>> = subject
        .grades
        .chunks(cells_per_line())
        .map(|chunk| chunk.to_vec())
        .collect();
    let grades_height = match grade_lines.len() {
        0 => 0.0,
        n => (n - 1) as f32 * typography.line_advance(TextStyle::Body) + line_height,
    };

    RowMetrics {
        subject: title,
        grade_lines,
        height: title_height.max(grades_height).max(line_height) + 2.0 * CELL_PADDING,
    }
}

impl Composer {
    /// Grade sheet whose height grows with the number and size of rows.
    pub fn grades(&self, title: &str, subjects: &[SubjectGrades], theme: &Theme) -> Canvas {
        let typography = self.typography();
        let banner = typography.multiline_size(title, TextStyle::Title);
        let header_height = typography.line_height(TextStyle::Body) + 2.0 * CELL_PADDING;
        let rows: Vec<RowMetrics> = subjects.iter().map(|s| measure_row(typography, s)).collect();

        let table_top = MARGIN + banner.height + BANNER_GAP;
        let table_height: f32 = header_height + rows.iter().map(|r| r.height).sum::<f32>();
        let height = (table_top + table_height + MARGIN).ceil() as u32;
        debug!("grade sheet with {} rows is {}px tall", rows.len(), height);

        let mut canvas = Canvas::new(GRADES_WIDTH, height, theme.background);
        typography.draw_text(
            &mut canvas,
            GRADES_WIDTH as f32 / 2.0 - banner.width / 2.0,
            MARGIN,
            title,
            TextStyle::Title,
            theme.foreground,
        );

        let mut y = self.draw_header(&mut canvas, theme, table_top);
        for (subject, row) in subjects.iter().zip(&rows) {
            y = self.draw_row(&mut canvas, theme, subject, row, y);
        }
        canvas
    }

    fn draw_header(&self, canvas: &mut Canvas, theme: &Theme, y: f32) -> f32 {
        let typography = self.typography();
        let mut band = Band::new(y);
        let columns = band.fixed_columns(MARGIN, &column_widths());
        for (mut column, label) in columns.into_iter().zip(HEADERS) {
            let length = typography.text_length(label, TextStyle::Body);
            typography.draw_text(
                canvas,
                column.center() - length / 2.0,
                column.y + CELL_PADDING,
                label,
                TextStyle::Body,
                theme.foreground,
            );
            column.advance_by(typography.line_height(TextStyle::Body) + 2.0 * CELL_PADDING);
            band.extend(&column);
        }
        canvas.hline(MARGIN, GRADES_WIDTH as f32 - MARGIN, band.max_y(), theme.foreground);
        band.max_y()
    }

    fn draw_row(
        &self,
        canvas: &mut Canvas,
        theme: &Theme,
        subject: &SubjectGrades,
        row: &RowMetrics,
        y: f32,
    ) -> f32 {
        let typography = self.typography();
        let mut band = Band::new(y);
        let mut columns = band.fixed_columns(MARGIN, &column_widths());

        typography.draw_multiline(
            canvas,
            columns[0].x + CELL_PADDING,
            y + CELL_PADDING,
            &row.subject,
            TextStyle::Body,
            theme.foreground,
            Align::Left,
        );
        self.draw_grade_cells(canvas, theme, &columns[1], &row.grade_lines);

        let final_grade = subject.final_grade.map_or_else(|| "-".to_string(), |g| g.to_string());
        self.draw_centered(canvas, &columns[2], &final_grade, theme.time_color);
        self.draw_centered(canvas, &columns[3], &subject.absences.to_string(), theme.teacher_color);

        for column in columns.iter_mut() {
            column.advance_by(row.height);
            band.extend(column);
        }
        canvas.hline(MARGIN, GRADES_WIDTH as f32 - MARGIN, band.max_y(), theme.teacher_color);
        band.max_y()
    }

    fn draw_grade_cells(
        &self,
        canvas: &mut Canvas,
        theme: &Theme,
        column: &Column,
        lines: &[Vec<u8>],
    ) {
        let typography = self.typography();
        let advance = typography.line_advance(TextStyle::Body);
        for (line_index, line) in lines.iter().enumerate() {
            let y = column.y + CELL_PADDING + line_index as f32 * advance;
            for (cell_index, grade) in line.iter().enumerate() {
                let text = grade.to_string();
                let length = typography.text_length(&text, TextStyle::Body);
                let cell_x = column.x + cell_index as f32 * GRADE_CELL;
                typography.draw_text(
                    canvas,
                    cell_x + GRADE_CELL / 2.0 - length / 2.0,
                    y,
                    &text,
                    TextStyle::Body,
                    theme.foreground,
                );
            }
        }
    }

    fn draw_centered(
        &self,
        canvas: &mut Canvas,
        column: &Column,
        text: &str,
        color: image::Rgba<u8>,
    ) {
        let typography = self.typography();
        let length = typography.text_length(text, TextStyle::Body);
        typography.draw_text(
            canvas,
            column.center() - length / 2.0,
            column.y + CELL_PADDING,
            text,
            TextStyle::Body,
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(title: &str, grades: Vec<u8>) -> SubjectGrades {
        SubjectGrades {
            title: title.to_string(),
            grades,
            final_grade: Some(5),
            absences: 2,
        }
    }

    #[test]
    fn many_grades_flow_onto_more_lines() {
        let typography = Typography::embedded().unwrap();
        let short = measure_row(&typography, &subject("Физика", vec![5, 4]));
        let long = measure_row(&typography, &subject("Физика", vec![4; cells_per_line() + 1]));
        assert_eq!(short.grade_lines.len(), 1);
        assert_eq!(long.grade_lines.len(), 2);
        assert!(long.height > short.height);
    }

    #[test]
    fn sheet_grows_with_rows() {
        let composer = Composer::new(Typography::embedded().unwrap());
        let theme = Theme::default();
        let one = composer.grades("Успеваемость", &[subject("Математика", vec![5])], &theme);
        let two = composer.grades(
            "Успеваемость",
            &[subject("Математика", vec![5]), subject("История", vec![3, 4])],
            &theme,
        );
        assert_eq!(one.width(), GRADES_WIDTH);
        assert!(two.height() > one.height());
    }

    #[test]
    fn empty_sheet_still_renders() {
        let composer = Composer::new(Typography::embedded().unwrap());
        let canvas = composer.grades("Успеваемость", &[], &Theme::default());
        assert!(canvas.height() > 0);
    }
}
