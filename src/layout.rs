//! Column and band cursors shared by every page layout.

use log::debug;

/// Vertical cursor of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub x: f32,
    pub width: f32,
    pub y: f32,
}

impl Column {
    pub fn advance_by(&mut self, dy: f32) {
        self.y += dy;
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn center(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// A row of columns that start at the same y. Tracks the deepest point any
/// column reached so the next band can start below it.
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    origin_y: f32,
    max_y: f32,
}

impl Band {
    pub fn new(origin_y: f32) -> Self {
        Band {
            origin_y,
            max_y: origin_y,
        }
    }

    pub fn max_y(&self) -> f32 {
        self.max_y
    }

    pub fn column(&self, x: f32, width: f32) -> Column {
        Column {
            x,
            width,
            y: self.origin_y,
        }
    }

    /// Column `index` of `count` equal-width columns spanning `total_width`.
    /// Indices past `count` continue to the right at the same width.
    pub fn equal_column(&self, total_width: f32, count: usize, index: usize) -> Column {
        let width = total_width / count.max(1) as f32;
        self.column(index as f32 * width, width)
    }

    /// Columns of fixed widths laid side by side from `x`.
    pub fn fixed_columns(&self, x: f32, widths: &[f32]) -> Vec<Column> {
        let mut left = x;
        widths
            .iter()
            .map(|&width| {
                let column = self.column(left, width);
                left += width;
                column
            })
            .collect()
    }

    /// Records how far `column` got.
    pub fn extend(&mut self, column: &Column) {
        if column.y > self.max_y {
            self.max_y = column.y;
        }
        debug!(
            "column at x={:.0} reached y={:.1}, band max y={:.1}",
            column.x, column.y, self.max_y
        );
    }
}
