use std::time::Duration;

use crate::geometry::Point;

/// Visible play area dimensions, border included.
///
/// The playable interior is rows `1..=height - 2` and columns `1..=width - 2`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub height: u16,
    pub width: u16,
}

impl GridSize {
    #[must_use]
    pub fn new(height: u16, width: u16) -> Self {
        Self { height, width }
    }

    /// Builds a grid from a crossterm-style `(columns, rows)` pair.
    #[must_use]
    pub fn from_terminal(columns: u16, rows: u16) -> Self {
        Self {
            height: rows,
            width: columns,
        }
    }

    /// Returns true when the grid meets the minimum playable dimensions.
    #[must_use]
    pub fn is_playable(self) -> bool {
        self.height >= MIN_GRID_HEIGHT && self.width >= MIN_GRID_WIDTH
    }

    /// Last interior row (inclusive).
    #[must_use]
    pub fn max_row(self) -> i32 {
        i32::from(self.height) - 2
    }

    /// Last interior column (inclusive).
    #[must_use]
    pub fn max_col(self) -> i32 {
        i32::from(self.width) - 2
    }

    /// Number of interior cells; zero for degenerate grids.
    #[must_use]
    pub fn playable_cells(self) -> usize {
        let rows = usize::from(self.height.saturating_sub(2));
        let cols = usize::from(self.width.saturating_sub(2));
        rows * cols
    }

    /// Returns true when `point` lies strictly inside the border.
    #[must_use]
    pub fn in_interior(self, point: Point) -> bool {
        point.row >= 1 && point.row <= self.max_row() && point.col >= 1 && point.col <= self.max_col()
    }

    /// Iterates interior cells in row-major order.
    pub fn interior_cells(self) -> impl Iterator<Item = Point> {
        let max_col = self.max_col();
        (1..=self.max_row()).flat_map(move |row| (1..=max_col).map(move |col| Point::new(row, col)))
    }
}

/// Smallest terminal height the engine will start on.
pub const MIN_GRID_HEIGHT: u16 = 12;

/// Smallest terminal width the engine will start on.
pub const MIN_GRID_WIDTH: u16 = 24;

/// Segment count of a freshly spawned snake.
pub const START_LENGTH: usize = 3;

/// Tick interval at score zero.
pub const TICK_START: Duration = Duration::from_micros(100_000);

/// Floor for the tick interval.
pub const TICK_MIN: Duration = Duration::from_micros(45_000);

/// Interval reduction granted per point scored.
pub const TICK_DECAY_PER_POINT: Duration = Duration::from_micros(2_500);

/// Random attempts made before falling back to an exhaustive scan.
pub const FOOD_RANDOM_ATTEMPTS: usize = 200;

/// Empty-cell count below which food placement always scans.
pub const FOOD_SCAN_MIN_EMPTY: usize = 20;

/// Fraction of the board (as `1 / n`) below which food placement always scans.
pub const FOOD_SCAN_DIVISOR: usize = 8;

/// Point returned when no empty interior cell exists.
pub const FOOD_FALLBACK: Point = Point { row: 1, col: 1 };

/// How long the "too small" message stays up before exiting.
pub const TOO_SMALL_EXIT_DELAY: Duration = Duration::from_secs(2);

pub const GLYPH_SNAKE_HEAD: char = '@';
pub const GLYPH_SNAKE_BODY: char = 'o';
pub const GLYPH_FOOD: char = '*';

pub const BORDER_CORNER: char = '+';
pub const BORDER_HORIZONTAL: char = '-';
pub const BORDER_VERTICAL: char = '|';
