use crate::config::GridSize;

/// Grid cell in `(row, col)` order.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Point {
    pub row: i32,
    pub col: i32,
}

impl Point {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

/// Component-wise sum.
#[must_use]
pub fn add(p: Point, d: Point) -> Point {
    Point {
        row: p.row + d.row,
        col: p.col + d.col,
    }
}

/// Projects `p` into the interior so that leaving one border re-enters on the
/// opposite side with no skipped or repeated cells.
#[must_use]
pub fn wrap(p: Point, bounds: GridSize) -> Point {
    Point {
        row: wrap_axis(p.row, i32::from(bounds.height) - 2),
        col: wrap_axis(p.col, i32::from(bounds.width) - 2),
    }
}

fn wrap_axis(value: i32, span: i32) -> i32 {
    if span <= 0 {
        return value;
    }

    (value - 1).rem_euclid(span) + 1
}

/// `max(lo, min(hi, n))`; yields `lo` when the range is inverted.
#[must_use]
pub fn clamp(n: i32, lo: i32, hi: i32) -> i32 {
    lo.max(hi.min(n))
}

#[cfg(test)]
mod tests {
    use super::{add, clamp, wrap, Point};
    use crate::config::GridSize;

    #[test]
    fn add_sums_components() {
        assert_eq!(add(Point::new(3, 4), Point::new(-1, 2)), Point::new(2, 6));
    }

    #[test]
    fn wrap_reenters_on_opposite_edge() {
        let bounds = GridSize::new(20, 40);

        assert_eq!(wrap(Point::new(0, 5), bounds), Point::new(18, 5));
        assert_eq!(wrap(Point::new(19, 5), bounds), Point::new(1, 5));
        assert_eq!(wrap(Point::new(7, 0), bounds), Point::new(7, 38));
        assert_eq!(wrap(Point::new(7, 39), bounds), Point::new(7, 1));
    }

    #[test]
    fn wrap_leaves_interior_points_alone() {
        let bounds = GridSize::new(12, 24);
        for cell in bounds.interior_cells() {
            assert_eq!(wrap(cell, bounds), cell);
        }
    }

    #[test]
    fn clamp_pulls_values_into_range() {
        assert_eq!(clamp(-3, 1, 10), 1);
        assert_eq!(clamp(42, 1, 10), 10);
        assert_eq!(clamp(5, 1, 10), 5);
        assert_eq!(clamp(5, 1, 0), 1);
    }
}
