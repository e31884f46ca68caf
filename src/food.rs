use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::body::Body;
use crate::config::{
    GridSize, FOOD_FALLBACK, FOOD_RANDOM_ATTEMPTS, FOOD_SCAN_DIVISOR, FOOD_SCAN_MIN_EMPTY,
};
use crate::geometry::Point;

/// Picks an interior cell the snake does not occupy.
///
/// Sparse boards use random sampling; crowded boards (or exhausted attempts)
/// scan every interior cell and choose uniformly among the free ones.
#[must_use]
pub fn place_food<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize, body: &Body) -> Point {
    let playable = bounds.playable_cells();
    let empty = playable.saturating_sub(body.len());
    if empty == 0 {
        return FOOD_FALLBACK;
    }

    if empty < FOOD_SCAN_MIN_EMPTY.max(playable / FOOD_SCAN_DIVISOR) {
        return scan_free_cell(rng, bounds, body);
    }

    for _ in 0..FOOD_RANDOM_ATTEMPTS {
        let candidate = Point::new(
            rng.gen_range(1..=bounds.max_row()),
            rng.gen_range(1..=bounds.max_col()),
        );
        if !body.contains(candidate) {
            return candidate;
        }
    }

    debug!("random food attempts exhausted, scanning {playable} cells");
    scan_free_cell(rng, bounds, body)
}

fn scan_free_cell<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize, body: &Body) -> Point {
    let candidates: Vec<Point> = bounds
        .interior_cells()
        .filter(|cell| !body.contains(*cell))
        .collect();

    candidates.choose(rng).copied().unwrap_or(FOOD_FALLBACK)
}
