use crate::canvas::Canvas;
use crate::config::{
    GridSize, GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD, MIN_GRID_HEIGHT, MIN_GRID_WIDTH,
};
use crate::game::{DeathReason, GameState, Phase};
use crate::score::HighScoreStore;

/// Renders the full game frame from immutable state.
pub fn render<C, S>(canvas: &mut C, state: &GameState<S>)
where
    C: Canvas + ?Sized,
    S: HighScoreStore,
{
    let bounds = state.bounds();
    canvas.clear();
    canvas.draw_border(bounds);

    if state.phase == Phase::GameOver {
        render_game_over(canvas, state);
    } else {
        render_food(canvas, state);
        render_snake(canvas, state);
        if state.phase == Phase::Paused {
            let middle = i32::from(bounds.height / 2);
            canvas.draw_centered(middle, " Paused ");
            canvas.draw_centered(middle + 1, " p to resume ");
        }
    }

    canvas.draw_centered(0, &hud_line(state));
}

/// Shown instead of the board while the terminal is below the minimum size.
pub fn render_too_small<C: Canvas + ?Sized>(canvas: &mut C) {
    let size = canvas.size();
    canvas.clear();
    let middle = i32::from(size.height / 2);
    canvas.draw_centered(middle, "Terminal too small for Snake.");
    canvas.draw_centered(
        middle + 1,
        &format!(
            "Need {MIN_GRID_WIDTH}x{MIN_GRID_HEIGHT}, have {}x{}",
            size.width, size.height
        ),
    );
}

fn render_food<C, S>(canvas: &mut C, state: &GameState<S>)
where
    C: Canvas + ?Sized,
    S: HighScoreStore,
{
    canvas.put_glyph(state.food.row, state.food.col, GLYPH_FOOD);
}

fn render_snake<C, S>(canvas: &mut C, state: &GameState<S>)
where
    C: Canvas + ?Sized,
    S: HighScoreStore,
{
    // Tail first so the head wins when segments overlap.
    for segment in state.body.segments().skip(1).rev() {
        canvas.put_glyph(segment.row, segment.col, GLYPH_SNAKE_BODY);
    }

    let head = state.body.head();
    canvas.put_glyph(head.row, head.col, GLYPH_SNAKE_HEAD);
}

fn render_game_over<C, S>(canvas: &mut C, state: &GameState<S>)
where
    C: Canvas + ?Sized,
    S: HighScoreStore,
{
    let GridSize { height, .. } = state.bounds();
    let middle = i32::from(height / 2);

    let cause = match state.death_reason {
        Some(DeathReason::WallCollision) => " (hit wall)",
        Some(DeathReason::SelfCollision) => " (hit yourself)",
        Some(DeathReason::BoardFilled) => " (board full)",
        None => "",
    };

    canvas.draw_centered(middle - 1, "Game Over");
    canvas.draw_centered(middle, &format!("Score: {}{cause}", state.score));
    canvas.draw_centered(middle + 1, "r to restart, q to quit");
    if state.score > 0 && state.score == state.high_score {
        canvas.draw_centered(middle + 2, "New high score!");
    }
}

fn hud_line<S: HighScoreStore>(state: &GameState<S>) -> String {
    format!(
        " Snake | score: {} | hi: {} | wrap: {} | q to quit ",
        state.score,
        state.high_score,
        if state.wrap { "on" } else { "off" }
    )
}
