use std::io;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::canvas::Canvas;
use crate::config::{GridSize, TICK_START};
use crate::game::GameState;
use crate::input::{GameInput, InputSource};
use crate::renderer;
use crate::score::HighScoreStore;

/// Where frames go and where the visible size comes from.
pub trait Screen {
    fn size(&self) -> io::Result<GridSize>;

    fn draw<F>(&mut self, paint: F) -> io::Result<()>
    where
        F: FnOnce(&mut dyn Canvas);
}

/// Whether the loop should keep going after an iteration.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LoopControl {
    Continue,
    Quit,
}

/// Part of `interval` still left after `elapsed`.
#[must_use]
pub fn remaining_interval(interval: Duration, elapsed: Duration) -> Duration {
    interval.saturating_sub(elapsed)
}

/// Single-threaded driver: one input poll, one paced tick and one frame per
/// iteration.
pub struct GameLoop<I, D, S>
where
    I: InputSource,
    D: Screen,
    S: HighScoreStore,
{
    input: I,
    screen: D,
    state: GameState<S>,
    last_tick: Instant,
    held: bool,
}

impl<I, D, S> GameLoop<I, D, S>
where
    I: InputSource,
    D: Screen,
    S: HighScoreStore,
{
    #[must_use]
    pub fn new(input: I, screen: D, state: GameState<S>) -> Self {
        Self {
            input,
            screen,
            state,
            last_tick: Instant::now(),
            held: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState<S> {
        &self.state
    }

    #[must_use]
    pub fn screen(&self) -> &D {
        &self.screen
    }

    /// Iterates until quit is requested.
    pub fn run(&mut self) -> io::Result<()> {
        while self.run_iteration()? == LoopControl::Continue {}
        info!(
            "quit with score {}, high score {}",
            self.state.score, self.state.high_score
        );
        Ok(())
    }

    /// Polls input, waits out the tick interval, advances and redraws.
    pub fn run_iteration(&mut self) -> io::Result<LoopControl> {
        let size = self.screen.size()?;
        if !size.is_playable() {
            if !self.held {
                debug!("holding ticks at {}x{}", size.height, size.width);
                self.held = true;
            }
            if self.forward_input()? == LoopControl::Quit {
                return Ok(LoopControl::Quit);
            }
            self.screen.draw(|canvas| renderer::render_too_small(canvas))?;
            thread::sleep(TICK_START);
            self.last_tick = Instant::now();
            return Ok(LoopControl::Continue);
        }

        self.held = false;
        self.state.resize(size);

        if self.forward_input()? == LoopControl::Quit {
            return Ok(LoopControl::Quit);
        }

        let wait = remaining_interval(self.state.tick_interval(), self.last_tick.elapsed());
        thread::sleep(wait);
        self.last_tick = Instant::now();

        self.state.tick();
        let state = &self.state;
        self.screen.draw(|canvas| renderer::render(canvas, state))?;

        Ok(LoopControl::Continue)
    }

    /// Reads at most one key and hands everything but quit to the game.
    fn forward_input(&mut self) -> io::Result<LoopControl> {
        match self.input.poll_input()? {
            Some(GameInput::Quit) => Ok(LoopControl::Quit),
            Some(input) => {
                self.state.apply_input(input);
                Ok(LoopControl::Continue)
            }
            None => Ok(LoopControl::Continue),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::VecDeque;
    use std::io;
    use std::time::Duration;

    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;

    use super::{remaining_interval, GameLoop, LoopControl, Screen};
    use crate::canvas::Canvas;
    use crate::config::GridSize;
    use crate::game::{GameState, Phase};
    use crate::geometry::Point;
    use crate::input::{Direction, GameInput, InputSource};
    use crate::score::MemoryScoreStore;

    struct ScriptedInput(VecDeque<GameInput>);

    impl InputSource for ScriptedInput {
        fn poll_input(&mut self) -> io::Result<Option<GameInput>> {
            Ok(self.0.pop_front())
        }
    }

    struct BufferScreen {
        size: Cell<GridSize>,
        buffer: Buffer,
        frames: u32,
    }

    impl BufferScreen {
        fn new(size: GridSize) -> Self {
            Self {
                size: Cell::new(size),
                buffer: Buffer::empty(Rect::new(0, 0, size.width, size.height)),
                frames: 0,
            }
        }

        fn row(&self, row: u16) -> String {
            (0..self.buffer.area.width)
                .map(|x| self.buffer[(x, row)].symbol())
                .collect()
        }
    }

    impl Screen for BufferScreen {
        fn size(&self) -> io::Result<GridSize> {
            Ok(self.size.get())
        }

        fn draw<F>(&mut self, paint: F) -> io::Result<()>
        where
            F: FnOnce(&mut dyn Canvas),
        {
            let size = self.size.get();
            self.buffer = Buffer::empty(Rect::new(0, 0, size.width, size.height));
            paint(&mut self.buffer);
            self.frames += 1;
            Ok(())
        }
    }

    fn game_loop(
        inputs: Vec<GameInput>,
        size: GridSize,
    ) -> GameLoop<ScriptedInput, BufferScreen, MemoryScoreStore> {
        let state = GameState::new_with_seed(size, false, MemoryScoreStore::default(), 5)
            .expect("bounds should be playable");
        GameLoop::new(
            ScriptedInput(inputs.into()),
            BufferScreen::new(size),
            state,
        )
    }

    #[test]
    fn remaining_interval_saturates_at_zero() {
        let interval = Duration::from_millis(100);

        assert_eq!(
            remaining_interval(interval, Duration::from_millis(30)),
            Duration::from_millis(70)
        );
        assert_eq!(
            remaining_interval(interval, Duration::from_millis(250)),
            Duration::ZERO
        );
    }

    #[test]
    fn input_is_applied_before_the_same_iterations_tick() {
        let size = GridSize::new(20, 40);
        let mut game_loop = game_loop(vec![GameInput::Direction(Direction::Up)], size);
        let head = game_loop.state().body.head();

        assert_eq!(game_loop.run_iteration().ok(), Some(LoopControl::Continue));

        assert_eq!(
            game_loop.state().body.head(),
            Point::new(head.row - 1, head.col)
        );
        assert_eq!(game_loop.screen().frames, 1);
        assert_eq!(game_loop.screen().row(head.row as u16 - 1).matches('@').count(), 1);
    }

    #[test]
    fn quit_stops_before_ticking() {
        let mut game_loop = game_loop(vec![GameInput::Quit], GridSize::new(20, 40));

        assert_eq!(game_loop.run_iteration().ok(), Some(LoopControl::Quit));
        assert_eq!(game_loop.state().tick_count, 0);
        assert_eq!(game_loop.screen().frames, 0);
    }

    #[test]
    fn run_returns_after_quit() {
        let mut game_loop = game_loop(
            vec![GameInput::Other, GameInput::Pause, GameInput::Quit],
            GridSize::new(20, 40),
        );

        assert!(game_loop.run().is_ok());
        assert_eq!(game_loop.state().phase, Phase::Paused);
        assert_eq!(game_loop.state().tick_count, 1);
    }

    #[test]
    fn undersized_screen_holds_ticks() {
        let mut game_loop = game_loop(Vec::new(), GridSize::new(20, 40));
        game_loop.screen.size.set(GridSize::new(8, 20));

        assert_eq!(game_loop.run_iteration().ok(), Some(LoopControl::Continue));

        assert_eq!(game_loop.state().tick_count, 0);
        assert!(game_loop.screen().row(4).contains("too small"));
    }

    #[test]
    fn wrap_toggle_is_honored_while_ticks_are_held() {
        let mut game_loop = game_loop(vec![GameInput::ToggleWrap], GridSize::new(20, 40));
        game_loop.screen.size.set(GridSize::new(8, 20));

        assert_eq!(game_loop.run_iteration().ok(), Some(LoopControl::Continue));

        assert!(game_loop.state().wrap);
        assert_eq!(game_loop.state().tick_count, 0);
    }

    #[test]
    fn quit_is_honored_while_ticks_are_held() {
        let mut game_loop = game_loop(vec![GameInput::Quit], GridSize::new(20, 40));
        game_loop.screen.size.set(GridSize::new(8, 20));

        assert_eq!(game_loop.run_iteration().ok(), Some(LoopControl::Quit));
    }

    #[test]
    fn resize_is_applied_before_ticking() {
        let mut game_loop = game_loop(Vec::new(), GridSize::new(20, 40));
        game_loop.screen.size.set(GridSize::new(14, 30));

        assert_eq!(game_loop.run_iteration().ok(), Some(LoopControl::Continue));

        assert_eq!(game_loop.state().bounds(), GridSize::new(14, 30));
        assert!(game_loop.state().bounds().in_interior(game_loop.state().body.head()));
    }
}
