use std::io;

use thiserror::Error;

use crate::config::{MIN_GRID_HEIGHT, MIN_GRID_WIDTH};

/// Reasons the engine refuses to start.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum GameError {
    #[error(
        "terminal is {height}x{width}, need at least {min_h}x{min_w}",
        min_h = MIN_GRID_HEIGHT,
        min_w = MIN_GRID_WIDTH
    )]
    GridTooSmall { height: u16, width: u16 },
}

/// Top-level failure for the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("could not start logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

#[cfg(test)]
mod tests {
    use super::{AppError, GameError};

    #[test]
    fn too_small_message_names_both_sizes() {
        let message = GameError::GridTooSmall {
            height: 10,
            width: 20,
        }
        .to_string();

        assert_eq!(message, "terminal is 10x20, need at least 12x24");
    }

    #[test]
    fn game_errors_surface_unchanged_through_app_error() {
        let error = GameError::GridTooSmall {
            height: 8,
            width: 30,
        };
        let app_error = AppError::from(error);

        assert!(matches!(app_error, AppError::Game(GameError::GridTooSmall { .. })));
        assert_eq!(app_error.to_string(), error.to_string());
    }
}
