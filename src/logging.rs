use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{Config, WriteLogger};

use crate::error::AppError;

/// Starts the file logger. The terminal is owned by the game, so logs never go
/// to stdout or stderr.
pub fn init(path: &Path, verbose: bool) -> Result<(), AppError> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    WriteLogger::init(level, Config::default(), File::create(path)?)?;
    Ok(())
}
