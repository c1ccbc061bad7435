//! Logger setup for the terminal UI.
//!
//! The alternate screen belongs to ratatui, so records only ever go to a file.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{CombinedLogger, Config, ConfigBuilder, SharedLogger, WriteLogger};

/// Installs the global file logger. Returns false when the file could not be
/// created, in which case the app runs without logging.
pub fn initialize(path: &Path, level: LevelFilter) -> bool {
    if level == LevelFilter::Off {
        return false;
    }
    let file = match File::create(path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Warning: could not create log file {}: {}", path.display(), err);
            return false;
        }
    };
    let loggers: Vec<Box<dyn SharedLogger>> = vec![WriteLogger::new(level, build_config(), file)];
    CombinedLogger::init(loggers).is_ok()
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .set_thread_level(LevelFilter::Debug)
        .build()
}
