use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use thiserror::Error;

const APP_DIR_NAME: &str = "themed-snake";
const LOG_FILE_NAME: &str = "themed-snake.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to create log file {path}: {source}")]
    File { path: PathBuf, source: io::Error },
    #[error("logger already initialized: {0}")]
    SetLogger(#[from] log::SetLoggerError),
}

/// Returns the platform-correct log file path.
#[must_use]
pub fn log_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(LOG_FILE_NAME);
    base
}

/// Routes the `log` facade into `path`.
///
/// The terminal is in raw mode on the alternate screen while playing, so log
/// output never goes to stdout or stderr.
pub fn init(path: &Path, verbose: bool) -> Result<(), LoggingError> {
    let file = create_log_file(path).map_err(|source| LoggingError::File {
        path: path.to_path_buf(),
        source,
    })?;

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();

    WriteLogger::init(level, config, file)?;
    Ok(())
}

fn create_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    File::create(path)
}
