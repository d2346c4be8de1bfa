use simplelog::*;
use std::fs::{self, File, OpenOptions};
use std::io::{Error, ErrorKind};
use std::path::PathBuf;

/// Directory the session log files go to: `$HOME/.local/share/padsim/logs`.
pub fn log_dir() -> Result<PathBuf, Error> {
    let home = std::env::var("HOME")
        .map_err(|_| Error::new(ErrorKind::NotFound, "HOME environment variable not set"))?;

    Ok(PathBuf::from(home)
        .join(".local")
        .join("share")
        .join("padsim")
        .join("logs"))
}

/// One file per day, so a long debugging session stays in one place.
pub fn log_file_name(date: chrono::NaiveDate) -> String {
    format!("padsim-{}.log", date.format("%Y-%m-%d"))
}

fn open_log_file() -> Result<(File, PathBuf), Error> {
    let dir = log_dir()?;
    fs::create_dir_all(&dir)?;

    let path = dir.join(log_file_name(chrono::Local::now().date_naive()));
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((file, path))
}

/// Installs the terminal logger at `level` plus a debug-level file logger.
///
/// The file logger is skipped when its file cannot be opened. Returns the
/// log file path when there is one.
pub fn init_logger(level: LevelFilter) -> Result<Option<PathBuf>, Error> {
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_thread_level(LevelFilter::Off)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    let log_path = match open_log_file() {
        Ok((file, path)) => {
            loggers.push(WriteLogger::new(LevelFilter::Debug, config, file));
            Some(path)
        }
        Err(e) => {
            eprintln!("File logging disabled: {}", e);
            None
        }
    };

    CombinedLogger::init(loggers)
        .map_err(|e| Error::new(ErrorKind::Other, format!("Logger initialization failed: {}", e)))?;

    if let Some(path) = &log_path {
        log::debug!("Logging to {}", path.display());
    }
    Ok(log_path)
}
