use chrono::Utc;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy)]
enum LogLevel {
    Info(Color),
    Warn,
    Error,
}

impl LogLevel {
    fn tag(&self) -> &'static str {
        match self {
            LogLevel::Info(_) => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    fn ansi_code(&self) -> &'static str {
        match self {
            LogLevel::Info(color) => color.to_ansi_code(),
            LogLevel::Warn => "\x1b[93m",  // Bright Yellow
            LogLevel::Error => "\x1b[91m", // Bright Red
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    Cyan,
    Magenta,
    White,
}

impl Color {
    fn to_ansi_code(self) -> &'static str {
        match self {
            Color::Red => "\x1b[31m",
            Color::Green => "\x1b[32m",
            Color::Blue => "\x1b[34m",
            Color::Yellow => "\x1b[33m",
            Color::Cyan => "\x1b[36m",
            Color::Magenta => "\x1b[35m",
            Color::White => "\x1b[37m",
        }
    }
}

/// Appends timestamped lines to a session log file and, optionally, echoes them
/// to the console in color.
#[derive(Debug, Clone)]
pub struct Logger {
    log_file: PathBuf,
    echo: bool,
}

impl Logger {
    /// Creates a new `Logger` writing to `<log_dir>/<name>.log`.
    ///
    /// # Parameters
    /// - `log_dir`: Directory for the log file. Created if missing.
    /// - `name`: File name of the log, without extension.
    /// - `echo`: Whether messages are also printed to the console.
    ///
    /// The log file is truncated, so each session starts with an empty log.
    pub fn new(log_dir: &Path, name: &str, echo: bool) -> Result<Self, LoggerError> {
        std::fs::create_dir_all(log_dir).map_err(LoggerError::from)?;
        if !log_dir.is_dir() {
            return Err(LoggerError::InvalidPath(
                "Provided path is not a directory.".into(),
            ));
        }

        let sanitized_name = name.replace([':', '/', '\\'], "_");
        let log_file = log_dir.join(format!("{}.log", sanitized_name));

        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&log_file)
            .map_err(LoggerError::from)?;

        Ok(Logger { log_file, echo })
    }

    pub fn path(&self) -> &Path {
        &self.log_file
    }

    fn log(&self, level: LogLevel, message: &str) -> Result<(), LoggerError> {
        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let log_message = format!("[{}] [{}]: {}\n", level.tag(), timestamp, message);

        if self.echo {
            print!("{}{}\x1b[0m", level.ansi_code(), log_message);
            io::stdout().flush().map_err(LoggerError::from)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file)
            .map_err(LoggerError::from)?;
        file.write_all(log_message.as_bytes())
            .map_err(LoggerError::from)?;
        file.flush().map_err(LoggerError::from)?;

        Ok(())
    }

    /// Logs an informational message, shown in `color` on the console.
    pub fn info(&self, message: &str, color: Color) -> Result<(), LoggerError> {
        self.log(LogLevel::Info(color), message)
    }

    /// Logs a warning message.
    pub fn warn(&self, message: &str) -> Result<(), LoggerError> {
        self.log(LogLevel::Warn, message)
    }

    /// Logs an error message.
    pub fn error(&self, message: &str) -> Result<(), LoggerError> {
        self.log(LogLevel::Error, message)
    }
}

#[derive(Debug)]
pub enum LoggerError {
    IoError(std::io::Error),
    InvalidPath(String),
}

impl std::fmt::Display for LoggerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggerError::IoError(e) => write!(f, "I/O Error: {}", e),
            LoggerError::InvalidPath(msg) => write!(f, "Invalid Path: {}", msg),
        }
    }
}

impl std::error::Error for LoggerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoggerError::IoError(e) => Some(e),
            LoggerError::InvalidPath(_) => None,
        }
    }
}

impl From<std::io::Error> for LoggerError {
    fn from(err: std::io::Error) -> Self {
        LoggerError::IoError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("flight_progress_logs_{}_{}", tag, std::process::id()))
    }

    #[test]
    fn test_logger_writes_levels_to_file() {
        let log_dir = scratch_dir("levels");
        let logger = Logger::new(&log_dir, "session", false).expect("Failed to create logger");

        logger
            .info("Tracker started.", Color::Green)
            .expect("Failed to log message");
        logger.warn("Airspeed unavailable.").unwrap();
        logger.error("Flag store unreachable.").unwrap();

        let log_contents = fs::read_to_string(log_dir.join("session.log")).unwrap();
        assert!(log_contents.contains("[INFO]"));
        assert!(log_contents.contains("Tracker started."));
        assert!(log_contents.contains("[WARN]"));
        assert!(log_contents.contains("[ERROR]"));
        assert_eq!(log_contents.lines().count(), 3);

        fs::remove_dir_all(log_dir).unwrap();
    }

    #[test]
    fn test_new_session_truncates_log() {
        let log_dir = scratch_dir("truncate");
        let first = Logger::new(&log_dir, "session", false).unwrap();
        first.info("old line", Color::White).unwrap();

        let second = Logger::new(&log_dir, "session", false).unwrap();
        let log_contents = fs::read_to_string(second.path()).unwrap();
        assert!(log_contents.is_empty());

        fs::remove_dir_all(log_dir).unwrap();
    }

    #[test]
    fn test_name_is_sanitized() {
        let log_dir = scratch_dir("sanitize");
        let logger = Logger::new(&log_dir, "a/b:c", false).unwrap();
        assert_eq!(logger.path(), log_dir.join("a_b_c.log"));

        fs::remove_dir_all(log_dir).unwrap();
    }

    #[test]
    fn test_invalid_path() {
        let file = scratch_dir("not_a_dir");
        fs::write(&file, "plain file").unwrap();

        let result = Logger::new(&file, "session", false);
        assert!(result.is_err(), "Logger should fail when the path is a file");

        fs::remove_file(file).unwrap();
    }
}
