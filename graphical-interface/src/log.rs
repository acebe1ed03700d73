use logger::{Color, Logger};

/// Optional session logger shared by the app and its widgets.
/// Failing to write a log line never interrupts the display.
#[derive(Debug, Clone, Default)]
pub struct AppLog {
    logger: Option<Logger>,
}

impl AppLog {
    pub fn new(logger: Option<Logger>) -> Self {
        Self { logger }
    }

    pub fn info(&self, message: &str, color: Color) {
        if let Some(logger) = &self.logger {
            if let Err(e) = logger.info(message, color) {
                eprintln!("Failed to write log: {}", e);
            }
        }
    }

    pub fn warn(&self, message: &str) {
        if let Some(logger) = &self.logger {
            if let Err(e) = logger.warn(message) {
                eprintln!("Failed to write log: {}", e);
            }
        }
    }

    pub fn error(&self, message: &str) {
        match &self.logger {
            Some(logger) => {
                if let Err(e) = logger.error(message) {
                    eprintln!("Failed to write log: {} ({})", e, message);
                }
            }
            None => eprintln!("{}", message),
        }
    }
}
