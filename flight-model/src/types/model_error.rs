use std::fmt;

/// Errors raised while loading flight configuration or touching persisted state.
#[derive(Debug)]
pub enum ModelError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidDateFormat(String), // Timestamp not in the expected `%d-%m-%Y %H:%M:%S` format
    InvalidDistance(String),   // Negative or non-finite total distance
    MissingFlightRecord,       // The configuration file has a header but no rows
    InvalidPath(String),       // Flag store pointed at something that is not a directory
    Serialization(serde_json::Error),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::Io(e) => write!(f, "I/O error: {}", e),
            ModelError::Csv(e) => write!(f, "Flight configuration error: {}", e),
            ModelError::InvalidDateFormat(ref date_str) => {
                write!(f, "Invalid date format: {}", date_str)
            }
            ModelError::InvalidDistance(ref distance) => {
                write!(f, "Invalid total distance: {}", distance)
            }
            ModelError::MissingFlightRecord => {
                write!(f, "The flight configuration does not contain any flight")
            }
            ModelError::InvalidPath(ref path) => write!(f, "Invalid path: {}", path),
            ModelError::Serialization(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelError::Io(e) => Some(e),
            ModelError::Csv(e) => Some(e),
            ModelError::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ModelError {
    fn from(err: std::io::Error) -> Self {
        ModelError::Io(err)
    }
}

impl From<csv::Error> for ModelError {
    fn from(err: csv::Error) -> Self {
        ModelError::Csv(err)
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::Serialization(err)
    }
}
