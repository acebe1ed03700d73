use std::env;
use std::path::{Path, PathBuf};

use flight_model::{FlightParameters, SurfaceId};
use graphical_interface::Settings;
use logger::{Color, Logger};

const STATE_DIR_NAME: &str = ".flight-progress";
const LOG_NAME: &str = "flight_progress";
const HIDE_FLAG: &str = "--hide=";

/// Opens the flight progress window.
///
/// # Usage
///
/// ```sh
/// cargo run -- [--hide=<surface,...>] [flight.csv] [state_dir]
/// ```
///
/// Without a CSV file the built-in flight is shown. The state directory keeps the
/// arrival flag and the session log, and defaults to `$HOME/.flight-progress`.
///
/// # Errors
///
/// Returns `Err(String)` if there are too many arguments, a hidden surface name is
/// unknown, the flight file cannot be read, or the state directory cannot be used.
fn main() -> Result<(), String> {
    let args: Vec<String> = env::args().skip(1).collect();

    let (hidden_surfaces, positional) = split_args(&args)?;
    if positional.len() > 2 {
        return Err(
            "Usage: flight-progress [--hide=<surface,...>] [flight.csv] [state_dir]".to_string(),
        );
    }

    let params = match positional.first() {
        Some(path) => FlightParameters::from_csv_file(Path::new(path))
            .map_err(|e| format!("Failed to load flight from {}: {}", path, e))?,
        None => FlightParameters::default(),
    };

    let state_dir = match positional.get(1) {
        Some(path) => PathBuf::from(path),
        None => default_state_dir(),
    };

    let logger = Logger::new(&state_dir, LOG_NAME, true).map_err(|e| {
        format!(
            "Failed to use state directory {}: {}",
            state_dir.display(),
            e
        )
    })?;
    logger
        .info(
            &format!("Session log at {}", logger.path().display()),
            Color::Blue,
        )
        .map_err(|e| e.to_string())?;

    let mut settings = Settings::new(params, state_dir);
    settings.hidden_surfaces = hidden_surfaces;

    graphical_interface::run(settings, Some(logger)).map_err(|e| e.to_string())
}

/// Separates `--hide=` options from positional arguments.
fn split_args(args: &[String]) -> Result<(Vec<SurfaceId>, Vec<&String>), String> {
    let mut hidden = Vec::new();
    let mut positional = Vec::new();

    for arg in args {
        match arg.strip_prefix(HIDE_FLAG) {
            Some(names) => {
                for name in names.split(',').filter(|n| !n.trim().is_empty()) {
                    let id = SurfaceId::from_name(name)
                        .ok_or_else(|| format!("Unknown surface: {}", name))?;
                    hidden.push(id);
                }
            }
            None => positional.push(arg),
        }
    }

    Ok((hidden, positional))
}

fn default_state_dir() -> PathBuf {
    match env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(STATE_DIR_NAME),
        None => PathBuf::from(".").join(STATE_DIR_NAME),
    }
}
