use std::path::PathBuf;

use app::ProgressApp;
use flight_model::{FlightParameters, Playlist, SurfaceId};
use logger::Logger;

mod app;
mod log;
mod widgets;

/// Everything the display needs to know before it opens.
#[derive(Debug, Clone)]
pub struct Settings {
    pub params: FlightParameters,
    /// Surfaces left out of the layout.
    pub hidden_surfaces: Vec<SurfaceId>,
    /// Where the arrival flag is persisted.
    pub state_dir: PathBuf,
    pub playlist: Playlist,
}

impl Settings {
    pub fn new(params: FlightParameters, state_dir: PathBuf) -> Self {
        Self {
            params,
            hidden_surfaces: Vec::new(),
            state_dir,
            playlist: Playlist::default(),
        }
    }
}

pub fn run(settings: Settings, logger: Option<Logger>) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Flight Progress")
            .with_inner_size([900.0, 640.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Flight Progress",
        options,
        Box::new(|cc| {
            Ok(Box::new(ProgressApp::new(
                cc.egui_ctx.clone(),
                settings,
                logger,
            )))
        }),
    )
}
