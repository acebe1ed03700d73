use egui::{Color32, RichText};
use flight_model::{FlightParameters, SurfaceId, Surfaces};

const ACCENT: Color32 = Color32::from_rgb(0, 150, 255);
const STATUS_GREEN: Color32 = Color32::from_rgb(0, 255, 0);

/// Rows of the details grid: label and the surface that fills it.
const DETAIL_ROWS: [(&str, SurfaceId); 7] = [
    ("Elapsed:", SurfaceId::Elapsed),
    ("Remaining:", SurfaceId::Remaining),
    ("Total:", SurfaceId::Total),
    ("Arrives in:", SurfaceId::Countdown),
    ("Flown (mi):", SurfaceId::DistanceFlown),
    ("To go (mi):", SurfaceId::DistanceRemaining),
    ("Airspeed:", SurfaceId::Airspeed),
];

/// Header, progress bar and flight details. Only surfaces that exist are drawn.
pub struct WidgetProgress;

impl WidgetProgress {
    pub fn show(ui: &mut egui::Ui, params: &FlightParameters, surfaces: &Surfaces) {
        ui.visuals_mut().override_text_color = Some(Color32::WHITE);

        if !params.origin.is_empty() || !params.destination.is_empty() {
            ui.label(
                RichText::new(format!("{} → {}", params.origin, params.destination))
                    .strong()
                    .size(28.0)
                    .color(ACCENT),
            );
        }

        if let Some(status) = surfaces.text(SurfaceId::Status) {
            ui.label(
                RichText::new(format!("Status: {}", status))
                    .size(18.0)
                    .color(STATUS_GREEN),
            );
        }
        ui.separator();

        ui.horizontal(|ui| {
            if let Some(percentage) = surfaces.text(SurfaceId::Percentage) {
                ui.label(RichText::new(percentage).strong().size(32.0));
            }
            if let Some(ticker) = surfaces.text(SurfaceId::Ticker) {
                ui.label(RichText::new(ticker).monospace().size(16.0));
            }
        });

        if let Some(fraction) = surfaces.fraction(SurfaceId::ProgressBar) {
            ui.add(
                egui::ProgressBar::new(fraction as f32)
                    .desired_height(14.0)
                    .fill(ACCENT),
            );
        }
        ui.add_space(10.0);

        egui::Grid::new("flight_details")
            .num_columns(2)
            .spacing([24.0, 6.0])
            .show(ui, |ui| {
                for (label, id) in DETAIL_ROWS {
                    if let Some(text) = surfaces.text(id) {
                        ui.label(RichText::new(label).size(16.0).strong());
                        ui.label(RichText::new(text).size(16.0));
                        ui.end_row();
                    }
                }
            });
    }
}
