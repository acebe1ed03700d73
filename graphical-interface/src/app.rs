use std::{
    path::Path,
    time::{Duration, Instant},
};

use chrono::Utc;
use egui::Context;
use egui_extras::install_image_loaders;
use flight_model::{
    ArrivalGate, FileFlagStore, FlightPath, FlightTracker, GateDecision, ModelError, Phase,
    Surfaces, TickReport, TimeSnapshot, TICK_PERIOD,
};
use logger::{Color, Logger};

use crate::{
    log::AppLog,
    widgets::{ConfettiOverlay, WidgetMusic, WidgetProgress, WidgetRoute},
    Settings,
};

/// The flight progress window: runs the render loop, the one-time arrival
/// celebration and the music widget.
pub struct ProgressApp {
    tracker: FlightTracker,
    log: AppLog,
    pending_celebration: Option<Instant>,
    confetti: ConfettiOverlay,
    music: WidgetMusic,
    /// Airspeed phase of the last tick, `None` while unavailable.
    phase: Option<Phase>,
}

impl ProgressApp {
    pub fn new(egui_ctx: Context, settings: Settings, logger: Option<Logger>) -> Self {
        install_image_loaders(&egui_ctx);
        let log = AppLog::new(logger);

        let Settings {
            params,
            hidden_surfaces,
            state_dir,
            playlist,
        } = settings;

        log.info(
            &format!(
                "Tracking {} -> {}, departing {} and arriving {}.",
                params.origin, params.destination, params.departure, params.arrival
            ),
            Color::Green,
        );
        if params.is_degenerate() {
            log.warn("Arrival is not after departure, the flight counts as complete.");
        }

        let mut tracker = FlightTracker::new(
            params,
            FlightPath::default(),
            Surfaces::without(&hidden_surfaces),
        );
        let now = Utc::now();
        let report = tracker.start(Instant::now(), now);
        if !report.skipped.is_empty() {
            let names: Vec<&str> = report.skipped.iter().map(|id| id.as_str()).collect();
            log.warn(&format!("Surfaces not shown: {}.", names.join(", ")));
        }

        let snapshot = tracker.snapshot(now);
        let pending_celebration = match check_arrival(&state_dir, &snapshot) {
            Ok(GateDecision::Fire { delay }) => {
                log.info("Flight has arrived, celebrating.", Color::Magenta);
                Some(Instant::now() + delay)
            }
            Ok(GateDecision::Skip) => None,
            Err(e) => {
                log.error(&format!("Arrival flag unavailable, skipping celebration: {}", e));
                None
            }
        };

        let mut app = Self {
            music: WidgetMusic::new(egui_ctx, playlist, log.clone()),
            tracker,
            log,
            pending_celebration,
            confetti: ConfettiOverlay::default(),
            phase: None,
        };
        app.on_tick(&report);
        app
    }

    fn on_tick(&mut self, report: &TickReport) {
        let phase = report.frame.airspeed.phase();
        match (self.phase, phase) {
            (Some(_), None) => self.log.warn("Airspeed unavailable, showing placeholder."),
            (previous, Some(current)) if previous != Some(current) => self.log.info(
                &format!("Airspeed model entering {} phase.", current.as_str()),
                Color::Yellow,
            ),
            _ => {}
        }
        self.phase = phase;
    }

    fn next_repaint(&self, now: Instant) -> Duration {
        let tick = self
            .tracker
            .time_until_next_tick(now)
            .unwrap_or(TICK_PERIOD);
        match self.pending_celebration {
            Some(at) => tick.min(at.saturating_duration_since(now)),
            None => tick,
        }
    }
}

fn check_arrival(state_dir: &Path, snapshot: &TimeSnapshot) -> Result<GateDecision, ModelError> {
    let mut store = FileFlagStore::new(state_dir)?;
    ArrivalGate::default().check(snapshot, &mut store)
}

impl eframe::App for ProgressApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        if let Some(report) = self.tracker.poll(now, Utc::now()) {
            self.on_tick(&report);
        }

        if self.pending_celebration.is_some_and(|at| now >= at) {
            self.pending_celebration = None;
            self.confetti.launch(&mut rand::thread_rng(), ctx.screen_rect());
        }

        let rimless = egui::Frame {
            fill: ctx.style().visuals.panel_fill,
            inner_margin: egui::Margin::same(24.0),
            ..Default::default()
        };

        egui::CentralPanel::default()
            .frame(rimless)
            .show(ctx, |ui| {
                let surfaces = self.tracker.surfaces();
                WidgetProgress::show(ui, self.tracker.params(), surfaces);
                ui.add_space(16.0);

                let (progress, arrived) = match self.tracker.last_frame() {
                    Some(frame) => (frame.progress, frame.snapshot.is_arrived()),
                    None => (0.0, false),
                };
                WidgetRoute::show(
                    ui,
                    self.tracker.path(),
                    progress,
                    surfaces.marker(),
                    arrived,
                );
            });

        self.music.show(ctx);
        self.confetti.show(ctx);

        if self.confetti.is_active() {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(self.next_repaint(Instant::now()));
        }
    }
}
