use egui::RichText;
use flight_model::{MusicPlayer, PlayerBridge, Playlist};
use logger::Color;

use crate::log::AppLog;

/// Opens the player in the system browser and keeps the last command sent to it.
struct BrowserBridge {
    ctx: egui::Context,
    log: AppLog,
    last_message: Option<String>,
}

impl PlayerBridge for BrowserBridge {
    fn launch(&mut self, url: &str) {
        self.log.info(&format!("Opening player: {}", url), Color::Cyan);
        self.ctx.open_url(egui::OpenUrl::new_tab(url));
    }

    fn post(&mut self, message: &str) {
        self.log.info(&format!("Player command: {}", message), Color::Cyan);
        self.last_message = Some(message.to_string());
    }
}

/// Floating toggle button plus the small "In-flight music" window.
pub struct WidgetMusic {
    player: MusicPlayer,
    bridge: BrowserBridge,
}

impl WidgetMusic {
    pub fn new(ctx: egui::Context, playlist: Playlist, log: AppLog) -> Self {
        Self {
            player: MusicPlayer::new(playlist),
            bridge: BrowserBridge {
                ctx,
                log,
                last_message: None,
            },
        }
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        let mut opened_now = false;

        let toggle_rect = egui::Area::new("music_button".into())
            .anchor(egui::Align2::RIGHT_BOTTOM, [-10.0, -10.0])
            .show(ctx, |ui| {
                let label = if self.player.is_open() {
                    "Hide music"
                } else {
                    "♫ Music"
                };
                let button =
                    ui.add_sized([120.0, 44.0], egui::Button::new(label).rounding(10.0));
                if button.clicked() {
                    if self.player.is_open() {
                        self.player.close();
                    } else if self.player.open(&mut self.bridge) {
                        opened_now = true;
                    } else {
                        self.bridge.log.warn("Playlist is empty, nothing to play.");
                    }
                }
                button.rect
            })
            .inner;

        if !self.player.is_open() {
            return;
        }

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.player.close();
            return;
        }

        let mut is_open = true;
        let response = egui::Window::new("In-flight music")
            .open(&mut is_open)
            .anchor(egui::Align2::RIGHT_BOTTOM, [-10.0, -64.0])
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                ui.label("Playing in your browser.");
                if let Some(message) = &self.bridge.last_message {
                    ui.label(RichText::new(message).monospace().small().weak());
                }
                ui.add_space(6.0);

                let toggle = if self.player.is_muted() {
                    "Unmute"
                } else {
                    "Mute"
                };
                if ui
                    .add_sized([100.0, 30.0], egui::Button::new(toggle).rounding(10.0))
                    .clicked()
                {
                    if let Err(e) = self.player.toggle_mute(&mut self.bridge) {
                        self.bridge.log.error(&format!("Player command failed: {}", e));
                    }
                }
            });

        if !is_open {
            self.player.close();
            return;
        }

        // A press outside the window closes it. Presses on the toggle button are
        // left to the button itself.
        if let Some(inner) = response {
            let clicked_outside = ctx.input(|i| {
                i.pointer.any_pressed()
                    && i.pointer.interact_pos().is_some_and(|pos| {
                        !inner.response.rect.contains(pos) && !toggle_rect.contains(pos)
                    })
            });
            if clicked_outside && !opened_now {
                self.player.close();
            }
        }
    }
}
