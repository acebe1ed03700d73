mod confetti;
mod music;
mod progress;
mod route;
pub use confetti::ConfettiOverlay;
pub use music::WidgetMusic;
pub use progress::WidgetProgress;
pub use route::WidgetRoute;
