//! Time, distance and airspeed model behind the flight progress display, plus the
//! one-shot arrival celebration and the music player protocol.

pub mod format;
pub mod types;

pub use types::*;
