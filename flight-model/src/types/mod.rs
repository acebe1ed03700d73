mod model_error;
pub use model_error::ModelError;

mod flight_parameters;
pub use flight_parameters::{parse_datetime, FlightParameters, DATETIME_FORMAT};

mod time_snapshot;
pub use time_snapshot::TimeSnapshot;

mod airspeed;
pub use airspeed::{airspeed, placeholder, AirspeedSample, Phase, KMH_PER_MPH};

mod flight_path;
pub use flight_path::{CubicSegment, FlightPath, MarkerPose, Point};

mod confetti;
pub use confetti::{
    heart_outline, star_points, Confetti, Particle, ParticleShape, BATCH_SIZE, PALETTE,
};

mod arrival_gate;
pub use arrival_gate::{
    ArrivalGate, FileFlagStore, FlagStore, GateDecision, MemoryFlagStore, ARRIVAL_FLAG_KEY,
    CELEBRATION_DELAY,
};

mod timer;
pub use timer::RepeatingTask;

mod tracker;
pub use tracker::{
    airspeed_text, DisplayFrame, FlightTracker, LoopState, SurfaceId, SurfaceValue, Surfaces,
    TickReport, TICK_PERIOD,
};

mod player;
pub use player::{MusicPlayer, PlayerBridge, PlayerCommand, Playlist, DEFAULT_VIDEO_IDS};
