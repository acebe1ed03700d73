use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use chrono::{DateTime, Utc};

use crate::format::{to_clock, to_grouped_number, to_hms, to_hours_minutes, to_percent};

use super::{
    airspeed::{airspeed, placeholder, AirspeedSample},
    flight_parameters::FlightParameters,
    flight_path::{FlightPath, MarkerPose},
    time_snapshot::TimeSnapshot,
    timer::RepeatingTask,
};

/// Period of the render loop.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Named places where the display shows a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceId {
    Percentage,
    ProgressBar,
    Ticker,
    Elapsed,
    Remaining,
    Total,
    Countdown,
    DistanceFlown,
    DistanceRemaining,
    Status,
    Airspeed,
    Marker,
}

impl SurfaceId {
    pub const ALL: [SurfaceId; 12] = [
        SurfaceId::Percentage,
        SurfaceId::ProgressBar,
        SurfaceId::Ticker,
        SurfaceId::Elapsed,
        SurfaceId::Remaining,
        SurfaceId::Total,
        SurfaceId::Countdown,
        SurfaceId::DistanceFlown,
        SurfaceId::DistanceRemaining,
        SurfaceId::Status,
        SurfaceId::Airspeed,
        SurfaceId::Marker,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SurfaceId::Percentage => "percentage",
            SurfaceId::ProgressBar => "progress-bar",
            SurfaceId::Ticker => "ticker",
            SurfaceId::Elapsed => "elapsed",
            SurfaceId::Remaining => "remaining",
            SurfaceId::Total => "total",
            SurfaceId::Countdown => "countdown",
            SurfaceId::DistanceFlown => "distance-flown",
            SurfaceId::DistanceRemaining => "distance-remaining",
            SurfaceId::Status => "status",
            SurfaceId::Airspeed => "airspeed",
            SurfaceId::Marker => "marker",
        }
    }

    pub fn from_name(name: &str) -> Option<SurfaceId> {
        let name = name.trim().to_lowercase();
        SurfaceId::ALL.into_iter().find(|id| id.as_str() == name)
    }
}

/// Value held by a surface.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceValue {
    Text(String),
    Fraction(f64),
    Marker(MarkerPose),
}

/// The set of surfaces the display actually has, with their current values.
/// Writes to a surface that is not present are dropped.
#[derive(Debug, Clone, Default)]
pub struct Surfaces {
    slots: HashMap<SurfaceId, Option<SurfaceValue>>,
}

impl Surfaces {
    /// Every known surface.
    pub fn all() -> Self {
        Self::with(&SurfaceId::ALL)
    }

    pub fn with(ids: &[SurfaceId]) -> Self {
        Self {
            slots: ids.iter().map(|id| (*id, None)).collect(),
        }
    }

    /// Every known surface except `hidden`.
    pub fn without(hidden: &[SurfaceId]) -> Self {
        let ids: Vec<SurfaceId> = SurfaceId::ALL
            .into_iter()
            .filter(|id| !hidden.contains(id))
            .collect();
        Self::with(&ids)
    }

    pub fn contains(&self, id: SurfaceId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Stores `value` if the surface exists. Returns whether it did.
    pub fn set(&mut self, id: SurfaceId, value: SurfaceValue) -> bool {
        match self.slots.get_mut(&id) {
            Some(slot) => {
                *slot = Some(value);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: SurfaceId) -> Option<&SurfaceValue> {
        self.slots.get(&id).and_then(|slot| slot.as_ref())
    }

    pub fn text(&self, id: SurfaceId) -> Option<&str> {
        match self.get(id) {
            Some(SurfaceValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn fraction(&self, id: SurfaceId) -> Option<f64> {
        match self.get(id) {
            Some(SurfaceValue::Fraction(fraction)) => Some(*fraction),
            _ => None,
        }
    }

    pub fn marker(&self) -> Option<MarkerPose> {
        match self.get(SurfaceId::Marker) {
            Some(SurfaceValue::Marker(pose)) => Some(*pose),
            _ => None,
        }
    }
}

/// Every value derived in one tick of the render loop.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayFrame {
    pub snapshot: TimeSnapshot,
    pub progress: f64,
    pub remaining: i64,
    pub distance_flown: f64,
    pub distance_remaining: f64,
    pub airspeed: AirspeedSample,
    pub marker: MarkerPose,
}

/// Outcome of one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub frame: DisplayFrame,
    /// Surfaces that were not present and got skipped.
    pub skipped: Vec<SurfaceId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
}

/// The render loop: recomputes the flight's derived values once per second and
/// writes them to the display surfaces.
pub struct FlightTracker {
    params: FlightParameters,
    path: FlightPath,
    surfaces: Surfaces,
    task: RepeatingTask,
    last_frame: Option<DisplayFrame>,
}

impl FlightTracker {
    pub fn new(params: FlightParameters, path: FlightPath, surfaces: Surfaces) -> Self {
        Self {
            params,
            path,
            surfaces,
            task: RepeatingTask::new(TICK_PERIOD),
            last_frame: None,
        }
    }

    /// Runs the first tick right away and arms the one-second cadence.
    pub fn start(&mut self, now: Instant, wall_clock: DateTime<Utc>) -> TickReport {
        let report = self.tick(wall_clock);
        self.task.start(now);
        report
    }

    /// Ticks if a period has passed since the last tick.
    pub fn poll(&mut self, now: Instant, wall_clock: DateTime<Utc>) -> Option<TickReport> {
        if self.task.poll(now) {
            Some(self.tick(wall_clock))
        } else {
            None
        }
    }

    /// Cancels the cadence. The last values stay on the surfaces.
    pub fn stop(&mut self) {
        self.task.stop();
    }

    pub fn state(&self) -> LoopState {
        if self.task.is_running() {
            LoopState::Running
        } else {
            LoopState::Idle
        }
    }

    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.task.time_until_due(now)
    }

    pub fn params(&self) -> &FlightParameters {
        &self.params
    }

    pub fn path(&self) -> &FlightPath {
        &self.path
    }

    pub fn surfaces(&self) -> &Surfaces {
        &self.surfaces
    }

    pub fn last_frame(&self) -> Option<&DisplayFrame> {
        self.last_frame.as_ref()
    }

    pub fn snapshot(&self, wall_clock: DateTime<Utc>) -> TimeSnapshot {
        TimeSnapshot::capture(wall_clock, self.params.departure, self.params.arrival)
    }

    /// Derives every display value at `wall_clock` without touching any surface.
    pub fn compute_frame(&self, wall_clock: DateTime<Utc>) -> DisplayFrame {
        let snapshot = self.snapshot(wall_clock);

        let progress = snapshot.progress();
        let remaining = snapshot.remaining();

        let distance_remaining = self.params.total_distance * (1.0 - progress);
        let distance_flown = self.params.total_distance - distance_remaining;

        DisplayFrame {
            snapshot,
            progress,
            remaining,
            distance_flown,
            distance_remaining,
            airspeed: airspeed(progress, snapshot.elapsed),
            marker: self.path.pose_at(progress),
        }
    }

    /// Recomputes the frame and pushes it to the surfaces.
    pub fn tick(&mut self, wall_clock: DateTime<Utc>) -> TickReport {
        let frame = self.compute_frame(wall_clock);
        let skipped = self.push(&frame, wall_clock.timestamp_millis());
        self.last_frame = Some(frame.clone());
        TickReport { frame, skipped }
    }

    fn push(&mut self, frame: &DisplayFrame, wall_clock_ms: i64) -> Vec<SurfaceId> {
        let updates = [
            (
                SurfaceId::Percentage,
                SurfaceValue::Text(to_percent(frame.progress)),
            ),
            (
                SurfaceId::ProgressBar,
                SurfaceValue::Fraction(frame.progress),
            ),
            (
                SurfaceId::Ticker,
                SurfaceValue::Text(format!("{} elapsed", to_clock(frame.snapshot.elapsed))),
            ),
            (
                SurfaceId::Elapsed,
                SurfaceValue::Text(to_hms(frame.snapshot.elapsed)),
            ),
            (
                SurfaceId::Remaining,
                SurfaceValue::Text(to_hms(frame.remaining)),
            ),
            (
                SurfaceId::Total,
                SurfaceValue::Text(to_hours_minutes(frame.snapshot.total)),
            ),
            (
                SurfaceId::Countdown,
                SurfaceValue::Text(to_hms(frame.remaining)),
            ),
            (
                SurfaceId::DistanceFlown,
                SurfaceValue::Text(to_grouped_number(frame.distance_flown)),
            ),
            (
                SurfaceId::DistanceRemaining,
                SurfaceValue::Text(to_grouped_number(frame.distance_remaining)),
            ),
            (
                SurfaceId::Status,
                SurfaceValue::Text(self.params.status.clone()),
            ),
            (
                SurfaceId::Airspeed,
                SurfaceValue::Text(airspeed_text(&frame.airspeed, wall_clock_ms)),
            ),
            (SurfaceId::Marker, SurfaceValue::Marker(frame.marker)),
        ];

        updates
            .into_iter()
            .filter_map(|(id, value)| (!self.surfaces.set(id, value)).then_some(id))
            .collect()
    }
}

/// Text for the airspeed surface, falling back to a rotating placeholder.
pub fn airspeed_text(sample: &AirspeedSample, wall_clock_ms: i64) -> String {
    match sample {
        AirspeedSample::Available { .. } => sample.to_string(),
        AirspeedSample::Unavailable => placeholder(wall_clock_ms).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::airspeed::Phase;
    use chrono::Duration as ChronoDuration;

    fn t0() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_750_000_000, 0).unwrap()
    }

    fn one_hour_flight() -> FlightParameters {
        FlightParameters::new(t0(), t0() + ChronoDuration::seconds(3600), 1000.0, "Cruising")
    }

    #[test]
    fn test_mid_flight_frame() {
        let tracker =
            FlightTracker::new(one_hour_flight(), FlightPath::default(), Surfaces::all());
        let frame = tracker.compute_frame(t0() + ChronoDuration::seconds(1800));

        assert_eq!(frame.progress, 0.5);
        assert_eq!(frame.remaining, 1800);
        assert_eq!(frame.distance_flown, 500.0);
        assert_eq!(frame.distance_remaining, 500.0);
        assert!(matches!(
            frame.airspeed,
            AirspeedSample::Available {
                phase: Phase::Cruise,
                ..
            }
        ));
    }

    #[test]
    fn test_tick_fills_every_surface() {
        let mut tracker =
            FlightTracker::new(one_hour_flight(), FlightPath::default(), Surfaces::all());
        let report = tracker.tick(t0() + ChronoDuration::seconds(1800));
        let surfaces = tracker.surfaces();

        assert!(report.skipped.is_empty());
        assert_eq!(surfaces.text(SurfaceId::Percentage), Some("50%"));
        assert_eq!(surfaces.fraction(SurfaceId::ProgressBar), Some(0.5));
        assert_eq!(surfaces.text(SurfaceId::Ticker), Some("00:30:00 elapsed"));
        assert_eq!(surfaces.text(SurfaceId::Elapsed), Some("0h 30m 00s"));
        assert_eq!(surfaces.text(SurfaceId::Remaining), Some("0h 30m 00s"));
        assert_eq!(surfaces.text(SurfaceId::Countdown), Some("0h 30m 00s"));
        assert_eq!(surfaces.text(SurfaceId::Total), Some("1h 00m"));
        assert_eq!(surfaces.text(SurfaceId::DistanceFlown), Some("500"));
        assert_eq!(surfaces.text(SurfaceId::DistanceRemaining), Some("500"));
        assert_eq!(surfaces.text(SurfaceId::Status), Some("Cruising"));
        assert!(surfaces.text(SurfaceId::Airspeed).unwrap().ends_with("km/h"));
        assert_eq!(surfaces.marker(), Some(FlightPath::default().pose_at(0.5)));
    }

    #[test]
    fn test_missing_surfaces_are_skipped() {
        let mut tracker = FlightTracker::new(
            one_hour_flight(),
            FlightPath::default(),
            Surfaces::without(&[SurfaceId::Airspeed, SurfaceId::Marker]),
        );
        let report = tracker.tick(t0() + ChronoDuration::seconds(60));

        assert_eq!(report.skipped, vec![SurfaceId::Airspeed, SurfaceId::Marker]);
        assert_eq!(tracker.surfaces().text(SurfaceId::Airspeed), None);
        assert_eq!(tracker.surfaces().text(SurfaceId::Percentage), Some("2%"));
    }

    #[test]
    fn test_zero_length_flight_is_complete() {
        let arrival = t0() - ChronoDuration::seconds(10);
        let params = FlightParameters::new(t0(), arrival, 800.0, "Landed");
        let mut tracker = FlightTracker::new(params, FlightPath::default(), Surfaces::all());
        let report = tracker.tick(t0());

        assert_eq!(report.frame.progress, 1.0);
        assert_eq!(report.frame.distance_flown, 800.0);
        assert_eq!(tracker.surfaces().text(SurfaceId::Percentage), Some("100%"));
        assert_eq!(report.frame.airspeed.mph(), Some(180));
    }

    #[test]
    fn test_distances_sum_to_total() {
        let arrival = t0() + ChronoDuration::seconds(44_280);
        let params = FlightParameters::new(t0(), arrival, 6684.0, "");
        let tracker = FlightTracker::new(params, FlightPath::default(), Surfaces::all());

        for step in 0..=100 {
            let now = t0() + ChronoDuration::seconds(step * 443);
            let frame = tracker.compute_frame(now);
            assert!((frame.distance_flown + frame.distance_remaining - 6684.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_start_ticks_immediately_then_every_second() {
        let start = Instant::now();
        let mut tracker =
            FlightTracker::new(one_hour_flight(), FlightPath::default(), Surfaces::all());
        assert_eq!(tracker.state(), LoopState::Idle);
        assert!(tracker.poll(start, t0()).is_none());

        let first = tracker.start(start, t0() + ChronoDuration::seconds(10));
        assert_eq!(tracker.state(), LoopState::Running);
        assert_eq!(first.frame.snapshot.elapsed, 10);

        assert!(tracker.poll(start + Duration::from_millis(500), t0()).is_none());
        let second = tracker
            .poll(start + TICK_PERIOD, t0() + ChronoDuration::seconds(11))
            .unwrap();
        assert_eq!(second.frame.snapshot.elapsed, 11);
        assert_eq!(tracker.last_frame(), Some(&second.frame));

        tracker.stop();
        assert_eq!(tracker.state(), LoopState::Idle);
        assert!(tracker.poll(start + TICK_PERIOD * 5, t0()).is_none());
    }

    #[test]
    fn test_airspeed_text_fallback() {
        assert_eq!(
            airspeed_text(&AirspeedSample::Unavailable, 0),
            placeholder(0).to_string()
        );
        assert_ne!(
            airspeed_text(&AirspeedSample::Unavailable, 0),
            airspeed_text(&AirspeedSample::Unavailable, 15_000)
        );
    }

    #[test]
    fn test_surface_names_round_trip() {
        for id in SurfaceId::ALL {
            assert_eq!(SurfaceId::from_name(id.as_str()), Some(id));
        }
        assert_eq!(SurfaceId::from_name(" Airspeed "), Some(SurfaceId::Airspeed));
        assert_eq!(SurfaceId::from_name("cabin-pressure"), None);
    }
}
