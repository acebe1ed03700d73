use std::fmt;

/// Conversion factor from miles per hour to kilometres per hour.
pub const KMH_PER_MPH: f64 = 1.60934;

const CLIMB_END: f64 = 0.08;
const DESCENT_START: f64 = 0.92;

const TAKEOFF_SPEED: f64 = 200.0;
const TOP_OF_CLIMB_SPEED: f64 = 575.0;
const CRUISE_SPEED: f64 = 570.0;
const TAILWIND_BOOST: f64 = 8.0;
const TOUCHDOWN_SPEED: f64 = 180.0;

const PLACEHOLDER_ROTATION_MS: i64 = 15_000;
const PLACEHOLDERS: [&str; 4] = [
    "Checking the winds aloft...",
    "Waiting for cockpit telemetry...",
    "Airspeed indicator warming up...",
    "Asking the captain how fast we're going...",
];

/// Segment of the flight the airspeed model is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Climb,
    Cruise,
    Descent,
}

impl Phase {
    /// Phase for a progress fraction. Boundaries belong to the later phase.
    pub fn of(progress: f64) -> Phase {
        if progress < CLIMB_END {
            Phase::Climb
        } else if progress < DESCENT_START {
            Phase::Cruise
        } else {
            Phase::Descent
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Climb => "climb",
            Phase::Cruise => "cruise",
            Phase::Descent => "descent",
        }
    }
}

/// A synthetic airspeed reading, or the lack of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirspeedSample {
    Available { mph: i64, kmh: i64, phase: Phase },
    Unavailable,
}

impl AirspeedSample {
    pub fn phase(&self) -> Option<Phase> {
        match self {
            AirspeedSample::Available { phase, .. } => Some(*phase),
            AirspeedSample::Unavailable => None,
        }
    }

    pub fn mph(&self) -> Option<i64> {
        match self {
            AirspeedSample::Available { mph, .. } => Some(*mph),
            AirspeedSample::Unavailable => None,
        }
    }
}

impl fmt::Display for AirspeedSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AirspeedSample::Available { mph, kmh, .. } => write!(f, "{} mph · {} km/h", mph, kmh),
            AirspeedSample::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// Computes the decorative airspeed for a progress fraction in `[0, 1]`.
///
/// Climb ramps from 200 to 575 mph, cruise holds 570 mph (578 mph between 30% and 70%),
/// descent ramps from 575 down to 180 mph. Each phase adds a small sinusoidal wobble
/// driven by the elapsed seconds. Inputs the model cannot handle give `Unavailable`.
pub fn airspeed(progress: f64, elapsed_seconds: i64) -> AirspeedSample {
    if !progress.is_finite() || !(0.0..=1.0).contains(&progress) {
        return AirspeedSample::Unavailable;
    }

    let elapsed = elapsed_seconds as f64;
    let phase = Phase::of(progress);

    let mph = match phase {
        Phase::Climb => {
            let t = progress / CLIMB_END;
            TAKEOFF_SPEED + (TOP_OF_CLIMB_SPEED - TAKEOFF_SPEED) * t + 5.0 * (elapsed / 30.0).sin()
        }
        Phase::Cruise => {
            let boost = if progress > 0.3 && progress < 0.7 {
                TAILWIND_BOOST
            } else {
                0.0
            };
            CRUISE_SPEED + boost + 7.0 * (elapsed / 45.0).sin()
        }
        Phase::Descent => {
            let t = ((progress - DESCENT_START) / (1.0 - DESCENT_START)).min(1.0);
            // The wobble fades out so the reading settles on touchdown speed.
            let wobble = 4.0 * (elapsed / 25.0).sin() * (1.0 - t);
            (TOP_OF_CLIMB_SPEED - (TOP_OF_CLIMB_SPEED - TOUCHDOWN_SPEED) * t + wobble)
                .max(TOUCHDOWN_SPEED)
        }
    };

    if !mph.is_finite() {
        return AirspeedSample::Unavailable;
    }

    let mph = mph.round();
    AirspeedSample::Available {
        mph: mph as i64,
        kmh: (mph * KMH_PER_MPH).round() as i64,
        phase,
    }
}

/// Message shown instead of an unavailable airspeed.
/// Rotates every 15 seconds of wall-clock time.
pub fn placeholder(wall_clock_ms: i64) -> &'static str {
    let slot = wall_clock_ms.div_euclid(PLACEHOLDER_ROTATION_MS);
    PLACEHOLDERS[slot.rem_euclid(PLACEHOLDERS.len() as i64) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mph_at(progress: f64, elapsed: i64) -> i64 {
        airspeed(progress, elapsed).mph().unwrap()
    }

    #[test]
    fn test_phase_boundaries() {
        assert_eq!(Phase::of(0.0), Phase::Climb);
        assert_eq!(Phase::of(0.0799), Phase::Climb);
        assert_eq!(Phase::of(0.08), Phase::Cruise);
        assert_eq!(Phase::of(0.9199), Phase::Cruise);
        assert_eq!(Phase::of(0.92), Phase::Descent);
        assert_eq!(Phase::of(1.0), Phase::Descent);
    }

    #[test]
    fn test_sample_reports_its_phase() {
        assert_eq!(airspeed(0.01, 0).phase(), Some(Phase::Climb));
        assert_eq!(airspeed(0.95, 0).phase(), Some(Phase::Descent));
        assert_eq!(airspeed(f64::NAN, 0).phase(), None);
        assert_eq!(Phase::Cruise.as_str(), "cruise");
    }

    #[test]
    fn test_takeoff_speed_bounds() {
        for elapsed in 0..2_000 {
            let mph = mph_at(0.0, elapsed);
            assert!((195..=205).contains(&mph), "{} mph at {}s", mph, elapsed);
        }
    }

    #[test]
    fn test_cruise_with_tailwind_bounds() {
        for elapsed in 0..2_000 {
            let mph = mph_at(0.5, elapsed);
            assert!((571..=585).contains(&mph), "{} mph at {}s", mph, elapsed);
        }
    }

    #[test]
    fn test_cruise_without_tailwind_bounds() {
        for elapsed in 0..2_000 {
            let mph = mph_at(0.2, elapsed);
            assert!((563..=577).contains(&mph));
        }
    }

    #[test]
    fn test_touchdown_is_exactly_floor_speed() {
        for elapsed in 0..2_000 {
            assert_eq!(mph_at(1.0, elapsed), 180);
        }
    }

    #[test]
    fn test_descent_never_below_floor() {
        for step in 0..=80 {
            let progress = 0.92 + step as f64 * 0.001;
            for elapsed in (0..600).step_by(7) {
                assert!(mph_at(progress.min(1.0), elapsed) >= 180);
            }
        }
    }

    #[test]
    fn test_kmh_is_derived_from_rounded_mph() {
        let sample = airspeed(0.2, 0);
        assert_eq!(
            sample,
            AirspeedSample::Available {
                mph: 570,
                kmh: 917,
                phase: Phase::Cruise
            }
        );
        assert_eq!(sample.to_string(), "570 mph · 917 km/h");
    }

    #[test]
    fn test_faulty_inputs_are_unavailable() {
        assert_eq!(airspeed(f64::NAN, 10), AirspeedSample::Unavailable);
        assert_eq!(airspeed(f64::INFINITY, 10), AirspeedSample::Unavailable);
        assert_eq!(airspeed(-0.1, 10), AirspeedSample::Unavailable);
        assert_eq!(airspeed(1.5, 10), AirspeedSample::Unavailable);
        assert_eq!(AirspeedSample::Unavailable.phase(), None);
    }

    #[test]
    fn test_placeholder_rotates_every_fifteen_seconds() {
        assert_eq!(placeholder(0), PLACEHOLDERS[0]);
        assert_eq!(placeholder(14_999), PLACEHOLDERS[0]);
        assert_eq!(placeholder(15_000), PLACEHOLDERS[1]);
        assert_eq!(placeholder(15_000 * 4), PLACEHOLDERS[0]);
        assert_eq!(placeholder(-1), PLACEHOLDERS[3]);
    }
}
