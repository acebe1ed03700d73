use std::{fs::File, io::Read, path::Path};

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::Deserialize;

use super::model_error::ModelError;

/// Format used for timestamps in flight configuration files. Values are read as UTC.
pub const DATETIME_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

const DEFAULT_DEPARTURE_TIMESTAMP: i64 = 1_792_389_600;
const DEFAULT_DURATION_MINUTES: i64 = 12 * 60 + 18;
const DEFAULT_DISTANCE_MILES: f64 = 1171.0 + 5513.0;

/// The constant description of the flight being displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightParameters {
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
    pub total_distance: f64,
    pub status: String,
    pub origin: String,
    pub destination: String,
}

/// One row of a flight configuration CSV.
#[derive(Debug, Deserialize)]
struct FlightRecord {
    departure: String,
    arrival: String,
    distance: f64,
    status: String,
    #[serde(default)]
    origin: String,
    #[serde(default)]
    destination: String,
}

impl Default for FlightParameters {
    fn default() -> Self {
        let departure = DateTime::<Utc>::from_timestamp(DEFAULT_DEPARTURE_TIMESTAMP, 0)
            .unwrap_or_default();
        Self {
            departure,
            arrival: departure + Duration::minutes(DEFAULT_DURATION_MINUTES),
            total_distance: DEFAULT_DISTANCE_MILES,
            status: "On time".to_string(),
            origin: "EZE".to_string(),
            destination: "MAD".to_string(),
        }
    }
}

impl FlightParameters {
    /// Creates flight parameters from explicit values.
    pub fn new(
        departure: DateTime<Utc>,
        arrival: DateTime<Utc>,
        total_distance: f64,
        status: &str,
    ) -> Self {
        Self {
            departure,
            arrival,
            total_distance,
            status: status.to_string(),
            origin: String::new(),
            destination: String::new(),
        }
    }

    /// Loads the first flight of a CSV file with the header
    /// `departure,arrival,distance,status,origin,destination`.
    pub fn from_csv_file(path: &Path) -> Result<Self, ModelError> {
        let file = File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Same as [`FlightParameters::from_csv_file`] but reads from any source.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, ModelError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let record: FlightRecord = csv_reader
            .deserialize()
            .next()
            .ok_or(ModelError::MissingFlightRecord)??;

        if !record.distance.is_finite() || record.distance < 0.0 {
            return Err(ModelError::InvalidDistance(record.distance.to_string()));
        }

        Ok(Self {
            departure: parse_datetime(&record.departure)?,
            arrival: parse_datetime(&record.arrival)?,
            total_distance: record.distance,
            status: record.status,
            origin: record.origin,
            destination: record.destination,
        })
    }

    /// True when the arrival is not strictly after the departure.
    pub fn is_degenerate(&self) -> bool {
        self.arrival <= self.departure
    }
}

/// Parses a `%d-%m-%Y %H:%M:%S` timestamp as UTC.
pub fn parse_datetime(datetime_str: &str) -> Result<DateTime<Utc>, ModelError> {
    NaiveDateTime::parse_from_str(datetime_str.trim(), DATETIME_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| ModelError::InvalidDateFormat(datetime_str.to_string()))
}
