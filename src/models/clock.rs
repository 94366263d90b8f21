use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Both coordinates must be present to form a point.
    pub fn from_parts(lat: Option<f64>, lon: Option<f64>) -> Option<Self> {
        match (lat, lon) {
            (Some(lat), Some(lon)) => Some(Self { lat, lon }),
            _ => None,
        }
    }
}

/// One clock-in/out row per worker per day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClockEvent {
    pub id: i64,
    pub worker_id: i64,
    pub worker_name: String,
    pub date: NaiveDate,                // day of the clock-in (or of the orphan clock-out)
    pub entry_time: Option<NaiveTime>,
    pub exit_time: Option<NaiveTime>,
    pub entry_location: Option<GeoPoint>,
    pub exit_location: Option<GeoPoint>,
    pub worked_hours: f64,
    pub overtime_hours: f64,
}

impl ClockEvent {
    pub fn clock_in(
        worker_id: i64,
        worker_name: &str,
        date: NaiveDate,
        time: NaiveTime,
        location: Option<GeoPoint>,
    ) -> Self {
        Self {
            id: 0,
            worker_id,
            worker_name: worker_name.to_string(),
            date,
            entry_time: Some(time),
            exit_time: None,
            entry_location: location,
            exit_location: None,
            worked_hours: 0.0,
            overtime_hours: 0.0,
        }
    }

    /// Entry recorded, exit still missing.
    pub fn is_open(&self) -> bool {
        self.entry_time.is_some() && self.exit_time.is_none()
    }
}
