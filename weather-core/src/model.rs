use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Provider layout of `dt_txt`, e.g. `2024-05-01 12:00:00`.
pub const DT_TXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current weather snapshot for one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location_name: String,
    pub country: String,
    /// Primary category as reported by the provider ("Clear", "Clouds", ...).
    pub condition: String,
    pub description: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    /// Epoch seconds.
    pub sunrise: i64,
    /// Epoch seconds.
    pub sunset: i64,
}

/// One entry of the 3-hour forecast series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub dt: i64,
    pub dt_txt: String,
    pub condition: String,
    pub temperature_c: f64,
}

impl ForecastSample {
    /// Time-of-day part of `dt_txt` (`"12:00:00"`), if the stamp has one.
    pub fn time_of_day(&self) -> Option<&str> {
        self.dt_txt.split_once(' ').map(|(_, time)| time.trim())
    }

    pub fn local_datetime(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.dt_txt, DT_TXT_FORMAT).ok()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.local_datetime().map(|dt| dt.date())
    }
}

/// Daily forecast belonging to one query.
///
/// `generation` identifies the query that produced the samples; a series is
/// only shown next to the current conditions of the same generation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastSeries {
    pub generation: u64,
    pub samples: Vec<ForecastSample>,
}

impl ForecastSeries {
    pub fn new(generation: u64, samples: Vec<ForecastSample>) -> Self {
        Self { generation, samples }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Samples in reverse chronological order, latest day first.
    pub fn latest_first(&self) -> impl Iterator<Item = &ForecastSample> {
        self.samples.iter().rev()
    }
}
