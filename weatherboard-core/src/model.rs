use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// One weather condition as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Category name, e.g. "Clear" or "Rain".
    pub category: String,
    /// Provider icon code, e.g. "01d". Night codes end in `n`.
    pub icon: String,
    pub description: String,
}

impl Condition {
    pub fn is_night(&self) -> bool {
        self.icon.ends_with('n')
    }
}

/// Current conditions for the searched city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location_name: String,
    pub coordinates: Coordinates,
    /// Observation time, unix seconds (UTC).
    pub timestamp: i64,
    /// Seconds to add to UTC to get the location's local time.
    pub utc_offset: i64,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub condition: Option<Condition>,
}

/// A single 3-hour forecast step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub timestamp: i64,
    pub temperature_c: f64,
    /// Probability of precipitation, 0.0..=1.0.
    pub pop: f64,
    pub condition: Option<Condition>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Forecast {
    pub samples: Vec<ForecastSample>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyDisplayItem {
    pub timestamp: i64,
    /// e.g. "3:00 PM"
    pub label: String,
    pub temperature: i64,
    pub condition: Option<Condition>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    /// "Today" or a weekday abbreviation.
    pub label: String,
    pub min_temp_c: f64,
    pub max_temp_c: f64,
    /// Average precipitation probability in percent.
    pub pop_pct: u8,
    pub condition: Option<Condition>,
}

/// Result of one successful fetch cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub current: CurrentConditions,
    pub forecast: Forecast,
}
