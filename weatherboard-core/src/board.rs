use serde::Serialize;

use crate::{
    aggregate::{daily_summaries, day_key, local_date_line, pop_percent, upcoming_hours},
    icon::resolve_icon,
    model::{Condition, CurrentConditions, DailySummary, Forecast, HourlyDisplayItem},
};

/// Everything the dashboard shows for one city, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Board {
    pub location_name: String,
    /// e.g. `2024.05.01 Wed`, location-local.
    pub date_line: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_kmh: f64,
    /// Precipitation chance of the first forecast step.
    pub chance_of_rain_pct: u8,
    pub condition: Option<Condition>,
    pub icon: &'static str,
    pub hourly: Vec<HourlyDisplayItem>,
    pub daily: Vec<DailySummary>,
}

impl Board {
    pub fn build(current: &CurrentConditions, forecast: &Forecast) -> Self {
        let chance_of_rain_pct = forecast.samples.first().map(|s| pop_percent(s.pop)).unwrap_or(0);

        Self {
            location_name: current.location_name.clone(),
            date_line: local_date_line(current.timestamp, current.utc_offset),
            temperature_c: current.temperature_c,
            feels_like_c: current.feels_like_c,
            humidity_pct: current.humidity_pct,
            wind_kmh: current.wind_speed_mps * 3.6,
            chance_of_rain_pct,
            condition: current.condition.clone(),
            icon: resolve_icon(current.condition.as_ref()),
            hourly: upcoming_hours(current.timestamp, current.utc_offset, &forecast.samples),
            daily: daily_summaries(&forecast.samples, day_key(current.timestamp)),
        }
    }
}
