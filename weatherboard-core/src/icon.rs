//! Mapping from provider conditions to weather-icons class names.

use crate::model::Condition;

/// Shown for unknown categories or when no condition is available.
pub const NOT_AVAILABLE: &str = "wi-na";

/// Resolve the display icon for a condition. Never fails.
pub fn resolve_icon(condition: Option<&Condition>) -> &'static str {
    let Some(condition) = condition else {
        return NOT_AVAILABLE;
    };
    icon_for(&condition.category, condition.is_night())
}

fn icon_for(category: &str, night: bool) -> &'static str {
    let pick = |night_icon, day_icon| if night { night_icon } else { day_icon };

    match category {
        "Clear" => pick("wi-night-clear", "wi-day-sunny"),
        "Clouds" => pick("wi-night-alt-cloudy", "wi-cloudy"),
        "Rain" => pick("wi-night-alt-rain", "wi-day-rain"),
        "Drizzle" => pick("wi-night-alt-sprinkle", "wi-day-sprinkle"),
        "Snow" => pick("wi-night-alt-snow", "wi-day-snow"),
        "Thunderstorm" => "wi-thunderstorm",
        "Mist" | "Fog" => "wi-fog",
        "Smoke" => "wi-smoke",
        "Haze" => "wi-day-haze",
        "Dust" => "wi-dust",
        "Sand" => "wi-sandstorm",
        "Ash" => "wi-volcano",
        "Squall" => "wi-strong-wind",
        "Tornado" => "wi-tornado",
        _ => NOT_AVAILABLE,
    }
}
