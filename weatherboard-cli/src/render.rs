//! Plain-text rendering of the board.

use std::fmt::Write;

use weatherboard_core::{Board, Condition, icon::resolve_icon};

const WIDTH: usize = 44;

/// Terminal stand-in for a weather-icons class name.
pub fn icon_glyph(icon: &str) -> &'static str {
    match icon {
        "wi-day-sunny" => "☀",
        "wi-night-clear" => "☾",
        "wi-cloudy" | "wi-night-alt-cloudy" => "☁",
        "wi-day-rain" | "wi-night-alt-rain" => "☂",
        "wi-day-sprinkle" | "wi-night-alt-sprinkle" => "⛆",
        "wi-thunderstorm" => "⚡",
        "wi-day-snow" | "wi-night-alt-snow" => "❄",
        "wi-fog" | "wi-smoke" | "wi-day-haze" => "≡",
        "wi-dust" | "wi-sandstorm" | "wi-strong-wind" => "≋",
        "wi-volcano" => "▲",
        "wi-tornado" => "@",
        _ => "?",
    }
}

fn glyph(condition: Option<&Condition>) -> &'static str {
    icon_glyph(resolve_icon(condition))
}

fn description(condition: Option<&Condition>) -> &str {
    condition.map(|c| c.description.as_str()).unwrap_or("-")
}

pub fn render_board(board: &Board) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail.
    let name_width = WIDTH.saturating_sub(board.date_line.len());
    let _ = writeln!(
        out,
        "{:<name_width$}{}",
        board.location_name, board.date_line
    );
    let _ = writeln!(out, "Chance of rain : {}%", board.chance_of_rain_pct);
    let _ = writeln!(
        out,
        "{:.1}°  {}  {}",
        board.temperature_c,
        icon_glyph(board.icon),
        description(board.condition.as_ref())
    );

    let _ = writeln!(out, "\nTODAY'S FORECAST");
    for item in &board.hourly {
        let _ = writeln!(
            out,
            "  {:>8}  {}  {:.1}°",
            item.label,
            glyph(item.condition.as_ref()),
            item.temperature as f64
        );
    }

    let _ = writeln!(out, "\nAIR CONDITIONS");
    let _ = writeln!(out, "  {:<16}{:.1}°", "Real Feel", board.feels_like_c);
    let _ = writeln!(out, "  {:<16}{:.1} km/h", "Wind", board.wind_kmh);
    let _ = writeln!(out, "  {:<16}{}%", "Chance of rain", board.chance_of_rain_pct);
    let _ = writeln!(out, "  {:<16}{}%", "Humidity", board.humidity_pct);

    let _ = writeln!(out, "\n7-DAY FORECAST");
    for day in &board.daily {
        let _ = writeln!(
            out,
            "  {:<6}{}  {:<18}{:>6.1}° / {:.1}°  {:>3}%",
            day.label,
            glyph(day.condition.as_ref()),
            description(day.condition.as_ref()),
            day.max_temp_c,
            day.min_temp_c,
            day.pop_pct
        );
    }

    out
}
