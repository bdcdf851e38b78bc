//! Text rendering of the dashboard.

use std::fmt::Write;

use chrono::{DateTime, FixedOffset, Utc};
use skycast_weather::units::{format_temperature, format_visibility, format_wind_speed};
use skycast_weather::CurrentConditions;

use crate::state::DashboardState;

fn local_time(instant: DateTime<Utc>, offset_secs: i32) -> DateTime<FixedOffset> {
    match FixedOffset::east_opt(offset_secs) {
        Some(offset) => instant.with_timezone(&offset),
        None => instant.fixed_offset(),
    }
}

/// Render the whole dashboard as of `now`.
pub fn render(state: &DashboardState, now: DateTime<Utc>) -> String {
    let mut out = String::new();

    let star = if state.is_current_favorite() { "★" } else { "☆" };
    let theme = state.theme.map(|t| t.label()).unwrap_or("-");
    let _ = write!(out, "── {} {} ── theme: {}", state.city, star, theme);
    if state.is_loading() {
        out.push_str(" ── loading…");
    }
    out.push('\n');

    match &state.current {
        Some(current) => render_current(&mut out, state, current),
        None => out.push_str("No weather loaded yet\n"),
    }

    if !state.daily.is_empty() {
        let days: Vec<String> = state
            .daily
            .iter()
            .map(|sample| {
                format!(
                    "{} {} {}",
                    sample.calendar_date.format("%a"),
                    format_temperature(sample.temperature_c, state.units),
                    sample.icon_code
                )
            })
            .collect();
        let _ = writeln!(out, "Forecast: {}", days.join(" | "));
    }

    if state.favorites.is_empty() {
        out.push_str("Favorites: none (:fav to add)\n");
    } else {
        let favorites: Vec<String> = state
            .favorites
            .iter()
            .enumerate()
            .map(|(i, city)| {
                let marker = if city == state.city { "*" } else { "" };
                format!("{}. {}{}", i + 1, city, marker)
            })
            .collect();
        let _ = writeln!(out, "Favorites: {}", favorites.join("  "));
    }

    if let Some(notification) = state.active_notification(now) {
        let _ = writeln!(out, "! {}", notification.message);
    }

    out
}

fn render_current(out: &mut String, state: &DashboardState, current: &CurrentConditions) {
    let units = state.units;
    let offset = current.timezone_offset_secs;

    let _ = writeln!(out, "{}, {}", current.city, current.country);
    let _ = writeln!(
        out,
        "{}",
        local_time(current.observed_at, offset).format("%A, %-d %B %H:%M")
    );
    let _ = writeln!(
        out,
        "{}  (feels like {})  {}",
        format_temperature(current.temperature_c, units),
        format_temperature(current.feels_like_c, units),
        current.condition
    );
    let _ = writeln!(
        out,
        "Humidity {}%  Wind {}  Visibility {}  Pressure {} hPa",
        current.humidity,
        format_wind_speed(current.wind_speed_ms),
        format_visibility(current.visibility_m),
        current.pressure_hpa
    );
    let _ = writeln!(
        out,
        "Sunrise {}  Sunset {}",
        local_time(current.sunrise, offset).format("%H:%M"),
        local_time(current.sunset, offset).format("%H:%M")
    );
}
