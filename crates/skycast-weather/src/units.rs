//! Display unit conversions.
//!
//! Gateway data is always metric (°C, m/s, m). Temperature follows the
//! user's [`UnitPreference`]; wind speed and visibility have fixed display
//! units (km/h and km).

use crate::types::UnitPreference;

pub fn convert_temperature(value_c: f64, unit: UnitPreference) -> f64 {
    match unit {
        UnitPreference::Metric => value_c,
        UnitPreference::Imperial => value_c * 9.0 / 5.0 + 32.0,
    }
}

/// Meters per second to kilometers per hour, one decimal place.
pub fn convert_wind_speed(value_ms: f64) -> f64 {
    round_one_decimal(value_ms * 3.6)
}

/// Meters to kilometers, one decimal place.
pub fn convert_visibility(value_m: f64) -> f64 {
    round_one_decimal(value_m / 1000.0)
}

/// Rounded temperature with unit symbol, e.g. `"22°C"`.
pub fn format_temperature(value_c: f64, unit: UnitPreference) -> String {
    // + 0.0 turns -0 into 0
    let rounded = convert_temperature(value_c, unit).round() + 0.0;
    format!("{}{}", rounded, unit.temperature_symbol())
}

pub fn format_wind_speed(value_ms: f64) -> String {
    format!("{:.1} km/h", convert_wind_speed(value_ms))
}

pub fn format_visibility(value_m: f64) -> String {
    format!("{:.1} km", convert_visibility(value_m))
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
