//! Weather domain for Skycast
//!
//! Gateway client for current conditions and the 3-hourly forecast feed,
//! plus the pure display rules: unit conversion, theme selection and the
//! daily forecast summary.

pub mod daily;
pub mod location;
pub mod provider;
pub mod theme;
pub mod types;
pub mod units;

pub use daily::{aggregate_daily, FallbackOrdering};
pub use location::{ConfiguredLocation, LocationSource};
pub use provider::{GatewaySettings, WeatherProvider};
pub use theme::select_theme;
pub use types::*;
