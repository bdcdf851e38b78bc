//! Dashboard state.
//!
//! The state is a plain value. The reducer never mutates the state it is
//! given; it returns the next one.

use chrono::{DateTime, Duration, Utc};
use skycast_core::{Config, FallbackOrderingSetting, UnitSystem};
use skycast_services::FavoritesSet;
use skycast_weather::{CurrentConditions, FallbackOrdering, ForecastSample, ThemeTag, UnitPreference};

use crate::sequence::RequestSequencer;

/// Longest notification lifetime accepted from configuration
const MAX_TOAST_SECONDS: u64 = 3600;

/// Session-wide settings that do not change after startup
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSettings {
    pub toast_duration: Duration,
    pub fallback_ordering: FallbackOrdering,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            toast_duration: Duration::seconds(3),
            fallback_ordering: FallbackOrdering::default(),
        }
    }
}

impl DashboardSettings {
    pub fn from_config(config: &Config) -> Self {
        let toast_secs = config.dashboard.toast_seconds.min(MAX_TOAST_SECONDS);
        Self {
            toast_duration: Duration::seconds(toast_secs as i64),
            fallback_ordering: fallback_ordering(config.forecast.fallback_ordering),
        }
    }
}

pub fn unit_preference(units: UnitSystem) -> UnitPreference {
    match units {
        UnitSystem::Metric => UnitPreference::Metric,
        UnitSystem::Imperial => UnitPreference::Imperial,
    }
}

pub fn fallback_ordering(setting: FallbackOrderingSetting) -> FallbackOrdering {
    match setting {
        FallbackOrderingSetting::MergeByDate => FallbackOrdering::MergeByDate,
        FallbackOrderingSetting::Append => FallbackOrdering::Append,
    }
}

/// Transient message shown until `expires_at`
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

impl Notification {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    /// City the dashboard is showing (or about to show at startup)
    pub city: String,
    pub units: UnitPreference,
    pub favorites: FavoritesSet,
    pub current: Option<CurrentConditions>,
    /// Daily forecast summary, at most five days
    pub daily: Vec<ForecastSample>,
    pub theme: Option<ThemeTag>,
    /// Requests started but not yet completed, including superseded ones
    pub in_flight: usize,
    pub notification: Option<Notification>,
    pub sequencer: RequestSequencer,
    pub settings: DashboardSettings,
    pub should_quit: bool,
}

impl DashboardState {
    pub fn new(
        city: impl Into<String>,
        units: UnitPreference,
        favorites: FavoritesSet,
        settings: DashboardSettings,
    ) -> Self {
        Self {
            city: city.into(),
            units,
            favorites,
            current: None,
            daily: Vec::new(),
            theme: None,
            in_flight: 0,
            notification: None,
            sequencer: RequestSequencer::new(),
            settings,
            should_quit: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn is_current_favorite(&self) -> bool {
        self.favorites.contains(&self.city)
    }

    /// Notification still visible at `now`
    pub fn active_notification(&self, now: DateTime<Utc>) -> Option<&Notification> {
        self.notification.as_ref().filter(|n| !n.is_expired(now))
    }
}
