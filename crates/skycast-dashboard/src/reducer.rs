//! Dashboard reducer.
//!
//! All state transitions happen here. The runtime calls
//! `update(&state, event, now)`, keeps the returned state and executes the
//! returned effects.

use chrono::{DateTime, Utc};
use skycast_core::AppError;
use skycast_weather::{aggregate_daily, select_theme, CurrentConditions, Forecast, WeatherError};

use crate::effects::DashboardEffect;
use crate::error_mapping::notification_text;
use crate::events::{CurrentQuery, DashboardEvent};
use crate::sequence::{RequestCategory, Ticket};
use crate::state::{DashboardState, Notification};

/// Result of one reducer step
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: DashboardState,
    pub effects: Vec<DashboardEffect>,
}

pub fn update(state: &DashboardState, event: DashboardEvent, now: DateTime<Utc>) -> Transition {
    let mut next = state.clone();

    let effects = match event {
        DashboardEvent::Search(text) => {
            let city = text.trim();
            if city.is_empty() {
                vec![]
            } else {
                vec![start_current(&mut next, CurrentQuery::City(city.to_string()))]
            }
        }
        DashboardEvent::UseMyLocation => {
            let ticket = next.sequencer.issue(RequestCategory::Current);
            next.in_flight += 1;
            vec![DashboardEffect::Locate { ticket }]
        }
        DashboardEvent::ToggleUnits => {
            next.units = next.units.toggled();
            vec![]
        }
        DashboardEvent::ToggleFavorite => {
            let favorites = next.favorites.toggled(&next.city);
            vec![DashboardEffect::PersistFavorites { favorites }]
        }
        DashboardEvent::OpenFavorite(index) => match next.favorites.get(index) {
            Some(city) => {
                let query = CurrentQuery::City(city.to_string());
                vec![start_current(&mut next, query)]
            }
            None => {
                notify(&mut next, format!("No favorite #{}", index + 1), now);
                vec![]
            }
        },
        DashboardEvent::Refresh => {
            let query = CurrentQuery::City(next.city.clone());
            vec![start_current(&mut next, query)]
        }
        DashboardEvent::Quit => {
            next.should_quit = true;
            vec![DashboardEffect::Quit]
        }
        DashboardEvent::CurrentLoaded {
            ticket,
            query,
            result,
        } => handle_current_loaded(&mut next, ticket, query, result, now),
        DashboardEvent::ForecastLoaded { ticket, result } => {
            handle_forecast_loaded(&mut next, ticket, result);
            vec![]
        }
        DashboardEvent::Located { ticket, coords } => {
            if !next.sequencer.is_latest(ticket) {
                finish_request(&mut next);
                tracing::debug!("Discarding superseded location (seq {})", ticket.seq);
                vec![]
            } else {
                // the lookup's slot in `in_flight` carries over to the fetch
                tracing::info!("Located at {:.2}, {:.2}", coords.latitude, coords.longitude);
                vec![DashboardEffect::FetchCurrentByCoords { ticket, coords }]
            }
        }
        DashboardEvent::LocateFailed { ticket, error } => {
            finish_request(&mut next);
            if next.sequencer.is_latest(ticket) {
                tracing::warn!("Location unavailable: {}", error);
                notify(&mut next, notification_text(&WeatherError::from(error), None), now);
            }
            vec![]
        }
        DashboardEvent::FavoritesPersisted(result) => {
            match result {
                Ok(favorites) => next.favorites = favorites,
                Err(e) => {
                    tracing::error!("Failed to save favorites: {}", e);
                    notify(&mut next, AppError::from(e).user_message().to_string(), now);
                }
            }
            vec![]
        }
        DashboardEvent::Tick => {
            if next.notification.as_ref().is_some_and(|n| n.is_expired(now)) {
                next.notification = None;
            }
            vec![]
        }
    };

    Transition {
        state: next,
        effects,
    }
}

// ============================================================================
// Requests
// ============================================================================

fn start_current(state: &mut DashboardState, query: CurrentQuery) -> DashboardEffect {
    let ticket = state.sequencer.issue(RequestCategory::Current);
    state.in_flight += 1;
    match query {
        CurrentQuery::City(city) => DashboardEffect::FetchCurrentByCity { ticket, city },
        CurrentQuery::Coords(coords) => DashboardEffect::FetchCurrentByCoords { ticket, coords },
    }
}

fn start_forecast(state: &mut DashboardState, city: String) -> DashboardEffect {
    let ticket = state.sequencer.issue(RequestCategory::Forecast);
    state.in_flight += 1;
    DashboardEffect::FetchForecast { ticket, city }
}

fn finish_request(state: &mut DashboardState) {
    state.in_flight = state.in_flight.saturating_sub(1);
}

fn notify(state: &mut DashboardState, message: String, now: DateTime<Utc>) {
    state.notification = Some(Notification {
        message,
        expires_at: now + state.settings.toast_duration,
    });
}

// ============================================================================
// Outcomes
// ============================================================================

fn handle_current_loaded(
    state: &mut DashboardState,
    ticket: Ticket,
    query: CurrentQuery,
    result: Result<CurrentConditions, WeatherError>,
    now: DateTime<Utc>,
) -> Vec<DashboardEffect> {
    finish_request(state);
    if !state.sequencer.is_latest(ticket) {
        tracing::debug!("Discarding superseded current result (seq {})", ticket.seq);
        return vec![];
    }

    match result {
        Ok(current) => {
            // forecast follows the search text, or the resolved name for coordinates
            let forecast_city = match query {
                CurrentQuery::City(city) => city,
                CurrentQuery::Coords(_) => current.city.clone(),
            };

            state.city = current.city.clone();
            state.theme = Some(select_theme(&current.condition, &current.icon_code));
            state.current = Some(current);
            state.daily.clear();

            vec![start_forecast(state, forecast_city)]
        }
        Err(e) => {
            tracing::warn!("Current conditions request failed: {}", e);
            notify(state, notification_text(&e, Some(&query)), now);
            vec![]
        }
    }
}

fn handle_forecast_loaded(
    state: &mut DashboardState,
    ticket: Ticket,
    result: Result<Forecast, WeatherError>,
) {
    finish_request(state);
    if !state.sequencer.is_latest(ticket) {
        tracing::debug!("Discarding superseded forecast (seq {})", ticket.seq);
        return;
    }

    match result {
        Ok(forecast) => {
            state.daily = aggregate_daily(&forecast.samples, state.settings.fallback_ordering);
            tracing::debug!(days = state.daily.len(), "Daily forecast updated");
        }
        Err(e) => {
            tracing::warn!("Forecast request failed: {}", e);
            state.daily.clear();
        }
    }
}
