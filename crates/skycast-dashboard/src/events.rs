//! Dashboard event types.
//!
//! User commands, async fetch outcomes and the clock are all converted to
//! `DashboardEvent` before reaching the reducer.

use skycast_core::StorageError;
use skycast_services::FavoritesSet;
use skycast_weather::{Coordinates, CurrentConditions, Forecast, LocationError, WeatherError};

use crate::sequence::Ticket;

/// What a current-conditions request asked for
#[derive(Debug, Clone, PartialEq)]
pub enum CurrentQuery {
    City(String),
    Coords(Coordinates),
}

#[derive(Debug)]
pub enum DashboardEvent {
    /// Look up a city by name. Blank text is ignored.
    Search(String),

    /// Locate the device and show the weather there.
    UseMyLocation,

    /// Switch between metric and imperial display.
    ToggleUnits,

    /// Add or remove the displayed city from favorites.
    ToggleFavorite,

    /// Show the favorite at this zero-based position.
    OpenFavorite(usize),

    /// Fetch the displayed city again.
    Refresh,

    Quit,

    /// Current conditions request finished.
    CurrentLoaded {
        ticket: Ticket,
        query: CurrentQuery,
        result: Result<CurrentConditions, WeatherError>,
    },

    /// Forecast feed request finished.
    ForecastLoaded {
        ticket: Ticket,
        result: Result<Forecast, WeatherError>,
    },

    /// Device location resolved.
    Located { ticket: Ticket, coords: Coordinates },

    /// Device location could not be determined.
    LocateFailed { ticket: Ticket, error: LocationError },

    /// Favorites write finished; on success carries the set now on disk.
    FavoritesPersisted(Result<FavoritesSet, StorageError>),

    /// Clock tick for expiring notifications.
    Tick,
}
