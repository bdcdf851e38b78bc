//! Dashboard effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! The reducer never performs I/O or spawns tasks itself.

use skycast_services::FavoritesSet;
use skycast_weather::Coordinates;

use crate::sequence::Ticket;

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEffect {
    /// Fetch current conditions for a city name.
    FetchCurrentByCity { ticket: Ticket, city: String },

    /// Fetch current conditions for a coordinate pair.
    FetchCurrentByCoords { ticket: Ticket, coords: Coordinates },

    /// Fetch the forecast feed for a city name.
    FetchForecast { ticket: Ticket, city: String },

    /// Ask the location source for the device position. The ticket is
    /// reused for the coordinate fetch that follows.
    Locate { ticket: Ticket },

    /// Write the full favorites list to storage.
    PersistFavorites { favorites: FavoritesSet },

    Quit,
}
