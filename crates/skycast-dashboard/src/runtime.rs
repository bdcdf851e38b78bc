//! Dashboard runtime - owns state, executes effects.
//!
//! All side effects happen here. Fetches run as independent tokio tasks and
//! report back through an unbounded channel; `dispatch` is the only place
//! state is replaced.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use skycast_services::{FavoritesStore, KeyValueStore};
use skycast_weather::{LocationError, LocationSource, WeatherProvider};
use tokio::sync::mpsc;

use crate::effects::DashboardEffect;
use crate::events::{CurrentQuery, DashboardEvent};
use crate::reducer::{self, Transition};
use crate::state::DashboardState;

/// Dashboard runtime. Must be driven from within a tokio runtime.
pub struct Dashboard<S, L> {
    state: DashboardState,
    provider: Arc<WeatherProvider>,
    favorites: FavoritesStore<S>,
    locator: Arc<L>,
    tx: mpsc::UnboundedSender<DashboardEvent>,
    rx: mpsc::UnboundedReceiver<DashboardEvent>,
}

impl<S, L> Dashboard<S, L>
where
    S: KeyValueStore,
    L: LocationSource + 'static,
{
    pub fn new(
        state: DashboardState,
        provider: WeatherProvider,
        favorites: FavoritesStore<S>,
        locator: L,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state,
            provider: Arc::new(provider),
            favorites,
            locator: Arc::new(locator),
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn favorites(&self) -> &FavoritesStore<S> {
        &self.favorites
    }

    pub fn dispatch(&mut self, event: DashboardEvent) {
        self.dispatch_at(event, Utc::now());
    }

    /// Apply `event` as of `now` and execute the resulting effects.
    pub fn dispatch_at(&mut self, event: DashboardEvent, now: DateTime<Utc>) {
        let Transition { state, effects } = reducer::update(&self.state, event, now);
        self.state = state;
        for effect in effects {
            self.execute(effect, now);
        }
    }

    /// Wait for the next completed background task.
    pub async fn next_outcome(&mut self) -> Option<DashboardEvent> {
        self.rx.recv().await
    }

    /// Dispatch outcomes until no request is in flight.
    pub async fn run_until_idle(&mut self) {
        while self.state.is_loading() {
            match self.next_outcome().await {
                Some(event) => self.dispatch(event),
                None => break,
            }
        }
    }

    fn execute(&mut self, effect: DashboardEffect, now: DateTime<Utc>) {
        match effect {
            DashboardEffect::FetchCurrentByCity { ticket, city } => {
                let provider = Arc::clone(&self.provider);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = provider.current_by_city(&city).await;
                    let _ = tx.send(DashboardEvent::CurrentLoaded {
                        ticket,
                        query: CurrentQuery::City(city),
                        result,
                    });
                });
            }
            DashboardEffect::FetchCurrentByCoords { ticket, coords } => {
                let provider = Arc::clone(&self.provider);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = provider.current_by_coords(coords).await;
                    let _ = tx.send(DashboardEvent::CurrentLoaded {
                        ticket,
                        query: CurrentQuery::Coords(coords),
                        result,
                    });
                });
            }
            DashboardEffect::FetchForecast { ticket, city } => {
                let provider = Arc::clone(&self.provider);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = provider.forecast(&city).await;
                    let _ = tx.send(DashboardEvent::ForecastLoaded { ticket, result });
                });
            }
            DashboardEffect::Locate { ticket } => {
                let locator = Arc::clone(&self.locator);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = tokio::task::spawn_blocking(move || locator.locate())
                        .await
                        .unwrap_or_else(|e| Err(LocationError::Other(e.to_string())));
                    let event = match result {
                        Ok(coords) => DashboardEvent::Located { ticket, coords },
                        Err(error) => DashboardEvent::LocateFailed { ticket, error },
                    };
                    let _ = tx.send(event);
                });
            }
            DashboardEffect::PersistFavorites { favorites } => {
                let result = self
                    .favorites
                    .replace(favorites)
                    .map(|()| self.favorites.favorites().clone());
                self.dispatch_at(DashboardEvent::FavoritesPersisted(result), now);
            }
            DashboardEffect::Quit => {
                tracing::info!("Quit requested");
            }
        }
    }
}
