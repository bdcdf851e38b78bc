//! Persistence services for Skycast.
//!
//! Small whole-value stores and the favorites list built on top of them.

pub mod favorites;
pub mod storage;

pub use favorites::{FavoritesSet, FavoritesStore, FAVORITES_KEY};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
