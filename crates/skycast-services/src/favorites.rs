//! Favorite cities.
//!
//! City names are compared by exact string equality: "paris" and "Paris"
//! are two different favorites.

use serde::{Deserialize, Serialize};
use skycast_core::StorageError;

use crate::storage::KeyValueStore;

/// Storage key holding the JSON array of favorite cities
pub const FAVORITES_KEY: &str = "weatherFavorites";

/// Ordered set of favorite city names. Serialized as a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct FavoritesSet(Vec<String>);

impl FavoritesSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, city: &str) -> bool {
        self.0.iter().any(|c| c == city)
    }

    /// Copy with `city` removed if present, appended otherwise.
    #[must_use]
    pub fn toggled(&self, city: &str) -> Self {
        let mut cities = self.0.clone();
        match cities.iter().position(|c| c == city) {
            Some(index) => {
                cities.remove(index);
            }
            None => cities.push(city.to_string()),
        }
        Self(cities)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for FavoritesSet {
    /// Keeps the first occurrence of each city.
    fn from(cities: Vec<String>) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(cities.len());
        for city in cities {
            if !unique.contains(&city) {
                unique.push(city);
            }
        }
        Self(unique)
    }
}

impl From<FavoritesSet> for Vec<String> {
    fn from(set: FavoritesSet) -> Self {
        set.0
    }
}

/// Favorites backed by a key-value store. Every change is written in full.
pub struct FavoritesStore<S> {
    storage: S,
    favorites: FavoritesSet,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Load favorites; missing or unreadable data yields an empty set.
    pub fn load(storage: S) -> Self {
        let favorites = match storage.get(FAVORITES_KEY) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::warn!("Ignoring corrupt favorites data: {}", e);
                FavoritesSet::default()
            }),
            Ok(None) => FavoritesSet::default(),
            Err(e) => {
                tracing::warn!("Failed to read favorites: {}", e);
                FavoritesSet::default()
            }
        };

        tracing::info!("Loaded {} favorite cities", favorites.len());
        Self { storage, favorites }
    }

    pub fn favorites(&self) -> &FavoritesSet {
        &self.favorites
    }

    pub fn is_favorite(&self, city: &str) -> bool {
        self.favorites.contains(city)
    }

    /// Add or remove `city`, then persist. Returns whether it is now a favorite.
    ///
    /// # Errors
    /// Returns the storage error if the write fails; the set is left unchanged.
    pub fn toggle(&mut self, city: &str) -> Result<bool, StorageError> {
        let next = self.favorites.toggled(city);
        self.replace(next)?;
        Ok(self.favorites.contains(city))
    }

    /// Persist `favorites` and make it the current set.
    ///
    /// # Errors
    /// Returns the storage error if the write fails; the set is left unchanged.
    pub fn replace(&mut self, favorites: FavoritesSet) -> Result<(), StorageError> {
        let json = serde_json::to_string(&favorites).map_err(|e| StorageError::EncodeFailed {
            key: FAVORITES_KEY.to_string(),
            message: e.to_string(),
        })?;
        self.storage.set(FAVORITES_KEY, &json)?;
        self.favorites = favorites;
        Ok(())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use crate::storage::{JsonFileStore, MemoryStore};

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(Some(r#"["Delhi"]"#.to_string()))
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::WriteFailed {
                key: key.to_string(),
                message: "read-only".to_string(),
            })
        }
    }

    fn cities(set: &FavoritesSet) -> Vec<&str> {
        set.iter().collect()
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut store = FavoritesStore::load(MemoryStore::new());

        assert!(store.toggle("Delhi").unwrap());
        assert!(store.is_favorite("Delhi"));
        assert!(!store.toggle("Delhi").unwrap());
        assert!(!store.is_favorite("Delhi"));
    }

    #[test]
    fn test_double_toggle_restores_order_and_persists_each_step() {
        let storage = MemoryStore::with_value(FAVORITES_KEY, r#"["Paris","Tokyo","Lima"]"#);
        let mut store = FavoritesStore::load(storage);
        let original = store.favorites().clone();

        store.toggle("Tokyo").unwrap();
        assert_eq!(cities(store.favorites()), vec!["Paris", "Lima"]);
        store.toggle("Tokyo").unwrap();
        assert_eq!(cities(store.favorites()), vec!["Paris", "Lima", "Tokyo"]);

        // removal then re-append is not an involution for a middle element,
        // but toggling a new city twice is
        store.replace(original.clone()).unwrap();
        store.toggle("Oslo").unwrap();
        store.toggle("Oslo").unwrap();
        assert_eq!(store.favorites(), &original);

        let writes: Vec<String> = store.storage().writes().into_iter().map(|(_, v)| v).collect();
        assert_eq!(
            writes,
            vec![
                r#"["Paris","Lima"]"#,
                r#"["Paris","Lima","Tokyo"]"#,
                r#"["Paris","Tokyo","Lima"]"#,
                r#"["Paris","Tokyo","Lima","Oslo"]"#,
                r#"["Paris","Tokyo","Lima"]"#,
            ]
        );
    }

    #[test]
    fn test_removal_preserves_relative_order() {
        let set = FavoritesSet::from(vec!["A".to_string(), "B".to_string(), "C".to_string()]);
        assert_eq!(cities(&set.toggled("A")), vec!["B", "C"]);
        assert_eq!(cities(&set.toggled("B")), vec!["A", "C"]);
        assert_eq!(cities(&set.toggled("D")), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_no_normalization() {
        let set = FavoritesSet::new().toggled("Paris").toggled("paris").toggled(" Paris");
        assert_eq!(set.len(), 3);
        assert!(set.contains("paris"));
        assert!(!set.contains("PARIS"));
    }

    #[test]
    fn test_missing_and_corrupt_storage_load_empty() {
        let store = FavoritesStore::load(MemoryStore::new());
        assert!(store.favorites().is_empty());

        let store = FavoritesStore::load(MemoryStore::with_value(FAVORITES_KEY, "{not json"));
        assert!(store.favorites().is_empty());

        let store = FavoritesStore::load(MemoryStore::with_value(FAVORITES_KEY, r#"{"a":1}"#));
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn test_duplicates_in_storage_are_collapsed() {
        let store =
            FavoritesStore::load(MemoryStore::with_value(FAVORITES_KEY, r#"["Rome","Oslo","Rome"]"#));
        assert_eq!(cities(store.favorites()), vec!["Rome", "Oslo"]);
    }

    #[test]
    fn test_round_trip_through_file_store() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = FavoritesStore::load(JsonFileStore::new(dir.path()));
        for city in ["São Paulo", "Delhi", "new york", "Zürich"] {
            store.toggle(city).unwrap();
        }
        let saved = store.favorites().clone();

        let reloaded = FavoritesStore::load(JsonFileStore::new(dir.path()));
        assert_eq!(reloaded.favorites(), &saved);
        assert_eq!(
            cities(reloaded.favorites()),
            vec!["São Paulo", "Delhi", "new york", "Zürich"]
        );
        assert!(dir.path().join("weatherFavorites.json").exists());
    }

    #[test]
    fn test_failed_write_leaves_set_unchanged() {
        let mut store = FavoritesStore::load(ReadOnlyStore);
        let err = store.toggle("Paris").unwrap_err();

        assert!(matches!(err, StorageError::WriteFailed { .. }));
        assert_eq!(cities(store.favorites()), vec!["Delhi"]);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let set = FavoritesSet::new().toggled("Lima").toggled("Cairo");
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["Lima","Cairo"]"#);
        assert_eq!(set.get(1), Some("Cairo"));
        assert_eq!(set.get(2), None);
    }
}
