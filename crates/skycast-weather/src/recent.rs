//! Most-recently-used list of viewed locations, persisted as JSON.

use crate::types::{RecentEntry, StoreError};
use std::collections::HashSet;
use std::path::PathBuf;

pub const RECENT_CAPACITY: usize = 5;

#[derive(Debug, Default)]
pub struct RecentStore {
    path: Option<PathBuf>,
    entries: Vec<RecentEntry>,
}

impl RecentStore {
    /// Read the list once from `path`. A missing or unreadable file starts empty.
    /// Later entries repeating an earlier name are dropped.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<Vec<RecentEntry>>(&contents) {
                Ok(entries) => {
                    let mut seen = HashSet::new();
                    entries
                        .into_iter()
                        .filter(|e| seen.insert(e.name.clone()))
                        .take(RECENT_CAPACITY)
                        .collect()
                }
                Err(e) => {
                    tracing::warn!("Ignoring corrupt recent cities file {}: {}", path.display(), e);
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read recent cities from {}: {}", path.display(), e);
                Vec::new()
            }
        };

        tracing::debug!("Loaded {} recent cities", entries.len());
        Self {
            path: Some(path),
            entries,
        }
    }

    /// A store that never touches disk
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[RecentEntry] {
        &self.entries
    }

    /// Move `name` to the front (replacing any entry with the same name) and persist.
    ///
    /// The in-memory list is updated even when writing fails.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        lat: impl Into<String>,
        lon: impl Into<String>,
    ) -> Result<(), StoreError> {
        let name = name.into();
        self.entries.retain(|e| e.name != name);
        self.entries.insert(
            0,
            RecentEntry {
                name,
                lat: lat.into(),
                lon: lon.into(),
            },
        );
        self.entries.truncate(RECENT_CAPACITY);
        self.save()
    }

    fn save(&self) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string(&self.entries)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(store: &RecentStore) -> Vec<&str> {
        store.entries().iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_add_moves_duplicate_to_front() {
        let mut store = RecentStore::in_memory();
        store.add("Paris, FR", "48.8566", "2.3522").unwrap();
        store.add("Berlin, DE", "52.52", "13.405").unwrap();
        store.add("Paris, FR", "48.85", "2.35").unwrap();

        assert_eq!(names(&store), ["Paris, FR", "Berlin, DE"]);
        assert_eq!(store.entries()[0].lat, "48.85");
    }

    #[test]
    fn test_names_match_case_sensitively() {
        let mut store = RecentStore::in_memory();
        store.add("paris", "1", "1").unwrap();
        store.add("Paris", "1", "1").unwrap();
        assert_eq!(names(&store), ["Paris", "paris"]);
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let mut store = RecentStore::in_memory();
        for i in 0..8 {
            store.add(format!("City {i}"), "0", "0").unwrap();
        }
        assert_eq!(store.entries().len(), RECENT_CAPACITY);
        assert_eq!(names(&store), ["City 7", "City 6", "City 5", "City 4", "City 3"]);
    }

    #[test]
    fn test_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recent_cities.json");

        let mut store = RecentStore::load(&path);
        assert!(store.entries().is_empty());
        store.add("Your Location", "51.50", "-0.12").unwrap();
        store.add("Oslo", "59.91", "10.75").unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains(r#""name":"Oslo""#));
        assert!(raw.contains(r#""lat":"51.50""#));

        let reloaded = RecentStore::load(&path);
        assert_eq!(reloaded.entries(), store.entries());
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recent_cities.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = RecentStore::load(&path);
        assert!(store.entries().is_empty());
    }

    #[test]
    fn test_oversized_file_is_truncated_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recent_cities.json");
        let entries: Vec<_> = (0..7)
            .map(|i| RecentEntry {
                name: format!("C{i}"),
                lat: "0".into(),
                lon: "0".into(),
            })
            .collect();
        std::fs::write(&path, serde_json::to_string(&entries).unwrap()).unwrap();

        assert_eq!(RecentStore::load(&path).entries().len(), RECENT_CAPACITY);
    }

    #[test]
    fn test_duplicate_names_in_file_keep_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recent_cities.json");
        let entry = |name: &str, lat: &str| RecentEntry {
            name: name.into(),
            lat: lat.into(),
            lon: "0".into(),
        };
        let entries = [
            entry("Oslo", "59.91"),
            entry("Paris, FR", "48.85"),
            entry("Oslo", "1.00"),
            entry("Bergen", "60.39"),
        ];
        std::fs::write(&path, serde_json::to_string(&entries).unwrap()).unwrap();

        let store = RecentStore::load(&path);
        assert_eq!(names(&store), ["Oslo", "Paris, FR", "Bergen"]);
        assert_eq!(store.entries()[0].lat, "59.91");
    }
}
