use skycast_weather::{CityCatalog, CityRecord, RecentEntry, RecentStore, StoreError};

/// Everything the page keeps between events: the active city list, the
/// recent-cities store and the catalog built from both.
#[derive(Debug)]
pub struct AppState {
    cities: Vec<CityRecord>,
    recent: RecentStore,
    catalog: CityCatalog,
}

impl AppState {
    pub fn new(recent: RecentStore) -> Self {
        Self {
            cities: Vec::new(),
            recent,
            catalog: CityCatalog::new(),
        }
    }

    pub fn cities(&self) -> &[CityRecord] {
        &self.cities
    }

    pub fn recent(&self) -> &[RecentEntry] {
        self.recent.entries()
    }

    pub fn catalog(&self) -> &CityCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut CityCatalog {
        &mut self.catalog
    }

    /// Swap in a new city list and rebuild the catalog from it
    pub fn replace_cities(&mut self, cities: Vec<CityRecord>) {
        self.cities = cities;
        self.catalog.populate(&self.cities, self.recent.entries());
    }

    /// Record a viewed location and refresh the catalog's recent group.
    ///
    /// The recent group is refreshed even when persisting fails.
    pub fn record_recent(&mut self, name: &str, lat: &str, lon: &str) -> Result<(), StoreError> {
        let saved = self.recent.add(name, lat, lon);
        self.catalog.refresh_recent(self.recent.entries());
        saved
    }
}
