//! View-model for the forecast page.
//!
//! Owns the application state and exposes one method per user event. Async
//! work (forecast requests, location lookups) is handed to the service tasks;
//! their results are applied with [`ForecastModel::apply`] on the thread that
//! owns the model.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Local, TimeZone};
use skycast_core::{AppError, Config, InputError};
use skycast_weather::{
    default_cities, parse_cities, render_cards, select_days, FetchTarget, ForecastCard,
    ForecastClient, LocationError, LocationSource, RawDay, RecentStore,
};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::error_mapping::ToAppError;
use crate::services::{self, ServiceMessage, ServiceReceiver, ServiceSender};
use crate::state::AppState;
use crate::status::StatusNotifier;

pub const LOADING_PLACEHOLDER: &str = "🌤️ Loading weather data...";
pub const FAILED_PLACEHOLDER: &str = "⚠️ Failed to load data.";
/// Display name used for forecasts fetched from the location source
pub const LOCATION_NAME: &str = "Your Location";

/// Current time in the user's zone; fallback card dates count from its calendar day
type Clock = Arc<dyn Fn() -> DateTime<FixedOffset> + Send + Sync>;

/// What the forecast area currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastView {
    Empty,
    Placeholder(String),
    Cards(Vec<ForecastCard>),
}

pub struct ForecastModel {
    state: AppState,
    status: StatusNotifier,
    view: ForecastView,
    runtime: Handle,
    client: Arc<ForecastClient>,
    location: Arc<LocationSource>,
    tx: ServiceSender,
    rx: ServiceReceiver,
    next_request_id: u64,
    pending: usize,
    forecast_days: usize,
    assets_dir: Option<PathBuf>,
    clock: Clock,
}

impl ForecastModel {
    pub fn new(
        runtime: Handle,
        client: ForecastClient,
        location: LocationSource,
        recent: RecentStore,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(recent),
            status: StatusNotifier::default(),
            view: ForecastView::Empty,
            runtime,
            client: Arc::new(client),
            location: Arc::new(location),
            tx,
            rx,
            next_request_id: 0,
            pending: 0,
            forecast_days: 7,
            assets_dir: None,
            clock: Arc::new(|| Local::now().fixed_offset()),
        }
    }

    /// Wire the model from the application config: endpoint, location source,
    /// recent-cities file, fade delay and card count.
    pub fn from_config(config: &Config, runtime: Handle) -> anyhow::Result<Self> {
        let client = ForecastClient::new(
            config.weather.api_url.clone(),
            config.weather.request_timeout_secs.map(Duration::from_secs),
        )?;
        let location = LocationSource::from_settings(
            config.location.enabled,
            config.location.latitude,
            config.location.longitude,
        );
        let recent = RecentStore::load(config.recent_cities_path());

        let mut model = Self::new(runtime, client, location, recent)
            .with_status(StatusNotifier::new(Duration::from_millis(
                config.ui.status_fade_ms,
            )))
            .with_forecast_days(config.ui.forecast_days);
        model.assets_dir = config.ui.assets_dir.clone();
        Ok(model)
    }

    pub fn with_status(mut self, status: StatusNotifier) -> Self {
        self.status = status;
        self
    }

    pub fn with_forecast_days(mut self, days: usize) -> Self {
        self.forecast_days = days.max(1);
        self
    }

    /// Replace the wall clock used to date forecast cards
    pub fn with_clock<Tz: TimeZone + 'static>(
        mut self,
        clock: impl Fn() -> DateTime<Tz> + Send + Sync + 'static,
    ) -> Self {
        self.clock = Arc::new(move || clock().fixed_offset());
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn status(&self) -> &StatusNotifier {
        &self.status
    }

    pub fn view(&self) -> &ForecastView {
        &self.view
    }

    /// Requests and lookups issued but not yet applied
    pub fn pending(&self) -> usize {
        self.pending
    }

    // ---- events ----

    pub fn load_defaults(&mut self) {
        self.state.replace_cities(default_cities());
        self.status
            .set("Loaded default cities; load a CSV to replace the list.");
    }

    /// Parse CSV text and, on success, replace the city list.
    /// On failure the current list is kept and the reason goes to the status line.
    pub fn load_csv(&mut self, text: &str) -> bool {
        match parse_cities(text) {
            Ok(cities) => {
                let count = cities.len();
                self.state.replace_cities(cities);
                self.status.set(format!("Cities loaded: {count}"));
                true
            }
            Err(e) => {
                let app_err = e.to_app_error();
                tracing::warn!(category = app_err.category(), "CSV rejected: {}", app_err);
                self.status.set(e.to_string());
                false
            }
        }
    }

    pub fn load_csv_file(&mut self, path: &Path) -> bool {
        match std::fs::read_to_string(path) {
            Ok(text) => self.load_csv(&text),
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                self.status.set(format!("Error reading CSV: {e}"));
                false
            }
        }
    }

    pub fn set_filter(&mut self, term: &str) {
        self.state.catalog_mut().set_filter(term);
    }

    pub fn select(&mut self, index: usize) -> bool {
        self.state.catalog_mut().select(index)
    }

    pub fn select_matching(&mut self, query: &str) -> bool {
        self.state.catalog_mut().select_matching(query)
    }

    /// Fetch the forecast for the selected option
    pub fn get_weather(&mut self) {
        match self.state.catalog().selected_target() {
            Some(target) => self.start_fetch(target),
            None => {
                let err = AppError::from(InputError::NothingSelected);
                tracing::debug!(category = err.category(), "Fetch requested without a selection");
                self.status.set(InputError::NothingSelected.to_string());
            }
        }
    }

    /// Fetch the forecast for the current position
    pub fn locate(&mut self) {
        if !self.location.is_supported() {
            self.status.set(LocationError::Unsupported.to_string());
            return;
        }
        self.status.set("Getting your location…");
        self.pending += 1;
        services::request_locate(&self.tx, &self.runtime, self.location.clone());
    }

    fn start_fetch(&mut self, target: FetchTarget) {
        self.view = ForecastView::Placeholder(LOADING_PLACEHOLDER.to_string());
        self.status
            .set(format!("Fetching forecast for {} …", target.name));

        self.next_request_id += 1;
        self.pending += 1;
        services::request_fetch(
            &self.tx,
            &self.runtime,
            self.client.clone(),
            self.next_request_id,
            target,
        );
    }

    // ---- service results ----

    pub fn apply(&mut self, message: ServiceMessage) {
        self.pending = self.pending.saturating_sub(1);
        match message {
            ServiceMessage::FetchDone {
                request_id,
                target,
                result,
            } => {
                if request_id < self.next_request_id {
                    tracing::warn!(
                        request_id,
                        latest = self.next_request_id,
                        "Applying a forecast response that was overtaken by a newer request"
                    );
                }
                match result {
                    Ok(entries) => self.show_forecast(&target, &entries),
                    Err(e) => {
                        let app_err = e.to_app_error();
                        tracing::error!(
                            category = app_err.category(),
                            "Forecast for {} failed: {}",
                            target.name,
                            app_err
                        );
                        self.view = ForecastView::Placeholder(FAILED_PLACEHOLDER.to_string());
                        self.status.set(format!("Error: {e}"));
                    }
                }
            }
            ServiceMessage::LocateDone(Ok(coords)) => {
                let (lat, lon) = coords.rounded();
                self.start_fetch(FetchTarget {
                    name: LOCATION_NAME.to_string(),
                    lat,
                    lon,
                });
            }
            ServiceMessage::LocateDone(Err(e)) => {
                tracing::warn!(category = e.to_app_error().category(), "{}", e);
                let message = match e {
                    LocationError::Unsupported => e.to_string(),
                    LocationError::PermissionDenied(_) => format!("Location error: {e}"),
                };
                self.status.set(message);
            }
        }
    }

    fn show_forecast(&mut self, target: &FetchTarget, entries: &[RawDay]) {
        let selection = select_days(entries, (self.clock)(), self.forecast_days);
        if selection.used_fallback {
            tracing::debug!("Forecast for {} uses sequential dates", target.name);
        }

        let mut cards = render_cards(&selection.days);
        if let Some(dir) = &self.assets_dir {
            for card in &mut cards {
                card.icon = card.resolve_icon(dir);
            }
        }
        self.view = ForecastView::Cards(cards);
        self.status.set(format!(
            "{}-day forecast for {}",
            self.forecast_days, target.name
        ));

        if let Err(e) = self
            .state
            .record_recent(&target.name, &target.lat, &target.lon)
        {
            let app_err = e.to_app_error();
            tracing::warn!(category = app_err.category(), "{}", app_err);
        }
    }

    /// Apply every result that has already arrived. Returns how many were applied.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(message) = self.rx.try_recv() {
            self.apply(message);
            applied += 1;
        }
        applied
    }

    /// Wait for the next result and apply it. Returns false when nothing is pending.
    pub async fn apply_next(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        match self.rx.recv().await {
            Some(message) => {
                self.apply(message);
                true
            }
            None => false,
        }
    }

    /// Apply results until no request or lookup is outstanding.
    /// A successful lookup issues a fetch, which is waited for too.
    pub async fn run_until_idle(&mut self) {
        while self.apply_next().await {}
    }
}
