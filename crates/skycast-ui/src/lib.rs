//! Framework-agnostic front-end layer for SkyCast: the status line, the
//! application state, the async service tasks and the forecast view-model.

pub mod error_mapping;
pub mod models;
pub mod services;
pub mod state;
pub mod status;

pub use error_mapping::ToAppError;
pub use models::forecast_model::{
    ForecastModel, ForecastView, FAILED_PLACEHOLDER, LOADING_PLACEHOLDER, LOCATION_NAME,
};
pub use services::ServiceMessage;
pub use state::AppState;
pub use status::{StatusNotifier, FADED_OPACITY, FULL_OPACITY};
