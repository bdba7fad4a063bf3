pub mod forecast_model;

pub use forecast_model::{ForecastModel, ForecastView};
