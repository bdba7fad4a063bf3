//! Async backends for the forecast view-model.
//! Network and location work runs on tokio tasks; results come back as
//! [`ServiceMessage`]s on an unbounded channel.

pub mod forecast_service;
pub mod location_service;

use skycast_weather::{Coordinates, FetchTarget, ForecastError, LocationError, RawDay};

pub use forecast_service::request_fetch;
pub use location_service::request_locate;

pub type ServiceSender = tokio::sync::mpsc::UnboundedSender<ServiceMessage>;
pub type ServiceReceiver = tokio::sync::mpsc::UnboundedReceiver<ServiceMessage>;

/// Messages sent from async operations back to the view-model
#[derive(Debug)]
pub enum ServiceMessage {
    /// Result of one forecast request, tagged with the order it was issued in
    FetchDone {
        request_id: u64,
        target: FetchTarget,
        result: Result<Vec<RawDay>, ForecastError>,
    },
    /// Result of a location lookup
    LocateDone(Result<Coordinates, LocationError>),
}
