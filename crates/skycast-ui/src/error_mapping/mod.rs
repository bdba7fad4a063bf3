//! Maps domain errors to skycast_core::AppError so failures are logged under
//! a stable category. One module per domain.

mod csv;
mod forecast;
mod location;
mod store;

use skycast_core::AppError;

/// Conversion of a domain error into the application taxonomy.
pub trait ToAppError {
    fn to_app_error(&self) -> AppError;
}
