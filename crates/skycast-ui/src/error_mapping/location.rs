use skycast_core::{AppError, PermissionError};
use skycast_weather::LocationError;

use super::ToAppError;

impl ToAppError for LocationError {
    fn to_app_error(&self) -> AppError {
        match self {
            LocationError::Unsupported => AppError::Permission(PermissionError::Unsupported),
            LocationError::PermissionDenied(reason) => {
                AppError::Permission(PermissionError::Denied(reason.clone()))
            }
        }
    }
}
