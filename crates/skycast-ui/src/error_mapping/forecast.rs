use skycast_core::{AppError, NetworkError};
use skycast_weather::ForecastError;

use super::ToAppError;

impl ToAppError for ForecastError {
    fn to_app_error(&self) -> AppError {
        let network = match self {
            ForecastError::Http { status } => NetworkError::ServerError {
                status: *status,
                message: self.to_string(),
            },
            ForecastError::NoDataseries | ForecastError::Parse(_) => {
                NetworkError::InvalidResponse(self.to_string())
            }
            ForecastError::Request(e) if e.is_timeout() => NetworkError::Timeout,
            ForecastError::Request(e) => NetworkError::ConnectionFailed(e.to_string()),
        };
        AppError::Network(network)
    }
}
