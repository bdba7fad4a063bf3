use skycast_core::AppError;
use skycast_weather::StoreError;

use super::ToAppError;

impl ToAppError for StoreError {
    fn to_app_error(&self) -> AppError {
        AppError::Storage(self.to_string())
    }
}
