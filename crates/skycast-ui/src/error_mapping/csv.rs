use skycast_core::{AppError, InputError};
use skycast_weather::CsvError;

use super::ToAppError;

impl ToAppError for CsvError {
    fn to_app_error(&self) -> AppError {
        let detail = self.to_string();
        match self {
            CsvError::Empty => AppError::Input(InputError::Empty(detail)),
            CsvError::MissingColumns { headers } => AppError::Input(InputError::MissingColumns(
                format!("{detail} (found: {})", headers.join(", ")),
            )),
            CsvError::NoValidRows => AppError::Input(InputError::NoValidRows(detail)),
        }
    }
}
