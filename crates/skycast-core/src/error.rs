//! Centralized error taxonomy for SkyCast.
//!
//! Domain crates keep their own precise error enums; the UI layer maps them
//! into [`AppError`] so every failure is logged under one of a few categories.

use thiserror::Error;

/// Top-level application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Permission error: {0}")]
    Permission(#[from] PermissionError),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    /// Short category name used as a structured logging field.
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Input(_) => "input",
            AppError::Network(_) => "network",
            AppError::Permission(_) => "permission",
            AppError::Storage(_) => "storage",
        }
    }
}

/// Malformed user input (uploaded CSV, empty selection).
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Empty input: {0}")]
    Empty(String),

    #[error("Missing columns: {0}")]
    MissingColumns(String),

    #[error("No usable rows: {0}")]
    NoValidRows(String),

    #[error("Please choose a city")]
    NothingSelected,
}

/// Forecast request failures.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("forecast service unreachable: {0}")]
    ConnectionFailed(String),

    #[error("forecast request timed out")]
    Timeout,

    #[error("forecast service answered {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("unusable forecast payload: {0}")]
    InvalidResponse(String),
}

/// Location permission errors.
#[derive(Debug, Error)]
pub enum PermissionError {
    #[error("Location permission denied: {0}")]
    Denied(String),

    #[error("Location service unsupported")]
    Unsupported,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_conversion() {
        let app_err: AppError = PermissionError::Unsupported.into();
        assert!(matches!(
            app_err,
            AppError::Permission(PermissionError::Unsupported)
        ));
        assert_eq!(app_err.category(), "permission");
    }

    #[test]
    fn test_nothing_selected_reads_as_prompt() {
        let app_err = AppError::from(InputError::NothingSelected);
        assert_eq!(app_err.category(), "input");
        assert_eq!(InputError::NothingSelected.to_string(), "Please choose a city");
    }

    #[test]
    fn test_categories_are_distinct() {
        let errors = [
            AppError::Input(InputError::Empty("csv".into())),
            AppError::Network(NetworkError::Timeout),
            AppError::Permission(PermissionError::Denied("user".into())),
            AppError::Storage("disk full".into()),
        ];
        let mut categories: Vec<_> = errors.iter().map(AppError::category).collect();
        categories.dedup();
        assert_eq!(categories, ["input", "network", "permission", "storage"]);
    }

    #[test]
    fn test_server_error_keeps_status() {
        let err = NetworkError::ServerError {
            status: 503,
            message: "HTTP 503".into(),
        };
        assert_eq!(err.to_string(), "forecast service answered 503: HTTP 503");
    }
}
