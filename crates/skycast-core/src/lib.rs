pub mod app;
pub mod config;
pub mod error;

pub use app::App;
pub use config::{
    Config, LocationConfig, UiConfig, ValidationResult, WeatherConfig, DEFAULT_API_URL,
};
pub use error::{AppError, InputError, NetworkError, PermissionError};

use anyhow::Result;

/// Initialize the core application
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("SkyCast core initialized");
    Ok(())
}
