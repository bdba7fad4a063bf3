use anyhow::Result;

use crate::Config;

/// Application configuration and lifecycle
pub struct App {
    config: Config,
}

impl App {
    /// Create a new application instance from the user's validated config file
    pub fn new() -> Result<Self> {
        let (config, _validation) = Config::load_validated()?;
        Ok(Self::with_config(config))
    }

    /// Create an application instance around an already loaded config
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Prepare on-disk state (the config directory holding the recent-cities file)
    pub fn initialize(&mut self) -> Result<()> {
        std::fs::create_dir_all(&self.config.config_dir)?;
        tracing::info!(
            "Application initialized (config dir: {})",
            self.config.config_dir.display()
        );
        Ok(())
    }

    pub fn shutdown(&mut self) -> Result<()> {
        tracing::info!("Shutting down application");
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_creates_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            config_dir: dir.path().join("nested"),
            ..Config::default()
        };

        let mut app = App::with_config(config);
        app.initialize().unwrap();

        assert!(dir.path().join("nested").is_dir());
        assert_eq!(
            app.config().recent_cities_path(),
            dir.path().join("nested").join("recent_cities.json")
        );
        app.shutdown().unwrap();
    }
}
