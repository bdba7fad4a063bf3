//! Stand-in for the platform location service.

use crate::types::{Coordinates, LocationError};

#[derive(Debug, Clone, PartialEq)]
pub enum LocationSource {
    /// A known position (from config)
    Fixed(Coordinates),
    /// Location access refused
    Denied,
    /// No location service available
    Unsupported,
}

impl LocationSource {
    /// Build from the `[location]` config values
    pub fn from_settings(enabled: bool, latitude: Option<f64>, longitude: Option<f64>) -> Self {
        match (enabled, latitude, longitude) {
            (false, _, _) => Self::Denied,
            (true, Some(latitude), Some(longitude)) => Self::Fixed(Coordinates {
                latitude,
                longitude,
            }),
            _ => Self::Unsupported,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

pub async fn get_current_location(source: &LocationSource) -> Result<Coordinates, LocationError> {
    match source {
        LocationSource::Fixed(coords) => Ok(*coords),
        LocationSource::Denied => Err(LocationError::PermissionDenied(
            "User denied Geolocation".to_string(),
        )),
        LocationSource::Unsupported => Err(LocationError::Unsupported),
    }
}
