use serde::{Deserialize, Serialize};

/// Icon shown for missing or unrecognized weather codes
pub const DEFAULT_ICON: &str = "images/clear.png";

/// A selectable city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    pub name: String,
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl CityRecord {
    pub fn new(name: impl Into<String>, country: Option<&str>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            country: country.map(str::to_string),
            latitude,
            longitude,
        }
    }

    /// "name" or "name, country"
    pub fn label(&self) -> String {
        match self.country.as_deref() {
            Some(country) if !country.is_empty() => format!("{}, {}", self.name, country),
            _ => self.name.clone(),
        }
    }

    /// Composite "lat,lon" key used as the option value
    pub fn value(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// A previously viewed location, coordinates kept as the strings they were fetched with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentEntry {
    pub name: String,
    pub lat: String,
    pub lon: String,
}

/// Geographic coordinates from the location source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Latitude and longitude formatted to 2 decimal places
    pub fn rounded(&self) -> (String, String) {
        (
            format!("{:.2}", self.latitude),
            format!("{:.2}", self.longitude),
        )
    }
}

/// The civil light product's weather vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherCode {
    Clear,
    PartlyCloudy,
    MostlyCloudy,
    Cloudy,
    Humid,
    IsolatedShowers,
    OccasionalShowers,
    LightRain,
    Rain,
    RainSnow,
    LightSnow,
    Snow,
    ThunderstormRain,
    Thunderstorm,
    Fog,
    Windy,
}

impl WeatherCode {
    pub const ALL: [WeatherCode; 16] = [
        Self::Clear,
        Self::PartlyCloudy,
        Self::MostlyCloudy,
        Self::Cloudy,
        Self::Humid,
        Self::IsolatedShowers,
        Self::OccasionalShowers,
        Self::LightRain,
        Self::Rain,
        Self::RainSnow,
        Self::LightSnow,
        Self::Snow,
        Self::ThunderstormRain,
        Self::Thunderstorm,
        Self::Fog,
        Self::Windy,
    ];

    /// Exact, case-sensitive lookup of an API code
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::PartlyCloudy => "pcloudy",
            Self::MostlyCloudy => "mcloudy",
            Self::Cloudy => "cloudy",
            Self::Humid => "humid",
            Self::IsolatedShowers => "ishower",
            Self::OccasionalShowers => "oshower",
            Self::LightRain => "lightrain",
            Self::Rain => "rain",
            Self::RainSnow => "rainsnow",
            Self::LightSnow => "lightsnow",
            Self::Snow => "snow",
            Self::ThunderstormRain => "tsrain",
            Self::Thunderstorm => "tstorm",
            Self::Fog => "fog",
            Self::Windy => "windy",
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::MostlyCloudy => "Mostly Cloudy",
            Self::Cloudy => "Cloudy",
            Self::Humid => "Humid",
            Self::IsolatedShowers => "Isolated Showers",
            Self::OccasionalShowers => "Occasional Showers",
            Self::LightRain => "Light Rain",
            Self::Rain => "Rain",
            Self::RainSnow => "Rain & Snow",
            Self::LightSnow => "Light Snow",
            Self::Snow => "Snow",
            Self::ThunderstormRain => "Thunderstorm & Rain",
            Self::Thunderstorm => "Thunderstorm",
            Self::Fog => "Fog",
            Self::Windy => "Windy",
        }
    }

    pub fn icon_path(&self) -> String {
        format!("images/{}.png", self.code())
    }
}

/// Icon path for a raw code, falling back to [`DEFAULT_ICON`]
pub fn icon_for(code: &str) -> String {
    WeatherCode::from_code(code)
        .map(|c| c.icon_path())
        .unwrap_or_else(|| DEFAULT_ICON.to_string())
}

/// Description for a raw code, falling back to the code itself
pub fn describe(code: &str) -> String {
    WeatherCode::from_code(code)
        .map(|c| c.description().to_string())
        .unwrap_or_else(|| code.to_string())
}

/// CSV parsing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CsvError {
    #[error("CSV appears empty")]
    Empty,
    #[error("CSV must include City, Latitude, Longitude columns")]
    MissingColumns { headers: Vec<String> },
    #[error("No valid rows in CSV")]
    NoValidRows,
}

/// Forecast fetch errors
#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    #[error("HTTP {status}")]
    Http { status: u16 },
    #[error("No dataseries returned")]
    NoDataseries,
    #[error("{0}")]
    Request(#[from] reqwest::Error),
    #[error("Invalid forecast payload: {0}")]
    Parse(String),
}

/// Location service errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("Geolocation not supported")]
    Unsupported,
    #[error("{0}")]
    PermissionDenied(String),
}

/// Recent-cities persistence errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to write recent cities: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode recent cities: {0}")]
    Encode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_lookup_round_trips_vocabulary() {
        for code in WeatherCode::ALL {
            assert_eq!(WeatherCode::from_code(code.code()), Some(code));
        }
    }

    #[test]
    fn test_code_lookup_is_case_sensitive() {
        assert_eq!(WeatherCode::from_code("Clear"), None);
        assert_eq!(WeatherCode::from_code(""), None);
    }

    #[test]
    fn test_icon_for_known_and_unknown() {
        assert_eq!(icon_for("tsrain"), "images/tsrain.png");
        assert_eq!(icon_for("hail"), DEFAULT_ICON);
        assert_eq!(icon_for(""), DEFAULT_ICON);
    }

    #[test]
    fn test_describe_falls_back_to_raw_code() {
        assert_eq!(describe("rainsnow"), "Rain & Snow");
        assert_eq!(describe("hail"), "hail");
        assert_eq!(describe(""), "");
    }

    #[test]
    fn test_city_label_and_value() {
        let paris = CityRecord::new("Paris", Some("FR"), 48.8566, 2.3522);
        assert_eq!(paris.label(), "Paris, FR");
        assert_eq!(paris.value(), "48.8566,2.3522");

        let nowhere = CityRecord::new("Nowhere", Some(""), 1.0, -2.5);
        assert_eq!(nowhere.label(), "Nowhere");
        assert_eq!(nowhere.value(), "1,-2.5");
    }

    #[test]
    fn test_coordinates_rounded() {
        let here = Coordinates {
            latitude: 52.367_61,
            longitude: 4.904_12,
        };
        assert_eq!(here.rounded(), ("52.37".to_string(), "4.90".to_string()));
    }
}
