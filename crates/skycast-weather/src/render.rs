//! Forecast cards: the display strings for each selected day.

use crate::forecast::{DayDate, ForecastDay};
use crate::types::{describe, icon_for, DEFAULT_ICON};
use std::fmt;
use std::path::Path;

const TEMP_PLACEHOLDER: &str = "-";
const WIND_PLACEHOLDER: &str = "—";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastCard {
    /// e.g. "Mon, 1 Jan"
    pub date: String,
    /// Relative icon path, `images/<code>.png`
    pub icon: String,
    pub description: String,
    /// Minimum to maximum, e.g. 1°C to 5°C; layout set in [`Self::from_day`]
    pub temperature: String,
    /// e.g. "Wind: 3 m/s"
    pub wind: String,
}

impl ForecastCard {
    pub fn from_day(day: &ForecastDay) -> Self {
        let date = match &day.date {
            DayDate::Calendar(d) => d.format("%a, %-d %b").to_string(),
            DayDate::Unparsed(label) => label.clone(),
        };

        Self {
            date,
            icon: icon_for(&day.weather_code),
            description: describe(&day.weather_code),
            temperature: format!(
                "{}°C — {}°C",
                day.min_temp.display_or(TEMP_PLACEHOLDER),
                day.max_temp.display_or(TEMP_PLACEHOLDER)
            ),
            wind: format!("Wind: {} m/s", day.wind_speed.display_or(WIND_PLACEHOLDER)),
        }
    }

    /// Icon path under `assets_dir`, or the default icon when the file is missing
    pub fn resolve_icon(&self, assets_dir: &Path) -> String {
        let candidate = assets_dir.join(&self.icon);
        if candidate.is_file() {
            self.icon.clone()
        } else {
            tracing::debug!("Icon {} not found, using {}", candidate.display(), DEFAULT_ICON);
            DEFAULT_ICON.to_string()
        }
    }
}

impl fmt::Display for ForecastCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.date)?;
        writeln!(f, "  {} [{}]", self.description, self.icon)?;
        writeln!(f, "  {}", self.temperature)?;
        write!(f, "  {}", self.wind)
    }
}

/// Render every selected day. The result replaces whatever was shown before.
pub fn render_cards(days: &[ForecastDay]) -> Vec<ForecastCard> {
    days.iter().map(ForecastCard::from_day).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::{select_days, RawDay};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn cards_for(entries: serde_json::Value) -> Vec<ForecastCard> {
        let raw: Vec<RawDay> = serde_json::from_value(entries).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        render_cards(&select_days(&raw, now, 7).days)
    }

    #[test]
    fn test_seven_clear_days() {
        let entries: Vec<_> = (1..=7)
            .map(|d| {
                json!({
                    "date": format!("2024-01-0{d}"),
                    "weather": "clear",
                    "temp2m": {"min": 1, "max": 5},
                    "wind10m_max": 3
                })
            })
            .collect();

        let cards = cards_for(json!(entries));
        assert_eq!(cards.len(), 7);
        assert_eq!(cards[0].date, "Mon, 1 Jan");
        assert_eq!(cards[6].date, "Sun, 7 Jan");
        for card in &cards {
            assert_eq!(card.icon, "images/clear.png");
            assert_eq!(card.description, "Clear");
            assert_eq!(card.temperature, "1°C — 5°C");
            assert_eq!(card.wind, "Wind: 3 m/s");
        }
    }

    #[test]
    fn test_unknown_code_uses_default_icon_and_raw_text() {
        let entries: Vec<_> = (1..=7)
            .map(|d| json!({"date": format!("2024-02-0{d}"), "weather": "hail"}))
            .collect();
        let cards = cards_for(json!(entries));
        assert_eq!(cards[0].icon, DEFAULT_ICON);
        assert_eq!(cards[0].description, "hail");
    }

    #[test]
    fn test_missing_values_use_placeholders() {
        let entries: Vec<_> = (1..=7)
            .map(|d| json!({"date": format!("2024-02-0{d}")}))
            .collect();
        let cards = cards_for(json!(entries));
        assert_eq!(cards[0].icon, DEFAULT_ICON);
        assert_eq!(cards[0].description, "");
        assert_eq!(cards[0].temperature, "-°C — -°C");
        assert_eq!(cards[0].wind, "Wind: — m/s");
    }

    #[test]
    fn test_fallback_cards_start_today() {
        let cards = cards_for(json!([
            {"timepoint": 3, "weather": "rain", "temp2m": 7},
            {"timepoint": 6, "weather": "snow", "temp2m": -1}
        ]));
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].date, "Mon, 1 Jan");
        assert_eq!(cards[1].date, "Tue, 2 Jan");
        assert_eq!(cards[0].temperature, "7°C — 7°C");
        assert_eq!(cards[1].description, "Snow");
    }

    #[test]
    fn test_resolve_icon_falls_back_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("images")).unwrap();
        std::fs::write(dir.path().join("images/rain.png"), b"png").unwrap();

        let mut card = ForecastCard {
            date: "Mon, 1 Jan".into(),
            icon: "images/rain.png".into(),
            description: "Rain".into(),
            temperature: "1°C — 2°C".into(),
            wind: "Wind: 3 m/s".into(),
        };
        assert_eq!(card.resolve_icon(dir.path()), "images/rain.png");

        card.icon = "images/fog.png".into();
        assert_eq!(card.resolve_icon(dir.path()), DEFAULT_ICON);
    }

    #[test]
    fn test_display_lists_every_line() {
        let cards = cards_for(json!([{"date": "2024-01-01", "weather": "fog", "wind": 2}]));
        let text = cards[0].to_string();
        assert!(text.starts_with("Mon, 1 Jan\n"));
        assert!(text.contains("Fog [images/fog.png]"));
        assert!(text.ends_with("Wind: 2 m/s"));
    }
}
