//! Normalization of raw `dataseries` entries into canonical forecast days.
//!
//! Entries are loosely typed: a day may carry an explicit `date` or only an
//! hour offset (`timepoint`), temperatures come as `{min,max}` or a single
//! scalar, and wind speed lives in one of three fields.

use chrono::{DateTime, Duration, NaiveDate, TimeZone};
use std::fmt::Display;
use serde::Deserialize;
use serde_json::Value;

/// One undecoded element of the API's `dataseries` array
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawDay {
    #[serde(default)]
    pub date: Option<Value>,
    #[serde(default)]
    pub timepoint: Option<Value>,
    #[serde(default)]
    pub weather: Option<Value>,
    #[serde(default)]
    pub temp2m: Option<Value>,
    #[serde(default)]
    pub wind10m_max: Option<Value>,
    #[serde(default)]
    pub wind10m_avg: Option<Value>,
    #[serde(default)]
    pub wind: Option<Value>,
}

/// A numeric reading, or nothing usable
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    Value(f64),
    Missing,
}

impl Reading {
    fn from_value(value: Option<&Value>) -> Self {
        let number = match value {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match number {
            Some(n) if n.is_finite() => Reading::Value(n),
            _ => Reading::Missing,
        }
    }

    /// Integral values print without a fractional part
    pub fn display_or(&self, placeholder: &str) -> String {
        match self {
            Reading::Value(v) => format_number(*v),
            Reading::Missing => placeholder.to_string(),
        }
    }
}

fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

/// The date a card is shown for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayDate {
    Calendar(NaiveDate),
    /// A label that is neither `YYYY-MM-DD` nor `YYYYMMDD`
    Unparsed(String),
}

impl DayDate {
    fn from_label(label: &str) -> Self {
        NaiveDate::parse_from_str(label, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(label, "%Y%m%d"))
            .map(DayDate::Calendar)
            .unwrap_or_else(|_| DayDate::Unparsed(label.to_string()))
    }
}

/// Canonical per-day forecast used by the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub date: DayDate,
    /// Raw weather code, empty when absent
    pub weather_code: String,
    pub min_temp: Reading,
    pub max_temp: Reading,
    pub wind_speed: Reading,
}

impl ForecastDay {
    fn normalize(raw: &RawDay, date: DayDate) -> Self {
        let weather_code = match &raw.weather {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };

        let (min_temp, max_temp) = match &raw.temp2m {
            Some(Value::Object(range)) => (
                Reading::from_value(range.get("min")),
                Reading::from_value(range.get("max")),
            ),
            scalar => {
                let reading = Reading::from_value(scalar.as_ref());
                (reading, reading)
            }
        };

        let wind_speed = [&raw.wind10m_max, &raw.wind10m_avg, &raw.wind]
            .into_iter()
            .find_map(|field| field.as_ref().filter(|v| !v.is_null()))
            .map(|v| Reading::from_value(Some(v)))
            .unwrap_or(Reading::Missing);

        Self {
            date,
            weather_code,
            min_temp,
            max_temp,
            wind_speed,
        }
    }
}

/// Days chosen for display
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub days: Vec<ForecastDay>,
    /// True when too few distinct dates were found and synthetic dates were assigned
    pub used_fallback: bool,
}

/// Derive an entry's date label: an explicit `date`, else today's date shifted by `timepoint` hours.
/// Days are counted in the time zone of `now`.
pub fn date_label<Tz>(raw: &RawDay, now: DateTime<Tz>) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match &raw.date {
        Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
        Some(Value::Number(n)) if n.as_f64().is_some_and(|v| v != 0.0) => {
            return Some(n.to_string())
        }
        _ => {}
    }

    let hours = match &raw.timepoint {
        Some(Value::Number(n)) => n.as_f64()?,
        Some(Value::String(s)) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    let offset = Duration::try_milliseconds((hours * 3_600_000.0) as i64)?;
    let shifted = now.checked_add_signed(offset)?;
    Some(shifted.format("%Y-%m-%d").to_string())
}

/// Pick up to `count` days.
///
/// Entries are deduplicated by date label (first wins). When fewer than
/// `count` distinct labels exist, the first `count` raw entries are used
/// instead with dates today, today+1, ... and the deduplicated days are
/// discarded, even when some of them were correctly dated.
pub fn select_days<Tz>(entries: &[RawDay], now: DateTime<Tz>, count: usize) -> Selection
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut seen = std::collections::HashSet::new();
    let mut by_day = Vec::with_capacity(count);

    for raw in entries {
        if by_day.len() >= count {
            break;
        }
        let Some(label) = date_label(raw, now.clone()) else {
            continue;
        };
        if seen.insert(label.clone()) {
            by_day.push(ForecastDay::normalize(raw, DayDate::from_label(&label)));
        }
    }

    if by_day.len() >= count {
        return Selection {
            days: by_day,
            used_fallback: false,
        };
    }

    tracing::debug!(
        "Only {} distinct dates in {} entries; assigning sequential dates",
        by_day.len(),
        entries.len()
    );
    let today = now.date_naive();
    let days = entries
        .iter()
        .take(count)
        .zip(today.iter_days())
        .map(|(raw, date)| ForecastDay::normalize(raw, DayDate::Calendar(date)))
        .collect();

    Selection {
        days,
        used_fallback: true,
    }
}
