//! Forecast domain for SkyCast
//!
//! City lists (CSV and built-in), the recent-cities store, the 7Timer! civil
//! light client, and normalization/rendering of its daily series.

pub mod catalog;
pub mod csv;
pub mod forecast;
pub mod location;
pub mod provider;
pub mod recent;
pub mod render;
pub mod types;

pub use catalog::{CityCatalog, FetchTarget, OptionGroup, SelectOption};
pub use csv::{default_cities, parse_cities};
pub use forecast::{select_days, DayDate, ForecastDay, RawDay, Reading, Selection};
pub use location::{get_current_location, LocationSource};
pub use provider::ForecastClient;
pub use recent::{RecentStore, RECENT_CAPACITY};
pub use render::{render_cards, ForecastCard};
pub use types::*;
