//! The selectable city list.
//!
//! Options are built from the active city records followed by a "Recent
//! Cities" group. Filtering only toggles visibility; nothing is removed.

use crate::types::{CityRecord, RecentEntry};

pub const RECENT_GROUP_LABEL: &str = "Recent Cities";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionGroup {
    Primary,
    Recent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub label: String,
    /// "lat,lon"
    pub value: String,
    pub group: OptionGroup,
    pub hidden: bool,
}

/// Coordinates and display name of the selected option, ready for a fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTarget {
    pub name: String,
    pub lat: String,
    pub lon: String,
}

#[derive(Debug, Clone, Default)]
pub struct CityCatalog {
    options: Vec<SelectOption>,
    selected: Option<usize>,
    filter: String,
}

impl CityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every option. Primary cities come first, then the recent group.
    pub fn populate(&mut self, cities: &[CityRecord], recent: &[RecentEntry]) {
        self.options = cities
            .iter()
            .map(|c| SelectOption {
                label: c.label(),
                value: c.value(),
                group: OptionGroup::Primary,
                hidden: false,
            })
            .collect();
        self.selected = None;
        self.push_recent(recent);
        self.apply_filter();
    }

    /// Rebuild only the recent group. A selected primary option stays selected.
    pub fn refresh_recent(&mut self, recent: &[RecentEntry]) {
        if self
            .selected
            .is_some_and(|i| self.options[i].group == OptionGroup::Recent)
        {
            self.selected = None;
        }
        self.options.retain(|o| o.group == OptionGroup::Primary);
        self.push_recent(recent);
        self.apply_filter();
    }

    fn push_recent(&mut self, recent: &[RecentEntry]) {
        self.options.extend(recent.iter().map(|r| SelectOption {
            label: r.name.clone(),
            value: format!("{},{}", r.lat, r.lon),
            group: OptionGroup::Recent,
            hidden: false,
        }));
    }

    /// Hide options whose label does not contain `term`, ignoring case.
    pub fn set_filter(&mut self, term: &str) {
        self.filter = term.to_lowercase();
        self.apply_filter();
    }

    fn apply_filter(&mut self) {
        for option in &mut self.options {
            option.hidden = !option.label.to_lowercase().contains(&self.filter);
        }
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Visible options with their index in [`Self::options`]
    pub fn visible(&self) -> impl Iterator<Item = (usize, &SelectOption)> {
        self.options.iter().enumerate().filter(|(_, o)| !o.hidden)
    }

    pub fn has_recent_group(&self) -> bool {
        self.options.iter().any(|o| o.group == OptionGroup::Recent)
    }

    /// Select a visible option. Returns false for hidden or out-of-range indices.
    pub fn select(&mut self, index: usize) -> bool {
        match self.options.get(index) {
            Some(option) if !option.hidden => {
                self.selected = Some(index);
                true
            }
            _ => false,
        }
    }

    /// Select the first visible option whose label contains `query`, ignoring case.
    pub fn select_matching(&mut self, query: &str) -> bool {
        let query = query.to_lowercase();
        let found = self
            .visible()
            .find(|(_, o)| o.label.to_lowercase().contains(&query))
            .map(|(i, _)| i);
        match found {
            Some(i) => self.select(i),
            None => false,
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&SelectOption> {
        self.selected.and_then(|i| self.options.get(i))
    }

    /// Split the selected value back into trimmed latitude/longitude strings.
    pub fn selected_target(&self) -> Option<FetchTarget> {
        let option = self.selected()?;
        let (lat, lon) = option.value.split_once(',')?;
        Some(FetchTarget {
            name: option.label.clone(),
            lat: lat.trim().to_string(),
            lon: lon.trim().to_string(),
        })
    }
}
