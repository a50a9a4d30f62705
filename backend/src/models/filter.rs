//! Filter selection value objects.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel label meaning "no restriction" for a region selector.
pub const ALL_LABEL: &str = "All";

/// Geographic selector: either every value, or one literal label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RegionSelector {
    #[default]
    All,
    Only(String),
}

impl RegionSelector {
    /// Build a selector from optional user input. Absent, blank or `"All"` select everything.
    pub fn from_option(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some(ALL_LABEL) => RegionSelector::All,
            Some(label) => RegionSelector::Only(label.to_string()),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, RegionSelector::All)
    }

    /// Whether `value` passes this selector. Comparison is exact, and a
    /// missing value only passes `All`.
    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            RegionSelector::All => true,
            RegionSelector::Only(label) => value == Some(label.as_str()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            RegionSelector::All => ALL_LABEL,
            RegionSelector::Only(label) => label,
        }
    }
}

impl fmt::Display for RegionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<&str> for RegionSelector {
    fn from(value: &str) -> Self {
        RegionSelector::from_option(Some(value))
    }
}

impl From<String> for RegionSelector {
    fn from(value: String) -> Self {
        RegionSelector::from_option(Some(&value))
    }
}

impl From<RegionSelector> for String {
    fn from(selector: RegionSelector) -> Self {
        match selector {
            RegionSelector::All => ALL_LABEL.to_string(),
            RegionSelector::Only(label) => label,
        }
    }
}

/// Errors raised while building a filter selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("{bound} hour must be between 0 and 23, got {hour}")]
    InvalidHour { bound: &'static str, hour: u32 },
}

/// The current time range and region selection.
///
/// The start instant is the start date at `HH:00:00`, the end instant is the
/// end date at `HH:59:59`. `start <= end` is not enforced; an inverted range
/// simply matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    start: NaiveDateTime,
    end: NaiveDateTime,
    pub state: RegionSelector,
    pub city: RegionSelector,
}

impl FilterSelection {
    /// Build a selection over every state and city.
    pub fn new(
        start_date: NaiveDate,
        start_hour: u32,
        end_date: NaiveDate,
        end_hour: u32,
    ) -> Result<Self, FilterError> {
        let start_time = NaiveTime::from_hms_opt(start_hour, 0, 0).ok_or(FilterError::InvalidHour {
            bound: "start",
            hour: start_hour,
        })?;
        let end_time = NaiveTime::from_hms_opt(end_hour, 59, 59).ok_or(FilterError::InvalidHour {
            bound: "end",
            hour: end_hour,
        })?;

        Ok(Self {
            start: start_date.and_time(start_time),
            end: end_date.and_time(end_time),
            state: RegionSelector::All,
            city: RegionSelector::All,
        })
    }

    /// Selection spanning whole days from `first` to `last`, hours 0 through 23.
    pub fn covering(first: NaiveDate, last: NaiveDate) -> Self {
        Self {
            start: first.and_time(NaiveTime::MIN),
            end: last.and_time(last_second_of_hour(23)),
            state: RegionSelector::All,
            city: RegionSelector::All,
        }
    }

    pub fn with_state(mut self, state: impl Into<RegionSelector>) -> Self {
        self.state = state.into();
        self
    }

    pub fn with_city(mut self, city: impl Into<RegionSelector>) -> Self {
        self.city = city.into();
        self
    }

    /// First instant included by the selection.
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Last instant included by the selection.
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn start_hour(&self) -> u32 {
        self.start.hour()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date()
    }

    pub fn end_hour(&self) -> u32 {
        self.end.hour()
    }

    /// Whether an instant falls inside `[start, end]`.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }
}

fn last_second_of_hour(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 59, 59).unwrap_or(NaiveTime::MIN)
}
