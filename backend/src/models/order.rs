use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse bucket of the day an order was placed in.
///
/// Hour ranges (inclusive):
///
/// | Label     | Hours         |
/// |-----------|---------------|
/// | Morning   | 05:00 – 11:59 |
/// | Afternoon | 12:00 – 16:59 |
/// | Evening   | 17:00 – 20:59 |
/// | Night     | 21:00 – 04:59 |
///
/// Variants are declared in chronological order starting from the morning,
/// which is the order of [`PartOfDay::ALL`] and of the legend. Grouped counts
/// are keyed by [`PartOfDay::label`] instead, so they come out alphabetical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PartOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl PartOfDay {
    pub const ALL: [PartOfDay; 4] = [
        PartOfDay::Morning,
        PartOfDay::Afternoon,
        PartOfDay::Evening,
        PartOfDay::Night,
    ];

    /// Classify an hour of day (0-23). Anything outside the day ranges is Night.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => PartOfDay::Morning,
            12..=16 => PartOfDay::Afternoon,
            17..=20 => PartOfDay::Evening,
            _ => PartOfDay::Night,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PartOfDay::Morning => "Morning",
            PartOfDay::Afternoon => "Afternoon",
            PartOfDay::Evening => "Evening",
            PartOfDay::Night => "Night",
        }
    }

    /// First and last hour of the bucket. Night wraps past midnight.
    pub fn hour_range(&self) -> (u32, u32) {
        match self {
            PartOfDay::Morning => (5, 11),
            PartOfDay::Afternoon => (12, 16),
            PartOfDay::Evening => (17, 20),
            PartOfDay::Night => (21, 4),
        }
    }
}

impl fmt::Display for PartOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a label is not one of the four parts of day.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown part of day '{0}'")]
pub struct UnknownPartOfDay(pub String);

impl FromStr for PartOfDay {
    type Err = UnknownPartOfDay;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Morning" => Ok(PartOfDay::Morning),
            "Afternoon" => Ok(PartOfDay::Afternoon),
            "Evening" => Ok(PartOfDay::Evening),
            "Night" => Ok(PartOfDay::Night),
            other => Err(UnknownPartOfDay(other.to_string())),
        }
    }
}

/// One row of the order table.
///
/// `order_id` is not unique: an order with several line items appears once
/// per item. Text fields are `None` where the source cell was empty; such
/// rows stay in the table but never match a specific region and are not
/// counted as orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: Option<String>,
    pub order_purchase_timestamp: NaiveDateTime,
    pub customer_state: Option<String>,
    pub customer_city: Option<String>,
    pub product_category_name: Option<String>,
    pub order_purchase_parts_of_day: PartOfDay,
}

impl OrderRecord {
    /// Calendar date the order was placed on.
    pub fn purchase_date(&self) -> NaiveDate {
        self.order_purchase_timestamp.date()
    }

    /// Hour of day (0-23) the order was placed in.
    pub fn purchase_hour(&self) -> u32 {
        self.order_purchase_timestamp.hour()
    }

    pub fn order_id(&self) -> Option<&str> {
        self.order_id.as_deref()
    }

    pub fn customer_state(&self) -> Option<&str> {
        self.customer_state.as_deref()
    }

    pub fn customer_city(&self) -> Option<&str> {
        self.customer_city.as_deref()
    }
}
