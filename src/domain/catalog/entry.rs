//! Catalog entry attributes consumed by the engine.
//!
//! Entries arrive preloaded from the catalog store with their blocked-date
//! intervals and, for restaurants, their weekly schedule rows. The engine
//! never mutates them.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::PlaceId;

/// Listing category. `Restaurante` follows the visit-date/visit-time
/// dialogue branch; the other two follow the price/guests/stay branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Hotel,
    Restaurante,
    Alojamiento,
}

impl Category {
    /// Wire/display value, as stored by the catalog.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Hotel => "hotel",
            Category::Restaurante => "restaurante",
            Category::Alojamiento => "alojamiento",
        }
    }

    /// True for the category that books a table rather than a stay.
    pub fn is_restaurant(&self) -> bool {
        matches!(self, Category::Restaurante)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hotel" => Ok(Category::Hotel),
            "restaurante" => Ok(Category::Restaurante),
            "alojamiento" => Ok(Category::Alojamiento),
            other => Err(format!("unknown category: {}", other)),
        }
    }
}

/// Date range during which an entry cannot be booked or visited.
///
/// Stored as `[start, end)` for stay overlap checks; the visit path treats
/// both bounds as inclusive (single-day reservation semantics).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedInterval {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl BlockedInterval {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }
}

/// One weekly-schedule row for a restaurant-like entry.
///
/// `day_of_week` is kept as stored; [`normalize_weekday`] applies the
/// accepted contract when the row is consulted.
///
/// [`normalize_weekday`]: super::normalize_weekday
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub day_of_week: i32,
    pub opening_time: Option<NaiveTime>,
    pub closing_time: Option<NaiveTime>,
    pub is_closed: bool,
}

impl ScheduleRow {
    /// Open row with explicit hours.
    pub fn open(day_of_week: i32, opening: NaiveTime, closing: NaiveTime) -> Self {
        Self {
            day_of_week,
            opening_time: Some(opening),
            closing_time: Some(closing),
            is_closed: false,
        }
    }

    /// Row marking the whole day as closed.
    pub fn closed(day_of_week: i32) -> Self {
        Self {
            day_of_week,
            opening_time: None,
            closing_time: None,
            is_closed: true,
        }
    }
}

/// Read-only catalog entry as the recommendation flow sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: PlaceId,
    pub name: String,
    pub category: Category,
    pub country: Option<String>,
    pub city_state: Option<String>,
    pub price_per_night: Option<f64>,
    pub capacity: Option<u32>,
    pub rating: f64,
    #[serde(default)]
    pub blocked: Vec<BlockedInterval>,
    #[serde(default)]
    pub schedule: Vec<ScheduleRow>,
}

impl CatalogEntry {
    /// Location shown in replies: city/state, falling back to country.
    pub fn location_label(&self) -> &str {
        self.city_state
            .as_deref()
            .or(self.country.as_deref())
            .unwrap_or("sin ubicación")
    }
}
