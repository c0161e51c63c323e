//! The slot record gathered across the recommendation dialogue.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::catalog::Category;

use super::step::DialogueStep;

/// Every slot the recommendation flow can fill, plus the current step.
///
/// Treated as an immutable value: each transition builds a replacement via
/// the `with_*` constructors instead of mutating in place, so a failed
/// validation trivially keeps every previously confirmed field. The
/// lodging path fills prices/guests/check-in/check-out; the restaurant
/// path fills visit date/time (each optionally a range). `category` never
/// changes once set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TravelPreferences {
    #[serde(default)]
    pub step: DialogueStep,
    pub category: Option<Category>,
    pub location: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub guests: Option<u32>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub visit_date: Option<NaiveDate>,
    pub visit_date_end: Option<NaiveDate>,
    pub visit_time: Option<NaiveTime>,
    pub visit_time_end: Option<NaiveTime>,
}

impl TravelPreferences {
    /// Fresh record at the start of the flow.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the category selects the restaurant branch.
    pub fn is_restaurant(&self) -> bool {
        self.category.map(|c| c.is_restaurant()).unwrap_or(false)
    }

    /// Copy with the category confirmed and the step advanced.
    pub fn with_category(&self, category: Category, step: DialogueStep) -> Self {
        Self {
            category: Some(category),
            step,
            ..self.clone()
        }
    }

    /// Copy with a new current step.
    pub fn with_step(&self, step: DialogueStep) -> Self {
        Self {
            step,
            ..self.clone()
        }
    }

    /// Copy with the location confirmed and the step advanced.
    pub fn with_location(&self, location: impl Into<String>, step: DialogueStep) -> Self {
        Self {
            location: Some(location.into()),
            step,
            ..self.clone()
        }
    }

    /// Copy with the minimum price confirmed.
    pub fn with_min_price(&self, min_price: f64, step: DialogueStep) -> Self {
        Self {
            min_price: Some(min_price),
            step,
            ..self.clone()
        }
    }

    /// Copy with the maximum price confirmed.
    pub fn with_max_price(&self, max_price: f64, step: DialogueStep) -> Self {
        Self {
            max_price: Some(max_price),
            step,
            ..self.clone()
        }
    }

    /// Copy with the guest count confirmed.
    pub fn with_guests(&self, guests: u32, step: DialogueStep) -> Self {
        Self {
            guests: Some(guests),
            step,
            ..self.clone()
        }
    }

    /// Copy with the check-in date confirmed.
    pub fn with_check_in(&self, check_in: NaiveDate, step: DialogueStep) -> Self {
        Self {
            check_in: Some(check_in),
            step,
            ..self.clone()
        }
    }

    /// Copy with the check-out date confirmed; callers validate the
    /// check-out follows the check-in before building this.
    pub fn with_check_out(&self, check_out: NaiveDate, step: DialogueStep) -> Self {
        Self {
            check_out: Some(check_out),
            step,
            ..self.clone()
        }
    }

    /// Copy with the visit date (and optional range end) confirmed.
    pub fn with_visit_dates(
        &self,
        visit_date: NaiveDate,
        visit_date_end: Option<NaiveDate>,
        step: DialogueStep,
    ) -> Self {
        Self {
            visit_date: Some(visit_date),
            visit_date_end,
            step,
            ..self.clone()
        }
    }

    /// Copy with the visit time (and optional range end) confirmed.
    pub fn with_visit_times(
        &self,
        visit_time: NaiveTime,
        visit_time_end: Option<NaiveTime>,
        step: DialogueStep,
    ) -> Self {
        Self {
            visit_time: Some(visit_time),
            visit_time_end,
            step,
            ..self.clone()
        }
    }
}
