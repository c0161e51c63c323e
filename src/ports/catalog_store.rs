//! Catalog store port (read side).
//!
//! The engine issues at most one candidate query per terminal turn and
//! never writes. Entries arrive with their blocked intervals and, for
//! restaurants, their weekly schedule rows preloaded.

use async_trait::async_trait;
use std::collections::HashSet;

use crate::domain::catalog::{CatalogEntry, Category};
use crate::domain::foundation::{DomainError, PlaceId, UserId};

/// Filters applied at the store, before availability resolution.
///
/// `location` is a case-insensitive substring matched across the entry's
/// city/state, name and country. Price bounds and capacity only apply to
/// the lodging categories; entries without a declared capacity pass the
/// capacity filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateQuery {
    pub category: Option<Category>,
    pub location: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_capacity: Option<u32>,
}

impl CandidateQuery {
    /// Query for every entry of a category.
    pub fn for_category(category: Category) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn with_min_capacity(mut self, capacity: Option<u32>) -> Self {
        self.min_capacity = capacity;
        self
    }
}

/// Read-only access to the external catalog.
///
/// Implementations must return entries ordered by rating (descending, then
/// name ascending) and may cap the candidate count; the selector handles
/// everything past that point.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Entries matching the query filters, availability not yet resolved.
    ///
    /// # Errors
    ///
    /// - `CatalogUnavailable` when the store cannot be reached; the
    ///   containing request fails hard, there is no fallback source.
    async fn query_candidates(&self, query: &CandidateQuery)
        -> Result<Vec<CatalogEntry>, DomainError>;

    /// Ids of the entries the user has already reviewed.
    async fn reviewed_entry_ids(&self, user_id: UserId)
        -> Result<HashSet<PlaceId>, DomainError>;
}
