//! In-Memory Catalog Store Adapter
//!
//! Holds entries and per-user review history in memory. Useful for tests
//! and demos; mirrors the ordering and filter semantics of the backing
//! store (rating descending, name ascending, bounded candidate count).

use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::catalog::CatalogEntry;
use crate::domain::foundation::{DomainError, PlaceId, UserId};
use crate::ports::{CandidateQuery, CatalogStore};

const DEFAULT_CANDIDATE_LIMIT: usize = 20;

/// In-memory store for catalog entries and review history.
#[derive(Debug, Clone)]
pub struct InMemoryCatalogStore {
    entries: Arc<RwLock<Vec<CatalogEntry>>>,
    reviews: Arc<RwLock<HashMap<UserId, HashSet<PlaceId>>>>,
    candidate_limit: usize,
}

impl InMemoryCatalogStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
            reviews: Arc::new(RwLock::new(HashMap::new())),
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
        }
    }

    /// Override the candidate cap applied after filtering.
    pub fn with_candidate_limit(mut self, limit: usize) -> Self {
        self.candidate_limit = limit;
        self
    }

    /// Seed a catalog entry.
    pub async fn add_entry(&self, entry: CatalogEntry) {
        self.entries.write().await.push(entry);
    }

    /// Record that a user reviewed an entry.
    pub async fn add_review(&self, user_id: UserId, place_id: PlaceId) {
        self.reviews
            .write()
            .await
            .entry(user_id)
            .or_default()
            .insert(place_id);
    }

    /// Number of seeded entries (useful for tests).
    pub async fn entry_count(&self) -> usize {
        self.entries.read().await.len()
    }

    fn matches(query: &CandidateQuery, entry: &CatalogEntry) -> bool {
        if let Some(category) = query.category {
            if entry.category != category {
                return false;
            }
        }
        if let Some(location) = &query.location {
            let needle = location.trim().to_lowercase();
            let haystacks = [
                entry.city_state.as_deref(),
                Some(entry.name.as_str()),
                entry.country.as_deref(),
            ];
            let hit = haystacks
                .iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        if let Some(min_price) = query.min_price {
            if !entry.price_per_night.is_some_and(|price| price >= min_price) {
                return false;
            }
        }
        if let Some(max_price) = query.max_price {
            if !entry.price_per_night.is_some_and(|price| price <= max_price) {
                return false;
            }
        }
        if let Some(min_capacity) = query.min_capacity {
            // Entries without a declared capacity pass the filter.
            if entry
                .capacity
                .is_some_and(|capacity| capacity < min_capacity)
            {
                return false;
            }
        }
        true
    }
}

impl Default for InMemoryCatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn query_candidates(
        &self,
        query: &CandidateQuery,
    ) -> Result<Vec<CatalogEntry>, DomainError> {
        let entries = self.entries.read().await;
        let mut matched: Vec<CatalogEntry> = entries
            .iter()
            .filter(|entry| Self::matches(query, entry))
            .cloned()
            .collect();
        matched.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });
        matched.truncate(self.candidate_limit);
        Ok(matched)
    }

    async fn reviewed_entry_ids(&self, user_id: UserId) -> Result<HashSet<PlaceId>, DomainError> {
        let reviews = self.reviews.read().await;
        Ok(reviews.get(&user_id).cloned().unwrap_or_default())
    }
}
