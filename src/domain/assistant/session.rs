//! The round-tripped dialogue state envelope.
//!
//! The caller is the sole authority for state continuity: the engine reads
//! the envelope as an immutable input each turn and emits a replacement
//! (or `None` once there is nothing left worth carrying).

use serde::{Deserialize, Serialize};

use crate::domain::catalog::Category;
use crate::domain::foundation::PlaceId;

use super::preferences::TravelPreferences;

/// Multi-turn intent the assistant is currently driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingIntent {
    TravelRecommendation,
}

/// Light reference to a recommended catalog entry, kept in the session so
/// adjacent intents (rewards lookups) can refer back to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedPlace {
    pub id: Option<PlaceId>,
    pub name: String,
    pub category: Option<Category>,
}

/// The externally visible assistant state, round-tripped by the client on
/// every turn.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AssistantState {
    pub pending_intent: Option<PendingIntent>,
    pub travel_preferences: Option<TravelPreferences>,
    #[serde(default)]
    pub recommended_places: Vec<RecommendedPlace>,
    pub last_category: Option<Category>,
    #[serde(default)]
    pub rewards_context: bool,
}

impl AssistantState {
    /// State carrying an in-progress recommendation dialogue.
    pub fn recommending(preferences: TravelPreferences) -> Self {
        Self {
            pending_intent: Some(PendingIntent::TravelRecommendation),
            travel_preferences: Some(preferences),
            ..Self::default()
        }
    }

    /// Terminal state after a completed recommendation: the produced
    /// references and the category, with the dialogue itself discarded.
    pub fn recommended(places: Vec<RecommendedPlace>, last_category: Option<Category>) -> Self {
        Self {
            pending_intent: None,
            travel_preferences: None,
            recommended_places: places,
            last_category,
            rewards_context: false,
        }
    }

    /// True when the envelope carries nothing worth round-tripping.
    pub fn is_empty(&self) -> bool {
        self.pending_intent.is_none()
            && self.travel_preferences.is_none()
            && self.recommended_places.is_empty()
            && self.last_category.is_none()
            && !self.rewards_context
    }

    /// Collapses an all-empty state to `None` so the caller can drop the
    /// session entirely.
    pub fn normalized(self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }

    /// True while the travel-recommendation dialogue is active.
    pub fn has_active_recommendation(&self) -> bool {
        matches!(self.pending_intent, Some(PendingIntent::TravelRecommendation))
    }
}
