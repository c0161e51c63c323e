//! HandleTurnHandler - one conversational turn, end to end.
//!
//! Dispatch order per turn: an active recommendation dialogue always wins;
//! then the explicit new-search trigger set; then the scripted table; then
//! the implicit category entry; finally the AI fallback (or the fixed
//! fallback message). The handler is stateless — the caller round-trips
//! the returned state on the next turn.

use chrono::{NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::assistant::{
    detect_category, is_new_search_request, prompts, AssistantState, DialogueEngine,
    PendingIntent, TravelPreferences, TurnOutcome,
};
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::recommendation::RecommendationSelector;
use crate::ports::{AiResponder, CandidateQuery, CatalogStore, ScriptedResponder};

/// Who is talking, as far as the engine needs to know.
#[derive(Debug, Clone, Default)]
pub struct UserContext {
    /// Set for authenticated users; enables the reviewed-entry bias.
    pub user_id: Option<UserId>,
    /// Display name for personalized replies.
    pub user_name: Option<String>,
}

/// Reply text plus the state the caller must round-trip (`None` ends the
/// session).
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReply {
    pub message: String,
    pub state: Option<AssistantState>,
}

/// Hard failures of a turn. Everything user-correctable is a normal reply.
#[derive(Debug, Clone, Error)]
pub enum TurnError {
    #[error("El mensaje no puede estar vacío.")]
    EmptyMessage,

    #[error(transparent)]
    Catalog(#[from] DomainError),
}

/// Orchestrates one turn across the engine, the catalog and the fallbacks.
pub struct HandleTurnHandler {
    catalog: Arc<dyn CatalogStore>,
    scripted: Arc<dyn ScriptedResponder>,
    ai: Option<Arc<dyn AiResponder>>,
    selector: RecommendationSelector,
}

impl HandleTurnHandler {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        scripted: Arc<dyn ScriptedResponder>,
        selector: RecommendationSelector,
    ) -> Self {
        Self {
            catalog,
            scripted,
            ai: None,
            selector,
        }
    }

    /// Wires the optional LLM fallback.
    pub fn with_ai_responder(mut self, ai: Arc<dyn AiResponder>) -> Self {
        self.ai = Some(ai);
        self
    }

    /// Handles a turn against today's date with a per-call entropy-seeded
    /// sampler.
    pub async fn handle(
        &self,
        user_text: &str,
        state: Option<AssistantState>,
        ctx: &UserContext,
    ) -> Result<TurnReply, TurnError> {
        let mut rng = StdRng::from_entropy();
        self.handle_with_rng(user_text, state, ctx, Utc::now().date_naive(), &mut rng)
            .await
    }

    /// Handles a turn with an injected reference date and sampler, so
    /// tests can pin both the year-completion rule and the sample.
    pub async fn handle_with_rng(
        &self,
        user_text: &str,
        state: Option<AssistantState>,
        ctx: &UserContext,
        reference_date: NaiveDate,
        rng: &mut dyn RngCore,
    ) -> Result<TurnReply, TurnError> {
        let text = user_text.trim();
        if text.is_empty() {
            return Err(TurnError::EmptyMessage);
        }
        let state = state.unwrap_or_default();

        if state.has_active_recommendation() {
            return self
                .drive_dialogue(text, &state, ctx, reference_date, rng)
                .await;
        }

        if is_new_search_request(text) {
            let fresh = AssistantState::recommending(TravelPreferences::new());
            return Ok(TurnReply {
                message: prompts::ASK_CATEGORY_FRESH.to_string(),
                state: fresh.normalized(),
            });
        }

        if let Some(reply) = self.scripted.match_response(text, ctx.user_name.as_deref()) {
            let next_state = match reply.next_intent {
                Some(PendingIntent::TravelRecommendation) => {
                    AssistantState::recommending(TravelPreferences::new()).normalized()
                }
                None => None,
            };
            return Ok(TurnReply {
                message: reply.message,
                state: next_state,
            });
        }

        // Without a session, an utterance naming a category expresses a
        // new search and enters the flow at the category step.
        if detect_category(text).is_some() {
            let fresh = AssistantState::recommending(TravelPreferences::new());
            return self
                .drive_dialogue(text, &fresh, ctx, reference_date, rng)
                .await;
        }

        if let Some(ai) = &self.ai {
            match ai.respond(text).await {
                Ok(message) => {
                    return Ok(TurnReply {
                        message,
                        state: None,
                    })
                }
                Err(err) => {
                    tracing::warn!(error = %err, "ai responder failed, using fallback message");
                }
            }
        }

        Ok(TurnReply {
            message: prompts::FALLBACK_MESSAGE.to_string(),
            state: None,
        })
    }

    async fn drive_dialogue(
        &self,
        text: &str,
        state: &AssistantState,
        ctx: &UserContext,
        reference_date: NaiveDate,
        rng: &mut dyn RngCore,
    ) -> Result<TurnReply, TurnError> {
        let prefs = state.travel_preferences.clone().unwrap_or_default();
        let engine = DialogueEngine::new(reference_date);

        match engine.advance(&prefs, text) {
            TurnOutcome::Prompt {
                message,
                preferences,
            } => Ok(TurnReply {
                message,
                state: Some(AssistantState::recommending(preferences)),
            }),
            TurnOutcome::Reset { message } => Ok(TurnReply {
                message,
                state: None,
            }),
            TurnOutcome::Ready { preferences } => self.recommend(&preferences, ctx, rng).await,
        }
    }

    async fn recommend(
        &self,
        prefs: &TravelPreferences,
        ctx: &UserContext,
        rng: &mut dyn RngCore,
    ) -> Result<TurnReply, TurnError> {
        // The legacy single-slot entry can complete without a confirmed
        // category; nothing in the store can match it.
        let Some(category) = prefs.category else {
            return Ok(TurnReply {
                message: prompts::NO_LODGING_RESULTS.to_string(),
                state: None,
            });
        };

        let mut query = CandidateQuery::for_category(category);
        query.location = prefs.location.clone();
        if !category.is_restaurant() {
            query.min_price = prefs.min_price;
            query.max_price = prefs.max_price;
            query.min_capacity = prefs.guests;
        }
        let candidates = self.catalog.query_candidates(&query).await?;

        let reviewed = match ctx.user_id {
            Some(user_id) => self.catalog.reviewed_entry_ids(user_id).await?,
            None => HashSet::new(),
        };

        let selection = self.selector.select(
            category,
            prefs,
            &candidates,
            &reviewed,
            ctx.user_name.as_deref(),
            rng,
        );
        tracing::info!(
            category = %category,
            recommended = selection.places.len(),
            "recommendation dialogue completed"
        );

        let state = AssistantState::recommended(selection.places, Some(category));
        Ok(TurnReply {
            message: selection.message,
            state: state.normalized(),
        })
    }
}
