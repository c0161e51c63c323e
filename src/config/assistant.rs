//! Assistant configuration

use serde::Deserialize;

use crate::domain::recommendation::SelectorConfig;

use super::error::ValidationError;

/// Bounds for the recommendation flow.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    /// Hard cap on recommendations per reply
    #[serde(default = "default_max_recommendations")]
    pub max_recommendations: usize,

    /// Minimum not-yet-reviewed pool size before reviewed entries are
    /// mixed back in
    #[serde(default = "default_fresh_pool_threshold")]
    pub fresh_pool_threshold: usize,

    /// Candidate cap applied by catalog store adapters after filtering
    #[serde(default = "default_candidate_limit")]
    pub candidate_limit: usize,
}

impl AssistantConfig {
    /// Selector bounds derived from this configuration.
    pub fn selector_config(&self) -> SelectorConfig {
        SelectorConfig {
            max_results: self.max_recommendations,
            fresh_pool_threshold: self.fresh_pool_threshold,
        }
    }

    /// Validate assistant configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_recommendations == 0 {
            return Err(ValidationError::InvalidMaxRecommendations);
        }
        if self.candidate_limit < self.max_recommendations {
            return Err(ValidationError::CandidateLimitTooSmall);
        }
        Ok(())
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            max_recommendations: default_max_recommendations(),
            fresh_pool_threshold: default_fresh_pool_threshold(),
            candidate_limit: default_candidate_limit(),
        }
    }
}

fn default_max_recommendations() -> usize {
    3
}

fn default_fresh_pool_threshold() -> usize {
    3
}

fn default_candidate_limit() -> usize {
    20
}
