//! Large-language-model fallback port.
//!
//! Consulted only when neither the dialogue engine nor the scripted table
//! claims the turn. This crate ships the interface only; the hosting
//! service wires a concrete provider with its own configuration struct.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// Free-form answer generation for utterances the rule layers do not cover.
#[async_trait]
pub trait AiResponder: Send + Sync {
    /// Produces a reply for the utterance.
    ///
    /// # Errors
    ///
    /// - `AiProviderError` on provider failure; callers fall back to the
    ///   fixed guidance message.
    async fn respond(&self, user_text: &str) -> Result<String, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ai_responder_is_object_safe() {
        fn _accepts_dyn(_responder: &dyn AiResponder) {}
    }
}
