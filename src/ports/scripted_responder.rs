//! Scripted-response matcher port.
//!
//! Intercepts utterances before they reach the dialogue engine when no
//! recommendation flow is active. Pure table lookup, so the port is
//! synchronous.

use crate::domain::assistant::PendingIntent;

/// A matched scripted reply; `next_intent` may open a dialogue.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedReply {
    pub message: String,
    pub next_intent: Option<PendingIntent>,
}

impl ScriptedReply {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            next_intent: None,
        }
    }

    pub fn with_next_intent(mut self, intent: PendingIntent) -> Self {
        self.next_intent = Some(intent);
        self
    }
}

/// Keyword-table matcher consulted outside an active dialogue.
pub trait ScriptedResponder: Send + Sync {
    /// First matching scripted reply, personalized with `user_name` when
    /// the template supports it. `None` hands the turn to the fallback.
    fn match_response(&self, text: &str, user_name: Option<&str>) -> Option<ScriptedReply>;
}
