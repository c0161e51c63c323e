//! Dialogue step enum.

use serde::{Deserialize, Serialize};

/// The slot the dialogue is currently waiting on.
///
/// Exactly one step is current at any time. Transitions only move forward;
/// a validation failure re-prompts the same step and never rewinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogueStep {
    NeedCategory,
    NeedBundle,
    NeedLocation,
    NeedPriceMin,
    NeedPriceMax,
    NeedGuests,
    NeedCheckIn,
    NeedCheckOut,
    NeedVisitDate,
    NeedVisitTime,
    Complete,
}

impl DialogueStep {
    /// True once every slot has been filled and recommendations can run.
    pub fn is_terminal(&self) -> bool {
        matches!(self, DialogueStep::Complete)
    }
}

impl Default for DialogueStep {
    fn default() -> Self {
        DialogueStep::NeedCategory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_snake_case_wire_values() {
        assert_eq!(
            serde_json::to_string(&DialogueStep::NeedCheckIn).unwrap(),
            "\"need_check_in\""
        );
        let back: DialogueStep = serde_json::from_str("\"need_visit_time\"").unwrap();
        assert_eq!(back, DialogueStep::NeedVisitTime);
    }

    #[test]
    fn only_complete_is_terminal() {
        assert!(DialogueStep::Complete.is_terminal());
        assert!(!DialogueStep::NeedCategory.is_terminal());
        assert!(!DialogueStep::NeedVisitTime.is_terminal());
    }

    #[test]
    fn default_step_starts_the_flow() {
        assert_eq!(DialogueStep::default(), DialogueStep::NeedCategory);
    }
}
