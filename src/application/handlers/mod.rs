//! Application handlers.
//!
//! One handler per transport-facing operation; `handle_turn` is the whole
//! wire surface of the assistant.

mod handle_turn;

pub use handle_turn::{HandleTurnHandler, TurnError, TurnReply, UserContext};
