//! Application layer - turn orchestration over the domain and ports.

pub mod handlers;

pub use handlers::{HandleTurnHandler, TurnError, TurnReply, UserContext};
