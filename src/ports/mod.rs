//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the dialogue core and the outside world. Adapters implement these
//! ports.
//!
//! - `CatalogStore` - candidate queries and per-user review history
//! - `ScriptedResponder` - keyword-table replies outside the dialogue
//! - `AiResponder` - large-language-model fallback (interface only)

mod ai_responder;
mod catalog_store;
mod scripted_responder;

pub use ai_responder::AiResponder;
pub use catalog_store::{CandidateQuery, CatalogStore};
pub use scripted_responder::{ScriptedReply, ScriptedResponder};
