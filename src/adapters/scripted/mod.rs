//! Scripted-response adapters.

mod rules;

pub use rules::StaticScriptedResponder;
