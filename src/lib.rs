//! Trip Concierge - Conversational Travel Recommendation Engine
//!
//! This crate implements the slot-filling dialogue engine behind the
//! marketplace's recommendation assistant: intent detection, multi-turn
//! parameter gathering, availability resolution and bounded sampling.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
