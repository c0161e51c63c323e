//! Recommendation domain - candidate filtering, biasing and sampling.

mod selector;

pub use selector::{RecommendationSelector, Selection, SelectorConfig};
