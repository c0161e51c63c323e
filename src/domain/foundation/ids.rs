//! Strongly-typed identifier value objects.
//!
//! The catalog store keys places and users with integers; these newtypes
//! keep the two id spaces from being mixed up inside the engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a catalog entry (place).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(i64);

impl PlaceId {
    /// Creates a PlaceId from the store's integer key.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the inner integer key.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for PlaceId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Unique identifier for a marketplace user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Creates a UserId from the store's integer key.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the inner integer key.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
