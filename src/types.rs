//! Common types used throughout brewstream
//!
//! Shared type definitions and type aliases used across multiple modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// One fetched batch of records for a given page index.
///
/// Ordered, possibly empty, and ephemeral: a page is drained by the flattener
/// immediately after it is fetched.
pub type Page<T> = Vec<T>;

/// The 1-based counter identifying which page to fetch next.
pub type PageIndex = u32;

// ============================================================================
// Records
// ============================================================================

/// A beer record as decoded from one page response.
///
/// Immutable once decoded; has no identity beyond structural equality.
/// Unknown upstream fields are ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beer {
    /// Display name
    pub name: String,
    /// Short marketing tagline
    pub tagline: String,
    /// Alcohol by volume, in percent
    pub abv: f64,
}

impl Beer {
    /// Create a new record
    pub fn new(name: impl Into<String>, tagline: impl Into<String>, abv: f64) -> Self {
        Self {
            name: name.into(),
            tagline: tagline.into(),
            abv,
        }
    }
}
