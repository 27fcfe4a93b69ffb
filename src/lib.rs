//! PurrfectMatch - Compatibility matching service for adoptable cats
//!
//! This library provides the compatibility scoring engine used by the
//! PurrfectMatch quiz, together with the shelter directory and breed catalog
//! clients that feed it and the HTTP routes that expose it.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{CompatibilityEngine, MatchResult, sort_by_compatibility};
pub use models::{UserProfile, CatProfile, BreedInfo, CompatibilityScore, Match, SearchCatsRequest, SearchCatsResponse};
