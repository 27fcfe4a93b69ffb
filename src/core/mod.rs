// Core algorithm exports
pub mod engine;
pub mod reasons;
pub mod scoring;
pub mod traits;

pub use engine::{CompatibilityEngine, MatchResult, sort_by_compatibility};
pub use reasons::generate_reasons;
pub use scoring::{experience_score, lifestyle_score, personality_score, trait_bonus, EXPERIENCE_TABLE};
pub use traits::{derive_attributes, is_probably_cat, DerivedAttributes};
