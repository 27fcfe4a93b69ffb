// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BreedInfo, CatProfile, CompatibilityScore, ExperienceLevel, HomeType, Match, MatchRating,
    Temperament, UserProfile,
};
pub use requests::SearchCatsRequest;
pub use responses::{ErrorResponse, HealthResponse, SearchCatsResponse};
