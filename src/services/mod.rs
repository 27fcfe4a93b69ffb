// Service exports
pub mod cache;
pub mod catapi;
pub mod petfinder;

pub use cache::{CacheManager, CacheKey, CacheError, CacheStats};
pub use catapi::{CatApiClient, CatApiError};
pub use petfinder::{PetfinderClient, PetfinderError};
