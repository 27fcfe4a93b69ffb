use crate::models::BreedInfo;
use crate::services::cache::{CacheKey, CacheManager, CacheStats};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with the breed catalog
#[derive(Debug, Error)]
pub enum CatApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),
}

/// Breed record as returned by the catalog
#[derive(Debug, Deserialize)]
struct RawBreed {
    name: Option<String>,
    temperament: Option<String>,
    origin: Option<String>,
    description: Option<String>,
    life_span: Option<String>,
    hypoallergenic: Option<u8>,
    energy_level: Option<u8>,
    affection_level: Option<u8>,
}

impl From<RawBreed> for BreedInfo {
    fn from(raw: RawBreed) -> Self {
        let temperament = raw
            .temperament
            .map(|t| {
                t.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        BreedInfo {
            name: raw.name.unwrap_or_else(|| "Unknown".to_string()),
            temperament,
            origin: raw.origin.unwrap_or_else(|| "Unknown".to_string()),
            description: raw.description.unwrap_or_default(),
            life_span: raw.life_span.unwrap_or_else(|| "Unknown".to_string()),
            hypoallergenic: raw.hypoallergenic.unwrap_or(0) != 0,
            energy_level: raw.energy_level.filter(|l| *l > 0).unwrap_or(3),
            affection_level: raw.affection_level.filter(|l| *l > 0).unwrap_or(3),
        }
    }
}

/// TheCatAPI client for breed metadata
///
/// The full catalog is small, so it is fetched once and cached; single-breed
/// lookups are answered from the cached list.
pub struct CatApiClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
    cache: CacheManager,
}

impl CatApiClient {
    /// Create a new breed catalog client
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        timeout_secs: u64,
        cache: CacheManager,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key: api_key.filter(|k| !k.is_empty()),
            client,
            cache,
        }
    }

    /// Statistics of the breed cache
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Fetch every breed in the catalog
    pub async fn get_breeds(&self) -> Result<Vec<BreedInfo>, CatApiError> {
        if let Ok(breeds) = self.cache.get::<Vec<BreedInfo>>(&CacheKey::breeds()).await {
            return Ok(breeds);
        }

        let url = format!("{}/breeds", self.base_url.trim_end_matches('/'));

        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(CatApiError::ApiError(format!(
                "Failed to fetch breeds: {}",
                response.status()
            )));
        }

        let raw: Vec<RawBreed> = response.json().await?;
        let breeds: Vec<BreedInfo> = raw.into_iter().map(BreedInfo::from).collect();

        tracing::info!("Retrieved {} cat breeds from breed catalog", breeds.len());

        if let Err(e) = self.cache.set(&CacheKey::breeds(), &breeds).await {
            tracing::warn!("Failed to cache breed catalog: {}", e);
        }

        Ok(breeds)
    }

    /// Look up a breed by name, ignoring case
    pub async fn get_breed_by_name(&self, breed_name: &str) -> Result<Option<BreedInfo>, CatApiError> {
        let key = CacheKey::breed(breed_name);
        if let Ok(breed) = self.cache.get::<Option<BreedInfo>>(&key).await {
            return Ok(breed);
        }

        let breed = self
            .get_breeds()
            .await?
            .into_iter()
            .find(|b| b.name.eq_ignore_ascii_case(breed_name));

        if let Err(e) = self.cache.set(&key, &breed).await {
            tracing::warn!("Failed to cache breed {}: {}", breed_name, e);
        }

        Ok(breed)
    }

    /// Look up a breed, treating any failure as an unknown breed
    pub async fn lookup_breed(&self, breed_name: &str) -> Option<BreedInfo> {
        match self.get_breed_by_name(breed_name).await {
            Ok(breed) => breed,
            Err(e) => {
                tracing::warn!("Breed lookup failed for {}, treating as unknown: {}", breed_name, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_breed_conversion() {
        let raw: RawBreed = serde_json::from_value(serde_json::json!({
            "name": "Sphynx",
            "temperament": "Loyal, Inquisitive, Friendly",
            "origin": "Canada",
            "life_span": "12 - 14",
            "hypoallergenic": 1,
            "energy_level": 3,
            "affection_level": 5
        }))
        .unwrap();

        let breed = BreedInfo::from(raw);

        assert_eq!(breed.name, "Sphynx");
        assert_eq!(breed.temperament, vec!["Loyal", "Inquisitive", "Friendly"]);
        assert!(breed.hypoallergenic);
        assert_eq!(breed.affection_level, 5);
        assert_eq!(breed.description, "");
    }

    #[test]
    fn test_raw_breed_defaults() {
        let raw: RawBreed = serde_json::from_value(serde_json::json!({})).unwrap();
        let breed = BreedInfo::from(raw);

        assert_eq!(breed.name, "Unknown");
        assert!(breed.temperament.is_empty());
        assert!(!breed.hypoallergenic);
        assert_eq!(breed.energy_level, 3);
        assert_eq!(breed.affection_level, 3);
    }

    #[test]
    fn test_blank_api_key_is_ignored() {
        let client = CatApiClient::new(
            "https://api.thecatapi.test/v1".to_string(),
            Some(String::new()),
            10,
            CacheManager::new(10, 60),
        );

        assert!(client.api_key.is_none());
    }
}
