use crate::core::traits::{derive_attributes, is_probably_cat};
use crate::models::CatProfile;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;

/// Seconds shaved off a token's lifetime so it is refreshed before expiry
const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;

/// Errors that can occur when interacting with the shelter directory
#[derive(Debug, Error)]
pub enum PetfinderError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: invalid client credentials")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Cached OAuth2 bearer token
#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Petfinder API client
///
/// Handles all communication with the shelter directory including:
/// - Client-credentials token acquisition and reuse
/// - Searching adoptable cats near a location
/// - Turning raw listings into scored-ready [`CatProfile`]s
pub struct PetfinderClient {
    base_url: String,
    api_key: String,
    secret: String,
    client: Client,
    token: Mutex<Option<AccessToken>>,
}

impl PetfinderClient {
    /// Create a new Petfinder client
    pub fn new(base_url: String, api_key: String, secret: String, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            secret,
            client,
            token: Mutex::new(None),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Get a bearer token, requesting a new one when the cached token is stale
    async fn access_token(&self) -> Result<String, PetfinderError> {
        let mut cached = self.token.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.is_fresh(Utc::now()) {
                return Ok(token.value.clone());
            }
        }

        tracing::debug!("Requesting Petfinder access token");

        let response = self
            .client
            .post(self.url("oauth2/token"))
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.api_key.as_str()),
                ("client_secret", self.secret.as_str()),
            ])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(PetfinderError::Unauthorized);
        }

        if !response.status().is_success() {
            return Err(PetfinderError::ApiError(format!(
                "Failed to obtain access token: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let value = json
            .get("access_token")
            .and_then(|t| t.as_str())
            .ok_or_else(|| PetfinderError::InvalidResponse("Missing access_token".into()))?
            .to_string();

        let expires_in = json
            .get("expires_in")
            .and_then(|e| e.as_i64())
            .ok_or_else(|| PetfinderError::InvalidResponse("Missing expires_in".into()))?;

        let expires_at = token_expiry(Utc::now(), expires_in)
            .ok_or_else(|| PetfinderError::InvalidResponse(format!("expires_in out of range: {}", expires_in)))?;

        *cached = Some(AccessToken {
            value: value.clone(),
            expires_at,
        });

        tracing::debug!("Obtained Petfinder access token (expires at {})", expires_at);

        Ok(value)
    }

    /// Search adoptable cats near a location
    ///
    /// Listings are de-duplicated by id; non-cats are dropped and each cat's
    /// compatibility attributes are derived from its description.
    pub async fn search_cats(
        &self,
        location: &str,
        limit: usize,
    ) -> Result<Vec<CatProfile>, PetfinderError> {
        let token = self.access_token().await?;

        let url = format!(
            "{}?type=cat&location={}&limit={}&status=adoptable",
            self.url("animals"),
            urlencoding::encode(location),
            limit
        );

        tracing::debug!("Searching Petfinder: {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&token)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            // Drop the token so the next search re-authenticates
            *self.token.lock().await = None;
            return Err(PetfinderError::Unauthorized);
        }

        if !response.status().is_success() {
            return Err(PetfinderError::ApiError(format!(
                "Failed to search animals: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let animals = json
            .get("animals")
            .and_then(|a| a.as_array())
            .ok_or_else(|| PetfinderError::InvalidResponse("Missing animals array".into()))?;

        tracing::debug!("Petfinder returned {} animals near {}", animals.len(), location);

        Ok(collect_unique_cats(animals))
    }
}

/// Instant a token should be refreshed, or `None` when `expires_in` cannot be represented
fn token_expiry(now: DateTime<Utc>, expires_in: i64) -> Option<DateTime<Utc>> {
    ChronoDuration::try_seconds(expires_in.saturating_sub(TOKEN_REFRESH_MARGIN_SECS))
        .and_then(|lifetime| now.checked_add_signed(lifetime))
}

/// Convert raw listings into cat profiles, merging duplicate ids
///
/// The first record for an id wins; later duplicates only fill in missing
/// photos and contact details.
pub fn collect_unique_cats(animals: &[Value]) -> Vec<CatProfile> {
    let mut cats: Vec<CatProfile> = Vec::new();
    let mut index_by_id: HashMap<String, usize> = HashMap::new();

    for animal in animals {
        let description = str_field(animal, "description").unwrap_or_default();
        let name = str_field(animal, "name").unwrap_or("Unknown");

        if !is_probably_cat(str_field(animal, "type"), description) {
            tracing::debug!("Skipping non-cat listing: {}", name);
            continue;
        }

        let cat_id = listing_id(animal);

        if let Some(&existing) = index_by_id.get(&cat_id) {
            merge_listing(&mut cats[existing], animal);
            continue;
        }

        let cat = parse_listing(cat_id.clone(), animal);
        tracing::trace!(
            "Cat {}: energy={}, independence={}, traits={:?}",
            cat.name,
            cat.energy_level,
            cat.independence,
            cat.personality_traits
        );

        index_by_id.insert(cat_id, cats.len());
        cats.push(cat);
    }

    cats
}

fn parse_listing(id: String, animal: &Value) -> CatProfile {
    let description = str_field(animal, "description").unwrap_or_default().to_string();
    let derived = derive_attributes(&description);
    let contact = animal.get("contact");

    let breeds = ["primary", "secondary"]
        .iter()
        .filter_map(|key| {
            animal
                .get("breeds")
                .and_then(|b| b.get(*key))
                .and_then(|b| b.as_str())
                .filter(|b| !b.is_empty())
                .map(str::to_string)
        })
        .collect();

    CatProfile {
        id,
        name: text_or(animal, "name", "Unknown"),
        age: text_or(animal, "age", "Unknown"),
        breeds,
        size: text_or(animal, "size", "Unknown"),
        gender: text_or(animal, "gender", "Unknown"),
        description,
        photos: photo_urls(animal),
        contact_email: contact.and_then(|c| str_field(c, "email")).unwrap_or_default().to_string(),
        contact_phone: contact.and_then(|c| str_field(c, "phone")).unwrap_or_default().to_string(),
        shelter_name: text_or(animal, "organization_id", "Unknown Shelter"),
        distance: animal.get("distance").and_then(|d| d.as_f64()),
        energy_level: derived.energy_level,
        independence: derived.independence,
        personality_traits: derived.personality_traits,
        temperament: derived.temperament,
    }
}

fn merge_listing(existing: &mut CatProfile, animal: &Value) {
    let photos = photo_urls(animal);
    if !photos.is_empty() && existing.photos.is_empty() {
        existing.photos = photos;
    }

    let contact = animal.get("contact");
    if existing.contact_email.is_empty() {
        if let Some(email) = contact.and_then(|c| str_field(c, "email")) {
            existing.contact_email = email.to_string();
        }
    }
    if existing.contact_phone.is_empty() {
        if let Some(phone) = contact.and_then(|c| str_field(c, "phone")) {
            existing.contact_phone = phone.to_string();
        }
    }
}

fn listing_id(animal: &Value) -> String {
    match animal.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => String::new(),
    }
}

fn photo_urls(animal: &Value) -> Vec<String> {
    animal
        .get("photos")
        .and_then(|p| p.as_array())
        .map(|photos| {
            photos
                .iter()
                .filter_map(|photo| str_field(photo, "large"))
                .filter(|url| !url.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(|v| v.as_str()).filter(|s| !s.is_empty())
}

fn text_or(value: &Value, key: &str, default: &str) -> String {
    str_field(value, key).unwrap_or(default).to_string()
}
