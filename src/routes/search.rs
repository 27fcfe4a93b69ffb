use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{BreedInfo, CatProfile, ErrorResponse, HealthResponse, SearchCatsRequest, SearchCatsResponse};
use crate::services::{CatApiClient, PetfinderClient};
use crate::core::CompatibilityEngine;
use std::collections::HashMap;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// `None` when shelter directory credentials are not configured
    pub shelter: Option<Arc<PetfinderClient>>,
    pub breeds: Arc<CatApiClient>,
    pub engine: CompatibilityEngine,
    pub search_limit: usize,
    pub result_limit: usize,
}

/// Configure all search-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/search-cats", web::post().to(search_cats));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let (status, shelter_directory) = if state.shelter.is_some() {
        ("healthy", "configured")
    } else {
        ("degraded", "not_configured")
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        shelter_directory: shelter_directory.to_string(),
        breed_cache: state.breeds.cache_stats(),
    })
}

fn bad_request(error: &str, message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 400,
    })
}

fn empty_response(message: String, needs_api_keys: bool) -> HttpResponse {
    HttpResponse::Ok().json(SearchCatsResponse {
        search_id: uuid::Uuid::new_v4().to_string(),
        matches: vec![],
        total: 0,
        message,
        needs_api_keys,
    })
}

/// Search cats endpoint
///
/// POST /api/v1/search-cats
///
/// Request body:
/// ```json
/// {
///   "user": {
///     "homeType": "apartment",
///     "hoursAwayPerDay": 6,
///     "activityLevel": 5,
///     "experience": "first_time",
///     "hasAllergies": false,
///     "desiredTraits": ["calm"],
///     "zipCode": "10001"
///   }
/// }
/// ```
async fn search_cats(
    state: web::Data<AppState>,
    req: web::Json<SearchCatsRequest>,
) -> impl Responder {
    let user = &req.user;

    if user.zip_code.trim().is_empty() {
        return bad_request("ZIP code is required", "zipCode must not be empty".to_string());
    }

    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for search_cats request: {:?}", errors);
        return bad_request("Validation failed", errors.to_string());
    }

    tracing::info!(
        "Search request: home={:?}, hours_away={}, activity={}, experience={:?}, zip={}, traits={:?}",
        user.home_type,
        user.hours_away_per_day,
        user.activity_level,
        user.experience,
        user.zip_code,
        user.desired_traits
    );

    let Some(shelter) = state.shelter.as_ref() else {
        tracing::warn!("Shelter directory credentials missing, returning no matches");
        return empty_response(
            "API keys needed for Petfinder and TheCatAPI to fetch real cats. Your quiz data was received successfully!"
                .to_string(),
            true,
        );
    };

    let cats = match shelter.search_cats(&user.zip_code, state.search_limit).await {
        Ok(cats) => cats,
        Err(e) => {
            tracing::error!("Shelter directory search failed for {}: {}", user.zip_code, e);
            vec![]
        }
    };

    if cats.is_empty() {
        tracing::info!("No cats found near {}", user.zip_code);
        return empty_response(
            format!(
                "No cats found near {}. Try a different ZIP code or check back later.",
                user.zip_code
            ),
            false,
        );
    }

    let candidates = enrich_with_breeds(&state.breeds, cats).await;

    let result = state.engine.rank(user, candidates, state.result_limit);

    for (i, m) in result.matches.iter().enumerate() {
        tracing::debug!(
            "{}. {} - {}% compatible (lifestyle {}/40, experience {}/30, personality {}/30)",
            i + 1,
            m.cat.name,
            m.score.total_score,
            m.score.lifestyle_score,
            m.score.experience_score,
            m.score.personality_score
        );
    }

    tracing::info!(
        "Returning {} matches for {} (from {} candidates)",
        result.matches.len(),
        user.zip_code,
        result.total_candidates
    );

    HttpResponse::Ok().json(SearchCatsResponse {
        search_id: uuid::Uuid::new_v4().to_string(),
        message: format!(
            "Found {} cats and calculated compatibility scores!",
            result.total_candidates
        ),
        matches: result.matches,
        total: result.total_candidates,
        needs_api_keys: false,
    })
}

/// Pair each cat with breed metadata for its primary breed
///
/// Lookups are memoized per request on top of the catalog's own cache.
async fn enrich_with_breeds(
    breeds: &CatApiClient,
    cats: Vec<CatProfile>,
) -> Vec<(CatProfile, Option<BreedInfo>)> {
    let mut seen: HashMap<String, Option<BreedInfo>> = HashMap::new();
    let mut candidates = Vec::with_capacity(cats.len());

    for cat in cats {
        let breed_info = match cat.breeds.first() {
            Some(name) => {
                if !seen.contains_key(name) {
                    tracing::debug!("Looking up breed info for: {}", name);
                    let info = breeds.lookup_breed(name).await;
                    seen.insert(name.clone(), info);
                }
                seen.get(name).cloned().flatten()
            }
            None => None,
        };
        candidates.push((cat, breed_info));
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::CacheManager;
    use actix_web::{test, App};

    fn create_state() -> AppState {
        AppState {
            shelter: None,
            breeds: Arc::new(CatApiClient::new(
                "http://127.0.0.1:9".to_string(),
                None,
                1,
                CacheManager::new(10, 60),
            )),
            engine: CompatibilityEngine::new(),
            search_limit: 20,
            result_limit: 10,
        }
    }

    #[actix_web::test]
    async fn test_health_reports_missing_shelter() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(create_state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "degraded");
        assert_eq!(body["shelterDirectory"], "not_configured");
    }

    #[actix_web::test]
    async fn test_health_reports_configured_shelter() {
        let mut state = create_state();
        state.shelter = Some(Arc::new(PetfinderClient::new(
            "http://127.0.0.1:9".to_string(),
            "key".to_string(),
            "secret".to_string(),
            1,
        )));

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["shelterDirectory"], "configured");
        assert_eq!(body["breedCache"]["ttl_secs"], 60);
    }

    #[actix_web::test]
    async fn test_missing_zip_code_is_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(create_state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/search-cats")
            .set_json(serde_json::json!({
                "user": {
                    "homeType": "apartment",
                    "hoursAwayPerDay": 5,
                    "activityLevel": 5,
                    "experience": "first_time",
                    "zipCode": "  "
                }
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "ZIP code is required");
    }

    #[actix_web::test]
    async fn test_missing_credentials_flagged() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(create_state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/search-cats")
            .set_json(serde_json::json!({
                "user": {
                    "homeType": "farm_rural",
                    "hoursAwayPerDay": 2,
                    "activityLevel": 8,
                    "experience": "very_experienced",
                    "zipCode": "59801"
                }
            }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["needsApiKeys"], true);
        assert_eq!(body["matches"].as_array().map(Vec::len), Some(0));
    }
}
