mod config;
mod core;
mod models;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use crate::config::Settings;
use routes::search::AppState;
use services::{CacheManager, CatApiClient, PetfinderClient};
use crate::core::CompatibilityEngine;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    // Initialize logging (LOG_LEVEL / LOG_FORMAT win over the config file)
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting PurrfectMatch service...");
    info!("Configuration loaded successfully");

    // Initialize shelter directory client (optional - searches degrade without it)
    let shelter = match settings.petfinder.credentials() {
        Some((api_key, secret)) => {
            info!("Petfinder client initialized ({})", settings.petfinder.endpoint);
            Some(Arc::new(PetfinderClient::new(
                settings.petfinder.endpoint.clone(),
                api_key,
                secret,
                settings.petfinder.timeout_secs,
            )))
        }
        None => {
            warn!("Petfinder API keys not found, searches will return no cats");
            None
        }
    };

    // Initialize breed catalog client with its cache
    let breed_cache = CacheManager::new(settings.cache.max_entries, settings.cache.ttl_secs);
    let breeds = Arc::new(CatApiClient::new(
        settings.catapi.endpoint.clone(),
        settings.catapi.api_key.clone(),
        settings.catapi.timeout_secs,
        breed_cache,
    ));

    info!(
        "Breed catalog client initialized (cache: {} entries, TTL: {}s)",
        settings.cache.max_entries, settings.cache.ttl_secs
    );

    // Build application state
    let app_state = AppState {
        shelter,
        breeds,
        engine: CompatibilityEngine::new(),
        search_limit: settings.matching.search_limit,
        result_limit: settings.matching.result_limit,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
