pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::time::Instant;

use config::Config;
use services::{CacheService, LegalService};

#[derive(Clone)]
pub struct AppState {
    pub legal_service: LegalService,
    pub cache_service: CacheService,
    pub config: Config,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: Config, legal_service: LegalService) -> Self {
        let cache_service = CacheService::new(config.cache.clone());
        Self {
            legal_service,
            cache_service,
            config,
            start_time: Instant::now(),
        }
    }
}
