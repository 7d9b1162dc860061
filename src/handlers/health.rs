use actix_web::{web, HttpResponse, Result};
use chrono::Utc;

use crate::models::{ErrorResponse, HealthResponse};
use crate::AppState;

pub async fn health_check(state: web::Data<AppState>) -> Result<HttpResponse> {
    let topics = state.legal_service.topic_count();

    let response = HealthResponse {
        status: if topics > 0 { "healthy" } else { "degraded" }.to_string(),
        topics,
        cache_entries: state.cache_service.len().await,
        uptime_seconds: state.start_time.elapsed().as_secs(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    };

    Ok(HttpResponse::Ok().json(response))
}

pub async fn not_found() -> Result<HttpResponse> {
    Ok(HttpResponse::NotFound().json(ErrorResponse::new("Endpoint not found")))
}
