use actix_web::{web, HttpResponse};
use tracing::{debug, error, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::error::{ServiceError, QUERY_REQUIRED};
use crate::models::{SearchForm, SearchResponseBody};
use crate::utils::search_cache_key;
use crate::AppState;

pub async fn search(
    state: web::Data<AppState>,
    form: web::Form<SearchForm>,
) -> Result<HttpResponse, ServiceError> {
    let request_id = Uuid::new_v4();
    let form = form.into_inner().normalized();

    if form.query.is_empty() {
        warn!(%request_id, "rejected search without a query");
        return Err(ServiceError::InvalidQuery(QUERY_REQUIRED.to_string()));
    }
    if let Err(e) = form.validate() {
        warn!(%request_id, "rejected search: {}", e);
        return Err(ServiceError::InvalidQuery(format!("Validation error: {}", e)));
    }

    let cache_key = search_cache_key(&form.query);
    if let Some(results) = state.cache_service.get(&cache_key).await {
        debug!(%request_id, results = results.len(), "search served from cache");
        return Ok(HttpResponse::Ok().json(SearchResponseBody::results(results)));
    }

    let results = state.legal_service.search(&form.query).map_err(|e| {
        error!(%request_id, "Search error: {}", e);
        e
    })?;
    state.cache_service.set(&cache_key, results.clone()).await;

    info!(%request_id, results = results.len(), "search answered");
    Ok(HttpResponse::Ok().json(SearchResponseBody::results(results)))
}
