use crate::error::{ServiceError, QUERY_REQUIRED};
use crate::handlers;
use actix_web::error::UrlencodedError;
use actix_web::{web, Scope};
use tracing::debug;

pub fn config() -> Scope {
    web::scope("/api").route("/health", web::get().to(handlers::health_check))
}

pub fn configure(cfg: &mut web::ServiceConfig, max_form_payload_size: usize) {
    let form_config = web::FormConfig::default()
        .limit(max_form_payload_size)
        .error_handler(|err, _req| {
            debug!("unreadable search form: {}", err);
            let message = match err {
                UrlencodedError::Overflow { .. } => "Query is too long".to_string(),
                _ => QUERY_REQUIRED.to_string(),
            };
            ServiceError::InvalidQuery(message).into()
        });

    cfg.app_data(form_config)
        .route("/search", web::post().to(handlers::search))
        .service(config());
}
