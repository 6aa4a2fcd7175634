// API route configuration

use crate::api::handlers;
use crate::api::models::ErrorBody;
use actix_web::{error, web, HttpResponse};

/// Malformed or non-JSON bodies get the same `{"error": ...}` shape as
/// validation failures.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(ErrorBody { error: message }),
        )
        .into()
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(handlers::health_check))
        .service(
            web::scope("/api/games")
                .route("/populate", web::post().to(handlers::populate_games))
                .route("/search", web::post().to(handlers::search_games))
                .route("", web::get().to(handlers::list_games))
                .route("", web::post().to(handlers::create_game))
                .route("/{id}", web::put().to(handlers::update_game))
                .route("/{id}", web::delete().to(handlers::delete_game)),
        );
}
