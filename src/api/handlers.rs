// HTTP request handlers for API endpoints

use actix_web::{web, HttpResponse};
use serde_json::Value;

use crate::api::models::{ApiError, DeletedResponse, HealthResponse};
use crate::api::state::AppState;
use crate::ingest;
use crate::models::CatalogEntry;
use crate::search::{self, Predicate};

type HandlerResult = Result<HttpResponse, ApiError>;

/// Health check endpoint
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let database = match state.store.ping().await {
        Ok(()) => "connected",
        Err(_) => "disconnected",
    };

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        database: database.to_string(),
    })
}

/// Ingest both platform top charts from the configured source.
pub async fn populate_games(state: web::Data<AppState>) -> HandlerResult {
    let summary = ingest::populate(state.source.as_ref(), state.store.as_ref()).await?;
    tracing::info!(inserted = summary.inserted, "catalog populated");
    Ok(HttpResponse::NoContent().finish())
}

pub async fn search_games(state: web::Data<AppState>, body: web::Json<Value>) -> HandlerResult {
    let predicate = search::parse_request(&body)?;
    let games = state.store.find_all(&predicate).await?;
    Ok(HttpResponse::Ok().json(games))
}

pub async fn list_games(state: web::Data<AppState>) -> HandlerResult {
    let games = state.store.find_all(&Predicate::match_all()).await?;
    Ok(HttpResponse::Ok().json(games))
}

pub async fn create_game(
    state: web::Data<AppState>,
    payload: web::Json<CatalogEntry>,
) -> HandlerResult {
    let game = state.store.insert(&payload).await?;
    Ok(HttpResponse::Ok().json(game))
}

pub async fn update_game(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    payload: web::Json<CatalogEntry>,
) -> HandlerResult {
    let game = state.store.update(path.into_inner(), &payload).await?;
    Ok(HttpResponse::Ok().json(game))
}

pub async fn delete_game(state: web::Data<AppState>, path: web::Path<i64>) -> HandlerResult {
    let id = path.into_inner();
    state.store.delete(id).await?;
    Ok(HttpResponse::Ok().json(DeletedResponse { id }))
}
