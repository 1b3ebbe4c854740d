//! Notes CRUD REST API.
//!
//! Five handlers (create, list, get by id, update, delete) over a single
//! PostgreSQL `notes` table, served by axum. The router is built from an
//! `Arc<NoteService>` so any `NoteRepository` can sit behind it.

pub mod config;
pub mod dto;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

use handlers::rest;
use service::NoteService;

pub fn create_router(service: Arc<NoteService>) -> Router {
    let api_router = Router::new()
        .route("/CreateNote", post(rest::create_note))
        .route("/GetNotes", get(rest::get_all_notes))
        .route("/GetNoteById", get(rest::get_one_note))
        .route("/UpdateNote", put(rest::update_note).patch(rest::update_note))
        .route("/DeleteNote", delete(rest::delete_note))
        .with_state(service);

    Router::new()
        .route("/", get(root))
        .nest("/api", api_router)
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", rest::ApiDoc::openapi()),
        )
        .layer(TraceLayer::new_for_http())
}

async fn root() -> Response {
    (StatusCode::OK, "Notes API is running").into_response()
}
