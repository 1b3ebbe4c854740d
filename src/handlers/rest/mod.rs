use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;
use utoipa::OpenApi;

use std::sync::Arc;

use crate::{
    dto::{
        CreateNoteRequest, CreatedNoteResponse, DeleteNoteResponse, ErrorResponse, IdQuery,
        NoteResponse, UpdateNoteRequest,
    },
    models::ValidationError,
    service::{NoteService, ServiceError},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        create_note,
        get_all_notes,
        get_one_note,
        update_note,
        delete_note
    ),
    components(schemas(
        NoteResponse,
        CreatedNoteResponse,
        CreateNoteRequest,
        UpdateNoteRequest,
        DeleteNoteResponse,
        ErrorResponse
    )),
    tags(
        (name = "notes", description = "Notes management API")
    )
)]
pub struct ApiDoc;

fn error_body(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Maps a failed operation to its response. Storage errors are logged here and
/// only a generic message leaves the process.
fn failure(action: &str, err: ServiceError) -> Response {
    match err {
        ServiceError::Validation(e) => error_body(StatusCode::BAD_REQUEST, e.to_string()),
        ServiceError::NotFound(_) => error_body(StatusCode::NOT_FOUND, "Note not found"),
        ServiceError::Storage(e) => {
            tracing::error!("failed to {}: {}", action, e);
            error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to {action}"),
            )
        }
    }
}

fn malformed(rejection: &JsonRejection) -> ServiceError {
    ValidationError::MalformedBody(rejection.body_text()).into()
}

fn note_id(query: Result<Query<IdQuery>, QueryRejection>) -> Result<i64, ServiceError> {
    let Query(query) =
        query.map_err(|rejection| ValidationError::MalformedQuery(rejection.body_text()))?;

    Ok(query.note_id()?)
}

#[utoipa::path(
    post,
    path = "/api/CreateNote",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created successfully", body = CreatedNoteResponse),
        (status = 400, description = "Missing or empty title/content", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(service): State<Arc<NoteService>>,
    payload: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return failure("create note", malformed(&rejection)),
    };

    match service.create_note(payload).await {
        Ok(note) => (StatusCode::CREATED, Json(note)).into_response(),
        Err(e) => failure("create note", e),
    }
}

#[utoipa::path(
    get,
    path = "/api/GetNotes",
    responses(
        (status = 200, description = "List of all notes", body = Vec<NoteResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_all_notes(State(service): State<Arc<NoteService>>) -> Response {
    match service.get_all_notes().await {
        Ok(notes) => (StatusCode::OK, Json(notes)).into_response(),
        Err(e) => failure("get all notes", e),
    }
}

#[utoipa::path(
    get,
    path = "/api/GetNoteById",
    params(
        ("id" = i64, Query, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note found", body = NoteResponse),
        (status = 400, description = "Missing or invalid id", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_one_note(
    State(service): State<Arc<NoteService>>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> Response {
    let id = match note_id(query) {
        Ok(id) => id,
        Err(e) => return failure("get note", e),
    };

    match service.get_one_note(id).await {
        Ok(note) => (StatusCode::OK, Json(note)).into_response(),
        Err(e) => failure("get note", e),
    }
}

#[utoipa::path(
    method(put, patch),
    path = "/api/UpdateNote",
    params(
        ("id" = i64, Query, description = "Note ID")
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated successfully", body = NoteResponse),
        (status = 400, description = "Missing or invalid id, or nothing to update", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn update_note(
    State(service): State<Arc<NoteService>>,
    query: Result<Query<IdQuery>, QueryRejection>,
    payload: Result<Json<UpdateNoteRequest>, JsonRejection>,
) -> Response {
    let id = match note_id(query) {
        Ok(id) => id,
        Err(e) => return failure("update note", e),
    };
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return failure("update note", malformed(&rejection)),
    };

    match service.update_note(id, payload).await {
        Ok(note) => (StatusCode::OK, Json(note)).into_response(),
        Err(e) => failure("update note", e),
    }
}

#[utoipa::path(
    delete,
    path = "/api/DeleteNote",
    params(
        ("id" = i64, Query, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note deleted successfully", body = DeleteNoteResponse),
        (status = 400, description = "Missing or invalid id", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(
    State(service): State<Arc<NoteService>>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> Response {
    let id = match note_id(query) {
        Ok(id) => id,
        Err(e) => return failure("delete note", e),
    };

    match service.delete_note(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(DeleteNoteResponse {
                id,
                message: "Note deleted successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => failure("delete note", e),
    }
}
