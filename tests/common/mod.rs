//! Shared fixtures for router tests: in-memory and failing repositories and
//! small request helpers.

#![allow(dead_code)]

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::Utc;
use notes_api::{
    create_router,
    models::{ListOrder, NewNote, Note, NotePatch},
    repository::{NoteRepository, RepositoryError},
    service::NoteService,
};
use serde_json::Value;
use tower::ServiceExt;

/// Stores notes in a map and counts writes so tests can assert that rejected
/// requests never reached storage.
#[derive(Default)]
pub struct MemoryNotes {
    state: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    next_id: i64,
    notes: BTreeMap<i64, Note>,
    writes: usize,
}

impl MemoryNotes {
    pub fn writes(&self) -> usize {
        self.state.lock().unwrap().writes
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().notes.len()
    }
}

#[async_trait]
impl NoteRepository for MemoryNotes {
    async fn create_note(&self, note: NewNote) -> Result<Note, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        state.writes += 1;

        let note = Note {
            id: state.next_id,
            title: note.title,
            content: note.content,
            created_at: Utc::now(),
        };
        state.notes.insert(note.id, note.clone());

        Ok(note)
    }

    async fn update_note(
        &self,
        id: i64,
        patch: NotePatch,
    ) -> Result<Option<Note>, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        state.writes += 1;

        Ok(state.notes.get_mut(&id).map(|note| {
            if let Some(title) = patch.title {
                note.title = title;
            }
            if let Some(content) = patch.content {
                note.content = content;
            }
            note.clone()
        }))
    }

    async fn delete_note(&self, id: i64) -> Result<bool, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        state.writes += 1;

        Ok(state.notes.remove(&id).is_some())
    }

    async fn get_one_note(&self, id: i64) -> Result<Option<Note>, RepositoryError> {
        Ok(self.state.lock().unwrap().notes.get(&id).cloned())
    }

    async fn get_all_notes(&self, order: ListOrder) -> Result<Vec<Note>, RepositoryError> {
        let state = self.state.lock().unwrap();
        let mut notes: Vec<Note> = state.notes.values().cloned().collect();
        if order == ListOrder::Desc {
            notes.reverse();
        }

        Ok(notes)
    }
}

/// Fails every call the way an exhausted or closed pool would.
pub struct FailingNotes;

fn unavailable() -> RepositoryError {
    RepositoryError::Pool(deadpool_postgres::PoolError::Closed)
}

#[async_trait]
impl NoteRepository for FailingNotes {
    async fn create_note(&self, _note: NewNote) -> Result<Note, RepositoryError> {
        Err(unavailable())
    }

    async fn update_note(
        &self,
        _id: i64,
        _patch: NotePatch,
    ) -> Result<Option<Note>, RepositoryError> {
        Err(unavailable())
    }

    async fn delete_note(&self, _id: i64) -> Result<bool, RepositoryError> {
        Err(unavailable())
    }

    async fn get_one_note(&self, _id: i64) -> Result<Option<Note>, RepositoryError> {
        Err(unavailable())
    }

    async fn get_all_notes(&self, _order: ListOrder) -> Result<Vec<Note>, RepositoryError> {
        Err(unavailable())
    }
}

pub fn app(repo: Arc<dyn NoteRepository>, order: ListOrder) -> Router {
    create_router(Arc::new(NoteService::new(repo, order)))
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    send_request(app, request).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("failed to make request");
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };

    (status, body)
}
