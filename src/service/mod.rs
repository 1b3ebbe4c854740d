use crate::{
    dto::{CreateNoteRequest, CreatedNoteResponse, NoteResponse, UpdateNoteRequest},
    models::{ListOrder, NewNote, NotePatch, ValidationError},
    repository::{NoteRepository, RepositoryError},
};

use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("note {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Storage(#[from] RepositoryError),
}

/// Validates requests and runs them against the repository. Validation
/// failures are returned before any storage call is made.
#[derive(Clone)]
pub struct NoteService {
    repo: Arc<dyn NoteRepository>,
    list_order: ListOrder,
}

impl NoteService {
    pub const fn new(repo: Arc<dyn NoteRepository>, list_order: ListOrder) -> Self {
        Self { repo, list_order }
    }

    pub async fn create_note(
        &self,
        request: CreateNoteRequest,
    ) -> Result<CreatedNoteResponse, ServiceError> {
        let note = NewNote::new(request.title, request.content)?;

        let created = self.repo.create_note(note).await?;
        tracing::debug!("created note {}", created.id);

        Ok(created.into())
    }

    pub async fn update_note(
        &self,
        id: i64,
        request: UpdateNoteRequest,
    ) -> Result<NoteResponse, ServiceError> {
        let patch = NotePatch::new(request.title, request.content)?;

        self.repo
            .update_note(id, patch)
            .await?
            .map(NoteResponse::from)
            .ok_or(ServiceError::NotFound(id))
    }

    pub async fn delete_note(&self, id: i64) -> Result<(), ServiceError> {
        if self.repo.delete_note(id).await? {
            tracing::debug!("deleted note {}", id);
            Ok(())
        } else {
            Err(ServiceError::NotFound(id))
        }
    }

    pub async fn get_one_note(&self, id: i64) -> Result<NoteResponse, ServiceError> {
        self.repo
            .get_one_note(id)
            .await?
            .map(NoteResponse::from)
            .ok_or(ServiceError::NotFound(id))
    }

    pub async fn get_all_notes(&self) -> Result<Vec<NoteResponse>, ServiceError> {
        let notes = self.repo.get_all_notes(self.list_order).await?;

        Ok(notes.into_iter().map(NoteResponse::from).collect())
    }
}
