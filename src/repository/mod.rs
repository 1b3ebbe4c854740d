mod connector;
mod embedded;
mod postgres;

pub use connector::{ConnectError, connect, migrate};
pub use postgres::PgNoteRepository;

use async_trait::async_trait;

use crate::models::{ListOrder, NewNote, Note, NotePatch};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("failed to acquire database connection: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    #[error("database query failed: {0}")]
    Query(#[from] tokio_postgres::Error),
}

/// Persistence for notes. Every method runs a single auto-committed statement.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    async fn create_note(&self, note: NewNote) -> Result<Note, RepositoryError>;

    /// Returns `None` when no note has the given id.
    async fn update_note(&self, id: i64, patch: NotePatch)
    -> Result<Option<Note>, RepositoryError>;

    /// Returns `false` when no note has the given id.
    async fn delete_note(&self, id: i64) -> Result<bool, RepositoryError>;

    async fn get_one_note(&self, id: i64) -> Result<Option<Note>, RepositoryError>;

    async fn get_all_notes(&self, order: ListOrder) -> Result<Vec<Note>, RepositoryError>;
}
