use async_trait::async_trait;
use deadpool_postgres::Pool;
use tokio_postgres::Row;

use super::{NoteRepository, RepositoryError};
use crate::models::{ListOrder, NewNote, Note, NotePatch};

/// `NoteRepository` backed by a PostgreSQL connection pool. Each call checks a
/// connection out of the pool and hands it back when the call returns.
pub struct PgNoteRepository {
    pool: Pool,
}

impl PgNoteRepository {
    pub const fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

fn note_from_row(row: &Row) -> Result<Note, tokio_postgres::Error> {
    Ok(Note {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn create_note(&self, note: NewNote) -> Result<Note, RepositoryError> {
        let client = self.pool.get().await?;
        let stmt = client
            .prepare_cached(
                "INSERT INTO notes (title, content) VALUES ($1, $2) \
                 RETURNING id, title, content, created_at",
            )
            .await?;

        let row = client
            .query_one(&stmt, &[&note.title, &note.content])
            .await?;

        Ok(note_from_row(&row)?)
    }

    async fn update_note(
        &self,
        id: i64,
        patch: NotePatch,
    ) -> Result<Option<Note>, RepositoryError> {
        let client = self.pool.get().await?;
        let stmt = client
            .prepare_cached(
                "UPDATE notes SET title = COALESCE($1, title), content = COALESCE($2, content) \
                 WHERE id = $3 RETURNING id, title, content, created_at",
            )
            .await?;

        let row = client
            .query_opt(&stmt, &[&patch.title, &patch.content, &id])
            .await?;

        Ok(row.as_ref().map(note_from_row).transpose()?)
    }

    async fn delete_note(&self, id: i64) -> Result<bool, RepositoryError> {
        let client = self.pool.get().await?;
        let stmt = client
            .prepare_cached("DELETE FROM notes WHERE id = $1")
            .await?;

        let rows = client.execute(&stmt, &[&id]).await?;

        Ok(rows == 1)
    }

    async fn get_one_note(&self, id: i64) -> Result<Option<Note>, RepositoryError> {
        let client = self.pool.get().await?;
        let stmt = client
            .prepare_cached("SELECT id, title, content, created_at FROM notes WHERE id = $1")
            .await?;

        let row = client.query_opt(&stmt, &[&id]).await?;

        Ok(row.as_ref().map(note_from_row).transpose()?)
    }

    async fn get_all_notes(&self, order: ListOrder) -> Result<Vec<Note>, RepositoryError> {
        let query = match order {
            ListOrder::Asc => "SELECT id, title, content, created_at FROM notes ORDER BY id ASC",
            ListOrder::Desc => "SELECT id, title, content, created_at FROM notes ORDER BY id DESC",
        };

        let client = self.pool.get().await?;
        let stmt = client.prepare_cached(query).await?;
        let rows = client.query(&stmt, &[]).await?;

        let notes = rows
            .iter()
            .map(note_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(notes)
    }
}
