use chrono::Utc;
use sqlx::pool::PoolConnection;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::models::entry::{DiaryEntry, EntryChanges, NewEntry};

pub struct EntryStore {
    conn: PoolConnection<Sqlite>,
}

impl EntryStore {
    /// Checks a connection out of the pool. It is returned when the store is dropped.
    pub async fn acquire(pool: &SqlitePool) -> Result<Self, sqlx::Error> {
        Ok(Self {
            conn: pool.acquire().await?,
        })
    }

    pub async fn create(&mut self, new: &NewEntry) -> Result<DiaryEntry, sqlx::Error> {
        let now = Utc::now();

        let entry = sqlx::query_as::<_, DiaryEntry>(
            r#"
            INSERT INTO diary_entries (title, content, is_done, created_at, updated_at)
            VALUES (?, ?, 0, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&new.title)
        .bind(&new.content)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *self.conn)
        .await?;

        tracing::info!(entry_id = entry.id, "Diary entry created");
        Ok(entry)
    }

    pub async fn get(&mut self, id: i64) -> Result<Option<DiaryEntry>, sqlx::Error> {
        sqlx::query_as::<_, DiaryEntry>("SELECT * FROM diary_entries WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await
    }

    /// Entries in insertion order. A `skip` past the end yields an empty page.
    pub async fn list(&mut self, skip: u32, limit: u32) -> Result<Vec<DiaryEntry>, sqlx::Error> {
        sqlx::query_as::<_, DiaryEntry>(
            "SELECT * FROM diary_entries ORDER BY id ASC LIMIT ? OFFSET ?",
        )
        .bind(i64::from(limit))
        .bind(i64::from(skip))
        .fetch_all(&mut *self.conn)
        .await
    }

    /// Writes only the supplied fields in a single statement.
    ///
    /// With no supplied fields the row is re-read and returned unchanged, and
    /// `updated_at` is left alone.
    pub async fn update(
        &mut self,
        id: i64,
        changes: &EntryChanges,
    ) -> Result<Option<DiaryEntry>, sqlx::Error> {
        if changes.is_empty() {
            return self.get(id).await;
        }

        let mut query = QueryBuilder::<Sqlite>::new("UPDATE diary_entries SET ");
        let mut columns = query.separated(", ");
        if let Some(title) = &changes.title {
            columns.push("title = ").push_bind_unseparated(title.clone());
        }
        if let Some(content) = &changes.content {
            columns.push("content = ").push_bind_unseparated(content.clone());
        }
        if let Some(is_done) = changes.is_done {
            columns.push("is_done = ").push_bind_unseparated(is_done);
        }
        columns.push("updated_at = ").push_bind_unseparated(Utc::now());

        query.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        let entry = query
            .build_query_as::<DiaryEntry>()
            .fetch_optional(&mut *self.conn)
            .await?;

        if entry.is_some() {
            tracing::debug!(entry_id = id, "Diary entry updated");
        }
        Ok(entry)
    }

    /// Number of stored entries. Fails if the table is unreachable.
    pub async fn count(&mut self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM diary_entries")
            .fetch_one(&mut *self.conn)
            .await
    }

    /// Hard delete. Returns whether a row was removed.
    pub async fn delete(&mut self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM diary_entries WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(entry_id = id, "Diary entry deleted");
        }
        Ok(deleted)
    }

    pub async fn mark_done(
        &mut self,
        id: i64,
        is_done: bool,
    ) -> Result<Option<DiaryEntry>, sqlx::Error> {
        let entry = sqlx::query_as::<_, DiaryEntry>(
            r#"
            UPDATE diary_entries SET
                is_done = ?,
                updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(is_done)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        if entry.is_some() {
            tracing::debug!(entry_id = id, is_done, "Diary entry completion toggled");
        }
        Ok(entry)
    }
}
