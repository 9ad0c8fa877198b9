use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::store::{EntryStore, PairStore};
use crate::models::{Entry, EntryRow, NewEntry};
use crate::AppResult;

/// Row store backed by the managed Postgres database.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntryStore for PgStore {
    async fn list_entries(&self, pair_id: Uuid) -> AppResult<Vec<Entry>> {
        let rows = sqlx::query_as::<_, EntryRow>(
            r#"
            SELECT id, created_at, pair_id, user_id, date, author, mood, text
            FROM entries
            WHERE pair_id = $1
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(pair_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Entry::try_from).collect()
    }

    async fn insert_entry(&self, entry: NewEntry) -> AppResult<Entry> {
        let row = sqlx::query_as::<_, EntryRow>(
            r#"
            INSERT INTO entries (pair_id, user_id, date, author, mood, text)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, created_at, pair_id, user_id, date, author, mood, text
            "#,
        )
        .bind(entry.pair_id)
        .bind(entry.user_id)
        .bind(entry.date)
        .bind(entry.author.as_str())
        .bind(entry.mood.key())
        .bind(&entry.text)
        .fetch_one(&self.pool)
        .await?;

        Entry::try_from(row)
    }

    async fn delete_entry(&self, pair_id: Uuid, entry_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM entries WHERE id = $1 AND pair_id = $2"#)
            .bind(entry_id)
            .bind(pair_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl PairStore for PgStore {
    async fn pair_ids_for(&self, user_id: Uuid) -> AppResult<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT pm.pair_id
            FROM pair_members pm
            JOIN pairs p ON p.id = pm.pair_id
            WHERE pm.user_id = $1
            ORDER BY p.created_at, p.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn members_of(&self, pair_id: Uuid) -> AppResult<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"SELECT user_id FROM pair_members WHERE pair_id = $1 ORDER BY created_at"#,
        )
        .bind(pair_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn create_pair(&self) -> AppResult<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(r#"INSERT INTO pairs DEFAULT VALUES RETURNING id"#)
            .fetch_one(&self.pool)
            .await?;

        Ok(id)
    }

    async fn add_member(&self, pair_id: Uuid, user_id: Uuid) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO pair_members (pair_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (pair_id, user_id) DO NOTHING
            "#,
        )
        .bind(pair_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
