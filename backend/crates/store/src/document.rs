//! PostgreSQL document backend
//!
//! Records live in one `documents` table as JSONB bodies keyed by
//! `(collection, id)`. Predicates run in process over a collection scan;
//! writes address the matched rows by id.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;

use crate::error::{StoreError, StoreResult};
use crate::record::{DocumentStore, Record, validate_collection};

/// PostgreSQL-backed document store
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and apply pending migrations
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        sqlx::migrate!("../../../database/migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError::Database(e.into()))?;

        tracing::info!("Document store connected, migrations applied");

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// `(id, record)` pairs of a collection in insertion order
    async fn scan<T: Record>(&self, collection: &str) -> StoreResult<Vec<(String, T)>> {
        validate_collection(collection)?;

        let rows = sqlx::query_as::<_, (String, Json<T>)>(
            r#"
            SELECT id, body
            FROM documents
            WHERE collection = $1
            ORDER BY seq
            "#,
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::unavailable(collection, e))?;

        Ok(rows.into_iter().map(|(id, Json(record))| (id, record)).collect())
    }
}

impl DocumentStore for PgDocumentStore {
    async fn find_all<T: Record>(&self, collection: &str) -> StoreResult<Vec<T>> {
        let rows = self.scan::<T>(collection).await?;
        Ok(rows.into_iter().map(|(_, record)| record).collect())
    }

    async fn find_one<T, P>(&self, collection: &str, predicate: P) -> StoreResult<Option<T>>
    where
        T: Record,
        P: Fn(&T) -> bool + Send + Sync,
    {
        let rows = self.scan::<T>(collection).await?;
        Ok(rows
            .into_iter()
            .map(|(_, record)| record)
            .find(|record| predicate(record)))
    }

    async fn create<T: Record>(&self, collection: &str, record: T) -> StoreResult<T> {
        validate_collection(collection)?;

        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, body)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(collection)
        .bind(record.record_id())
        .bind(Json(&record))
        .execute(&self.pool)
        .await?;

        Ok(record)
    }

    /// The matched row is re-read under `FOR UPDATE` inside a transaction,
    /// so concurrent updates of one record apply in sequence
    async fn update<T, P, F>(
        &self,
        collection: &str,
        predicate: P,
        update_fn: F,
    ) -> StoreResult<Option<T>>
    where
        T: Record,
        P: Fn(&T) -> bool + Send + Sync,
        F: FnOnce(T) -> T + Send,
    {
        let rows = self.scan::<T>(collection).await?;
        let Some(id) = rows
            .into_iter()
            .find(|(_, record)| predicate(record))
            .map(|(id, _)| id)
        else {
            return Ok(None);
        };

        let mut tx = self.pool.begin().await?;

        let locked = sqlx::query_scalar::<_, Json<T>>(
            r#"
            SELECT body
            FROM documents
            WHERE collection = $1 AND id = $2
            FOR UPDATE
            "#,
        )
        .bind(collection)
        .bind(&id)
        .fetch_optional(&mut *tx)
        .await?;

        // Deleted or changed out of the predicate while we waited for the lock
        let Some(Json(current)) = locked.filter(|Json(record)| predicate(record)) else {
            tx.rollback().await?;
            return Ok(None);
        };

        let updated = update_fn(current);

        sqlx::query(
            r#"
            UPDATE documents SET
                body = $3,
                updated_at = now()
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(&id)
        .bind(Json(&updated))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(updated))
    }

    async fn delete<T, P>(&self, collection: &str, predicate: P) -> StoreResult<bool>
    where
        T: Record,
        P: Fn(&T) -> bool + Send + Sync,
    {
        validate_collection(collection)?;

        let mut tx = self.pool.begin().await?;

        let rows = sqlx::query_as::<_, (String, Json<T>)>(
            r#"
            SELECT id, body
            FROM documents
            WHERE collection = $1
            ORDER BY seq
            FOR UPDATE
            "#,
        )
        .bind(collection)
        .fetch_all(&mut *tx)
        .await?;

        let ids: Vec<String> = rows
            .into_iter()
            .filter(|(_, Json(record))| predicate(record))
            .map(|(id, _)| id)
            .collect();

        if ids.is_empty() {
            tx.rollback().await?;
            return Ok(false);
        }

        let deleted = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = ANY($2)")
            .bind(collection)
            .bind(&ids)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        tracing::debug!(collection, deleted, "Documents deleted");

        Ok(deleted > 0)
    }
}
