//! SQLite implementation of the URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Instant;

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::observer::{Observer, StorageOperation, StorageOutcome};
use crate::domain::repositories::{StorageError, UrlRepository};
use crate::utils::db_error::is_unique_violation_on_code;

#[derive(sqlx::FromRow)]
struct UrlRow {
    id: i64,
    code: String,
    original_url: String,
    created_at: DateTime<Utc>,
}

impl From<UrlRow> for UrlMapping {
    fn from(row: UrlRow) -> Self {
        UrlMapping::new(row.id, row.code, row.original_url, row.created_at)
    }
}

/// SQLite repository for URL mappings.
///
/// Every statement is a single autocommit write or read, so a successful
/// `insert` is committed before it returns. Racing inserts of the same code
/// are serialized by the unique index on `urls.code`.
pub struct SqliteUrlRepository {
    pool: Arc<SqlitePool>,
    observer: Arc<dyn Observer>,
}

impl SqliteUrlRepository {
    /// Creates a new repository over a connection pool.
    pub fn new(pool: Arc<SqlitePool>, observer: Arc<dyn Observer>) -> Self {
        Self { pool, observer }
    }

    /// Counts stored mappings.
    pub async fn count(&self) -> Result<i64, StorageError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    fn record(&self, operation: StorageOperation, outcome: StorageOutcome, started: Instant) {
        self.observer
            .storage_operation(operation, outcome, started.elapsed());
    }
}

#[async_trait]
impl UrlRepository for SqliteUrlRepository {
    async fn insert(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, StorageError> {
        let started = Instant::now();

        let result = sqlx::query_as::<_, UrlRow>(
            r#"
            INSERT INTO urls (original_url, code, created_at)
            VALUES (?, ?, ?)
            RETURNING id, code, original_url, created_at
            "#,
        )
        .bind(&new_mapping.original_url)
        .bind(&new_mapping.code)
        .bind(Utc::now())
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => {
                self.record(StorageOperation::Insert, StorageOutcome::Success, started);
                Ok(row.into())
            }
            Err(e) if is_unique_violation_on_code(&e) => {
                self.record(StorageOperation::Insert, StorageOutcome::Collision, started);
                Err(StorageError::CodeCollision {
                    code: new_mapping.code,
                })
            }
            Err(e) => {
                self.record(StorageOperation::Insert, StorageOutcome::Error, started);
                Err(e.into())
            }
        }
    }

    async fn lookup(&self, code: &str) -> Result<Option<UrlMapping>, StorageError> {
        let started = Instant::now();

        let result = sqlx::query_as::<_, UrlRow>(
            "SELECT id, code, original_url, created_at FROM urls WHERE code = ?",
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await;

        match result {
            Ok(Some(row)) => {
                self.record(StorageOperation::Lookup, StorageOutcome::Success, started);
                Ok(Some(row.into()))
            }
            Ok(None) => {
                self.record(StorageOperation::Lookup, StorageOutcome::NotFound, started);
                Ok(None)
            }
            Err(e) => {
                self.record(StorageOperation::Lookup, StorageOutcome::Error, started);
                Err(e.into())
            }
        }
    }

    async fn ping(&self) -> Result<(), StorageError> {
        let started = Instant::now();

        let result = sqlx::query("SELECT 1").execute(self.pool.as_ref()).await;

        let outcome = if result.is_ok() {
            StorageOutcome::Success
        } else {
            StorageOutcome::Error
        };
        self.record(StorageOperation::Ping, outcome, started);

        result.map(|_| ()).map_err(StorageError::from)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
