//! SQLite persistence gateway.
//!
//! [`Database`] wraps a connection pool and exposes the two things the
//! pipeline needs: transactional post upserts and append-only audit writes.
//! Each `upsert_posts` call is one scoped transaction: acquired from the
//! pool, committed on success, rolled back when the transaction guard drops
//! on error. The connection returns to the pool either way.
//!
//! Schema creation and teardown are owned by [`schema`] and the CLI, not by
//! the pipeline.

pub mod schema;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use tracing::debug;

use crate::error::Result;
use crate::types::{AuditRecord, PostData, SocialPost, Source, StoredPost};

/// Handle to the SQLite store.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to a SQLite database.
    ///
    /// # Example URLs
    /// - `sqlite://data/socialetl.db?mode=rwc` - file-based, create if absent
    /// - `sqlite::memory:` - ephemeral
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    /// In-memory database for tests.
    ///
    /// Pinned to a single connection: every pooled connection to
    /// `sqlite::memory:` would otherwise get its own empty database.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        Ok(Self { pool })
    }

    /// The underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Upsert a batch of posts keyed by id, inside one transaction.
    ///
    /// Re-loading an id overwrites the prior payload (last write wins); it
    /// never errors on the duplicate. A failure partway through rolls the
    /// whole batch back.
    pub async fn upsert_posts(&self, posts: &[SocialPost]) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for post in posts {
            sqlx::query(
                r#"
                INSERT INTO social_posts (id, source, social_data)
                VALUES (?, ?, ?)
                ON CONFLICT(id) DO UPDATE SET
                    source = excluded.source,
                    social_data = excluded.social_data
                "#,
            )
            .bind(&post.id)
            .bind(post.source().as_str())
            .bind(post.data.to_json()?)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        debug!(count = posts.len(), "upserted posts");
        Ok(())
    }

    /// Append one audit record. The database assigns the timestamp.
    pub async fn append_audit(&self, operation: &str, params: &serde_json::Value) -> Result<()> {
        sqlx::query(
            "INSERT INTO log_metadata (function_name, input_params) VALUES (?, ?)",
        )
        .bind(operation)
        .bind(params.to_string())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// All posts with the given source tag, in insertion order.
    pub async fn posts_for_source(&self, source: Source) -> Result<Vec<StoredPost>> {
        let rows = sqlx::query_as::<_, PostRow>(
            "SELECT id, source, social_data, dt_created FROM social_posts \
             WHERE source = ? ORDER BY rowid",
        )
        .bind(source.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(PostRow::into_stored_post).collect()
    }

    /// Every audit record, oldest first.
    pub async fn audit_records(&self) -> Result<Vec<AuditRecord>> {
        let rows = sqlx::query_as::<_, AuditRow>(
            "SELECT function_name, input_params, dt_created FROM log_metadata ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(AuditRow::into_record).collect()
    }
}

#[derive(Debug, FromRow)]
struct PostRow {
    id: String,
    source: String,
    social_data: String,
    dt_created: String,
}

impl PostRow {
    fn into_stored_post(self) -> Result<StoredPost> {
        let source: Source = self.source.parse()?;
        let data = PostData::from_json(source, &self.social_data)?;
        Ok(StoredPost {
            id: self.id,
            data,
            stored_at: self.dt_created,
        })
    }
}

#[derive(Debug, FromRow)]
struct AuditRow {
    function_name: String,
    input_params: String,
    dt_created: String,
}

impl AuditRow {
    fn into_record(self) -> Result<AuditRecord> {
        let params = serde_json::from_str(&self.input_params)?;
        Ok(AuditRecord {
            operation: self.function_name,
            params,
            logged_at: self.dt_created,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fake_tweets;
    use crate::types::TwitterPost;

    async fn test_db() -> Database {
        let db = Database::in_memory().await.unwrap();
        schema::setup(&db).await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_upsert_and_read_back() {
        let db = test_db().await;
        let posts = fake_tweets(3);
        db.upsert_posts(&posts).await.unwrap();

        let stored = db.posts_for_source(Source::Twitter).await.unwrap();
        assert_eq!(stored.len(), 3);
        assert_eq!(stored[0].id, "id0");
        assert!(!stored[0].stored_at.is_empty());
    }

    #[tokio::test]
    async fn test_upsert_is_idempotent_last_write_wins() {
        let db = test_db().await;
        let first = vec![SocialPost::new(
            "id0",
            PostData::Twitter(TwitterPost {
                text: "before".to_string(),
            }),
        )];
        let second = vec![SocialPost::new(
            "id0",
            PostData::Twitter(TwitterPost {
                text: "after".to_string(),
            }),
        )];

        db.upsert_posts(&first).await.unwrap();
        db.upsert_posts(&second).await.unwrap();

        let stored = db.posts_for_source(Source::Twitter).await.unwrap();
        assert_eq!(stored.len(), 1);
        match &stored[0].data {
            PostData::Twitter(data) => assert_eq!(data.text, "after"),
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_audit_append_and_read_back() {
        let db = test_db().await;
        let params = serde_json::json!({"id": "dataengineering", "num_records": 100});
        db.append_audit("extract", &params).await.unwrap();

        let records = db.audit_records().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].operation, "extract");
        assert_eq!(records[0].params["num_records"], 100);
        assert!(!records[0].logged_at.is_empty());
    }

    #[tokio::test]
    async fn test_teardown_drops_tables() {
        let db = test_db().await;
        schema::teardown(&db).await.unwrap();
        assert!(db.posts_for_source(Source::Twitter).await.is_err());
    }
}
