//! Schema bootstrap and teardown.
//!
//! Owned by the CLI (`socialetl init-db` / `reset-db`) and by test setup;
//! the pipeline itself never creates or drops tables.

use tracing::info;

use crate::error::Result;
use crate::store::Database;

/// Create both tables if they do not exist.
pub async fn setup(db: &Database) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS social_posts (
            id TEXT PRIMARY KEY,
            source TEXT NOT NULL,
            social_data TEXT NOT NULL,
            dt_created TEXT NOT NULL DEFAULT (datetime('now'))
        );
        "#,
    )
    .execute(db.pool())
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS log_metadata (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            function_name TEXT NOT NULL,
            input_params TEXT NOT NULL,
            dt_created TEXT NOT NULL DEFAULT (datetime('now'))
        );
        "#,
    )
    .execute(db.pool())
    .await?;

    info!("schema ready");
    Ok(())
}

/// Drop both tables. Removes all persisted posts and audit history.
pub async fn teardown(db: &Database) -> Result<()> {
    sqlx::query("DROP TABLE IF EXISTS social_posts")
        .execute(db.pool())
        .await?;
    sqlx::query("DROP TABLE IF EXISTS log_metadata")
        .execute(db.pool())
        .await?;
    info!("schema dropped");
    Ok(())
}
