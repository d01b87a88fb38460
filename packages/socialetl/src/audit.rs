//! Call auditing for ETL operations.
//!
//! [`Audited`] wraps any [`SocialEtl`] implementation and appends one
//! [`AuditRecord`](crate::types::AuditRecord) per call to extract, transform,
//! or load before delegating. The record holds the operation name and an
//! ordered map of the call's arguments, parameter names in declaration
//! order.
//!
//! The audit write happens first and its failure propagates, so a
//! persistence outage blocks the wrapped operation. That coupling is
//! inherited behavior the rest of the system expects; callers who want the
//! operation regardless of audit must not wrap.

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::error::Result;
use crate::store::Database;
use crate::traits::SocialEtl;
use crate::transform::Transformation;
use crate::types::SocialPost;

/// Appends audit records through the persistence gateway.
#[derive(Clone)]
pub struct CallAudit {
    db: Database,
}

impl CallAudit {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Append one record for `operation` with its serialized arguments.
    pub async fn record(&self, operation: &str, params: serde_json::Value) -> Result<()> {
        debug!(operation, "recording audited call");
        self.db.append_audit(operation, &params).await
    }
}

/// A [`SocialEtl`] whose extract/transform/load calls are audited.
pub struct Audited<E> {
    inner: E,
    audit: CallAudit,
}

impl<E> Audited<E> {
    pub fn new(inner: E, audit: CallAudit) -> Self {
        Self { inner, audit }
    }

    /// Unwrap the inner ETL.
    pub fn into_inner(self) -> E {
        self.inner
    }
}

fn posts_json(posts: &[SocialPost]) -> serde_json::Value {
    serde_json::Value::Array(posts.iter().map(SocialPost::to_json).collect())
}

#[async_trait]
impl<E> SocialEtl for Audited<E>
where
    E: SocialEtl,
{
    type Client = E::Client;

    async fn extract(
        &self,
        source_id: &str,
        limit: usize,
        client: Option<&Self::Client>,
    ) -> Result<Vec<SocialPost>> {
        self.audit
            .record(
                "extract",
                json!({
                    "id": source_id,
                    "num_records": limit,
                    "client": client.is_some(),
                }),
            )
            .await?;
        self.inner.extract(source_id, limit, client).await
    }

    async fn transform(
        &self,
        posts: Vec<SocialPost>,
        transformation: &Transformation,
    ) -> Result<Vec<SocialPost>> {
        self.audit
            .record(
                "transform",
                json!({
                    "social_data": posts_json(&posts),
                    "transformation": transformation.name(),
                }),
            )
            .await?;
        self.inner.transform(posts, transformation).await
    }

    async fn load(&self, posts: &[SocialPost], db: Option<&Database>) -> Result<()> {
        self.audit
            .record(
                "load",
                json!({
                    "social_data": posts_json(posts),
                    "db": db.is_some(),
                }),
            )
            .await?;
        self.inner.load(posts, db).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::etl::TwitterEtl;
    use crate::store::schema;
    use crate::testing::MockTwitterClient;

    async fn audited_twitter() -> (Database, Audited<TwitterEtl>) {
        let db = Database::in_memory().await.unwrap();
        schema::setup(&db).await.unwrap();
        let etl = Audited::new(TwitterEtl, CallAudit::new(db.clone()));
        (db, etl)
    }

    #[tokio::test]
    async fn test_each_stage_writes_one_record() {
        let (db, etl) = audited_twitter().await;
        let client = MockTwitterClient::new().with_tweets("u1", 2);

        etl.run(
            Some(&db),
            Some(&client),
            &Transformation::NoOp,
            "startdataeng",
            100,
        )
        .await
        .unwrap();

        let records = db.audit_records().await.unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.operation.as_str()).collect();
        assert_eq!(names, vec!["extract", "transform", "load"]);
    }

    #[tokio::test]
    async fn test_params_keep_declaration_order() {
        let (db, etl) = audited_twitter().await;
        let client = MockTwitterClient::new().with_tweets("u1", 1);

        etl.extract("startdataeng", 5, Some(&client)).await.unwrap();

        let records = db.audit_records().await.unwrap();
        let params = records[0].params.as_object().unwrap();
        let keys: Vec<&String> = params.keys().collect();
        assert_eq!(keys, vec!["id", "num_records", "client"]);
        assert_eq!(params["num_records"], 5);
    }

    #[tokio::test]
    async fn test_audit_failure_blocks_the_operation() {
        let (db, etl) = audited_twitter().await;
        schema::teardown(&db).await.unwrap();

        let client = MockTwitterClient::new().with_tweets("u1", 1);
        let result = etl.extract("startdataeng", 5, Some(&client)).await;

        assert!(result.is_err());
        // The wrapped extract never ran.
        assert_eq!(client.user_id_calls(), 0);
    }
}
