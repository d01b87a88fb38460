//! The polymorphic extract/transform/load contract.

use async_trait::async_trait;

use crate::error::Result;
use crate::store::Database;
use crate::transform::Transformation;
use crate::types::SocialPost;

/// One source's ETL implementation.
///
/// `extract` is the only operation that knows the upstream API's shape;
/// `transform` and `load` are source-agnostic, and `run` sequences the three
/// without any retry or partial recovery. A failure in any stage propagates
/// to the caller; whatever `load` committed before the failure is governed
/// by the database's transaction boundary, not by per-record cleanup here.
///
/// Both collaborator handles are passed as `Option` so a missing handle is a
/// uniform usage error (`MissingClient` / `MissingDatabase`) rather than a
/// panic deep inside a stage.
#[async_trait]
pub trait SocialEtl: Send + Sync {
    /// The extraction client capability this source needs. `Sync` so a
    /// borrowed client can be held across the stage awaits.
    type Client: ?Sized + Sync;

    /// Pull up to `limit` posts identified by `source_id` (a subreddit name
    /// or an account handle, depending on the source).
    async fn extract(
        &self,
        source_id: &str,
        limit: usize,
        client: Option<&Self::Client>,
    ) -> Result<Vec<SocialPost>>;

    /// Apply the supplied filter strategy. Implementations carry no policy
    /// of their own.
    async fn transform(
        &self,
        posts: Vec<SocialPost>,
        transformation: &Transformation,
    ) -> Result<Vec<SocialPost>>;

    /// Upsert each post keyed by its id. Loading the same id twice leaves
    /// one row with the later payload.
    async fn load(&self, posts: &[SocialPost], db: Option<&Database>) -> Result<()>;

    /// Sequence extract -> transform -> load.
    async fn run(
        &self,
        db: Option<&Database>,
        client: Option<&Self::Client>,
        transformation: &Transformation,
        source_id: &str,
        limit: usize,
    ) -> Result<()> {
        let extracted = self.extract(source_id, limit, client).await?;
        let transformed = self.transform(extracted, transformation).await?;
        self.load(&transformed, db).await
    }
}
