//! Twitter ETL: recent original tweets from the accounts a handle follows.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tracing::info;

use crate::error::{EtlError, Result};
use crate::store::Database;
use crate::traits::{SocialEtl, TwitterClient};
use crate::transform::Transformation;
use crate::types::{PostData, SocialPost, Source, TwitterPost};

/// ETL over the follow graph of one account.
#[derive(Debug, Default)]
pub struct TwitterEtl;

#[async_trait]
impl SocialEtl for TwitterEtl {
    type Client = dyn TwitterClient;

    /// Resolves `source_id` (a handle) to an account, enumerates the
    /// accounts it follows, pulls each followed account's original tweets
    /// from the last 24 hours, flattens in enumeration order, and truncates
    /// positionally to `limit`. No re-sorting: truncation order is the
    /// per-account, then across-accounts order the client produced.
    async fn extract(
        &self,
        source_id: &str,
        limit: usize,
        client: Option<&Self::Client>,
    ) -> Result<Vec<SocialPost>> {
        info!(handle = source_id, limit, "extracting twitter data");
        let client = client.ok_or(EtlError::MissingClient {
            which: Source::Twitter,
        })?;

        let user_id = client.user_id(source_id).await?;
        let following = client.following(&user_id).await?;
        let start_time = Utc::now() - Duration::days(1);

        let mut posts = Vec::new();
        for followed_id in following {
            let tweets = client
                .recent_original_tweets(&followed_id, start_time)
                .await?;
            posts.extend(tweets.into_iter().map(|tweet| {
                SocialPost::new(tweet.id, PostData::Twitter(TwitterPost { text: tweet.text }))
            }));
        }
        posts.truncate(limit);
        Ok(posts)
    }

    async fn transform(
        &self,
        posts: Vec<SocialPost>,
        transformation: &Transformation,
    ) -> Result<Vec<SocialPost>> {
        info!(strategy = transformation.name(), "transforming twitter data");
        transformation.apply(posts)
    }

    async fn load(&self, posts: &[SocialPost], db: Option<&Database>) -> Result<()> {
        info!(count = posts.len(), "loading twitter data");
        let db = db.ok_or(EtlError::MissingDatabase)?;
        db.upsert_posts(posts).await
    }
}
