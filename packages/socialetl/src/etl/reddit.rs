//! Reddit ETL: hot submissions from one subreddit.

use async_trait::async_trait;
use chrono::DateTime;
use tracing::info;

use crate::error::{EtlError, Result};
use crate::store::Database;
use crate::traits::{RedditClient, SocialEtl};
use crate::transform::Transformation;
use crate::types::{PostData, RedditPost, SocialPost, Source};

/// ETL over a subreddit's hot listing.
#[derive(Debug, Default)]
pub struct RedditEtl;

#[async_trait]
impl SocialEtl for RedditEtl {
    type Client = dyn RedditClient;

    async fn extract(
        &self,
        source_id: &str,
        limit: usize,
        client: Option<&Self::Client>,
    ) -> Result<Vec<SocialPost>> {
        info!(subreddit = source_id, limit, "extracting reddit data");
        let client = client.ok_or(EtlError::MissingClient {
            which: Source::Reddit,
        })?;

        let submissions = client.hot_posts(source_id, limit).await?;
        Ok(submissions
            .into_iter()
            .map(|submission| {
                let data = PostData::Reddit(RedditPost {
                    title: submission.title,
                    score: submission.score,
                    url: submission.url,
                    comments: submission.num_comments,
                    created: DateTime::from_timestamp(submission.created_utc as i64, 0)
                        .unwrap_or_default(),
                    body: submission.selftext,
                });
                SocialPost::new(submission.id, data)
            })
            .collect())
    }

    async fn transform(
        &self,
        posts: Vec<SocialPost>,
        transformation: &Transformation,
    ) -> Result<Vec<SocialPost>> {
        info!(strategy = transformation.name(), "transforming reddit data");
        transformation.apply(posts)
    }

    async fn load(&self, posts: &[SocialPost], db: Option<&Database>) -> Result<()> {
        info!(count = posts.len(), "loading reddit data");
        let db = db.ok_or(EtlError::MissingDatabase)?;
        db.upsert_posts(posts).await
    }
}
