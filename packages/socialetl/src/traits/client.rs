//! Extraction client capabilities.
//!
//! These traits are the only thing the ETL layer knows about the upstream
//! APIs: construct a client once with credentials, then call listing /
//! follow-graph / timeline operations. Authentication, pagination, and rate
//! limits live entirely behind the implementations in [`crate::clients`];
//! tests substitute the mocks in [`crate::testing`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;

/// One submission as returned by the reddit listing API.
#[derive(Debug, Clone)]
pub struct RedditSubmission {
    pub id: String,
    pub title: String,
    pub score: i64,
    pub url: String,
    pub num_comments: i64,
    /// Creation time as a unix epoch, the way reddit reports it.
    pub created_utc: f64,
    pub selftext: String,
}

/// One tweet as returned by the twitter timeline API.
#[derive(Debug, Clone)]
pub struct Tweet {
    pub id: String,
    pub text: String,
}

/// Capability to list hot submissions from a named subreddit.
#[async_trait]
pub trait RedditClient: Send + Sync {
    /// Fetch up to `limit` hot submissions from `subreddit`, in listing
    /// order.
    async fn hot_posts(&self, subreddit: &str, limit: usize) -> Result<Vec<RedditSubmission>>;
}

/// Capability to resolve handles, walk the follow graph, and read timelines.
#[async_trait]
pub trait TwitterClient: Send + Sync {
    /// Resolve a handle to the account's user id.
    async fn user_id(&self, handle: &str) -> Result<String>;

    /// Ids of the accounts `user_id` follows, in enumeration order.
    async fn following(&self, user_id: &str) -> Result<Vec<String>>;

    /// The account's own tweets since `start_time`, excluding retweets and
    /// replies, in timeline order.
    async fn recent_original_tweets(
        &self,
        user_id: &str,
        start_time: DateTime<Utc>,
    ) -> Result<Vec<Tweet>>;
}
