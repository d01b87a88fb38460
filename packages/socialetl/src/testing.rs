//! Mock clients and fixture builders for tests.
//!
//! The mocks implement the client traits with canned responses and record
//! their calls behind `Arc<RwLock<_>>`, so tests can clone a handle into the
//! pipeline and still inspect it afterwards.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::Result;
use crate::traits::{RedditClient, RedditSubmission, Tweet, TwitterClient};
use crate::types::{PostData, RedditPost, SocialPost, TwitterPost};

/// Mock reddit client returning canned submissions.
#[derive(Default)]
pub struct MockRedditClient {
    submissions: Arc<RwLock<Vec<RedditSubmission>>>,
    hot_calls: Arc<RwLock<Vec<(String, usize)>>>,
}

impl MockRedditClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canned submissions, returned (truncated to the requested limit) by
    /// every `hot_posts` call.
    pub fn with_submissions(self, submissions: Vec<RedditSubmission>) -> Self {
        *self.submissions.write().unwrap() = submissions;
        self
    }

    /// The `(subreddit, limit)` pairs `hot_posts` was called with.
    pub fn hot_calls(&self) -> Vec<(String, usize)> {
        self.hot_calls.read().unwrap().clone()
    }
}

impl Clone for MockRedditClient {
    fn clone(&self) -> Self {
        Self {
            submissions: Arc::clone(&self.submissions),
            hot_calls: Arc::clone(&self.hot_calls),
        }
    }
}

#[async_trait]
impl RedditClient for MockRedditClient {
    async fn hot_posts(&self, subreddit: &str, limit: usize) -> Result<Vec<RedditSubmission>> {
        self.hot_calls
            .write()
            .unwrap()
            .push((subreddit.to_string(), limit));
        let submissions = self.submissions.read().unwrap();
        Ok(submissions.iter().take(limit).cloned().collect())
    }
}

#[derive(Default)]
struct MockTwitterState {
    /// Followed account ids, in the order timelines were registered.
    following: Vec<String>,
    timelines: HashMap<String, Vec<Tweet>>,
    user_id_calls: usize,
    following_calls: usize,
    timeline_calls: Vec<String>,
    next_index: usize,
}

/// Mock twitter client: any handle resolves to `"user0"`, which follows the
/// accounts registered via [`with_timeline`](Self::with_timeline) /
/// [`with_tweets`](Self::with_tweets).
#[derive(Default)]
pub struct MockTwitterClient {
    state: Arc<RwLock<MockTwitterState>>,
}

impl MockTwitterClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a followed account with an explicit timeline.
    pub fn with_timeline(self, user_id: impl Into<String>, tweets: Vec<Tweet>) -> Self {
        {
            let mut state = self.state.write().unwrap();
            let user_id = user_id.into();
            state.following.push(user_id.clone());
            state.next_index += tweets.len();
            state.timelines.insert(user_id, tweets);
        }
        self
    }

    /// Register a followed account with `count` generated tweets
    /// (`id0`/`text0`, `id1`/`text1`, ... continuing across accounts).
    pub fn with_tweets(self, user_id: impl Into<String>, count: usize) -> Self {
        let start = self.state.read().unwrap().next_index;
        let tweets = (start..start + count)
            .map(|idx| Tweet {
                id: format!("id{idx}"),
                text: format!("text{idx}"),
            })
            .collect();
        self.with_timeline(user_id, tweets)
    }

    pub fn user_id_calls(&self) -> usize {
        self.state.read().unwrap().user_id_calls
    }

    pub fn following_calls(&self) -> usize {
        self.state.read().unwrap().following_calls
    }

    /// The account ids whose timelines were requested, in call order.
    pub fn timeline_calls(&self) -> Vec<String> {
        self.state.read().unwrap().timeline_calls.clone()
    }
}

impl Clone for MockTwitterClient {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

#[async_trait]
impl TwitterClient for MockTwitterClient {
    async fn user_id(&self, _handle: &str) -> Result<String> {
        let mut state = self.state.write().unwrap();
        state.user_id_calls += 1;
        Ok("user0".to_string())
    }

    async fn following(&self, _user_id: &str) -> Result<Vec<String>> {
        let mut state = self.state.write().unwrap();
        state.following_calls += 1;
        Ok(state.following.clone())
    }

    async fn recent_original_tweets(
        &self,
        user_id: &str,
        _start_time: DateTime<Utc>,
    ) -> Result<Vec<Tweet>> {
        let mut state = self.state.write().unwrap();
        state.timeline_calls.push(user_id.to_string());
        Ok(state.timelines.get(user_id).cloned().unwrap_or_default())
    }
}

/// Reddit envelopes with the given comment counts and otherwise sequential
/// fields (`title0`, `url0`, ...), mirroring the shape extract produces.
pub fn fake_reddit_posts(comment_counts: &[i64]) -> Vec<SocialPost> {
    comment_counts
        .iter()
        .enumerate()
        .map(|(idx, &comments)| {
            SocialPost::new(
                format!("id{idx}"),
                PostData::Reddit(RedditPost {
                    title: format!("title{idx}"),
                    score: idx as i64,
                    url: format!("url{idx}"),
                    comments,
                    created: DateTime::from_timestamp(1_700_000_000 + idx as i64, 0).unwrap(),
                    body: format!("body{idx}"),
                }),
            )
        })
        .collect()
}

/// Raw reddit submissions with the given comment counts, for mock clients.
pub fn fake_reddit_submissions(comment_counts: &[i64]) -> Vec<RedditSubmission> {
    comment_counts
        .iter()
        .enumerate()
        .map(|(idx, &num_comments)| RedditSubmission {
            id: format!("id{idx}"),
            title: format!("title{idx}"),
            score: idx as i64,
            url: format!("url{idx}"),
            num_comments,
            created_utc: 1_700_000_000.0 + idx as f64,
            selftext: format!("body{idx}"),
        })
        .collect()
}

/// Twitter envelopes `id0`/`text0` .. `id{n-1}`/`text{n-1}`.
pub fn fake_tweets(count: usize) -> Vec<SocialPost> {
    (0..count)
        .map(|idx| {
            SocialPost::new(
                format!("id{idx}"),
                PostData::Twitter(TwitterPost {
                    text: format!("text{idx}"),
                }),
            )
        })
        .collect()
}
