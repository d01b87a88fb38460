//! Twitter v2 API client (bearer-authenticated lookups).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::credentials::TwitterCredentials;
use crate::error::{EtlError, Result};
use crate::traits::{Tweet, TwitterClient};

const API_BASE: &str = "https://api.twitter.com/2";

/// Twitter client using an app-only bearer token.
#[derive(Debug)]
pub struct TwitterApi {
    http: reqwest::Client,
    credentials: TwitterCredentials,
}

impl TwitterApi {
    pub fn new(credentials: TwitterCredentials) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials,
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, String)],
    ) -> Result<T> {
        Ok(self
            .http
            .get(url)
            .query(query)
            .bearer_auth(self.credentials.bearer_token.expose())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
}

#[async_trait]
impl TwitterClient for TwitterApi {
    async fn user_id(&self, handle: &str) -> Result<String> {
        debug!(handle, "resolving twitter handle");
        let response: UserResponse = self
            .get_json(format!("{API_BASE}/users/by/username/{handle}"), &[])
            .await?;
        let user = response
            .data
            .ok_or_else(|| EtlError::Api(format!("no twitter user for handle '{handle}'")))?;
        Ok(user.id)
    }

    async fn following(&self, user_id: &str) -> Result<Vec<String>> {
        debug!(user_id, "listing followed accounts");
        let response: UsersResponse = self
            .get_json(
                format!("{API_BASE}/users/{user_id}/following"),
                &[("max_results", "1000".to_string())],
            )
            .await?;
        Ok(response
            .data
            .unwrap_or_default()
            .into_iter()
            .map(|user| user.id)
            .collect())
    }

    async fn recent_original_tweets(
        &self,
        user_id: &str,
        start_time: DateTime<Utc>,
    ) -> Result<Vec<Tweet>> {
        debug!(user_id, "fetching recent tweets");
        let response: TweetsResponse = self
            .get_json(
                format!("{API_BASE}/users/{user_id}/tweets"),
                &[
                    ("exclude", "retweets,replies".to_string()),
                    (
                        "start_time",
                        start_time.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
                    ),
                    ("tweet_fields", "id,text,author_id,created_at".to_string()),
                ],
            )
            .await?;
        Ok(response
            .data
            .unwrap_or_default()
            .into_iter()
            .map(|tweet| Tweet {
                id: tweet.id,
                text: tweet.text,
            })
            .collect())
    }
}

// Wire shapes for the v2 endpoints. `data` is absent when there is nothing
// to return (e.g. an account that tweeted nothing in the window).

#[derive(Debug, Deserialize)]
struct UserResponse {
    data: Option<UserData>,
}

#[derive(Debug, Deserialize)]
struct UsersResponse {
    data: Option<Vec<UserData>>,
}

#[derive(Debug, Deserialize)]
struct UserData {
    id: String,
}

#[derive(Debug, Deserialize)]
struct TweetsResponse {
    data: Option<Vec<TweetData>>,
}

#[derive(Debug, Deserialize)]
struct TweetData {
    id: String,
    text: String,
}
