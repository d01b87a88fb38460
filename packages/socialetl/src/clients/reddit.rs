//! Reddit API client (OAuth2 client-credentials + hot listing).

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;

use crate::credentials::RedditCredentials;
use crate::error::{EtlError, Result};
use crate::traits::{RedditClient, RedditSubmission};

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const API_BASE: &str = "https://oauth.reddit.com";

/// Reddit client using the script-app OAuth2 client-credentials flow.
///
/// The access token is fetched lazily on first use and then reused for the
/// process lifetime; reddit tokens outlive any single pipeline run.
pub struct RedditApi {
    http: reqwest::Client,
    credentials: RedditCredentials,
    token: Mutex<Option<String>>,
}

impl std::fmt::Debug for RedditApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The cached access token is a credential; never print it.
        f.debug_struct("RedditApi")
            .field("credentials", &self.credentials)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl RedditApi {
    pub fn new(credentials: RedditCredentials) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials,
            token: Mutex::new(None),
        }
    }

    async fn bearer(&self) -> Result<String> {
        let mut token = self.token.lock().await;
        if let Some(value) = token.as_ref() {
            return Ok(value.clone());
        }

        debug!("fetching reddit access token");
        let response: TokenResponse = self
            .http
            .post(TOKEN_URL)
            .basic_auth(
                &self.credentials.client_id,
                Some(self.credentials.client_secret.expose()),
            )
            .header("User-Agent", &self.credentials.user_agent)
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if response.access_token.is_empty() {
            return Err(EtlError::Api(
                "reddit token endpoint returned an empty token".to_string(),
            ));
        }
        *token = Some(response.access_token.clone());
        Ok(response.access_token)
    }
}

#[async_trait]
impl RedditClient for RedditApi {
    async fn hot_posts(&self, subreddit: &str, limit: usize) -> Result<Vec<RedditSubmission>> {
        let bearer = self.bearer().await?;
        debug!(subreddit, limit, "fetching hot listing");

        let listing: Listing = self
            .http
            .get(format!("{API_BASE}/r/{subreddit}/hot"))
            .query(&[("limit", limit.to_string())])
            .bearer_auth(bearer)
            .header("User-Agent", &self.credentials.user_agent)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(listing
            .data
            .children
            .into_iter()
            .map(|child| RedditSubmission {
                id: child.data.id,
                title: child.data.title,
                score: child.data.score,
                url: child.data.url,
                num_comments: child.data.num_comments,
                created_utc: child.data.created_utc,
                selftext: child.data.selftext,
            })
            .collect())
    }
}

// Wire shapes for the listing endpoint.

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<ListingChild>,
}

#[derive(Debug, Deserialize)]
struct ListingChild {
    data: SubmissionData,
}

#[derive(Debug, Deserialize)]
struct SubmissionData {
    id: String,
    title: String,
    score: i64,
    #[serde(default)]
    url: String,
    num_comments: i64,
    created_utc: f64,
    #[serde(default)]
    selftext: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::SecretString;

    #[test]
    fn test_client_debug_redacts_secret_and_token() {
        let api = RedditApi::new(RedditCredentials {
            client_id: "cid".to_string(),
            client_secret: SecretString::new("csecret"),
            user_agent: "socialetl/0.1".to_string(),
        });
        let debug = format!("{api:?}");
        assert!(debug.contains("cid"));
        assert!(!debug.contains("csecret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
