//! Credential handling with secure memory.
//!
//! Uses the `secrecy` crate so API secrets never leak through logs, debug
//! output, or error messages. Credentials are sourced from the environment
//! at client construction time; a missing variable is a startup failure,
//! surfaced before any network or database I/O.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

use crate::error::{EtlError, Result};

/// A secret string that won't be logged or displayed.
pub struct SecretString(SecretBox<str>);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// Expose the secret value for use.
    ///
    /// Only call this at the point of use (e.g. an Authorization header).
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.expose().to_string())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

fn require_env(name: &'static str) -> Result<String> {
    std::env::var(name).map_err(|_| EtlError::MissingCredential { name })
}

/// Credentials for the reddit OAuth2 client-credentials flow.
#[derive(Clone)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: SecretString,
    pub user_agent: String,
}

impl RedditCredentials {
    /// Read `REDDIT_CLIENT_ID`, `REDDIT_CLIENT_SECRET`, and
    /// `REDDIT_USER_AGENT` from the environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            client_id: require_env("REDDIT_CLIENT_ID")?,
            client_secret: SecretString::new(require_env("REDDIT_CLIENT_SECRET")?),
            user_agent: require_env("REDDIT_USER_AGENT")?,
        })
    }
}

impl fmt::Debug for RedditCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedditCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Bearer credential for the twitter v2 API.
#[derive(Clone)]
pub struct TwitterCredentials {
    pub bearer_token: SecretString,
}

impl TwitterCredentials {
    /// Read `BEARER_TOKEN` from the environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bearer_token: SecretString::new(require_env("BEARER_TOKEN")?),
        })
    }
}

impl fmt::Debug for TwitterCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwitterCredentials")
            .field("bearer_token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_not_in_debug_or_display() {
        let secret = SecretString::new("hunter2");
        assert!(!format!("{:?}", secret).contains("hunter2"));
        assert!(!format!("{}", secret).contains("hunter2"));
        assert_eq!(secret.expose(), "hunter2");
    }

    #[test]
    fn test_reddit_credentials_debug_redacts_secret() {
        let creds = RedditCredentials {
            client_id: "cid".to_string(),
            client_secret: SecretString::new("csecret"),
            user_agent: "socialetl/0.1".to_string(),
        };
        let debug = format!("{:?}", creds);
        assert!(debug.contains("cid"));
        assert!(!debug.contains("csecret"));
    }
}
