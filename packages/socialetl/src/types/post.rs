//! Post payloads and the normalized envelope around them.
//!
//! Every upstream source produces its own raw shape; the envelope
//! ([`SocialPost`]) unifies them into one persistable record keyed by the
//! upstream id. The source tag is derived from the payload variant, so an
//! envelope can never carry a tag that disagrees with its payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EtlError;

/// The upstream a post came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Reddit,
    Twitter,
}

impl Source {
    /// Tag stored in the `source` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Reddit => "reddit",
            Source::Twitter => "twitter",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = EtlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reddit" => Ok(Source::Reddit),
            "twitter" => Ok(Source::Twitter),
            other => Err(EtlError::UnknownSource {
                name: other.to_string(),
            }),
        }
    }
}

/// Raw data for one reddit submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedditPost {
    pub title: String,
    pub score: i64,
    pub url: String,
    /// Number of comments on the submission.
    pub comments: i64,
    pub created: DateTime<Utc>,
    pub body: String,
}

/// Raw data for one tweet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwitterPost {
    pub text: String,
}

/// Source-specific payload carried by an envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PostData {
    Reddit(RedditPost),
    Twitter(TwitterPost),
}

impl PostData {
    /// Which source this payload variant belongs to.
    pub fn source(&self) -> Source {
        match self {
            PostData::Reddit(_) => Source::Reddit,
            PostData::Twitter(_) => Source::Twitter,
        }
    }

    /// Serialize just the payload fields (what the `social_data` column holds).
    pub fn to_json(&self) -> serde_json::Result<String> {
        match self {
            PostData::Reddit(post) => serde_json::to_string(post),
            PostData::Twitter(post) => serde_json::to_string(post),
        }
    }

    /// Deserialize a payload column, picking the variant from the source tag.
    pub fn from_json(source: Source, json: &str) -> serde_json::Result<Self> {
        Ok(match source {
            Source::Reddit => PostData::Reddit(serde_json::from_str(json)?),
            Source::Twitter => PostData::Twitter(serde_json::from_str(json)?),
        })
    }
}

/// Normalized envelope: any source's post, keyed by its upstream id.
///
/// The id is the persistence primary key; re-loading the same id overwrites
/// the previous payload (upsert, never a duplicate-key error).
#[derive(Debug, Clone, PartialEq)]
pub struct SocialPost {
    pub id: String,
    pub data: PostData,
}

impl SocialPost {
    pub fn new(id: impl Into<String>, data: PostData) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    /// Source tag, derived from the payload variant.
    pub fn source(&self) -> Source {
        self.data.source()
    }

    /// Full JSON view of the envelope, used by the call-audit log.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "source": self.source().as_str(),
            "social_data": self.data,
        })
    }
}

/// An envelope read back from the store, with its insertion timestamp.
#[derive(Debug, Clone)]
pub struct StoredPost {
    pub id: String,
    pub data: PostData,
    /// `dt_created` column as written by SQLite (`datetime('now')` format).
    pub stored_at: String,
}

impl StoredPost {
    pub fn source(&self) -> Source {
        self.data.source()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reddit_post() -> RedditPost {
        RedditPost {
            title: "title0".to_string(),
            score: 10,
            url: "url0".to_string(),
            comments: 3,
            created: Utc::now(),
            body: "body0".to_string(),
        }
    }

    #[test]
    fn test_source_tag_follows_payload() {
        let post = SocialPost::new("abc", PostData::Reddit(reddit_post()));
        assert_eq!(post.source(), Source::Reddit);

        let post = SocialPost::new(
            "def",
            PostData::Twitter(TwitterPost {
                text: "hello".to_string(),
            }),
        );
        assert_eq!(post.source(), Source::Twitter);
    }

    #[test]
    fn test_source_parse() {
        assert_eq!("reddit".parse::<Source>().unwrap(), Source::Reddit);
        assert_eq!("twitter".parse::<Source>().unwrap(), Source::Twitter);

        let err = "myspace".parse::<Source>().unwrap_err();
        assert!(err.to_string().contains("myspace"));
    }

    #[test]
    fn test_payload_round_trip() {
        let data = PostData::Reddit(reddit_post());
        let json = data.to_json().unwrap();
        let back = PostData::from_json(Source::Reddit, &json).unwrap();
        assert_eq!(back, data);

        let data = PostData::Twitter(TwitterPost {
            text: "text0".to_string(),
        });
        let json = data.to_json().unwrap();
        let back = PostData::from_json(Source::Twitter, &json).unwrap();
        assert_eq!(back, data);
    }
}
