//! Source-name dispatch: build the right client/ETL pairing.
//!
//! The pairing is sealed inside the [`Pipeline`] enum, so a reddit client
//! can never reach the twitter ETL (mismatches are impossible after
//! construction, not merely checked at call time).

use crate::audit::{Audited, CallAudit};
use crate::clients::{RedditApi, TwitterApi};
use crate::credentials::{RedditCredentials, TwitterCredentials};
use crate::error::Result;
use crate::etl::{RedditEtl, TwitterEtl};
use crate::store::Database;
use crate::traits::{RedditClient, SocialEtl, TwitterClient};
use crate::transform::Transformation;
use crate::types::Source;

/// Subreddit pulled when no id is given.
pub const REDDIT_DEFAULT_ID: &str = "dataengineering";
/// Handle pulled when no id is given.
pub const TWITTER_DEFAULT_ID: &str = "startdataeng";
/// Record cap when none is given.
pub const DEFAULT_NUM_RECORDS: usize = 100;

/// A constructed extraction client paired with its source's ETL.
#[derive(Debug)]
pub enum Pipeline {
    Reddit { client: RedditApi },
    Twitter { client: TwitterApi },
}

/// Build the pipeline for a source name.
///
/// Credentials come from the environment; a missing variable fails here,
/// before any I/O. Unknown names fail with the same parse error the CLI
/// reports.
pub fn create(source_name: &str) -> Result<Pipeline> {
    match source_name.parse::<Source>()? {
        Source::Reddit => {
            let credentials = RedditCredentials::from_env()?;
            Ok(Pipeline::Reddit {
                client: RedditApi::new(credentials),
            })
        }
        Source::Twitter => {
            let credentials = TwitterCredentials::from_env()?;
            Ok(Pipeline::Twitter {
                client: TwitterApi::new(credentials),
            })
        }
    }
}

impl Pipeline {
    pub fn source(&self) -> Source {
        match self {
            Pipeline::Reddit { .. } => Source::Reddit,
            Pipeline::Twitter { .. } => Source::Twitter,
        }
    }

    /// The id pulled when the caller does not name one.
    pub fn default_source_id(&self) -> &'static str {
        match self {
            Pipeline::Reddit { .. } => REDDIT_DEFAULT_ID,
            Pipeline::Twitter { .. } => TWITTER_DEFAULT_ID,
        }
    }

    /// Run the audited extract -> transform -> load sequence.
    pub async fn run(
        &self,
        db: &Database,
        transformation: &Transformation,
        source_id: &str,
        limit: usize,
    ) -> Result<()> {
        let audit = CallAudit::new(db.clone());
        match self {
            Pipeline::Reddit { client } => {
                Audited::new(RedditEtl, audit)
                    .run(
                        Some(db),
                        Some(client as &dyn RedditClient),
                        transformation,
                        source_id,
                        limit,
                    )
                    .await
            }
            Pipeline::Twitter { client } => {
                Audited::new(TwitterEtl, audit)
                    .run(
                        Some(db),
                        Some(client as &dyn TwitterClient),
                        transformation,
                        source_id,
                        limit,
                    )
                    .await
            }
        }
    }
}
