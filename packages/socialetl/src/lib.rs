//! Social media ETL library.
//!
//! Pulls posts from social sources (reddit's hot listing, the follow graph
//! of a twitter handle), optionally filters them with a named strategy, and
//! upserts them into SQLite, recording one audit row per audited call.
//!
//! # Design
//!
//! - One [`SocialEtl`] contract per source: `extract` is the only operation
//!   that knows an upstream's shape; `transform`/`load`/`run` are uniform.
//! - Filtering policy lives outside the ETL: a [`Transformation`] is chosen
//!   by key at run time and passed in.
//! - [`Audited`] wraps an ETL and records every call's arguments before
//!   delegating.
//! - [`factory::create`] maps a source name to its client/ETL pairing.
//!
//! # Usage
//!
//! ```rust,ignore
//! use socialetl::{factory, store::{self, schema}, Transformation};
//!
//! let db = store::Database::connect("sqlite://data/socialetl.db?mode=rwc").await?;
//! schema::setup(&db).await?;
//!
//! let pipeline = factory::create("reddit")?;
//! let strategy = Transformation::from_name("sd")?;
//! pipeline.run(&db, &strategy, pipeline.default_source_id(), 100).await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Client capabilities and the ETL contract
//! - [`types`] - Post payloads, the envelope, audit records
//! - [`transform`] - Named filter strategies
//! - [`etl`] - Per-source ETL implementations
//! - [`audit`] - Call-audit decorator
//! - [`store`] - SQLite gateway and schema bootstrap
//! - [`clients`] - reqwest API clients
//! - [`testing`] - Mock clients for tests

pub mod audit;
pub mod clients;
pub mod credentials;
pub mod error;
pub mod etl;
pub mod factory;
pub mod store;
pub mod testing;
pub mod traits;
pub mod transform;
pub mod types;

// Re-export core types at crate root
pub use audit::{Audited, CallAudit};
pub use error::{EtlError, Result};
pub use etl::{RedditEtl, TwitterEtl};
pub use factory::Pipeline;
pub use store::Database;
pub use traits::{RedditClient, SocialEtl, TwitterClient};
pub use transform::Transformation;
pub use types::{PostData, RedditPost, SocialPost, Source, TwitterPost};
