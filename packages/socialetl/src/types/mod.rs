//! Value types shared across the pipeline.

pub mod audit;
pub mod post;

pub use audit::AuditRecord;
pub use post::{PostData, RedditPost, SocialPost, Source, StoredPost, TwitterPost};
