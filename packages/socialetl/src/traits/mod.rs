//! Trait seams between the pipeline and its collaborators.

pub mod client;
pub mod etl;

pub use client::{RedditClient, RedditSubmission, Tweet, TwitterClient};
pub use etl::SocialEtl;
