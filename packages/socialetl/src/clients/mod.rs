//! HTTP implementations of the extraction client traits.
//!
//! Thin wrappers over the upstream APIs: authenticate once, fetch listings.
//! No retry, no backoff, no pagination beyond a single listing call, and no
//! rate-limit handling; a hung upstream call blocks the pipeline.

mod reddit;
mod twitter;

pub use reddit::RedditApi;
pub use twitter::TwitterApi;
