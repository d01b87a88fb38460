//! Per-source implementations of the [`SocialEtl`](crate::traits::SocialEtl)
//! contract.
//!
//! All source-specific knowledge (API shape, time windows, flattening order)
//! lives in each source's `extract`; `transform` and `load` are identical in
//! behavior across sources.

mod reddit;
mod twitter;

pub use reddit::RedditEtl;
pub use twitter::TwitterEtl;
