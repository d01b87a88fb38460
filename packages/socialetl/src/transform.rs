//! Named filter strategies over extracted envelopes.
//!
//! A strategy is a pure function from a batch of posts to a selected
//! sub-batch. The ETL implementations carry no filtering policy of their
//! own; callers pick a strategy by key and pass it into `transform`, so new
//! strategies never touch extraction or load code.

use rand::seq::IndexedRandom;
use tracing::debug;

use crate::error::{EtlError, Result};
use crate::types::{PostData, SocialPost, Source};

/// How many posts the random-sample strategy keeps.
const SAMPLE_SIZE: usize = 2;

/// A filter strategy, selected by string key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transformation {
    /// `no_tx`: pass everything through unchanged.
    NoOp,
    /// `rand`: keep [`SAMPLE_SIZE`] posts drawn independently with
    /// replacement. Duplicates are possible; that matches the historical
    /// behavior and callers depend on the fixed output length, so it is
    /// kept rather than switched to sampling without replacement.
    RandomSample,
    /// `sd`: keep posts whose comment count strictly exceeds the batch's
    /// population mean plus two population standard deviations. Only
    /// meaningful for reddit payloads.
    StdevOutlier,
}

impl Transformation {
    /// Look up a strategy by its key.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "no_tx" => Ok(Transformation::NoOp),
            "rand" => Ok(Transformation::RandomSample),
            "sd" => Ok(Transformation::StdevOutlier),
            other => Err(EtlError::UnknownTransformation {
                name: other.to_string(),
            }),
        }
    }

    /// The key this strategy is registered under.
    pub fn name(&self) -> &'static str {
        match self {
            Transformation::NoOp => "no_tx",
            Transformation::RandomSample => "rand",
            Transformation::StdevOutlier => "sd",
        }
    }

    /// Apply the strategy to a batch. Pure: no I/O, input order respected
    /// where the strategy keeps elements.
    pub fn apply(&self, posts: Vec<SocialPost>) -> Result<Vec<SocialPost>> {
        match self {
            Transformation::NoOp => Ok(posts),
            Transformation::RandomSample => Ok(random_sample(posts)),
            Transformation::StdevOutlier => stdev_outlier(posts),
        }
    }
}

/// Draw [`SAMPLE_SIZE`] posts with replacement. Empty input yields empty
/// output.
fn random_sample(posts: Vec<SocialPost>) -> Vec<SocialPost> {
    let mut rng = rand::rng();
    let sample: Vec<SocialPost> = (0..SAMPLE_SIZE)
        .filter_map(|_| posts.choose(&mut rng).cloned())
        .collect();
    debug!(input = posts.len(), kept = sample.len(), "random sample");
    sample
}

/// Keep posts with comment count > mean + 2 * stdev (population statistics,
/// divisor N). Empty input yields empty output rather than dividing by zero.
fn stdev_outlier(posts: Vec<SocialPost>) -> Result<Vec<SocialPost>> {
    if posts.is_empty() {
        return Ok(Vec::new());
    }

    let mut counts = Vec::with_capacity(posts.len());
    for post in &posts {
        match &post.data {
            PostData::Reddit(data) => counts.push(data.comments as f64),
            other => {
                return Err(EtlError::PayloadMismatch {
                    transformation: "sd",
                    expected: Source::Reddit,
                    actual: other.source(),
                })
            }
        }
    }

    let n = counts.len() as f64;
    let mean = counts.iter().sum::<f64>() / n;
    let stdev = (counts.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / n).sqrt();
    let cutoff = mean + 2.0 * stdev;
    debug!(mean, stdev, cutoff, "stdev outlier cutoff");

    Ok(posts
        .into_iter()
        .zip(counts)
        .filter(|(_, count)| *count > cutoff)
        .map(|(post, _)| post)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fake_reddit_posts, fake_tweets};

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(
            Transformation::from_name("no_tx").unwrap(),
            Transformation::NoOp
        );
        assert_eq!(
            Transformation::from_name("rand").unwrap(),
            Transformation::RandomSample
        );
        assert_eq!(
            Transformation::from_name("sd").unwrap(),
            Transformation::StdevOutlier
        );
    }

    #[test]
    fn test_unknown_name_is_config_error() {
        let err = Transformation::from_name("bogus").unwrap_err();
        match err {
            EtlError::UnknownTransformation { ref name } => assert_eq!(name, "bogus"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_no_op_is_identity() {
        let posts = fake_tweets(5);
        let out = Transformation::NoOp.apply(posts.clone()).unwrap();
        assert_eq!(out, posts);

        let out = Transformation::NoOp.apply(Vec::new()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_random_sample_length() {
        let posts = fake_tweets(5);
        let out = Transformation::RandomSample.apply(posts.clone()).unwrap();
        assert_eq!(out.len(), SAMPLE_SIZE);
        // Duplicates are allowed; membership is not.
        for picked in &out {
            assert!(posts.contains(picked));
        }
    }

    #[test]
    fn test_random_sample_empty_input() {
        let out = Transformation::RandomSample.apply(Vec::new()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_stdev_outlier_keeps_only_outliers() {
        // Fifteen posts with one comment, one with eight: mean 1.4375,
        // stdev ~1.694, cutoff ~4.83 -> only the 8-comment post survives.
        let posts = fake_reddit_posts(&[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 8]);
        let out = Transformation::StdevOutlier.apply(posts).unwrap();
        assert_eq!(out.len(), 1);
        match &out[0].data {
            PostData::Reddit(data) => assert_eq!(data.comments, 8),
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_stdev_outlier_uniform_batch_keeps_nothing() {
        // Zero stdev: nothing strictly exceeds the mean.
        let posts = fake_reddit_posts(&[4, 4, 4, 4]);
        let out = Transformation::StdevOutlier.apply(posts).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_stdev_outlier_empty_input() {
        let out = Transformation::StdevOutlier.apply(Vec::new()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_stdev_outlier_rejects_twitter_payload() {
        let posts = fake_tweets(3);
        let err = Transformation::StdevOutlier.apply(posts).unwrap_err();
        match err {
            EtlError::PayloadMismatch {
                transformation,
                expected,
                actual,
            } => {
                assert_eq!(transformation, "sd");
                assert_eq!(expected, Source::Reddit);
                assert_eq!(actual, Source::Twitter);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
