//! Factory credential sourcing: a missing environment variable is a startup
//! failure, raised before any I/O.
//!
//! These tests mutate process-wide environment variables; each test owns a
//! distinct set of variables so they stay independent under the parallel
//! test runner.

use socialetl::{factory, EtlError};

#[test]
fn test_reddit_missing_credential_fails_at_construction() {
    std::env::remove_var("REDDIT_CLIENT_ID");
    std::env::remove_var("REDDIT_CLIENT_SECRET");
    std::env::remove_var("REDDIT_USER_AGENT");

    let err = factory::create("reddit").unwrap_err();
    match err {
        EtlError::MissingCredential { name } => assert_eq!(name, "REDDIT_CLIENT_ID"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_twitter_missing_credential_fails_at_construction() {
    std::env::remove_var("BEARER_TOKEN");

    let err = factory::create("twitter").unwrap_err();
    match err {
        EtlError::MissingCredential { name } => assert_eq!(name, "BEARER_TOKEN"),
        other => panic!("unexpected error: {other:?}"),
    }
}
