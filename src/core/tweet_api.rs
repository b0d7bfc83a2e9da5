//! Abstraction over the Twitter API operations the workflow needs
//!
//! The orchestrator only talks to this trait, so it can be driven by the
//! real HTTP client or by an in-memory fake.

use crate::models::tweet::Tweet;
use async_trait::async_trait;
use reqwest::header::InvalidHeaderValue;
use thiserror::Error;

/// Error types for Twitter API operations
#[derive(Debug, Error)]
pub enum TwitterError {
    #[error("Invalid bearer token: {0}")]
    InvalidToken(#[from] InvalidHeaderValue),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Operations against the Twitter API v2
#[async_trait]
pub trait TweetApi: Send + Sync {
    /// Fetch the authenticated user's most recent tweets, newest first
    async fn recent_tweets(&self) -> Result<Vec<Tweet>, TwitterError>;

    /// Undo the retweet identified by `tweet_id`
    async fn unretweet(&self, tweet_id: &str) -> Result<(), TwitterError>;
}
