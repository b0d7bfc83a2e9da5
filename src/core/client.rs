//! Twitter API v2 HTTP client
//!
//! This module provides the reqwest-backed implementation of [`TweetApi`].
//! One `reqwest::Client` and one header set are built at startup and reused
//! for every request of the run.

use crate::core::config::Config;
use crate::core::constants::api;
use crate::core::tweet_api::{TweetApi, TwitterError};
use crate::models::tweet::{Tweet, TweetsResponse};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

/// Build the headers sent with every API call
///
/// # Errors
///
/// Returns [`TwitterError::InvalidToken`] if the token contains bytes that
/// are not allowed in an HTTP header value.
pub fn build_headers(bearer_token: &str) -> Result<HeaderMap, TwitterError> {
    let mut authorization = HeaderValue::from_str(&format!("Bearer {}", bearer_token))?;
    authorization.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, authorization);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

/// Twitter API client authenticated with a bearer token
pub struct TwitterClient {
    client: Client,
    base_url: String,
    headers: HeaderMap,
}

impl TwitterClient {
    /// Create a new client from the application configuration
    ///
    /// No timeout is set unless `request_timeout` is configured.
    pub fn new(config: &Config) -> Result<Self, TwitterError> {
        let headers = build_headers(&config.credentials.bearer_token)?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.clone(),
            headers,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl TweetApi for TwitterClient {
    async fn recent_tweets(&self) -> Result<Vec<Tweet>, TwitterError> {
        let url = self.url(api::RECENT_TWEETS_PATH);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.headers.clone())
            .query(&api::RECENT_TWEETS_QUERY[..])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            debug!("Recent tweets request failed with body: {}", body);
            return Err(TwitterError::Api {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown status").to_string(),
            });
        }

        let envelope: TweetsResponse = serde_json::from_str(&body)?;
        debug!("Fetched {} tweets", envelope.data.len());
        Ok(envelope.data)
    }

    async fn unretweet(&self, tweet_id: &str) -> Result<(), TwitterError> {
        let url = self.url(&api::unretweet_path(tweet_id));
        debug!("DELETE {}", url);

        let response = self
            .client
            .delete(&url)
            .headers(self.headers.clone())
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            debug!("Unretweet of {} failed with body: {}", tweet_id, body);
            return Err(TwitterError::Api {
                status: status.as_u16(),
                message: format!("failed to unretweet: {}", status),
            });
        }

        Ok(())
    }
}
