//! Constants for environment variables and Twitter API endpoints
//!
//! This module defines the names and fixed values shared by the config
//! loader and the HTTP client.

/// Environment variable names
pub mod env {
    /// Twitter API key
    pub const API_KEY: &str = "TWITTER_API_KEY";

    /// Twitter API secret
    pub const API_SECRET: &str = "TWITTER_API_SECRET";

    /// Bearer token sent with every request
    pub const BEARER_TOKEN: &str = "TWITTER_BEARER_TOKEN";

    /// Optional path to the TOML settings file
    pub const CONFIG_PATH: &str = "CONFIG_PATH";

    /// Optional log level override
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
}

/// Twitter API v2 endpoints
pub mod api {
    /// Default API base URL
    pub const BASE_URL: &str = "https://api.twitter.com/2";

    /// Recent tweets of the authenticated user
    pub const RECENT_TWEETS_PATH: &str = "/users/me/tweets";

    /// Page size requested from the recent tweets endpoint
    pub const MAX_RESULTS: &str = "10";

    /// Query parameters for the recent tweets request, in wire order
    pub const RECENT_TWEETS_QUERY: [(&str, &str); 3] = [
        ("tweet.fields", "id"),
        ("expansions", "referenced_tweets.id"),
        ("max_results", MAX_RESULTS),
    ];

    /// Path of the unretweet endpoint for a tweet
    pub fn unretweet_path(tweet_id: &str) -> String {
        format!("/tweets/{}/unretweet", tweet_id)
    }
}

/// Default settings file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";
