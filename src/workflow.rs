//! Unretweet workflow
//!
//! Fetches the recent tweets once, then undoes each one in the order the API
//! returned them. A failed fetch aborts the run; a failed unretweet is logged
//! and the loop moves on to the next tweet.

use crate::core::tweet_api::{TweetApi, TwitterError};
use tracing::{error, info, warn};

/// How the fetched tweets are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Unretweet every fetched tweet
    Unretweet,
    /// Only list the fetched tweets
    DryRun,
}

/// Result of one unretweet attempt
#[derive(Debug)]
pub struct ItemOutcome {
    pub tweet_id: String,
    pub result: Result<(), TwitterError>,
}

/// Per-tweet outcomes of a run, in processing order
#[derive(Debug, Default)]
pub struct RunSummary {
    pub fetched: usize,
    pub outcomes: Vec<ItemOutcome>,
}

impl RunSummary {
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.attempted() - self.succeeded()
    }
}

/// Fetch recent tweets and unretweet each of them
///
/// # Errors
///
/// Returns the fetch error unchanged; no unretweet is attempted in that case.
/// Individual unretweet failures never surface here, they are recorded in
/// the returned [`RunSummary`].
pub async fn undo_recent_retweets(
    api: &dyn TweetApi,
    mode: RunMode,
) -> Result<RunSummary, TwitterError> {
    let tweets = api.recent_tweets().await?;
    info!("Fetched {} recent tweets", tweets.len());

    let mut summary = RunSummary {
        fetched: tweets.len(),
        outcomes: Vec::with_capacity(tweets.len()),
    };

    if mode == RunMode::DryRun {
        for tweet in &tweets {
            println!("{}\t{}", tweet.id, tweet.text);
        }
        return Ok(summary);
    }

    for tweet in tweets {
        let result = api.unretweet(&tweet.id).await;
        match &result {
            Ok(()) => println!("Successfully unretweeted tweet with ID: {}", tweet.id),
            Err(e) => error!("Error unretweeting tweet with ID {}: {}", tweet.id, e),
        }
        summary.outcomes.push(ItemOutcome {
            tweet_id: tweet.id,
            result,
        });
    }

    info!(
        "Unretweet run finished: {} fetched, {} attempted, {} succeeded, {} failed",
        summary.fetched,
        summary.attempted(),
        summary.succeeded(),
        summary.failed()
    );

    if summary.failed() > 0 {
        let failed_ids: Vec<&str> = summary
            .outcomes
            .iter()
            .filter(|o| o.result.is_err())
            .map(|o| o.tweet_id.as_str())
            .collect();
        warn!("Tweets left retweeted: {}", failed_ids.join(", "));
    }

    Ok(summary)
}
