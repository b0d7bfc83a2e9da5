//! Twitter API v2 data models
//!
//! Only the fields the unretweet workflow reads are modelled; anything else
//! in the payload (`includes`, `meta`, ...) is ignored on decode.

use serde::{Deserialize, Deserializer, Serialize};

/// A single tweet as returned by the recent tweets endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tweet {
    pub id: String,
    #[serde(default)]
    pub text: String,
}

/// Envelope wrapping the recent tweets list
///
/// A missing or `null` `data` field both mean the user has no tweets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TweetsResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: Vec<Tweet>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Tweet>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Tweet>>::deserialize(deserializer)?.unwrap_or_default())
}
