//! API data models
//!
//! This module contains data structures for the Twitter API v2.

pub mod tweet;
