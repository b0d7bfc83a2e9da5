//! Core application modules
//!
//! This module contains configuration, constants, logging, and the Twitter
//! API client.

pub mod client;
pub mod config;
pub mod constants;
pub mod logging;
pub mod tweet_api;
