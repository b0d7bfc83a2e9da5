//! Twitter Unretweet Tool
//!
//! Fetches the authenticated user's most recent tweets and undoes the
//! retweet on each of them, one request at a time.

mod core;
mod models;
mod workflow;

use crate::core::client::TwitterClient;
use crate::core::config::Config;
use crate::core::logging::init_logging;
use crate::workflow::{RunMode, undo_recent_retweets};
use tracing::{debug, error};

/// Process exit status for a configuration or fetch failure
const EXIT_FAILURE: i32 = 1;

/// Process exit status for a completed run, whatever the per-tweet outcomes
const EXIT_SUCCESS: i32 = 0;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Check for --help flag
    if std::env::args().any(|arg| arg == "--help") {
        print_help();
        return;
    }

    let mode = if std::env::args().any(|arg| arg == "--dry-run") {
        RunMode::DryRun
    } else {
        RunMode::Unretweet
    };

    // A missing .env file is not an error
    dotenv::dotenv().ok();

    let code = run(|name| std::env::var(name).ok(), mode).await;
    if code != EXIT_SUCCESS {
        std::process::exit(code);
    }
}

/// Load configuration, then fetch and unretweet
///
/// Returns the process exit status. Configuration errors fail before any
/// HTTP request is made; unretweet failures do not affect the status.
async fn run<F>(lookup: F, mode: RunMode) -> i32
where
    F: Fn(&str) -> Option<String>,
{
    // Load configuration
    let config = match Config::from_lookup(lookup) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration Error: {}", e);
            return EXIT_FAILURE;
        }
    };

    // Initialize logging
    init_logging(&config.log_level);
    debug!(
        "Using API base URL {} (api key: {} chars, api secret: {} chars)",
        config.base_url,
        config.credentials.api_key.len(),
        config.credentials.api_secret.len()
    );

    let client = match TwitterClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create Twitter client: {}", e);
            return EXIT_FAILURE;
        }
    };

    match undo_recent_retweets(&client, mode).await {
        Ok(_) => EXIT_SUCCESS,
        Err(e) => {
            error!("Error retrieving retweets: {}", e);
            EXIT_FAILURE
        }
    }
}

/// Print help message
fn print_help() {
    println!("Twitter Unretweet Tool v0.1.0");
    println!();
    println!("Usage: unretweet [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --help       Display this help message");
    println!("  --dry-run    List the recent tweets without unretweeting them");
    println!();
    println!("Environment variables (a .env file is also read):");
    println!("  TWITTER_API_KEY      - Twitter API key (required)");
    println!("  TWITTER_API_SECRET   - Twitter API secret (required)");
    println!("  TWITTER_BEARER_TOKEN - Bearer token used for every request (required)");
    println!("  CONFIG_PATH          - Settings file (default: config.toml, if present)");
    println!("  LOG_LEVEL            - Logging level (default: info)");
    println!();
    println!("Settings file:");
    println!("  log_level = \"info\"");
    println!("  [api]");
    println!("  base_url = \"https://api.twitter.com/2\"");
    println!("  request_timeout = 30   # seconds, unset means no timeout");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::env;
    use axum::Router;
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::{delete, get};
    use std::collections::HashMap;
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use tempfile::NamedTempFile;

    /// Fake Twitter API answering the fetch with `fetch_status`/`fetch_body`
    /// and failing the unretweet of `failing_id` with 403
    struct FakeTwitter {
        base_url: String,
        requests: Arc<Mutex<Vec<String>>>,
    }

    impl FakeTwitter {
        async fn start(
            fetch_status: StatusCode,
            fetch_body: &'static str,
            failing_id: &'static str,
        ) -> Self {
            let requests: Arc<Mutex<Vec<String>>> = Arc::default();
            let on_fetch = requests.clone();
            let on_delete = requests.clone();

            let app = Router::new()
                .route(
                    "/2/users/me/tweets",
                    get(move || {
                        let log = on_fetch.clone();
                        async move {
                            log.lock().unwrap().push("GET".to_string());
                            (fetch_status, fetch_body)
                        }
                    }),
                )
                .route(
                    "/2/tweets/{id}/unretweet",
                    delete(move |Path(id): Path<String>| {
                        let log = on_delete.clone();
                        async move {
                            log.lock().unwrap().push(format!("DELETE {}", id));
                            if id == failing_id {
                                StatusCode::FORBIDDEN
                            } else {
                                StatusCode::OK
                            }
                        }
                    }),
                );

            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            Self {
                base_url: format!("http://{}/2", addr),
                requests,
            }
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }

        /// Settings file pointing the client at this server
        fn settings_file(&self) -> NamedTempFile {
            let mut file = NamedTempFile::new().unwrap();
            write!(
                file,
                "[api]\nbase_url = \"{}\"\nrequest_timeout = 5\n",
                self.base_url
            )
            .unwrap();
            file.flush().unwrap();
            file
        }
    }

    fn vars(settings: &NamedTempFile) -> HashMap<&'static str, String> {
        HashMap::from([
            (env::API_KEY, "key".to_string()),
            (env::API_SECRET, "secret".to_string()),
            (env::BEARER_TOKEN, "token".to_string()),
            (env::CONFIG_PATH, settings.path().display().to_string()),
        ])
    }

    const TWO_TWEETS: &str = r#"{"data":[{"id":"1","text":"a"},{"id":"2","text":"b"}]}"#;

    #[tokio::test]
    async fn test_missing_credential_fails_without_requests() {
        let server = FakeTwitter::start(StatusCode::OK, TWO_TWEETS, "").await;
        let settings = server.settings_file();
        let mut vars = vars(&settings);
        vars.remove(env::BEARER_TOKEN);

        let code = run(|name| vars.get(name).cloned(), RunMode::Unretweet).await;

        assert_eq!(code, EXIT_FAILURE);
        assert!(server.requests().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_exits_with_failure() {
        let server =
            FakeTwitter::start(StatusCode::UNAUTHORIZED, r#"{"title":"Unauthorized"}"#, "").await;
        let settings = server.settings_file();
        let vars = vars(&settings);

        let code = run(|name| vars.get(name).cloned(), RunMode::Unretweet).await;

        assert_eq!(code, EXIT_FAILURE);
        assert_eq!(server.requests(), vec!["GET"]);
    }

    #[tokio::test]
    async fn test_malformed_fetch_exits_with_failure() {
        let server = FakeTwitter::start(StatusCode::OK, "{\"data\":", "").await;
        let settings = server.settings_file();
        let vars = vars(&settings);

        let code = run(|name| vars.get(name).cloned(), RunMode::Unretweet).await;

        assert_eq!(code, EXIT_FAILURE);
        assert_eq!(server.requests(), vec!["GET"]);
    }

    #[tokio::test]
    async fn test_failed_unretweet_still_exits_with_success() {
        let server = FakeTwitter::start(StatusCode::OK, TWO_TWEETS, "1").await;
        let settings = server.settings_file();
        let vars = vars(&settings);

        let code = run(|name| vars.get(name).cloned(), RunMode::Unretweet).await;

        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(server.requests(), vec!["GET", "DELETE 1", "DELETE 2"]);
    }

    #[tokio::test]
    async fn test_empty_fetch_exits_with_success() {
        let server = FakeTwitter::start(StatusCode::OK, r#"{"data":null}"#, "").await;
        let settings = server.settings_file();
        let vars = vars(&settings);

        let code = run(|name| vars.get(name).cloned(), RunMode::Unretweet).await;

        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(server.requests(), vec!["GET"]);
    }
}
