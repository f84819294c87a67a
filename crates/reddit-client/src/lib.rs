//! Reddit post scraper over the public JSON endpoints.
//!
//! No authentication is involved: the `.json` suffix on the search URL
//! returns posts directly. The search is restricted to a handful of
//! trading subreddits to keep the noise down, and queries use the
//! `$SYMBOL` cashtag form so "A" does not match every post containing the
//! article.

use async_trait::async_trait;
use reqwest::Client;
use signal_core::{SignalError, SocialPostProvider};
use std::time::Duration;

const SEARCH_URL: &str =
    "https://www.reddit.com/r/wallstreetbets+stocks+options+investing/search.json";
const USER_AGENT: &str = "Mozilla/5.0 (compatible; TradeSignals/0.1; +https://example.com)";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct RedditClient {
    client: Client,
}

impl RedditClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    /// Titles of recent posts mentioning `symbol`, newest first. Reddit
    /// may return fewer than `limit` depending on availability and rate
    /// limits.
    pub async fn recent_post_titles(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<String>, SignalError> {
        let query = search_query(symbol);
        let limit = limit.to_string();
        let params = [
            ("q", query.as_str()),
            ("restrict_sr", "on"),
            ("sort", "new"),
            ("limit", limit.as_str()),
        ];

        let response = self
            .client
            .get(SEARCH_URL)
            .query(&params)
            .send()
            .await
            .map_err(|e| SignalError::Api(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SignalError::Api(format!(
                "HTTP {} from Reddit search",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| SignalError::Api(e.to_string()))?;

        let titles = extract_titles(&body);
        tracing::debug!("fetched {} post titles for {}", titles.len(), symbol);
        Ok(titles)
    }
}

impl Default for RedditClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Upper-case the symbol and prefix a `$` when not already present.
fn search_query(symbol: &str) -> String {
    let upper = symbol.to_uppercase();
    if upper.starts_with('$') {
        upper
    } else {
        format!("${}", upper)
    }
}

/// Pull `data.children[].data.title` out of a search response, skipping
/// entries without a string title.
fn extract_titles(body: &serde_json::Value) -> Vec<String> {
    body.get("data")
        .and_then(|data| data.get("children"))
        .and_then(|children| children.as_array())
        .map(|children| {
            children
                .iter()
                .filter_map(|child| {
                    child
                        .get("data")
                        .and_then(|post| post.get("title"))
                        .and_then(|title| title.as_str())
                        .map(str::to_string)
                })
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl SocialPostProvider for RedditClient {
    async fn recent_post_titles(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<String>, SignalError> {
        RedditClient::recent_post_titles(self, symbol, limit).await
    }
}
