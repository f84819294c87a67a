//! Fundamental data retrieval from the Yahoo Finance quote endpoint.
//!
//! The endpoint needs no token but is rate limited; callers should avoid
//! hammering it in quick succession. Fields are extracted individually so
//! a single oddly-typed value never poisons the rest of the snapshot.

use async_trait::async_trait;
use reqwest::Client;
use signal_core::{Fundamentals, FundamentalsProvider, SignalError};
use std::time::Duration;

const QUOTE_URL: &str = "https://query1.finance.yahoo.com/v7/finance/quote";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct YahooFundamentalsClient {
    client: Client,
}

impl YahooFundamentalsClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    /// Fetch valuation metrics for `symbol`. `Ok(None)` means the symbol
    /// is unknown to the quote endpoint.
    pub async fn fundamentals(&self, symbol: &str) -> Result<Option<Fundamentals>, SignalError> {
        let response = self
            .client
            .get(QUOTE_URL)
            .query(&[("symbols", symbol.to_uppercase().as_str())])
            .send()
            .await
            .map_err(|e| SignalError::Api(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SignalError::Api(format!(
                "HTTP {} from quote endpoint",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| SignalError::Api(e.to_string()))?;

        let fundamentals = parse_quote_response(&body);
        if fundamentals.is_none() {
            tracing::debug!("no quote result for {}", symbol);
        }
        Ok(fundamentals)
    }
}

impl Default for YahooFundamentalsClient {
    fn default() -> Self {
        Self::new()
    }
}

fn as_f64(info: &serde_json::Value, key: &str) -> Option<f64> {
    info.get(key).and_then(|v| v.as_f64())
}

/// Read `quoteResponse.result[0]` into a snapshot. Missing or non-numeric
/// fields become `None`; an empty result set becomes `None` overall.
fn parse_quote_response(body: &serde_json::Value) -> Option<Fundamentals> {
    let info = body
        .get("quoteResponse")
        .and_then(|r| r.get("result"))
        .and_then(|r| r.as_array())
        .and_then(|results| results.first())?;

    Some(Fundamentals {
        regular_market_price: as_f64(info, "regularMarketPrice"),
        market_cap: as_f64(info, "marketCap"),
        trailing_pe: as_f64(info, "trailingPE"),
        forward_pe: as_f64(info, "forwardPE"),
        eps_trailing_twelve_months: as_f64(info, "epsTrailingTwelveMonths"),
        eps_forward: as_f64(info, "epsForward"),
        profit_margins: as_f64(info, "profitMargins"),
        peg_ratio: as_f64(info, "pegRatio"),
        book_value: as_f64(info, "bookValue"),
    })
}

#[async_trait]
impl FundamentalsProvider for YahooFundamentalsClient {
    async fn fundamentals(&self, symbol: &str) -> Result<Option<Fundamentals>, SignalError> {
        YahooFundamentalsClient::fundamentals(self, symbol).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_populated_quote() {
        let body = json!({
            "quoteResponse": {
                "result": [{
                    "regularMarketPrice": 190.5,
                    "marketCap": 2_950_000_000_000u64,
                    "trailingPE": 28.4,
                    "forwardPE": 26.1,
                    "epsTrailingTwelveMonths": 6.7,
                    "bookValue": 4.2,
                    "shortName": "Apple Inc."
                }]
            }
        });
        let f = parse_quote_response(&body).unwrap();
        assert_eq!(f.regular_market_price, Some(190.5));
        assert_eq!(f.trailing_pe, Some(28.4));
        assert_eq!(f.peg_ratio, None);
    }

    #[test]
    fn non_numeric_fields_become_none() {
        let body = json!({
            "quoteResponse": {
                "result": [{ "trailingPE": "n/a", "forwardPE": 18.0 }]
            }
        });
        let f = parse_quote_response(&body).unwrap();
        assert_eq!(f.trailing_pe, None);
        assert_eq!(f.forward_pe, Some(18.0));
    }

    #[test]
    fn empty_result_set_is_none() {
        let body = json!({ "quoteResponse": { "result": [] } });
        assert!(parse_quote_response(&body).is_none());
        assert!(parse_quote_response(&json!({})).is_none());
    }
}
