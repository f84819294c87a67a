//! Unusual Whales REST client.
//!
//! Access to the official API requires a paid key, so every call degrades
//! gracefully when no key is configured: flow queries return an empty
//! batch and the market tide returns `None`, without making a request.
//! Endpoint paths follow the publicly documented REST surface and may need
//! adjustment if the service changes them.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use signal_core::{FlowProvider, FlowRecord, SignalError};
use std::time::Duration;

const BASE_URL: &str = "https://api.unusualwhales.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct UnusualWhalesClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

/// High-level bullish/bearish indicator across the whole options market.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketTide {
    #[serde(default)]
    pub tide: Option<f64>,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UnusualWhalesClient {
    pub fn new(api_key: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: BASE_URL.to_string(),
            api_key,
        }
    }

    /// Recent options flow for `symbol`, newest first as returned by the
    /// API. Without a key this short-circuits to an empty batch.
    pub async fn recent_flow(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<FlowRecord>, SignalError> {
        let Some(api_key) = &self.api_key else {
            tracing::debug!("flow API key not configured; returning empty flow for {}", symbol);
            return Ok(Vec::new());
        };

        let url = format!("{}/stock/flow/recent", self.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(api_key)
            .query(&[("symbol", symbol), ("limit", &limit.to_string())])
            .send()
            .await
            .map_err(|e| SignalError::Api(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SignalError::Api(format!(
                "HTTP {} from flow endpoint",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| SignalError::Api(e.to_string()))?;

        parse_flow_response(body)
    }

    /// Market-wide tide indicator, `None` when no key is configured.
    pub async fn market_tide(&self) -> Result<Option<MarketTide>, SignalError> {
        let Some(api_key) = &self.api_key else {
            return Ok(None);
        };

        let url = format!("{}/market/tide", self.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(api_key)
            .send()
            .await
            .map_err(|e| SignalError::Api(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SignalError::Api(format!(
                "HTTP {} from tide endpoint",
                response.status()
            )));
        }

        let tide: MarketTide = response
            .json()
            .await
            .map_err(|e| SignalError::Api(e.to_string()))?;
        Ok(Some(tide))
    }
}

/// The flow endpoint returns either `{"data": [...]}` or a bare array;
/// normalize both. Entries that are not objects are dropped rather than
/// failing the whole batch.
fn parse_flow_response(body: serde_json::Value) -> Result<Vec<FlowRecord>, SignalError> {
    let items = match body {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut map) => match map.remove("data") {
            Some(serde_json::Value::Array(items)) => items,
            _ => {
                return Err(SignalError::UnexpectedResponse(
                    "flow payload has no data array".to_string(),
                ))
            }
        },
        _ => {
            return Err(SignalError::UnexpectedResponse(
                "flow payload is neither object nor array".to_string(),
            ))
        }
    };

    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<FlowRecord>(item).ok())
        .collect())
}

#[async_trait]
impl FlowProvider for UnusualWhalesClient {
    async fn recent_flow(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<FlowRecord>, SignalError> {
        UnusualWhalesClient::recent_flow(self, symbol, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_enveloped_payload() {
        let body = json!({
            "data": [
                { "type": "call", "premium": 10000.0 },
                { "type": "put" },
                { "ticker": "AAPL" }
            ]
        });
        let records = parse_flow_response(body).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].trade_type.as_deref(), Some("call"));
        assert!(records[2].trade_type.is_none());
    }

    #[test]
    fn parses_bare_array_payload() {
        let body = json!([{ "type": "PUT sweep" }]);
        let records = parse_flow_response(body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].trade_type.as_deref(), Some("PUT sweep"));
    }

    #[test]
    fn rejects_unexpected_shapes() {
        assert!(parse_flow_response(json!({ "data": "oops" })).is_err());
        assert!(parse_flow_response(json!("nope")).is_err());
    }

    #[test]
    fn drops_non_object_entries() {
        let body = json!([{ "type": "call" }, 42, "noise"]);
        let records = parse_flow_response(body).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn missing_key_short_circuits() {
        let client = UnusualWhalesClient::new(None);
        let flow = client.recent_flow("AAPL", 20).await.unwrap();
        assert!(flow.is_empty());
        assert!(client.market_tide().await.unwrap().is_none());
    }
}
