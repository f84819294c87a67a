//! Per-symbol signal orchestration.
//!
//! Fires the three data providers concurrently, degrades each failure to
//! its empty value, runs the pure engines over whatever arrived and
//! assembles the fused recommendation. Nothing here is cached or retried:
//! every fetch is attempted exactly once per request, and a provider
//! outage shows up as a weaker reason trace rather than an error.

use chrono::Utc;
use fundamentals_client::YahooFundamentalsClient;
use reddit_client::RedditClient;
use sentiment_engine::SentimentScorer;
use signal_core::{
    Config, FlowProvider, FundamentalsProvider, SocialPostProvider, SymbolAnalysis,
};
use std::sync::Arc;
use unusual_whales_client::UnusualWhalesClient;

const DEFAULT_FLOW_LIMIT: usize = 20;
const DEFAULT_POST_LIMIT: usize = 50;

pub struct SignalOrchestrator {
    flow: Arc<dyn FlowProvider>,
    posts: Arc<dyn SocialPostProvider>,
    fundamentals: Arc<dyn FundamentalsProvider>,
    sentiment_scorer: SentimentScorer,
    sentiment_threshold: f64,
    flow_limit: usize,
    post_limit: usize,
}

impl SignalOrchestrator {
    pub fn new(
        flow: Arc<dyn FlowProvider>,
        posts: Arc<dyn SocialPostProvider>,
        fundamentals: Arc<dyn FundamentalsProvider>,
        sentiment_threshold: f64,
    ) -> Self {
        Self {
            flow,
            posts,
            fundamentals,
            sentiment_scorer: SentimentScorer::new(),
            sentiment_threshold,
            flow_limit: DEFAULT_FLOW_LIMIT,
            post_limit: DEFAULT_POST_LIMIT,
        }
    }

    /// Wire up the production providers from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(UnusualWhalesClient::new(config.unusual_whales_api_key.clone())),
            Arc::new(RedditClient::new()),
            Arc::new(YahooFundamentalsClient::new()),
            config.sentiment_threshold,
        )
    }

    /// Fetch, score and fuse everything known about `symbol`.
    pub async fn analyze(&self, symbol: &str) -> SymbolAnalysis {
        let (flow_result, posts_result, fundamentals_result) = tokio::join!(
            self.flow.recent_flow(symbol, self.flow_limit),
            self.posts.recent_post_titles(symbol, self.post_limit),
            self.fundamentals.fundamentals(symbol),
        );

        let flows = flow_result.unwrap_or_else(|e| {
            tracing::warn!("flow fetch failed for {}: {}", symbol, e);
            Vec::new()
        });
        let titles = posts_result.unwrap_or_else(|e| {
            tracing::warn!("post fetch failed for {}: {}", symbol, e);
            Vec::new()
        });
        let fundamentals = fundamentals_result.unwrap_or_else(|e| {
            tracing::warn!("fundamentals fetch failed for {}: {}", symbol, e);
            None
        });

        let flow_strength = flow_engine::flow_strength(&flows);
        let sentiment = self.sentiment_scorer.score(&titles, None);
        tracing::debug!(
            "{}: {} flow records, {} posts, fundamentals present: {}",
            symbol,
            flows.len(),
            titles.len(),
            fundamentals.is_some()
        );

        let report = fusion_engine::decide(
            symbol,
            flow_strength,
            sentiment,
            fundamentals.as_ref(),
            self.sentiment_threshold,
        );

        SymbolAnalysis {
            symbol: report.symbol,
            timestamp: Utc::now(),
            flow_strength,
            sentiment,
            fundamentals,
            signal: report.signal,
            reason: report.reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use signal_core::{FlowRecord, Fundamentals, Signal, SignalError};

    struct CannedFlow(Vec<FlowRecord>);
    struct FailingFlow;
    struct CannedPosts(Vec<String>);
    struct FailingPosts;
    struct CannedFundamentals(Option<Fundamentals>);
    struct FailingFundamentals;

    #[async_trait]
    impl FlowProvider for CannedFlow {
        async fn recent_flow(
            &self,
            _symbol: &str,
            _limit: usize,
        ) -> Result<Vec<FlowRecord>, SignalError> {
            Ok(self.0.clone())
        }
    }

    #[async_trait]
    impl FlowProvider for FailingFlow {
        async fn recent_flow(
            &self,
            _symbol: &str,
            _limit: usize,
        ) -> Result<Vec<FlowRecord>, SignalError> {
            Err(SignalError::Api("connection reset".into()))
        }
    }

    #[async_trait]
    impl SocialPostProvider for CannedPosts {
        async fn recent_post_titles(
            &self,
            _symbol: &str,
            _limit: usize,
        ) -> Result<Vec<String>, SignalError> {
            Ok(self.0.clone())
        }
    }

    #[async_trait]
    impl SocialPostProvider for FailingPosts {
        async fn recent_post_titles(
            &self,
            _symbol: &str,
            _limit: usize,
        ) -> Result<Vec<String>, SignalError> {
            Err(SignalError::Api("HTTP 429".into()))
        }
    }

    #[async_trait]
    impl FundamentalsProvider for CannedFundamentals {
        async fn fundamentals(
            &self,
            _symbol: &str,
        ) -> Result<Option<Fundamentals>, SignalError> {
            Ok(self.0.clone())
        }
    }

    #[async_trait]
    impl FundamentalsProvider for FailingFundamentals {
        async fn fundamentals(
            &self,
            _symbol: &str,
        ) -> Result<Option<Fundamentals>, SignalError> {
            Err(SignalError::Api("HTTP 500".into()))
        }
    }

    #[tokio::test]
    async fn bullish_inputs_produce_buy() {
        let flows: Vec<FlowRecord> = ["call", "call", "call", "put"]
            .iter()
            .map(|t| FlowRecord::of_type(*t))
            .collect();
        let orchestrator = SignalOrchestrator::new(
            Arc::new(CannedFlow(flows)),
            Arc::new(CannedPosts(vec![
                "bullish calls yolo".to_string(),
                "to the moon".to_string(),
            ])),
            Arc::new(CannedFundamentals(Some(Fundamentals {
                trailing_pe: Some(22.0),
                ..Fundamentals::default()
            }))),
            0.05,
        );

        let analysis = orchestrator.analyze("AAPL").await;
        assert_eq!(analysis.signal, Signal::Buy);
        assert_eq!(analysis.flow_strength, Some(0.75));
        assert!(analysis.sentiment > 0.05);
        assert!(analysis.reason.contains("PE 22.0"));
    }

    #[tokio::test]
    async fn all_providers_failing_degrades_to_hold() {
        let orchestrator = SignalOrchestrator::new(
            Arc::new(FailingFlow),
            Arc::new(FailingPosts),
            Arc::new(FailingFundamentals),
            0.2,
        );

        let analysis = orchestrator.analyze("AAPL").await;
        assert_eq!(analysis.signal, Signal::Hold);
        assert_eq!(analysis.flow_strength, None);
        assert_eq!(analysis.sentiment, 0.0);
        assert!(analysis.fundamentals.is_none());
        assert!(analysis.reason.starts_with("No flow data"));
    }

    #[tokio::test]
    async fn partial_outage_still_uses_surviving_sources() {
        let orchestrator = SignalOrchestrator::new(
            Arc::new(CannedFlow(vec![
                FlowRecord::of_type("put"),
                FlowRecord::of_type("put"),
                FlowRecord::of_type("call"),
            ])),
            Arc::new(FailingPosts),
            Arc::new(FailingFundamentals),
            0.2,
        );

        let analysis = orchestrator.analyze("TSLA").await;
        // One call out of three typed records: bearish flow sells even
        // with the other two sources down.
        assert_eq!(analysis.signal, Signal::Sell);
        assert!(analysis.reason.contains("Flow strength 0.33"));
    }
}
