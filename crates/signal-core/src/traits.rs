use crate::{FlowRecord, Fundamentals, SignalError};
use async_trait::async_trait;

/// Source of recent options-flow records for a symbol.
#[async_trait]
pub trait FlowProvider: Send + Sync {
    async fn recent_flow(&self, symbol: &str, limit: usize)
        -> Result<Vec<FlowRecord>, SignalError>;
}

/// Source of recent social-media post texts mentioning a symbol.
#[async_trait]
pub trait SocialPostProvider: Send + Sync {
    async fn recent_post_titles(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<String>, SignalError>;
}

/// Source of valuation metrics for a symbol. `Ok(None)` means the symbol
/// was not found, which callers treat the same as a fetch failure.
#[async_trait]
pub trait FundamentalsProvider: Send + Sync {
    async fn fundamentals(&self, symbol: &str) -> Result<Option<Fundamentals>, SignalError>;
}
