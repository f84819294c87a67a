use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single options-flow trade as reported by the flow provider.
///
/// Only the `type` field is inspected downstream; everything else the
/// provider sends is kept verbatim in `extra` so records survive a
/// round-trip even when the provider adds fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowRecord {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub trade_type: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FlowRecord {
    pub fn of_type(trade_type: impl Into<String>) -> Self {
        Self {
            trade_type: Some(trade_type.into()),
            extra: serde_json::Map::new(),
        }
    }

    pub fn untyped() -> Self {
        Self {
            trade_type: None,
            extra: serde_json::Map::new(),
        }
    }
}

/// Basic valuation metrics for a symbol. Every field is optional — the
/// quote endpoint omits whatever it does not have, and that is never an
/// error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fundamentals {
    #[serde(rename = "regularMarketPrice")]
    pub regular_market_price: Option<f64>,
    #[serde(rename = "marketCap")]
    pub market_cap: Option<f64>,
    #[serde(rename = "trailingPE")]
    pub trailing_pe: Option<f64>,
    #[serde(rename = "forwardPE")]
    pub forward_pe: Option<f64>,
    #[serde(rename = "epsTrailingTwelveMonths")]
    pub eps_trailing_twelve_months: Option<f64>,
    #[serde(rename = "epsForward")]
    pub eps_forward: Option<f64>,
    #[serde(rename = "profitMargins")]
    pub profit_margins: Option<f64>,
    #[serde(rename = "pegRatio")]
    pub peg_ratio: Option<f64>,
    #[serde(rename = "bookValue")]
    pub book_value: Option<f64>,
}

/// Trading recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Buy => "buy",
            Signal::Sell => "sell",
            Signal::Hold => "hold",
        }
    }

    /// Whether the signal should result in an order (hold never trades).
    pub fn is_actionable(&self) -> bool {
        matches!(self, Signal::Buy | Signal::Sell)
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of the fusion rules: the recommendation plus the ordered,
/// `"; "`-joined explanation of the inputs that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalReport {
    pub symbol: String,
    pub signal: Signal,
    pub reason: String,
}

/// Full per-symbol analysis as assembled by the orchestrator: the fused
/// recommendation together with the component values that went into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolAnalysis {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub flow_strength: Option<f64>,
    pub sentiment: f64,
    pub fundamentals: Option<Fundamentals>,
    pub signal: Signal,
    pub reason: String,
}
