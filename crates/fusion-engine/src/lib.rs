//! Rule-based fusion of flow strength, sentiment and valuation into a
//! buy/sell/hold recommendation.
//!
//! The rules are deliberately transparent: the output carries an ordered
//! explanation of every input that influenced the decision, so a reader
//! can reconstruct why a signal fired. The function is pure — every input
//! may be missing and every combination maps to a valid report.

use signal_core::{Fundamentals, Signal, SignalReport};

const BULLISH_FLOW: f64 = 0.6;
const BEARISH_FLOW: f64 = 0.4;
const ATTRACTIVE_PE: f64 = 30.0;
const EXPENSIVE_PE: f64 = 50.0;

/// Resolve the P/E used by the rules: trailing when present and non-zero,
/// otherwise forward. A trailing P/E of exactly zero is treated as missing
/// and falls through to the forward P/E.
fn resolve_pe(fundamentals: Option<&Fundamentals>) -> Option<f64> {
    let f = fundamentals?;
    match f.trailing_pe {
        Some(pe) if pe != 0.0 => Some(pe),
        _ => f.forward_pe,
    }
}

/// Combine the three signals for `symbol` into a recommendation.
///
/// Buy requires all of: bullish flow (> 0.6), bullish sentiment
/// (> threshold) and a P/E that is either unknown or attractive (< 30).
/// Otherwise sell fires on any of: bearish flow (< 0.4), bearish
/// sentiment (< -threshold) or an expensive P/E (> 50). Everything else
/// holds.
pub fn decide(
    symbol: &str,
    flow_strength: Option<f64>,
    sentiment: f64,
    fundamentals: Option<&Fundamentals>,
    sentiment_threshold: f64,
) -> SignalReport {
    let mut reason_parts: Vec<String> = Vec::new();

    match flow_strength {
        Some(strength) => reason_parts.push(format!("Flow strength {:.2}", strength)),
        None => reason_parts.push("No flow data".to_string()),
    }

    let sentiment_desc = if sentiment > sentiment_threshold {
        format!("Bullish sentiment ({:+.2})", sentiment)
    } else if sentiment < -sentiment_threshold {
        format!("Bearish sentiment ({:+.2})", sentiment)
    } else {
        format!("Neutral sentiment ({:+.2})", sentiment)
    };
    reason_parts.push(sentiment_desc);

    let pe = resolve_pe(fundamentals);
    if let Some(pe) = pe {
        reason_parts.push(format!("PE {:.1}", pe));
    }

    let bullish_flow = flow_strength.is_some_and(|s| s > BULLISH_FLOW);
    let bearish_flow = flow_strength.is_some_and(|s| s < BEARISH_FLOW);
    let pe_acceptable = pe.is_none_or(|p| p < ATTRACTIVE_PE);
    let pe_expensive = pe.is_some_and(|p| p > EXPENSIVE_PE);

    let signal = if bullish_flow && sentiment > sentiment_threshold && pe_acceptable {
        reason_parts.push("High call activity + bullish sentiment + attractive PE".to_string());
        Signal::Buy
    } else if bearish_flow || sentiment < -sentiment_threshold || pe_expensive {
        reason_parts.push("Bearish conditions outweigh positives".to_string());
        Signal::Sell
    } else {
        reason_parts.push("Mixed signals; stay neutral".to_string());
        Signal::Hold
    };

    SignalReport {
        symbol: symbol.to_string(),
        signal,
        reason: reason_parts.join("; "),
    }
}
