//! Autopilot trade execution (stub).
//!
//! Validates order parameters and logs intended actions. Live submission
//! is not implemented: wiring in a real brokerage SDK means replacing the
//! body of the `OrderOutcome::NotImplemented` branch. Until then every
//! accepted order is logged and dropped.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use signal_core::{Config, Signal};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// Parse a side case-insensitively; anything but buy/sell is invalid.
    pub fn parse(side: &str) -> Option<Self> {
        match side.to_lowercase().as_str() {
            "buy" => Some(OrderSide::Buy),
            "sell" => Some(OrderSide::Sell),
            _ => None,
        }
    }

    /// Hold signals produce no order.
    pub fn from_signal(signal: Signal) -> Option<Self> {
        match signal {
            Signal::Buy => Some(OrderSide::Buy),
            Signal::Sell => Some(OrderSide::Sell),
            Signal::Hold => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "buy",
            OrderSide::Sell => "sell",
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened to a submitted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderOutcome {
    /// Parameters failed validation; nothing was attempted.
    Rejected,
    /// Dry-run mode or autopilot disabled; the intended action was logged.
    DryRun,
    /// Autopilot is configured but live execution is a stub.
    NotImplemented,
}

pub struct Autopilot {
    enabled: bool,
    paper: bool,
}

impl Autopilot {
    pub fn new(enabled: bool, paper: bool) -> Self {
        Self { enabled, paper }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.is_autopilot_enabled(), config.broker_paper)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Send an order to the broker, or log it when dry-running.
    ///
    /// `side` is accepted as free text to match what callers get from
    /// upstream signal strings; invalid sides and non-positive quantities
    /// are rejected with a logged error and no order attempt.
    pub fn submit_order(
        &self,
        symbol: &str,
        side: &str,
        quantity: Decimal,
        dry_run: bool,
    ) -> OrderOutcome {
        let Some(side) = OrderSide::parse(side) else {
            tracing::error!("invalid order side: {}", side);
            return OrderOutcome::Rejected;
        };
        if quantity <= Decimal::ZERO {
            tracing::error!("order quantity must be positive: {}", quantity);
            return OrderOutcome::Rejected;
        }

        if dry_run || !self.enabled {
            tracing::info!(
                "DRY RUN: would {} {} shares of {}",
                side,
                quantity,
                symbol
            );
            return OrderOutcome::DryRun;
        }

        tracing::warn!(
            "autopilot execution is not implemented; no {} order was placed for {} {} ({})",
            side,
            quantity,
            symbol,
            if self.paper { "paper" } else { "live" }
        );
        OrderOutcome::NotImplemented
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn side_parsing_is_case_insensitive() {
        assert_eq!(OrderSide::parse("BUY"), Some(OrderSide::Buy));
        assert_eq!(OrderSide::parse("Sell"), Some(OrderSide::Sell));
        assert_eq!(OrderSide::parse("hold"), None);
        assert_eq!(OrderSide::parse(""), None);
    }

    #[test]
    fn sides_follow_actionable_signals() {
        assert_eq!(OrderSide::from_signal(Signal::Buy), Some(OrderSide::Buy));
        assert_eq!(OrderSide::from_signal(Signal::Sell), Some(OrderSide::Sell));
        assert_eq!(OrderSide::from_signal(Signal::Hold), None);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let autopilot = Autopilot::new(true, true);
        assert_eq!(
            autopilot.submit_order("AAPL", "shortsell", dec!(1), false),
            OrderOutcome::Rejected
        );
        assert_eq!(
            autopilot.submit_order("AAPL", "buy", dec!(0), false),
            OrderOutcome::Rejected
        );
        assert_eq!(
            autopilot.submit_order("AAPL", "buy", dec!(-5), false),
            OrderOutcome::Rejected
        );
    }

    #[test]
    fn dry_run_and_disabled_only_log() {
        let disabled = Autopilot::new(false, true);
        assert_eq!(
            disabled.submit_order("AAPL", "buy", dec!(1), false),
            OrderOutcome::DryRun
        );

        let enabled = Autopilot::new(true, true);
        assert_eq!(
            enabled.submit_order("AAPL", "sell", dec!(1), true),
            OrderOutcome::DryRun
        );
    }

    #[test]
    fn live_submission_is_a_stub() {
        let autopilot = Autopilot::new(true, false);
        assert_eq!(
            autopilot.submit_order("AAPL", "buy", dec!(2), false),
            OrderOutcome::NotImplemented
        );
    }
}
