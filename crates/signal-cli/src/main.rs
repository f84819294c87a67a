//! signal-cli: fetch flow, sentiment and fundamentals for each watched
//! symbol, fuse them into a recommendation and hand actionable signals to
//! the autopilot.
//!
//! Usage:
//!   cargo run -p signal-cli -- --symbols AAPL,MSFT
//!   cargo run -p signal-cli -- --dry-run
//!   cargo run -p signal-cli -- --verbose

use autopilot::{Autopilot, OrderSide};
use rust_decimal::Decimal;
use signal_core::Config;
use signal_orchestrator::SignalOrchestrator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "-v" || a == "--verbose");
    let dry_run = args.iter().any(|a| a == "-n" || a == "--dry-run");
    let symbols_arg = args
        .iter()
        .position(|a| a == "--symbols")
        .and_then(|i| args.get(i + 1))
        .cloned();

    let default_filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    let config = Config::from_env();
    let symbols: Vec<String> = match symbols_arg {
        Some(raw) => raw
            .split(',')
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect(),
        None => config.watchlist.clone(),
    };

    tracing::info!(
        "starting trading assistant for symbols: {}",
        symbols.join(", ")
    );

    let orchestrator = SignalOrchestrator::from_config(&config);
    let pilot = Autopilot::from_config(&config);

    for symbol in &symbols {
        process_symbol(&orchestrator, &pilot, symbol, dry_run).await;
    }

    tracing::info!("all symbols processed");
    Ok(())
}

/// Analyze one symbol and, for buy/sell signals, submit a single-share
/// order through the autopilot.
async fn process_symbol(
    orchestrator: &SignalOrchestrator,
    pilot: &Autopilot,
    symbol: &str,
    dry_run: bool,
) {
    tracing::info!("processing {}", symbol);
    let analysis = orchestrator.analyze(symbol).await;
    tracing::info!("signal for {}: {}", symbol, analysis.signal);
    tracing::info!("reason: {}", analysis.reason);

    match OrderSide::from_signal(analysis.signal) {
        Some(side) => {
            pilot.submit_order(symbol, side.as_str(), Decimal::ONE, dry_run);
        }
        None => tracing::info!("no trade executed for {}", symbol),
    }
}
