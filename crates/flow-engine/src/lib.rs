//! Options-flow strength: the share of call-side trades among all typed
//! records for a symbol.
//!
//! Values above 0.5 indicate net bullish positioning, values below 0.5 net
//! bearish positioning. Records without a recognizable type are excluded
//! from the ratio.

use signal_core::FlowRecord;

/// Compute the call/put ratio for a batch of flow records.
///
/// Classification is a case-insensitive substring match on the record's
/// type: anything containing "call" counts as a call, otherwise anything
/// containing "put" counts as a put, otherwise the record is ignored. A
/// type containing both substrings counts as a call. Returns `None` when
/// no record classifies — callers surface that as "no flow data" rather
/// than a neutral 0.5.
pub fn flow_strength(records: &[FlowRecord]) -> Option<f64> {
    let mut calls: u32 = 0;
    let mut puts: u32 = 0;

    for record in records {
        let Some(trade_type) = record.trade_type.as_deref() else {
            continue;
        };
        let lowered = trade_type.to_lowercase();
        if lowered.contains("call") {
            calls += 1;
        } else if lowered.contains("put") {
            puts += 1;
        }
    }

    let total = calls + puts;
    if total == 0 {
        return None;
    }
    Some(f64::from(calls) / f64::from(total))
}
