//! Keyword weight tables for naive sentiment scoring.
//!
//! Weights were chosen heuristically for retail-trading language; both
//! tables are immutable for the lifetime of the process. The sum of a
//! table's weights is the maximum attainable per-post score and is what
//! the scorer normalizes against.

pub const POSITIVE_LEXICON: &[(&str, f64)] = &[
    ("call", 0.3),
    ("calls", 0.3),
    ("bull", 0.5),
    ("bullish", 0.6),
    ("long", 0.2),
    ("yolo", 0.4),
    ("moon", 0.3),
    ("rocket", 0.3),
    ("green", 0.2),
    ("buy", 0.3),
    ("pump", 0.2),
];

pub const NEGATIVE_LEXICON: &[(&str, f64)] = &[
    ("put", 0.3),
    ("puts", 0.3),
    ("bear", 0.5),
    ("bearish", 0.6),
    ("short", 0.4),
    ("down", 0.2),
    ("dump", 0.3),
    ("red", 0.2),
    ("sell", 0.3),
    ("crash", 0.4),
];

/// Weight of `token` in `lexicon`, 0.0 when absent. Tokens are expected
/// to already be lowercased.
pub fn weight_of(lexicon: &[(&str, f64)], token: &str) -> f64 {
    lexicon
        .iter()
        .find(|(keyword, _)| *keyword == token)
        .map_or(0.0, |(_, weight)| *weight)
}

/// Sum of all weights in a table.
pub fn table_sum(lexicon: &[(&str, f64)]) -> f64 {
    lexicon.iter().map(|(_, weight)| weight).sum()
}

/// The larger of the two table sums — the normalization denominator for a
/// single post.
pub fn max_unit_score() -> f64 {
    table_sum(POSITIVE_LEXICON).max(table_sum(NEGATIVE_LEXICON))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn lookup_hits_and_misses() {
        assert_relative_eq!(weight_of(POSITIVE_LEXICON, "bullish"), 0.6);
        assert_relative_eq!(weight_of(NEGATIVE_LEXICON, "crash"), 0.4);
        assert_relative_eq!(weight_of(POSITIVE_LEXICON, "stonks"), 0.0);
    }

    #[test]
    fn positive_table_dominates_normalization() {
        assert_relative_eq!(table_sum(POSITIVE_LEXICON), 3.6, epsilon = 1e-12);
        assert_relative_eq!(table_sum(NEGATIVE_LEXICON), 3.5, epsilon = 1e-12);
        assert_relative_eq!(max_unit_score(), 3.6, epsilon = 1e-12);
    }
}
