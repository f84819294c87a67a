//! Naive keyword sentiment over free-text post titles.
//!
//! Each text is tokenized and scored against the fixed positive/negative
//! lexicons; the batch total is normalized by the number of texts times
//! the maximum attainable per-post score. The result is roughly in
//! [-1, 1]: texts with no keyword hits still count toward the batch size
//! and dilute the average toward neutral, while a single text stuffed
//! with repeated keywords can push the score past 1 in magnitude. That
//! looseness is intentional and the scorer does not clamp.

pub mod lexicon;
pub use lexicon::{max_unit_score, table_sum, weight_of, NEGATIVE_LEXICON, POSITIVE_LEXICON};

pub struct SentimentScorer;

impl SentimentScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score a batch of texts. `limit` caps how many texts are processed;
    /// `None` scores everything. Returns 0.0 for an empty batch.
    pub fn score<S: AsRef<str>>(&self, texts: &[S], limit: Option<usize>) -> f64 {
        let take = limit.unwrap_or(texts.len());
        let mut count: usize = 0;
        let mut total_score = 0.0;

        for text in texts.iter().take(take) {
            count += 1;
            total_score += self.score_text(text.as_ref());
        }

        if count == 0 {
            return 0.0;
        }
        let max_weight = max_unit_score();
        if max_weight > 0.0 {
            total_score / (count as f64 * max_weight)
        } else {
            0.0
        }
    }

    /// Raw (un-normalized) score of a single text: positive weights minus
    /// negative weights over its tokens.
    fn score_text(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let mut score = 0.0;
        for token in tokenize(&lowered) {
            score += weight_of(POSITIVE_LEXICON, token);
            score -= weight_of(NEGATIVE_LEXICON, token);
        }
        score
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Split lowercased text on any run of characters outside `[a-z0-9$]`.
/// Cashtags like `$GME` therefore survive as single tokens.
fn tokenize(lowered: &str) -> impl Iterator<Item = &str> {
    lowered
        .split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '$'))
        .filter(|token| !token.is_empty())
}
