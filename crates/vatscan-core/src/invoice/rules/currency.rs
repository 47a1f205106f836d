//! Currency detection by vocabulary scoring.

use tracing::debug;

use crate::locale::{self, DEFAULT_CURRENCY};

use super::{count_matching_tokens, rank, tokenize, ExtractionMatch, FieldExtractor};

/// Score every known currency against `text`.
///
/// A currency's score is the number of lower-cased whitespace tokens that
/// contain any of its symbols, codes or names. Currencies scoring zero are
/// omitted; the rest are ordered by descending score, ties by code.
pub fn score_currencies(text: &str) -> Vec<(&'static str, usize)> {
    let tokens = tokenize(text);
    rank(
        locale::currencies()
            .iter()
            .map(|c| (c.code, count_matching_tokens(&tokens, c.patterns)))
            .collect(),
    )
}

/// Best-scoring currency, or `None` when no vocabulary matched.
pub fn detect_currency_scored(text: &str) -> Option<ExtractionMatch<&'static str>> {
    CurrencyDetector::new().extract(text)
}

/// Best-scoring currency code, defaulting to `"EUR"`.
pub fn detect_currency(text: &str) -> &'static str {
    match detect_currency_scored(text) {
        Some(m) => m.value,
        None => {
            debug!("No currency evidence, defaulting to {}", DEFAULT_CURRENCY);
            DEFAULT_CURRENCY
        }
    }
}

/// Currency detector. Each candidate's confidence is its share of the
/// total score.
pub struct CurrencyDetector;

impl CurrencyDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CurrencyDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CurrencyDetector {
    type Output = ExtractionMatch<&'static str>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let scores = score_currencies(text);
        let total: usize = scores.iter().map(|(_, s)| s).sum();

        scores
            .into_iter()
            .map(|(code, score)| {
                ExtractionMatch::new(code, score as f32 / total as f32, format!("{score} tokens"))
            })
            .collect()
    }
}
