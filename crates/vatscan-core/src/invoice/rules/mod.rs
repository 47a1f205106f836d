//! Rule-based heuristics for international receipts and invoices.

pub mod amounts;
pub mod category;
pub mod currency;
pub mod dates;
pub mod language;
pub mod lines;
pub mod number;
pub mod patterns;
pub mod reconcile;
pub mod vendor;

pub use amounts::{format_amount, parse_amount, AmountExtractor, NumberConvention};
pub use category::{classify, CategoryClassifier};
pub use currency::{detect_currency, detect_currency_scored, score_currencies, CurrencyDetector};
pub use dates::{extract_date, DateExtractor};
pub use language::{detect_country, detect_language, score_languages, LanguageDetector};
pub use lines::{scan_lines, LineScan};
pub use number::{extract_invoice_number, InvoiceNumberExtractor};
pub use reconcile::{reconcile, Reconciled};
pub use vendor::{extract_vendor, VendorExtractor};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// Extraction context with confidence scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, confidence: f32, source: impl Into<String>) -> Self {
        Self {
            value,
            confidence,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// Lower-case `text` and split it into whitespace-delimited tokens.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Number of tokens containing at least one of `patterns`.
pub(crate) fn count_matching_tokens(tokens: &[String], patterns: &[&str]) -> usize {
    tokens
        .iter()
        .filter(|token| patterns.iter().any(|p| token.contains(p)))
        .count()
}

/// Order scored candidates by descending score, ties broken by code.
/// Zero scores are dropped.
pub(crate) fn rank(mut scores: Vec<(&'static str, usize)>) -> Vec<(&'static str, usize)> {
    scores.retain(|(_, score)| *score > 0);
    scores.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    scores
}
