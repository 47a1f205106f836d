//! Language detection by tax vocabulary scoring.
//!
//! The word a document uses for VAT is a strong hint of its language and,
//! through a fixed table, of the issuing country.

use tracing::debug;

use crate::locale;

use super::{count_matching_tokens, rank, tokenize, ExtractionMatch, FieldExtractor};

/// Score every known language by the tokens containing one of its VAT terms.
/// Zero scores are omitted; ordering is by descending score, ties by code.
pub fn score_languages(text: &str) -> Vec<(&'static str, usize)> {
    let tokens = tokenize(text);
    rank(
        locale::languages()
            .iter()
            .map(|t| (t.language, count_matching_tokens(&tokens, t.vat)))
            .collect(),
    )
}

/// Best-scoring language, or `None` when no VAT term occurs.
pub fn detect_language(text: &str) -> Option<&'static str> {
    let language = LanguageDetector::new().extract(text).map(|m| m.value);
    debug!("Detected language: {:?}", language);
    language
}

/// Country of the detected language.
pub fn detect_country(language: Option<&str>) -> Option<&'static str> {
    language.and_then(locale::country_for_language)
}

/// Language detector.
pub struct LanguageDetector;

impl LanguageDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for LanguageDetector {
    type Output = ExtractionMatch<&'static str>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let scores = score_languages(text);
        let total: usize = scores.iter().map(|(_, s)| s).sum();

        scores
            .into_iter()
            .map(|(code, score)| {
                ExtractionMatch::new(code, score as f32 / total as f32, format!("{score} tokens"))
            })
            .collect()
    }
}
