//! Vendor name extraction.

use crate::models::invoice::UNKNOWN_VENDOR;

use super::{ExtractionMatch, FieldExtractor};

const VENDOR_CONFIDENCE: f32 = 0.7;

/// The first non-empty line that is not only digits and punctuation,
/// or [`UNKNOWN_VENDOR`].
pub fn extract_vendor(text: &str) -> String {
    VendorExtractor::new()
        .extract(text)
        .map(|m| m.value)
        .unwrap_or_else(|| UNKNOWN_VENDOR.to_string())
}

/// Vendor extractor. Receipts print the merchant name at the top, so every
/// line not made up solely of digits and punctuation is a candidate, in order.
pub struct VendorExtractor;

impl VendorExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for VendorExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for VendorExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        text.lines()
            .map(str::trim)
            .filter(|line| line.chars().any(is_name_char))
            .map(|line| ExtractionMatch::new(line.to_string(), VENDOR_CONFIDENCE, line))
            .collect()
    }
}

// Symbols such as currency signs count; digits and punctuation do not.
fn is_name_char(c: char) -> bool {
    !(c.is_numeric() || c.is_whitespace() || c.is_ascii_punctuation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_text_line() {
        assert_eq!(extract_vendor("Bónus\nVSK 24% 1200\nSamtals 6200"), "Bónus");
    }

    #[test]
    fn test_skips_numeric_lines() {
        let text = "\n  \n12.03.2024 14:05\n*** 0042 ***\n  Krónan Granda  \nMjólk 349";
        assert_eq!(extract_vendor(text), "Krónan Granda");
    }

    #[test]
    fn test_symbol_line_qualifies() {
        assert_eq!(extract_vendor("-- 42 --\n€ 12\nShop"), "€ 12");
        assert_eq!(extract_vendor("(12) 345-678\n¥"), "¥");
    }

    #[test]
    fn test_placeholder() {
        assert_eq!(extract_vendor(""), UNKNOWN_VENDOR);
        assert_eq!(extract_vendor("123\n45,00\n--"), UNKNOWN_VENDOR);
    }
}
