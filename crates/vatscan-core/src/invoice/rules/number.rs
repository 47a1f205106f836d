//! Invoice and receipt number extraction.

use lazy_static::lazy_static;
use regex::Regex;

use super::patterns::{
    INVOICE_NUMBER_HASH, INVOICE_NUMBER_LABELED, INVOICE_NUMBER_NR, INVOICE_NUMBER_NUMBER,
};
use super::{ExtractionMatch, FieldExtractor};

lazy_static! {
    // Patterns in priority order, with the confidence of each.
    static ref NUMBER_PATTERNS: [(&'static Regex, f32); 4] = [
        (&*INVOICE_NUMBER_LABELED, 0.9),
        (&*INVOICE_NUMBER_HASH, 0.7),
        (&*INVOICE_NUMBER_NR, 0.7),
        (&*INVOICE_NUMBER_NUMBER, 0.6),
    ];
}

/// First invoice number found, trying the labeled form, `#N`, `nr. N` and
/// `number: N` in that order.
pub fn extract_invoice_number(text: &str) -> Option<String> {
    InvoiceNumberExtractor::new().extract(text).map(|m| m.value)
}

/// Invoice number extractor.
pub struct InvoiceNumberExtractor;

impl InvoiceNumberExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InvoiceNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for InvoiceNumberExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        NUMBER_PATTERNS.iter().find_map(|(pattern, confidence)| {
            let caps = pattern.captures(text)?;
            let number = caps.get(1)?;
            Some(
                ExtractionMatch::new(number.as_str().to_string(), *confidence, &caps[0])
                    .with_position(number.start(), number.end()),
            )
        })
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results: Vec<Self::Output> = Vec::new();
        for (pattern, confidence) in NUMBER_PATTERNS.iter() {
            for caps in pattern.captures_iter(text) {
                let Some(number) = caps.get(1) else { continue };
                if results.iter().any(|r| r.value == number.as_str()) {
                    continue;
                }
                results.push(
                    ExtractionMatch::new(number.as_str().to_string(), *confidence, &caps[0])
                        .with_position(number.start(), number.end()),
                );
            }
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_number() {
        assert_eq!(extract_invoice_number("Invoice #: INV-2024-001"), Some("INV-2024-001".into()));
        assert_eq!(extract_invoice_number("RECEIPT no. 88123"), Some("88123".into()));
        assert_eq!(extract_invoice_number("Rechnung Nr. 2024/17"), Some("2024/17".into()));
        assert_eq!(extract_invoice_number("Reikningur 10045"), Some("10045".into()));
    }

    #[test]
    fn test_priority_order() {
        // The labeled form wins even when a hash number comes first.
        let text = "Table #12\nInvoice: A-778";
        assert_eq!(extract_invoice_number(text), Some("A-778".into()));

        let text = "Kassi nr. 3\nKvittun #4471";
        assert_eq!(extract_invoice_number(text), Some("4471".into()));
    }

    #[test]
    fn test_fallback_patterns() {
        assert_eq!(extract_invoice_number("Order #55-1"), Some("55-1".into()));
        assert_eq!(extract_invoice_number("Beleg Nr. 00912"), Some("00912".into()));
        assert_eq!(extract_invoice_number("Document number: X77"), Some("X77".into()));
    }

    #[test]
    fn test_no_number() {
        assert_eq!(extract_invoice_number(""), None);
        assert_eq!(extract_invoice_number("Bónus\nSamtals 6200"), None);
        // A label without any digit is not a number.
        assert_eq!(extract_invoice_number("Invoice: pending"), None);
    }

    #[test]
    fn test_extract_all_deduplicates() {
        let all = InvoiceNumberExtractor::new().extract_all("Invoice #42\nRef #42\nnr. 7");
        let values: Vec<&str> = all.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(values, vec!["42", "7"]);
        assert_eq!(all[0].confidence, 0.9);
    }
}
