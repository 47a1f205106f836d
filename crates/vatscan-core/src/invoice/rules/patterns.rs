//! Common regex patterns for receipt and invoice extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // A run of digits and separators; single spaces may group thousands.
    pub static ref NUMERIC_RUN: Regex = Regex::new(
        r"\d[\d.,]*(?:[ \u{00a0}]\d[\d.,]*)*"
    ).unwrap();

    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();

    // Percentages such as "24%" or "5,5 %"
    pub static ref PERCENTAGE: Regex = Regex::new(r"\d+(?:[.,]\d+)?\s*%").unwrap();

    // Amount conventions, tried in priority order.
    pub static ref AMOUNT_EUROPEAN: Regex = Regex::new(
        r"^\d{1,3}(?:[. ]\d{3})*,\d{1,2}$"
    ).unwrap();

    pub static ref AMOUNT_US: Regex = Regex::new(
        r"^\d{1,3}(?:,\d{3})*\.\d{1,2}$"
    ).unwrap();

    pub static ref AMOUNT_BARE_COMMA: Regex = Regex::new(r"^\d+,\d{1,2}$").unwrap();

    pub static ref AMOUNT_BARE_DOT: Regex = Regex::new(r"^\d+\.\d{1,2}$").unwrap();

    pub static ref AMOUNT_INTEGER: Regex = Regex::new(r"^\d+$").unwrap();

    pub static ref AMOUNT_GROUPED_INTEGER: Regex = Regex::new(
        r"^\d{1,3}(?:[., ]\d{3})+$"
    ).unwrap();

    // Day-first numeric dates: DD.MM.YYYY, DD/MM/YY, DD-MM-YYYY
    pub static ref DATE_DMY: Regex = Regex::new(
        r"\b(\d{1,2})[./\-](\d{1,2})[./\-](\d{4}|\d{2})\b"
    ).unwrap();

    // Invoice number patterns, in priority order
    pub static ref INVOICE_NUMBER_LABELED: Regex = Regex::new(
        r"(?i)\b(?:invoice|receipt|reikningur|kvittun|faktura|rechnung|facture|factura|fattura|kvitto|kvittering)\s*(?:no\.?|nr\.?)?\s*#?\s*:?\s*([A-Za-z0-9/\-]*\d[A-Za-z0-9/\-]*)"
    ).unwrap();

    pub static ref INVOICE_NUMBER_HASH: Regex = Regex::new(
        r"#\s*([A-Za-z0-9/\-]*\d[A-Za-z0-9/\-]*)"
    ).unwrap();

    pub static ref INVOICE_NUMBER_NR: Regex = Regex::new(
        r"(?i)\bnr\.?\s*:?\s*([A-Za-z0-9/\-]*\d[A-Za-z0-9/\-]*)"
    ).unwrap();

    pub static ref INVOICE_NUMBER_NUMBER: Regex = Regex::new(
        r"(?i)\b(?:number|nummer|númer|numéro|número|numero)\s*:?\s*([A-Za-z0-9/\-]*\d[A-Za-z0-9/\-]*)"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_run_keeps_grouping_spaces() {
        let runs: Vec<&str> = NUMERIC_RUN
            .find_iter("Samtals 1 200,00 kr")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(runs, vec!["1 200,00"]);
    }

    #[test]
    fn test_numeric_run_splits_on_letters() {
        let runs: Vec<&str> = NUMERIC_RUN
            .find_iter("2 x Mjólk 349")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(runs, vec!["2", "349"]);
    }

    #[test]
    fn test_date_pattern_ignores_iso_dates() {
        assert!(!DATE_DMY.is_match("2024-03-15"));
        assert!(DATE_DMY.is_match("Dags. 15.03.2024"));
    }
}
