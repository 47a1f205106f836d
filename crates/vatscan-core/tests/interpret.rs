//! End-to-end interpretation of receipt texts.

use std::str::FromStr;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use vatscan_core::invoice::rules::{detect_currency, detect_language};
use vatscan_core::{Category, InvoiceInterpreter, InvoiceParser, UNKNOWN_VENDOR};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

#[test]
fn test_icelandic_grocery_receipt() {
    let text = "Bónus\nVSK 24% 1200\nSamtals 6200";
    let result = InvoiceInterpreter::new().parse(text);
    let record = &result.record;

    assert_eq!(record.currency_code, "ISK");
    assert_eq!(record.metadata.detected_language.as_deref(), Some("is"));
    assert_eq!(record.metadata.detected_country.as_deref(), Some("IS"));

    assert_eq!(record.vat_breakdown.len(), 1);
    let vat = &record.vat_breakdown[&Decimal::from(24)];
    assert_eq!(vat.amount, dec("1200"));
    assert_eq!(vat.currency_code, "ISK");

    let tax = record.tax.as_ref().unwrap();
    assert_eq!(tax.amount, dec("1200"));
    assert_eq!(tax.currency_code, "ISK");
    assert_eq!(tax.confidence, 0.9);

    let total = record.total.as_ref().unwrap();
    assert_eq!(total.amount, dec("6200"));
    assert_eq!(total.currency_code, "ISK");

    let subtotal = record.subtotal.as_ref().unwrap();
    assert_eq!(subtotal.amount, dec("5000"));
    assert_eq!(subtotal.confidence, 0.8);

    assert_eq!(record.category, Category::Groceries);
    assert_eq!(record.vendor, "Bónus");
    assert_eq!(result.breakdown.missing_count(), 0);
}

#[test]
fn test_total_only() {
    let record = InvoiceInterpreter::new().interpret("Total: 123.45 €");

    let total = record.total.unwrap();
    assert_eq!(total.amount, dec("123.45"));
    assert_eq!(total.currency_code, "EUR");
    assert_eq!(record.subtotal, None);
    assert_eq!(record.tax, None);
    assert!(record.vat_breakdown.is_empty());
}

#[test]
fn test_empty_input() {
    for text in ["", "   \n\t \n"] {
        let record = InvoiceInterpreter::new().interpret(text);

        assert_eq!(record.vendor, UNKNOWN_VENDOR);
        assert_eq!(record.invoice_number, None);
        assert_eq!(record.date, None);
        assert_eq!(record.subtotal, None);
        assert_eq!(record.tax, None);
        assert_eq!(record.total, None);
        assert_eq!(record.currency_code, "EUR");
        assert!(record.vat_breakdown.is_empty());
        assert_eq!(record.category, Category::Other);
        assert_eq!(record.metadata.confidence, 0.0);
    }
}

#[test]
fn test_krona_currency_detection() {
    assert_eq!(detect_currency("Total: 1.234 kr VSK 24%"), "ISK");
    assert_eq!(detect_language("Total: 1.234 kr VSK 24%"), Some("is"));
}

#[test]
fn test_german_receipt() {
    let text = "EDEKA Markt\nBeleg-Nr. 4711\nDatum: 14.02.2024\nSumme EUR 23,80\nMwSt 19% 3,80\nNetto 20,00";
    let record = InvoiceInterpreter::new().interpret(text);

    assert_eq!(record.vendor, "EDEKA Markt");
    assert_eq!(record.invoice_number.as_deref(), Some("4711"));
    assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 2, 14));
    assert_eq!(record.currency_code, "EUR");
    assert_eq!(record.metadata.detected_language.as_deref(), Some("de"));
    assert_eq!(record.total.unwrap().amount, dec("23.80"));
    assert_eq!(record.subtotal.unwrap().amount, dec("20.00"));
    assert_eq!(record.tax.unwrap().amount, dec("3.80"));
    assert_eq!(record.category, Category::Groceries);
    assert!(record.metadata.warnings.is_empty());
}

#[test]
fn test_norwegian_receipt_with_two_rates() {
    let text = "REMA 1000 Grünerløkka\nMVA 25% 40,00\nMVA 15% 12,50\nTotalt å betale 252,50 NOK";
    let record = InvoiceInterpreter::new().interpret(text);

    assert_eq!(record.currency_code, "NOK");
    assert_eq!(record.metadata.detected_country.as_deref(), Some("NO"));
    assert_eq!(record.vat_breakdown.len(), 2);
    assert_eq!(record.tax.unwrap().amount, dec("52.50"));
    assert_eq!(record.total.unwrap().amount, dec("252.50"));
    assert_eq!(record.subtotal.unwrap().amount, dec("200.00"));
    assert_eq!(record.category, Category::Groceries);
}

#[test]
fn test_french_subtotal_is_not_total() {
    let text = "Carrefour City\nTotal HT 20,00\nTVA 20% 4,00\nTotal TTC 24,00 €";
    let record = InvoiceInterpreter::new().interpret(text);

    assert_eq!(record.metadata.detected_language.as_deref(), Some("fr"));
    assert_eq!(record.subtotal.unwrap().amount, dec("20.00"));
    assert_eq!(record.tax.unwrap().amount, dec("4.00"));
    assert_eq!(record.total.unwrap().amount, dec("24.00"));
}

#[test]
fn test_record_serializes_to_json() {
    let record = InvoiceInterpreter::new().interpret("Bónus\nVSK 24% 1200\nSamtals 6200");
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["vendor"], "Bónus");
    assert_eq!(json["category"], "groceries");
    assert_eq!(json["currency_code"], "ISK");
    assert_eq!(json["total"]["amount"], "6200");
    assert!(json["vat_breakdown"]["24"].is_object());
    assert!(json.get("date").is_none());
}
