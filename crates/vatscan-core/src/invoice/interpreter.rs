//! Invoice assembler: runs every heuristic over one block of recognized text.

use std::collections::HashMap;
use std::time::Instant;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

use crate::locale::{self, DEFAULT_CURRENCY};
use crate::models::config::ExtractionConfig;
use crate::models::invoice::{
    CurrencyAmount, ExtractionMetadata, InvoiceRecord, VatBreakdown, UNKNOWN_VENDOR,
};

use super::rules::{
    classify, detect_country, detect_currency_scored, detect_language, reconcile, scan_lines,
    DateExtractor, FieldExtractor, InvoiceNumberExtractor, VendorExtractor,
};

// Weights of the overall confidence.
const VENDOR_WEIGHT: f32 = 0.2;
const DATE_WEIGHT: f32 = 0.2;
const TOTAL_WEIGHT: f32 = 0.4;
const TAX_WEIGHT: f32 = 0.2;

/// Result of interpreting one block of text.
#[derive(Debug, Clone)]
pub struct InterpretationResult {
    /// Assembled record.
    pub record: InvoiceRecord,
    /// Reconciled amounts with the per-rate breakdown and detected locale.
    pub breakdown: VatBreakdown,
    /// Text the record was read from.
    pub raw_text: String,
    /// Whether the overall confidence is below the review threshold.
    pub needs_review: bool,
}

/// Trait for text interpreters. Interpretation always yields a best-effort
/// result; missing information shows up as absent fields and warnings.
pub trait InvoiceParser {
    fn parse(&self, text: &str) -> InterpretationResult;
}

/// Currency and locale decided for a text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DetectedLocale {
    pub currency: &'static str,
    /// Whether the currency was found in the text rather than assumed.
    pub currency_detected: bool,
    pub language: Option<&'static str>,
    pub country: Option<&'static str>,
}

/// Assembles [`InvoiceRecord`]s from recognized text.
pub struct InvoiceInterpreter {
    /// Records below this overall confidence need review.
    review_threshold: f32,
    /// Use the detected country's currency when the text names none.
    country_currency_fallback: bool,
}

impl InvoiceInterpreter {
    /// Create an interpreter with default settings.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            review_threshold: config.review_threshold,
            country_currency_fallback: true,
        }
    }

    /// Set the review threshold.
    pub fn with_review_threshold(mut self, threshold: f32) -> Self {
        self.review_threshold = threshold;
        self
    }

    /// Enable or disable the country currency fallback. When disabled, text
    /// without currency evidence is read as `"EUR"`.
    pub fn with_country_currency_fallback(mut self, enabled: bool) -> Self {
        self.country_currency_fallback = enabled;
        self
    }

    /// Interpret `text` into a record.
    pub fn interpret(&self, text: &str) -> InvoiceRecord {
        self.parse(text).record
    }

    /// Detect the locale, scan the lines and reconcile the amounts.
    pub fn breakdown(&self, text: &str) -> VatBreakdown {
        let locale = self.detect_locale(text);
        self.read_amounts(text, &locale)
    }

    /// Detect currency, language and country. Without currency evidence the
    /// country's currency is assumed, then `"EUR"`.
    pub fn detect_locale(&self, text: &str) -> DetectedLocale {
        let language = detect_language(text);
        let country = detect_country(language);

        let (currency, currency_detected) = match detect_currency_scored(text) {
            Some(m) => (m.value, true),
            None => {
                let fallback = country
                    .filter(|_| self.country_currency_fallback)
                    .and_then(locale::currency_for_country)
                    .unwrap_or(DEFAULT_CURRENCY);
                (fallback, false)
            }
        };

        debug!(
            "Locale: currency={} (detected: {}) language={:?} country={:?}",
            currency, currency_detected, language, country
        );

        DetectedLocale {
            currency,
            currency_detected,
            language,
            country,
        }
    }

    fn read_amounts(&self, text: &str, locale: &DetectedLocale) -> VatBreakdown {
        let scan = scan_lines(text, locale.currency, locale.language);
        let reconciled = reconcile(
            scan.subtotal,
            scan.tax,
            &scan.rate_map,
            scan.total,
            locale.currency,
        );

        VatBreakdown {
            subtotal: reconciled.subtotal,
            tax: reconciled.tax,
            total: reconciled.total,
            rate_map: scan.rate_map,
            detected_country: locale.country.map(str::to_string),
            detected_language: locale.language.map(str::to_string),
        }
    }
}

impl Default for InvoiceInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceParser for InvoiceInterpreter {
    fn parse(&self, text: &str) -> InterpretationResult {
        let start = start_timer();
        let mut warnings = Vec::new();
        let mut field_confidence = HashMap::new();

        let locale = self.detect_locale(text);
        if !locale.currency_detected {
            warnings.push(format!("No currency found in text, assuming {}", locale.currency));
        }
        if locale.language.is_none() {
            warnings.push("Language not detected, using English terms".to_string());
        }
        if let Some(warning) = currency_mismatch_warning(&locale) {
            warnings.push(warning);
        }

        let breakdown = self.read_amounts(text, &locale);

        let vendor = VendorExtractor::new().extract(text);
        let invoice_number = InvoiceNumberExtractor::new().extract(text);
        let date = DateExtractor::new().extract(text);

        for (field, confidence) in [
            ("vendor", vendor.as_ref().map(|m| m.confidence)),
            ("invoice_number", invoice_number.as_ref().map(|m| m.confidence)),
            ("date", date.as_ref().map(|m| m.confidence)),
            ("subtotal", breakdown.subtotal.as_ref().map(|a| a.confidence)),
            ("tax", breakdown.tax.as_ref().map(|a| a.confidence)),
            ("total", breakdown.total.as_ref().map(|a| a.confidence)),
        ] {
            if let Some(c) = confidence {
                field_confidence.insert(field.to_string(), c);
            }
        }

        let missing_fields: Vec<String> = [
            "vendor",
            "invoice_number",
            "date",
            "subtotal",
            "tax",
            "total",
        ]
        .into_iter()
        .filter(|f| !field_confidence.contains_key(*f))
        .map(str::to_string)
        .collect();

        if let Some(warning) = consistency_warning(&breakdown) {
            warnings.push(warning);
        }

        let confidence = overall_confidence(&field_confidence);
        let vendor = vendor
            .map(|m| m.value)
            .unwrap_or_else(|| UNKNOWN_VENDOR.to_string());
        let category = classify(&vendor, text);

        let record = InvoiceRecord {
            category,
            invoice_number: invoice_number.map(|m| m.value),
            date: date.map(|m| m.value),
            subtotal: breakdown.subtotal.clone(),
            tax: breakdown.tax.clone(),
            total: breakdown.total.clone(),
            currency_code: locale.currency.to_string(),
            vat_breakdown: breakdown.rate_map.clone(),
            metadata: ExtractionMetadata {
                confidence,
                detected_language: breakdown.detected_language.clone(),
                detected_country: breakdown.detected_country.clone(),
                currency_detected: locale.currency_detected,
                page_count: None,
                processing_time_ms: start.map(|s| s.elapsed().as_millis() as u64),
                warnings,
                missing_fields,
                field_confidence,
            },
            vendor,
        };

        let needs_review = record.needs_review(self.review_threshold);

        info!(
            "Interpreted {:?}: total={} currency={} category={} confidence={:.2}",
            record.vendor,
            record
                .total
                .as_ref()
                .map(CurrencyAmount::to_string)
                .unwrap_or_else(|| "-".to_string()),
            record.currency_code,
            record.category,
            record.metadata.confidence
        );

        InterpretationResult {
            record,
            breakdown,
            raw_text: text.to_string(),
            needs_review,
        }
    }
}

// The clock panics on wasm32-unknown-unknown.
#[cfg(not(target_arch = "wasm32"))]
fn start_timer() -> Option<Instant> {
    Some(Instant::now())
}

#[cfg(target_arch = "wasm32")]
fn start_timer() -> Option<Instant> {
    None
}

/// Weighted mean of the vendor, date, total and tax confidences; a missing
/// field counts as zero.
fn overall_confidence(field_confidence: &HashMap<String, f32>) -> f32 {
    let score = |field: &str| field_confidence.get(field).copied().unwrap_or(0.0);
    let confidence = score("vendor") * VENDOR_WEIGHT
        + score("date") * DATE_WEIGHT
        + score("total") * TOTAL_WEIGHT
        + score("tax") * TAX_WEIGHT;
    confidence.clamp(0.0, 1.0)
}

/// Flags a detected currency that is not the national currency of the
/// detected country. English is printed in too many currencies to judge.
fn currency_mismatch_warning(detected: &DetectedLocale) -> Option<String> {
    if !detected.currency_detected || detected.language == Some("en") {
        return None;
    }
    let country = detected.country?;
    let national = locale::currency_for_country(country)?;
    (national != detected.currency).then(|| {
        format!(
            "Detected currency {} is not {}, the currency of {}",
            detected.currency, national, country
        )
    })
}

fn consistency_warning(breakdown: &VatBreakdown) -> Option<String> {
    let (Some(subtotal), Some(tax), Some(total)) =
        (&breakdown.subtotal, &breakdown.tax, &breakdown.total)
    else {
        return None;
    };
    let difference = (subtotal.amount + tax.amount - total.amount).abs();
    (difference > Decimal::new(1, 2)).then(|| {
        format!(
            "Subtotal {} plus tax {} does not match total {}",
            subtotal.amount, tax.amount, total.amount
        )
    })
}
