//! Receipt and invoice data models produced by the interpreter.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Placeholder vendor name used when no text line qualifies.
pub const UNKNOWN_VENDOR: &str = "Unknown Vendor";

/// A monetary amount tagged with its currency and the confidence of the
/// heuristic that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyAmount {
    /// Amount in major units.
    pub amount: Decimal,

    /// ISO-4217-like currency code.
    pub currency_code: String,

    /// Confidence of the producing heuristic (0.0 - 1.0).
    pub confidence: f32,
}

impl CurrencyAmount {
    /// Create a new amount. Confidence is clamped into `[0, 1]`.
    pub fn new(amount: Decimal, currency_code: impl Into<String>, confidence: f32) -> Self {
        Self {
            amount,
            currency_code: currency_code.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

impl fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency_code)
    }
}

/// Mapping from a tax-rate percentage to the amount taxed at that rate.
pub type RateMap = BTreeMap<Decimal, CurrencyAmount>;

/// Subtotal / tax / total triple together with the per-rate breakdown and
/// the locale it was read under.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VatBreakdown {
    /// Amount before tax.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<CurrencyAmount>,

    /// Total tax amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax: Option<CurrencyAmount>,

    /// Grand total.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<CurrencyAmount>,

    /// Tax amount per detected rate.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rate_map: RateMap,

    /// Country inferred from the detected language.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_country: Option<String>,

    /// Detected language code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_language: Option<String>,
}

impl VatBreakdown {
    /// Number of absent fields among subtotal, tax and total.
    pub fn missing_count(&self) -> usize {
        [&self.subtotal, &self.tax, &self.total]
            .iter()
            .filter(|f| f.is_none())
            .count()
    }
}

/// Spending category assigned by keyword classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Groceries,
    Utilities,
    Transportation,
    Healthcare,
    #[default]
    Other,
}

impl Category {
    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Groceries => "groceries",
            Category::Utilities => "utilities",
            Category::Transportation => "transportation",
            Category::Healthcare => "healthcare",
            Category::Other => "other",
        }
    }

    /// Parse a category name, falling back to `Other`.
    pub fn from_name(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "groceries" => Category::Groceries,
            "utilities" => Category::Utilities,
            "transportation" => Category::Transportation,
            "healthcare" => Category::Healthcare,
            _ => Category::Other,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured record assembled from one block of recognized text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Vendor name, or [`UNKNOWN_VENDOR`].
    pub vendor: String,

    /// Invoice or receipt number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,

    /// Document date (day-first parsing).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    /// Amount before tax.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<CurrencyAmount>,

    /// Total tax amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax: Option<CurrencyAmount>,

    /// Grand total.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<CurrencyAmount>,

    /// Currency all amounts are expressed in.
    pub currency_code: String,

    /// Tax amount per rate.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub vat_breakdown: RateMap,

    /// Spending category.
    pub category: Category,

    /// Extraction metadata.
    pub metadata: ExtractionMetadata,
}

impl InvoiceRecord {
    /// Whether the record should be reviewed by a human before use.
    pub fn needs_review(&self, threshold: f32) -> bool {
        self.metadata.confidence < threshold
    }

    /// Whether a real vendor line was found.
    pub fn has_vendor(&self) -> bool {
        self.vendor != UNKNOWN_VENDOR
    }
}

/// Metadata about the extraction process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    /// Overall extraction confidence (0.0 - 1.0).
    pub confidence: f32,

    /// Detected language code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_language: Option<String>,

    /// Country inferred from the detected language.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_country: Option<String>,

    /// Whether the currency came from textual evidence rather than a fallback.
    pub currency_detected: bool,

    /// Number of capture pages the text was assembled from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<usize>,

    /// Processing time in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time_ms: Option<u64>,

    /// Warnings or issues encountered during extraction.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,

    /// Fields that could not be extracted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_fields: Vec<String>,

    /// Field-level confidence scores.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub field_confidence: HashMap<String, f32>,
}
