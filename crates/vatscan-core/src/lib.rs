//! Core library for international receipt and invoice text interpretation.
//!
//! This crate provides:
//! - Currency and language detection over OCR text
//! - Amount parsing across European and US number conventions
//! - Line scanning for VAT-rate amounts, subtotals and totals
//! - Arithmetic reconciliation of subtotal, tax and total
//! - Vendor, invoice number, date and category extraction
//! - Multi-page capture fan-in (`capture` feature)

pub mod error;
pub mod invoice;
pub mod locale;
pub mod models;

#[cfg(feature = "capture")]
pub mod capture;

pub use error::{CaptureError, Result, VatscanError};
pub use invoice::{DetectedLocale, InterpretationResult, InvoiceInterpreter, InvoiceParser};
pub use models::config::VatscanConfig;
pub use models::invoice::{
    Category, CurrencyAmount, ExtractionMetadata, InvoiceRecord, RateMap, VatBreakdown,
    UNKNOWN_VENDOR,
};

#[cfg(feature = "capture")]
pub use capture::{
    interpret_capture, recognize_capture, CapturePage, MockRecognizer, PageRecognizer, PageSource,
    TextFileRecognizer,
};

/// Interpret one block of recognized text with default settings.
pub fn interpret(text: &str) -> InvoiceRecord {
    InvoiceInterpreter::new().interpret(text)
}
