//! WASM bindings for receipt and invoice text interpretation.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.
//! Text recognition happens on the JavaScript side; these bindings read the
//! recognized text.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use vatscan_core::invoice::rules;
use vatscan_core::{InvoiceInterpreter, InvoiceParser, InvoiceRecord, VatBreakdown};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Maps become plain objects, amounts stay decimal strings.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Interpret recognized receipt text with default settings.
#[wasm_bindgen]
pub fn interpret_text(text: &str) -> Result<JsValue, JsValue> {
    to_js(&vatscan_core::interpret(text))
}

/// Parse an amount written in any supported number convention.
#[wasm_bindgen]
pub fn parse_amount(amount: &str, currency_code: &str) -> Option<f64> {
    rules::parse_amount(amount, currency_code).map(|a| a.amount.to_string().parse().unwrap_or(0.0))
}

/// Detect the currency code of a text, `"EUR"` when nothing matches.
#[wasm_bindgen]
pub fn detect_currency(text: &str) -> String {
    rules::detect_currency(text).to_string()
}

/// Detect the language code of a text from its tax vocabulary.
#[wasm_bindgen]
pub fn detect_language(text: &str) -> Option<String> {
    rules::detect_language(text).map(str::to_string)
}

/// Interpreter class for browser use.
#[wasm_bindgen(js_name = InvoiceInterpreter)]
pub struct Interpreter {
    inner: InvoiceInterpreter,
}

#[wasm_bindgen(js_class = InvoiceInterpreter)]
impl Interpreter {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: InvoiceInterpreter::new(),
        }
    }

    /// Records below this overall confidence are flagged for review.
    #[wasm_bindgen(js_name = setReviewThreshold)]
    pub fn set_review_threshold(&mut self, threshold: f32) {
        self.inner = std::mem::take(&mut self.inner).with_review_threshold(threshold);
    }

    /// Interpret text into a record.
    #[wasm_bindgen]
    pub fn interpret(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.inner.interpret(text))
    }

    /// Interpret text and include the breakdown and review flag.
    #[wasm_bindgen(js_name = interpretWithMetadata)]
    pub fn interpret_with_metadata(&self, text: &str) -> Result<JsValue, JsValue> {
        #[derive(Serialize)]
        struct Interpretation {
            record: InvoiceRecord,
            breakdown: VatBreakdown,
            needs_review: bool,
            raw_text: String,
        }

        let result = self.inner.parse(text);
        to_js(&Interpretation {
            record: result.record,
            breakdown: result.breakdown,
            needs_review: result.needs_review,
            raw_text: result.raw_text,
        })
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_parse_amount() {
        let amount = parse_amount("1.234,56 €", "EUR");
        assert!((amount.unwrap() - 1234.56).abs() < 0.01);
        assert_eq!(parse_amount("abc", "EUR"), None);
    }

    #[wasm_bindgen_test]
    fn test_detect_locale() {
        assert_eq!(detect_currency("Total: 123.45 €"), "EUR");
        assert_eq!(detect_currency("nothing here"), "EUR");
        assert_eq!(detect_language("Bónus\nVSK 24% 1200").as_deref(), Some("is"));
        assert_eq!(detect_language("hello"), None);
    }

    #[wasm_bindgen_test]
    fn test_review_threshold_keeps_settings() {
        let mut interpreter = Interpreter::new();
        interpreter.inner = InvoiceInterpreter::new().with_country_currency_fallback(false);
        interpreter.set_review_threshold(0.0);

        let result = interpreter.inner.parse("Bónus\nVSK 24% 1200\nSamtals 6200");
        assert_eq!(result.record.currency_code, "EUR");
        assert!(!result.needs_review);
    }

    #[wasm_bindgen_test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
