//! Receipt and invoice text interpretation.

mod interpreter;
pub mod rules;

pub use interpreter::{DetectedLocale, InterpretationResult, InvoiceInterpreter, InvoiceParser};
