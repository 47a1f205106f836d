//! Output formatting shared by `process` and `batch`.

use rust_decimal::Decimal;

use vatscan_core::invoice::rules::{format_amount, NumberConvention};
use vatscan_core::{CurrencyAmount, InterpretationResult, VatscanConfig};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension used when writing to a directory.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub const CSV_HEADER: [&str; 12] = [
    "vendor",
    "invoice_number",
    "date",
    "subtotal",
    "tax",
    "total",
    "currency",
    "category",
    "language",
    "country",
    "confidence",
    "needs_review",
];

pub fn format_result(
    result: &InterpretationResult,
    format: OutputFormat,
    config: &VatscanConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => format_json(result, config),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_json(result: &InterpretationResult, config: &VatscanConfig) -> anyhow::Result<String> {
    let mut json = serde_json::to_value(&result.record)?;
    if let Some(obj) = json.as_object_mut() {
        obj.insert("needs_review".to_string(), result.needs_review.into());
        if config.extraction.keep_raw_text {
            obj.insert("raw_text".to_string(), result.raw_text.clone().into());
        }
    }

    if config.output.pretty {
        Ok(serde_json::to_string_pretty(&json)?)
    } else {
        Ok(serde_json::to_string(&json)?)
    }
}

fn format_csv(result: &InterpretationResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(CSV_HEADER)?;
    wtr.write_record(csv_row(result))?;
    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

/// One CSV row in [`CSV_HEADER`] order.
pub fn csv_row(result: &InterpretationResult) -> Vec<String> {
    let record = &result.record;
    let amount = |a: &Option<CurrencyAmount>| {
        a.as_ref()
            .map(|a| a.amount.to_string())
            .unwrap_or_default()
    };

    vec![
        record.vendor.clone(),
        record.invoice_number.clone().unwrap_or_default(),
        record.date.map(|d| d.to_string()).unwrap_or_default(),
        amount(&record.subtotal),
        amount(&record.tax),
        amount(&record.total),
        record.currency_code.clone(),
        record.category.to_string(),
        record.metadata.detected_language.clone().unwrap_or_default(),
        record.metadata.detected_country.clone().unwrap_or_default(),
        format!("{:.2}", record.metadata.confidence),
        result.needs_review.to_string(),
    ]
}

/// Number convention amounts are printed in for a currency.
fn display_convention(currency_code: &str) -> NumberConvention {
    match currency_code {
        "USD" | "GBP" | "JPY" => NumberConvention::Us,
        _ => NumberConvention::European,
    }
}

fn format_text(result: &InterpretationResult) -> String {
    let record = &result.record;
    let convention = display_convention(&record.currency_code);
    let money = |amount: Decimal| {
        format!(
            "{} {}",
            format_amount(amount, convention),
            record.currency_code
        )
    };

    let mut output = String::new();

    output.push_str(&format!("Vendor: {}\n", record.vendor));
    if let Some(number) = &record.invoice_number {
        output.push_str(&format!("Invoice: {}\n", number));
    }
    if let Some(date) = record.date {
        output.push_str(&format!("Date: {}\n", date));
    }
    output.push_str(&format!("Category: {}\n", record.category));
    output.push_str(&format!(
        "Currency: {}{}\n",
        record.currency_code,
        if record.metadata.currency_detected {
            ""
        } else {
            " (assumed)"
        }
    ));
    if let Some(language) = &record.metadata.detected_language {
        output.push_str(&format!(
            "Language: {} ({})\n",
            language,
            record.metadata.detected_country.as_deref().unwrap_or("-")
        ));
    }
    output.push('\n');

    output.push_str("Summary:\n");
    if let Some(subtotal) = &record.subtotal {
        output.push_str(&format!("  Subtotal: {}\n", money(subtotal.amount)));
    }
    for (rate, amount) in &record.vat_breakdown {
        output.push_str(&format!("  VAT {}%: {}\n", rate, money(amount.amount)));
    }
    if let Some(tax) = &record.tax {
        output.push_str(&format!("  Tax:      {}\n", money(tax.amount)));
    }
    if let Some(total) = &record.total {
        output.push_str(&format!("  Total:    {}\n", money(total.amount)));
    }

    if result.needs_review {
        output.push_str("\nNeeds review\n");
    }
    for warning in &record.metadata.warnings {
        output.push_str(&format!("Warning: {}\n", warning));
    }

    output
}
