//! Detect command - show the locale read from a text without interpreting it.

use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;

use vatscan_core::invoice::rules::{score_currencies, score_languages};
use vatscan_core::{DetectedLocale, InvoiceInterpreter};

use super::read_input;

/// Arguments for the detect command.
#[derive(Args)]
pub struct DetectArgs {
    /// Text file (`-` reads stdin)
    #[arg(default_value = "-")]
    input: PathBuf,

    /// Print JSON instead of a summary
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Detection {
    #[serde(flatten)]
    locale: DetectedLocale,
    currency_scores: Vec<(&'static str, usize)>,
    language_scores: Vec<(&'static str, usize)>,
}

pub async fn run(args: DetectArgs) -> anyhow::Result<()> {
    let text = read_input(&args.input)?;

    let detection = Detection {
        locale: InvoiceInterpreter::new().detect_locale(&text),
        currency_scores: score_currencies(&text),
        language_scores: score_languages(&text),
    };

    if args.json {
        println!("{}", serde_json::to_string(&detection)?);
        return Ok(());
    }

    let locale = &detection.locale;
    println!(
        "Currency: {} {}",
        style(locale.currency).bold(),
        if locale.currency_detected {
            style("(detected)").green()
        } else {
            style("(assumed)").yellow()
        }
    );
    println!("Language: {}", locale.language.unwrap_or("-"));
    println!("Country:  {}", locale.country.unwrap_or("-"));

    if !detection.currency_scores.is_empty() {
        println!();
        println!("Currency scores:");
        for (code, score) in &detection.currency_scores {
            println!("  {:<4} {}", code, score);
        }
    }
    if !detection.language_scores.is_empty() {
        println!();
        println!("Language scores:");
        for (language, score) in &detection.language_scores {
            println!("  {:<4} {}", language, score);
        }
    }

    Ok(())
}
