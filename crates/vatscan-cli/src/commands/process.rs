//! Process command - interpret one capture of one or more text pages.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use vatscan_core::{interpret_capture, CapturePage, InvoiceInterpreter, TextFileRecognizer};

use super::output::{format_result, OutputFormat};
use super::{load_config, read_input};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Page text files in page order (`-` reads stdin)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show extraction confidence scores
    #[arg(long)]
    show_confidence: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    let mut pages = Vec::with_capacity(args.inputs.len());
    for (index, input) in args.inputs.iter().enumerate() {
        if input.as_path() == Path::new("-") {
            pages.push(CapturePage::text(index, read_input(input)?));
        } else if input.exists() {
            pages.push(CapturePage::path(index, input.clone()));
        } else {
            anyhow::bail!("Input file not found: {}", input.display());
        }
    }

    info!("Processing capture of {} page(s)", pages.len());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.set_message("Interpreting...");

    let interpreter = InvoiceInterpreter::from_config(&config.extraction);
    let result = interpret_capture(
        &interpreter,
        Arc::new(TextFileRecognizer),
        pages,
        &config.capture,
    )
    .await?;

    pb.finish_and_clear();

    let output = format_result(&result, args.format, &config)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_confidence {
        let metadata = &result.record.metadata;
        println!();
        println!(
            "{} Extraction confidence: {:.1}%",
            style("ℹ").blue(),
            metadata.confidence * 100.0
        );
        let mut fields: Vec<_> = metadata.field_confidence.iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));
        for (field, confidence) in fields {
            println!("   {}: {:.1}%", field, confidence * 100.0);
        }
        if !metadata.missing_fields.is_empty() {
            println!(
                "{} Missing: {}",
                style("⚠").yellow(),
                metadata.missing_fields.join(", ")
            );
        }
        if let Some(time_ms) = metadata.processing_time_ms {
            println!("{} Processing time: {}ms", style("ℹ").blue(), time_ms);
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
