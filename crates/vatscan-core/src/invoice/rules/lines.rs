//! Line-by-line scanning for VAT-rate amounts, subtotal and total.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use tracing::trace;

use crate::locale::{self, LanguageTerms};
use crate::models::invoice::{CurrencyAmount, RateMap};

use super::amounts::parse_trailing_amount;
use super::patterns::PERCENTAGE;

/// A candidate VAT rate and the pattern locating its amount on a line.
struct RatePattern {
    rate: Decimal,
    regex: Regex,
}

lazy_static! {
    // Rate patterns for every language whose country has known rates.
    static ref RATE_PATTERNS: HashMap<&'static str, Vec<RatePattern>> = locale::languages()
        .iter()
        .map(|terms| {
            let rates = locale::country_for_language(terms.language)
                .map(locale::vat_rates)
                .unwrap_or_default();
            let patterns = rates
                .into_iter()
                .map(|rate| RatePattern { rate, regex: rate_regex(terms.vat, rate) })
                .collect();
            (terms.language, patterns)
        })
        .collect();

    // Registration numbers share the tax vocabulary ("VSK nr. 5501", "VAT No").
    static ref TAX_ID_HINT: Regex = Regex::new(
        r"(?i)\b(?:nr|no|number|númer|nummer|id|reg)\b"
    ).unwrap();
}

/// Build the pattern requiring the integer part of `rate` next to a VAT term,
/// in either order, and capturing the rest of the line as `rest`.
fn rate_regex(vat_terms: &[&str], rate: Decimal) -> Regex {
    let terms = vat_terms
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    let int = rate.trunc().to_string();
    let pattern = format!(
        r"(?i)(?:(?:{terms})[^0-9\n]{{0,12}}{int}(?:[.,]\d{{1,2}})?(?:\s*%|\b)|(?:^|[^\d.,]){int}(?:[.,]\d{{1,2}})?\s*%[^0-9\n]{{0,12}}(?:{terms}))(?P<rest>.*)$"
    );
    // Terms and rates come from the compiled-in tables.
    Regex::new(&pattern).expect("rate pattern built from static tables")
}

/// Candidates found by [`scan_lines`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineScan {
    pub subtotal: Option<CurrencyAmount>,
    pub tax: Option<CurrencyAmount>,
    pub rate_map: RateMap,
    pub total: Option<CurrencyAmount>,
}

/// Set `slot` from `candidate` unless it already holds a value.
fn fill(slot: &mut Option<CurrencyAmount>, candidate: impl FnOnce() -> Option<CurrencyAmount>) {
    if slot.is_none() {
        *slot = candidate();
    }
}

fn contains_any(line: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| line.contains(t))
}

/// Scan `text` line by line with the vocabulary of `language` (English when
/// absent) and the VAT rates of its country.
///
/// The first line yielding a total, subtotal or explicit tax wins; later
/// lines never overwrite it. Amounts are read from the trailing numeric run
/// of a line, since leading numbers are usually quantities or percentages.
pub fn scan_lines(text: &str, currency_code: &str, language: Option<&str>) -> LineScan {
    let terms: &LanguageTerms = locale::terms_for(language);
    let rate_patterns: &[RatePattern] = language
        .and_then(|lang| RATE_PATTERNS.get(lang))
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    let mut scan = LineScan::default();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let lower = line.to_lowercase();
        let mut rate_line = false;

        for pattern in rate_patterns {
            let Some(rest) = pattern.regex.captures(line).and_then(|c| c.name("rest")) else {
                continue;
            };
            if let Some(amount) = parse_trailing_amount(rest.as_str(), currency_code) {
                trace!("Rate {}% -> {} on line {:?}", pattern.rate, amount, line);
                scan.rate_map.entry(pattern.rate).or_insert(amount);
                rate_line = true;
            }
        }
        if rate_line {
            continue;
        }

        // Rate percentages are never the amount of a summary line.
        let amount_text = PERCENTAGE.replace_all(line, " ");
        let is_subtotal = contains_any(&lower, terms.subtotal);
        let is_total = !is_subtotal && contains_any(&lower, terms.total);

        if is_subtotal {
            fill(&mut scan.subtotal, || parse_trailing_amount(&amount_text, currency_code));
        } else if is_total {
            fill(&mut scan.total, || parse_trailing_amount(&amount_text, currency_code));
        } else if contains_any(&lower, terms.vat) && !TAX_ID_HINT.is_match(line) {
            fill(&mut scan.tax, || parse_trailing_amount(&amount_text, currency_code));
        }
    }

    trace!(
        "Line scan: subtotal={:?} tax={:?} total={:?} rates={}",
        scan.subtotal.as_ref().map(|a| a.amount),
        scan.tax.as_ref().map(|a| a.amount),
        scan.total.as_ref().map(|a| a.amount),
        scan.rate_map.len()
    );

    scan
}
