//! Static locale tables: currency vocabularies, tax/total/subtotal terms per
//! language, and common VAT rates per country.
//!
//! The tables are compiled in and never mutated, so lookups hand out
//! `'static` references that can be shared freely across threads.

mod tables;

use rust_decimal::Decimal;

use tables::{COUNTRY_RATES, CURRENCIES, ENGLISH, LANGUAGES, LANGUAGE_COUNTRIES};

/// Currency used when no currency vocabulary matches.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Language whose terms are used when no language is detected.
pub const FALLBACK_LANGUAGE: &str = "en";

/// Symbols, ISO code and spelled-out names identifying one currency.
#[derive(Debug)]
pub struct CurrencyVocabulary {
    pub code: &'static str,
    pub patterns: &'static [&'static str],
}

/// Tax, total and subtotal terms for one language.
#[derive(Debug)]
pub struct LanguageTerms {
    pub language: &'static str,
    pub vat: &'static [&'static str],
    pub total: &'static [&'static str],
    pub subtotal: &'static [&'static str],
}

/// National currency and common VAT rates of one country.
#[derive(Debug)]
pub struct CountryRates {
    pub country: &'static str,
    pub currency: &'static str,
    pub(crate) rates: &'static [(i64, u32)],
}

impl CountryRates {
    /// VAT rates as percentages.
    pub fn rates(&self) -> Vec<Decimal> {
        self.rates
            .iter()
            .map(|&(mantissa, scale)| Decimal::new(mantissa, scale))
            .collect()
    }
}

/// All known currency vocabularies.
pub fn currencies() -> &'static [CurrencyVocabulary] {
    CURRENCIES
}

/// All known language term tables.
pub fn languages() -> &'static [LanguageTerms] {
    LANGUAGES
}

/// Vocabulary patterns for a currency code; empty for unknown codes.
pub fn currency_patterns(code: &str) -> &'static [&'static str] {
    CURRENCIES
        .iter()
        .find(|c| c.code.eq_ignore_ascii_case(code))
        .map(|c| c.patterns)
        .unwrap_or(&[])
}

/// Term table for a language, falling back to English when the language is
/// absent or unknown.
pub fn terms_for(language: Option<&str>) -> &'static LanguageTerms {
    language
        .and_then(|code| LANGUAGES.iter().find(|t| t.language == code))
        .unwrap_or(&ENGLISH)
}

/// Country for a language code, if mapped.
pub fn country_for_language(language: &str) -> Option<&'static str> {
    LANGUAGE_COUNTRIES
        .iter()
        .find(|(lang, _)| *lang == language)
        .map(|(_, country)| *country)
}

/// Rate table for a country code.
pub fn country(country: &str) -> Option<&'static CountryRates> {
    COUNTRY_RATES
        .iter()
        .find(|c| c.country.eq_ignore_ascii_case(country))
}

/// Common VAT rates of a country; empty for unknown countries.
pub fn vat_rates(country_code: &str) -> Vec<Decimal> {
    country(country_code).map(CountryRates::rates).unwrap_or_default()
}

/// National currency of a country.
pub fn currency_for_country(country_code: &str) -> Option<&'static str> {
    country(country_code).map(|c| c.currency)
}
