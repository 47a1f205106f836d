//! Amount parsing across European and US number conventions.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::locale;
use crate::models::invoice::CurrencyAmount;

use super::patterns::{
    AMOUNT_BARE_COMMA, AMOUNT_BARE_DOT, AMOUNT_EUROPEAN, AMOUNT_GROUPED_INTEGER, AMOUNT_INTEGER,
    AMOUNT_US, NUMERIC_RUN, WHITESPACE_RUN,
};
use super::{ExtractionMatch, FieldExtractor};

/// Confidence attached to every successfully parsed amount.
pub const PARSE_CONFIDENCE: f32 = 0.8;

/// Number writing convention recognized in a numeric string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberConvention {
    /// `1.234,56` or `1 234,56`
    European,
    /// `1,234.56`
    Us,
    /// `1234,56`
    BareComma,
    /// `1234.56`
    BareDot,
    /// `1234`
    Integer,
    /// `1.234`, `1,234` or `1 234`
    GroupedInteger,
}

impl NumberConvention {
    /// Detect the convention of a cleaned numeric string. The order of the
    /// checks decides ambiguous strings: grouped forms win over bare ones.
    pub fn detect(s: &str) -> Option<Self> {
        if AMOUNT_EUROPEAN.is_match(s) {
            Some(Self::European)
        } else if AMOUNT_US.is_match(s) {
            Some(Self::Us)
        } else if AMOUNT_BARE_COMMA.is_match(s) {
            Some(Self::BareComma)
        } else if AMOUNT_BARE_DOT.is_match(s) {
            Some(Self::BareDot)
        } else if AMOUNT_INTEGER.is_match(s) {
            Some(Self::Integer)
        } else if AMOUNT_GROUPED_INTEGER.is_match(s) {
            Some(Self::GroupedInteger)
        } else {
            None
        }
    }

    /// Rewrite `s` (already known to follow this convention) as a plain
    /// dot-decimal string.
    fn normalize(self, s: &str) -> String {
        match self {
            Self::European => s.replace(['.', ' '], "").replace(',', "."),
            Self::Us => s.replace(',', ""),
            Self::BareComma => s.replace(',', "."),
            Self::BareDot | Self::Integer => s.to_string(),
            Self::GroupedInteger => s.replace(['.', ',', ' '], ""),
        }
    }
}

/// Parse a raw amount string for the given currency.
///
/// Non-breaking spaces and whitespace runs are normalized, every vocabulary
/// pattern of the currency is stripped, and the remainder must follow one of
/// the [`NumberConvention`]s in full.
pub fn parse_amount(raw: &str, currency_code: &str) -> Option<CurrencyAmount> {
    let cleaned = clean_amount_text(raw, currency_code);
    let convention = NumberConvention::detect(&cleaned)?;
    let amount = Decimal::from_str(&convention.normalize(&cleaned)).ok()?;
    Some(CurrencyAmount::new(amount, currency_code, PARSE_CONFIDENCE))
}

fn clean_amount_text(raw: &str, currency_code: &str) -> String {
    let spaced = raw.replace('\u{00a0}', " ");
    let mut cleaned = WHITESPACE_RUN.replace_all(&spaced, " ").to_lowercase();
    // Longest first, so "kr" cannot eat the head of "krónur".
    let mut patterns = locale::currency_patterns(currency_code).to_vec();
    patterns.sort_by_key(|p| std::cmp::Reverse(p.chars().count()));
    for pattern in patterns {
        cleaned = cleaned.replace(pattern, "");
    }
    cleaned
        .trim_matches(|c: char| c.is_whitespace() || c == ':')
        .to_string()
}

/// Parse the trailing numeric run of `text`.
///
/// When the whole run does not parse (for example `2 12,50`, a quantity
/// followed by a price) its last space-separated chunk is tried instead.
pub fn parse_trailing_amount(text: &str, currency_code: &str) -> Option<CurrencyAmount> {
    let run = NUMERIC_RUN.find_iter(text).last()?.as_str();
    let run = run.trim_end_matches(['.', ',']);
    parse_amount(run, currency_code).or_else(|| {
        run.rsplit([' ', '\u{00a0}'])
            .next()
            .and_then(|chunk| parse_amount(chunk, currency_code))
    })
}

/// Format an amount with two decimals in the given convention.
pub fn format_amount(amount: Decimal, convention: NumberConvention) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    // Only the digits are grouped; the sign goes in front afterwards.
    let s = format!("{:.2}", rounded.abs());
    let (integer_part, decimal_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    let group = |sep: char| {
        let chars: Vec<char> = integer_part.chars().collect();
        let mut formatted = String::new();
        for (i, c) in chars.iter().enumerate() {
            if i > 0 && (chars.len() - i) % 3 == 0 {
                formatted.push(sep);
            }
            formatted.push(*c);
        }
        formatted
    };

    let digits = match convention {
        NumberConvention::European => format!("{},{}", group('.'), decimal_part),
        NumberConvention::Us => format!("{}.{}", group(','), decimal_part),
        NumberConvention::BareComma => format!("{},{}", integer_part, decimal_part),
        NumberConvention::BareDot => format!("{}.{}", integer_part, decimal_part),
        NumberConvention::Integer => integer_part.to_string(),
        NumberConvention::GroupedInteger => group('.'),
    };
    format!("{sign}{digits}")
}

/// Amount field extractor for one currency.
pub struct AmountExtractor {
    currency_code: String,
}

impl AmountExtractor {
    pub fn new(currency_code: impl Into<String>) -> Self {
        Self {
            currency_code: currency_code.into(),
        }
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<CurrencyAmount>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        NUMERIC_RUN
            .find_iter(text)
            .filter_map(|m| {
                let amount = parse_amount(m.as_str(), &self.currency_code)?;
                let confidence = amount.confidence;
                Some(
                    ExtractionMatch::new(amount, confidence, m.as_str())
                        .with_position(m.start(), m.end()),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn amount(raw: &str, currency: &str) -> Option<Decimal> {
        parse_amount(raw, currency).map(|a| a.amount)
    }

    #[test]
    fn test_parse_european_grouped() {
        assert_eq!(amount("1.234,56", "EUR"), Some(dec("1234.56")));
        assert_eq!(amount("12 345 678,90", "EUR"), Some(dec("12345678.90")));
        assert_eq!(amount("1\u{00a0}234,5", "EUR"), Some(dec("1234.5")));
    }

    #[test]
    fn test_parse_us_grouped() {
        assert_eq!(amount("1,234.56", "USD"), Some(dec("1234.56")));
        assert_eq!(amount("$1,234,567.89", "USD"), Some(dec("1234567.89")));
    }

    #[test]
    fn test_parse_bare_decimals() {
        assert_eq!(amount("1234,56", "EUR"), Some(dec("1234.56")));
        assert_eq!(amount("1234.56", "EUR"), Some(dec("1234.56")));
        assert_eq!(amount("123.45 €", "EUR"), Some(dec("123.45")));
    }

    #[test]
    fn test_parse_integers() {
        assert_eq!(amount("6200", "ISK"), Some(dec("6200")));
        assert_eq!(amount("1.234 kr", "ISK"), Some(dec("1234")));
        assert_eq!(amount("1 234 KR", "ISK"), Some(dec("1234")));
    }

    #[test]
    fn test_strips_currency_case_insensitively() {
        assert_eq!(amount("EUR 99,90", "EUR"), Some(dec("99.90")));
        assert_eq!(amount("99,90 Eur", "EUR"), Some(dec("99.90")));
        assert_eq!(amount("  12.00   ", "GBP"), Some(dec("12.00")));
    }

    #[test]
    fn test_unparseable_is_none() {
        assert_eq!(amount("", "EUR"), None);
        assert_eq!(amount("abc", "EUR"), None);
        assert_eq!(amount("12.345.67", "EUR"), None);
        assert_eq!(amount("1,2,3", "EUR"), None);
        // A foreign currency symbol is not stripped.
        assert_eq!(amount("€12.00", "USD"), None);
    }

    #[test]
    fn test_parse_confidence() {
        let a = parse_amount("10,00", "EUR").unwrap();
        assert_eq!(a.confidence, PARSE_CONFIDENCE);
        assert_eq!(a.currency_code, "EUR");
    }

    #[test]
    fn test_detect_convention_priority() {
        // Grouped forms are checked before bare decimals.
        assert_eq!(NumberConvention::detect("1.234,56"), Some(NumberConvention::European));
        assert_eq!(NumberConvention::detect("1,234.56"), Some(NumberConvention::Us));
        assert_eq!(NumberConvention::detect("123,45"), Some(NumberConvention::European));
        assert_eq!(NumberConvention::detect("1234,5"), Some(NumberConvention::BareComma));
        assert_eq!(NumberConvention::detect("1234.5"), Some(NumberConvention::BareDot));
        assert_eq!(NumberConvention::detect("1234"), Some(NumberConvention::Integer));
        assert_eq!(NumberConvention::detect("1,234"), Some(NumberConvention::GroupedInteger));
    }

    #[test]
    fn test_trailing_amount() {
        let a = parse_trailing_amount("Samtals 6200", "ISK").unwrap();
        assert_eq!(a.amount, dec("6200"));

        let a = parse_trailing_amount("Total 2 items 45,00", "EUR").unwrap();
        assert_eq!(a.amount, dec("45.00"));

        let a = parse_trailing_amount("2 12,50", "EUR").unwrap();
        assert_eq!(a.amount, dec("12.50"));

        let a = parse_trailing_amount("Summe: 1.234,56.", "EUR").unwrap();
        assert_eq!(a.amount, dec("1234.56"));

        assert!(parse_trailing_amount("Total", "EUR").is_none());
    }

    #[test]
    fn test_format_amount() {
        let a = dec("1234.56");
        assert_eq!(format_amount(a, NumberConvention::European), "1.234,56");
        assert_eq!(format_amount(a, NumberConvention::Us), "1,234.56");
        assert_eq!(format_amount(a, NumberConvention::BareComma), "1234,56");
        assert_eq!(format_amount(dec("12345678.9"), NumberConvention::European), "12.345.678,90");
        assert_eq!(format_amount(dec("5"), NumberConvention::Us), "5.00");
    }

    #[test]
    fn test_format_negative_amount() {
        assert_eq!(format_amount(Decimal::from(-123), NumberConvention::Us), "-123.00");
        assert_eq!(format_amount(Decimal::from(-123), NumberConvention::European), "-123,00");
        assert_eq!(format_amount(dec("-1234.5"), NumberConvention::European), "-1.234,50");
        assert_eq!(format_amount(dec("-123456"), NumberConvention::GroupedInteger), "-123.456");
        assert_eq!(format_amount(dec("-0.001"), NumberConvention::Us), "0.00");
    }

    #[test]
    fn test_strips_longest_currency_name_first() {
        assert_eq!(amount("1.234 krónur", "ISK"), Some(dec("1234")));
        assert_eq!(amount("1.234 kr", "ISK"), Some(dec("1234")));
        assert_eq!(amount("5 forint", "HUF"), Some(dec("5")));
        assert_eq!(amount("5 Forint", "HUF"), Some(dec("5")));
    }

    #[test]
    fn test_extract_all_amounts() {
        let extractor = AmountExtractor::new("EUR");
        let results = extractor.extract_all("Brot 2,50 Milch 1,19 Summe 3,69");
        let values: Vec<Decimal> = results.iter().map(|m| m.value.amount).collect();
        assert_eq!(values, vec![dec("2.50"), dec("1.19"), dec("3.69")]);
        assert!(results[0].position.is_some());
    }

    proptest! {
        #[test]
        fn prop_grouped_formats_round_trip(cents in -10_000_000_000i64..10_000_000_000) {
            let value = Decimal::new(cents, 2);
            for convention in [
                NumberConvention::European,
                NumberConvention::Us,
                NumberConvention::BareComma,
                NumberConvention::BareDot,
            ] {
                let text = format_amount(value, convention);
                // Printed amounts carry no sign of their own; it is prefixed.
                let unsigned = text.strip_prefix('-').unwrap_or(&text);
                prop_assert_eq!(text.starts_with('-'), cents < 0, "{}", text);
                prop_assert_eq!(amount(unsigned, "EUR"), Some(value.abs()), "{}", text);
            }
        }

        #[test]
        fn prop_integers_round_trip(n in 0i64..1_000_000_000) {
            prop_assert_eq!(amount(&n.to_string(), "ISK"), Some(Decimal::from(n)));
        }
    }
}
