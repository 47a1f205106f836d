//! Day-first date extraction.

use chrono::NaiveDate;

use super::patterns::DATE_DMY;
use super::{ExtractionMatch, FieldExtractor};

const DATE_CONFIDENCE: f32 = 0.9;

// Day-first formats, tried in order.
const FOUR_DIGIT_YEAR_FORMATS: &[&str] = &["%d.%m.%Y", "%d/%m/%Y", "%d-%m-%Y"];
const TWO_DIGIT_YEAR_FORMATS: &[&str] = &["%d.%m.%y", "%d/%m/%y", "%d-%m-%y"];

/// Parse one `D.M.Y`-shaped string with the first day-first format that
/// accepts it. Month-first dates are not recognized.
fn parse_day_first(s: &str, year_digits: usize) -> Option<NaiveDate> {
    let formats = if year_digits == 4 {
        FOUR_DIGIT_YEAR_FORMATS
    } else {
        TWO_DIGIT_YEAR_FORMATS
    };
    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Date of the first date-shaped substring, or `None` when that substring is
/// not a valid day-first date.
pub fn extract_date(text: &str) -> Option<NaiveDate> {
    DateExtractor::new().extract(text).map(|m| m.value)
}

/// Date field extractor.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<NaiveDate>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let caps = DATE_DMY.captures(text)?;
        let full = caps.get(0)?;
        let date = parse_day_first(full.as_str(), caps[3].len())?;
        Some(
            ExtractionMatch::new(date, DATE_CONFIDENCE, full.as_str())
                .with_position(full.start(), full.end()),
        )
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        DATE_DMY
            .captures_iter(text)
            .filter_map(|caps| {
                let full = caps.get(0)?;
                let date = parse_day_first(full.as_str(), caps[3].len())?;
                Some(
                    ExtractionMatch::new(date, DATE_CONFIDENCE, full.as_str())
                        .with_position(full.start(), full.end()),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_extract_date_separators() {
        assert_eq!(extract_date("Dags. 15.03.2024"), Some(ymd(2024, 3, 15)));
        assert_eq!(extract_date("Date: 01/12/2023"), Some(ymd(2023, 12, 1)));
        assert_eq!(extract_date("Datum 7-6-2024 14:02"), Some(ymd(2024, 6, 7)));
    }

    #[test]
    fn test_two_digit_year() {
        assert_eq!(extract_date("15.01.24"), Some(ymd(2024, 1, 15)));
    }

    #[test]
    fn test_day_first_assumed() {
        // 03/04 is the 3rd of April, never March 4th.
        assert_eq!(extract_date("03/04/2024"), Some(ymd(2024, 4, 3)));
        // Month-first dates with a day above 12 do not parse.
        assert_eq!(extract_date("12/31/2024"), None);
    }

    #[test]
    fn test_only_first_candidate_is_considered() {
        assert_eq!(extract_date("32.01.2024 and 15.01.2024"), None);
        let all = DateExtractor::new().extract_all("32.01.2024 and 15.01.2024");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].value, ymd(2024, 1, 15));
    }

    #[test]
    fn test_mixed_separators_rejected() {
        assert_eq!(extract_date("15.03-2024"), None);
    }

    #[test]
    fn test_no_date() {
        assert_eq!(extract_date(""), None);
        assert_eq!(extract_date("Samtals 6200"), None);
        assert_eq!(extract_date("2024-03-15"), None);
    }

    #[test]
    fn test_match_position() {
        let m = DateExtractor::new().extract("Date 15.03.2024").unwrap();
        assert_eq!(m.position, Some((5, 15)));
        assert_eq!(m.source, "15.03.2024");
    }
}
