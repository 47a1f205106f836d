//! Arithmetic inference of one missing amount among subtotal, tax and total.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::invoice::{CurrencyAmount, RateMap};

/// Confidence of a tax summed from the per-rate amounts.
pub const RATE_SUM_CONFIDENCE: f32 = 0.9;
/// Confidence of a value obtained by subtraction.
pub const DIFFERENCE_CONFIDENCE: f32 = 0.8;
/// Confidence of a total obtained by addition.
pub const SUM_CONFIDENCE: f32 = 0.9;

/// Largest negative difference still accepted as a tax (rounding noise).
fn tax_tolerance() -> Decimal {
    Decimal::new(-1, 2)
}

/// Subtotal, tax and total after reconciliation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciled {
    pub subtotal: Option<CurrencyAmount>,
    pub tax: Option<CurrencyAmount>,
    pub total: Option<CurrencyAmount>,
}

/// Reconcile the amounts found on a document.
///
/// A missing tax is first taken as the sum of `rate_map`. After that at most
/// one inference is made, in this order of preference:
///
/// 1. `tax = total - subtotal`, rejected when below `-0.01`
/// 2. `subtotal = total - tax`
/// 3. `total = subtotal + tax`
///
/// Nothing is inferred when two or more values are still missing, and the
/// result is never fed back for a second round.
pub fn reconcile(
    subtotal: Option<CurrencyAmount>,
    tax: Option<CurrencyAmount>,
    rate_map: &RateMap,
    total: Option<CurrencyAmount>,
    currency_code: &str,
) -> Reconciled {
    let mut r = Reconciled { subtotal, tax, total };

    if r.tax.is_none() && !rate_map.is_empty() {
        let sum: Decimal = rate_map.values().map(|a| a.amount).sum();
        debug!("Tax from {} rate(s): {}", rate_map.len(), sum);
        r.tax = Some(CurrencyAmount::new(sum, currency_code, RATE_SUM_CONFIDENCE));
    }

    match (&r.subtotal, &r.tax, &r.total) {
        (Some(subtotal), None, Some(total)) => {
            let tax = total.amount - subtotal.amount;
            if tax >= tax_tolerance() {
                debug!("Inferred tax {} = {} - {}", tax, total.amount, subtotal.amount);
                r.tax = Some(CurrencyAmount::new(tax, currency_code, DIFFERENCE_CONFIDENCE));
            } else {
                debug!("Rejected negative tax {}", tax);
            }
        }
        (None, Some(tax), Some(total)) => {
            let subtotal = total.amount - tax.amount;
            debug!("Inferred subtotal {} = {} - {}", subtotal, total.amount, tax.amount);
            r.subtotal = Some(CurrencyAmount::new(subtotal, currency_code, DIFFERENCE_CONFIDENCE));
        }
        (Some(subtotal), Some(tax), None) => {
            let total = subtotal.amount + tax.amount;
            debug!("Inferred total {} = {} + {}", total, subtotal.amount, tax.amount);
            r.total = Some(CurrencyAmount::new(total, currency_code, SUM_CONFIDENCE));
        }
        _ => {}
    }

    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn amt(s: &str) -> CurrencyAmount {
        CurrencyAmount::new(Decimal::from_str(s).unwrap(), "ISK", 0.8)
    }

    fn rates(pairs: &[(i64, &str)]) -> RateMap {
        pairs
            .iter()
            .map(|(rate, value)| (Decimal::from(*rate), amt(value)))
            .collect()
    }

    #[test]
    fn test_tax_from_rate_map_then_subtotal() {
        let r = reconcile(None, None, &rates(&[(24, "1200")]), Some(amt("6200")), "ISK");

        let tax = r.tax.unwrap();
        assert_eq!(tax.amount, Decimal::from(1200));
        assert_eq!(tax.confidence, RATE_SUM_CONFIDENCE);

        let subtotal = r.subtotal.unwrap();
        assert_eq!(subtotal.amount, Decimal::from(5000));
        assert_eq!(subtotal.confidence, DIFFERENCE_CONFIDENCE);
        assert_eq!(subtotal.currency_code, "ISK");
    }

    #[test]
    fn test_rate_sum() {
        let map = rates(&[(25, "40.00"), (15, "12.50")]);
        let r = reconcile(None, None, &map, None, "NOK");
        assert_eq!(r.tax.unwrap().amount, Decimal::from_str("52.50").unwrap());
        assert_eq!(r.subtotal, None);
        assert_eq!(r.total, None);
    }

    #[test]
    fn test_explicit_tax_beats_rate_map() {
        let r = reconcile(None, Some(amt("7")), &rates(&[(24, "1200")]), None, "ISK");
        assert_eq!(r.tax.unwrap().amount, Decimal::from(7));
    }

    #[test]
    fn test_infer_tax() {
        let r = reconcile(Some(amt("100")), None, &RateMap::new(), Some(amt("124")), "ISK");
        let tax = r.tax.unwrap();
        assert_eq!(tax.amount, Decimal::from(24));
        assert_eq!(tax.confidence, DIFFERENCE_CONFIDENCE);
    }

    #[test]
    fn test_small_negative_tax_is_tolerated() {
        let r = reconcile(
            Some(amt("10.01")),
            None,
            &RateMap::new(),
            Some(amt("10.00")),
            "EUR",
        );
        assert_eq!(r.tax.unwrap().amount, Decimal::from_str("-0.01").unwrap());
    }

    #[test]
    fn test_negative_tax_rejected() {
        let r = reconcile(Some(amt("150")), None, &RateMap::new(), Some(amt("124")), "ISK");
        assert_eq!(r.tax, None);
        assert!(r.subtotal.is_some());
        assert!(r.total.is_some());
    }

    #[test]
    fn test_infer_total() {
        let r = reconcile(Some(amt("45.00")), Some(amt("3.60")), &RateMap::new(), None, "USD");
        let total = r.total.unwrap();
        assert_eq!(total.amount, Decimal::from_str("48.60").unwrap());
        assert_eq!(total.confidence, SUM_CONFIDENCE);
        assert_eq!(total.currency_code, "USD");
    }

    #[test]
    fn test_only_total_is_noop() {
        let total = amt("123.45");
        let r = reconcile(None, None, &RateMap::new(), Some(total.clone()), "EUR");
        assert_eq!(
            r,
            Reconciled {
                subtotal: None,
                tax: None,
                total: Some(total)
            }
        );
    }

    #[test]
    fn test_complete_triple_untouched() {
        let (s, t, tot) = (amt("1"), amt("2"), amt("99"));
        let r = reconcile(Some(s.clone()), Some(t.clone()), &RateMap::new(), Some(tot.clone()), "ISK");
        assert_eq!(r, Reconciled { subtotal: Some(s), tax: Some(t), total: Some(tot) });
    }

    #[test]
    fn test_nothing_known() {
        assert_eq!(reconcile(None, None, &RateMap::new(), None, "EUR"), Reconciled::default());
    }

    fn money() -> impl Strategy<Value = Decimal> {
        (0i64..100_000_000).prop_map(|cents| Decimal::new(cents, 2))
    }

    proptest! {
        #[test]
        fn prop_total_is_subtotal_plus_tax(subtotal in money(), tax in money()) {
            let r = reconcile(
                Some(CurrencyAmount::new(subtotal, "EUR", 0.8)),
                Some(CurrencyAmount::new(tax, "EUR", 0.8)),
                &RateMap::new(),
                None,
                "EUR",
            );
            prop_assert_eq!(r.total.map(|t| t.amount), Some(subtotal + tax));
        }

        #[test]
        fn prop_tax_is_rate_map_sum(amounts in prop::collection::vec(money(), 1..6)) {
            let map: RateMap = amounts
                .iter()
                .enumerate()
                .map(|(i, a)| (Decimal::from(i as i64 + 5), CurrencyAmount::new(*a, "EUR", 0.8)))
                .collect();
            let expected: Decimal = amounts.iter().copied().sum();

            let r = reconcile(None, None, &map, None, "EUR");
            prop_assert_eq!(r.tax.map(|t| t.amount), Some(expected));
        }

        #[test]
        fn prop_two_missing_stay_missing(value in money(), which in 0usize..3) {
            let known = Some(CurrencyAmount::new(value, "EUR", 0.8));
            let (subtotal, tax, total) = match which {
                0 => (known, None, None),
                1 => (None, known, None),
                _ => (None, None, known),
            };
            let r = reconcile(subtotal.clone(), tax.clone(), &RateMap::new(), total.clone(), "EUR");
            prop_assert_eq!(r, Reconciled { subtotal, tax, total });
        }
    }
}
