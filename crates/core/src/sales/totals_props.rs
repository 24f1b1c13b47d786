//! Property-based tests for sale totals.
//!
//! - Sub total is the sum of `unit_price - discount`
//! - Transaction total is sub total plus the summed tax rates
//! - Total always equals transaction total

use std::collections::HashMap;

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::prepare::{compute_totals, prepare_items};
use super::request::SaleItemRequest;

/// Strategy for amounts between 0.00 and 10,000.00.
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for a line item referencing one of three taxes (0 = none).
fn item() -> impl Strategy<Value = SaleItemRequest> {
    (amount(), amount(), 0i64..4).prop_map(|(unit_price, discount, tax)| SaleItemRequest {
        unit_price,
        discount,
        tax,
        qty: 1,
        ..SaleItemRequest::default()
    })
}

fn tax_rates() -> HashMap<i64, Decimal> {
    HashMap::from([
        (1, Decimal::new(5, 0)),
        (2, Decimal::new(125, 1)),
        (3, Decimal::new(20, 0)),
    ])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_sub_total_is_sum_of_line_totals(items in prop::collection::vec(item(), 0..20)) {
        let prepared = prepare_items(&items, &tax_rates()).unwrap();
        let totals = compute_totals(&prepared).unwrap();

        let expected: Decimal = prepared.iter().map(|i| i.unit_price - i.discount).sum();
        prop_assert_eq!(totals.sub_total, expected);
    }

    #[test]
    fn prop_trans_total_adds_raw_tax_rates(items in prop::collection::vec(item(), 0..20)) {
        let rates = tax_rates();
        let prepared = prepare_items(&items, &rates).unwrap();
        let totals = compute_totals(&prepared).unwrap();

        let taxes: Decimal = items
            .iter()
            .map(|i| rates.get(&i.tax).copied().unwrap_or_default())
            .sum();

        prop_assert_eq!(totals.tax_total, taxes);
        prop_assert_eq!(totals.trans_total, totals.sub_total + taxes);
        prop_assert_eq!(totals.total, totals.trans_total);
    }

    #[test]
    fn prop_items_keep_request_order(items in prop::collection::vec(item(), 1..20)) {
        let prepared = prepare_items(&items, &tax_rates()).unwrap();

        for (index, item) in prepared.iter().enumerate() {
            prop_assert_eq!(usize::try_from(item.order).unwrap(), index);
        }
    }
}
