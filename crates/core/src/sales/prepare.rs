//! Request preparation: sanitization, coercion and totals.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use super::error::SaleError;
use super::request::{SaleItemRequest, SaleRequest};
use super::types::{DEFAULT_CURRENCY, SALES_TYPE, SaleDraft, SaleItemDraft, SaleTotals};
use crate::sanitize::{kses_post, sanitize_text_field};

/// Rounds an amount to two places, midpoint away from zero.
#[must_use]
pub fn round_amount(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Normalizes a decimal amount to two places.
#[must_use]
pub fn format_decimal(value: Decimal) -> Decimal {
    round_amount(value)
}

/// Builds the transaction header from a request.
///
/// # Errors
///
/// Returns `SaleError::InvalidDate` when a date is neither empty nor `YYYY-MM-DD`.
pub fn prepare_sale(request: &SaleRequest) -> Result<SaleDraft, SaleError> {
    let currency = request
        .currency
        .as_deref()
        .map_or_else(|| DEFAULT_CURRENCY.to_string(), sanitize_text_field);

    Ok(SaleDraft {
        trans_type: SALES_TYPE.to_string(),
        form_type: sanitize_text_field(&request.form_type),
        account_id: request.account_id,
        status: sanitize_text_field(&request.status),
        user_id: request.customer,
        billing_address: kses_post(&request.billing_address),
        reference: sanitize_text_field(&request.reference),
        issue_date: parse_date("issue_date", &request.issue_date)?,
        due_date: parse_date("due_date", &request.due_date)?,
        summary: kses_post(&request.summary),
        currency,
    })
}

fn parse_date(field: &'static str, raw: &str) -> Result<Option<NaiveDate>, SaleError> {
    let value = sanitize_text_field(raw);
    if value.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| SaleError::InvalidDate(field))
}

/// Builds line items, resolving each tax ID against `tax_rates`.
///
/// # Errors
///
/// Returns `SaleError::InvalidAmount` when a line total overflows.
pub fn prepare_items(
    items: &[SaleItemRequest],
    tax_rates: &HashMap<i64, Decimal>,
) -> Result<Vec<SaleItemDraft>, SaleError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let unit_price = format_decimal(item.unit_price);
            let discount = format_decimal(item.discount).trunc();
            let line_total = unit_price
                .checked_sub(discount)
                .ok_or(SaleError::InvalidAmount("line_total"))?;

            Ok(SaleItemDraft {
                journal_id: item.journal_id,
                product_id: item.product_id,
                account_id: item.account_id,
                description: sanitize_text_field(&item.description),
                qty: item.qty,
                unit_price,
                discount,
                line_total,
                tax: item.tax,
                tax_rate: tax_rates.get(&item.tax).copied().unwrap_or_default(),
                tax_journal: item.tax_journal,
                order: i32::try_from(index).unwrap_or(i32::MAX),
            })
        })
        .collect()
}

/// Reduces line items into transaction totals.
///
/// Taxes are summed from the raw per-item rates.
///
/// # Errors
///
/// Returns `SaleError::InvalidAmount` when a total overflows.
pub fn compute_totals(items: &[SaleItemDraft]) -> Result<SaleTotals, SaleError> {
    let sub_total = checked_sum(items.iter().map(|i| i.line_total), "sub_total")?;
    let tax_total = checked_sum(items.iter().map(|i| i.tax_rate), "tax_total")?;
    let trans_total = sub_total
        .checked_add(tax_total)
        .ok_or(SaleError::InvalidAmount("trans_total"))?;

    Ok(SaleTotals {
        sub_total,
        tax_total,
        trans_total,
        total: trans_total,
    })
}

fn checked_sum(
    mut values: impl Iterator<Item = Decimal>,
    field: &'static str,
) -> Result<Decimal, SaleError> {
    values.try_fold(Decimal::ZERO, |acc, value| {
        acc.checked_add(value).ok_or(SaleError::InvalidAmount(field))
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;

    fn item(unit_price: Decimal, discount: Decimal, tax: i64) -> SaleItemRequest {
        SaleItemRequest {
            unit_price,
            discount,
            tax,
            ..SaleItemRequest::default()
        }
    }

    #[rstest]
    #[case(dec!(10.005), dec!(10.01))]
    #[case(dec!(10.004), dec!(10.00))]
    #[case(dec!(-2.345), dec!(-2.35))]
    #[case(dec!(7), dec!(7))]
    fn test_format_decimal(#[case] input: Decimal, #[case] expected: Decimal) {
        assert_eq!(format_decimal(input), expected);
    }

    #[test]
    fn test_prepare_sale_defaults_and_sanitizes() {
        let request = SaleRequest {
            form_type: " <b>invoice</b> ".to_string(),
            reference: "REF\n42".to_string(),
            billing_address: "<p onclick=\"x()\">1 Main St</p>".to_string(),
            customer: 9,
            ..SaleRequest::default()
        };

        let draft = prepare_sale(&request).unwrap();

        assert_eq!(draft.trans_type, "sales");
        assert_eq!(draft.form_type, "invoice");
        assert_eq!(draft.reference, "REF 42");
        assert_eq!(draft.billing_address, "<p>1 Main St</p>");
        assert_eq!(draft.user_id, 9);
        assert_eq!(draft.currency, "USD");
        assert_eq!(draft.issue_date, None);
    }

    #[test]
    fn test_prepare_sale_parses_dates() {
        let request = SaleRequest {
            issue_date: "2026-03-01".to_string(),
            due_date: "2026-03-31".to_string(),
            ..SaleRequest::default()
        };

        let draft = prepare_sale(&request).unwrap();

        assert_eq!(draft.issue_date, NaiveDate::from_ymd_opt(2026, 3, 1));
        assert_eq!(draft.due_date, NaiveDate::from_ymd_opt(2026, 3, 31));
    }

    #[test]
    fn test_prepare_sale_rejects_bad_date() {
        let request = SaleRequest {
            due_date: "31/03/2026".to_string(),
            ..SaleRequest::default()
        };

        assert!(matches!(
            prepare_sale(&request),
            Err(SaleError::InvalidDate("due_date"))
        ));
    }

    #[test]
    fn test_prepare_items_resolves_tax_and_order() {
        let rates = HashMap::from([(1, dec!(10))]);
        let items = prepare_items(
            &[item(dec!(100), dec!(0), 1), item(dec!(50), dec!(5.9), 2)],
            &rates,
        )
        .unwrap();

        assert_eq!(items[0].tax_rate, dec!(10));
        assert_eq!(items[0].order, 0);
        assert_eq!(items[1].tax_rate, dec!(0));
        assert_eq!(items[1].discount, dec!(5));
        assert_eq!(items[1].line_total, dec!(45));
        assert_eq!(items[1].order, 1);
    }

    #[test]
    fn test_compute_totals_worked_example() {
        let rates = HashMap::from([(1, dec!(10))]);
        let items = prepare_items(
            &[item(dec!(100), dec!(0), 1), item(dec!(50), dec!(5), 0)],
            &rates,
        )
        .unwrap();

        let totals = compute_totals(&items).unwrap();

        assert_eq!(totals.sub_total, dec!(145));
        assert_eq!(totals.tax_total, dec!(10));
        assert_eq!(totals.trans_total, dec!(155));
        assert_eq!(totals.total, dec!(155));
    }

    #[test]
    fn test_compute_totals_empty() {
        assert_eq!(compute_totals(&[]).unwrap(), SaleTotals::default());
    }

    #[test]
    fn test_compute_totals_rejects_overflowing_sub_total() {
        let huge = item(Decimal::MAX, dec!(0), 0);
        let items = prepare_items(&[huge.clone(), huge], &HashMap::new()).unwrap();

        assert_eq!(
            compute_totals(&items),
            Err(SaleError::InvalidAmount("sub_total"))
        );
    }

    #[test]
    fn test_prepare_items_rejects_overflowing_line_total() {
        let result = prepare_items(&[item(Decimal::MAX, Decimal::MIN, 0)], &HashMap::new());

        assert_eq!(result, Err(SaleError::InvalidAmount("line_total")));
    }

    #[test]
    fn test_compute_totals_rejects_overflowing_tax() {
        let rates = HashMap::from([(1, Decimal::MAX)]);
        let items = prepare_items(&[item(dec!(1), dec!(0), 1)], &rates).unwrap();

        assert_eq!(
            compute_totals(&items),
            Err(SaleError::InvalidAmount("trans_total"))
        );
    }
}
