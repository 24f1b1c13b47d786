//! Typed request payloads for sale create and update.

use rust_decimal::Decimal;
use serde::Deserialize;

use super::lenient;

/// Body of `POST /erp/accounting/sales` and `PUT /erp/accounting/sales/{id}`.
///
/// Every field is optional on the wire; absent fields take their empty value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SaleRequest {
    /// Form type.
    #[serde(deserialize_with = "lenient::text")]
    pub form_type: String,
    /// Account ID.
    #[serde(deserialize_with = "lenient::int")]
    pub account_id: i64,
    /// Status.
    #[serde(deserialize_with = "lenient::text")]
    pub status: String,
    /// Customer ID.
    #[serde(deserialize_with = "lenient::int")]
    pub customer: i64,
    /// Billing address (rich text).
    #[serde(deserialize_with = "lenient::text")]
    pub billing_address: String,
    /// External reference.
    #[serde(deserialize_with = "lenient::text")]
    pub reference: String,
    /// Issue date, `YYYY-MM-DD`.
    #[serde(deserialize_with = "lenient::text")]
    pub issue_date: String,
    /// Due date, `YYYY-MM-DD`.
    #[serde(deserialize_with = "lenient::text")]
    pub due_date: String,
    /// Summary (rich text).
    #[serde(deserialize_with = "lenient::text")]
    pub summary: String,
    /// Currency; defaults to USD when absent.
    #[serde(deserialize_with = "lenient::optional_text")]
    pub currency: Option<String>,
    /// Line items.
    pub items: Vec<SaleItemRequest>,
}

/// One line item of a [`SaleRequest`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SaleItemRequest {
    /// Journal entry ID.
    #[serde(deserialize_with = "lenient::int")]
    pub journal_id: i64,
    /// Account ID.
    #[serde(deserialize_with = "lenient::int")]
    pub account_id: i64,
    /// Product ID.
    #[serde(deserialize_with = "lenient::int")]
    pub product_id: i64,
    /// Description.
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    /// Quantity.
    #[serde(deserialize_with = "lenient::int")]
    pub qty: i64,
    /// Unit price.
    #[serde(deserialize_with = "lenient::decimal")]
    pub unit_price: Decimal,
    /// Discount.
    #[serde(deserialize_with = "lenient::decimal")]
    pub discount: Decimal,
    /// Tax ID.
    #[serde(deserialize_with = "lenient::int")]
    pub tax: i64,
    /// Tax journal entry ID.
    #[serde(deserialize_with = "lenient::int")]
    pub tax_journal: i64,
}
