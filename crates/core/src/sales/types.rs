//! Sale transaction domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Transaction type stored for every sale.
pub const SALES_TYPE: &str = "sales";

/// Currency used when a request does not name one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// A persisted sale transaction with its line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    /// Transaction ID.
    pub id: i64,
    /// Transaction type, always `sales` for this resource.
    pub trans_type: String,
    /// Form type (invoice, payment, ...).
    pub form_type: String,
    /// Workflow status.
    pub status: String,
    /// Receivable account.
    pub account_id: i64,
    /// Customer ID (0 when none).
    pub user_id: i64,
    /// Billing address (sanitized rich text).
    pub billing_address: String,
    /// External reference.
    pub reference: String,
    /// Summary (sanitized rich text).
    pub summary: String,
    /// Issue date.
    pub issue_date: Option<NaiveDate>,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// ISO currency code.
    pub currency: String,
    /// Sum of line totals.
    pub sub_total: Decimal,
    /// Grand total.
    pub total: Decimal,
    /// Outstanding amount.
    pub due: Decimal,
    /// Sub total plus taxes.
    pub trans_total: Decimal,
    /// Sequential invoice number (0 when unassigned).
    pub invoice_number: i64,
    /// Invoice format template, e.g. `INV-{5}`.
    pub invoice_format: String,
    /// Parent transaction (0 when none).
    pub parent: i64,
    /// Creating user.
    pub created_by: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Line items in display order.
    pub items: Vec<SaleItem>,
}

/// A persisted line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleItem {
    /// Item ID.
    pub id: i64,
    /// Journal entry ID.
    pub journal_id: i64,
    /// Product ID.
    pub product_id: i64,
    /// Income account.
    pub account_id: i64,
    /// Description.
    pub description: String,
    /// Quantity.
    pub qty: i64,
    /// Unit price.
    pub unit_price: Decimal,
    /// Discount amount.
    pub discount: Decimal,
    /// Tax ID.
    pub tax: i64,
    /// Tax rate resolved from the tax ID.
    pub tax_rate: Decimal,
    /// Tax journal entry ID.
    pub tax_journal: i64,
    /// `unit_price - discount`.
    pub line_total: Decimal,
    /// Display position.
    pub order: i32,
}

/// Sanitized transaction header ready for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleDraft {
    /// Transaction type.
    pub trans_type: String,
    /// Form type.
    pub form_type: String,
    /// Account ID.
    pub account_id: i64,
    /// Status.
    pub status: String,
    /// Customer ID.
    pub user_id: i64,
    /// Billing address.
    pub billing_address: String,
    /// Reference.
    pub reference: String,
    /// Issue date.
    pub issue_date: Option<NaiveDate>,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Summary.
    pub summary: String,
    /// Currency.
    pub currency: String,
}

/// Sanitized line item ready for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleItemDraft {
    /// Journal entry ID.
    pub journal_id: i64,
    /// Product ID.
    pub product_id: i64,
    /// Account ID.
    pub account_id: i64,
    /// Description.
    pub description: String,
    /// Quantity.
    pub qty: i64,
    /// Unit price, rounded to two places.
    pub unit_price: Decimal,
    /// Discount, truncated to a whole amount.
    pub discount: Decimal,
    /// `unit_price - discount`.
    pub line_total: Decimal,
    /// Tax ID.
    pub tax: i64,
    /// Looked-up tax rate (0 when unknown).
    pub tax_rate: Decimal,
    /// Tax journal entry ID.
    pub tax_journal: i64,
    /// Display position.
    pub order: i32,
}

/// Totals reduced over a sale's line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SaleTotals {
    /// Σ line_total.
    pub sub_total: Decimal,
    /// Σ tax_rate.
    pub tax_total: Decimal,
    /// sub_total + tax_total.
    pub trans_total: Decimal,
    /// Equal to trans_total.
    pub total: Decimal,
}

/// A complete write handed to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleWrite {
    /// Existing transaction to overwrite, `None` to insert.
    pub id: Option<i64>,
    /// Header.
    pub sale: SaleDraft,
    /// Items, replacing any existing ones.
    pub items: Vec<SaleItemDraft>,
    /// Computed totals.
    pub totals: SaleTotals,
    /// Acting user.
    pub created_by: i64,
}

/// Customer data exposed through `include=customer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Customer ID.
    pub id: i64,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Company.
    pub company: String,
    /// Email.
    pub email: String,
    /// Phone.
    pub phone: String,
    /// Billing address.
    pub billing_address: String,
}

/// User projection exposed through `include=created_by`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// User ID.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Display name.
    pub name: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email.
    pub email: String,
}
