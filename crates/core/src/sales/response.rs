//! Wire projections of sales.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use super::invoice::format_invoice_number;
use super::types::{Customer, Sale, SaleItem, UserSummary};

/// Optional sub-resources requested through `include`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Include {
    /// Inline the customer.
    pub customer: bool,
    /// Inline the creating user.
    pub created_by: bool,
}

impl Include {
    /// Parses a comma-separated include list; spaces are ignored.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };

        let cleaned = raw.replace(' ', "");
        let mut include = Self::default();
        for part in cleaned.split(',') {
            match part {
                "customer" => include.customer = true,
                "created_by" => include.created_by = true,
                _ => {}
            }
        }
        include
    }
}

/// A sale as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleResponse {
    /// Transaction ID.
    pub id: i64,
    /// Form type.
    pub form_type: String,
    /// Status.
    pub status: String,
    /// Billing address.
    pub billing_address: String,
    /// Reference.
    pub reference: String,
    /// Summary.
    pub summary: String,
    /// Issue date (`YYYY-MM-DD`, empty when unset).
    pub issue_date: String,
    /// Due date (`YYYY-MM-DD`, empty when unset).
    pub due_date: String,
    /// Currency.
    pub currency: String,
    /// Line items.
    pub items: Vec<SaleItemResponse>,
    /// Sub total.
    pub sub_total: f64,
    /// Total.
    pub total: f64,
    /// Amount due.
    pub due: f64,
    /// Transaction total.
    pub trans_total: f64,
    /// Formatted invoice number.
    pub invoice: String,
    /// Parent transaction.
    pub parent: i64,
    /// Creation time (RFC 3339).
    pub created_at: String,
    /// Customer, present only when included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<Option<Customer>>,
    /// Creator, present only when included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Option<UserSummary>>,
    /// Hypermedia links.
    #[serde(rename = "_links")]
    pub links: SaleLinks,
}

/// A line item as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleItemResponse {
    /// Item ID.
    pub id: i64,
    /// Journal entry ID.
    pub journal_id: i64,
    /// Product ID.
    pub product_id: i64,
    /// Description.
    pub description: String,
    /// Quantity.
    pub qty: i64,
    /// Unit price.
    pub unit_price: f64,
    /// Discount.
    pub discount: f64,
    /// Tax ID.
    pub tax: f64,
    /// Tax rate.
    pub tax_rate: f64,
    /// Tax journal entry ID.
    pub tax_journal: f64,
    /// Line total.
    pub line_total: f64,
    /// Display position.
    pub order: i32,
}

/// `_links` of a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleLinks {
    /// Link to the sale itself.
    #[serde(rename = "self")]
    pub self_link: Vec<Link>,
    /// Link to the collection.
    pub collection: Vec<Link>,
}

/// A single hypermedia link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Target URL.
    pub href: String,
}

fn to_float(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

#[allow(clippy::cast_precision_loss)]
fn id_to_float(value: i64) -> f64 {
    value as f64
}

impl SaleItemResponse {
    /// Projects a stored line item.
    #[must_use]
    pub fn from_item(item: &SaleItem) -> Self {
        Self {
            id: item.id,
            journal_id: item.journal_id,
            product_id: item.product_id,
            description: item.description.clone(),
            qty: item.qty,
            unit_price: to_float(item.unit_price),
            discount: to_float(item.discount),
            tax: id_to_float(item.tax),
            tax_rate: to_float(item.tax_rate),
            tax_journal: id_to_float(item.tax_journal),
            line_total: to_float(item.line_total),
            order: item.order,
        }
    }
}

impl SaleResponse {
    /// Projects a stored sale. `collection_url` is the absolute URL of the
    /// sales collection.
    #[must_use]
    pub fn from_sale(sale: &Sale, collection_url: &str) -> Self {
        Self {
            id: sale.id,
            form_type: sale.form_type.clone(),
            status: sale.status.clone(),
            billing_address: sale.billing_address.clone(),
            reference: sale.reference.clone(),
            summary: sale.summary.clone(),
            issue_date: sale.issue_date.map(|d| d.to_string()).unwrap_or_default(),
            due_date: sale.due_date.map(|d| d.to_string()).unwrap_or_default(),
            currency: sale.currency.clone(),
            items: sale.items.iter().map(SaleItemResponse::from_item).collect(),
            sub_total: to_float(sale.sub_total),
            total: to_float(sale.total),
            due: to_float(sale.due),
            trans_total: to_float(sale.trans_total),
            invoice: format_invoice_number(sale.invoice_number, &sale.invoice_format),
            parent: sale.parent,
            created_at: sale.created_at.to_rfc3339(),
            customer: None,
            created_by: None,
            links: SaleLinks {
                self_link: vec![Link {
                    href: format!("{collection_url}/{}", sale.id),
                }],
                collection: vec![Link {
                    href: collection_url.to_string(),
                }],
            },
        }
    }
}
