//! Sale transactions.
//!
//! This module implements the sales resource:
//! - Lenient request coercion and sanitization
//! - Line item preparation and totals
//! - Invoice number formatting
//! - Response projections and schema
//! - The sales service over a pluggable store

pub mod error;
pub mod invoice;
pub mod lenient;
pub mod prepare;
pub mod request;
pub mod response;
pub mod schema;
pub mod service;
pub mod store;
pub mod types;

#[cfg(test)]
mod totals_props;

pub use error::SaleError;
pub use invoice::format_invoice_number;
pub use prepare::{compute_totals, format_decimal, prepare_items, prepare_sale};
pub use request::{SaleItemRequest, SaleRequest};
pub use response::{Include, SaleItemResponse, SaleResponse};
pub use schema::item_schema;
pub use service::{SALES_PATH, SalesService};
pub use store::{PeopleDirectory, SaleStore};
pub use types::{
    Customer, DEFAULT_CURRENCY, SALES_TYPE, Sale, SaleDraft, SaleItem, SaleItemDraft, SaleTotals,
    SaleWrite, UserSummary,
};
