//! Persistence seams for sales.
//!
//! These traits are implemented by the db crate.

use std::collections::HashMap;

use erp_shared::types::PageRequest;
use rust_decimal::Decimal;

use super::types::{Customer, Sale, SaleWrite, UserSummary};
use crate::store::StoreError;

/// Transaction persistence.
pub trait SaleStore: Send + Sync {
    /// List a page of transactions of `trans_type`, items joined, newest ID first.
    fn list(
        &self,
        trans_type: &str,
        page: PageRequest,
    ) -> impl std::future::Future<Output = Result<Vec<Sale>, StoreError>> + Send;

    /// Count transactions of `trans_type`.
    fn count(
        &self,
        trans_type: &str,
    ) -> impl std::future::Future<Output = Result<u64, StoreError>> + Send;

    /// Find a transaction with its items.
    fn find(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<Sale>, StoreError>> + Send;

    /// Insert or overwrite a transaction and replace its items. Returns the ID.
    fn save(
        &self,
        write: SaleWrite,
    ) -> impl std::future::Future<Output = Result<i64, StoreError>> + Send;

    /// Remove a transaction and its items.
    fn remove(&self, id: i64) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Tax rates keyed by tax ID.
    fn tax_rates(
        &self,
    ) -> impl std::future::Future<Output = Result<HashMap<i64, Decimal>, StoreError>> + Send;
}

/// Lookups for the `include` sub-resources.
pub trait PeopleDirectory: Send + Sync {
    /// Find a customer.
    fn customer(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<Customer>, StoreError>> + Send;

    /// Find a user.
    fn user(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<UserSummary>, StoreError>> + Send;
}
