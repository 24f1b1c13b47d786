//! Sales service implementation.

use std::sync::Arc;

use erp_shared::types::{PageRequest, PageResponse};

use super::error::SaleError;
use super::prepare::{compute_totals, prepare_items, prepare_sale};
use super::request::SaleRequest;
use super::response::{Include, SaleResponse};
use super::store::{PeopleDirectory, SaleStore};
use super::types::{SALES_TYPE, Sale, SaleWrite};
use crate::context::RequestContext;

/// Path of the sales collection below the public base URL.
pub const SALES_PATH: &str = "/erp/accounting/sales";

/// Sales service: list, read, create, update and delete sales.
pub struct SalesService<S: SaleStore, P: PeopleDirectory> {
    store: Arc<S>,
    people: Arc<P>,
    collection_url: String,
}

impl<S: SaleStore, P: PeopleDirectory> SalesService<S, P> {
    /// Create a new sales service. `public_url` is the externally visible
    /// base URL used for `Location` headers and links.
    #[must_use]
    pub fn new(store: Arc<S>, people: Arc<P>, public_url: &str) -> Self {
        Self {
            store,
            people,
            collection_url: format!("{}{SALES_PATH}", public_url.trim_end_matches('/')),
        }
    }

    /// Absolute URL of a single sale.
    #[must_use]
    pub fn resource_url(&self, id: i64) -> String {
        format!("{}/{id}", self.collection_url)
    }

    /// List a page of sales, newest first.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn list(
        &self,
        page: PageRequest,
        include: Include,
    ) -> Result<PageResponse<SaleResponse>, SaleError> {
        let sales = self.store.list(SALES_TYPE, page).await?;
        let total = self.store.count(SALES_TYPE).await?;

        let mut data = Vec::with_capacity(sales.len());
        for sale in &sales {
            data.push(self.project(sale, include).await?);
        }

        Ok(PageResponse::new(data, page, total))
    }

    /// Get one sale.
    ///
    /// # Errors
    ///
    /// Returns `SaleError::InvalidId` (404) when `id` is 0 or unknown.
    pub async fn get(&self, id: i64, include: Include) -> Result<SaleResponse, SaleError> {
        if id == 0 {
            return Err(SaleError::not_found());
        }

        let sale = self
            .store
            .find(id)
            .await?
            .ok_or_else(SaleError::not_found)?;

        self.project(&sale, include).await
    }

    /// Create a sale from a request.
    ///
    /// # Errors
    ///
    /// Returns `SaleError::InvalidDate` for malformed dates,
    /// `SaleError::InvalidAmount` when totals overflow, and propagates store
    /// failures verbatim.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        request: &SaleRequest,
        include: Include,
    ) -> Result<SaleResponse, SaleError> {
        self.write(ctx, None, request, include).await
    }

    /// Overwrite an existing sale, replacing its items.
    ///
    /// # Errors
    ///
    /// Returns `SaleError::InvalidId` (400) when `id` does not resolve, and
    /// otherwise fails like [`Self::create`].
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: i64,
        request: &SaleRequest,
        include: Include,
    ) -> Result<SaleResponse, SaleError> {
        if id == 0 || self.store.find(id).await?.is_none() {
            return Err(SaleError::invalid_target());
        }

        self.write(ctx, Some(id), request, include).await
    }

    /// Delete a sale.
    ///
    /// # Errors
    ///
    /// Propagates the store's error, including its not-found error.
    pub async fn delete(&self, id: i64) -> Result<(), SaleError> {
        self.store.remove(id).await?;
        Ok(())
    }

    async fn write(
        &self,
        ctx: &RequestContext,
        id: Option<i64>,
        request: &SaleRequest,
        include: Include,
    ) -> Result<SaleResponse, SaleError> {
        let sale = prepare_sale(request)?;
        let tax_rates = self.store.tax_rates().await?;
        let items = prepare_items(&request.items, &tax_rates)?;
        let totals = compute_totals(&items)?;

        let id = self
            .store
            .save(SaleWrite {
                id,
                sale,
                items,
                totals,
                created_by: ctx.user_id(),
            })
            .await?;

        let saved = self.store.find(id).await?.ok_or(SaleError::Missing(id))?;
        self.project(&saved, include).await
    }

    async fn project(&self, sale: &Sale, include: Include) -> Result<SaleResponse, SaleError> {
        let mut response = SaleResponse::from_sale(sale, &self.collection_url);

        if include.customer {
            let customer = if sale.user_id == 0 {
                None
            } else {
                self.people.customer(sale.user_id).await?
            };
            response.customer = Some(customer);
        }

        if include.created_by {
            response.created_by = Some(self.people.user(sale.created_by).await?);
        }

        Ok(response)
    }
}
