//! Sale repository for database operations.
//!
//! Implements the sales store over `erp_ac_transactions` and
//! `erp_ac_transaction_items` using SeaORM.

use std::collections::HashMap;

use chrono::Utc;
use erp_core::StoreError;
use erp_core::sales::{Sale, SaleItem, SaleItemDraft, SaleStore, SaleWrite};
use erp_shared::types::PageRequest;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::entities::{erp_ac_tax, erp_ac_transaction_items, erp_ac_transactions};

/// Store error code for unknown transactions.
pub const TRANSACTION_NOT_FOUND: &str = "erp_ac_transaction_not_found";

/// Sale repository implementation.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    db: DatabaseConnection,
    invoice_format: String,
}

impl SaleRepository {
    /// Create a new sale repository. New sales get `invoice_format`.
    #[must_use]
    pub fn new(db: DatabaseConnection, invoice_format: impl Into<String>) -> Self {
        Self {
            db,
            invoice_format: invoice_format.into(),
        }
    }

    async fn items_for<C: ConnectionTrait>(
        db: &C,
        ids: Vec<i64>,
    ) -> Result<HashMap<i64, Vec<SaleItem>>, DbErr> {
        let rows = erp_ac_transaction_items::Entity::find()
            .filter(erp_ac_transaction_items::Column::TransactionId.is_in(ids))
            .order_by_asc(erp_ac_transaction_items::Column::ItemOrder)
            .order_by_asc(erp_ac_transaction_items::Column::Id)
            .all(db)
            .await?;

        let mut grouped: HashMap<i64, Vec<SaleItem>> = HashMap::new();
        for row in rows {
            grouped
                .entry(row.transaction_id)
                .or_default()
                .push(item_to_domain(row));
        }
        Ok(grouped)
    }

    async fn next_invoice_number<C: ConnectionTrait>(
        db: &C,
        trans_type: &str,
    ) -> Result<i64, DbErr> {
        let max: Option<Option<i64>> = erp_ac_transactions::Entity::find()
            .select_only()
            .column_as(Expr::col(erp_ac_transactions::Column::InvoiceNumber).max(), "max_invoice")
            .filter(erp_ac_transactions::Column::TransType.eq(trans_type))
            .into_tuple()
            .one(db)
            .await?;

        Ok(max.flatten().unwrap_or(0) + 1)
    }

    async fn write(&self, write: SaleWrite) -> Result<i64, DbErr> {
        let txn = self.db.begin().await?;
        let header = write.sale;
        let totals = write.totals;

        let id = if let Some(id) = write.id {
            erp_ac_transactions::ActiveModel {
                id: Set(id),
                trans_type: Set(header.trans_type),
                form_type: Set(header.form_type),
                status: Set(header.status),
                account_id: Set(header.account_id),
                user_id: Set(header.user_id),
                billing_address: Set(header.billing_address),
                reference: Set(header.reference),
                summary: Set(header.summary),
                issue_date: Set(header.issue_date),
                due_date: Set(header.due_date),
                currency: Set(header.currency),
                sub_total: Set(totals.sub_total),
                total: Set(totals.total),
                due: Set(totals.total),
                trans_total: Set(totals.trans_total),
                ..Default::default()
            }
            .update(&txn)
            .await?;

            erp_ac_transaction_items::Entity::delete_many()
                .filter(erp_ac_transaction_items::Column::TransactionId.eq(id))
                .exec(&txn)
                .await?;

            id
        } else {
            let invoice_number = Self::next_invoice_number(&txn, &header.trans_type).await?;

            let model = erp_ac_transactions::ActiveModel {
                trans_type: Set(header.trans_type),
                form_type: Set(header.form_type),
                status: Set(header.status),
                account_id: Set(header.account_id),
                user_id: Set(header.user_id),
                billing_address: Set(header.billing_address),
                reference: Set(header.reference),
                summary: Set(header.summary),
                issue_date: Set(header.issue_date),
                due_date: Set(header.due_date),
                currency: Set(header.currency),
                sub_total: Set(totals.sub_total),
                total: Set(totals.total),
                due: Set(totals.total),
                trans_total: Set(totals.trans_total),
                invoice_number: Set(invoice_number),
                invoice_format: Set(self.invoice_format.clone()),
                parent: Set(0),
                created_by: Set(write.created_by),
                created_at: Set(Utc::now().into()),
                ..Default::default()
            }
            .insert(&txn)
            .await?;

            model.id
        };

        if !write.items.is_empty() {
            erp_ac_transaction_items::Entity::insert_many(
                write.items.into_iter().map(|item| item_to_active(id, item)),
            )
            .exec(&txn)
            .await?;
        }

        txn.commit().await?;
        Ok(id)
    }

    async fn delete(&self, id: i64) -> Result<u64, DbErr> {
        let txn = self.db.begin().await?;

        erp_ac_transaction_items::Entity::delete_many()
            .filter(erp_ac_transaction_items::Column::TransactionId.eq(id))
            .exec(&txn)
            .await?;

        let result = erp_ac_transactions::Entity::delete_by_id(id)
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(result.rows_affected)
    }
}

fn backend(err: &DbErr) -> StoreError {
    tracing::error!(error = %err, "sale store failure");
    StoreError::backend(err.to_string())
}

fn not_found() -> StoreError {
    StoreError::new(404, TRANSACTION_NOT_FOUND, "Transaction not found.")
}

fn item_to_active(transaction_id: i64, item: SaleItemDraft) -> erp_ac_transaction_items::ActiveModel {
    erp_ac_transaction_items::ActiveModel {
        transaction_id: Set(transaction_id),
        journal_id: Set(item.journal_id),
        product_id: Set(item.product_id),
        account_id: Set(item.account_id),
        description: Set(item.description),
        qty: Set(item.qty),
        unit_price: Set(item.unit_price),
        discount: Set(item.discount),
        tax: Set(item.tax),
        tax_rate: Set(item.tax_rate),
        tax_journal: Set(item.tax_journal),
        line_total: Set(item.line_total),
        item_order: Set(item.order),
        ..Default::default()
    }
}

fn item_to_domain(row: erp_ac_transaction_items::Model) -> SaleItem {
    SaleItem {
        id: row.id,
        journal_id: row.journal_id,
        product_id: row.product_id,
        account_id: row.account_id,
        description: row.description,
        qty: row.qty,
        unit_price: row.unit_price,
        discount: row.discount,
        tax: row.tax,
        tax_rate: row.tax_rate,
        tax_journal: row.tax_journal,
        line_total: row.line_total,
        order: row.item_order,
    }
}

fn to_domain(row: erp_ac_transactions::Model, items: Vec<SaleItem>) -> Sale {
    Sale {
        id: row.id,
        trans_type: row.trans_type,
        form_type: row.form_type,
        status: row.status,
        account_id: row.account_id,
        user_id: row.user_id,
        billing_address: row.billing_address,
        reference: row.reference,
        summary: row.summary,
        issue_date: row.issue_date,
        due_date: row.due_date,
        currency: row.currency,
        sub_total: row.sub_total,
        total: row.total,
        due: row.due,
        trans_total: row.trans_total,
        invoice_number: row.invoice_number,
        invoice_format: row.invoice_format,
        parent: row.parent,
        created_by: row.created_by,
        created_at: row.created_at.with_timezone(&Utc),
        items,
    }
}

impl SaleStore for SaleRepository {
    async fn list(&self, trans_type: &str, page: PageRequest) -> Result<Vec<Sale>, StoreError> {
        let rows = erp_ac_transactions::Entity::find()
            .filter(erp_ac_transactions::Column::TransType.eq(trans_type))
            .order_by_desc(erp_ac_transactions::Column::Id)
            .limit(page.limit())
            .offset(page.offset())
            .all(&self.db)
            .await
            .map_err(|e| backend(&e))?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids = rows.iter().map(|r| r.id).collect();
        let mut items = Self::items_for(&self.db, ids)
            .await
            .map_err(|e| backend(&e))?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let row_items = items.remove(&row.id).unwrap_or_default();
                to_domain(row, row_items)
            })
            .collect())
    }

    async fn count(&self, trans_type: &str) -> Result<u64, StoreError> {
        erp_ac_transactions::Entity::find()
            .filter(erp_ac_transactions::Column::TransType.eq(trans_type))
            .count(&self.db)
            .await
            .map_err(|e| backend(&e))
    }

    async fn find(&self, id: i64) -> Result<Option<Sale>, StoreError> {
        let Some(row) = erp_ac_transactions::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| backend(&e))?
        else {
            return Ok(None);
        };

        let mut items = Self::items_for(&self.db, vec![id])
            .await
            .map_err(|e| backend(&e))?;

        Ok(Some(to_domain(row, items.remove(&id).unwrap_or_default())))
    }

    async fn save(&self, write: SaleWrite) -> Result<i64, StoreError> {
        let target = write.id;
        match self.write(write).await {
            Ok(id) => {
                tracing::info!(sale_id = id, updated = target.is_some(), "sale saved");
                Ok(id)
            }
            Err(DbErr::RecordNotUpdated) => Err(not_found()),
            Err(e) => Err(backend(&e)),
        }
    }

    async fn remove(&self, id: i64) -> Result<(), StoreError> {
        let removed = self.delete(id).await.map_err(|e| backend(&e))?;
        if removed == 0 {
            return Err(not_found());
        }

        tracing::info!(sale_id = id, "sale removed");
        Ok(())
    }

    async fn tax_rates(&self) -> Result<HashMap<i64, Decimal>, StoreError> {
        let taxes = erp_ac_tax::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| backend(&e))?;

        Ok(taxes.into_iter().map(|t| (t.id, t.rate)).collect())
    }
}

#[cfg(test)]
#[path = "sale_tests.rs"]
mod tests;
