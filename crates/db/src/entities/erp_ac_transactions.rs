//! `SeaORM` Entity for erp_ac_transactions table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "erp_ac_transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "type")]
    pub trans_type: String,
    pub form_type: String,
    pub status: String,
    pub account_id: i64,
    pub user_id: i64,
    #[sea_orm(column_type = "Text")]
    pub billing_address: String,
    #[sea_orm(column_name = "ref")]
    pub reference: String,
    #[sea_orm(column_type = "Text")]
    pub summary: String,
    pub issue_date: Option<Date>,
    pub due_date: Option<Date>,
    pub currency: String,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub sub_total: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub total: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub due: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub trans_total: Decimal,
    pub invoice_number: i64,
    pub invoice_format: String,
    pub parent: i64,
    pub created_by: i64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::erp_ac_transaction_items::Entity")]
    Items,
}

impl Related<super::erp_ac_transaction_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
