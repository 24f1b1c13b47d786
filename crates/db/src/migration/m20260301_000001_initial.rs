//! Initial database migration.
//!
//! Creates users, preferences, people, taxes and the accounting
//! transaction tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: USERS & PREFERENCES
        // ============================================================
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(USER_META_SQL).await?;

        // ============================================================
        // PART 2: ACCOUNTING
        // ============================================================
        db.execute_unprepared(PEOPLES_SQL).await?;
        db.execute_unprepared(TAX_SQL).await?;
        db.execute_unprepared(TRANSACTIONS_SQL).await?;
        db.execute_unprepared(TRANSACTION_ITEMS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const USERS_SQL: &str = r"
CREATE TABLE users (
    id BIGSERIAL PRIMARY KEY,
    user_login VARCHAR(60) NOT NULL UNIQUE,
    display_name VARCHAR(250) NOT NULL DEFAULT '',
    first_name VARCHAR(100) NOT NULL DEFAULT '',
    last_name VARCHAR(100) NOT NULL DEFAULT '',
    email VARCHAR(255) NOT NULL DEFAULT '',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const USER_META_SQL: &str = r"
CREATE TABLE user_meta (
    user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    meta_key VARCHAR(255) NOT NULL,
    meta_value TEXT NOT NULL DEFAULT '',
    PRIMARY KEY (user_id, meta_key)
);
";

const PEOPLES_SQL: &str = r"
CREATE TABLE erp_peoples (
    id BIGSERIAL PRIMARY KEY,
    people_type VARCHAR(20) NOT NULL DEFAULT 'customer',
    first_name VARCHAR(60) NOT NULL DEFAULT '',
    last_name VARCHAR(60) NOT NULL DEFAULT '',
    company VARCHAR(100) NOT NULL DEFAULT '',
    email VARCHAR(100) NOT NULL DEFAULT '',
    phone VARCHAR(20) NOT NULL DEFAULT '',
    billing_address TEXT NOT NULL DEFAULT ''
);

CREATE INDEX idx_erp_peoples_type ON erp_peoples(people_type);
";

const TAX_SQL: &str = r"
CREATE TABLE erp_ac_tax (
    id BIGSERIAL PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    rate NUMERIC(10, 4) NOT NULL DEFAULT 0
);
";

const TRANSACTIONS_SQL: &str = r"
CREATE TABLE erp_ac_transactions (
    id BIGSERIAL PRIMARY KEY,
    type VARCHAR(10) NOT NULL,
    form_type VARCHAR(20) NOT NULL DEFAULT '',
    status VARCHAR(30) NOT NULL DEFAULT '',
    account_id BIGINT NOT NULL DEFAULT 0,
    user_id BIGINT NOT NULL DEFAULT 0,
    billing_address TEXT NOT NULL DEFAULT '',
    ref VARCHAR(50) NOT NULL DEFAULT '',
    summary TEXT NOT NULL DEFAULT '',
    issue_date DATE,
    due_date DATE,
    currency VARCHAR(10) NOT NULL DEFAULT 'USD',
    sub_total NUMERIC(19, 4) NOT NULL DEFAULT 0,
    total NUMERIC(19, 4) NOT NULL DEFAULT 0,
    due NUMERIC(19, 4) NOT NULL DEFAULT 0,
    trans_total NUMERIC(19, 4) NOT NULL DEFAULT 0,
    invoice_number BIGINT NOT NULL DEFAULT 0,
    invoice_format VARCHAR(50) NOT NULL DEFAULT '',
    parent BIGINT NOT NULL DEFAULT 0,
    created_by BIGINT NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- List endpoint: newest first within a type
CREATE INDEX idx_erp_ac_transactions_type ON erp_ac_transactions(type, id DESC);
";

const TRANSACTION_ITEMS_SQL: &str = r"
CREATE TABLE erp_ac_transaction_items (
    id BIGSERIAL PRIMARY KEY,
    transaction_id BIGINT NOT NULL REFERENCES erp_ac_transactions(id) ON DELETE CASCADE,
    journal_id BIGINT NOT NULL DEFAULT 0,
    product_id BIGINT NOT NULL DEFAULT 0,
    account_id BIGINT NOT NULL DEFAULT 0,
    description TEXT NOT NULL DEFAULT '',
    qty BIGINT NOT NULL DEFAULT 0,
    unit_price NUMERIC(19, 4) NOT NULL DEFAULT 0,
    discount NUMERIC(19, 4) NOT NULL DEFAULT 0,
    tax BIGINT NOT NULL DEFAULT 0,
    tax_rate NUMERIC(19, 4) NOT NULL DEFAULT 0,
    tax_journal BIGINT NOT NULL DEFAULT 0,
    line_total NUMERIC(19, 4) NOT NULL DEFAULT 0,
    item_order INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX idx_erp_ac_transaction_items_tx ON erp_ac_transaction_items(transaction_id, item_order);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS erp_ac_transaction_items CASCADE;
DROP TABLE IF EXISTS erp_ac_transactions CASCADE;
DROP TABLE IF EXISTS erp_ac_tax CASCADE;
DROP TABLE IF EXISTS erp_peoples CASCADE;
DROP TABLE IF EXISTS user_meta CASCADE;
DROP TABLE IF EXISTS users CASCADE;
";
