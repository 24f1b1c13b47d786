//! `SeaORM` entity definitions.

pub mod erp_ac_tax;
pub mod erp_ac_transaction_items;
pub mod erp_ac_transactions;
pub mod erp_hr_announcement_recipients;
pub mod erp_hr_announcements;
pub mod erp_hr_employees;
pub mod erp_peoples;
pub mod user_meta;
pub mod users;
