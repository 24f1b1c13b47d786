//! HR migration for the dashboard widgets.
//!
//! Creates employees, announcements and announcement recipients.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(HR_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS erp_hr_announcement_recipients CASCADE;
             DROP TABLE IF EXISTS erp_hr_announcements CASCADE;
             DROP TABLE IF EXISTS erp_hr_employees CASCADE;",
        )
        .await?;
        Ok(())
    }
}

const HR_SQL: &str = r"
CREATE TABLE erp_hr_employees (
    id BIGSERIAL PRIMARY KEY,
    user_id BIGINT NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
    first_name VARCHAR(100) NOT NULL DEFAULT '',
    last_name VARCHAR(100) NOT NULL DEFAULT '',
    date_of_birth DATE,
    avatar_url TEXT NOT NULL DEFAULT '',
    status VARCHAR(20) NOT NULL DEFAULT 'active'
);

-- Birthday lookups scan active employees with a known birth date
CREATE INDEX idx_erp_hr_employees_birthday
    ON erp_hr_employees(status) WHERE date_of_birth IS NOT NULL;

CREATE TABLE erp_hr_announcements (
    id BIGSERIAL PRIMARY KEY,
    title VARCHAR(255) NOT NULL,
    content TEXT NOT NULL DEFAULT '',
    published_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE erp_hr_announcement_recipients (
    id BIGSERIAL PRIMARY KEY,
    user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    post_id BIGINT NOT NULL REFERENCES erp_hr_announcements(id) ON DELETE CASCADE,
    status VARCHAR(10) NOT NULL DEFAULT 'unread',
    UNIQUE (user_id, post_id)
);

CREATE INDEX idx_erp_hr_announcement_recipients_user ON erp_hr_announcement_recipients(user_id);
";
