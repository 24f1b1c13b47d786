//! Employee lookups for the birthday widget.

use chrono::NaiveDate;
use erp_core::StoreError;
use erp_core::dashboard::{
    Employee, HrDirectory, days_until_birthday, is_birthday_today, is_upcoming_birthday,
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::erp_hr_employees;

/// Employee status included on the dashboard.
pub const ACTIVE: &str = "active";

/// Employee repository implementation.
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    db: DatabaseConnection,
}

impl EmployeeRepository {
    /// Create a new employee repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Active employees with a recorded date of birth.
    ///
    /// Anniversary matching happens in memory so year wrap and Feb 29 follow
    /// the same rules as the widget.
    async fn active_with_birthday(&self) -> Result<Vec<Employee>, StoreError> {
        let rows = erp_hr_employees::Entity::find()
            .filter(erp_hr_employees::Column::Status.eq(ACTIVE))
            .filter(erp_hr_employees::Column::DateOfBirth.is_not_null())
            .order_by_asc(erp_hr_employees::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "employee lookup failed");
                StoreError::backend(e.to_string())
            })?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                Some(Employee {
                    user_id: row.user_id,
                    first_name: row.first_name,
                    last_name: row.last_name,
                    date_of_birth: row.date_of_birth?,
                    avatar_url: row.avatar_url,
                })
            })
            .collect())
    }
}

impl HrDirectory for EmployeeRepository {
    async fn todays_birthdays(&self, today: NaiveDate) -> Result<Vec<Employee>, StoreError> {
        let mut employees = self.active_with_birthday().await?;
        employees.retain(|e| is_birthday_today(e.date_of_birth, today));
        Ok(employees)
    }

    async fn upcoming_birthdays(&self, today: NaiveDate) -> Result<Vec<Employee>, StoreError> {
        let mut employees = self.active_with_birthday().await?;
        employees.retain(|e| is_upcoming_birthday(e.date_of_birth, today));
        employees.sort_by_key(|e| days_until_birthday(e.date_of_birth, today));
        Ok(employees)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::*;

    fn row(id: i64, name: &str, dob: Option<NaiveDate>) -> erp_hr_employees::Model {
        erp_hr_employees::Model {
            id,
            user_id: id + 10,
            first_name: name.to_string(),
            last_name: String::new(),
            date_of_birth: dob,
            avatar_url: String::new(),
            status: ACTIVE.to_string(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn staff() -> Vec<erp_hr_employees::Model> {
        vec![
            row(1, "Dec", Some(date(1990, 12, 31))),
            row(2, "Jan", Some(date(1985, 1, 3))),
            row(3, "Jan", Some(date(1987, 1, 1))),
            row(4, "Unknown", None),
        ]
    }

    #[tokio::test]
    async fn test_todays_birthdays() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([staff()])
            .into_connection();
        let repo = EmployeeRepository::new(db);

        let today = repo.todays_birthdays(date(2026, 12, 31)).await.unwrap();

        let ids: Vec<i64> = today.iter().map(|e| e.user_id).collect();
        assert_eq!(ids, [11]);
    }

    #[tokio::test]
    async fn test_upcoming_wraps_year_and_sorts_by_date() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([staff()])
            .into_connection();
        let repo = EmployeeRepository::new(db);

        let upcoming = repo.upcoming_birthdays(date(2026, 12, 30)).await.unwrap();

        let ids: Vec<i64> = upcoming.iter().map(|e| e.user_id).collect();
        assert_eq!(ids, [11, 13, 12]);
    }
}
