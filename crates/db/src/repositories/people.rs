//! Customer and user lookups for sale sub-resources.

use erp_core::StoreError;
use erp_core::sales::{Customer, PeopleDirectory, UserSummary};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::entities::{erp_peoples, users};

/// People type stored for customers.
pub const CUSTOMER_TYPE: &str = "customer";

/// People repository implementation.
#[derive(Debug, Clone)]
pub struct PeopleRepository {
    db: DatabaseConnection,
}

impl PeopleRepository {
    /// Create a new people repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl PeopleDirectory for PeopleRepository {
    async fn customer(&self, id: i64) -> Result<Option<Customer>, StoreError> {
        let row = erp_peoples::Entity::find_by_id(id)
            .filter(erp_peoples::Column::PeopleType.eq(CUSTOMER_TYPE))
            .one(&self.db)
            .await
            .map_err(|e| StoreError::backend(e.to_string()))?;

        Ok(row.map(|p| Customer {
            id: p.id,
            first_name: p.first_name,
            last_name: p.last_name,
            company: p.company,
            email: p.email,
            phone: p.phone,
            billing_address: p.billing_address,
        }))
    }

    async fn user(&self, id: i64) -> Result<Option<UserSummary>, StoreError> {
        let row = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| StoreError::backend(e.to_string()))?;

        Ok(row.map(|u| UserSummary {
            id: u.id,
            username: u.user_login,
            name: u.display_name,
            first_name: u.first_name,
            last_name: u.last_name,
            email: u.email,
        }))
    }
}
