//! Per-user preferences stored in `user_meta`.

use erp_core::StoreError;
use erp_core::admin::PreferenceStore;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, Set};

use crate::entities::user_meta;

/// Preference repository implementation.
#[derive(Debug, Clone)]
pub struct PreferenceRepository {
    db: DatabaseConnection,
}

impl PreferenceRepository {
    /// Create a new preference repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl PreferenceStore for PreferenceRepository {
    async fn get(&self, user_id: i64, key: &str) -> Result<Option<String>, StoreError> {
        let row = user_meta::Entity::find_by_id((user_id, key.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| StoreError::backend(e.to_string()))?;

        Ok(row.map(|m| m.meta_value))
    }

    async fn set(&self, user_id: i64, key: &str, value: &str) -> Result<(), StoreError> {
        let model = user_meta::ActiveModel {
            user_id: Set(user_id),
            meta_key: Set(key.to_string()),
            meta_value: Set(value.to_string()),
        };

        user_meta::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([user_meta::Column::UserId, user_meta::Column::MetaKey])
                    .update_column(user_meta::Column::MetaValue)
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| StoreError::backend(e.to_string()))?;

        tracing::debug!(user_id, key, "preference updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use super::*;

    #[tokio::test]
    async fn test_get_reads_meta_value() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_meta::Model {
                user_id: 1,
                meta_key: "_erp_mode".to_string(),
                meta_value: "crm".to_string(),
            }]])
            .into_connection();
        let repo = PreferenceRepository::new(db);

        assert_eq!(repo.get(1, "_erp_mode").await.unwrap().as_deref(), Some("crm"));
    }

    #[tokio::test]
    async fn test_set_upserts() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let repo = PreferenceRepository::new(db.clone());

        repo.set(1, "_erp_mode", "accounting").await.unwrap();

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
        let statement = format!("{:?}", log[0]);
        assert!(statement.contains("ON CONFLICT"));
        assert!(statement.contains("DO UPDATE SET"));
    }
}
