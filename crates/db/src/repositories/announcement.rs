//! Announcements addressed to a user.

use chrono::Utc;
use erp_core::StoreError;
use erp_core::dashboard::{Announcement, AnnouncementDirectory};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::{erp_hr_announcement_recipients, erp_hr_announcements};

/// Announcement repository implementation.
#[derive(Debug, Clone)]
pub struct AnnouncementRepository {
    db: DatabaseConnection,
}

impl AnnouncementRepository {
    /// Create a new announcement repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl AnnouncementDirectory for AnnouncementRepository {
    async fn for_user(&self, user_id: i64) -> Result<Vec<Announcement>, StoreError> {
        let rows = erp_hr_announcement_recipients::Entity::find()
            .filter(erp_hr_announcement_recipients::Column::UserId.eq(user_id))
            .find_also_related(erp_hr_announcements::Entity)
            .order_by_desc(erp_hr_announcements::Column::PublishedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, user_id, "announcement lookup failed");
                StoreError::backend(e.to_string())
            })?;

        Ok(rows
            .into_iter()
            .filter_map(|(recipient, post)| {
                let post = post?;
                Some(Announcement {
                    id: recipient.id,
                    post_id: recipient.post_id,
                    title: post.title,
                    content: post.content,
                    published_at: post.published_at.with_timezone(&Utc),
                    status: recipient.status,
                })
            })
            .collect())
    }
}
