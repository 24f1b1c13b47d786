//! Dashboard service: renders registered widgets for a user.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use super::announcement::{AnnouncementDirectory, AnnouncementWidget, build_announcement_widget};
use super::birthday::{BirthdayWidget, HrDirectory, build_birthday_widget};
use super::widgets::{WidgetColumn, WidgetDefinition, WidgetKind, WidgetRegistry};
use crate::context::RequestContext;
use crate::store::StoreError;

/// Dashboard errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    /// No widget is registered under this ID.
    #[error("unknown widget: {0}")]
    UnknownWidget(String),

    /// A directory lookup failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Rendering settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSettings {
    /// strftime pattern for announcement dates.
    pub date_format: String,
    /// Words kept in announcement excerpts.
    pub excerpt_words: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            date_format: "%Y-%m-%d".to_string(),
            excerpt_words: 40,
        }
    }
}

/// Widget body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "lowercase")]
pub enum WidgetContent {
    /// Birthday widget.
    Birthday(BirthdayWidget),
    /// Announcement widget.
    Announcement(AnnouncementWidget),
}

/// A rendered widget box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetView {
    /// Widget ID.
    pub id: String,
    /// Box title.
    pub title: String,
    /// Column.
    pub column: WidgetColumn,
    /// Body.
    #[serde(flatten)]
    pub body: WidgetContent,
}

/// Both dashboard columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardLayout {
    /// Left column.
    pub left: Vec<WidgetView>,
    /// Right column.
    pub right: Vec<WidgetView>,
}

/// Renders dashboard widgets.
pub struct DashboardService<H: HrDirectory, A: AnnouncementDirectory> {
    hr: Arc<H>,
    announcements: Arc<A>,
    registry: WidgetRegistry,
    settings: DashboardSettings,
}

impl<H: HrDirectory, A: AnnouncementDirectory> DashboardService<H, A> {
    /// Create a new dashboard service.
    #[must_use]
    pub fn new(
        hr: Arc<H>,
        announcements: Arc<A>,
        registry: WidgetRegistry,
        settings: DashboardSettings,
    ) -> Self {
        Self {
            hr,
            announcements,
            registry,
            settings,
        }
    }

    /// Render one widget.
    ///
    /// # Errors
    ///
    /// Returns `UnknownWidget` for unregistered IDs and propagates lookup failures.
    pub async fn widget(
        &self,
        ctx: &RequestContext,
        id: &str,
        today: NaiveDate,
    ) -> Result<WidgetView, DashboardError> {
        let definition = self
            .registry
            .get(id)
            .ok_or_else(|| DashboardError::UnknownWidget(id.to_string()))?;

        self.render(ctx, definition, today).await
    }

    /// Render every widget grouped by column.
    ///
    /// # Errors
    ///
    /// Propagates lookup failures.
    pub async fn layout(
        &self,
        ctx: &RequestContext,
        today: NaiveDate,
    ) -> Result<DashboardLayout, DashboardError> {
        let mut left = Vec::new();
        for definition in self.registry.in_column(WidgetColumn::Left) {
            left.push(self.render(ctx, definition, today).await?);
        }

        let mut right = Vec::new();
        for definition in self.registry.in_column(WidgetColumn::Right) {
            right.push(self.render(ctx, definition, today).await?);
        }

        Ok(DashboardLayout { left, right })
    }

    async fn render(
        &self,
        ctx: &RequestContext,
        definition: &WidgetDefinition,
        today: NaiveDate,
    ) -> Result<WidgetView, DashboardError> {
        let body = match definition.kind {
            WidgetKind::Birthday => {
                let todays = self.hr.todays_birthdays(today).await?;
                let upcoming = self.hr.upcoming_birthdays(today).await?;
                WidgetContent::Birthday(build_birthday_widget(&todays, &upcoming, today))
            }
            WidgetKind::Announcement => {
                let announcements = self.announcements.for_user(ctx.user_id()).await?;
                WidgetContent::Announcement(build_announcement_widget(
                    announcements,
                    &self.settings.date_format,
                    self.settings.excerpt_words,
                ))
            }
        };

        Ok(WidgetView {
            id: definition.id.clone(),
            title: definition.title.clone(),
            column: definition.column,
            body,
        })
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
