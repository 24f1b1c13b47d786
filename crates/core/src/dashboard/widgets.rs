//! Widget registration table for the HR dashboard.

use serde::Serialize;

/// Dashboard column a widget renders in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetColumn {
    /// Left column.
    Left,
    /// Right column.
    Right,
}

/// What a widget renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    /// Today's and upcoming birthdays.
    Birthday,
    /// The current user's announcements.
    Announcement,
}

/// A registered widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetDefinition {
    /// Widget ID used in routes.
    pub id: String,
    /// Box title.
    pub title: String,
    /// Column.
    pub column: WidgetColumn,
    /// Renderer.
    pub kind: WidgetKind,
}

/// Ordered widget registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetRegistry {
    widgets: Vec<WidgetDefinition>,
}

impl WidgetRegistry {
    /// Birthday Buddies on the right, Latest Announcement on the left.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            widgets: vec![
                WidgetDefinition {
                    id: "birthday".to_string(),
                    title: "Birthday Buddies".to_string(),
                    column: WidgetColumn::Right,
                    kind: WidgetKind::Birthday,
                },
                WidgetDefinition {
                    id: "announcement".to_string(),
                    title: "Latest Announcement".to_string(),
                    column: WidgetColumn::Left,
                    kind: WidgetKind::Announcement,
                },
            ],
        }
    }

    /// All widgets in registration order.
    #[must_use]
    pub fn all(&self) -> &[WidgetDefinition] {
        &self.widgets
    }

    /// Looks up a widget by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&WidgetDefinition> {
        self.widgets.iter().find(|w| w.id == id)
    }

    /// Widgets of one column in registration order.
    pub fn in_column(&self, column: WidgetColumn) -> impl Iterator<Item = &WidgetDefinition> {
        self.widgets.iter().filter(move |w| w.column == column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_columns() {
        let registry = WidgetRegistry::standard();

        let right: Vec<&str> = registry
            .in_column(WidgetColumn::Right)
            .map(|w| w.title.as_str())
            .collect();
        let left: Vec<&str> = registry
            .in_column(WidgetColumn::Left)
            .map(|w| w.title.as_str())
            .collect();

        assert_eq!(right, ["Birthday Buddies"]);
        assert_eq!(left, ["Latest Announcement"]);
        assert_eq!(registry.get("birthday").unwrap().kind, WidgetKind::Birthday);
        assert!(registry.get("weather").is_none());
    }
}
