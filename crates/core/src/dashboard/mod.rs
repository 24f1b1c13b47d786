//! HR dashboard widgets.
//!
//! This module provides the read-only dashboard boxes:
//! - The widget registration table
//! - Birthday Buddies (today and the coming week)
//! - Latest Announcement for the current user

pub mod announcement;
pub mod birthday;
pub mod service;
pub mod widgets;

pub use announcement::{
    Announcement, AnnouncementDirectory, AnnouncementEntry, AnnouncementWidget,
    build_announcement_widget,
};
pub use birthday::{
    BirthdayEntry, BirthdaySection, BirthdayWidget, Employee, HrDirectory, birthday_in_year,
    build_birthday_widget, days_until_birthday, is_birthday_today, is_upcoming_birthday,
    next_birthday,
};
pub use service::{
    DashboardError, DashboardLayout, DashboardService, DashboardSettings, WidgetContent,
    WidgetView,
};
pub use widgets::{WidgetColumn, WidgetDefinition, WidgetKind, WidgetRegistry};
