//! Birthday widget: employees celebrating today or within the next week.

use std::fmt::Write;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::store::StoreError;

/// Days after today covered by the upcoming section.
pub const UPCOMING_WINDOW_DAYS: i64 = 7;

/// An employee as seen by the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// User ID.
    pub user_id: i64,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Avatar URL.
    pub avatar_url: String,
}

impl Employee {
    /// First and last name joined by a space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Link to the employee's profile.
    #[must_use]
    pub fn details_url(&self) -> String {
        format!("/erp/hrm/employees/{}", self.user_id)
    }
}

/// Source of employees for the birthday widget.
pub trait HrDirectory: Send + Sync {
    /// Active employees whose birthday is `today`.
    fn todays_birthdays(
        &self,
        today: NaiveDate,
    ) -> impl std::future::Future<Output = Result<Vec<Employee>, StoreError>> + Send;

    /// Active employees whose birthday falls tomorrow through `today + 7`.
    fn upcoming_birthdays(
        &self,
        today: NaiveDate,
    ) -> impl std::future::Future<Output = Result<Vec<Employee>, StoreError>> + Send;
}

/// The date `date_of_birth` is celebrated in `year`; Feb 29 falls on Feb 28
/// outside leap years.
#[must_use]
pub fn birthday_in_year(date_of_birth: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, date_of_birth.month(), date_of_birth.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, date_of_birth.month(), 28))
}

/// The next celebration on or after `today`.
#[must_use]
pub fn next_birthday(date_of_birth: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    let this_year = birthday_in_year(date_of_birth, today.year())?;
    if this_year >= today {
        Some(this_year)
    } else {
        birthday_in_year(date_of_birth, today.year() + 1)
    }
}

/// Days from `today` to the next celebration (0 when it is today).
#[must_use]
pub fn days_until_birthday(date_of_birth: NaiveDate, today: NaiveDate) -> Option<i64> {
    next_birthday(date_of_birth, today).map(|next| (next - today).num_days())
}

/// Returns true when the birthday is celebrated today.
#[must_use]
pub fn is_birthday_today(date_of_birth: NaiveDate, today: NaiveDate) -> bool {
    days_until_birthday(date_of_birth, today) == Some(0)
}

/// Returns true when the birthday falls tomorrow through `today + 7`.
#[must_use]
pub fn is_upcoming_birthday(date_of_birth: NaiveDate, today: NaiveDate) -> bool {
    matches!(days_until_birthday(date_of_birth, today), Some(1..=UPCOMING_WINDOW_DAYS))
}

/// One person in a birthday section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthdayEntry {
    /// User ID.
    pub user_id: i64,
    /// Full name.
    pub full_name: String,
    /// Avatar URL.
    pub avatar_url: String,
    /// Profile link.
    pub details_url: String,
    /// Celebration date as `Mon, DD`; upcoming entries only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
}

/// A titled list of birthdays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthdaySection {
    /// Heading.
    pub title: String,
    /// Entries.
    pub entries: Vec<BirthdayEntry>,
    /// Shown instead of entries when there are none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

/// Rendered birthday widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthdayWidget {
    /// Today's birthdays.
    pub today: BirthdaySection,
    /// The coming week's birthdays.
    pub upcoming: BirthdaySection,
}

fn section(title: &str, entries: Vec<BirthdayEntry>, empty: &str) -> BirthdaySection {
    let empty_message = entries.is_empty().then(|| empty.to_string());
    BirthdaySection {
        title: title.to_string(),
        entries,
        empty_message,
    }
}

fn entry(employee: &Employee, birthday: Option<String>) -> BirthdayEntry {
    BirthdayEntry {
        user_id: employee.user_id,
        full_name: employee.full_name(),
        avatar_url: employee.avatar_url.clone(),
        details_url: employee.details_url(),
        birthday,
    }
}

fn format_birthday(date: NaiveDate) -> String {
    let mut out = String::new();
    let _ = write!(out, "{}", date.format("%b, %d"));
    out
}

/// Builds the widget from the directory's answers.
#[must_use]
pub fn build_birthday_widget(
    todays: &[Employee],
    upcoming: &[Employee],
    today: NaiveDate,
) -> BirthdayWidget {
    let today_entries = todays.iter().map(|e| entry(e, None)).collect();

    let mut upcoming: Vec<(NaiveDate, &Employee)> = upcoming
        .iter()
        .filter_map(|e| next_birthday(e.date_of_birth, today).map(|d| (d, e)))
        .collect();
    upcoming.sort_by_key(|(date, e)| (*date, e.user_id));

    let upcoming_entries = upcoming
        .into_iter()
        .map(|(date, e)| entry(e, Some(format_birthday(date))))
        .collect();

    BirthdayWidget {
        today: section("Today's Birthday", today_entries, "No one has birthday today!"),
        upcoming: section(
            "Upcoming Birthday",
            upcoming_entries,
            "No one has birthdays this week!",
        ),
    }
}

#[cfg(test)]
#[path = "birthday_tests.rs"]
mod tests;
