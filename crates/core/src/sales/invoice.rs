//! Invoice number formatting.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PADDING: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{(\d+)\}").expect("valid regex"));

/// Formats an invoice number against a format template.
///
/// Every `{N}` placeholder is replaced by the number zero-padded to `N`
/// digits. An empty template yields the bare number; number 0 yields an
/// empty string.
#[must_use]
pub fn format_invoice_number(number: i64, format: &str) -> String {
    if number == 0 {
        return String::new();
    }
    if format.is_empty() {
        return number.to_string();
    }

    PADDING
        .replace_all(format, |caps: &Captures<'_>| {
            let width = caps[1].parse::<usize>().unwrap_or(0).min(32);
            format!("{number:0width$}")
        })
        .into_owned()
}
