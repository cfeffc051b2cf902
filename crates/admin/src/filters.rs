//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Formats an active flag as a human-readable label.
///
/// Usage in templates: `{{ staff.active|active_label }}`
#[askama::filter_fn]
pub fn active_label(value: &bool, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(if *value { "Active" } else { "Inactive" })
}
