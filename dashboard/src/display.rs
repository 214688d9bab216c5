//! Label, badge style and marker lookups used by the views.
//!
//! Every lookup is an exhaustive `match` over the enum, so each in-domain
//! value has its own entry and there is no fallback branch to fall into.

use crate::types::{Priority, RequestStatus};
use chrono::{DateTime, FixedOffset, Utc};

/// Style used for badges whose value is not a known priority or status
pub const FALLBACK_STYLE: &str = "bg-secondary";

/// Russian label for a priority
#[must_use]
pub const fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "Высокий",
        Priority::Medium => "Средний",
        Priority::Low => "Низкий",
    }
}

/// Badge style classes for a priority
#[must_use]
pub const fn priority_color(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "bg-destructive text-destructive-foreground",
        Priority::Medium => "bg-yellow-500 text-white",
        Priority::Low => "bg-blue-500 text-white",
    }
}

/// Marker shown in compact lists
#[must_use]
pub const fn priority_marker(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "🔴",
        Priority::Medium => "🟡",
        Priority::Low => "🟢",
    }
}

/// Russian label for a status
#[must_use]
pub const fn status_label(status: RequestStatus) -> &'static str {
    match status {
        RequestStatus::Pending => "Ожидает",
        RequestStatus::Processing => "В работе",
        RequestStatus::Completed => "Завершено",
    }
}

/// Badge style classes for a status
#[must_use]
pub const fn status_color(status: RequestStatus) -> &'static str {
    match status {
        RequestStatus::Pending => "bg-yellow-100 text-yellow-800 border-yellow-300",
        RequestStatus::Processing => "bg-blue-100 text-blue-800 border-blue-300",
        RequestStatus::Completed => "bg-green-100 text-green-800 border-green-300",
    }
}

/// Marker shown in compact lists
#[must_use]
pub const fn status_marker(status: RequestStatus) -> &'static str {
    match status {
        RequestStatus::Pending => "⏳",
        RequestStatus::Processing => "🔄",
        RequestStatus::Completed => "✅",
    }
}

/// Style for a priority given by wire name; unknown names get [`FALLBACK_STYLE`]
#[must_use]
pub fn priority_color_for(name: &str) -> &'static str {
    name.parse().map_or(FALLBACK_STYLE, priority_color)
}

/// Style for a status given by wire name; unknown names get [`FALLBACK_STYLE`]
#[must_use]
pub fn status_color_for(name: &str) -> &'static str {
    name.parse().map_or(FALLBACK_STYLE, status_color)
}

/// Formats an audit timestamp the way the ru-RU locale prints it:
/// `DD.MM.YYYY, HH:MM` in the given offset
#[must_use]
pub fn format_audit_timestamp(at: DateTime<Utc>, offset: FixedOffset) -> String {
    at.with_timezone(&offset)
        .format("%d.%m.%Y, %H:%M")
        .to_string()
}
