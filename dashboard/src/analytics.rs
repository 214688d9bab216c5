//! Aggregates shown on the header tiles and the analytics tab.
//!
//! The tile counts are derived from the live state on every call. On the
//! analytics tab, [`top_request_types`] is the one figure computed from state;
//! the operation mix, admin activity and average response time are literal
//! constants.

use crate::seed::{APP_BLOCK, CARD_BLOCK, CARD_REISSUE};
use crate::types::{DashboardState, RequestStatus};
use serde::Serialize;
use std::collections::HashMap;

/// Average response time tile value
pub const AVG_RESPONSE_TIME: &str = "3.2 мин";

/// Share of each operation type, in percent
pub const OPERATION_MIX: [(&str, u8); 3] = [(CARD_BLOCK, 45), (CARD_REISSUE, 30), (APP_BLOCK, 25)];

/// Handled requests per administrator
pub const ADMIN_ACTIVITY: [(&str, u32); 3] = [
    ("Администратор #1", 28),
    ("Администратор #2", 22),
    ("Администратор #3", 19),
];

/// Header tile values
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Every request in the queue, whatever its status
    pub total_requests: usize,
    /// Requests waiting for an operator
    pub pending_requests: usize,
    /// Requests taken into work
    pub processing_requests: usize,
    /// Audit log length
    pub completed_today: usize,
    /// Fixed display value
    pub avg_response_time: &'static str,
}

impl DashboardStats {
    /// Derives the tiles from `state`
    #[must_use]
    pub fn from_state(state: &DashboardState) -> Self {
        Self {
            total_requests: state.requests.len(),
            pending_requests: state.count_with_status(RequestStatus::Pending),
            processing_requests: state.count_with_status(RequestStatus::Processing),
            // Counts audit entries, not completed requests: the seeded log and
            // repeated completions both contribute
            completed_today: state.audit_log.len(),
            avg_response_time: AVG_RESPONSE_TIME,
        }
    }
}

/// Russian noun form for "заявка" after `n`
#[must_use]
pub const fn requests_word(n: u32) -> &'static str {
    let last_two = n % 100;
    let last = n % 10;
    if last_two >= 11 && last_two <= 14 {
        "заявок"
    } else if last == 1 {
        "заявка"
    } else if last >= 2 && last <= 4 {
        "заявки"
    } else {
        "заявок"
    }
}

/// Two-letter avatar initials for an administrator name such as "Администратор #2"
#[must_use]
pub fn admin_initials(admin: &str) -> String {
    let first = admin.chars().next().unwrap_or('?');
    let number = admin.rsplit('#').next().filter(|n| *n != admin).unwrap_or("");
    format!("{first}{number}")
}

/// Most frequent request types, most frequent first
///
/// Ties are broken by type name so the order is stable.
#[must_use]
pub fn top_request_types(state: &DashboardState, limit: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for request in &state.requests {
        *counts.entry(request.kind.as_str()).or_default() += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(kind, count)| (kind.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}
