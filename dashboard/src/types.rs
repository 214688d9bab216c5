//! Domain types for the call-center console.
//!
//! A session holds two ordered collections: the incoming request queue and
//! the audit log (newest entry first). A request's status is the only field
//! that changes after seeding.

use crate::operations::OperationForm;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unknown name for a priority or status
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} `{value}`")]
pub struct ParseLabelError {
    /// What was being parsed ("priority", "status", ...)
    pub kind: &'static str,
    /// The rejected input
    pub value: String,
}

impl ParseLabelError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Identifier of a client request
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    /// Creates a `RequestId` from any string
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RequestId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of an audit log entry
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditId(String);

impl AuditId {
    /// Creates an `AuditId` from any string
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric value of the id, if it is a plain decimal number
    #[must_use]
    pub fn number(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for AuditId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How urgently a request should be handled
///
/// Ordered from most to least urgent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Handle first
    High,
    /// Normal
    Medium,
    /// Handle when the queue allows
    Low,
}

impl Priority {
    /// Every priority, most urgent first
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl FromStr for Priority {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(ParseLabelError::new("priority", other)),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a request is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Waiting for an operator
    Pending,
    /// Taken into work
    Processing,
    /// Done; an audit entry was recorded
    Completed,
}

impl RequestStatus {
    /// Every status, in lifecycle order
    pub const ALL: [Self; 3] = [Self::Pending, Self::Processing, Self::Completed];

    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
        }
    }

    /// The single step forward from this status; `None` once completed
    #[must_use]
    pub const fn next(self) -> Option<TargetStatus> {
        match self {
            Self::Pending => Some(TargetStatus::Processing),
            Self::Processing => Some(TargetStatus::Completed),
            Self::Completed => None,
        }
    }

    /// True for requests still in the queue
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Processing)
    }
}

impl FromStr for RequestStatus {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            other => Err(ParseLabelError::new("status", other)),
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statuses an operator can move a request into
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetStatus {
    /// "Take into work"
    Processing,
    /// "Complete"; records an audit entry
    Completed,
}

impl From<TargetStatus> for RequestStatus {
    fn from(target: TargetStatus) -> Self {
        match target {
            TargetStatus::Processing => Self::Processing,
            TargetStatus::Completed => Self::Completed,
        }
    }
}

impl fmt::Display for TargetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        RequestStatus::from(*self).fmt(f)
    }
}

/// Badge filter for the queue listing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueFilter {
    /// Pending and processing requests, most urgent first, then newest first
    Active,
    /// Only requests with this priority
    Priority(Priority),
    /// Only requests in this status, including completed ones
    Status(RequestStatus),
}

impl QueueFilter {
    /// True if `request` passes the filter
    #[must_use]
    pub fn matches(self, request: &Request) -> bool {
        match self {
            Self::Active => request.status.is_active(),
            Self::Priority(priority) => request.priority == priority,
            Self::Status(status) => request.status == status,
        }
    }
}

impl FromStr for QueueFilter {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "active" {
            return Ok(Self::Active);
        }
        s.parse()
            .map(Self::Priority)
            .or_else(|_| s.parse().map(Self::Status))
            .map_err(|_: ParseLabelError| ParseLabelError::new("queue filter", s))
    }
}

impl fmt::Display for QueueFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => f.write_str("active"),
            Self::Priority(priority) => priority.fmt(f),
            Self::Status(status) => status.fmt(f),
        }
    }
}

/// A client-initiated support case
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Unique identifier
    pub id: RequestId,
    /// Client's full name
    pub client_name: String,
    /// Client's phone number, display formatted
    pub phone: String,
    /// Operation type label, e.g. "Блокировка карты"
    #[serde(rename = "type")]
    pub kind: String,
    /// Urgency
    pub priority: Priority,
    /// Lifecycle position; the only mutable field
    pub status: RequestStatus,
    /// Creation time, display formatted
    pub timestamp: String,
}

/// An immutable record of a completed administrative action
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    /// Unique identifier
    pub id: AuditId,
    /// Operation type, copied from the request
    pub action: String,
    /// Administrator who performed the action
    pub admin: String,
    /// Client name, copied from the request
    pub client_name: String,
    /// Free-text summary
    pub details: String,
    /// Capture time, display formatted
    pub timestamp: String,
}

impl AuditLogEntry {
    /// Builds the entry recorded when `request` is completed
    #[must_use]
    pub fn for_completion(
        id: AuditId,
        request: &Request,
        admin: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id,
            action: request.kind.clone(),
            admin: admin.into(),
            client_name: request.client_name.clone(),
            details: format!("Заявка обработана: {}", request.kind),
            timestamp: timestamp.into(),
        }
    }
}

/// State of one console session
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardState {
    /// Incoming requests, in seed order
    pub requests: Vec<Request>,
    /// Audit log, newest first
    pub audit_log: Vec<AuditLogEntry>,
    /// Last rejected transition (strict policy only)
    pub last_error: Option<String>,
}

impl DashboardState {
    /// Creates a state from existing collections
    #[must_use]
    pub const fn new(requests: Vec<Request>, audit_log: Vec<AuditLogEntry>) -> Self {
        Self {
            requests,
            audit_log,
            last_error: None,
        }
    }

    /// Returns a request by ID
    #[must_use]
    pub fn request(&self, id: &RequestId) -> Option<&Request> {
        self.requests.iter().find(|r| &r.id == id)
    }

    /// Number of requests currently in `status`
    #[must_use]
    pub fn count_with_status(&self, status: RequestStatus) -> usize {
        self.requests.iter().filter(|r| r.status == status).count()
    }

    /// The first audit id a fresh generator may hand out without colliding
    ///
    /// One past the highest numeric id in the log, and never less than
    /// `len + 1`.
    #[must_use]
    pub fn next_audit_number(&self) -> u64 {
        let highest = self
            .audit_log
            .iter()
            .filter_map(|entry| entry.id.number())
            .max()
            .unwrap_or(0);
        let len = u64::try_from(self.audit_log.len()).unwrap_or(u64::MAX);
        highest.max(len).saturating_add(1)
    }

    /// Replaces a request's status, returning the request as it was before
    ///
    /// Returns `None` and changes nothing if the id is unknown.
    pub fn set_status(&mut self, id: &RequestId, status: RequestStatus) -> Option<Request> {
        let request = self.requests.iter_mut().find(|r| &r.id == id)?;
        let before = request.clone();
        request.status = status;
        Some(before)
    }

    /// Records an entry at the head of the audit log
    pub fn prepend_audit(&mut self, entry: AuditLogEntry) {
        self.audit_log.insert(0, entry);
    }

    /// Pending and processing requests, most urgent first, then newest first
    #[must_use]
    pub fn active_queue(&self, limit: usize) -> Vec<&Request> {
        self.ranked(|r| r.status.is_active(), limit)
    }

    /// Requests passing `filter`
    ///
    /// Without a filter every request is listed. Badge filters keep seed
    /// order; [`QueueFilter::Active`] is the ranked [`Self::active_queue`].
    #[must_use]
    pub fn filtered_queue(&self, filter: Option<QueueFilter>, limit: usize) -> Vec<&Request> {
        match filter {
            Some(QueueFilter::Active) => self.active_queue(limit),
            Some(filter) => self
                .requests
                .iter()
                .filter(|r| filter.matches(r))
                .take(limit)
                .collect(),
            None => self.requests.iter().take(limit).collect(),
        }
    }

    fn ranked(&self, keep: impl Fn(&Request) -> bool, limit: usize) -> Vec<&Request> {
        let mut ranked: Vec<&Request> = self.requests.iter().filter(|r| keep(r)).collect();
        ranked.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then_with(|| b.timestamp.cmp(&a.timestamp))
        });
        ranked.truncate(limit);
        ranked
    }
}

/// Actions representing operator commands and the events they produce
///
/// Commands are validated by the reducer and produce events. Events are
/// applied to state; sending an event directly applies it unconditionally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DashboardAction {
    // ========== Commands ==========
    /// Command: move a request to processing or completed
    Transition {
        /// Request to change
        id: RequestId,
        /// New status
        status: TargetStatus,
    },

    /// Command: operator confirmed the completion dialog
    ///
    /// The comment is logged but not stored.
    ConfirmCompletion {
        /// Request to complete
        id: RequestId,
        /// Free-text comment from the dialog
        comment: String,
    },

    /// Command: an operation form was submitted
    ///
    /// Forms are not wired to any backend; nothing changes.
    SubmitOperation(OperationForm),

    // ========== Events ==========
    /// Event: a request's status changed
    StatusChanged {
        /// Request that changed
        id: RequestId,
        /// New status
        status: RequestStatus,
    },

    /// Event: an audit entry was recorded
    AuditRecorded {
        /// The new entry
        entry: AuditLogEntry,
    },

    /// Event: a transition was refused by the completion policy
    TransitionRejected {
        /// Error message
        error: String,
    },
}

impl DashboardAction {
    /// "Take into work"
    #[must_use]
    pub fn take(id: impl Into<String>) -> Self {
        Self::Transition {
            id: RequestId::new(id),
            status: TargetStatus::Processing,
        }
    }

    /// "Complete", without the dialog
    #[must_use]
    pub fn complete(id: impl Into<String>) -> Self {
        Self::Transition {
            id: RequestId::new(id),
            status: TargetStatus::Completed,
        }
    }

    /// Returns true if this action is a command
    #[must_use]
    pub const fn is_command(&self) -> bool {
        matches!(
            self,
            Self::Transition { .. } | Self::ConfirmCompletion { .. } | Self::SubmitOperation(_)
        )
    }

    /// Returns true if this action is an event
    #[must_use]
    pub const fn is_event(&self) -> bool {
        !self.is_command()
    }
}
