//! Request lifecycle reducer.
//!
//! `Transition` is the only command that changes state. Accepted transitions
//! produce a `StatusChanged` event and, for completions, an `AuditRecorded`
//! event; both are applied immediately. Whether a transition is accepted
//! depends on the configured [`CompletionPolicy`].

use crate::config::Config;
use crate::display::{format_audit_timestamp, status_label};
use crate::seed::DEFAULT_ADMIN;
use crate::types::{
    AuditId, AuditLogEntry, DashboardAction, DashboardState, RequestId, RequestStatus,
    TargetStatus,
};
use callcenter_core::{
    SmallVec,
    effect::Effect,
    environment::{Clock, IdGenerator, MonotonicIds},
    reducer::Reducer,
    smallvec,
};
use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// Which transitions the reducer accepts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionPolicy {
    /// Any transition on a known request is applied, and every completion
    /// records an audit entry, even a repeated one
    #[default]
    Permissive,
    /// Status may only move one step forward (pending → processing →
    /// completed); skips, repeats and regressions are rejected
    Strict,
}

impl CompletionPolicy {
    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Permissive => "permissive",
            Self::Strict => "strict",
        }
    }

    /// Checks a transition against the policy
    ///
    /// # Errors
    ///
    /// Returns a message for the operator when the policy refuses the move.
    pub fn check(self, from: RequestStatus, to: RequestStatus) -> Result<(), String> {
        match self {
            Self::Permissive => Ok(()),
            Self::Strict if from.next().map(RequestStatus::from) == Some(to) => Ok(()),
            Self::Strict => Err(format!(
                "переход {} → {} запрещён",
                status_label(from),
                status_label(to)
            )),
        }
    }
}

impl FromStr for CompletionPolicy {
    type Err = crate::types::ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(Self::Permissive),
            "strict" => Ok(Self::Strict),
            _ => Err(crate::types::ParseLabelError::new("completion policy", s)),
        }
    }
}

/// Moscow time, the offset the seeded timestamps are written in
#[must_use]
pub fn default_utc_offset() -> FixedOffset {
    FixedOffset::east_opt(3 * 3600).unwrap_or_else(|| Utc.fix())
}

/// Environment dependencies for the dashboard reducer
#[derive(Clone)]
pub struct DashboardEnvironment {
    /// Clock for audit timestamps
    pub clock: Arc<dyn Clock>,
    /// Allocates audit entry ids
    pub audit_ids: Arc<dyn IdGenerator>,
    /// Administrator completed actions are attributed to
    pub admin: String,
    /// Which transitions are accepted
    pub policy: CompletionPolicy,
    /// Offset audit timestamps are printed in
    pub utc_offset: FixedOffset,
}

impl DashboardEnvironment {
    /// Creates an environment with the default admin, policy and offset
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, audit_ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            clock,
            audit_ids,
            admin: DEFAULT_ADMIN.to_string(),
            policy: CompletionPolicy::default(),
            utc_offset: default_utc_offset(),
        }
    }

    /// Creates an environment whose audit ids continue after those in `state`
    #[must_use]
    pub fn for_state(state: &DashboardState, clock: Arc<dyn Clock>) -> Self {
        Self::new(
            clock,
            Arc::new(MonotonicIds::starting_at(state.next_audit_number())),
        )
    }

    /// Attribute actions to `admin`
    #[must_use]
    pub fn with_admin(mut self, admin: impl Into<String>) -> Self {
        self.admin = admin.into();
        self
    }

    /// Use `policy` for transitions
    #[must_use]
    pub const fn with_policy(mut self, policy: CompletionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Print audit timestamps in `offset`
    #[must_use]
    pub const fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }

    /// Environment for a session over `state` as configured by `config`
    #[must_use]
    pub fn from_config(state: &DashboardState, clock: Arc<dyn Clock>, config: &Config) -> Self {
        Self::for_state(state, clock)
            .with_admin(config.admin.clone())
            .with_policy(config.policy)
            .with_utc_offset(config.utc_offset())
    }
}

impl std::fmt::Debug for DashboardEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardEnvironment")
            .field("admin", &self.admin)
            .field("policy", &self.policy)
            .field("utc_offset", &self.utc_offset)
            .finish_non_exhaustive()
    }
}

/// Reducer for the console session
#[derive(Clone, Debug, Default)]
pub struct DashboardReducer;

impl DashboardReducer {
    /// Creates a new `DashboardReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Turns a `Transition` command into the events to apply
    ///
    /// Unknown ids yield no events.
    fn decide_transition(
        state: &DashboardState,
        id: RequestId,
        target: TargetStatus,
        env: &DashboardEnvironment,
    ) -> Vec<DashboardAction> {
        let Some(request) = state.request(&id) else {
            tracing::debug!(request_id = %id, "Transition for unknown request ignored");
            return Vec::new();
        };

        let status = RequestStatus::from(target);
        if let Err(error) = env.policy.check(request.status, status) {
            return vec![DashboardAction::TransitionRejected {
                error: format!("Заявка #{id}: {error}"),
            }];
        }

        // Built from the request as it was before the status change
        let entry = (target == TargetStatus::Completed).then(|| {
            AuditLogEntry::for_completion(
                AuditId::new(env.audit_ids.next_id()),
                request,
                env.admin.clone(),
                format_audit_timestamp(env.clock.now(), env.utc_offset),
            )
        });

        let mut events = vec![DashboardAction::StatusChanged { id, status }];
        events.extend(entry.map(|entry| DashboardAction::AuditRecorded { entry }));
        events
    }

    /// Applies an event to state
    fn apply_event(state: &mut DashboardState, action: &DashboardAction) {
        match action {
            DashboardAction::StatusChanged { id, status } => {
                if let Some(before) = state.set_status(id, *status) {
                    tracing::info!(
                        request_id = %id,
                        from = %before.status,
                        to = %status,
                        "Request status changed"
                    );
                    metrics::counter!("dashboard.transitions", "status" => status.as_str())
                        .increment(1);
                }
                state.last_error = None;
            },
            DashboardAction::AuditRecorded { entry } => {
                tracing::info!(
                    audit_id = %entry.id,
                    action = %entry.action,
                    admin = %entry.admin,
                    "Audit entry recorded"
                );
                metrics::counter!("dashboard.audit_entries").increment(1);
                state.prepend_audit(entry.clone());
            },
            DashboardAction::TransitionRejected { error } => {
                tracing::warn!(%error, "Transition rejected");
                state.last_error = Some(error.clone());
            },
            // Commands are not applied to state
            DashboardAction::Transition { .. }
            | DashboardAction::ConfirmCompletion { .. }
            | DashboardAction::SubmitOperation(_) => {},
        }
    }
}

impl Reducer for DashboardReducer {
    type State = DashboardState;
    type Action = DashboardAction;
    type Environment = DashboardEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            DashboardAction::Transition { id, status } => {
                for event in Self::decide_transition(state, id, status, env) {
                    Self::apply_event(state, &event);
                }
                SmallVec::new()
            },

            DashboardAction::ConfirmCompletion { id, comment } => {
                // The dialog comment is not stored anywhere
                tracing::info!(request_id = %id, %comment, "Completion confirmed");
                smallvec![Effect::dispatch(DashboardAction::Transition {
                    id,
                    status: TargetStatus::Completed,
                })]
            },

            DashboardAction::SubmitOperation(form) => {
                tracing::info!(operation = ?form.kind(), "Operation form submitted; no handler wired");
                SmallVec::new()
            },

            // ========== Events ==========
            DashboardAction::StatusChanged { .. }
            | DashboardAction::AuditRecorded { .. }
            | DashboardAction::TransitionRejected { .. } => {
                Self::apply_event(state, &action);
                SmallVec::new()
            },
        }
    }
}
