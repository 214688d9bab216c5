//! # Call Center Dashboard
//!
//! Administrator console for a bank call center: a queue of client requests,
//! the pending → processing → completed lifecycle, an audit log that gains an
//! entry on every completion, and read-only analytics.
//!
//! State changes go through [`DashboardReducer`] inside a
//! [`callcenter_runtime::Store`]; the console layer parses operator input,
//! sends actions and renders text views.
//!
//! ```ignore
//! let state = DashboardState::seeded();
//! let env = DashboardEnvironment::for_state(&state, Arc::new(SystemClock));
//! let store = console::dashboard_store(state, env);
//!
//! store.send(DashboardAction::complete("2")).await?;
//! assert_eq!(store.state(|s| s.audit_log.len()).await, 4);
//! ```

pub mod analytics;
pub mod command;
pub mod config;
pub mod console;
pub mod display;
pub mod operations;
pub mod reducer;
pub mod seed;
pub mod types;
pub mod view;

pub use analytics::DashboardStats;
pub use command::{Command, CommandError};
pub use config::{Config, ConfigError};
pub use console::{DashboardStore, Outcome, dashboard_store, execute};
pub use reducer::{CompletionPolicy, DashboardEnvironment, DashboardReducer};
pub use types::{
    AuditId, AuditLogEntry, DashboardAction, DashboardState, Priority, QueueFilter, Request,
    RequestId, RequestStatus, TargetStatus,
};
