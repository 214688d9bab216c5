//! Executes parsed commands against the store and renders the result.

use crate::analytics::DashboardStats;
use crate::command::Command;
use crate::reducer::{DashboardEnvironment, DashboardReducer};
use crate::types::{DashboardAction, DashboardState, RequestId, RequestStatus};
use crate::view;
use callcenter_runtime::{Store, StoreError};

/// The store type the console drives
pub type DashboardStore =
    Store<DashboardState, DashboardAction, DashboardEnvironment, DashboardReducer>;

/// Result of one command
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    /// Text to print
    pub output: String,
    /// The operator asked to leave
    pub quit: bool,
}

impl Outcome {
    fn print(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            quit: false,
        }
    }
}

/// Creates a store over `state`
#[must_use]
pub fn dashboard_store(state: DashboardState, environment: DashboardEnvironment) -> DashboardStore {
    Store::new(state, DashboardReducer::new(), environment)
}

/// Runs one command
///
/// # Errors
///
/// Returns [`StoreError`] if the store refuses an action, e.g. after shutdown.
pub async fn execute(
    store: &DashboardStore,
    command: Command,
    queue_limit: usize,
) -> Result<Outcome, StoreError> {
    let outcome = match command {
        Command::Requests(filter) => {
            Outcome::print(store.state(|s| view::queue(s, filter, queue_limit)).await)
        },
        Command::Show(id) => Outcome::print(
            store
                .state(|s| s.request(&id).map_or_else(|| view::NOT_FOUND.to_string(), view::request_card))
                .await,
        ),
        Command::Take(id) => take(store, id).await?,
        Command::Complete { id, comment } => complete(store, id, comment).await?,
        Command::Audit => Outcome::print(store.state(|s| view::audit_log(&s.audit_log)).await),
        Command::Stats => Outcome::print(
            store
                .state(|s| {
                    format!(
                        "{}\n\n{}",
                        view::stats(&DashboardStats::from_state(s)),
                        view::analytics(s)
                    )
                })
                .await,
        ),
        Command::Operations => Outcome::print(view::operations()),
        Command::Submit(form) => {
            let text = view::submitted(&form);
            store.send(DashboardAction::SubmitOperation(form)).await?;
            Outcome::print(text)
        },
        Command::Help => Outcome::print(format!(
            "{}\n\n{}",
            view::header(&store.environment().admin),
            view::help()
        )),
        Command::Quit => Outcome {
            output: "👋 До свидания".to_string(),
            quit: true,
        },
    };
    Ok(outcome)
}

/// Looks the request up and checks it is in `expected`; otherwise returns
/// the text to print instead of dispatching
async fn refusal(
    store: &DashboardStore,
    id: &RequestId,
    expected: RequestStatus,
) -> Option<String> {
    store
        .state(|s| match s.request(id) {
            None => Some(view::NOT_FOUND.to_string()),
            Some(request) if request.status == expected => None,
            Some(request) => Some(view::transition_refused(request)),
        })
        .await
}

async fn take(store: &DashboardStore, id: RequestId) -> Result<Outcome, StoreError> {
    if let Some(text) = refusal(store, &id, RequestStatus::Pending).await {
        return Ok(Outcome::print(text));
    }

    store.send(DashboardAction::take(id.as_str())).await?;

    Ok(Outcome::print(
        store
            .state(|s| match (&s.last_error, s.request(&id)) {
                (Some(error), _) => format!("⚠️ {error}"),
                (None, Some(request)) => view::taken(request),
                (None, None) => view::NOT_FOUND.to_string(),
            })
            .await,
    ))
}

async fn complete(
    store: &DashboardStore,
    id: RequestId,
    comment: String,
) -> Result<Outcome, StoreError> {
    if let Some(text) = refusal(store, &id, RequestStatus::Processing).await {
        return Ok(Outcome::print(text));
    }

    let logged_before = store.state(|s| s.audit_log.len()).await;
    store
        .send(DashboardAction::ConfirmCompletion {
            id: id.clone(),
            comment,
        })
        .await?;

    Ok(Outcome::print(
        store
            .state(|s| match (&s.last_error, s.request(&id)) {
                (Some(error), _) => format!("⚠️ {error}"),
                (None, Some(request)) => {
                    let entry = (s.audit_log.len() > logged_before)
                        .then(|| s.audit_log.first())
                        .flatten();
                    view::completed(request, entry)
                },
                (None, None) => view::NOT_FOUND.to_string(),
            })
            .await,
    ))
}
