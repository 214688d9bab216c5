//! # Call Center Runtime
//!
//! The Store runtime that owns session state, runs the reducer and executes
//! the effects it returns.
//!
//! ## Example
//!
//! ```ignore
//! use callcenter_runtime::Store;
//!
//! let store = Store::new(initial_state, reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use callcenter_core::{effect::Effect, reducer::Reducer};
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// Metric names and registration
pub mod metrics;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Store is shut down and not accepting new actions
        ///
        /// Returned when `send()` is called after `shutdown()`.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// An action produced more feedback actions than the store allows
        ///
        /// State changes made before the limit was hit are kept.
        #[error("Dispatch limit of {0} feedback actions exceeded")]
        DispatchLimitExceeded(usize),
    }
}

pub use error::StoreError;

/// Configuration for Store instances
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Maximum number of `Effect::Dispatch` actions a single `send` may run
    pub max_dispatches: usize,
}

impl StoreConfig {
    /// Set the dispatch limit
    #[must_use]
    pub const fn with_max_dispatches(mut self, max_dispatches: usize) -> Self {
        self.max_dispatches = max_dispatches;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { max_dispatches: 64 }
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{
        Arc, AtomicBool, Effect, Ordering, Reducer, RwLock, StoreConfig, StoreError, VecDeque,
        metrics,
    };

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock` so readers always see a whole transition)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with synchronous feedback)
    ///
    /// Every action, together with every action it dispatches, is reduced
    /// under a single write lock. Concurrent `send` calls are serialized.
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        config: StoreConfig,
        shutdown: Arc<AtomicBool>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        A: std::fmt::Debug,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        #[must_use]
        pub fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                config,
                shutdown: Arc::new(AtomicBool::new(false)),
            }
        }

        /// The injected environment
        #[must_use]
        pub const fn environment(&self) -> &E {
            &self.environment
        }

        /// Send an action to the store
        ///
        /// 1. Acquires the write lock on state
        /// 2. Calls the reducer with (state, action, environment)
        /// 3. Executes returned effects, reducing any dispatched actions
        ///
        /// # Errors
        ///
        /// - [`StoreError::ShutdownInProgress`] if the store was shut down
        /// - [`StoreError::DispatchLimitExceeded`] if feedback actions exceed
        ///   [`StoreConfig::max_dispatches`]
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<(), StoreError> {
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is shutting down");
                metrics::counter!(metrics::REJECTED_TOTAL).increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            tracing::debug!(?action, "Processing action");
            metrics::counter!(metrics::ACTIONS_TOTAL).increment(1);

            let mut state = self.state.write().await;
            tracing::trace!("Acquired write lock on state");

            let effects = self.reduce(&mut *state, action);
            self.execute_effects(&mut *state, effects)
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let pending = store.state(|s| s.requests.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Clone the whole state out of the store
        pub async fn snapshot(&self) -> S
        where
            S: Clone,
        {
            self.state(Clone::clone).await
        }

        /// Stop accepting actions
        ///
        /// There is no background work to drain: every effect finishes before
        /// `send` returns.
        pub fn shutdown(&self) {
            tracing::info!("Store shut down");
            self.shutdown.store(true, Ordering::Release);
        }

        /// Returns true once `shutdown` was called
        #[must_use]
        pub fn is_shut_down(&self) -> bool {
            self.shutdown.load(Ordering::Acquire)
        }

        fn reduce(&self, state: &mut S, action: A) -> Vec<Effect<A>> {
            let span = tracing::debug_span!("reducer_execution");
            let _enter = span.enter();

            let start = std::time::Instant::now();
            let effects = self.reducer.reduce(state, action, &self.environment);
            metrics::histogram!(metrics::REDUCER_DURATION).record(start.elapsed().as_secs_f64());

            tracing::trace!("Reducer completed, returned {} effects", effects.len());
            effects.into_vec()
        }

        /// Run effects depth-first: a dispatched action's own effects run
        /// before the siblings that followed it.
        fn execute_effects(&self, state: &mut S, effects: Vec<Effect<A>>) -> Result<(), StoreError> {
            let mut pending: VecDeque<Effect<A>> = effects.into();
            let mut dispatched = 0usize;

            while let Some(effect) = pending.pop_front() {
                match effect {
                    Effect::None => {},
                    Effect::Sequential(effects) => {
                        for effect in effects.into_iter().rev() {
                            pending.push_front(effect);
                        }
                    },
                    Effect::Dispatch(action) => {
                        dispatched += 1;
                        if dispatched > self.config.max_dispatches {
                            tracing::error!(
                                limit = self.config.max_dispatches,
                                "Dispatch limit exceeded, dropping remaining effects"
                            );
                            return Err(StoreError::DispatchLimitExceeded(
                                self.config.max_dispatches,
                            ));
                        }
                        metrics::counter!(metrics::DISPATCHED_TOTAL).increment(1);
                        tracing::debug!(?action, "Dispatching feedback action");

                        let follow_ups = self.reduce(state, *action);
                        for effect in follow_ups.into_iter().rev() {
                            pending.push_front(effect);
                        }
                    },
                }
            }

            Ok(())
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone,
        E: Clone,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: self.reducer.clone(),
                environment: self.environment.clone(),
                config: self.config.clone(),
                shutdown: Arc::clone(&self.shutdown),
            }
        }
    }
}

pub use store::Store;

#[cfg(test)]
mod tests {
    use super::*;
    use callcenter_core::{SmallVec, smallvec};

    #[derive(Clone, Debug, Default)]
    struct LogState {
        entries: Vec<String>,
    }

    #[derive(Clone, Debug)]
    enum LogAction {
        Append(String),
        AppendTwice(String),
        Nested,
        Forever,
    }

    #[derive(Clone)]
    struct LogReducer;

    impl Reducer for LogReducer {
        type State = LogState;
        type Action = LogAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut LogState,
            action: LogAction,
            _env: &(),
        ) -> SmallVec<[Effect<LogAction>; 4]> {
            match action {
                LogAction::Append(entry) => {
                    state.entries.push(entry);
                    SmallVec::new()
                },
                LogAction::AppendTwice(entry) => smallvec![Effect::chain(vec![
                    Effect::dispatch(LogAction::Append(format!("{entry}-1"))),
                    Effect::None,
                    Effect::dispatch(LogAction::Append(format!("{entry}-2"))),
                ])],
                LogAction::Nested => smallvec![
                    Effect::dispatch(LogAction::AppendTwice("inner".to_string())),
                    Effect::dispatch(LogAction::Append("after".to_string())),
                ],
                LogAction::Forever => smallvec![Effect::dispatch(LogAction::Forever)],
            }
        }
    }

    #[tokio::test]
    async fn test_send_updates_state() {
        let store = Store::new(LogState::default(), LogReducer, ());
        assert_eq!(store.send(LogAction::Append("a".to_string())).await, Ok(()));

        let entries = store.state(|s| s.entries.clone()).await;
        assert_eq!(entries, vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn test_dispatched_actions_run_before_send_returns() {
        let store = Store::new(LogState::default(), LogReducer, ());
        let _ = store.send(LogAction::AppendTwice("x".to_string())).await;

        let state = store.snapshot().await;
        assert_eq!(state.entries, vec!["x-1".to_string(), "x-2".to_string()]);
    }

    #[tokio::test]
    async fn test_dispatch_is_depth_first() {
        let store = Store::new(LogState::default(), LogReducer, ());
        let _ = store.send(LogAction::Nested).await;

        let state = store.snapshot().await;
        assert_eq!(
            state.entries,
            vec![
                "inner-1".to_string(),
                "inner-2".to_string(),
                "after".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_dispatch_limit() {
        let config = StoreConfig::default().with_max_dispatches(3);
        let store = Store::with_config(LogState::default(), LogReducer, (), config);

        let result = store.send(LogAction::Forever).await;
        assert_eq!(result, Err(StoreError::DispatchLimitExceeded(3)));

        // The store keeps working afterwards
        assert_eq!(store.send(LogAction::Append("ok".to_string())).await, Ok(()));
    }

    #[tokio::test]
    async fn test_shutdown_rejects_actions() {
        let store = Store::new(LogState::default(), LogReducer, ());
        store.shutdown();

        assert!(store.is_shut_down());
        let result = store.send(LogAction::Append("late".to_string())).await;
        assert_eq!(result, Err(StoreError::ShutdownInProgress));
        assert!(store.state(|s| s.entries.is_empty()).await);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = Store::new(LogState::default(), LogReducer, ());
        let other = store.clone();

        let _ = other.send(LogAction::Append("shared".to_string())).await;
        assert_eq!(store.state(|s| s.entries.len()).await, 1);
    }
}
