//! # Call Center Core
//!
//! Core traits and types for the call-center administrator console.
//!
//! The console is built as a small functional core with an imperative shell:
//!
//! - **State**: the session's domain data (request queue, audit log)
//! - **Action**: every input the console accepts (operator commands and the
//!   follow-up actions they produce)
//! - **Reducer**: `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: a description of follow-up work, executed by the store
//! - **Environment**: injected dependencies (clock, id generation)
//!
//! ## Example
//!
//! ```ignore
//! use callcenter_core::{effect::Effect, reducer::Reducer, SmallVec};
//!
//! impl Reducer for QueueReducer {
//!     type State = QueueState;
//!     type Action = QueueAction;
//!     type Environment = QueueEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut QueueState,
//!         action: QueueAction,
//!         env: &QueueEnvironment,
//!     ) -> SmallVec<[Effect<QueueAction>; 4]> {
//!         SmallVec::new()
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
/// They contain all business logic and are deterministic given their environment.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// Updates `state` in place and returns descriptions of follow-up
        /// work. Most actions return no effects; an empty vector and
        /// `[Effect::None]` mean the same thing.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects are values, not execution. The store interprets them after the
/// reducer returns and before `send` completes.
pub mod effect {
    /// Effect type - describes follow-up work to be executed by the store
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can feed back into the reducer
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects one after another, in order
        Sequential(Vec<Effect<Action>>),

        /// Feed an action back into the reducer
        ///
        /// The store reduces the action before `send` returns, so the
        /// follow-up is observed atomically with the action that produced it.
        Dispatch(Box<Action>),
    }

    impl<Action> Effect<Action> {
        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Feed `action` back into the reducer
        #[must_use]
        pub fn dispatch(action: Action) -> Effect<Action> {
            Effect::Dispatch(Box::new(action))
        }

        /// Returns true if executing this effect does nothing
        #[must_use]
        pub fn is_none(&self) -> bool {
            match self {
                Effect::None => true,
                Effect::Sequential(effects) => effects.iter().all(Effect::is_none),
                Effect::Dispatch(_) => false,
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All sources of non-determinism (wall-clock time, identifier allocation)
/// are abstracted behind traits and injected via the reducer's Environment.
pub mod environment {
    use chrono::{DateTime, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Clock trait - abstracts time operations for testability
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall-clock time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Allocates identifiers for newly created records
    pub trait IdGenerator: Send + Sync {
        /// Returns the next identifier. Never returns the same value twice.
        fn next_id(&self) -> String;
    }

    /// Decimal identifiers from an ever-increasing counter
    ///
    /// ```
    /// use callcenter_core::environment::{IdGenerator, MonotonicIds};
    ///
    /// let ids = MonotonicIds::starting_at(4);
    /// assert_eq!(ids.next_id(), "4");
    /// assert_eq!(ids.next_id(), "5");
    /// ```
    #[derive(Debug)]
    pub struct MonotonicIds {
        next: AtomicU64,
    }

    impl MonotonicIds {
        /// Create a generator whose first identifier is `first`
        #[must_use]
        pub const fn starting_at(first: u64) -> Self {
            Self {
                next: AtomicU64::new(first),
            }
        }
    }

    impl Default for MonotonicIds {
        fn default() -> Self {
            Self::starting_at(1)
        }
    }

    impl IdGenerator for MonotonicIds {
        fn next_id(&self) -> String {
            self.next.fetch_add(1, Ordering::SeqCst).to_string()
        }
    }
}
