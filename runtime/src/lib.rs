//! # Tasklist Runtime
//!
//! Runtime implementation for the Tasklist reducer architecture.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: The runtime that owns state and executes effects
//! - **Feedback Loop**: Actions produced by effects are reduced in turn,
//!   before `send()` returns
//!
//! ## Example
//!
//! ```ignore
//! use tasklist_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action (its feedback actions are applied before this returns)
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use std::collections::VecDeque;
use std::sync::Arc;
use tasklist_core::{effect::Effect, reducer::Reducer};
use tokio::sync::RwLock;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// The reducer kept feeding actions back beyond the configured bound
        ///
        /// State changes made before the limit was hit stay applied; the
        /// remaining queued actions are dropped.
        #[error("Feedback limit exceeded: more than {0} actions produced by effects")]
        FeedbackLimitExceeded(usize),
    }
}

pub use error::StoreError;

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use tasklist_runtime::StoreConfig;
///
/// let config = StoreConfig::default().with_max_feedback_actions(8);
/// assert_eq!(config.max_feedback_actions, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum number of actions effects may feed back for a single `send()`
    pub max_feedback_actions: usize,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(max_feedback_actions: usize) -> Self {
        Self {
            max_feedback_actions,
        }
    }

    /// Set the feedback bound
    #[must_use]
    pub const fn with_max_feedback_actions(mut self, max: usize) -> Self {
        self.max_feedback_actions = max;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_feedback_actions: 64,
        }
    }
}

/// Store module - the runtime coordinator
pub mod store {
    use super::{Arc, Effect, Reducer, RwLock, StoreConfig, StoreError, VecDeque};

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock`, readable through closures)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    ///
    /// Cloning a Store is cheap and yields a handle onto the same state.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: Arc<R>,
        environment: Arc<E>,
        config: StoreConfig,
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: Arc::clone(&self.reducer),
                environment: Arc::clone(&self.environment),
                config: self.config,
            }
        }
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new store with an explicit configuration
        #[must_use]
        pub fn with_config(initial_state: S, reducer: R, environment: E, config: StoreConfig) -> Self {
            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer: Arc::new(reducer),
                environment: Arc::new(environment),
                config,
            }
        }

        /// The configuration this store runs with
        #[must_use]
        pub const fn config(&self) -> StoreConfig {
            self.config
        }

        /// Send an action to the store
        ///
        /// This method:
        /// 1. Acquires the write lock on state
        /// 2. Calls reducer with (state, action, environment)
        /// 3. Releases the lock, so the state change is committed
        /// 4. Executes the returned effects; actions they produce are reduced
        ///    the same way, first-in first-out
        ///
        /// When `send()` returns, every action fed back by effects has been
        /// reduced. Callers reading state afterwards observe the final state.
        ///
        /// # Returns
        ///
        /// The number of actions reduced, including the one sent.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::FeedbackLimitExceeded`] if effects feed back more
        /// than [`StoreConfig::max_feedback_actions`] actions.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<usize, StoreError> {
            metrics::counter!("store.actions.total").increment(1);

            let mut queue = VecDeque::from([action]);
            let mut reduced = 0_usize;

            while let Some(action) = queue.pop_front() {
                // The first action is the one sent; the rest came from effects
                if reduced > self.config.max_feedback_actions {
                    tracing::error!(
                        limit = self.config.max_feedback_actions,
                        dropped = queue.len() + 1,
                        "Feedback limit exceeded, dropping queued actions"
                    );
                    return Err(StoreError::FeedbackLimitExceeded(
                        self.config.max_feedback_actions,
                    ));
                }

                let effects = {
                    let mut state = self.state.write().await;
                    tracing::trace!("Acquired write lock on state");
                    self.reducer.reduce(&mut *state, action, &self.environment)
                };
                reduced += 1;

                tracing::trace!("Reducer completed, returned {} effects", effects.len());
                for effect in effects {
                    Self::execute_effect(effect, &mut queue);
                }
            }

            tracing::debug!(reduced, "Action processing completed");
            Ok(reduced)
        }

        /// Read current state via a closure
        ///
        /// Access state through a closure to ensure the lock is released promptly:
        ///
        /// ```ignore
        /// let count = store.state(|s| s.todos.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        fn execute_effect(effect: Effect<A>, queue: &mut VecDeque<A>) {
            match effect {
                Effect::None => {
                    tracing::trace!("Executing Effect::None (no-op)");
                    metrics::counter!("store.effects.executed", "type" => "none").increment(1);
                },
                Effect::Send(action) => {
                    tracing::trace!("Executing Effect::Send, queueing action");
                    metrics::counter!("store.effects.executed", "type" => "send").increment(1);
                    queue.push_back(*action);
                },
                Effect::Sequential(effects) => {
                    tracing::trace!("Executing Effect::Sequential with {} effects", effects.len());
                    metrics::counter!("store.effects.executed", "type" => "sequential")
                        .increment(1);
                    for effect in effects {
                        Self::execute_effect(effect, queue);
                    }
                },
            }
        }
    }
}

pub use store::Store;

#[cfg(test)]
mod tests {
    use super::*;
    use tasklist_core::{smallvec, SmallVec};

    #[derive(Clone, Debug, Default)]
    struct TestState {
        log: Vec<&'static str>,
    }

    #[derive(Clone, Debug)]
    enum TestAction {
        Start,
        Commit,
        Finish,
        Loop,
    }

    #[derive(Clone)]
    struct TestReducer;

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                TestAction::Start => {
                    state.log.push("start");
                    smallvec![Effect::chain(vec![
                        Effect::send(TestAction::Commit),
                        Effect::None,
                        Effect::send(TestAction::Finish),
                    ])]
                },
                TestAction::Commit => {
                    state.log.push("commit");
                    smallvec![Effect::None]
                },
                TestAction::Finish => {
                    state.log.push("finish");
                    SmallVec::new()
                },
                TestAction::Loop => {
                    state.log.push("loop");
                    smallvec![Effect::send(TestAction::Loop)]
                },
            }
        }
    }

    #[tokio::test]
    async fn test_feedback_applied_before_send_returns() {
        let store = Store::new(TestState::default(), TestReducer, ());

        let reduced = store.send(TestAction::Start).await;

        assert_eq!(reduced, Ok(3));
        let log = store.state(|s| s.log.clone()).await;
        assert_eq!(log, vec!["start", "commit", "finish"]);
    }

    #[tokio::test]
    async fn test_no_effects_reduces_once() {
        let store = Store::new(TestState::default(), TestReducer, ());

        assert_eq!(store.send(TestAction::Finish).await, Ok(1));
        assert_eq!(store.state(|s| s.log.len()).await, 1);
    }

    #[tokio::test]
    async fn test_feedback_limit() {
        let config = StoreConfig::default().with_max_feedback_actions(3);
        let store = Store::with_config(TestState::default(), TestReducer, (), config);

        let result = store.send(TestAction::Loop).await;

        assert_eq!(result, Err(StoreError::FeedbackLimitExceeded(3)));
        // The sent action plus three feedback actions were applied
        assert_eq!(store.state(|s| s.log.len()).await, 4);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = Store::new(TestState::default(), TestReducer, ());
        let handle = store.clone();

        let _ = handle.send(TestAction::Commit).await;

        assert_eq!(store.state(|s| s.log.clone()).await, vec!["commit"]);
    }
}
