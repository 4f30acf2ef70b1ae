//! # Composable Todo Runtime
//!
//! Runtime implementation for the reducer architecture.
//!
//! This crate provides the [`Store`] that owns state, runs the reducer, and
//! executes the effects it returns.
//!
//! ## Execution Model
//!
//! The store is single-threaded and synchronous: [`Store::send`] reduces the
//! action and runs every resulting effect to completion before returning.
//! `Effect::Dispatch` feeds actions straight back into the reducer, bounded by
//! [`StoreConfig::max_effect_depth`].
//!
//! ## Example
//!
//! ```ignore
//! use composable_todo_runtime::Store;
//!
//! let mut store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething)?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field);
//! ```

use composable_todo_core::{action::Action, effect::Effect, reducer::Reducer};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Dispatched actions kept producing further dispatches
        ///
        /// The state reflects every reduction that ran before the limit was hit.
        #[error("Effect feedback exceeded the maximum depth of {0}")]
        EffectDepthExceeded(usize),
    }
}

pub use error::StoreError;

/// Configuration for a [`Store`]
///
/// # Example
///
/// ```
/// use composable_todo_runtime::StoreConfig;
///
/// let config = StoreConfig::default().with_max_effect_depth(8);
/// assert_eq!(config.max_effect_depth, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// How many levels of `Effect::Dispatch` feedback a single `send` may run
    pub max_effect_depth: usize,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(max_effect_depth: usize) -> Self {
        Self { max_effect_depth }
    }

    /// Set the maximum feedback depth
    #[must_use]
    pub const fn with_max_effect_depth(mut self, depth: usize) -> Self {
        self.max_effect_depth = depth;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_effect_depth: 32,
        }
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{Action, Effect, Reducer, StoreConfig, StoreError};
    use composable_todo_core::SmallVec;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (owned, mutated only through the reducer)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
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
        state: S,
        reducer: R,
        environment: E,
        config: StoreConfig,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        A: Action,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new store with a custom configuration
        #[must_use]
        pub const fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            Self {
                state: initial_state,
                reducer,
                environment,
                config,
            }
        }

        /// Send an action to the store
        ///
        /// Reduces the action, then runs the returned effects in order. Actions
        /// dispatched by effects are reduced before this call returns.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::EffectDepthExceeded`] if dispatch feedback
        /// nests deeper than [`StoreConfig::max_effect_depth`].
        #[tracing::instrument(skip_all, fields(action = action.name()), name = "store_send")]
        pub fn send(&mut self, action: A) -> Result<(), StoreError> {
            let effects = self.reduce(action);
            let result = self.run_effects(effects, 1);
            tracing::trace!("Action processing completed");
            result
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let count = store.state(|s| s.len());
        /// ```
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            f(&self.state)
        }

        /// The injected environment
        #[must_use]
        pub const fn environment(&self) -> &E {
            &self.environment
        }

        /// The store's configuration
        #[must_use]
        pub const fn config(&self) -> StoreConfig {
            self.config
        }

        /// Consume the store and return its state
        #[must_use]
        pub fn into_state(self) -> S {
            self.state
        }

        fn reduce(&mut self, action: A) -> SmallVec<[Effect<A>; 4]> {
            let name = action.name();
            tracing::debug!(action = name, "Processing action");
            metrics::counter!("store.actions.total", "action" => name).increment(1);

            let effects = self
                .reducer
                .reduce(&mut self.state, action, &self.environment);

            tracing::trace!("Reducer completed, returned {} effects", effects.len());
            effects
        }

        fn run_effects(
            &mut self,
            effects: SmallVec<[Effect<A>; 4]>,
            depth: usize,
        ) -> Result<(), StoreError> {
            for effect in effects {
                self.run_effect(effect, depth)?;
            }
            Ok(())
        }

        fn run_effect(&mut self, effect: Effect<A>, depth: usize) -> Result<(), StoreError> {
            match effect {
                Effect::None => Ok(()),
                Effect::Sequential(effects) => {
                    for effect in effects {
                        self.run_effect(effect, depth)?;
                    }
                    Ok(())
                },
                Effect::Dispatch(action) => {
                    if depth > self.config.max_effect_depth {
                        tracing::warn!(
                            action = action.name(),
                            max_depth = self.config.max_effect_depth,
                            "Dropping dispatched action: feedback depth exceeded"
                        );
                        metrics::counter!("store.effects.depth_exceeded").increment(1);
                        return Err(StoreError::EffectDepthExceeded(
                            self.config.max_effect_depth,
                        ));
                    }

                    metrics::counter!("store.effects.total").increment(1);
                    let effects = self.reduce(*action);
                    self.run_effects(effects, depth + 1)
                },
            }
        }
    }
}

pub use store::Store;
