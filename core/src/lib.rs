//! # Composable Todo Core
//!
//! Core traits and types for the reducer architecture.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature
//! - **Action**: All possible inputs to a reducer
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Follow-up work descriptions (not execution)
//! - **Environment**: Injected dependencies and policies
//!
//! ## Example
//!
//! ```
//! use composable_todo_core::{action::Action, effect::Effect, reducer::Reducer, SmallVec};
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//! }
//!
//! impl Action for CounterAction {
//!     fn name(&self) -> &'static str {
//!         "increment"
//!     }
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = u32;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut u32,
//!         action: CounterAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<CounterAction>; 4]> {
//!         match action {
//!             CounterAction::Increment => *state += 1,
//!         }
//!         SmallVec::new()
//!     }
//! }
//!
//! let mut count = 0;
//! let effects = CounterReducer.reduce(&mut count, CounterAction::Increment, &());
//! assert_eq!(count, 1);
//! assert!(effects.is_empty());
//! ```

// Re-export commonly used types
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

/// Action module - the unified input type for reducers
pub mod action {
    /// Behavior shared by every action type the runtime `Store` can process.
    ///
    /// Usually derived with `#[derive(Action)]` from `composable-todo-macros`,
    /// which names each variant in `snake_case`.
    pub trait Action {
        /// Stable, human-readable name of this action variant.
        ///
        /// Used as a log field and a metrics label, so it must not depend on
        /// the variant's payload.
        fn name(&self) -> &'static str;
    }
}

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::SmallVec;
    use super::effect::Effect;

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

        /// Reduce an action into a new state and follow-up effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Replaces `state` with the next state
        /// 3. Returns effect descriptions to be executed
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Follow-up work descriptions
///
/// Effects are values, not execution. A reducer returns them and the runtime
/// `Store` runs them after the reduction completes.
pub mod effect {
    /// Effect type - describes work to be executed after a reduction
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Feed an action back into the reducer
        Dispatch(Box<Action>),

        /// Run effects in order
        Sequential(Vec<Effect<Action>>),
    }

    impl<Action> Effect<Action> {
        /// Feed `action` back into the reducer once the current reduction finishes
        #[must_use]
        pub fn dispatch(action: Action) -> Self {
            Self::Dispatch(Box::new(action))
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Self>) -> Self {
            Self::Sequential(effects)
        }

        /// Returns true if running this effect does nothing
        #[must_use]
        pub fn is_none(&self) -> bool {
            match self {
                Self::None => true,
                Self::Dispatch(_) => false,
                Self::Sequential(effects) => effects.iter().all(Self::is_none),
            }
        }
    }
}
