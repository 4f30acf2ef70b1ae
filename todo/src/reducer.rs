//! Reducer logic for the todo list.
//!
//! The reducer swaps the current [`TodoList`] for the one produced by the
//! matching transition. It never produces effects and never fails: requests
//! that cannot apply (unknown id, blank text, unrecognized tag) leave the list
//! as it was.

use crate::types::{TodoAction, TodoList};
use composable_todo_core::{SmallVec, effect::Effect, reducer::Reducer};

/// Which texts the store accepts for new todos
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextPolicy {
    /// Ignore adds whose text is empty or whitespace-only
    #[default]
    RejectBlank,
    /// Accept every string
    AcceptAny,
}

impl TextPolicy {
    /// Returns true if an add with `text` should go through
    #[must_use]
    pub fn admits(self, text: &str) -> bool {
        match self {
            Self::RejectBlank => !text.trim().is_empty(),
            Self::AcceptAny => true,
        }
    }
}

/// Environment for the todo reducer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TodoEnvironment {
    /// Policy applied to `add` requests
    pub policy: TextPolicy,
}

impl TodoEnvironment {
    /// Creates an environment with the default policy
    #[must_use]
    pub const fn new() -> Self {
        Self {
            policy: TextPolicy::RejectBlank,
        }
    }

    /// Sets the text policy
    #[must_use]
    pub const fn with_policy(mut self, policy: TextPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Reducer for the todo list
#[derive(Clone, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for TodoReducer {
    type State = TodoList;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let next = match &action {
            TodoAction::Add { text } if !env.policy.admits(text) => {
                tracing::debug!(policy = ?env.policy, "Ignoring add with blank text");
                return SmallVec::new();
            },
            TodoAction::Toggle { id } | TodoAction::Remove { id } if !state.contains(*id) => {
                tracing::debug!(%id, "No todo with this id, nothing to do");
                return SmallVec::new();
            },
            TodoAction::Unrecognized => {
                tracing::debug!("Ignoring unrecognized action");
                return SmallVec::new();
            },
            TodoAction::Add { .. } | TodoAction::Toggle { .. } | TodoAction::Remove { .. } => {
                state.apply(&action)
            },
        };

        *state = next;
        SmallVec::new()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::types::{SEED_TEXT, TodoId, TodoItem};
    use composable_todo_testing::{ReducerTest, assertions};

    fn two_open() -> TodoList {
        TodoList::from_items([
            TodoItem::new(TodoId::new(1), "first"),
            TodoItem::new(TodoId::new(2), "second"),
        ])
    }

    #[test]
    fn test_add_appends() {
        ReducerTest::new(TodoReducer::new())
            .with_env(TodoEnvironment::new())
            .given_state(TodoList::new())
            .when_action(TodoAction::Add {
                text: "Buy milk".to_string(),
            })
            .then_state(|list| {
                assert_eq!(list.len(), 2);
                let seed = list.iter().next().unwrap();
                assert_eq!(seed, &TodoItem::new(TodoId::SEED, SEED_TEXT));
                let added = list.last().unwrap();
                assert_eq!(added.text, "Buy milk");
                assert!(!added.completed);
                assert_ne!(added.id, TodoId::SEED);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_add_preserves_order() {
        ReducerTest::new(TodoReducer::new())
            .with_env(TodoEnvironment::new())
            .given_state(TodoList::new())
            .when_actions([
                TodoAction::Add { text: "A".into() },
                TodoAction::Add { text: "B".into() },
            ])
            .then_state(|list| {
                let texts: Vec<_> = list.iter().map(|item| item.text.as_str()).collect();
                assert_eq!(texts, vec![SEED_TEXT, "A", "B"]);
            })
            .run();
    }

    #[test]
    fn test_blank_add_is_ignored_by_default() {
        ReducerTest::new(TodoReducer::new())
            .with_env(TodoEnvironment::default())
            .given_state(TodoList::new())
            .when_actions([
                TodoAction::Add { text: String::new() },
                TodoAction::Add {
                    text: " \t\n ".to_string(),
                },
            ])
            .then_state(|list| assert_eq!(list, &TodoList::new()))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_blank_add_accepted_when_policy_allows() {
        ReducerTest::new(TodoReducer::new())
            .with_env(TodoEnvironment::new().with_policy(TextPolicy::AcceptAny))
            .given_state(TodoList::new())
            .when_action(TodoAction::Add {
                text: "   ".to_string(),
            })
            .then_state(|list| {
                assert_eq!(list.len(), 2);
                assert_eq!(list.last().unwrap().text, "   ");
            })
            .run();
    }

    #[test]
    fn test_text_is_stored_untrimmed() {
        ReducerTest::new(TodoReducer::new())
            .with_env(TodoEnvironment::new())
            .given_state(TodoList::empty())
            .when_action(TodoAction::Add {
                text: "  padded  ".to_string(),
            })
            .then_state(|list| assert_eq!(list.last().unwrap().text, "  padded  "))
            .run();
    }

    #[test]
    fn test_toggle_flips_exactly_one() {
        ReducerTest::new(TodoReducer::new())
            .with_env(TodoEnvironment::new())
            .given_state(two_open())
            .when_action(TodoAction::Toggle { id: TodoId::new(2) })
            .then_state(|list| {
                assert!(!list.get(TodoId::new(1)).unwrap().completed);
                assert!(list.get(TodoId::new(2)).unwrap().completed);
                assert_eq!(list.ids(), vec![TodoId::new(1), TodoId::new(2)]);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_double_toggle_restores() {
        ReducerTest::new(TodoReducer::new())
            .with_env(TodoEnvironment::new())
            .given_state(two_open())
            .when_actions([
                TodoAction::Toggle { id: TodoId::new(2) },
                TodoAction::Toggle { id: TodoId::new(2) },
            ])
            .then_state(|list| assert_eq!(list, &two_open()))
            .run();
    }

    #[test]
    fn test_toggle_missing_id_is_noop() {
        ReducerTest::new(TodoReducer::new())
            .with_env(TodoEnvironment::new())
            .given_state(two_open())
            .when_action(TodoAction::Toggle {
                id: TodoId::new(999),
            })
            .then_state(|list| assert_eq!(list, &two_open()))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_remove_excludes_exactly_one() {
        ReducerTest::new(TodoReducer::new())
            .with_env(TodoEnvironment::new())
            .given_state(two_open().add("third"))
            .when_action(TodoAction::Remove { id: TodoId::new(2) })
            .then_state(|list| {
                assert_eq!(list.ids(), vec![TodoId::new(1), TodoId::new(3)]);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_remove_missing_id_is_noop() {
        ReducerTest::new(TodoReducer::new())
            .with_env(TodoEnvironment::new())
            .given_state(two_open())
            .when_action(TodoAction::Remove {
                id: TodoId::new(999),
            })
            .then_state(|list| assert_eq!(list, &two_open()))
            .run();
    }

    #[test]
    fn test_unrecognized_action_is_noop() {
        let action = TodoAction::from_json(r#"{"type":"archive","id":1}"#).unwrap();

        ReducerTest::new(TodoReducer::new())
            .with_env(TodoEnvironment::new())
            .given_state(two_open())
            .when_action(action)
            .then_state(|list| assert_eq!(list, &two_open()))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_text_policy_admits() {
        assert!(TextPolicy::RejectBlank.admits("x"));
        assert!(TextPolicy::RejectBlank.admits("  x  "));
        assert!(!TextPolicy::RejectBlank.admits(""));
        assert!(!TextPolicy::RejectBlank.admits("\u{3000} \t"));
        assert!(TextPolicy::AcceptAny.admits(""));
    }
}
