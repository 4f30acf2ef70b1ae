//! `TodoStore`: the todo list behind a runtime [`Store`].

use crate::reducer::{TodoEnvironment, TodoReducer};
use crate::types::{TodoAction, TodoId, TodoList};
use composable_todo_runtime::Store;

/// Authoritative todo list for a presentation layer
///
/// Every request goes through the reducer; readers get immutable
/// [`TodoList`] snapshots that later requests never touch.
pub struct TodoStore {
    inner: Store<TodoList, TodoAction, TodoEnvironment, TodoReducer>,
}

impl TodoStore {
    /// Creates a store holding the seed item, rejecting blank text
    #[must_use]
    pub fn new() -> Self {
        Self::with_environment(TodoEnvironment::default())
    }

    /// Creates a seeded store with a custom environment
    #[must_use]
    pub fn with_environment(env: TodoEnvironment) -> Self {
        Self::from_list(TodoList::new(), env)
    }

    /// Creates a store starting from an existing list
    ///
    /// Records whose text the environment's policy rejects are dropped, so the
    /// store never holds a todo its own `add` would have refused.
    #[must_use]
    pub fn from_list(list: TodoList, env: TodoEnvironment) -> Self {
        let policy = env.policy;
        let list = list.retain(|item| {
            let admitted = policy.admits(&item.text);
            if !admitted {
                tracing::debug!(id = %item.id, ?policy, "Dropping todo the text policy rejects");
            }
            admitted
        });

        Self {
            inner: Store::new(list, TodoReducer::new(), env),
        }
    }

    /// Returns the current list
    #[must_use]
    pub fn snapshot(&self) -> TodoList {
        self.inner.state(Clone::clone)
    }

    /// The environment the store was built with
    #[must_use]
    pub const fn environment(&self) -> &TodoEnvironment {
        self.inner.environment()
    }

    /// Adds a todo, returning its id, or `None` if the text was rejected
    pub fn add(&mut self, text: impl Into<String>) -> Option<TodoId> {
        let before = self.inner.state(TodoList::len);
        self.dispatch(TodoAction::Add { text: text.into() });

        self.inner
            .state(|list| (list.len() > before).then(|| list.last().map(|item| item.id)))
            .flatten()
    }

    /// Flips the completion flag of `id`; unknown ids are ignored
    pub fn toggle(&mut self, id: TodoId) {
        self.dispatch(TodoAction::Toggle { id });
    }

    /// Deletes `id`; unknown ids are ignored
    pub fn remove(&mut self, id: TodoId) {
        self.dispatch(TodoAction::Remove { id });
    }

    /// Reduces any action against the current list
    pub fn dispatch(&mut self, action: TodoAction) {
        if let Err(error) = self.inner.send(action) {
            tracing::error!(%error, "Todo store failed to run effects");
        }

        #[allow(clippy::cast_precision_loss)] // Gauge precision is fine for list sizes
        metrics::gauge!("todo.items").set(self.inner.state(TodoList::len) as f64);
    }
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TodoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoStore")
            .field("list", &self.snapshot())
            .field("environment", self.environment())
            .finish()
    }
}
