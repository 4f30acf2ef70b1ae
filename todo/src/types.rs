//! Domain types for the todo list.
//!
//! A [`TodoList`] is an immutable, ordered sequence of [`TodoItem`]s. Every
//! transition (`add`, `toggle`, `remove`) returns a new list and leaves the
//! receiver untouched; records that a transition does not change are shared
//! between the old and the new list.

use crate::error::TodoError;
use composable_todo_macros::Action;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Text of the item every new list starts with
pub const SEED_TEXT: &str = "Learn React";

/// Unique identifier for a todo item
///
/// Issued by the owning [`TodoList`] from a monotonic counter, never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    /// Identifier of the seed item
    pub const SEED: Self = Self(1);

    /// Wraps a raw identifier
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for TodoId {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse()
            .map(Self)
            .map_err(|_| TodoError::InvalidId(s.to_string()))
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique identifier
    pub id: TodoId,
    /// What needs doing
    pub text: String,
    /// Whether the todo is completed
    pub completed: bool,
}

impl TodoItem {
    /// Creates a new, not yet completed, todo item
    #[must_use]
    pub fn new(id: TodoId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }

    /// Returns a copy with `completed` negated
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }
}

/// Ordered, immutable list of todos
///
/// Cloning is cheap: the sequence and its records are reference counted.
/// Identifiers are pairwise distinct and every identifier handed out by
/// [`add`](Self::add) is greater than any identifier the list has held.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TodoList {
    items: Arc<[Arc<TodoItem>]>,
    /// `None` once the identifier space is used up
    #[serde(skip)]
    next_id: Option<u64>,
}

impl TodoList {
    /// Creates the starting list: a single seed item
    #[must_use]
    pub fn new() -> Self {
        Self::from_items([TodoItem::new(TodoId::SEED, SEED_TEXT)])
    }

    /// Creates a list with no items
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Arc::from(Vec::new()),
            next_id: Some(1),
        }
    }

    /// Builds a list from existing records, in the given order
    ///
    /// A record whose identifier was already seen is dropped, so the result
    /// always satisfies the uniqueness invariant.
    #[must_use]
    pub(crate) fn from_items(items: impl IntoIterator<Item = TodoItem>) -> Self {
        let mut seen = HashSet::new();
        let items: Arc<[Arc<TodoItem>]> = items
            .into_iter()
            .filter(|item| {
                let fresh = seen.insert(item.id);
                if !fresh {
                    tracing::debug!(id = %item.id, "Dropping todo with duplicate id");
                }
                fresh
            })
            .map(Arc::new)
            .collect();

        let next_id = items
            .iter()
            .map(|item| item.id.get())
            .max()
            .map_or(Some(1), |max| max.checked_add(1));

        Self { items, next_id }
    }

    /// Returns a new list keeping only the records `keep` accepts
    ///
    /// The identifier counter is carried over, so dropped ids stay retired.
    #[must_use]
    pub(crate) fn retain(&self, mut keep: impl FnMut(&TodoItem) -> bool) -> Self {
        let items = self.items.iter().filter(|item| keep(item)).cloned().collect();

        Self {
            items,
            next_id: self.next_id,
        }
    }

    // ========== Transitions ==========

    /// Returns a new list with `text` appended as a not yet completed item
    ///
    /// Accepts any string. If the identifier space is exhausted the list is
    /// returned unchanged.
    #[must_use]
    pub fn add(&self, text: impl Into<String>) -> Self {
        let Some(raw) = self.next_id else {
            tracing::warn!("Todo identifiers exhausted, ignoring add");
            return self.clone();
        };

        let item = Arc::new(TodoItem::new(TodoId(raw), text));
        let items = self
            .items
            .iter()
            .cloned()
            .chain(std::iter::once(item))
            .collect();

        Self {
            items,
            next_id: raw.checked_add(1),
        }
    }

    /// Returns a new list with the completion flag of `id` flipped
    ///
    /// Unknown ids leave the list unchanged.
    #[must_use]
    pub fn toggle(&self, id: TodoId) -> Self {
        let Some(index) = self.position(id) else {
            return self.clone();
        };

        let items = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                if i == index {
                    Arc::new(item.toggled())
                } else {
                    Arc::clone(item)
                }
            })
            .collect();

        Self {
            items,
            next_id: self.next_id,
        }
    }

    /// Returns a new list without `id`
    ///
    /// Unknown ids leave the list unchanged.
    #[must_use]
    pub fn remove(&self, id: TodoId) -> Self {
        let Some(index) = self.position(id) else {
            return self.clone();
        };

        let items = self
            .items
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, item)| Arc::clone(item))
            .collect();

        Self {
            items,
            next_id: self.next_id,
        }
    }

    /// Applies any action; [`TodoAction::Unrecognized`] is a no-op
    #[must_use]
    pub fn apply(&self, action: &TodoAction) -> Self {
        match action {
            TodoAction::Add { text } => self.add(text.as_str()),
            TodoAction::Toggle { id } => self.toggle(*id),
            TodoAction::Remove { id } => self.remove(*id),
            TodoAction::Unrecognized => self.clone(),
        }
    }

    // ========== Queries ==========

    /// Returns the number of todos
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no todos
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the todos in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &TodoItem> {
        self.items.iter().map(|item| &**item)
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.iter().find(|item| item.id == id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn contains(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }

    /// Returns the most recently added todo still present
    #[must_use]
    pub fn last(&self) -> Option<&TodoItem> {
        self.items.last().map(|item| &**item)
    }

    /// Returns all identifiers in order
    #[must_use]
    pub fn ids(&self) -> Vec<TodoId> {
        self.iter().map(|item| item.id).collect()
    }

    /// Returns the number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.iter().filter(|item| item.completed).count()
    }

    /// Returns the number of todos still open
    #[must_use]
    pub fn remaining_count(&self) -> usize {
        self.len() - self.completed_count()
    }

    /// The identifier the next `add` will assign
    #[must_use]
    pub fn next_id(&self) -> Option<TodoId> {
        self.next_id.map(TodoId)
    }

    fn position(&self, id: TodoId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }
}

impl Default for TodoList {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a TodoList {
    type Item = &'a TodoItem;
    type IntoIter =
        std::iter::Map<std::slice::Iter<'a, Arc<TodoItem>>, fn(&'a Arc<TodoItem>) -> &'a TodoItem>;

    fn into_iter(self) -> Self::IntoIter {
        let item_ref: fn(&'a Arc<TodoItem>) -> &'a TodoItem = Arc::as_ref;
        self.items.iter().map(item_ref)
    }
}

/// Requests the store understands
///
/// Encoded as internally tagged JSON, e.g. `{"type":"toggle","id":2}`. Any
/// tag other than `add`, `toggle` or `remove` decodes to
/// [`Unrecognized`](Self::Unrecognized).
#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TodoAction {
    /// Append a new todo
    Add {
        /// What needs doing
        text: String,
    },

    /// Flip the completion flag of a todo
    Toggle {
        /// Todo to flip
        id: TodoId,
    },

    /// Delete a todo
    Remove {
        /// Todo to delete
        id: TodoId,
    },

    /// Any other request; reducing it changes nothing
    #[serde(other)]
    Unrecognized,
}

impl TodoAction {
    /// Decodes an action from its JSON form
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Json`] for malformed JSON, a missing `type`, or
    /// a known tag with a malformed payload. Unknown tags are not errors.
    pub fn from_json(json: &str) -> Result<Self, TodoError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encodes the action as JSON
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, TodoError> {
        Ok(serde_json::to_string(self)?)
    }
}
