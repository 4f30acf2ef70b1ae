//! In-memory todo list built on the Composable Todo reducer architecture.
//!
//! - [`TodoList`]: immutable, ordered list with pure `add`/`toggle`/`remove`
//!   transitions and structurally shared records
//! - [`TodoAction`]: the requests, one tagged enum, JSON encodable
//! - [`TodoReducer`]: applies actions, enforcing the [`TextPolicy`]
//! - [`TodoStore`]: the store a presentation layer talks to
//!
//! # Quick Start
//!
//! ```
//! use todo::{TodoId, TodoStore};
//!
//! let mut store = TodoStore::new();
//!
//! let id = store.add("Write tests").expect("non-blank text is accepted");
//! store.toggle(id);
//! store.remove(TodoId::SEED);
//!
//! let list = store.snapshot();
//! assert_eq!(list.len(), 1);
//! assert!(list.get(id).is_some_and(|item| item.completed));
//! ```

pub mod cli;
pub mod error;
pub mod reducer;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use error::TodoError;
pub use reducer::{TextPolicy, TodoEnvironment, TodoReducer};
pub use store::TodoStore;
pub use types::{SEED_TEXT, TodoAction, TodoId, TodoItem, TodoList};
