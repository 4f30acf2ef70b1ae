//! Error types for the todo crate.
//!
//! Reducing an action never fails. These errors come from the edges: decoding
//! actions and parsing commands typed by a user.

use thiserror::Error;

/// Errors from decoding or parsing todo requests
#[derive(Error, Debug)]
pub enum TodoError {
    /// Todo text was empty or only whitespace
    #[error("Todo text cannot be blank")]
    BlankText,

    /// An identifier was not a non-negative integer
    #[error("Invalid todo id: {0:?}")]
    InvalidId(String),

    /// The first word of a command line is not a known command
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// A command was given without its required argument
    #[error("Missing argument for `{0}`")]
    MissingArgument(&'static str),

    /// JSON encoding or decoding failed
    #[error("Invalid action JSON: {0}")]
    Json(#[from] serde_json::Error),
}
