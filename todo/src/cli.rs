//! Line-oriented front end for the demo binary.
//!
//! Parses what the user types into [`Command`]s and renders lists as text.
//! Blank `add` input is rejected here, before anything reaches the store.

use crate::error::TodoError;
use crate::types::{TodoAction, TodoId, TodoList};
use std::fmt::Write as _;

/// Shown for `help`
pub const HELP: &str = "\
Commands:
  add <text>     add a todo
  toggle <id>    mark a todo complete / not complete
  remove <id>    delete a todo
  list           show all todos
  json <action>  send a raw action, e.g. {\"type\":\"toggle\",\"id\":1}
  help           show this message
  quit           exit";

/// One parsed input line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Send an action to the store
    Send(TodoAction),
    /// Print the list
    List,
    /// Print usage
    Help,
    /// Leave the loop
    Quit,
    /// Nothing typed
    Empty,
}

impl Command {
    /// Parses one line of input
    ///
    /// # Errors
    ///
    /// - [`TodoError::BlankText`] for `add` without text
    /// - [`TodoError::MissingArgument`] for `toggle`/`remove`/`json` without one
    /// - [`TodoError::InvalidId`] for a non-numeric id
    /// - [`TodoError::Json`] for malformed action JSON
    /// - [`TodoError::UnknownCommand`] for anything else
    pub fn parse(line: &str) -> Result<Self, TodoError> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        match word.to_ascii_lowercase().as_str() {
            "" => Ok(Self::Empty),
            "add" => {
                if rest.is_empty() {
                    return Err(TodoError::BlankText);
                }
                Ok(Self::Send(TodoAction::Add {
                    text: rest.to_string(),
                }))
            },
            "toggle" => Ok(Self::Send(TodoAction::Toggle {
                id: parse_id("toggle", rest)?,
            })),
            "remove" | "rm" => Ok(Self::Send(TodoAction::Remove {
                id: parse_id("remove", rest)?,
            })),
            "json" => {
                if rest.is_empty() {
                    return Err(TodoError::MissingArgument("json"));
                }
                Ok(Self::Send(TodoAction::from_json(rest)?))
            },
            "list" | "ls" => Ok(Self::List),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err(TodoError::UnknownCommand(word.to_string())),
        }
    }
}

fn parse_id(command: &'static str, arg: &str) -> Result<TodoId, TodoError> {
    if arg.is_empty() {
        return Err(TodoError::MissingArgument(command));
    }
    arg.parse()
}

/// Renders the list one todo per line, `[x]` marking completed ones
#[must_use]
pub fn render(list: &TodoList) -> String {
    if list.is_empty() {
        return "No todos yet".to_string();
    }

    let mut out = String::new();
    for item in list {
        let mark = if item.completed { 'x' } else { ' ' };
        let _ = writeln!(out, "[{mark}] {:>3}  {}", item.id, item.text);
    }
    let _ = write!(
        out,
        "{} done, {} remaining",
        list.completed_count(),
        list.remaining_count()
    );
    out
}
