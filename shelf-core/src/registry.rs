//! Ordered collection of commands and line dispatch.

use std::collections::HashMap;

use serde_json::Value;
use similar::get_close_matches;
use tracing::debug;

use crate::coerce::Parameter;
use crate::command::{Arguments, Command, PrefixMatching};
use crate::error::{Result, ShelfError};

/// Default number of suggestions returned by [`CommandRegistry::close_commands`]
pub const DEFAULT_SUGGESTIONS: usize = 3;

/// Default similarity a prefix needs to be suggested
pub const DEFAULT_CUTOFF: f32 = 0.3;

/// Registry of commands, dispatched in registration order.
///
/// The first command whose prefix starts the input line handles it, even when
/// a later, more specific prefix would also have matched. Register specific
/// prefixes before general ones when that matters.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: Vec<Command>,
    prefixes: HashMap<String, usize>,
    matching: PrefixMatching,
}

impl CommandRegistry {
    /// Create a new, empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given prefix matching for every command registered afterwards
    pub fn with_matching(mut self, matching: PrefixMatching) -> Self {
        self.matching = matching;
        self
    }

    /// Add a command built elsewhere.
    ///
    /// Prefixes are not deduplicated: the earlier command keeps winning at
    /// dispatch while suggestions point at the latest one.
    pub fn add(&mut self, command: Command) {
        let command = command.with_matching(self.matching);
        debug!(signature = %command.signature(), "Registering command");
        self.prefixes
            .insert(command.prefix().to_string(), self.commands.len());
        self.commands.push(command);
    }

    /// Build and add a command from its prefix, parameters and handler
    pub fn register<F>(&mut self, prefix: &str, parameters: Vec<Parameter>, handler: F) -> Result<()>
    where
        F: Fn(&Arguments) -> anyhow::Result<Value> + 'static,
    {
        self.add(Command::new(prefix, parameters, handler)?);
        Ok(())
    }

    /// Parse a line with the first command whose prefix it starts with.
    ///
    /// The selected command is final: an arity or type failure is reported
    /// without trying later commands.
    pub fn parse(&self, text: &str) -> Result<Value> {
        match self.commands.iter().find(|command| command.partial(text)) {
            Some(command) => {
                debug!(signature = %command.signature(), "Dispatching input");
                command.parse(text)
            }
            None => {
                debug!(input = text, "No command matched");
                Err(ShelfError::NoMatch(text.to_string()))
            }
        }
    }

    /// Command signatures, one per line, in registration order
    pub fn help(&self) -> String {
        self.commands
            .iter()
            .map(Command::signature)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Up to `n` commands whose prefix resembles the first word of `text`,
    /// most similar first.
    pub fn suggest(&self, text: &str, n: usize, cutoff: f32) -> Vec<&Command> {
        let Some(word) = text.split_whitespace().next() else {
            return Vec::new();
        };

        let keys: Vec<&str> = self.prefixes.keys().map(String::as_str).collect();
        get_close_matches(word, &keys, n, cutoff)
            .into_iter()
            .filter_map(|prefix| self.prefixes.get(prefix))
            .map(|&index| &self.commands[index])
            .collect()
    }

    /// [`suggest`](Self::suggest) with the default limit and cutoff
    pub fn close_commands(&self, text: &str) -> Vec<&Command> {
        self.suggest(text, DEFAULT_SUGGESTIONS, DEFAULT_CUTOFF)
    }

    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
