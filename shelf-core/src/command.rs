//! A single command: a literal prefix bound to a handler with typed,
//! positional parameters.
//!
//! Parsing a line against a command strips the prefix words, merges one quoted
//! run of tokens into a single argument, checks the argument count, coerces each
//! token to its declared [`ParamType`] and finally calls the handler with the
//! resulting [`Arguments`].

use std::collections::HashSet;
use std::fmt;

use anyhow::anyhow;
use serde_json::Value;
use tracing::{debug, trace};

use crate::coerce::{ParamType, Parameter};
use crate::error::{Result, ShelfError};

/// Characters that open and close a quoted argument
const QUOTES: [char; 2] = ['"', '\''];

/// Function invoked with the coerced arguments of a matching line.
pub type Handler = dyn Fn(&Arguments) -> anyhow::Result<Value>;

/// How a command prefix is compared against the start of an input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrefixMatching {
    /// Raw string prefix test: `get` also starts `getter 1`
    #[default]
    Literal,
    /// The prefix must be followed by whitespace or the end of the line
    WordBoundary,
}

impl PrefixMatching {
    fn starts(self, text: &str, prefix: &str) -> bool {
        match text.strip_prefix(prefix) {
            None => false,
            Some(rest) => match self {
                PrefixMatching::Literal => true,
                PrefixMatching::WordBoundary => {
                    prefix.is_empty()
                        || rest.is_empty()
                        || rest.starts_with(char::is_whitespace)
                        || prefix.ends_with(char::is_whitespace)
                }
            },
        }
    }
}

/// Coerced argument values in declaration order, addressable by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    entries: Vec<(String, Value)>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: Value) {
        self.entries.push((name.into(), value));
    }

    /// Value of the named parameter
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, value)| value)
    }

    /// Value at a positional index
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.entries.get(index).map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Positional values, in declaration order
    pub fn values(&self) -> Vec<Value> {
        self.entries.iter().map(|(_, value)| value.clone()).collect()
    }

    fn require(&self, name: &str) -> anyhow::Result<&Value> {
        self.get(name)
            .ok_or_else(|| anyhow!("Missing argument: {}", name))
    }

    pub fn i64(&self, name: &str) -> anyhow::Result<i64> {
        self.require(name)?
            .as_i64()
            .ok_or_else(|| anyhow!("Argument {} is not an int", name))
    }

    pub fn f64(&self, name: &str) -> anyhow::Result<f64> {
        self.require(name)?
            .as_f64()
            .ok_or_else(|| anyhow!("Argument {} is not a float", name))
    }

    pub fn str(&self, name: &str) -> anyhow::Result<&str> {
        self.require(name)?
            .as_str()
            .ok_or_else(|| anyhow!("Argument {} is not a string", name))
    }

    pub fn bool(&self, name: &str) -> anyhow::Result<bool> {
        self.require(name)?
            .as_bool()
            .ok_or_else(|| anyhow!("Argument {} is not a bool", name))
    }
}

/// A registered command.
pub struct Command {
    prefix: String,
    prefix_word_count: usize,
    parameters: Vec<Parameter>,
    signature: String,
    matching: PrefixMatching,
    handler: Box<Handler>,
}

impl Command {
    /// Create a command from its prefix, its ordered parameters and a handler.
    ///
    /// Parameter names must be unique; the order given is the order tokens are
    /// bound in.
    pub fn new<F>(prefix: &str, parameters: Vec<Parameter>, handler: F) -> Result<Self>
    where
        F: Fn(&Arguments) -> anyhow::Result<Value> + 'static,
    {
        let mut seen = HashSet::new();
        for param in &parameters {
            if !seen.insert(param.name.as_str()) {
                return Err(ShelfError::InvalidCommand(format!(
                    "Duplicate parameter \"{}\" in command \"{}\"",
                    param.name, prefix
                )));
            }
        }

        let mut signature = prefix.to_string();
        for param in &parameters {
            signature.push(' ');
            signature.push_str(&param.render());
        }

        Ok(Self {
            prefix: prefix.to_string(),
            prefix_word_count: prefix.split_whitespace().count(),
            parameters,
            signature,
            matching: PrefixMatching::default(),
            handler: Box::new(handler),
        })
    }

    /// Start building a command with the given prefix
    pub fn builder(prefix: &str) -> CommandBuilder {
        CommandBuilder {
            prefix: prefix.to_string(),
            parameters: Vec::new(),
        }
    }

    pub fn with_matching(mut self, matching: PrefixMatching) -> Self {
        self.matching = matching;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn matching(&self) -> PrefixMatching {
        self.matching
    }

    /// True if the trimmed text starts with this command's prefix, regardless
    /// of what follows.
    pub fn partial(&self, text: &str) -> bool {
        self.matching.starts(text.trim(), &self.prefix)
    }

    /// True if the text starts with the prefix and carries exactly one token
    /// per parameter once quoted runs are merged. Types are not checked.
    pub fn matches(&self, text: &str) -> bool {
        let text = text.trim();
        self.matches_tokens(text, &self.tokenize(text))
    }

    fn matches_tokens(&self, text: &str, tokens: &[String]) -> bool {
        self.partial(text) && tokens.len() == self.parameters.len()
    }

    /// Split the argument part of a line into tokens, merging a quoted run
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens: Vec<String> = text
            .split_whitespace()
            .skip(self.prefix_word_count)
            .map(str::to_string)
            .collect();
        merge_quoted(&mut tokens);
        tokens
    }

    /// Match and coerce a line without invoking the handler.
    pub fn bind(&self, text: &str) -> Result<Arguments> {
        let text = text.trim();
        let tokens = self.tokenize(text);
        trace!(command = %self.signature, ?tokens, "Tokenized input");

        if !self.matches_tokens(text, &tokens) {
            return Err(ShelfError::Mismatch {
                text: text.to_string(),
                signature: self.signature.clone(),
            });
        }

        let mut args = Arguments::new();
        for (param, token) in self.parameters.iter().zip(&tokens) {
            let value = param.ty.coerce(token).map_err(|reason| ShelfError::Coercion {
                token: token.clone(),
                parameter: param.name.clone(),
                signature: self.signature.clone(),
                reason,
            })?;
            args.push(param.name.clone(), value);
        }

        Ok(args)
    }

    /// Parse a line and return the handler's result.
    ///
    /// Handler failures come back as [`ShelfError::Handler`] untouched.
    pub fn parse(&self, text: &str) -> Result<Value> {
        let args = self.bind(text)?;
        debug!(command = %self.signature, args = args.len(), "Invoking handler");
        (self.handler)(&args).map_err(ShelfError::Handler)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Command(signature=\"{}\")", self.signature)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("prefix", &self.prefix)
            .field("parameters", &self.parameters)
            .field("signature", &self.signature)
            .field("matching", &self.matching)
            .finish_non_exhaustive()
    }
}

/// Fluent construction of a [`Command`].
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    prefix: String,
    parameters: Vec<Parameter>,
}

impl CommandBuilder {
    /// Append a typed parameter
    pub fn param(mut self, name: &str, ty: ParamType) -> Self {
        self.parameters.push(Parameter::new(name, ty));
        self
    }

    /// Append a parameter that takes its token as a string
    pub fn untyped(mut self, name: &str) -> Self {
        self.parameters.push(Parameter::untyped(name));
        self
    }

    /// Finish the command with its handler
    pub fn handler<F>(self, handler: F) -> Result<Command>
    where
        F: Fn(&Arguments) -> anyhow::Result<Value> + 'static,
    {
        Command::new(&self.prefix, self.parameters, handler)
    }
}

/// Merge one quoted run of tokens into a single token.
///
/// The most recent token opening with a quote is the start of the run; the
/// first token at or after it ending with any quote ends it and stops the
/// scan. Only that run is merged and the quote characters stay in the value.
pub(crate) fn merge_quoted(tokens: &mut Vec<String>) {
    let mut start = None;
    let mut end = None;

    for (i, token) in tokens.iter().enumerate() {
        if token.starts_with(QUOTES) {
            start = Some(i);
        }
        if start.is_some() && token.ends_with(QUOTES) {
            end = Some(i);
            break;
        }
    }

    if let (Some(s), Some(e)) = (start, end) {
        if e > s {
            let merged = tokens[s..=e].join(" ");
            tokens.drain(s + 1..=e);
            tokens[s] = merged;
        }
    }
}
