//! Core of the shelf command dispatcher.
//!
//! A [`CommandRegistry`] holds commands made of a literal prefix, a list of
//! typed positional parameters and a handler. Parsing a line selects the first
//! command whose prefix starts it, coerces the remaining tokens to the declared
//! parameter types and invokes the handler with the resulting [`Arguments`].

mod coerce;
mod command;
mod error;
mod registry;

pub use coerce::{CoerceFn, CoercerRegistry, ParamType, Parameter};
pub use command::{Arguments, Command, CommandBuilder, Handler, PrefixMatching};
pub use error::{Result, ShelfError};
pub use registry::{CommandRegistry, DEFAULT_CUTOFF, DEFAULT_SUGGESTIONS};

/// Re-export of the value type arguments and results are expressed in
pub use serde_json::Value;

/// Prelude module for commonly used types
pub mod prelude {
    pub use crate::{
        Arguments,
        Command,
        CommandRegistry,
        ParamType,
        Parameter,
        PrefixMatching,
        Result,
        ShelfError,
        Value,
    };
}
