//! Interactive shell for the shelf command dispatcher.
//!
//! The shell reads lines, answers the help and exit keywords itself and hands
//! everything else to a [`shelf_core::CommandRegistry`], printing results and
//! dispatch errors without ever leaving the loop on a failed command.

pub mod config;
pub mod demo;
pub mod prompt;
pub mod shell;

pub use config::{ConfigError, MatchingMode, ShellConfig, SuggestionConfig};
pub use shell::{EditorSource, Flow, LineSource, ScriptedSource, Shell};
