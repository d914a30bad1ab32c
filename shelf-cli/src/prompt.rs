//! Rendering of shell output.
//!
//! Everything is written to a caller-supplied writer so the shell can run
//! against stdout or an in-memory buffer.

use std::io::{self, Write};

use colored::Colorize;
use shelf_core::{Command, CommandRegistry, Value};

/// Render a welcome message when the shell starts
pub fn render_welcome(out: &mut impl Write, help_command: &str, exit_command: &str) -> io::Result<()> {
    writeln!(out, "{}", "shelf interactive shell".bold().bright_purple())?;
    writeln!(
        out,
        "Type {} to list commands, {} or Ctrl-D to leave.",
        help_command.bright_green(),
        exit_command.bright_green()
    )?;
    writeln!(out)
}

/// Render the registered command signatures
pub fn render_help(out: &mut impl Write, registry: &CommandRegistry) -> io::Result<()> {
    writeln!(out, "{}", "Commands:".bold().bright_blue())?;
    writeln!(out)?;
    for line in registry.help().lines() {
        writeln!(out, "  - {}", line.bright_cyan())?;
    }
    writeln!(out)
}

/// Render a handler result. Strings print bare, `null` prints nothing.
pub fn render_output(out: &mut impl Write, value: &Value) -> io::Result<()> {
    match value {
        Value::Null => Ok(()),
        Value::String(text) => writeln!(out, "{}", text),
        other => writeln!(out, "{}", other),
    }
}

/// Render an unknown command with its closest registered alternatives
pub fn render_unknown(out: &mut impl Write, message: &str, suggestions: &[&Command]) -> io::Result<()> {
    writeln!(out, "{} {}", "Unknown command:".bright_red().bold(), message)?;
    if !suggestions.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", "The most similar commands are:".bold())?;
        for command in suggestions {
            writeln!(out, "  - {}", command.signature().bright_cyan())?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Render an arity or type failure
pub fn render_invalid(out: &mut impl Write, message: &str) -> io::Result<()> {
    writeln!(out, "{} {}", "Invalid command:".bright_yellow().bold(), message)?;
    writeln!(out)
}

/// Render a failure raised by a handler
pub fn render_failure(out: &mut impl Write, message: &str) -> io::Result<()> {
    writeln!(out, "{} {}", "Something went wrong. Error:".bright_red().bold(), message)?;
    writeln!(out)
}
