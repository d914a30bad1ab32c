//! The interactive read loop around a [`CommandRegistry`].

use std::collections::VecDeque;
use std::io::{self, Write};

use anyhow::Result;
use rustyline::{error::ReadlineError, history::DefaultHistory, Config, Editor};
use shelf_core::{CommandRegistry, ShelfError};
use tracing::{debug, warn};

use crate::config::ShellConfig;
use crate::prompt::{render_failure, render_help, render_invalid, render_output, render_unknown, render_welcome};

/// Source of input lines for the shell.
pub trait LineSource {
    /// Read one line after displaying `prompt`.
    ///
    /// Returns `Ok(None)` when the input is closed or interrupted.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Line editor backed input with in-memory history
pub struct EditorSource {
    editor: Editor<(), DefaultHistory>,
}

impl EditorSource {
    pub fn new() -> Result<Self> {
        let config = Config::builder()
            .history_ignore_space(true)
            .history_ignore_dups(true)?
            .build();

        Ok(Self {
            editor: Editor::with_config(config)?,
        })
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(anyhow::anyhow!("Readline error: {}", err)),
        }
    }
}

/// Fixed list of lines, for scripted sessions
#[derive(Debug, Default)]
pub struct ScriptedSource {
    lines: VecDeque<String>,
}

impl ScriptedSource {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl LineSource for ScriptedSource {
    fn read_line(&mut self, _prompt: &str) -> Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

/// What the loop does after a line has been handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Interactive shell dispatching lines to a registry
pub struct Shell<'a> {
    registry: &'a CommandRegistry,
    config: ShellConfig,
}

impl<'a> Shell<'a> {
    pub fn new(registry: &'a CommandRegistry, config: ShellConfig) -> Self {
        Self { registry, config }
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Run until the exit keyword, end of input or an interrupt
    pub fn run(&self, source: &mut impl LineSource, out: &mut impl Write) -> Result<()> {
        render_welcome(out, &self.config.help_command, &self.config.exit_command)?;

        loop {
            out.flush()?;
            let Some(line) = source.read_line(&self.config.prompt)? else {
                writeln!(out)?;
                break;
            };

            if self.handle_line(&line, out)? == Flow::Exit {
                break;
            }
        }

        debug!("Shell session ended");
        Ok(())
    }

    /// Handle a single line of input
    pub fn handle_line(&self, line: &str, out: &mut impl Write) -> io::Result<Flow> {
        let line = line.trim();

        if line.is_empty() {
            return Ok(Flow::Continue);
        }
        if line == self.config.help_command {
            render_help(out, self.registry)?;
            return Ok(Flow::Continue);
        }
        if line == self.config.exit_command {
            return Ok(Flow::Exit);
        }

        match self.registry.parse(line) {
            Ok(value) => render_output(out, &value)?,
            Err(err @ ShelfError::NoMatch(_)) => {
                let suggestions = self.registry.suggest(
                    line,
                    self.config.suggestions.limit,
                    self.config.suggestions.cutoff,
                );
                render_unknown(out, &err.to_string(), &suggestions)?;
            }
            Err(err) if err.is_parse_error() => render_invalid(out, &err.to_string())?,
            Err(err) => {
                warn!(input = line, error = %err, "Command failed");
                render_failure(out, &err.to_string())?;
            }
        }

        Ok(Flow::Continue)
    }
}
