//! Shell configuration, loaded from an optional TOML file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use shelf_core::{PrefixMatching, DEFAULT_CUTOFF, DEFAULT_SUGGESTIONS};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Settings for the interactive shell.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Text displayed before each line of input
    pub prompt: String,
    /// Keyword that ends the session
    pub exit_command: String,
    /// Keyword that lists the registered commands
    pub help_command: String,
    pub matching: MatchingMode,
    pub suggestions: SuggestionConfig,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            exit_command: "exit".to_string(),
            help_command: "help".to_string(),
            matching: MatchingMode::default(),
            suggestions: SuggestionConfig::default(),
        }
    }
}

/// "Did you mean" settings for unknown commands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    /// Maximum number of commands shown
    pub limit: usize,
    /// Minimum similarity in `[0, 1]`
    pub cutoff: f32,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SUGGESTIONS,
            cutoff: DEFAULT_CUTOFF,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchingMode {
    #[default]
    Literal,
    WordBoundary,
}

impl From<MatchingMode> for PrefixMatching {
    fn from(mode: MatchingMode) -> Self {
        match mode {
            MatchingMode::Literal => PrefixMatching::Literal,
            MatchingMode::WordBoundary => PrefixMatching::WordBoundary,
        }
    }
}

impl ShellConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config: ShellConfig = toml::from_str(content)?;
        config.exit_command = config.exit_command.trim().to_string();
        config.help_command = config.help_command.trim().to_string();
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.exit_command.is_empty() {
            return Err(ConfigError::Invalid("exit_command cannot be empty".to_string()));
        }
        if self.help_command.is_empty() {
            return Err(ConfigError::Invalid("help_command cannot be empty".to_string()));
        }
        if self.exit_command == self.help_command {
            return Err(ConfigError::Invalid(format!(
                "exit_command and help_command are both \"{}\"",
                self.exit_command
            )));
        }
        if !(0.0..=1.0).contains(&self.suggestions.cutoff) {
            return Err(ConfigError::Invalid(format!(
                "suggestions.cutoff must be between 0 and 1, got {}",
                self.suggestions.cutoff
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ShellConfig::from_toml("").unwrap();
        assert_eq!(config, ShellConfig::default());
        assert_eq!(config.prompt, "> ");
        assert_eq!(config.suggestions.limit, 3);
        assert_eq!(config.matching, MatchingMode::Literal);
    }

    #[test]
    fn test_partial_override() {
        let config = ShellConfig::from_toml(
            r#"
            prompt = "shelf> "
            matching = "word-boundary"

            [suggestions]
            cutoff = 0.6
            "#,
        )
        .unwrap();
        assert_eq!(config.prompt, "shelf> ");
        assert_eq!(config.exit_command, "exit");
        assert_eq!(config.suggestions.limit, 3);
        assert_eq!(config.suggestions.cutoff, 0.6);
        assert_eq!(PrefixMatching::from(config.matching), PrefixMatching::WordBoundary);
    }

    #[test]
    fn test_keywords_are_trimmed() {
        let config = ShellConfig::from_toml("help_command = \" help \"\nexit_command = \"\tquit \"").unwrap();
        assert_eq!(config.help_command, "help");
        assert_eq!(config.exit_command, "quit");
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            ShellConfig::from_toml("matching = \"fuzzy\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            ShellConfig::from_toml("exit_command = \"help\""),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ShellConfig::from_toml("[suggestions]\ncutoff = 1.5"),
            Err(ConfigError::Invalid(_))
        ));
    }
}
