//! Error types for the label janitor.

use thiserror::Error;

/// Errors that abort a janitor run.
#[derive(Debug, Error)]
pub enum JanitorError {
    /// Required configuration is missing or malformed
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request never produced a usable GraphQL response
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with application-level errors
    #[error("Linear API error: {0}")]
    Api(String),

    /// Reading the interactive confirmation failed
    #[error("Prompt failed: {0}")]
    Prompt(String),

    /// Writing the report failed
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl From<reqwest::Error> for JanitorError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl JanitorError {
    /// Process exit code for this error.
    ///
    /// Configuration problems are reported before any network activity and
    /// get their own code so wrappers can tell them apart from run failures.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::Transport(_) | Self::Api(_) | Self::Prompt(_) | Self::Output(_) => 1,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, JanitorError>;
