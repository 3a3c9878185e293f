//! Interactive yes/no confirmation.
//!
//! The janitor only asks through the [`Confirm`] trait so a run can be driven
//! by a terminal, a pipe, or a fixed script.

use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::{theme::ColorfulTheme, Input};

use crate::error::{JanitorError, Result};

/// Capability to ask the operator a yes/no question.
pub trait Confirm {
    /// Ask `prompt`; `true` only for an explicit yes.
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Only a case-insensitive `y` counts as yes.
#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Reads the answer from standard input.
///
/// A terminal gets a dialoguer prompt; piped input is read as one line.
/// End of input counts as "no".
#[derive(Debug, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let answer = if io::stdin().is_terminal() {
            Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
                .map_err(|e| JanitorError::Prompt(e.to_string()))?
        } else {
            let mut stdout = io::stdout();
            write!(stdout, "{prompt} ").map_err(|e| JanitorError::Prompt(e.to_string()))?;
            stdout
                .flush()
                .map_err(|e| JanitorError::Prompt(e.to_string()))?;

            let mut line = String::new();
            io::stdin()
                .lock()
                .read_line(&mut line)
                .map_err(|e| JanitorError::Prompt(e.to_string()))?;
            line
        };

        Ok(is_affirmative(&answer))
    }
}

/// Replays a fixed list of answers and records every prompt shown.
///
/// Running out of answers is treated like end of input.
#[derive(Debug, Default)]
pub struct ScriptedConfirm {
    answers: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedConfirm {
    #[must_use]
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Prompts asked so far.
    #[must_use]
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        self.prompts.push(prompt.to_string());
        Ok(self
            .answers
            .pop_front()
            .is_some_and(|answer| is_affirmative(&answer)))
    }
}
