use anyhow::Context;
use dialoguer::Password;

use crate::error::Result;

/// Interactive input of one credential value.
pub trait Prompt {
    /// Read one line with echo disabled. The line terminator is stripped;
    /// nothing else is. An empty line is a legal credential value and is
    /// returned as-is.
    fn read_secret(&mut self, label: &str) -> Result<String>;
}

/// Prompts on the controlling terminal rather than stdin: git redirects
/// stdin when it drives a helper, and the person typing is on the tty.
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn read_secret(&mut self, label: &str) -> Result<String> {
        let value = Password::new()
            .with_prompt(label)
            .allow_empty_password(true)
            .interact()
            .context("reading from the terminal")?;
        Ok(value)
    }
}

/// Scripted prompt for tests; records every label it was asked for.
#[cfg(test)]
pub(crate) struct FakePrompt {
    responses: std::collections::VecDeque<String>,
    pub(crate) labels_seen: Vec<String>,
}

#[cfg(test)]
impl FakePrompt {
    pub(crate) fn scripted(responses: &[&str]) -> Self {
        Self {
            responses: responses.iter().map(|r| r.to_string()).collect(),
            labels_seen: Vec::new(),
        }
    }
}

#[cfg(test)]
impl Prompt for FakePrompt {
    fn read_secret(&mut self, label: &str) -> Result<String> {
        self.labels_seen.push(label.to_string());
        self.responses
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("no scripted response for prompt '{label}'").into())
    }
}
