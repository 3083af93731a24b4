//! Interactive prompts
//!
//! All operator input flows through [`Prompter`], so the workflow can run
//! against a terminal or a scripted session alike.

use async_trait::async_trait;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::error::{LaunchError, LaunchResult};

/// Source of operator answers
#[async_trait]
pub trait Prompter: Send {
    /// Show `question` and wait for one line of input.
    /// Returns `None` once the input stream is closed.
    async fn read_line(&mut self, question: &str) -> LaunchResult<Option<String>>;
}

/// How the operator left a pause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resume {
    Continue,
    Abort,
}

/// Prompter reading from the process stdin
pub struct TerminalPrompter {
    lines: Lines<BufReader<Stdin>>,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Prompter for TerminalPrompter {
    async fn read_line(&mut self, question: &str) -> LaunchResult<Option<String>> {
        print!("{} ", question);
        std::io::stdout().flush()?;
        Ok(self.lines.next_line().await?)
    }
}

/// Ask until `validate` accepts the answer. Rejected answers print the
/// validator's message and ask the same question again.
pub async fn ask_validated<T, F>(
    prompter: &mut dyn Prompter,
    question: &str,
    validate: F,
) -> LaunchResult<T>
where
    F: Fn(&str) -> LaunchResult<T> + Send,
{
    loop {
        let answer = prompter
            .read_line(question)
            .await?
            .ok_or_else(|| LaunchError::Prompt("input closed".to_string()))?;

        match validate(&answer) {
            Ok(value) => return Ok(value),
            Err(LaunchError::Validation(reason)) => {
                tracing::debug!(question, %reason, "Rejected answer");
                eprintln!("  {}", reason);
            }
            Err(other) => return Err(other),
        }
    }
}

/// Free-text answer, trimmed. Empty is allowed.
pub async fn ask_optional(prompter: &mut dyn Prompter, question: &str) -> LaunchResult<String> {
    ask_validated(prompter, question, |answer| Ok(answer.trim().to_string())).await
}

/// Yes/no question. An empty answer takes `default`.
pub async fn confirm(
    prompter: &mut dyn Prompter,
    question: &str,
    default: bool,
) -> LaunchResult<bool> {
    let hint = if default { "[Y/n]" } else { "[y/N]" };
    let question = format!("{} {}", question, hint);
    ask_validated(prompter, &question, |answer| parse_yes_no(answer, default)).await
}

/// Suspend until the operator either resumes or aborts. Closed input counts
/// as an abort.
pub async fn pause(prompter: &mut dyn Prompter, question: &str) -> LaunchResult<Resume> {
    let answer = prompter.read_line(question).await?;
    Ok(match answer.as_deref().map(str::trim) {
        None => Resume::Abort,
        Some(a) if a.eq_ignore_ascii_case("q") || a.eq_ignore_ascii_case("quit") => Resume::Abort,
        Some(_) => Resume::Continue,
    })
}

pub fn parse_yes_no(answer: &str, default: bool) -> LaunchResult<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "" => Ok(default),
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        other => Err(LaunchError::Validation(format!(
            "Please answer yes or no (got '{}')",
            other
        ))),
    }
}
