//! Yes/no confirmation
//!
//! `remove` asks before deleting anything. The question is answered through
//! the [`Confirm`] trait so callers (and tests) decide where the answer comes
//! from.

use anyhow::{Context, Result};
use std::io::{self, BufRead, IsTerminal, Write};

/// Source of yes/no answers
pub trait Confirm {
    /// Ask `prompt`; `Ok(true)` means go ahead
    ///
    /// # Errors
    ///
    /// Returns an error if the answer could not be read.
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// Prompt on the terminal, defaulting to "no"
///
/// Uses an interactive `dialoguer` prompt when a user is attached, and reads a
/// single line from stdin otherwise (`echo y | crudgen remove author`).
#[derive(Debug, Clone, Copy, Default)]
pub struct InteractiveConfirm;

impl Confirm for InteractiveConfirm {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        if io::stdin().is_terminal() && console::user_attended_stderr() {
            return dialoguer::Confirm::new()
                .with_prompt(prompt)
                .default(false)
                .interact()
                .context("Failed to read confirmation");
        }

        print!("{prompt} (y/N): ");
        io::stdout().flush().ok();

        let mut input = String::new();
        io::stdin()
            .lock()
            .read_line(&mut input)
            .context("Failed to read confirmation from stdin")?;
        Ok(is_yes(&input))
    }
}

/// Fixed answer; `FixedAnswer(true)` backs `--yes`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedAnswer(pub bool);

impl Confirm for FixedAnswer {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        tracing::debug!(prompt, answer = self.0, "Answering confirmation without prompting");
        Ok(self.0)
    }
}

fn is_yes(input: &str) -> bool {
    let answer = input.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes("Y"));
        assert!(is_yes(" yes \n"));
        assert!(!is_yes(""));
        assert!(!is_yes("n\n"));
        assert!(!is_yes("yep"));
    }

    #[test]
    fn test_fixed_answer() {
        assert!(FixedAnswer(true).confirm("delete?").unwrap());
        assert!(!FixedAnswer(false).confirm("delete?").unwrap());
    }
}
