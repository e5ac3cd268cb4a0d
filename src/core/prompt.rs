//! Interactive prompting and the shared confirmation primitive.
//!
//! Every question a handler asks goes through a [`Prompter`]. Destructive
//! actions are gated with [`confirm`] and a [`Strength`]: the strongest
//! level only accepts the literal word `yes`, so a reflexive `y` can never
//! discard work.

use crate::core::error::{GitCliError, Result};
use colored::*;
use std::io::{self, BufRead, Write};

/// How much typing a confirmation requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strength {
    /// `(Y/n)`: anything except `n`/`no` accepts.
    Lenient,
    /// `(y/N)`: `y` or `yes` accepts.
    Low,
    /// `(yes/N)`: only the literal `yes` accepts.
    High,
}

impl Strength {
    pub fn suffix(self) -> &'static str {
        match self {
            Strength::Lenient => "(Y/n)",
            Strength::Low => "(y/N)",
            Strength::High => "(yes/N)",
        }
    }

    /// Whether `answer` confirms at this strength.
    pub fn accepts(self, answer: &str) -> bool {
        let answer = answer.trim().to_lowercase();
        match self {
            Strength::Lenient => !matches!(answer.as_str(), "n" | "no"),
            Strength::Low => matches!(answer.as_str(), "y" | "yes"),
            Strength::High => answer == "yes",
        }
    }
}

/// Source of user answers.
pub trait Prompter {
    /// Show `question` and return the raw answer line without its newline.
    fn read_line(&mut self, question: &str) -> Result<String>;
}

/// Reads answers from standard input.
#[derive(Default)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn read_line(&mut self, question: &str) -> Result<String> {
        print!("{} ", question.cyan());
        io::stdout().flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(GitCliError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Ask a free-form question; the answer is trimmed.
pub fn ask(prompter: &mut dyn Prompter, question: &str) -> Result<String> {
    Ok(prompter.read_line(question)?.trim().to_string())
}

/// Ask a yes/no question at the given strength.
pub fn confirm(prompter: &mut dyn Prompter, question: &str, strength: Strength) -> Result<bool> {
    let answer = prompter.read_line(&format!("{question} {}:", strength.suffix()))?;
    let accepted = strength.accepts(&answer);
    log::debug!("confirm {strength:?} '{question}' -> {accepted}");
    Ok(accepted)
}

/// Parse a 1-based menu selection against `count` options.
pub fn parse_choice(answer: &str, count: usize) -> Option<usize> {
    match answer.trim().parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Some(n),
        _ => None,
    }
}

/// Ask for a 1-based selection out of `count` options.
pub fn choose(prompter: &mut dyn Prompter, question: &str, count: usize) -> Result<Option<usize>> {
    let answer = ask(prompter, question)?;
    Ok(parse_choice(&answer, count))
}
