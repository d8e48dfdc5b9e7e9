use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::Confirm;

use crate::error::{EulerError, Result};

/// Asks the user yes/no questions before anything on disk changes.
pub trait Prompter {
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool>;

    /// Like `confirm`, but a "no" aborts the operation.
    fn require(&mut self, message: &str, default: bool) -> Result<()> {
        if self.confirm(message, default)? {
            Ok(())
        } else {
            Err(EulerError::Aborted)
        }
    }
}

/// Interactive prompt on a terminal, plain line reading when stdin is piped.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        if io::stdin().is_terminal() {
            let answer = Confirm::new()
                .with_prompt(message)
                .default(default)
                .interact()?;
            return Ok(answer);
        }
        confirm_from(&mut io::stdin().lock(), message, default)
    }
}

/// Reads answers line by line. An empty line picks the default and end of
/// input aborts.
fn confirm_from(input: &mut impl BufRead, message: &str, default: bool) -> Result<bool> {
    let hint = if default { "[Y/n]" } else { "[y/N]" };
    loop {
        print!("{} {}: ", message, hint);
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            println!();
            return Err(EulerError::Aborted);
        }
        match line.trim().to_lowercase().as_str() {
            "" => return Ok(default),
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => println!("Error: invalid input"),
        }
    }
}

/// Replays canned answers; `None` stands for pressing enter.
#[cfg(test)]
pub struct Scripted {
    answers: std::collections::VecDeque<Option<bool>>,
    pub asked: Vec<String>,
}

#[cfg(test)]
impl Scripted {
    pub fn new(answers: &[Option<bool>]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            asked: Vec::new(),
        }
    }
}

#[cfg(test)]
impl Prompter for Scripted {
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        self.asked.push(message.to_string());
        match self.answers.pop_front() {
            Some(answer) => Ok(answer.unwrap_or(default)),
            None => Err(EulerError::Aborted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_empty_line_takes_default() {
        assert!(confirm_from(&mut Cursor::new("\n"), "Go?", true).unwrap());
        assert!(!confirm_from(&mut Cursor::new("\n"), "Go?", false).unwrap());
    }

    #[test]
    fn test_explicit_answers() {
        assert!(confirm_from(&mut Cursor::new("Y\n"), "Go?", false).unwrap());
        assert!(!confirm_from(&mut Cursor::new("no\n"), "Go?", true).unwrap());
    }

    #[test]
    fn test_invalid_answer_asks_again() {
        assert!(confirm_from(&mut Cursor::new("maybe\ny\n"), "Go?", false).unwrap());
    }

    #[test]
    fn test_end_of_input_aborts() {
        assert!(matches!(
            confirm_from(&mut Cursor::new(""), "Go?", true),
            Err(EulerError::Aborted)
        ));
    }

    #[test]
    fn test_require_turns_no_into_abort() {
        let mut prompter = Scripted::new(&[Some(false)]);
        assert!(matches!(
            prompter.require("Overwrite?", false),
            Err(EulerError::Aborted)
        ));
        assert_eq!(prompter.asked, ["Overwrite?"]);
    }
}
