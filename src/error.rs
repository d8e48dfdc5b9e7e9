use std::io;

use crate::models::ProblemNumber;

/// Errors that end a single operation. `cli::run` turns any of them into exit code 1.
#[derive(Debug, thiserror::Error)]
pub enum EulerError {
    #[error("No file found for problem {0}.")]
    MissingFile(ProblemNumber),

    #[error("Answer for problem {0} not found in solutions.txt.")]
    NoAnswerKnown(ProblemNumber),

    #[error("Problem {0} not found in problems.txt.")]
    ProblemNotFound(ProblemNumber),

    #[error("Error calling \"{file}\".")]
    ProcessError { file: String },

    #[error("\"{file}\" produced an incorrect answer.")]
    Incorrect { file: String },

    #[error("\"{file}\" printed more than one line of output.")]
    MultiLineOutput { file: String },

    #[error("Aborted!")]
    Aborted,

    #[error("No Project Euler files found in the current directory.")]
    NoProblemFiles,

    #[error("Cannot rename \"{from}\" to \"{to}\": problem numbers differ")]
    NumberMismatch { from: String, to: String },

    #[error("Cannot rename \"{from}\" to \"{to}\": \"{to}\" already exists.")]
    TargetExists { from: String, to: String },

    #[error("There is no problem after problem {0}.")]
    NoNextProblem(ProblemNumber),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid corpus data: {0}")]
    Corpus(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid file pattern: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl EulerError {
    /// Failures whose details were already printed while they happened.
    pub fn already_reported(&self) -> bool {
        matches!(
            self,
            EulerError::ProcessError { .. }
                | EulerError::Incorrect { .. }
                | EulerError::MultiLineOutput { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, EulerError>;
