use crate::cli::generate;
use crate::error::Result;
use crate::models::{Problem, ProblemNumber};
use crate::prompt::Prompter;
use crate::verification::{self, OnFailure};
use crate::workspace::Workspace;

pub fn verify_one(ws: &Workspace, number: ProblemNumber) -> Result<()> {
    verification::verify(ws, number, None, OnFailure::Exit)?;
    Ok(())
}

pub fn verify_all(ws: &Workspace, current: ProblemNumber) -> Result<()> {
    verification::verify_all(ws, current)?;
    Ok(())
}

/// Checks the current problem and, once it is solved, generates the next one.
pub fn advance(ws: &Workspace, prompter: &mut dyn Prompter, current: ProblemNumber) -> Result<()> {
    verify_one(ws, current)?;
    let next = Problem::new(current).next()?;
    generate::generate(ws, prompter, next.num, true)?;
    Ok(())
}
