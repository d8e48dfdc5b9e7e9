use colored::Colorize;

use crate::error::{EulerError, Result};
use crate::models::ProblemNumber;
use crate::prompt::Prompter;
use crate::workspace::Workspace;

/// Prints the text of a problem.
pub fn preview(ws: &Workspace, number: ProblemNumber) -> Result<()> {
    let text = ws
        .corpus
        .text(number)
        .ok_or(EulerError::ProblemNotFound(number))?;

    println!("{}", format!("Project Euler Problem {}", number).bold());
    println!("{}", text);
    Ok(())
}

/// Shows the answer to a problem after asking first.
pub fn cheat(ws: &Workspace, prompter: &mut dyn Prompter, number: ProblemNumber) -> Result<String> {
    let solution = ws
        .corpus
        .solution(number)
        .ok_or(EulerError::NoAnswerKnown(number))?;

    prompter.require(&format!("View answer to problem {}?", number), false)?;
    println!(
        "The answer to problem {} is {}.",
        number,
        solution.as_str().bold()
    );
    Ok(solution)
}
