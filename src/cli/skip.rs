use crate::cli::generate;
use crate::error::Result;
use crate::models::{Problem, ProblemNumber, SKIPPED_SUFFIX};
use crate::prompt::Prompter;
use crate::workspace::Workspace;

/// Marks the current problem's file as skipped and moves on to the next problem.
pub fn skip(ws: &Workspace, prompter: &mut dyn Prompter, number: ProblemNumber) -> Result<()> {
    println!("Current problem is problem {}.", number);
    let next = Problem::new(number).next()?;
    let next = generate::prepare(ws, prompter, next.num, false)?;

    match ws.first_file(number)? {
        Some(mut file) => {
            file.change_suffix(ws.dir(), SKIPPED_SUFFIX)?;
        }
        None => println!("No file found for problem {}; nothing to skip.", number),
    }

    generate::write(ws, next)?;
    Ok(())
}
