use std::io::{self, Write};

use colored::{ColoredString, Colorize};
use tracing::debug;

use crate::models::ProblemNumber;
use crate::runner::{CapturedOutput, RunStatus};
use crate::timing::Elapsed;
use crate::verification::{ProgressOverview, Status};

const SLOTS_PER_ROW: ProblemNumber = 20;
const GROUP: ProblemNumber = 5;

pub fn print_checking(filename: &str) {
    print!("Checking \"{}\" against solution: ", filename);
    let _ = io::stdout().flush();
}

pub fn print_run_error(filename: &str, status: &RunStatus) {
    println!();
    println!("{}", format!("Error calling \"{}\".", filename).red());
    match status {
        RunStatus::LaunchFailed(reason) => println!("{}", reason.red()),
        RunStatus::Failed(Some(code)) => debug!("{} exited with status {}", filename, code),
        RunStatus::Failed(None) => debug!("{} was terminated by a signal", filename),
        RunStatus::Success => {}
    }
}

pub fn print_output(output: &CapturedOutput, correct: bool) {
    match output {
        CapturedOutput::Multi(lines) => {
            // Start below the "Checking" line so every line lines up.
            println!();
            println!("{}", lines.join("\n").bold().red());
        }
        _ => {
            let line = output.lines().join("");
            let line = if correct { line.bold().green() } else { line.bold().red() };
            println!("{}", line);
        }
    }
}

pub fn print_elapsed(elapsed: &Elapsed) {
    println!("{}", elapsed.to_string().cyan());
}

fn colour(status: Status, text: &str) -> ColoredString {
    match status {
        Status::Correct => text.green(),
        Status::Incorrect => text.red(),
        Status::Error => text.yellow(),
        Status::Skipped => text.cyan(),
        Status::Missing => text.normal(),
        Status::NoAnswerKnown => text.magenta(),
    }
}

pub fn legend() -> String {
    Status::ALL
        .iter()
        .map(|s| format!("{} = {}", s.glyph(), s.label()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Number of table rows needed to show problems 1..=current.
pub fn row_count(current: ProblemNumber) -> ProblemNumber {
    current.div_ceil(SLOTS_PER_ROW)
}

/// One row of the overview: twenty glyphs, an extra gap after every fifth.
fn render_row(
    overview: &ProgressOverview,
    row: ProblemNumber,
    paint: impl Fn(Status, &str) -> String,
) -> String {
    let low = row * SLOTS_PER_ROW + 1;
    let high = low.saturating_add(SLOTS_PER_ROW - 1);

    let mut line = format!("Problems {:03}-{:03}: ", low, high);
    for number in low..=high {
        let status = overview.status(number);
        line.push_str(&paint(status, &status.glyph().to_string()));
        if number != high {
            line.push_str(if number % GROUP == 0 { "   " } else { " " });
        }
    }
    line
}

pub fn overview_rows(
    overview: &ProgressOverview,
    current: ProblemNumber,
    coloured: bool,
) -> Vec<String> {
    (0..row_count(current))
        .map(|row| {
            render_row(overview, row, |status, glyph| {
                if coloured {
                    colour(status, glyph).to_string()
                } else {
                    glyph.to_string()
                }
            })
        })
        .collect()
}

pub fn print_overview(overview: &ProgressOverview, current: ProblemNumber) {
    println!("{}", "-".repeat(63));
    println!("{}", legend());
    println!();
    for row in overview_rows(overview, current, true) {
        println!("{}", row);
    }
}
