use std::collections::BTreeMap;

use colored::Colorize;
use tracing::{debug, warn};

use crate::display;
use crate::error::{EulerError, Result};
use crate::interrupt::{interrupt_flag, take_interrupt};
use crate::models::{problem_files, ProblemFile, ProblemNumber, SKIPPED_SUFFIX};
use crate::runner::{run_solution, CapturedOutput, SolutionRun};
use crate::workspace::Workspace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Correct,
    Incorrect,
    Error,
    Skipped,
    Missing,
    NoAnswerKnown,
}

impl Status {
    pub const ALL: [Status; 6] = [
        Status::Correct,
        Status::Incorrect,
        Status::Error,
        Status::Skipped,
        Status::Missing,
        Status::NoAnswerKnown,
    ];

    pub fn glyph(&self) -> char {
        match self {
            Status::Correct => 'C',
            Status::Incorrect => 'I',
            Status::Error => 'E',
            Status::Skipped => 'S',
            Status::Missing => '.',
            Status::NoAnswerKnown => '?',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Correct => "correct",
            Status::Incorrect => "incorrect",
            Status::Error => "error",
            Status::Skipped => "skipped",
            Status::Missing => "missing",
            Status::NoAnswerKnown => "no answer",
        }
    }
}

/// Whether a failed verification ends the program or is handed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnFailure {
    Exit,
    Report,
}

#[derive(Debug, Clone)]
pub struct VerificationResult {
    pub number: ProblemNumber,
    pub status: Status,
    /// The checked file, under its name after any rename.
    pub file: Option<ProblemFile>,
    pub run: Option<SolutionRun>,
}

impl VerificationResult {
    fn without_run(number: ProblemNumber, status: Status, file: Option<ProblemFile>) -> Self {
        Self {
            number,
            status,
            file,
            run: None,
        }
    }

    pub fn output(&self) -> Option<&CapturedOutput> {
        self.run.as_ref().map(|r| &r.output)
    }

    /// Turns every status other than `Correct` into the matching error.
    pub fn require_correct(self) -> Result<Self> {
        let file = self.file.as_ref().map(ProblemFile::filename).unwrap_or_default();
        let multi_line = matches!(self.output(), Some(CapturedOutput::Multi(_)));
        match self.status {
            Status::Correct => Ok(self),
            Status::Missing => Err(EulerError::MissingFile(self.number)),
            Status::NoAnswerKnown => Err(EulerError::NoAnswerKnown(self.number)),
            Status::Error => Err(EulerError::ProcessError { file }),
            Status::Incorrect if multi_line => Err(EulerError::MultiLineOutput { file }),
            Status::Incorrect => Err(EulerError::Incorrect { file }),
            Status::Skipped => Err(EulerError::Aborted),
        }
    }
}

/// Picks the file to check: the explicit one if it exists, then the canonical
/// name, then the first fuzzy match.
pub fn resolve_file(
    ws: &Workspace,
    number: ProblemNumber,
    explicit: Option<&ProblemFile>,
) -> Result<Option<ProblemFile>> {
    if let Some(file) = explicit.filter(|f| ws.exists(&f.filename())) {
        return Ok(Some(file.clone()));
    }

    let canonical = ws.canonical_filename(number);
    if ws.exists(&canonical) {
        return Ok(ProblemFile::parse(&canonical, ws.width()));
    }

    println!("Attempting fuzzy search for problem {} file.", number);
    ws.first_file(number)
}

/// Checks one problem's solution against the known answer.
pub fn verify(
    ws: &Workspace,
    number: ProblemNumber,
    explicit: Option<&ProblemFile>,
    on_failure: OnFailure,
) -> Result<VerificationResult> {
    let result = check(ws, number, explicit)?;
    match on_failure {
        OnFailure::Exit => result.require_correct(),
        OnFailure::Report => Ok(result),
    }
}

fn check(
    ws: &Workspace,
    number: ProblemNumber,
    explicit: Option<&ProblemFile>,
) -> Result<VerificationResult> {
    let Some(mut file) = resolve_file(ws, number, explicit)? else {
        return Ok(VerificationResult::without_run(number, Status::Missing, None));
    };

    let Some(solution) = ws.corpus.solution(number) else {
        return Ok(VerificationResult::without_run(
            number,
            Status::NoAnswerKnown,
            Some(file),
        ));
    };

    let filename = file.filename();
    display::print_checking(&filename);
    let run = run_solution(ws.dir(), &filename, &ws.config);

    let status = if run.is_error() {
        display::print_run_error(&filename, &run.status);
        Status::Error
    } else {
        let correct = run.output.answer() == Some(solution.as_str());
        display::print_output(&run.output, correct);
        if correct {
            Status::Correct
        } else {
            Status::Incorrect
        }
    };
    display::print_elapsed(&run.elapsed);

    if status == Status::Correct {
        // A solved file is always the active one, unless that name is taken.
        if let Err(e) = file.change_suffix(ws.dir(), "") {
            match e {
                EulerError::TargetExists { .. } => println!("{}", e.to_string().yellow()),
                _ => return Err(e),
            }
        }
    }

    Ok(VerificationResult {
        number,
        status,
        file: Some(file),
        run: Some(run),
    })
}

/// Status of every problem seen by a verify-all scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressOverview {
    statuses: BTreeMap<ProblemNumber, Status>,
}

impl ProgressOverview {
    pub fn record(&mut self, number: ProblemNumber, status: Status) {
        self.statuses.insert(number, status);
    }

    /// Problems with no file at all count as missing.
    pub fn status(&self, number: ProblemNumber) -> Status {
        self.statuses.get(&number).copied().unwrap_or(Status::Missing)
    }
}

/// Verifies every problem file in the directory and prints the overview.
/// Incorrect files other than `current` are moved out of the way by marking
/// them skipped.
pub fn verify_all(ws: &Workspace, current: ProblemNumber) -> Result<ProgressOverview> {
    let files = problem_files(ws.dir(), ws.width())?;
    if files.is_empty() {
        return Err(EulerError::NoProblemFiles);
    }

    let interrupted = interrupt_flag();
    take_interrupt(&interrupted);

    let mut overview = ProgressOverview::default();
    for file in files {
        let number = file.num();
        let outcome = verify(ws, number, Some(&file), OnFailure::Report);

        let status = if take_interrupt(&interrupted) {
            println!("{}", "Interrupted; skipping this problem.".cyan());
            Status::Skipped
        } else {
            match outcome {
                Ok(result) => {
                    if result.status == Status::Incorrect && number != current {
                        let mut checked = result.file.unwrap_or(file);
                        if let Err(e) = checked.change_suffix(ws.dir(), SKIPPED_SUFFIX) {
                            warn!("could not mark {} as skipped: {}", checked, e);
                            println!("{}", e.to_string().red());
                        }
                    }
                    if result.status == Status::NoAnswerKnown {
                        println!("{}", EulerError::NoAnswerKnown(number).to_string().red());
                    }
                    result.status
                }
                Err(e) => {
                    println!("{}", e.to_string().red());
                    Status::Error
                }
            }
        };

        debug!("problem {} -> {:?}", number, status);
        overview.record(number, status);
        println!();
    }

    display::print_overview(&overview, current);
    Ok(overview)
}
