mod generate;
mod show;
mod skip;
mod verify;

use std::env;

use clap::{ArgGroup, Parser};
use colored::Colorize;
use tracing::debug;

use crate::error::Result;
use crate::models::{config, highest_problem, Corpus, Language, ProblemNumber};
use crate::prompt::{Prompter, TerminalPrompter};
use crate::workspace::Workspace;

#[derive(Parser)]
#[command(name = "euler", version)]
#[command(about = "Project Euler command line tool", long_about = None)]
#[command(group(
    ArgGroup::new("option")
        .args(["cheat", "generate", "preview", "skip", "verify", "verify_all"])
))]
pub struct Cli {
    /// Problem number; inferred from the current directory when omitted
    #[arg(default_value_t = 0)]
    pub problem: ProblemNumber,

    /// View the answer to a problem
    #[arg(short, long)]
    pub cheat: bool,

    /// Generate the solution file for a problem
    #[arg(short, long)]
    pub generate: bool,

    /// Print the text of a problem
    #[arg(short, long)]
    pub preview: bool,

    /// Mark the current problem as skipped and generate the next one
    #[arg(short, long)]
    pub skip: bool,

    /// Verify the solution to a problem
    #[arg(short, long)]
    pub verify: bool,

    /// Verify every problem file in the current directory
    #[arg(long)]
    pub verify_all: bool,

    /// Language for generated files (overrides the config)
    #[arg(short, long, value_enum)]
    pub language: Option<Language>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Cheat,
    Generate,
    Preview,
    Skip,
    Verify,
    VerifyAll,
}

impl Cli {
    pub fn action(&self) -> Option<Action> {
        [
            (self.cheat, Action::Cheat),
            (self.generate, Action::Generate),
            (self.preview, Action::Preview),
            (self.skip, Action::Skip),
            (self.verify, Action::Verify),
            (self.verify_all, Action::VerifyAll),
        ]
        .into_iter()
        .find_map(|(set, action)| set.then_some(action))
    }
}

/// What to do once the flag and the directory contents have been looked at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    Run(Action, ProblemNumber),
    /// Verify the current problem, then generate the next one.
    Advance(ProblemNumber),
    /// Nothing here yet: generate problem 1.
    FirstFile,
}

/// Resolves a possibly missing action and problem number into a [`Plan`].
/// `problem == 0` means no number was given.
pub fn dispatch(
    action: Option<Action>,
    problem: ProblemNumber,
    highest: Option<ProblemNumber>,
    has_file: impl Fn(ProblemNumber) -> bool,
) -> Plan {
    if problem == 0 || matches!(action, Some(Action::Skip | Action::VerifyAll)) {
        return match (highest, action) {
            (None, Some(a @ (Action::Cheat | Action::Preview | Action::VerifyAll))) => {
                Plan::Run(a, 1)
            }
            (None, _) => Plan::FirstFile,
            (Some(current), Some(Action::Preview)) => {
                Plan::Run(Action::Preview, current.saturating_add(1))
            }
            (Some(current), Some(a)) => Plan::Run(a, current),
            (Some(current), None) => Plan::Advance(current),
        };
    }

    match action {
        Some(a) => Plan::Run(a, problem),
        None if has_file(problem) => Plan::Run(Action::Verify, problem),
        None => Plan::Run(Action::Generate, problem),
    }
}

pub fn execute(ws: &Workspace, prompter: &mut dyn Prompter, plan: Plan) -> Result<()> {
    debug!("executing {:?}", plan);
    match plan {
        Plan::FirstFile => {
            println!("No Project Euler files found in the current directory.");
            generate::generate(ws, prompter, 1, true).map(|_| ())
        }
        Plan::Advance(current) => verify::advance(ws, prompter, current),
        Plan::Run(Action::Cheat, n) => show::cheat(ws, prompter, n).map(|_| ()),
        Plan::Run(Action::Generate, n) => generate::generate(ws, prompter, n, true).map(|_| ()),
        Plan::Run(Action::Preview, n) => show::preview(ws, n),
        Plan::Run(Action::Skip, n) => skip::skip(ws, prompter, n),
        Plan::Run(Action::Verify, n) => verify::verify_one(ws, n),
        Plan::Run(Action::VerifyAll, n) => verify::verify_all(ws, n),
    }
}

fn open_workspace(cli: &Cli) -> Result<Workspace> {
    let mut user_config = config::load_config()?;
    if let Some(language) = cli.language {
        user_config.language = language;
    }
    let corpus = Corpus::load(&user_config)?;
    let dir = env::current_dir()?;
    Ok(Workspace::new(dir, user_config, corpus))
}

fn try_run(cli: Cli) -> Result<()> {
    let ws = open_workspace(&cli)?;
    let highest = highest_problem(ws.dir(), ws.width())?;
    let plan = dispatch(cli.action(), cli.problem, highest, |n| {
        ws.has_file(n).unwrap_or(false)
    });
    execute(&ws, &mut TerminalPrompter, plan)
}

pub fn run(cli: Cli) {
    if let Err(e) = try_run(cli) {
        if !e.already_reported() {
            eprintln!("{}", e.to_string().red());
        }
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EulerError;
    use crate::prompt::Scripted;
    use crate::workspace::testing::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    fn no_files(_: ProblemNumber) -> bool {
        false
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_are_exclusive() {
        assert!(Cli::try_parse_from(["euler", "-v", "-g"]).is_err());
        let cli = Cli::try_parse_from(["euler", "--verify-all"]).unwrap();
        assert_eq!(cli.action(), Some(Action::VerifyAll));
        let cli = Cli::try_parse_from(["euler", "-c", "2"]).unwrap();
        assert_eq!((cli.action(), cli.problem), (Some(Action::Cheat), 2));
    }

    #[test]
    fn test_empty_directory() {
        assert_eq!(dispatch(None, 0, None, no_files), Plan::FirstFile);
        assert_eq!(dispatch(Some(Action::Skip), 0, None, no_files), Plan::FirstFile);
        assert_eq!(
            dispatch(Some(Action::Preview), 0, None, no_files),
            Plan::Run(Action::Preview, 1)
        );
        assert_eq!(
            dispatch(Some(Action::VerifyAll), 0, None, no_files),
            Plan::Run(Action::VerifyAll, 1)
        );
    }

    #[test]
    fn test_inferred_problem() {
        assert_eq!(dispatch(None, 0, Some(4), no_files), Plan::Advance(4));
        assert_eq!(
            dispatch(Some(Action::Preview), 0, Some(4), no_files),
            Plan::Run(Action::Preview, 5)
        );
        assert_eq!(
            dispatch(Some(Action::Verify), 0, Some(4), no_files),
            Plan::Run(Action::Verify, 4)
        );
        // Skip and verify-all always work from the highest file.
        assert_eq!(
            dispatch(Some(Action::Skip), 2, Some(4), no_files),
            Plan::Run(Action::Skip, 4)
        );
    }

    #[test]
    fn test_huge_problem_number() {
        let max = ProblemNumber::MAX;
        assert_eq!(
            dispatch(Some(Action::Preview), 0, Some(max), no_files),
            Plan::Run(Action::Preview, max)
        );

        let tmp = TempDir::new().unwrap();
        let ws = workspace(&tmp);
        let mut prompter = Scripted::new(&[Some(true)]);
        assert!(matches!(
            execute(&ws, &mut prompter, Plan::Run(Action::Skip, max)),
            Err(EulerError::NoNextProblem(_))
        ));
    }

    #[test]
    fn test_explicit_problem_without_flag() {
        assert_eq!(
            dispatch(None, 7, Some(4), |n| n == 7),
            Plan::Run(Action::Verify, 7)
        );
        assert_eq!(
            dispatch(None, 8, Some(4), |n| n == 7),
            Plan::Run(Action::Generate, 8)
        );
    }

    #[test]
    fn test_execute_first_file() {
        let tmp = TempDir::new().unwrap();
        let ws = workspace(&tmp);
        let mut prompter = Scripted::new(&[None]);

        execute(&ws, &mut prompter, Plan::FirstFile).unwrap();
        assert!(ws.exists("001.sh"));
    }

    #[test]
    fn test_execute_verify_all_in_empty_directory() {
        let tmp = TempDir::new().unwrap();
        let ws = workspace(&tmp);
        let mut prompter = Scripted::new(&[]);

        let plan = dispatch(Some(Action::VerifyAll), 0, None, no_files);
        assert!(matches!(
            execute(&ws, &mut prompter, plan),
            Err(EulerError::NoProblemFiles)
        ));
    }

    #[test]
    fn test_generate_then_verify_round_trip() {
        let tmp = TempDir::new().unwrap();
        let ws = workspace(&tmp);
        let mut prompter = Scripted::new(&[None]);
        execute(&ws, &mut prompter, Plan::Run(Action::Generate, 3)).unwrap();

        let path = ws.dir.join("003.sh");
        let mut script = std::fs::read_to_string(&path).unwrap();
        script.push_str("echo 6857\n");
        std::fs::write(&path, script).unwrap();

        execute(&ws, &mut prompter, Plan::Run(Action::Verify, 3)).unwrap();

        std::fs::write(&path, "echo 6858\n").unwrap();
        assert!(matches!(
            execute(&ws, &mut prompter, Plan::Run(Action::Verify, 3)),
            Err(EulerError::Incorrect { .. })
        ));
    }
}
