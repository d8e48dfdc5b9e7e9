use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::models::{Language, UserConfig};
use crate::timing::{Clock, Elapsed};

pub const NO_OUTPUT: &str = "[no output]";

/// What a solution printed on stdout, already split by the line policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapturedOutput {
    Empty,
    Single(String),
    Multi(Vec<String>),
}

impl CapturedOutput {
    pub fn from_stdout(stdout: &str) -> Self {
        let lines: Vec<&str> = stdout.lines().collect();
        let mut non_empty = lines.iter().filter(|l| !l.is_empty());

        match (non_empty.next(), non_empty.next()) {
            (None, _) => CapturedOutput::Empty,
            (Some(line), None) => CapturedOutput::Single(line.to_string()),
            _ => CapturedOutput::Multi(lines.iter().map(|l| l.to_string()).collect()),
        }
    }

    /// The value compared against the answer, if the output is comparable at all.
    pub fn answer(&self) -> Option<&str> {
        match self {
            CapturedOutput::Empty => Some(NO_OUTPUT),
            CapturedOutput::Single(line) => Some(line),
            CapturedOutput::Multi(_) => None,
        }
    }

    pub fn lines(&self) -> Vec<&str> {
        match self {
            CapturedOutput::Empty => vec![NO_OUTPUT],
            CapturedOutput::Single(line) => vec![line.as_str()],
            CapturedOutput::Multi(lines) => lines.iter().map(String::as_str).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    /// Non-zero exit; `None` when killed by a signal.
    Failed(Option<i32>),
    /// The process never started.
    LaunchFailed(String),
}

#[derive(Debug, Clone)]
pub struct SolutionRun {
    pub status: RunStatus,
    pub output: CapturedOutput,
    pub elapsed: Elapsed,
}

impl SolutionRun {
    pub fn is_error(&self) -> bool {
        self.status != RunStatus::Success
    }
}

/// Builds the command for a solution file from its extension and the config.
pub fn solution_command(dir: &Path, filename: &str, config: &UserConfig) -> Command {
    let language = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .and_then(Language::from_extension)
        .unwrap_or(config.language);
    let interpreter = config
        .interpreter
        .as_deref()
        .unwrap_or(language.interpreter());

    let mut cmd = Command::new(interpreter);
    cmd.arg(filename)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit());
    cmd
}

/// Runs `filename` inside `dir` and waits for it. Never fails: a process that
/// cannot be started comes back as [`RunStatus::LaunchFailed`].
pub fn run_solution(dir: &Path, filename: &str, config: &UserConfig) -> SolutionRun {
    let mut cmd = solution_command(dir, filename, config);
    debug!("running {:?} in {}", cmd, dir.display());

    let start = Clock::now();
    let result = cmd.output();
    let end = Clock::now();
    let elapsed = end.elapsed_since(&start);

    match result {
        Ok(output) => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let status = if output.status.success() {
                RunStatus::Success
            } else {
                RunStatus::Failed(output.status.code())
            };
            debug!("{} exited with {:?}", filename, output.status);
            SolutionRun {
                status,
                output: CapturedOutput::from_stdout(&stdout),
                elapsed,
            }
        }
        Err(e) => {
            debug!("failed to launch {}: {}", filename, e);
            SolutionRun {
                status: RunStatus::LaunchFailed(e.to_string()),
                output: CapturedOutput::Empty,
                elapsed,
            }
        }
    }
}
