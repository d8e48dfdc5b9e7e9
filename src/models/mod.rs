pub mod config;
pub mod corpus;
pub mod language;
pub mod problem;
pub mod problem_file;

/// Positive integer identifying a challenge.
pub type ProblemNumber = u32;

pub use config::UserConfig;
pub use corpus::Corpus;
pub use language::Language;
pub use problem::Problem;
pub use problem_file::{highest_problem, problem_files, ProblemFile, SKIPPED_SUFFIX};
