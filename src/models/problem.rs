use std::path::Path;

use super::problem_file::{glob_problem_files, ProblemFile};
use super::ProblemNumber;
use crate::error::{EulerError, Result};

/// A problem identified by its number. Everything else about it lives either
/// in the corpus or on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Problem {
    pub num: ProblemNumber,
}

impl Problem {
    pub fn new(num: ProblemNumber) -> Self {
        Self { num }
    }

    pub fn next(&self) -> Result<Problem> {
        self.num
            .checked_add(1)
            .map(Problem::new)
            .ok_or(EulerError::NoNextProblem(self.num))
    }

    /// `{prefix}{num padded to width}{suffix}{extension}`; wider numbers are never truncated.
    pub fn filename(&self, prefix: &str, suffix: &str, extension: &str, width: usize) -> String {
        format!(
            "{}{:0width$}{}{}",
            prefix,
            self.num,
            suffix,
            extension,
            width = width
        )
    }

    /// Existing files for this problem in `dir`, sorted by (stem, extension).
    pub fn glob(&self, dir: &Path, width: usize) -> Result<impl Iterator<Item = ProblemFile>> {
        let pattern = format!("*{:0width$}*.*", self.num, width = width);
        let num = self.num;
        let files = glob_problem_files(dir, &pattern, width, |file| file.num() == num)?;
        Ok(files.into_iter())
    }

    /// First matching file, if any.
    pub fn file(&self, dir: &Path, width: usize) -> Result<Option<ProblemFile>> {
        Ok(self.glob(dir, width)?.next())
    }
}
