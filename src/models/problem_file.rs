use std::fmt;
use std::fs;
use std::path::Path;

use colored::Colorize;
use regex::Regex;
use tracing::debug;

use super::language::Language;
use super::ProblemNumber;
use crate::error::{EulerError, Result};

pub const SKIPPED_SUFFIX: &str = "-skipped";

/// A file on disk that belongs to one problem, split into
/// `{prefix}{number}{suffix}{extension}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemFile {
    pub prefix: String,
    pub str_num: String,
    pub suffix: String,
    pub extension: String,
}

fn file_pattern(width: usize) -> std::result::Result<Regex, regex::Error> {
    Regex::new(&format!(r"^(\D*)(\d{{{},}})([^.]*)(\.\w+)$", width))
}

impl ProblemFile {
    pub fn parse(filename: &str, width: usize) -> Option<ProblemFile> {
        let caps = file_pattern(width).ok()?.captures(filename)?;
        caps[2].parse::<ProblemNumber>().ok()?;
        Some(ProblemFile {
            prefix: caps[1].to_string(),
            str_num: caps[2].to_string(),
            suffix: caps[3].to_string(),
            extension: caps[4].to_string(),
        })
    }

    pub fn num(&self) -> ProblemNumber {
        // `parse` only accepts numbers that fit.
        self.str_num.parse().unwrap_or(ProblemNumber::MAX)
    }

    pub fn filename(&self) -> String {
        format!("{}{}{}{}", self.prefix, self.str_num, self.suffix, self.extension)
    }

    /// The same file with a different suffix.
    pub fn with_suffix(&self, suffix: &str) -> ProblemFile {
        ProblemFile {
            suffix: suffix.to_string(),
            ..self.clone()
        }
    }

    /// Renames this file inside `dir` to `target`. Returns whether anything changed.
    pub fn rename(&mut self, dir: &Path, target: ProblemFile) -> Result<bool> {
        if target.num() != self.num() {
            return Err(EulerError::NumberMismatch {
                from: self.filename(),
                to: target.filename(),
            });
        }
        let (old, new) = (self.filename(), target.filename());
        if old == new {
            return Ok(false);
        }
        if dir.join(&new).exists() {
            return Err(EulerError::TargetExists { from: old, to: new });
        }

        fs::rename(dir.join(&old), dir.join(&new))?;
        debug!("renamed {} -> {} in {}", old, new, dir.display());
        println!("{}", format!("Renamed \"{}\" to \"{}\".", old, new).yellow());

        *self = target;
        Ok(true)
    }

    pub fn change_suffix(&mut self, dir: &Path, suffix: &str) -> Result<bool> {
        let target = self.with_suffix(suffix);
        self.rename(dir, target)
    }
}

impl fmt::Display for ProblemFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.filename())
    }
}

/// Every problem file in `dir`, whatever its number, sorted by (stem, extension).
pub fn problem_files(dir: &Path, width: usize) -> Result<Vec<ProblemFile>> {
    glob_problem_files(dir, "*.*", width, |_| true)
}

/// Highest problem number among the files in `dir`.
pub fn highest_problem(dir: &Path, width: usize) -> Result<Option<ProblemNumber>> {
    Ok(problem_files(dir, width)?.iter().map(ProblemFile::num).max())
}

/// Globs `pattern` inside `dir` (the directory itself is matched literally),
/// keeping regular files in a known language.
pub(super) fn glob_problem_files(
    dir: &Path,
    pattern: &str,
    width: usize,
    keep: impl Fn(&ProblemFile) -> bool,
) -> Result<Vec<ProblemFile>> {
    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let pattern = Path::new(&escaped).join(pattern);
    let pattern = pattern.to_string_lossy();

    let mut files: Vec<ProblemFile> = glob::glob(&pattern)?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .filter_map(|path| {
            let name = path.file_name()?.to_str()?.to_string();
            ProblemFile::parse(&name, width)
        })
        .filter(|file| Language::from_extension(&file.extension).is_some() && keep(file))
        .collect();

    files.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
    debug!("{} matched {} problem file(s)", pattern, files.len());
    Ok(files)
}

fn sort_key(file: &ProblemFile) -> (String, String) {
    (
        format!("{}{}{}", file.prefix, file.str_num, file.suffix),
        file.extension.clone(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_plain() {
        let file = ProblemFile::parse("001.py", 3).unwrap();
        assert_eq!(file.prefix, "");
        assert_eq!(file.num(), 1);
        assert_eq!(file.suffix, "");
        assert_eq!(file.extension, ".py");
    }

    #[test]
    fn test_parse_prefix_and_suffix() {
        let file = ProblemFile::parse("euler012-skipped.py", 3).unwrap();
        assert_eq!(file.prefix, "euler");
        assert_eq!(file.str_num, "012");
        assert_eq!(file.suffix, "-skipped");
        assert_eq!(file.filename(), "euler012-skipped.py");
    }

    #[test]
    fn test_parse_wide_number() {
        let file = ProblemFile::parse("1234.py", 3).unwrap();
        assert_eq!(file.num(), 1234);
        assert_eq!(file.prefix, "");
    }

    #[test]
    fn test_parse_rejects_non_problem_files() {
        assert_eq!(ProblemFile::parse("names.txt", 3), None);
        assert_eq!(ProblemFile::parse("01.py", 3), None);
        assert_eq!(ProblemFile::parse("001", 3), None);
        assert_eq!(ProblemFile::parse("99999999999.py", 3), None);
        assert_eq!(ProblemFile::parse("4294967295.py", 3).unwrap().num(), u32::MAX);
    }

    #[test]
    fn test_rename_to_same_name_is_noop() {
        let dir = TempDir::new().unwrap();
        let mut file = ProblemFile::parse("001.py", 3).unwrap();
        // The file does not exist, so any filesystem call would fail.
        let changed = file.rename(dir.path(), file.clone()).unwrap();
        assert!(!changed);
        assert_eq!(file.filename(), "001.py");
    }

    #[test]
    fn test_change_suffix_renames_on_disk() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("003.py"), "").unwrap();

        let mut file = ProblemFile::parse("003.py", 3).unwrap();
        assert!(file.change_suffix(dir.path(), SKIPPED_SUFFIX).unwrap());
        assert_eq!(file.filename(), "003-skipped.py");
        assert!(dir.path().join("003-skipped.py").is_file());
        assert!(!dir.path().join("003.py").exists());
    }

    #[test]
    fn test_rename_never_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("004.py"), "new").unwrap();
        fs::write(dir.path().join("004-skipped.py"), "old").unwrap();

        let mut file = ProblemFile::parse("004.py", 3).unwrap();
        assert!(matches!(
            file.change_suffix(dir.path(), SKIPPED_SUFFIX),
            Err(EulerError::TargetExists { .. })
        ));
        assert_eq!(file.filename(), "004.py");
        assert_eq!(fs::read_to_string(dir.path().join("004.py")).unwrap(), "new");
        assert_eq!(
            fs::read_to_string(dir.path().join("004-skipped.py")).unwrap(),
            "old"
        );
    }

    #[test]
    fn test_rename_across_numbers_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut file = ProblemFile::parse("003.py", 3).unwrap();
        let other = ProblemFile::parse("004.py", 3).unwrap();
        assert!(matches!(
            file.rename(dir.path(), other),
            Err(EulerError::NumberMismatch { .. })
        ));
    }

    #[test]
    fn test_problem_files_scan() {
        let dir = TempDir::new().unwrap();
        for name in ["002-skipped.py", "001.py", "euler010.sh", "004.txt", "notes.md"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("005.d")).unwrap();

        let names: Vec<String> = problem_files(dir.path(), 3)
            .unwrap()
            .iter()
            .map(ProblemFile::filename)
            .collect();
        assert_eq!(names, ["001.py", "002-skipped.py", "euler010.sh"]);
        assert_eq!(highest_problem(dir.path(), 3).unwrap(), Some(10));
    }

    #[test]
    fn test_highest_problem_in_empty_dir() {
        let dir = TempDir::new().unwrap();
        assert_eq!(highest_problem(dir.path(), 3).unwrap(), None);
    }
}
