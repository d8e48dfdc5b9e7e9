use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::{Corpus, Problem, ProblemFile, ProblemNumber, UserConfig};

/// The directory being worked in, plus the config and corpus every operation needs.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub dir: PathBuf,
    pub config: UserConfig,
    pub corpus: Corpus,
}

impl Workspace {
    pub fn new(dir: PathBuf, config: UserConfig, corpus: Corpus) -> Self {
        Self { dir, config, corpus }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn width(&self) -> usize {
        self.config.width
    }

    /// Name a brand-new file for `num` gets, without any suffix.
    pub fn canonical_filename(&self, num: ProblemNumber) -> String {
        Problem::new(num).filename(
            &self.config.prefix,
            "",
            self.config.extension(),
            self.width(),
        )
    }

    pub fn first_file(&self, num: ProblemNumber) -> Result<Option<ProblemFile>> {
        Problem::new(num).file(&self.dir, self.width())
    }

    pub fn has_file(&self, num: ProblemNumber) -> Result<bool> {
        Ok(self.first_file(num)?.is_some())
    }

    pub fn exists(&self, filename: &str) -> bool {
        self.dir.join(filename).is_file()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::models::Language;
    use tempfile::TempDir;

    pub const PROBLEMS: &str = "Problem 1\n=========\n\nAdd some numbers.\n\n\n\
                                Problem 2\n=========\n\nAdd more numbers.\n\n\n\
                                Problem 3\n=========\n\nFactor a number.\n\nCarefully.\n\n\n";

    pub const SOLUTIONS: &str = "1. 233168\n2. 4613732\n3. 6857\n4. 906609\n5. 232792560\n";

    /// A shell-script workspace in a fresh temporary directory.
    pub fn workspace(tmp: &TempDir) -> Workspace {
        let resource_dir = tmp.path().join("corpus-resources");
        let config = UserConfig {
            language: Language::Sh,
            resource_dir: Some(resource_dir.clone()),
            ..UserConfig::default()
        };
        let manifest = r#"{"2": ["data.txt", "gone.txt"]}"#;
        let corpus = Corpus::new(PROBLEMS, SOLUTIONS, manifest, resource_dir).unwrap();
        let dir = tmp.path().join("work");
        std::fs::create_dir_all(&dir).unwrap();
        Workspace::new(dir, config, corpus)
    }

    /// A solution that prints `output` and exits with `code`.
    pub fn write_solution(ws: &Workspace, name: &str, output: &str, code: i32) {
        let mut script = String::new();
        for line in output.lines() {
            script.push_str(&format!("echo '{}'\n", line));
        }
        script.push_str(&format!("exit {}\n", code));
        std::fs::write(ws.dir.join(name), script).unwrap();
    }

    pub fn correct_solution(ws: &Workspace, num: ProblemNumber, name: &str) {
        let answer = ws.corpus.solution(num).unwrap();
        write_solution(ws, name, &answer, 0);
    }
}
