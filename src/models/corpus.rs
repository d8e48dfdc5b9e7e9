use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use super::config::UserConfig;
use super::ProblemNumber;
use crate::error::{EulerError, Result};

const PROBLEMS: &str = include_str!("../../data/problems.txt");
const SOLUTIONS: &str = include_str!("../../data/solutions.txt");
const RESOURCES: &str = include_str!("../../data/resources.json");

/// A manifest entry is either one file name or a list of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ResourceEntry {
    One(String),
    Many(Vec<String>),
}

impl ResourceEntry {
    fn into_vec(self) -> Vec<String> {
        match self {
            ResourceEntry::One(name) => vec![name],
            ResourceEntry::Many(names) => names,
        }
    }
}

/// Problem statements, answers and the resource manifest.
#[derive(Debug, Clone)]
pub struct Corpus {
    problems: Cow<'static, str>,
    solutions: Cow<'static, str>,
    resources: BTreeMap<ProblemNumber, Vec<String>>,
    resource_dir: PathBuf,
}

impl Corpus {
    pub fn new(
        problems: impl Into<Cow<'static, str>>,
        solutions: impl Into<Cow<'static, str>>,
        manifest: &str,
        resource_dir: PathBuf,
    ) -> Result<Self> {
        Ok(Self {
            problems: problems.into(),
            solutions: solutions.into(),
            resources: parse_manifest(manifest)?,
            resource_dir,
        })
    }

    /// The bundled corpus, or the one in `data_dir` when configured.
    pub fn load(config: &UserConfig) -> Result<Self> {
        match &config.data_dir {
            Some(dir) => {
                debug!("loading corpus from {}", dir.display());
                let read = |name: &str| {
                    let path = dir.join(name);
                    fs::read_to_string(&path).map_err(|e| {
                        EulerError::Corpus(format!("failed to read {}: {}", path.display(), e))
                    })
                };
                let manifest = match read("resources.json") {
                    Ok(m) => m,
                    Err(e) => {
                        warn!("{}; continuing without resources", e);
                        "{}".to_string()
                    }
                };
                Corpus::new(
                    read("problems.txt")?,
                    read("solutions.txt")?,
                    &manifest,
                    config.resource_dir(),
                )
            }
            None => Corpus::new(PROBLEMS, SOLUTIONS, RESOURCES, config.resource_dir()),
        }
    }

    /// Problem statement without its header, divider and trailing blank lines.
    pub fn text(&self, number: ProblemNumber) -> Option<String> {
        let header = format!("Problem {}", number);
        let mut lines = Vec::new();
        let mut found = false;
        let mut last_blank = false;

        for line in self.problems.lines() {
            if !found {
                found = line.trim() == header;
                if !found {
                    continue;
                }
            }
            let blank = line.trim().is_empty();
            if blank && last_blank {
                break;
            }
            lines.push(line);
            last_blank = blank;
        }

        if !found {
            return None;
        }

        // Header, divider and the blank line under them.
        let mut body: Vec<&str> = lines.into_iter().skip(3).collect();
        while body.last().is_some_and(|l| l.trim().is_empty()) {
            body.pop();
        }
        Some(body.join("\n"))
    }

    /// Answer stored on line `number` of the solutions file.
    pub fn solution(&self, number: ProblemNumber) -> Option<String> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        let line = self.solutions.lines().nth(index)?;
        let (_, answer) = line.split_once(". ")?;
        let answer = answer.trim();
        if answer.is_empty() {
            None
        } else {
            Some(answer.to_string())
        }
    }

    pub fn resources(&self, number: ProblemNumber) -> &[String] {
        self.resources
            .get(&number)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn resource_path(&self, name: &str) -> PathBuf {
        self.resource_dir.join(name)
    }

    pub fn resource_dir(&self) -> &Path {
        &self.resource_dir
    }
}

fn parse_manifest(manifest: &str) -> Result<BTreeMap<ProblemNumber, Vec<String>>> {
    let raw: BTreeMap<String, ResourceEntry> = serde_json::from_str(manifest)
        .map_err(|e| EulerError::Corpus(format!("resources.json: {}", e)))?;

    raw.into_iter()
        .map(|(key, entry)| {
            let number = key.parse::<ProblemNumber>().map_err(|_| {
                EulerError::Corpus(format!("resources.json: '{}' is not a problem number", key))
            })?;
            Ok((number, entry.into_vec()))
        })
        .collect()
}
