use std::fs;
use std::path::Path;

use colored::Colorize;
use tracing::{debug, warn};

use crate::error::{EulerError, Result};
use crate::models::{config, Language, Problem, ProblemNumber};
use crate::prompt::Prompter;
use crate::workspace::Workspace;

/// A file that has been confirmed but not yet written.
#[derive(Debug)]
pub struct PendingFile {
    pub number: ProblemNumber,
    pub filename: String,
    pub contents: String,
}

/// Asks every question up front so nothing is touched if the user declines.
pub fn prepare(
    ws: &Workspace,
    prompter: &mut dyn Prompter,
    number: ProblemNumber,
    prompt_default: bool,
) -> Result<PendingFile> {
    let text = ws
        .corpus
        .text(number)
        .ok_or(EulerError::ProblemNotFound(number))?;

    prompter.require(
        &format!("Generate file for problem {}?", number),
        prompt_default,
    )?;

    let filename = match ws.first_file(number)? {
        // Skipped files get overwritten in place rather than duplicated.
        Some(existing) => {
            let msg = format!("\"{}\" already exists. Overwrite?", existing);
            prompter.require(&msg.red().to_string(), false)?;
            existing.filename()
        }
        None => {
            let prefix = match number.checked_sub(1) {
                Some(previous) if previous > 0 => ws.first_file(previous)?.map(|f| f.prefix),
                _ => None,
            };
            let prefix = prefix.unwrap_or_else(|| ws.config.prefix.clone());
            Problem::new(number).filename(&prefix, "", ws.config.extension(), ws.width())
        }
    };

    let language = Path::new(&filename)
        .extension()
        .and_then(|e| e.to_str())
        .and_then(Language::from_extension)
        .unwrap_or(ws.config.language);

    debug!("preparing {} for problem {}", language.display_name(), number);
    Ok(PendingFile {
        number,
        filename,
        contents: file_contents(language, number, &text),
    })
}

pub fn write(ws: &Workspace, pending: PendingFile) -> Result<String> {
    fs::write(ws.dir().join(&pending.filename), &pending.contents)?;
    println!(
        "{}",
        format!("Successfully created \"{}\".", pending.filename).green()
    );

    copy_resources(ws, pending.number)?;
    Ok(pending.filename)
}

/// Generates the solution file for `number`.
pub fn generate(
    ws: &Workspace,
    prompter: &mut dyn Prompter,
    number: ProblemNumber,
    prompt_default: bool,
) -> Result<String> {
    let pending = prepare(ws, prompter, number, prompt_default)?;
    write(ws, pending)
}

pub fn file_contents(language: Language, number: ProblemNumber, text: &str) -> String {
    let (open, close) = language.comment_delimiters();
    let header = format!("Project Euler Problem {}", number);
    let divider = "=".repeat(header.chars().count());
    format!("{open}\n{header}\n{divider}\n\n{text}\n{close}\n\n\n")
}

/// Resource names listed for a problem, split by whether they could be copied.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CopiedResources {
    pub copied: Vec<String>,
    pub missing: Vec<String>,
}

/// Copies the problem's auxiliary files into `resources/`.
pub fn copy_resources(ws: &Workspace, number: ProblemNumber) -> Result<CopiedResources> {
    let resources = ws.corpus.resources(number);
    if resources.is_empty() {
        return Ok(CopiedResources::default());
    }

    let target = ws.dir().join("resources");
    fs::create_dir_all(&target)?;

    let mut result = CopiedResources::default();
    for name in resources {
        let source = ws.corpus.resource_path(name);
        if !source.is_file() {
            warn!("resource {} not found in {}", name, ws.corpus.resource_dir().display());
            result.missing.push(name.clone());
            continue;
        }
        fs::copy(&source, target.join(name))?;
        result.copied.push(name.clone());
    }

    let copied = &result.copied;
    if !copied.is_empty() {
        let dir_name = ws
            .dir()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| ".".to_string());
        println!(
            "{}",
            format!("Copied {} to {}/resources.", copied.join(", "), dir_name).green()
        );
    }
    if !result.missing.is_empty() {
        println!(
            "{}",
            format!(
                "Resources not found: {}. Set \"resource_dir\" in {} to the directory holding them.",
                result.missing.join(", "),
                config_location()
            )
            .yellow()
        );
    }
    Ok(result)
}

fn config_location() -> String {
    config::get_config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "the config file".to_string())
}
