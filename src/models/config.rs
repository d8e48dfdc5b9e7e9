use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::language::Language;
use crate::error::{EulerError, Result};

const CONFIG_ENV: &str = "EULER_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    /// Language used for newly generated files.
    pub language: Language,
    /// Prefix for new files when no neighbouring file suggests one.
    pub prefix: String,
    /// Minimum number of digits in a file name.
    pub width: usize,
    /// Overrides the language's interpreter when running solutions.
    pub interpreter: Option<String>,
    /// Directory holding problems.txt, solutions.txt and resources.json.
    pub data_dir: Option<PathBuf>,
    /// Directory holding auxiliary problem resources.
    pub resource_dir: Option<PathBuf>,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            language: Language::Py,
            prefix: String::new(),
            width: 3,
            interpreter: None,
            data_dir: None,
            resource_dir: None,
        }
    }
}

impl UserConfig {
    pub fn extension(&self) -> &'static str {
        self.language.extension()
    }

    pub fn resource_dir(&self) -> PathBuf {
        if let Some(dir) = &self.resource_dir {
            return dir.clone();
        }
        if let Some(dir) = &self.data_dir {
            return dir.join("resources");
        }
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("euler")
            .join("resources")
    }

    fn validate(self) -> Result<Self> {
        if self.width == 0 {
            return Err(EulerError::Config("width must be at least 1".to_string()));
        }
        if self.prefix.chars().any(|c| c.is_ascii_digit() || c == '/') {
            return Err(EulerError::Config(format!(
                "prefix '{}' may not contain digits or '/'",
                self.prefix
            )));
        }
        Ok(self)
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(".config").join("euler").join("config.json"))
}

/// Loads the user config. A missing file gives the defaults; a broken one is
/// reported and replaced by the defaults too.
pub fn load_config() -> Result<UserConfig> {
    let Some(path) = get_config_path() else {
        return Ok(UserConfig::default());
    };
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let config = match fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
            warn!("ignoring unparsable config {}: {}", path.display(), e);
            UserConfig::default()
        }),
        Err(e) => {
            warn!("could not read config {}: {}", path.display(), e);
            UserConfig::default()
        }
    };
    config.validate()
}
