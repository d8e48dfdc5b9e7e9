use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Py,
    Rb,
    Js,
    Sh,
}

impl Language {
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Py => "Python",
            Language::Rb => "Ruby",
            Language::Js => "JavaScript",
            Language::Sh => "Shell",
        }
    }

    /// File extension including the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Language::Py => ".py",
            Language::Rb => ".rb",
            Language::Js => ".js",
            Language::Sh => ".sh",
        }
    }

    pub fn interpreter(&self) -> &'static str {
        match self {
            Language::Py => "python3",
            Language::Rb => "ruby",
            Language::Js => "node",
            Language::Sh => "sh",
        }
    }

    /// Opening and closing lines of a block comment that wraps the problem header.
    pub fn comment_delimiters(&self) -> (&'static str, &'static str) {
        match self {
            Language::Py => ("\"\"\"", "\"\"\""),
            Language::Rb => ("=begin", "=end"),
            Language::Js => ("/*", "*/"),
            Language::Sh => (": <<'PROBLEM'", "PROBLEM"),
        }
    }

    pub fn from_extension(ext: &str) -> Option<Language> {
        match ext.trim_start_matches('.') {
            "py" => Some(Language::Py),
            "rb" => Some(Language::Rb),
            "js" => Some(Language::Js),
            "sh" => Some(Language::Sh),
            _ => None,
        }
    }
}
