use std::path::PathBuf;
use thiserror::Error;

/// Failures while building the tree from a JSON document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{path}: invalid base64 content: {source}")]
    Base64 {
        path: String,
        #[source]
        source: base64::DecodeError,
    },

    #[error("{path}: decoded content is not valid UTF-8")]
    Utf8 { path: String },

    #[error("malformed document: {0}")]
    Malformed(String),
}

/// Lookup failure inside the tree, before a command name is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("No such file or directory")]
    NotFound,
    #[error("Not a directory")]
    NotADirectory,
}

/// Every failure a line of input, a script or startup can produce.
///
/// Command-level variants carry the command name so each one prints as a
/// single line, e.g. `cd: /nope: No such file or directory`.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("parse error: {0}")]
    Tokenize(String),

    #[error("{0}: command not found")]
    UnknownCommand(String),

    #[error("{command}: {reason}")]
    Argument { command: &'static str, reason: String },

    #[error("{command}: {path}: No such file or directory")]
    PathNotFound { command: &'static str, path: String },

    #[error("{command}: {path}: Not a directory")]
    NotADirectory { command: &'static str, path: String },

    #[error("{command}: {path}: Is a directory")]
    IsADirectory { command: &'static str, path: String },

    #[error("failed to load VFS: {0}")]
    Load(#[from] LoadError),

    #[error("cannot read script {}: {source}", .path.display())]
    ScriptFileMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error in script {source_name} at line {line_no}: {line}")]
    Script {
        source_name: String,
        line_no: usize,
        line: String,
        #[source]
        cause: Box<ShellError>,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("terminal error: {0}")]
    Terminal(#[from] rustyline::error::ReadlineError),
}

impl ShellError {
    pub fn argument(command: &'static str, reason: impl Into<String>) -> Self {
        ShellError::Argument { command, reason: reason.into() }
    }

    /// Attach a command name and the path as typed to a tree lookup failure.
    pub fn from_resolve(command: &'static str, path: &str, err: ResolveError) -> Self {
        let path = path.to_string();
        match err {
            ResolveError::NotFound => ShellError::PathNotFound { command, path },
            ResolveError::NotADirectory => ShellError::NotADirectory { command, path },
        }
    }
}

pub type Result<T> = std::result::Result<T, ShellError>;
