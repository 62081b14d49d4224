//! Error types for sqllint

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures that abort the whole run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("File does not exist: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Not a file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("No files match pattern: {0}")]
    NoMatch(String),

    #[error("Invalid pattern {pattern}: {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("Failed to read {name}: {source}")]
    Read { name: String, source: io::Error },

    #[error("Failed to read config {}: {source}", .path.display())]
    Config { path: PathBuf, source: io::Error },

    #[error("Cannot format {name}: {count} syntax error(s)")]
    Format { name: String, count: usize },

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}
