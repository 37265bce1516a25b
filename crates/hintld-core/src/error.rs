//! Error types for table loading and publication parsing

use std::path::PathBuf;

/// Error from loading one tab-separated HiNT table.
///
/// Any of these is fatal for the organism being processed.
#[derive(Debug)]
pub enum TableError {
    /// File could not be opened
    Io { path: PathBuf, source: std::io::Error },
    /// Record-level read failure (bad UTF-8, ragged row, ...)
    Read { path: PathBuf, source: csv::Error },
    /// Header lacks a required column
    MissingColumn { path: PathBuf, column: &'static str },
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Read { path, source } => write!(f, "{}: {source}", path.display()),
            Self::MissingColumn { path, column } => {
                write!(f, "{}: missing required column '{column}'", path.display())
            }
        }
    }
}

impl std::error::Error for TableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Read { source, .. } => Some(source),
            Self::MissingColumn { .. } => None,
        }
    }
}

/// A compound publication entry that is not `identifier:method:quality`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicationError {
    pub entry: String,
}

impl std::fmt::Display for PublicationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "malformed publication entry '{}' (expected identifier:method:quality)",
            self.entry
        )
    }
}

impl std::error::Error for PublicationError {}
