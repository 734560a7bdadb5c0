//! Error types for table decoding, feature extraction and output.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for crate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Faults in a single module's table: bad document shape or data an extractor
/// cannot compute features from.
#[derive(Error, Debug)]
pub enum TableError {
    /// Document is not a `{columns, rows}` object
    #[error("unparseable table document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("row {row} has {found} values, expected {expected}")]
    RowShape {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),

    #[error("missing column '{0}'")]
    MissingColumn(String),

    #[error("column '{column}' holds {found}, expected {expected}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Ratio feature whose denominator is the (zero) row count
    #[error("table is empty; '{feature}' is undefined")]
    Empty { feature: &'static str },

    /// Column total does not fit in 64 bits
    #[error("sum of column '{column}' overflows")]
    Overflow { column: &'static str },

    #[error("feature '{0}' emitted twice")]
    DuplicateFeature(String),
}

/// Crate-level errors. Everything that aborts an artifact carries the module name.
#[derive(Error, Debug)]
pub enum Error {
    /// Input path is not an existing regular file
    #[error("memory dump does not exist or is not a file: {}", .0.display())]
    MissingArtifact(PathBuf),

    /// Volatility exited non-zero, could not be spawned, or produced nothing
    #[error("volatility module '{module}' failed ({status}): {stderr}")]
    ExternalTool {
        module: String,
        status: String,
        stderr: String,
    },

    #[error("module '{module}': {source}")]
    Module {
        module: String,
        #[source]
        source: TableError,
    },

    #[error("unknown module '{0}'")]
    UnknownModule(String),

    /// Row does not fit the header already present in a non-empty output
    #[error("row columns do not match header of {}: expected {expected:?}, found {found:?}", .path.display())]
    HeaderMismatch {
        path: PathBuf,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Module the failure belongs to, when it is module-scoped
    pub fn module(&self) -> Option<&str> {
        match self {
            Error::ExternalTool { module, .. } | Error::Module { module, .. } => {
                Some(module.as_str())
            }
            _ => None,
        }
    }

    pub(crate) fn in_module(module: &str, source: TableError) -> Self {
        Error::Module {
            module: module.to_string(),
            source,
        }
    }
}
