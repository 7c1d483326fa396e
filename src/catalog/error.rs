use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::mapping::SemanticKey;

/// Every way a catalog load can fail. All variants are terminal for the
/// current attempt; the bounded path/encoding candidate lists are exhausted
/// before `NotFound` or `DecodeFailed` is produced.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No candidate path pointed at an existing file.
    #[error("no catalog file found; tried {attempted:?} (cwd: {cwd:?})")]
    NotFound {
        attempted: Vec<PathBuf>,
        cwd: PathBuf,
    },

    /// Every candidate encoding either failed to decode the bytes or
    /// produced a malformed table.
    #[error("could not decode {path:?} with any of {attempted:?}: {last}")]
    DecodeFailed {
        path: PathBuf,
        attempted: Vec<String>,
        /// The last underlying decode/parse error, for diagnostics.
        last: String,
    },

    /// One or more required semantic columns had no matching header.
    #[error("catalog is missing required column(s) {missing:?}; headers were {headers:?}")]
    MissingColumns {
        missing: Vec<SemanticKey>,
        headers: Vec<String>,
    },

    /// A row's name cell was empty after trimming.
    #[error("data row {row}: product name is empty")]
    InvalidName { row: usize },

    /// A row's price cell did not coerce to a non-negative integer.
    #[error("data row {row}: price {value:?} is not a non-negative integer")]
    InvalidPrice { row: usize, value: String },
}
