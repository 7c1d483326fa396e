use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::catalog::error::CatalogError;

/// Where the shopping page looks for its catalog, in order.
pub const DEFAULT_SEARCH_PATHS: &[&str] =
    &["products.csv", "data/products.csv", "assets/products.csv"];

/// Try each candidate path in order and return the first that exists.
/// Fails with `NotFound` carrying every attempted path and the current
/// working directory, so the caller can render a useful diagnostic.
pub fn locate<P: AsRef<Path>>(search_paths: &[P]) -> Result<PathBuf, CatalogError> {
    for candidate in search_paths {
        let candidate = candidate.as_ref();
        if candidate.is_file() {
            debug!(path = %candidate.display(), "located catalog file");
            return Ok(candidate.to_path_buf());
        }
    }
    Err(CatalogError::NotFound {
        attempted: search_paths.iter().map(|p| p.as_ref().to_path_buf()).collect(),
        cwd: env::current_dir().unwrap_or_default(),
    })
}
