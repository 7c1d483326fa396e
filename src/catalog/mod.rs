// src/catalog/mod.rs

pub mod cache;
pub mod decode;
pub mod error;
pub mod locate;
pub mod mapping;
pub mod normalize;

pub use cache::CatalogCache;
pub use decode::{decode, RawTable, DEFAULT_ENCODINGS};
pub use error::CatalogError;
pub use locate::{locate, DEFAULT_SEARCH_PATHS};
pub use mapping::{infer_mapping, ColumnMapping, SemanticKey};
pub use normalize::{normalize, Normalized, ProductRecord, RowPolicy};

use std::path::{Path, PathBuf};

use tracing::info;

/// A successfully loaded catalog: validated records in file order, ready
/// for the shopping page to render. Lives for one page visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub path: PathBuf,
    pub records: Vec<ProductRecord>,
    /// Rows dropped under the lenient row policy; always zero under strict.
    pub skipped_rows: usize,
}

/// Runs the full load pipeline: locate → decode → infer mapping →
/// normalize. Stateless across calls; each page visit runs it again.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    search_paths: Vec<PathBuf>,
    encodings: Vec<String>,
    policy: RowPolicy,
}

impl Default for CatalogLoader {
    fn default() -> Self {
        Self {
            search_paths: DEFAULT_SEARCH_PATHS.iter().map(PathBuf::from).collect(),
            encodings: DEFAULT_ENCODINGS.iter().map(|e| e.to_string()).collect(),
            policy: RowPolicy::default(),
        }
    }
}

impl CatalogLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.search_paths = paths;
        self
    }

    pub fn with_encodings(mut self, encodings: Vec<String>) -> Self {
        self.encodings = encodings;
        self
    }

    pub fn with_policy(mut self, policy: RowPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Resolve the catalog path without loading it.
    pub fn locate(&self) -> Result<PathBuf, CatalogError> {
        locate::locate(&self.search_paths)
    }

    /// Run the whole pipeline. Any stage failure is terminal for this
    /// attempt; only the path and encoding candidate lists retry
    /// internally, and both are bounded.
    #[tracing::instrument(level = "info", skip(self))]
    pub fn load(&self) -> Result<Catalog, CatalogError> {
        let path = self.locate()?;
        self.load_from(&path)
    }

    /// Decode, map, and normalize an already-located file.
    pub fn load_from(&self, path: &Path) -> Result<Catalog, CatalogError> {
        let encodings: Vec<&str> = self.encodings.iter().map(String::as_str).collect();
        let table = decode::decode(path, &encodings)?;
        let mapping = mapping::infer_mapping(&table.headers)?;
        let normalized = normalize::normalize(&table, &mapping, self.policy)?;
        info!(
            path = %path.display(),
            records = normalized.records.len(),
            skipped = normalized.skipped,
            "catalog ready"
        );
        Ok(Catalog {
            path: path.to_path_buf(),
            records: normalized.records,
            skipped_rows: normalized.skipped,
        })
    }
}
