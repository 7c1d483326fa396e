use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use tracing::debug;

use crate::catalog::error::CatalogError;
use crate::catalog::{Catalog, CatalogLoader};

struct CacheEntry {
    mtime: SystemTime,
    catalog: Arc<Catalog>,
}

/// Memoizes successful loads keyed on (path, modification time). Re-parsing
/// is idempotent, so this never changes observable results; it only skips
/// repeat work when the same file is loaded across page visits. Failures
/// are never cached.
#[derive(Default)]
pub struct CatalogCache {
    entries: HashMap<PathBuf, CacheEntry>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `loader`, reusing the previous result if the located file's
    /// modification time is unchanged since the last successful load.
    pub fn load(&mut self, loader: &CatalogLoader) -> Result<Arc<Catalog>, CatalogError> {
        let path = loader.locate()?;
        let mtime = fs::metadata(&path).ok().and_then(|m| m.modified().ok());

        if let (Some(mtime), Some(entry)) = (mtime, self.entries.get(&path)) {
            if entry.mtime == mtime {
                debug!(path = %path.display(), "catalog cache hit");
                return Ok(Arc::clone(&entry.catalog));
            }
        }

        let catalog = Arc::new(loader.load_from(&path)?);
        if let Some(mtime) = mtime {
            self.entries.insert(
                path,
                CacheEntry {
                    mtime,
                    catalog: Arc::clone(&catalog),
                },
            );
        }
        Ok(catalog)
    }
}
