use crate::geo::error::GeoError;
use crate::geo::reference::GeoReference;
use crate::types::granularity::Granularity;
use log::info;
use std::collections::{hash_map::Entry, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Boundary files for both granularities, each loaded at most once.
pub struct GeoCatalog {
    state_path: PathBuf,
    district_path: PathBuf,
    cache: Mutex<HashMap<Granularity, Arc<GeoReference>>>,
}

impl GeoCatalog {
    pub fn new(state_path: impl Into<PathBuf>, district_path: impl Into<PathBuf>) -> Self {
        Self {
            state_path: state_path.into(),
            district_path: district_path.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn path(&self, granularity: Granularity) -> &Path {
        match granularity {
            Granularity::State => &self.state_path,
            Granularity::District => &self.district_path,
        }
    }

    /// Returns the boundaries for `granularity`, reading the file on first use.
    ///
    /// A failed load is not cached; the next call reads the file again.
    pub async fn get(&self, granularity: Granularity) -> Result<Arc<GeoReference>, GeoError> {
        {
            let cache = self.cache.lock().await;
            if let Some(reference) = cache.get(&granularity) {
                return Ok(Arc::clone(reference));
            }
        }

        let path = self.path(granularity);
        let loaded = Arc::new(GeoReference::load(path, granularity.join_attribute()).await?);
        info!(
            "Loaded {} {} boundaries from {}",
            loaded.len(),
            granularity,
            path.display()
        );

        let mut cache = self.cache.lock().await;
        match cache.entry(granularity) {
            // Loaded concurrently by another caller.
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => Ok(Arc::clone(entry.insert(loaded))),
        }
    }
}
