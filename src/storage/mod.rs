use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{Result, TrackerError};
use crate::listing::ListingStore;

pub const DEFAULT_SAVE_LOCATION: &str = "./UserData/listings.json";

// JSON gateway for the listing store. Save and load failures are
// recoverable; the in-memory store stays valid either way.
#[derive(Debug)]
pub struct SaveFile {
    path: PathBuf,
}

impl SaveFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_location() -> Self {
        Self::new(DEFAULT_SAVE_LOCATION)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, store: &ListingStore) -> Result<()> {
        let json = serde_json::to_string_pretty(store)
            .map_err(|e| TrackerError::PersistenceError(format!("serializing listings: {}", e)))?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    TrackerError::PersistenceError(format!(
                        "creating {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }
        fs::write(&self.path, json).map_err(|e| {
            TrackerError::PersistenceError(format!("writing {}: {}", self.path.display(), e))
        })?;
        log::info!(
            "saved {} character listings to {}",
            store.entries().count(),
            self.path.display()
        );
        Ok(())
    }

    // A missing file is a fresh start, not an error.
    pub fn load(&self) -> Result<ListingStore> {
        if !self.path.exists() {
            log::info!("no save file at {}, starting empty", self.path.display());
            return Ok(ListingStore::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| {
            TrackerError::PersistenceError(format!("reading {}: {}", self.path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            TrackerError::PersistenceError(format!("parsing {}: {}", self.path.display(), e))
        })
    }
}
