//! Marker store backed by a key-value JSON config file.
//!
//! The file is a flat JSON object. Each region occupies one key,
//! `baTiles.region_<id>`, whose value is that region's markers serialized as a JSON
//! array string. Regions without markers have no key at all.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::constants::{CONFIG_GROUP, REGION_KEY_PREFIX};
use crate::markers::{MarkerRecord, RegionId};

use super::{MarkerStore, RegionWrite, StoreError};

pub struct ConfigMarkerStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl ConfigMarkerStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = read_entries(&path)?;
        info!("Opened marker store {:?} ({} regions)", path, entries.len());
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Regions that currently hold markers, in ascending order.
    pub fn regions(&self) -> Vec<RegionId> {
        let prefix = region_key_prefix();
        let mut regions: Vec<RegionId> = self
            .entries
            .keys()
            .filter_map(|key| key.strip_prefix(&prefix)?.parse().ok())
            .collect();
        regions.sort_unstable();
        regions
    }

    fn apply(
        &mut self,
        region: RegionId,
        records: Option<Vec<MarkerRecord>>,
    ) -> Result<(), StoreError> {
        let key = region_key(region);
        match records {
            Some(records) if !records.is_empty() => {
                let json = serde_json::to_string(&records)?;
                self.entries.insert(key, json);
            }
            _ => {
                self.entries.remove(&key);
            }
        }
        Ok(())
    }

    /// Write the whole file through a sibling temp file so a failed write never
    /// leaves a half-written store behind.
    fn persist(&self) -> Result<(), StoreError> {
        let io_error = |source: std::io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }

        let json = serde_json::to_string_pretty(&self.entries)?;
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json).map_err(io_error)?;
        std::fs::rename(&tmp_path, &self.path).map_err(io_error)?;
        debug!("Persisted marker store to {:?}", self.path);
        Ok(())
    }
}

impl MarkerStore for ConfigMarkerStore {
    fn records(&self, region: RegionId) -> Result<Vec<MarkerRecord>, StoreError> {
        let key = region_key(region);
        match self.entries.get(&key) {
            Some(json) if !json.trim().is_empty() => {
                serde_json::from_str(json).map_err(|source| StoreError::CorruptEntry { key, source })
            }
            _ => Ok(Vec::new()),
        }
    }

    fn save_records(
        &mut self,
        region: RegionId,
        records: Option<Vec<MarkerRecord>>,
    ) -> Result<(), StoreError> {
        self.save_batch(vec![(region, records)])
    }

    fn save_batch(&mut self, batch: Vec<RegionWrite>) -> Result<(), StoreError> {
        let previous = self.entries.clone();
        for (region, records) in batch {
            if let Err(e) = self.apply(region, records) {
                self.entries = previous;
                return Err(e);
            }
        }

        if let Err(e) = self.persist() {
            self.entries = previous;
            return Err(e);
        }
        Ok(())
    }

    fn reload(&mut self) -> Result<(), StoreError> {
        self.entries = read_entries(&self.path)?;
        debug!("Reloaded {} regions from {:?}", self.entries.len(), self.path);
        Ok(())
    }
}

fn region_key_prefix() -> String {
    format!("{}.{}", CONFIG_GROUP, REGION_KEY_PREFIX)
}

fn region_key(region: RegionId) -> String {
    format!("{}{}", region_key_prefix(), region)
}

fn read_entries(path: &Path) -> Result<BTreeMap<String, String>, StoreError> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }

    let json = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if json.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    serde_json::from_str(&json).map_err(|source| StoreError::CorruptFile {
        path: path.to_path_buf(),
        source,
    })
}
