//! Per-region marker persistence.
//!
//! The sharing engine only talks to storage through [`MarkerStore`]. The shipped
//! implementation, [`ConfigMarkerStore`], keeps every region's markers as a JSON
//! string under its own key in a key-value config file.
//!
//! ## Module Structure
//!
//! - [`config_store`] - Key-value config file backed store
//! - [`memory`] - In-memory store used by tests

mod config_store;
#[cfg(test)]
pub mod memory;


use std::path::PathBuf;

use thiserror::Error;

use crate::markers::{MarkerRecord, RegionId};

pub use config_store::ConfigMarkerStore;

/// One pending region write: `None` clears the region.
pub type RegionWrite = (RegionId, Option<Vec<MarkerRecord>>);

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("store file {path} is not a valid config: {source}")]
    CorruptFile {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("markers stored under '{key}' are corrupted: {source}")]
    CorruptEntry {
        key: String,
        source: serde_json::Error,
    },

    #[error("failed to serialize markers: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Region-partitioned access to stored markers.
pub trait MarkerStore {
    /// Markers stored under `region`, in stored order. Empty if none.
    fn records(&self, region: RegionId) -> Result<Vec<MarkerRecord>, StoreError>;

    /// Replace everything stored under `region`. `None` or an empty list clears it.
    fn save_records(
        &mut self,
        region: RegionId,
        records: Option<Vec<MarkerRecord>>,
    ) -> Result<(), StoreError>;

    /// Apply several region writes. Stores that can commit atomically should
    /// override this; the default writes region by region and stops at the first
    /// failure, leaving earlier regions written.
    fn save_batch(&mut self, batch: Vec<RegionWrite>) -> Result<(), StoreError> {
        for (region, records) in batch {
            self.save_records(region, records)?;
        }
        Ok(())
    }

    /// Refresh any cached view after a batch of saves.
    fn reload(&mut self) -> Result<(), StoreError>;
}
