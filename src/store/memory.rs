//! In-memory marker store that records every write, for engine tests.

use std::collections::HashMap;

use crate::markers::{MarkerRecord, RegionId};

use super::{MarkerStore, StoreError};

#[derive(Default)]
pub struct MemoryMarkerStore {
    regions: HashMap<RegionId, Vec<MarkerRecord>>,
    /// Regions written, in write order
    pub writes: Vec<RegionId>,
    pub reloads: usize,
    /// `records` fails for this region while set
    pub fail_reads_for: Option<RegionId>,
}

impl MemoryMarkerStore {
    pub fn with_region(mut self, region: RegionId, records: Vec<MarkerRecord>) -> Self {
        self.regions.insert(region, records);
        self
    }

    pub fn get(&self, region: RegionId) -> &[MarkerRecord] {
        self.regions.get(&region).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl MarkerStore for MemoryMarkerStore {
    fn records(&self, region: RegionId) -> Result<Vec<MarkerRecord>, StoreError> {
        if self.fail_reads_for == Some(region) {
            return Err(StoreError::CorruptEntry {
                key: format!("region_{}", region),
                source: serde_json::from_str::<Vec<MarkerRecord>>("{").unwrap_err(),
            });
        }
        Ok(self.regions.get(&region).cloned().unwrap_or_default())
    }

    fn save_records(
        &mut self,
        region: RegionId,
        records: Option<Vec<MarkerRecord>>,
    ) -> Result<(), StoreError> {
        self.writes.push(region);
        match records {
            Some(records) if !records.is_empty() => {
                self.regions.insert(region, records);
            }
            _ => {
                self.regions.remove(&region);
            }
        }
        Ok(())
    }

    fn reload(&mut self) -> Result<(), StoreError> {
        self.reloads += 1;
        Ok(())
    }
}
