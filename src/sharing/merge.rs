//! Duplicate-safe merging of imported markers into stored ones.

use indexmap::IndexMap;

use crate::markers::{MarkerRecord, RegionId};

/// Partition records by region, keeping regions in order of first appearance and
/// records in their original relative order within a region.
pub fn group_by_region(records: Vec<MarkerRecord>) -> IndexMap<RegionId, Vec<MarkerRecord>> {
    let mut groups: IndexMap<RegionId, Vec<MarkerRecord>> = IndexMap::new();
    for record in records {
        groups.entry(record.region_id).or_default().push(record);
    }
    groups
}

/// Append every candidate not already present in `existing`.
///
/// Existing records keep their order and contents. Each candidate is checked
/// against the list as it grows, so repeated candidates are added once.
pub fn merge_into(
    existing: Vec<MarkerRecord>,
    candidates: impl IntoIterator<Item = MarkerRecord>,
) -> Vec<MarkerRecord> {
    let candidates = candidates.into_iter();
    let mut merged = existing;
    merged.reserve(candidates.size_hint().0);
    for candidate in candidates {
        if !merged.contains(&candidate) {
            merged.push(candidate);
        }
    }
    merged
}
