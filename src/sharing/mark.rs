use crate::clipboard::Clipboard;
use crate::markers::MarkerRecord;
use crate::store::MarkerStore;

use super::{Notifier, Outcome, SharingEngine, merge_into};

impl<S, C, N> SharingEngine<S, C, N>
where
    S: MarkerStore,
    C: Clipboard,
    N: Notifier,
{
    /// Add one marker to its region unless an identical one is already stored.
    pub fn mark(&mut self, record: MarkerRecord) -> Outcome {
        let region = record.region_id;
        let point = record.world_point();

        let existing = match self.store.records(region) {
            Ok(existing) => existing,
            Err(e) => return self.store_failed(e),
        };

        let before = existing.len();
        let merged = merge_into(existing, [record]);
        if merged.len() == before {
            return self.finish(Outcome::AlreadyMarked { point });
        }

        if let Err(e) = self.store.save_batch(vec![(region, Some(merged))]) {
            return self.store_failed(e);
        }

        self.reload_store();
        self.finish(Outcome::Marked { point })
    }
}
