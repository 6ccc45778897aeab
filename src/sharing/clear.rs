use tracing::warn;

use crate::clipboard::Clipboard;
use crate::constants::MARKER_NOUN;
use crate::markers::RegionId;
use crate::store::{MarkerStore, StoreError};

use super::{ConfirmPrompt, Notifier, Outcome, Pending, SharingEngine, Step, distinct_regions};

/// Regions about to be cleared, with the number of markers they held when counted.
#[derive(Debug)]
pub struct PendingClear {
    regions: Vec<RegionId>,
    count: usize,
    /// Regions whose stored markers could not be parsed, so are not in `count`
    unreadable: Vec<RegionId>,
}

impl PendingClear {
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn unreadable(&self) -> &[RegionId] {
        &self.unreadable
    }
}

impl Pending for PendingClear {
    fn prompt_message(&self) -> String {
        let mut message = format!(
            "Are you sure you want to clear the {} currently loaded {}s",
            self.count, MARKER_NOUN
        );
        if !self.unreadable.is_empty() {
            message.push_str(&format!(
                " and the unreadable markers in regions {:?}",
                self.unreadable
            ));
        }
        message.push('?');
        message
    }
}

impl<S, C, N> SharingEngine<S, C, N>
where
    S: MarkerStore,
    C: Clipboard,
    N: Notifier,
{
    /// Count the markers in `regions`; ends with [`Outcome::NothingToClear`] when
    /// there are none. A region whose entry cannot be parsed is still cleared,
    /// but its markers are left out of the count.
    pub fn prepare_clear(&mut self, regions: &[RegionId]) -> Step<PendingClear> {
        let regions = distinct_regions(regions);
        let mut count = 0;
        let mut unreadable = Vec::new();
        for &region in &regions {
            match self.store.records(region) {
                Ok(records) => count += records.len(),
                Err(StoreError::CorruptEntry { key, source }) => {
                    warn!("Clearing unreadable markers under '{}': {}", key, source);
                    unreadable.push(region);
                }
                Err(e) => return Step::Done(self.store_failed(e)),
            }
        }

        if count == 0 && unreadable.is_empty() {
            return Step::Done(self.finish(Outcome::NothingToClear));
        }

        Step::Confirm(PendingClear {
            regions,
            count,
            unreadable,
        })
    }

    /// Empty every region that was counted, including ones that held nothing.
    pub fn confirm_clear(&mut self, pending: PendingClear) -> Outcome {
        let batch = pending
            .regions
            .iter()
            .map(|&region| (region, None))
            .collect();

        if let Err(e) = self.store.save_batch(batch) {
            return self.store_failed(e);
        }

        self.reload_store();
        self.finish(Outcome::Cleared {
            count: pending.count,
        })
    }

    /// Count the markers in `regions` and, if the user agrees, clear them.
    pub fn clear(&mut self, regions: &[RegionId], prompt: &mut dyn ConfirmPrompt) -> Outcome {
        let step = self.prepare_clear(regions);
        self.resolve(step, prompt, Self::confirm_clear)
    }
}
