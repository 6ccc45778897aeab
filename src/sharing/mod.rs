//! Export, import and clear of tile markers across a set of active regions.
//!
//! [`SharingEngine`] owns the marker store, the clipboard and the notifier. Every
//! operation ends in an [`Outcome`] and, unless the user declined, a notification;
//! collaborator errors are logged and reported, never returned.
//!
//! Mutating operations run in two steps. `prepare_*` reads everything it needs and
//! either finishes early or hands back a pending value carrying the confirmation
//! message. Passing that value to `confirm_*` performs the writes; passing it to
//! [`SharingEngine::decline`] drops it. [`SharingEngine::import`] and
//! [`SharingEngine::clear`] drive both steps through a [`ConfirmPrompt`].
//!
//! ## Module Structure
//!
//! - [`codec`] - Text serialization of marker lists
//! - [`merge`] - Region grouping and duplicate-safe merge
//! - [`outcome`] - Operation results and their user messages
//! - [`export`] - Export to the clipboard
//! - [`import`] - Parse and merge from the clipboard
//! - [`clear`] - Clearing whole regions
//! - [`mark`] - Marking a single tile

mod clear;
mod codec;
mod export;
mod import;
mod mark;
mod merge;
mod outcome;

#[cfg(test)]
mod tests;

use indexmap::IndexSet;
use tracing::{debug, warn};

use crate::clipboard::Clipboard;
use crate::markers::{MarkerRecord, RegionId};
use crate::store::{MarkerStore, StoreError};

pub use codec::{parse_records, serialize_records};
pub use merge::{group_by_region, merge_into};
pub use outcome::Outcome;

/// Receives the one-line summary of each finished operation.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Asks the user to confirm a mutation. Returning `false` declines it.
pub trait ConfirmPrompt {
    fn confirm(&mut self, message: &str) -> bool;
}

/// A prompt that accepts everything, for non-interactive use.
pub struct AlwaysConfirm;

impl ConfirmPrompt for AlwaysConfirm {
    fn confirm(&mut self, _message: &str) -> bool {
        true
    }
}

/// A mutation waiting on the user.
pub trait Pending {
    /// Question to put to the user before going ahead.
    fn prompt_message(&self) -> String;
}

/// Result of the first half of a confirmable operation.
#[derive(Debug)]
pub enum Step<P> {
    /// Finished without needing confirmation
    Done(Outcome),
    /// Waiting on the user
    Confirm(P),
}

pub struct SharingEngine<S, C, N> {
    store: S,
    clipboard: C,
    notifier: N,
}

impl<S, C, N> SharingEngine<S, C, N>
where
    S: MarkerStore,
    C: Clipboard,
    N: Notifier,
{
    pub fn new(store: S, clipboard: C, notifier: N) -> Self {
        Self {
            store,
            clipboard,
            notifier,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    #[cfg(test)]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Every record stored under `regions`, region by region in the given order.
    /// A region listed twice is read once.
    pub fn collect_records(&self, regions: &[RegionId]) -> Result<Vec<MarkerRecord>, StoreError> {
        let mut records = Vec::new();
        for region in distinct_regions(regions) {
            records.extend(self.store.records(region)?);
        }
        Ok(records)
    }

    /// Drop a pending mutation without touching the store.
    pub fn decline<P: Pending>(&mut self, pending: P) -> Outcome {
        debug!("Declined: {}", pending.prompt_message());
        Outcome::Declined
    }

    /// Finish a prepared step by asking `prompt`; exactly one of `confirm` or
    /// [`Self::decline`] runs.
    fn resolve<P: Pending>(
        &mut self,
        step: Step<P>,
        prompt: &mut dyn ConfirmPrompt,
        confirm: impl FnOnce(&mut Self, P) -> Outcome,
    ) -> Outcome {
        match step {
            Step::Done(outcome) => outcome,
            Step::Confirm(pending) => {
                if prompt.confirm(&pending.prompt_message()) {
                    confirm(self, pending)
                } else {
                    self.decline(pending)
                }
            }
        }
    }

    fn finish(&mut self, outcome: Outcome) -> Outcome {
        if let Some(message) = outcome.message() {
            self.notifier.notify(&message);
        }
        outcome
    }

    fn store_failed(&mut self, error: StoreError) -> Outcome {
        warn!("Marker store error: {}", error);
        self.finish(Outcome::StoreUnavailable)
    }

    /// Reload after a committed batch. The writes already landed, so a failed
    /// reload is logged and does not change the outcome.
    fn reload_store(&mut self) {
        debug!("Reloading points after update");
        if let Err(e) = self.store.reload() {
            warn!("Failed to reload marker store: {}", e);
        }
    }
}

/// `regions` with repeats dropped, in first-seen order.
fn distinct_regions(regions: &[RegionId]) -> Vec<RegionId> {
    regions
        .iter()
        .copied()
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}
