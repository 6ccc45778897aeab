use tracing::{debug, warn};

use crate::clipboard::Clipboard;
use crate::constants::MARKER_NOUN;
use crate::markers::MarkerRecord;
use crate::store::MarkerStore;

use super::{
    ConfirmPrompt, Notifier, Outcome, Pending, SharingEngine, Step, group_by_region, merge_into,
    parse_records,
};

/// Markers parsed from the clipboard, waiting on confirmation before the merge.
#[derive(Debug)]
pub struct PendingImport {
    candidates: Vec<MarkerRecord>,
}

impl PendingImport {
    pub fn candidates(&self) -> &[MarkerRecord] {
        &self.candidates
    }
}

impl Pending for PendingImport {
    fn prompt_message(&self) -> String {
        format!(
            "Are you sure you want to import {} {}s?",
            self.candidates.len(),
            MARKER_NOUN
        )
    }
}

impl<S, C, N> SharingEngine<S, C, N>
where
    S: MarkerStore,
    C: Clipboard,
    N: Notifier,
{
    /// Read and parse the clipboard.
    ///
    /// Missing, blank, malformed and empty-list contents all end as
    /// [`Outcome::NothingToImport`]; only a parse error is logged.
    pub fn prepare_import(&mut self) -> Step<PendingImport> {
        let text = match self.clipboard.read_text() {
            Ok(text) => text,
            Err(e) => {
                warn!("error reading clipboard: {}", e);
                return Step::Done(self.finish(Outcome::ClipboardUnreadable));
            }
        };

        debug!("Clipboard contents: {:?}", text);
        let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
            return Step::Done(self.finish(Outcome::NothingToImport));
        };

        let candidates = match parse_records(&text) {
            Ok(candidates) => candidates,
            Err(e) => {
                debug!("Malformed JSON for clipboard import: {}", e);
                return Step::Done(self.finish(Outcome::NothingToImport));
            }
        };

        if candidates.is_empty() {
            return Step::Done(self.finish(Outcome::NothingToImport));
        }

        Step::Confirm(PendingImport { candidates })
    }

    /// Merge confirmed candidates into the store, region by region.
    ///
    /// Every affected region is read and merged before anything is written, and the
    /// writes go to the store as one batch. The reported count is the number of
    /// candidates submitted, duplicates included.
    pub fn confirm_import(&mut self, pending: PendingImport) -> Outcome {
        let count = pending.candidates.len();
        let groups = group_by_region(pending.candidates);

        let mut batch = Vec::with_capacity(groups.len());
        for (region, grouped) in groups {
            debug!("Importing {} points to region {}", grouped.len(), region);
            let existing = match self.store.records(region) {
                Ok(existing) => existing,
                Err(e) => return self.store_failed(e),
            };
            batch.push((region, Some(merge_into(existing, grouped))));
        }

        if let Err(e) = self.store.save_batch(batch) {
            return self.store_failed(e);
        }

        self.reload_store();
        self.finish(Outcome::Imported { count })
    }

    /// Parse the clipboard and, if the user agrees, merge it into the store.
    pub fn import(&mut self, prompt: &mut dyn ConfirmPrompt) -> Outcome {
        let step = self.prepare_import();
        self.resolve(step, prompt, Self::confirm_import)
    }
}
