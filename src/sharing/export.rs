use tracing::{debug, warn};

use crate::clipboard::Clipboard;
use crate::markers::RegionId;
use crate::store::MarkerStore;

use super::{Notifier, Outcome, SharingEngine, serialize_records};

impl<S, C, N> SharingEngine<S, C, N>
where
    S: MarkerStore,
    C: Clipboard,
    N: Notifier,
{
    /// Copy every marker in `regions` to the clipboard.
    pub fn export(&mut self, regions: &[RegionId]) -> Outcome {
        let records = match self.collect_records(regions) {
            Ok(records) => records,
            Err(e) => return self.store_failed(e),
        };

        if records.is_empty() {
            return self.finish(Outcome::NothingToExport);
        }

        let dump = match serialize_records(&records) {
            Ok(dump) => dump,
            Err(e) => {
                warn!("Failed to serialize markers for export: {}", e);
                return self.finish(Outcome::ClipboardUnwritable);
            }
        };

        debug!("Exported BA Tiles: {}", dump);

        if let Err(e) = self.clipboard.write_text(&dump) {
            warn!("error writing clipboard: {}", e);
            return self.finish(Outcome::ClipboardUnwritable);
        }

        self.finish(Outcome::Exported {
            count: records.len(),
        })
    }
}
