//! How a sharing operation ended, and what the user is told about it.

use crate::constants::MARKER_NOUN;
use crate::markers::WorldPoint;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Exported { count: usize },
    NothingToExport,
    Imported { count: usize },
    NothingToImport,
    Cleared { count: usize },
    NothingToClear,
    Marked { point: WorldPoint },
    AlreadyMarked { point: WorldPoint },
    /// The user answered no to a confirmation prompt
    Declined,
    ClipboardUnreadable,
    ClipboardUnwritable,
    StoreUnavailable,
}

impl Outcome {
    /// Notification text, if the outcome is worth telling the user about.
    pub fn message(&self) -> Option<String> {
        let message = match self {
            Outcome::Exported { count } => {
                format!("{} {}s were copied to your clipboard.", count, MARKER_NOUN)
            }
            Outcome::NothingToExport => format!("You have no {}s to export.", MARKER_NOUN),
            Outcome::Imported { count } => {
                format!("{} {}s were imported from the clipboard.", count, MARKER_NOUN)
            }
            Outcome::NothingToImport => format!(
                "You do not have any {}s copied in your clipboard.",
                MARKER_NOUN
            ),
            Outcome::Cleared { count: 1 } => format!("1 {} was cleared.", MARKER_NOUN),
            Outcome::Cleared { count } => format!("{} {}s were cleared.", count, MARKER_NOUN),
            Outcome::NothingToClear => format!("You have no {}s to clear.", MARKER_NOUN),
            Outcome::Marked { point } => format!("Marked {} at {}.", MARKER_NOUN, point),
            Outcome::AlreadyMarked { point } => {
                format!("A {} is already marked at {}.", MARKER_NOUN, point)
            }
            Outcome::Declined => return None,
            Outcome::ClipboardUnreadable => "Unable to read system clipboard.".to_string(),
            Outcome::ClipboardUnwritable => "Unable to write to system clipboard.".to_string(),
            Outcome::StoreUnavailable => format!("Unable to update {}s.", MARKER_NOUN),
        };
        Some(message)
    }

    /// Whether a collaborator failed, as opposed to a completed or no-op operation.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Outcome::ClipboardUnreadable | Outcome::ClipboardUnwritable | Outcome::StoreUnavailable
        )
    }
}
