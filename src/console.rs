//! Terminal-facing notifier and confirmation prompt.

use std::io::{BufRead, Write};

use tracing::warn;

use crate::markers::MarkerRecord;
use crate::sharing::{ConfirmPrompt, Notifier};

/// Prints notifications to stderr so stdout stays free for exported text.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}

/// Asks on stderr and reads a yes/no answer from stdin. Anything but yes declines.
pub struct TerminalPrompt;

impl ConfirmPrompt for TerminalPrompt {
    fn confirm(&mut self, message: &str) -> bool {
        eprint!("{} [y/N] ", message);
        let _ = std::io::stderr().flush();

        let mut answer = String::new();
        match std::io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(e) => {
                warn!("Failed to read confirmation: {}", e);
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// One-line description of a marker for listings.
pub fn describe(record: &MarkerRecord) -> String {
    let mut line = format!(
        "region {} ({}, {}) plane {} -> world {}",
        record.region_id,
        record.region_x,
        record.region_y,
        record.z,
        record.world_point()
    );
    if let Some(color) = record.color {
        line.push_str(&format!(" color {}", color));
    }
    if let Some(label) = &record.label {
        line.push_str(&format!(" label {:?}", label));
    }
    if let Some(waves) = &record.waves {
        line.push_str(&format!(" waves {:?}", waves));
    }
    if let Some(roles) = &record.roles {
        line.push_str(&format!(" roles {:?}", roles));
    }
    line
}
