//! Text buffers that stand in for the system clipboard.
//!
//! Exported markers are handed to the user as text and imported markers come back
//! the same way. [`FileClipboard`] keeps that text in a file; [`StdioClipboard`]
//! reads it from stdin and writes it to stdout so it can be piped.

mod file;
#[cfg(test)]
pub mod memory;
mod stdio;

use thiserror::Error;

pub use file::FileClipboard;
pub use stdio::StdioClipboard;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("clipboard does not hold text")]
    NotText,
}

pub trait Clipboard {
    /// Current text contents, or `None` when the buffer holds nothing.
    fn read_text(&mut self) -> Result<Option<String>, ClipboardError>;

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

impl<T: Clipboard + ?Sized> Clipboard for Box<T> {
    fn read_text(&mut self) -> Result<Option<String>, ClipboardError> {
        (**self).read_text()
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        (**self).write_text(text)
    }
}

/// Map a read error, treating undecodable bytes as non-text content.
fn read_error(error: std::io::Error) -> ClipboardError {
    if error.kind() == std::io::ErrorKind::InvalidData {
        ClipboardError::NotText
    } else {
        ClipboardError::Io(error)
    }
}
