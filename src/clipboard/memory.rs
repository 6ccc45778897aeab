//! In-memory clipboard for engine tests.

use super::{Clipboard, ClipboardError};

#[derive(Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
    pub unreadable: bool,
    pub unwritable: bool,
}

impl MemoryClipboard {
    pub fn holding(text: &str) -> Self {
        Self {
            contents: Some(text.to_string()),
            ..Default::default()
        }
    }
}

impl Clipboard for MemoryClipboard {
    fn read_text(&mut self) -> Result<Option<String>, ClipboardError> {
        if self.unreadable {
            return Err(ClipboardError::NotText);
        }
        Ok(self.contents.clone())
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.unwritable {
            return Err(ClipboardError::Io(std::io::Error::other("clipboard locked")));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}
