use std::path::{Path, PathBuf};

use super::{Clipboard, ClipboardError, read_error};

/// Clipboard kept in a plain text file the user can open, copy from and paste into.
pub struct FileClipboard {
    path: PathBuf,
}

impl FileClipboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Clipboard for FileClipboard {
    fn read_text(&mut self) -> Result<Option<String>, ClipboardError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(read_error(e)),
        }
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}
