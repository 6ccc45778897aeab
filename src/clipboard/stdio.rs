use std::io::{Read, Write};

use super::{Clipboard, ClipboardError, read_error};

/// Reads imported text from stdin and writes exported text to stdout.
#[derive(Default)]
pub struct StdioClipboard;

impl Clipboard for StdioClipboard {
    fn read_text(&mut self) -> Result<Option<String>, ClipboardError> {
        let mut text = String::new();
        std::io::stdin()
            .lock()
            .read_to_string(&mut text)
            .map_err(read_error)?;
        Ok(Some(text))
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", text)?;
        stdout.flush()?;
        Ok(())
    }
}
