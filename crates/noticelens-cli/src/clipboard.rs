//! Terminal clipboard via the OSC 52 escape sequence.
//!
//! The terminal emulator owns the system clipboard; we ask it to set the
//! contents by writing `ESC ] 52 ; c ; <base64> BEL`. Works over SSH. Terminals
//! that ignore OSC 52 silently drop the request, which we cannot detect.

use std::io::{self, IsTerminal, Write};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use noticelens_core::{Clipboard, ClipboardError};

/// Largest input whose base64 form fits the common 100 kB OSC 52 cap.
const MAX_PAYLOAD: usize = 74_994;

pub struct Osc52Clipboard<W: Write> {
    out: W,
    tty: bool,
}

impl Osc52Clipboard<io::Stdout> {
    pub fn stdout() -> Self {
        let out = io::stdout();
        let tty = out.is_terminal();
        Self { out, tty }
    }
}

impl<W: Write> Osc52Clipboard<W> {
    #[cfg(test)]
    fn new(out: W) -> Self {
        Self { out, tty: true }
    }
}

pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if !self.tty || text.len() > MAX_PAYLOAD {
            return Err(ClipboardError::Unavailable);
        }
        self.out.write_all(osc52_sequence(text).as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}
