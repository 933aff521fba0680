use embedded_hal::serial;
use heapless::String;

/// Outcome of draining the serial input.
#[derive(Debug, PartialEq, Eq)]
pub enum Line<'a> {
    /// A complete line, without its terminator
    Complete(&'a str),
    /// A line that exceeded the buffer (or was not UTF-8) and was discarded up to its newline
    Dropped,
}

/// Assembles newline-terminated lines from a non-blocking byte source.
///
/// Bytes are consumed only while the source has them ready, so polling never waits for input.
pub struct LineReader<const L: usize> {
    buf: String<L>,
    /// set when the current line has already overflowed
    discarding: bool,
    /// set once a complete line has been handed out and must be cleared on the next poll
    consumed: bool,
    utf8: heapless::Vec<u8, 4>,
}

impl<const L: usize> Default for LineReader<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const L: usize> LineReader<L> {
    pub const fn new() -> Self {
        Self {
            buf: String::new(),
            discarding: false,
            consumed: false,
            utf8: heapless::Vec::new(),
        }
    }

    /// Read whatever is pending and return the first line completed, if any.
    ///
    /// Bytes after that line's newline stay in the source for the next poll.
    pub fn poll<R: serial::Read<u8>>(&mut self, rx: &mut R) -> Option<Line<'_>> {
        if self.consumed {
            self.reset();
        }

        loop {
            let byte = match rx.read() {
                Ok(byte) => byte,
                Err(nb::Error::WouldBlock) => return None,
                Err(nb::Error::Other(_)) => {
                    // a framing/overrun error corrupts the current line
                    warn!("Serial read error, discarding current line");
                    self.discard();
                    continue;
                }
            };

            match byte {
                b'\n' => {
                    // a multi-byte sequence cut short by the newline spoils the whole line
                    if self.discarding || !self.utf8.is_empty() {
                        self.reset();
                        return Some(Line::Dropped);
                    }
                    self.consumed = true;
                    return Some(Line::Complete(self.buf.as_str()));
                }
                _ if self.discarding => {}
                _ => self.push_byte(byte),
            }
        }
    }

    fn push_byte(&mut self, byte: u8) {
        if self.utf8.push(byte).is_err() {
            self.discard();
            return;
        }
        match core::str::from_utf8(&self.utf8) {
            Ok(s) => {
                if self.buf.push_str(s).is_err() {
                    self.discard();
                } else {
                    self.utf8.clear();
                }
            }
            // incomplete multi-byte sequence, wait for the rest
            Err(e) if e.error_len().is_none() => {}
            Err(_) => self.discard(),
        }
    }

    fn discard(&mut self) {
        self.buf.clear();
        self.utf8.clear();
        self.discarding = true;
    }

    fn reset(&mut self) {
        self.buf.clear();
        self.utf8.clear();
        self.discarding = false;
        self.consumed = false;
    }
}
