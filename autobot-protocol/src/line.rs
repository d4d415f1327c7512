//! Line framing for the companion UART link
//!
//! Bytes arrive from the UART in arbitrary chunks. The assembler collects
//! them until a `\n` terminator and hands back one complete line at a time.
//! Carriage returns and NUL padding (left behind by fixed-size DMA buffers on
//! the companion side) are dropped.

use heapless::{String, Vec};

/// Default maximum line length in bytes (excluding terminator)
pub const MAX_LINE_LEN: usize = 128;

/// Errors that can occur while assembling a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded the buffer capacity and was discarded
    TooLong,
    /// Line was not valid UTF-8
    InvalidUtf8,
}

/// Accumulates UART bytes into `\n`-terminated lines
#[derive(Debug, Clone)]
pub struct LineAssembler<const N: usize = MAX_LINE_LEN> {
    buffer: Vec<u8, N>,
    /// Set when the current line overflowed; bytes are dropped until `\n`
    overflowed: bool,
}

impl<const N: usize> Default for LineAssembler<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> LineAssembler<N> {
    /// Create an empty assembler
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            overflowed: false,
        }
    }

    /// Discard any partially received line
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
    }

    /// Number of bytes buffered for the current line
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(line))` when a non-empty line completes, `Ok(None)`
    /// when more bytes are needed, or `Err` when the completed line had to
    /// be discarded.
    pub fn feed(&mut self, byte: u8) -> Result<Option<String<N>>, LineError> {
        match byte {
            b'\n' => {
                if self.overflowed {
                    self.reset();
                    return Err(LineError::TooLong);
                }
                if self.buffer.is_empty() {
                    return Ok(None);
                }

                let line = core::str::from_utf8(&self.buffer)
                    .ok()
                    .and_then(|s| String::try_from(s).ok());
                self.reset();
                line.map(Some).ok_or(LineError::InvalidUtf8)
            }
            b'\r' | 0 => Ok(None),
            _ => {
                if !self.overflowed && self.buffer.push(byte).is_err() {
                    self.buffer.clear();
                    self.overflowed = true;
                }
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all<const N: usize>(
        assembler: &mut LineAssembler<N>,
        bytes: &[u8],
    ) -> Vec<Result<String<N>, LineError>, 8> {
        let mut out = Vec::new();
        for &b in bytes {
            match assembler.feed(b) {
                Ok(Some(line)) => out.push(Ok(line)).unwrap(),
                Ok(None) => {}
                Err(e) => out.push(Err(e)).unwrap(),
            }
        }
        out
    }

    #[test]
    fn test_single_line() {
        let mut asm: LineAssembler = LineAssembler::new();
        let lines = feed_all(&mut asm, b"1,0.5,0,0,1,2,3\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].as_ref().unwrap().as_str(), "1,0.5,0,0,1,2,3");
        assert_eq!(asm.pending(), 0);
    }

    #[test]
    fn test_split_across_chunks() {
        let mut asm: LineAssembler = LineAssembler::new();
        assert!(feed_all(&mut asm, b"12,1.0,").is_empty());
        assert_eq!(asm.pending(), 7);
        let lines = feed_all(&mut asm, b"2.0\n");
        assert_eq!(lines[0].as_ref().unwrap().as_str(), "12,1.0,2.0");
    }

    #[test]
    fn test_crlf_and_nul_padding_stripped() {
        let mut asm: LineAssembler = LineAssembler::new();
        let lines = feed_all(&mut asm, b"abc\r\n\0\0\0def\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].as_ref().unwrap().as_str(), "abc");
        assert_eq!(lines[1].as_ref().unwrap().as_str(), "def");
    }

    #[test]
    fn test_empty_lines_ignored() {
        let mut asm: LineAssembler = LineAssembler::new();
        assert!(feed_all(&mut asm, b"\n\r\n\n").is_empty());
    }

    #[test]
    fn test_overflow_discards_until_newline() {
        let mut asm: LineAssembler<4> = LineAssembler::new();
        let lines = feed_all(&mut asm, b"toolong\nok\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], Err(LineError::TooLong));
        assert_eq!(lines[1].as_ref().unwrap().as_str(), "ok");
    }

    #[test]
    fn test_invalid_utf8() {
        let mut asm: LineAssembler = LineAssembler::new();
        let lines = feed_all(&mut asm, &[0xFF, 0xFE, b'\n', b'a', b'\n']);
        assert_eq!(lines[0], Err(LineError::InvalidUtf8));
        assert_eq!(lines[1].as_ref().unwrap().as_str(), "a");
    }
}
