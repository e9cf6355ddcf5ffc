//! Standard input/output as a [`ByteStream`], for driving a parser from a
//! terminal on the host.
//!
//! This module defines the `RawMode` struct, which switches the terminal to
//! non-canonical, non-blocking input and restores the original settings on
//! drop, and `StdioStream`, which polls stdin one byte at a time.
//!
//! When stdin is not a terminal (input piped from a file), `StdioStream`
//! falls back to blocking reads and reports end of input through
//! [`StdioStream::is_eof`].
//!
//! # Example
//! ```rust
//! let mut stream = StdioStream::new()?;
//! while !stream.is_eof() {
//!     parser.process_input(&mut stream, 1_000);
//! }
//! ```

use std::io::{self, IsTerminal, Read, Write};

use crate::stream::ByteStream;

/// Represents a handle to the terminal's raw mode state.
/// When dropped, restores the original terminal mode.
pub struct RawMode {
    fd: i32,
    original: termios::Termios,
}

impl RawMode {
    /// Disables line buffering on `fd` and makes reads return immediately.
    ///
    /// Echo stays on so typed commands remain visible.
    pub fn new(fd: i32) -> io::Result<Self> {
        use termios::*;
        let original = Termios::from_fd(fd)?;
        let mut raw = original;
        raw.c_lflag &= !ICANON;
        raw.c_cc[VMIN] = 0;
        raw.c_cc[VTIME] = 0;
        tcsetattr(fd, TCSANOW, &raw)?;
        Ok(RawMode { fd, original })
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = termios::tcsetattr(self.fd, termios::TCSANOW, &self.original);
    }
}

/// Stdin/stdout with a one-byte look-ahead so that `available` can poll.
pub struct StdioStream {
    raw: Option<RawMode>,
    lookahead: Option<u8>,
    eof: bool,
}

impl StdioStream {
    pub fn new() -> io::Result<Self> {
        let stdin = io::stdin();
        let raw = if stdin.is_terminal() {
            Some(RawMode::new(0)?)
        } else {
            None
        };
        Ok(Self {
            raw,
            lookahead: None,
            eof: false,
        })
    }

    /// `true` once piped input is exhausted. A terminal never reaches EOF.
    pub fn is_eof(&self) -> bool {
        self.eof && self.lookahead.is_none()
    }

    fn fill(&mut self) {
        if self.lookahead.is_some() || self.eof {
            return;
        }
        let mut byte = [0u8; 1];
        match io::stdin().lock().read(&mut byte) {
            Ok(1) => self.lookahead = Some(byte[0]),
            // With VMIN = 0 a terminal read returns 0 when nothing was typed.
            Ok(_) if self.raw.is_some() => {}
            Ok(_) => self.eof = true,
            Err(e) if matches!(e.kind(), io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock) => {}
            Err(_) => self.eof = true,
        }
    }
}

impl ByteStream for StdioStream {
    fn available(&mut self) -> usize {
        self.fill();
        usize::from(self.lookahead.is_some())
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.fill();
        self.lookahead.take()
    }

    fn write(&mut self, bytes: &[u8]) -> usize {
        let mut out = io::stdout().lock();
        match out.write_all(bytes).and_then(|()| out.flush()) {
            Ok(()) => bytes.len(),
            Err(_) => 0,
        }
    }
}
