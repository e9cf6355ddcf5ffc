//! Collaborator interfaces: the byte stream commands arrive on, and the
//! millisecond clock used for timeouts.

use core::fmt;

/// A bidirectional byte stream, e.g. a UART or a terminal.
pub trait ByteStream {
    /// Number of bytes that can be read without blocking.
    fn available(&mut self) -> usize;

    /// Reads one byte, or `None` if nothing is available after all.
    fn read_byte(&mut self) -> Option<u8>;

    /// Writes `bytes`, returning how many were accepted.
    fn write(&mut self, bytes: &[u8]) -> usize;
}

impl<T: ByteStream + ?Sized> ByteStream for &mut T {
    fn available(&mut self) -> usize {
        (**self).available()
    }

    fn read_byte(&mut self) -> Option<u8> {
        (**self).read_byte()
    }

    fn write(&mut self, bytes: &[u8]) -> usize {
        (**self).write(bytes)
    }
}

/// Monotonic millisecond clock. The counter may wrap around.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

impl<F: Fn() -> u32> Clock for F {
    fn now_ms(&self) -> u32 {
        self()
    }
}

/// Clock backed by `std::time::Instant`, counting from its creation.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct StdClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn now_ms(&self) -> u32 {
        // Truncation gives the wrapping millisecond counter timeouts expect.
        self.origin.elapsed().as_millis() as u32
    }
}

/// Adapts a [`ByteStream`] to `core::fmt::Write`, so `write!` can target it.
pub struct StreamWriter<'s, S: ?Sized> {
    stream: &'s mut S,
}

impl<'s, S: ByteStream + ?Sized> StreamWriter<'s, S> {
    pub fn new(stream: &'s mut S) -> Self {
        Self { stream }
    }
}

impl<S: ByteStream + ?Sized> fmt::Write for StreamWriter<'_, S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        if self.stream.write(bytes) == bytes.len() {
            Ok(())
        } else {
            Err(fmt::Error)
        }
    }
}
