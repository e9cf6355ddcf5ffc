/// A fixed-size framing buffer over caller-owned memory.
///
/// `FrameBuffer` appends received bytes at a write cursor and keeps the byte
/// after the cursor set to `0`, so one byte of the underlying slice is always
/// reserved. It never reads or writes outside the borrowed slice.
///
/// # Example
/// ```
/// let mut storage = [0u8; 8];
/// let mut buf = FrameBuffer::new(&mut storage);
/// assert!(buf.push(b'a'));
/// assert_eq!(buf.content(), b"a");
/// ```
pub struct FrameBuffer<'a> {
    buffer: &'a mut [u8],
    length: usize,
}

impl<'a> FrameBuffer<'a> {
    /// Wraps `buffer` and clears it.
    pub fn new(buffer: &'a mut [u8]) -> Self {
        let mut frame = Self { buffer, length: 0 };
        frame.clear();
        frame
    }

    /// Number of message bytes the buffer can hold (slice length minus the
    /// reserved terminating byte).
    pub fn capacity(&self) -> usize {
        self.buffer.len().saturating_sub(1)
    }

    /// Appends one byte.
    ///
    /// Returns `true` if the byte was stored, or `false` if the buffer is full.
    pub fn push(&mut self, byte: u8) -> bool {
        if self.length >= self.capacity() {
            return false;
        }
        self.buffer[self.length] = byte;
        self.length += 1;
        self.buffer[self.length] = 0;
        true
    }

    /// Returns `true` when no further byte fits.
    pub fn is_full(&self) -> bool {
        self.length >= self.capacity()
    }

    /// If the content ends with `terminator`, cuts it off and returns `true`.
    ///
    /// An empty terminator never matches.
    pub fn strip_terminator(&mut self, terminator: &[u8]) -> bool {
        if terminator.is_empty() || !self.content().ends_with(terminator) {
            return false;
        }
        self.length -= terminator.len();
        self.buffer[self.length] = 0;
        true
    }

    /// Clears the buffer and resets the cursor.
    pub fn clear(&mut self) {
        if let Some(first) = self.buffer.first_mut() {
            *first = 0;
        }
        self.length = 0;
    }

    /// Bytes appended since the last clear.
    pub fn content(&self) -> &[u8] {
        &self.buffer[..self.length]
    }

    /// Mutable view of the content, for in-place tokenizing.
    pub fn content_mut(&mut self) -> &mut [u8] {
        &mut self.buffer[..self.length]
    }

    /// Returns the current write cursor.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}
