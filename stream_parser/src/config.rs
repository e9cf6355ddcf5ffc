/// Framing and tokenizing settings of a [`StreamCommandParser`](crate::StreamCommandParser).
///
/// Delimiters are byte *sets*: every byte of `message_delimiters` separates
/// messages, every byte of `parameter_delimiters` separates parameters.
/// The terminator is matched as a whole byte sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig<'a> {
    /// Byte sequence ending a framed message (default `"\r\n"`).
    pub terminator: &'a [u8],
    /// Bytes separating several commands within one framed message (default `";"`).
    pub message_delimiters: &'a [u8],
    /// Bytes separating the command from its parameters (default `" "`).
    pub parameter_delimiters: &'a [u8],
}

impl<'a> ParserConfig<'a> {
    pub const DEFAULT_TERMINATOR: &'static [u8] = b"\r\n";
    pub const DEFAULT_MESSAGE_DELIMITERS: &'static [u8] = b";";
    pub const DEFAULT_PARAMETER_DELIMITERS: &'static [u8] = b" ";

    /// Creates a configuration with the default terminator and delimiters.
    pub const fn new() -> Self {
        Self {
            terminator: Self::DEFAULT_TERMINATOR,
            message_delimiters: Self::DEFAULT_MESSAGE_DELIMITERS,
            parameter_delimiters: Self::DEFAULT_PARAMETER_DELIMITERS,
        }
    }

    /// Replaces the terminator. An empty terminator never matches, so framing
    /// then only ends through overflow or timeout.
    pub const fn with_terminator(mut self, terminator: &'a [u8]) -> Self {
        self.terminator = terminator;
        self
    }

    pub const fn with_message_delimiters(mut self, delimiters: &'a [u8]) -> Self {
        self.message_delimiters = delimiters;
        self
    }

    pub const fn with_parameter_delimiters(mut self, delimiters: &'a [u8]) -> Self {
        self.parameter_delimiters = delimiters;
        self
    }
}

impl Default for ParserConfig<'_> {
    fn default() -> Self {
        Self::new()
    }
}
