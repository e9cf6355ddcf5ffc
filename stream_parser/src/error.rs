use core::fmt;

/// Abnormal conditions reported through the [`ErrorHandler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorCode {
    /// No error. Never reported by the parser itself.
    NoError,
    /// The first token of a message matched no registered command.
    UnknownCommand,
    /// The terminator did not arrive within the timeout budget.
    Timeout,
    /// The message did not fit into the framing buffer.
    BufferOverflow,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ErrorCode::NoError => "no error",
            ErrorCode::UnknownCommand => "unknown command",
            ErrorCode::Timeout => "timeout",
            ErrorCode::BufferOverflow => "buffer overflow",
        };
        f.write_str(text)
    }
}

/// Callback receiving every reported error together with the offending bytes:
/// the unmatched command token, or the buffered content on overflow and timeout.
///
/// Any `Fn(&mut S, ErrorCode, &[u8])` is an error handler.
pub trait ErrorHandler<S: ?Sized> {
    fn on_error(&self, sender: &mut S, code: ErrorCode, content: &[u8]);
}

impl<S: ?Sized, F> ErrorHandler<S> for F
where
    F: Fn(&mut S, ErrorCode, &[u8]),
{
    fn on_error(&self, sender: &mut S, code: ErrorCode, content: &[u8]) {
        self(sender, code, content)
    }
}

/// The default error handler: drops every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreErrors;

impl<S: ?Sized> ErrorHandler<S> for IgnoreErrors {
    fn on_error(&self, _sender: &mut S, _code: ErrorCode, _content: &[u8]) {}
}
