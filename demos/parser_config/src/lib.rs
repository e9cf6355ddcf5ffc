#![no_std]

/// Size of the framing buffer; one byte is reserved for the terminating zero.
pub const BUFFER_LEN: usize = 64;

/// Maximum number of registered commands.
pub const MAX_COMMANDS: usize = 8;

/// A partial command older than this is dropped.
pub const TIMEOUT_MS: u32 = 5_000;

/// Pause between two polls of the input stream.
pub const POLL_INTERVAL_MS: u64 = 10;

// A terminal in non-canonical mode delivers Enter as a bare '\n'.
pub const TERMINATOR: &[u8] = b"\n";
pub const MESSAGE_DELIMITERS: &[u8] = b";";
pub const PARAMETER_DELIMITERS: &[u8] = b" \t";
