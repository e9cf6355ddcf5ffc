//! StreamCommandParser is an incremental, allocation-free command parser for
//! byte streams, designed for embedded or constrained environments. It supports:
//! - Framing by a terminator sequence inside a caller-owned buffer
//! - Overflow and timeout detection
//! - Several commands per framed message
//! - Command lookup by identity hash
//! - A pluggable error handler
//!
//! It integrates with:
//! - FrameBuffer
//! - Dispatcher (Tokenizer + CommandRegistry)
//! - ByteStream and Clock collaborators

use core::fmt;

use crate::config::ParserConfig;
use crate::error::{ErrorCode, ErrorHandler};
use crate::fmt::Bytes;
use crate::input::buffer::FrameBuffer;
use crate::input::dispatch::Dispatcher;
use crate::registry::{Command, CommandHandler};
use crate::stream::{ByteStream, Clock};

/// # Type Parameters
/// - `S`: The stream type commands are read from and handlers write to.
/// - `C`: The millisecond clock used for timeouts.
/// - `NC`: Maximum number of registered commands.
///
/// # Fields
/// - `buffer`: Framing buffer over the caller-supplied memory.
/// - `dispatcher`: Tokenizer settings, command registry and error handler.
/// - `clock`: Time source for the timeout check.
/// - `fill_started_ms`: Arrival time of the first byte of the partial message, if any.
///
pub struct StreamCommandParser<'a, S: ?Sized, C, const NC: usize> {
    buffer: FrameBuffer<'a>,
    dispatcher: Dispatcher<'a, S, NC>,
    clock: C,
    fill_started_ms: Option<u32>,
}

impl<'a, S, C, const NC: usize> StreamCommandParser<'a, S, C, NC>
where
    S: ByteStream + ?Sized,
    C: Clock,
{
    /// Creates a parser framing into `buffer`.
    ///
    /// One byte of `buffer` is reserved, so messages (including the
    /// terminator) must be shorter than `buffer.len() - 1` bytes.
    pub fn new(buffer: &'a mut [u8], config: ParserConfig<'a>, clock: C) -> Self {
        Self {
            buffer: FrameBuffer::new(buffer),
            dispatcher: Dispatcher::new(config),
            clock,
            fill_started_ms: None,
        }
    }

    /// Registers a command. Returns it back if `NC` commands are already registered.
    pub fn add_command(
        &mut self,
        name: &'a str,
        handler: &'a dyn CommandHandler<S>,
    ) -> Result<(), Command<'a, S>> {
        self.dispatcher.add_command(name, handler)
    }

    /// Replaces the error handler (by default errors are ignored).
    pub fn set_error_handler(&mut self, handler: &'a dyn ErrorHandler<S>) {
        self.dispatcher.set_error_handler(handler);
    }

    /// Reads the bytes `stream` has available and runs the commands of a
    /// completed message.
    ///
    /// Call this repeatedly from the main loop. Per call:
    /// - bytes are appended one at a time until the terminator arrives, the
    ///   buffer fills up, or the stream runs dry;
    /// - a completed message is dispatched and the buffer cleared;
    /// - a full buffer is reported as [`ErrorCode::BufferOverflow`] and dropped;
    /// - a partial message older than `timeout_ms` (counted from its first
    ///   byte) is reported as [`ErrorCode::Timeout`] and dropped;
    /// - otherwise the partial message is kept for the next call.
    pub fn process_input(&mut self, stream: &mut S, timeout_ms: u32) {
        let terminator = self.dispatcher.config().terminator;
        let mut framed = false;

        while stream.available() > 0 {
            let Some(byte) = stream.read_byte() else {
                break;
            };

            if self.buffer.is_empty() {
                self.fill_started_ms = Some(self.clock.now_ms());
            }

            if !self.buffer.push(byte) {
                self.overflow(stream);
                return;
            }

            if self.buffer.strip_terminator(terminator) {
                framed = true;
                break;
            }

            if self.buffer.is_full() {
                self.overflow(stream);
                return;
            }
        }

        if framed {
            trace!("framed {} bytes", self.buffer.len());
            self.dispatcher.execute(stream, self.buffer.content_mut());
            self.clear_buffer();
            return;
        }

        if let Some(started) = self.fill_started_ms {
            let elapsed = self.clock.now_ms().wrapping_sub(started);
            if elapsed > timeout_ms {
                warn!("timeout after {} ms: {}", elapsed, Bytes(self.buffer.content()));
                self.dispatcher
                    .report(stream, ErrorCode::Timeout, self.buffer.content());
                self.clear_buffer();
            }
        }
    }

    fn overflow(&mut self, stream: &mut S) {
        warn!("buffer overflow: {}", Bytes(self.buffer.content()));
        self.dispatcher
            .report(stream, ErrorCode::BufferOverflow, self.buffer.content());
        self.clear_buffer();
    }

    /// Tokenizes `message` in place and runs its commands, bypassing framing.
    pub fn execute(&self, stream: &mut S, message: &mut [u8]) {
        self.dispatcher.execute(stream, message);
    }

    /// Drops any partially received message.
    pub fn clear_buffer(&mut self) {
        self.buffer.clear();
        self.fill_started_ms = None;
    }

    /// Bytes of the message currently being received.
    pub fn pending(&self) -> &[u8] {
        self.buffer.content()
    }

    /// The terminator that ends a message.
    pub fn terminator(&self) -> &'a [u8] {
        self.dispatcher.config().terminator
    }

    pub fn command_count(&self) -> usize {
        self.dispatcher.registry().len()
    }

    /// `(hash, name)` of every registered command, in registration order.
    pub fn commands(&self) -> impl Iterator<Item = (u32, &'a str)> + Clone + '_ {
        self.dispatcher.registry().iter()
    }

    /// Writes the registered commands and their identity hashes to `out`.
    pub fn print_debug_info<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        out.write_str("*** StreamCommandParser DEBUG INFO ***\r\n")?;
        write!(out, "Commands stored:\t{}\r\n", self.command_count())?;
        for (hash, name) in self.commands() {
            write!(out, "\t{}\t{}\r\n", hash, name)?;
        }
        out.write_str("\r\n*******************\r\n\r\n")
    }
}

#[cfg(test)]
mod tests {
    use std::string::String;

    use super::*;
    use crate::input::dispatch::ParserContext;
    use crate::stream::mock::{ManualClock, MockStream, record_error};

    fn led(s: &mut MockStream, params: &mut ParserContext<'_>) {
        s.write(b"[LED");
        while let Some(p) = params.next() {
            s.write(b" ");
            s.write(p);
        }
        s.write(b"]");
    }

    fn temp(s: &mut MockStream, params: &mut ParserContext<'_>) {
        s.write(b"[TEMP");
        if let Some(p) = params.next() {
            s.write(b" ");
            s.write(p);
        }
        s.write(b"]");
    }

    fn led_two_params(s: &mut MockStream, params: &mut ParserContext<'_>) {
        let first = params.next();
        let second = params.next();
        s.write(if first == Some(&b"ON"[..]) { b"on" } else { b"??" });
        s.write(if second.is_none() { &b"|end"[..] } else { &b"|more"[..] });
    }

    type Parser<'a, 'c> = StreamCommandParser<'a, MockStream, &'c ManualClock, 4>;

    fn parser<'a, 'c>(buffer: &'a mut [u8], clock: &'c ManualClock) -> Parser<'a, 'c> {
        let mut p = StreamCommandParser::new(buffer, ParserConfig::default(), clock);
        p.add_command("LED", &led).unwrap();
        p.add_command("TEMP", &temp).unwrap();
        p.set_error_handler(&record_error);
        p
    }

    #[test]
    fn dispatches_framed_message_and_clears() {
        let clock = ManualClock::default();
        let mut buf = [0u8; 32];
        let mut p = parser(&mut buf, &clock);
        let mut s = MockStream::new();

        s.feed(b"LED ON\r\n");
        p.process_input(&mut s, 100);

        assert_eq!(s.output(), b"[LED ON]");
        assert!(s.errors.is_empty());
        assert!(p.pending().is_empty());
    }

    #[test]
    fn handler_pulls_parameters_until_exhausted() {
        let clock = ManualClock::default();
        let mut buf = [0u8; 32];
        let mut p: Parser<'_, '_> = StreamCommandParser::new(&mut buf, ParserConfig::default(), &clock);
        p.add_command("LED", &led_two_params).unwrap();
        p.add_command("TEMP", &temp).unwrap();
        let mut s = MockStream::new();

        s.feed(b"LED ON\r\n");
        p.process_input(&mut s, 100);

        assert_eq!(s.output(), b"on|end");
    }

    #[test]
    fn unknown_command_reports_token() {
        let clock = ManualClock::default();
        let mut buf = [0u8; 32];
        let mut p = parser(&mut buf, &clock);
        let mut s = MockStream::new();

        s.feed(b"FOO\r\n");
        p.process_input(&mut s, 100);

        assert_eq!(s.errors, [(ErrorCode::UnknownCommand, b"FOO".to_vec())]);
        assert!(s.output().is_empty());
    }

    #[test]
    fn several_commands_in_one_message_run_in_order() {
        let clock = ManualClock::default();
        let mut buf = [0u8; 32];
        let mut p = parser(&mut buf, &clock);
        let mut s = MockStream::new();

        s.feed(b"LED ON;TEMP GET\r\n");
        p.process_input(&mut s, 100);

        assert_eq!(s.output(), b"[LED ON][TEMP GET]");
    }

    #[test]
    fn partial_input_is_kept_across_calls() {
        let clock = ManualClock::default();
        let mut buf = [0u8; 32];
        let mut p = parser(&mut buf, &clock);
        let mut s = MockStream::new();

        s.feed(b"LE");
        p.process_input(&mut s, 100);
        assert_eq!(p.pending(), b"LE");

        clock.advance(40);
        s.feed(b"D OF");
        p.process_input(&mut s, 100);
        assert_eq!(p.pending(), b"LED OF");

        clock.advance(40);
        s.feed(b"F\r");
        p.process_input(&mut s, 100);
        assert!(s.output().is_empty());

        s.feed(b"\n");
        p.process_input(&mut s, 100);
        assert_eq!(s.output(), b"[LED OFF]");
        assert!(s.errors.is_empty());
        assert!(p.pending().is_empty());
    }

    #[test]
    fn only_one_message_is_framed_per_call() {
        let clock = ManualClock::default();
        let mut buf = [0u8; 32];
        let mut p = parser(&mut buf, &clock);
        let mut s = MockStream::new();

        s.feed(b"LED\r\nTEMP\r\n");
        p.process_input(&mut s, 100);
        assert_eq!(s.output(), b"[LED]");
        assert_eq!(s.unread(), 6);

        p.process_input(&mut s, 100);
        assert_eq!(s.output(), b"[LED][TEMP]");
    }

    #[test]
    fn overflow_is_reported_once_and_clears() {
        let clock = ManualClock::default();
        let mut buf = [0u8; 8];
        let mut p = parser(&mut buf, &clock);
        let mut s = MockStream::new();

        s.feed(b"TEMP GET ALL\r\n");
        p.process_input(&mut s, 100);

        assert_eq!(s.errors, [(ErrorCode::BufferOverflow, b"TEMP GE".to_vec())]);
        assert!(p.pending().is_empty());
        assert_eq!(s.reads, 7);
        assert!(s.output().is_empty());
    }

    #[test]
    fn overflow_leaves_the_rest_for_later_calls() {
        let clock = ManualClock::default();
        let mut buf = [0u8; 8];
        let mut p = parser(&mut buf, &clock);
        let mut s = MockStream::new();

        s.feed(b"XXXXXXXXLED\r\n");
        p.process_input(&mut s, 100);
        assert_eq!(s.errors, [(ErrorCode::BufferOverflow, b"XXXXXXX".to_vec())]);
        assert_eq!(s.unread(), 6);

        p.process_input(&mut s, 100);
        assert_eq!(
            s.errors[1..],
            [(ErrorCode::UnknownCommand, b"XLED".to_vec())]
        );
        assert!(s.output().is_empty());
        assert!(p.pending().is_empty());
    }

    #[test]
    fn message_filling_the_buffer_exactly_is_framed() {
        let clock = ManualClock::default();
        let mut buf = [0u8; 8];
        let mut p = parser(&mut buf, &clock);
        let mut s = MockStream::new();

        s.feed(b"LED X\r\n");
        p.process_input(&mut s, 100);

        assert_eq!(s.output(), b"[LED X]");
        assert!(s.errors.is_empty());
    }

    #[test]
    fn stale_partial_message_times_out() {
        let clock = ManualClock::at(1_000);
        let mut buf = [0u8; 32];
        let mut p = parser(&mut buf, &clock);
        let mut s = MockStream::new();

        s.feed(b"LED O");
        p.process_input(&mut s, 100);
        clock.advance(100);
        p.process_input(&mut s, 100);
        assert!(s.errors.is_empty());
        assert_eq!(p.pending(), b"LED O");

        clock.advance(1);
        p.process_input(&mut s, 100);
        assert_eq!(s.errors, [(ErrorCode::Timeout, b"LED O".to_vec())]);
        assert!(p.pending().is_empty());

        clock.advance(500);
        p.process_input(&mut s, 100);
        assert_eq!(s.errors.len(), 1);
    }

    #[test]
    fn idle_parser_never_times_out() {
        let clock = ManualClock::default();
        let mut buf = [0u8; 32];
        let mut p = parser(&mut buf, &clock);
        let mut s = MockStream::new();

        for _ in 0..5 {
            clock.advance(1_000);
            p.process_input(&mut s, 10);
        }
        assert!(s.errors.is_empty());
    }

    #[test]
    fn timeout_survives_clock_wraparound() {
        let clock = ManualClock::at(u32::MAX - 10);
        let mut buf = [0u8; 32];
        let mut p = parser(&mut buf, &clock);
        let mut s = MockStream::new();

        s.feed(b"TE");
        p.process_input(&mut s, 50);
        clock.advance(30);
        p.process_input(&mut s, 50);
        assert!(s.errors.is_empty());

        clock.advance(30);
        p.process_input(&mut s, 50);
        assert_eq!(s.errors, [(ErrorCode::Timeout, b"TE".to_vec())]);
    }

    #[test]
    fn timeout_is_measured_from_first_byte_of_message() {
        let clock = ManualClock::default();
        let mut buf = [0u8; 32];
        let mut p = parser(&mut buf, &clock);
        let mut s = MockStream::new();

        s.feed(b"LED\r\n");
        p.process_input(&mut s, 100);
        clock.advance(5_000);

        s.feed(b"TEMP\r\n");
        p.process_input(&mut s, 100);
        assert_eq!(s.output(), b"[LED][TEMP]");
        assert!(s.errors.is_empty());
    }

    #[test]
    fn clear_buffer_drops_partial_message() {
        let clock = ManualClock::default();
        let mut buf = [0u8; 32];
        let mut p = parser(&mut buf, &clock);
        let mut s = MockStream::new();

        s.feed(b"GARBAGE");
        p.process_input(&mut s, 100);
        p.clear_buffer();
        clock.advance(1_000);
        s.feed(b"LED\r\n");
        p.process_input(&mut s, 100);

        assert_eq!(s.output(), b"[LED]");
        assert!(s.errors.is_empty());
    }

    #[test]
    fn custom_terminator_and_delimiters() {
        let clock = ManualClock::default();
        let mut buf = [0u8; 32];
        let config = ParserConfig::new()
            .with_terminator(b"\n")
            .with_message_delimiters(b"|")
            .with_parameter_delimiters(b",");
        let mut p: Parser<'_, '_> = StreamCommandParser::new(&mut buf, config, &clock);
        p.add_command("LED", &led).unwrap();
        p.add_command("TEMP", &temp).unwrap();
        let mut s = MockStream::new();

        assert_eq!(p.terminator(), b"\n");
        s.feed(b"LED,ON,2|TEMP\n");
        p.process_input(&mut s, 100);

        assert_eq!(s.output(), b"[LED ON 2][TEMP]");
    }

    #[test]
    fn execute_bypasses_framing() {
        let clock = ManualClock::default();
        let mut buf = [0u8; 8];
        let p = parser(&mut buf, &clock);
        let mut s = MockStream::new();

        let mut message = *b"TEMP GET;LED ON AND OFF";
        p.execute(&mut s, &mut message);

        assert_eq!(s.output(), b"[TEMP GET][LED ON AND OFF]");
    }

    #[test]
    fn debug_info_lists_commands() {
        let clock = ManualClock::default();
        let mut buf = [0u8; 8];
        let p = parser(&mut buf, &clock);

        let mut out = String::new();
        p.print_debug_info(&mut out).unwrap();

        let expected = std::format!(
            "*** StreamCommandParser DEBUG INFO ***\r\n\
             Commands stored:\t2\r\n\
             \t{}\tLED\r\n\
             \t{}\tTEMP\r\n\
             \r\n*******************\r\n\r\n",
            crate::hash::command_hash(b"LED"),
            crate::hash::command_hash(b"TEMP"),
        );
        assert_eq!(out, expected);
        assert_eq!(p.command_count(), 2);
        assert_eq!(p.commands().count(), 2);
    }

    #[test]
    fn registry_capacity_is_enforced() {
        let clock = ManualClock::default();
        let mut buf = [0u8; 8];
        let mut p: StreamCommandParser<'_, MockStream, &ManualClock, 1> =
            StreamCommandParser::new(&mut buf, ParserConfig::default(), &clock);
        assert!(p.add_command("LED", &led).is_ok());
        assert_eq!(p.add_command("TEMP", &temp).unwrap_err().name(), "TEMP");
        assert_eq!(p.command_count(), 1);
    }
}
