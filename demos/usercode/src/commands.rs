use core::fmt::Write;
use core::sync::atomic::{AtomicBool, Ordering};

use heapless::String;
use stream_parser::{ByteStream, ErrorCode, ParserContext, StreamWriter};

/// The stream every handler talks to.
pub type Sender = dyn ByteStream;

const LINE_LEN: usize = 64;

static LED_ON: AtomicBool = AtomicBool::new(false);

fn reply(sender: &mut Sender, params: &ParserContext<'_>, text: &str) {
    sender.write(text.as_bytes());
    sender.write(params.terminator());
}

pub fn led(sender: &mut Sender, params: &mut ParserContext<'_>) {
    match params.next() {
        Some(b"ON") => LED_ON.store(true, Ordering::Relaxed),
        Some(b"OFF") => LED_ON.store(false, Ordering::Relaxed),
        Some(b"TOGGLE") => {
            LED_ON.fetch_xor(true, Ordering::Relaxed);
        }
        None => {}
        Some(_) => return reply(sender, params, "ERR usage: LED [ON|OFF|TOGGLE]"),
    }
    let state = if LED_ON.load(Ordering::Relaxed) { "LED ON" } else { "LED OFF" };
    reply(sender, params, state);
}

pub fn temp(sender: &mut Sender, params: &mut ParserContext<'_>) {
    // Simulated sensor reading, in tenths of a degree Celsius.
    let tenths: i32 = 215;
    let mut line: String<LINE_LEN> = String::new();
    let _ = match params.next() {
        None | Some(b"GET") | Some(b"C") => {
            write!(line, "TEMP {}.{} C", tenths / 10, tenths % 10)
        }
        Some(b"F") => {
            let f = tenths * 9 / 5 + 320;
            write!(line, "TEMP {}.{} F", f / 10, f % 10)
        }
        Some(_) => write!(line, "ERR usage: TEMP [GET|C|F]"),
    };
    reply(sender, params, &line);
}

pub fn echo(sender: &mut Sender, params: &mut ParserContext<'_>) {
    let mut first = true;
    while let Some(word) = params.next() {
        if !first {
            sender.write(b" ");
        }
        sender.write(word);
        first = false;
    }
    sender.write(params.terminator());
}

pub fn add(sender: &mut Sender, params: &mut ParserContext<'_>) {
    let mut sum: i64 = 0;
    while let Some(token) = params.next() {
        let parsed = core::str::from_utf8(token)
            .ok()
            .and_then(|s| s.parse::<i64>().ok());
        match parsed {
            Some(n) => sum = sum.saturating_add(n),
            None => return reply(sender, params, "ERR not a number"),
        }
    }
    let mut out = StreamWriter::new(sender);
    let _ = write!(out, "SUM {}", sum);
    sender.write(params.terminator());
}

pub fn help(sender: &mut Sender, params: &mut ParserContext<'_>) {
    reply(sender, params, "LED [ON|OFF|TOGGLE] ; TEMP [GET|C|F] ; ECHO ... ; ADD n ... ; HELP");
}

/// Writes one `ERR` line per reported error.
pub fn report_error(sender: &mut Sender, code: ErrorCode, content: &[u8]) {
    err_line(sender, format_args!("{}", code), content);
}

/// Reports a trailing line that never received its terminator.
///
/// Nothing is written when `pending` is empty.
pub fn report_unterminated(sender: &mut Sender, pending: &[u8]) {
    if !pending.is_empty() {
        err_line(sender, format_args!("unterminated input"), pending);
    }
}

fn err_line(sender: &mut Sender, what: core::fmt::Arguments<'_>, content: &[u8]) {
    let mut line: String<LINE_LEN> = String::new();
    let _ = write!(line, "ERR {}: ", what);
    for &b in content.iter().take(LINE_LEN / 2) {
        let _ = line.push(if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' });
    }
    let _ = line.push('\n');
    sender.write(line.as_bytes());
}

// ================= TESTS ==========================
