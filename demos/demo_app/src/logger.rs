use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Writes every enabled record to stderr.
struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Installs the stderr logger. The level comes from `STREAM_PARSER_LOG`
/// (`error` .. `trace`), falling back to `default`.
pub fn init(default: LevelFilter) -> Result<(), SetLoggerError> {
    let level = std::env::var("STREAM_PARSER_LOG")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default);
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}
