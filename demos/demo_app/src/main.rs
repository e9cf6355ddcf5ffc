mod logger;

use std::io;
use std::thread;
use std::time::Duration;

use parser_config::*;
use stream_parser::terminal::StdioStream;
use stream_parser::{CommandHandler, ParserConfig, StdClock, StreamCommandParser, StreamWriter};
use usercode::commands::{self as uc, Sender};

fn main() -> io::Result<()> {
    logger::init(log::LevelFilter::Warn).map_err(io::Error::other)?;

    let config = ParserConfig::new()
        .with_terminator(TERMINATOR)
        .with_message_delimiters(MESSAGE_DELIMITERS)
        .with_parameter_delimiters(PARAMETER_DELIMITERS);

    let mut buffer = [0u8; BUFFER_LEN];
    let mut parser: StreamCommandParser<'_, Sender, StdClock, MAX_COMMANDS> =
        StreamCommandParser::new(&mut buffer, config, StdClock::new());

    let commands: [(&str, &dyn CommandHandler<Sender>); 5] = [
        ("LED", &uc::led),
        ("TEMP", &uc::temp),
        ("ECHO", &uc::echo),
        ("ADD", &uc::add),
        ("HELP", &uc::help),
    ];
    for (name, handler) in commands {
        if let Err(rejected) = parser.add_command(name, handler) {
            log::warn!("registry full, {} not registered", rejected.name());
        }
    }
    parser.set_error_handler(&uc::report_error);

    let mut stream = StdioStream::new()?;
    parser
        .print_debug_info(&mut StreamWriter::new(&mut stream))
        .map_err(|_| io::Error::other("cannot write to stdout"))?;
    println!("Parser started (try HELP)");

    loop {
        parser.process_input(&mut stream, TIMEOUT_MS);
        if stream.is_eof() {
            uc::report_unterminated(&mut stream, parser.pending());
            break;
        }
        thread::sleep(Duration::from_millis(POLL_INTERVAL_MS));
    }

    println!("Parser exited...");
    Ok(())
}
