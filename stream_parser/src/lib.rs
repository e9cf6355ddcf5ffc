//! # stream_parser
//!
//! Incremental command parser for byte streams such as UARTs, USB CDC ports
//! or a raw terminal. Bytes are pulled a few at a time on every call to
//! [`StreamCommandParser::process_input`], framed by a terminator inside a
//! caller-supplied fixed buffer, split into commands and parameters, and
//! dispatched to registered handlers.
//!
//! ```text
//!  ByteStream ──► FrameBuffer ──► Tokenizer (messages) ──► Tokenizer (params)
//!                    │                                          │
//!                    └─ overflow / timeout          command ──► CommandRegistry ──► handler
//!                                   │                                 │
//!                                   └──────────► ErrorHandler ◄───────┘ unknown
//! ```
//!
//! The engine never allocates: the buffer is borrowed, the registry is a
//! `heapless::Vec` sized by a const generic, and tokens are slices of the
//! buffer.
//!
//! ## Example
//! ```ignore
//! let mut buffer = [0u8; 64];
//! let mut parser: StreamCommandParser<'_, MyUart, _, 4> =
//!     StreamCommandParser::new(&mut buffer, ParserConfig::default(), || millis());
//! parser.add_command("LED", &led).ok();
//! loop {
//!     parser.process_input(&mut uart, 500);
//! }
//! ```
//!
//! ## Features
//! - `std`: host helpers (`StdClock`, and on unix the `terminal` module).
//! - `log` / `defmt`: diagnostic logging through the respective facade.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[macro_use]
mod fmt;

pub mod config;
pub mod error;
pub mod hash;
pub mod input;
pub mod registry;
pub mod stream;
pub mod tokenizer;

#[cfg(all(unix, feature = "std"))]
pub mod terminal;

pub use config::ParserConfig;
pub use error::{ErrorCode, ErrorHandler, IgnoreErrors};
pub use input::dispatch::ParserContext;
pub use input::parser::StreamCommandParser;
pub use registry::{Command, CommandHandler, CommandRegistry};
pub use stream::{ByteStream, Clock, StreamWriter};

#[cfg(feature = "std")]
pub use stream::StdClock;
