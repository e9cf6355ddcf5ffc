use core::fmt;

use heapless::Vec;

use crate::hash::command_hash;
use crate::input::dispatch::ParserContext;

/// Something that can run a command.
///
/// Receives the sender (to write responses) and the parser context (to pull
/// the remaining parameter tokens). Every
/// `Fn(&mut S, &mut ParserContext<'_>)` is a handler, so plain functions work:
///
/// ```ignore
/// fn led(uart: &mut Uart, params: &mut ParserContext<'_>) {
///     match params.next() {
///         Some(b"ON") => uart.write(b"LED is on"),
///         _ => uart.write(b"LED is off"),
///     };
/// }
/// ```
pub trait CommandHandler<S: ?Sized> {
    fn handle(&self, sender: &mut S, params: &mut ParserContext<'_>);
}

impl<S: ?Sized, F> CommandHandler<S> for F
where
    F: Fn(&mut S, &mut ParserContext<'_>),
{
    fn handle(&self, sender: &mut S, params: &mut ParserContext<'_>) {
        self(sender, params)
    }
}

/// A registered command: its name, the precomputed identity hash of the
/// name, and the handler to run.
pub struct Command<'a, S: ?Sized> {
    name: &'a str,
    hash: u32,
    handler: &'a dyn CommandHandler<S>,
}

impl<'a, S: ?Sized> Command<'a, S> {
    pub fn new(name: &'a str, handler: &'a dyn CommandHandler<S>) -> Self {
        Self {
            name,
            hash: command_hash(name.as_bytes()),
            handler,
        }
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn hash(&self) -> u32 {
        self.hash
    }

    pub fn handler(&self) -> &'a dyn CommandHandler<S> {
        self.handler
    }

    fn matches(&self, hash: u32, token: &[u8]) -> bool {
        self.hash == hash && self.name.as_bytes() == token
    }
}

impl<S: ?Sized> fmt::Debug for Command<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("hash", &self.hash)
            .finish_non_exhaustive()
    }
}

/// Append-only, insertion-ordered set of commands.
///
/// # Type Parameters
/// - `NC`: maximum number of commands.
pub struct CommandRegistry<'a, S: ?Sized, const NC: usize> {
    commands: Vec<Command<'a, S>, NC>,
}

impl<'a, S: ?Sized, const NC: usize> CommandRegistry<'a, S, NC> {
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Appends `command`. Returns it back if the registry is full.
    pub fn register(&mut self, command: Command<'a, S>) -> Result<(), Command<'a, S>> {
        self.commands.push(command)
    }

    /// Finds the first registered command named `token`.
    ///
    /// Candidates are filtered by identity hash first; a hash hit is then
    /// confirmed byte by byte, so colliding names never reach the wrong handler.
    pub fn lookup(&self, token: &[u8]) -> Option<&Command<'a, S>> {
        let hash = command_hash(token);
        self.commands.iter().find(|cmd| cmd.matches(hash, token))
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// `(hash, name)` of every command, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &'a str)> + Clone + '_ {
        self.commands.iter().map(|cmd| (cmd.hash, cmd.name))
    }
}

impl<S: ?Sized, const NC: usize> Default for CommandRegistry<'_, S, NC> {
    fn default() -> Self {
        Self::new()
    }
}
