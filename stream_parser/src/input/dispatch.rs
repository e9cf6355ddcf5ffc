use crate::config::ParserConfig;
use crate::error::{ErrorCode, ErrorHandler, IgnoreErrors};
use crate::fmt::Bytes;
use crate::registry::{Command, CommandHandler, CommandRegistry};
use crate::tokenizer::Tokenizer;

/// Handle given to a command handler while it runs.
///
/// Yields the parameters that follow the command token, one per call to
/// [`Iterator::next`], and `None` once they are exhausted.
pub struct ParserContext<'t> {
    command: &'t [u8],
    params: Tokenizer<'t>,
    terminator: &'t [u8],
}

impl<'t> ParserContext<'t> {
    pub(crate) fn new(command: &'t [u8], params: Tokenizer<'t>, terminator: &'t [u8]) -> Self {
        Self {
            command,
            params,
            terminator,
        }
    }

    /// A context with no command and the given unsplit parameter bytes.
    #[cfg(test)]
    pub(crate) fn detached(params: &'t mut [u8]) -> Self {
        Self::new(b"", Tokenizer::new(params, b" "), b"\r\n")
    }

    /// The command token that selected this handler.
    pub fn command(&self) -> &'t [u8] {
        self.command
    }

    /// The configured terminator, for ending response lines.
    pub fn terminator(&self) -> &'t [u8] {
        self.terminator
    }
}

impl<'t> Iterator for ParserContext<'t> {
    type Item = &'t [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let token: &'t [u8] = self.params.next_token()?;
        Some(token)
    }
}

/// Tokenizes framed messages and routes them to registered commands.
pub struct Dispatcher<'a, S: ?Sized, const NC: usize> {
    registry: CommandRegistry<'a, S, NC>,
    config: ParserConfig<'a>,
    error_handler: &'a dyn ErrorHandler<S>,
}

impl<'a, S: ?Sized, const NC: usize> Dispatcher<'a, S, NC> {
    pub fn new(config: ParserConfig<'a>) -> Self {
        Self {
            registry: CommandRegistry::new(),
            config,
            error_handler: &IgnoreErrors,
        }
    }

    pub fn add_command(
        &mut self,
        name: &'a str,
        handler: &'a dyn CommandHandler<S>,
    ) -> Result<(), Command<'a, S>> {
        self.registry.register(Command::new(name, handler))
    }

    pub fn set_error_handler(&mut self, handler: &'a dyn ErrorHandler<S>) {
        self.error_handler = handler;
    }

    pub fn registry(&self) -> &CommandRegistry<'a, S, NC> {
        &self.registry
    }

    pub fn config(&self) -> &ParserConfig<'a> {
        &self.config
    }

    pub fn report(&self, sender: &mut S, code: ErrorCode, content: &[u8]) {
        self.error_handler.on_error(sender, code, content);
    }

    /// Splits `message` into entries by the message delimiters and runs each
    /// entry's command, left to right.
    ///
    /// The first parameter token of an entry is the command. Entries that are
    /// empty or hold only parameter delimiters are skipped. `message` is
    /// tokenized in place.
    pub fn execute(&self, sender: &mut S, message: &mut [u8]) {
        let mut entries = Tokenizer::new(message, self.config.message_delimiters);
        while let Some(entry) = entries.next_token() {
            let mut params = Tokenizer::new(entry, self.config.parameter_delimiters);
            let Some(command) = params.next_token() else {
                continue;
            };
            let command: &[u8] = command;

            match self.registry.lookup(command) {
                Some(cmd) => {
                    debug!("dispatching {}", cmd.name());
                    let mut context = ParserContext::new(command, params, self.config.terminator);
                    cmd.handler().handle(sender, &mut context);
                }
                None => {
                    warn!("unknown command {}", Bytes(command));
                    self.report(sender, ErrorCode::UnknownCommand, command);
                }
            }
        }
    }
}
