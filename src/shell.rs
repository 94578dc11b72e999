use crate::command::tokenize;
use crate::error::ShellError;
use crate::input::LineSource;
use crate::outln;
use crate::output::{handle_error, Writer};
use crate::table::{CommandContext, CommandTable};
use log::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Destroyed,
}

/// An interactive session: pulls lines from a source and dispatches them
/// against a command table, writing everything through one sink.
pub struct Session {
    table: CommandTable,
    prompt: String,
    source: Option<Box<dyn LineSource>>,
    writer: Box<dyn Writer>,
    state: SessionState,
}

impl Session {
    /// Start an active session
    ///
    /// # Examples
    /// ```
    /// use cmdnode::input::ReaderSource;
    /// use cmdnode::output::StringWriter;
    /// use cmdnode::shell::Session;
    /// use cmdnode::table::{CommandSpec, CommandTable};
    /// use std::io::Cursor;
    ///
    /// let table = CommandTable::new().with(CommandSpec::new(
    ///     "greet",
    ///     &["who"],
    ///     "Say hello.",
    ///     |args, ctx| {
    ///         cmdnode::outln!(ctx.out(), "hello {}", args[0])?;
    ///         Ok(())
    ///     },
    /// ));
    /// let out = StringWriter::new();
    /// let source = ReaderSource::new(Cursor::new("greet world\n"));
    /// let mut session = Session::initialize(table, "> ", source, out.clone());
    /// session.run().unwrap();
    /// assert_eq!(out.get(), "> hello world\n> ");
    /// ```
    pub fn initialize(
        table: CommandTable,
        prompt: &str,
        source: impl LineSource + 'static,
        writer: impl Writer + 'static,
    ) -> Self {
        info!("session started with {} commands", table.iter().count());
        Self {
            table,
            prompt: prompt.to_string(),
            source: Some(Box::new(source)),
            writer: Box::new(writer),
            state: SessionState::Active,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    /// Replace the output sink, returning the previous one
    pub fn set_writer(&mut self, writer: impl Writer + 'static) -> Box<dyn Writer> {
        std::mem::replace(&mut self.writer, Box::new(writer))
    }

    /// Write the prompt to the sink
    pub fn prompt(&mut self) -> Result<(), ShellError> {
        self.writer.write_prompt(&self.prompt)?;
        Ok(())
    }

    /// Process lines until the source ends or a handler destroys the session
    pub fn run(&mut self) -> Result<(), ShellError> {
        while self.state == SessionState::Active {
            let Some(source) = self.source.as_mut() else {
                break;
            };
            match source.next_line(&self.prompt, self.writer.as_mut())? {
                Some(line) => self.execute_line(&line)?,
                None => {
                    debug!("input ended");
                    self.destroy()?;
                }
            }
        }
        Ok(())
    }

    /// Tokenize and dispatch a single line
    ///
    /// Wrong arity, unknown commands and handler failures are reported
    /// through the sink and leave the session running.
    pub fn execute_line(&mut self, line: &str) -> Result<(), ShellError> {
        if self.state == SessionState::Destroyed {
            return Err(ShellError::SessionClosed);
        }

        let tokens = tokenize(line);
        debug!("tokens: {:?}", tokens);

        let mut ctx = CommandContext::new(self.writer.as_mut(), &self.prompt);
        let result = self.table.dispatch(&tokens, &mut ctx);
        let shutdown = ctx.shutdown_requested();

        match result {
            Ok(()) => {}
            Err(ShellError::Handler(e)) => handle_error(self.writer.as_mut(), &*e)?,
            Err(e) if e.is_recoverable() => outln!(self.writer, "{}", e)?,
            Err(e) => return Err(e),
        }

        if shutdown {
            self.destroy()?;
        }
        Ok(())
    }

    /// Close the input and stop processing lines
    ///
    /// Calling it again is a no-op.
    pub fn destroy(&mut self) -> Result<(), ShellError> {
        if self.state == SessionState::Destroyed {
            debug!("session already destroyed");
            return Ok(());
        }
        self.state = SessionState::Destroyed;
        info!("session destroyed");
        match self.source.take() {
            Some(mut source) => source.close(),
            None => Ok(()),
        }
    }
}
