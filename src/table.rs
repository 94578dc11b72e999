use crate::error::ShellError;
use crate::outln;
use crate::output::Writer;
use log::{debug, warn};
use std::collections::HashMap;
use std::io;

/// Name of the command that is always available and lists the table
pub const HELP_COMMAND: &str = "help";

/// Callable invoked with the arguments that follow the command name
pub type Handler = Box<dyn Fn(&[String], &mut CommandContext<'_>) -> anyhow::Result<()>>;

/// What a handler can reach while it runs
pub struct CommandContext<'a> {
    out: &'a mut dyn Writer,
    prompt: &'a str,
    shutdown: bool,
}

impl<'a> CommandContext<'a> {
    pub fn new(out: &'a mut dyn Writer, prompt: &'a str) -> Self {
        Self {
            out,
            prompt,
            shutdown: false,
        }
    }

    /// The session's current output sink
    pub fn out(&mut self) -> &mut dyn Writer {
        &mut *self.out
    }

    /// Re-issue the prompt, for handlers whose output lands after it
    pub fn prompt(&mut self) -> io::Result<()> {
        self.out.write_prompt(self.prompt)
    }

    /// Ask the session to shut down once the handler returns
    pub fn destroy(&mut self) {
        self.shutdown = true;
    }

    pub fn shutdown_requested(&self) -> bool {
        self.shutdown
    }
}

/// A registered command: its parameter names, help text and handler
pub struct CommandSpec {
    name: String,
    parameters: Vec<String>,
    description: String,
    handler: Handler,
}

impl CommandSpec {
    pub fn new<F>(name: &str, parameters: &[&str], description: &str, handler: F) -> Self
    where
        F: Fn(&[String], &mut CommandContext<'_>) -> anyhow::Result<()> + 'static,
    {
        Self {
            name: name.to_string(),
            parameters: parameters.iter().map(|p| p.to_string()).collect(),
            description: description.to_string(),
            handler: Box::new(handler),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Number of arguments the command expects
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// `name <p1> <p2>` as shown by help
    fn usage(&self) -> String {
        self.parameters
            .iter()
            .fold(self.name.clone(), |usage, p| format!("{usage} <{p}>"))
    }
}

/// Commands indexed by name, listed in registration order
#[derive(Default)]
pub struct CommandTable {
    commands: Vec<CommandSpec>,
    index: HashMap<String, usize>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command, replacing any previous one with the same name
    pub fn register(&mut self, command: CommandSpec) {
        if command.name == HELP_COMMAND {
            warn!("ignoring registration of reserved command '{HELP_COMMAND}'");
            return;
        }
        match self.index.get(&command.name) {
            Some(&slot) => {
                debug!("replacing command '{}'", command.name);
                self.commands[slot] = command;
            }
            None => {
                self.index.insert(command.name.clone(), self.commands.len());
                self.commands.push(command);
            }
        }
    }

    /// Builder-style [`register`](Self::register)
    pub fn with(mut self, command: CommandSpec) -> Self {
        self.register(command);
        self
    }

    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        self.index.get(name).map(|&slot| &self.commands[slot])
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.iter()
    }

    /// Every name the dispatcher accepts, `help` included
    pub fn command_names(&self) -> Vec<String> {
        std::iter::once(HELP_COMMAND.to_string())
            .chain(self.commands.iter().map(|c| c.name.clone()))
            .collect()
    }

    /// Print every command with its parameter placeholders and description
    pub fn show_help(&self, out: &mut dyn Writer) -> io::Result<()> {
        outln!(out)?;
        for command in &self.commands {
            outln!(out, "{}\n\n{}\n", command.usage(), command.description)?;
        }
        Ok(())
    }

    /// Route one tokenized line
    ///
    /// Help and the blank-line echo are written here. Arity and lookup
    /// failures come back as errors for the caller to display; the handler
    /// runs at most once and only when the argument count matches.
    pub fn dispatch(&self, tokens: &[String], ctx: &mut CommandContext<'_>) -> Result<(), ShellError> {
        let Some((name, args)) = tokens.split_first() else {
            outln!(ctx.out())?;
            return Ok(());
        };

        if name.is_empty() {
            outln!(ctx.out())?;
            return Ok(());
        }

        if name == HELP_COMMAND {
            self.show_help(ctx.out())?;
            return Ok(());
        }

        let command = self
            .get(name)
            .ok_or_else(|| ShellError::UnrecognizedCommand(name.clone()))?;

        if args.len() != command.arity() {
            return Err(ShellError::WrongArity {
                expected: command.parameters.clone(),
            });
        }

        debug!("executing '{}' with {:?}", name, args);
        (command.handler)(args, ctx).map_err(ShellError::Handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::tokenize;
    use crate::output::StringWriter;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn create_table(calls: Rc<RefCell<Vec<Vec<String>>>>) -> CommandTable {
        CommandTable::new().with(CommandSpec::new(
            "create",
            &["objectUri", "objectValue"],
            "\tCreate a new object.",
            move |args, _| {
                calls.borrow_mut().push(args.to_vec());
                Ok(())
            },
        ))
    }

    fn run(table: &CommandTable, line: &str, out: &mut StringWriter) -> Result<(), ShellError> {
        let mut ctx = CommandContext::new(out, "Test>");
        table.dispatch(&tokenize(line), &mut ctx)
    }

    #[test]
    fn help_lists_parameters() {
        let table = create_table(Rc::default());
        let mut out = StringWriter::new();
        run(&table, "help", &mut out).unwrap();
        assert!(out.get().contains("create <objectUri> <objectValue>"));
        assert!(out.get().contains("\tCreate a new object."));
    }

    #[test]
    fn matching_arity_invokes_handler_once() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let table = create_table(calls.clone());
        let mut out = StringWriter::new();
        run(&table, "create thisIsTheUri thisIsTheValue", &mut out).unwrap();
        assert_eq!(
            *calls.borrow(),
            vec![vec!["thisIsTheUri".to_string(), "thisIsTheValue".to_string()]]
        );
    }

    #[test]
    fn wrong_arity_skips_handler() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let table = create_table(calls.clone());
        let mut out = StringWriter::new();
        let err = run(&table, "create thisIsTheUri", &mut out).unwrap_err();
        assert!(matches!(err, ShellError::WrongArity { ref expected } if expected.len() == 2));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn unknown_and_prefix_names_are_unrecognized() {
        let table = create_table(Rc::default());
        let mut out = StringWriter::new();
        for line in ["bogus foo", "cre a b"] {
            let err = run(&table, line, &mut out).unwrap_err();
            assert!(matches!(err, ShellError::UnrecognizedCommand(_)));
        }
    }

    #[test]
    fn empty_line_prints_blank_line() {
        let table = create_table(Rc::default());
        let mut out = StringWriter::new();
        run(&table, "", &mut out).unwrap();
        run(&table, r#""""#, &mut out).unwrap();
        assert_eq!(out.get(), "\n\n");
    }

    #[test]
    fn help_cannot_be_overridden() {
        let table = CommandTable::new().with(CommandSpec::new("help", &[], "mine", |_, _| {
            anyhow::bail!("should not run")
        }));
        assert!(table.get("help").is_none());
        let mut out = StringWriter::new();
        run(&table, "help", &mut out).unwrap();
        assert_eq!(out.get(), "\n");
    }

    #[test]
    fn re_registering_keeps_position() {
        let table = CommandTable::new()
            .with(CommandSpec::new("a", &[], "first", |_, _| Ok(())))
            .with(CommandSpec::new("b", &[], "", |_, _| Ok(())))
            .with(CommandSpec::new("a", &["x"], "second", |_, _| Ok(())));
        let names: Vec<_> = table.iter().map(CommandSpec::name).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(table.get("a").unwrap().description(), "second");
        assert_eq!(table.command_names(), ["help", "a", "b"]);
    }

    #[test]
    fn handler_errors_are_wrapped() {
        let table = CommandTable::new().with(CommandSpec::new("fail", &[], "", |_, _| {
            anyhow::bail!("boom")
        }));
        let mut out = StringWriter::new();
        let err = run(&table, "fail", &mut out).unwrap_err();
        assert!(matches!(err, ShellError::Handler(_)));
        assert_eq!(err.to_string(), "boom");
    }
}
