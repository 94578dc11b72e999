use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error types for shell operations
///
/// `WrongArity`, `UnrecognizedCommand` and `Handler` are reported to the user
/// through the output sink and never end the session. The rest are returned
/// to whoever drives the session.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Supplied argument count differs from the command's parameter list
    #[error("Wrong number of parameters. Expected: {expected:?}")]
    WrongArity { expected: Vec<String> },
    /// First token matches no registered command
    #[error("Unrecognized command")]
    UnrecognizedCommand(String),
    /// A command handler returned an error
    #[error(transparent)]
    Handler(anyhow::Error),
    /// I/O operation on the output sink or input stream failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Rustyline editor error
    #[error("Editor error: {0}")]
    Editor(String),
    /// Script file could not be read
    #[error("cannot read script {}: {source}", .path.display())]
    Script { path: PathBuf, source: io::Error },
    /// The session was destroyed
    #[error("session has been destroyed")]
    SessionClosed,
}

impl ShellError {
    /// Short name of the error kind, shown as the `Code` by `handle_error`.
    pub fn code(&self) -> &'static str {
        match self {
            ShellError::WrongArity { .. } => "WrongArity",
            ShellError::UnrecognizedCommand(_) => "UnrecognizedCommand",
            ShellError::Handler(_) => "HandlerError",
            ShellError::Io(_) => "IoError",
            ShellError::Editor(_) => "EditorError",
            ShellError::Script { .. } => "ScriptError",
            ShellError::SessionClosed => "SessionClosed",
        }
    }

    /// Whether the error is shown to the user and the session keeps going.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ShellError::WrongArity { .. }
                | ShellError::UnrecognizedCommand(_)
                | ShellError::Handler(_)
        )
    }
}
