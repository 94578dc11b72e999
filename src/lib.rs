//! A small interactive command shell.
//!
//! Lines come from a [`input::LineSource`], are split by [`command::tokenize`]
//! and routed by a [`table::CommandTable`] to caller-supplied handlers. All
//! user-facing text goes through an [`output::Writer`] that can be swapped at
//! any time. [`shell::Session`] ties these together.

pub mod builtin;
pub mod command;
pub mod completion;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod shell;
pub mod table;

pub use error::ShellError;
pub use shell::Session;
pub use table::{CommandContext, CommandSpec, CommandTable};
