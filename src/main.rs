use anyhow::Context;
use cmdnode::builtin::{not_implemented, print_name, show_config};
use cmdnode::config::{Args, ShellConfig};
use cmdnode::input::{EditorSource, LineSource, Replay};
use cmdnode::output::IoWriter;
use cmdnode::{outln, CommandSpec, CommandTable, Session};
use serde_json::json;

fn command_table(config: &ShellConfig) -> CommandTable {
    let settings = json!({
        "shell": {
            "prompt": config.prompt,
            "history": config.history.as_ref().map(|p| p.display().to_string()),
            "script": config.script.as_ref().map(|p| p.display().to_string()),
        }
    });

    CommandTable::new()
        .with(CommandSpec::new(
            "echo",
            &["text"],
            "\tPrint the text back. Quote it to include spaces.",
            |args, ctx| {
                outln!(ctx.out(), "{}", args[0])?;
                Ok(())
            },
        ))
        .with(CommandSpec::new(
            "config",
            &[],
            "\tShow the shell configuration.",
            show_config(settings, "shell"),
        ))
        .with(CommandSpec::new(
            "version",
            &[],
            "\tShow the program version.",
            print_name(concat!("cmdnode ", env!("CARGO_PKG_VERSION"))),
        ))
        .with(CommandSpec::new(
            "upload",
            &["file"],
            "\tUpload a file to the remote end.",
            not_implemented(),
        ))
        .with(CommandSpec::new(
            "quit",
            &[],
            "\tExit the shell.",
            |_args, ctx| {
                ctx.destroy();
                Ok(())
            },
        ))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = ShellConfig::from(argh::from_env::<Args>());
    let table = command_table(&config);

    let editor = EditorSource::new(table.command_names(), config.history.clone())?;
    let source: Box<dyn LineSource> = match &config.script {
        Some(path) => Box::new(Replay::from_path(path, editor)?),
        None => Box::new(editor),
    };

    let mut session = Session::initialize(table, &config.prompt, source, IoWriter::stdout());
    session.run().context("shell session failed")?;
    session.destroy()?;
    Ok(())
}
