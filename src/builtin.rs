//! Ready-made handlers for common commands.

use crate::outln;
use crate::table::CommandContext;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

pub const NOT_IMPLEMENTED: &str = "This feature has not been fully implemented yet.";

/// Handler that only announces which command ran
pub fn print_name(
    name: &str,
) -> impl Fn(&[String], &mut CommandContext<'_>) -> anyhow::Result<()> + 'static {
    let name = name.to_string();
    move |_args, ctx| {
        outln!(ctx.out(), "Executing: {}", name)?;
        Ok(())
    }
}

/// Handler for commands that exist in the table but do nothing yet
pub fn not_implemented(
) -> impl Fn(&[String], &mut CommandContext<'_>) -> anyhow::Result<()> + 'static {
    |_args, ctx| {
        outln!(ctx.out(), "{}", NOT_IMPLEMENTED)?;
        Ok(())
    }
}

/// Handler that prints one branch of a JSON configuration
///
/// A missing branch prints `null`.
pub fn show_config(
    config: Value,
    branch: &str,
) -> impl Fn(&[String], &mut CommandContext<'_>) -> anyhow::Result<()> + 'static {
    let branch = branch.to_string();
    move |_args, ctx| {
        let selected = config.get(&branch).unwrap_or(&Value::Null);
        outln!(
            ctx.out(),
            "\nConfig:\n--------------------------------\n\n{}",
            to_pretty_json(selected)?
        )?;
        Ok(())
    }
}

/// JSON with a four-space indent
fn to_pretty_json(value: &Value) -> anyhow::Result<String> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf)?)
}
