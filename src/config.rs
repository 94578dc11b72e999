use argh::FromArgs;
use std::path::PathBuf;

pub const DEFAULT_PROMPT: &str = "cmdnode> ";

/// Interactive command shell. Pass a script file to replay its lines at startup.
#[derive(FromArgs, Debug)]
pub struct Args {
    /// script whose lines are fed in as if typed, before interactive input
    #[argh(positional)]
    pub script: Option<PathBuf>,

    /// prompt shown before each line
    #[argh(option, default = "DEFAULT_PROMPT.to_string()")]
    pub prompt: String,

    /// file used to load and save command history
    #[argh(option)]
    pub history: Option<PathBuf>,
}

/// Settings for one shell run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub prompt: String,
    pub history: Option<PathBuf>,
    pub script: Option<PathBuf>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            history: None,
            script: None,
        }
    }
}

impl From<Args> for ShellConfig {
    fn from(args: Args) -> Self {
        Self {
            prompt: args.prompt,
            history: args.history,
            script: args.script,
        }
    }
}
