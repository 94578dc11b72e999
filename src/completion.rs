use rustyline_derive::{Helper, Highlighter, Hinter, Validator};

/// Completes the command name at the start of the line
///
/// Only the first word is completed: arguments are free-form and owned by
/// the handlers.
pub struct CommandCompleter {
    names: Vec<String>,
}

impl CommandCompleter {
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        let mut names: Vec<String> = names.into_iter().collect();
        names.sort();
        names.dedup();
        Self { names }
    }

    /// Completion for a partially typed command name
    ///
    /// Returns:
    /// - a single match: the full name with a trailing space
    /// - several matches sharing a prefix longer than the input: that prefix
    /// - otherwise: every match, for rustyline to list
    pub fn candidates(&self, prefix: &str) -> Vec<String> {
        let matches: Vec<&String> = self
            .names
            .iter()
            .filter(|name| name.starts_with(prefix))
            .collect();

        match matches.as_slice() {
            [] => Vec::new(),
            [only] => vec![format!("{only} ")],
            [first, rest @ ..] => {
                let mut common = first.to_string();
                for name in rest {
                    while !name.starts_with(&common) {
                        common.pop();
                    }
                }
                if common.len() > prefix.len() {
                    vec![common]
                } else {
                    matches.iter().map(|name| name.to_string()).collect()
                }
            }
        }
    }
}

/// Rustyline helper wiring [`CommandCompleter`] into the editor
#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct RustylineHelper {
    completer: CommandCompleter,
}

impl RustylineHelper {
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        Self {
            completer: CommandCompleter::new(names),
        }
    }
}

impl rustyline::completion::Completer for RustylineHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        let head = &line[..pos];
        let word_start = head.len() - head.trim_start().len();
        let word = &head[word_start..];

        // Past the command name
        if word.contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }
        Ok((word_start, self.completer.candidates(word)))
    }
}

#[cfg(test)]
mod tests {
    use super::CommandCompleter;

    fn completer() -> CommandCompleter {
        CommandCompleter::new(
            ["help", "create", "cancel", "config", "connect", "create"]
                .into_iter()
                .map(String::from),
        )
    }

    #[test]
    fn single_match_gets_trailing_space() {
        assert_eq!(completer().candidates("he"), ["help "]);
    }

    #[test]
    fn shared_prefix_is_extended() {
        assert_eq!(completer().candidates("co"), ["con"]);
        assert_eq!(completer().candidates("conf"), ["config "]);
    }

    #[test]
    fn ambiguous_prefix_lists_matches() {
        assert_eq!(completer().candidates("c"), ["cancel", "config", "connect", "create"]);
    }

    #[test]
    fn no_match() {
        assert!(completer().candidates("x").is_empty());
    }
}
