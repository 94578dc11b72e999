use crate::completion::RustylineHelper;
use crate::error::ShellError;
use crate::outln;
use crate::output::Writer;
use log::{debug, info, warn};
use rustyline::error::ReadlineError;
use rustyline::history::FileHistory;
use rustyline::Editor;
use std::collections::VecDeque;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Supplies raw input lines to a session, one at a time
pub trait LineSource {
    /// Prompt for and return the next line, or `None` once input has ended
    fn next_line(&mut self, prompt: &str, out: &mut dyn Writer)
        -> Result<Option<String>, ShellError>;

    /// Release the underlying input
    fn close(&mut self) -> Result<(), ShellError> {
        Ok(())
    }
}

impl<S: LineSource + ?Sized> LineSource for Box<S> {
    fn next_line(
        &mut self,
        prompt: &str,
        out: &mut dyn Writer,
    ) -> Result<Option<String>, ShellError> {
        (**self).next_line(prompt, out)
    }

    fn close(&mut self) -> Result<(), ShellError> {
        (**self).close()
    }
}

/// Interactive terminal input through rustyline
///
/// The editor draws the prompt itself, straight on the terminal, and keeps
/// history that is loaded on creation and saved on close.
pub struct EditorSource {
    editor: Editor<RustylineHelper, FileHistory>,
    history: Option<PathBuf>,
}

impl EditorSource {
    /// Create an editor completing the given command names
    pub fn new(
        names: impl IntoIterator<Item = String>,
        history: Option<PathBuf>,
    ) -> Result<Self, ShellError> {
        let mut editor = Editor::new().map_err(|e| ShellError::Editor(e.to_string()))?;
        editor.set_helper(Some(RustylineHelper::new(names)));

        if let Some(path) = &history {
            // A missing history file is normal on first run
            if let Err(e) = editor.load_history(path) {
                debug!("no history loaded from {}: {}", path.display(), e);
            }
        }

        Ok(Self { editor, history })
    }
}

impl LineSource for EditorSource {
    fn next_line(
        &mut self,
        prompt: &str,
        _out: &mut dyn Writer,
    ) -> Result<Option<String>, ShellError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            // Ctrl+C or Ctrl+D
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(ShellError::Editor(e.to_string())),
        }
    }

    fn close(&mut self) -> Result<(), ShellError> {
        if let Some(path) = &self.history {
            if let Err(e) = self.editor.save_history(path) {
                warn!("could not save history to {}: {}", path.display(), e);
            }
        }
        Ok(())
    }
}

/// Line input from any buffered reader, prompting through the sink
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn next_line(
        &mut self,
        prompt: &str,
        out: &mut dyn Writer,
    ) -> Result<Option<String>, ShellError> {
        out.write_prompt(prompt)?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(strip_line_ending(&line).to_string()))
    }
}

/// Feeds script lines ahead of another source, as if they had been typed
///
/// Each replayed line is echoed after the prompt. Once the script is
/// exhausted every request goes to the wrapped source.
pub struct Replay<S> {
    pending: VecDeque<String>,
    inner: S,
}

impl<S: LineSource> Replay<S> {
    /// Replay `lines`, skipping empty ones
    pub fn new(lines: impl IntoIterator<Item = String>, inner: S) -> Self {
        Self {
            pending: lines.into_iter().filter(|line| !line.is_empty()).collect(),
            inner,
        }
    }

    /// Replay the lines of a script file
    pub fn from_path(path: &Path, inner: S) -> Result<Self, ShellError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ShellError::Script {
            path: path.to_path_buf(),
            source,
        })?;
        let lines = script_lines(&contents);
        info!("replaying {} lines from {}", lines.len(), path.display());
        Ok(Self::new(lines, inner))
    }

    /// Lines still waiting to be replayed
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl<S: LineSource> LineSource for Replay<S> {
    fn next_line(
        &mut self,
        prompt: &str,
        out: &mut dyn Writer,
    ) -> Result<Option<String>, ShellError> {
        match self.pending.pop_front() {
            Some(line) => {
                debug!("replaying: {}", line);
                out.write_prompt(prompt)?;
                outln!(out, "{}", line)?;
                Ok(Some(line))
            }
            None => self.inner.next_line(prompt, out),
        }
    }

    fn close(&mut self) -> Result<(), ShellError> {
        self.pending.clear();
        self.inner.close()
    }
}

/// Split script contents into the lines to replay
pub fn script_lines(contents: &str) -> Vec<String> {
    contents
        .split('\n')
        .map(strip_line_ending)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::StringWriter;
    use std::io::Cursor;

    fn drain(source: &mut dyn LineSource, out: &mut StringWriter) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = source.next_line("> ", out).unwrap() {
            lines.push(line);
        }
        lines
    }

    #[test]
    fn reader_source_prompts_and_strips_newlines() {
        let mut source = ReaderSource::new(Cursor::new("one\r\ntwo\n\nthree"));
        let mut out = StringWriter::new();
        assert_eq!(drain(&mut source, &mut out), ["one", "two", "", "three"]);
        assert_eq!(out.get(), "> > > > > ");
    }

    #[test]
    fn script_lines_skip_blanks() {
        assert_eq!(
            script_lines("create a b\n\nhelp\r\n\n"),
            ["create a b", "help"]
        );
    }

    #[test]
    fn replay_runs_before_inner_source() {
        let inner = ReaderSource::new(Cursor::new("typed\n"));
        let mut source = Replay::new(["first".to_string(), String::new(), "second".to_string()], inner);
        assert_eq!(source.pending(), 2);

        let mut out = StringWriter::new();
        assert_eq!(drain(&mut source, &mut out), ["first", "second", "typed"]);
        assert!(out.get().starts_with("> first\n> second\n> "));
    }

    #[test]
    fn replay_from_missing_file_fails() {
        let inner = ReaderSource::new(Cursor::new(""));
        let err = Replay::from_path(Path::new("/nonexistent/script.txt"), inner).err().unwrap();
        assert!(matches!(err, ShellError::Script { .. }));
    }

    #[test]
    fn closing_replay_drops_pending_lines() {
        let inner = ReaderSource::new(Cursor::new(""));
        let mut source = Replay::new(["a".to_string()], inner);
        source.close().unwrap();
        assert_eq!(source.pending(), 0);
    }
}
