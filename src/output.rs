use crate::error::ShellError;
use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

/// Destination for everything the user sees: prompts, help, feedback, errors.
pub trait Writer {
    /// Write one formatted line; a newline is appended.
    fn write_line(&mut self, args: fmt::Arguments<'_>) -> io::Result<()>;

    /// Write the prompt without a trailing newline.
    fn write_prompt(&mut self, prompt: &str) -> io::Result<()>;
}

/// Write a formatted line to a [`Writer`], `println!` style.
///
/// ```
/// use cmdnode::output::StringWriter;
/// use cmdnode::outln;
///
/// let mut out = StringWriter::new();
/// outln!(out, "Executing: {}", "create").unwrap();
/// assert_eq!(out.get(), "Executing: create\n");
/// ```
#[macro_export]
macro_rules! outln {
    ($out:expr) => {{
        use $crate::output::Writer as _;
        $out.write_line(format_args!(""))
    }};
    ($out:expr, $($arg:tt)*) => {{
        use $crate::output::Writer as _;
        $out.write_line(format_args!($($arg)*))
    }};
}

/// Adapter turning any `io::Write` into a [`Writer`]
pub struct IoWriter<W> {
    inner: W,
}

impl<W: Write> IoWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl IoWriter<io::Stdout> {
    /// The default sink: the process's standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Writer for IoWriter<W> {
    fn write_line(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        self.inner.write_fmt(args)?;
        self.inner.write_all(b"\n")?;
        self.inner.flush()
    }

    fn write_prompt(&mut self, prompt: &str) -> io::Result<()> {
        self.inner.write_all(prompt.as_bytes())?;
        self.inner.flush()
    }
}

/// In-memory sink for capturing output
///
/// Clones share the same buffer, so one clone can be handed to a session
/// while another is kept to inspect what was written.
#[derive(Clone, Default)]
pub struct StringWriter {
    buf: Rc<RefCell<String>>,
}

impl StringWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far
    pub fn get(&self) -> String {
        self.buf.borrow().clone()
    }

    pub fn reset(&self) {
        self.buf.borrow_mut().clear();
    }
}

impl Writer for StringWriter {
    fn write_line(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        let mut buf = self.buf.borrow_mut();
        fmt::Write::write_fmt(&mut *buf, args)
            .map_err(|_| io::Error::other("formatting failed"))?;
        buf.push('\n');
        Ok(())
    }

    fn write_prompt(&mut self, prompt: &str) -> io::Result<()> {
        self.buf.borrow_mut().push_str(prompt);
        Ok(())
    }
}

/// Show the code and message of an error through the sink
pub fn handle_error(
    out: &mut dyn Writer,
    error: &(dyn std::error::Error + 'static),
) -> io::Result<()> {
    let code = error
        .downcast_ref::<ShellError>()
        .map(ShellError::code)
        .unwrap_or("Error");
    outln!(
        out,
        "\nError:\n--------------------------------\nCode: {}\nMessage: {}\n",
        code,
        error
    )
}
