use std::{
    borrow::Cow,
    io::{self, Write as _},
};

use crate::exception::{ExcType, Exception};

/// Trait for handling output printed by function bodies.
///
/// Implement this trait to capture or redirect what a called function prints.
/// The default implementation `StdPrint` writes to stdout.
pub trait PrintWriter {
    /// Writes text without separators or a trailing newline.
    fn stdout_write(&mut self, output: Cow<'_, str>) -> Result<(), Exception>;

    /// Add a single character to stdout.
    ///
    /// Generally called to add spaces and newlines within print output.
    fn stdout_push(&mut self, end: char) -> Result<(), Exception>;

    /// Writes one line, like `print(line)`.
    fn print_line(&mut self, line: &str) -> Result<(), Exception> {
        self.stdout_write(Cow::Borrowed(line))?;
        self.stdout_push('\n')
    }
}

/// Default `PrintWriter` that writes to stdout.
#[derive(Debug, Default)]
pub struct StdPrint;

fn os_error(err: &io::Error) -> Exception {
    Exception::new(ExcType::OSError, err.to_string())
}

impl PrintWriter for StdPrint {
    fn stdout_write(&mut self, output: Cow<'_, str>) -> Result<(), Exception> {
        io::stdout().write_all(output.as_bytes()).map_err(|e| os_error(&e))
    }

    fn stdout_push(&mut self, end: char) -> Result<(), Exception> {
        let mut buf = [0u8; 4];
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(end.encode_utf8(&mut buf).as_bytes())
            .map_err(|e| os_error(&e))?;
        if end == '\n' {
            stdout.flush().map_err(|e| os_error(&e))?;
        }
        Ok(())
    }
}

/// A `PrintWriter` that collects all output into a string.
///
/// Useful for testing or capturing print output programmatically.
#[derive(Debug, Default)]
pub struct CollectStringPrint(String);

impl CollectStringPrint {
    /// Creates a new empty `CollectStringPrint`.
    #[must_use]
    pub fn new() -> Self {
        Self(String::new())
    }

    /// Returns the collected output as a string slice.
    #[must_use]
    pub fn output(&self) -> &str {
        self.0.as_str()
    }

    /// Consumes the writer and returns the collected output.
    #[must_use]
    pub fn into_output(self) -> String {
        self.0
    }
}

impl PrintWriter for CollectStringPrint {
    fn stdout_write(&mut self, output: Cow<'_, str>) -> Result<(), Exception> {
        self.0.push_str(&output);
        Ok(())
    }

    fn stdout_push(&mut self, end: char) -> Result<(), Exception> {
        self.0.push(end);
        Ok(())
    }
}

/// `PrintWriter` that ignores all output.
#[derive(Debug, Default)]
pub struct NoPrint;

impl PrintWriter for NoPrint {
    fn stdout_write(&mut self, _output: Cow<'_, str>) -> Result<(), Exception> {
        Ok(())
    }

    fn stdout_push(&mut self, _end: char) -> Result<(), Exception> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_string_print_gathers_lines() {
        let mut print = CollectStringPrint::new();
        print.print_line("first").unwrap();
        print.stdout_write(Cow::Borrowed("a")).unwrap();
        print.stdout_push(' ').unwrap();
        print.stdout_write(Cow::Owned("b".to_owned())).unwrap();
        assert_eq!(print.into_output(), "first\na b");
    }
}
