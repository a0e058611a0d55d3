//! Terminal dialogs.
//!
//! A console is anything that can both print command output and show the
//! controller's dialogs.

use std::io::{self, BufRead, Write};

use bazaar_storefront::controller::Prompt;

/// Output plus dialogs.
pub trait Console: Prompt + Write {}

impl<T: Prompt + Write> Console for T {}

/// Dialogs on a line-oriented terminal.
///
/// Alerts are printed; confirmations print the question and read one line,
/// accepting `y` or `yes`. Session events are read from the same input, so
/// a confirmation consumes the line after the event that asked for it.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read one line without its terminator. `None` at end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

impl<R, W: Write> Write for Terminal<R, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }
}

impl<R: BufRead, W: Write> Prompt for Terminal<R, W> {
    fn alert(&mut self, message: &str) {
        if let Err(e) = writeln!(self.output, "{message}") {
            tracing::warn!(error = %e, "Failed to show alert");
        }
    }

    fn confirm(&mut self, message: &str) -> bool {
        if let Err(e) = write!(self.output, "{message} [y/N] ").and_then(|()| self.output.flush())
        {
            tracing::warn!(error = %e, "Failed to show confirmation");
            return false;
        }

        match self.read_line() {
            Ok(Some(answer)) => is_yes(&answer),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read confirmation");
                false
            }
        }
    }
}

/// Dialogs that accept every confirmation, for `--yes` and one-shot
/// commands that never ask.
pub struct AssumeYes<W> {
    output: W,
}

impl<W: Write> AssumeYes<W> {
    pub const fn new(output: W) -> Self {
        Self { output }
    }
}

impl<W: Write> Write for AssumeYes<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }
}

impl<W: Write> Prompt for AssumeYes<W> {
    fn alert(&mut self, message: &str) {
        if let Err(e) = writeln!(self.output, "{message}") {
            tracing::warn!(error = %e, "Failed to show alert");
        }
    }

    fn confirm(&mut self, message: &str) -> bool {
        if let Err(e) = writeln!(self.output, "{message} [y/N] y") {
            tracing::warn!(error = %e, "Failed to show confirmation");
        }
        true
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
