//! Console implementation of the player interaction.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use colored::Colorize;
use tw_story::Interaction;

/// Reads answers from `input` and writes story text to `output`.
pub struct ConsoleInteraction<R, W> {
    input: R,
    output: W,
    line: String,
}

impl ConsoleInteraction<StdinLock<'static>, Stdout> {
    /// A console over the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleInteraction<R, W> {
    /// Wrap an input and an output stream.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            line: String::new(),
        }
    }

    /// Show `label` and read one line. `None` at end of input.
    fn read_answer(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label.bold())?;
        self.output.flush()?;

        self.line.clear();
        if self.input.read_line(&mut self.line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(self.line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl<R: BufRead, W: Write> Interaction for ConsoleInteraction<R, W> {
    fn render_line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    fn prompt_line(&mut self, label: &str) -> io::Result<String> {
        self.read_answer(label)?
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"))
    }

    fn await_acknowledge(&mut self, label: &str) -> io::Result<()> {
        // End of input counts as acknowledgment so piped sessions can finish.
        self.read_answer(label).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn console(input: &str) -> ConsoleInteraction<&[u8], Vec<u8>> {
        colored::control::set_override(false);
        ConsoleInteraction::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn prompt_strips_line_ending() {
        let mut c = console("a\r\nb\n");
        assert_eq!(c.prompt_line("> ").unwrap(), "a");
        assert_eq!(c.prompt_line("> ").unwrap(), "b");
    }

    #[test]
    fn prompt_at_eof_fails() {
        let mut c = console("");
        let err = c.prompt_line("> ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn acknowledge_at_eof_succeeds() {
        let mut c = console("");
        assert!(c.await_acknowledge("Press Enter...").is_ok());
    }

    #[test]
    fn output_contains_lines_and_labels() {
        let mut c = console("\n");
        c.render_line("Hello").unwrap();
        c.await_acknowledge("Continue").unwrap();
        let out = String::from_utf8(c.output).unwrap();
        assert!(out.starts_with("Hello\n"));
        assert!(out.contains("Continue"));
    }
}
