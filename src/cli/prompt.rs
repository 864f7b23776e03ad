//! Line-oriented prompting over any reader/writer pair.

use std::io::{BufRead, Write};

use crate::error::{RecError, Result};
use crate::query::{Confirm, FilterField};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `question` and read one trimmed answer. End of input reads as
    /// a blank answer.
    pub fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{question}").map_err(prompt_error)?;
        self.output.flush().map_err(prompt_error)?;

        let mut answer = String::new();
        self.input.read_line(&mut answer).map_err(prompt_error)?;
        Ok(answer.trim().to_string())
    }

    /// Ask a yes/no question; anything starting with `y` is yes.
    pub fn yes_no(&mut self, question: &str) -> Result<bool> {
        let answer = self.ask(&format!("{question} (y/n): "))?;
        Ok(answer.to_lowercase().starts_with('y'))
    }

    pub fn say(&mut self, line: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", line.as_ref()).map_err(prompt_error)
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Confirm for Prompter<R, W> {
    fn confirm(&mut self, _field: FilterField, raw: &str, suggestion: &str) -> Result<bool> {
        self.yes_no(&format!("'{raw}' not found. Did you mean '{suggestion}'?"))
    }
}

fn prompt_error(err: std::io::Error) -> RecError {
    RecError::Prompt(err.to_string())
}
