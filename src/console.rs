//! Terminal interaction behind a small trait so prompts can be scripted in tests.

use std::io::{self, BufRead, Write};

use crate::error::Result;

/// Line-oriented user interaction.
pub trait Console {
    /// Shows `question` and returns the next line of input, trimmed.
    fn prompt(&mut self, question: &str) -> Result<String>;

    fn write_line(&mut self, line: &str) -> Result<()>;
}

/// [`Console`] backed by the process's stdin and stdout.
pub struct Terminal;

impl Console for Terminal {
    fn prompt(&mut self, question: &str) -> Result<String> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{question}")?;
        stdout.flush()?;

        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;
        Ok(input.trim().to_string())
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(io::stdout().lock(), "{line}")?;
        Ok(())
    }
}

/// Asks a yes/no question. Empty input or `y`/`Y` counts as yes.
pub fn confirm(console: &mut impl Console, question: &str) -> Result<bool> {
    let answer = console.prompt(question)?;
    Ok(answer.is_empty() || answer.eq_ignore_ascii_case("y"))
}
