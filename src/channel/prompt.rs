use std::io::{self, BufRead, StdinLock, Stdout, Write};
use thiserror::Error;

/// Errors raised while asking for channel details.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Failed to write prompt: {0}")]
    Write(#[source] io::Error),

    #[error("Failed to read answer: {0}")]
    Read(#[source] io::Error),
}

/// Source of interactive answers.
///
/// The console implementation is [`ConsolePrompter`]; tests can supply any
/// implementation that returns canned answers.
pub trait Prompter {
    /// Show `label` and return the answer, without the line terminator and
    /// surrounding whitespace. End of input reads as an empty answer.
    fn prompt(&mut self, label: &str) -> Result<String, PromptError>;

    /// Show an informational line that expects no answer.
    fn notice(&mut self, _message: &str) -> Result<(), PromptError> {
        Ok(())
    }
}

/// Line-oriented prompter: writes each label on its own line to `output`
/// and reads one line from `input`.
pub struct ConsolePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl ConsolePrompter<StdinLock<'static>, Stdout> {
    /// Prompter bound to the process's standard input and output.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter for ConsolePrompter<R, W> {
    fn prompt(&mut self, label: &str) -> Result<String, PromptError> {
        self.notice(label)?;

        let mut line = String::new();
        self.input.read_line(&mut line).map_err(PromptError::Read)?;
        Ok(line.trim().to_string())
    }

    fn notice(&mut self, message: &str) -> Result<(), PromptError> {
        writeln!(self.output, "{message}").map_err(PromptError::Write)?;
        self.output.flush().map_err(PromptError::Write)
    }
}
