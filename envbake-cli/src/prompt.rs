//! Line-based interactive prompts over any reader/writer pair.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `question` and return the trimmed answer. Closed input is an error.
    pub fn ask(&mut self, question: &str) -> Result<String> {
        match self.read_answer(question)? {
            Some(answer) => Ok(answer),
            None => bail!("no answer given to: {}", question.trim_end()),
        }
    }

    /// `y`/`yes` (any case) is yes; anything else, including closed input, is no.
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.read_answer(question)?.unwrap_or_default();
        Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    fn read_answer(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{question}").context("failed to write prompt")?;
        self.output.flush().context("failed to flush prompt")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read answer")?;
        if read == 0 {
            writeln!(self.output).context("failed to write prompt")?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
