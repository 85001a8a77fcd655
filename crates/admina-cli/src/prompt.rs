//! Line-based confirmation for manual merge approval.

use std::io::{self, BufRead, StdinLock, Stderr, Write};

use admina_core::Confirm;

/// Writes the prompt to `output` and approves only on a line that is exactly
/// `y` once trimmed. EOF and read errors decline.
pub struct LineConfirm<R, W> {
  input:  R,
  output: W,
}

impl<R: BufRead, W: Write> LineConfirm<R, W> {
  pub fn new(input: R, output: W) -> Self { Self { input, output } }
}

impl LineConfirm<StdinLock<'static>, Stderr> {
  /// Prompt on stderr so stdout stays clean for results.
  pub fn stdio() -> Self { Self::new(io::stdin().lock(), io::stderr()) }
}

impl<R: BufRead, W: Write> Confirm for LineConfirm<R, W> {
  fn confirm(&mut self, prompt: &str) -> bool {
    let _ = write!(self.output, "{prompt}");
    let _ = self.output.flush();

    let mut line = String::new();
    match self.input.read_line(&mut line) {
      Ok(0) | Err(_) => false,
      Ok(_) => line.trim() == "y",
    }
  }
}
