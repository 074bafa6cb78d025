use std::fmt;
use thiserror::Error;
use tracing::trace;

/// The lexical errors the scanner can report. None of these
/// stop a scan
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexError {
  #[error("Unexpected character.")]
  UnexpectedCharacter,

  #[error("Unterminated string.")]
  UnterminatedString,
}

/// Receiver of diagnostics produced while scanning
pub trait ErrorSink {
  /// Report an error at the provided 1-based line
  fn error(&mut self, line: usize, error: LexError);

  /// Has any error been reported to this sink
  fn had_error(&self) -> bool;
}

/// A single reported lexical error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineDiagnostic {
  pub line: usize,
  pub error: LexError,
}

impl fmt::Display for LineDiagnostic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "[line {}] Error: {}", self.line, self.error)
  }
}

/// An error sink which collects every diagnostic in report order
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
  reported: Vec<LineDiagnostic>,
}

impl Diagnostics {
  pub fn new() -> Self {
    Self::default()
  }

  /// The diagnostics reported so far
  pub fn iter(&self) -> impl Iterator<Item = &LineDiagnostic> {
    self.reported.iter()
  }

  pub fn len(&self) -> usize {
    self.reported.len()
  }

  pub fn is_empty(&self) -> bool {
    self.reported.is_empty()
  }
}

impl ErrorSink for Diagnostics {
  fn error(&mut self, line: usize, error: LexError) {
    trace!(line, %error, "lexical error");
    self.reported.push(LineDiagnostic { line, error });
  }

  fn had_error(&self) -> bool {
    !self.reported.is_empty()
  }
}
