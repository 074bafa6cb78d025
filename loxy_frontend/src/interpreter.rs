use crate::{
  error::Diagnostics,
  scanner::scan,
  source::{FileId, LineOffsets, SourceFiles},
};
use codespan_reporting::{
  diagnostic::{Diagnostic, Label},
  files,
  term::{self, Config},
};
use loxy_env::{io::Io, stdio::Stdio};
use loxy_native::io::native_io;
use std::{
  borrow::Cow,
  io::{self, Write},
  path::{Path, PathBuf},
};
use termcolor::ColorChoice;
use thiserror::Error;
use tracing::{debug, error};

/// The file name prompt lines are reported under
pub const REPL_FILE: &str = "repl";

/// The prompt written before each line is read
pub const REPL_PROMPT: &str = "> ";

/// How lexical diagnostics are written to stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagnosticStyle {
  /// Rendered with the offending source line underlined
  #[default]
  Rich,

  /// A single `[line N] Error: message` line each
  Plain,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InterpreterConfig {
  pub style: DiagnosticStyle,
}

/// How a run of the interpreter ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpreterExit {
  Ok,
  Usage,
  DataError,
  NoInput,
  IoError,
}

impl InterpreterExit {
  /// The process exit code for this outcome
  pub fn code(self) -> i32 {
    match self {
      InterpreterExit::Ok => 0,
      InterpreterExit::Usage => 64,
      InterpreterExit::DataError => 65,
      InterpreterExit::NoInput => 66,
      InterpreterExit::IoError => 74,
    }
  }
}

/// Failures of the interpreter's own io. Lexical errors are
/// never reported through this type
#[derive(Error, Debug)]
pub enum InterpreterError {
  #[error("Could not read {}: {source}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Could not write output: {0}")]
  Write(#[from] io::Error),

  #[error("Could not render diagnostic: {0}")]
  Render(#[from] files::Error),
}

impl InterpreterError {
  pub fn exit(&self) -> InterpreterExit {
    match self {
      InterpreterError::Read { .. } => InterpreterExit::NoInput,
      InterpreterError::Write(_) | InterpreterError::Render(_) => InterpreterExit::IoError,
    }
  }
}

/// Create an interpreter wired to the process' stdio and file system
pub fn default_native_interpreter(color: ColorChoice, config: InterpreterConfig) -> Interpreter {
  Interpreter::new(native_io(color), config)
}

/// Drives the scanner over scripts and prompt lines, writing each
/// token to stdout and each lexical error to stderr
pub struct Interpreter {
  /// The io the interpreter reads and writes through
  io: Io,

  /// Every source scanned so far, for rendering diagnostics
  files: SourceFiles,

  config: InterpreterConfig,
}

impl Interpreter {
  pub fn new(io: Io, config: InterpreterConfig) -> Self {
    Self {
      io,
      files: SourceFiles::default(),
      config,
    }
  }

  /// Read and run the script at the provided path
  pub fn run_file(&mut self, path: &Path) -> InterpreterExit {
    debug!(path = %path.display(), "reading script");

    match self.io.fs().read_file(path) {
      Ok(source) => self.run(&path.to_string_lossy(), &source),
      Err(source) => self.fail(InterpreterError::Read {
        path: path.to_path_buf(),
        source,
      }),
    }
  }

  /// Run the provided source named `name`
  pub fn run(&mut self, name: &str, source: &[u8]) -> InterpreterExit {
    match self.run_source(name, source) {
      Ok(false) => InterpreterExit::Ok,
      Ok(true) => InterpreterExit::DataError,
      Err(err) => self.fail(err),
    }
  }

  /// Start the interactive prompt. Each line is run on its own
  /// and an erroneous line does not end the session
  pub fn repl(&mut self) -> InterpreterExit {
    let mut stdio = self.io.stdio();
    let mut buffer = Vec::new();

    loop {
      if let Err(err) = prompt(&mut stdio) {
        return self.fail(err.into());
      }

      buffer.clear();
      match stdio.read_line(&mut buffer) {
        Ok(0) => {
          debug!("prompt input exhausted");
          return InterpreterExit::Ok;
        },
        Ok(_) => {
          let exit = self.run(REPL_FILE, trim_line_break(&buffer));
          debug!(?exit, "ran prompt line");

          if exit == InterpreterExit::IoError {
            return exit;
          }
        },
        Err(err) => return self.fail(err.into()),
      }
    }
  }

  /// Scan a source, print its tokens and report its errors. Returns
  /// whether any lexical error occurred
  fn run_source(&mut self, name: &str, source: &[u8]) -> Result<bool, InterpreterError> {
    let result = scan(source);
    let mut stdio = self.io.stdio();

    let stdout = stdio.stdout();
    for token in &result.tokens {
      writeln!(stdout, "{}", token)?;
    }
    stdout.flush()?;

    if result.had_error() {
      // replacement characters move every offset after them
      let text = String::from_utf8_lossy(source);
      let line_offsets = match &text {
        Cow::Borrowed(_) => result.line_offsets.clone(),
        Cow::Owned(text) => LineOffsets::from_text(text),
      };

      let file_id = self.files.upsert(name, text, line_offsets);
      self.report(&mut stdio, file_id, &result.diagnostics)?;
    }

    Ok(result.had_error())
  }

  /// Write every diagnostic to stderr in the configured style
  fn report(
    &self,
    stdio: &mut Stdio,
    file_id: FileId,
    diagnostics: &Diagnostics,
  ) -> Result<(), InterpreterError> {
    match self.config.style {
      DiagnosticStyle::Plain => {
        let stderr = stdio.stderr();
        for diagnostic in diagnostics.iter() {
          writeln!(stderr, "{}", diagnostic)?;
        }
      },
      DiagnosticStyle::Rich => {
        let config = Config::default();
        for diagnostic in diagnostics.iter() {
          let span = self.files.line_span(file_id, diagnostic.line)?;
          let rendered = Diagnostic::error()
            .with_message(diagnostic.error.to_string())
            .with_labels(vec![Label::primary(file_id, span)
              .with_message(format!("error on line {}", diagnostic.line))]);

          term::emit(stdio.stderr_color(), &config, &self.files, &rendered)?;
        }
      },
    }

    Ok(())
  }

  /// Report an interpreter failure and produce its exit
  fn fail(&self, err: InterpreterError) -> InterpreterExit {
    error!(%err, "interpreter failure");

    if writeln!(self.io.stdio().stderr(), "{}", err).is_err() {
      error!("unable to write to stderr");
    }

    err.exit()
  }
}

/// Strip any trailing line feeds and carriage returns
fn trim_line_break(mut line: &[u8]) -> &[u8] {
  while let [rest @ .., b'\n' | b'\r'] = line {
    line = rest;
  }

  line
}

fn prompt(stdio: &mut Stdio) -> io::Result<()> {
  let stdout = stdio.stdout();
  write!(stdout, "{}", REPL_PROMPT)?;
  stdout.flush()
}
