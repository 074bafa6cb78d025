#![deny(clippy::all)]
use clap::{Parser, ValueEnum};
use loxy_frontend::interpreter::{
  default_native_interpreter, DiagnosticStyle, InterpreterConfig, InterpreterExit,
};
use std::{
  io::{stderr, IsTerminal},
  path::PathBuf,
  process,
};
use termcolor::ColorChoice;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Scan Lox scripts into tokens
#[derive(Parser, Debug)]
#[command(name = "loxy", version)]
struct Cli {
  /// Script to scan. Starts the prompt when omitted
  script: Option<PathBuf>,

  /// Report errors as `[line N] Error: message`
  #[arg(long)]
  plain: bool,

  /// When to color diagnostics
  #[arg(long, value_enum, default_value_t = Color::Auto)]
  color: Color,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Color {
  Auto,
  Always,
  Never,
}

impl Color {
  fn choice(self) -> ColorChoice {
    match self {
      Color::Auto if stderr().is_terminal() => ColorChoice::Auto,
      Color::Auto | Color::Never => ColorChoice::Never,
      Color::Always => ColorChoice::Always,
    }
  }
}

fn main() {
  tracing_subscriber::registry()
    .with(tracing_subscriber::fmt::layer().with_writer(stderr))
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")))
    .init();

  let cli = match Cli::try_parse() {
    Ok(cli) => cli,
    Err(err) => {
      let code = if err.use_stderr() {
        InterpreterExit::Usage.code()
      } else {
        InterpreterExit::Ok.code()
      };

      let _ = err.print();
      process::exit(code)
    },
  };

  let config = InterpreterConfig {
    style: if cli.plain {
      DiagnosticStyle::Plain
    } else {
      DiagnosticStyle::Rich
    },
  };
  debug!(?cli, "starting");

  let mut interpreter = default_native_interpreter(cli.color.choice(), config);
  let exit = match &cli.script {
    Some(path) => interpreter.run_file(path),
    None => interpreter.repl(),
  };

  process::exit(exit.code())
}
