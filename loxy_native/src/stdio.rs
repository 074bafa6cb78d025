use loxy_env::{
  io::IoImpl,
  stdio::{Stdio, StdioImpl},
};
use std::io::{self, stdin, stdout, BufRead, Stdout, Write};
use termcolor::{ColorChoice, StandardStream, WriteColor};

#[derive(Debug)]
pub struct IoStdioNative {
  color: ColorChoice,
}

impl IoStdioNative {
  pub fn new(color: ColorChoice) -> Self {
    Self { color }
  }
}

impl IoImpl<Stdio> for IoStdioNative {
  fn make(&self) -> Stdio {
    Stdio::new(Box::new(NativeStdio::new(self.color)))
  }
}

pub struct NativeStdio {
  stdout: Stdout,
  stderr: StandardStream,
}

impl NativeStdio {
  pub fn new(color: ColorChoice) -> Self {
    Self {
      stdout: stdout(),
      stderr: StandardStream::stderr(color),
    }
  }
}

impl Default for NativeStdio {
  fn default() -> Self {
    Self::new(ColorChoice::Auto)
  }
}

impl StdioImpl for NativeStdio {
  fn stdout(&mut self) -> &mut dyn Write {
    &mut self.stdout
  }

  fn stderr(&mut self) -> &mut dyn Write {
    &mut self.stderr
  }

  fn stderr_color(&mut self) -> &mut dyn WriteColor {
    &mut self.stderr
  }

  fn read_line(&mut self, buffer: &mut Vec<u8>) -> io::Result<usize> {
    stdin().lock().read_until(b'\n', buffer)
  }
}
