use crate::io::IoImpl;
use std::io::{self, Write};
use termcolor::{ColorSpec, WriteColor};

/// A wrapper the provided facilities around standard input output and err
pub struct Stdio {
  stdio: Box<dyn StdioImpl>,
}

impl Default for Stdio {
  fn default() -> Self {
    Self {
      stdio: Box::new(StdioMock::default()),
    }
  }
}

impl Stdio {
  /// Create a new wrapper from the provided stdio facilities
  pub fn new(stdio: Box<dyn StdioImpl>) -> Self {
    Self { stdio }
  }

  /// Get a Write to stdout
  pub fn stdout(&mut self) -> &mut dyn Write {
    self.stdio.stdout()
  }

  /// Get a Write to stderr
  pub fn stderr(&mut self) -> &mut dyn Write {
    self.stdio.stderr()
  }

  /// Get a colored Write to stderr, used for rendering diagnostics
  pub fn stderr_color(&mut self) -> &mut dyn WriteColor {
    self.stdio.stderr_color()
  }

  /// Read a line of raw bytes from standard in, line break
  /// included. Returns `Ok(0)` once the input is exhausted
  pub fn read_line(&mut self, buffer: &mut Vec<u8>) -> io::Result<usize> {
    self.stdio.read_line(buffer)
  }
}

pub trait StdioImpl {
  fn stdout(&mut self) -> &mut dyn Write;
  fn stderr(&mut self) -> &mut dyn Write;
  fn stderr_color(&mut self) -> &mut dyn WriteColor;

  fn read_line(&mut self, buffer: &mut Vec<u8>) -> io::Result<usize>;
}

#[derive(Debug)]
pub struct IoStdioMock();

impl IoImpl<Stdio> for IoStdioMock {
  fn make(&self) -> Stdio {
    Stdio::new(Box::<StdioMock>::default())
  }
}

#[derive(Default)]
pub struct StdioMock {
  write: MockWrite,
}

impl StdioImpl for StdioMock {
  fn stdout(&mut self) -> &mut dyn Write {
    &mut self.write
  }
  fn stderr(&mut self) -> &mut dyn Write {
    &mut self.write
  }
  fn stderr_color(&mut self) -> &mut dyn WriteColor {
    &mut self.write
  }
  fn read_line(&mut self, _buffer: &mut Vec<u8>) -> io::Result<usize> {
    Ok(0)
  }
}

#[derive(Default)]
pub struct MockWrite();

impl Write for MockWrite {
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    Ok(buf.len())
  }
  fn flush(&mut self) -> io::Result<()> {
    Ok(())
  }
}

impl WriteColor for MockWrite {
  fn supports_color(&self) -> bool {
    false
  }
  fn set_color(&mut self, _spec: &ColorSpec) -> io::Result<()> {
    Ok(())
  }
  fn reset(&mut self) -> io::Result<()> {
    Ok(())
  }
}

pub mod support {
  use super::{Stdio, StdioImpl};
  use crate::io::IoImpl;
  use std::{
    cell::RefCell,
    collections::VecDeque,
    io::{self, Write},
    rc::Rc,
  };
  use termcolor::{ColorSpec, WriteColor};

  /// A buffer shared between a test and the stdio handed to the
  /// code under test
  #[derive(Debug, Default, Clone)]
  pub struct TestWriter(Rc<RefCell<Vec<u8>>>);

  impl TestWriter {
    /// The captured output as utf8
    pub fn contents(&self) -> String {
      String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
  }

  impl Write for TestWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
      self.0.borrow_mut().extend_from_slice(buf);
      Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
      Ok(())
    }
  }

  impl WriteColor for TestWriter {
    fn supports_color(&self) -> bool {
      false
    }
    fn set_color(&mut self, _spec: &ColorSpec) -> io::Result<()> {
      Ok(())
    }
    fn reset(&mut self) -> io::Result<()> {
      Ok(())
    }
  }

  #[derive(Debug, Default, Clone)]
  pub struct StdioTestContainer {
    pub stdout: TestWriter,
    pub stderr: TestWriter,
    lines: Rc<RefCell<VecDeque<Vec<u8>>>>,
  }

  impl StdioTestContainer {
    /// A container whose stdin yields each of the provided lines
    pub fn with_lines<L: Into<Vec<u8>>>(lines: Vec<L>) -> Self {
      Self {
        lines: Rc::new(RefCell::new(
          lines.into_iter().map(Into::<Vec<u8>>::into).collect(),
        )),
        ..Self::default()
      }
    }

    pub fn make_stdio(&self) -> StdioTest {
      StdioTest {
        stdout: self.stdout.clone(),
        stderr: self.stderr.clone(),
        lines: Rc::clone(&self.lines),
      }
    }
  }

  #[derive(Debug)]
  pub struct IoStdioTest {
    container: StdioTestContainer,
  }

  impl IoStdioTest {
    pub fn new(container: &StdioTestContainer) -> Self {
      Self {
        container: container.clone(),
      }
    }
  }

  impl IoImpl<Stdio> for IoStdioTest {
    fn make(&self) -> Stdio {
      Stdio::new(Box::new(self.container.make_stdio()))
    }
  }

  #[derive(Debug, Clone)]
  pub struct StdioTest {
    stdout: TestWriter,
    stderr: TestWriter,
    lines: Rc<RefCell<VecDeque<Vec<u8>>>>,
  }

  impl StdioImpl for StdioTest {
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
      match self.lines.borrow_mut().pop_front() {
        Some(line) => {
          buffer.extend_from_slice(&line);
          Ok(line.len())
        },
        None => Ok(0),
      }
    }
  }
}
