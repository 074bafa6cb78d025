use crate::{
  fs::{Fs, IoFsMock},
  stdio::{IoStdioMock, Stdio},
};
use std::{fmt, rc::Rc};

#[derive(Debug)]
/// A struct wrapping the externally provided io to Loxy
pub struct Io {
  stdio_impl: Rc<dyn IoImpl<Stdio>>,
  fs_impl: Rc<dyn IoImpl<Fs>>,
}

impl Default for Io {
  fn default() -> Self {
    Self {
      stdio_impl: Rc::new(IoStdioMock()),
      fs_impl: Rc::new(IoFsMock()),
    }
  }
}

impl Io {
  /// Create a new io wrapper uses the provided io impl
  pub fn new(stdio_impl: Rc<dyn IoImpl<Stdio>>, fs_impl: Rc<dyn IoImpl<Fs>>) -> Self {
    Self {
      stdio_impl,
      fs_impl,
    }
  }

  /// Replace this stdio implementation
  pub fn with_stdio(self, stdio_impl: Rc<dyn IoImpl<Stdio>>) -> Self {
    Self {
      stdio_impl,
      fs_impl: self.fs_impl,
    }
  }

  /// Replace this fs implementation
  pub fn with_fs(self, fs_impl: Rc<dyn IoImpl<Fs>>) -> Self {
    Self {
      stdio_impl: self.stdio_impl,
      fs_impl,
    }
  }

  /// Generate a wrapper to stdio facilities
  pub fn stdio(&self) -> Stdio {
    self.stdio_impl.make()
  }

  /// Generate a wrapper to file system facilities
  pub fn fs(&self) -> Fs {
    self.fs_impl.make()
  }
}

impl Clone for Io {
  fn clone(&self) -> Self {
    Io::new(Rc::clone(&self.stdio_impl), Rc::clone(&self.fs_impl))
  }
}

pub trait IoImpl<T>: fmt::Debug {
  fn make(&self) -> T;
}
