use crate::io::IoImpl;
use std::{io, path::Path};

/// A wrapper around file system facilities provided to Loxy
pub struct Fs {
  fs: Box<dyn FsImpl>,
}

impl Default for Fs {
  fn default() -> Self {
    Self {
      fs: Box::new(FsMock()),
    }
  }
}

impl Fs {
  /// Create a new file system wrapper
  pub fn new(fs: Box<dyn FsImpl>) -> Self {
    Self { fs }
  }

  /// Read the raw bytes of a file. No decoding is attempted
  pub fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
    self.fs.read_file(path)
  }
}

pub trait FsImpl {
  fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;
}

#[derive(Debug)]
pub struct IoFsMock();

impl IoImpl<Fs> for IoFsMock {
  fn make(&self) -> Fs {
    Fs::new(Box::new(FsMock()))
  }
}

pub struct FsMock();

impl FsImpl for FsMock {
  fn read_file(&self, _path: &Path) -> io::Result<Vec<u8>> {
    Ok(b"var x = 10;".to_vec())
  }
}

pub mod support {
  use super::{Fs, FsImpl};
  use crate::io::IoImpl;
  use std::{
    collections::HashMap,
    io,
    path::{Path, PathBuf},
    rc::Rc,
  };

  /// An in memory file system for tests. Paths not registered
  /// report `NotFound`
  #[derive(Debug, Default, Clone)]
  pub struct IoFsTest {
    files: Rc<HashMap<PathBuf, Vec<u8>>>,
  }

  impl IoFsTest {
    pub fn new(files: Vec<(PathBuf, Vec<u8>)>) -> Self {
      Self {
        files: Rc::new(files.into_iter().collect()),
      }
    }
  }

  impl IoImpl<Fs> for IoFsTest {
    fn make(&self) -> Fs {
      Fs::new(Box::new(FsTest {
        files: Rc::clone(&self.files),
      }))
    }
  }

  struct FsTest {
    files: Rc<HashMap<PathBuf, Vec<u8>>>,
  }

  impl FsImpl for FsTest {
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
      self.files.get(path).cloned().ok_or_else(|| {
        io::Error::new(
          io::ErrorKind::NotFound,
          format!("No such file {}", path.display()),
        )
      })
    }
  }
}
