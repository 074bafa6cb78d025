use loxy_env::{
  fs::{Fs, FsImpl},
  io::IoImpl,
};
use std::{fs::read, io, path::Path};

#[derive(Debug)]
pub struct IoFsNative();

impl IoImpl<Fs> for IoFsNative {
  fn make(&self) -> Fs {
    Fs::new(Box::new(FsNative()))
  }
}

#[derive(Clone, Default)]
pub struct FsNative();

impl FsImpl for FsNative {
  fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
    read(path)
  }
}
