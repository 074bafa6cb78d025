use crate::{fs::IoFsNative, stdio::IoStdioNative};
use loxy_env::io::Io;
use std::rc::Rc;
use termcolor::ColorChoice;

/// Io backed by the process' standard streams and file system
pub fn native_io(color: ColorChoice) -> Io {
  Io::new(Rc::new(IoStdioNative::new(color)), Rc::new(IoFsNative()))
}
