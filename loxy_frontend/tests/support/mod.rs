use loxy_env::{
  fs::support::IoFsTest,
  io::Io,
  stdio::support::{IoStdioTest, StdioTestContainer},
};
use loxy_frontend::interpreter::{DiagnosticStyle, Interpreter, InterpreterConfig};
use std::fs::read_to_string;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub fn fixture_path(fixture_path: &str) -> PathBuf {
  Path::new(env!("CARGO_MANIFEST_DIR"))
    .parent()
    .map(|root| root.join("fixture"))
    .unwrap_or_else(|| PathBuf::from("fixture"))
    .join(fixture_path)
}

#[allow(dead_code)]
pub fn load_fixture(path: &str) -> io::Result<String> {
  read_to_string(fixture_path(path))
}

/// An interpreter writing to captured stdio, reading scripts from
/// the provided in memory files
#[allow(dead_code)]
pub fn test_interpreter(
  container: &StdioTestContainer,
  files: Vec<(PathBuf, Vec<u8>)>,
  style: DiagnosticStyle,
) -> Interpreter {
  let io = Io::default()
    .with_stdio(Rc::new(IoStdioTest::new(container)))
    .with_fs(Rc::new(IoFsTest::new(files)));

  Interpreter::new(io, InterpreterConfig { style })
}
