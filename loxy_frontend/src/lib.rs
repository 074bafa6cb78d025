#![deny(clippy::all)]

pub mod ast;
pub mod ast_printer;
pub mod error;
pub mod interpreter;
pub mod keywords;
pub mod scanner;
pub mod source;
pub mod token;

pub use scanner::{scan, ScanResult, Scanner};
