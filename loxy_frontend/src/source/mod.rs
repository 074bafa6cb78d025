mod files;
pub use files::{FileId, LineError, LineOffsets, SourceFiles};

use bumpalo::{boxed::Box, Bump};
use std::ops::Deref;

/// A unit of source text along with the arena its syntax
/// nodes are allocated in
pub struct Source {
  content: String,
  alloc: Bump,
}

impl Source {
  pub fn new(content: impl Into<String>) -> Self {
    let content = content.into();
    let alloc = Bump::with_capacity(content.len() * 2);

    Self { content, alloc }
  }

  /// Allocate a node in this source's arena
  pub fn node<T>(&self, node: T) -> Box<T> {
    Box::new_in(node, &self.alloc)
  }
}

impl Deref for Source {
  type Target = str;

  fn deref(&self) -> &Self::Target {
    &self.content
  }
}

impl AsRef<str> for Source {
  fn as_ref(&self) -> &str {
    self
  }
}
