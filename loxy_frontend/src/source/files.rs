use std::ops::Range;

use codespan_reporting::files;
use fnv::FnvBuildHasher;
use hashbrown::HashMap;

/// A struct for efficiently determine lines for an associated
/// file.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LineOffsets {
  /// The offsets where each line begins in the associated file
  offsets: Vec<usize>,

  /// The full length of the file
  len: usize,
}

#[derive(Debug, PartialEq)]
pub enum LineError {
  OffsetOutOfBounds,
  LineOutOfBounds,
}

impl LineOffsets {
  /// Create a new instance of LineOffsets
  ///
  /// # Examples
  /// ```
  /// use loxy_frontend::source::LineOffsets;
  ///
  /// let offsets = LineOffsets::new(vec![0, 10], 20);
  /// ```
  pub fn new(offsets: Vec<usize>, len: usize) -> Self {
    assert!(!offsets.is_empty());
    assert!(*offsets.last().unwrap_or(&0) <= len);

    Self { offsets, len }
  }

  /// Catalog the lines of already decoded text, a line starting
  /// after each line feed
  ///
  /// # Examples
  /// ```
  /// use loxy_frontend::source::LineOffsets;
  ///
  /// let offsets = LineOffsets::from_text("a\nbc\n");
  /// assert_eq!(offsets, LineOffsets::new(vec![0, 2, 5], 5));
  /// ```
  pub fn from_text(text: &str) -> Self {
    let mut offsets = vec![0];
    offsets.extend(text.match_indices('\n').map(|(index, _)| index + 1));

    Self::new(offsets, text.len())
  }

  /// Retrieve the total number of lines cataloged
  ///
  /// # Examples
  /// ```
  /// use loxy_frontend::source::LineOffsets;
  ///
  /// let offsets = LineOffsets::new(vec![0, 10], 20);
  /// assert_eq!(offsets.lines(), 2);
  /// ```
  pub fn lines(&self) -> usize {
    self.offsets.len()
  }

  /// What 0-based line is the provided offset located at
  ///
  /// # Examples
  /// ```
  /// use loxy_frontend::source::{LineOffsets, LineError};
  ///
  /// let offsets = LineOffsets::new(vec![0, 10], 20);
  /// assert_eq!(offsets.offset_line(0), Ok(0));
  /// assert_eq!(offsets.offset_line(5), Ok(0));
  /// assert_eq!(offsets.offset_line(11), Ok(1));
  /// assert_eq!(offsets.offset_line(20), Ok(1));
  /// assert_eq!(offsets.offset_line(25), Err(LineError::OffsetOutOfBounds));
  /// ```
  pub fn offset_line(&self, offset: usize) -> Result<usize, LineError> {
    if offset > self.len {
      return Err(LineError::OffsetOutOfBounds);
    }

    Ok(match self.offsets.binary_search(&offset) {
      Ok(line) => line,
      Err(line) => line - 1,
    })
  }

  /// Get the offset range bounding a 0-based line, line break included
  ///
  /// # Examples
  /// ```
  /// use loxy_frontend::source::{LineOffsets, LineError};
  ///
  /// let offsets = LineOffsets::new(vec![0, 10], 20);
  /// assert_eq!(offsets.line_range(0), Ok(0..10));
  /// assert_eq!(offsets.line_range(1), Ok(10..20));
  /// assert_eq!(offsets.line_range(2), Err(LineError::LineOutOfBounds));
  /// ```
  pub fn line_range(&self, line: usize) -> Result<Range<usize>, LineError> {
    if line >= self.lines() {
      return Err(LineError::LineOutOfBounds);
    }

    if line == self.lines() - 1 {
      Ok(self.offsets[line]..self.len)
    } else {
      Ok(self.offsets[line]..self.offsets[line + 1])
    }
  }
}

/// A file known to the file database
struct SourceFile {
  /// The name of this file
  name: String,

  /// The full source of this file
  source: String,

  /// The line offsets for this file
  line_offsets: LineOffsets,
}

/// A unique id to a `SourceFile`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileId(usize);

/// A file database diagnostics are rendered against
#[derive(Default)]
pub struct SourceFiles {
  files: Vec<SourceFile>,

  /// A map between file names and their ids
  name_map: HashMap<String, usize, FnvBuildHasher>,
}

impl SourceFiles {
  /// Insert or update a file into the file database. Returns the
  /// `FileId` for the new file or updated file.
  ///
  /// # Examples
  /// ```
  /// use loxy_frontend::source::{SourceFiles, LineOffsets};
  ///
  /// let mut files = SourceFiles::default();
  /// let id1 = files.upsert("first.lox", "var x = 10;", LineOffsets::new(vec![0], 11));
  /// let id2 = files.upsert("second.lox", "var x = 10;", LineOffsets::new(vec![0], 11));
  /// let id3 = files.upsert("first.lox", "print x;", LineOffsets::new(vec![0], 8));
  ///
  /// assert_ne!(id1, id2);
  /// assert_eq!(id1, id3);
  /// ```
  pub fn upsert(
    &mut self,
    name: impl Into<String>,
    source: impl Into<String>,
    line_offsets: LineOffsets,
  ) -> FileId {
    let file = SourceFile {
      name: name.into(),
      source: source.into(),
      line_offsets,
    };

    match self.name_map.get(&file.name) {
      Some(id) => {
        let id = *id;
        self.files[id] = file;
        FileId(id)
      },
      None => {
        let id = self.files.len();
        self.name_map.insert(file.name.clone(), id);
        self.files.push(file);
        FileId(id)
      },
    }
  }

  /// The range of a 1-based line without its trailing line break
  pub fn line_span(&self, id: FileId, line: usize) -> Result<Range<usize>, files::Error> {
    let file = self.get(id)?;
    let range = files::Files::line_range(self, id, line.saturating_sub(1))?;
    let text = &file.source[range.clone()];
    let trimmed = text.trim_end_matches(['\n', '\r']);

    Ok(range.start..range.start + trimmed.len())
  }

  /// Retrieve an immutable file reference from the file database. Return
  /// a file missing error if not found
  fn get(&self, id: FileId) -> Result<&SourceFile, files::Error> {
    self.files.get(id.0).ok_or(files::Error::FileMissing)
  }
}

impl<'a> files::Files<'a> for SourceFiles {
  type FileId = FileId;
  type Name = &'a str;
  type Source = &'a str;

  fn name(&'a self, id: Self::FileId) -> Result<Self::Name, files::Error> {
    Ok(self.get(id)?.name.as_str())
  }

  fn source(&'a self, id: Self::FileId) -> Result<Self::Source, files::Error> {
    Ok(self.get(id)?.source.as_str())
  }

  fn line_index(&'a self, id: Self::FileId, byte_index: usize) -> Result<usize, files::Error> {
    let file = self.get(id)?;

    file
      .line_offsets
      .offset_line(byte_index)
      .map_err(|_| files::Error::IndexTooLarge {
        given: byte_index,
        max: file.source.len(),
      })
  }

  fn line_range(&'a self, id: Self::FileId, line_index: usize) -> Result<Range<usize>, files::Error> {
    let file = self.get(id)?;

    file
      .line_offsets
      .line_range(line_index)
      .map_err(|_| files::Error::LineTooLarge {
        given: line_index,
        max: file.line_offsets.lines(),
      })
  }
}
