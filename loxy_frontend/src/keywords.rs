use crate::token::TokenKind;
use fnv::FnvBuildHasher;
use hashbrown::HashMap;
use std::sync::LazyLock;

/// Reserved words of the language and the token kind each scans to
const RESERVED: [(&str, TokenKind); 16] = [
  ("and", TokenKind::And),
  ("class", TokenKind::Class),
  ("else", TokenKind::Else),
  ("false", TokenKind::False),
  ("for", TokenKind::For),
  ("fun", TokenKind::Fun),
  ("if", TokenKind::If),
  ("nil", TokenKind::Nil),
  ("or", TokenKind::Or),
  ("print", TokenKind::Print),
  ("return", TokenKind::Return),
  ("super", TokenKind::Super),
  ("this", TokenKind::This),
  ("true", TokenKind::True),
  ("var", TokenKind::Var),
  ("while", TokenKind::While),
];

/// A read only table from keyword spelling to token kind. Built
/// once on first use and shared by every scanner
pub struct KeywordTable(HashMap<&'static [u8], TokenKind, FnvBuildHasher>);

static KEYWORDS: LazyLock<KeywordTable> = LazyLock::new(|| {
  let mut map = HashMap::with_capacity_and_hasher(RESERVED.len(), FnvBuildHasher::default());
  map.extend(
    RESERVED
      .iter()
      .map(|&(spelling, kind)| (spelling.as_bytes(), kind)),
  );
  KeywordTable(map)
});

impl KeywordTable {
  /// The process wide keyword table
  pub fn global() -> &'static KeywordTable {
    &KEYWORDS
  }

  /// Find the keyword kind for an exact spelling
  ///
  /// # Examples
  /// ```
  /// use loxy_frontend::{keywords::KeywordTable, token::TokenKind};
  ///
  /// let keywords = KeywordTable::global();
  /// assert_eq!(keywords.get("class"), Some(TokenKind::Class));
  /// assert_eq!(keywords.get(b"classify"), None);
  /// ```
  #[inline]
  pub fn get(&self, lexeme: impl AsRef<[u8]>) -> Option<TokenKind> {
    self.0.get(lexeme.as_ref()).copied()
  }

  /// Classify an identifier shaped lexeme
  #[inline]
  pub fn classify(&self, lexeme: impl AsRef<[u8]>) -> TokenKind {
    self.get(lexeme).unwrap_or(TokenKind::Identifier)
  }
}
