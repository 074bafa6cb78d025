use std::{borrow::Cow, fmt};
use variant_count::VariantCount;

/// The decoded value carried by a literal token
#[derive(Debug, Clone, PartialEq)]
pub enum Literal<'a> {
  None,
  Number(f64),

  /// String contents. Borrowed from the source unless it held
  /// invalid utf8, which is replaced
  String(Cow<'a, str>),
}

impl<'a> fmt::Display for Literal<'a> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Literal::None => Ok(()),
      Literal::Number(number) => write!(f, "{}", number),
      Literal::String(string) => f.write_str(string),
    }
  }
}

/// A token in the Lox language
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
  /// The token kind
  kind: TokenKind,

  /// The slice of source this token was scanned from
  lexeme: Cow<'a, str>,

  /// The decoded literal value, if any
  literal: Literal<'a>,

  /// The 1-based line of the token's first character
  line: usize,
}

impl<'a> Token<'a> {
  pub fn new(
    kind: TokenKind,
    lexeme: impl Into<Cow<'a, str>>,
    literal: Literal<'a>,
    line: usize,
  ) -> Self {
    Self {
      kind,
      lexeme: lexeme.into(),
      literal,
      line,
    }
  }

  #[inline]
  pub fn kind(&self) -> TokenKind {
    self.kind
  }

  #[inline]
  pub fn lexeme(&self) -> &str {
    &self.lexeme
  }

  #[inline]
  pub fn literal(&self) -> &Literal<'a> {
    &self.literal
  }

  #[inline]
  pub fn line(&self) -> usize {
    self.line
  }
}

impl<'a> fmt::Display for Token<'a> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {} {}", self.kind, self.lexeme, self.literal)
  }
}

/// Token kinds in the Lox language
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, VariantCount)]
#[repr(u8)]
pub enum TokenKind {
  // single character
  LeftParen,
  RightParen,
  LeftBrace,
  RightBrace,
  Comma,
  Dot,
  Minus,
  Plus,
  Semicolon,
  Slash,
  Star,

  // one or two character
  Bang,
  BangEqual,
  Equal,
  EqualEqual,
  Greater,
  GreaterEqual,
  Less,
  LessEqual,

  // literals
  Identifier,
  String,
  Number,

  // keywords
  And,
  Class,
  Else,
  False,
  Fun,
  For,
  If,
  Nil,
  Or,
  Print,
  Return,
  Super,
  This,
  True,
  Var,
  While,

  Eof,
}

impl fmt::Display for TokenKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      TokenKind::LeftParen => "LEFT_PAREN",
      TokenKind::RightParen => "RIGHT_PAREN",
      TokenKind::LeftBrace => "LEFT_BRACE",
      TokenKind::RightBrace => "RIGHT_BRACE",
      TokenKind::Comma => "COMMA",
      TokenKind::Dot => "DOT",
      TokenKind::Minus => "MINUS",
      TokenKind::Plus => "PLUS",
      TokenKind::Semicolon => "SEMICOLON",
      TokenKind::Slash => "SLASH",
      TokenKind::Star => "STAR",
      TokenKind::Bang => "BANG",
      TokenKind::BangEqual => "BANG_EQUAL",
      TokenKind::Equal => "EQUAL",
      TokenKind::EqualEqual => "EQUAL_EQUAL",
      TokenKind::Greater => "GREATER",
      TokenKind::GreaterEqual => "GREATER_EQUAL",
      TokenKind::Less => "LESS",
      TokenKind::LessEqual => "LESS_EQUAL",
      TokenKind::Identifier => "IDENTIFIER",
      TokenKind::String => "STRING",
      TokenKind::Number => "NUMBER",
      TokenKind::And => "AND",
      TokenKind::Class => "CLASS",
      TokenKind::Else => "ELSE",
      TokenKind::False => "FALSE",
      TokenKind::Fun => "FUN",
      TokenKind::For => "FOR",
      TokenKind::If => "IF",
      TokenKind::Nil => "NIL",
      TokenKind::Or => "OR",
      TokenKind::Print => "PRINT",
      TokenKind::Return => "RETURN",
      TokenKind::Super => "SUPER",
      TokenKind::This => "THIS",
      TokenKind::True => "TRUE",
      TokenKind::Var => "VAR",
      TokenKind::While => "WHILE",
      TokenKind::Eof => "EOF",
    })
  }
}
