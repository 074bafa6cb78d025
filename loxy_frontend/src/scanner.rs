use std::{borrow::Cow, mem};

use crate::{
  error::{Diagnostics, ErrorSink, LexError},
  keywords::KeywordTable,
  source::LineOffsets,
  token::{Literal, Token, TokenKind},
};
use tracing::debug;

/// A scanner for the lox language. This struct is
/// responsible for taking a source buffer and tokenizing it
/// in a single pass. The source is read as bytes, every byte
/// outside of the ascii range is an unexpected character
/// unless it sits in a string or comment
pub struct Scanner<'a> {
  /// The input source bytes
  source: &'a [u8],

  /// The keyword table identifiers are classified against
  keywords: &'static KeywordTable,

  /// The tokens produced so far
  tokens: Vec<Token<'a>>,

  /// The offset each line begins at
  line_offsets: Vec<usize>,

  /// The start of the current token
  start: usize,

  /// The next unread byte
  current: usize,

  /// The current line number
  line: usize,

  /// The line the current token started on
  start_line: usize,
}

impl<'a> Scanner<'a> {
  /// Create a new scanner from the provided source.
  pub fn new<S: AsRef<[u8]> + ?Sized>(source: &'a S) -> Scanner<'a> {
    let source = source.as_ref();
    let mut line_offsets = Vec::with_capacity(source_line_heuristic_guess(source.len()));
    line_offsets.push(0);

    Scanner {
      source,
      keywords: KeywordTable::global(),
      tokens: Vec::with_capacity(source_token_heuristic_guess(source.len())),
      line_offsets,
      start: 0,
      current: 0,
      line: 1,
      start_line: 1,
    }
  }

  /// Scan the entire source into tokens. Lexical errors are
  /// reported to the sink and scanning carries on with the next
  /// character. The result always ends with a single eof token
  pub fn scan_tokens(&mut self, sink: &mut dyn ErrorSink) -> Vec<Token<'a>> {
    while !self.is_at_end() {
      self.start = self.current;
      self.start_line = self.line;
      self.scan_token(sink);
    }

    self
      .tokens
      .push(Token::new(TokenKind::Eof, "", Literal::None, self.line));
    mem::take(&mut self.tokens)
  }

  /// Retrieve this source's line offsets after it has
  /// been scanned
  pub fn line_offsets(mut self) -> LineOffsets {
    self.line_offsets.shrink_to_fit();
    LineOffsets::new(self.line_offsets, self.source.len())
  }

  /// Scan the lexeme starting at the current position
  fn scan_token(&mut self, sink: &mut dyn ErrorSink) {
    let c = match self.advance() {
      Some(c) => c,
      None => return,
    };

    match c {
      b'(' => self.add_token(TokenKind::LeftParen),
      b')' => self.add_token(TokenKind::RightParen),
      b'{' => self.add_token(TokenKind::LeftBrace),
      b'}' => self.add_token(TokenKind::RightBrace),
      b',' => self.add_token(TokenKind::Comma),
      b'.' => self.add_token(TokenKind::Dot),
      b'-' => self.add_token(TokenKind::Minus),
      b'+' => self.add_token(TokenKind::Plus),
      b';' => self.add_token(TokenKind::Semicolon),
      b'*' => self.add_token(TokenKind::Star),
      b'!' => {
        if self.match_byte(b'=') {
          self.add_token(TokenKind::BangEqual)
        } else {
          self.add_token(TokenKind::Bang)
        }
      },
      b'=' => {
        if self.match_byte(b'=') {
          self.add_token(TokenKind::EqualEqual)
        } else {
          self.add_token(TokenKind::Equal)
        }
      },
      b'<' => {
        if self.match_byte(b'=') {
          self.add_token(TokenKind::LessEqual)
        } else {
          self.add_token(TokenKind::Less)
        }
      },
      b'>' => {
        if self.match_byte(b'=') {
          self.add_token(TokenKind::GreaterEqual)
        } else {
          self.add_token(TokenKind::Greater)
        }
      },
      b'/' => {
        if self.match_byte(b'/') {
          // the line break is left for the main loop
          while self.next_if(|c| c != b'\n').is_some() {}
        } else {
          self.add_token(TokenKind::Slash)
        }
      },
      b' ' | b'\r' | b'\t' => {},
      b'\n' => self.new_line(),
      b'"' => self.string(sink),
      _ => {
        if is_digit(c) {
          return self.number();
        }

        if is_alpha(c) {
          return self.identifier();
        }

        sink.error(self.line, LexError::UnexpectedCharacter)
      },
    }
  }

  /// Generate an identifier or keyword token
  fn identifier(&mut self) {
    while self.next_if(is_alpha_numeric).is_some() {}

    let kind = self.keywords.classify(self.current_slice());
    self.add_token(kind)
  }

  /// Generate a number token
  fn number(&mut self) {
    while self.next_if(is_digit).is_some() {}

    // a fraction needs a digit after the dot
    if self.peek() == Some(b'.') && self.peek_next().is_some_and(is_digit) {
      self.advance();
      while self.next_if(is_digit).is_some() {}
    }

    // digits with an optional digit led fraction are always valid
    // float syntax, overly long literals parse to infinity
    let number = self.lexeme().parse::<f64>().unwrap_or(f64::NAN);
    self.add_token_literal(TokenKind::Number, Literal::Number(number))
  }

  /// Generate a string token
  fn string(&mut self, sink: &mut dyn ErrorSink) {
    while let Some(c) = self.next_if(|c| c != b'"') {
      if c == b'\n' {
        self.new_line();
      }
    }

    if self.advance().is_none() {
      sink.error(self.line, LexError::UnterminatedString);
      return;
    }

    let value = String::from_utf8_lossy(&self.source[self.start + 1..self.current - 1]);
    self.add_token_literal(TokenKind::String, Literal::String(value))
  }

  /// Push a token without a literal
  fn add_token(&mut self, kind: TokenKind) {
    self.add_token_literal(kind, Literal::None)
  }

  /// Push a token spanning the current slice
  fn add_token_literal(&mut self, kind: TokenKind, literal: Literal<'a>) {
    let lexeme = self.lexeme();
    self
      .tokens
      .push(Token::new(kind, lexeme, literal, self.start_line));
  }

  /// Record that a line break was just consumed
  fn new_line(&mut self) {
    self.line += 1;
    self.line_offsets.push(self.current);
  }

  /// Get the current byte slice
  fn current_slice(&self) -> &'a [u8] {
    &self.source[self.start..self.current]
  }

  /// The current slice as text. Only strings can hold non ascii
  /// bytes, so every other lexeme stays borrowed
  fn lexeme(&self) -> Cow<'a, str> {
    String::from_utf8_lossy(self.current_slice())
  }

  fn is_at_end(&self) -> bool {
    self.current >= self.source.len()
  }

  /// Get the next byte
  fn advance(&mut self) -> Option<u8> {
    let c = self.peek()?;
    self.current += 1;
    Some(c)
  }

  /// Advance if the next byte meets the condition
  fn next_if(&mut self, f: impl FnOnce(u8) -> bool) -> Option<u8> {
    match self.peek() {
      Some(c) if f(c) => self.advance(),
      _ => None,
    }
  }

  /// match the next byte against an expected
  fn match_byte(&mut self, expected: u8) -> bool {
    self.next_if(|c| c == expected).is_some()
  }

  /// Peek the next byte
  fn peek(&self) -> Option<u8> {
    self.source.get(self.current).copied()
  }

  /// Peek the byte after next
  fn peek_next(&self) -> Option<u8> {
    self.source.get(self.current + 1).copied()
  }
}

/// The outcome of scanning a complete source
#[derive(Debug, Clone)]
pub struct ScanResult<'a> {
  /// Every token scanned, terminated by eof
  pub tokens: Vec<Token<'a>>,

  /// The errors reported during the scan
  pub diagnostics: Diagnostics,

  /// Where each line of the source begins
  pub line_offsets: LineOffsets,
}

impl<'a> ScanResult<'a> {
  pub fn had_error(&self) -> bool {
    self.diagnostics.had_error()
  }
}

/// Scan a source collecting the tokens along with every
/// lexical error reported
///
/// # Examples
/// ```
/// use loxy_frontend::{scanner::scan, token::TokenKind};
///
/// let result = scan("1 != 2");
/// let kinds: Vec<TokenKind> = result.tokens.iter().map(|t| t.kind()).collect();
///
/// assert!(!result.had_error());
/// assert_eq!(
///   kinds,
///   vec![TokenKind::Number, TokenKind::BangEqual, TokenKind::Number, TokenKind::Eof]
/// );
/// ```
pub fn scan<S: AsRef<[u8]> + ?Sized>(source: &S) -> ScanResult<'_> {
  let source = source.as_ref();
  let mut diagnostics = Diagnostics::new();
  let mut scanner = Scanner::new(source);

  let tokens = scanner.scan_tokens(&mut diagnostics);
  let line_offsets = scanner.line_offsets();

  debug!(
    bytes = source.len(),
    tokens = tokens.len(),
    lines = line_offsets.lines(),
    errors = diagnostics.len(),
    "scanned source"
  );

  ScanResult {
    tokens,
    diagnostics,
    line_offsets,
  }
}

/// Is the byte an ascii digit
fn is_digit(c: u8) -> bool {
  c.is_ascii_digit()
}

/// Is the byte an ascii letter or underscore
fn is_alpha(c: u8) -> bool {
  c.is_ascii_alphabetic() || c == b'_'
}

fn is_alpha_numeric(c: u8) -> bool {
  is_alpha(c) || is_digit(c)
}

/// A loose estimate for how many characters are in a typical line
const fn source_line_heuristic_guess(len: usize) -> usize {
  len / 20
}

/// A loose estimate for how many characters make up a typical token
const fn source_token_heuristic_guess(len: usize) -> usize {
  len / 4 + 1
}

#[cfg(test)]
mod test {
  use super::*;
  use std::collections::HashMap;

  enum TokenGen {
    Symbol(Box<dyn Fn() -> String>),
    Comparator(Box<dyn Fn() -> String>),
    ALpha(Box<dyn Fn() -> String>),
  }

  fn token_gen() -> HashMap<TokenKind, TokenGen> {
    let mut map = HashMap::new();

    map.insert(
      TokenKind::LeftParen,
      TokenGen::Symbol(Box::new(|| "(".to_string())),
    );
    map.insert(
      TokenKind::RightParen,
      TokenGen::Symbol(Box::new(|| ")".to_string())),
    );
    map.insert(
      TokenKind::LeftBrace,
      TokenGen::Symbol(Box::new(|| "{".to_string())),
    );
    map.insert(
      TokenKind::RightBrace,
      TokenGen::Symbol(Box::new(|| "}".to_string())),
    );
    map.insert(
      TokenKind::Comma,
      TokenGen::Symbol(Box::new(|| ",".to_string())),
    );
    map.insert(
      TokenKind::Dot,
      TokenGen::Symbol(Box::new(|| ".".to_string())),
    );
    map.insert(
      TokenKind::Minus,
      TokenGen::Symbol(Box::new(|| "-".to_string())),
    );
    map.insert(
      TokenKind::Plus,
      TokenGen::Symbol(Box::new(|| "+".to_string())),
    );
    map.insert(
      TokenKind::Semicolon,
      TokenGen::Symbol(Box::new(|| ";".to_string())),
    );
    map.insert(
      TokenKind::Slash,
      TokenGen::Symbol(Box::new(|| "/".to_string())),
    );
    map.insert(
      TokenKind::Star,
      TokenGen::Symbol(Box::new(|| "*".to_string())),
    );
    map.insert(
      TokenKind::Bang,
      TokenGen::Comparator(Box::new(|| "!".to_string())),
    );
    map.insert(
      TokenKind::BangEqual,
      TokenGen::Comparator(Box::new(|| "!=".to_string())),
    );
    map.insert(
      TokenKind::Equal,
      TokenGen::Comparator(Box::new(|| "=".to_string())),
    );
    map.insert(
      TokenKind::EqualEqual,
      TokenGen::Comparator(Box::new(|| "==".to_string())),
    );
    map.insert(
      TokenKind::Greater,
      TokenGen::Comparator(Box::new(|| ">".to_string())),
    );
    map.insert(
      TokenKind::GreaterEqual,
      TokenGen::Comparator(Box::new(|| ">=".to_string())),
    );
    map.insert(
      TokenKind::Less,
      TokenGen::Comparator(Box::new(|| "<".to_string())),
    );
    map.insert(
      TokenKind::LessEqual,
      TokenGen::Comparator(Box::new(|| "<=".to_string())),
    );
    map.insert(
      TokenKind::Identifier,
      TokenGen::ALpha(Box::new(|| "example".to_string())),
    );
    map.insert(
      TokenKind::String,
      TokenGen::Symbol(Box::new(|| "\"example\"".to_string())),
    );
    map.insert(
      TokenKind::Number,
      TokenGen::ALpha(Box::new(|| "12345".to_string())),
    );
    map.insert(
      TokenKind::And,
      TokenGen::ALpha(Box::new(|| "and".to_string())),
    );
    map.insert(
      TokenKind::Class,
      TokenGen::ALpha(Box::new(|| "class".to_string())),
    );
    map.insert(
      TokenKind::Else,
      TokenGen::ALpha(Box::new(|| "else".to_string())),
    );
    map.insert(
      TokenKind::False,
      TokenGen::ALpha(Box::new(|| "false".to_string())),
    );
    map.insert(
      TokenKind::Fun,
      TokenGen::ALpha(Box::new(|| "fun".to_string())),
    );
    map.insert(
      TokenKind::For,
      TokenGen::ALpha(Box::new(|| "for".to_string())),
    );
    map.insert(TokenKind::If, TokenGen::ALpha(Box::new(|| "if".to_string())));
    map.insert(
      TokenKind::Nil,
      TokenGen::ALpha(Box::new(|| "nil".to_string())),
    );
    map.insert(TokenKind::Or, TokenGen::ALpha(Box::new(|| "or".to_string())));
    map.insert(
      TokenKind::Print,
      TokenGen::ALpha(Box::new(|| "print".to_string())),
    );
    map.insert(
      TokenKind::Return,
      TokenGen::ALpha(Box::new(|| "return".to_string())),
    );
    map.insert(
      TokenKind::Super,
      TokenGen::ALpha(Box::new(|| "super".to_string())),
    );
    map.insert(
      TokenKind::This,
      TokenGen::ALpha(Box::new(|| "this".to_string())),
    );
    map.insert(
      TokenKind::True,
      TokenGen::ALpha(Box::new(|| "true".to_string())),
    );
    map.insert(
      TokenKind::Var,
      TokenGen::ALpha(Box::new(|| "var".to_string())),
    );
    map.insert(
      TokenKind::While,
      TokenGen::ALpha(Box::new(|| "while".to_string())),
    );
    map.insert(TokenKind::Eof, TokenGen::ALpha(Box::new(|| "".to_string())));

    map
  }

  fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|token| token.kind()).collect()
  }

  #[test]
  fn scan_tokens() {
    let source = "
    var x = \"something\";
    if (x != \"something\") {
      print x;
    }
    ";

    let mut diagnostics = Diagnostics::new();
    let tokens = Scanner::new(source).scan_tokens(&mut diagnostics);
    assert!(!diagnostics.had_error());

    assert_eq!(tokens[0].kind(), TokenKind::Var);
    assert_eq!(tokens[0].lexeme(), "var");
    assert_eq!(tokens[0].line(), 2);

    assert_eq!(tokens[1].kind(), TokenKind::Identifier);
    assert_eq!(tokens[1].lexeme(), "x");

    assert_eq!(tokens[2].kind(), TokenKind::Equal);
    assert_eq!(tokens[3].kind(), TokenKind::String);
    assert_eq!(tokens[3].lexeme(), "\"something\"");
    assert_eq!(tokens[3].literal(), &Literal::String("something".into()));

    assert_eq!(tokens[8].kind(), TokenKind::BangEqual);
    assert_eq!(tokens[8].line(), 3);

    let eof = tokens.last().unwrap();
    assert_eq!(eof.kind(), TokenKind::Eof);
    assert_eq!(eof.line(), 6);
  }

  #[test]
  fn line_offsets() {
    let source = "
    var x = \"something\";
    if (x) {
      print x;
    }";

    let mut scanner = Scanner::new(source);
    scanner.scan_tokens(&mut Diagnostics::new());
    let offsets = scanner.line_offsets();

    assert_eq!(offsets.lines(), 5);
    assert_eq!(offsets.line_range(0), Ok(0..1));
    assert_eq!(offsets.line_range(1), Ok(1..26));
    assert_eq!(offsets.line_range(2), Ok(26..39));
    assert_eq!(offsets.line_range(3), Ok(39..54));
    assert_eq!(offsets.line_range(4), Ok(54..59));
  }

  #[test]
  fn line_offsets_inside_strings() {
    let result = scan("\"a\nb\"\nc");

    assert_eq!(result.line_offsets.lines(), 3);
    assert_eq!(result.line_offsets.line_range(1), Ok(3..6));
  }

  #[test]
  fn empty_string() {
    let result = scan("");

    assert_eq!(result.tokens.len(), 1);
    assert_eq!(result.tokens[0].kind(), TokenKind::Eof);
    assert_eq!(result.tokens[0].lexeme(), "");
    assert_eq!(result.tokens[0].line(), 1);
  }

  #[test]
  fn single_token() {
    let gens = token_gen();
    assert_eq!(gens.len(), TokenKind::VARIANT_COUNT);

    for (token_kind, gen) in gens {
      let example = match gen {
        TokenGen::Symbol(x) => x(),
        TokenGen::ALpha(x) => x(),
        TokenGen::Comparator(x) => x(),
      };

      let result = scan(&example);
      assert!(!result.had_error());
      assert_eq!(result.tokens[0].kind(), token_kind);
      assert_eq!(result.tokens[0].lexeme(), example);
    }
  }

  #[test]
  fn comparators_before_space() {
    let result = scan("! = < > ");

    assert_eq!(
      kinds(&result.tokens),
      vec![
        TokenKind::Bang,
        TokenKind::Equal,
        TokenKind::Less,
        TokenKind::Greater,
        TokenKind::Eof
      ]
    );
  }

  #[test]
  fn multiple_tokens() {
    let result = scan("10 + 3");

    assert_eq!(result.tokens[0].kind(), TokenKind::Number);
    assert_eq!(result.tokens[0].lexeme(), "10");
    assert_eq!(result.tokens[0].literal(), &Literal::Number(10.0));

    assert_eq!(result.tokens[1].kind(), TokenKind::Plus);
    assert_eq!(result.tokens[1].lexeme(), "+");

    assert_eq!(result.tokens[2].kind(), TokenKind::Number);
    assert_eq!(result.tokens[2].lexeme(), "3");

    assert_eq!(result.tokens[3].kind(), TokenKind::Eof);
    assert_eq!(result.tokens[3].lexeme(), "");
  }

  #[test]
  fn fractional_number() {
    let result = scan("45.67");

    assert_eq!(result.tokens.len(), 2);
    assert_eq!(result.tokens[0].lexeme(), "45.67");
    assert_eq!(result.tokens[0].literal(), &Literal::Number(45.67));
  }

  #[test]
  fn number_then_method() {
    let result = scan("12.abs");

    assert_eq!(
      kinds(&result.tokens),
      vec![
        TokenKind::Number,
        TokenKind::Dot,
        TokenKind::Identifier,
        TokenKind::Eof
      ]
    );
  }

  #[test]
  fn negative_number_is_two_tokens() {
    let result = scan("-5");

    assert_eq!(
      kinds(&result.tokens),
      vec![TokenKind::Minus, TokenKind::Number, TokenKind::Eof]
    );
    assert_eq!(result.tokens[1].literal(), &Literal::Number(5.0));
  }

  #[test]
  fn identifiers_with_digits_and_underscores() {
    let result = scan("_private var2 or_else");

    assert_eq!(
      kinds(&result.tokens),
      vec![
        TokenKind::Identifier,
        TokenKind::Identifier,
        TokenKind::Identifier,
        TokenKind::Eof
      ]
    );
    assert_eq!(result.tokens[2].lexeme(), "or_else");
  }

  #[test]
  fn slash_and_comment() {
    let result = scan("4 / 2 // half");

    assert_eq!(
      kinds(&result.tokens),
      vec![
        TokenKind::Number,
        TokenKind::Slash,
        TokenKind::Number,
        TokenKind::Eof
      ]
    );
  }

  #[test]
  fn multi_line_string() {
    let result = scan("\"one\ntwo\" x");

    assert_eq!(result.tokens[0].kind(), TokenKind::String);
    assert_eq!(result.tokens[0].literal(), &Literal::String("one\ntwo".into()));
    assert_eq!(result.tokens[0].line(), 1);
    assert_eq!(result.tokens[1].line(), 2);
  }

  #[test]
  fn string_without_escapes() {
    let result = scan("\"a\\nb\"");

    assert_eq!(result.tokens[0].literal(), &Literal::String("a\\nb".into()));
  }

  #[test]
  fn unexpected_characters_continue() {
    let result = scan("@1#\n$");
    let reported: Vec<_> = result.diagnostics.iter().copied().collect();

    assert_eq!(
      kinds(&result.tokens),
      vec![TokenKind::Number, TokenKind::Eof]
    );
    assert_eq!(
      reported,
      vec![
        crate::error::LineDiagnostic {
          line: 1,
          error: LexError::UnexpectedCharacter
        },
        crate::error::LineDiagnostic {
          line: 1,
          error: LexError::UnexpectedCharacter
        },
        crate::error::LineDiagnostic {
          line: 2,
          error: LexError::UnexpectedCharacter
        },
      ]
    );
  }

  #[test]
  fn non_ascii_is_unexpected_per_byte() {
    let result = scan("é");

    assert_eq!(result.diagnostics.len(), 2);
    assert_eq!(kinds(&result.tokens), vec![TokenKind::Eof]);
  }

  #[test]
  fn non_ascii_inside_string() {
    let result = scan("\"héllo\"");

    assert!(!result.had_error());
    assert_eq!(result.tokens[0].literal(), &Literal::String("héllo".into()));
  }

  #[test]
  fn invalid_utf8_is_unexpected() {
    let result = scan(b"var caf\xe9 = 1;");
    let reported: Vec<_> = result.diagnostics.iter().copied().collect();

    assert_eq!(
      reported,
      vec![crate::error::LineDiagnostic {
        line: 1,
        error: LexError::UnexpectedCharacter
      }]
    );
    assert_eq!(
      kinds(&result.tokens),
      vec![
        TokenKind::Var,
        TokenKind::Identifier,
        TokenKind::Equal,
        TokenKind::Number,
        TokenKind::Semicolon,
        TokenKind::Eof
      ]
    );
    assert_eq!(result.tokens[1].lexeme(), "caf");
  }

  #[test]
  fn invalid_utf8_inside_string() {
    let result = scan(b"\"caf\xe9\"");

    assert!(!result.had_error());
    assert_eq!(
      result.tokens[0].literal(),
      &Literal::String("caf\u{FFFD}".into())
    );
    assert_eq!(result.tokens[0].lexeme(), "\"caf\u{FFFD}\"");
    assert_eq!(result.line_offsets.line_range(0), Ok(0..6));
  }

  #[test]
  fn long_numbers_saturate() {
    let source = "9".repeat(400);
    let result = scan(&source);

    assert!(!result.had_error());
    assert_eq!(result.tokens[0].literal(), &Literal::Number(f64::INFINITY));

    let fraction = format!("0.{}", "1".repeat(400));
    let result = scan(&fraction);

    assert!(!result.had_error());
    assert_eq!(result.tokens[0].lexeme(), fraction);
  }
}
