use crate::{
  source::Source,
  token::{Literal, Token, TokenKind},
};
use bumpalo::boxed::Box;
use std::{borrow::Cow, fmt};

/// Visitor over the expression nodes
pub trait Visitor<'a> {
  type Result;

  fn visit_expr(&mut self, expr: &Expr<'a>) -> Self::Result {
    match expr {
      Expr::Binary(binary) => self.visit_binary(binary),
      Expr::Grouping(grouping) => self.visit_grouping(grouping),
      Expr::Literal(value) => self.visit_literal(value),
      Expr::Unary(unary) => self.visit_unary(unary),
    }
  }

  fn visit_binary(&mut self, binary: &Binary<'a>) -> Self::Result;
  fn visit_grouping(&mut self, grouping: &Grouping<'a>) -> Self::Result;
  fn visit_literal(&mut self, value: &Value<'a>) -> Self::Result;
  fn visit_unary(&mut self, unary: &Unary<'a>) -> Self::Result;
}

/// An expression. Nodes are allocated in the arena of the
/// `Source` they were read from
#[derive(Debug, PartialEq)]
pub enum Expr<'a> {
  Binary(Box<'a, Binary<'a>>),
  Grouping(Box<'a, Grouping<'a>>),
  Literal(Value<'a>),
  Unary(Box<'a, Unary<'a>>),
}

impl<'a> Expr<'a> {
  pub fn binary(src: &'a Source, left: Expr<'a>, operator: Token<'a>, right: Expr<'a>) -> Self {
    Expr::Binary(src.node(Binary {
      left,
      operator,
      right,
    }))
  }

  pub fn grouping(src: &'a Source, expression: Expr<'a>) -> Self {
    Expr::Grouping(src.node(Grouping { expression }))
  }

  pub fn unary(src: &'a Source, operator: Token<'a>, right: Expr<'a>) -> Self {
    Expr::Unary(src.node(Unary { operator, right }))
  }
}

#[derive(Debug, PartialEq)]
pub struct Binary<'a> {
  pub left: Expr<'a>,
  pub operator: Token<'a>,
  pub right: Expr<'a>,
}

#[derive(Debug, PartialEq)]
pub struct Grouping<'a> {
  pub expression: Expr<'a>,
}

#[derive(Debug, PartialEq)]
pub struct Unary<'a> {
  pub operator: Token<'a>,
  pub right: Expr<'a>,
}

/// The value of a literal expression
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
  Nil,
  Bool(bool),
  Number(f64),
  String(Cow<'a, str>),
}

impl<'a> Value<'a> {
  /// The literal value a token denotes, if it denotes one
  pub fn from_token(token: &Token<'a>) -> Option<Self> {
    match (token.kind(), token.literal()) {
      (TokenKind::Nil, _) => Some(Value::Nil),
      (TokenKind::True, _) => Some(Value::Bool(true)),
      (TokenKind::False, _) => Some(Value::Bool(false)),
      (TokenKind::Number, Literal::Number(number)) => Some(Value::Number(*number)),
      (TokenKind::String, Literal::String(string)) => Some(Value::String(string.clone())),
      _ => None,
    }
  }
}

impl<'a> fmt::Display for Value<'a> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Value::Nil => f.write_str("nil"),
      Value::Bool(b) => write!(f, "{}", b),
      Value::Number(number) => write!(f, "{}", number),
      Value::String(string) => f.write_str(string),
    }
  }
}
