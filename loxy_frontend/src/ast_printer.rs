use crate::ast::*;

/// Renders an expression as a parenthesized prefix string
#[derive(Default)]
pub struct AstPrint {
  buffer: String,
}

impl AstPrint {
  /// Print the expression, replacing any previous output
  pub fn print(&mut self, expr: &Expr) -> &str {
    self.buffer.clear();
    self.visit_expr(expr);
    &self.buffer
  }

  pub fn str(&self) -> &str {
    &self.buffer
  }

  fn parenthesize(&mut self, name: &str, exprs: &[&Expr]) {
    self.buffer.push('(');
    self.buffer.push_str(name);

    for expr in exprs {
      self.buffer.push(' ');
      self.visit_expr(expr);
    }

    self.buffer.push(')');
  }
}

impl<'a> Visitor<'a> for AstPrint {
  type Result = ();

  fn visit_binary(&mut self, binary: &Binary<'a>) -> Self::Result {
    self.parenthesize(binary.operator.lexeme(), &[&binary.left, &binary.right]);
  }

  fn visit_grouping(&mut self, grouping: &Grouping<'a>) -> Self::Result {
    self.parenthesize("group", &[&grouping.expression]);
  }

  fn visit_literal(&mut self, value: &Value<'a>) -> Self::Result {
    self.buffer.push_str(&value.to_string());
  }

  fn visit_unary(&mut self, unary: &Unary<'a>) -> Self::Result {
    self.parenthesize(unary.operator.lexeme(), &[&unary.right]);
  }
}
