use super::Parser;
use crate::ast::func::Func;
use crate::ast::func::FuncBody;
use crate::ast::func::ParamDecl;
use crate::ast::node::Node;
use crate::ast::pat::Pat;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  /// Binding pattern. Destructuring patterns are consumed but not
  /// decomposed.
  pub fn pat(&mut self) -> SyntaxResult<Node<Pat>> {
    let t = self.peek();
    match t.typ {
      TT::BraceOpen => {
        let start = t.loc;
        self.skip_balanced()?;
        Ok(Node::new(self.wrap_loc(start), Pat::Object))
      }
      TT::BracketOpen => {
        let start = t.loc;
        self.skip_balanced()?;
        Ok(Node::new(self.wrap_loc(start), Pat::Array))
      }
      typ if typ == TT::Identifier || typ.is_unreserved_keyword() => {
        let tok = self.consume();
        Ok(Node::new(tok.loc, Pat::Id(self.string(tok.loc))))
      }
      _ => Err(t.error(SyntaxErrorType::ExpectedSyntax("binding pattern"))),
    }
  }

  /// Parenthesized parameter list of a function declaration/expression.
  pub fn fn_params(&mut self) -> SyntaxResult<Vec<Node<ParamDecl>>> {
    self.require(TT::ParenthesisOpen)?;
    let mut params = Vec::new();
    while self.peek().typ != TT::ParenthesisClose {
      params.push(self.fn_param()?);
      if !self.consume_if(TT::Comma).is_match() {
        break;
      }
    }
    self.require(TT::ParenthesisClose)?;
    Ok(params)
  }

  fn fn_param(&mut self) -> SyntaxResult<Node<ParamDecl>> {
    let start = self.peek().loc;
    // Decorators and accessibility modifiers on constructor parameters.
    while self.consume_if(TT::At).is_match() {
      self.lhs_decorator()?;
    }
    let _ = self.consume_if_pred(|t| {
      matches!(
        t.typ,
        TT::KeywordPublic | TT::KeywordProtected | TT::KeywordPrivate
      )
    });
    let _ = self.consume_if(TT::KeywordReadonly);
    let rest = self.consume_if(TT::DotDotDot).is_match();
    let pattern = self.pat()?;
    let optional = self.consume_if(TT::Question).is_match();
    let type_annotation = self.consume_if(TT::Colon).and_then(|| self.type_expr())?;
    let default_value = self.consume_if(TT::Equals).and_then(|| self.expr())?;
    let loc = self.wrap_loc(start);
    Ok(Node::new(loc, ParamDecl {
      rest,
      optional,
      pattern,
      type_annotation,
      default_value,
    }))
  }

  /// Consume a decorator expression after `@`.
  pub fn lhs_decorator(&mut self) -> SyntaxResult<()> {
    self.require_binding_name()?;
    while self.consume_if(TT::Dot).is_match() {
      self.require_name()?;
    }
    if self.peek().typ == TT::ParenthesisOpen {
      self.skip_balanced()?;
    }
    Ok(())
  }

  /// The part of a function after its name: type parameters, parameters,
  /// return annotation, and (optionally) a body.
  pub fn func_tail(&mut self, async_: bool, generator: bool) -> SyntaxResult<Node<Func>> {
    let start = self.peek().loc;
    let type_parameters = if self.peek().typ == TT::ChevronLeft {
      self.type_parameters()?
    } else {
      None
    };
    let parameters = self.fn_params()?;
    let return_type = self
      .consume_if(TT::Colon)
      .and_then(|| self.type_expr_or_predicate())?;
    let body = if self.peek().typ == TT::BraceOpen {
      self.require(TT::BraceOpen)?;
      let body = self.stmts_until_brace_close()?;
      self.require(TT::BraceClose)?;
      Some(FuncBody::Block(body))
    } else {
      // Overload signature or ambient declaration.
      None
    };
    let loc = self.wrap_loc(start);
    Ok(Node::new(loc, Func {
      arrow: false,
      async_,
      generator,
      type_parameters,
      parameters,
      return_type,
      body,
    }))
  }
}
