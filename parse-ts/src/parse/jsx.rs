use super::Parser;
use crate::ast::expr::JsxAttr;
use crate::ast::expr::JsxAttrVal;
use crate::ast::expr::JsxChild;
use crate::ast::expr::JsxElem;
use crate::ast::expr::JsxElemName;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::LexMode;
use crate::loc::Loc;
use crate::token::TT;

fn name_repr(name: &Option<JsxElemName>) -> String {
  match name {
    None => String::new(),
    Some(JsxElemName::Id(id)) => id.clone(),
    Some(JsxElemName::Member { base, path }) => {
      let mut s = base.clone();
      for p in path {
        s.push('.');
        s.push_str(p);
      }
      s
    }
    Some(JsxElemName::Name { namespace, name }) => match namespace {
      Some(ns) => format!("{ns}:{name}"),
      None => name.clone(),
    },
  }
}

impl<'a> Parser<'a> {
  /// JSX element or fragment; the `<` has not been consumed yet.
  pub fn jsx_element(&mut self) -> SyntaxResult<Node<JsxElem>> {
    let open = self.require(TT::ChevronLeft)?;

    // Fragment: `<>children</>`.
    if self.consume_if(TT::ChevronRight).is_match() {
      let children = self.jsx_children()?;
      self.require(TT::ChevronRight)?;
      let loc = self.jsx_wrap_loc(open.loc);
      return Ok(Node::new(loc, JsxElem {
        name: None,
        attributes: Vec::new(),
        children,
      }));
    }

    let name = Some(self.jsx_elem_name()?);
    let mut attributes = Vec::new();
    loop {
      let t = self.peek();
      match t.typ {
        TT::ChevronRight | TT::Slash => break,
        TT::BraceOpen => {
          // Spread attribute: `{...props}`.
          self.consume();
          self.require(TT::DotDotDot)?;
          let value = self.expr()?;
          self.require(TT::BraceClose)?;
          attributes.push(JsxAttr::Spread { value });
        }
        typ if typ.is_name_like() => {
          let name = self.jsx_attr_name()?;
          let value = if self.consume_if(TT::Equals).is_match() {
            let v = self.peek();
            Some(match v.typ {
              TT::LiteralString => {
                let tok = self.consume();
                JsxAttrVal::Text(super::decode_str_literal(self.str(tok.loc)))
              }
              TT::BraceOpen => {
                self.consume();
                let value = self.expr()?;
                self.require(TT::BraceClose)?;
                JsxAttrVal::Expr(value)
              }
              TT::ChevronLeft => JsxAttrVal::Element(self.jsx_element()?),
              _ => return Err(v.error(SyntaxErrorType::ExpectedSyntax("attribute value"))),
            })
          } else {
            None
          };
          attributes.push(JsxAttr::Named { name, value });
        }
        _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("JSX attribute"))),
      }
    }

    // Self-closing.
    if self.consume_if(TT::Slash).is_match() {
      self.require(TT::ChevronRight)?;
      let loc = self.jsx_wrap_loc(open.loc);
      return Ok(Node::new(loc, JsxElem {
        name,
        attributes,
        children: Vec::new(),
      }));
    }

    self.require(TT::ChevronRight)?;
    let children = self.jsx_children()?;
    let closing = Some(self.jsx_elem_name()?);
    if name_repr(&closing) != name_repr(&name) {
      return Err(
        self
          .peek()
          .error(SyntaxErrorType::JsxClosingTagMismatch),
      );
    }
    self.require(TT::ChevronRight)?;
    let loc = self.jsx_wrap_loc(open.loc);
    Ok(Node::new(loc, JsxElem {
      name,
      attributes,
      children,
    }))
  }

  fn jsx_wrap_loc(&mut self, start: Loc) -> Loc {
    let end = self.peek().loc.0;
    Loc(start.0, end.max(start.1))
  }

  /// Children up to (and including) the `</` of the closing tag.
  fn jsx_children(&mut self) -> SyntaxResult<Vec<JsxChild>> {
    let mut children = Vec::new();
    loop {
      let text = self.consume_with_mode(LexMode::JsxTextContent);
      if !text.loc.is_empty() {
        let value = self.string(text.loc);
        if !value.trim().is_empty() {
          children.push(JsxChild::Text(value));
        }
      }
      let t = self.peek();
      match t.typ {
        TT::ChevronLeftSlash => {
          self.consume();
          return Ok(children);
        }
        TT::ChevronLeft => {
          children.push(JsxChild::Element(self.jsx_element()?));
        }
        TT::BraceOpen => {
          self.consume();
          if self.consume_if(TT::BraceClose).is_match() {
            children.push(JsxChild::Expr(None));
          } else {
            // Spread children (`{...items}`) collapse to the expression.
            let _ = self.consume_if(TT::DotDotDot);
            let value = self.expr_sequence()?;
            self.require(TT::BraceClose)?;
            children.push(JsxChild::Expr(Some(value)));
          }
        }
        TT::EOF => return Err(t.error(SyntaxErrorType::UnexpectedEnd)),
        _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("JSX child"))),
      }
    }
  }

  fn jsx_elem_name(&mut self) -> SyntaxResult<JsxElemName> {
    let first = self.require_name()?;
    // Namespaced name: `<svg:path>`.
    if self.peek().typ == TT::Colon {
      self.consume();
      let name = self.require_name()?;
      return Ok(JsxElemName::Name {
        namespace: Some(first),
        name,
      });
    }
    // Member name: `<Foo.Bar>`.
    if self.peek().typ == TT::Dot {
      let mut path = Vec::new();
      while self.consume_if(TT::Dot).is_match() {
        path.push(self.require_name()?);
      }
      return Ok(JsxElemName::Member { base: first, path });
    }
    // Lowercase start means an intrinsic element like `<div>`.
    let intrinsic = first
      .chars()
      .next()
      .is_some_and(|c| c.is_ascii_lowercase());
    if intrinsic {
      Ok(JsxElemName::Name {
        namespace: None,
        name: first,
      })
    } else {
      Ok(JsxElemName::Id(first))
    }
  }

  /// JSX attribute name, joining adjacent `-` runs (`data-testid`).
  fn jsx_attr_name(&mut self) -> SyntaxResult<String> {
    let mut tok = self.consume();
    let mut name = self.string(tok.loc);
    loop {
      let next = self.peek();
      let adjacent = next.loc.0 == tok.loc.1;
      if adjacent && (next.typ == TT::Hyphen || next.typ == TT::Colon) {
        let sep = self.consume();
        name.push_str(self.str(sep.loc));
        tok = self.consume();
        name.push_str(self.str(tok.loc));
      } else {
        break;
      }
    }
    Ok(name)
  }
}
