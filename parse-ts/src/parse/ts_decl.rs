use super::Parser;
use crate::ast::node::Node;
use crate::ast::stmt::*;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn interface_decl(
    &mut self,
    export: bool,
    declare: bool,
    doc: Option<String>,
  ) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::KeywordInterface)?;
    let name = self.require_binding_name()?;
    let type_parameters = if self.peek().typ == TT::ChevronLeft {
      self.type_parameters()?
    } else {
      None
    };
    let mut extends = Vec::new();
    if self.consume_if(TT::KeywordExtends).is_match() {
      loop {
        extends.push(self.type_expr()?);
        if !self.consume_if(TT::Comma).is_match() {
          break;
        }
      }
    }
    self.require(TT::BraceOpen)?;
    let members = self.type_members_until_brace_close()?;
    let close = self.require(TT::BraceClose)?;
    let loc = Loc(start.loc.0, close.loc.1);
    Ok(Node::new(
      loc,
      Stmt::InterfaceDecl(Node::new(loc, InterfaceDecl {
        export,
        declare,
        name,
        type_parameters,
        extends,
        members,
        doc,
      })),
    ))
  }

  pub fn type_alias_decl(
    &mut self,
    export: bool,
    declare: bool,
    doc: Option<String>,
  ) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::KeywordType)?;
    let name = self.require_binding_name()?;
    let type_parameters = if self.peek().typ == TT::ChevronLeft {
      self.type_parameters()?
    } else {
      None
    };
    self.require(TT::Equals)?;
    let type_expr = self.type_expr()?;
    self.semi();
    let loc = Loc(start.loc.0, type_expr.loc.1);
    Ok(Node::new(
      loc,
      Stmt::TypeAliasDecl(Node::new(loc, TypeAliasDecl {
        export,
        declare,
        name,
        type_parameters,
        type_expr,
        doc,
      })),
    ))
  }

  pub fn enum_decl(
    &mut self,
    export: bool,
    declare: bool,
    const_: bool,
    doc: Option<String>,
  ) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::KeywordEnum)?;
    let name = self.require_binding_name()?;
    self.require(TT::BraceOpen)?;
    let mut members = Vec::new();
    while self.peek().typ != TT::BraceClose {
      let first = self.peek();
      let member_doc = self.doc_text(&first);
      let member_name = if first.typ == TT::LiteralString {
        self.lit_str_val()?
      } else {
        self.require_name()?
      };
      let initializer = self.consume_if(TT::Equals).and_then(|| self.expr())?;
      let end = initializer.as_ref().map(|i| i.loc).unwrap_or(first.loc);
      members.push(Node::new(first.loc.extend(end), EnumMember {
        name: member_name,
        initializer,
        doc: member_doc,
      }));
      if !self.consume_if(TT::Comma).is_match() {
        break;
      }
    }
    let close = self.require(TT::BraceClose)?;
    let loc = Loc(start.loc.0, close.loc.1);
    Ok(Node::new(loc, Stmt::EnumDecl(Node::new(loc, EnumDecl {
      export,
      declare,
      const_,
      name,
      members,
      doc,
    }))))
  }

  /// `namespace A.B { ... }` or `module Foo { ... }`.
  pub fn namespace_decl(
    &mut self,
    export: bool,
    declare: bool,
    doc: Option<String>,
  ) -> SyntaxResult<Node<Stmt>> {
    let start = self.consume(); // `namespace` or `module`
    let mut name = self.require_binding_name()?;
    while self.consume_if(TT::Dot).is_match() {
      name.push('.');
      name.push_str(&self.require_name()?);
    }
    self.require(TT::BraceOpen)?;
    let body = self.stmts_until_brace_close()?;
    let close = self.require(TT::BraceClose)?;
    let loc = Loc(start.loc.0, close.loc.1);
    Ok(Node::new(
      loc,
      Stmt::NamespaceDecl(Node::new(loc, NamespaceDecl {
        export,
        declare,
        name,
        body,
        doc,
      })),
    ))
  }

  /// `module "m" { ... }` / `declare module "m";`.
  pub fn module_decl(&mut self, declare: bool) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::KeywordModule)?;
    let name = ModuleName::String(self.lit_str_val()?);
    let body = if self.consume_if(TT::BraceOpen).is_match() {
      let body = self.stmts_until_brace_close()?;
      self.require(TT::BraceClose)?;
      Some(body)
    } else {
      self.semi();
      None
    };
    let loc = self.module_loc(start.loc);
    Ok(Node::new(loc, Stmt::ModuleDecl(Node::new(loc, ModuleDecl {
      declare,
      name,
      body,
    }))))
  }

  fn module_loc(&mut self, start: Loc) -> Loc {
    let end = self.peek().loc.0;
    Loc(start.0, end.max(start.1))
  }
}
