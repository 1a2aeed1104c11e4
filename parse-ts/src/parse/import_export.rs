use super::Parser;
use crate::ast::import_export::*;
use crate::ast::node::Node;
use crate::ast::stmt::*;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::token::TT;

impl<'a> Parser<'a> {
  /// Statement starting with `import`: an import declaration, an
  /// import-equals declaration, or an expression statement (`import(...)`,
  /// `import.meta`).
  pub fn import_or_expr_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let [t0, t1, t2] = self.peek_n::<3>();
    debug_assert_eq!(t0.typ, TT::KeywordImport);
    // Dynamic import or import.meta as an expression statement.
    if t1.typ == TT::ParenthesisOpen || t1.typ == TT::Dot {
      let start = t0.loc;
      let expr = self.expr_sequence()?;
      self.semi();
      let loc = self.import_loc(start);
      return Ok(Node::new(loc, Stmt::Expr(Node::new(loc, ExprStmt { expr }))));
    }
    // Import equals: `import A = require("m")` / `import A = Ns.Path`.
    // Recognized and consumed; nothing downstream consumes it.
    if t1.typ == TT::Identifier && t2.typ == TT::Equals {
      self.consume();
      self.consume();
      self.consume();
      let _ = self.expr_sequence()?;
      self.semi();
      let loc = self.import_loc(t0.loc);
      return Ok(Node::new(loc, Stmt::Empty(Node::new(loc, EmptyStmt {}))));
    }
    self.import_stmt().map(|stmt| stmt.wrap(Stmt::Import))
  }

  fn import_loc(&mut self, start: Loc) -> Loc {
    let end = self.peek().loc.0;
    Loc(start.0, end.max(start.1))
  }

  /// `import "m"`, `import a from "m"`, `import * as a from "m"`,
  /// `import {a as b} from "m"`, `import a, {b} from "m"`, and the
  /// `import type` variants.
  pub fn import_stmt(&mut self) -> SyntaxResult<Node<ImportStmt>> {
    let start = self.require(TT::KeywordImport)?;
    // `import type {A} from` / `import type A from`, but not
    // `import type from "m"` (where `type` is the default binding).
    let [t1, t2] = self.peek_n::<2>();
    let type_only = t1.typ == TT::KeywordType
      && (matches!(t2.typ, TT::BraceOpen | TT::Asterisk)
        || (t2.typ.is_name_like() && t2.typ != TT::KeywordFrom));
    if type_only {
      self.consume();
    }

    let (default, can_have_names) =
      if self.peek().typ == TT::Identifier || self.peek().typ.is_unreserved_keyword() {
        let default = self.require_binding_name()?;
        (Some(default), self.consume_if(TT::Comma).is_match())
      } else {
        (None, true)
      };

    let names = if !can_have_names {
      None
    } else if self.consume_if(TT::Asterisk).is_match() {
      self.require(TT::KeywordAs)?;
      let local = self.require_binding_name()?;
      Some(ImportNames::All(local))
    } else if self.consume_if(TT::BraceOpen).is_match() {
      let mut names = Vec::new();
      while self.peek().typ != TT::BraceClose {
        // `import { type Foo }` marks one entry; a lone `type` (or
        // `type as T`) is just a binding named `type`.
        let [t0, t1] = self.peek_n::<2>();
        let entry_type_only = t0.typ == TT::KeywordType
          && t1.typ != TT::KeywordAs
          && (t1.typ.is_name_like() || t1.typ == TT::LiteralString);
        if entry_type_only {
          self.consume();
        }
        let imported = if self.peek().typ == TT::LiteralString {
          self.lit_str_val()?
        } else {
          self.require_name()?
        };
        let alias = self
          .consume_if(TT::KeywordAs)
          .and_then(|| self.require_binding_name())?;
        names.push(ImportName {
          type_only: type_only || entry_type_only,
          imported,
          alias,
        });
        if !self.consume_if(TT::Comma).is_match() {
          break;
        }
      }
      self.require(TT::BraceClose)?;
      Some(ImportNames::Specific(names))
    } else {
      None
    };

    if default.is_some() || names.is_some() {
      self.require(TT::KeywordFrom)?;
    }
    let module = self.lit_str_val()?;
    self.semi();
    let loc = self.import_loc(start.loc);
    Ok(Node::new(loc, ImportStmt {
      type_only,
      default,
      names,
      module,
    }))
  }

  /// Statement starting with `export`.
  pub fn export_stmt(&mut self, doc: Option<String>) -> SyntaxResult<Node<Stmt>> {
    let [t0, t1, t2] = self.peek_n::<3>();
    debug_assert_eq!(t0.typ, TT::KeywordExport);
    match t1.typ {
      // `export {..}` / `export * from ".."`.
      TT::BraceOpen | TT::Asterisk => {
        self.consume();
        self.export_list_stmt(false).map(|s| s.wrap(Stmt::ExportList))
      }
      // `export type {..} from ".."` / `export type X = ..`.
      TT::KeywordType if t2.typ == TT::BraceOpen || t2.typ == TT::Asterisk => {
        self.consume();
        self.consume();
        self.export_list_stmt(true).map(|s| s.wrap(Stmt::ExportList))
      }
      // `export default ..`.
      TT::KeywordDefault => {
        let start = self.consume();
        self.consume();
        let expression = self.expr()?;
        self.semi();
        let loc = self.import_loc(start.loc);
        Ok(Node::new(
          loc,
          Stmt::ExportDefault(Node::new(loc, ExportDefaultStmt { expression })),
        ))
      }
      // `export = ..`.
      TT::Equals => {
        let start = self.consume();
        self.consume();
        let expression = self.expr()?;
        self.semi();
        let loc = self.import_loc(start.loc);
        Ok(Node::new(
          loc,
          Stmt::ExportEquals(Node::new(loc, ExportEqualsStmt { expression })),
        ))
      }
      // `export declare ..`.
      TT::KeywordDeclare => {
        self.consume();
        self.consume();
        self.decl_stmt(true, true, doc)
      }
      // `export <declaration>`.
      TT::KeywordVar
      | TT::KeywordLet
      | TT::KeywordConst
      | TT::KeywordFunction
      | TT::KeywordAsync
      | TT::KeywordClass
      | TT::KeywordAbstract
      | TT::KeywordInterface
      | TT::KeywordType
      | TT::KeywordEnum
      | TT::KeywordNamespace
      | TT::KeywordModule => {
        self.consume();
        self.decl_stmt(true, false, doc)
      }
      _ => Err(t1.error(SyntaxErrorType::ExpectedSyntax("exportable"))),
    }
  }

  /// The part of an export list after `export` (and optional `type`):
  /// `{a, b as c} [from "m"]` or `* [as ns] from "m"`.
  fn export_list_stmt(&mut self, type_only: bool) -> SyntaxResult<Node<ExportListStmt>> {
    let start = self.peek().loc;
    let names = if self.consume_if(TT::Asterisk).is_match() {
      let alias = self
        .consume_if(TT::KeywordAs)
        .and_then(|| self.require_binding_name())?;
      ExportNames::All(alias)
    } else {
      self.require(TT::BraceOpen)?;
      let mut names = Vec::new();
      while self.peek().typ != TT::BraceClose {
        let [t0, t1] = self.peek_n::<2>();
        let entry_type_only = t0.typ == TT::KeywordType
          && t1.typ != TT::KeywordAs
          && (t1.typ.is_name_like() || t1.typ == TT::LiteralString);
        if entry_type_only {
          self.consume();
        }
        let target = if self.peek().typ == TT::LiteralString {
          self.lit_str_val()?
        } else {
          self.require_name()?
        };
        let alias = self.consume_if(TT::KeywordAs).and_then(|| {
          if self.peek().typ == TT::LiteralString {
            self.lit_str_val()
          } else {
            self.require_name()
          }
        })?;
        names.push(ExportName {
          type_only: type_only || entry_type_only,
          target,
          alias,
        });
        if !self.consume_if(TT::Comma).is_match() {
          break;
        }
      }
      self.require(TT::BraceClose)?;
      ExportNames::Specific(names)
    };
    let from = self
      .consume_if(TT::KeywordFrom)
      .and_then(|| self.lit_str_val())?;
    if matches!(names, ExportNames::All(_)) && from.is_none() {
      return Err(
        self
          .peek()
          .error(SyntaxErrorType::ExpectedSyntax("`from` clause")),
      );
    }
    self.semi();
    let loc = self.import_loc(start);
    Ok(Node::new(loc, ExportListStmt {
      type_only,
      names,
      from,
    }))
  }
}
