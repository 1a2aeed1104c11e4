use super::Parser;
use crate::ast::expr::BinaryExpr;
use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::ast::pat::Pat;
use crate::ast::stmt::*;
use crate::ast::TopLevel;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn parse_top_level(&mut self) -> SyntaxResult<Node<TopLevel>> {
    let mut body = Vec::new();
    while self.peek().typ != TT::EOF {
      body.push(self.stmt()?);
    }
    Ok(Node::new(self.source_range(), TopLevel { body }))
  }

  pub fn stmts_until_brace_close(&mut self) -> SyntaxResult<Vec<Node<Stmt>>> {
    let mut body = Vec::new();
    loop {
      let t = self.peek();
      if t.typ == TT::BraceClose {
        return Ok(body);
      }
      if t.typ == TT::EOF {
        return Err(t.error(SyntaxErrorType::UnexpectedEnd));
      }
      body.push(self.stmt()?);
    }
  }

  pub fn stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let t = self.peek();
    let doc = self.doc_text(&t);
    match t.typ {
      TT::BraceOpen => {
        let open = self.consume();
        let body = self.stmts_until_brace_close()?;
        let close = self.require(TT::BraceClose)?;
        let loc = Loc(open.loc.0, close.loc.1);
        Ok(Node::new(loc, Stmt::Block(Node::new(loc, BlockStmt { body }))))
      }
      TT::Semicolon => {
        let tok = self.consume();
        Ok(Node::new(
          tok.loc,
          Stmt::Empty(Node::new(tok.loc, EmptyStmt {})),
        ))
      }
      TT::At => {
        // Class decorators; consumed and discarded.
        while self.consume_if(TT::At).is_match() {
          self.lhs_decorator()?;
        }
        self.stmt()
      }
      TT::KeywordExport => self.export_stmt(doc),
      TT::KeywordImport => self.import_or_expr_stmt(),
      TT::KeywordDeclare => {
        let [_, t1] = self.peek_n::<2>();
        match t1.typ {
          TT::Identifier if self.str(t1.loc) == "global" => {
            let start = self.consume(); // declare
            self.consume(); // global
            self.require(TT::BraceOpen)?;
            let body = self.stmts_until_brace_close()?;
            let close = self.require(TT::BraceClose)?;
            let loc = Loc(start.loc.0, close.loc.1);
            Ok(Node::new(
              loc,
              Stmt::GlobalDecl(Node::new(loc, GlobalDecl { body })),
            ))
          }
          _ => {
            self.consume();
            self.decl_stmt(false, true, doc)
          }
        }
      }
      TT::KeywordVar
      | TT::KeywordLet
      | TT::KeywordConst
      | TT::KeywordFunction
      | TT::KeywordClass
      | TT::KeywordAbstract
      | TT::KeywordInterface
      | TT::KeywordEnum => self.decl_stmt(false, false, doc),
      // `async`, `type`, `namespace`, and `module` are contextual: they
      // begin a declaration only when the following token fits one.
      TT::KeywordAsync if self.peek_n::<2>()[1].typ == TT::KeywordFunction => {
        self.decl_stmt(false, false, doc)
      }
      TT::KeywordType if self.peek_n::<2>()[1].typ.is_name_like() => {
        self.decl_stmt(false, false, doc)
      }
      TT::KeywordNamespace | TT::KeywordModule
        if self.peek_n::<2>()[1].typ.is_name_like()
          || self.peek_n::<2>()[1].typ == TT::LiteralString =>
      {
        self.decl_stmt(false, false, doc)
      }
      TT::KeywordIf => {
        let start = self.consume();
        self.require(TT::ParenthesisOpen)?;
        let test = self.expr_sequence()?;
        self.require(TT::ParenthesisClose)?;
        let consequent = Box::new(self.stmt()?);
        let alternate = if self.consume_if(TT::KeywordElse).is_match() {
          Some(Box::new(self.stmt()?))
        } else {
          None
        };
        let loc = self.stmt_loc(start.loc);
        Ok(Node::new(loc, Stmt::If(Node::new(loc, IfStmt {
          test,
          consequent,
          alternate,
        }))))
      }
      TT::KeywordWhile => {
        let start = self.consume();
        self.require(TT::ParenthesisOpen)?;
        let condition = self.expr_sequence()?;
        self.require(TT::ParenthesisClose)?;
        let body = Box::new(self.stmt()?);
        let loc = self.stmt_loc(start.loc);
        Ok(Node::new(loc, Stmt::While(Node::new(loc, WhileStmt {
          condition,
          body,
        }))))
      }
      TT::KeywordDo => {
        let start = self.consume();
        let body = Box::new(self.stmt()?);
        self.require(TT::KeywordWhile)?;
        self.require(TT::ParenthesisOpen)?;
        let condition = self.expr_sequence()?;
        self.require(TT::ParenthesisClose)?;
        self.semi();
        let loc = self.stmt_loc(start.loc);
        Ok(Node::new(loc, Stmt::DoWhile(Node::new(loc, DoWhileStmt {
          body,
          condition,
        }))))
      }
      TT::KeywordFor => self.for_stmt(),
      TT::KeywordSwitch => {
        let start = self.consume();
        self.require(TT::ParenthesisOpen)?;
        let test = self.expr_sequence()?;
        self.require(TT::ParenthesisClose)?;
        self.require(TT::BraceOpen)?;
        let mut branches = Vec::new();
        while self.peek().typ != TT::BraceClose {
          let branch_start = self.peek().loc;
          let case = if self.consume_if(TT::KeywordCase).is_match() {
            let case = self.expr_sequence()?;
            Some(case)
          } else {
            self.require(TT::KeywordDefault)?;
            None
          };
          self.require(TT::Colon)?;
          let mut body = Vec::new();
          while !matches!(
            self.peek().typ,
            TT::KeywordCase | TT::KeywordDefault | TT::BraceClose
          ) {
            body.push(self.stmt()?);
          }
          let loc = self.stmt_loc(branch_start);
          branches.push(Node::new(loc, SwitchBranch { case, body }));
        }
        self.require(TT::BraceClose)?;
        let loc = self.stmt_loc(start.loc);
        Ok(Node::new(loc, Stmt::Switch(Node::new(loc, SwitchStmt {
          test,
          branches,
        }))))
      }
      TT::KeywordReturn => {
        let start = self.consume();
        let next = self.peek();
        let value = if matches!(
          next.typ,
          TT::Semicolon | TT::BraceClose | TT::EOF
        ) || next.preceded_by_line_terminator
        {
          None
        } else {
          Some(self.expr_sequence()?)
        };
        self.semi();
        let loc = self.stmt_loc(start.loc);
        Ok(Node::new(
          loc,
          Stmt::Return(Node::new(loc, ReturnStmt { value })),
        ))
      }
      TT::KeywordThrow => {
        let start = self.consume();
        let value = self.expr_sequence()?;
        self.semi();
        let loc = self.stmt_loc(start.loc);
        Ok(Node::new(
          loc,
          Stmt::Throw(Node::new(loc, ThrowStmt { value })),
        ))
      }
      TT::KeywordTry => {
        let start = self.consume();
        self.require(TT::BraceOpen)?;
        let wrapped_body = self.stmts_until_brace_close()?;
        let wrapped_close = self.require(TT::BraceClose)?;
        let wrapped = Node::new(Loc(start.loc.0, wrapped_close.loc.1), BlockStmt {
          body: wrapped_body,
        });
        let catch = if self.consume_if(TT::KeywordCatch).is_match() {
          let catch_start = self.peek().loc;
          let parameter = if self.consume_if(TT::ParenthesisOpen).is_match() {
            let p = self.pat()?;
            // Optional catch parameter annotation.
            if self.consume_if(TT::Colon).is_match() {
              self.type_expr()?;
            }
            self.require(TT::ParenthesisClose)?;
            Some(p)
          } else {
            None
          };
          self.require(TT::BraceOpen)?;
          let body = self.stmts_until_brace_close()?;
          self.require(TT::BraceClose)?;
          let loc = self.stmt_loc(catch_start);
          Some(Node::new(loc, CatchBlock { parameter, body }))
        } else {
          None
        };
        let finally = if self.consume_if(TT::KeywordFinally).is_match() {
          let fin_start = self.require(TT::BraceOpen)?;
          let body = self.stmts_until_brace_close()?;
          let close = self.require(TT::BraceClose)?;
          Some(Node::new(Loc(fin_start.loc.0, close.loc.1), BlockStmt {
            body,
          }))
        } else {
          None
        };
        if catch.is_none() && finally.is_none() {
          return Err(start.error(SyntaxErrorType::ExpectedSyntax("catch or finally")));
        }
        let loc = self.stmt_loc(start.loc);
        Ok(Node::new(loc, Stmt::Try(Node::new(loc, TryStmt {
          wrapped,
          catch,
          finally,
        }))))
      }
      TT::KeywordBreak | TT::KeywordContinue => {
        let tok = self.consume();
        let label = if self.peek().typ == TT::Identifier && !self.peek().preceded_by_line_terminator
        {
          Some(self.consume_as_string())
        } else {
          None
        };
        self.semi();
        let loc = self.stmt_loc(tok.loc);
        Ok(if tok.typ == TT::KeywordBreak {
          Node::new(loc, Stmt::Break(Node::new(loc, BreakStmt { label })))
        } else {
          Node::new(loc, Stmt::Continue(Node::new(loc, ContinueStmt { label })))
        })
      }
      TT::KeywordDebugger => {
        let tok = self.consume();
        self.semi();
        Ok(Node::new(
          tok.loc,
          Stmt::Debugger(Node::new(tok.loc, DebuggerStmt {})),
        ))
      }
      TT::Identifier => {
        // Labelled statement: `name: stmt`.
        let [t0, t1] = self.peek_n::<2>();
        if t1.typ == TT::Colon {
          let name = self.consume_as_string();
          self.consume();
          let statement = Box::new(self.stmt()?);
          let loc = self.stmt_loc(t0.loc);
          return Ok(Node::new(loc, Stmt::Labelled(Node::new(loc, LabelledStmt {
            name,
            statement,
          }))));
        }
        self.expr_stmt()
      }
      _ => self.expr_stmt(),
    }
  }

  fn stmt_loc(&mut self, start: Loc) -> Loc {
    let end = self.peek().loc.0;
    Loc(start.0, end.max(start.1))
  }

  fn expr_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.peek().loc;
    let expr = self.expr_sequence()?;
    self.semi();
    let loc = self.stmt_loc(start);
    Ok(Node::new(loc, Stmt::Expr(Node::new(loc, ExprStmt { expr }))))
  }

  fn for_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::KeywordFor)?;
    // `for await (... of ...)`.
    let _ = self.consume_if(TT::KeywordAwait);
    self.require(TT::ParenthesisOpen)?;

    // for-in / for-of with a declared binding.
    let decl_mode = match self.peek().typ {
      TT::KeywordVar => Some(VarDeclMode::Var),
      TT::KeywordLet => Some(VarDeclMode::Let),
      TT::KeywordConst => Some(VarDeclMode::Const),
      _ => None,
    };
    if let Some(mode) = decl_mode {
      let cp = self.checkpoint();
      self.consume();
      let pat = self.pat()?;
      let next = self.peek();
      if next.typ == TT::KeywordOf || next.typ == TT::KeywordIn {
        let of = self.consume().typ == TT::KeywordOf;
        let rhs = self.expr_sequence()?;
        self.require(TT::ParenthesisClose)?;
        let body = Box::new(self.stmt()?);
        let loc = self.stmt_loc(start.loc);
        return Ok(Node::new(loc, Stmt::ForInOf(Node::new(loc, ForInOfStmt {
          of,
          lhs: pat,
          rhs,
          body,
        }))));
      }
      // Plain triple `for`: rewind and reparse the header as a var decl.
      self.restore_checkpoint(cp);
      self.consume(); // the `var`/`let`/`const` again
      let decl = self.var_decl_after_modifiers(false, false, mode, None)?;
      self.require(TT::Semicolon)?;
      return self.for_triple_tail(start.loc, Some(ForInit::Decl(decl)));
    }

    // Expression (or empty) initializer.
    if self.consume_if(TT::Semicolon).is_match() {
      return self.for_triple_tail(start.loc, None);
    }
    let cp = self.checkpoint();
    let init = self.expr_sequence()?;
    let next = self.peek();
    // `for (x in obj)`: the header parsed as one `in` binary expression.
    let header_is_in = next.typ == TT::ParenthesisClose
      && matches!(
        init.stx.as_ref(),
        Expr::Binary(b) if b.stx.operator == TT::KeywordIn
      );
    if header_is_in {
      let Expr::Binary(binary) = *init.stx else {
        unreachable!();
      };
      let BinaryExpr { left, right, .. } = *binary.stx;
      let lhs = match left.stx.as_ref() {
        Expr::Id(id) => Node::new(left.loc, Pat::Id(id.stx.name.clone())),
        _ => Node::new(left.loc, Pat::Object),
      };
      self.require(TT::ParenthesisClose)?;
      let body = Box::new(self.stmt()?);
      let loc = self.stmt_loc(start.loc);
      return Ok(Node::new(loc, Stmt::ForInOf(Node::new(loc, ForInOfStmt {
        of: false,
        lhs,
        rhs: right,
        body,
      }))));
    }
    if next.typ == TT::KeywordOf || next.typ == TT::KeywordIn {
      let of = self.consume().typ == TT::KeywordOf;
      // Re-interpret the initializer as a loose assignment target.
      let lhs = match *init.stx {
        Expr::Id(id) => Node::new(init.loc, Pat::Id(id.stx.name.clone())),
        _ => Node::new(init.loc, Pat::Object),
      };
      let rhs = self.expr_sequence()?;
      self.require(TT::ParenthesisClose)?;
      let body = Box::new(self.stmt()?);
      let loc = self.stmt_loc(start.loc);
      return Ok(Node::new(loc, Stmt::ForInOf(Node::new(loc, ForInOfStmt {
        of,
        lhs,
        rhs,
        body,
      }))));
    }
    let _ = cp;
    self.require(TT::Semicolon)?;
    self.for_triple_tail(start.loc, Some(ForInit::Expr(init)))
  }

  fn for_triple_tail(
    &mut self,
    start: Loc,
    init: Option<ForInit>,
  ) -> SyntaxResult<Node<Stmt>> {
    let condition = if self.peek().typ == TT::Semicolon {
      None
    } else {
      Some(self.expr_sequence()?)
    };
    self.require(TT::Semicolon)?;
    let post = if self.peek().typ == TT::ParenthesisClose {
      None
    } else {
      Some(self.expr_sequence()?)
    };
    self.require(TT::ParenthesisClose)?;
    let body = Box::new(self.stmt()?);
    let loc = self.stmt_loc(start);
    Ok(Node::new(loc, Stmt::For(Node::new(loc, ForStmt {
      init,
      condition,
      post,
      body,
    }))))
  }

  /// Declaration statement after any `export`/`declare` modifiers have been
  /// consumed.
  pub fn decl_stmt(
    &mut self,
    export: bool,
    declare: bool,
    doc: Option<String>,
  ) -> SyntaxResult<Node<Stmt>> {
    let t = self.peek();
    match t.typ {
      TT::KeywordVar | TT::KeywordLet | TT::KeywordConst => {
        // `const enum E {}`.
        if t.typ == TT::KeywordConst && self.peek_n::<2>()[1].typ == TT::KeywordEnum {
          self.consume();
          return self.enum_decl(export, declare, true, doc);
        }
        let mode = match self.consume().typ {
          TT::KeywordVar => VarDeclMode::Var,
          TT::KeywordLet => VarDeclMode::Let,
          _ => VarDeclMode::Const,
        };
        let decl = self.var_decl_after_modifiers(export, declare, mode, doc)?;
        self.semi();
        Ok(decl.wrap(Stmt::VarDecl))
      }
      TT::KeywordFunction | TT::KeywordAsync => {
        let start = t.loc;
        let async_ = self.consume_if(TT::KeywordAsync).is_match();
        self.require(TT::KeywordFunction)?;
        let generator = self.consume_if(TT::Asterisk).is_match();
        let name = if self.peek().typ.is_name_like() {
          Some(self.require_binding_name()?)
        } else {
          None
        };
        let function = self.func_tail(async_, generator)?;
        self.semi();
        let loc = self.stmt_loc(start);
        Ok(Node::new(
          loc,
          Stmt::FunctionDecl(Node::new(loc, FuncDecl {
            export,
            declare,
            name,
            function,
            doc,
          })),
        ))
      }
      TT::KeywordClass | TT::KeywordAbstract => {
        let start = t.loc;
        let abstract_ = self.consume_if(TT::KeywordAbstract).is_match();
        self.require(TT::KeywordClass)?;
        let name = if self.peek().typ.is_name_like() {
          Some(self.require_binding_name()?)
        } else {
          None
        };
        let body = self.class_body()?;
        let loc = self.stmt_loc(start);
        Ok(Node::new(loc, Stmt::ClassDecl(Node::new(loc, ClassDecl {
          export,
          declare,
          abstract_,
          name,
          body,
          doc,
        }))))
      }
      TT::KeywordInterface => self.interface_decl(export, declare, doc),
      TT::KeywordType => self.type_alias_decl(export, declare, doc),
      TT::KeywordEnum => {
        self.enum_decl(export, declare, false, doc)
      }
      TT::KeywordNamespace => self.namespace_decl(export, declare, doc),
      TT::KeywordModule => {
        // `module Foo {}` is namespace syntax; `module "foo" {}` is a module
        // declaration.
        let [_, t1] = self.peek_n::<2>();
        if t1.typ == TT::LiteralString {
          self.module_decl(declare)
        } else {
          self.namespace_decl(export, declare, doc)
        }
      }
      _ => Err(t.error(SyntaxErrorType::ExpectedSyntax("declaration"))),
    }
  }

  pub fn var_decl_after_modifiers(
    &mut self,
    export: bool,
    declare: bool,
    mode: VarDeclMode,
    doc: Option<String>,
  ) -> SyntaxResult<Node<VarDecl>> {
    let start = self.peek().loc;
    let mut declarators = Vec::new();
    loop {
      let pattern = self.pat()?;
      // Definite assignment assertion: `x!: T`.
      let _ = self.consume_if(TT::Exclamation);
      let type_annotation = self.consume_if(TT::Colon).and_then(|| self.type_expr())?;
      let initializer = self.consume_if(TT::Equals).and_then(|| self.expr())?;
      declarators.push(VarDeclarator {
        pattern,
        type_annotation,
        initializer,
      });
      if !self.consume_if(TT::Comma).is_match() {
        break;
      }
    }
    let loc = self.stmt_loc(start);
    Ok(Node::new(loc, VarDecl {
      export,
      declare,
      mode,
      declarators,
      doc,
    }))
  }
}
