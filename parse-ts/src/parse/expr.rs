use super::Parser;
use crate::ast::expr::*;
use crate::ast::func::Func;
use crate::ast::func::FuncBody;
use crate::ast::node::Node;
use crate::ast::type_expr::PropKey;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::LexMode;
use crate::loc::Loc;
use crate::token::TT;

/// Left binding power for binary operators. Assignment, conditional, `as`,
/// and unary forms are handled outside the table.
fn binary_binding_power(typ: TT) -> Option<u8> {
  Some(match typ {
    TT::QuestionQuestion => 1,
    TT::BarBar => 2,
    TT::AmpersandAmpersand => 3,
    TT::Bar => 4,
    TT::Caret => 5,
    TT::Ampersand => 6,
    TT::EqualsEquals | TT::ExclamationEquals | TT::EqualsEqualsEquals | TT::ExclamationEqualsEquals => 7,
    TT::ChevronLeft
    | TT::ChevronRight
    | TT::ChevronLeftEquals
    | TT::ChevronRightEquals
    | TT::KeywordInstanceof
    | TT::KeywordIn => 8,
    TT::ChevronLeftChevronLeft
    | TT::ChevronRightChevronRight
    | TT::ChevronRightChevronRightChevronRight => 9,
    TT::Plus | TT::Hyphen => 10,
    TT::Asterisk | TT::Slash | TT::Percent => 11,
    TT::AsteriskAsterisk => 12,
    _ => return None,
  })
}

fn is_assignment_op(typ: TT) -> bool {
  matches!(
    typ,
    TT::Equals
      | TT::PlusEquals
      | TT::HyphenEquals
      | TT::AsteriskEquals
      | TT::SlashEquals
      | TT::PercentEquals
      | TT::AsteriskAsteriskEquals
      | TT::ChevronLeftChevronLeftEquals
      | TT::ChevronRightChevronRightEquals
      | TT::ChevronRightChevronRightChevronRightEquals
      | TT::AmpersandEquals
      | TT::CaretEquals
      | TT::BarEquals
      | TT::AmpersandAmpersandEquals
      | TT::BarBarEquals
      | TT::QuestionQuestionEquals
  )
}

impl<'a> Parser<'a> {
  /// Expression at assignment precedence (no comma operator).
  pub fn expr(&mut self) -> SyntaxResult<Node<Expr>> {
    // Arrow functions bind loosest of all.
    if let Some(arrow) = self.try_parse(|p| p.arrow_func_expr()) {
      return Ok(arrow);
    }
    let left = self.cond_expr()?;
    let t = self.peek();
    if is_assignment_op(t.typ) {
      self.consume();
      let right = self.expr()?;
      let loc = left.loc.extend(right.loc);
      return Ok(Node::new(loc, Expr::Binary(Node::new(loc, BinaryExpr {
        operator: t.typ,
        left,
        right,
      }))));
    }
    Ok(left)
  }

  /// Expression list separated by commas, e.g. parenthesized sequences.
  pub fn expr_sequence(&mut self) -> SyntaxResult<Node<Expr>> {
    let mut first = self.expr()?;
    while self.peek().typ == TT::Comma {
      let comma = self.consume();
      let right = self.expr()?;
      let loc = first.loc.extend(right.loc);
      first = Node::new(loc, Expr::Binary(Node::new(loc, BinaryExpr {
        operator: comma.typ,
        left: first,
        right,
      })));
    }
    Ok(first)
  }

  fn cond_expr(&mut self) -> SyntaxResult<Node<Expr>> {
    let test = self.binary_expr(0)?;
    if !self.consume_if(TT::Question).is_match() {
      return Ok(test);
    }
    let consequent = self.expr()?;
    self.require(TT::Colon)?;
    let alternate = self.expr()?;
    let loc = test.loc.extend(alternate.loc);
    Ok(Node::new(loc, Expr::Cond(Node::new(loc, CondExpr {
      test,
      consequent,
      alternate,
    }))))
  }

  fn binary_expr(&mut self, min_bp: u8) -> SyntaxResult<Node<Expr>> {
    let mut left = self.unary_expr()?;
    loop {
      let t = self.peek();
      // `as` / `satisfies` casts are transparent wrappers.
      if t.typ == TT::KeywordAs || t.typ == TT::KeywordSatisfies {
        self.consume();
        // `as const` has no type expression to speak of.
        if self.consume_if(TT::KeywordConst).is_match() {
          continue;
        }
        let type_expr = self.type_expr()?;
        let loc = left.loc.extend(type_expr.loc);
        left = Node::new(loc, Expr::As(Node::new(loc, AsExpr {
          value: left,
          type_expr,
        })));
        continue;
      }
      let Some(bp) = binary_binding_power(t.typ) else {
        break;
      };
      if bp <= min_bp {
        break;
      }
      self.consume();
      let right = self.binary_expr(bp)?;
      let loc = left.loc.extend(right.loc);
      left = Node::new(loc, Expr::Binary(Node::new(loc, BinaryExpr {
        operator: t.typ,
        left,
        right,
      })));
    }
    Ok(left)
  }

  fn unary_expr(&mut self) -> SyntaxResult<Node<Expr>> {
    let t = self.peek();
    match t.typ {
      TT::Exclamation
      | TT::Tilde
      | TT::Plus
      | TT::Hyphen
      | TT::PlusPlus
      | TT::HyphenHyphen
      | TT::KeywordTypeof
      | TT::KeywordVoid
      | TT::KeywordDelete
      | TT::KeywordAwait
      | TT::KeywordYield => {
        self.consume();
        // `yield` with no operand.
        if t.typ == TT::KeywordYield
          && matches!(
            self.peek().typ,
            TT::Semicolon | TT::BraceClose | TT::ParenthesisClose | TT::Comma | TT::EOF
          )
        {
          return Ok(Node::new(t.loc, Expr::Id(Node::new(t.loc, IdExpr {
            name: "yield".to_string(),
          }))));
        }
        let argument = self.unary_expr()?;
        let loc = Loc(t.loc.0, argument.loc.1);
        Ok(Node::new(loc, Expr::Unary(Node::new(loc, UnaryExpr {
          operator: t.typ,
          argument,
        }))))
      }
      _ => {
        let arg = self.lhs_expr(true)?;
        let t = self.peek();
        if matches!(t.typ, TT::PlusPlus | TT::HyphenHyphen) && !t.preceded_by_line_terminator {
          self.consume();
          let loc = Loc(arg.loc.0, t.loc.1);
          return Ok(Node::new(
            loc,
            Expr::UnaryPostfix(Node::new(loc, UnaryPostfixExpr {
              operator: t.typ,
              argument: arg,
            })),
          ));
        }
        Ok(arg)
      }
    }
  }

  /// Member/call chains on a primary expression.
  fn lhs_expr(&mut self, allow_call: bool) -> SyntaxResult<Node<Expr>> {
    let mut base = self.primary_expr()?;
    loop {
      let t = self.peek();
      match t.typ {
        TT::Dot => {
          self.consume();
          let name = self.require_name()?;
          let loc = self.wrap_loc(base.loc);
          base = Node::new(loc, Expr::Member(Node::new(loc, MemberExpr {
            optional_chaining: false,
            left: base,
            right: name,
          })));
        }
        TT::QuestionDot => {
          self.consume();
          match self.peek().typ {
            TT::ParenthesisOpen if allow_call => {
              let arguments = self.call_args()?;
              let loc = self.wrap_loc(base.loc);
              base = Node::new(loc, Expr::Call(Node::new(loc, CallExpr {
                optional_chaining: true,
                callee: base,
                type_arguments: None,
                arguments,
              })));
            }
            TT::BracketOpen => {
              self.consume();
              let member = self.expr_sequence()?;
              self.require(TT::BracketClose)?;
              let loc = self.wrap_loc(base.loc);
              base = Node::new(
                loc,
                Expr::ComputedMember(Node::new(loc, ComputedMemberExpr {
                  optional_chaining: true,
                  object: base,
                  member,
                })),
              );
            }
            _ => {
              let name = self.require_name()?;
              let loc = self.wrap_loc(base.loc);
              base = Node::new(loc, Expr::Member(Node::new(loc, MemberExpr {
                optional_chaining: true,
                left: base,
                right: name,
              })));
            }
          }
        }
        TT::BracketOpen => {
          self.consume();
          let member = self.expr_sequence()?;
          self.require(TT::BracketClose)?;
          let loc = self.wrap_loc(base.loc);
          base = Node::new(
            loc,
            Expr::ComputedMember(Node::new(loc, ComputedMemberExpr {
              optional_chaining: false,
              object: base,
              member,
            })),
          );
        }
        TT::ParenthesisOpen if allow_call => {
          let arguments = self.call_args()?;
          let loc = self.wrap_loc(base.loc);
          base = Node::new(loc, Expr::Call(Node::new(loc, CallExpr {
            optional_chaining: false,
            callee: base,
            type_arguments: None,
            arguments,
          })));
        }
        TT::ChevronLeft if allow_call => {
          // Generic call like `f<T>(x)`; on failure `<` is a comparison.
          let Some((type_arguments, arguments)) = self.try_parse(|p| {
            let args = p.type_arguments()?;
            if p.peek().typ != TT::ParenthesisOpen {
              return Err(
                p.peek()
                  .error(SyntaxErrorType::ExpectedSyntax("call arguments")),
              );
            }
            let call_args = p.call_args()?;
            Ok((args, call_args))
          }) else {
            break;
          };
          let loc = self.wrap_loc(base.loc);
          base = Node::new(loc, Expr::Call(Node::new(loc, CallExpr {
            optional_chaining: false,
            callee: base,
            type_arguments: Some(type_arguments),
            arguments,
          })));
        }
        TT::Exclamation if !t.preceded_by_line_terminator => {
          self.consume();
          let loc = Loc(base.loc.0, t.loc.1);
          base = Node::new(loc, Expr::NonNull(Node::new(loc, NonNullExpr {
            value: base,
          })));
        }
        TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd => {
          let parts = self.template_parts()?;
          let loc = self.wrap_loc(base.loc);
          base = Node::new(
            loc,
            Expr::TaggedTemplate(Node::new(loc, TaggedTemplateExpr {
              function: base,
              parts,
            })),
          );
        }
        _ => break,
      }
    }
    Ok(base)
  }

  pub fn call_args(&mut self) -> SyntaxResult<Vec<Node<CallArg>>> {
    self.require(TT::ParenthesisOpen)?;
    let mut args = Vec::new();
    while self.peek().typ != TT::ParenthesisClose {
      let start = self.peek().loc;
      let spread = self.consume_if(TT::DotDotDot).is_match();
      let value = self.expr()?;
      let loc = start.extend(value.loc);
      args.push(Node::new(loc, CallArg { spread, value }));
      if !self.consume_if(TT::Comma).is_match() {
        break;
      }
    }
    self.require(TT::ParenthesisClose)?;
    Ok(args)
  }

  /// Template literal parts; the head token has not been consumed yet.
  fn template_parts(&mut self) -> SyntaxResult<Vec<TemplatePart>> {
    let mut tok = self.consume();
    let mut parts = Vec::new();
    let head = self.template_part_text(tok, true);
    if !head.is_empty() {
      parts.push(TemplatePart::Str(head));
    }
    while tok.typ == TT::LiteralTemplatePartString {
      let value = self.expr_sequence()?;
      parts.push(TemplatePart::Expr(value));
      self.require(TT::BraceClose)?;
      tok = self.consume_with_mode(LexMode::TemplateStrContinue);
      let text = self.template_part_text(tok, false);
      if !text.is_empty() {
        parts.push(TemplatePart::Str(text));
      }
    }
    Ok(parts)
  }

  /// Arrow functions: `x => e`, `(a, b) => e`, `async (a) => e`,
  /// `<T>(a: T) => e`. Errors rewind via `try_parse` at the caller.
  fn arrow_func_expr(&mut self) -> SyntaxResult<Node<Expr>> {
    let start = self.peek().loc;
    let async_ = if self.peek().typ == TT::KeywordAsync
      && !self.peek_n::<2>()[1].preceded_by_line_terminator
      && matches!(
        self.peek_n::<2>()[1].typ,
        TT::ParenthesisOpen | TT::Identifier | TT::ChevronLeft
      ) {
      self.consume();
      true
    } else {
      false
    };
    let type_parameters = if self.peek().typ == TT::ChevronLeft {
      self.type_parameters()?
    } else {
      None
    };
    let (parameters, return_type) = if self.peek().typ == TT::ParenthesisOpen {
      let parameters = self.fn_params()?;
      let return_type = self
        .consume_if(TT::Colon)
        .and_then(|| self.type_expr_or_predicate())?;
      (parameters, return_type)
    } else {
      // Single-identifier parameter without parentheses.
      let name_tok = self.peek();
      let name = self.require_binding_name()?;
      let pattern = Node::new(name_tok.loc, crate::ast::pat::Pat::Id(name));
      let param = Node::new(name_tok.loc, crate::ast::func::ParamDecl {
        rest: false,
        optional: false,
        pattern,
        type_annotation: None,
        default_value: None,
      });
      (vec![param], None)
    };
    let arrow_tok = self.peek();
    if arrow_tok.preceded_by_line_terminator {
      return Err(arrow_tok.error(SyntaxErrorType::ExpectedSyntax("arrow")));
    }
    self.require(TT::EqualsChevronRight)?;
    let body = if self.peek().typ == TT::BraceOpen {
      self.require(TT::BraceOpen)?;
      let body = self.stmts_until_brace_close()?;
      self.require(TT::BraceClose)?;
      FuncBody::Block(body)
    } else {
      FuncBody::Expression(self.expr()?)
    };
    let loc = self.wrap_loc(start);
    let func = Node::new(loc, Func {
      arrow: true,
      async_,
      generator: false,
      type_parameters,
      parameters,
      return_type,
      body: Some(body),
    });
    Ok(Node::new(loc, Expr::Arrow(Node::new(loc, ArrowFuncExpr {
      func,
    }))))
  }

  fn primary_expr(&mut self) -> SyntaxResult<Node<Expr>> {
    let t = self.peek();
    match t.typ {
      TT::LiteralNumber => {
        let tok = self.consume();
        Ok(Node::new(tok.loc, Expr::LitNum(Node::new(tok.loc, LitNumExpr {
          raw: self.string(tok.loc),
        }))))
      }
      TT::LiteralBigInt => {
        let tok = self.consume();
        Ok(Node::new(
          tok.loc,
          Expr::LitBigInt(Node::new(tok.loc, LitBigIntExpr {
            raw: self.string(tok.loc),
          })),
        ))
      }
      TT::LiteralString => {
        let tok = self.consume();
        Ok(Node::new(tok.loc, Expr::LitStr(Node::new(tok.loc, LitStrExpr {
          value: super::decode_str_literal(self.str(tok.loc)),
        }))))
      }
      TT::LiteralTrue | TT::LiteralFalse => {
        let tok = self.consume();
        Ok(Node::new(
          tok.loc,
          Expr::LitBool(Node::new(tok.loc, LitBoolExpr {
            value: tok.typ == TT::LiteralTrue,
          })),
        ))
      }
      TT::LiteralNull => {
        let tok = self.consume();
        Ok(Node::new(
          tok.loc,
          Expr::LitNull(Node::new(tok.loc, LitNullExpr {})),
        ))
      }
      TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd => {
        let start = t.loc;
        let parts = self.template_parts()?;
        let loc = self.wrap_loc(start);
        Ok(Node::new(
          loc,
          Expr::LitTemplate(Node::new(loc, LitTemplateExpr { parts })),
        ))
      }
      TT::Slash | TT::SlashEquals => {
        let tok = self.consume_with_mode(LexMode::SlashIsRegex);
        if tok.typ != TT::LiteralRegex {
          return Err(tok.error(SyntaxErrorType::ExpectedSyntax("regex literal")));
        }
        Ok(Node::new(
          tok.loc,
          Expr::LitRegex(Node::new(tok.loc, LitRegexExpr {
            raw: self.string(tok.loc),
          })),
        ))
      }
      TT::KeywordThis => {
        let tok = self.consume();
        Ok(Node::new(tok.loc, Expr::This(Node::new(tok.loc, ThisExpr {}))))
      }
      TT::KeywordSuper => {
        let tok = self.consume();
        Ok(Node::new(
          tok.loc,
          Expr::Super(Node::new(tok.loc, SuperExpr {})),
        ))
      }
      TT::KeywordImport => {
        let tok = self.consume();
        if self.consume_if(TT::Dot).is_match() {
          let prop = self.require_name()?;
          if prop != "meta" {
            return Err(tok.error(SyntaxErrorType::ExpectedSyntax("`meta` property")));
          }
          let loc = self.wrap_loc(tok.loc);
          return Ok(Node::new(
            loc,
            Expr::ImportMeta(Node::new(loc, ImportMeta {})),
          ));
        }
        self.require(TT::ParenthesisOpen)?;
        let module = self.expr()?;
        let close = self.require(TT::ParenthesisClose)?;
        let loc = Loc(tok.loc.0, close.loc.1);
        Ok(Node::new(
          loc,
          Expr::ImportCall(Node::new(loc, ImportCallExpr { module })),
        ))
      }
      TT::KeywordNew => {
        let tok = self.consume();
        let callee = self.lhs_expr(false)?;
        // `new Map<string, number>()`.
        if self.peek().typ == TT::ChevronLeft {
          let _ = self.try_parse(|p| p.type_arguments());
        }
        let arguments = if self.peek().typ == TT::ParenthesisOpen {
          self.call_args()?
        } else {
          Vec::new()
        };
        let loc = self.wrap_loc(tok.loc);
        Ok(Node::new(loc, Expr::New(Node::new(loc, NewExpr {
          callee,
          arguments,
        }))))
      }
      TT::ParenthesisOpen => {
        let open = self.consume();
        let value = self.expr_sequence()?;
        let close = self.require(TT::ParenthesisClose)?;
        let loc = Loc(open.loc.0, close.loc.1);
        Ok(Node::new(loc, Expr::Paren(Node::new(loc, ParenExpr {
          value,
        }))))
      }
      TT::BracketOpen => {
        let open = self.consume();
        let mut elements = Vec::new();
        while self.peek().typ != TT::BracketClose {
          if self.consume_if(TT::Comma).is_match() {
            continue; // elision
          }
          let start = self.peek().loc;
          if self.consume_if(TT::DotDotDot).is_match() {
            let value = self.expr()?;
            let loc = start.extend(value.loc);
            elements.push(Node::new(loc, Expr::Spread(Node::new(loc, SpreadExpr {
              value,
            }))));
          } else {
            elements.push(self.expr()?);
          }
          if !self.consume_if(TT::Comma).is_match() {
            break;
          }
        }
        let close = self.require(TT::BracketClose)?;
        let loc = Loc(open.loc.0, close.loc.1);
        Ok(Node::new(
          loc,
          Expr::LitArr(Node::new(loc, LitArrExpr { elements })),
        ))
      }
      TT::BraceOpen => self.obj_literal(),
      TT::KeywordFunction | TT::KeywordAsync => {
        // `async` on its own is just an identifier.
        if t.typ == TT::KeywordAsync && self.peek_n::<2>()[1].typ != TT::KeywordFunction {
          let tok = self.consume();
          return Ok(Node::new(tok.loc, Expr::Id(Node::new(tok.loc, IdExpr {
            name: self.string(tok.loc),
          }))));
        }
        let start = t.loc;
        let async_ = self.consume_if(TT::KeywordAsync).is_match();
        self.require(TT::KeywordFunction)?;
        let generator = self.consume_if(TT::Asterisk).is_match();
        let name = if self.peek().typ == TT::Identifier {
          Some(self.consume_as_string())
        } else {
          None
        };
        let func = self.func_tail(async_, generator)?;
        let loc = Loc(start.0, func.loc.1);
        Ok(Node::new(loc, Expr::Func(Node::new(loc, FuncExpr {
          name,
          func,
        }))))
      }
      TT::KeywordClass => {
        let start = self.consume();
        let name = if self.peek().typ == TT::Identifier {
          Some(self.consume_as_string())
        } else {
          None
        };
        let body = self.class_body()?;
        let loc = Loc(start.loc.0, body.loc.1);
        Ok(Node::new(loc, Expr::Class(Node::new(loc, ClassExpr {
          name,
          body,
        }))))
      }
      TT::ChevronLeft => self.jsx_element().map(|elem| {
        let loc = elem.loc;
        Node::new(loc, Expr::Jsx(elem))
      }),
      typ if typ == TT::Identifier || typ.is_unreserved_keyword() => {
        let tok = self.consume();
        Ok(Node::new(tok.loc, Expr::Id(Node::new(tok.loc, IdExpr {
          name: self.string(tok.loc),
        }))))
      }
      _ => Err(t.error(SyntaxErrorType::ExpectedSyntax("expression"))),
    }
  }

  fn obj_literal(&mut self) -> SyntaxResult<Node<Expr>> {
    let open = self.require(TT::BraceOpen)?;
    let mut members = Vec::new();
    while self.peek().typ != TT::BraceClose {
      let first = self.peek();
      let doc = self.doc_text(&first);
      let start = first.loc;
      let typ = if self.consume_if(TT::DotDotDot).is_match() {
        let value = self.expr()?;
        ObjMemberType::Rest { value }
      } else if (first.typ == TT::KeywordGet || first.typ == TT::KeywordSet)
        && self.peek_n::<2>()[1].typ.is_name_like()
      {
        let is_get = self.consume().typ == TT::KeywordGet;
        let key = self.type_prop_key()?;
        let func = self.func_tail(false, false)?;
        if is_get {
          ObjMemberType::Getter { key, func }
        } else {
          ObjMemberType::Setter { key, func }
        }
      } else {
        let async_ = first.typ == TT::KeywordAsync
          && self.peek_n::<2>()[1].typ.is_name_like();
        if async_ {
          self.consume();
        }
        let generator = self.consume_if(TT::Asterisk).is_match();
        let key = self.type_prop_key()?;
        match self.peek().typ {
          TT::ParenthesisOpen | TT::ChevronLeft => {
            let func = self.func_tail(async_, generator)?;
            ObjMemberType::Method { key, func }
          }
          TT::Colon => {
            self.consume();
            let value = self.expr()?;
            ObjMemberType::Valued { key, value }
          }
          _ => match key {
            PropKey::Ident(name) => ObjMemberType::Shorthand { name },
            _ => {
              return Err(
                first.error(SyntaxErrorType::ExpectedSyntax("property value")),
              )
            }
          },
        }
      };
      let loc = self.wrap_loc(start);
      members.push(Node::new(loc, ObjMember { typ, doc }));
      if !self.consume_if(TT::Comma).is_match() {
        break;
      }
    }
    let close = self.require(TT::BraceClose)?;
    let loc = Loc(open.loc.0, close.loc.1);
    Ok(Node::new(
      loc,
      Expr::LitObj(Node::new(loc, LitObjExpr { members })),
    ))
  }
}
