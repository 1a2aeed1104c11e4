use super::Parser;
use crate::ast::node::Node;
use crate::ast::type_expr::*;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::token::TT;

impl<'a> Parser<'a> {
  /// Main entry point for parsing type expressions.
  pub fn type_expr(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    self.type_union(true)
  }

  /// Return-type position: also accepts predicates (`x is T`, `asserts x`).
  pub fn type_expr_or_predicate(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    let cp = self.checkpoint();
    let start = self.peek().loc;
    let asserts = self.consume_if(TT::KeywordAsserts).is_match();
    let t = self.peek();
    if t.typ == TT::Identifier || t.typ == TT::KeywordThis || t.typ.is_unreserved_keyword() {
      let name_tok = self.consume();
      let parameter_name = self.string(name_tok.loc);
      if self.consume_if(TT::KeywordIs).is_match() {
        let annotation = self.type_expr()?;
        let loc = Loc(start.0, annotation.loc.1);
        let predicate = Node::new(loc, TypePredicate {
          asserts,
          parameter_name,
          type_annotation: Some(Box::new(annotation)),
        });
        return Ok(Node::new(loc, TypeExpr::Predicate(predicate)));
      }
      if asserts {
        let loc = Loc(start.0, name_tok.loc.1);
        let predicate = Node::new(loc, TypePredicate {
          asserts: true,
          parameter_name,
          type_annotation: None,
        });
        return Ok(Node::new(loc, TypeExpr::Predicate(predicate)));
      }
    }
    self.restore_checkpoint(cp);
    self.type_expr()
  }

  /// Union types (lowest precedence): `T | U | V`. A leading `|` is allowed.
  fn type_union(&mut self, allow_conditional: bool) -> SyntaxResult<Node<TypeExpr>> {
    let leading = self.consume_if(TT::Bar).is_match();
    let first = self.type_intersection(allow_conditional)?;
    if !leading && self.peek().typ != TT::Bar {
      return Ok(first);
    }
    let mut types = vec![first];
    while self.consume_if(TT::Bar).is_match() {
      types.push(self.type_intersection(allow_conditional)?);
    }
    if types.len() == 1 {
      return Ok(types.pop().unwrap());
    }
    let loc = types[0].loc.extend(types.last().unwrap().loc);
    Ok(Node::new(loc, TypeExpr::Union(Node::new(loc, TypeUnion {
      types,
    }))))
  }

  /// Intersection types: `T & U & V`. A leading `&` is allowed.
  fn type_intersection(&mut self, allow_conditional: bool) -> SyntaxResult<Node<TypeExpr>> {
    let leading = self.consume_if(TT::Ampersand).is_match();
    let first = self.type_conditional(allow_conditional)?;
    if !leading && self.peek().typ != TT::Ampersand {
      return Ok(first);
    }
    let mut types = vec![first];
    while self.consume_if(TT::Ampersand).is_match() {
      types.push(self.type_conditional(allow_conditional)?);
    }
    if types.len() == 1 {
      return Ok(types.pop().unwrap());
    }
    let loc = types[0].loc.extend(types.last().unwrap().loc);
    Ok(Node::new(
      loc,
      TypeExpr::Intersection(Node::new(loc, TypeIntersection { types })),
    ))
  }

  /// Conditional types: `T extends U ? X : Y`.
  ///
  /// `allow_conditional` is false inside a conditional's own `extends`
  /// operand, where a nested bare `extends` would be ambiguous.
  fn type_conditional(&mut self, allow_conditional: bool) -> SyntaxResult<Node<TypeExpr>> {
    let check_type = self.type_unary()?;
    if !allow_conditional || self.peek().typ != TT::KeywordExtends {
      return Ok(check_type);
    }
    self.require(TT::KeywordExtends)?;
    let extends_type = self.type_union(false)?;
    self.require(TT::Question)?;
    let true_type = self.type_expr()?;
    self.require(TT::Colon)?;
    let false_type = self.type_expr()?;
    let loc = check_type.loc.extend(false_type.loc);
    Ok(Node::new(
      loc,
      TypeExpr::Conditional(Node::new(loc, TypeConditional {
        check_type: Box::new(check_type),
        extends_type: Box::new(extends_type),
        true_type: Box::new(true_type),
        false_type: Box::new(false_type),
      })),
    ))
  }

  /// Prefix type operators: `keyof`, `readonly`, `unique`, `infer`,
  /// `typeof`.
  fn type_unary(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    let t = self.peek();
    match t.typ {
      TT::KeywordKeyof | TT::KeywordReadonly => {
        let op_tok = self.consume();
        let op = if op_tok.typ == TT::KeywordKeyof {
          TypeOpKind::KeyOf
        } else {
          TypeOpKind::Readonly
        };
        let operand = self.type_unary()?;
        let loc = Loc(op_tok.loc.0, operand.loc.1);
        Ok(Node::new(loc, TypeExpr::Operator(Node::new(loc, TypeOp {
          op,
          operand: Box::new(operand),
        }))))
      }
      TT::KeywordUnique => {
        let op_tok = self.consume();
        let operand = self.type_unary()?;
        let loc = Loc(op_tok.loc.0, operand.loc.1);
        Ok(Node::new(loc, TypeExpr::Operator(Node::new(loc, TypeOp {
          op: TypeOpKind::Unique,
          operand: Box::new(operand),
        }))))
      }
      TT::KeywordInfer => {
        let op_tok = self.consume();
        let name_tok = self.consume();
        let type_parameter = self.string(name_tok.loc);
        // `infer T extends U` binds the constraint tightly.
        let constraint = if self.peek().typ == TT::KeywordExtends {
          let cp = self.checkpoint();
          self.consume();
          match self.type_union(false) {
            Ok(c) if self.peek().typ != TT::Question => Some(Box::new(c)),
            _ => {
              self.restore_checkpoint(cp);
              None
            }
          }
        } else {
          None
        };
        let end = constraint.as_ref().map(|c| c.loc.1).unwrap_or(name_tok.loc.1);
        let loc = Loc(op_tok.loc.0, end);
        Ok(Node::new(loc, TypeExpr::Infer(Node::new(loc, TypeInfer {
          type_parameter,
          constraint,
        }))))
      }
      TT::KeywordTypeof => {
        let op_tok = self.consume();
        let expr_name = self.type_entity_name()?;
        let loc = self.since_span(op_tok.loc);
        Ok(self.type_postfix_on(Node::new(
          loc,
          TypeExpr::Query(Node::new(loc, TypeQuery { expr_name })),
        ))?)
      }
      _ => self.type_array_or_postfix(),
    }
  }

  fn since_span(&mut self, start: Loc) -> Loc {
    // Best-effort end: the last buffered consumed token.
    let end = self.peek().loc.0;
    Loc(start.0, end.max(start.1))
  }

  /// Array (`T[]`) and indexed access (`T[K]`) postfix forms.
  fn type_array_or_postfix(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    let base = self.type_primary()?;
    self.type_postfix_on(base)
  }

  fn type_postfix_on(&mut self, mut base: Node<TypeExpr>) -> SyntaxResult<Node<TypeExpr>> {
    loop {
      let next = self.peek();
      if next.typ != TT::BracketOpen || next.preceded_by_line_terminator {
        break;
      }
      self.consume();
      if self.consume_if(TT::BracketClose).is_match() {
        let loc = Loc(base.loc.0, next.loc.1 + 1);
        base = Node::new(loc, TypeExpr::Array(Node::new(loc, TypeArr {
          element_type: Box::new(base),
        })));
      } else {
        let index = self.type_expr()?;
        let close = self.require(TT::BracketClose)?;
        let loc = Loc(base.loc.0, close.loc.1);
        base = Node::new(
          loc,
          TypeExpr::IndexedAccess(Node::new(loc, TypeIndexedAccess {
            object_type: Box::new(base),
            index_type: Box::new(index),
          })),
        );
      }
    }
    Ok(base)
  }

  /// Possibly-qualified entity name: `A` or `A.B.C`.
  pub fn type_entity_name(&mut self) -> SyntaxResult<TypeName> {
    let mut segments = vec![self.require_binding_name()?];
    while self.peek().typ == TT::Dot {
      self.consume();
      segments.push(self.require_name()?);
    }
    Ok(TypeName { segments })
  }

  fn type_primary(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    let t = self.peek();
    let keyword = match t.typ {
      TT::KeywordAny => Some(TypeKeyword::Any),
      TT::KeywordUnknown => Some(TypeKeyword::Unknown),
      TT::KeywordNever => Some(TypeKeyword::Never),
      TT::KeywordVoid => Some(TypeKeyword::Void),
      TT::KeywordStringType => Some(TypeKeyword::String),
      TT::KeywordNumberType => Some(TypeKeyword::Number),
      TT::KeywordBooleanType => Some(TypeKeyword::Boolean),
      TT::KeywordBigIntType => Some(TypeKeyword::BigInt),
      TT::KeywordSymbolType => Some(TypeKeyword::Symbol),
      TT::KeywordObjectType => Some(TypeKeyword::Object),
      TT::KeywordUndefinedType => Some(TypeKeyword::Undefined),
      TT::LiteralNull => Some(TypeKeyword::Null),
      TT::KeywordThis => Some(TypeKeyword::This),
      _ => None,
    };
    if let Some(keyword) = keyword {
      // A keyword immediately followed by `.` or `<` is actually a reference
      // (e.g. a parameter named `string` is illegal, but `any<T>` never is;
      // being permissive here costs nothing).
      if self.peek_n::<2>()[1].typ != TT::Dot {
        let tok = self.consume();
        return Ok(Node::new(
          tok.loc,
          TypeExpr::Keyword(Node::new(tok.loc, keyword)),
        ));
      }
    }

    match t.typ {
      TT::LiteralString => {
        let tok = self.consume();
        let value = super::decode_str_literal(self.str(tok.loc));
        Ok(Node::new(
          tok.loc,
          TypeExpr::Literal(Node::new(tok.loc, TypeLit::String(value))),
        ))
      }
      TT::LiteralNumber | TT::LiteralBigInt => {
        let tok = self.consume();
        Ok(Node::new(
          tok.loc,
          TypeExpr::Literal(Node::new(tok.loc, TypeLit::Number(self.string(tok.loc)))),
        ))
      }
      TT::Hyphen => {
        let start = self.consume();
        let num = self.require(TT::LiteralNumber)?;
        let loc = Loc(start.loc.0, num.loc.1);
        Ok(Node::new(
          loc,
          TypeExpr::Literal(Node::new(loc, TypeLit::Number(self.string(loc)))),
        ))
      }
      TT::LiteralTrue | TT::LiteralFalse => {
        let tok = self.consume();
        Ok(Node::new(
          tok.loc,
          TypeExpr::Literal(Node::new(
            tok.loc,
            TypeLit::Boolean(tok.typ == TT::LiteralTrue),
          )),
        ))
      }
      TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd => {
        self.type_template_literal()
      }
      TT::BracketOpen => self.type_tuple(),
      TT::BraceOpen => self.type_object_or_mapped(),
      TT::ParenthesisOpen => {
        // `(x: T) => R` function type or `(T)` parenthesized type.
        if let Some(func) = self.try_parse(|p| p.type_function(None)) {
          return Ok(func);
        }
        let open = self.consume();
        let inner = self.type_expr()?;
        let close = self.require(TT::ParenthesisClose)?;
        let loc = Loc(open.loc.0, close.loc.1);
        Ok(Node::new(
          loc,
          TypeExpr::Parenthesized(Node::new(loc, TypeParen {
            type_expr: Box::new(inner),
          })),
        ))
      }
      TT::ChevronLeft => {
        // Generic function type: `<T>(x: T) => R`.
        let type_parameters = self.type_parameters()?;
        self.type_function(type_parameters)
      }
      TT::KeywordNew => {
        let start = self.consume();
        let type_parameters = if self.peek().typ == TT::ChevronLeft {
          self.type_parameters()?
        } else {
          None
        };
        let func = self.type_function(type_parameters)?;
        let loc = Loc(start.loc.0, func.loc.1);
        match *func.stx {
          TypeExpr::Function(f) => Ok(Node::new(loc, TypeExpr::Constructor(f))),
          _ => Err(start.error(SyntaxErrorType::ExpectedSyntax("constructor type"))),
        }
      }
      TT::KeywordImport => {
        let start = self.consume();
        self.require(TT::ParenthesisOpen)?;
        let module = self.lit_str_val()?;
        let close = self.require(TT::ParenthesisClose)?;
        let mut end = close.loc.1;
        let qualifier = if self.consume_if(TT::Dot).is_match() {
          let name = self.type_entity_name()?;
          end = self.peek().loc.0.max(end);
          Some(name)
        } else {
          None
        };
        let type_arguments = if self.peek().typ == TT::ChevronLeft {
          Some(self.type_arguments()?)
        } else {
          None
        };
        let loc = Loc(start.loc.0, end);
        Ok(Node::new(loc, TypeExpr::Import(Node::new(loc, TypeImport {
          module,
          qualifier,
          type_arguments,
        }))))
      }
      typ if typ == TT::Identifier || typ.is_unreserved_keyword() || typ == TT::KeywordThis => {
        let start = self.peek().loc;
        let name = self.type_entity_name()?;
        let type_arguments = if self.peek().typ == TT::ChevronLeft {
          Some(self.type_arguments()?)
        } else {
          None
        };
        let loc = self.since_span(start);
        Ok(Node::new(
          loc,
          TypeExpr::Reference(Node::new(loc, TypeRef {
            name,
            type_arguments,
          })),
        ))
      }
      _ => Err(t.error(SyntaxErrorType::ExpectedSyntax("type"))),
    }
  }

  /// Template literal type: `` `prefix${T}suffix` ``.
  fn type_template_literal(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    let head_tok = self.consume();
    let start = head_tok.loc;
    let head = self.template_part_text(head_tok, true);
    let mut spans = Vec::new();
    let mut tok = head_tok;
    while tok.typ == TT::LiteralTemplatePartString {
      let type_expr = self.type_expr()?;
      self.require(TT::BraceClose)?;
      tok = self.consume_with_mode(crate::lex::LexMode::TemplateStrContinue);
      let literal = self.template_part_text(tok, false);
      let loc = type_expr.loc.extend(tok.loc);
      spans.push(Node::new(loc, TypeTemplateSpan { type_expr, literal }));
    }
    let loc = start.extend(tok.loc);
    Ok(Node::new(
      loc,
      TypeExpr::TemplateLiteral(Node::new(loc, TypeTemplate { head, spans })),
    ))
  }

  /// Text of a template part token with the delimiters stripped.
  pub fn template_part_text(&mut self, tok: crate::token::Token, is_head: bool) -> String {
    let mut start = tok.loc.0;
    let mut end = tok.loc.1;
    if is_head {
      start += 1; // opening backtick
    }
    if tok.typ == TT::LiteralTemplatePartString {
      end = end.saturating_sub(2); // `${`
    } else {
      end = end.saturating_sub(1); // closing backtick
    }
    if end < start {
      return String::new();
    }
    self.string(Loc(start, end))
  }

  fn type_tuple(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    let open = self.require(TT::BracketOpen)?;
    let mut elements = Vec::new();
    loop {
      if self.peek().typ == TT::BracketClose {
        break;
      }
      let start = self.peek().loc;
      let rest = self.consume_if(TT::DotDotDot).is_match();
      // Optional label: `name: T` / `name?: T`.
      let label = self.try_parse(|p| {
        let name = p.require_binding_name()?;
        let optional = p.consume_if(TT::Question).is_match();
        p.require(TT::Colon)?;
        Ok((name, optional))
      });
      let (label, optional) = match label {
        Some((name, optional)) => (Some(name), optional),
        None => (None, false),
      };
      let type_expr = self.type_expr()?;
      let loc = start.extend(type_expr.loc);
      elements.push(Node::new(loc, TypeTupleElement {
        label,
        optional,
        rest,
        type_expr,
      }));
      if !self.consume_if(TT::Comma).is_match() {
        break;
      }
    }
    let close = self.require(TT::BracketClose)?;
    let loc = Loc(open.loc.0, close.loc.1);
    Ok(Node::new(
      loc,
      TypeExpr::Tuple(Node::new(loc, TypeTuple { elements })),
    ))
  }

  /// `{ ... }` in type position: a mapped type if it opens with
  /// `[Ident in`, an object type literal otherwise.
  fn type_object_or_mapped(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    let [_, t1, t2, t3, t4] = self.peek_n::<5>();
    let plain_mapped =
      t1.typ == TT::BracketOpen && t2.typ.is_name_like() && t3.typ == TT::KeywordIn;
    let readonly_mapped = matches!(t1.typ, TT::KeywordReadonly | TT::Plus | TT::Hyphen)
      && t2.typ == TT::BracketOpen
      && t3.typ.is_name_like()
      && t4.typ == TT::KeywordIn;
    if plain_mapped || readonly_mapped {
      return self.type_mapped();
    }
    let open = self.require(TT::BraceOpen)?;
    let members = self.type_members_until_brace_close()?;
    let close = self.require(TT::BraceClose)?;
    let loc = Loc(open.loc.0, close.loc.1);
    Ok(Node::new(
      loc,
      TypeExpr::ObjectLiteral(Node::new(loc, TypeObjectLit { members })),
    ))
  }

  fn type_mapped(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    let open = self.require(TT::BraceOpen)?;
    // `+readonly` / `-readonly` modifiers collapse to presence.
    let _ = self.consume_if(TT::Plus);
    let _ = self.consume_if(TT::Hyphen);
    let _ = self.consume_if(TT::KeywordReadonly);
    self.require(TT::BracketOpen)?;
    let type_parameter = self.require_binding_name()?;
    self.require(TT::KeywordIn)?;
    let constraint = self.type_expr()?;
    let name_type = self
      .consume_if(TT::KeywordAs)
      .and_then(|| self.type_expr().map(Box::new))?;
    self.require(TT::BracketClose)?;
    let _ = self.consume_if(TT::Plus);
    let _ = self.consume_if(TT::Hyphen);
    let _ = self.consume_if(TT::Question);
    let type_expr = self
      .consume_if(TT::Colon)
      .and_then(|| self.type_expr().map(Box::new))?;
    self.semi();
    let close = self.require(TT::BraceClose)?;
    let loc = Loc(open.loc.0, close.loc.1);
    Ok(Node::new(loc, TypeExpr::Mapped(Node::new(loc, TypeMapped {
      type_parameter,
      constraint: Box::new(constraint),
      name_type,
      type_expr,
    }))))
  }

  /// Members of an interface body or object type literal, excluding the
  /// braces.
  pub fn type_members_until_brace_close(&mut self) -> SyntaxResult<Vec<Node<TypeMember>>> {
    let mut members = Vec::new();
    while self.peek().typ != TT::BraceClose {
      members.push(self.type_member()?);
      // Members may be separated by `;`, `,`, or just line breaks.
      let _ = self.consume_if(TT::Semicolon);
      let _ = self.consume_if(TT::Comma);
    }
    Ok(members)
  }

  fn type_member(&mut self) -> SyntaxResult<Node<TypeMember>> {
    let first = self.peek();
    let doc = self.doc_text(&first);
    let start = first.loc;

    // Call signature: `(x): R` or `<T>(x): R`.
    if first.typ == TT::ParenthesisOpen || first.typ == TT::ChevronLeft {
      let sig = self.call_signature(doc)?;
      let loc = start.extend(sig.loc);
      return Ok(Node::new(loc, TypeMember::Call(sig)));
    }

    // Construct signature: `new (x): R`.
    if first.typ == TT::KeywordNew {
      let [_, t1] = self.peek_n::<2>();
      if t1.typ == TT::ParenthesisOpen || t1.typ == TT::ChevronLeft {
        self.consume();
        let sig = self.call_signature(doc)?;
        let loc = start.extend(sig.loc);
        return Ok(Node::new(loc, TypeMember::Construct(sig)));
      }
    }

    // `readonly` modifier (only when it modifies a following member name).
    let readonly = if first.typ == TT::KeywordReadonly {
      let [_, t1] = self.peek_n::<2>();
      if t1.typ.is_name_like()
        || t1.typ == TT::LiteralString
        || t1.typ == TT::LiteralNumber
        || t1.typ == TT::BracketOpen
      {
        self.consume();
        true
      } else {
        false
      }
    } else {
      false
    };

    // Index signature: `[key: string]: T`. A computed key like `[Symbol.x]`
    // lacks the `name:` shape and is treated as a property.
    if self.peek().typ == TT::BracketOpen {
      let [_, t1, t2] = self.peek_n::<3>();
      if t1.typ.is_name_like() && t2.typ == TT::Colon {
        self.consume();
        let parameter_name = self.require_binding_name()?;
        self.require(TT::Colon)?;
        let parameter_type = self.type_expr()?;
        self.require(TT::BracketClose)?;
        self.require(TT::Colon)?;
        let type_annotation = self.type_expr()?;
        let loc = start.extend(type_annotation.loc);
        return Ok(Node::new(
          loc,
          TypeMember::Index(Node::new(loc, IndexSig {
            readonly,
            parameter_name,
            parameter_type,
            type_annotation,
            doc,
          })),
        ));
      }
    }

    // Accessors: `get name(): T` / `set name(v: T)`.
    if first.typ == TT::KeywordGet || first.typ == TT::KeywordSet {
      let [_, t1] = self.peek_n::<2>();
      if t1.typ.is_name_like() || t1.typ == TT::LiteralString || t1.typ == TT::BracketOpen {
        let is_get = first.typ == TT::KeywordGet;
        self.consume();
        let key = self.type_prop_key()?;
        self.require(TT::ParenthesisOpen)?;
        if is_get {
          self.require(TT::ParenthesisClose)?;
          let return_type = self.consume_if(TT::Colon).and_then(|| self.type_expr())?;
          let end = return_type.as_ref().map(|r| r.loc).unwrap_or(start);
          let loc = start.extend(end);
          return Ok(Node::new(
            loc,
            TypeMember::Getter(Node::new(loc, GetterSig {
              key,
              return_type,
              doc,
            })),
          ));
        }
        let parameter = self.type_fn_param()?;
        let close = self.require(TT::ParenthesisClose)?;
        let loc = start.extend(close.loc);
        return Ok(Node::new(
          loc,
          TypeMember::Setter(Node::new(loc, SetterSig {
            key,
            parameter,
            doc,
          })),
        ));
      }
    }

    let key = self.type_prop_key()?;
    let optional = self.consume_if(TT::Question).is_match();

    // Method: `name(...)` or `name<T>(...)`.
    if self.peek().typ == TT::ParenthesisOpen || self.peek().typ == TT::ChevronLeft {
      let sig = self.call_signature(None)?;
      let loc = start.extend(sig.loc);
      let sig_stx = *sig.stx;
      return Ok(Node::new(
        loc,
        TypeMember::Method(Node::new(loc, MethodSig {
          optional,
          key,
          type_parameters: sig_stx.type_parameters,
          parameters: sig_stx.parameters,
          return_type: sig_stx.return_type,
          doc,
        })),
      ));
    }

    let type_annotation = self.consume_if(TT::Colon).and_then(|| self.type_expr())?;
    let end = type_annotation.as_ref().map(|t| t.loc).unwrap_or(start);
    let loc = start.extend(end);
    Ok(Node::new(
      loc,
      TypeMember::Property(Node::new(loc, PropertySig {
        readonly,
        optional,
        key,
        type_annotation,
        doc,
      })),
    ))
  }

  pub fn type_prop_key(&mut self) -> SyntaxResult<PropKey> {
    let t = self.peek();
    match t.typ {
      TT::LiteralString => {
        let tok = self.consume();
        Ok(PropKey::String(super::decode_str_literal(
          self.str(tok.loc),
        )))
      }
      TT::LiteralNumber => {
        let tok = self.consume();
        Ok(PropKey::Number(self.string(tok.loc)))
      }
      TT::BracketOpen => {
        self.consume();
        let expr = self.expr()?;
        self.require(TT::BracketClose)?;
        Ok(PropKey::Computed(Box::new(expr)))
      }
      typ if typ.is_name_like() => Ok(PropKey::Ident(self.consume_as_string())),
      _ => Err(t.error(SyntaxErrorType::ExpectedSyntax("property name"))),
    }
  }

  fn call_signature(&mut self, doc: Option<String>) -> SyntaxResult<Node<CallSig>> {
    let start = self.peek().loc;
    let type_parameters = if self.peek().typ == TT::ChevronLeft {
      self.type_parameters()?
    } else {
      None
    };
    let parameters = self.type_fn_params()?;
    let return_type = self
      .consume_if(TT::Colon)
      .and_then(|| self.type_expr_or_predicate())?;
    let loc = self.since_span(start);
    Ok(Node::new(loc, CallSig {
      type_parameters,
      parameters,
      return_type,
      doc,
    }))
  }

  /// Function type: `(params) => R`, with optional already-parsed type
  /// parameters.
  fn type_function(
    &mut self,
    type_parameters: Option<Vec<Node<TypeParameter>>>,
  ) -> SyntaxResult<Node<TypeExpr>> {
    let start = self.peek().loc;
    let parameters = self.type_fn_params()?;
    self.require(TT::EqualsChevronRight)?;
    let return_type = self.type_expr_or_predicate()?;
    let loc = Loc(start.0, return_type.loc.1);
    Ok(Node::new(loc, TypeExpr::Function(Node::new(loc, TypeFn {
      type_parameters,
      parameters,
      return_type: Box::new(return_type),
    }))))
  }

  fn type_fn_params(&mut self) -> SyntaxResult<Vec<Node<TypeFnParam>>> {
    self.require(TT::ParenthesisOpen)?;
    let mut params = Vec::new();
    while self.peek().typ != TT::ParenthesisClose {
      params.push(self.type_fn_param()?);
      if !self.consume_if(TT::Comma).is_match() {
        break;
      }
    }
    self.require(TT::ParenthesisClose)?;
    Ok(params)
  }

  fn type_fn_param(&mut self) -> SyntaxResult<Node<TypeFnParam>> {
    let start = self.peek().loc;
    let rest = self.consume_if(TT::DotDotDot).is_match();
    // Either `name: T`, `name?: T`, or a bare type.
    let named = self.try_parse(|p| {
      let t = p.peek();
      let name = if t.typ == TT::KeywordThis {
        p.consume();
        "this".to_string()
      } else {
        p.require_binding_name()?
      };
      let optional = p.consume_if(TT::Question).is_match();
      p.require(TT::Colon)?;
      Ok((name, optional))
    });
    let (name, optional) = match named {
      Some((name, optional)) => (Some(name), optional),
      None => (None, false),
    };
    // Destructured parameters in type position (`({a, b}: T)`) are unnamed.
    if name.is_none() && matches!(self.peek().typ, TT::BraceOpen | TT::BracketOpen) {
      let cp = self.checkpoint();
      if self.skip_balanced().is_ok() && self.consume_if(TT::Colon).is_match() {
        let type_expr = self.type_expr()?;
        let loc = start.extend(type_expr.loc);
        return Ok(Node::new(loc, TypeFnParam {
          name: None,
          optional: false,
          rest,
          type_expr,
        }));
      }
      self.restore_checkpoint(cp);
    }
    let type_expr = self.type_expr()?;
    let loc = start.extend(type_expr.loc);
    Ok(Node::new(loc, TypeFnParam {
      name,
      optional,
      rest,
      type_expr,
    }))
  }

  /// Skips a balanced `{...}`, `[...]`, or `(...)` group.
  pub fn skip_balanced(&mut self) -> SyntaxResult<()> {
    let open = self.consume();
    let close = match open.typ {
      TT::BraceOpen => TT::BraceClose,
      TT::BracketOpen => TT::BracketClose,
      TT::ParenthesisOpen => TT::ParenthesisClose,
      _ => return Err(open.error(SyntaxErrorType::ExpectedSyntax("bracketed group"))),
    };
    let mut depth = 1usize;
    loop {
      let t = self.consume();
      match t.typ {
        TT::EOF => return Err(t.error(SyntaxErrorType::UnexpectedEnd)),
        typ if typ == open.typ => depth += 1,
        typ if typ == close => {
          depth -= 1;
          if depth == 0 {
            return Ok(());
          }
        }
        _ => {}
      }
    }
  }

  /// Type parameter list: `<T, U extends V = W>`.
  pub fn type_parameters(&mut self) -> SyntaxResult<Option<Vec<Node<TypeParameter>>>> {
    self.require(TT::ChevronLeft)?;
    let mut params = Vec::new();
    loop {
      if self.peek().typ == TT::ChevronRight {
        break;
      }
      let start = self.peek().loc;
      // `const T`, `in T`, `out T` variance/const modifiers.
      let _ = self.consume_if(TT::KeywordConst);
      let _ = self.consume_if(TT::KeywordIn);
      let _ = self.consume_if(TT::KeywordOut);
      let name = self.require_binding_name()?;
      let constraint = self
        .consume_if(TT::KeywordExtends)
        .and_then(|| self.type_expr().map(Box::new))?;
      let default = self
        .consume_if(TT::Equals)
        .and_then(|| self.type_expr().map(Box::new))?;
      let loc = self.since_span(start);
      params.push(Node::new(loc, TypeParameter {
        name,
        constraint,
        default,
      }));
      if !self.consume_if(TT::Comma).is_match() {
        break;
      }
    }
    self.require_chevron_right()?;
    Ok(Some(params))
  }

  /// Type argument list: `<T, U>`.
  pub fn type_arguments(&mut self) -> SyntaxResult<Vec<Node<TypeExpr>>> {
    self.require(TT::ChevronLeft)?;
    let mut args = Vec::new();
    loop {
      if matches!(
        self.peek().typ,
        TT::ChevronRight
          | TT::ChevronRightChevronRight
          | TT::ChevronRightChevronRightChevronRight
      ) {
        break;
      }
      args.push(self.type_expr()?);
      if !self.consume_if(TT::Comma).is_match() {
        break;
      }
    }
    self.require_chevron_right()?;
    Ok(args)
  }
}
