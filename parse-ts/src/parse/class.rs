use super::Parser;
use crate::ast::class::*;
use crate::ast::node::Node;
use crate::ast::type_expr::IndexSig;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::token::TT;

impl<'a> Parser<'a> {
  /// Class body including heritage clauses: everything after the class name.
  pub fn class_body(&mut self) -> SyntaxResult<Node<ClassBody>> {
    let start = self.peek().loc;
    let type_parameters = if self.peek().typ == TT::ChevronLeft {
      self.type_parameters()?
    } else {
      None
    };
    let (extends, extends_type_arguments) = if self.consume_if(TT::KeywordExtends).is_match() {
      let base = self.class_heritage_expr()?;
      let args = if self.peek().typ == TT::ChevronLeft {
        self.try_parse(|p| p.type_arguments())
      } else {
        None
      };
      (Some(base), args)
    } else {
      (None, None)
    };
    let mut implements = Vec::new();
    if self.consume_if(TT::KeywordImplements).is_match() {
      loop {
        implements.push(self.type_expr()?);
        if !self.consume_if(TT::Comma).is_match() {
          break;
        }
      }
    }
    self.require(TT::BraceOpen)?;
    let mut members = Vec::new();
    while self.peek().typ != TT::BraceClose {
      if self.consume_if(TT::Semicolon).is_match() {
        continue;
      }
      members.push(self.class_member()?);
    }
    let close = self.require(TT::BraceClose)?;
    let loc = Loc(start.0, close.loc.1);
    Ok(Node::new(loc, ClassBody {
      type_parameters,
      extends,
      extends_type_arguments,
      implements,
      members,
    }))
  }

  /// Heritage expression: a dotted name, without generic arguments (those are
  /// parsed separately so they can land in `extends_type_arguments`).
  fn class_heritage_expr(&mut self) -> SyntaxResult<Node<crate::ast::expr::Expr>> {
    use crate::ast::expr::{Expr, IdExpr, MemberExpr};
    let tok = self.peek();
    let name = self.require_binding_name()?;
    let mut base = Node::new(tok.loc, Expr::Id(Node::new(tok.loc, IdExpr { name })));
    while self.consume_if(TT::Dot).is_match() {
      let right = self.require_name()?;
      let loc = Loc(tok.loc.0, self.peek().loc.0);
      base = Node::new(loc, Expr::Member(Node::new(loc, MemberExpr {
        optional_chaining: false,
        left: base,
        right,
      })));
    }
    Ok(base)
  }

  fn class_member(&mut self) -> SyntaxResult<Node<ClassMember>> {
    let first = self.peek();
    let doc = self.doc_text(&first);
    let start = first.loc;

    while self.consume_if(TT::At).is_match() {
      self.lhs_decorator()?;
    }

    let mut static_ = false;
    let mut abstract_ = false;
    let mut readonly = false;
    let mut override_ = false;
    let mut declare = false;
    let mut accessibility = None;
    let mut async_ = false;
    loop {
      // A modifier keyword immediately followed by a member-name position is
      // a modifier; otherwise it IS the member name (e.g. a field called
      // `static`).
      let [t0, t1] = self.peek_n::<2>();
      let modifies_next = t1.typ.is_name_like()
        || matches!(
          t1.typ,
          TT::LiteralString
            | TT::LiteralNumber
            | TT::BracketOpen
            | TT::PrivateMember
            | TT::Asterisk
        );
      if !modifies_next {
        break;
      }
      match t0.typ {
        TT::KeywordStatic => static_ = true,
        TT::KeywordAbstract => abstract_ = true,
        TT::KeywordReadonly => readonly = true,
        TT::KeywordOverride => override_ = true,
        TT::KeywordDeclare => declare = true,
        TT::KeywordAsync => async_ = true,
        TT::KeywordPublic => accessibility = Some(Accessibility::Public),
        TT::KeywordProtected => accessibility = Some(Accessibility::Protected),
        TT::KeywordPrivate => accessibility = Some(Accessibility::Private),
        _ => break,
      }
      self.consume();
    }

    // Index signature: `[key: string]: T`.
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
        self.semi();
        let loc = start.extend(type_annotation.loc);
        return Ok(Node::new(loc, ClassMember {
          key: ClassKey::Ident(parameter_name.clone()),
          static_,
          abstract_,
          readonly,
          optional: false,
          override_,
          declare,
          accessibility,
          type_annotation: None,
          val: ClassVal::Index(Node::new(loc, IndexSig {
            readonly,
            parameter_name,
            parameter_type,
            type_annotation,
            doc: doc.clone(),
          })),
          doc,
        }));
      }
    }

    // Accessors.
    let t = self.peek();
    if t.typ == TT::KeywordGet || t.typ == TT::KeywordSet {
      let [_, t1] = self.peek_n::<2>();
      if t1.typ.is_name_like()
        || matches!(
          t1.typ,
          TT::LiteralString | TT::LiteralNumber | TT::BracketOpen | TT::PrivateMember
        )
      {
        let is_get = self.consume().typ == TT::KeywordGet;
        let key = self.class_key()?;
        let func = self.func_tail(false, false)?;
        let loc = self.member_loc(start);
        return Ok(Node::new(loc, ClassMember {
          key,
          static_,
          abstract_,
          readonly,
          optional: false,
          override_,
          declare,
          accessibility,
          type_annotation: None,
          val: if is_get {
            ClassVal::Getter(func)
          } else {
            ClassVal::Setter(func)
          },
          doc,
        }));
      }
    }

    let generator = self.consume_if(TT::Asterisk).is_match();
    let key = self.class_key()?;
    let optional = self.consume_if(TT::Question).is_match();
    let _ = self.consume_if(TT::Exclamation); // definite assignment

    if matches!(self.peek().typ, TT::ParenthesisOpen | TT::ChevronLeft) {
      let func = self.func_tail(async_, generator)?;
      self.semi();
      let loc = self.member_loc(start);
      return Ok(Node::new(loc, ClassMember {
        key,
        static_,
        abstract_,
        readonly,
        optional,
        override_,
        declare,
        accessibility,
        type_annotation: None,
        val: ClassVal::Method(func),
        doc,
      }));
    }

    let type_annotation = self.consume_if(TT::Colon).and_then(|| self.type_expr())?;
    let initializer = self.consume_if(TT::Equals).and_then(|| self.expr())?;
    self.semi();
    let loc = self.member_loc(start);
    Ok(Node::new(loc, ClassMember {
      key,
      static_,
      abstract_,
      readonly,
      optional,
      override_,
      declare,
      accessibility,
      type_annotation,
      val: ClassVal::Prop(initializer),
      doc,
    }))
  }

  fn member_loc(&mut self, start: Loc) -> Loc {
    let end = self.peek().loc.0;
    Loc(start.0, end.max(start.1))
  }

  fn class_key(&mut self) -> SyntaxResult<ClassKey> {
    let t = self.peek();
    match t.typ {
      TT::PrivateMember => {
        let tok = self.consume();
        Ok(ClassKey::Private(self.string(tok.loc)))
      }
      TT::LiteralString => {
        let tok = self.consume();
        Ok(ClassKey::String(super::decode_str_literal(
          self.str(tok.loc),
        )))
      }
      TT::LiteralNumber => {
        let tok = self.consume();
        Ok(ClassKey::Number(self.string(tok.loc)))
      }
      TT::BracketOpen => {
        self.consume();
        let expr = self.expr()?;
        self.require(TT::BracketClose)?;
        Ok(ClassKey::Computed(expr))
      }
      typ if typ.is_name_like() => Ok(ClassKey::Ident(self.consume_as_string())),
      _ => Err(t.error(SyntaxErrorType::ExpectedSyntax("class member name"))),
    }
  }
}
