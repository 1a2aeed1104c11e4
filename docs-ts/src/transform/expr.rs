use super::Transformer;
use crate::jsdoc::DocComment;
use crate::node::node_id;
use crate::node::DocNode;
use crate::node::FunctionNode;
use crate::node::InterfaceNode;
use crate::node::MethodNode;
use crate::node::NodeKind;
use crate::node::Properties;
use crate::node::PropertyNode;
use parse_ts::ast::expr::Expr;
use parse_ts::ast::expr::LitObjExpr;
use parse_ts::ast::expr::ObjMemberType;
use parse_ts::ast::func::Func;
use parse_ts::ast::func::FuncBody;
use parse_ts::ast::node::Node;
use parse_ts::ast::stmt::Stmt;

/// Literal text of an expression, for enum member values and `@default`
/// style display. `None` when the expression is not a literal.
pub(crate) fn literal_text(expr: &Node<Expr>) -> Option<String> {
  match expr.stx.as_ref() {
    Expr::LitStr(s) => Some(s.stx.value.clone()),
    Expr::LitNum(n) => Some(n.stx.raw.clone()),
    Expr::LitBigInt(n) => Some(n.stx.raw.clone()),
    Expr::LitBool(b) => Some(b.stx.value.to_string()),
    Expr::Unary(u) if u.stx.operator == parse_ts::token::TT::Hyphen => {
      literal_text(&u.stx.argument).map(|t| format!("-{t}"))
    }
    Expr::Paren(p) => literal_text(&p.stx.value),
    _ => None,
  }
}

/// Callee name of a call expression, e.g. `forwardRef` for both
/// `forwardRef(...)` and `React.forwardRef(...)`.
fn callee_name(expr: &Node<Expr>) -> Option<&str> {
  match expr.stx.as_ref() {
    Expr::Id(id) => Some(&id.stx.name),
    Expr::Member(m) => Some(&m.stx.right),
    _ => None,
  }
}

/// Whether a function produces JSX: a JSX-returning body (directly or via
/// `cloneElement`/`createPortal`), or an explicit `JSX.Element` return
/// annotation.
pub(crate) fn returns_jsx(func: &Func) -> bool {
  if func.returns_jsx_element_type() {
    return true;
  }
  match &func.body {
    Some(FuncBody::Expression(expr)) => expr_is_jsx(expr),
    Some(FuncBody::Block(stmts)) => block_returns_jsx(stmts),
    None => false,
  }
}

fn expr_is_jsx(expr: &Node<Expr>) -> bool {
  match expr.stx.as_ref() {
    Expr::Jsx(_) => true,
    Expr::Paren(p) => expr_is_jsx(&p.stx.value),
    Expr::As(a) => expr_is_jsx(&a.stx.value),
    Expr::Cond(c) => expr_is_jsx(&c.stx.consequent) || expr_is_jsx(&c.stx.alternate),
    Expr::Binary(b) => expr_is_jsx(&b.stx.left) || expr_is_jsx(&b.stx.right),
    Expr::Call(call) => matches!(
      callee_name(&call.stx.callee),
      Some("cloneElement") | Some("createPortal")
    ),
    _ => false,
  }
}

/// Scan statements for `return <jsx>`, without descending into nested
/// function bodies.
fn block_returns_jsx(stmts: &[Node<Stmt>]) -> bool {
  stmts.iter().any(stmt_returns_jsx)
}

fn stmt_returns_jsx(stmt: &Node<Stmt>) -> bool {
  match stmt.stx.as_ref() {
    Stmt::Return(ret) => ret.stx.value.as_ref().is_some_and(expr_is_jsx),
    Stmt::Block(b) => block_returns_jsx(&b.stx.body),
    Stmt::If(i) => {
      stmt_returns_jsx(&i.stx.consequent)
        || i.stx.alternate.as_ref().is_some_and(|a| stmt_returns_jsx(a))
    }
    Stmt::For(f) => stmt_returns_jsx(&f.stx.body),
    Stmt::ForInOf(f) => stmt_returns_jsx(&f.stx.body),
    Stmt::While(w) => stmt_returns_jsx(&w.stx.body),
    Stmt::DoWhile(d) => stmt_returns_jsx(&d.stx.body),
    Stmt::Switch(s) => s.stx.branches.iter().any(|b| block_returns_jsx(&b.stx.body)),
    Stmt::Try(t) => {
      block_returns_jsx(&t.stx.wrapped.stx.body)
        || t
          .stx
          .catch
          .as_ref()
          .is_some_and(|c| block_returns_jsx(&c.stx.body))
        || t
          .stx
          .finally
          .as_ref()
          .is_some_and(|f| block_returns_jsx(&f.stx.body))
    }
    Stmt::Labelled(l) => stmt_returns_jsx(&l.stx.statement),
    _ => false,
  }
}

impl<'a> Transformer<'a> {
  /// Transform a variable initializer into the variable's documented node.
  /// Object literals become synthesized interfaces named after the
  /// variable; functions follow the component rules; `forwardRef`-style
  /// wrappers are unwrapped to their inner function.
  pub(crate) fn initializer_node(
    &mut self,
    init: &Node<Expr>,
    name: &str,
    doc: &DocComment,
  ) -> Option<DocNode> {
    match init.stx.as_ref() {
      Expr::Paren(p) => self.initializer_node(&p.stx.value, name, doc),
      Expr::As(a) => self.initializer_node(&a.stx.value, name, doc),
      Expr::LitObj(obj) => Some(self.object_literal_interface(&obj.stx, name, doc)),
      Expr::Arrow(arrow) => {
        Some(self.function_node(&arrow.stx.func.stx, Some(name), Some(name), doc))
      }
      Expr::Func(func) => {
        Some(self.function_node(&func.stx.func.stx, Some(name), Some(name), doc))
      }
      Expr::Class(class) => Some(self.class_decl(&class.stx.body.stx, name, doc)),
      Expr::Call(call) => {
        // `forwardRef(fn)` / `createHideableComponent(fn)` wrappers are
        // transparent.
        let unwraps = matches!(
          callee_name(&call.stx.callee),
          Some("forwardRef") | Some("createHideableComponent") | Some("memo")
        );
        if unwraps {
          if let Some(arg) = call.stx.arguments.first() {
            return self.initializer_node(&arg.stx.value, name, doc);
          }
        }
        let mut node = self.expr_node(init)?;
        node.fill_docs(doc.docs());
        Some(node)
      }
      _ => {
        let mut node = self.expr_node(init)?;
        node.fill_docs(doc.docs());
        Some(node)
      }
    }
  }

  /// `const x = { ... }` yields an interface named after the variable.
  fn object_literal_interface(
    &mut self,
    obj: &LitObjExpr,
    name: &str,
    doc: &DocComment,
  ) -> DocNode {
    let mut properties = Properties::default();
    for member in &obj.members {
      let member_doc = Self::parse_doc(&member.stx.doc);
      match &member.stx.typ {
        ObjMemberType::Valued { key, value } => {
          let Some(key) = key.name() else {
            continue;
          };
          let value_node = self
            .expr_node(value)
            .unwrap_or_else(|| NodeKind::Any.into());
          properties.insert(
            key.to_string(),
            DocNode::with_docs(
              NodeKind::Property(PropertyNode {
                name: key.to_string(),
                value: Box::new(value_node),
                optional: false,
                index_type: None,
                inherited_from: None,
              }),
              member_doc.docs(),
            ),
          );
        }
        ObjMemberType::Method { key, func } => {
          let Some(key) = key.name() else {
            continue;
          };
          let mut value = self.plain_function_node(&func.stx, Some(key));
          Self::distribute_fn_docs(&mut value, &member_doc);
          properties.insert(
            key.to_string(),
            DocNode::with_docs(
              NodeKind::Method(MethodNode {
                name: key.to_string(),
                value: Box::new(value),
                optional: false,
                inherited_from: None,
              }),
              member_doc.docs(),
            ),
          );
        }
        ObjMemberType::Getter { key, func } => {
          let Some(key) = key.name() else {
            continue;
          };
          let value = func
            .stx
            .return_type
            .as_ref()
            .map(|t| self.type_node(t))
            .unwrap_or(NodeKind::Any.into());
          properties.insert(
            key.to_string(),
            DocNode::with_docs(
              NodeKind::Property(PropertyNode {
                name: key.to_string(),
                value: Box::new(value),
                optional: false,
                index_type: None,
                inherited_from: None,
              }),
              member_doc.docs(),
            ),
          );
        }
        ObjMemberType::Setter { .. } => {}
        ObjMemberType::Shorthand { name: key } => {
          let value = self.identifier_node(key);
          properties.insert(
            key.clone(),
            DocNode::with_docs(
              NodeKind::Property(PropertyNode {
                name: key.clone(),
                value: Box::new(value),
                optional: false,
                index_type: None,
                inherited_from: None,
              }),
              member_doc.docs(),
            ),
          );
        }
        ObjMemberType::Rest { .. } => {}
      }
    }
    DocNode::with_docs(
      NodeKind::Interface(InterfaceNode {
        id: node_id(self.file, name),
        name: name.to_string(),
        extends: Vec::new(),
        properties,
        type_parameters: Vec::new(),
      }),
      doc.docs(),
    )
  }

  /// Transform a general expression into a node, for initializers and
  /// `extends` positions. Returns `None` when the expression has no
  /// documentation value.
  pub(crate) fn expr_node(&mut self, expr: &Node<Expr>) -> Option<DocNode> {
    match expr.stx.as_ref() {
      Expr::Paren(p) => self.expr_node(&p.stx.value),
      Expr::As(a) => self.expr_node(&a.stx.value),
      Expr::NonNull(n) => self.expr_node(&n.stx.value),
      Expr::LitStr(s) => Some(
        NodeKind::String {
          value: Some(s.stx.value.clone()),
        }
        .into(),
      ),
      Expr::LitNum(n) => Some(
        NodeKind::Number {
          value: Some(n.stx.raw.clone()),
        }
        .into(),
      ),
      Expr::LitBigInt(n) => Some(
        NodeKind::Number {
          value: Some(n.stx.raw.clone()),
        }
        .into(),
      ),
      Expr::LitBool(b) => Some(
        NodeKind::Boolean {
          value: Some(b.stx.value.to_string()),
        }
        .into(),
      ),
      Expr::LitNull(_) => Some(NodeKind::Null.into()),
      Expr::LitArr(arr) => Some(
        NodeKind::Tuple {
          elements: arr
            .stx
            .elements
            .iter()
            .filter_map(|e| self.expr_node(e))
            .collect(),
        }
        .into(),
      ),
      Expr::Unary(u) if u.stx.operator == parse_ts::token::TT::Hyphen => {
        literal_text(expr).map(|t| NodeKind::Number { value: Some(t) }.into())
      }
      Expr::Id(id) => Some(self.identifier_node(&id.stx.name)),
      Expr::Member(m) => {
        // Qualified value reference like `Colors.red`; reuse the
        // type-position rules.
        let mut segments = vec![m.stx.right.clone()];
        let mut left = &m.stx.left;
        loop {
          match left.stx.as_ref() {
            Expr::Member(inner) => {
              segments.push(inner.stx.right.clone());
              left = &inner.stx.left;
            }
            Expr::Id(id) => {
              segments.push(id.stx.name.clone());
              break;
            }
            _ => return None,
          }
        }
        segments.reverse();
        Some(self.entity_name_node(&parse_ts::ast::type_expr::TypeName { segments }))
      }
      Expr::Arrow(arrow) => Some(self.function_node(
        &arrow.stx.func.stx,
        None,
        None,
        &DocComment::default(),
      )),
      Expr::Func(f) => Some(self.function_node(
        &f.stx.func.stx,
        f.stx.name.as_deref(),
        None,
        &DocComment::default(),
      )),
      Expr::LitTemplate(_) => Some(NodeKind::String { value: None }.into()),
      _ => None,
    }
  }

  /// Function type node used by object-literal methods; kept separate so a
  /// method never turns into a component.
  pub(crate) fn plain_function_node(&mut self, func: &Func, name: Option<&str>) -> DocNode {
    let parameters = self.fn_params(&func.parameters);
    let return_type = match &func.return_type {
      Some(t) => self.type_node(t),
      None => NodeKind::Any.into(),
    };
    NodeKind::Function(FunctionNode {
      id: None,
      name: name.map(str::to_string),
      parameters,
      return_type: Box::new(return_type),
      type_parameters: self.type_params(&func.type_parameters),
    })
    .into()
  }
}
