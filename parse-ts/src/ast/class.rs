use super::expr::Expr;
use super::func::Func;
use super::node::Node;
use super::type_expr::IndexSig;
use super::type_expr::TypeExpr;
use super::type_expr::TypeParameter;
use serde::Serialize;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub enum Accessibility {
  Public,
  Protected,
  Private,
}

/// Shared body for class declarations and class expressions.
#[derive(Debug, Serialize)]
pub struct ClassBody {
  pub type_parameters: Option<Vec<Node<TypeParameter>>>,
  pub extends: Option<Node<Expr>>,
  pub extends_type_arguments: Option<Vec<Node<TypeExpr>>>,
  pub implements: Vec<Node<TypeExpr>>,
  pub members: Vec<Node<ClassMember>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "$t")]
pub enum ClassKey {
  Ident(String),
  // `#name`, including the hash.
  Private(String),
  String(String),
  Number(String),
  Computed(Node<Expr>),
}

impl ClassKey {
  pub fn name(&self) -> Option<&str> {
    match self {
      ClassKey::Ident(name) | ClassKey::String(name) | ClassKey::Number(name) => Some(name),
      ClassKey::Private(_) | ClassKey::Computed(_) => None,
    }
  }
}

#[derive(Debug, Serialize)]
#[serde(tag = "$t")]
pub enum ClassVal {
  Getter(Node<Func>),
  Setter(Node<Func>),
  Method(Node<Func>),
  // Field; ambient and annotated-only fields have no initializer.
  Prop(Option<Node<Expr>>),
  Index(Node<IndexSig>),
}

#[derive(Debug, Serialize)]
pub struct ClassMember {
  pub key: ClassKey,
  pub static_: bool,
  pub abstract_: bool,
  pub readonly: bool,
  pub optional: bool,
  pub override_: bool,
  pub declare: bool,
  pub accessibility: Option<Accessibility>,
  // For fields only.
  pub type_annotation: Option<Node<TypeExpr>>,
  pub val: ClassVal,
  pub doc: Option<String>,
}
