use super::expr::Expr;
use super::node::Node;
use super::pat::Pat;
use super::stmt::Stmt;
use super::type_expr::TypeExpr;
use super::type_expr::TypeParameter;
use serde::Serialize;

/// Common shape for function declarations, function expressions, arrow
/// functions, and class methods. One type is easier to match on downstream
/// than many.
#[derive(Debug, Serialize)]
pub struct Func {
  pub arrow: bool,
  pub async_: bool,
  pub generator: bool,
  pub type_parameters: Option<Vec<Node<TypeParameter>>>,
  pub parameters: Vec<Node<ParamDecl>>,
  pub return_type: Option<Node<TypeExpr>>,
  // Overload signatures and ambient functions have no body.
  pub body: Option<FuncBody>,
}

#[derive(Debug, Serialize)]
pub enum FuncBody {
  Block(Vec<Node<Stmt>>),
  // Arrow function with expression body.
  Expression(Node<Expr>),
}

#[derive(Debug, Serialize)]
pub struct ParamDecl {
  pub rest: bool,
  pub optional: bool,
  pub pattern: Node<Pat>,
  pub type_annotation: Option<Node<TypeExpr>>,
  pub default_value: Option<Node<Expr>>,
}

impl Func {
  /// Whether the annotated return type names `JSX.Element`,
  /// `React.JSX.Element`, or `ReactElement`.
  pub fn returns_jsx_element_type(&self) -> bool {
    match self.return_type.as_ref().map(|t| t.stx.as_ref()) {
      Some(TypeExpr::Reference(r)) => {
        let segments = &r.stx.name.segments;
        let n = segments.len();
        (n >= 2 && segments[n - 2] == "JSX" && segments[n - 1] == "Element")
          || segments[n - 1] == "ReactElement"
      }
      _ => false,
    }
  }
}
