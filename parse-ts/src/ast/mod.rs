pub mod class;
pub mod expr;
pub mod func;
pub mod import_export;
pub mod node;
pub mod pat;
pub mod stmt;
pub mod type_expr;

use node::Node;
use serde::Serialize;
use stmt::Stmt;

#[derive(Debug, Serialize)]
pub struct TopLevel {
  pub body: Vec<Node<Stmt>>,
}
