use super::class::ClassBody;
use super::expr::Expr;
use super::func::Func;
use super::import_export::ExportNames;
use super::import_export::ImportNames;
use super::node::Node;
use super::pat::Pat;
use super::type_expr::TypeExpr;
use super::type_expr::TypeMember;
use super::type_expr::TypeParameter;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(tag = "$t")]
pub enum Stmt {
  Block(Node<BlockStmt>),
  Break(Node<BreakStmt>),
  Continue(Node<ContinueStmt>),
  Debugger(Node<DebuggerStmt>),
  DoWhile(Node<DoWhileStmt>),
  Empty(Node<EmptyStmt>),
  Expr(Node<ExprStmt>),
  For(Node<ForStmt>),
  ForInOf(Node<ForInOfStmt>),
  If(Node<IfStmt>),
  Labelled(Node<LabelledStmt>),
  Return(Node<ReturnStmt>),
  Switch(Node<SwitchStmt>),
  Throw(Node<ThrowStmt>),
  Try(Node<TryStmt>),
  While(Node<WhileStmt>),

  ClassDecl(Node<ClassDecl>),
  FunctionDecl(Node<FuncDecl>),
  VarDecl(Node<VarDecl>),

  Import(Node<ImportStmt>),
  ExportDefault(Node<ExportDefaultStmt>),
  ExportEquals(Node<ExportEqualsStmt>),
  ExportList(Node<ExportListStmt>),

  EnumDecl(Node<EnumDecl>),
  GlobalDecl(Node<GlobalDecl>),
  InterfaceDecl(Node<InterfaceDecl>),
  ModuleDecl(Node<ModuleDecl>),
  NamespaceDecl(Node<NamespaceDecl>),
  TypeAliasDecl(Node<TypeAliasDecl>),
}

// Plain statements.

#[derive(Debug, Serialize)]
pub struct BlockStmt {
  pub body: Vec<Node<Stmt>>,
}

#[derive(Debug, Serialize)]
pub struct BreakStmt {
  pub label: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContinueStmt {
  pub label: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DebuggerStmt {}

#[derive(Debug, Serialize)]
pub struct DoWhileStmt {
  pub body: Box<Node<Stmt>>,
  pub condition: Node<Expr>,
}

#[derive(Debug, Serialize)]
pub struct EmptyStmt {}

#[derive(Debug, Serialize)]
pub struct ExprStmt {
  pub expr: Node<Expr>,
}

#[derive(Debug, Serialize)]
pub struct ForStmt {
  pub init: Option<ForInit>,
  pub condition: Option<Node<Expr>>,
  pub post: Option<Node<Expr>>,
  pub body: Box<Node<Stmt>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "$t")]
pub enum ForInit {
  Expr(Node<Expr>),
  Decl(Node<VarDecl>),
}

#[derive(Debug, Serialize)]
pub struct ForInOfStmt {
  pub of: bool,
  pub lhs: Node<Pat>,
  pub rhs: Node<Expr>,
  pub body: Box<Node<Stmt>>,
}

#[derive(Debug, Serialize)]
pub struct IfStmt {
  pub test: Node<Expr>,
  pub consequent: Box<Node<Stmt>>,
  pub alternate: Option<Box<Node<Stmt>>>,
}

#[derive(Debug, Serialize)]
pub struct LabelledStmt {
  pub name: String,
  pub statement: Box<Node<Stmt>>,
}

#[derive(Debug, Serialize)]
pub struct ReturnStmt {
  pub value: Option<Node<Expr>>,
}

#[derive(Debug, Serialize)]
pub struct SwitchStmt {
  pub test: Node<Expr>,
  pub branches: Vec<Node<SwitchBranch>>,
}

#[derive(Debug, Serialize)]
pub struct SwitchBranch {
  // None is `default`.
  pub case: Option<Node<Expr>>,
  pub body: Vec<Node<Stmt>>,
}

#[derive(Debug, Serialize)]
pub struct ThrowStmt {
  pub value: Node<Expr>,
}

#[derive(Debug, Serialize)]
pub struct TryStmt {
  pub wrapped: Node<BlockStmt>,
  pub catch: Option<Node<CatchBlock>>,
  pub finally: Option<Node<BlockStmt>>,
}

#[derive(Debug, Serialize)]
pub struct CatchBlock {
  pub parameter: Option<Node<Pat>>,
  pub body: Vec<Node<Stmt>>,
}

#[derive(Debug, Serialize)]
pub struct WhileStmt {
  pub condition: Node<Expr>,
  pub body: Box<Node<Stmt>>,
}

// Declarations.

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub enum VarDeclMode {
  Const,
  Let,
  Var,
}

#[derive(Debug, Serialize)]
pub struct VarDecl {
  pub export: bool,
  // `declare var x: T`.
  pub declare: bool,
  pub mode: VarDeclMode,
  pub declarators: Vec<VarDeclarator>,
  pub doc: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VarDeclarator {
  pub pattern: Node<Pat>,
  pub type_annotation: Option<Node<TypeExpr>>,
  pub initializer: Option<Node<Expr>>,
}

#[derive(Debug, Serialize)]
pub struct FuncDecl {
  pub export: bool,
  pub declare: bool,
  // Name is only absent in `export default function () {}`.
  pub name: Option<String>,
  pub function: Node<Func>,
  pub doc: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClassDecl {
  pub export: bool,
  pub declare: bool,
  pub abstract_: bool,
  pub name: Option<String>,
  pub body: Node<ClassBody>,
  pub doc: Option<String>,
}

// Modules.

#[derive(Debug, Serialize)]
pub struct ImportStmt {
  pub type_only: bool,
  // `import Foo from "m"` default binding.
  pub default: Option<String>,
  pub names: Option<ImportNames>,
  pub module: String,
}

#[derive(Debug, Serialize)]
pub struct ExportListStmt {
  pub type_only: bool,
  pub names: ExportNames,
  pub from: Option<String>,
}

/// `export default <expr>`. Recognized but producing no export entries.
#[derive(Debug, Serialize)]
pub struct ExportDefaultStmt {
  pub expression: Node<Expr>,
}

/// `export = <expr>`. Recognized but producing no export entries.
#[derive(Debug, Serialize)]
pub struct ExportEqualsStmt {
  pub expression: Node<Expr>,
}

// TypeScript declarations.

#[derive(Debug, Serialize)]
pub struct InterfaceDecl {
  pub export: bool,
  pub declare: bool,
  pub name: String,
  pub type_parameters: Option<Vec<Node<TypeParameter>>>,
  pub extends: Vec<Node<TypeExpr>>,
  pub members: Vec<Node<TypeMember>>,
  pub doc: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TypeAliasDecl {
  pub export: bool,
  pub declare: bool,
  pub name: String,
  pub type_parameters: Option<Vec<Node<TypeParameter>>>,
  pub type_expr: Node<TypeExpr>,
  pub doc: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EnumDecl {
  pub export: bool,
  pub declare: bool,
  pub const_: bool,
  pub name: String,
  pub members: Vec<Node<EnumMember>>,
  pub doc: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EnumMember {
  pub name: String,
  pub initializer: Option<Node<Expr>>,
  pub doc: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NamespaceDecl {
  pub export: bool,
  pub declare: bool,
  // `namespace A.B` keeps the dotted name as written.
  pub name: String,
  pub body: Vec<Node<Stmt>>,
  pub doc: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "$t")]
pub enum ModuleName {
  Identifier(String),
  String(String),
}

/// `module "m" { ... }` / `declare module "m";`.
#[derive(Debug, Serialize)]
pub struct ModuleDecl {
  pub declare: bool,
  pub name: ModuleName,
  pub body: Option<Vec<Node<Stmt>>>,
}

/// `declare global { ... }`.
#[derive(Debug, Serialize)]
pub struct GlobalDecl {
  pub body: Vec<Node<Stmt>>,
}
