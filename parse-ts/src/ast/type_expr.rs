use super::expr::Expr;
use super::node::Node;
use serde::Serialize;

/// Type expression covering the TypeScript type grammar.
#[derive(Debug, Serialize)]
#[serde(tag = "$t")]
pub enum TypeExpr {
  Keyword(Node<TypeKeyword>),
  Reference(Node<TypeRef>),
  Literal(Node<TypeLit>),
  Array(Node<TypeArr>),
  Tuple(Node<TypeTuple>),
  Union(Node<TypeUnion>),
  Intersection(Node<TypeIntersection>),
  Function(Node<TypeFn>),
  Constructor(Node<TypeFn>),
  ObjectLiteral(Node<TypeObjectLit>),
  Parenthesized(Node<TypeParen>),
  // typeof x, typeof a.b
  Query(Node<TypeQuery>),
  // keyof T, readonly T, unique symbol
  Operator(Node<TypeOp>),
  IndexedAccess(Node<TypeIndexedAccess>),
  Conditional(Node<TypeConditional>),
  Infer(Node<TypeInfer>),
  Mapped(Node<TypeMapped>),
  TemplateLiteral(Node<TypeTemplate>),
  Import(Node<TypeImport>),
  Predicate(Node<TypePredicate>),
}

/// Keyword types. `this` is included: it behaves like a keyword in type
/// position.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub enum TypeKeyword {
  Any,
  BigInt,
  Boolean,
  Never,
  Null,
  Number,
  Object,
  String,
  Symbol,
  This,
  Undefined,
  Unknown,
  Void,
}

/// Possibly-qualified entity name: `Foo` or `A.B.C`, as source-order
/// segments.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct TypeName {
  pub segments: Vec<String>,
}

impl TypeName {
  pub fn ident(name: impl Into<String>) -> TypeName {
    TypeName {
      segments: vec![name.into()],
    }
  }

  pub fn is_ident(&self) -> bool {
    self.segments.len() == 1
  }

  pub fn joined(&self) -> String {
    self.segments.join(".")
  }
}

/// Type reference: `Foo`, `Foo<T>`, `A.B<T, U>`.
#[derive(Debug, Serialize)]
pub struct TypeRef {
  pub name: TypeName,
  pub type_arguments: Option<Vec<Node<TypeExpr>>>,
}

/// Literal type: `"foo"`, `42`, `true`.
#[derive(Debug, Serialize)]
#[serde(tag = "$t")]
pub enum TypeLit {
  String(String),
  Number(String),
  Boolean(bool),
}

#[derive(Debug, Serialize)]
pub struct TypeArr {
  pub element_type: Box<Node<TypeExpr>>,
}

#[derive(Debug, Serialize)]
pub struct TypeTuple {
  pub elements: Vec<Node<TypeTupleElement>>,
}

#[derive(Debug, Serialize)]
pub struct TypeTupleElement {
  pub label: Option<String>,
  pub optional: bool,
  pub rest: bool,
  pub type_expr: Node<TypeExpr>,
}

#[derive(Debug, Serialize)]
pub struct TypeUnion {
  pub types: Vec<Node<TypeExpr>>,
}

#[derive(Debug, Serialize)]
pub struct TypeIntersection {
  pub types: Vec<Node<TypeExpr>>,
}

/// Function or constructor type: `(x: T) => R`, `new (x: T) => R`.
#[derive(Debug, Serialize)]
pub struct TypeFn {
  pub type_parameters: Option<Vec<Node<TypeParameter>>>,
  pub parameters: Vec<Node<TypeFnParam>>,
  pub return_type: Box<Node<TypeExpr>>,
}

#[derive(Debug, Serialize)]
pub struct TypeFnParam {
  pub name: Option<String>,
  pub optional: bool,
  pub rest: bool,
  pub type_expr: Node<TypeExpr>,
}

/// Type parameter: `T`, `T extends U`, `T = Default`.
#[derive(Debug, Serialize)]
pub struct TypeParameter {
  pub name: String,
  pub constraint: Option<Box<Node<TypeExpr>>>,
  pub default: Option<Box<Node<TypeExpr>>>,
}

#[derive(Debug, Serialize)]
pub struct TypeObjectLit {
  pub members: Vec<Node<TypeMember>>,
}

/// Member of an object type or interface body.
#[derive(Debug, Serialize)]
#[serde(tag = "$t")]
pub enum TypeMember {
  Property(Node<PropertySig>),
  Method(Node<MethodSig>),
  Call(Node<CallSig>),
  Construct(Node<CallSig>),
  Index(Node<IndexSig>),
  Getter(Node<GetterSig>),
  Setter(Node<SetterSig>),
}

#[derive(Debug, Serialize)]
pub struct PropertySig {
  pub readonly: bool,
  pub optional: bool,
  pub key: PropKey,
  pub type_annotation: Option<Node<TypeExpr>>,
  pub doc: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MethodSig {
  pub optional: bool,
  pub key: PropKey,
  pub type_parameters: Option<Vec<Node<TypeParameter>>>,
  pub parameters: Vec<Node<TypeFnParam>>,
  pub return_type: Option<Node<TypeExpr>>,
  pub doc: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CallSig {
  pub type_parameters: Option<Vec<Node<TypeParameter>>>,
  pub parameters: Vec<Node<TypeFnParam>>,
  pub return_type: Option<Node<TypeExpr>>,
  pub doc: Option<String>,
}

/// Index signature: `[key: string]: T`.
#[derive(Debug, Serialize)]
pub struct IndexSig {
  pub readonly: bool,
  pub parameter_name: String,
  pub parameter_type: Node<TypeExpr>,
  pub type_annotation: Node<TypeExpr>,
  pub doc: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GetterSig {
  pub key: PropKey,
  pub return_type: Option<Node<TypeExpr>>,
  pub doc: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SetterSig {
  pub key: PropKey,
  pub parameter: Node<TypeFnParam>,
  pub doc: Option<String>,
}

/// Property key in type members.
#[derive(Debug, Serialize)]
#[serde(tag = "$t")]
pub enum PropKey {
  Ident(String),
  String(String),
  Number(String),
  Computed(Box<Node<Expr>>),
}

impl PropKey {
  /// Literal name of this key, if it has one.
  pub fn name(&self) -> Option<&str> {
    match self {
      PropKey::Ident(name) | PropKey::String(name) | PropKey::Number(name) => Some(name),
      PropKey::Computed(_) => None,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct TypeParen {
  pub type_expr: Box<Node<TypeExpr>>,
}

#[derive(Debug, Serialize)]
pub struct TypeQuery {
  pub expr_name: TypeName,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub enum TypeOpKind {
  KeyOf,
  Readonly,
  Unique,
}

#[derive(Debug, Serialize)]
pub struct TypeOp {
  pub op: TypeOpKind,
  pub operand: Box<Node<TypeExpr>>,
}

#[derive(Debug, Serialize)]
pub struct TypeIndexedAccess {
  pub object_type: Box<Node<TypeExpr>>,
  pub index_type: Box<Node<TypeExpr>>,
}

#[derive(Debug, Serialize)]
pub struct TypeConditional {
  pub check_type: Box<Node<TypeExpr>>,
  pub extends_type: Box<Node<TypeExpr>>,
  pub true_type: Box<Node<TypeExpr>>,
  pub false_type: Box<Node<TypeExpr>>,
}

#[derive(Debug, Serialize)]
pub struct TypeInfer {
  pub type_parameter: String,
  pub constraint: Option<Box<Node<TypeExpr>>>,
}

/// Mapped type: `{ [K in keyof T]: T[K] }` with optional `as` remapping and
/// `readonly`/`?` modifiers.
#[derive(Debug, Serialize)]
pub struct TypeMapped {
  pub type_parameter: String,
  pub constraint: Box<Node<TypeExpr>>,
  pub name_type: Option<Box<Node<TypeExpr>>>,
  pub type_expr: Option<Box<Node<TypeExpr>>>,
}

/// Template literal type: `` `foo${T}bar` ``.
#[derive(Debug, Serialize)]
pub struct TypeTemplate {
  pub head: String,
  pub spans: Vec<Node<TypeTemplateSpan>>,
}

#[derive(Debug, Serialize)]
pub struct TypeTemplateSpan {
  pub type_expr: Node<TypeExpr>,
  pub literal: String,
}

/// Import type: `import("module").Type<T>`.
#[derive(Debug, Serialize)]
pub struct TypeImport {
  pub module: String,
  pub qualifier: Option<TypeName>,
  pub type_arguments: Option<Vec<Node<TypeExpr>>>,
}

/// Type predicate: `x is T`, `asserts x`, `asserts x is T`.
#[derive(Debug, Serialize)]
pub struct TypePredicate {
  pub asserts: bool,
  pub parameter_name: String,
  pub type_annotation: Option<Box<Node<TypeExpr>>>,
}
