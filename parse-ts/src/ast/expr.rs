use super::class::ClassBody;
use super::func::Func;
use super::node::Node;
use super::type_expr::PropKey;
use super::type_expr::TypeExpr;
use crate::token::TT;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(tag = "$t")]
pub enum Expr {
  Arrow(Node<ArrowFuncExpr>),
  As(Node<AsExpr>),
  Binary(Node<BinaryExpr>),
  Call(Node<CallExpr>),
  Class(Node<ClassExpr>),
  ComputedMember(Node<ComputedMemberExpr>),
  Cond(Node<CondExpr>),
  Func(Node<FuncExpr>),
  Id(Node<IdExpr>),
  ImportCall(Node<ImportCallExpr>),
  ImportMeta(Node<ImportMeta>),
  Member(Node<MemberExpr>),
  New(Node<NewExpr>),
  NonNull(Node<NonNullExpr>),
  Paren(Node<ParenExpr>),
  Spread(Node<SpreadExpr>),
  Super(Node<SuperExpr>),
  TaggedTemplate(Node<TaggedTemplateExpr>),
  This(Node<ThisExpr>),
  Unary(Node<UnaryExpr>),
  UnaryPostfix(Node<UnaryPostfixExpr>),

  Jsx(Node<JsxElem>),

  LitArr(Node<LitArrExpr>),
  LitBigInt(Node<LitBigIntExpr>),
  LitBool(Node<LitBoolExpr>),
  LitNull(Node<LitNullExpr>),
  LitNum(Node<LitNumExpr>),
  LitObj(Node<LitObjExpr>),
  LitRegex(Node<LitRegexExpr>),
  LitStr(Node<LitStrExpr>),
  LitTemplate(Node<LitTemplateExpr>),
}

#[derive(Debug, Serialize)]
pub struct ArrowFuncExpr {
  pub func: Node<Func>,
}

/// `value as T`, `value satisfies T`. Transparent for documentation purposes.
#[derive(Debug, Serialize)]
pub struct AsExpr {
  pub value: Node<Expr>,
  pub type_expr: Node<TypeExpr>,
}

#[derive(Debug, Serialize)]
pub struct BinaryExpr {
  pub operator: TT,
  pub left: Node<Expr>,
  pub right: Node<Expr>,
}

#[derive(Debug, Serialize)]
pub struct CallArg {
  pub spread: bool,
  pub value: Node<Expr>,
}

#[derive(Debug, Serialize)]
pub struct CallExpr {
  pub optional_chaining: bool,
  pub callee: Node<Expr>,
  pub type_arguments: Option<Vec<Node<TypeExpr>>>,
  pub arguments: Vec<Node<CallArg>>,
}

#[derive(Debug, Serialize)]
pub struct ClassExpr {
  pub name: Option<String>,
  pub body: Node<ClassBody>,
}

#[derive(Debug, Serialize)]
pub struct ComputedMemberExpr {
  pub optional_chaining: bool,
  pub object: Node<Expr>,
  pub member: Node<Expr>,
}

#[derive(Debug, Serialize)]
pub struct CondExpr {
  pub test: Node<Expr>,
  pub consequent: Node<Expr>,
  pub alternate: Node<Expr>,
}

#[derive(Debug, Serialize)]
pub struct FuncExpr {
  pub name: Option<String>,
  pub func: Node<Func>,
}

#[derive(Debug, Serialize)]
pub struct IdExpr {
  pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ImportCallExpr {
  pub module: Node<Expr>,
}

#[derive(Debug, Serialize)]
pub struct ImportMeta {}

/// `left.right` where `right` is a plain name, not a variable usage.
#[derive(Debug, Serialize)]
pub struct MemberExpr {
  pub optional_chaining: bool,
  pub left: Node<Expr>,
  pub right: String,
}

#[derive(Debug, Serialize)]
pub struct NewExpr {
  pub callee: Node<Expr>,
  pub arguments: Vec<Node<CallArg>>,
}

/// `value!`.
#[derive(Debug, Serialize)]
pub struct NonNullExpr {
  pub value: Node<Expr>,
}

#[derive(Debug, Serialize)]
pub struct ParenExpr {
  pub value: Node<Expr>,
}

#[derive(Debug, Serialize)]
pub struct SpreadExpr {
  pub value: Node<Expr>,
}

#[derive(Debug, Serialize)]
pub struct SuperExpr {}

#[derive(Debug, Serialize)]
pub struct ThisExpr {}

#[derive(Debug, Serialize)]
pub struct TaggedTemplateExpr {
  pub function: Node<Expr>,
  pub parts: Vec<TemplatePart>,
}

#[derive(Debug, Serialize)]
pub struct UnaryExpr {
  pub operator: TT,
  pub argument: Node<Expr>,
}

#[derive(Debug, Serialize)]
pub struct UnaryPostfixExpr {
  pub operator: TT,
  pub argument: Node<Expr>,
}

// Literals.

#[derive(Debug, Serialize)]
pub struct LitArrExpr {
  pub elements: Vec<Node<Expr>>,
}

#[derive(Debug, Serialize)]
pub struct LitBigIntExpr {
  pub raw: String,
}

#[derive(Debug, Serialize)]
pub struct LitBoolExpr {
  pub value: bool,
}

#[derive(Debug, Serialize)]
pub struct LitNullExpr {}

#[derive(Debug, Serialize)]
pub struct LitNumExpr {
  pub raw: String,
}

#[derive(Debug, Serialize)]
pub struct LitObjExpr {
  pub members: Vec<Node<ObjMember>>,
}

#[derive(Debug, Serialize)]
pub struct LitRegexExpr {
  pub raw: String,
}

#[derive(Debug, Serialize)]
pub struct LitStrExpr {
  pub value: String,
}

#[derive(Debug, Serialize)]
pub struct LitTemplateExpr {
  pub parts: Vec<TemplatePart>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "$t")]
pub enum TemplatePart {
  Str(String),
  Expr(Node<Expr>),
}

#[derive(Debug, Serialize)]
pub struct ObjMember {
  pub typ: ObjMemberType,
  pub doc: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "$t")]
pub enum ObjMemberType {
  Valued {
    key: PropKey,
    value: Node<Expr>,
  },
  Method {
    key: PropKey,
    func: Node<Func>,
  },
  Getter {
    key: PropKey,
    func: Node<Func>,
  },
  Setter {
    key: PropKey,
    func: Node<Func>,
  },
  Shorthand {
    name: String,
  },
  Rest {
    value: Node<Expr>,
  },
}

// JSX.

#[derive(Debug, Serialize)]
#[serde(tag = "$t")]
pub enum JsxElemName {
  // Capitalized: a reference to a component in scope.
  Id(String),
  // `<Foo.Bar.Baz>`.
  Member { base: String, path: Vec<String> },
  // Lowercase or namespaced intrinsic like `<div>` or `<svg:path>`.
  Name {
    namespace: Option<String>,
    name: String,
  },
}

#[derive(Debug, Serialize)]
#[serde(tag = "$t")]
pub enum JsxAttrVal {
  Expr(Node<Expr>),
  Text(String),
  Element(Node<JsxElem>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "$t")]
pub enum JsxAttr {
  Named {
    name: String,
    value: Option<JsxAttrVal>,
  },
  Spread {
    value: Node<Expr>,
  },
}

#[derive(Debug, Serialize)]
#[serde(tag = "$t")]
pub enum JsxChild {
  Element(Node<JsxElem>),
  // `{expr}`; empty containers (`{/* comment */}`) carry no expression.
  Expr(Option<Node<Expr>>),
  Text(String),
}

/// JSX element or fragment (`name` is `None` for fragments).
#[derive(Debug, Serialize)]
pub struct JsxElem {
  pub name: Option<JsxElemName>,
  pub attributes: Vec<JsxAttr>,
  pub children: Vec<JsxChild>,
}
