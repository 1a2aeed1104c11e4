use parse_ts::ast::expr::Expr;
use parse_ts::ast::func::FuncBody;
use parse_ts::ast::import_export::ExportNames;
use parse_ts::ast::import_export::ImportNames;
use parse_ts::ast::stmt::Stmt;
use parse_ts::ast::type_expr::TypeExpr;
use parse_ts::ast::type_expr::TypeKeyword;
use parse_ts::ast::type_expr::TypeLit;
use parse_ts::ast::type_expr::TypeMember;
use parse_ts::ast::type_expr::TypeOpKind;
use parse_ts::parse;

fn stmts(source: &str) -> Vec<parse_ts::ast::node::Node<Stmt>> {
  parse(source)
    .unwrap_or_else(|err| panic!("parse failed: {err:?} in {source:?}"))
    .stx
    .body
}

#[test]
fn parses_interface_with_extends_and_members() {
  let body = stmts(
    "export interface Props<T extends string = string> extends Base, Other<T> {\n\
     \x20 name: string;\n\
     \x20 count?: number;\n\
     \x20 handler(a: T): void;\n\
     \x20 readonly items: T[];\n\
     }",
  );
  let Stmt::InterfaceDecl(decl) = body[0].stx.as_ref() else {
    panic!("expected interface, got {:?}", body[0]);
  };
  let decl = &decl.stx;
  assert!(decl.export);
  assert_eq!(decl.name, "Props");
  assert_eq!(decl.extends.len(), 2);
  assert_eq!(decl.members.len(), 4);
  let params = decl.type_parameters.as_ref().unwrap();
  assert_eq!(params[0].stx.name, "T");
  assert!(params[0].stx.constraint.is_some());
  assert!(params[0].stx.default.is_some());
  let TypeMember::Property(p) = decl.members[0].stx.as_ref() else {
    panic!("expected property");
  };
  assert_eq!(p.stx.key.name(), Some("name"));
  let TypeMember::Property(count) = decl.members[1].stx.as_ref() else {
    panic!("expected property");
  };
  assert!(count.stx.optional);
  let TypeMember::Method(m) = decl.members[2].stx.as_ref() else {
    panic!("expected method");
  };
  assert_eq!(m.stx.parameters.len(), 1);
  let TypeMember::Property(items) = decl.members[3].stx.as_ref() else {
    panic!("expected property");
  };
  assert!(items.stx.readonly);
  assert!(matches!(
    items.stx.type_annotation.as_ref().unwrap().stx.as_ref(),
    TypeExpr::Array(_)
  ));
}

#[test]
fn parses_type_alias_forms() {
  let body = stmts(
    "type A = string | number;\n\
     type B = { a: 1 } & { b: 2 };\n\
     type C = keyof A;\n\
     type D = A extends string ? true : false;\n\
     type E = Pick<A, 'x' | 'y'>;\n\
     type F = `prefix-${string}`;\n\
     type G = (a: string) => void;\n\
     type H = readonly string[];\n\
     type I = [label: string, count?: number, ...rest: boolean[]];\n\
     type J = typeof window;\n\
     type K = A['x'];\n\
     type L = { [K in keyof A]: A[K] };",
  );
  assert_eq!(body.len(), 12);
  let alias = |i: usize| -> &TypeExpr {
    let Stmt::TypeAliasDecl(decl) = body[i].stx.as_ref() else {
      panic!("expected alias at {i}");
    };
    // Leak is fine in tests; we only inspect.
    decl.stx.type_expr.stx.as_ref()
  };
  assert!(matches!(alias(0), TypeExpr::Union(u) if u.stx.types.len() == 2));
  assert!(matches!(alias(1), TypeExpr::Intersection(i) if i.stx.types.len() == 2));
  assert!(
    matches!(alias(2), TypeExpr::Operator(op) if op.stx.op == TypeOpKind::KeyOf)
  );
  assert!(matches!(alias(3), TypeExpr::Conditional(_)));
  assert!(
    matches!(alias(4), TypeExpr::Reference(r) if r.stx.type_arguments.as_ref().unwrap().len() == 2)
  );
  assert!(matches!(alias(5), TypeExpr::TemplateLiteral(t) if t.stx.head == "prefix-"));
  assert!(matches!(alias(6), TypeExpr::Function(_)));
  assert!(
    matches!(alias(7), TypeExpr::Operator(op) if op.stx.op == TypeOpKind::Readonly)
  );
  assert!(matches!(alias(8), TypeExpr::Tuple(t) if t.stx.elements.len() == 3));
  assert!(matches!(alias(9), TypeExpr::Query(_)));
  assert!(matches!(alias(10), TypeExpr::IndexedAccess(_)));
  assert!(matches!(alias(11), TypeExpr::Mapped(_)));
}

#[test]
fn parses_literal_types() {
  let body = stmts("type T = 'a' | 1 | true;");
  let Stmt::TypeAliasDecl(decl) = body[0].stx.as_ref() else {
    panic!("expected alias");
  };
  let TypeExpr::Union(u) = decl.stx.type_expr.stx.as_ref() else {
    panic!("expected union");
  };
  assert!(
    matches!(u.stx.types[0].stx.as_ref(), TypeExpr::Literal(l) if matches!(l.stx.as_ref(), TypeLit::String(s) if s == "a"))
  );
  assert!(
    matches!(u.stx.types[1].stx.as_ref(), TypeExpr::Literal(l) if matches!(l.stx.as_ref(), TypeLit::Number(n) if n == "1"))
  );
  assert!(
    matches!(u.stx.types[2].stx.as_ref(), TypeExpr::Literal(l) if matches!(l.stx.as_ref(), TypeLit::Boolean(true)))
  );
}

#[test]
fn parses_imports_and_exports() {
  let body = stmts(
    "import {A, B as C} from './a';\n\
     import * as NS from './b';\n\
     import D from './c';\n\
     import type {E} from './d';\n\
     import './side-effect';\n\
     export {A};\n\
     export {A as X} from './a';\n\
     export * from './b';\n\
     export * as All from './b';\n\
     export type {E} from './d';",
  );
  let Stmt::Import(import) = body[0].stx.as_ref() else {
    panic!("expected import");
  };
  let Some(ImportNames::Specific(names)) = &import.stx.names else {
    panic!("expected named imports");
  };
  assert_eq!(names[0].imported, "A");
  assert_eq!(names[1].imported, "B");
  assert_eq!(names[1].local(), "C");

  let Stmt::Import(ns) = body[1].stx.as_ref() else {
    panic!("expected import");
  };
  assert!(matches!(&ns.stx.names, Some(ImportNames::All(local)) if local == "NS"));

  let Stmt::Import(default) = body[2].stx.as_ref() else {
    panic!("expected import");
  };
  assert_eq!(default.stx.default.as_deref(), Some("D"));

  let Stmt::Import(type_only) = body[3].stx.as_ref() else {
    panic!("expected import");
  };
  assert!(type_only.stx.type_only);

  let Stmt::Import(side_effect) = body[4].stx.as_ref() else {
    panic!("expected import");
  };
  assert!(side_effect.stx.default.is_none() && side_effect.stx.names.is_none());

  let Stmt::ExportList(local) = body[5].stx.as_ref() else {
    panic!("expected export list");
  };
  assert!(local.stx.from.is_none());

  let Stmt::ExportList(renamed) = body[6].stx.as_ref() else {
    panic!("expected export list");
  };
  let ExportNames::Specific(names) = &renamed.stx.names else {
    panic!("expected names");
  };
  assert_eq!(names[0].target, "A");
  assert_eq!(names[0].exported_as(), "X");
  assert_eq!(renamed.stx.from.as_deref(), Some("./a"));

  let Stmt::ExportList(wildcard) = body[7].stx.as_ref() else {
    panic!("expected export list");
  };
  assert!(matches!(&wildcard.stx.names, ExportNames::All(None)));

  let Stmt::ExportList(ns_export) = body[8].stx.as_ref() else {
    panic!("expected export list");
  };
  assert!(matches!(&ns_export.stx.names, ExportNames::All(Some(a)) if a == "All"));

  let Stmt::ExportList(type_export) = body[9].stx.as_ref() else {
    panic!("expected export list");
  };
  assert!(type_export.stx.type_only);
}

#[test]
fn parses_function_returning_jsx() {
  let body = stmts(
    "export function Button(props: ButtonProps, ref: Ref<HTMLButtonElement>) {\n\
     \x20 const {label} = props;\n\
     \x20 return <button class=\"primary\" {...props}>{label}</button>;\n\
     }",
  );
  let Stmt::FunctionDecl(decl) = body[0].stx.as_ref() else {
    panic!("expected function");
  };
  assert_eq!(decl.stx.name.as_deref(), Some("Button"));
  let func = &decl.stx.function.stx;
  assert_eq!(func.parameters.len(), 2);
  let Some(FuncBody::Block(stmts)) = &func.body else {
    panic!("expected body");
  };
  let Stmt::Return(ret) = stmts[1].stx.as_ref() else {
    panic!("expected return");
  };
  assert!(matches!(
    ret.stx.value.as_ref().unwrap().stx.as_ref(),
    Expr::Jsx(_)
  ));
}

#[test]
fn parses_jsx_fragments_and_nesting() {
  let body = stmts(
    "const x = <>\n\
     \x20 <Outer.Inner value={1 + 2}>\n\
     \x20   text child\n\
     \x20   <br />\n\
     \x20 </Outer.Inner>\n\
     </>;",
  );
  let Stmt::VarDecl(decl) = body[0].stx.as_ref() else {
    panic!("expected var decl");
  };
  let init = decl.stx.declarators[0].initializer.as_ref().unwrap();
  let Expr::Jsx(fragment) = init.stx.as_ref() else {
    panic!("expected jsx");
  };
  assert!(fragment.stx.name.is_none());
}

#[test]
fn parses_classes() {
  let body = stmts(
    "export abstract class Widget<T> extends Base<T> implements Sized {\n\
     \x20 static count = 0;\n\
     \x20 #secret: string;\n\
     \x20 private name: string;\n\
     \x20 readonly id!: number;\n\
     \x20 constructor(public value: T) { super(); }\n\
     \x20 get size(): number { return 1; }\n\
     \x20 set size(v: number) {}\n\
     \x20 render(): T { return this.value; }\n\
     \x20 protected declare legacy: boolean;\n\
     }",
  );
  let Stmt::ClassDecl(decl) = body[0].stx.as_ref() else {
    panic!("expected class");
  };
  assert!(decl.stx.abstract_);
  let class = &decl.stx.body.stx;
  assert!(class.extends.is_some());
  assert_eq!(class.implements.len(), 1);
  assert_eq!(class.members.len(), 9);
}

#[test]
fn parses_enums() {
  let body = stmts(
    "export enum Direction { Up = 1, Down, Left = 'L', Right }\n\
     export const enum Flags { A = 1 }",
  );
  let Stmt::EnumDecl(decl) = body[0].stx.as_ref() else {
    panic!("expected enum");
  };
  assert_eq!(decl.stx.members.len(), 4);
  assert!(decl.stx.members[0].stx.initializer.is_some());
  assert!(decl.stx.members[1].stx.initializer.is_none());
  let Stmt::EnumDecl(const_enum) = body[1].stx.as_ref() else {
    panic!("expected const enum");
  };
  assert!(const_enum.stx.const_);
}

#[test]
fn parses_namespaces_and_ambient_declarations() {
  let body = stmts(
    "declare namespace NS { interface Inner { a: string } }\n\
     declare module 'pkg' { export interface X {} }\n\
     declare global { interface Window {} }\n\
     declare function helper(a: number): void;\n\
     declare const version: string;",
  );
  assert!(matches!(body[0].stx.as_ref(), Stmt::NamespaceDecl(ns) if ns.stx.declare));
  assert!(matches!(body[1].stx.as_ref(), Stmt::ModuleDecl(m) if m.stx.declare));
  assert!(matches!(body[2].stx.as_ref(), Stmt::GlobalDecl(_)));
  let Stmt::FunctionDecl(func) = body[3].stx.as_ref() else {
    panic!("expected ambient function");
  };
  assert!(func.stx.declare);
  assert!(func.stx.function.stx.body.is_none());
  assert!(matches!(body[4].stx.as_ref(), Stmt::VarDecl(v) if v.stx.declare));
}

#[test]
fn attaches_doc_comments() {
  let body = stmts(
    "/** Interface doc. */\n\
     export interface Documented {\n\
     \x20 /** Member doc. */\n\
     \x20 field: string;\n\
     }\n\
     /** Fn doc. */\n\
     export function documented() {}",
  );
  let Stmt::InterfaceDecl(decl) = body[0].stx.as_ref() else {
    panic!("expected interface");
  };
  assert_eq!(decl.stx.doc.as_deref(), Some("/** Interface doc. */"));
  let TypeMember::Property(p) = decl.stx.members[0].stx.as_ref() else {
    panic!("expected property");
  };
  assert_eq!(p.stx.doc.as_deref(), Some("/** Member doc. */"));
  let Stmt::FunctionDecl(func) = body[1].stx.as_ref() else {
    panic!("expected function");
  };
  assert_eq!(func.stx.doc.as_deref(), Some("/** Fn doc. */"));
}

#[test]
fn parses_arrow_functions_and_wrappers() {
  let body = stmts(
    "export const Button = React.forwardRef((props: Props, ref: Ref) => <div />);\n\
     const add = (a: number, b: number): number => a + b;\n\
     const single = x => x;",
  );
  let Stmt::VarDecl(decl) = body[0].stx.as_ref() else {
    panic!("expected var decl");
  };
  let init = decl.stx.declarators[0].initializer.as_ref().unwrap();
  let Expr::Call(call) = init.stx.as_ref() else {
    panic!("expected call, got {init:?}");
  };
  assert!(matches!(
    call.stx.arguments[0].stx.value.stx.as_ref(),
    Expr::Arrow(_)
  ));
}

#[test]
fn parses_object_literal_initializers() {
  let body = stmts(
    "export const theme = {\n\
     \x20 /** Primary color. */\n\
     \x20 primary: '#fff',\n\
     \x20 depth: 2,\n\
     \x20 nested: { deep: true },\n\
     };",
  );
  let Stmt::VarDecl(decl) = body[0].stx.as_ref() else {
    panic!("expected var decl");
  };
  let init = decl.stx.declarators[0].initializer.as_ref().unwrap();
  let Expr::LitObj(obj) = init.stx.as_ref() else {
    panic!("expected object literal");
  };
  assert_eq!(obj.stx.members.len(), 3);
  assert_eq!(
    obj.stx.members[0].stx.doc.as_deref(),
    Some("/** Primary color. */")
  );
}

#[test]
fn parses_generic_calls_and_nested_generics() {
  let body = stmts(
    "const m = new Map<string, Array<number>>();\n\
     const r = identity<Record<string, string>>({});",
  );
  assert_eq!(body.len(), 2);
}

#[test]
fn parse_error_reports_location() {
  let err = parse("interface {").unwrap_err();
  assert!(err.loc.0 >= 10);
}

#[test]
fn parses_keyword_type_members() {
  // Members named after keywords.
  let body = stmts("interface I { type: string; default: number; as?: boolean; }");
  let Stmt::InterfaceDecl(decl) = body[0].stx.as_ref() else {
    panic!("expected interface");
  };
  assert_eq!(decl.stx.members.len(), 3);
}

#[test]
fn keyword_types_parse() {
  let body = stmts("type T = [any, unknown, never, void, string, number, boolean, symbol, undefined, null, this, object];");
  let Stmt::TypeAliasDecl(decl) = body[0].stx.as_ref() else {
    panic!("expected alias");
  };
  let TypeExpr::Tuple(tuple) = decl.stx.type_expr.stx.as_ref() else {
    panic!("expected tuple");
  };
  let kws: Vec<TypeKeyword> = tuple
    .stx
    .elements
    .iter()
    .map(|e| match e.stx.type_expr.stx.as_ref() {
      TypeExpr::Keyword(k) => *k.stx,
      other => panic!("expected keyword, got {other:?}"),
    })
    .collect();
  assert_eq!(kws, vec![
    TypeKeyword::Any,
    TypeKeyword::Unknown,
    TypeKeyword::Never,
    TypeKeyword::Void,
    TypeKeyword::String,
    TypeKeyword::Number,
    TypeKeyword::Boolean,
    TypeKeyword::Symbol,
    TypeKeyword::Undefined,
    TypeKeyword::Null,
    TypeKeyword::This,
    TypeKeyword::Object,
  ]);
}
