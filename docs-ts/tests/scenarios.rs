mod common;

use common::fixture;
use docs_ts::NodeKind;

#[test]
fn simple_reexport_inlines_the_interface() {
  let loader = fixture(&[
    ("/base.ts", "export interface Base { value: number; }"),
    ("/index.ts", "export { Base } from \"./base\";"),
  ]);
  let result = loader.load("/index.ts", None).unwrap();
  let base = result.exports.get("Base").expect("Base export");
  let NodeKind::Interface(base) = &base.kind else {
    panic!("expected interface, got {base:?}");
  };
  assert_eq!(base.id, "/base.ts:Base");
  assert_eq!(base.name, "Base");
  assert_eq!(base.properties.len(), 1);
  let value = &base.properties["value"];
  let NodeKind::Property(value) = &value.kind else {
    panic!("expected property");
  };
  assert_eq!(value.value.kind, NodeKind::Number { value: None });
}

#[test]
fn rename_on_reexport_keeps_original_id() {
  let loader = fixture(&[
    ("/base.ts", "export interface Base { value: number; }"),
    ("/index.ts", "export { Base as Foo } from \"./base\";"),
  ]);
  let result = loader.load("/index.ts", None).unwrap();
  assert!(result.exports.get("Base").is_none(), "source name must not leak");
  let foo = result.exports.get("Foo").expect("Foo export");
  let NodeKind::Interface(foo) = &foo.kind else {
    panic!("expected interface");
  };
  assert_eq!(foo.name, "Foo");
  assert_eq!(foo.id, "/base.ts:Base");
}

#[test]
fn circular_declarations_via_barrel_terminate() {
  let loader = fixture(&[
    (
      "/foo.ts",
      "import {Bar} from \"./barrel\";\nexport const Foo = Bar;",
    ),
    (
      "/bar.ts",
      "import {Foo} from \"./barrel\";\nexport type Bar = Foo;",
    ),
    (
      "/barrel.ts",
      "export {Foo} from \"./foo\";\nexport {Bar} from \"./bar\";",
    ),
    ("/index.ts", "export {Foo, Bar} from \"./barrel\";"),
  ]);
  let result = loader.load("/index.ts", None).unwrap();
  assert!(result.exports.contains_key("Foo"), "Foo must appear");
  let bar = result.exports.get("Bar").expect("Bar export");
  assert_eq!(
    bar.kind,
    NodeKind::Link {
      id: "/bar.ts:Bar".to_string()
    }
  );
}

#[test]
fn omit_removes_union_and_literal_keys() {
  let loader = fixture(&[(
    "/a.ts",
    "interface Base { foo: string; bar: string; baz: number; onChange: string; onClick: string; className: string; style: string; }\n\
     type Handlers = 'onChange' | 'onClick';\n\
     export interface Result extends Omit<Base, Handlers | 'bar'> {}",
  )]);
  let result = loader.load("/a.ts", None).unwrap();
  let node = result.exports.get("Result").expect("Result export");
  let NodeKind::Interface(result_iface) = &node.kind else {
    panic!("expected interface, got {node:?}");
  };
  let keys: Vec<&String> = result_iface.properties.keys().collect();
  assert_eq!(keys, ["foo", "baz", "className", "style"]);
}

#[test]
fn interface_flattening_orders_base_first() {
  let loader = fixture(&[(
    "/a.ts",
    "interface A { a: number }\n\
     interface B extends A { b: string }\n\
     export interface C extends B { c: boolean }",
  )]);
  let result = loader.load("/a.ts", None).unwrap();
  let node = result.exports.get("C").expect("C export");
  let NodeKind::Interface(c) = &node.kind else {
    panic!("expected interface");
  };
  assert!(c.extends.is_empty(), "all extensions resolved to interfaces");
  let keys: Vec<&String> = c.properties.keys().collect();
  assert_eq!(keys, ["a", "b", "c"]);

  let inherited_from = |name: &str| match &c.properties[name].kind {
    NodeKind::Property(p) => p.inherited_from.clone(),
    other => panic!("expected property, got {other:?}"),
  };
  assert_eq!(inherited_from("a").as_deref(), Some("/a.ts:A"));
  assert_eq!(inherited_from("b").as_deref(), Some("/a.ts:B"));
  assert_eq!(inherited_from("c"), None);

  // Every inheritedFrom id resolves to an interface in links or exports.
  for id in ["/a.ts:A", "/a.ts:B"] {
    assert!(
      result.links.contains_key(id),
      "expected {id} in links, got {:?}",
      result.links.keys()
    );
  }
}

#[test]
fn unused_unresolvable_import_is_skipped() {
  let loader = fixture(&[(
    "/index.ts",
    "import {F} from 'nonexistent';\nexport interface Base { value: number; }",
  )]);
  let result = loader.load("/index.ts", None).unwrap();
  let base = result.exports.get("Base").expect("Base export");
  assert!(matches!(&base.kind, NodeKind::Interface(_)));
}
