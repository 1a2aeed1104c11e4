mod common;

use common::fixture;
use docs_ts::DocNode;
use docs_ts::NodeKind;

fn property<'a>(iface: &'a DocNode, name: &str) -> &'a DocNode {
  let NodeKind::Interface(iface) = &iface.kind else {
    panic!("expected interface, got {iface:?}");
  };
  let prop = iface
    .properties
    .get(name)
    .unwrap_or_else(|| panic!("missing property {name}"));
  match &prop.kind {
    NodeKind::Property(p) => &p.value,
    other => panic!("expected property, got {other:?}"),
  }
}

#[test]
fn generic_application_substitutes_parameters() {
  let loader = fixture(&[(
    "/a.ts",
    "interface Opts<T> { item: T }\nexport interface Num extends Opts<number> {}",
  )]);
  let result = loader.load("/a.ts", None).unwrap();
  let num = &result.exports["Num"];
  assert_eq!(property(num, "item").kind, NodeKind::Number { value: None });
}

#[test]
fn shorter_application_falls_back_to_declared_default() {
  let loader = fixture(&[(
    "/a.ts",
    "interface M<A, B = boolean> { a: A; b: B }\nexport interface X extends M<string> {}",
  )]);
  let result = loader.load("/a.ts", None).unwrap();
  let x = &result.exports["X"];
  assert_eq!(property(x, "a").kind, NodeKind::String { value: None });
  assert_eq!(property(x, "b").kind, NodeKind::Boolean { value: None });
}

#[test]
fn root_type_parameters_bind_to_constraints() {
  let loader = fixture(&[(
    "/a.ts",
    "export interface Picker<T extends DateValue> { value: T }",
  )]);
  let result = loader.load("/a.ts", None).unwrap();
  let picker = &result.exports["Picker"];
  assert_eq!(
    property(picker, "value").kind,
    NodeKind::Identifier {
      name: "DateValue".to_string()
    }
  );
}

#[test]
fn keyof_interface_expands_to_key_union() {
  let loader = fixture(&[(
    "/a.ts",
    "interface K { a: string; b: number }\nexport type Keys = keyof K;",
  )]);
  let result = loader.load("/a.ts", None).unwrap();
  // A root alias is exported as a link into the links table.
  let keys = &result.exports["Keys"];
  let NodeKind::Link { id } = &keys.kind else {
    panic!("expected link, got {keys:?}");
  };
  let alias = result.links.get(id).expect("alias in links");
  let NodeKind::Alias(alias) = &alias.kind else {
    panic!("expected alias");
  };
  let NodeKind::Union { elements } = &alias.value.kind else {
    panic!("expected union, got {:?}", alias.value);
  };
  let keys: Vec<_> = elements
    .iter()
    .map(|e| match &e.kind {
      NodeKind::String { value: Some(v) } => v.as_str(),
      other => panic!("expected string literal, got {other:?}"),
    })
    .collect();
  assert_eq!(keys, ["a", "b"]);
}

#[test]
fn omit_on_non_object_passes_through() {
  let loader = fixture(&[(
    "/a.ts",
    "type Base = string;\nexport type Result = Omit<Base, 'x'>;",
  )]);
  let result = loader.load("/a.ts", None).unwrap();
  let node = &result.exports["Result"];
  let NodeKind::Link { id } = &node.kind else {
    panic!("expected link");
  };
  let alias = &result.links[id];
  let NodeKind::Alias(alias) = &alias.kind else {
    panic!("expected alias");
  };
  // The base resolves to a string alias, so Omit leaves it alone.
  assert!(
    matches!(&alias.value.kind, NodeKind::Link { .. }),
    "expected the untouched base, got {:?}",
    alias.value
  );
}

#[test]
fn self_referential_interface_links_back() {
  let loader = fixture(&[(
    "/a.ts",
    "export interface TreeNode { value: string; parent: TreeNode; }",
  )]);
  let result = loader.load("/a.ts", None).unwrap();
  let tree = &result.exports["TreeNode"];
  let parent = property(tree, "parent");
  assert_eq!(
    parent.kind,
    NodeKind::Link {
      id: "/a.ts:TreeNode".to_string()
    }
  );
  assert!(result.links.contains_key("/a.ts:TreeNode"));
}

#[test]
fn cross_file_references_resolve() {
  let loader = fixture(&[
    ("/types.ts", "export interface Point { x: number; y: number }"),
    (
      "/index.ts",
      "import {Point} from './types';\nexport interface Box { origin: Point }",
    ),
  ]);
  let result = loader.load("/index.ts", None).unwrap();
  let boxed = &result.exports["Box"];
  let origin = property(boxed, "origin");
  // A non-merge position turns the shared interface into a link.
  let NodeKind::Link { id } = &origin.kind else {
    panic!("expected link, got {origin:?}");
  };
  assert_eq!(id, "/types.ts:Point");
  let point = result.links.get(id).expect("Point in links");
  assert!(matches!(&point.kind, NodeKind::Interface(_)));
}

#[test]
fn no_reference_nodes_survive_linking() {
  let loader = fixture(&[
    ("/dep.ts", "export type Id = string;"),
    (
      "/index.ts",
      "import {Id} from './dep';\nexport interface User { id: Id; friends: Id[] }",
    ),
  ]);
  let result = loader.load("/index.ts", None).unwrap();
  let json = serde_json::to_string(&serde_json::json!({
    "exports": result.exports,
    "links": result.links,
  }))
  .unwrap();
  assert!(
    !json.contains("\"reference\""),
    "reference node leaked into output: {json}"
  );
}

#[test]
fn unresolved_identifier_stays_identifier() {
  let loader = fixture(&[(
    "/a.ts",
    "export interface Handle { element: HTMLElement }",
  )]);
  let result = loader.load("/a.ts", None).unwrap();
  let handle = &result.exports["Handle"];
  assert_eq!(
    property(handle, "element").kind,
    NodeKind::Identifier {
      name: "HTMLElement".to_string()
    }
  );
}

#[test]
fn alias_inlines_into_component_props() {
  let loader = fixture(&[(
    "/a.tsx",
    "type Props = { label: string };\n\
     export function Tag(props: Props) { return <span>{props.label}</span>; }",
  )]);
  let loader_result = loader.load("/a.tsx", None);
  let result = loader_result.unwrap();
  let tag = &result.exports["Tag"];
  let NodeKind::Component(tag) = &tag.kind else {
    panic!("expected component, got {tag:?}");
  };
  let props = tag.props.as_ref().expect("props");
  // The alias value is inlined directly under props.
  assert!(
    matches!(&props.kind, NodeKind::Object { properties } if properties.contains_key("label")),
    "expected inlined object, got {props:?}"
  );
}

#[test]
fn unions_of_literals_survive() {
  let loader = fixture(&[(
    "/a.ts",
    "export interface Sized { size: 'S' | 'M' | 'L'; count: 1 | 2; }",
  )]);
  let result = loader.load("/a.ts", None).unwrap();
  let sized = &result.exports["Sized"];
  let NodeKind::Union { elements } = &property(sized, "size").kind else {
    panic!("expected union");
  };
  assert_eq!(elements.len(), 3);
  assert_eq!(
    elements[0].kind,
    NodeKind::String {
      value: Some("S".to_string())
    }
  );
  let NodeKind::Union { elements } = &property(sized, "count").kind else {
    panic!("expected union");
  };
  assert_eq!(
    elements[0].kind,
    NodeKind::Number {
      value: Some("1".to_string())
    }
  );
}
