mod common;

use common::fixture;
use docs_ts::NodeKind;

#[test]
fn barrel_exposes_only_renamed_subset() {
  let loader = fixture(&[
    (
      "/widgets.ts",
      "export interface Knob { turns: number }\n\
       export interface Slider { min: number; max: number }\n\
       export interface Hidden { secret: string }",
    ),
    (
      "/index.ts",
      "export { Knob as Dial, Slider } from \"./widgets\";",
    ),
  ]);
  let result = loader.load("/index.ts", None).unwrap();
  let names: Vec<&str> = result.exports.keys().map(String::as_str).collect();
  assert_eq!(names, ["Dial", "Slider"]);
}

#[test]
fn wildcard_plus_rename_supplements() {
  let loader = fixture(&[
    (
      "/a.ts",
      "export interface Foo { a: number }\nexport interface Other { b: number }",
    ),
    (
      "/index.ts",
      "export * from \"./a\";\nexport { Foo as Bar } from \"./a\";",
    ),
  ]);
  let result = loader.load("/index.ts", None).unwrap();
  let names: Vec<&str> = result.exports.keys().map(String::as_str).collect();
  assert_eq!(names, ["Bar", "Foo", "Other"]);
}

#[test]
fn reexport_chain_follows_to_the_origin() {
  let loader = fixture(&[
    ("/origin.ts", "export interface Deep { level: number }"),
    ("/middle.ts", "export { Deep } from \"./origin\";"),
    ("/index.ts", "export { Deep as Surface } from \"./middle\";"),
  ]);
  let result = loader.load("/index.ts", None).unwrap();
  let surface = &result.exports["Surface"];
  let NodeKind::Interface(surface) = &surface.kind else {
    panic!("expected interface");
  };
  assert_eq!(surface.id, "/origin.ts:Deep");
  assert_eq!(surface.name, "Surface");
}

#[test]
fn wildcard_cycle_terminates_with_all_symbols() {
  let loader = fixture(&[
    ("/a.ts", "export * from \"./b\";\nexport const shared = 1;"),
    ("/b.ts", "export * from \"./a\";\nexport const other = 2;"),
  ]);
  let result = loader.load("/a.ts", None).unwrap();
  assert!(result.exports.contains_key("shared"));
  assert!(result.exports.contains_key("other"));
}

#[test]
fn local_rebinding_exports_under_new_name() {
  let loader = fixture(&[(
    "/a.ts",
    "interface Internal { x: number }\nexport { Internal as Public };",
  )]);
  let result = loader.load("/a.ts", None).unwrap();
  let public = &result.exports["Public"];
  let NodeKind::Interface(public) = &public.kind else {
    panic!("expected interface");
  };
  assert_eq!(public.name, "Public");
  assert_eq!(public.id, "/a.ts:Internal");
}

#[test]
fn namespace_reexport_becomes_an_object_of_exports() {
  let loader = fixture(&[
    (
      "/icons.ts",
      "export interface ArrowIcon { dir: string }\nexport interface DotIcon { r: number }",
    ),
    ("/index.ts", "export * as Icons from \"./icons\";"),
  ]);
  let result = loader.load("/index.ts", None).unwrap();
  let icons = &result.exports["Icons"];
  let NodeKind::Object { properties } = &icons.kind else {
    panic!("expected object, got {icons:?}");
  };
  let names: Vec<&String> = properties.keys().collect();
  assert_eq!(names, ["ArrowIcon", "DotIcon"]);
}

#[test]
fn enum_exports_carry_member_values() {
  let loader = fixture(&[(
    "/a.ts",
    "export enum Direction { Up = 1, Down, Side = 'side' }",
  )]);
  let result = loader.load("/a.ts", None).unwrap();
  let NodeKind::Enum { name, members } = &result.exports["Direction"].kind else {
    panic!("expected enum");
  };
  assert_eq!(name, "Direction");
  let values: Vec<(String, Option<String>)> = members
    .iter()
    .map(|m| match &m.kind {
      NodeKind::EnumMember { name, value } => (name.clone(), value.clone()),
      other => panic!("expected enum member, got {other:?}"),
    })
    .collect();
  assert_eq!(values, vec![
    ("Up".to_string(), Some("1".to_string())),
    ("Down".to_string(), None),
    ("Side".to_string(), Some("side".to_string())),
  ]);
}

#[test]
fn class_exports_become_interfaces() {
  let loader = fixture(&[(
    "/a.ts",
    "export class Store {\n\
       name: string = '';\n\
       private secret: string = '';\n\
       get size(): number { return 0; }\n\
       load(id: string): boolean { return true; }\n\
       constructor(readonly root: string) {}\n\
     }",
  )]);
  let result = loader.load("/a.ts", None).unwrap();
  let store = &result.exports["Store"];
  let NodeKind::Interface(store) = &store.kind else {
    panic!("expected interface, got {store:?}");
  };
  let names: Vec<&String> = store.properties.keys().collect();
  assert_eq!(names, ["name", "secret", "size", "load"]);
  assert!(matches!(&store.properties["load"].kind, NodeKind::Method(_)));
  assert_eq!(
    store.properties["secret"].docs.access,
    Some(docs_ts::Access::Private)
  );
}
