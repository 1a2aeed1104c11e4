mod common;

use common::fixture;
use docs_ts::LoadResult;
use docs_ts::NodeKind;

fn to_json(result: &LoadResult) -> String {
  serde_json::to_string(&serde_json::json!({
    "exports": result.exports,
    "links": result.links,
  }))
  .unwrap()
}

const BASE: &str = "export interface Base { value: number; other: string; }";
const INDEX: &str = "export { Base } from \"./base\";\nexport interface Local { base: Base }\nimport { Base } from \"./base\";";

fn files() -> Vec<(&'static str, &'static str)> {
  vec![("/base.ts", BASE), ("/index.ts", INDEX)]
}

#[test]
fn repeated_loads_are_byte_identical() {
  let loader = fixture(&files());
  let first = loader.load("/index.ts", None).unwrap();
  let second = loader.load("/index.ts", None).unwrap();
  assert_eq!(to_json(&first), to_json(&second));
}

#[test]
fn invalidate_then_reload_matches_cold_load() {
  let loader = fixture(&files());
  let cold = loader.load("/index.ts", None).unwrap();
  loader.invalidate("/index.ts");
  loader.invalidate("/base.ts");
  let warm = loader.load("/index.ts", None).unwrap();
  assert_eq!(to_json(&cold), to_json(&warm));
}

#[test]
fn requesting_all_names_matches_unrestricted_load() {
  let loader = fixture(&files());
  let full = loader.load("/index.ts", None).unwrap();
  let names: Vec<&str> = full.exports.keys().map(String::as_str).collect();

  let loader = fixture(&files());
  let restricted = loader.load("/index.ts", Some(&names)).unwrap();
  assert_eq!(to_json(&full), to_json(&restricted));
}

#[test]
fn requested_subset_limits_exports() {
  let loader = fixture(&files());
  let result = loader.load("/index.ts", Some(&["Base"])).unwrap();
  assert!(result.exports.contains_key("Base"));
  assert!(!result.exports.contains_key("Local"));
}

#[test]
fn unknown_requested_symbol_is_dropped_silently() {
  let loader = fixture(&files());
  let result = loader.load("/index.ts", Some(&["Nope", "Base"])).unwrap();
  assert!(result.exports.contains_key("Base"));
  assert!(!result.exports.contains_key("Nope"));
}

#[test]
fn invalidating_the_barrel_keeps_origin_symbols() {
  let loader = fixture(&files());
  loader.load("/index.ts", None).unwrap();
  assert!(loader.cache().symbol("/base.ts:Base").is_some());
  assert!(loader.cache().symbol("/index.ts:Local").is_some());

  loader.invalidate("/index.ts");
  // The re-exported declaration lives in base.ts and survives.
  assert!(loader.cache().symbol("/base.ts:Base").is_some());
  assert!(loader.cache().symbol("/index.ts:Local").is_none());
}

#[test]
fn symbol_cache_hits_preserve_renames() {
  let loader = fixture(&[
    ("/base.ts", BASE),
    (
      "/index.ts",
      "export { Base as First } from \"./base\";\nexport { Base as Second } from \"./base\";",
    ),
  ]);
  let result = loader.load("/index.ts", None).unwrap();
  let first = &result.exports["First"];
  let second = &result.exports["Second"];
  let (NodeKind::Interface(first), NodeKind::Interface(second)) = (&first.kind, &second.kind)
  else {
    panic!("expected interfaces");
  };
  assert_eq!(first.name, "First");
  assert_eq!(second.name, "Second");
  assert_eq!(first.id, second.id);
}

#[test]
fn parse_error_means_no_exports_and_no_cached_ast() {
  let loader = fixture(&[
    ("/broken.ts", "export interface {"),
    ("/index.ts", "export * from \"./broken\";\nexport const ok = 1;"),
  ]);
  let result = loader.load("/index.ts", None).unwrap();
  assert!(result.exports.contains_key("ok"));
  assert_eq!(result.exports.len(), 1);
  assert!(loader.cache().ast("/broken.ts").is_none());
}

#[test]
fn unresolvable_demanded_import_is_a_hard_error() {
  let loader = fixture(&[(
    "/index.ts",
    "import {Missing} from 'not-a-module';\nexport interface Uses { field: Missing }",
  )]);
  let err = loader.load("/index.ts", None).unwrap_err();
  assert!(err.to_string().contains("not-a-module"), "got: {err}");
}
