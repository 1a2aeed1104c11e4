use ahash::HashMap;
use ahash::HashMapExt;
use parse_ts::ast::import_export::ExportNames;
use parse_ts::ast::import_export::ImportNames;
use parse_ts::ast::node::Node;
use parse_ts::ast::stmt::Stmt;
use parse_ts::ast::TopLevel;

/// Index path to a declaration inside a file's AST: statement indices from
/// the top level down through namespace/global bodies, plus the declarator
/// index for `var`/`let`/`const` statements declaring several names.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DeclRef {
  pub path: Vec<usize>,
  pub declarator: Option<usize>,
}

impl DeclRef {
  pub fn top(index: usize) -> DeclRef {
    DeclRef {
      path: vec![index],
      declarator: None,
    }
  }

  pub fn with_declarator(index: usize, declarator: usize) -> DeclRef {
    DeclRef {
      path: vec![index],
      declarator: Some(declarator),
    }
  }

  /// Statement this ref points at, if the path is still valid for `top`.
  pub fn stmt<'a>(&self, top: &'a Node<TopLevel>) -> Option<&'a Node<Stmt>> {
    let mut stmts = &top.stx.body;
    let mut stmt = None;
    for &index in &self.path {
      let node = stmts.get(index)?;
      stmt = Some(node);
      stmts = match node.stx.as_ref() {
        Stmt::NamespaceDecl(ns) => &ns.stx.body,
        Stmt::GlobalDecl(g) => &g.stx.body,
        Stmt::ModuleDecl(m) => m.stx.body.as_ref()?,
        _ => return stmt.filter(|_| index == *self.path.last().unwrap()),
      };
    }
    stmt
  }
}

/// What a locally-exported name points at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportTarget {
  Decl(DeclRef),
  /// `export * as NS from "x"`: the name stays rooted in this file, marked
  /// with the namespace's source specifier.
  Namespace { specifier: String },
}

/// An export whose declaration lives in this file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceExport {
  /// Public name this export is visible under.
  pub name: String,
  /// Name of the backing declaration (differs under `export {A as B}`).
  pub local_name: String,
  pub target: ExportTarget,
}

/// A named re-export from another file, rename preserved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reexport {
  pub export_name: String,
  pub source_name: String,
  pub specifier: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ImportKind {
  Named,
  Default,
  Namespace,
}

/// One import binding introduced at the top level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportBinding {
  pub local: String,
  pub imported: String,
  pub kind: ImportKind,
  pub specifier: String,
}

/// Classified exports of a single file, plus the binding tables the
/// transformer needs.
#[derive(Clone, Debug, Default)]
pub struct FileExports {
  pub source: Vec<SourceExport>,
  pub reexports: Vec<Reexport>,
  pub wildcards: Vec<String>,
  pub imports: Vec<ImportBinding>,
  /// Top-level value bindings by name.
  pub bindings: HashMap<String, DeclRef>,
  /// Type-scope table: scope path (namespace statement indices; empty for
  /// the top level) to name to declaration. The parser does not track type
  /// declarations as bindings, so this is collected separately.
  pub type_scope: HashMap<Vec<usize>, HashMap<String, DeclRef>>,
}

impl FileExports {
  /// Look a name up starting at the innermost scope and walking outward:
  /// value bindings first, then the type scopes.
  pub fn lookup(&self, name: &str, scope: &[usize]) -> Option<DeclRef> {
    if scope.is_empty() {
      if let Some(decl) = self.bindings.get(name) {
        return Some(decl.clone());
      }
    }
    let mut scope = scope.to_vec();
    loop {
      if let Some(decl) = self.type_scope.get(&scope).and_then(|s| s.get(name)) {
        return Some(decl.clone());
      }
      if scope.pop().is_none() {
        return self.bindings.get(name).cloned();
      }
    }
  }

  /// Import binding for a local name, if one exists.
  pub fn import(&self, local: &str) -> Option<&ImportBinding> {
    self.imports.iter().find(|i| i.local == local)
  }
}

/// Enumerate every export statement of a file into classified lists, and
/// collect the binding tables.
pub fn gather_exports(top: &Node<TopLevel>) -> FileExports {
  let mut out = FileExports::default();
  // `export {Foo as Bar}` with no `from`: resolved against local bindings
  // after the whole file has been walked.
  let mut local_lists: Vec<(String, String)> = Vec::new();

  gather_scope(&top.stx.body, &[], &mut out, &mut local_lists);

  for (export_name, local_name) in local_lists {
    if let Some(decl) = out.lookup(&local_name, &[]) {
      out.source.push(SourceExport {
        name: export_name,
        local_name,
        target: ExportTarget::Decl(decl),
      });
    } else if let Some(import) = out.import(&local_name).cloned() {
      // `import {X} from "m"; export {X};` re-exports the original.
      out.reexports.push(Reexport {
        export_name,
        source_name: import.imported,
        specifier: import.specifier,
      });
    }
    // An export of an unbound name is dropped, not fatal.
  }
  out
}

fn gather_scope(
  stmts: &[Node<Stmt>],
  scope: &[usize],
  out: &mut FileExports,
  local_lists: &mut Vec<(String, String)>,
) {
  let top_level = scope.is_empty();
  for (index, stmt) in stmts.iter().enumerate() {
    let decl_path = || {
      let mut path = scope.to_vec();
      path.push(index);
      path
    };
    match stmt.stx.as_ref() {
      Stmt::Import(import) if top_level => {
        let import = &import.stx;
        if let Some(default) = &import.default {
          out.imports.push(ImportBinding {
            local: default.clone(),
            imported: "default".to_string(),
            kind: ImportKind::Default,
            specifier: import.module.clone(),
          });
        }
        match &import.names {
          Some(ImportNames::All(local)) => out.imports.push(ImportBinding {
            local: local.clone(),
            imported: "*".to_string(),
            kind: ImportKind::Namespace,
            specifier: import.module.clone(),
          }),
          Some(ImportNames::Specific(names)) => {
            for name in names {
              out.imports.push(ImportBinding {
                local: name.local().to_string(),
                imported: name.imported.clone(),
                kind: ImportKind::Named,
                specifier: import.module.clone(),
              });
            }
          }
          None => {}
        }
      }
      Stmt::ExportList(list) if top_level => {
        let list = &list.stx;
        match (&list.names, &list.from) {
          (ExportNames::Specific(names), Some(from)) => {
            for name in names {
              out.reexports.push(Reexport {
                export_name: name.exported_as().to_string(),
                source_name: name.target.clone(),
                specifier: from.clone(),
              });
            }
          }
          (ExportNames::Specific(names), None) => {
            for name in names {
              local_lists
                .push((name.exported_as().to_string(), name.target.clone()));
            }
          }
          (ExportNames::All(None), Some(from)) => {
            out.wildcards.push(from.clone());
          }
          (ExportNames::All(Some(alias)), Some(from)) => {
            out.source.push(SourceExport {
              name: alias.clone(),
              local_name: alias.clone(),
              target: ExportTarget::Namespace {
                specifier: from.clone(),
              },
            });
          }
          (ExportNames::All(_), None) => {}
        }
      }
      Stmt::VarDecl(decl) => {
        for (di, declarator) in decl.stx.declarators.iter().enumerate() {
          let Some(name) = declarator.pattern.stx.name() else {
            continue;
          };
          let decl_ref = DeclRef {
            path: decl_path(),
            declarator: Some(di),
          };
          if top_level {
            out.bindings.insert(name.to_string(), decl_ref.clone());
            if decl.stx.export {
              out.source.push(SourceExport {
                name: name.to_string(),
                local_name: name.to_string(),
                target: ExportTarget::Decl(decl_ref),
              });
            }
          }
        }
      }
      Stmt::FunctionDecl(decl) => {
        if let Some(name) = &decl.stx.name {
          let decl_ref = DeclRef {
            path: decl_path(),
            declarator: None,
          };
          if top_level {
            out.bindings.insert(name.clone(), decl_ref.clone());
          }
          // Ambient function identifiers join the type scope; the parser
          // treats them as statements, not bindings.
          out
            .type_scope
            .entry(scope.to_vec())
            .or_default()
            .insert(name.clone(), decl_ref.clone());
          if decl.stx.export && top_level {
            out.source.push(SourceExport {
              name: name.clone(),
              local_name: name.clone(),
              target: ExportTarget::Decl(decl_ref),
            });
          }
        }
      }
      Stmt::ClassDecl(decl) => {
        if let Some(name) = &decl.stx.name {
          let decl_ref = DeclRef {
            path: decl_path(),
            declarator: None,
          };
          if top_level {
            out.bindings.insert(name.clone(), decl_ref.clone());
          }
          out
            .type_scope
            .entry(scope.to_vec())
            .or_default()
            .insert(name.clone(), decl_ref.clone());
          if decl.stx.export && top_level {
            out.source.push(SourceExport {
              name: name.clone(),
              local_name: name.clone(),
              target: ExportTarget::Decl(decl_ref),
            });
          }
        }
      }
      Stmt::InterfaceDecl(decl) => {
        gather_type_decl(
          &decl.stx.name,
          decl.stx.export,
          scope,
          decl_path(),
          out,
        );
      }
      Stmt::TypeAliasDecl(decl) => {
        gather_type_decl(
          &decl.stx.name,
          decl.stx.export,
          scope,
          decl_path(),
          out,
        );
      }
      Stmt::EnumDecl(decl) => {
        let decl_ref = DeclRef {
          path: decl_path(),
          declarator: None,
        };
        if top_level {
          out.bindings.insert(decl.stx.name.clone(), decl_ref.clone());
        }
        gather_type_decl(&decl.stx.name, decl.stx.export, scope, decl_path(), out);
      }
      Stmt::NamespaceDecl(decl) => {
        // `namespace A.B` introduces `A`.
        let name = decl
          .stx
          .name
          .split('.')
          .next()
          .unwrap_or(&decl.stx.name)
          .to_string();
        gather_type_decl(&name, decl.stx.export, scope, decl_path(), out);
        let mut inner = scope.to_vec();
        inner.push(index);
        gather_scope(&decl.stx.body, &inner, out, local_lists);
      }
      Stmt::ModuleDecl(decl) => {
        if let Some(body) = &decl.stx.body {
          let mut inner = scope.to_vec();
          inner.push(index);
          gather_scope(body, &inner, out, local_lists);
        }
      }
      Stmt::GlobalDecl(decl) => {
        let mut inner = scope.to_vec();
        inner.push(index);
        gather_scope(&decl.stx.body, &inner, out, local_lists);
      }
      // `export default` forms are recognized but deliberately produce no
      // entries.
      Stmt::ExportDefault(_) | Stmt::ExportEquals(_) => {}
      _ => {}
    }
  }
}

fn gather_type_decl(
  name: &str,
  export: bool,
  scope: &[usize],
  path: Vec<usize>,
  out: &mut FileExports,
) {
  let decl_ref = DeclRef {
    path,
    declarator: None,
  };
  out
    .type_scope
    .entry(scope.to_vec())
    .or_default()
    .insert(name.to_string(), decl_ref.clone());
  if export && scope.is_empty() {
    out.source.push(SourceExport {
      name: name.to_string(),
      local_name: name.to_string(),
      target: ExportTarget::Decl(decl_ref),
    });
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn gather(source: &str) -> FileExports {
    gather_exports(&parse_ts::parse(source).expect("parse"))
  }

  #[test]
  fn classifies_source_exports() {
    let exports = gather(
      "export interface A {}\n\
       export type B = string;\n\
       export const c = 1, d = 2;\n\
       export function e() {}\n\
       enum F {}\n\
       export {F};",
    );
    let names: Vec<&str> = exports.source.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["A", "B", "c", "d", "e", "F"]);
  }

  #[test]
  fn classifies_reexports_and_wildcards() {
    let exports = gather(
      "export {A, B as C} from './a';\n\
       export * from './b';\n\
       export * as NS from './c';",
    );
    assert_eq!(exports.reexports.len(), 2);
    assert_eq!(exports.reexports[1].export_name, "C");
    assert_eq!(exports.reexports[1].source_name, "B");
    assert_eq!(exports.wildcards, ["./b"]);
    assert!(matches!(
      &exports.source[0].target,
      ExportTarget::Namespace { specifier } if specifier == "./c"
    ));
  }

  #[test]
  fn local_export_list_resolves_through_type_scope() {
    let exports = gather("interface Hidden {}\ntype T = 1;\nexport {Hidden, T as U};");
    let names: Vec<&str> = exports.source.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Hidden", "U"]);
  }

  #[test]
  fn unbound_local_export_is_dropped() {
    let exports = gather("export {Missing};");
    assert!(exports.source.is_empty());
  }

  #[test]
  fn collects_import_bindings() {
    let exports = gather(
      "import A, {B, C as D} from './a';\nimport * as NS from './b';",
    );
    assert_eq!(exports.imports.len(), 4);
    assert_eq!(exports.imports[0].kind, ImportKind::Default);
    assert_eq!(exports.imports[2].local, "D");
    assert_eq!(exports.imports[2].imported, "C");
    assert_eq!(exports.imports[3].kind, ImportKind::Namespace);
  }

  #[test]
  fn type_scope_lookup_walks_outward() {
    let exports = gather(
      "interface Outer {}\n\
       namespace NS { interface Inner {} }",
    );
    // Inner scope sees both; top level sees only Outer.
    let inner_scope = [1usize];
    assert!(exports.lookup("Inner", &inner_scope).is_some());
    assert!(exports.lookup("Outer", &inner_scope).is_some());
    assert!(exports.lookup("Inner", &[]).is_none());
    assert!(exports.lookup("Outer", &[]).is_some());
  }

  #[test]
  fn exporting_an_imported_name_is_a_reexport() {
    let exports = gather("import {A} from './a';\nexport {A as B};");
    assert!(exports.source.is_empty());
    assert_eq!(exports.reexports.len(), 1);
    assert_eq!(exports.reexports[0].export_name, "B");
    assert_eq!(exports.reexports[0].source_name, "A");
    assert_eq!(exports.reexports[0].specifier, "./a");
  }

  #[test]
  fn default_exports_produce_no_entries() {
    let exports = gather("export default function foo() {}\nexport default 1;");
    assert!(exports.source.is_empty());
    assert!(exports.reexports.is_empty());
  }

  #[test]
  fn decl_ref_resolves_through_namespaces() {
    let top = parse_ts::parse("namespace NS { interface Inner {} }").unwrap();
    let exports = gather_exports(&top);
    let decl = exports.lookup("Inner", &[0]).unwrap();
    let stmt = decl.stmt(&top).unwrap();
    assert!(matches!(stmt.stx.as_ref(), Stmt::InterfaceDecl(_)));
  }
}
