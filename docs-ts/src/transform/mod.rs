mod decl;
mod expr;
mod type_expr;

use crate::gather::DeclRef;
use crate::gather::FileExports;
use crate::gather::ImportKind;
use crate::jsdoc::DocComment;
use crate::node::DocNode;
use crate::node::NodeKind;
use ahash::HashSet;
use ahash::HashSetExt;
use parse_ts::ast::node::Node;
use parse_ts::ast::TopLevel;

/// One import group the transformed declarations actually referenced,
/// aggregated by specifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dependency {
  pub specifier: String,
  pub imports: Vec<DependencyImport>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DependencyImport {
  pub kind: ImportKind,
  pub local: String,
  pub imported: String,
}

/// Lowers AST declarations of one file into documentation nodes.
///
/// Stateless per declaration, but carries two side channels across calls:
/// the dependency list (imports referenced by transformed declarations) and
/// the set of warned-unknown syntax kinds.
pub struct Transformer<'a> {
  pub(crate) file: &'a str,
  pub(crate) top: &'a Node<TopLevel>,
  pub(crate) exports: &'a FileExports,
  dependencies: Vec<Dependency>,
  /// Declarations currently being inlined; re-entry is a cycle and falls
  /// back to an identifier node.
  pub(crate) in_progress: HashSet<DeclRef>,
  warned: HashSet<String>,
}

impl<'a> Transformer<'a> {
  pub fn new(file: &'a str, top: &'a Node<TopLevel>, exports: &'a FileExports) -> Transformer<'a> {
    Transformer {
      file,
      top,
      exports,
      dependencies: Vec::new(),
      in_progress: HashSet::new(),
      warned: HashSet::new(),
    }
  }

  /// Dependencies referenced so far, aggregated by specifier.
  pub fn dependencies(&self) -> &[Dependency] {
    &self.dependencies
  }

  pub(crate) fn record_dependency(
    &mut self,
    specifier: &str,
    kind: ImportKind,
    local: &str,
    imported: &str,
  ) {
    let import = DependencyImport {
      kind,
      local: local.to_string(),
      imported: imported.to_string(),
    };
    if let Some(dep) = self
      .dependencies
      .iter_mut()
      .find(|d| d.specifier == specifier)
    {
      if !dep.imports.contains(&import) {
        dep.imports.push(import);
      }
    } else {
      self.dependencies.push(Dependency {
        specifier: specifier.to_string(),
        imports: vec![import],
      });
    }
  }

  /// Log an unknown syntactic form once and degrade to `any`.
  pub(crate) fn unknown(&mut self, kind: &str) -> DocNode {
    if self.warned.insert(kind.to_string()) {
      tracing::warn!(file = self.file, kind, "unhandled syntax in transformer");
    }
    NodeKind::Any.into()
  }

  pub(crate) fn parse_doc(raw: &Option<String>) -> DocComment {
    raw
      .as_deref()
      .map(DocComment::parse)
      .unwrap_or_default()
  }

  /// Distribute `@param`/`@returns` descriptions of `doc` into a function
  /// node's parameter and return sub-nodes.
  pub(crate) fn distribute_fn_docs(node: &mut DocNode, doc: &DocComment) {
    let NodeKind::Function(func) = &mut node.kind else {
      return;
    };
    for param in func.parameters.iter_mut() {
      let NodeKind::Parameter { name, .. } = &param.kind else {
        continue;
      };
      if let Some(desc) = doc.params.get(name) {
        if !desc.is_empty() {
          param.docs.description = Some(desc.clone());
        }
      }
    }
    if let Some(returns) = &doc.returns {
      func.return_type.docs.description = Some(returns.clone());
    }
  }

  pub(crate) fn local_decl(&self, name: &str) -> Option<DeclRef> {
    self.exports.lookup(name, &[])
  }
}
