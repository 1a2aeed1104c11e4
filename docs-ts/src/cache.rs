use crate::graph::ExportGraph;
use crate::node::node_id_file;
use crate::node::DocNode;
use ahash::HashMap;
use ahash::HashMapExt;
use parking_lot::Mutex;
use parse_ts::ast::node::Node;
use parse_ts::ast::TopLevel;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A linked symbol: the export's node plus every link target it needs for
/// display.
#[derive(Clone, Debug)]
pub struct LinkedSymbol {
  pub node: DocNode,
  pub links: BTreeMap<String, DocNode>,
}

/// Cache shared across load requests: parsed ASTs and export graphs by
/// absolute path, linked symbols by node id.
///
/// Each map is independently synchronized; a whole get-compute-set sequence
/// for one file runs within one load call, and cycles are cut before a
/// second computation of the same entry can start, so per-map locking is
/// sufficient.
#[derive(Default)]
pub struct LoaderCache {
  asts: Mutex<HashMap<String, Arc<Node<TopLevel>>>>,
  graphs: Mutex<HashMap<String, Arc<ExportGraph>>>,
  symbols: Mutex<HashMap<String, Arc<LinkedSymbol>>>,
}

impl LoaderCache {
  pub fn new() -> LoaderCache {
    LoaderCache::default()
  }

  pub fn ast(&self, path: &str) -> Option<Arc<Node<TopLevel>>> {
    self.asts.lock().get(path).cloned()
  }

  pub fn set_ast(&self, path: &str, ast: Arc<Node<TopLevel>>) {
    self.asts.lock().insert(path.to_string(), ast);
  }

  pub fn exports_graph(&self, path: &str) -> Option<Arc<ExportGraph>> {
    self.graphs.lock().get(path).cloned()
  }

  pub fn set_exports_graph(&self, path: &str, graph: Arc<ExportGraph>) {
    self.graphs.lock().insert(path.to_string(), graph);
  }

  pub fn symbol(&self, id: &str) -> Option<Arc<LinkedSymbol>> {
    self.symbols.lock().get(id).cloned()
  }

  pub fn set_symbol(&self, id: &str, symbol: Arc<LinkedSymbol>) {
    self.symbols.lock().insert(id.to_string(), symbol);
  }

  /// Evict everything derived from `path`: its AST, its export graph, and
  /// every symbol declared in it. Symbols that merely link to the evicted
  /// ids survive; their consumers re-resolve on the next load and
  /// repopulate the cache.
  pub fn invalidate_file(&self, path: &str) {
    self.asts.lock().remove(path);
    self.graphs.lock().remove(path);
    self
      .symbols
      .lock()
      .retain(|id, _| node_id_file(id) != path);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::node::node_id;
  use crate::node::NodeKind;

  #[test]
  fn invalidation_is_scoped_to_the_file() {
    let cache = LoaderCache::new();
    let a = node_id("/a.ts", "A");
    let b = node_id("/b.ts", "B");
    for id in [&a, &b] {
      cache.set_symbol(id, Arc::new(LinkedSymbol {
        node: NodeKind::Any.into(),
        links: BTreeMap::new(),
      }));
    }
    cache.invalidate_file("/a.ts");
    assert!(cache.symbol(&a).is_none());
    assert!(cache.symbol(&b).is_some(), "other files' symbols survive");
  }
}
