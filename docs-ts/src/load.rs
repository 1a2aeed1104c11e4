use crate::cache::LinkedSymbol;
use crate::cache::LoaderCache;
use crate::error::LoadError;
use crate::gather::gather_exports;
use crate::gather::ExportTarget;
use crate::gather::FileExports;
use crate::gather::ImportKind;
use crate::graph;
use crate::graph::ResolvedExport;
use crate::host::Host;
use crate::link;
use crate::node::node_id;
use crate::node::DocNode;
use crate::node::NodeKind;
use crate::node::Properties;
use crate::node::PropertyNode;
use crate::transform::Transformer;
use ahash::HashMap;
use ahash::HashMapExt;
use ahash::HashSet;
use ahash::HashSetExt;
use parse_ts::ast::node::Node;
use parse_ts::ast::TopLevel;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Linked documentation graph for one entry file.
#[derive(Clone, Debug, Default)]
pub struct LoadResult {
  pub exports: BTreeMap<String, DocNode>,
  pub links: BTreeMap<String, DocNode>,
}

/// Per-file bundle exchanged between the orchestrator and the linker.
#[derive(Clone, Debug, Default)]
pub struct Asset {
  /// Absolute path of the file.
  pub id: String,
  /// Public name to linked node.
  pub exports: BTreeMap<String, DocNode>,
  /// Link id to node, for everything the exports reference.
  pub links: BTreeMap<String, DocNode>,
  /// Local declaration name to public name (`"*"` marks a wildcard).
  pub symbols: BTreeMap<String, String>,
}

impl Asset {
  fn stub(path: &str) -> Asset {
    Asset {
      id: path.to_string(),
      ..Asset::default()
    }
  }
}

/// Per-call state: the in-progress sets that cut circular recursion plus
/// memoized per-file work. Never shared across concurrent loads.
#[derive(Default)]
pub struct LoadTask {
  in_progress: HashSet<(String, Option<BTreeSet<String>>)>,
  pub(crate) graph_in_progress: HashSet<String>,
  gathered: HashMap<String, Option<Arc<FileExports>>>,
  resolved: HashMap<(String, String), String>,
  parse_failed: HashSet<String>,
}

/// Top-level loader: drives gather, graph resolution, transformation, and
/// linking for an entry file, reading and writing the shared cache.
#[derive(Clone)]
pub struct Loader {
  host: Arc<dyn Host>,
  cache: Arc<LoaderCache>,
}

impl Loader {
  pub fn new(host: Arc<dyn Host>, cache: Arc<LoaderCache>) -> Loader {
    Loader { host, cache }
  }

  pub fn cache(&self) -> &LoaderCache {
    &self.cache
  }

  /// Host-triggered invalidation; see [`LoaderCache::invalidate_file`].
  pub fn invalidate(&self, path: &str) {
    self.cache.invalidate_file(path);
  }

  /// Load the documentation graph of `path`. With `requested`, only those
  /// exported names (and what they require) are produced and cached.
  pub fn load(
    &self,
    path: &str,
    requested: Option<&[&str]>,
  ) -> Result<LoadResult, LoadError> {
    let requested =
      requested.map(|names| names.iter().map(|n| n.to_string()).collect::<BTreeSet<_>>());
    let mut task = LoadTask::default();
    let asset = self.load_inner(&mut task, path, requested)?;
    Ok(LoadResult {
      exports: asset.exports,
      links: asset.links,
    })
  }

  pub(crate) fn ast(
    &self,
    task: &mut LoadTask,
    path: &str,
  ) -> Result<Option<Arc<Node<TopLevel>>>, LoadError> {
    if let Some(ast) = self.cache.ast(path) {
      return Ok(Some(ast));
    }
    if task.parse_failed.contains(path) {
      return Ok(None);
    }
    let source = self.host.source(path)?;
    match parse_ts::parse(&source) {
      Ok(top) => {
        let ast = Arc::new(top);
        self.cache.set_ast(path, ast.clone());
        Ok(Some(ast))
      }
      Err(err) => {
        // The file contributes no exports; dependents continue. Nothing is
        // cached so a fixed file reparses.
        tracing::warn!(path, error = %err, "parse failed");
        task.parse_failed.insert(path.to_string());
        Ok(None)
      }
    }
  }

  pub(crate) fn gathered(
    &self,
    task: &mut LoadTask,
    path: &str,
  ) -> Result<Option<Arc<FileExports>>, LoadError> {
    if let Some(memo) = task.gathered.get(path) {
      return Ok(memo.clone());
    }
    let gathered = match self.ast(task, path)? {
      Some(ast) => Some(Arc::new(gather_exports(&ast))),
      None => None,
    };
    task.gathered.insert(path.to_string(), gathered.clone());
    Ok(gathered)
  }

  pub(crate) fn resolve(
    &self,
    task: &mut LoadTask,
    specifier: &str,
    from: &str,
  ) -> Result<String, LoadError> {
    let key = (specifier.to_string(), from.to_string());
    if let Some(path) = task.resolved.get(&key) {
      return Ok(path.clone());
    }
    let path = self
      .host
      .resolve(specifier, from)
      .map_err(|source| LoadError::Resolve {
        specifier: specifier.to_string(),
        from: from.to_string(),
        source,
      })?;
    task.resolved.insert(key, path.clone());
    Ok(path)
  }

  fn load_inner(
    &self,
    task: &mut LoadTask,
    path: &str,
    requested: Option<BTreeSet<String>>,
  ) -> Result<Asset, LoadError> {
    let key = (path.to_string(), requested.clone());
    if !task.in_progress.insert(key.clone()) {
      // Circular dependency: a best-effort stub, never cached, so a later
      // request retraverses.
      return Ok(Asset::stub(path));
    }
    let result = self.load_scoped(task, path, requested.as_ref());
    task.in_progress.remove(&key);
    result
  }

  fn load_scoped(
    &self,
    task: &mut LoadTask,
    path: &str,
    requested: Option<&BTreeSet<String>>,
  ) -> Result<Asset, LoadError> {
    tracing::debug!(path, ?requested, "loading");
    let graph = graph::exports_of(self, task, path)?;

    let mut exports = BTreeMap::new();
    let mut links: BTreeMap<String, DocNode> = BTreeMap::new();
    let mut symbols = BTreeMap::new();
    // Cache misses, split into declarations of this file and declarations
    // originating elsewhere (grouped by file).
    let mut local: Vec<(String, ResolvedExport)> = Vec::new();
    let mut foreign: BTreeMap<String, Vec<(String, ResolvedExport)>> = BTreeMap::new();

    for (public, entry) in graph.iter() {
      if requested.is_some_and(|set| !set.contains(public)) {
        continue;
      }
      let wildcard = matches!(entry.target, ExportTarget::Namespace { .. });
      symbols.insert(
        entry.local_name.clone(),
        if wildcard { "*".to_string() } else { public.clone() },
      );
      let id = node_id(&entry.file, &entry.local_name);
      if let Some(symbol) = self.cache.symbol(&id) {
        let mut node = symbol.node.clone();
        rename_node(&mut node, public);
        exports.insert(public.clone(), node);
        for (id, target) in &symbol.links {
          links.entry(id.clone()).or_insert_with(|| target.clone());
        }
      } else if entry.file == path {
        local.push((public.clone(), entry.clone()));
      } else {
        foreign
          .entry(entry.file.clone())
          .or_default()
          .push((public.clone(), entry.clone()));
      }
    }

    // Re-exported declarations: recurse into each originating file with the
    // minimal symbol subset it needs.
    for (origin, items) in foreign {
      let subset: BTreeSet<String> = items.iter().map(|(_, e)| e.name.clone()).collect();
      let asset = self.load_inner(task, &origin, Some(subset))?;
      for (public, entry) in items {
        // Missing entries come from circular stubs; they fill in on a later
        // request.
        if let Some(node) = asset.exports.get(&entry.name) {
          let mut node = node.clone();
          rename_node(&mut node, &public);
          exports.insert(public, node);
        }
      }
      for (id, target) in asset.links {
        links.entry(id).or_insert(target);
      }
    }

    if !local.is_empty() {
      self.load_local(task, path, &local, &mut exports, &mut links)?;
    }

    Ok(Asset {
      id: path.to_string(),
      exports,
      links,
      symbols,
    })
  }

  /// Transform and link declarations that live in `path` itself.
  fn load_local(
    &self,
    task: &mut LoadTask,
    path: &str,
    wanted: &[(String, ResolvedExport)],
    exports: &mut BTreeMap<String, DocNode>,
    links: &mut BTreeMap<String, DocNode>,
  ) -> Result<(), LoadError> {
    let Some(ast) = self.ast(task, path)? else {
      return Ok(());
    };
    let Some(gathered) = self.gathered(task, path)? else {
      return Ok(());
    };

    let mut transformer = Transformer::new(path, &ast, &gathered);
    let mut transformed: BTreeMap<String, DocNode> = BTreeMap::new();
    let mut namespaces: Vec<(String, String, String)> = Vec::new();
    for (public, entry) in wanted {
      match &entry.target {
        ExportTarget::Decl(decl) => {
          // Empty declarations (e.g. uninitialized variables) are skipped.
          if let Some(node) = transformer.transform_decl_ref(decl, public) {
            transformed.insert(public.clone(), node);
          }
        }
        ExportTarget::Namespace { specifier } => {
          namespaces.push((public.clone(), entry.local_name.clone(), specifier.clone()));
        }
      }
    }

    // Load every dependency the transformer actually referenced; these
    // imports are demanded, so resolution failures are fatal here.
    let dependencies = transformer.dependencies().to_vec();
    let mut dep_assets: HashMap<String, Asset> = HashMap::new();
    for dependency in &dependencies {
      let dep_path = self.resolve(task, &dependency.specifier, path)?;
      let namespace_import = dependency
        .imports
        .iter()
        .any(|i| i.kind == ImportKind::Namespace);
      let subset = if namespace_import {
        // `import * as X` may use any export; load the dependency fully.
        None
      } else {
        Some(
          dependency
            .imports
            .iter()
            .map(|i| i.imported.clone())
            .collect::<BTreeSet<_>>(),
        )
      };
      let asset = self.load_inner(task, &dep_path, subset)?;
      dep_assets.insert(dependency.specifier.clone(), asset);
    }

    let out = link::link(transformed, &dep_assets);

    for (public, node) in out.exports {
      let entry = wanted.iter().find(|(p, _)| *p == public);
      if let Some((_, entry)) = entry {
        let id = node_id(path, &entry.local_name);
        let symbol_links = link::links_for(&node, &out.links);
        self.cache.set_symbol(&id, Arc::new(LinkedSymbol {
          node: node.clone(),
          links: symbol_links,
        }));
      }
      exports.insert(public, node);
    }
    for (id, target) in out.links {
      links.entry(id).or_insert(target);
    }

    // `export * as NS from "x"`: the namespace is an object of the source
    // file's full export surface.
    for (public, local_name, specifier) in namespaces {
      let dep_path = self.resolve(task, &specifier, path)?;
      let asset = self.load_inner(task, &dep_path, None)?;
      let mut properties = Properties::default();
      for (name, node) in &asset.exports {
        properties.insert(
          name.clone(),
          NodeKind::Property(PropertyNode {
            name: name.clone(),
            value: Box::new(node.clone()),
            optional: false,
            index_type: None,
            inherited_from: None,
          })
          .into(),
        );
      }
      let node: DocNode = NodeKind::Object { properties }.into();
      let symbol_links = asset.links.clone();
      self.cache.set_symbol(
        &node_id(path, &local_name),
        Arc::new(LinkedSymbol {
          node: node.clone(),
          links: symbol_links,
        }),
      );
      exports.insert(public, node);
      for (id, target) in asset.links {
        links.entry(id).or_insert(target);
      }
    }

    Ok(())
  }
}

/// Give a fetched node the public name it is exported under here; its id
/// keeps pointing at the originating declaration.
fn rename_node(node: &mut DocNode, public: &str) {
  match &mut node.kind {
    NodeKind::Interface(i) => i.name = public.to_string(),
    NodeKind::Alias(a) => a.name = public.to_string(),
    NodeKind::Component(c) => c.name = public.to_string(),
    NodeKind::Function(f) => f.name = Some(public.to_string()),
    NodeKind::Enum { name, .. } => *name = public.to_string(),
    _ => {}
  }
}
