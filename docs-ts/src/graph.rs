use crate::gather::ExportTarget;
use crate::load::LoadTask;
use crate::load::Loader;
use crate::error::LoadError;
use std::collections::BTreeMap;
use std::sync::Arc;

/// One fully-resolved public export: where the backing declaration lives,
/// regardless of how many re-export hops sit in between.
#[derive(Clone, Debug)]
pub struct ResolvedExport {
  /// File containing the declaration.
  pub file: String,
  /// Name the declaration is exported under from its own file.
  pub name: String,
  /// Name of the declaration itself (renames preserved upstream).
  pub local_name: String,
  pub target: ExportTarget,
}

/// Public name to originating declaration for one file.
pub type ExportGraph = BTreeMap<String, ResolvedExport>;

/// Resolve the full export surface of `file`, following named re-exports
/// and wildcards across files. Cycles yield an empty (uncached) map for the
/// re-entered file, which the outer pass treats as that file's answer.
pub(crate) fn exports_of(
  loader: &Loader,
  task: &mut LoadTask,
  file: &str,
) -> Result<Arc<ExportGraph>, LoadError> {
  if let Some(graph) = loader.cache().exports_graph(file) {
    return Ok(graph);
  }
  if !task.graph_in_progress.insert(file.to_string()) {
    return Ok(Arc::new(ExportGraph::new()));
  }
  let result = build(loader, task, file);
  task.graph_in_progress.remove(file);
  let graph = Arc::new(result?);
  loader.cache().set_exports_graph(file, graph.clone());
  Ok(graph)
}

fn build(
  loader: &Loader,
  task: &mut LoadTask,
  file: &str,
) -> Result<ExportGraph, LoadError> {
  let mut out = ExportGraph::new();
  let Some(gathered) = loader.gathered(task, file)? else {
    // Unparsable files have no exports; dependents continue.
    return Ok(out);
  };

  for source in &gathered.source {
    out.insert(source.name.clone(), ResolvedExport {
      file: file.to_string(),
      name: source.name.clone(),
      local_name: source.local_name.clone(),
      target: source.target.clone(),
    });
  }

  for reexport in &gathered.reexports {
    let dep = loader.resolve(task, &reexport.specifier, file)?;
    let dep_graph = exports_of(loader, task, &dep)?;
    // A name the source file does not export is dropped silently.
    if let Some(entry) = dep_graph.get(&reexport.source_name) {
      out.insert(reexport.export_name.clone(), entry.clone());
    }
  }

  for specifier in &gathered.wildcards {
    let dep = loader.resolve(task, specifier, file)?;
    let dep_graph = exports_of(loader, task, &dep)?;
    for (name, entry) in dep_graph.iter() {
      // Wildcards provide the "also available" set; explicit names win.
      out.entry(name.clone()).or_insert_with(|| entry.clone());
    }
  }

  tracing::debug!(file, exports = out.len(), "resolved export graph");
  Ok(out)
}
