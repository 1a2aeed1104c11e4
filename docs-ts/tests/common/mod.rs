use docs_ts::Host;
use docs_ts::HostError;
use docs_ts::Loader;
use docs_ts::LoaderCache;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

/// In-memory host: files keyed by pseudo-absolute paths like `/a.ts`.
/// Relative specifiers resolve by convention (`./a` becomes `/a.ts`);
/// explicit edges override, and anything else fails loudly.
#[derive(Default)]
pub struct MemoryHost {
  files: Mutex<HashMap<String, Arc<str>>>,
  edges: Mutex<HashMap<(String, String), String>>,
}

impl MemoryHost {
  pub fn insert(&self, path: &str, source: &str) {
    self
      .files
      .lock()
      .unwrap()
      .insert(path.to_string(), Arc::from(source));
  }

  #[allow(dead_code)]
  pub fn link(&self, from: &str, specifier: &str, to: &str) {
    self
      .edges
      .lock()
      .unwrap()
      .insert((from.to_string(), specifier.to_string()), to.to_string());
  }
}

impl Host for MemoryHost {
  fn source(&self, path: &str) -> Result<Arc<str>, HostError> {
    self
      .files
      .lock()
      .unwrap()
      .get(path)
      .cloned()
      .ok_or_else(|| HostError::new(format!("missing file {path}")))
  }

  fn resolve(&self, specifier: &str, from: &str) -> Result<String, HostError> {
    if let Some(to) = self
      .edges
      .lock()
      .unwrap()
      .get(&(from.to_string(), specifier.to_string()))
    {
      return Ok(to.clone());
    }
    if let Some(rest) = specifier.strip_prefix("./") {
      return Ok(format!("/{rest}.ts"));
    }
    Err(HostError::new(format!(
      "cannot resolve '{specifier}' from {from}"
    )))
  }
}

/// Build a loader over the given `(path, source)` fixtures with a fresh
/// cache.
pub fn fixture(files: &[(&str, &str)]) -> Loader {
  let host = MemoryHost::default();
  for (path, source) in files {
    host.insert(path, source);
  }
  Loader::new(Arc::new(host), Arc::new(LoaderCache::new()))
}
