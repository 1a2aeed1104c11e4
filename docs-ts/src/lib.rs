//! Documentation-graph loader for TypeScript.
//!
//! Given an entry file, the loader produces a self-contained graph of every
//! exported declaration: interfaces, type aliases, classes (lowered to
//! interfaces), functions, enums, React-style components, and initialized
//! variables. The pipeline has three stages: an export-graph resolver that
//! follows re-exports (barrels, renames, wildcards) to each symbol's
//! originating declaration; a transformer that lowers TypeScript syntax
//! into a language-neutral node tree; and a linker that resolves
//! cross-file references, substitutes type parameters, flattens interface
//! inheritance, and evaluates `Omit`/`keyof`. The result per entry file is
//! two maps: `exports` (public name to node) and `links` (id to node for
//! every shared type the exports mention).
//!
//! The embedding bundler supplies a [`Host`] for file contents and module
//! resolution, and a [`LoaderCache`] shared across requests:
//!
//! ```rust
//! use docs_ts::{Host, HostError, Loader, LoaderCache, NodeKind};
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct MemoryHost {
//!   files: HashMap<String, Arc<str>>,
//! }
//!
//! impl Host for MemoryHost {
//!   fn source(&self, path: &str) -> Result<Arc<str>, HostError> {
//!     self
//!       .files
//!       .get(path)
//!       .cloned()
//!       .ok_or_else(|| HostError::new(format!("missing file {path}")))
//!   }
//!
//!   fn resolve(&self, specifier: &str, _from: &str) -> Result<String, HostError> {
//!     Ok(format!("{}.ts", specifier.trim_start_matches("./")))
//!   }
//! }
//!
//! let mut host = MemoryHost::default();
//! host.files.insert(
//!   "index.ts".into(),
//!   Arc::from("export interface Size { width: number; height: number; }"),
//! );
//!
//! let loader = Loader::new(Arc::new(host), Arc::new(LoaderCache::new()));
//! let result = loader.load("index.ts", None).unwrap();
//! let size = &result.exports["Size"];
//! let NodeKind::Interface(size) = &size.kind else { panic!("expected interface") };
//! assert_eq!(size.properties.len(), 2);
//! ```
//!
//! Loads are synchronous; concurrent loads of different entry files may
//! share one cache, which is internally synchronized. The serialized form
//! of [`LoadResult`] is stable JSON with lowercase `"type"` discriminants
//! and insertion-ordered property maps.

pub mod cache;
pub mod error;
pub mod gather;
pub mod graph;
pub mod host;
pub mod jsdoc;
pub mod link;
pub mod load;
pub mod node;
pub mod transform;

pub use cache::LinkedSymbol;
pub use cache::LoaderCache;
pub use error::HostError;
pub use error::LoadError;
pub use host::Host;
pub use load::Asset;
pub use load::LoadResult;
pub use load::Loader;
pub use node::node_id;
pub use node::Access;
pub use node::DocNode;
pub use node::Docs;
pub use node::NodeKind;
pub use node::Properties;
