use crate::error::HostError;
use std::sync::Arc;

/// Host interface supplied by the embedding bundler (or the CLI's
/// filesystem host).
///
/// Paths are absolute and opaque to the loader; the host owns both file
/// access and module resolution, including any configuration discovery the
/// resolver needs.
pub trait Host: Send + Sync {
  /// Supply the text of a file.
  fn source(&self, path: &str) -> Result<Arc<str>, HostError>;

  /// Resolve an import specifier from a containing file to an absolute
  /// path. Must fail loudly when the specifier cannot be resolved; the
  /// loader decides whether that failure is fatal for the request.
  fn resolve(&self, specifier: &str, from: &str) -> Result<String, HostError>;
}
