use thiserror::Error;

/// Error returned by a [`Host`](crate::Host).
#[derive(Debug, Error, Clone)]
#[error("{message}")]
pub struct HostError {
  pub(crate) message: String,
}

impl HostError {
  /// Create a new host error with the given message.
  pub fn new(message: impl Into<String>) -> HostError {
    HostError {
      message: message.into(),
    }
  }
}

/// Fatal error from [`Loader::load`](crate::Loader::load).
#[derive(Debug, Error)]
pub enum LoadError {
  #[error("host error: {0}")]
  Host(#[from] HostError),
  #[error("failed to resolve '{specifier}' from {from}: {source}")]
  Resolve {
    specifier: String,
    from: String,
    source: HostError,
  },
}
