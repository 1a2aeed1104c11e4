use serde::Serialize;

/// Binding pattern.
///
/// Destructuring patterns are recognized but not decomposed: the doc pipeline
/// only follows named top-level bindings, so object/array patterns carry no
/// inner structure.
#[derive(Debug, Serialize)]
#[serde(tag = "$t")]
pub enum Pat {
  Id(String),
  Object,
  Array,
}

impl Pat {
  pub fn name(&self) -> Option<&str> {
    match self {
      Pat::Id(name) => Some(name),
      Pat::Object | Pat::Array => None,
    }
  }
}
