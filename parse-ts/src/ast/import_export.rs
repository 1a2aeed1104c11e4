use serde::Serialize;

/// One name in `import { ... }`.
#[derive(Debug, Serialize)]
pub struct ImportName {
  // TypeScript: `import { type Foo }`.
  pub type_only: bool,
  pub imported: String,
  // None means the local name equals `imported`.
  pub alias: Option<String>,
}

#[derive(Debug, Serialize)]
pub enum ImportNames {
  // `import * as name`.
  All(String),
  // `import {a as b, c}`.
  Specific(Vec<ImportName>),
}

/// One name in `export { ... }`.
#[derive(Debug, Serialize)]
pub struct ExportName {
  // TypeScript: `export { type Foo }`.
  pub type_only: bool,
  // Local (or source-module) name being exported.
  pub target: String,
  // None means exported under `target` unchanged.
  pub alias: Option<String>,
}

#[derive(Debug, Serialize)]
pub enum ExportNames {
  // `export * from "m"` / `export * as name from "m"`.
  All(Option<String>),
  // `export {a as default, b as c, d}`.
  Specific(Vec<ExportName>),
}

impl ExportName {
  /// Public name this export is visible under.
  pub fn exported_as(&self) -> &str {
    self.alias.as_deref().unwrap_or(&self.target)
  }
}

impl ImportName {
  /// Local binding name this import introduces.
  pub fn local(&self) -> &str {
    self.alias.as_deref().unwrap_or(&self.imported)
  }
}
