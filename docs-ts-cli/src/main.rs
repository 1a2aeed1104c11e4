use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use docs_ts::Host;
use docs_ts::HostError;
use docs_ts::Loader;
use docs_ts::LoaderCache;
use serde_json::json;
use std::io::stdout;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

/// Load a TypeScript file and print its documentation graph as JSON.
#[derive(Parser, Debug)]
#[command(author, version)]
struct Cli {
  /// Entry file (.ts/.tsx).
  file: PathBuf,
  /// Restrict the output to these exported symbols.
  #[arg(long = "symbol")]
  symbols: Vec<String>,
  /// Pretty-print the JSON output.
  #[arg(long)]
  pretty: bool,
}

/// Filesystem host with relative-specifier resolution: `./x` probes
/// `x.ts`, `x.tsx`, `x.d.ts`, then `x/index.ts(x)`.
struct FsHost;

const PROBES: &[&str] = &[".ts", ".tsx", ".d.ts", "/index.ts", "/index.tsx"];

impl Host for FsHost {
  fn source(&self, path: &str) -> Result<Arc<str>, HostError> {
    std::fs::read_to_string(path)
      .map(Arc::from)
      .map_err(|err| HostError::new(format!("failed to read {path}: {err}")))
  }

  fn resolve(&self, specifier: &str, from: &str) -> Result<String, HostError> {
    if !specifier.starts_with('.') {
      return Err(HostError::new(format!(
        "bare specifier '{specifier}' is not resolvable without a package root"
      )));
    }
    let dir = Path::new(from).parent().unwrap_or(Path::new("."));
    let base = dir.join(specifier);
    if base.is_file() {
      return Ok(base.to_string_lossy().into_owned());
    }
    let raw = base.to_string_lossy();
    for probe in PROBES {
      let candidate = format!("{raw}{probe}");
      if Path::new(&candidate).is_file() {
        return Ok(candidate);
      }
    }
    Err(HostError::new(format!(
      "cannot resolve '{specifier}' from {from}"
    )))
  }
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();

  let args = Cli::parse();
  let file = args
    .file
    .canonicalize()
    .with_context(|| format!("cannot open {}", args.file.display()))?;
  let file = file.to_string_lossy().into_owned();

  let loader = Loader::new(Arc::new(FsHost), Arc::new(LoaderCache::new()));
  let symbols: Vec<&str> = args.symbols.iter().map(String::as_str).collect();
  let requested = (!symbols.is_empty()).then_some(symbols.as_slice());
  let result = loader
    .load(&file, requested)
    .with_context(|| format!("failed to load {file}"))?;

  let value = json!({
    "exports": result.exports,
    "links": result.links,
  });
  let out = stdout();
  let mut out = out.lock();
  if args.pretty {
    serde_json::to_writer_pretty(&mut out, &value)?;
  } else {
    serde_json::to_writer(&mut out, &value)?;
  }
  out.write_all(b"\n")?;
  Ok(())
}
