use crate::node::Access;
use crate::node::Docs;
use ahash::HashMap;
use ahash::HashMapExt;

/// Parsed doc comment: free-text description plus the tags the doc pipeline
/// distributes onto nodes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DocComment {
  pub description: Option<String>,
  pub access: Option<Access>,
  pub default: Option<String>,
  pub selector: Option<String>,
  pub returns: Option<String>,
  pub params: HashMap<String, String>,
}

impl DocComment {
  /// Parse the raw text of a `/** ... */` block.
  pub fn parse(raw: &str) -> DocComment {
    let mut out = DocComment {
      params: HashMap::new(),
      ..DocComment::default()
    };

    let body = raw
      .trim()
      .trim_start_matches("/**")
      .trim_end_matches("*/");
    let mut description = String::new();
    // Current tag being accumulated: (name, argument, text).
    let mut tag: Option<(String, String)> = None;

    let mut flush = |tag: &mut Option<(String, String)>, out: &mut DocComment| {
      let Some((name, text)) = tag.take() else {
        return;
      };
      let text = text.trim().to_string();
      match name.as_str() {
        "param" | "arg" | "argument" => {
          // `@param name description` with an optional `{type}` prefix.
          let text = text
            .strip_prefix('{')
            .and_then(|rest| rest.split_once('}'))
            .map(|(_, rest)| rest.trim_start())
            .unwrap_or(&text);
          if let Some((param, desc)) = text.split_once(char::is_whitespace) {
            let param = param.trim_start_matches('[').trim_end_matches(']');
            out.params.insert(param.to_string(), desc.trim().to_string());
          } else if !text.is_empty() {
            let param = text.trim_start_matches('[').trim_end_matches(']');
            out.params.insert(param.to_string(), String::new());
          }
        }
        "return" | "returns" => out.returns = Some(text),
        "default" => out.default = Some(text),
        "selector" => out.selector = Some(text),
        "public" => out.access = Some(Access::Public),
        "protected" => out.access = Some(Access::Protected),
        // Deprecated declarations are hidden the same way private ones are.
        "private" | "deprecated" => out.access = Some(Access::Private),
        _ => {}
      }
    };

    for line in body.lines() {
      let line = line.trim().trim_start_matches('*').trim_start();
      if let Some(rest) = line.strip_prefix('@') {
        flush(&mut tag, &mut out);
        let (name, text) = rest
          .split_once(char::is_whitespace)
          .unwrap_or((rest, ""));
        tag = Some((name.to_string(), text.to_string()));
      } else if let Some((_, text)) = tag.as_mut() {
        text.push('\n');
        text.push_str(line);
      } else {
        if !description.is_empty() {
          description.push('\n');
        }
        description.push_str(line);
      }
    }
    flush(&mut tag, &mut out);

    let description = description.trim();
    if !description.is_empty() {
      out.description = Some(description.to_string());
    }
    out
  }

  /// Docs to attach directly to the documented node.
  pub fn docs(&self) -> Docs {
    Docs {
      description: self.description.clone(),
      access: self.access,
      default: self.default.clone(),
      selector: self.selector.clone(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_description_only() {
    let doc = DocComment::parse("/** A plain description. */");
    assert_eq!(doc.description.as_deref(), Some("A plain description."));
    assert!(doc.params.is_empty());
  }

  #[test]
  fn parses_multiline_description_and_tags() {
    let doc = DocComment::parse(
      "/**\n\
       \x20* Renders a button.\n\
       \x20* Second line.\n\
       \x20*\n\
       \x20* @param props the component props\n\
       \x20* @param ref forwarded ref\n\
       \x20* @returns the rendered element\n\
       \x20*/",
    );
    assert_eq!(
      doc.description.as_deref(),
      Some("Renders a button.\nSecond line.")
    );
    assert_eq!(doc.params["props"], "the component props");
    assert_eq!(doc.params["ref"], "forwarded ref");
    assert_eq!(doc.returns.as_deref(), Some("the rendered element"));
  }

  #[test]
  fn parses_typed_and_bracketed_params() {
    let doc = DocComment::parse("/** @param {string} [name] optional name */");
    assert_eq!(doc.params["name"], "optional name");
  }

  #[test]
  fn access_tags() {
    assert_eq!(
      DocComment::parse("/** @private */").access,
      Some(Access::Private)
    );
    assert_eq!(
      DocComment::parse("/** @protected */").access,
      Some(Access::Protected)
    );
    assert_eq!(
      DocComment::parse("/** @public */").access,
      Some(Access::Public)
    );
    assert_eq!(
      DocComment::parse("/** @deprecated use other */").access,
      Some(Access::Private)
    );
  }

  #[test]
  fn default_and_selector() {
    let doc = DocComment::parse("/** Size.\n * @default 'medium'\n * @selector .spectrum-Btn */");
    assert_eq!(doc.default.as_deref(), Some("'medium'"));
    assert_eq!(doc.selector.as_deref(), Some(".spectrum-Btn"));
  }

  #[test]
  fn multiline_tag_text_accumulates() {
    let doc = DocComment::parse("/** @returns a thing\n * spanning lines */");
    assert_eq!(doc.returns.as_deref(), Some("a thing\nspanning lines"));
  }
}
