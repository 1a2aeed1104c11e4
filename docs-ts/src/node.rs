use indexmap::IndexMap;
use serde::Serialize;

/// Insertion-ordered property map of an interface/object node. Values are
/// `property` or `method` nodes.
pub type Properties = IndexMap<String, DocNode>;

/// Canonical identifier of a named declaration: `"<file>:<symbol>"`.
pub fn node_id(file: &str, symbol: &str) -> String {
  format!("{file}:{symbol}")
}

/// File component of a [`node_id`]. Only the last `:` splits the symbol, so
/// the rare colon-bearing path survives.
pub fn node_id_file(id: &str) -> &str {
  id.rsplit_once(':').map(|(file, _)| file).unwrap_or(id)
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
  Public,
  Protected,
  Private,
}

/// Documentation attached to a node, parsed from its doc comment.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Docs {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub access: Option<Access>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub default: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub selector: Option<String>,
}

impl Docs {
  pub fn is_empty(&self) -> bool {
    self.description.is_none()
      && self.access.is_none()
      && self.default.is_none()
      && self.selector.is_none()
  }
}

/// A documentation node: the discriminated kind plus any attached docs.
/// Serializes as a single JSON object with a `"type"` discriminant.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DocNode {
  #[serde(flatten)]
  pub kind: NodeKind,
  #[serde(flatten)]
  pub docs: Docs,
}

impl From<NodeKind> for DocNode {
  fn from(kind: NodeKind) -> DocNode {
    DocNode {
      kind,
      docs: Docs::default(),
    }
  }
}

impl DocNode {
  pub fn with_docs(kind: NodeKind, docs: Docs) -> DocNode {
    DocNode { kind, docs }
  }

  /// Fill any unset doc fields from `docs`; fields already present on the
  /// node win.
  pub fn fill_docs(&mut self, docs: Docs) {
    if self.docs.description.is_none() {
      self.docs.description = docs.description;
    }
    if self.docs.access.is_none() {
      self.docs.access = docs.access;
    }
    if self.docs.default.is_none() {
      self.docs.default = docs.default;
    }
    if self.docs.selector.is_none() {
      self.docs.selector = docs.selector;
    }
  }

  /// The stable id of this node, for kinds that carry one. Only `interface`
  /// and `alias` nodes are valid link targets; `function` and `component`
  /// ids identify declarations for cache eviction.
  pub fn id(&self) -> Option<&str> {
    match &self.kind {
      NodeKind::Interface(i) => Some(&i.id),
      NodeKind::Alias(a) => Some(&a.id),
      NodeKind::Component(c) => Some(&c.id),
      NodeKind::Function(f) => f.id.as_deref(),
      _ => None,
    }
  }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum NodeKind {
  Any,
  Null,
  Undefined,
  Void,
  Unknown,
  Never,
  This,
  Symbol,
  Boolean {
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
  },
  String {
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
  },
  Number {
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
  },
  Array {
    element_type: Box<DocNode>,
  },
  Tuple {
    elements: Vec<DocNode>,
  },
  Object {
    properties: Properties,
  },
  Union {
    elements: Vec<DocNode>,
  },
  Intersection {
    types: Vec<DocNode>,
  },
  /// Template literal type; elements alternate string literals and embedded
  /// nodes.
  Template {
    elements: Vec<DocNode>,
  },
  TypeParameter {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    constraint: Option<Box<DocNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<Box<DocNode>>,
  },
  Parameter {
    name: String,
    value: Box<DocNode>,
    optional: bool,
    rest: bool,
  },
  Enum {
    name: String,
    members: Vec<DocNode>,
  },
  EnumMember {
    name: String,
    value: Option<String>,
  },
  Interface(InterfaceNode),
  Property(PropertyNode),
  Method(MethodNode),
  Function(FunctionNode),
  Component(ComponentNode),
  /// Generic instantiation: `Base<Args>`.
  Application {
    base: Box<DocNode>,
    type_parameters: Vec<DocNode>,
  },
  /// An unresolved name.
  Identifier {
    name: String,
  },
  /// Cross-module reference; never survives linking.
  Reference {
    local: String,
    imported: String,
    specifier: String,
  },
  Alias(AliasNode),
  TypeOperator {
    operator: TypeOperator,
    value: Box<DocNode>,
  },
  /// Legacy keyof form, kept alongside `typeOperator { keyof }`; the linker
  /// treats both identically.
  Keyof {
    keyof: Box<DocNode>,
  },
  Conditional {
    check_type: Box<DocNode>,
    extends_type: Box<DocNode>,
    true_type: Box<DocNode>,
    false_type: Box<DocNode>,
  },
  IndexedAccess {
    object_type: Box<DocNode>,
    index_type: Box<DocNode>,
  },
  /// Placeholder for a node stored in the `links` side table. Produced only
  /// by the linker.
  Link {
    id: String,
  },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeOperator {
  Keyof,
  Typeof,
  Readonly,
  Unique,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceNode {
  pub id: String,
  pub name: String,
  pub extends: Vec<DocNode>,
  pub properties: Properties,
  pub type_parameters: Vec<DocNode>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyNode {
  pub name: String,
  pub value: Box<DocNode>,
  pub optional: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub index_type: Option<Box<DocNode>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub inherited_from: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodNode {
  pub name: String,
  /// Always a `function` node.
  pub value: Box<DocNode>,
  pub optional: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub inherited_from: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionNode {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub id: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  pub parameters: Vec<DocNode>,
  #[serde(rename = "return")]
  pub return_type: Box<DocNode>,
  pub type_parameters: Vec<DocNode>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentNode {
  pub id: String,
  pub name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub props: Option<Box<DocNode>>,
  #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
  pub ref_type: Option<Box<DocNode>>,
  pub type_parameters: Vec<DocNode>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasNode {
  pub id: String,
  pub name: String,
  pub value: Box<DocNode>,
  pub type_parameters: Vec<DocNode>,
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;
  use serde_json::to_value;

  #[test]
  fn node_id_round_trips_file() {
    let id = node_id("/src/a.ts", "Foo");
    assert_eq!(id, "/src/a.ts:Foo");
    assert_eq!(node_id_file(&id), "/src/a.ts");
  }

  #[test]
  fn keyword_node_serializes_with_tag_only() {
    let node = DocNode::from(NodeKind::Any);
    assert_eq!(to_value(&node).unwrap(), json!({"type": "any"}));
  }

  #[test]
  fn literal_number_value_is_a_string() {
    let node = DocNode::from(NodeKind::Number {
      value: Some("1".into()),
    });
    assert_eq!(
      to_value(&node).unwrap(),
      json!({"type": "number", "value": "1"})
    );
  }

  #[test]
  fn docs_flatten_into_the_node_object() {
    let node = DocNode::with_docs(
      NodeKind::String { value: None },
      Docs {
        description: Some("the label".into()),
        ..Docs::default()
      },
    );
    assert_eq!(
      to_value(&node).unwrap(),
      json!({"type": "string", "description": "the label"})
    );
  }

  #[test]
  fn interface_preserves_property_order() {
    let mut properties = Properties::default();
    for name in ["z", "a", "m"] {
      properties.insert(
        name.to_string(),
        NodeKind::Property(PropertyNode {
          name: name.to_string(),
          value: Box::new(NodeKind::Number { value: None }.into()),
          optional: false,
          index_type: None,
          inherited_from: None,
        })
        .into(),
      );
    }
    let node = DocNode::from(NodeKind::Interface(InterfaceNode {
      id: node_id("/a.ts", "I"),
      name: "I".into(),
      extends: vec![],
      properties,
      type_parameters: vec![],
    }));
    let value = to_value(&node).unwrap();
    let keys: Vec<&String> = value["properties"].as_object().unwrap().keys().collect();
    assert_eq!(keys, ["z", "a", "m"]);
    assert_eq!(value["type"], "interface");
  }

  #[test]
  fn camel_case_discriminants() {
    let node = DocNode::from(NodeKind::TypeParameter {
      name: "T".into(),
      constraint: None,
      default: None,
    });
    assert_eq!(to_value(&node).unwrap()["type"], "typeParameter");
    let node = DocNode::from(NodeKind::IndexedAccess {
      object_type: Box::new(NodeKind::Any.into()),
      index_type: Box::new(NodeKind::Any.into()),
    });
    let value = to_value(&node).unwrap();
    assert_eq!(value["type"], "indexedAccess");
    assert!(value.get("objectType").is_some());
  }

  #[test]
  fn function_return_field_is_named_return() {
    let node = DocNode::from(NodeKind::Function(FunctionNode {
      id: None,
      name: Some("f".into()),
      parameters: vec![],
      return_type: Box::new(NodeKind::Void.into()),
      type_parameters: vec![],
    }));
    let value = to_value(&node).unwrap();
    assert_eq!(value["return"], json!({"type": "void"}));
  }
}
