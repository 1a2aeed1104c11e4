use super::Transformer;
use crate::gather::ImportKind;
use crate::node::DocNode;
use crate::node::FunctionNode;
use crate::node::NodeKind;
use crate::node::Properties;
use crate::node::PropertyNode;
use crate::node::TypeOperator;
use parse_ts::ast::node::Node;
use parse_ts::ast::type_expr::*;

impl<'a> Transformer<'a> {
  /// Lower a type expression to a documentation node.
  pub(crate) fn type_node(&mut self, t: &Node<TypeExpr>) -> DocNode {
    match t.stx.as_ref() {
      TypeExpr::Keyword(k) => keyword_node(*k.stx),
      TypeExpr::Literal(l) => match l.stx.as_ref() {
        TypeLit::String(v) => NodeKind::String {
          value: Some(v.clone()),
        }
        .into(),
        TypeLit::Number(v) => NodeKind::Number {
          value: Some(v.clone()),
        }
        .into(),
        TypeLit::Boolean(v) => NodeKind::Boolean {
          value: Some(v.to_string()),
        }
        .into(),
      },
      TypeExpr::Reference(r) => self.type_reference(r),
      TypeExpr::Array(a) => NodeKind::Array {
        element_type: Box::new(self.type_node(&a.stx.element_type)),
      }
      .into(),
      TypeExpr::Tuple(t) => NodeKind::Tuple {
        elements: t
          .stx
          .elements
          .iter()
          .map(|e| self.type_node(&e.stx.type_expr))
          .collect(),
      }
      .into(),
      TypeExpr::Union(u) => NodeKind::Union {
        elements: u.stx.types.iter().map(|t| self.type_node(t)).collect(),
      }
      .into(),
      TypeExpr::Intersection(i) => NodeKind::Intersection {
        types: i.stx.types.iter().map(|t| self.type_node(t)).collect(),
      }
      .into(),
      TypeExpr::Function(f) | TypeExpr::Constructor(f) => {
        NodeKind::Function(self.fn_type_node(&f.stx)).into()
      }
      TypeExpr::ObjectLiteral(obj) => NodeKind::Object {
        properties: self.type_members(&obj.stx.members),
      }
      .into(),
      // Parentheses are transparent.
      TypeExpr::Parenthesized(p) => self.type_node(&p.stx.type_expr),
      TypeExpr::Query(q) => NodeKind::TypeOperator {
        operator: TypeOperator::Typeof,
        value: Box::new(self.entity_name_node(&q.stx.expr_name)),
      }
      .into(),
      TypeExpr::Operator(op) => {
        let operator = match op.stx.op {
          TypeOpKind::KeyOf => TypeOperator::Keyof,
          TypeOpKind::Readonly => TypeOperator::Readonly,
          TypeOpKind::Unique => TypeOperator::Unique,
        };
        NodeKind::TypeOperator {
          operator,
          value: Box::new(self.type_node(&op.stx.operand)),
        }
        .into()
      }
      TypeExpr::IndexedAccess(ia) => NodeKind::IndexedAccess {
        object_type: Box::new(self.type_node(&ia.stx.object_type)),
        index_type: Box::new(self.type_node(&ia.stx.index_type)),
      }
      .into(),
      TypeExpr::Conditional(c) => NodeKind::Conditional {
        check_type: Box::new(self.type_node(&c.stx.check_type)),
        extends_type: Box::new(self.type_node(&c.stx.extends_type)),
        true_type: Box::new(self.type_node(&c.stx.true_type)),
        false_type: Box::new(self.type_node(&c.stx.false_type)),
      }
      .into(),
      TypeExpr::Infer(i) => NodeKind::Identifier {
        name: i.stx.type_parameter.clone(),
      }
      .into(),
      TypeExpr::TemplateLiteral(t) => {
        let t = &t.stx;
        let mut elements = Vec::new();
        if !t.head.is_empty() {
          elements.push(
            NodeKind::String {
              value: Some(t.head.clone()),
            }
            .into(),
          );
        }
        for span in &t.spans {
          elements.push(self.type_node(&span.stx.type_expr));
          if !span.stx.literal.is_empty() {
            elements.push(
              NodeKind::String {
                value: Some(span.stx.literal.clone()),
              }
              .into(),
            );
          }
        }
        NodeKind::Template { elements }.into()
      }
      TypeExpr::Import(imp) => {
        let imp = &imp.stx;
        let Some(qualifier) = &imp.qualifier else {
          return self.unknown("TypeImport");
        };
        let imported = qualifier.segments[0].clone();
        self.record_dependency(&imp.module, ImportKind::Named, &imported, &imported);
        let base: DocNode = NodeKind::Reference {
          local: qualifier.joined(),
          imported,
          specifier: imp.module.clone(),
        }
        .into();
        match &imp.type_arguments {
          Some(args) => NodeKind::Application {
            base: Box::new(base),
            type_parameters: args.iter().map(|a| self.type_node(a)).collect(),
          }
          .into(),
          None => base,
        }
      }
      // Type predicates are booleans at the call site.
      TypeExpr::Predicate(_) => NodeKind::Boolean { value: None }.into(),
      TypeExpr::Mapped(_) => self.unknown("TypeMapped"),
    }
  }

  /// `Foo` / `A.B` / `Foo<T>` in type position.
  fn type_reference(&mut self, r: &Node<TypeRef>) -> DocNode {
    let r = &r.stx;
    let base = self.entity_name_node(&r.name);
    match &r.type_arguments {
      Some(args) if !args.is_empty() => NodeKind::Application {
        base: Box::new(base),
        type_parameters: args.iter().map(|a| self.type_node(a)).collect(),
      }
      .into(),
      _ => base,
    }
  }

  /// Resolve a possibly-qualified entity name to a node: imports become
  /// references, local type declarations inline, qualified property access
  /// into a local interface inlines the property's value, anything else is
  /// an identifier.
  pub(crate) fn entity_name_node(&mut self, name: &TypeName) -> DocNode {
    let head = &name.segments[0];
    if name.is_ident() {
      return self.identifier_node(head);
    }

    // `NS.Foo` where `NS` is a namespace import: a cross-module reference to
    // `Foo`.
    if let Some(import) = self.exports.import(head).cloned() {
      if import.kind == ImportKind::Namespace && name.segments.len() == 2 {
        let imported = name.segments[1].clone();
        self.record_dependency(&import.specifier, ImportKind::Namespace, head, "*");
        return NodeKind::Reference {
          local: name.joined(),
          imported,
          specifier: import.specifier,
        }
        .into();
      }
    }

    // `A.B` where `A` is a local interface/object declaration and `B` one of
    // its properties: inline the property's value.
    if name.segments.len() == 2 {
      if let Some(decl) = self.local_decl(head) {
        if !self.in_progress.contains(&decl) {
          if let Some(node) = self.transform_decl_ref(&decl, head) {
            if let Some(value) = property_value(&node, &name.segments[1]) {
              return value;
            }
          }
        }
      }
    }

    NodeKind::Identifier {
      name: name.joined(),
    }
    .into()
  }

  /// A single unqualified name in type position.
  pub(crate) fn identifier_node(&mut self, name: &str) -> DocNode {
    if let Some(import) = self.exports.import(name).cloned() {
      let (kind, imported) = match import.kind {
        ImportKind::Namespace => (ImportKind::Namespace, "*".to_string()),
        ImportKind::Default => (ImportKind::Default, "default".to_string()),
        ImportKind::Named => (ImportKind::Named, import.imported.clone()),
      };
      self.record_dependency(&import.specifier, kind, name, &imported);
      return NodeKind::Reference {
        local: name.to_string(),
        imported,
        specifier: import.specifier,
      }
      .into();
    }
    if let Some(decl) = self.local_decl(name) {
      if self.in_progress.contains(&decl) {
        // Self-referential type; the linker rewrites this into a link.
        return NodeKind::Identifier {
          name: name.to_string(),
        }
        .into();
      }
      if let Some(node) = self.transform_decl_ref(&decl, name) {
        return node;
      }
    }
    NodeKind::Identifier {
      name: name.to_string(),
    }
    .into()
  }

  /// Members of an interface body or object type literal.
  pub(crate) fn type_members(&mut self, members: &[Node<TypeMember>]) -> Properties {
    let mut properties = Properties::default();
    for member in members {
      match member.stx.as_ref() {
        TypeMember::Property(p) => {
          let p = &p.stx;
          let Some(name) = p.key.name() else {
            continue;
          };
          let doc = Self::parse_doc(&p.doc);
          let value = match &p.type_annotation {
            Some(t) => self.type_node(t),
            None => NodeKind::Any.into(),
          };
          properties.insert(
            name.to_string(),
            DocNode::with_docs(
              NodeKind::Property(PropertyNode {
                name: name.to_string(),
                value: Box::new(value),
                optional: p.optional,
                index_type: None,
                inherited_from: None,
              }),
              doc.docs(),
            ),
          );
        }
        TypeMember::Method(m) => {
          let m = &m.stx;
          let Some(name) = m.key.name() else {
            continue;
          };
          let doc = Self::parse_doc(&m.doc);
          let mut value: DocNode = NodeKind::Function(FunctionNode {
            id: None,
            name: Some(name.to_string()),
            parameters: self.type_fn_params(&m.parameters),
            return_type: Box::new(match &m.return_type {
              Some(r) => self.type_node(r),
              None => NodeKind::Any.into(),
            }),
            type_parameters: self.type_params(&m.type_parameters),
          })
          .into();
          Self::distribute_fn_docs(&mut value, &doc);
          properties.insert(
            name.to_string(),
            DocNode::with_docs(
              NodeKind::Method(crate::node::MethodNode {
                name: name.to_string(),
                value: Box::new(value),
                optional: m.optional,
                inherited_from: None,
              }),
              doc.docs(),
            ),
          );
        }
        TypeMember::Getter(g) => {
          let g = &g.stx;
          let Some(name) = g.key.name() else {
            continue;
          };
          let doc = Self::parse_doc(&g.doc);
          let value = match &g.return_type {
            Some(r) => self.type_node(r),
            None => NodeKind::Any.into(),
          };
          properties.insert(
            name.to_string(),
            DocNode::with_docs(
              NodeKind::Property(PropertyNode {
                name: name.to_string(),
                value: Box::new(value),
                optional: false,
                index_type: None,
                inherited_from: None,
              }),
              doc.docs(),
            ),
          );
        }
        TypeMember::Setter(s) => {
          let s = &s.stx;
          let Some(name) = s.key.name() else {
            continue;
          };
          let doc = Self::parse_doc(&s.doc);
          let value = self.type_node(&s.parameter.stx.type_expr);
          properties.insert(
            name.to_string(),
            DocNode::with_docs(
              NodeKind::Property(PropertyNode {
                name: name.to_string(),
                value: Box::new(value),
                optional: false,
                index_type: None,
                inherited_from: None,
              }),
              doc.docs(),
            ),
          );
        }
        TypeMember::Index(idx) => {
          let idx = &idx.stx;
          let doc = Self::parse_doc(&idx.doc);
          properties.insert(
            idx.parameter_name.clone(),
            DocNode::with_docs(
              NodeKind::Property(PropertyNode {
                name: idx.parameter_name.clone(),
                value: Box::new(self.type_node(&idx.type_annotation)),
                optional: false,
                index_type: Some(Box::new(self.type_node(&idx.parameter_type))),
                inherited_from: None,
              }),
              doc.docs(),
            ),
          );
        }
        // Call/construct signatures have no display name in the property
        // map.
        TypeMember::Call(_) | TypeMember::Construct(_) => {}
      }
    }
    properties
  }

  /// `(x: T) => R` and `new (x: T) => R` function types.
  pub(crate) fn fn_type_node(&mut self, f: &TypeFn) -> FunctionNode {
    FunctionNode {
      id: None,
      name: None,
      parameters: self.type_fn_params(&f.parameters),
      return_type: Box::new(self.type_node(&f.return_type)),
      type_parameters: self.type_params(&f.type_parameters),
    }
  }

  pub(crate) fn type_fn_params(&mut self, params: &[Node<TypeFnParam>]) -> Vec<DocNode> {
    params
      .iter()
      .enumerate()
      .map(|(i, p)| {
        let p = &p.stx;
        let name = p.name.clone().unwrap_or_else(|| format!("arg{i}"));
        NodeKind::Parameter {
          name,
          value: Box::new(self.type_node(&p.type_expr)),
          optional: p.optional,
          rest: p.rest,
        }
        .into()
      })
      .collect()
  }

  pub(crate) fn type_params(
    &mut self,
    params: &Option<Vec<Node<TypeParameter>>>,
  ) -> Vec<DocNode> {
    params
      .iter()
      .flatten()
      .map(|p| {
        let p = &p.stx;
        NodeKind::TypeParameter {
          name: p.name.clone(),
          constraint: p.constraint.as_ref().map(|c| Box::new(self.type_node(c))),
          default: p.default.as_ref().map(|d| Box::new(self.type_node(d))),
        }
        .into()
      })
      .collect()
  }
}

fn keyword_node(k: TypeKeyword) -> DocNode {
  match k {
    TypeKeyword::Any => NodeKind::Any.into(),
    TypeKeyword::BigInt => NodeKind::Number { value: None }.into(),
    TypeKeyword::Boolean => NodeKind::Boolean { value: None }.into(),
    TypeKeyword::Never => NodeKind::Never.into(),
    TypeKeyword::Null => NodeKind::Null.into(),
    TypeKeyword::Number => NodeKind::Number { value: None }.into(),
    TypeKeyword::Object => NodeKind::Object {
      properties: Properties::default(),
    }
    .into(),
    TypeKeyword::String => NodeKind::String { value: None }.into(),
    TypeKeyword::Symbol => NodeKind::Symbol.into(),
    TypeKeyword::This => NodeKind::This.into(),
    TypeKeyword::Undefined => NodeKind::Undefined.into(),
    TypeKeyword::Unknown => NodeKind::Unknown.into(),
    TypeKeyword::Void => NodeKind::Void.into(),
  }
}

/// Look a named property's value up on an interface/object node.
fn property_value(node: &DocNode, name: &str) -> Option<DocNode> {
  let properties = match &node.kind {
    NodeKind::Interface(i) => &i.properties,
    NodeKind::Object { properties } => properties,
    _ => return None,
  };
  let prop = properties.get(name)?;
  match &prop.kind {
    NodeKind::Property(p) => Some((*p.value).clone()),
    NodeKind::Method(m) => Some((*m.value).clone()),
    _ => None,
  }
}
