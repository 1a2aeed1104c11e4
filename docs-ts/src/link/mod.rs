use crate::load::Asset;
use crate::node::DocNode;
use crate::node::InterfaceNode;
use crate::node::NodeKind;
use crate::node::Properties;
use crate::node::TypeOperator;
use ahash::HashMap;
use ahash::HashMapExt;
use ahash::HashSet;
use std::collections::BTreeMap;

/// Result of linking one file's transformed exports.
#[derive(Clone, Debug, Default)]
pub struct LinkOutput {
  pub exports: BTreeMap<String, DocNode>,
  pub links: BTreeMap<String, DocNode>,
}

/// Resolve references, apply type parameters, flatten inheritance, evaluate
/// `Omit`/`keyof`, and collect the deduplicated `links` table.
pub fn link(
  exports: BTreeMap<String, DocNode>,
  deps: &HashMap<String, Asset>,
) -> LinkOutput {
  let mut linker = Linker {
    deps,
    table: HashMap::new(),
    names: HashMap::new(),
  };
  for node in exports.values() {
    linker.index_names(node);
  }
  let mut out_exports = BTreeMap::new();
  for (name, node) in exports {
    let mut walk = Walk::default();
    let node = linker.visit(node, &mut walk);
    out_exports.insert(name, node);
  }
  let links = linker.collect_links(&out_exports);
  LinkOutput {
    exports: out_exports,
    links,
  }
}

/// Per-walk state: the type-parameter binding stack, the key path from the
/// root, and the pending generic application.
#[derive(Default)]
struct Walk {
  params: Vec<HashMap<String, DocNode>>,
  keys: Vec<String>,
  pending: Option<Vec<DocNode>>,
  in_progress: HashSet<String>,
}

impl Walk {
  fn key(&self) -> Option<&str> {
    self.keys.last().map(String::as_str)
  }

  /// Whether an interface/alias reached at the current position is merged
  /// inline rather than replaced with a link: export roots, component
  /// `props`, `extends` positions, `keyof` operands, and generic bases
  /// applied in `props`/`extends`.
  fn should_merge(&self) -> bool {
    match self.key() {
      None => true,
      Some("props") | Some("extends") | Some("keyof") => true,
      Some("base") => matches!(
        self.keys.len().checked_sub(2).map(|i| self.keys[i].as_str()),
        Some("props") | Some("extends")
      ),
      _ => false,
    }
  }
}

struct Linker<'a> {
  deps: &'a HashMap<String, Asset>,
  /// Merged interfaces and aliases by id; the source for links.
  table: HashMap<String, DocNode>,
  /// Name to id for the primary file's own interfaces/aliases, so cycle-cut
  /// identifiers can be rewritten into links.
  names: HashMap<String, String>,
}

impl<'a> Linker<'a> {
  /// Remember a declaration under both its display name and the symbol its
  /// id was minted from (they differ for renamed re-exports).
  fn index_name(&mut self, name: &str, id: &str) {
    self
      .names
      .entry(name.to_string())
      .or_insert_with(|| id.to_string());
    if let Some((_, symbol)) = id.rsplit_once(':') {
      if symbol != name {
        self
          .names
          .entry(symbol.to_string())
          .or_insert_with(|| id.to_string());
      }
    }
  }

  fn index_names(&mut self, node: &DocNode) {
    match &node.kind {
      NodeKind::Interface(i) => {
        self.index_name(&i.name, &i.id);
        for ext in &i.extends {
          self.index_names(ext);
        }
        for prop in i.properties.values() {
          self.index_names(prop);
        }
      }
      NodeKind::Alias(a) => {
        self.index_name(&a.name, &a.id);
        self.index_names(&a.value);
      }
      NodeKind::Property(p) => self.index_names(&p.value),
      NodeKind::Method(m) => self.index_names(&m.value),
      NodeKind::Component(c) => {
        if let Some(props) = &c.props {
          self.index_names(props);
        }
        if let Some(r) = &c.ref_type {
          self.index_names(r);
        }
      }
      NodeKind::Function(f) => {
        for p in &f.parameters {
          self.index_names(p);
        }
        self.index_names(&f.return_type);
      }
      NodeKind::Array { element_type } => self.index_names(element_type),
      NodeKind::Tuple { elements }
      | NodeKind::Union { elements }
      | NodeKind::Template { elements } => {
        for e in elements {
          self.index_names(e);
        }
      }
      NodeKind::Intersection { types } => {
        for t in types {
          self.index_names(t);
        }
      }
      NodeKind::Object { properties } => {
        for p in properties.values() {
          self.index_names(p);
        }
      }
      NodeKind::Application {
        base,
        type_parameters,
      } => {
        self.index_names(base);
        for t in type_parameters {
          self.index_names(t);
        }
      }
      NodeKind::Parameter { value, .. } => self.index_names(value),
      NodeKind::TypeOperator { value, .. } => self.index_names(value),
      NodeKind::Keyof { keyof } => self.index_names(keyof),
      NodeKind::IndexedAccess {
        object_type,
        index_type,
      } => {
        self.index_names(object_type);
        self.index_names(index_type);
      }
      NodeKind::Conditional {
        check_type,
        extends_type,
        true_type,
        false_type,
      } => {
        self.index_names(check_type);
        self.index_names(extends_type);
        self.index_names(true_type);
        self.index_names(false_type);
      }
      _ => {}
    }
  }

  // Pass A: code resolution.
  fn visit(&mut self, node: DocNode, w: &mut Walk) -> DocNode {
    let DocNode { kind, docs } = node;
    match kind {
      // Cross-module references resolve through the dependency assets; an
      // unresolved reference degrades to an identifier.
      NodeKind::Reference {
        local,
        imported,
        specifier,
      } => {
        let target = self
          .deps
          .get(&specifier)
          .and_then(|asset| asset.exports.get(&imported))
          .cloned();
        match target {
          Some(mut target) => {
            target.fill_docs(docs);
            self.visit(target, w)
          }
          None => DocNode::with_docs(NodeKind::Identifier { name: local }, docs),
        }
      }

      NodeKind::Application {
        base,
        type_parameters,
      } => {
        let saved = w.pending.take();
        w.keys.push("typeParameters".into());
        let params: Vec<DocNode> = type_parameters
          .into_iter()
          .map(|p| self.visit(p, w))
          .collect();
        w.keys.pop();
        w.pending = Some(params.clone());
        w.keys.push("base".into());
        let base = self.visit(*base, w);
        w.keys.pop();
        let consumed = w.pending.is_none();
        w.pending = saved;
        if consumed || w.key() == Some("props") {
          // The base bound the application (generic instantiation or Omit
          // evaluation), or a surviving application sits in props position:
          // either way the wrapper disappears and the base stands alone.
          let mut base = base;
          base.fill_docs(docs);
          base
        } else {
          DocNode::with_docs(
            NodeKind::Application {
              base: Box::new(base),
              type_parameters: params,
            },
            docs,
          )
        }
      }

      NodeKind::Identifier { name } => {
        if name == "Omit" && w.pending.is_some() {
          let args = w.pending.take().unwrap();
          let mut node = self.eval_omit(args);
          node.fill_docs(docs);
          return node;
        }
        if let Some(bound) = w.params.last().and_then(|frame| frame.get(&name)) {
          let mut node = bound.clone();
          node.fill_docs(docs);
          return node;
        }
        // A cycle-cut self reference; point it at the stored declaration.
        if let Some(id) = self.names.get(&name) {
          return DocNode::with_docs(NodeKind::Link { id: id.clone() }, docs);
        }
        DocNode::with_docs(NodeKind::Identifier { name }, docs)
      }

      NodeKind::Interface(iface) => self.visit_interface(iface, docs, w),

      NodeKind::Alias(mut alias) => {
        if w.in_progress.contains(&alias.id) {
          return DocNode::with_docs(NodeKind::Link { id: alias.id }, docs);
        }
        w.in_progress.insert(alias.id.clone());
        let frame_pushed = self.push_frame(&alias.type_parameters, w);
        w.keys.push("value".into());
        alias.value = Box::new(self.visit(*alias.value, w));
        w.keys.pop();
        w.keys.push("typeParameters".into());
        alias.type_parameters = alias
          .type_parameters
          .into_iter()
          .map(|p| self.visit(p, w))
          .collect();
        w.keys.pop();
        if frame_pushed {
          w.params.pop();
        }
        w.in_progress.remove(&alias.id);

        let id = alias.id.clone();
        let inline_value = (*alias.value).clone();
        self.index_name(&alias.name.clone(), &id);
        self
          .table
          .insert(id.clone(), DocNode::with_docs(NodeKind::Alias(alias), docs.clone()));
        if w.key() == Some("props") {
          // An alias used directly as props inlines its value.
          let mut value = inline_value;
          value.fill_docs(docs);
          value
        } else {
          DocNode::with_docs(NodeKind::Link { id }, docs)
        }
      }

      NodeKind::Component(mut component) => {
        let frame_pushed = self.push_frame(&component.type_parameters, w);
        if let Some(props) = component.props.take() {
          w.keys.push("props".into());
          component.props = Some(Box::new(self.visit(*props, w)));
          w.keys.pop();
        }
        if let Some(ref_type) = component.ref_type.take() {
          w.keys.push("ref".into());
          component.ref_type = Some(Box::new(self.visit(*ref_type, w)));
          w.keys.pop();
        }
        w.keys.push("typeParameters".into());
        component.type_parameters = component
          .type_parameters
          .into_iter()
          .map(|p| self.visit(p, w))
          .collect();
        w.keys.pop();
        if frame_pushed {
          w.params.pop();
        }
        DocNode::with_docs(NodeKind::Component(component), docs)
      }

      // keyof over an interface expands to the union of its keys.
      NodeKind::Keyof { keyof } => self.visit_keyof(*keyof, docs, w),
      NodeKind::TypeOperator {
        operator: TypeOperator::Keyof,
        value,
      } => self.visit_keyof(*value, docs, w),

      NodeKind::TypeOperator { operator, value } => {
        w.keys.push("value".into());
        let value = self.visit(*value, w);
        w.keys.pop();
        DocNode::with_docs(
          NodeKind::TypeOperator {
            operator,
            value: Box::new(value),
          },
          docs,
        )
      }

      NodeKind::Property(mut prop) => {
        w.keys.push("value".into());
        prop.value = Box::new(self.visit(*prop.value, w));
        if let Some(index) = prop.index_type.take() {
          prop.index_type = Some(Box::new(self.visit(*index, w)));
        }
        w.keys.pop();
        DocNode::with_docs(NodeKind::Property(prop), docs)
      }

      NodeKind::Method(mut method) => {
        w.keys.push("value".into());
        method.value = Box::new(self.visit(*method.value, w));
        w.keys.pop();
        DocNode::with_docs(NodeKind::Method(method), docs)
      }

      NodeKind::Function(mut func) => {
        w.keys.push("parameters".into());
        func.parameters = func
          .parameters
          .into_iter()
          .map(|p| self.visit(p, w))
          .collect();
        w.keys.pop();
        w.keys.push("return".into());
        func.return_type = Box::new(self.visit(*func.return_type, w));
        w.keys.pop();
        w.keys.push("typeParameters".into());
        func.type_parameters = func
          .type_parameters
          .into_iter()
          .map(|p| self.visit(p, w))
          .collect();
        w.keys.pop();
        DocNode::with_docs(NodeKind::Function(func), docs)
      }

      NodeKind::Parameter {
        name,
        value,
        optional,
        rest,
      } => {
        w.keys.push("value".into());
        let value = self.visit(*value, w);
        w.keys.pop();
        DocNode::with_docs(
          NodeKind::Parameter {
            name,
            value: Box::new(value),
            optional,
            rest,
          },
          docs,
        )
      }

      NodeKind::Object { properties } => {
        w.keys.push("properties".into());
        let properties = self.visit_properties(properties, w);
        w.keys.pop();
        DocNode::with_docs(NodeKind::Object { properties }, docs)
      }

      NodeKind::Array { element_type } => {
        w.keys.push("elementType".into());
        let element_type = self.visit(*element_type, w);
        w.keys.pop();
        DocNode::with_docs(
          NodeKind::Array {
            element_type: Box::new(element_type),
          },
          docs,
        )
      }

      NodeKind::Tuple { elements } => {
        w.keys.push("elements".into());
        let elements = elements.into_iter().map(|e| self.visit(e, w)).collect();
        w.keys.pop();
        DocNode::with_docs(NodeKind::Tuple { elements }, docs)
      }

      NodeKind::Union { elements } => {
        w.keys.push("elements".into());
        let elements = elements.into_iter().map(|e| self.visit(e, w)).collect();
        w.keys.pop();
        DocNode::with_docs(NodeKind::Union { elements }, docs)
      }

      NodeKind::Intersection { types } => {
        w.keys.push("types".into());
        let types = types.into_iter().map(|t| self.visit(t, w)).collect();
        w.keys.pop();
        DocNode::with_docs(NodeKind::Intersection { types }, docs)
      }

      NodeKind::Template { elements } => {
        w.keys.push("elements".into());
        let elements = elements.into_iter().map(|e| self.visit(e, w)).collect();
        w.keys.pop();
        DocNode::with_docs(NodeKind::Template { elements }, docs)
      }

      NodeKind::TypeParameter {
        name,
        constraint,
        default,
      } => {
        let constraint = constraint.map(|c| Box::new(self.visit(*c, w)));
        let default = default.map(|d| Box::new(self.visit(*d, w)));
        DocNode::with_docs(
          NodeKind::TypeParameter {
            name,
            constraint,
            default,
          },
          docs,
        )
      }

      NodeKind::IndexedAccess {
        object_type,
        index_type,
      } => {
        w.keys.push("objectType".into());
        let object_type = self.visit(*object_type, w);
        w.keys.pop();
        w.keys.push("indexType".into());
        let index_type = self.visit(*index_type, w);
        w.keys.pop();
        DocNode::with_docs(
          NodeKind::IndexedAccess {
            object_type: Box::new(object_type),
            index_type: Box::new(index_type),
          },
          docs,
        )
      }

      NodeKind::Conditional {
        check_type,
        extends_type,
        true_type,
        false_type,
      } => {
        // Structural pass-through only; conditional types are not evaluated.
        let check_type = Box::new(self.visit(*check_type, w));
        let extends_type = Box::new(self.visit(*extends_type, w));
        let true_type = Box::new(self.visit(*true_type, w));
        let false_type = Box::new(self.visit(*false_type, w));
        DocNode::with_docs(
          NodeKind::Conditional {
            check_type,
            extends_type,
            true_type,
            false_type,
          },
          docs,
        )
      }

      NodeKind::Enum { name, members } => {
        DocNode::with_docs(NodeKind::Enum { name, members }, docs)
      }

      // Leaves, and links already minted by a dependency's linker.
      other => DocNode::with_docs(other, docs),
    }
  }

  fn visit_interface(
    &mut self,
    mut iface: InterfaceNode,
    docs: crate::node::Docs,
    w: &mut Walk,
  ) -> DocNode {
    if w.in_progress.contains(&iface.id) {
      return DocNode::with_docs(NodeKind::Link { id: iface.id }, docs);
    }
    w.in_progress.insert(iface.id.clone());
    let should = w.should_merge();
    let frame_pushed = self.push_frame(&iface.type_parameters, w);

    w.keys.push("extends".into());
    iface.extends = iface
      .extends
      .into_iter()
      .map(|e| self.visit(e, w))
      .collect();
    w.keys.pop();

    w.keys.push("properties".into());
    iface.properties = self.visit_properties(iface.properties, w);
    w.keys.pop();

    w.keys.push("typeParameters".into());
    iface.type_parameters = iface
      .type_parameters
      .into_iter()
      .map(|p| self.visit(p, w))
      .collect();
    w.keys.pop();

    if frame_pushed {
      w.params.pop();
    }
    w.in_progress.remove(&iface.id);

    self.merge_extensions(&mut iface);

    let id = iface.id.clone();
    let name = iface.name.clone();
    self.index_name(&name, &id);
    let merged = DocNode::with_docs(NodeKind::Interface(iface), docs.clone());
    self.table.insert(id.clone(), merged.clone());
    if should {
      merged
    } else {
      DocNode::with_docs(NodeKind::Link { id }, docs)
    }
  }

  fn visit_properties(&mut self, properties: Properties, w: &mut Walk) -> Properties {
    let mut out = Properties::default();
    for (name, prop) in properties {
      w.keys.push(name.clone());
      let prop = self.visit(prop, w);
      w.keys.pop();
      out.insert(name, prop);
    }
    out
  }

  fn visit_keyof(&mut self, operand: DocNode, docs: crate::node::Docs, w: &mut Walk) -> DocNode {
    w.keys.push("keyof".into());
    let operand = self.visit(operand, w);
    w.keys.pop();
    let resolved = self.resolve_value(&operand);
    let properties = match &resolved.kind {
      NodeKind::Interface(i) => Some(&i.properties),
      NodeKind::Object { properties } => Some(properties),
      _ => None,
    };
    match properties {
      Some(properties) => DocNode::with_docs(
        NodeKind::Union {
          elements: properties
            .keys()
            .map(|key| {
              NodeKind::String {
                value: Some(key.clone()),
              }
              .into()
            })
            .collect(),
        },
        docs,
      ),
      None => DocNode::with_docs(
        NodeKind::TypeOperator {
          operator: TypeOperator::Keyof,
          value: Box::new(operand),
        },
        docs,
      ),
    }
  }

  /// Push a type-parameter frame for an interface/alias/component being
  /// entered. A pending application binds parameters positionally (falling
  /// back to declared defaults); at the root of an export, parameters bind
  /// to their constraints for readable output.
  fn push_frame(&mut self, type_parameters: &[DocNode], w: &mut Walk) -> bool {
    if type_parameters.is_empty() {
      return false;
    }
    if w.should_merge() {
      if let Some(pending) = w.pending.take() {
        let mut frame = HashMap::new();
        for (i, tp) in type_parameters.iter().enumerate() {
          let NodeKind::TypeParameter { name, default, .. } = &tp.kind else {
            continue;
          };
          let bound = pending
            .get(i)
            .cloned()
            .or_else(|| default.as_ref().map(|d| (**d).clone()));
          if let Some(bound) = bound {
            frame.insert(name.clone(), bound);
          }
        }
        w.params.push(frame);
        return true;
      }
    }
    if w.keys.is_empty() {
      let mut frame = HashMap::new();
      for tp in type_parameters {
        let NodeKind::TypeParameter {
          name,
          constraint: Some(constraint),
          ..
        } = &tp.kind
        else {
          continue;
        };
        frame.insert(name.clone(), (**constraint).clone());
      }
      if !frame.is_empty() {
        w.params.push(frame);
        return true;
      }
    }
    false
  }

  /// Flatten inheritance: copy resolved parent properties under the
  /// derived interface, stamping `inheritedFrom`, base-first so property
  /// order follows the hierarchy while the most-derived declaration wins.
  fn merge_extensions(&mut self, iface: &mut InterfaceNode) {
    if iface.extends.is_empty() {
      return;
    }
    let own = std::mem::take(&mut iface.properties);
    let mut merged = Properties::default();
    let mut remaining = Vec::new();
    for ext in iface.extends.drain(..) {
      let resolved = self.resolve_value(&ext);
      match resolved.kind {
        NodeKind::Interface(parent) => {
          for (name, mut prop) in parent.properties {
            if merged.contains_key(&name) || own.contains_key(&name) {
              continue;
            }
            match &mut prop.kind {
              NodeKind::Property(p) => {
                p.inherited_from.get_or_insert_with(|| parent.id.clone());
              }
              NodeKind::Method(m) => {
                m.inherited_from.get_or_insert_with(|| parent.id.clone());
              }
              _ => {}
            }
            merged.insert(name, prop);
          }
        }
        _ => remaining.push(ext),
      }
    }
    for (name, prop) in own {
      merged.insert(name, prop);
    }
    iface.properties = merged;
    iface.extends = remaining;
  }

  /// `Omit<T, K>`: remove every string-literal key in `K` from `T`'s
  /// properties. A `T` that is not an interface/object passes through
  /// unchanged.
  fn eval_omit(&mut self, args: Vec<DocNode>) -> DocNode {
    let mut args = args.into_iter();
    let Some(base) = args.next() else {
      return NodeKind::Any.into();
    };
    let Some(keys_arg) = args.next() else {
      return base;
    };
    let resolved = self.resolve_value(&base);
    let mut keys = Vec::new();
    self.resolve_union_elements(&keys_arg, &mut keys);
    let omitted: HashSet<String> = keys
      .into_iter()
      .filter_map(|k| match k.kind {
        NodeKind::String { value: Some(v) } => Some(v),
        _ => None,
      })
      .collect();
    let DocNode { kind, docs } = resolved;
    match kind {
      NodeKind::Interface(mut iface) => {
        iface.properties.retain(|name, _| !omitted.contains(name));
        DocNode::with_docs(NodeKind::Interface(iface), docs)
      }
      NodeKind::Object { mut properties } => {
        properties.retain(|name, _| !omitted.contains(name));
        DocNode::with_docs(NodeKind::Object { properties }, docs)
      }
      _ => base,
    }
  }

  fn lookup_link(&self, id: &str) -> Option<DocNode> {
    if let Some(node) = self.table.get(id) {
      return Some(node.clone());
    }
    self
      .deps
      .values()
      .find_map(|asset| asset.links.get(id).cloned())
  }

  /// Collapse `link`/`application`/`alias` chains until a concrete node is
  /// reached or nothing further collapses.
  fn resolve_value(&self, node: &DocNode) -> DocNode {
    let mut current = node.clone();
    for _ in 0..64 {
      match current.kind {
        NodeKind::Link { ref id } => match self.lookup_link(id) {
          Some(next) => current = next,
          None => break,
        },
        NodeKind::Application { base, .. } => current = *base,
        NodeKind::Alias(alias) => current = *alias.value,
        _ => break,
      }
    }
    current
  }

  /// Flatten nested unions reached through aliases and links into a flat
  /// element sequence; non-union elements pass through unchanged.
  fn resolve_union_elements(&self, node: &DocNode, out: &mut Vec<DocNode>) {
    let resolved = self.resolve_value(node);
    match resolved.kind {
      NodeKind::Union { elements } => {
        for element in &elements {
          self.resolve_union_elements(element, out);
        }
      }
      _ => out.push(resolved),
    }
  }

  // Pass B: link collection.
  fn collect_links(&self, exports: &BTreeMap<String, DocNode>) -> BTreeMap<String, DocNode> {
    let mut links = BTreeMap::new();
    let mut queue: Vec<DocNode> = exports.values().cloned().collect();
    while let Some(node) = queue.pop() {
      let mut ids = Vec::new();
      collect_link_ids(&node, &mut ids);
      for id in ids {
        if links.contains_key(&id) {
          continue;
        }
        if let Some(target) = self.lookup_link(&id) {
          links.insert(id, target.clone());
          queue.push(target);
        }
        // A genuinely missing target stays a bare link; the renderer shows
        // it as unknown.
      }
    }
    links
  }
}

/// The subset of `all` transitively reachable from `node`, for per-symbol
/// caching.
pub fn links_for(
  node: &DocNode,
  all: &BTreeMap<String, DocNode>,
) -> BTreeMap<String, DocNode> {
  let mut out = BTreeMap::new();
  let mut queue = vec![node.clone()];
  while let Some(node) = queue.pop() {
    let mut ids = Vec::new();
    collect_link_ids(&node, &mut ids);
    for id in ids {
      if out.contains_key(&id) {
        continue;
      }
      if let Some(target) = all.get(&id) {
        out.insert(id, target.clone());
        queue.push(target.clone());
      }
    }
  }
  out
}

/// Ids a node pulls into the links table: `link` targets and
/// `inheritedFrom` sources, recursively.
fn collect_link_ids(node: &DocNode, out: &mut Vec<String>) {
  match &node.kind {
    NodeKind::Link { id } => out.push(id.clone()),
    NodeKind::Interface(i) => {
      for ext in &i.extends {
        collect_link_ids(ext, out);
      }
      for prop in i.properties.values() {
        collect_link_ids(prop, out);
      }
      for tp in &i.type_parameters {
        collect_link_ids(tp, out);
      }
    }
    NodeKind::Alias(a) => {
      collect_link_ids(&a.value, out);
      for tp in &a.type_parameters {
        collect_link_ids(tp, out);
      }
    }
    NodeKind::Property(p) => {
      if let Some(from) = &p.inherited_from {
        out.push(from.clone());
      }
      collect_link_ids(&p.value, out);
      if let Some(index) = &p.index_type {
        collect_link_ids(index, out);
      }
    }
    NodeKind::Method(m) => {
      if let Some(from) = &m.inherited_from {
        out.push(from.clone());
      }
      collect_link_ids(&m.value, out);
    }
    NodeKind::Function(f) => {
      for p in &f.parameters {
        collect_link_ids(p, out);
      }
      collect_link_ids(&f.return_type, out);
      for tp in &f.type_parameters {
        collect_link_ids(tp, out);
      }
    }
    NodeKind::Component(c) => {
      if let Some(props) = &c.props {
        collect_link_ids(props, out);
      }
      if let Some(r) = &c.ref_type {
        collect_link_ids(r, out);
      }
      for tp in &c.type_parameters {
        collect_link_ids(tp, out);
      }
    }
    NodeKind::Object { properties } => {
      for prop in properties.values() {
        collect_link_ids(prop, out);
      }
    }
    NodeKind::Array { element_type } => collect_link_ids(element_type, out),
    NodeKind::Tuple { elements }
    | NodeKind::Union { elements }
    | NodeKind::Template { elements } => {
      for e in elements {
        collect_link_ids(e, out);
      }
    }
    NodeKind::Intersection { types } => {
      for t in types {
        collect_link_ids(t, out);
      }
    }
    NodeKind::Application {
      base,
      type_parameters,
    } => {
      collect_link_ids(base, out);
      for t in type_parameters {
        collect_link_ids(t, out);
      }
    }
    NodeKind::Parameter { value, .. } => collect_link_ids(value, out),
    NodeKind::TypeParameter {
      constraint,
      default,
      ..
    } => {
      if let Some(c) = constraint {
        collect_link_ids(c, out);
      }
      if let Some(d) = default {
        collect_link_ids(d, out);
      }
    }
    NodeKind::TypeOperator { value, .. } => collect_link_ids(value, out),
    NodeKind::Keyof { keyof } => collect_link_ids(keyof, out),
    NodeKind::IndexedAccess {
      object_type,
      index_type,
    } => {
      collect_link_ids(object_type, out);
      collect_link_ids(index_type, out);
    }
    NodeKind::Conditional {
      check_type,
      extends_type,
      true_type,
      false_type,
    } => {
      collect_link_ids(check_type, out);
      collect_link_ids(extends_type, out);
      collect_link_ids(true_type, out);
      collect_link_ids(false_type, out);
    }
    NodeKind::Enum { members, .. } => {
      for m in members {
        collect_link_ids(m, out);
      }
    }
    _ => {}
  }
}
