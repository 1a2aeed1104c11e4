use super::Transformer;
use crate::gather::DeclRef;
use crate::jsdoc::DocComment;
use crate::node::node_id;
use crate::node::AliasNode;
use crate::node::DocNode;
use crate::node::FunctionNode;
use crate::node::InterfaceNode;
use crate::node::MethodNode;
use crate::node::NodeKind;
use crate::node::Properties;
use crate::node::PropertyNode;
use parse_ts::ast::class::Accessibility;
use parse_ts::ast::class::ClassBody;
use parse_ts::ast::class::ClassVal;
use parse_ts::ast::node::Node;
use parse_ts::ast::stmt::EnumDecl;
use parse_ts::ast::stmt::FuncDecl;
use parse_ts::ast::stmt::InterfaceDecl;
use parse_ts::ast::stmt::NamespaceDecl;
use parse_ts::ast::stmt::Stmt;
use parse_ts::ast::stmt::TypeAliasDecl;
use parse_ts::ast::stmt::VarDeclarator;

impl<'a> Transformer<'a> {
  /// Transform the declaration `decl` points at, giving the produced node
  /// the public name `name`. Returns `None` for declarations with nothing
  /// to document (e.g. an uninitialized, unannotated variable).
  pub fn transform_decl_ref(&mut self, decl: &DeclRef, name: &str) -> Option<DocNode> {
    let stmt = decl.stmt(self.top)?;
    if !self.in_progress.insert(decl.clone()) {
      return Some(
        NodeKind::Identifier {
          name: name.to_string(),
        }
        .into(),
      );
    }
    let node = self.transform_stmt(stmt, decl, name);
    self.in_progress.remove(decl);
    node
  }

  fn transform_stmt(
    &mut self,
    stmt: &Node<Stmt>,
    decl: &DeclRef,
    name: &str,
  ) -> Option<DocNode> {
    match stmt.stx.as_ref() {
      Stmt::InterfaceDecl(i) => Some(self.interface_decl(&i.stx, name)),
      Stmt::TypeAliasDecl(a) => Some(self.alias_decl(&a.stx, name)),
      Stmt::EnumDecl(e) => Some(self.enum_decl(&e.stx, name)),
      Stmt::FunctionDecl(f) => Some(self.func_decl(&f.stx, name)),
      Stmt::ClassDecl(c) => {
        let doc = Self::parse_doc(&c.stx.doc);
        Some(self.class_decl(&c.stx.body.stx, name, &doc))
      }
      Stmt::VarDecl(v) => {
        let declarator = v.stx.declarators.get(decl.declarator?)?;
        let doc = Self::parse_doc(&v.stx.doc);
        self.var_declarator(declarator, name, &doc)
      }
      Stmt::NamespaceDecl(ns) => Some(self.namespace_decl(&ns.stx, decl)),
      other => {
        let _ = other;
        Some(self.unknown("statement"))
      }
    }
  }

  fn interface_decl(&mut self, decl: &InterfaceDecl, name: &str) -> DocNode {
    let doc = Self::parse_doc(&decl.doc);
    // Inherited properties are merged by the linker, not here.
    let extends = decl.extends.iter().map(|e| self.type_node(e)).collect();
    let properties = self.type_members(&decl.members);
    DocNode::with_docs(
      NodeKind::Interface(InterfaceNode {
        id: node_id(self.file, &decl.name),
        name: name.to_string(),
        extends,
        properties,
        type_parameters: self.type_params(&decl.type_parameters),
      }),
      doc.docs(),
    )
  }

  fn alias_decl(&mut self, decl: &TypeAliasDecl, name: &str) -> DocNode {
    let doc = Self::parse_doc(&decl.doc);
    DocNode::with_docs(
      NodeKind::Alias(AliasNode {
        id: node_id(self.file, &decl.name),
        name: name.to_string(),
        value: Box::new(self.type_node(&decl.type_expr)),
        type_parameters: self.type_params(&decl.type_parameters),
      }),
      doc.docs(),
    )
  }

  fn enum_decl(&mut self, decl: &EnumDecl, name: &str) -> DocNode {
    let doc = Self::parse_doc(&decl.doc);
    let members = decl
      .members
      .iter()
      .map(|m| {
        let m = &m.stx;
        let member_doc = Self::parse_doc(&m.doc);
        DocNode::with_docs(
          NodeKind::EnumMember {
            name: m.name.clone(),
            value: m.initializer.as_ref().and_then(super::expr::literal_text),
          },
          member_doc.docs(),
        )
      })
      .collect();
    DocNode::with_docs(
      NodeKind::Enum {
        name: name.to_string(),
        members,
      },
      doc.docs(),
    )
  }

  fn func_decl(&mut self, decl: &FuncDecl, name: &str) -> DocNode {
    let doc = Self::parse_doc(&decl.doc);
    let declared = decl.name.as_deref().unwrap_or(name);
    self.function_node(&decl.function.stx, Some(declared), Some(name), &doc)
  }

  /// Lower a class to an interface node: base class in `extends`; fields,
  /// methods, and accessors in `properties`; constructors dropped.
  pub(crate) fn class_decl(
    &mut self,
    class: &ClassBody,
    name: &str,
    doc: &DocComment,
  ) -> DocNode {
    let mut extends = Vec::new();
    if let Some(base) = &class.extends {
      if let Some(mut base_node) = self.expr_node(base) {
        if let Some(args) = &class.extends_type_arguments {
          base_node = NodeKind::Application {
            base: Box::new(base_node),
            type_parameters: args.iter().map(|a| self.type_node(a)).collect(),
          }
          .into();
        }
        extends.push(base_node);
      }
    }

    let mut properties = Properties::default();
    for member in &class.members {
      let member = &member.stx;
      let Some(member_name) = member.key.name() else {
        continue;
      };
      if member_name == "constructor" {
        continue;
      }
      let member_doc = Self::parse_doc(&member.doc);
      let mut docs = member_doc.docs();
      if docs.access.is_none() {
        docs.access = match member.accessibility {
          Some(Accessibility::Private) => Some(crate::node::Access::Private),
          Some(Accessibility::Protected) => Some(crate::node::Access::Protected),
          _ => None,
        };
      }
      match &member.val {
        ClassVal::Prop(init) => {
          let value = match (&member.type_annotation, init) {
            (Some(t), _) => self.type_node(t),
            (None, Some(init)) => self.expr_node(init).unwrap_or(NodeKind::Any.into()),
            (None, None) => NodeKind::Any.into(),
          };
          properties.insert(
            member_name.to_string(),
            DocNode::with_docs(
              NodeKind::Property(PropertyNode {
                name: member_name.to_string(),
                value: Box::new(value),
                optional: member.optional,
                index_type: None,
                inherited_from: None,
              }),
              docs,
            ),
          );
        }
        ClassVal::Getter(func) => {
          let value = match &func.stx.return_type {
            Some(t) => self.type_node(t),
            None => NodeKind::Any.into(),
          };
          properties.insert(
            member_name.to_string(),
            DocNode::with_docs(
              NodeKind::Property(PropertyNode {
                name: member_name.to_string(),
                value: Box::new(value),
                optional: false,
                index_type: None,
                inherited_from: None,
              }),
              docs,
            ),
          );
        }
        ClassVal::Setter(func) => {
          let value = func
            .stx
            .parameters
            .first()
            .and_then(|p| p.stx.type_annotation.as_ref())
            .map(|t| self.type_node(t))
            .unwrap_or(NodeKind::Any.into());
          // A getter for the same name wins; the setter only fills a gap.
          properties
            .entry(member_name.to_string())
            .or_insert_with(|| {
              DocNode::with_docs(
                NodeKind::Property(PropertyNode {
                  name: member_name.to_string(),
                  value: Box::new(value),
                  optional: false,
                  index_type: None,
                  inherited_from: None,
                }),
                docs,
              )
            });
        }
        ClassVal::Method(func) => {
          let mut value = self.plain_function_node(&func.stx, Some(member_name));
          Self::distribute_fn_docs(&mut value, &member_doc);
          properties.insert(
            member_name.to_string(),
            DocNode::with_docs(
              NodeKind::Method(MethodNode {
                name: member_name.to_string(),
                value: Box::new(value),
                optional: member.optional,
                inherited_from: None,
              }),
              docs,
            ),
          );
        }
        ClassVal::Index(idx) => {
          let idx = &idx.stx;
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
              docs,
            ),
          );
        }
      }
    }

    DocNode::with_docs(
      NodeKind::Interface(InterfaceNode {
        id: node_id(self.file, name),
        name: name.to_string(),
        extends,
        properties,
        type_parameters: self.type_params(&class.type_parameters),
      }),
      doc.docs(),
    )
  }

  fn var_declarator(
    &mut self,
    declarator: &VarDeclarator,
    name: &str,
    doc: &DocComment,
  ) -> Option<DocNode> {
    match (&declarator.initializer, &declarator.type_annotation) {
      (Some(init), _) => {
        let node = self.initializer_node(init, name, doc)?;
        Some(node)
      }
      // Ambient/annotated variables document their annotation.
      (None, Some(annotation)) => {
        let mut node = self.type_node(annotation);
        node.fill_docs(doc.docs());
        Some(node)
      }
      // Nothing to document.
      (None, None) => None,
    }
  }

  /// `export namespace NS { ... }` becomes an object of its named members.
  fn namespace_decl(&mut self, ns: &NamespaceDecl, decl: &DeclRef) -> DocNode {
    let doc = Self::parse_doc(&ns.doc);
    let mut properties = Properties::default();
    for (index, stmt) in ns.body.iter().enumerate() {
      let member_name = match stmt.stx.as_ref() {
        Stmt::InterfaceDecl(i) => Some(i.stx.name.clone()),
        Stmt::TypeAliasDecl(a) => Some(a.stx.name.clone()),
        Stmt::EnumDecl(e) => Some(e.stx.name.clone()),
        Stmt::FunctionDecl(f) => f.stx.name.clone(),
        Stmt::ClassDecl(c) => c.stx.name.clone(),
        _ => None,
      };
      let Some(member_name) = member_name else {
        continue;
      };
      let mut member_ref = decl.clone();
      member_ref.path.push(index);
      member_ref.declarator = None;
      if let Some(value) = self.transform_decl_ref(&member_ref, &member_name) {
        properties.insert(
          member_name.clone(),
          NodeKind::Property(PropertyNode {
            name: member_name,
            value: Box::new(value),
            optional: false,
            index_type: None,
            inherited_from: None,
          })
          .into(),
        );
      }
    }
    DocNode::with_docs(NodeKind::Object { properties }, doc.docs())
  }

  /// Function declaration or expression body shared by functions, methods,
  /// and variable initializers. Detects React-style components.
  pub(crate) fn function_node(
    &mut self,
    func: &parse_ts::ast::func::Func,
    declared_name: Option<&str>,
    public_name: Option<&str>,
    doc: &DocComment,
  ) -> DocNode {
    let parameters = self.fn_params(&func.parameters);
    let type_parameters = self.type_params(&func.type_parameters);

    if let Some(name) = public_name {
      if super::expr::returns_jsx(func) {
        let props = parameters.first().and_then(parameter_value);
        let ref_type = parameters.get(1).and_then(parameter_value);
        let mut node = DocNode::with_docs(
          NodeKind::Component(crate::node::ComponentNode {
            id: node_id(self.file, declared_name.unwrap_or(name)),
            name: name.to_string(),
            props: props.map(Box::new),
            ref_type: ref_type.map(Box::new),
            type_parameters,
          }),
          doc.docs(),
        );
        if let (NodeKind::Component(c), Some(desc)) =
          (&mut node.kind, doc.params.get("props"))
        {
          if let Some(props) = &mut c.props {
            props.docs.description = Some(desc.clone());
          }
        }
        return node;
      }
    }

    let return_type = match &func.return_type {
      Some(t) => self.type_node(t),
      None => NodeKind::Any.into(),
    };
    let mut node = DocNode::with_docs(
      NodeKind::Function(FunctionNode {
        id: declared_name.map(|n| node_id(self.file, n)),
        name: declared_name.map(str::to_string),
        parameters,
        return_type: Box::new(return_type),
        type_parameters,
      }),
      doc.docs(),
    );
    Self::distribute_fn_docs(&mut node, doc);
    node
  }

  pub(crate) fn fn_params(
    &mut self,
    params: &[Node<parse_ts::ast::func::ParamDecl>],
  ) -> Vec<DocNode> {
    params
      .iter()
      .enumerate()
      .map(|(i, p)| {
        let p = &p.stx;
        let name = p
          .pattern
          .stx
          .name()
          .map(str::to_string)
          .unwrap_or_else(|| format!("arg{i}"));
        let value = match &p.type_annotation {
          Some(t) => self.type_node(t),
          None => NodeKind::Any.into(),
        };
        NodeKind::Parameter {
          name,
          value: Box::new(value),
          optional: p.optional || p.default_value.is_some(),
          rest: p.rest,
        }
        .into()
      })
      .collect()
  }
}

fn parameter_value(param: &DocNode) -> Option<DocNode> {
  match &param.kind {
    NodeKind::Parameter { value, .. } => Some((**value).clone()),
    _ => None,
  }
}
