mod common;

use common::fixture;
use docs_ts::NodeKind;

#[test]
fn function_returning_jsx_becomes_component() {
  let loader = fixture(&[(
    "/button.tsx",
    "export interface ButtonProps { label: string; disabled?: boolean }\n\
     /** Renders a button. */\n\
     export function Button(props: ButtonProps) {\n\
       return <button>{props.label}</button>;\n\
     }",
  )]);
  let result = loader.load("/button.tsx", None).unwrap();
  let button = &result.exports["Button"];
  let NodeKind::Component(button_node) = &button.kind else {
    panic!("expected component, got {button:?}");
  };
  assert_eq!(button_node.id, "/button.tsx:Button");
  assert_eq!(button_node.name, "Button");
  assert_eq!(button.docs.description.as_deref(), Some("Renders a button."));
  let props = button_node.props.as_ref().expect("props");
  let NodeKind::Interface(props) = &props.kind else {
    panic!("expected inlined props interface, got {props:?}");
  };
  assert_eq!(props.id, "/button.tsx:ButtonProps");
  let disabled = &props.properties["disabled"];
  assert!(matches!(&disabled.kind, NodeKind::Property(p) if p.optional));
}

#[test]
fn forward_ref_wrapper_is_transparent() {
  let loader = fixture(&[(
    "/link.tsx",
    "import {forwardRef} from 'react';\n\
     interface LinkProps { href: string }\n\
     export const Link = forwardRef((props: LinkProps, ref: Ref<HTMLAnchorElement>) => <a href={props.href} />);",
  )]);
  let result = loader.load("/link.tsx", None).unwrap();
  let link = &result.exports["Link"];
  let NodeKind::Component(link) = &link.kind else {
    panic!("expected component, got {link:?}");
  };
  assert!(link.props.is_some());
  assert!(link.ref_type.is_some());
}

#[test]
fn explicit_jsx_element_annotation_counts() {
  let loader = fixture(&[(
    "/widget.tsx",
    "export function Widget(props: {}): JSX.Element { return build(props); }",
  )]);
  let result = loader.load("/widget.tsx", None).unwrap();
  assert!(matches!(
    &result.exports["Widget"].kind,
    NodeKind::Component(_)
  ));
}

#[test]
fn clone_element_return_counts() {
  let loader = fixture(&[(
    "/wrap.tsx",
    "export function Wrapped(props: { child: any }) {\n\
       return cloneElement(props.child, {});\n\
     }",
  )]);
  let result = loader.load("/wrap.tsx", None).unwrap();
  assert!(matches!(
    &result.exports["Wrapped"].kind,
    NodeKind::Component(_)
  ));
}

#[test]
fn plain_function_stays_a_function() {
  let loader = fixture(&[(
    "/math.ts",
    "/** Adds.\n * @param a left operand\n * @param b right operand\n * @returns the sum\n */\n\
     export function add(a: number, b: number): number { return a + b; }",
  )]);
  let result = loader.load("/math.ts", None).unwrap();
  let add = &result.exports["add"];
  let NodeKind::Function(add_fn) = &add.kind else {
    panic!("expected function, got {add:?}");
  };
  assert_eq!(add_fn.id.as_deref(), Some("/math.ts:add"));
  assert_eq!(add.docs.description.as_deref(), Some("Adds."));
  assert_eq!(add_fn.parameters.len(), 2);
  assert_eq!(
    add_fn.parameters[0].docs.description.as_deref(),
    Some("left operand")
  );
  assert_eq!(
    add_fn.return_type.docs.description.as_deref(),
    Some("the sum")
  );
  assert_eq!(add_fn.return_type.kind, NodeKind::Number { value: None });
}

#[test]
fn conditional_jsx_return_counts() {
  let loader = fixture(&[(
    "/cond.tsx",
    "export function Maybe(props: { show: boolean }) {\n\
       if (!props.show) { return null; }\n\
       return <div />;\n\
     }",
  )]);
  let result = loader.load("/cond.tsx", None).unwrap();
  assert!(matches!(
    &result.exports["Maybe"].kind,
    NodeKind::Component(_)
  ));
}
