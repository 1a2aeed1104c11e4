mod common;

use common::fixture;
use docs_ts::Access;
use docs_ts::NodeKind;

#[test]
fn descriptions_attach_to_interfaces_and_members() {
  let loader = fixture(&[(
    "/a.ts",
    "/** Options for the picker. */\n\
     export interface PickerOptions {\n\
       /** Currently selected value. */\n\
       value: string;\n\
       /**\n\
        * Granularity of the picker.\n\
        * @default 'day'\n\
        */\n\
       granularity?: string;\n\
     }",
  )]);
  let result = loader.load("/a.ts", None).unwrap();
  let options = &result.exports["PickerOptions"];
  assert_eq!(
    options.docs.description.as_deref(),
    Some("Options for the picker.")
  );
  let NodeKind::Interface(options) = &options.kind else {
    panic!("expected interface");
  };
  assert_eq!(
    options.properties["value"].docs.description.as_deref(),
    Some("Currently selected value.")
  );
  let granularity = &options.properties["granularity"];
  assert_eq!(
    granularity.docs.description.as_deref(),
    Some("Granularity of the picker.")
  );
  assert_eq!(granularity.docs.default.as_deref(), Some("'day'"));
}

#[test]
fn deprecated_marks_private_access() {
  let loader = fixture(&[(
    "/a.ts",
    "export interface Legacy {\n\
       /** @deprecated use `next` instead */\n\
       old: string;\n\
       next: string;\n\
     }",
  )]);
  let result = loader.load("/a.ts", None).unwrap();
  let NodeKind::Interface(legacy) = &result.exports["Legacy"].kind else {
    panic!("expected interface");
  };
  assert_eq!(legacy.properties["old"].docs.access, Some(Access::Private));
  assert_eq!(legacy.properties["next"].docs.access, None);
}

#[test]
fn selector_tag_is_captured() {
  let loader = fixture(&[(
    "/a.ts",
    "/** Spinner styles.\n * @selector .spectrum-Spinner\n */\nexport interface SpinnerStyles { speed: number }",
  )]);
  let result = loader.load("/a.ts", None).unwrap();
  assert_eq!(
    result.exports["SpinnerStyles"].docs.selector.as_deref(),
    Some(".spectrum-Spinner")
  );
}

#[test]
fn method_params_receive_descriptions() {
  let loader = fixture(&[(
    "/a.ts",
    "export interface Api {\n\
       /**\n\
        * Fetches an item.\n\
        * @param id the item id\n\
        * @returns whether it worked\n\
        */\n\
       fetch(id: string): boolean;\n\
     }",
  )]);
  let result = loader.load("/a.ts", None).unwrap();
  let NodeKind::Interface(api) = &result.exports["Api"].kind else {
    panic!("expected interface");
  };
  let NodeKind::Method(fetch) = &api.properties["fetch"].kind else {
    panic!("expected method");
  };
  let NodeKind::Function(inner) = &fetch.value.kind else {
    panic!("expected function value");
  };
  assert_eq!(
    inner.parameters[0].docs.description.as_deref(),
    Some("the item id")
  );
  assert_eq!(
    inner.return_type.docs.description.as_deref(),
    Some("whether it worked")
  );
}

#[test]
fn object_literal_member_docs_survive() {
  let loader = fixture(&[(
    "/theme.ts",
    "export const theme = {\n\
       /** Primary brand color. */\n\
       primary: '#0f62fe',\n\
       depth: 3,\n\
     };",
  )]);
  let result = loader.load("/theme.ts", None).unwrap();
  let theme = &result.exports["theme"];
  let NodeKind::Interface(theme) = &theme.kind else {
    panic!("expected synthesized interface, got {theme:?}");
  };
  assert_eq!(theme.id, "/theme.ts:theme");
  assert_eq!(
    theme.properties["primary"].docs.description.as_deref(),
    Some("Primary brand color.")
  );
  let NodeKind::Property(primary) = &theme.properties["primary"].kind else {
    panic!("expected property");
  };
  assert_eq!(
    primary.value.kind,
    NodeKind::String {
      value: Some("#0f62fe".to_string())
    }
  );
}
