use indoc::indoc;
use typeloom_core::{Form, Kind, TypeRepr};

use super::*;

#[test]
fn typedefs_take_key_as_name() {
    let mut annotations = Annotations::new();
    annotations
        .load_typedefs_json(indoc! {r#"
            {
              "Currency": {"form": "Union", "meaning": ["USD", "CAD", "GBP"]},
              "Age": {"form": "Alias", "name": "Years", "meaning": ["Number"]}
            }
        "#})
        .unwrap();

    let currency = &annotations.typedefs["Currency"];
    assert_eq!(currency.name(), "Currency");
    assert_eq!(currency.form(), Form::Union);
    insta::assert_snapshot!(currency, @r#"Currency = "USD" | "CAD" | "GBP""#);

    // An explicit name wins over the key.
    assert_eq!(annotations.typedefs["Age"].name(), "Years");
}

#[test]
fn typedef_source_extends_typedefs() {
    let mut annotations = Annotations::new();
    annotations
        .load_typedef_source("type Flag >>= Boolean\n")
        .unwrap();

    assert_eq!(annotations.typedefs["Flag"].to_string(), "Flag = Boolean");
}

#[test]
fn params_resolve_kinds_typedefs_and_definitions() {
    let mut annotations = Annotations::new();
    annotations
        .load_typedefs_json(r#"{"Currency": {"form": "Union", "meaning": ["USD", "CAD"]}}"#)
        .unwrap();
    annotations
        .load_params_json(indoc! {r#"
            {
              "pay": {
                "amount": "Number",
                "unit": "Currency",
                "note": {"form": "Primitive", "meaning": ["String"]},
                "target": "Variable"
              }
            }
        "#})
        .unwrap();

    let pay = &annotations.params["pay"];
    assert_eq!(
        pay.keys().collect::<Vec<_>>(),
        vec!["amount", "unit", "note", "target"]
    );
    assert!(pay["amount"].is_kind(Kind::Number));
    assert_eq!(pay["unit"].name(), "Currency");
    assert!(pay["note"].is_kind(Kind::String));
    assert!(pay["target"].is_kind(Kind::Unknown));
}

#[test]
fn unknown_param_type_name() {
    let mut annotations = Annotations::new();
    let err = annotations
        .load_params_json(r#"{"pay": {"unit": "Currency"}}"#)
        .unwrap_err();

    insta::assert_snapshot!(err, @"custom type `Currency` is not defined");
}

#[test]
fn invalid_param_definition() {
    let mut annotations = Annotations::new();
    let err = annotations
        .load_params_json(r#"{"pay": {"unit": {"form": "Primitive"}}}"#)
        .unwrap_err();

    insta::assert_snapshot!(err, @"invalid type definition: missing `meaning`");
}

#[test]
fn bindings_lookup() {
    let mut annotations = Annotations::new();
    annotations
        .load_bindings_json(r#"{"pay_unit": "Currency"}"#)
        .unwrap();

    assert_eq!(annotations.binding("pay", "unit"), Some("Currency"));
    assert_eq!(annotations.binding("pay", "amount"), None);
    assert_eq!(annotations.binding("main", "unit"), None);
}

#[test]
fn default_is_empty() {
    let annotations = Annotations::default();
    assert!(annotations.params.is_empty());
    assert!(annotations.typedefs.is_empty());
    assert!(annotations.bindings.is_empty());
    assert!(TypeRepr::primitive(Kind::Any).is_wildcard());
}
