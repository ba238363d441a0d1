use serde_json::json;
use typeloom_core::Kind;

use super::*;
use crate::diagnostics::DiagnosticKind;
use crate::test_fixtures::*;

const CURRENCY: &str = r#"type Currency >>= "USD" | "CAD" | "GBP""#;

fn annotations(typedefs: &str, params: &str, bindings: &str) -> Annotations {
    let mut annotations = Annotations::new();
    annotations.load_typedef_source(typedefs).unwrap();
    annotations.load_params_json(params).unwrap();
    annotations.load_bindings_json(bindings).unwrap();
    annotations
}

fn first_error(program: &Program, annotations: &Annotations) -> String {
    infer(program, annotations, &InferOptions::new().fail_fast(true))
        .unwrap_err()
        .to_string()
}

#[test]
fn lookup_finds_first_use_in_preorder() {
    let program = program(
        &[],
        vec![assign(
            "e1",
            node("Identifier", "x", "Variable", "x1", vec![]),
            nary(
                "n1",
                "Add",
                vec![
                    node("Identifier", "y", "Variable", "y1", vec![]),
                    node("Identifier", "x", "Variable", "x2", vec![]),
                ],
            ),
        )],
    );
    let statement = &program.methods["main"].body[0].node;

    assert_eq!(lookup_variable("x", statement), Some("x1"));
    assert_eq!(lookup_variable("y", statement), Some("y1"));
    assert_eq!(lookup_variable("Add", statement), None);
    assert_eq!(lookup_variable("z", statement), None);
}

#[test]
fn binding_key_takes_longest_function_name() {
    let program = program_with(
        json!({}),
        vec![
            (
                "pay",
                vec![],
                vec![assign(
                    "e1",
                    node("Identifier", "total_amount", "Variable", "t1", vec![]),
                    string("c1", "USD"),
                )],
            ),
            (
                "pay_total",
                vec![],
                vec![assign(
                    "e2",
                    node("Identifier", "amount", "Variable", "a1", vec![]),
                    string("c2", "CAD"),
                )],
            ),
        ],
    );
    let annotations = annotations(CURRENCY, "{}", r#"{"pay_total_amount": "Currency"}"#);

    let run = infer(&program, &annotations, &InferOptions::default()).unwrap();

    assert!(run.diagnostics.is_empty());
    assert_eq!(run.store.get("a1").unwrap().inferred.name(), "Currency");
    assert!(run.graph.connected("a1", "Currency"));
    assert!(run.store.get("t1").unwrap().inferred.is_kind(Kind::String));
}

#[test]
fn binding_without_function_is_skipped() {
    let program = program(&[], vec![assign("e1", ident("x"), number("c1", "1"))]);
    let annotations = annotations(CURRENCY, "{}", r#"{"other_x": "Currency"}"#);

    let run = infer(&program, &annotations, &InferOptions::default()).unwrap();

    assert!(run.diagnostics.is_empty());
    assert!(!run.graph.contains("Currency"));
}

#[test]
fn binding_falls_back_to_parameter() {
    let program = program(&["unit"], vec![assign("e1", ident("x"), number("c1", "1"))]);
    let annotations = annotations(CURRENCY, "{}", r#"{"main_unit": "Currency"}"#);

    let run = infer(&program, &annotations, &InferOptions::default()).unwrap();

    let unit = run.store.get("unit").unwrap();
    assert_eq!(unit.inferred.name(), "Currency");
    assert!(run.graph.is_basal("Currency"));
    assert!(run.graph.connected("unit", "Currency"));
}

#[test]
fn binding_to_unmentioned_variable_is_skipped() {
    let program = program(&[], vec![assign("e1", ident("x"), number("c1", "1"))]);
    let annotations = annotations(CURRENCY, "{}", r#"{"main_unit": "Currency"}"#);

    let run = infer(&program, &annotations, &InferOptions::default()).unwrap();

    assert!(run.diagnostics.is_empty());
    assert!(!run.store.contains("unit"));
    assert!(!run.graph.contains("Currency"));
}

#[test]
fn binding_to_undefined_type() {
    let program = program(&[], vec![assign("e1", ident("x"), number("c1", "1"))]);
    let annotations = annotations("", "{}", r#"{"main_x": "Money"}"#);

    let run = infer(&program, &annotations, &InferOptions::default()).unwrap();

    assert_eq!(
        run.diagnostics.kinds().collect::<Vec<_>>(),
        vec![DiagnosticKind::UnknownCustomType]
    );
    // The statement is still inferred.
    assert!(run.store.get("x").unwrap().inferred.is_kind(Kind::Number));
    insta::assert_snapshot!(first_error(&program, &annotations), @"custom type `Money` is not defined");
}

#[test]
fn parameters_match_annotations_by_name() {
    let program = program(&["a", "b"], vec![]);
    let annotations = annotations("", r#"{"main": {"b": "String", "a": "Number"}}"#, "{}");

    let run = infer(&program, &annotations, &InferOptions::default()).unwrap();

    assert!(run.diagnostics.is_empty());
    let a = run.store.get("a").unwrap();
    assert!(a.actual.is_kind(Kind::Number));
    assert!(a.inferred.is_kind(Kind::Number));
    assert!(run.store.get("b").unwrap().inferred.is_kind(Kind::String));
    assert!(run.graph.connected("a", "Number"));
    assert!(run.graph.connected("b", "String"));
}

#[test]
fn wildcard_parameter_gets_no_edge() {
    let program = program(&["target"], vec![]);
    let annotations = annotations("", r#"{"main": {"target": "Variable"}}"#, "{}");

    let run = infer(&program, &annotations, &InferOptions::default()).unwrap();

    assert!(run.store.get("target").unwrap().inferred.is_kind(Kind::Unknown));
    assert_eq!(run.graph.node("target").unwrap().degree(), 0);
}

#[test]
fn alias_parameter_hangs_off_target_kind() {
    let program = program(&["years"], vec![]);
    let annotations = annotations("type Age >>= Number", r#"{"main": {"years": "Age"}}"#, "{}");

    let run = infer(&program, &annotations, &InferOptions::default()).unwrap();

    assert!(run.graph.connected("years", "Number"));
    assert!(!run.graph.contains("Age"));
}

#[test]
fn bound_parameter_hangs_off_custom_type() {
    let program = program(&["unit"], vec![]);
    let annotations = annotations(
        CURRENCY,
        r#"{"main": {"unit": "Currency"}}"#,
        r#"{"main_unit": "Currency"}"#,
    );

    let run = infer(&program, &annotations, &InferOptions::default()).unwrap();

    assert!(run.graph.connected("unit", "Currency"));
    assert_eq!(run.store.get("unit").unwrap().actual.name(), "Currency");
}

#[test]
fn unbound_custom_parameter_is_unresolved() {
    let program = program(&["unit"], vec![]);
    let annotations = annotations(CURRENCY, r#"{"main": {"unit": "Currency"}}"#, "{}");

    let run = infer(&program, &annotations, &InferOptions::default()).unwrap();

    assert_eq!(
        run.diagnostics.kinds().collect::<Vec<_>>(),
        vec![DiagnosticKind::UnresolvedParameterType]
    );
    insta::assert_snapshot!(
        first_error(&program, &annotations),
        @"cannot resolve the annotated type of parameter `unit` in `main`"
    );
}

#[test]
fn parameter_count_mismatch() {
    let program = program(&["a", "b"], vec![]);
    let annotations = annotations("", r#"{"main": {"a": "Number"}}"#, "{}");

    insta::assert_snapshot!(
        first_error(&program, &annotations),
        @"`main` declares 2 parameter(s) but 1 are annotated"
    );
}

#[test]
fn functions_without_annotations_are_skipped() {
    let program = program(&["a"], vec![]);
    let annotations = annotations("", r#"{"other": {"a": "Number"}}"#, "{}");

    let run = infer(&program, &annotations, &InferOptions::default()).unwrap();

    assert!(run.diagnostics.is_empty());
    assert!(!run.store.contains("a"));
}
