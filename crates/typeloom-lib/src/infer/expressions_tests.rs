use typeloom_core::Kind;

use super::*;
use crate::test_fixtures::*;

fn run(program: &Program) -> Inference {
    infer(program, &Annotations::default(), &InferOptions::default()).unwrap()
}

fn first_error(program: &Program) -> String {
    infer(
        program,
        &Annotations::default(),
        &InferOptions::new().fail_fast(true),
    )
    .unwrap_err()
    .to_string()
}

#[test]
fn constant_carries_its_literal() {
    let program = program(&[], vec![assign("e1", ident("s"), string("c1", "hi"))]);

    let run = run(&program);

    let c1 = run.store.get("c1").unwrap();
    assert_eq!(c1.value, "\"hi\"");
    assert_eq!(c1.actual.to_string(), "String");
    // The variable takes the kind, not the literal.
    assert_eq!(run.store.get("s").unwrap().inferred.to_string(), "String");
}

#[test]
fn unknown_kind_token() {
    let program = program(
        &[],
        vec![assign(
            "e1",
            ident("x"),
            node("Constant", "1.5", "Decimal", "c1", vec![]),
        )],
    );

    insta::assert_snapshot!(first_error(&program), @"invalid type definition: unknown kind token `Decimal`");
}

#[test]
fn parentheses_pass_through() {
    let program = program(
        &[],
        vec![assign(
            "e1",
            ident("x"),
            unary("p1", "LParen", number("c1", "5")),
        )],
    );

    let run = run(&program);

    assert!(run.diagnostics.is_empty());
    assert!(run.store.get("x").unwrap().inferred.is_kind(Kind::Number));
    assert!(!run.store.contains("p1"));
    assert!(!run.graph.connected("c1", "Number"));
}

#[test]
fn unary_operand_takes_operator_kind() {
    let program = program(&[], vec![unary("u1", "Not", ident("flag"))]);

    let run = run(&program);

    let flag = run.store.get("flag").unwrap();
    assert!(flag.inferred.is_kind(Kind::Boolean));
    assert!(run.graph.connected("flag", "Boolean"));
}

#[test]
fn unary_operand_of_wrong_kind() {
    let program = program(&[], vec![unary("u1", "Neg", string("c1", "a"))]);

    insta::assert_snapshot!(first_error(&program), @r#"conflicting inferred types for `c1`: existing String("a"), got Number"#);
}

#[test]
fn unsupported_operator() {
    let program = program(
        &[],
        vec![nary("n1", "Pow", vec![ident("a"), number("c1", "2")])],
    );

    insta::assert_snapshot!(first_error(&program), @"unsupported operator `Pow`");
}

#[test]
fn binary_missing_operand() {
    let program = program(
        &[],
        vec![node("Binary", "Eq", "Operator", "e1", vec![ident("x")])],
    );

    insta::assert_snapshot!(first_error(&program), @"malformed Binary node `e1`: expected at least 2 child node(s), found 1");
}

#[test]
fn nary_chains_arguments_to_kind_node() {
    let program = program(
        &[],
        vec![nary("n1", "Add", vec![ident("a"), ident("b"), ident("c")])],
    );

    let run = run(&program);

    assert!(run.graph.connected("a", "b"));
    assert!(run.graph.connected("b", "c"));
    assert!(run.graph.connected("c", "Number"));
    assert!(!run.graph.connected("a", "Number"));
    for id in ["a", "b", "c"] {
        assert!(run.store.get(id).unwrap().inferred.is_kind(Kind::Number));
    }
}

#[test]
fn normalize_hangs_chain_off_kind_node() {
    let program = program(
        &[],
        vec![nary("n1", "Add", vec![ident("a"), ident("b"), ident("c")])],
    );

    let run = infer(
        &program,
        &Annotations::default(),
        &InferOptions::new().normalize(true),
    )
    .unwrap();

    assert!(!run.graph.connected("a", "b"));
    for id in ["a", "b", "c", "n1"] {
        assert!(run.graph.connected(id, "Number"), "{id}");
    }
}

#[test]
fn type_assertion_pins_subject() {
    let assertion = call(
        "k1",
        node("Identifier", "Number?", "Variable", "f1", vec![ident("x")]),
    );
    let program = program(
        &[],
        vec![nary("n1", "And", vec![assertion, boolean("c1", true)])],
    );

    let run = run(&program);

    assert!(run.diagnostics.is_empty());
    assert!(run.store.get("x").unwrap().inferred.is_kind(Kind::Number));
    assert!(run.store.get("k1").unwrap().inferred.is_kind(Kind::Boolean));
    assert!(run.graph.connected("x", "Number"));
    assert!(run.graph.connected("k1", "c1"));
    assert!(run.graph.connected("c1", "Boolean"));
    assert!(!run.graph.path_exists("Number", "Boolean"));
}

#[test]
fn if_records_condition_and_branches() {
    let program = program(
        &[],
        vec![node(
            "If",
            "",
            "If",
            "i1",
            vec![
                ident("flag"),
                assign("e1", ident("x"), number("c1", "1")),
                assign("e2", ident("x"), number("c2", "2")),
            ],
        )],
    );

    let run = run(&program);

    assert!(run.diagnostics.is_empty());
    assert!(run.store.get("flag").unwrap().inferred.is_kind(Kind::Any));
    assert!(run.store.get("x").unwrap().inferred.is_kind(Kind::Number));
    assert!(!run.store.contains("i1"));
}

#[test]
fn if_without_branch() {
    let program = program(&[], vec![node("If", "", "If", "i1", vec![ident("flag")])]);

    insta::assert_snapshot!(first_error(&program), @"malformed If node `i1`: expected at least 2 child node(s), found 1");
}

#[test]
fn compound_takes_first_child_type() {
    let program = program(
        &[],
        vec![node(
            "Compound",
            "",
            "Compound",
            "k1",
            vec![number("c1", "1"), string("c2", "a")],
        )],
    );

    let run = run(&program);

    let k1 = run.store.get("k1").unwrap();
    assert!(k1.actual.is_kind(Kind::InBuiltOperator));
    assert!(k1.inferred.is_kind(Kind::Number));
    assert!(run.graph.contains("c2"));
    assert!(run.graph.connected("k1", "Number"));
}

#[test]
fn empty_compound_has_no_type() {
    let program = program(&[], vec![node("Compound", "", "Compound", "k1", vec![])]);

    let run = run(&program);

    assert!(!run.store.contains("k1"));
    assert_eq!(run.graph.node("k1").unwrap().degree(), 0);
}

#[test]
fn return_passes_value_type() {
    let program = program(
        &[],
        vec![node("Return", "", "Return", "r1", vec![boolean("c1", false)])],
    );

    let run = run(&program);

    assert!(run.store.get("r1").unwrap().inferred.is_kind(Kind::Boolean));
}

#[test]
fn object_maps_fields_to_types() {
    let object = node(
        "Object",
        "",
        "Object",
        "o1",
        vec![
            node("Identifier", "name", "Variable", "f1", vec![string("c1", "Ann")]),
            node("Identifier", "age", "Variable", "f2", vec![number("c2", "30")]),
        ],
    );
    let program = program(&[], vec![assign("e1", ident("person"), object)]);

    let run = run(&program);

    assert!(run.diagnostics.is_empty());
    let person = &run.store.get("person").unwrap().inferred;
    insta::assert_snapshot!(person, @"{name: String, age: Number}");
    assert!(run.graph.connected("c1", "String"));
    assert!(run.graph.connected("c2", "Number"));
    assert!(run.graph.connected("person", "o1"));
}

#[test]
fn call_on_function_typed_callee() {
    let program = program(&["f"], vec![call("k1", ident("f"))]);
    let mut annotations = Annotations::new();
    annotations
        .load_params_json(r#"{"main": {"f": "Function"}}"#)
        .unwrap();

    let run = infer(&program, &annotations, &InferOptions::default()).unwrap();

    assert!(run.diagnostics.is_empty());
    assert!(run.store.get("k1").unwrap().inferred.is_kind(Kind::Function));
}

#[test]
fn call_on_unknown_callee_is_allowed() {
    let program = program(&[], vec![call("k1", ident("g"))]);

    let run = run(&program);

    assert!(run.diagnostics.is_empty());
}
