use indoc::indoc;

use typeloom_core::{Form, Kind, Literal, TypeRepr};

use crate::Error;
use crate::typedef::parse;

#[test]
fn all_forms() {
    let defs = parse(indoc! {r#"
        # money
        type Age >>= Number
        type Currency >>= "USD" | "CAD" | 'GBP'
        type Id >>= String & Number

        type Person >>= name: String, age: Age
        // callbacks
        type Handler >>= fn(event: String, retries: Number) -> Boolean
    "#})
    .unwrap();

    let rendered: Vec<String> = defs.values().map(|t| t.to_string()).collect();
    insta::assert_snapshot!(rendered.join("\n"), @r#"
    Age = Number
    Currency = "USD" | "CAD" | "GBP"
    Id = String & Number
    Person = {name: String, age: Age}
    Handler = fn(event: String, retries: Number) -> Boolean
    "#);
    assert_eq!(defs["Handler"].form(), Form::Function);
    assert!(defs["Age"] == TypeRepr::primitive(Kind::Number));
}

#[test]
fn union_literals_and_kinds() {
    let defs = parse("type Mixed >>= 1 | true | Date").unwrap();
    let t = &defs["Mixed"];
    assert_eq!(t.literals().unwrap().len(), 2);
    assert!(t.literals().unwrap().contains(&Literal::Int(1)));
    assert!(t.kinds().unwrap().contains(&Kind::Date));
}

#[test]
fn function_without_params_or_return() {
    let defs = parse("type Thunk >>= fn()").unwrap();
    insta::assert_snapshot!(defs["Thunk"], @"Thunk = fn() -> Any");
}

#[test]
fn syntax_errors_carry_line() {
    let err = parse("type A >>= Number\ntype B = Number").unwrap_err();
    insta::assert_snapshot!(err, @"type definition line 2: missing `>>=`");

    let err = parse("type C >>= Widget").unwrap_err();
    insta::assert_snapshot!(err, @"type definition line 1: unknown type `Widget`");

    let err = parse("typedef D >>= Number").unwrap_err();
    assert!(matches!(err, Error::TypedefSyntax { line: 1, .. }));

    let err = parse("type E >>= a: Number, a: String").unwrap_err();
    insta::assert_snapshot!(err, @"type definition line 1: duplicate field `a`");
}

#[test]
fn forward_references_rejected() {
    let err = parse("type A >>= B\ntype B >>= Number").unwrap_err();
    assert!(matches!(err, Error::TypedefSyntax { line: 1, .. }));
}
