use typeloom_core::{Kind, TypeRepr};

use super::*;

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
}

#[test]
fn location_display() {
    assert_eq!(Location::statement("main", 2).to_string(), "main:2");
    assert_eq!(Location::function("main").to_string(), "main");
    assert_eq!(Location::node("x").to_string(), "[x]");
    assert_eq!(
        Location::statement("main", 2).with_node("x").to_string(),
        "main:2 [x]"
    );
    assert!(Location::default().is_empty());
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::MissingAttribute, Location::node("m1"))
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    insta::assert_snapshot!(diagnostics.render(), @r"
    error: undeclared attribute
      --> [m1]
    ");
}

#[test]
fn report_with_custom_message_uses_template() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::IncompatibleBasalTypes, Location::default())
        .message("`Number` and `String`")
        .emit();

    insta::assert_snapshot!(diagnostics.render(), @r"
    error: `Number` and `String` are connected
      = hint: some value is used both as the first kind and as the second
    ");
}

#[test]
fn builder_related_and_severity() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ConflictingInferredTypes, Location::statement("main", 3))
        .message("x")
        .related(Location::statement("main", 1), "first inferred here")
        .severity(Severity::Warning)
        .emit();

    assert!(!diagnostics.has_errors());
    assert!(diagnostics.has_warnings());
    assert_eq!(diagnostics.warning_count(), 1);
    insta::assert_snapshot!(diagnostics.render(), @r"
    warning: conflicting inferred types: x
      --> main:3
      = related: first inferred here at main:1
    ");
}

#[test]
fn warning_kind_carries_default_hint() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::DeclaredInferredMismatch, Location::node("y"))
        .message("`y` is declared as Number but inferred as String")
        .emit();

    assert_eq!(diagnostics.error_count(), 0);
    insta::assert_snapshot!(diagnostics.render(), @r"
    warning: `y` is declared as Number but inferred as String
      --> [y]
      = hint: rerun with `--strict` to make this an error
    ");
}

#[test]
fn report_error_fills_node_from_subject() {
    let error = crate::Error::from(typeloom_core::Error::conflicting_inferred(
        "x",
        &TypeRepr::primitive(Kind::Number),
        &TypeRepr::primitive(Kind::String),
    ));
    let mut diagnostics = Diagnostics::new();
    diagnostics.report_error(&error, Location::statement("main", 2));

    assert_eq!(
        diagnostics.kinds().collect::<Vec<_>>(),
        vec![DiagnosticKind::ConflictingInferredTypes]
    );
    insta::assert_snapshot!(diagnostics.render(), @r"
    error: conflicting inferred types for `x`: existing Number, got String
      --> main:2 [x]
    ");
}

#[test]
fn report_error_keeps_explicit_node() {
    let error = crate::Error::MalformedNode {
        id: "b1".to_string(),
        tag: "Binary".to_string(),
        reason: "expected at least 2 child node(s), found 1".to_string(),
    };
    let mut diagnostics = Diagnostics::new();
    diagnostics.report_error(&error, Location::node("outer"));

    insta::assert_snapshot!(diagnostics.render(), @r"
    error: malformed Binary node `b1`: expected at least 2 child node(s), found 1
      --> [outer]
    ");
}

#[test]
fn error_kind_mapping() {
    let cases = [
        (
            crate::Error::MissingAttribute("a".to_string()),
            DiagnosticKind::MissingAttribute,
        ),
        (
            crate::Error::UnknownCustomType("Currency".to_string()),
            DiagnosticKind::UnknownCustomType,
        ),
        (
            crate::Error::UnsupportedOperator("Pow".to_string()),
            DiagnosticKind::UnsupportedOperator,
        ),
        (
            crate::Error::UnhandledNodeKind("Lambda".to_string()),
            DiagnosticKind::MalformedNode,
        ),
        (
            crate::Error::TypedefSyntax {
                line: 1,
                reason: "missing `>>=`".to_string(),
            },
            DiagnosticKind::InvalidDefinition,
        ),
    ];
    for (error, kind) in cases {
        assert_eq!(DiagnosticKind::for_error(&error), kind, "{error}");
    }
}

#[test]
fn printer_sorted_by_priority() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::DeclaredInferredMismatch, Location::node("y"))
        .emit();
    diagnostics
        .report(DiagnosticKind::ConflictingInferredTypes, Location::node("x"))
        .emit();

    let rendered = diagnostics.printer().sorted(true).path("prog.json").render();
    insta::assert_snapshot!(rendered, @r"
    error: conflicting inferred types
      --> prog.json: [x]

    warning: declared type differs from inferred type
      --> prog.json: [y]
      = hint: rerun with `--strict` to make this an error
    ");
}

#[test]
fn printer_colored() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::NotCallable, Location::node("f"))
        .emit();

    let expected = "\x1b[31merror\x1b[0m: value is not callable\n  \x1b[2m-->\x1b[0m [f]\n";
    assert_eq!(diagnostics.render_colored(true), expected);
}

#[test]
fn extend_merges_messages() {
    let mut a = Diagnostics::new();
    a.report(DiagnosticKind::MissingAttribute, Location::default())
        .emit();
    let mut b = Diagnostics::new();
    b.report(DiagnosticKind::NotCallable, Location::default())
        .emit();
    a.extend(b);

    assert_eq!(a.len(), 2);
    assert_eq!(a.error_count(), 2);
}
