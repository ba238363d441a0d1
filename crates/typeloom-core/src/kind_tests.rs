use crate::Error;
use crate::kind::Kind;

#[test]
fn name_round_trip() {
    for kind in Kind::ALL {
        assert_eq!(Kind::from_name(kind.name()), Some(kind));
    }
}

#[test]
fn from_name_rejects_tokens() {
    assert_eq!(Kind::from_name("Variable"), None);
    assert_eq!(Kind::from_name("Operator"), None);
    assert_eq!(Kind::from_name("number"), None);
}

#[test]
fn tokens_fold_onto_kinds() {
    assert_eq!(Kind::from_token("Variable").unwrap(), Kind::Unknown);
    assert_eq!(Kind::from_token("Member").unwrap(), Kind::Unknown);
    assert_eq!(Kind::from_token("Return").unwrap(), Kind::Unknown);
    assert_eq!(Kind::from_token("Operator").unwrap(), Kind::InBuiltOperator);
    assert_eq!(Kind::from_token("PostInc").unwrap(), Kind::InBuiltOperator);
    assert_eq!(Kind::from_token("Number").unwrap(), Kind::Number);
}

#[test]
fn unknown_token_is_invalid_definition() {
    let err = Kind::from_token("Widget").unwrap_err();
    assert!(matches!(err, Error::InvalidDefinition(_)));
    insta::assert_snapshot!(err, @"invalid type definition: unknown kind token `Widget`");
}

#[test]
fn token_spelling() {
    assert_eq!(Kind::Unknown.token(), "Variable");
    assert_eq!(Kind::InBuiltOperator.token(), "Operator");
    assert_eq!(Kind::Date.token(), "Date");
}

#[test]
fn wildcards() {
    let wild: Vec<_> = Kind::ALL.into_iter().filter(|k| k.is_wildcard()).collect();
    assert_eq!(wild, [Kind::Unknown, Kind::Any]);
}
