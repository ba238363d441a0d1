//! Operator and assertion-function tables.

use typeloom_core::Kind;

use crate::{Error, Result};

/// Parenthesis markers pass their operand's type through unchanged.
pub fn is_passthrough(op: &str) -> bool {
    matches!(op, "LParen" | "RParen")
}

/// Kind every operand of `op` must have, which is also the kind of the result.
pub fn required_kind(op: &str) -> Result<Kind> {
    let kind = match op {
        "Add" | "Sub" | "Mul" | "Div" | "Mod" | "PostInc" | "PreInc" | "PostDec" | "PreDec"
        | "Neg" => Kind::Number,
        "And" | "Or" | "Not" => Kind::Boolean,
        "Cat" => Kind::String,
        other => return Err(Error::UnsupportedOperator(other.to_string())),
    };
    Ok(kind)
}

/// Kind asserted by a type-assertion function such as `Number?`.
pub fn assertion_kind(function: &str) -> Option<Kind> {
    let kind = match function {
        "String?" => Kind::String,
        "Number?" => Kind::Number,
        "Boolean?" => Kind::Boolean,
        "Object?" => Kind::Object,
        "Function?" => Kind::Function,
        "Date?" => Kind::Date,
        _ => return None,
    };
    Some(kind)
}
