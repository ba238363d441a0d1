//! AST builders shared by the inference and checker tests.

use serde_json::{Value, json};

use crate::ast::Program;

pub fn node(tag: &str, value: &str, type_t: &str, id: &str, args: Vec<Value>) -> Value {
    json!({"Tag": tag, "Value": value, "Type_t": type_t, "ID": id, "Args": args})
}

/// Identifier whose id is its name.
pub fn ident(name: &str) -> Value {
    node("Identifier", name, "Variable", name, vec![])
}

pub fn number(id: &str, text: &str) -> Value {
    node("Constant", text, "Number", id, vec![])
}

/// String constant; the value carries its quotes as the parser emits them.
pub fn string(id: &str, text: &str) -> Value {
    node("Constant", &format!("\"{text}\""), "String", id, vec![])
}

pub fn boolean(id: &str, value: bool) -> Value {
    node("Constant", &value.to_string(), "Boolean", id, vec![])
}

pub fn assign(id: &str, lhs: Value, rhs: Value) -> Value {
    node("Binary", "Eq", "Operator", id, vec![lhs, rhs])
}

pub fn nary(id: &str, op: &str, args: Vec<Value>) -> Value {
    node("Nary", op, "Operator", id, args)
}

pub fn unary(id: &str, op: &str, operand: Value) -> Value {
    node("Unary", op, "Operator", id, vec![operand])
}

pub fn call(id: &str, callee: Value) -> Value {
    node("Call", "", "Callable", id, vec![callee])
}

/// `main(params) { body }` with no attributes.
pub fn program(params: &[&str], body: Vec<Value>) -> Program {
    program_with(json!({}), vec![("main", params.to_vec(), body)])
}

/// Several functions and an attribute table (`{name: [{"Type_t": kind}]}`).
pub fn program_with(attributes: Value, functions: Vec<(&str, Vec<&str>, Vec<Value>)>) -> Program {
    let mut methods = serde_json::Map::new();
    for (name, params, body) in &functions {
        let params: Vec<Value> = params.iter().map(|p| json!({"Value": p, "ID": p})).collect();
        let body: Vec<Value> = body.iter().map(|stmt| json!([stmt])).collect();
        methods.insert(
            name.to_string(),
            json!([{"Name": name, "Parameters": params, "Body": body}]),
        );
    }
    let ast = json!({"Methods": methods, "Attributes": attributes});
    Program::from_json(&ast.to_string()).unwrap()
}
