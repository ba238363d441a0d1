//! Wire-level type definitions: `{form, name, meaning, value}`.
//!
//! `Definition` is the loosely-typed shape read from typedef files, the
//! persisted store and the `--types` argument. Conversion into `TypeRepr`
//! validates it; conversion back is lossless, object fields and function
//! parameters included, in their declared order.
//!
//! Meaning encoding per form:
//! - `Primitive`: `["Number"]` (exactly one kind) or a bare `"Number"`.
//! - `Union` / `Intersect`: a non-empty list; strings naming a kind are kind
//!   members, other strings, integers and booleans are literals.
//! - `Alias`: `["Number"]`, a bare kind name, or a nested definition.
//! - `Object`: `{field: kind-name | definition}`.
//! - `Function`: `{"parameters": {name: kind-name | definition}, "return": ...}`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::kind::Kind;
use crate::repr::{Form, Literal, Meaning, Member, TypeRepr};
use crate::{Error, Result};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<Form>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meaning: Option<Value>,
    #[serde(default, rename = "value", skip_serializing_if = "Option::is_none")]
    pub literals: Option<Vec<Literal>>,
}

impl Definition {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode as a JSON object without going through a fallible serializer.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        if let Some(form) = self.form {
            map.insert("form".into(), Value::String(form_name(form).into()));
        }
        if let Some(name) = &self.name {
            map.insert("name".into(), Value::String(name.clone()));
        }
        if let Some(meaning) = &self.meaning {
            map.insert("meaning".into(), meaning.clone());
        }
        if let Some(literals) = &self.literals {
            map.insert(
                "value".into(),
                Value::Array(literals.iter().map(literal_value).collect()),
            );
        }
        Value::Object(map)
    }
}

fn form_name(form: Form) -> &'static str {
    match form {
        Form::Primitive => "Primitive",
        Form::Union => "Union",
        Form::Intersect => "Intersect",
        Form::Alias => "Alias",
        Form::Object => "Object",
        Form::Function => "Function",
    }
}

fn literal_value(lit: &Literal) -> Value {
    match lit {
        Literal::Bool(b) => Value::Bool(*b),
        Literal::Int(n) => Value::from(*n),
        Literal::Str(s) => Value::String(s.clone()),
    }
}

fn invalid(msg: impl Into<String>) -> Error {
    Error::InvalidDefinition(msg.into())
}

impl TryFrom<Definition> for TypeRepr {
    type Error = Error;

    fn try_from(def: Definition) -> Result<Self> {
        let form = def.form.ok_or_else(|| invalid("missing `form`"))?;
        let meaning = def.meaning.ok_or_else(|| invalid("missing `meaning`"))?;
        let meaning = decode_meaning(form, meaning)?;
        let repr = TypeRepr::new(def.name, meaning);
        Ok(match def.literals {
            Some(literals) => repr.with_literals(literals),
            None => repr,
        })
    }
}

/// Accepts a kind name or an AST token spelling.
fn decode_kind(text: &str) -> Result<Kind> {
    Kind::from_name(text).map_or_else(|| Kind::from_token(text), Ok)
}

fn single(value: Value, form: Form) -> Result<Value> {
    match value {
        Value::Array(mut items) => {
            if items.len() != 1 {
                return Err(invalid(format!(
                    "{} form carries {} entries, expected exactly one",
                    form_name(form),
                    items.len()
                )));
            }
            Ok(items.remove(0))
        }
        other => Ok(other),
    }
}

fn decode_meaning(form: Form, value: Value) -> Result<Meaning> {
    match form {
        Form::Primitive => match single(value, form)? {
            Value::String(s) => Ok(Meaning::Primitive(decode_kind(&s)?)),
            other => Err(invalid(format!("primitive meaning must be a kind name, got {other}"))),
        },
        Form::Union => Ok(Meaning::Union(decode_members(value)?)),
        Form::Intersect => Ok(Meaning::Intersect(decode_members(value)?)),
        Form::Alias => {
            let target = decode_type_ref(single(value, form)?)?;
            Ok(Meaning::Alias(Box::new(target)))
        }
        Form::Object => {
            let Value::Object(map) = value else {
                return Err(invalid("object meaning must be a map of fields"));
            };
            Ok(Meaning::Object(decode_fields(map)?))
        }
        Form::Function => {
            let Value::Object(mut map) = value else {
                return Err(invalid("function meaning must be a map"));
            };
            let params = match map.remove("parameters") {
                Some(Value::Object(params)) => decode_fields(params)?,
                Some(Value::Null) | None => IndexMap::new(),
                Some(_) => return Err(invalid("function `parameters` must be a map")),
            };
            let ret = match map.remove("return") {
                Some(Value::Null) | None => TypeRepr::primitive(Kind::Any),
                Some(value) => decode_type_ref(value)?,
            };
            Ok(Meaning::Function {
                params,
                ret: Box::new(ret),
            })
        }
    }
}

fn decode_members(value: Value) -> Result<Vec<Member>> {
    let Value::Array(items) = value else {
        return Err(invalid("union and intersect meanings must be lists"));
    };
    if items.is_empty() {
        return Err(invalid("union and intersect meanings must not be empty"));
    }
    items.into_iter().map(decode_member).collect()
}

fn decode_member(value: Value) -> Result<Member> {
    match value {
        Value::String(s) => Ok(match Kind::from_name(&s) {
            Some(kind) => Member::Kind(kind),
            None => Member::Literal(Literal::Str(s)),
        }),
        Value::Bool(b) => Ok(Member::Literal(Literal::Bool(b))),
        Value::Number(n) => n
            .as_i64()
            .map(|n| Member::Literal(Literal::Int(n)))
            .ok_or_else(|| invalid(format!("numeric literal `{n}` is not an integer"))),
        other => Err(invalid(format!("unsupported union member {other}"))),
    }
}

fn decode_fields(map: Map<String, Value>) -> Result<IndexMap<String, TypeRepr>> {
    map.into_iter()
        .map(|(name, value)| Ok((name, decode_type_ref(value)?)))
        .collect()
}

fn decode_type_ref(value: Value) -> Result<TypeRepr> {
    match value {
        Value::String(s) => Ok(TypeRepr::primitive(decode_kind(&s)?)),
        Value::Object(_) => {
            let def: Definition = serde_json::from_value(value)?;
            TypeRepr::try_from(def)
        }
        other => Err(invalid(format!("expected a kind name or definition, got {other}"))),
    }
}

impl From<&TypeRepr> for Definition {
    fn from(repr: &TypeRepr) -> Self {
        let literals = match repr.form() {
            // Union literals are recovered from the members.
            Form::Union | Form::Intersect => None,
            _ => repr.literals().map(|l| l.iter().cloned().collect()),
        };
        Definition {
            form: Some(repr.form()),
            name: Some(repr.name().to_string()),
            meaning: Some(encode_meaning(repr.meaning())),
            literals,
        }
    }
}

impl From<TypeRepr> for Definition {
    fn from(repr: TypeRepr) -> Self {
        Definition::from(&repr)
    }
}

fn encode_meaning(meaning: &Meaning) -> Value {
    match meaning {
        Meaning::Primitive(kind) => Value::Array(vec![Value::String(kind.name().into())]),
        Meaning::Union(members) | Meaning::Intersect(members) => {
            Value::Array(members.iter().map(encode_member).collect())
        }
        Meaning::Alias(target) => Value::Array(vec![encode_type_ref(target)]),
        Meaning::Object(fields) => Value::Object(encode_fields(fields)),
        Meaning::Function { params, ret } => {
            let mut map = Map::new();
            map.insert("parameters".into(), Value::Object(encode_fields(params)));
            map.insert("return".into(), encode_type_ref(ret));
            Value::Object(map)
        }
    }
}

fn encode_member(member: &Member) -> Value {
    match member {
        Member::Kind(kind) => Value::String(kind.name().into()),
        Member::Literal(lit) => literal_value(lit),
    }
}

fn encode_fields(fields: &IndexMap<String, TypeRepr>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(name, ty)| (name.clone(), encode_type_ref(ty)))
        .collect()
}

/// Plain primitives collapse to their kind name.
fn encode_type_ref(repr: &TypeRepr) -> Value {
    match repr.primitive_kind() {
        Some(kind) if repr.name() == kind.name() && !repr.is_literal() => {
            Value::String(kind.name().into())
        }
        _ => Definition::from(repr).to_value(),
    }
}
