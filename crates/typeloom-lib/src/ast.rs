//! AST input model.
//!
//! The AST is produced by an external parser and read as JSON:
//!
//! ```json
//! {"Methods":    {"main": [{"Name": "main", "Parameters": [{"Value": "x", "ID": "x"}],
//!                           "Body": [[{"Tag": "Binary", "Value": "Eq", ...}], ...]}]},
//!  "Attributes": {"balance": [{"Type_t": "Number"}]}}
//! ```
//!
//! Decoding is two-step. Serde reads the loose wire shape (`Raw*` types), then
//! `Program::from_raw` converts it into typed nodes with a closed `Tag` set.
//! An unknown tag fails there with `UnhandledNodeKind`, so the inference
//! dispatcher only ever sees tags it matches exhaustively.

use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use typeloom_core::Kind;

use crate::{Error, Result};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Tag {
    Unary,
    Binary,
    Nary,
    Identifier,
    If,
    Compound,
    Call,
    Return,
    Object,
    Member,
    Constant,
}

impl Tag {
    pub const ALL: [Tag; 11] = [
        Tag::Unary,
        Tag::Binary,
        Tag::Nary,
        Tag::Identifier,
        Tag::If,
        Tag::Compound,
        Tag::Call,
        Tag::Return,
        Tag::Object,
        Tag::Member,
        Tag::Constant,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tag::Unary => "Unary",
            Tag::Binary => "Binary",
            Tag::Nary => "Nary",
            Tag::Identifier => "Identifier",
            Tag::If => "If",
            Tag::Compound => "Compound",
            Tag::Call => "Call",
            Tag::Return => "Return",
            Tag::Object => "Object",
            Tag::Member => "Member",
            Tag::Constant => "Constant",
        }
    }
}

impl TryFrom<&str> for Tag {
    type Error = Error;

    fn try_from(name: &str) -> Result<Self> {
        Tag::ALL
            .into_iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| Error::UnhandledNodeKind(name.to_string()))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Expression node.
#[derive(Clone, Debug)]
pub struct Node {
    pub tag: Tag,
    /// Syntactic value: variable name, operator name, literal text, field name.
    pub value: String,
    /// Declared kind token (`"Number"`, `"Variable"`, `"Operator"`, ...).
    pub type_t: String,
    /// Graph and store key.
    pub id: String,
    pub args: Vec<Node>,
}

impl Node {
    /// Kind named by `type_t`, with AST token folding.
    pub fn kind(&self) -> Result<Kind> {
        Ok(Kind::from_token(&self.type_t)?)
    }

    /// Operator-typed nodes are not recorded in the store.
    pub fn is_operator(&self) -> bool {
        self.type_t == "Operator"
    }

    /// The `index`-th child, or `MalformedNode` when absent.
    pub fn arg(&self, index: usize) -> Result<&Node> {
        self.args.get(index).ok_or_else(|| Error::MalformedNode {
            id: self.id.clone(),
            tag: self.tag.name().to_string(),
            reason: format!("expected at least {} child node(s), found {}", index + 1, self.args.len()),
        })
    }

    /// Pre-order walk over this node and its descendants.
    pub fn walk(&self) -> impl Iterator<Item = &Node> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.args.iter().rev());
            Some(node)
        })
    }
}

#[derive(Clone, Debug)]
pub struct Parameter {
    pub value: String,
    pub id: String,
}

/// One top-level statement: the first expression of a body entry.
#[derive(Clone, Debug)]
pub struct Statement {
    /// 1-based position in the function body.
    pub line: usize,
    pub node: Node,
}

#[derive(Clone, Debug)]
pub struct Function {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub body: Vec<Statement>,
}

#[derive(Clone, Debug)]
pub struct Attribute {
    pub type_t: String,
}

#[derive(Clone, Debug, Default)]
pub struct Program {
    pub methods: IndexMap<String, Function>,
    pub attributes: IndexMap<String, Attribute>,
}

impl Program {
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawProgram = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    pub fn from_raw(raw: RawProgram) -> Result<Self> {
        let mut methods = IndexMap::new();
        for (key, entry) in raw.methods {
            let Some(function) = entry.into_first() else {
                return Err(Error::MalformedNode {
                    id: key,
                    tag: "Function".into(),
                    reason: "empty method entry".into(),
                });
            };
            let name = function.name.unwrap_or_else(|| key.clone());
            let parameters = function
                .parameters
                .unwrap_or_default()
                .into_iter()
                .map(|p| Parameter {
                    id: p.id.map(scalar_text).unwrap_or_else(|| scalar_text(p.value.clone())),
                    value: scalar_text(p.value),
                })
                .collect();
            let mut body = Vec::new();
            for (i, stmt) in function.body.unwrap_or_default().into_iter().enumerate() {
                if let Some(node) = stmt.into_first() {
                    body.push(Statement {
                        line: i + 1,
                        node: Node::try_from(node)?,
                    });
                }
            }
            methods.insert(
                key,
                Function {
                    name,
                    parameters,
                    body,
                },
            );
        }

        let mut attributes = IndexMap::new();
        for (name, entry) in raw.attributes {
            if let Some(attr) = entry.into_first() {
                attributes.insert(
                    name,
                    Attribute {
                        type_t: attr.type_t,
                    },
                );
            }
        }

        Ok(Program {
            methods,
            attributes,
        })
    }
}

// ============================================================================
// Wire shape
// ============================================================================

/// A value written either bare or wrapped in a (usually one-element) list.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum OneOrList<T> {
    List(Vec<T>),
    One(T),
}

impl<T> OneOrList<T> {
    pub fn into_first(self) -> Option<T> {
        match self {
            OneOrList::List(items) => items.into_iter().next(),
            OneOrList::One(item) => Some(item),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawProgram {
    #[serde(rename = "Methods", default)]
    pub methods: IndexMap<String, OneOrList<RawFunction>>,
    #[serde(rename = "Attributes", default)]
    pub attributes: IndexMap<String, OneOrList<RawAttribute>>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawFunction {
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Parameters")]
    pub parameters: Option<Vec<RawParameter>>,
    #[serde(rename = "Body")]
    pub body: Option<Vec<OneOrList<RawNode>>>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawParameter {
    #[serde(rename = "Value")]
    pub value: Value,
    #[serde(rename = "ID")]
    pub id: Option<Value>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawAttribute {
    #[serde(rename = "Type_t")]
    pub type_t: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawNode {
    #[serde(rename = "Tag")]
    pub tag: String,
    #[serde(rename = "Value", default)]
    pub value: Value,
    #[serde(rename = "Type_t", default)]
    pub type_t: Option<String>,
    #[serde(rename = "ID", default)]
    pub id: Value,
    #[serde(rename = "Args", default)]
    pub args: Option<Vec<RawNode>>,
}

impl TryFrom<RawNode> for Node {
    type Error = Error;

    fn try_from(raw: RawNode) -> Result<Self> {
        let tag = Tag::try_from(raw.tag.as_str())?;
        let args = raw
            .args
            .unwrap_or_default()
            .into_iter()
            .map(Node::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Node {
            tag,
            value: scalar_text(raw.value),
            type_t: raw.type_t.unwrap_or_else(|| Kind::Unknown.token().to_string()),
            id: scalar_text(raw.id),
            args,
        })
    }
}

/// Strings as-is, other scalars by their JSON spelling, `null` as empty.
fn scalar_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
