//! Primitive kinds: the closed set of leaf types every representation resolves to.
//!
//! Kinds have two spellings:
//! - **Name**: the enum variant name (`"Number"`, `"InBuiltOperator"`). Used for
//!   graph node ids and for the persisted JSON format.
//! - **Token**: the spelling an AST producer writes into `Type_t`. Several AST
//!   tokens fold onto one kind (`"Variable"` and `"Member"` become `Unknown`,
//!   `"Operator"` becomes `InBuiltOperator`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Error;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Kind {
    Unknown,
    String,
    Number,
    Boolean,
    Any,
    NotApplicable,
    Never,
    Function,
    Object,
    Date,
    InBuiltOperator,
    Union,
    Intersect,
}

impl Kind {
    /// All kinds in declaration order. The equivalence graph seeds one basal node per entry.
    pub const ALL: [Kind; 13] = [
        Kind::Unknown,
        Kind::String,
        Kind::Number,
        Kind::Boolean,
        Kind::Any,
        Kind::NotApplicable,
        Kind::Never,
        Kind::Function,
        Kind::Object,
        Kind::Date,
        Kind::InBuiltOperator,
        Kind::Union,
        Kind::Intersect,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Kind::Unknown => "Unknown",
            Kind::String => "String",
            Kind::Number => "Number",
            Kind::Boolean => "Boolean",
            Kind::Any => "Any",
            Kind::NotApplicable => "NotApplicable",
            Kind::Never => "Never",
            Kind::Function => "Function",
            Kind::Object => "Object",
            Kind::Date => "Date",
            Kind::InBuiltOperator => "InBuiltOperator",
            Kind::Union => "Union",
            Kind::Intersect => "Intersect",
        }
    }

    /// Exact lookup by variant name. Token spellings are not accepted here.
    pub fn from_name(name: &str) -> Option<Kind> {
        Kind::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Resolve an AST `Type_t` token.
    ///
    /// This is a deliberate narrowing: statement-level tokens carry no type of
    /// their own and fold onto `Unknown` or `InBuiltOperator`.
    pub fn from_token(token: &str) -> Result<Kind, Error> {
        let kind = match token {
            "Variable" | "Member" | "Return" => Kind::Unknown,
            "Operator" | "PostInc" | "Callable" | "Compound" | "If" => Kind::InBuiltOperator,
            other => Kind::from_name(other)
                .ok_or_else(|| Error::InvalidDefinition(format!("unknown kind token `{other}`")))?,
        };
        Ok(kind)
    }

    /// Spelling used when writing a kind back as an AST token.
    pub fn token(self) -> &'static str {
        match self {
            Kind::Unknown => "Variable",
            Kind::InBuiltOperator => "Operator",
            other => other.name(),
        }
    }

    /// `Any` and `Unknown` compare equal to every representation.
    pub fn is_wildcard(self) -> bool {
        matches!(self, Kind::Any | Kind::Unknown)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
