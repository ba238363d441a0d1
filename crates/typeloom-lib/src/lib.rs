//! typeloom: static type inference and consistency checking over a JSON AST.
//!
//! # Example
//!
//! ```
//! use typeloom_lib::{Annotations, InferOptions, Program, infer};
//!
//! let ast = r#"{
//!   "Methods": {"main": [{"Name": "main", "Parameters": [], "Body": [[
//!     {"Tag": "Binary", "Value": "Eq", "Type_t": "Operator", "ID": "e1", "Args": [
//!       {"Tag": "Identifier", "Value": "x", "Type_t": "Variable", "ID": "x", "Args": []},
//!       {"Tag": "Constant", "Value": "123", "Type_t": "Number", "ID": "c1", "Args": []}
//!     ]}
//!   ]]}]},
//!   "Attributes": {}
//! }"#;
//!
//! let program = Program::from_json(ast).unwrap();
//! let run = infer(&program, &Annotations::default(), &InferOptions::default()).unwrap();
//! assert!(run.diagnostics.is_empty());
//! assert_eq!(run.store.get("x").unwrap().inferred.to_string(), "Number");
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod annotations;
pub mod ast;
pub mod check;
pub mod diagnostics;
pub mod infer;
pub mod operators;
pub mod trace;
pub mod typedef;

#[cfg(test)]
mod annotations_tests;
#[cfg(test)]
mod test_fixtures;
#[cfg(test)]
mod typedef_tests;

pub use annotations::Annotations;
pub use ast::{Node, Program, Tag};
pub use check::{CheckReport, check};
pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Location, Severity};
pub use infer::{InferOptions, Inference, infer, infer_with};
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
pub use typeloom_core::{Colors, Graph, GraphPrinter, Kind, Store, StoreValue, TypeRepr};

/// Errors raised while loading inputs or running inference.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] typeloom_core::Error),

    /// A `Member` node names an attribute absent from the attribute table.
    #[error("attribute `{0}` is not declared")]
    MissingAttribute(String),

    /// A call targets an identifier whose inferred type is not `Function`.
    #[error("`{value}` is not callable: inferred as {found}")]
    NotCallable {
        id: String,
        value: String,
        found: Box<TypeRepr>,
    },

    /// An AST node carries a `Tag` outside the closed tag set.
    #[error("unhandled node kind `{0}`")]
    UnhandledNodeKind(String),

    /// A node lacks the children its tag requires.
    #[error("malformed {tag} node `{id}`: {reason}")]
    MalformedNode {
        id: String,
        tag: String,
        reason: String,
    },

    #[error("unsupported operator `{0}`")]
    UnsupportedOperator(String),

    #[error("`{function}` declares {found} parameter(s) but {expected} are annotated")]
    ParameterCountMismatch {
        function: String,
        expected: usize,
        found: usize,
    },

    #[error("custom type `{0}` is not defined")]
    UnknownCustomType(String),

    /// A parameter annotation resolves neither to a graph node nor to a bound custom type.
    #[error("cannot resolve the annotated type of parameter `{parameter}` in `{function}`")]
    UnresolvedParameterType { function: String, parameter: String },

    /// Custom-type definition source that does not parse.
    #[error("type definition line {line}: {reason}")]
    TypedefSyntax { line: usize, reason: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Id of the node or variable the error is about, if any.
    pub fn subject(&self) -> Option<&str> {
        match self {
            Error::Core(typeloom_core::Error::ConflictingInferredTypes { id, .. })
            | Error::Core(typeloom_core::Error::ConflictingDeclaredTypes { id, .. })
            | Error::Core(typeloom_core::Error::NodeNotFound(id))
            | Error::Core(typeloom_core::Error::UntypedNode(id))
            | Error::NotCallable { id, .. }
            | Error::MalformedNode { id, .. } => Some(id),
            _ => None,
        }
    }
}

/// Result type for inference operations.
pub type Result<T> = std::result::Result<T, Error>;
